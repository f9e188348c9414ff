//! Explicit type descriptors consumed by the member collector.
//!
//! Rust has no runtime reflection over arbitrary host-language types, so the
//! member sets the lookup core operates on are registered explicitly: each
//! [`TypeDescriptor`] lists the fields and properties one type declares and
//! links to the descriptor of its base type, forming the inheritance chain
//! the collector walks for shadowing resolution.

use std::sync::Arc;

use ahash::AHashSet;

use crate::core::errors::{Result, WirekeyError};

/// Kind of settable member a descriptor declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    /// A public instance field.
    Field,
    /// A public instance property with a setter.
    Property,
}

/// A single member declaration inside a [`TypeDescriptor`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberDescriptor {
    name: String,
    kind: MemberKind,
    settable: bool,
}

impl MemberDescriptor {
    /// Declare a field. Fields are always settable.
    pub fn field(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: MemberKind::Field,
            settable: true,
        }
    }

    /// Declare a property, which may or may not expose a setter.
    pub fn property(name: impl Into<String>, settable: bool) -> Self {
        Self {
            name: name.into(),
            kind: MemberKind::Property,
            settable,
        }
    }

    /// Declared name of the member.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Member kind.
    pub fn kind(&self) -> MemberKind {
        self.kind
    }

    /// Whether the member can receive a deserialized value.
    pub fn is_settable(&self) -> bool {
        self.settable
    }
}

/// Descriptor for one type in an inheritance hierarchy.
///
/// Members are kept in declaration order; that order is the tie-break for
/// the (degenerate) case of two same-named declarations at the same depth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDescriptor {
    name: String,
    base: Option<Arc<TypeDescriptor>>,
    members: Vec<MemberDescriptor>,
}

impl TypeDescriptor {
    /// Create a descriptor for a type with no base.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base: None,
            members: Vec::new(),
        }
    }

    /// Set the base-type descriptor.
    pub fn with_base(mut self, base: Arc<TypeDescriptor>) -> Self {
        self.base = Some(base);
        self
    }

    /// Declare a field on this type.
    pub fn with_field(mut self, name: impl Into<String>) -> Self {
        self.members.push(MemberDescriptor::field(name));
        self
    }

    /// Declare a settable property on this type.
    pub fn with_property(mut self, name: impl Into<String>) -> Self {
        self.members.push(MemberDescriptor::property(name, true));
        self
    }

    /// Declare a read-only property on this type. Read-only properties are
    /// skipped by the member collector.
    pub fn with_readonly_property(mut self, name: impl Into<String>) -> Self {
        self.members.push(MemberDescriptor::property(name, false));
        self
    }

    /// Type name. Descriptor identity in the registry is keyed on this.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Base-type descriptor, if any.
    pub fn base(&self) -> Option<&Arc<TypeDescriptor>> {
        self.base.as_ref()
    }

    /// Members declared directly on this type, in declaration order.
    pub fn members(&self) -> &[MemberDescriptor] {
        &self.members
    }

    /// Declaration depth of this type: the count of types from the
    /// hierarchy root down to this type, root inclusive (root = 1).
    pub fn depth(&self) -> usize {
        let mut depth = 1;
        let mut cur = self.base.as_deref();
        while let Some(ty) = cur {
            depth += 1;
            cur = ty.base.as_deref();
        }
        depth
    }

    /// The inheritance chain from the hierarchy root down to this type.
    pub fn chain_root_first(&self) -> Vec<&TypeDescriptor> {
        let mut chain = Vec::new();
        let mut cur = Some(self);
        while let Some(ty) = cur {
            chain.push(ty);
            cur = ty.base.as_deref();
        }
        chain.reverse();
        chain
    }

    /// Check the declarations against the constraints the collector and
    /// registry rely on: no empty type or member names, and type names
    /// unique along the base chain (registry identity and declaration
    /// depth both key on them).
    pub fn validate(&self) -> Result<()> {
        let mut seen = AHashSet::new();
        for ty in self.chain_root_first() {
            if ty.name.is_empty() {
                return Err(WirekeyError::descriptor(
                    &self.name,
                    "a type in the base chain has an empty name",
                ));
            }
            if !seen.insert(ty.name.as_str()) {
                return Err(WirekeyError::descriptor(
                    &self.name,
                    format!(
                        "type name '{}' appears more than once in the base chain",
                        ty.name
                    ),
                ));
            }
            for member in &ty.members {
                if member.name.is_empty() {
                    return Err(WirekeyError::descriptor(
                        &self.name,
                        format!("type '{}' declares a member with an empty name", ty.name),
                    ));
                }
            }
        }
        Ok(())
    }
}

/// A settable member discovered by the collector: the declared name together
/// with where in the hierarchy it was declared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    declared_name: String,
    kind: MemberKind,
    declaring_type: String,
    depth: usize,
}

impl Member {
    pub(crate) fn new(
        declared_name: impl Into<String>,
        kind: MemberKind,
        declaring_type: impl Into<String>,
        depth: usize,
    ) -> Self {
        Self {
            declared_name: declared_name.into(),
            kind,
            declaring_type: declaring_type.into(),
            depth,
        }
    }

    /// Name the member was declared with, before any naming format applies.
    pub fn declared_name(&self) -> &str {
        &self.declared_name
    }

    /// Whether this is a field or a property.
    pub fn kind(&self) -> MemberKind {
        self.kind
    }

    /// Name of the type that declares this member.
    pub fn declaring_type(&self) -> &str {
        &self.declaring_type
    }

    /// Declaration depth of the declaring type (hierarchy root = 1).
    pub fn depth(&self) -> usize {
        self.depth
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth_counts_from_root() {
        let root = Arc::new(TypeDescriptor::new("Root").with_field("Name"));
        let mid = Arc::new(TypeDescriptor::new("Mid").with_base(root.clone()));
        let leaf = TypeDescriptor::new("Leaf").with_base(mid.clone());

        assert_eq!(root.depth(), 1);
        assert_eq!(mid.depth(), 2);
        assert_eq!(leaf.depth(), 3);
    }

    #[test]
    fn test_chain_root_first() {
        let root = Arc::new(TypeDescriptor::new("Root"));
        let leaf = TypeDescriptor::new("Leaf").with_base(root.clone());

        let chain: Vec<_> = leaf.chain_root_first().iter().map(|t| t.name().to_string()).collect();
        assert_eq!(chain, vec!["Root", "Leaf"]);
    }

    #[test]
    fn test_validate_accepts_well_formed_chain() {
        let base = Arc::new(TypeDescriptor::new("OrderBase").with_field("Name"));
        let ty = TypeDescriptor::new("Order")
            .with_base(base)
            .with_property("Id");
        assert!(ty.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_member_name() {
        let ty = TypeDescriptor::new("Order").with_field("");
        let err = ty.validate().unwrap_err();
        assert!(err.to_string().contains("empty name"));
    }

    #[test]
    fn test_validate_rejects_reused_type_name_in_chain() {
        let base = Arc::new(TypeDescriptor::new("Order"));
        let ty = TypeDescriptor::new("Order").with_base(base);
        let err = ty.validate().unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn test_member_declarations_keep_order() {
        let ty = TypeDescriptor::new("Order")
            .with_property("Id")
            .with_field("Total")
            .with_readonly_property("Hash");

        let names: Vec<_> = ty.members().iter().map(|m| m.name()).collect();
        assert_eq!(names, vec!["Id", "Total", "Hash"]);
        assert!(!ty.members()[2].is_settable());
        assert_eq!(ty.members()[1].kind(), MemberKind::Field);
    }
}
