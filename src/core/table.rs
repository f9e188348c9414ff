//! The ordered wire-name table and its direct lookup map.

use ahash::AHashMap;
use smallvec::SmallVec;
use tracing::debug;

use crate::core::collect;
use crate::core::config::NamingFormat;
use crate::core::descriptor::{Member, TypeDescriptor};

/// One wire name with its assigned index and candidate members.
///
/// The candidate list usually holds exactly one member; it holds more when a
/// naming format maps distinct declared names onto the same wire name. The
/// table records such collisions without adjudicating them; callers that
/// need a single setter take the first candidate (discovery order).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameEntry {
    wire_name: String,
    members: SmallVec<[Member; 1]>,
    index: usize,
}

impl NameEntry {
    pub(crate) fn new(wire_name: String, members: SmallVec<[Member; 1]>) -> Self {
        Self {
            wire_name,
            members,
            index: 0,
        }
    }

    pub(crate) fn assign_index(&mut self, index: usize) {
        self.index = index;
    }

    /// The wire name matched against incoming key text.
    pub fn wire_name(&self) -> &str {
        &self.wire_name
    }

    /// Candidate members for this wire name, in discovery order.
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    /// Dense index assigned by byte-ordinal rank of the wire name.
    pub fn index(&self) -> usize {
        self.index
    }
}

/// The immutable, ordered wire-name table for one (type, naming format)
/// pair.
///
/// Entry indices equal each wire name's rank under byte-for-byte ordinal
/// comparison over the final name set; rebuilding from the same descriptor
/// always reproduces the same indices. After construction the table is
/// read-only and safe to share across threads.
#[derive(Debug, Clone)]
pub struct NameTable {
    entries: Vec<NameEntry>,
    index_of: AHashMap<String, usize>,
}

impl NameTable {
    /// Build the table for a type, including every settable member.
    pub fn build(ty: &TypeDescriptor, naming: NamingFormat) -> Self {
        Self::build_with_filter(ty, naming, &|_| true)
    }

    /// Build the table for a type, keeping only members accepted by the
    /// supplied inclusion predicate.
    pub fn build_with_filter(
        ty: &TypeDescriptor,
        naming: NamingFormat,
        include: &dyn Fn(&Member) -> bool,
    ) -> Self {
        let entries = collect::build_entries(ty, naming, include);
        let index_of = entries
            .iter()
            .map(|entry| (entry.wire_name().to_string(), entry.index()))
            .collect();

        debug!(
            type_name = ty.name(),
            naming = %naming,
            entries = entries.len(),
            "built wire-name table"
        );

        Self { entries, index_of }
    }

    /// Entries in index order.
    pub fn entries(&self) -> &[NameEntry] {
        &self.entries
    }

    /// Number of distinct wire names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Direct lookup for an already-materialized key string.
    pub fn index_of(&self, wire_name: &str) -> Option<usize> {
        self.index_of.get(wire_name).copied()
    }

    /// The full wire-name → index map.
    pub fn lookup(&self) -> &AHashMap<String, usize> {
        &self.index_of
    }

    /// Introspection: the full table as wire name → candidate members.
    /// Diagnostics and test harnesses only; never on the hot path.
    pub fn entry_map(&self) -> AHashMap<String, Vec<Member>> {
        self.entries
            .iter()
            .map(|entry| (entry.wire_name().to_string(), entry.members().to_vec()))
            .collect()
    }
}
