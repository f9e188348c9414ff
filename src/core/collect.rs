//! Member collection: enumeration, shadowing resolution, and grouping.
//!
//! This is the construction-time front half of the lookup core. Starting
//! from a [`TypeDescriptor`], the collector walks the inheritance chain,
//! filters to settable members, resolves base-class declarations hidden by
//! derived re-declarations, applies the naming format, and groups the
//! survivors into wire-name entries ready for index assignment.

use indexmap::IndexMap;
use smallvec::SmallVec;

use crate::core::config::NamingFormat;
use crate::core::descriptor::{Member, TypeDescriptor};
use crate::core::table::NameEntry;

/// Enumerate every settable instance member reachable through the type's
/// inheritance chain, root type first. Read-only properties are dropped
/// here; the caller-supplied inclusion predicate is applied afterwards.
pub fn enumerate_members(ty: &TypeDescriptor) -> Vec<Member> {
    let mut discovered = Vec::new();
    for declaring in ty.chain_root_first() {
        let depth = declaring.depth();
        for member in declaring.members() {
            if !member.is_settable() {
                continue;
            }
            discovered.push(Member::new(
                member.name(),
                member.kind(),
                declaring.name(),
                depth,
            ));
        }
    }
    discovered
}

/// Resolve shadowing: of all members sharing one declared name, keep the
/// declaration from the most-derived type (maximum declaration depth).
///
/// A depth tie can only come from duplicate declarations inside a single
/// descriptor; the first declaration wins, keeping resolution deterministic.
pub fn resolve_shadowing(members: Vec<Member>) -> Vec<Member> {
    let mut groups: IndexMap<String, Vec<Member>> = IndexMap::new();
    for member in members {
        groups
            .entry(member.declared_name().to_string())
            .or_default()
            .push(member);
    }

    let mut survivors = Vec::with_capacity(groups.len());
    for (_, group) in groups {
        let mut candidates = group.into_iter();
        if let Some(first) = candidates.next() {
            let keep = candidates.fold(first, |keep, candidate| {
                if candidate.depth() > keep.depth() {
                    candidate
                } else {
                    keep
                }
            });
            survivors.push(keep);
        }
    }
    survivors
}

/// Produce the ordered wire-name entry sequence for a type: enumerate,
/// filter, resolve shadowing, apply the naming format, group colliding wire
/// names, then sort byte-ordinally and assign dense indices from zero.
pub(crate) fn build_entries(
    ty: &TypeDescriptor,
    naming: NamingFormat,
    include: &dyn Fn(&Member) -> bool,
) -> Vec<NameEntry> {
    let discovered = enumerate_members(ty)
        .into_iter()
        .filter(|member| include(member))
        .collect();
    let survivors = resolve_shadowing(discovered);

    let mut groups: IndexMap<String, SmallVec<[Member; 1]>> = IndexMap::new();
    for member in survivors {
        let wire_name = naming.apply(member.declared_name()).into_owned();
        groups.entry(wire_name).or_default().push(member);
    }

    let mut entries: Vec<NameEntry> = groups
        .into_iter()
        .map(|(wire_name, members)| NameEntry::new(wire_name, members))
        .collect();

    // Ordinal, case-sensitive ordering; index = rank in this order.
    entries.sort_unstable_by(|a, b| a.wire_name().as_bytes().cmp(b.wire_name().as_bytes()));
    for (index, entry) in entries.iter_mut().enumerate() {
        entry.assign_index(index);
    }
    entries
}
