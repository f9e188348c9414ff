//! The public lookup facade: one immutable bundle per (type, naming format).

use std::io::Read;

use ahash::AHashMap;
use tracing::debug;

use crate::core::config::{LookupConfig, NamingFormat};
use crate::core::descriptor::{Member, TypeDescriptor};
use crate::core::table::{NameEntry, NameTable};
use crate::matcher::automaton::Automaton;
use crate::matcher::reader::{SliceKeyReader, StreamKeyReader};

/// Wire-name lookup for one (type, naming format) pair.
///
/// Bundles the ordered name table with its compiled automaton. Built once,
/// then immutable: every operation here is a pure read, reentrant and safe
/// for arbitrary concurrent callers.
#[derive(Debug, Clone)]
pub struct KeyLookup {
    naming: NamingFormat,
    table: NameTable,
    automaton: Automaton,
}

impl KeyLookup {
    /// Build the lookup for a type, including every settable member.
    pub fn build(ty: &TypeDescriptor, naming: NamingFormat) -> Self {
        Self::build_with_filter(ty, naming, &|_| true)
    }

    /// Build the lookup for a type from a [`LookupConfig`].
    pub fn build_with_config(ty: &TypeDescriptor, config: &LookupConfig) -> Self {
        Self::build(ty, config.naming)
    }

    /// Build the lookup for a type with an externally supplied inclusion
    /// predicate over discovered members.
    pub fn build_with_filter(
        ty: &TypeDescriptor,
        naming: NamingFormat,
        include: &dyn Fn(&Member) -> bool,
    ) -> Self {
        let table = NameTable::build_with_filter(ty, naming, include);
        let automaton = Automaton::compile(table.entries());

        debug!(
            type_name = ty.name(),
            naming = %naming,
            names = table.len(),
            nodes = automaton.node_count(),
            "built key lookup"
        );

        Self {
            naming,
            table,
            automaton,
        }
    }

    /// Streaming lookup: match the key the reader is positioned on and
    /// return its index, or [`NOT_FOUND`](crate::matcher::automaton::NOT_FOUND).
    pub fn find_index<R: Read>(&self, reader: &mut StreamKeyReader<R>) -> i32 {
        self.automaton.run(reader)
    }

    /// Hot-path streaming lookup over buffered input. Identical matching
    /// semantics to [`find_index`](Self::find_index); only the byte-fetch
    /// mechanics differ.
    pub fn find_index_fast(&self, reader: &mut SliceKeyReader<'_>) -> i32 {
        self.automaton.run(reader)
    }

    /// Direct lookup for a caller holding an already-materialized key
    /// string. Same result space as the streaming lookups.
    pub fn index_of(&self, wire_name: &str) -> i32 {
        self.table
            .index_of(wire_name)
            .map_or(crate::matcher::automaton::NOT_FOUND, |index| index as i32)
    }

    /// The full wire-name → index map.
    pub fn lookup(&self) -> &AHashMap<String, usize> {
        self.table.lookup()
    }

    /// The ordered name table backing this lookup.
    pub fn table(&self) -> &NameTable {
        &self.table
    }

    /// Entries in index order.
    pub fn entries(&self) -> &[NameEntry] {
        self.table.entries()
    }

    /// Introspection: wire name → candidate members, all candidates
    /// included. Diagnostics and test harnesses only.
    pub fn entry_map(&self) -> AHashMap<String, Vec<Member>> {
        self.table.entry_map()
    }

    /// Naming format this lookup was built with.
    pub fn naming(&self) -> NamingFormat {
        self.naming
    }

    /// Number of distinct wire names.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Whether the lookup has no wire names.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}
