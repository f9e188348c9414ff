//! The compiled key-matching automaton.
//!
//! A byte trie over the full wire-name set, compiled once per table and
//! interpreted at lookup time. The original design point for this kind of
//! structure is runtime-emitted matching code; an interpreted trie preserves
//! the same matching semantics with one-time build cost proportional to the
//! total byte count of all wire names.
//!
//! Matching is generic over [`KeyReader`], so both reader capabilities run
//! the exact same trie logic and cannot diverge for identical key
//! content; only the byte-fetch step differs.

use smallvec::SmallVec;
use tracing::debug;

use crate::core::table::NameEntry;
use crate::matcher::reader::KeyReader;

/// Sentinel lookup result: no member corresponds to the wire name.
///
/// A valid, expected outcome for unknown or extra keys, not an error.
pub const NOT_FOUND: i32 = -1;

/// One trie node: outgoing edges sorted by byte, plus the index reported
/// when the key ends exactly at this node.
#[derive(Debug, Clone)]
struct Node {
    edges: SmallVec<[(u8, u32); 4]>,
    terminal: i32,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            edges: SmallVec::new(),
            terminal: NOT_FOUND,
        }
    }
}

/// Character-driven matcher over a wire-name set.
///
/// Immutable once compiled; lookups are pure reads and safe for unbounded
/// concurrent callers.
#[derive(Debug, Clone)]
pub struct Automaton {
    nodes: Vec<Node>,
}

impl Automaton {
    /// Compile the trie from an ordered entry sequence.
    pub fn compile(entries: &[NameEntry]) -> Self {
        let mut nodes = vec![Node::default()];
        for entry in entries {
            let mut node = 0usize;
            for &byte in entry.wire_name().as_bytes() {
                let edges = &nodes[node].edges;
                node = match edges.binary_search_by_key(&byte, |edge| edge.0) {
                    Ok(pos) => nodes[node].edges[pos].1 as usize,
                    Err(pos) => {
                        let next = nodes.len() as u32;
                        nodes.push(Node::default());
                        nodes[node].edges.insert(pos, (byte, next));
                        next as usize
                    }
                };
            }
            // Entries are deduplicated upstream, so each terminal is set once.
            nodes[node].terminal = entry.index() as i32;
        }

        debug!(
            names = entries.len(),
            nodes = nodes.len(),
            "compiled key automaton"
        );
        Self { nodes }
    }

    /// Match the key the reader is positioned on.
    ///
    /// Returns the entry index if the key reproduces a wire name exactly,
    /// byte for byte, ending precisely at the key's terminating delimiter;
    /// [`NOT_FOUND`] otherwise. A wire name that is a strict prefix of
    /// another never matches the longer key. On divergence the remainder of
    /// the key is drained so the reader is always positioned past the key
    /// when this returns.
    pub fn run<R: KeyReader>(&self, reader: &mut R) -> i32 {
        let mut node = 0usize;
        while let Some(byte) = reader.next_key_byte() {
            let edges = &self.nodes[node].edges;
            match edges.binary_search_by_key(&byte, |edge| edge.0) {
                Ok(pos) => node = edges[pos].1 as usize,
                Err(_) => {
                    while reader.next_key_byte().is_some() {}
                    return NOT_FOUND;
                }
            }
        }
        self.nodes[node].terminal
    }

    /// Number of trie nodes, including the root.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}
