//! # Wirekey-RS: Wire-Name Lookup Core for Streaming JSON Deserializers
//!
//! Maps a JSON object-key name, read incrementally byte by byte straight
//! off an input stream and never materialized as a string, to a
//! stable integer index identifying the settable member it refers to, or to
//! a `NOT_FOUND` sentinel. The lookup sits in the innermost loop of
//! deserialization (once per object key), so it avoids string allocation
//! and any per-call search cost beyond character-driven branching.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Lookup Facade + Registry                │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Member Collector   │   Name Table    │     Automaton       │
//! │                     │                 │                     │
//! │ • descriptor walk   │ • ordinal sort  │ • byte trie         │
//! │ • shadowing         │ • dense indices │ • two reader        │
//! │ • naming format     │ • direct map    │   capabilities      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Built once per (type, naming format) pair, lazily on first use via the
//! memoizing registry, and immutable afterwards: every lookup operation is
//! a pure read, safe for unbounded concurrent callers.
//!
//! ## Quick Start
//!
//! ```rust
//! use wirekey_rs::{KeyLookup, NamingFormat, SliceKeyReader, TypeDescriptor, NOT_FOUND};
//!
//! let order = TypeDescriptor::new("Order")
//!     .with_property("Id")
//!     .with_property("Name");
//!
//! let lookup = KeyLookup::build(&order, NamingFormat::CamelCase);
//!
//! // Reader positioned just past the opening quote of the key.
//! let mut reader = SliceKeyReader::new(b"name\": \"socks\"");
//! assert_eq!(lookup.find_index_fast(&mut reader), 1);
//!
//! let mut reader = SliceKeyReader::new(b"unknown\": null");
//! assert_eq!(lookup.find_index_fast(&mut reader), NOT_FOUND);
//! ```

#![warn(missing_docs)]
#![warn(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// Construction-time machinery
pub mod core {
    //! Member collection, naming, and the ordered wire-name table.

    pub mod collect;
    pub mod config;
    pub mod descriptor;
    pub mod errors;
    pub mod table;
}

// Character-driven matching
pub mod matcher {
    //! The compiled key automaton and its reader capabilities.

    pub mod automaton;
    pub mod reader;
}

// Public surface and memoization
pub mod api {
    //! Lookup facade and the process-wide bundle registry.

    pub mod lookup;
    pub mod registry;
}

// Re-export primary types for convenience
pub use crate::api::lookup::KeyLookup;
pub use crate::api::registry::{global_registry, lookup_for, LookupRegistry};
pub use crate::core::config::{LookupConfig, NamingFormat};
pub use crate::core::descriptor::{Member, MemberDescriptor, MemberKind, TypeDescriptor};
pub use crate::core::errors::{Result, ResultExt, WirekeyError};
pub use crate::core::table::{NameEntry, NameTable};
pub use crate::matcher::automaton::{Automaton, NOT_FOUND};
pub use crate::matcher::reader::{KeyReader, SliceKeyReader, StreamKeyReader};

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
