//! Process-wide memoization of lookup bundles.
//!
//! Construction of a [`KeyLookup`] happens at most once per distinct
//! (type, naming format) pair, triggered by first use, and the bundle then
//! lives for the remaining process lifetime; there is no teardown. The
//! registry is the explicit form of that behavior: a concurrency-safe keyed
//! cache rather than hidden per-type global state.

use std::sync::Arc;

use ahash::RandomState;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use once_cell::sync::Lazy;
use tracing::trace;

use crate::api::lookup::KeyLookup;
use crate::core::config::NamingFormat;
use crate::core::descriptor::{Member, TypeDescriptor};
use crate::core::errors::{Result, WirekeyError};

/// Registry key: descriptor identity is its type name.
type RegistryKey = (String, NamingFormat);

/// Concurrency-safe cache of built lookup bundles.
///
/// The map's entry API holds the key's shard lock across the check-and-build
/// step, so concurrent first-time callers for one pair observe exactly one
/// construction; callers blocked during a build see only the fully built,
/// immutable bundle.
#[derive(Debug, Default)]
pub struct LookupRegistry {
    bundles: DashMap<RegistryKey, Arc<KeyLookup>, RandomState>,
}

impl LookupRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            bundles: DashMap::with_hasher(RandomState::new()),
        }
    }

    /// Return the bundle for a (type, naming format) pair, building it on
    /// first use with every settable member included.
    pub fn get_or_build(&self, ty: &TypeDescriptor, naming: NamingFormat) -> Arc<KeyLookup> {
        self.get_or_build_with(ty, naming, &|_| true)
    }

    /// Return the bundle for a (type, naming format) pair, building it on
    /// first use with the supplied inclusion predicate.
    ///
    /// The predicate participates only in the first build for a pair; later
    /// calls return the memoized bundle unchanged.
    pub fn get_or_build_with(
        &self,
        ty: &TypeDescriptor,
        naming: NamingFormat,
        include: &dyn Fn(&Member) -> bool,
    ) -> Arc<KeyLookup> {
        let key = (ty.name().to_string(), naming);
        if let Some(bundle) = self.bundles.get(&key) {
            trace!(type_name = ty.name(), naming = %naming, "lookup registry hit");
            return bundle.clone();
        }

        self.bundles
            .entry(key)
            .or_insert_with(|| Arc::new(KeyLookup::build_with_filter(ty, naming, include)))
            .clone()
    }

    /// Checked registration: validate the descriptor, then build and
    /// memoize its bundle. Errors on a malformed descriptor and on a pair
    /// that already holds a bundle, instead of silently reusing it.
    pub fn register(&self, ty: &TypeDescriptor, naming: NamingFormat) -> Result<Arc<KeyLookup>> {
        ty.validate()?;
        match self.bundles.entry((ty.name().to_string(), naming)) {
            Entry::Occupied(_) => Err(WirekeyError::descriptor(
                ty.name(),
                format!("a lookup for naming format '{naming}' is already registered"),
            )),
            Entry::Vacant(slot) => {
                let bundle = Arc::new(KeyLookup::build(ty, naming));
                slot.insert(Arc::clone(&bundle));
                Ok(bundle)
            }
        }
    }

    /// Whether a bundle exists for the pair.
    pub fn contains(&self, type_name: &str, naming: NamingFormat) -> bool {
        self.bundles
            .contains_key(&(type_name.to_string(), naming))
    }

    /// Number of memoized bundles.
    pub fn len(&self) -> usize {
        self.bundles.len()
    }

    /// Whether the registry holds no bundles.
    pub fn is_empty(&self) -> bool {
        self.bundles.is_empty()
    }
}

/// Global lookup registry for the process.
static GLOBAL_REGISTRY: Lazy<LookupRegistry> = Lazy::new(LookupRegistry::new);

/// Get a reference to the global lookup registry.
pub fn global_registry() -> &'static LookupRegistry {
    &GLOBAL_REGISTRY
}

/// Convenience: the memoized bundle for a pair, via the global registry.
pub fn lookup_for(ty: &TypeDescriptor, naming: NamingFormat) -> Arc<KeyLookup> {
    global_registry().get_or_build(ty, naming)
}
