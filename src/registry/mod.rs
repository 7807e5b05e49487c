//! Predicate-selected construction tables.
//!
//! A [`Registry`] maps predicates to constructors. Production evaluates every
//! predicate against a criterion and runs the constructors of the ones that
//! accept it:
//!
//! - [`Registry::produce_all`] builds one product per matching entry
//! - [`Registry::produce_one`] builds only the first match
//! - [`Registry::try_produce_all`] / [`Registry::try_produce_one`] do the
//!   same for constructors that return `Result`
//!
//! Named entries are keyed by name, unnamed ones by registration sequence,
//! and all are kept in insertion order.
//! The table stores recipes only; every product is built fresh and handed
//! to the caller with no reference kept.
//!
//! # Example
//!
//! ```
//! use selective_factory::registry::Registry;
//!
//! trait Shape {
//!     fn sides(&self) -> u32;
//! }
//! struct Triangle;
//! impl Shape for Triangle {
//!     fn sides(&self) -> u32 { 3 }
//! }
//!
//! fn wants_triangle(sides: &u32) -> bool { *sides == 3 }
//! fn make_triangle(_: ()) -> Box<dyn Shape> { Box::new(Triangle) }
//!
//! let mut registry: Registry<u32, (), Box<dyn Shape>> = Registry::new();
//! registry.register(wants_triangle, make_triangle);
//!
//! let shape = registry.produce_one(&3, ()).expect("triangle registered");
//! assert_eq!(shape.sides(), 3);
//! assert!(registry.produce_all(&4, ()).is_empty());
//! ```

pub mod entry;
mod fallible;

use std::fmt;

use indexmap::map::Entry as Slot;
use indexmap::IndexMap;
use tracing::{debug, trace, warn};

use crate::config::{DuplicatePolicy, RegistryConfig};
use crate::error::{RegistryError, Result};

pub use entry::{Constructor, Entry, EntryKey, Predicate, Registration, UNNAMED};

/// Table of predicate/constructor pairs for one criterion type `C`, input
/// type `I` and product type `O`.
///
/// `I` is usually a tuple of the constructor arguments, `()` when there are
/// none. `O` is usually `Box<dyn Trait>`.
pub struct Registry<C, I, O> {
    entries: IndexMap<EntryKey, Entry<C, I, O>>,
    next_anonymous: u64,
    config: RegistryConfig,
}

impl<C, I, O> Default for Registry<C, I, O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C, I, O> Registry<C, I, O> {
    /// Create an empty registry with the default configuration.
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// Create an empty registry with the given configuration.
    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            entries: IndexMap::new(),
            next_anonymous: 0,
            config,
        }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Replace the configuration. Only later registrations are affected.
    pub fn set_config(&mut self, config: RegistryConfig) {
        self.config = config;
    }

    /// Register a constructor under a predicate, without a name.
    ///
    /// Unnamed registrations are never duplicates of anything: each call adds
    /// a new entry, even for a predicate and constructor already present.
    pub fn register(
        &mut self,
        predicate: Predicate<C>,
        constructor: Constructor<I, O>,
    ) -> Registration {
        let key = EntryKey::Anonymous(self.next_anonymous);
        self.next_anonymous += 1;

        debug!("Registered constructor '{}'", key);
        self.entries
            .insert(key.clone(), Entry::new(key, predicate, constructor));
        Registration::Inserted
    }

    /// Register a named constructor under a predicate.
    ///
    /// The name is the entry's identity. If it is already present the
    /// configured [`DuplicatePolicy`] decides what happens; the returned
    /// [`Registration`] says which way it went. Two different names are two
    /// entries even when they share a predicate.
    pub fn register_named(
        &mut self,
        name: impl Into<String>,
        predicate: Predicate<C>,
        constructor: Constructor<I, O>,
    ) -> Registration {
        let key = EntryKey::Named(name.into());

        match self.entries.entry(key) {
            Slot::Vacant(slot) => {
                debug!("Registered constructor '{}'", slot.key());
                let key = slot.key().clone();
                slot.insert(Entry::new(key, predicate, constructor));
                Registration::Inserted
            }
            Slot::Occupied(mut slot) => match self.config.duplicates {
                DuplicatePolicy::KeepFirst => {
                    warn!(
                        "Ignoring duplicate registration '{}': keeping the first one",
                        slot.key()
                    );
                    Registration::Ignored
                }
                DuplicatePolicy::Replace => {
                    debug!("Replacing constructor '{}'", slot.key());
                    let key = slot.key().clone();
                    slot.insert(Entry::new(key, predicate, constructor));
                    Registration::Replaced
                }
                DuplicatePolicy::Reject => {
                    warn!(
                        "Rejected duplicate registration '{}': already registered",
                        slot.key()
                    );
                    Registration::Rejected
                }
            },
        }
    }

    /// Register a named constructor, failing if the name is present.
    ///
    /// Unlike [`register_named`](Self::register_named) this ignores the
    /// configured policy and always refuses duplicates.
    pub fn try_register(
        &mut self,
        name: impl Into<String>,
        predicate: Predicate<C>,
        constructor: Constructor<I, O>,
    ) -> Result<()> {
        let key = EntryKey::Named(name.into());

        match self.entries.entry(key) {
            Slot::Occupied(slot) => Err(RegistryError::DuplicateName {
                name: slot.key().to_string(),
            }),
            Slot::Vacant(slot) => {
                debug!("Registered constructor '{}'", slot.key());
                let key = slot.key().clone();
                slot.insert(Entry::new(key, predicate, constructor));
                Ok(())
            }
        }
    }

    /// Build the product of the first entry whose predicate accepts the
    /// criterion.
    ///
    /// Predicates after the first match are not evaluated. `None` means no
    /// entry matched, which is a normal outcome.
    pub fn produce_one(&self, criterion: &C, inputs: I) -> Option<O> {
        let Some(entry) = self.entries.values().find(|e| e.matches(criterion)) else {
            trace!("No match among {} entries", self.entries.len());
            return None;
        };
        trace!("Producing from '{}'", entry.name());
        Some(entry.construct(inputs))
    }

    /// Number of entries whose predicate accepts the criterion.
    ///
    /// Evaluates predicates only; no constructor runs.
    pub fn count_matches(&self, criterion: &C) -> usize {
        self.matching(criterion).count()
    }

    /// Names of the entries whose predicate accepts the criterion, in table
    /// order.
    pub fn matching_names(&self, criterion: &C) -> Vec<&str> {
        self.entries
            .values()
            .filter(|e| e.matches(criterion))
            .map(|e| e.name())
            .collect()
    }

    /// Whether an entry is registered under this name.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Get the entry registered under a name.
    pub fn get(&self, name: &str) -> Option<&Entry<C, I, O>> {
        self.entries.get(&EntryKey::Named(name.to_string()))
    }

    /// Iterate over all entries in table order.
    pub fn iter(&self) -> impl Iterator<Item = &Entry<C, I, O>> {
        self.entries.values()
    }

    /// Entry names in table order.
    pub fn names(&self) -> Vec<&str> {
        self.entries.values().map(|e| e.name()).collect()
    }

    /// Get the number of registered entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry. Products already handed out are unaffected.
    pub fn clear(&mut self) {
        if !self.entries.is_empty() {
            debug!("Clearing {} registry entries", self.entries.len());
        }
        self.entries.clear();
    }

    fn matching<'a>(&'a self, criterion: &'a C) -> impl Iterator<Item = &'a Entry<C, I, O>> {
        self.entries.values().filter(move |e| e.matches(criterion))
    }
}

impl<C, I: Clone, O> Registry<C, I, O> {
    /// Build one product per entry whose predicate accepts the criterion.
    ///
    /// Each matching constructor receives its own clone of `inputs`. Results
    /// follow table order; no matches gives an empty `Vec`.
    pub fn produce_all(&self, criterion: &C, inputs: I) -> Vec<O> {
        let produced: Vec<O> = self
            .matching(criterion)
            .map(|e| e.construct(inputs.clone()))
            .collect();
        trace!(
            "Produced {} of {} entries",
            produced.len(),
            self.entries.len()
        );
        produced
    }
}

impl<C, I, O> fmt::Debug for Registry<C, I, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("entries", &self.names())
            .field("config", &self.config)
            .finish()
    }
}
