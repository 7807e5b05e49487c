//! Process-wide factories.
//!
//! [`SelectiveFactory`] and [`FallibleFactory`] are never instantiated; their
//! associated functions work on the single table that exists for their
//! shape (see [`shape`](crate::shape)). Registration can therefore happen
//! anywhere in the program and production anywhere else, with no registry
//! value passed between them.
//!
//! Each table sits behind a read-write lock. Production holds a recursive
//! read lock while constructors run, so a constructor may produce from any
//! factory, but must not register into or reset its own (see the
//! `# Deadlocks` sections below).
//!
//! # Example
//!
//! ```
//! use selective_factory::SelectiveFactory;
//!
//! pub trait Animal {
//!     fn noise(&self) -> &'static str;
//! }
//! struct Dog;
//! impl Animal for Dog {
//!     fn noise(&self) -> &'static str { "woof" }
//! }
//!
//! fn is_dog(name: &String) -> bool { name == "dog" }
//! fn make_dog(_: ()) -> Box<dyn Animal> { Box::new(Dog) }
//!
//! type Zoo = SelectiveFactory<dyn Animal, String>;
//! Zoo::register(is_dog, make_dog);
//!
//! let animals = Zoo::produce_all(&"dog".to_string(), ());
//! assert_eq!(animals.len(), 1);
//! assert_eq!(animals[0].noise(), "woof");
//! ```

use std::marker::PhantomData;

use parking_lot::RwLock;
use tracing::debug;

use crate::config::RegistryConfig;
use crate::error::Result;
use crate::registry::{Constructor, Predicate, Registration, Registry};
use crate::shape;
use crate::startup::install_startup_hooks;

/// Process-wide factory building `Box<B>` from inputs `I`, selected by a
/// criterion `C`.
///
/// `B` is usually a trait object. `I` is a tuple of constructor arguments,
/// `()` by default.
pub struct SelectiveFactory<B: ?Sized, C, I = ()> {
    _shape: PhantomData<fn(&C, I) -> Box<B>>,
}

impl<B, C, I> SelectiveFactory<B, C, I>
where
    B: ?Sized + 'static,
    C: 'static,
    I: 'static,
{
    /// The shared table behind this factory.
    pub fn table() -> &'static RwLock<Registry<C, I, Box<B>>> {
        shape::table()
    }

    /// Register a constructor under a predicate.
    pub fn register(predicate: Predicate<C>, constructor: Constructor<I, Box<B>>) -> Registration {
        Self::table().write().register(predicate, constructor)
    }

    /// Register a named constructor under a predicate.
    pub fn register_named(
        name: impl Into<String>,
        predicate: Predicate<C>,
        constructor: Constructor<I, Box<B>>,
    ) -> Registration {
        Self::table()
            .write()
            .register_named(name, predicate, constructor)
    }

    /// Register a named constructor, failing if the name is present.
    pub fn try_register(
        name: impl Into<String>,
        predicate: Predicate<C>,
        constructor: Constructor<I, Box<B>>,
    ) -> Result<()> {
        Self::table()
            .write()
            .try_register(name, predicate, constructor)
    }

    /// Build the first match, or `None` if no predicate accepts the criterion.
    ///
    /// # Deadlocks
    ///
    /// Constructors run under this shape's read lock. One that registers
    /// into this same factory, or configures or resets it, waits on the
    /// write lock and never returns. Producing from any factory is fine.
    ///
    /// # Panics
    ///
    /// Panics if called from a startup hook, see [`install_startup_hooks`].
    /// Constructor panics propagate unchanged.
    pub fn produce_one(criterion: &C, inputs: I) -> Option<Box<B>> {
        install_startup_hooks();
        Self::table().read_recursive().produce_one(criterion, inputs)
    }

    /// Number of entries whose predicate accepts the criterion.
    pub fn count_matches(criterion: &C) -> usize {
        install_startup_hooks();
        Self::table().read_recursive().count_matches(criterion)
    }

    /// Whether an entry is registered under this name.
    pub fn contains(name: &str) -> bool {
        install_startup_hooks();
        Self::table().read_recursive().contains(name)
    }

    /// Entry names in table order.
    pub fn names() -> Vec<String> {
        install_startup_hooks();
        Self::table()
            .read_recursive()
            .names()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    pub fn len() -> usize {
        install_startup_hooks();
        Self::table().read_recursive().len()
    }

    pub fn is_empty() -> bool {
        Self::len() == 0
    }

    /// Replace the table's configuration. Only later registrations are
    /// affected.
    pub fn configure(config: RegistryConfig) {
        debug!(
            "Configured {} with {} duplicates",
            std::any::type_name::<Self>(),
            config.duplicates
        );
        Self::table().write().set_config(config);
    }

    /// Drop every registration for this shape.
    ///
    /// Objects produced earlier are owned by their callers and stay valid.
    pub fn reset() {
        Self::table().write().clear();
    }
}

impl<B, C, I> SelectiveFactory<B, C, I>
where
    B: ?Sized + 'static,
    C: 'static,
    I: Clone + 'static,
{
    /// Build one object per entry whose predicate accepts the criterion.
    ///
    /// # Deadlocks
    ///
    /// Constructors run under this shape's read lock. One that registers
    /// into this same factory, or configures or resets it, waits on the
    /// write lock and never returns. Producing from any factory is fine.
    ///
    /// # Panics
    ///
    /// Panics if called from a startup hook, see [`install_startup_hooks`].
    /// Constructor panics propagate unchanged.
    pub fn produce_all(criterion: &C, inputs: I) -> Vec<Box<B>> {
        install_startup_hooks();
        Self::table().read_recursive().produce_all(criterion, inputs)
    }
}

/// Process-wide factory whose constructors return `Result<Box<B>, E>`.
///
/// Constructor errors come back unchanged from the `try_produce_*`
/// operations.
pub struct FallibleFactory<B: ?Sized, C, I = (), E = anyhow::Error> {
    _shape: PhantomData<fn(&C, I) -> std::result::Result<Box<B>, E>>,
}

impl<B, C, I, E> FallibleFactory<B, C, I, E>
where
    B: ?Sized + 'static,
    C: 'static,
    I: 'static,
    E: 'static,
{
    /// The shared table behind this factory.
    pub fn table() -> &'static RwLock<Registry<C, I, std::result::Result<Box<B>, E>>> {
        shape::table()
    }

    /// Register a fallible constructor under a predicate.
    pub fn register(
        predicate: Predicate<C>,
        constructor: Constructor<I, std::result::Result<Box<B>, E>>,
    ) -> Registration {
        Self::table().write().register(predicate, constructor)
    }

    /// Register a named fallible constructor under a predicate.
    pub fn register_named(
        name: impl Into<String>,
        predicate: Predicate<C>,
        constructor: Constructor<I, std::result::Result<Box<B>, E>>,
    ) -> Registration {
        Self::table()
            .write()
            .register_named(name, predicate, constructor)
    }

    /// Register a named fallible constructor, failing if the name is
    /// present.
    pub fn try_register(
        name: impl Into<String>,
        predicate: Predicate<C>,
        constructor: Constructor<I, std::result::Result<Box<B>, E>>,
    ) -> Result<()> {
        Self::table()
            .write()
            .try_register(name, predicate, constructor)
    }

    /// Build the first match. `Ok(None)` when nothing matches.
    ///
    /// # Deadlocks
    ///
    /// Constructors run under this shape's read lock. One that registers
    /// into this same factory, or configures or resets it, waits on the
    /// write lock and never returns. Producing from any factory is fine.
    ///
    /// # Panics
    ///
    /// Panics if called from a startup hook, see [`install_startup_hooks`].
    /// Constructor panics propagate unchanged.
    pub fn try_produce_one(criterion: &C, inputs: I) -> std::result::Result<Option<Box<B>>, E> {
        install_startup_hooks();
        Self::table()
            .read_recursive()
            .try_produce_one(criterion, inputs)
    }

    /// Number of entries whose predicate accepts the criterion.
    pub fn count_matches(criterion: &C) -> usize {
        install_startup_hooks();
        Self::table().read_recursive().count_matches(criterion)
    }

    pub fn len() -> usize {
        install_startup_hooks();
        Self::table().read_recursive().len()
    }

    pub fn is_empty() -> bool {
        Self::len() == 0
    }

    /// Replace the table's configuration.
    pub fn configure(config: RegistryConfig) {
        Self::table().write().set_config(config);
    }

    /// Drop every registration for this shape.
    pub fn reset() {
        Self::table().write().clear();
    }
}

impl<B, C, I, E> FallibleFactory<B, C, I, E>
where
    B: ?Sized + 'static,
    C: 'static,
    I: Clone + 'static,
    E: 'static,
{
    /// Build one object per matching entry, stopping at the first error.
    ///
    /// # Deadlocks
    ///
    /// Constructors run under this shape's read lock. One that registers
    /// into this same factory, or configures or resets it, waits on the
    /// write lock and never returns. Producing from any factory is fine.
    ///
    /// # Panics
    ///
    /// Panics if called from a startup hook, see [`install_startup_hooks`].
    /// Constructor panics propagate unchanged.
    pub fn try_produce_all(criterion: &C, inputs: I) -> std::result::Result<Vec<Box<B>>, E> {
        install_startup_hooks();
        Self::table()
            .read_recursive()
            .try_produce_all(criterion, inputs)
    }
}
