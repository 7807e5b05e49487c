//! Selective Factory - predicate-selected construction registry.
//!
//! Independent modules register constructors for implementations of a common
//! trait, each guarded by a predicate. Callers later present a criterion and
//! get back freshly built, exclusively owned objects from every constructor
//! whose predicate accepts it, or just the first one.
//!
//! There is no central list of implementations: registrations land in one
//! table per *shape* (base type, criterion type and input type), wherever in
//! the program they come from.
//!
//! # Modules
//!
//! - [`config`] - Duplicate-registration policy and YAML configuration
//! - [`error`] - Error types and result aliases
//! - [`factory`] - Process-wide factories, one table per shape
//! - [`registry`] - The owned predicate/constructor table and production
//! - [`shape`] - Lazily created per-shape table storage
//! - [`startup`] - Link-time registration hooks
//!
//! # Example
//!
//! ```
//! use selective_factory::SelectiveFactory;
//!
//! pub trait Parity {
//!     fn tag(&self) -> char;
//! }
//! struct Even;
//! struct Odd;
//! impl Parity for Even {
//!     fn tag(&self) -> char { 'A' }
//! }
//! impl Parity for Odd {
//!     fn tag(&self) -> char { 'B' }
//! }
//!
//! fn is_even(n: &i32) -> bool { n % 2 == 0 }
//! fn is_odd(n: &i32) -> bool { n % 2 == 1 }
//! fn make_even(_: ()) -> Box<dyn Parity> { Box::new(Even) }
//! fn make_odd(_: ()) -> Box<dyn Parity> { Box::new(Odd) }
//!
//! type Factory = SelectiveFactory<dyn Parity, i32>;
//! Factory::register(is_even, make_even);
//! Factory::register(is_odd, make_odd);
//!
//! assert_eq!(Factory::produce_one(&4, ()).map(|p| p.tag()), Some('A'));
//! assert_eq!(Factory::produce_one(&5, ()).map(|p| p.tag()), Some('B'));
//! assert!(Factory::produce_all(&-1, ()).is_empty());
//! ```

pub mod config;
pub mod error;
pub mod factory;
pub mod registry;
pub mod shape;
pub mod startup;

pub use config::{DuplicatePolicy, RegistryConfig};
pub use error::{RegistryError, Result};
pub use factory::{FallibleFactory, SelectiveFactory};
pub use registry::{Constructor, EntryKey, Predicate, Registration, Registry};
pub use startup::{install_startup_hooks, StartupHook};

#[doc(hidden)]
pub use inventory;
