//! Registration entries and their table keys.

use std::fmt;

/// Selection function evaluated against the criterion at production time.
pub type Predicate<C> = fn(&C) -> bool;

/// Function that builds one product from the table's inputs.
pub type Constructor<I, O> = fn(I) -> O;

/// Name given to entries registered without one.
pub const UNNAMED: &str = "<unnamed>";

/// Key an entry is stored under.
///
/// Named registrations are keyed by their name, so registering the same name
/// twice is a duplicate. Unnamed registrations each get a fresh sequence
/// number and never collide. Function addresses are not used: the compiler
/// may give two distinct functions with identical bodies the same address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntryKey {
    /// Registered with [`register_named`](super::Registry::register_named)
    /// or [`register_factory!`](crate::register_factory).
    Named(String),
    /// Registered without a name; the number is the table's registration
    /// sequence.
    Anonymous(u64),
}

impl EntryKey {
    pub fn is_named(&self) -> bool {
        matches!(self, EntryKey::Named(_))
    }
}

impl fmt::Display for EntryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryKey::Named(name) => write!(f, "{}", name),
            EntryKey::Anonymous(seq) => write!(f, "{} #{}", UNNAMED, seq),
        }
    }
}

/// Outcome of a registration call.
///
/// Registration never fails; this only reports what the table's
/// [`DuplicatePolicy`](crate::config::DuplicatePolicy) did with the pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    /// The pair was added as a new entry.
    Inserted,
    /// The name was present; its entry was swapped for the new pair.
    Replaced,
    /// The name was present; the new pair was dropped.
    Ignored,
    /// The name was present and the policy refuses duplicates.
    Rejected,
}

impl Registration {
    /// Whether the new constructor is now reachable through the table.
    pub fn took_effect(self) -> bool {
        matches!(self, Registration::Inserted | Registration::Replaced)
    }
}

impl fmt::Display for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Registration::Inserted => write!(f, "inserted"),
            Registration::Replaced => write!(f, "replaced"),
            Registration::Ignored => write!(f, "ignored"),
            Registration::Rejected => write!(f, "rejected"),
        }
    }
}

/// One predicate paired with one constructor.
pub struct Entry<C, I, O> {
    key: EntryKey,
    predicate: Predicate<C>,
    constructor: Constructor<I, O>,
}

impl<C, I, O> Entry<C, I, O> {
    pub(crate) fn new(
        key: EntryKey,
        predicate: Predicate<C>,
        constructor: Constructor<I, O>,
    ) -> Self {
        Self {
            key,
            predicate,
            constructor,
        }
    }

    /// Name the entry was registered under, [`UNNAMED`] if none.
    pub fn name(&self) -> &str {
        match &self.key {
            EntryKey::Named(name) => name,
            EntryKey::Anonymous(_) => UNNAMED,
        }
    }

    /// The entry's table key.
    pub fn key(&self) -> &EntryKey {
        &self.key
    }

    pub fn predicate(&self) -> Predicate<C> {
        self.predicate
    }

    pub fn constructor(&self) -> Constructor<I, O> {
        self.constructor
    }

    /// Evaluate the predicate against a criterion.
    pub fn matches(&self, criterion: &C) -> bool {
        (self.predicate)(criterion)
    }

    /// Invoke the constructor.
    pub fn construct(&self, inputs: I) -> O {
        (self.constructor)(inputs)
    }
}

impl<C, I, O> Clone for Entry<C, I, O> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            predicate: self.predicate,
            constructor: self.constructor,
        }
    }
}

impl<C, I, O> fmt::Debug for Entry<C, I, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}
