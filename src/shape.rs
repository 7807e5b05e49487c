//! Process-wide registry tables, one per generic shape.
//!
//! A shape is the full type of a table, `Registry<C, I, O>`. Its table is
//! created on first touch and lives for the rest of the process; every
//! caller naming the same shape, from any module or crate, gets the same
//! table.

use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::sync::LazyLock;

use parking_lot::RwLock;
use tracing::debug;

use crate::registry::Registry;

type SharedTable = &'static (dyn Any + Send + Sync);

static SHAPES: LazyLock<RwLock<HashMap<TypeId, SharedTable>>> =
    LazyLock::new(|| RwLock::new(HashMap::new()));

/// The process-wide table for a shape, creating it on first use.
///
/// Creation happens at most once per shape: lookups take the read lock and
/// only a miss takes the write lock, which re-checks before inserting.
pub fn table<C, I, O>() -> &'static RwLock<Registry<C, I, O>>
where
    C: 'static,
    I: 'static,
    O: 'static,
{
    let key = TypeId::of::<Registry<C, I, O>>();

    if let Some(existing) = SHAPES.read().get(&key).copied() {
        return downcast(existing);
    }

    let mut shapes = SHAPES.write();
    let shared = *shapes.entry(key).or_insert_with(|| {
        debug!("Created registry table for {}", type_name::<Registry<C, I, O>>());
        let table: &'static RwLock<Registry<C, I, O>> =
            Box::leak(Box::new(RwLock::new(Registry::new())));
        table as SharedTable
    });
    downcast(shared)
}

/// Number of shapes whose table has been created so far.
pub fn shape_count() -> usize {
    SHAPES.read().len()
}

fn downcast<T: Any>(shared: SharedTable) -> &'static T {
    shared
        .downcast_ref::<T>()
        .expect("shape tables are keyed by their own TypeId")
}
