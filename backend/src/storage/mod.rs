//! # Storage Module
//!
//! Key-value persistence for DailyLife.
//!
//! Every piece of user data lives under a single string key as one JSON blob,
//! the same layout the browser build kept in local storage:
//!
//! ```text
//! appUsers             -> [StoredUser, ...]
//! authToken            -> "<base64 token>"
//! authUser             -> User
//! tasks_<userId>       -> { "2025-03-14": [Task, ...], ... }
//! meals_<userId>       -> { "2025-03-14": DayMeals, ... }
//! recipes_<userId>     -> [Recipe, ...]
//! pantry_<userId>      -> [PantryItem, ...]
//! routines_<userId>    -> [Routine, ...]
//! maxLifts_<userId>    -> { "chest": [MaxLift, ...], ... }
//! transactions_<userId>-> [FinanceTransaction, ...]
//! recurring_<userId>   -> { "2025-03-14": [RecurringTransaction, ...], ... }
//! ```
//!
//! ## Backends
//!
//! - [`FileStore`]: one `<key>.json` file per key under the data directory
//! - [`MemoryStore`]: process-local map, used by tests
//!
//! Domain services only see [`JsonStore`], which wraps either backend behind
//! the [`KeyValueStorage`] trait and handles (de)serialization.

pub mod file_store;
pub mod json_store;
pub mod keys;
pub mod memory_store;
pub mod traits;

#[cfg(test)]
pub mod test_utils;

pub use file_store::FileStore;
pub use json_store::JsonStore;
pub use keys::StorageKey;
pub use memory_store::MemoryStore;
pub use traits::KeyValueStorage;
