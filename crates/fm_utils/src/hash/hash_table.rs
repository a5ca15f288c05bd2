//! Re-export [`HashTable`] from [hashbrown] crate.

use hashbrown::hash_table as hb;

pub use hb::HashTable;

pub use hb::{Entry, OccupiedEntry, VacantEntry};
pub use hb::{IntoIter, Iter};
