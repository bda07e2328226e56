//! Disjoint-set (union-find) structure keyed by arbitrary hashable
//! identifiers, with union by rank and full path compression.
//!
//! ```
//! use disjoint_set::DisjointSet;
//!
//! let mut ds = DisjointSet::new();
//! ds.make_set("a");
//! ds.make_set("b");
//! ds.union_set(&"a", &"b");
//! assert_eq!(ds.find_set(&"a"), ds.find_set(&"b"));
//! ```

mod set;

pub use set::{DisjointSet, UnknownIdentifier};
