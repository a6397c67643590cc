//! Structure snapshots of component subtrees.
//!
//! - [`snapshot`]: one host node to one [`StructureNode`]
//! - [`collect`]: pre-order collection of a whole subtree, with a cache
//! - [`path`]: node paths and the canonical form used for variant matching

pub mod collect;
pub mod model;
pub mod path;
pub mod snapshot;

pub use collect::{collect_structure, StructureCache};
pub use model::{NodeId, StructureNode, StructureNodeType};
pub use path::{canonical_path, make_path};
pub use snapshot::{snapshot_node, CollectOptions};
