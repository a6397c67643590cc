//! Variant diffs.
//!
//! Every variant of a component set is stored as patches against the set's
//! base structure.
//!
//! ## Entry points
//!
//! ```ignore
//! use athena_core::diff::{compute_variant_patches, replay_patches};
//!
//! let patches = compute_variant_patches(&base, &variant);
//! let rebuilt = replay_patches(&base, &patches);
//! ```
//!
//! ## Guarantees
//!
//! - **Reflexivity**: a structure diffed against itself yields no patches.
//! - **Root-name independence**: matching uses canonical paths, so variants
//!   whose roots are named differently still pair node for node.
//! - **Round trip**: replaying the patches over the base yields, for every
//!   variant node, a node with the same canonical path and attributes.

pub mod engine;
pub mod model;
pub mod replay;

pub use engine::{compute_variant_patches, diff_nodes};
pub use model::{NodeFieldSet, StructurePatch};
pub use replay::replay_patches;
