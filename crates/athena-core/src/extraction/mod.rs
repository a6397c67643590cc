//! Page walks and the top-level component extractions.
//!
//! A walk pops nodes from a worklist seeded with the page's children (visited
//! in document order). Component sets and stand-alone components are
//! described and not descended into; instances are skipped; every other node
//! queues its children and counts as one processed node. A failure to
//! describe one component is recorded as a formatted error and the walk goes
//! on.

pub mod extractor;
pub mod walk;

pub use extractor::{DocumentExtraction, Extractor};
pub use walk::PageExtraction;
