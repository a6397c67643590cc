//! Host object model.
//!
//! The design tool owns the live node tree; this module models the parts of
//! it the engine reads as plain deserialisable data, so a JSON dump of a
//! document can stand in for the live host.

pub mod document;
pub mod mixed;
pub mod node;
pub mod paint;
pub mod variables;

pub use document::{Document, Page, Style, StyleCatalog, StyleIndex, StyleKind};
pub use mixed::Mixable;
pub use node::{
    BoundVariables, FontName, LayoutMode, LetterSpacing, LineHeight, LineHeightUnit,
    MainComponentRef, NodeKind, SceneNode, StrokeAlign, TextCase, VariableAlias,
    VariableBinding, VariableRef,
};
pub use paint::{Effect, EffectKind, Paint, PaintKind, Rgb, Rgba, Vector};
pub use variables::{
    Variable, VariableCollection, VariableMode, VariableResolvedType, VariableValue,
    VariablesApi,
};
