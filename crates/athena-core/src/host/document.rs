//! Documents, pages and shared styles.

use super::node::{BoundVariables, FontName, LetterSpacing, LineHeight, SceneNode};
use super::paint::{Effect, Paint};
use super::variables::VariablesApi;
use crate::errors::{AthenaError, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub children: Vec<SceneNode>,
}

impl Page {
    pub fn new(id: impl Into<String>, name: impl Into<String>, children: Vec<SceneNode>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            children,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StyleKind {
    Paint,
    Text,
    Effect,
    Grid,
}

/// A shared (library) style
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Style {
    pub id: String,
    #[serde(default)]
    pub key: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: StyleKind,
    #[serde(default)]
    pub paints: Vec<Paint>,
    /// Text styles may carry their own fills
    #[serde(default)]
    pub fills: Vec<Paint>,
    #[serde(default)]
    pub effects: Vec<Effect>,
    #[serde(default)]
    pub font_name: Option<FontName>,
    #[serde(default)]
    pub font_size: Option<f64>,
    #[serde(default)]
    pub line_height: Option<LineHeight>,
    #[serde(default)]
    pub letter_spacing: Option<LetterSpacing>,
    #[serde(default)]
    pub bound_variables: BoundVariables,
}

/// Style lookup by id
pub trait StyleCatalog {
    fn style_by_id(&self, id: &str) -> Option<&Style>;
}

/// Id index over a slice of styles
#[derive(Debug, Default)]
pub struct StyleIndex<'a> {
    by_id: HashMap<&'a str, &'a Style>,
}

impl<'a> StyleIndex<'a> {
    pub fn new(styles: &'a [Style]) -> Self {
        Self {
            by_id: styles.iter().map(|s| (s.id.as_str(), s)).collect(),
        }
    }
}

impl StyleCatalog for StyleIndex<'_> {
    fn style_by_id(&self, id: &str) -> Option<&Style> {
        self.by_id.get(id).copied()
    }
}

/// A whole design file
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub name: String,
    #[serde(default)]
    pub pages: Vec<Page>,
    #[serde(default)]
    pub current_page_id: Option<String>,
    /// `None` when the host exposes no style API
    #[serde(default)]
    pub styles: Option<Vec<Style>>,
    /// `None` when the host exposes no variables API
    #[serde(default)]
    pub variables: Option<VariablesApi>,
}

impl Document {
    /// Parse a JSON dump of a document
    pub fn from_json(text: &str) -> Result<Self> {
        let document: Document = serde_json::from_str(text)?;
        document.validate()?;
        Ok(document)
    }

    /// Load a JSON dump from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    fn validate(&self) -> Result<()> {
        if let Some(current) = &self.current_page_id {
            if !self.pages.iter().any(|p| &p.id == current) {
                return Err(AthenaError::InvalidDocument {
                    reason: format!("currentPageId {} does not name a page", current),
                });
            }
        }
        Ok(())
    }

    /// Index of the page the user is looking at (first page if unset)
    pub fn current_page_index(&self) -> Option<usize> {
        match &self.current_page_id {
            Some(id) => self.pages.iter().position(|p| &p.id == id),
            None if self.pages.is_empty() => None,
            None => Some(0),
        }
    }

    pub fn current_page(&self) -> Option<&Page> {
        self.current_page_index().and_then(|i| self.pages.get(i))
    }

    pub fn style_index(&self) -> StyleIndex<'_> {
        StyleIndex::new(self.styles.as_deref().unwrap_or(&[]))
    }
}
