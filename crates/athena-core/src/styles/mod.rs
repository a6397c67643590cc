//! Local style export: effect, text and paint styles as flat entries.

use crate::color::{to_hex, to_rgba_string};
use crate::errors::{AthenaError, Result};
use crate::host::{
    Document, Effect, LetterSpacing, LineHeight, LineHeightUnit, Paint, Style, StyleKind,
};
use crate::tokens::split_variable_name;
use crate::{log_op_end, log_op_error, log_op_start};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleExportMeta {
    pub generated_at: String,
    pub file_name: String,
    pub library: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyleData {
    pub font_name: Option<String>,
    pub font_size: Option<f64>,
    pub line_height: Option<String>,
    pub letter_spacing: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaintEntry {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaintStyleData {
    pub paints: Vec<PaintEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "lowercase")]
pub enum StyleValue {
    Effect(Effect),
    Text(TextStyleData),
    Paint(PaintStyleData),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleEntry {
    pub key: String,
    pub name: String,
    pub group: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub value: StyleValue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleExportPayload {
    pub meta: StyleExportMeta,
    pub styles: Vec<StyleEntry>,
}

/// Export local styles: effect styles (one entry per effect), then text
/// styles, then paint styles
///
/// # Errors
///
/// [`AthenaError::CapabilityMissing`] when the document exposes no styles.
pub fn collect_styles(document: &Document) -> Result<StyleExportPayload> {
    log_op_start!("collect_styles");
    let start = std::time::Instant::now();

    let Some(styles) = document.styles.as_deref() else {
        let err = AthenaError::CapabilityMissing {
            capability: "styles".to_string(),
        };
        log_op_error!(
            "collect_styles",
            err.clone(),
            started = start
        );
        return Err(err);
    };

    let of_kind = |kind: StyleKind| styles.iter().filter(move |s| s.kind == kind);
    let mut entries = Vec::new();

    for style in of_kind(StyleKind::Effect) {
        let (group, name) = naming(style);
        for effect in &style.effects {
            entries.push(StyleEntry {
                key: style.key.clone(),
                name: name.clone(),
                group: group.clone(),
                kind: humanize_kind(effect.kind.as_str()),
                value: StyleValue::Effect(effect.clone()),
            });
        }
    }
    for style in of_kind(StyleKind::Text) {
        let (group, name) = naming(style);
        entries.push(StyleEntry {
            key: style.key.clone(),
            name,
            group,
            kind: "text".to_string(),
            value: StyleValue::Text(describe_text_style(style)),
        });
    }
    for style in of_kind(StyleKind::Paint) {
        let (group, name) = naming(style);
        entries.push(StyleEntry {
            key: style.key.clone(),
            name,
            group,
            kind: "paint".to_string(),
            value: StyleValue::Paint(PaintStyleData {
                paints: style.paints.iter().map(describe_paint).collect(),
            }),
        });
    }

    log_op_end!(
        "collect_styles",
        started = start,
        style_count = entries.len()
    );
    Ok(StyleExportPayload {
        meta: StyleExportMeta {
            generated_at: chrono::Utc::now().to_rfc3339(),
            file_name: document.name.clone(),
            library: document.name.clone(),
        },
        styles: entries,
    })
}

fn naming(style: &Style) -> (String, String) {
    let parts = split_variable_name(Some(style.name.as_str()));
    (parts.group_name, parts.token_name)
}

/// `DROP_SHADOW` -> `drop shadow`; only the first underscore is replaced
fn humanize_kind(kind: &str) -> String {
    kind.to_lowercase().replacen('_', " ", 1)
}

fn describe_text_style(style: &Style) -> TextStyleData {
    let font_name = style
        .font_name
        .as_ref()
        .map(|f| format!("{} {}", f.family, f.style).trim().to_string())
        .filter(|s| !s.is_empty());
    TextStyleData {
        font_name,
        font_size: style.font_size,
        line_height: style.line_height.as_ref().and_then(format_line_height),
        letter_spacing: style.letter_spacing.as_ref().map(format_letter_spacing),
    }
}

fn format_line_height(line_height: &LineHeight) -> Option<String> {
    match (line_height.unit, line_height.value) {
        (LineHeightUnit::Auto, _) => Some("auto".to_string()),
        (LineHeightUnit::Pixels, Some(v)) => Some(format!("{:.2}", v)),
        (LineHeightUnit::Percent, Some(v)) => Some(format!("{:.2}%", v)),
        (_, None) => None,
    }
}

fn format_letter_spacing(spacing: &LetterSpacing) -> String {
    match spacing.unit {
        LineHeightUnit::Percent => format!("{:.2}%", spacing.value),
        _ => format!("{:.2}", spacing.value),
    }
}

fn describe_paint(paint: &Paint) -> PaintEntry {
    match (paint.is_solid(), paint.color) {
        (true, Some(c)) => PaintEntry {
            kind: "solid".to_string(),
            color: Some(format!(
                "{} / {}",
                to_hex(c.r, c.g, c.b),
                to_rgba_string(c.r, c.g, c.b, 1.0)
            )),
            opacity: paint.opacity,
        },
        _ => PaintEntry {
            kind: humanize_kind(paint.kind.as_str()),
            color: None,
            opacity: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_humanize_kind_replaces_first_underscore() {
        assert_eq!(humanize_kind("DROP_SHADOW"), "drop shadow");
        assert_eq!(humanize_kind("GRADIENT_LINEAR"), "gradient linear");
        assert_eq!(humanize_kind("A_B_C"), "a b_c");
    }

    #[test]
    fn test_line_height_formats() {
        let auto = LineHeight {
            unit: LineHeightUnit::Auto,
            value: None,
        };
        let px = LineHeight {
            unit: LineHeightUnit::Pixels,
            value: Some(20.0),
        };
        let pct = LineHeight {
            unit: LineHeightUnit::Percent,
            value: Some(150.0),
        };
        assert_eq!(format_line_height(&auto).as_deref(), Some("auto"));
        assert_eq!(format_line_height(&px).as_deref(), Some("20.00"));
        assert_eq!(format_line_height(&pct).as_deref(), Some("150.00%"));
    }

    #[test]
    fn test_solid_paint_entry() {
        let mut paint = Paint::solid(1.0, 0.0, 0.0);
        paint.opacity = Some(0.5);
        let entry = describe_paint(&paint);
        assert_eq!(entry.kind, "solid");
        assert_eq!(entry.color.as_deref(), Some("#FF0000 / rgba(255, 0, 0, 1.00)"));
        assert_eq!(entry.opacity, Some(0.5));
    }
}
