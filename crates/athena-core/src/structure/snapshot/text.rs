//! Text content and typography of TEXT nodes.

use crate::host::mixed::uniform;
use crate::host::{FontName, LineHeight, LineHeightUnit, NodeKind, SceneNode, TextCase};
use crate::structure::model::{LineHeightValue, TextContent, Typography};

fn font_label(font: &FontName) -> String {
    format!("{} {}", font.family, font.style).trim().to_string()
}

fn line_height_value(line_height: &LineHeight) -> LineHeightValue {
    match (line_height.unit, line_height.value) {
        (LineHeightUnit::Pixels, Some(value)) => LineHeightValue::Pixels(value),
        (LineHeightUnit::Pixels, None) => LineHeightValue::Label("PIXELS".to_string()),
        (LineHeightUnit::Percent, Some(value)) => LineHeightValue::Label(format!("PERCENT({value})")),
        (LineHeightUnit::Percent, None) => LineHeightValue::Label("PERCENT".to_string()),
        (LineHeightUnit::Auto, _) => LineHeightValue::Label("AUTO".to_string()),
    }
}

pub fn extract_text(node: &SceneNode) -> Option<TextContent> {
    if node.kind != NodeKind::Text {
        return None;
    }

    let content = TextContent {
        characters: node.characters.clone().filter(|c| !c.is_empty()),
        font_name: uniform(&node.font_name).map(font_label),
        font_size: uniform(&node.font_size).copied(),
        line_height: uniform(&node.line_height).map(line_height_value),
        letter_spacing: uniform(&node.letter_spacing).map(|ls| ls.value),
        paragraph_spacing: node.paragraph_spacing,
        case: uniform(&node.text_case)
            .copied()
            .filter(|case| *case != TextCase::Original),
    };

    (!content.is_empty()).then_some(content)
}

/// Font label and size; absent when the font is mixed
pub fn extract_typography(node: &SceneNode) -> Option<Typography> {
    if node.kind != NodeKind::Text {
        return None;
    }
    let font = uniform(&node.font_name)?;
    Some(Typography {
        font_name: font_label(font),
        font_size: uniform(&node.font_size).copied(),
    })
}

/// First variable bound to font size, line height or letter spacing
pub fn typography_token(node: &SceneNode) -> Option<String> {
    if node.kind != NodeKind::Text {
        return None;
    }
    ["fontSize", "lineHeight", "letterSpacing"]
        .iter()
        .find_map(|property| node.bound_variable(property))
        .map(str::to_string)
}
