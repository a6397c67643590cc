//! Auto-layout capture.

use crate::host::{LayoutMode, SceneNode};
use crate::structure::model::{NodeLayout, Padding, PaddingTokens};

/// Padding, spacing and their tokens, for nodes with an active layout mode
pub fn extract_layout(node: &SceneNode) -> Option<NodeLayout> {
    match node.layout_mode {
        None | Some(LayoutMode::None) => return None,
        Some(_) => {}
    }

    let padding = Padding {
        top: node.padding_top.unwrap_or(0.0),
        right: node.padding_right.unwrap_or(0.0),
        bottom: node.padding_bottom.unwrap_or(0.0),
        left: node.padding_left.unwrap_or(0.0),
    };
    let token = |property: &str| node.bound_variable(property).map(str::to_string);
    let padding_tokens = PaddingTokens {
        top: token("paddingTop"),
        right: token("paddingRight"),
        bottom: token("paddingBottom"),
        left: token("paddingLeft"),
    };

    Some(NodeLayout {
        padding: Some(padding),
        item_spacing: node.item_spacing,
        padding_tokens: (!padding_tokens.is_empty()).then_some(padding_tokens),
        item_spacing_token: token("itemSpacing"),
    })
}
