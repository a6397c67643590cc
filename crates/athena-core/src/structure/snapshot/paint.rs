//! Solid paints and the token each paint list resolves to.

use crate::color::{channel_to_u8, round2, to_hex};
use crate::host::mixed::uniform;
use crate::host::node::PAINT_BINDING_KEYS;
use crate::host::{
    BoundVariables, Mixable, NodeKind, Paint, SceneNode, StyleCatalog, VariableBinding,
};
use crate::structure::model::{NodePaint, PaintColor, PaintType};

/// Which paint list of a node is being resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaintChannel {
    Fills,
    Strokes,
}

impl PaintChannel {
    fn binding_keys(&self) -> [&'static str; 2] {
        match self {
            PaintChannel::Fills => ["fills", "fill"],
            PaintChannel::Strokes => ["strokes", "stroke"],
        }
    }

    fn paints<'a>(&self, node: &'a SceneNode) -> Option<&'a Mixable<Vec<Paint>>> {
        match self {
            PaintChannel::Fills => node.fills.as_ref(),
            PaintChannel::Strokes => node.strokes.as_ref(),
        }
    }

    fn style_id<'a>(&self, node: &'a SceneNode) -> Option<&'a str> {
        let id = match self {
            PaintChannel::Fills => uniform(&node.fill_style_id),
            PaintChannel::Strokes => uniform(&node.stroke_style_id),
        };
        id.map(String::as_str).filter(|id| !id.is_empty())
    }
}

/// Solid paints of a list, or `None` when the list is absent, mixed or has no solids
pub fn extract_paints(
    paints: Option<&Mixable<Vec<Paint>>>,
    token_key: Option<&str>,
) -> Option<Vec<NodePaint>> {
    let paints = paints?.uniform()?;
    let solids: Vec<NodePaint> = paints
        .iter()
        .filter(|p| p.is_solid())
        .map(|paint| {
            let color = paint.color.unwrap_or_default();
            let opacity = paint.opacity.unwrap_or(1.0);
            NodePaint {
                kind: PaintType::Solid,
                color: PaintColor {
                    r: channel_to_u8(color.r),
                    g: channel_to_u8(color.g),
                    b: channel_to_u8(color.b),
                    a: round2(opacity),
                },
                visible: paint.visible,
                opacity,
                token_key: token_key.map(str::to_string),
                color_hex: to_hex(color.r, color.g, color.b),
            }
        })
        .collect();
    (!solids.is_empty()).then_some(solids)
}

/// Token resolved for one paint list of a node
///
/// Precedence: a variable bound on one of the solid paints, then a variable
/// bound on the node property, then the referenced paint style (its own
/// bindings, then its paints). Text nodes without a fill token fall back to
/// their text style.
pub fn resolve_paint_token(
    node: &SceneNode,
    channel: PaintChannel,
    catalog: &dyn StyleCatalog,
) -> Option<String> {
    let token = channel
        .paints(node)
        .and_then(Mixable::uniform)
        .and_then(|paints| paint_list_variable_id(paints))
        .or_else(|| {
            channel
                .binding_keys()
                .iter()
                .find_map(|key| node.bound_variable(key))
        })
        .or_else(|| {
            let style = catalog.style_by_id(channel.style_id(node)?)?;
            style_bound_variable_id(&style.bound_variables)
                .or_else(|| paint_list_variable_id(&style.paints))
        });

    match token {
        Some(token) => Some(token.to_string()),
        None if channel == PaintChannel::Fills && node.kind == NodeKind::Text => {
            text_style_fill_token(node, catalog).map(str::to_string)
        }
        None => None,
    }
}

fn text_style_fill_token<'a>(node: &SceneNode, catalog: &'a dyn StyleCatalog) -> Option<&'a str> {
    let id = uniform(&node.text_style_id).filter(|id| !id.is_empty())?;
    let style = catalog.style_by_id(id)?;
    style_bound_variable_id(&style.bound_variables).or_else(|| paint_list_variable_id(&style.fills))
}

/// First variable bound on a solid paint: color/fill/fills first, then any property
fn paint_list_variable_id(paints: &[Paint]) -> Option<&str> {
    paints.iter().filter(|p| p.is_solid()).find_map(|paint| {
        let bound = &paint.bound_variables;
        ["color", "fill", "fills"]
            .iter()
            .find_map(|key| bound.get(*key).and_then(VariableBinding::variable_id))
            .or_else(|| bound.values().find_map(VariableBinding::variable_id))
    })
}

fn style_bound_variable_id(bound: &BoundVariables) -> Option<&str> {
    PAINT_BINDING_KEYS
        .iter()
        .find_map(|key| bound.get(*key).and_then(VariableBinding::variable_id))
        .or_else(|| bound.values().find_map(VariableBinding::variable_id))
}
