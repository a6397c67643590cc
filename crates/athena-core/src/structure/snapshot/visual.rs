//! Style references, corner radii, effects and instance links.

use crate::color::to_rgba_string;
use crate::host::mixed::uniform;
use crate::host::{EffectKind, Mixable, NodeKind, SceneNode};
use crate::structure::model::{
    CornerRadii, InstanceInfo, NodeEffect, NodeStyles, Offset, Radius, StyleRef,
};

fn style_ref(id: &Option<Mixable<String>>) -> Option<StyleRef> {
    uniform(id).filter(|id| !id.is_empty()).map(|id| StyleRef {
        style_key: id.clone(),
    })
}

pub fn extract_styles(node: &SceneNode) -> Option<NodeStyles> {
    let styles = NodeStyles {
        fill: style_ref(&node.fill_style_id),
        stroke: style_ref(&node.stroke_style_id),
        text: if node.kind == NodeKind::Text {
            style_ref(&node.text_style_id)
        } else {
            None
        },
        effects: style_ref(&node.effect_style_id).map(|r| vec![r]),
    };
    (!styles.is_empty()).then_some(styles)
}

/// Uniform radius as a scalar; otherwise the four corners when all are known
pub fn extract_radius(node: &SceneNode) -> Option<Radius> {
    let corner_radius = node.corner_radius.as_ref()?;
    if let Mixable::Uniform(radius) = corner_radius {
        return Some(Radius::Uniform(*radius));
    }
    Some(Radius::Corners(CornerRadii {
        top_left: node.top_left_radius?,
        top_right: node.top_right_radius?,
        bottom_right: node.bottom_right_radius?,
        bottom_left: node.bottom_left_radius?,
    }))
}

/// Shadows and blurs; other effect kinds are dropped
pub fn extract_effects(node: &SceneNode) -> Option<Vec<NodeEffect>> {
    let effects = uniform(&node.effects)?;
    let kept: Vec<NodeEffect> = effects
        .iter()
        .filter(|e| {
            matches!(
                e.kind,
                EffectKind::DropShadow
                    | EffectKind::InnerShadow
                    | EffectKind::LayerBlur
                    | EffectKind::BackgroundBlur
            )
        })
        .map(|e| NodeEffect {
            kind: e.kind,
            radius: e.radius,
            color: e.color.map(|c| to_rgba_string(c.r, c.g, c.b, c.a)),
            offset: e.offset.map(|o| Offset { x: o.x, y: o.y }),
        })
        .collect();
    (!kept.is_empty()).then_some(kept)
}

pub fn extract_instance(node: &SceneNode) -> Option<InstanceInfo> {
    if node.kind != NodeKind::Instance {
        return None;
    }
    let main = node.main_component.as_ref()?;
    Some(InstanceInfo {
        component_key: main.key.clone(),
        variant_properties: node.variant_properties.clone(),
    })
}
