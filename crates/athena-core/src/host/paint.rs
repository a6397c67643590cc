//! Paints, colors and effects as the host reports them.

use super::node::BoundVariables;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaintKind {
    Solid,
    GradientLinear,
    GradientRadial,
    GradientAngular,
    GradientDiamond,
    Image,
    Video,
    Pattern,
    #[serde(other)]
    Other,
}

impl PaintKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaintKind::Solid => "SOLID",
            PaintKind::GradientLinear => "GRADIENT_LINEAR",
            PaintKind::GradientRadial => "GRADIENT_RADIAL",
            PaintKind::GradientAngular => "GRADIENT_ANGULAR",
            PaintKind::GradientDiamond => "GRADIENT_DIAMOND",
            PaintKind::Image => "IMAGE",
            PaintKind::Video => "VIDEO",
            PaintKind::Pattern => "PATTERN",
            PaintKind::Other => "OTHER",
        }
    }
}

/// One entry of a node's or style's paint list
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paint {
    #[serde(rename = "type")]
    pub kind: PaintKind,
    #[serde(default)]
    pub color: Option<Rgb>,
    #[serde(default)]
    pub opacity: Option<f64>,
    #[serde(default)]
    pub visible: Option<bool>,
    #[serde(default)]
    pub bound_variables: BoundVariables,
}

impl Paint {
    pub fn solid(r: f64, g: f64, b: f64) -> Self {
        Self {
            kind: PaintKind::Solid,
            color: Some(Rgb { r, g, b }),
            opacity: None,
            visible: None,
            bound_variables: BoundVariables::new(),
        }
    }

    pub fn is_solid(&self) -> bool {
        self.kind == PaintKind::Solid
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EffectKind {
    DropShadow,
    InnerShadow,
    LayerBlur,
    BackgroundBlur,
    Noise,
    Texture,
    #[serde(other)]
    Other,
}

impl EffectKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EffectKind::DropShadow => "DROP_SHADOW",
            EffectKind::InnerShadow => "INNER_SHADOW",
            EffectKind::LayerBlur => "LAYER_BLUR",
            EffectKind::BackgroundBlur => "BACKGROUND_BLUR",
            EffectKind::Noise => "NOISE",
            EffectKind::Texture => "TEXTURE",
            EffectKind::Other => "OTHER",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Effect {
    #[serde(rename = "type")]
    pub kind: EffectKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Rgba>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<Vector>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spread: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
}
