//! Color conversions shared by the snapshot, token and style exporters.

/// 0..1 channel to 0..255, rounded and clamped
pub fn channel_to_u8(channel: f64) -> u8 {
    (channel * 255.0).round().clamp(0.0, 255.0) as u8
}

/// `#RRGGBB`, upper case
pub fn to_hex(r: f64, g: f64, b: f64) -> String {
    format!(
        "#{:02X}{:02X}{:02X}",
        channel_to_u8(r),
        channel_to_u8(g),
        channel_to_u8(b)
    )
}

/// `rgba(r, g, b, a)` with the alpha at two decimals
pub fn to_rgba_string(r: f64, g: f64, b: f64, a: f64) -> String {
    format!(
        "rgba({}, {}, {}, {:.2})",
        channel_to_u8(r),
        channel_to_u8(g),
        channel_to_u8(b),
        a
    )
}

/// Round to two decimals
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
