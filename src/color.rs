use eframe::egui::Color32;
use palette::Srgb;

// ---------------------------------------------------------------------------
// Color strings → Color32
// ---------------------------------------------------------------------------

/// Parse a CSS colour name (`"orange"`) or a hex string (`"#ff8800"`, `"#f80"`).
pub fn parse_color(spec: &str) -> Option<Color32> {
    let spec = spec.trim();
    let rgb: Srgb<u8> = if spec.starts_with('#') {
        spec.parse().ok()?
    } else {
        palette::named::from_str(&spec.to_ascii_lowercase())?
    };
    Some(Color32::from_rgb(rgb.red, rgb.green, rgb.blue))
}

/// Like [`parse_color`], falling back to grey for anything unrecognised.
pub fn color_or_gray(spec: &str) -> Color32 {
    parse_color(spec).unwrap_or_else(|| {
        log::warn!("Unknown color '{spec}', using gray");
        Color32::GRAY
    })
}
