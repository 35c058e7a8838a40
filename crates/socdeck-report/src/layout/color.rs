/// Trend pill colors.
pub const UP_COLOR: &str = "2E7D32";
pub const DOWN_COLOR: &str = "C62828";
pub const NEUTRAL_COLOR: &str = "757575";

pub const TEXT_COLOR: &str = "1F2933";
pub const MUTED_COLOR: &str = "6B7280";
pub const SURFACE_COLOR: &str = "F3F4F6";
pub const WHITE: &str = "FFFFFF";

/// Dark or white text, whichever reads better on `background` (`RRGGBB`).
#[must_use]
pub fn readable_text_color(background: &str) -> &'static str {
    let channel = |i: usize| {
        background
            .get(i..i + 2)
            .and_then(|hex| u8::from_str_radix(hex, 16).ok())
            .map(f64::from)
    };
    match (channel(0), channel(2), channel(4)) {
        (Some(r), Some(g), Some(b)) if background.len() == 6 => {
            let luma = 0.299 * r + 0.587 * g + 0.114 * b;
            if luma > 150.0 {
                TEXT_COLOR
            } else {
                WHITE
            }
        }
        _ => WHITE,
    }
}
