use drift_engine::paint::Color;

/// Violets with one warm accent and a deep indigo, drawn normally.
const BASE: [[f32; 3]; 7] = [
    [0.557, 0.353, 0.969],
    [0.587, 0.184, 0.971],
    [0.745, 0.157, 0.075],
    [0.557, 0.353, 0.969],
    [0.587, 0.184, 0.971],
    [0.557, 0.353, 0.969],
    [0.122, 0.012, 0.424],
];

/// Bright accents blended with overlay.
const HIGHLIGHT: [[f32; 3]; 5] = [
    [0.861, 0.000, 0.737],
    [0.953, 0.686, 0.133],
    [1.000, 0.000, 0.754],
    [0.176, 0.498, 0.757],
    [0.722, 0.886, 0.592],
];

/// Window background around the card.
pub const BACKDROP: [f32; 3] = [0.255, 0.275, 0.302];

fn colors(rgb: &[[f32; 3]]) -> Vec<Color> {
    rgb.iter().map(|&[r, g, b]| Color::from_straight(r, g, b, 1.0)).collect()
}

pub fn base() -> Vec<Color> {
    colors(&BASE)
}

pub fn highlight() -> Vec<Color> {
    colors(&HIGHLIGHT)
}

pub fn backdrop() -> Color {
    let [r, g, b] = BACKDROP;
    Color::from_straight(r, g, b, 1.0)
}
