//! Chart colours.

use plotters::style::RGBColor;

/// Default series colour (line chart).
pub const SERIES_BLUE: RGBColor = RGBColor(31, 119, 180);

/// Histogram bar fill.
pub const SKY_BLUE: RGBColor = RGBColor(135, 206, 235);

/// Sequential ramp for per-region bars, dark to light.
pub const VIRIDIS: [RGBColor; 10] = [
    RGBColor(68, 1, 84),
    RGBColor(72, 40, 120),
    RGBColor(62, 73, 137),
    RGBColor(49, 104, 142),
    RGBColor(38, 130, 142),
    RGBColor(31, 158, 137),
    RGBColor(53, 183, 121),
    RGBColor(110, 206, 88),
    RGBColor(181, 222, 43),
    RGBColor(253, 231, 37),
];

/// Qualitative palette for region hue in scatter plots.
pub const SET2: [RGBColor; 8] = [
    RGBColor(102, 194, 165), // Teal
    RGBColor(252, 141, 98),  // Orange
    RGBColor(141, 160, 203), // Lavender
    RGBColor(231, 138, 195), // Pink
    RGBColor(166, 216, 84),  // Lime
    RGBColor(255, 217, 47),  // Yellow
    RGBColor(229, 196, 148), // Tan
    RGBColor(179, 179, 179), // Grey
];

/// Colour for bar `index` of `count`, spread evenly across the viridis ramp.
pub fn viridis(index: usize, count: usize) -> RGBColor {
    if count <= 1 {
        return VIRIDIS[0];
    }
    let last = VIRIDIS.len() - 1;
    VIRIDIS[(index.min(count - 1) * last) / (count - 1)]
}

/// Colour for region `index`; wraps around after the palette is exhausted.
pub fn region_color(index: usize) -> RGBColor {
    SET2[index % SET2.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viridis_spans_the_ramp() {
        assert_eq!(viridis(0, 4), VIRIDIS[0]);
        assert_eq!(viridis(3, 4), VIRIDIS[9]);
        assert_eq!(viridis(0, 1), VIRIDIS[0]);
    }

    #[test]
    fn region_colors_cycle() {
        assert_eq!(region_color(0), region_color(SET2.len()));
        assert_ne!(region_color(0), region_color(1));
    }
}
