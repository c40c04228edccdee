//! Segment fill colors.

use speedometer_core::Color;

/// Fill colors for `count` segments.
///
/// Segment `i` takes `overrides[i]` when present, otherwise the HSL blend of
/// `start` and `end` at `i / count`. The first segment is exactly `start`.
#[must_use]
pub fn segment_colors(start: Color, end: Color, count: usize, overrides: &[Color]) -> Vec<Color> {
    (0..count)
        .map(|i| {
            if let Some(color) = overrides.get(i) {
                *color
            } else if i == 0 {
                start
            } else {
                start.lerp_hsl(&end, i as f32 / count as f32)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start() -> Color {
        Color::from_hex("#FF471A").unwrap()
    }

    fn end() -> Color {
        Color::from_hex("#33CC33").unwrap()
    }

    #[test]
    fn test_first_segment_is_start_color() {
        let colors = segment_colors(start(), end(), 5, &[]);
        assert_eq!(colors.len(), 5);
        assert_eq!(colors[0].to_css_rgb(), "rgb(255, 71, 26)");
    }

    #[test]
    fn test_hue_moves_towards_end() {
        let colors = segment_colors(start(), end(), 4, &[]);
        let hues: Vec<f32> = colors.iter().map(|c| c.to_hsl().0).collect();
        assert!(hues.windows(2).all(|w| w[0] < w[1]), "{hues:?}");
        assert!(hues[3] < end().to_hsl().0);
    }

    #[test]
    fn test_overrides_by_index() {
        let overrides = [Color::from_hex("#123456").unwrap()];
        let colors = segment_colors(start(), end(), 3, &overrides);
        assert_eq!(colors[0].to_hex(), "#123456");
        assert_eq!(colors[1], segment_colors(start(), end(), 3, &[])[1]);
    }

    #[test]
    fn test_more_overrides_than_segments() {
        let overrides = vec![Color::WHITE; 10];
        assert_eq!(segment_colors(start(), end(), 2, &overrides), vec![Color::WHITE; 2]);
    }

    #[test]
    fn test_zero_segments() {
        assert!(segment_colors(start(), end(), 0, &[]).is_empty());
    }
}
