use serde::{Deserialize, Serialize};

/// Reference intensity levels for pixel classification.
///
/// Charts render three relevant tones: the pure-dark axis line, the
/// mid-gray unit marks, and the white background. The levels are explicit
/// configuration so the same classifier recalibrates to a different
/// rendering (anti-aliasing, compression artifacts) without code change.
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub struct IntensityLevels {
    /// Background (white) reference.
    pub background: u8,
    /// Unit-mark (gray) reference.
    pub mark: u8,
    /// Axis-line (black) reference.
    pub axis: u8,
}

impl Default for IntensityLevels {
    fn default() -> Self {
        Self {
            background: 255,
            mark: 103,
            axis: 0,
        }
    }
}

impl IntensityLevels {
    /// Nearest-distance classification: true when `sample` is strictly
    /// closer to the mark reference than to the background reference.
    #[inline]
    pub fn is_mark(&self, sample: u8) -> bool {
        let mark = (i16::from(sample) - i16::from(self.mark)).abs();
        let background = (i16::from(self.background) - i16::from(sample)).abs();
        mark < background
    }

    /// True when `sample` is exactly the axis-line level.
    #[inline]
    pub fn is_axis(&self, sample: u8) -> bool {
        sample == self.axis
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mark_level_classifies_as_mark() {
        let levels = IntensityLevels::default();
        assert!(levels.is_mark(103));
        assert!(levels.is_mark(90));
        assert!(levels.is_mark(130));
    }

    #[test]
    fn background_level_classifies_as_background() {
        let levels = IntensityLevels::default();
        assert!(!levels.is_mark(255));
        assert!(!levels.is_mark(240));
    }

    #[test]
    fn midpoint_ties_go_to_background() {
        // 179 is equidistant from 103 and 255: not strictly closer to mark.
        let levels = IntensityLevels::default();
        assert!(!levels.is_mark(179));
        assert!(levels.is_mark(178));
    }

    #[test]
    fn axis_is_exact_match() {
        let levels = IntensityLevels::default();
        assert!(levels.is_axis(0));
        assert!(!levels.is_axis(1));
    }

    #[test]
    fn levels_roundtrip_through_json() {
        let levels = IntensityLevels {
            background: 250,
            mark: 110,
            axis: 5,
        };
        let json = serde_json::to_string(&levels).ok();
        let back: Option<IntensityLevels> = json.and_then(|j| serde_json::from_str(&j).ok());
        assert!(matches!(back, Some(l) if l.mark == 110 && l.background == 250 && l.axis == 5));
    }
}
