use serde::{Deserialize, Serialize};

pub const TRANSPARENCY_RANGE_SLIDER_MAX: i32 = 200;
pub const TRANSPARENCY_OFFSET_SLIDER_MAX: i32 = 100;

#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub const fn new(r: f64, g: f64, b: f64) -> Rgb {
        Rgb { r, g, b }
    }

    pub fn to_array(self) -> [f64; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<[f64; 3]> for Rgb {
    fn from([r, g, b]: [f64; 3]) -> Rgb {
        Rgb { r, g, b }
    }
}

/// Look shared by every ghost in the session
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Appearance {
    pub color: Rgb,
    /// Frame distance at which a ghost fades out completely. Must be positive.
    pub transparency_range: f64,
    /// Base transparency added before clamping, in `[0, 1]`
    pub transparency_offset: f64,
}

impl Default for Appearance {
    fn default() -> Appearance {
        Appearance {
            color: Rgb::default(),
            transparency_range: 100.0,
            transparency_offset: 0.0,
        }
    }
}

impl Appearance {
    /// Transparency for a ghost at `ghost_frame` while the playhead sits at
    /// `current_frame`. 0 is opaque, 1 is fully transparent.
    ///
    /// Only the upper bound is clamped. A negative offset yields values below
    /// zero and is not a supported input.
    pub fn transparency(&self, ghost_frame: i32, current_frame: i32) -> f64 {
        let distance = (ghost_frame as f64 - current_frame as f64).abs();
        let normalized = distance / self.transparency_range + self.transparency_offset;

        normalized.min(1.0)
    }

    pub fn set_range_from_slider(&mut self, value: i32) {
        self.transparency_range = value.clamp(0, TRANSPARENCY_RANGE_SLIDER_MAX) as f64;
    }

    pub fn set_offset_from_slider(&mut self, value: i32) {
        let value = value.clamp(0, TRANSPARENCY_OFFSET_SLIDER_MAX);
        self.transparency_offset = value as f64 / TRANSPARENCY_OFFSET_SLIDER_MAX as f64;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    fn appearance(range: f64, offset: f64) -> Appearance {
        Appearance {
            transparency_range: range,
            transparency_offset: offset,
            ..Default::default()
        }
    }

    #[rstest]
    #[case(10, 10, 100.0, 0.0, 0.0)]
    #[case(10, 10, 100.0, 0.25, 0.25)]
    #[case(0, 50, 100.0, 0.0, 0.5)]
    #[case(50, 0, 100.0, 0.0, 0.5)]
    #[case(0, 50, 100.0, 0.3, 0.8)]
    #[case(0, 150, 100.0, 0.0, 1.0)]
    #[case(0, 90, 100.0, 0.5, 1.0)]
    #[case(-20, 20, 80.0, 0.0, 0.5)]
    fn transparency_follows_falloff(
        #[case] ghost_frame: i32,
        #[case] current_frame: i32,
        #[case] range: f64,
        #[case] offset: f64,
        #[case] expected: f64,
    ) {
        let value = appearance(range, offset).transparency(ghost_frame, current_frame);
        assert!((value - expected).abs() < 1e-9, "expected {expected}, got {value}");
    }

    #[test]
    fn transparency_never_exceeds_one() {
        for range in [1.0, 7.5, 100.0, 200.0] {
            for offset in [0.0, 0.1, 0.5, 1.0] {
                let app = appearance(range, offset);

                for ghost_frame in (-300..=300).step_by(13) {
                    for current_frame in (-300..=300).step_by(17) {
                        assert!(app.transparency(ghost_frame, current_frame) <= 1.0);
                    }
                }
            }
        }
    }

    #[test]
    fn negative_offset_is_not_clamped() {
        let value = appearance(100.0, -0.5).transparency(0, 0);
        assert_eq!(value, -0.5);
    }

    #[rstest]
    #[case(0, 0.0)]
    #[case(35, 0.35)]
    #[case(100, 1.0)]
    #[case(-20, 0.0)]
    #[case(150, 1.0)]
    fn offset_slider_maps_to_unit_range(#[case] value: i32, #[case] expected: f64) {
        let mut app = Appearance::default();
        app.set_offset_from_slider(value);
        assert!((app.transparency_offset - expected).abs() < 1e-9);
    }

    #[rstest]
    #[case(60, 60.0)]
    #[case(200, 200.0)]
    #[case(350, 200.0)]
    #[case(-1, 0.0)]
    fn range_slider_is_clamped(#[case] value: i32, #[case] expected: f64) {
        let mut app = Appearance::default();
        app.set_range_from_slider(value);
        assert_eq!(app.transparency_range, expected);
    }
}
