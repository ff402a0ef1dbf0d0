/// Our custom color representation for easy manipulation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AppColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl AppColor {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    /// Channel-wise interpolation, `t` clamped to [0, 1].
    pub fn lerp(self, other: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
            a: self.a + (other.a - self.a) * t,
        }
    }

    /// Create a darker version (for rect outlines).
    pub fn darken(self, amount: f32) -> Self {
        Self {
            r: (self.r - amount).max(0.0),
            g: (self.g - amount).max(0.0),
            b: (self.b - amount).max(0.0),
            a: self.a,
        }
    }

    /// `#rrggbb`, alpha ignored.
    pub fn to_hex(self) -> String {
        let c = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{:02x}{:02x}{:02x}", c(self.r), c(self.g), c(self.b))
    }
}

/// Two-stop gradient used to color rects by weight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorRamp {
    pub start: AppColor,
    pub end: AppColor,
}

impl Default for ColorRamp {
    fn default() -> Self {
        Self {
            start: AppColor::from_rgb8(144, 224, 239), // light teal
            end: AppColor::from_rgb8(255, 85, 0),      // dark orange
        }
    }
}

impl ColorRamp {
    /// Map `value` linearly from `[min, max]` onto the ramp. An empty range maps to `start`.
    pub fn map_linear(&self, value: f64, min: f64, max: f64) -> AppColor {
        let range = max - min;
        if !(range > 0.0) {
            return self.start;
        }
        self.start.lerp(self.end, ((value - min) / range) as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ramp_endpoints_map_to_stops() {
        let ramp = ColorRamp::default();
        assert_eq!(ramp.map_linear(1.0, 1.0, 20.0).to_hex(), "#90e0ef");
        assert_eq!(ramp.map_linear(20.0, 1.0, 20.0).to_hex(), "#ff5500");
        assert_eq!(ramp.map_linear(99.0, 1.0, 20.0).to_hex(), "#ff5500");
    }

    #[test]
    fn empty_range_uses_start_color() {
        let ramp = ColorRamp::default();
        assert_eq!(ramp.map_linear(5.0, 5.0, 5.0), ramp.start);
    }

    #[test]
    fn darken_saturates_at_zero() {
        let c = AppColor::new(0.1, 0.5, 1.0).darken(0.2);
        assert_eq!(c.r, 0.0);
        assert!((c.b - 0.8).abs() < 1e-6);
    }
}
