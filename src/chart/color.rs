use serde::{Deserialize, Serialize};

use crate::error::{UpsetError, UpsetResult};

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    /// Neutral backdrop for the membership grid.
    pub const LIGHT_GREY: Self = Self::rgb(211.0 / 255.0, 211.0 / 255.0, 211.0 / 255.0);
    /// Accent used for membership dots.
    pub const BLUE: Self = Self::rgb(0.0, 0.0, 1.0);
    /// Default bar fill.
    pub const INDIGO: Self = Self::rgb(99.0 / 255.0, 110.0 / 255.0, 250.0 / 255.0);

    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    pub fn validate(self) -> UpsetResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(UpsetError::InvalidConfig(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }

    /// CSS `rgba(...)` notation with 8-bit channels.
    #[must_use]
    pub fn to_css(self) -> String {
        let to_byte = |value: f64| (value.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "rgba({}, {}, {}, {})",
            to_byte(self.red),
            to_byte(self.green),
            to_byte(self.blue),
            self.alpha.clamp(0.0, 1.0)
        )
    }
}
