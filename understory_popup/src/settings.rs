// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Popup configuration.

/// Tunables shared by the popup, its list panel, and the placement engine.
///
/// With the `serde` feature enabled this can be loaded from any serde format;
/// call [`PopupSettings::validate`] on values that did not come from
/// [`Default`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PopupSettings {
    /// Width of the frame drawn around the list on every side.
    pub border_size: f64,
    /// Max list height used when the popup fits on screen.
    pub default_max_height: f64,
    /// Raw gesture delta units per wheel tick.
    pub wheel_tick_divisor: f64,
    /// Horizontal padding on each side of an item's text.
    pub item_padding: f64,
    /// Width added to the list when not every row fits.
    pub scrollbar_thickness: f64,
}

impl PopupSettings {
    /// Default border size.
    pub const DEFAULT_BORDER_SIZE: f64 = 1.0;
    /// Default max list height, independent of the screen size.
    pub const DEFAULT_MAX_HEIGHT: f64 = 500.0;
    /// Default gesture-to-wheel divisor.
    pub const DEFAULT_WHEEL_TICK_DIVISOR: f64 = 120.0;

    /// Check that every field is finite and in range.
    pub fn validate(&self) -> Result<(), SettingsError> {
        let fields = [
            ("border_size", self.border_size),
            ("default_max_height", self.default_max_height),
            ("wheel_tick_divisor", self.wheel_tick_divisor),
            ("item_padding", self.item_padding),
            ("scrollbar_thickness", self.scrollbar_thickness),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(SettingsError::NotFinite { field });
            }
            if value < 0.0 {
                return Err(SettingsError::Negative { field, value });
            }
        }
        if self.wheel_tick_divisor == 0.0 {
            return Err(SettingsError::ZeroWheelDivisor);
        }
        Ok(())
    }

    /// Border size on both sides of an axis.
    pub fn border_pair(&self) -> f64 {
        self.border_size * 2.0
    }
}

impl Default for PopupSettings {
    fn default() -> Self {
        Self {
            border_size: Self::DEFAULT_BORDER_SIZE,
            default_max_height: Self::DEFAULT_MAX_HEIGHT,
            wheel_tick_divisor: Self::DEFAULT_WHEEL_TICK_DIVISOR,
            item_padding: 2.0,
            scrollbar_thickness: 15.0,
        }
    }
}

/// Invalid [`PopupSettings`].
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum SettingsError {
    /// A field is NaN or infinite.
    #[error("`{field}` must be finite")]
    NotFinite {
        /// Offending field name.
        field: &'static str,
    },
    /// A length field is below zero.
    #[error("`{field}` must not be negative, got {value}")]
    Negative {
        /// Offending field name.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// Gesture deltas cannot be converted with a zero divisor.
    #[error("`wheel_tick_divisor` must be non-zero")]
    ZeroWheelDivisor,
}
