//! Config Resolver.
//!
//! Merges caller options with the documented defaults and picks one of the
//! two fixed timing presets. Every field falls back on its own: a missing
//! field never affects how another one resolves.
//!
//! ## Defaults
//!
//! | field               | default     |
//! |---------------------|-------------|
//! | `card_distance`     | `70`        |
//! | `vertical_distance` | `55`        |
//! | `delay_ms`          | `5000`      |
//! | `pause_on_hover`    | `true`      |
//! | `skew_amount`       | `6`         |
//! | `easing`            | `"elastic"` |

use std::fmt;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::{CardSwapError, CardSwapResult};

/// Easing curve identifier handed to the animation engine.
///
/// The curve math lives in the engine. This type only names it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EaseCurve {
    /// Overshooting spring that settles on the target.
    ElasticOut {
        /// Overshoot amplitude.
        amplitude: f32,
        /// Oscillation period.
        period: f32,
    },
    /// Gentle quadratic ease in both directions.
    Power1InOut,
}

impl fmt::Display for EaseCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ElasticOut { amplitude, period } => {
                write!(f, "elastic.out({amplitude},{period})")
            }
            Self::Power1InOut => f.write_str("power1.inOut"),
        }
    }
}

/// Which timing preset a carousel runs with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EasingMode {
    /// Springy preset with long, overlapping durations.
    #[default]
    Elastic,
    /// Short eased preset. Any unrecognized easing name lands here.
    Linear,
}

impl EasingMode {
    /// Name that selects the elastic preset. Everything else is linear.
    pub const ELASTIC_NAME: &'static str = "elastic";

    /// Maps an easing option to a preset.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        if name == Self::ELASTIC_NAME {
            Self::Elastic
        } else {
            Self::Linear
        }
    }
}

/// Durations and overlap fractions for one sequence.
///
/// Durations are in seconds, the unit the engine schedules in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimingProfile {
    /// Curve used by every tween in the sequence.
    pub ease: EaseCurve,
    /// Duration of the front card's drop.
    pub dur_drop: f32,
    /// Duration of each promotion tween.
    pub dur_move: f32,
    /// Duration of the dropped card's return to the back slot.
    pub dur_return: f32,
    /// Fraction of the drop that the promotion overlaps.
    pub promote_overlap: f32,
    /// Fraction of `dur_move` after `promote` at which the return starts.
    pub return_delay: f32,
}

impl TimingProfile {
    /// Springy preset.
    pub const ELASTIC: Self = Self {
        ease: EaseCurve::ElasticOut {
            amplitude: 0.6,
            period: 0.9,
        },
        dur_drop: 2.0,
        dur_move: 2.0,
        dur_return: 2.0,
        promote_overlap: 0.9,
        return_delay: 0.05,
    };

    /// Short eased preset.
    pub const LINEAR: Self = Self {
        ease: EaseCurve::Power1InOut,
        dur_drop: 0.8,
        dur_move: 0.8,
        dur_return: 0.8,
        promote_overlap: 0.45,
        return_delay: 0.2,
    };

    /// Returns the preset for an easing mode.
    #[must_use]
    pub const fn for_mode(mode: EasingMode) -> Self {
        match mode {
            EasingMode::Elastic => Self::ELASTIC,
            EasingMode::Linear => Self::LINEAR,
        }
    }
}

/// Caller-supplied options. Every field is optional.
///
/// Can be built in code with the `with_*` setters or loaded from TOML:
///
/// ```toml
/// card_distance = 60
/// delay_ms = 3000
/// easing = "linear"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CardSwapOptions {
    /// Horizontal (and depth) spacing between ranks.
    pub card_distance: Option<f32>,
    /// Vertical spacing between ranks.
    pub vertical_distance: Option<f32>,
    /// Period of the repeating trigger, in milliseconds.
    pub delay_ms: Option<u64>,
    /// Whether hovering the container pauses the carousel.
    pub pause_on_hover: Option<bool>,
    /// Constant vertical skew applied at initial placement.
    pub skew_amount: Option<f32>,
    /// Easing mode name. `"elastic"` or anything else.
    pub easing: Option<String>,
}

impl CardSwapOptions {
    /// Creates an empty option set (all defaults).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses options from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`CardSwapError::InvalidConfig`] on malformed TOML, a wrong
    /// field type or an unknown field.
    pub fn from_toml_str(text: &str) -> CardSwapResult<Self> {
        toml::from_str(text).map_err(|e| CardSwapError::InvalidConfig(e.to_string()))
    }

    /// Reads and parses an option file.
    ///
    /// # Errors
    ///
    /// Returns [`CardSwapError::ConfigIo`] if the file cannot be read and
    /// [`CardSwapError::InvalidConfig`] if it does not parse.
    pub fn from_toml_file(path: impl AsRef<Path>) -> CardSwapResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| CardSwapError::ConfigIo {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_toml_str(&text)
    }

    /// Sets the rank spacing.
    #[must_use]
    pub fn with_card_distance(mut self, distance: f32) -> Self {
        self.card_distance = Some(distance);
        self
    }

    /// Sets the vertical rank spacing.
    #[must_use]
    pub fn with_vertical_distance(mut self, distance: f32) -> Self {
        self.vertical_distance = Some(distance);
        self
    }

    /// Sets the trigger period in milliseconds.
    #[must_use]
    pub fn with_delay_ms(mut self, delay_ms: u64) -> Self {
        self.delay_ms = Some(delay_ms);
        self
    }

    /// Enables or disables pause on hover.
    #[must_use]
    pub fn with_pause_on_hover(mut self, enabled: bool) -> Self {
        self.pause_on_hover = Some(enabled);
        self
    }

    /// Sets the placement skew.
    #[must_use]
    pub fn with_skew_amount(mut self, skew: f32) -> Self {
        self.skew_amount = Some(skew);
        self
    }

    /// Sets the easing mode name.
    #[must_use]
    pub fn with_easing(mut self, easing: impl Into<String>) -> Self {
        self.easing = Some(easing.into());
        self
    }

    /// Applies defaults and derives the timing profile.
    #[must_use]
    pub fn resolve(&self) -> CardSwapConfig {
        let easing = self
            .easing
            .as_deref()
            .map_or(EasingMode::Elastic, EasingMode::from_name);

        CardSwapConfig {
            card_distance: self.card_distance.unwrap_or(CardSwapConfig::DEFAULT_CARD_DISTANCE),
            vertical_distance: self
                .vertical_distance
                .unwrap_or(CardSwapConfig::DEFAULT_VERTICAL_DISTANCE),
            delay: Duration::from_millis(self.delay_ms.unwrap_or(CardSwapConfig::DEFAULT_DELAY_MS)),
            pause_on_hover: self
                .pause_on_hover
                .unwrap_or(CardSwapConfig::DEFAULT_PAUSE_ON_HOVER),
            skew_amount: self.skew_amount.unwrap_or(CardSwapConfig::DEFAULT_SKEW_AMOUNT),
            easing,
            timing: TimingProfile::for_mode(easing),
        }
    }
}

/// Fully resolved, immutable carousel configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardSwapConfig {
    /// Horizontal (and depth) spacing between ranks.
    pub card_distance: f32,
    /// Vertical spacing between ranks.
    pub vertical_distance: f32,
    /// Period of the repeating trigger.
    pub delay: Duration,
    /// Whether hovering the container pauses the carousel.
    pub pause_on_hover: bool,
    /// Constant vertical skew applied at initial placement.
    pub skew_amount: f32,
    /// Selected easing mode.
    pub easing: EasingMode,
    /// Timing preset derived from `easing`.
    pub timing: TimingProfile,
}

impl CardSwapConfig {
    /// Default rank spacing.
    pub const DEFAULT_CARD_DISTANCE: f32 = 70.0;
    /// Default vertical rank spacing.
    pub const DEFAULT_VERTICAL_DISTANCE: f32 = 55.0;
    /// Default trigger period (ms).
    pub const DEFAULT_DELAY_MS: u64 = 5000;
    /// Hover pauses by default.
    pub const DEFAULT_PAUSE_ON_HOVER: bool = true;
    /// Default placement skew.
    pub const DEFAULT_SKEW_AMOUNT: f32 = 6.0;
}

impl Default for CardSwapConfig {
    fn default() -> Self {
        CardSwapOptions::default().resolve()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_options_resolve_to_defaults() {
        let config = CardSwapOptions::new().resolve();

        assert_eq!(config.card_distance, 70.0);
        assert_eq!(config.vertical_distance, 55.0);
        assert_eq!(config.delay, Duration::from_millis(5000));
        assert!(config.pause_on_hover);
        assert_eq!(config.skew_amount, 6.0);
        assert_eq!(config.easing, EasingMode::Elastic);
        assert_eq!(config.timing, TimingProfile::ELASTIC);
    }

    #[test]
    fn test_fields_default_independently() {
        let config = CardSwapOptions::new()
            .with_vertical_distance(10.0)
            .with_pause_on_hover(false)
            .resolve();

        assert_eq!(config.card_distance, 70.0);
        assert_eq!(config.vertical_distance, 10.0);
        assert!(!config.pause_on_hover);
        assert_eq!(config.skew_amount, 6.0);
    }

    #[test]
    fn test_zero_is_not_treated_as_missing() {
        let config = CardSwapOptions::new()
            .with_card_distance(0.0)
            .with_skew_amount(0.0)
            .with_delay_ms(0)
            .resolve();

        assert_eq!(config.card_distance, 0.0);
        assert_eq!(config.skew_amount, 0.0);
        assert_eq!(config.delay, Duration::ZERO);
    }

    #[test]
    fn test_unrecognized_easing_selects_linear_preset() {
        let config = CardSwapOptions::new().with_easing("linear").resolve();

        assert_eq!(config.easing, EasingMode::Linear);
        assert_eq!(config.timing.ease, EaseCurve::Power1InOut);
        assert_eq!(config.timing.dur_drop, 0.8);
        assert_eq!(config.timing.dur_move, 0.8);
        assert_eq!(config.timing.dur_return, 0.8);
        assert_eq!(config.timing.promote_overlap, 0.45);
        assert_eq!(config.timing.return_delay, 0.2);

        let bounce = CardSwapOptions::new().with_easing("bounce").resolve();
        assert_eq!(bounce.timing, TimingProfile::LINEAR);
    }

    #[test]
    fn test_ease_identifiers() {
        assert_eq!(TimingProfile::ELASTIC.ease.to_string(), "elastic.out(0.6,0.9)");
        assert_eq!(TimingProfile::LINEAR.ease.to_string(), "power1.inOut");
    }

    #[test]
    fn test_options_from_toml() {
        let options = CardSwapOptions::from_toml_str(
            r#"
            card_distance = 60.0
            delay_ms = 3000
            easing = "linear"
            "#,
        )
        .unwrap();

        let config = options.resolve();
        assert_eq!(config.card_distance, 60.0);
        assert_eq!(config.vertical_distance, 55.0);
        assert_eq!(config.delay, Duration::from_millis(3000));
        assert_eq!(config.timing, TimingProfile::LINEAR);
    }

    #[test]
    fn test_unknown_toml_field_rejected() {
        let result = CardSwapOptions::from_toml_str("card_spacing = 4.0");
        assert!(matches!(result, Err(CardSwapError::InvalidConfig(_))));
    }

    #[test]
    fn test_missing_file_reports_path() {
        let result = CardSwapOptions::from_toml_file("/nonexistent/cardswap.toml");
        match result {
            Err(CardSwapError::ConfigIo { path, .. }) => {
                assert_eq!(path, "/nonexistent/cardswap.toml");
            }
            other => panic!("expected ConfigIo, got {other:?}"),
        }
    }
}
