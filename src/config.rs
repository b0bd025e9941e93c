use crate::{
    core::Vec2,
    error::{VolantError, VolantResult},
};

/// Full tuning surface for the animator. Every constant that wants hand
/// tuning is a named field; the defaults are the documented baseline.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AnimatorConfig {
    pub flap: FlapConfig,
    pub flight: FlightConfig,
    pub reveal: RevealConfig,
    pub loop_mode: LoopMode,
}

impl Default for AnimatorConfig {
    fn default() -> Self {
        Self {
            flap: FlapConfig::default(),
            flight: FlightConfig::default(),
            reveal: RevealConfig::default(),
            loop_mode: LoopMode::Continuous,
        }
    }
}

/// Wing-frame toggle cadence.
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FlapConfig {
    /// Milliseconds between wing-frame toggles.
    pub interval_ms: f64,
    /// Duration of the "flapping" bounce flag raised on each toggle.
    /// 0 disables the pulse entirely.
    pub pulse_ms: f64,
}

impl Default for FlapConfig {
    fn default() -> Self {
        Self {
            interval_ms: 150.0,
            pulse_ms: 0.0,
        }
    }
}

/// Pose tuning. Translations are in viewport units (vw/vh) relative to the
/// sprite's centered anchor.
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FlightConfig {
    /// Window widths strictly above this use `desktop_base`, the rest
    /// `mobile_base`.
    pub breakpoint_px: f64,
    /// Resting offset on wide windows (clear of the text column).
    pub desktop_base: Vec2,
    /// Resting offset on narrow windows (above the text).
    pub mobile_base: Vec2,

    /// Horizontal hover oscillation: `sin(t * freq) * amp`.
    pub hover_x_amp: f64,
    pub hover_x_freq: f64,
    /// Vertical hover oscillation.
    pub hover_y_amp: f64,
    pub hover_y_freq: f64,

    /// Scroll traversal: `sin(progress * cycles * PI) * amp`.
    pub traverse_amp: f64,
    pub traverse_cycles: f64,

    /// Weight of the traversal derivative in the tilt term; stands in for
    /// the nominal scroll rate (progress per second).
    pub scroll_rate_scale: f64,
    /// Rotation = horizontal velocity * tilt_factor.
    pub tilt_factor: f64,

    /// Breathing scale: `base + sin(t * freq) * amp`. Must stay positive.
    pub scale_base: f64,
    pub scale_freq: f64,
    pub scale_amp: f64,
}

impl Default for FlightConfig {
    fn default() -> Self {
        Self {
            breakpoint_px: 768.0,
            desktop_base: Vec2::new(35.0, 0.0),
            mobile_base: Vec2::new(0.0, -35.0),
            hover_x_amp: 10.0,
            hover_x_freq: 0.5,
            hover_y_amp: 5.0,
            hover_y_freq: 1.2,
            traverse_amp: 10.0,
            traverse_cycles: 3.0,
            scroll_rate_scale: 0.01,
            tilt_factor: 1.5,
            scale_base: 0.8,
            scale_freq: 0.8,
            scale_amp: 0.1,
        }
    }
}

/// Stage reveal trigger geometry.
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    /// Fraction of the window height trimmed off the bottom of the trigger
    /// viewport, so stages reveal slightly before fully entering.
    pub bottom_margin_fraction: f64,
    /// Fraction of a stage that must be inside the trimmed viewport.
    pub threshold: f64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            bottom_margin_fraction: 0.10,
            threshold: 0.20,
        }
    }
}

/// Frame-loop strategy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum LoopMode {
    /// Every frame reschedules the next; motion runs while the page lives.
    Continuous,
    /// Frames are scheduled only from scroll/resize events, coalesced to at
    /// most one outstanding callback.
    OnDemand,
}

impl AnimatorConfig {
    pub fn validate(&self) -> VolantResult<()> {
        if !(self.flap.interval_ms.is_finite() && self.flap.interval_ms > 0.0) {
            return Err(VolantError::validation("flap interval_ms must be > 0"));
        }
        if !(self.flap.pulse_ms.is_finite() && self.flap.pulse_ms >= 0.0) {
            return Err(VolantError::validation("flap pulse_ms must be >= 0"));
        }

        let f = &self.flight;
        for (name, v) in [
            ("breakpoint_px", f.breakpoint_px),
            ("desktop_base.x", f.desktop_base.x),
            ("desktop_base.y", f.desktop_base.y),
            ("mobile_base.x", f.mobile_base.x),
            ("mobile_base.y", f.mobile_base.y),
            ("hover_x_amp", f.hover_x_amp),
            ("hover_x_freq", f.hover_x_freq),
            ("hover_y_amp", f.hover_y_amp),
            ("hover_y_freq", f.hover_y_freq),
            ("traverse_amp", f.traverse_amp),
            ("traverse_cycles", f.traverse_cycles),
            ("scroll_rate_scale", f.scroll_rate_scale),
            ("tilt_factor", f.tilt_factor),
            ("scale_base", f.scale_base),
            ("scale_freq", f.scale_freq),
            ("scale_amp", f.scale_amp),
        ] {
            if !v.is_finite() {
                return Err(VolantError::validation(format!(
                    "flight {name} must be finite"
                )));
            }
        }
        if f.breakpoint_px <= 0.0 {
            return Err(VolantError::validation("flight breakpoint_px must be > 0"));
        }
        if f.scale_base - f.scale_amp.abs() <= 0.0 {
            return Err(VolantError::validation(
                "flight scale breathing must keep scale > 0",
            ));
        }

        let r = &self.reveal;
        if !(r.bottom_margin_fraction.is_finite()
            && (0.0..1.0).contains(&r.bottom_margin_fraction))
        {
            return Err(VolantError::validation(
                "reveal bottom_margin_fraction must be in [0, 1)",
            ));
        }
        if !(r.threshold.is_finite() && r.threshold > 0.0 && r.threshold <= 1.0) {
            return Err(VolantError::validation(
                "reveal threshold must be in (0, 1]",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        AnimatorConfig::default().validate().unwrap();
    }

    #[test]
    fn zero_flap_interval_is_rejected() {
        let mut cfg = AnimatorConfig::default();
        cfg.flap.interval_ms = 0.0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn breathing_through_zero_scale_is_rejected() {
        let mut cfg = AnimatorConfig::default();
        cfg.flight.scale_base = 0.1;
        cfg.flight.scale_amp = 0.2;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn threshold_bounds_are_enforced() {
        let mut cfg = AnimatorConfig::default();
        cfg.reveal.threshold = 0.0;
        assert!(cfg.validate().is_err());
        cfg.reveal.threshold = 1.5;
        assert!(cfg.validate().is_err());
        cfg.reveal.threshold = 1.0;
        cfg.validate().unwrap();
    }

    #[test]
    fn partial_json_fills_defaults() {
        let cfg: AnimatorConfig =
            serde_json::from_str(r#"{ "flap": { "interval_ms": 180.0 } }"#).unwrap();
        assert_eq!(cfg.flap.interval_ms, 180.0);
        assert_eq!(cfg.flap.pulse_ms, 0.0);
        assert_eq!(cfg.flight.breakpoint_px, 768.0);
        assert_eq!(cfg.loop_mode, LoopMode::Continuous);
        cfg.validate().unwrap();
    }

    #[test]
    fn json_round_trip_preserves_tuning() {
        let mut cfg = AnimatorConfig::default();
        cfg.loop_mode = LoopMode::OnDemand;
        cfg.flap.pulse_ms = 220.0;
        let s = serde_json::to_string(&cfg).unwrap();
        let back: AnimatorConfig = serde_json::from_str(&s).unwrap();
        assert_eq!(back.loop_mode, LoopMode::OnDemand);
        assert_eq!(back.flap.pulse_ms, 220.0);
    }
}
