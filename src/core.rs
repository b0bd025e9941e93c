use crate::error::{VolantError, VolantResult};

pub use kurbo::{Point, Vec2};

/// Cached document/window measurements. Recomputed only on resize; frames
/// read the cached copy.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ViewportMetrics {
    pub document_height: f64,
    pub window_height: f64,
    pub window_width: f64,
}

impl ViewportMetrics {
    pub fn new(document_height: f64, window_height: f64, window_width: f64) -> VolantResult<Self> {
        let m = Self {
            document_height,
            window_height,
            window_width,
        };
        m.validate()?;
        Ok(m)
    }

    pub fn validate(&self) -> VolantResult<()> {
        for (name, v) in [
            ("document_height", self.document_height),
            ("window_height", self.window_height),
            ("window_width", self.window_width),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(VolantError::validation(format!(
                    "ViewportMetrics {name} must be finite and >= 0"
                )));
            }
        }
        Ok(())
    }

    /// Scrollable distance, floored at 1 so progress never divides by zero
    /// on pages shorter than the window.
    pub fn max_scroll(self) -> f64 {
        (self.document_height - self.window_height).max(1.0)
    }

    /// Scroll offset mapped to [0, 1].
    pub fn scroll_progress(self, scroll_y: f64) -> f64 {
        (scroll_y / self.max_scroll()).clamp(0.0, 1.0)
    }
}

/// Which of the two sprite frames is active. Exactly one is active at any
/// time; hosts receive the whole enum, never two independent flags.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum WingFrame {
    Up,
    Down,
}

impl WingFrame {
    pub fn toggled(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
        }
    }
}

/// One evaluated sprite placement: translation in viewport units (vw/vh from
/// the sprite's centered anchor), rotation in degrees, uniform scale.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Pose {
    pub translate: Vec2,
    pub rotation_deg: f64,
    pub scale: f64,
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            translate: Vec2::ZERO,
            rotation_deg: 0.0,
            scale: 1.0,
        }
    }
}

impl Pose {
    /// The host CSS string. The sprite element carries `translate(-50%, -50%)`
    /// centering in its stylesheet; the calc() terms add the dynamic offset.
    pub fn to_css_transform(&self) -> String {
        format!(
            "translate(calc(-50% + {}vw), calc(-50% + {}vh)) rotate({}deg) scale({})",
            self.translate.x, self.translate.y, self.rotation_deg, self.scale
        )
    }
}

/// How an anchor scroll should behave on the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ScrollBehavior {
    Smooth,
    Instant,
}
