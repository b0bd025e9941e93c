use std::f64::consts::PI;

use crate::{
    config::FlightConfig,
    core::{Pose, Vec2},
    error::{VolantError, VolantResult},
};

/// Fixed-interval toggle timer for the two wing frames. Elapsed time
/// accumulates per frame; when the interval elapses the timer resets to zero
/// and reports a toggle. Simple alternation, not counted frames.
#[derive(Clone, Copy, Debug)]
pub struct FlapClock {
    interval_ms: f64,
    acc_ms: f64,
}

impl FlapClock {
    pub fn new(interval_ms: f64) -> VolantResult<Self> {
        if !(interval_ms.is_finite() && interval_ms > 0.0) {
            return Err(VolantError::animation("flap interval must be > 0"));
        }
        Ok(Self {
            interval_ms,
            acc_ms: 0.0,
        })
    }

    /// Advance by one frame's elapsed time. Returns true when the wing frame
    /// should toggle. Negative deltas (clock skew on the host) are ignored.
    pub fn advance(&mut self, dt_ms: f64) -> bool {
        self.acc_ms += dt_ms.max(0.0);
        if self.acc_ms >= self.interval_ms {
            self.acc_ms = 0.0;
            return true;
        }
        false
    }
}

/// Pure pose evaluation. Position, rotation, and scale are functions of
/// elapsed time, scroll progress, and the window-width breakpoint; nothing
/// here is stored as independent truth, so any (t, progress, width) triple
/// evaluates to the same pose.
#[derive(Clone, Copy, Debug)]
pub struct FlightPath {
    cfg: FlightConfig,
}

impl FlightPath {
    pub fn new(cfg: FlightConfig) -> Self {
        Self { cfg }
    }

    /// The centered rest pose rendered once under reduced motion.
    pub fn static_pose() -> Pose {
        Pose::default()
    }

    /// Scroll-driven horizontal traversal term.
    pub fn traverse_term(&self, scroll_progress: f64) -> f64 {
        let p = scroll_progress.clamp(0.0, 1.0);
        (p * self.cfg.traverse_cycles * PI).sin() * self.cfg.traverse_amp
    }

    pub fn pose(&self, elapsed_secs: f64, scroll_progress: f64, window_width: f64) -> Pose {
        let cfg = &self.cfg;
        let t = elapsed_secs;
        let p = scroll_progress.clamp(0.0, 1.0);

        let base = if window_width > cfg.breakpoint_px {
            cfg.desktop_base
        } else {
            cfg.mobile_base
        };

        let hover_x = (t * cfg.hover_x_freq).sin() * cfg.hover_x_amp;
        let hover_y = (t * cfg.hover_y_freq).sin() * cfg.hover_y_amp;
        let traverse = self.traverse_term(p);

        // Tilt follows the horizontal velocity: the analytic derivative of
        // the hover term plus the traversal derivative weighted by the
        // nominal scroll rate.
        let hover_vel = (t * cfg.hover_x_freq).cos() * cfg.hover_x_freq * cfg.hover_x_amp;
        let traverse_vel = (p * cfg.traverse_cycles * PI).cos()
            * cfg.traverse_cycles
            * PI
            * cfg.scroll_rate_scale
            * cfg.traverse_amp;
        let rotation_deg = (hover_vel + traverse_vel) * cfg.tilt_factor;

        let scale = cfg.scale_base + (t * cfg.scale_freq).sin() * cfg.scale_amp;

        Pose {
            translate: Vec2::new(base.x + hover_x + traverse, base.y + hover_y),
            rotation_deg,
            scale,
        }
    }
}
