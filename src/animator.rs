use crate::{
    anchor::anchor_id,
    config::{AnimatorConfig, LoopMode},
    core::{ScrollBehavior, ViewportMetrics, WingFrame},
    error::VolantResult,
    flight::{FlapClock, FlightPath},
    reveal::{StageSet, StageSpec},
    surface::Surface,
};

/// The page-scoped controller. One instance owns all mutable state (cached
/// metrics, flap timer, last timestamp, pending-frame guard); the host wires
/// its event sources to the `on_*` methods and implements [`Surface`].
///
/// Event flow:
///
/// 1. [`start`](Self::start) once at page load
/// 2. [`on_frame`](Self::on_frame) whenever a requested callback fires
/// 3. [`on_scroll`](Self::on_scroll) / [`on_resize`](Self::on_resize) from
///    the matching host events
/// 4. [`on_intersection`](Self::on_intersection) from observer reports
/// 5. [`on_anchor_click`](Self::on_anchor_click) from click events on links
pub struct ViewportAnimator {
    config: AnimatorConfig,
    stages: StageSet,
    path: FlightPath,
    flap: FlapClock,
    wing: WingFrame,

    metrics: ViewportMetrics,
    last_timestamp_ms: Option<f64>,
    elapsed_secs: f64,
    pulse_remaining_ms: f64,

    reduced_motion: bool,
    started: bool,
    frame_pending: bool,
}

impl ViewportAnimator {
    pub fn new(config: AnimatorConfig, stages: Vec<StageSpec>) -> VolantResult<Self> {
        config.validate()?;
        let flap = FlapClock::new(config.flap.interval_ms)?;
        let path = FlightPath::new(config.flight);
        Ok(Self {
            config,
            stages: StageSet::new(stages)?,
            path,
            flap,
            wing: WingFrame::Up,
            metrics: ViewportMetrics {
                document_height: 0.0,
                window_height: 0.0,
                window_width: 0.0,
            },
            last_timestamp_ms: None,
            elapsed_secs: 0.0,
            pulse_remaining_ms: 0.0,
            reduced_motion: false,
            started: false,
            frame_pending: false,
        })
    }

    pub fn config(&self) -> &AnimatorConfig {
        &self.config
    }

    pub fn wing_frame(&self) -> WingFrame {
        self.wing
    }

    pub fn stage_visible(&self, id: &str) -> bool {
        self.stages.is_visible(id)
    }

    /// One-time initialization. Samples the reduced-motion preference and
    /// the viewport, binds stage backgrounds, assigns the initial wing
    /// frame, and either schedules the first animation frame or renders the
    /// static centered pose once.
    #[tracing::instrument(skip(self, surface))]
    pub fn start(&mut self, surface: &mut dyn Surface) {
        if self.started {
            return;
        }
        self.started = true;

        self.reduced_motion = surface.prefers_reduced_motion();
        self.metrics = surface.viewport();
        self.stages.bind_backgrounds(surface);

        if !surface.supports_intersection() {
            tracing::debug!("intersection detection unavailable, revealing all stages");
            self.stages.reveal_all(surface);
        }

        surface.set_wing_frame(self.wing);

        if self.reduced_motion {
            surface.apply_pose(&FlightPath::static_pose());
        } else {
            self.request_frame(surface);
        }
    }

    /// One animation callback. Advances the flap clock, evaluates the pose
    /// from (elapsed time, scroll progress, window width), and in
    /// [`LoopMode::Continuous`] schedules the next frame. Self-cancels under
    /// reduced motion.
    pub fn on_frame(&mut self, now_ms: f64, surface: &mut dyn Surface) {
        self.frame_pending = false;
        if !self.started || self.reduced_motion {
            return;
        }

        let dt_ms = match self.last_timestamp_ms {
            Some(last) => (now_ms - last).max(0.0),
            None => 0.0,
        };
        self.last_timestamp_ms = Some(now_ms);
        self.elapsed_secs += dt_ms / 1000.0;

        if self.pulse_remaining_ms > 0.0 {
            self.pulse_remaining_ms = (self.pulse_remaining_ms - dt_ms).max(0.0);
            if self.pulse_remaining_ms == 0.0 {
                surface.set_flapping(false);
            }
        }

        if self.flap.advance(dt_ms) {
            self.wing = self.wing.toggled();
            surface.set_wing_frame(self.wing);
            if self.config.flap.pulse_ms > 0.0 {
                self.pulse_remaining_ms = self.config.flap.pulse_ms;
                surface.set_flapping(true);
            }
        }

        let progress = self.metrics.scroll_progress(surface.scroll_offset());
        let pose = self
            .path
            .pose(self.elapsed_secs, progress, self.metrics.window_width);
        surface.apply_pose(&pose);

        if self.config.loop_mode == LoopMode::Continuous {
            self.request_frame(surface);
        }
    }

    /// Scroll event. In [`LoopMode::OnDemand`] this schedules a frame,
    /// coalesced with any already pending one; the continuous loop needs no
    /// nudge.
    pub fn on_scroll(&mut self, surface: &mut dyn Surface) {
        if self.started && self.config.loop_mode == LoopMode::OnDemand {
            self.request_frame(surface);
        }
    }

    /// Resize event: re-reads the cached viewport metrics, and in
    /// [`LoopMode::OnDemand`] schedules a coalesced frame.
    pub fn on_resize(&mut self, surface: &mut dyn Surface) {
        if !self.started {
            return;
        }
        self.metrics = surface.viewport();
        if self.config.loop_mode == LoopMode::OnDemand {
            self.request_frame(surface);
        }
    }

    /// Observer report for one stage.
    pub fn on_intersection(&mut self, id: &str, visible_fraction: f64, surface: &mut dyn Surface) {
        self.stages
            .observe(id, visible_fraction, self.config.reveal.threshold, surface);
    }

    /// Click on a link. Local `#id` hrefs whose target exists scroll to the
    /// target (instantly under reduced motion) and report handled; anything
    /// else is left to the host's default navigation.
    pub fn on_anchor_click(&mut self, href: &str, surface: &mut dyn Surface) -> bool {
        let Some(id) = anchor_id(href) else {
            return false;
        };
        if !surface.anchor_target_exists(id) {
            return false;
        }
        let behavior = if self.reduced_motion {
            ScrollBehavior::Instant
        } else {
            ScrollBehavior::Smooth
        };
        surface.scroll_to(id, behavior);
        true
    }

    fn request_frame(&mut self, surface: &mut dyn Surface) {
        if self.frame_pending || self.reduced_motion {
            return;
        }
        self.frame_pending = true;
        surface.request_frame();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::FlapConfig, surface::MockSurface};

    fn animator(loop_mode: LoopMode) -> ViewportAnimator {
        let config = AnimatorConfig {
            loop_mode,
            ..AnimatorConfig::default()
        };
        ViewportAnimator::new(config, Vec::new()).unwrap()
    }

    #[test]
    fn start_schedules_exactly_one_frame() {
        let mut a = animator(LoopMode::Continuous);
        let mut s = MockSurface::new();
        a.start(&mut s);
        a.start(&mut s);
        assert_eq!(s.frames_requested, 1);
        assert_eq!(s.wing, Some(WingFrame::Up));
    }

    #[test]
    fn continuous_mode_reschedules_each_frame() {
        let mut a = animator(LoopMode::Continuous);
        let mut s = MockSurface::new();
        a.start(&mut s);
        a.on_frame(0.0, &mut s);
        a.on_frame(16.0, &mut s);
        // Start plus one reschedule per frame.
        assert_eq!(s.frames_requested, 3);
    }

    #[test]
    fn on_demand_coalesces_scroll_bursts() {
        let mut a = animator(LoopMode::OnDemand);
        let mut s = MockSurface::new();
        a.start(&mut s);
        assert_eq!(s.frames_requested, 1);

        a.on_frame(0.0, &mut s);
        assert_eq!(s.frames_requested, 1);

        for _ in 0..10 {
            a.on_scroll(&mut s);
        }
        assert_eq!(s.frames_requested, 2);

        // The pending frame fires, after which one more can be scheduled.
        a.on_frame(16.0, &mut s);
        a.on_scroll(&mut s);
        assert_eq!(s.frames_requested, 3);
    }

    #[test]
    fn reduced_motion_renders_one_static_pose() {
        let mut a = animator(LoopMode::Continuous);
        let mut s = MockSurface::new();
        s.reduced_motion = true;
        a.start(&mut s);
        assert_eq!(s.frames_requested, 0);
        assert_eq!(s.poses, vec![FlightPath::static_pose()]);

        // Simulated callbacks change nothing.
        for i in 0..5 {
            a.on_frame(f64::from(i) * 16.0, &mut s);
            a.on_scroll(&mut s);
        }
        assert_eq!(s.frames_requested, 0);
        assert_eq!(s.poses, vec![FlightPath::static_pose()]);
    }

    #[test]
    fn wing_toggles_once_per_interval() {
        let mut a = animator(LoopMode::Continuous);
        let mut s = MockSurface::new();
        a.start(&mut s);

        // First callback establishes the timestamp base.
        a.on_frame(0.0, &mut s);
        assert_eq!(a.wing_frame(), WingFrame::Up);

        a.on_frame(150.0, &mut s);
        assert_eq!(a.wing_frame(), WingFrame::Down);

        a.on_frame(300.0, &mut s);
        assert_eq!(a.wing_frame(), WingFrame::Up);
    }

    #[test]
    fn flap_pulse_raises_and_clears() {
        let config = AnimatorConfig {
            flap: FlapConfig {
                interval_ms: 150.0,
                pulse_ms: 100.0,
            },
            ..AnimatorConfig::default()
        };
        let mut a = ViewportAnimator::new(config, Vec::new()).unwrap();
        let mut s = MockSurface::new();
        a.start(&mut s);

        a.on_frame(0.0, &mut s);
        a.on_frame(150.0, &mut s);
        assert!(s.flapping);

        a.on_frame(200.0, &mut s);
        assert!(s.flapping);
        a.on_frame(260.0, &mut s);
        assert!(!s.flapping);
    }

    #[test]
    fn resize_refreshes_cached_metrics() {
        let mut a = animator(LoopMode::Continuous);
        let mut s = MockSurface::new();
        a.start(&mut s);
        a.on_frame(0.0, &mut s);

        // Narrow the window below the breakpoint; the next frame flips to
        // the mobile base offset.
        s.metrics.window_width = 400.0;
        a.on_resize(&mut s);
        a.on_frame(16.0, &mut s);

        let pose = s.last_pose().unwrap();
        assert!(pose.translate.y < 0.0);
    }

    #[test]
    fn anchor_click_scrolls_to_existing_target() {
        let mut a = animator(LoopMode::Continuous);
        let mut s = MockSurface::new().with_anchor_target("flyway");
        a.start(&mut s);

        assert!(a.on_anchor_click("#flyway", &mut s));
        assert_eq!(
            s.scrolls,
            vec![("flyway".to_string(), ScrollBehavior::Smooth)]
        );
    }

    #[test]
    fn anchor_click_on_missing_target_is_untouched() {
        let mut a = animator(LoopMode::Continuous);
        let mut s = MockSurface::new();
        a.start(&mut s);

        assert!(!a.on_anchor_click("#missing-id", &mut s));
        assert!(!a.on_anchor_click("https://example.org/", &mut s));
        assert!(s.scrolls.is_empty());
    }

    #[test]
    fn anchor_click_is_instant_under_reduced_motion() {
        let mut a = animator(LoopMode::Continuous);
        let mut s = MockSurface::new().with_anchor_target("flyway");
        s.reduced_motion = true;
        a.start(&mut s);

        assert!(a.on_anchor_click("#flyway", &mut s));
        assert_eq!(
            s.scrolls,
            vec![("flyway".to_string(), ScrollBehavior::Instant)]
        );
    }
}
