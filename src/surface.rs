use std::collections::{BTreeMap, BTreeSet};

use crate::core::{Pose, ScrollBehavior, ViewportMetrics, WingFrame};

/// The host boundary. Everything the animator reads from or writes to the
/// page goes through this trait, so the controller runs identically under a
/// wasm DOM binding, a native preview shell, or a test mock.
///
/// Implementations should treat every write as a plain property set; the
/// animator owns all sequencing and never issues conflicting writes within
/// one callback.
pub trait Surface {
    /// User preference, sampled once at [`start`](crate::ViewportAnimator::start).
    fn prefers_reduced_motion(&self) -> bool;
    /// Whether the host can deliver intersection reports. When false, every
    /// stage is revealed immediately at start.
    fn supports_intersection(&self) -> bool;
    fn scroll_offset(&self) -> f64;
    fn viewport(&self) -> ViewportMetrics;
    fn anchor_target_exists(&self, id: &str) -> bool;

    fn set_stage_visible(&mut self, id: &str);
    fn set_stage_background(&mut self, id: &str, url: &str);
    fn set_wing_frame(&mut self, frame: WingFrame);
    fn set_flapping(&mut self, on: bool);
    fn apply_pose(&mut self, pose: &Pose);
    fn scroll_to(&mut self, id: &str, behavior: ScrollBehavior);
    /// Schedule one animation callback; the animator guarantees at most one
    /// outstanding request.
    fn request_frame(&mut self);
}

/// Recording in-memory surface. Used by this crate's own tests and exported
/// so embedders can drive the animator without a rendering environment.
#[derive(Clone, Debug)]
pub struct MockSurface {
    pub reduced_motion: bool,
    pub intersection_supported: bool,
    pub scroll_y: f64,
    pub metrics: ViewportMetrics,
    anchor_targets: BTreeSet<String>,

    pub visible: BTreeSet<String>,
    pub visible_events: Vec<String>,
    pub backgrounds: BTreeMap<String, String>,
    pub background_writes: usize,
    pub wing: Option<WingFrame>,
    pub wing_events: Vec<WingFrame>,
    pub flapping: bool,
    pub flapping_events: Vec<bool>,
    pub poses: Vec<Pose>,
    pub scrolls: Vec<(String, ScrollBehavior)>,
    pub frames_requested: usize,
}

impl Default for MockSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl MockSurface {
    pub fn new() -> Self {
        Self {
            reduced_motion: false,
            intersection_supported: true,
            scroll_y: 0.0,
            metrics: ViewportMetrics {
                document_height: 4000.0,
                window_height: 800.0,
                window_width: 1280.0,
            },
            anchor_targets: BTreeSet::new(),
            visible: BTreeSet::new(),
            visible_events: Vec::new(),
            backgrounds: BTreeMap::new(),
            background_writes: 0,
            wing: None,
            wing_events: Vec::new(),
            flapping: false,
            flapping_events: Vec::new(),
            poses: Vec::new(),
            scrolls: Vec::new(),
            frames_requested: 0,
        }
    }

    pub fn with_anchor_target(mut self, id: impl Into<String>) -> Self {
        self.anchor_targets.insert(id.into());
        self
    }

    pub fn last_pose(&self) -> Option<&Pose> {
        self.poses.last()
    }
}

impl Surface for MockSurface {
    fn prefers_reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    fn supports_intersection(&self) -> bool {
        self.intersection_supported
    }

    fn scroll_offset(&self) -> f64 {
        self.scroll_y
    }

    fn viewport(&self) -> ViewportMetrics {
        self.metrics
    }

    fn anchor_target_exists(&self, id: &str) -> bool {
        self.anchor_targets.contains(id)
    }

    fn set_stage_visible(&mut self, id: &str) {
        self.visible.insert(id.to_string());
        self.visible_events.push(id.to_string());
    }

    fn set_stage_background(&mut self, id: &str, url: &str) {
        self.backgrounds.insert(id.to_string(), url.to_string());
        self.background_writes += 1;
    }

    fn set_wing_frame(&mut self, frame: WingFrame) {
        self.wing = Some(frame);
        self.wing_events.push(frame);
    }

    fn set_flapping(&mut self, on: bool) {
        self.flapping = on;
        self.flapping_events.push(on);
    }

    fn apply_pose(&mut self, pose: &Pose) {
        self.poses.push(*pose);
    }

    fn scroll_to(&mut self, id: &str, behavior: ScrollBehavior) {
        self.scrolls.push((id.to_string(), behavior));
    }

    fn request_frame(&mut self) {
        self.frames_requested += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_records_writes_in_order() {
        let mut s = MockSurface::new();
        s.set_wing_frame(WingFrame::Up);
        s.set_wing_frame(WingFrame::Down);
        assert_eq!(s.wing, Some(WingFrame::Down));
        assert_eq!(s.wing_events, vec![WingFrame::Up, WingFrame::Down]);
    }

    #[test]
    fn anchor_targets_resolve() {
        let s = MockSurface::new().with_anchor_target("intro");
        assert!(s.anchor_target_exists("intro"));
        assert!(!s.anchor_target_exists("missing-id"));
    }
}
