use crate::{
    config::RevealConfig,
    core::ViewportMetrics,
    error::{VolantError, VolantResult},
    surface::Surface,
};

/// Declarative description of one page section, as carried by markup.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct StageSpec {
    pub id: String,
    /// Background image URL bound once at startup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
}

#[derive(Clone, Debug)]
struct Stage {
    spec: StageSpec,
    visible: bool,
}

/// The tracked sections and their reveal state. Visibility is monotonic: a
/// stage that has revealed stays revealed for the life of the set.
#[derive(Clone, Debug)]
pub struct StageSet {
    stages: Vec<Stage>,
    backgrounds_bound: bool,
}

impl StageSet {
    pub fn new(specs: Vec<StageSpec>) -> VolantResult<Self> {
        for (i, spec) in specs.iter().enumerate() {
            if spec.id.trim().is_empty() {
                return Err(VolantError::validation(format!(
                    "stage {i} has an empty id"
                )));
            }
            if specs[..i].iter().any(|s| s.id == spec.id) {
                return Err(VolantError::validation(format!(
                    "duplicate stage id '{}'",
                    spec.id
                )));
            }
        }
        Ok(Self {
            stages: specs
                .into_iter()
                .map(|spec| Stage {
                    spec,
                    visible: false,
                })
                .collect(),
            backgrounds_bound: false,
        })
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub fn is_visible(&self, id: &str) -> bool {
        self.stages
            .iter()
            .any(|s| s.spec.id == id && s.visible)
    }

    /// Push each stage's background URL to the host. One-shot: repeated calls
    /// are no-ops, so re-running initialization never re-binds.
    pub fn bind_backgrounds(&mut self, surface: &mut dyn Surface) {
        if self.backgrounds_bound {
            return;
        }
        self.backgrounds_bound = true;
        for stage in &self.stages {
            if let Some(url) = &stage.spec.background {
                surface.set_stage_background(&stage.spec.id, url);
            }
        }
    }

    /// Record an intersection report. Marks the stage permanently visible
    /// once its visible fraction meets `threshold`. Unknown ids and already
    /// visible stages are ignored. Returns whether a stage newly revealed.
    pub fn observe(
        &mut self,
        id: &str,
        visible_fraction: f64,
        threshold: f64,
        surface: &mut dyn Surface,
    ) -> bool {
        let Some(stage) = self.stages.iter_mut().find(|s| s.spec.id == id) else {
            return false;
        };
        if stage.visible || visible_fraction < threshold {
            return false;
        }
        stage.visible = true;
        surface.set_stage_visible(&stage.spec.id);
        true
    }

    /// Fallback for hosts without intersection detection: every stage
    /// reveals immediately, so no content is ever hidden behind a missing
    /// capability.
    pub fn reveal_all(&mut self, surface: &mut dyn Surface) {
        for stage in &mut self.stages {
            if !stage.visible {
                stage.visible = true;
                surface.set_stage_visible(&stage.spec.id);
            }
        }
    }
}

/// Fraction of a stage inside the trigger viewport, for hosts that report
/// raw geometry instead of observer entries. The trigger viewport is the
/// window with `bottom_margin_fraction` of its height trimmed off the
/// bottom, so stages fire slightly before fully scrolling in.
///
/// Positions are document coordinates; `stage_top` is the stage's offset
/// from the document top.
pub fn visible_fraction(
    stage_top: f64,
    stage_height: f64,
    scroll_y: f64,
    metrics: ViewportMetrics,
    cfg: RevealConfig,
) -> f64 {
    if stage_height <= 0.0 {
        return 0.0;
    }
    let view_top = scroll_y;
    let view_bottom = scroll_y + metrics.window_height * (1.0 - cfg.bottom_margin_fraction);
    let overlap = (stage_top + stage_height).min(view_bottom) - stage_top.max(view_top);
    (overlap / stage_height).clamp(0.0, 1.0)
}
