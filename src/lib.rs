#![forbid(unsafe_code)]

pub mod anchor;
pub mod animator;
pub mod config;
pub mod core;
pub mod error;
pub mod flight;
pub mod reveal;
pub mod surface;

pub use anchor::anchor_id;
pub use animator::ViewportAnimator;
pub use config::{AnimatorConfig, FlapConfig, FlightConfig, LoopMode, RevealConfig};
pub use core::{Point, Pose, ScrollBehavior, Vec2, ViewportMetrics, WingFrame};
pub use error::{VolantError, VolantResult};
pub use flight::{FlapClock, FlightPath};
pub use reveal::{StageSet, StageSpec, visible_fraction};
pub use surface::{MockSurface, Surface};
