//! drift UI: the bubble animation on top of `drift-engine`.
//!
//! A [`GradientView`] owns two groups of [`BubbleLayer`]s. Each bubble keeps
//! springing from one random target to the next until told to stop; the view
//! broadcasts start/stop/pause/resume, follows host lifecycle signals and
//! composites everything into a [`Canvas`](drift_engine::raster::Canvas).
//!
//! ```rust,ignore
//! use drift_ui::prelude::*;
//!
//! let mut view = GradientView::new(ViewConfig::default(), MotionConfig::default());
//! view.layout(300.0, 200.0);
//! view.reconcile(Group::Base, &base_colors, now);
//! view.reconcile(Group::Highlight, &highlight_colors, now);
//! view.view_did_appear(now);
//!
//! // every frame:
//! view.tick(now);
//! view.compose(now, &mut canvas)?;
//! ```

pub mod bubble;
mod compose;
pub mod geometry;
pub mod motion;
pub mod snapshot;
pub mod view;

pub use bubble::{BubbleGeometry, BubbleLayer, BubbleState};
pub use motion::{MotionConfig, MotionCurve};
pub use view::{AnimationState, GradientView, Group, ToggleMode, ViewConfig};

/// Everything a host needs to drive a view.
pub mod prelude {
    pub use crate::bubble::{BubbleGeometry, BubbleLayer, BubbleState};
    pub use crate::motion::{MotionConfig, MotionCurve};
    pub use crate::view::{AnimationState, GradientView, Group, ToggleMode, ViewConfig};

    pub use drift_engine::coords::{Rect, Vec2, Viewport};
    pub use drift_engine::paint::Color;
    pub use drift_engine::raster::Canvas;
}
