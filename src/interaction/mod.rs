pub mod domain_options;
pub mod transition;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::ScaleYType;
use crate::series::ValueView;

pub use domain_options::{
    TimeDomainOption, TimeDomainOptions, TimeDomainWidth, default_time_domain,
    time_domain_options, visible_max_millis,
};
pub use transition::{DomainTransition, ease_out_cubic};

/// Presentation flags for one intervention track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InterventionTrackState {
    /// Track is hovered or pinned.
    pub highlighted: bool,
    /// Track shows its per-range detail: pinned, or hovered while nothing is pinned.
    pub expanded: bool,
    /// Another track is hovered or pinned.
    pub deemphasized: bool,
}

/// Ephemeral pointer and control state for one chart.
///
/// Hover and pin are independent: a pin survives hover changes and is only
/// changed by clicks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionState {
    hover_x: Option<f64>,
    hover_intervention: Option<usize>,
    pinned_intervention: Option<usize>,
    cumulative: bool,
    scale_y_type: ScaleYType,
    domain_width: TimeDomainWidth,
}

impl Default for InteractionState {
    fn default() -> Self {
        Self {
            hover_x: None,
            hover_intervention: None,
            pinned_intervention: None,
            cumulative: false,
            scale_y_type: ScaleYType::Linear,
            domain_width: TimeDomainWidth::FullRange,
        }
    }
}

impl InteractionState {
    #[must_use]
    pub fn with_domain_width(mut self, width: TimeDomainWidth) -> Self {
        self.domain_width = width;
        self
    }

    #[must_use]
    pub fn hover_x(self) -> Option<f64> {
        self.hover_x
    }

    #[must_use]
    pub fn hover_intervention(self) -> Option<usize> {
        self.hover_intervention
    }

    #[must_use]
    pub fn pinned_intervention(self) -> Option<usize> {
        self.pinned_intervention
    }

    /// Track whose date labels are shown: the pinned one, else the hovered one.
    #[must_use]
    pub fn focused_intervention(self) -> Option<usize> {
        self.pinned_intervention.or(self.hover_intervention)
    }

    #[must_use]
    pub fn cumulative(self) -> bool {
        self.cumulative
    }

    #[must_use]
    pub fn value_view(self) -> ValueView {
        ValueView::from_cumulative(self.cumulative)
    }

    #[must_use]
    pub fn scale_y_type(self) -> ScaleYType {
        self.scale_y_type
    }

    #[must_use]
    pub fn domain_width(self) -> TimeDomainWidth {
        self.domain_width
    }

    /// Non-finite positions are treated as leaving the plot.
    pub fn on_hover_x(&mut self, x: Option<f64>) {
        self.hover_x = x.filter(|x| x.is_finite());
    }

    pub fn on_hover_intervention(&mut self, index: Option<usize>) {
        self.hover_intervention = index;
    }

    pub fn on_pin_intervention(&mut self, index: Option<usize>) {
        if self.pinned_intervention != index {
            debug!(from = ?self.pinned_intervention, to = ?index, "intervention pin changed");
        }
        self.pinned_intervention = index;
    }

    /// Click on a track: clicking the pinned track unpins it, any other
    /// track becomes the pinned one.
    pub fn toggle_pin(&mut self, index: usize) {
        let next = if self.pinned_intervention == Some(index) {
            None
        } else {
            Some(index)
        };
        self.on_pin_intervention(next);
    }

    pub fn on_pointer_leave(&mut self) {
        self.hover_x = None;
        self.hover_intervention = None;
    }

    pub fn set_cumulative(&mut self, cumulative: bool) {
        self.cumulative = cumulative;
    }

    pub fn set_scale_y_type(&mut self, scale_y_type: ScaleYType) {
        self.scale_y_type = scale_y_type;
    }

    /// Returns `true` when the width actually changed.
    pub fn set_domain_width(&mut self, width: TimeDomainWidth) -> bool {
        if self.domain_width == width {
            return false;
        }
        debug!(from = ?self.domain_width, to = ?width, "time domain width changed");
        self.domain_width = width;
        true
    }

    #[must_use]
    pub fn track_state(self, index: usize) -> InterventionTrackState {
        let hovered = self.hover_intervention == Some(index);
        let pinned = self.pinned_intervention == Some(index);
        let focus = self.hover_intervention.or(self.pinned_intervention);
        InterventionTrackState {
            highlighted: hovered || pinned,
            expanded: pinned || (hovered && self.pinned_intervention.is_none()),
            deemphasized: focus.is_some() && !hovered && !pinned,
        }
    }
}

/// Maps a pointer y (relative to the plot top) onto an intervention track.
///
/// Tracks sit directly below the charts; positions above them, and indices
/// past the last track, resolve to `None`.
#[must_use]
pub fn intervention_at_y(
    local_y: f64,
    charts_height: f64,
    track_height: f64,
    track_count: usize,
) -> Option<usize> {
    if !local_y.is_finite() || track_height <= 0.0 || local_y <= charts_height {
        return None;
    }
    let index = ((local_y - charts_height) / track_height).floor();
    if index < 0.0 || index >= track_count as f64 {
        return None;
    }
    Some(index as usize)
}
