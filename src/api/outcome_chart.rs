use std::time::Instant;

use chrono::NaiveDate;
use tracing::debug;

use crate::core::primitives::day_offset_millis;
use crate::core::{ScaleYType, TimeScale, ValueScale};
use crate::error::{ChartError, ChartResult};
use crate::interaction::{
    DomainTransition, InteractionState, InterventionTrackState, TimeDomainOptions,
    TimeDomainWidth, default_time_domain, intervention_at_y, time_domain_options,
    visible_max_millis,
};
use crate::model::{CaseData, Intervention, ModelOutput, derive_interventions};
use crate::series::{
    ChartConfiguration, PreparedSeries, SeriesSource, ValueView, prepare_series,
};

use super::OutcomeChartConfig;
use super::hover_resolver::HoverResolution;
use super::scale_coordinator::ScaleCoordinator;

/// Values derived from the chart inputs; rebuilt whenever an input changes.
pub(super) struct DerivedState {
    pub(super) t0: NaiveDate,
    pub(super) prepared: Vec<Vec<PreparedSeries>>,
    pub(super) interventions: Vec<Intervention>,
    pub(super) domain_options: TimeDomainOptions,
}

impl DerivedState {
    fn compute(
        output: &ModelOutput,
        case_data: Option<&CaseData>,
        series_config: &ChartConfiguration,
        config: OutcomeChartConfig,
    ) -> ChartResult<Self> {
        let source = SeriesSource::from_output(output, case_data)?;
        let prepared = prepare_series(series_config, &source, config.series_height_px)?;
        let interventions =
            derive_interventions(output.intervention_periods(), output.time.end_date()?)?;
        let domain_options = time_domain_options(source.t0, output.time.extent[1])?;
        Ok(Self {
            t0: source.t0,
            prepared,
            interventions,
            domain_options,
        })
    }
}

/// Outcome chart facade consumed by embedding layers.
///
/// Owns the simulation result, optional case data and line configuration,
/// keeps the prepared series in sync with them, and resolves pointer and
/// control events into interaction state. Rendering reads a [`ChartFrame`]
/// built by [`OutcomeChart::frame`].
///
/// [`ChartFrame`]: super::ChartFrame
pub struct OutcomeChart {
    pub(super) config: OutcomeChartConfig,
    pub(super) output: ModelOutput,
    pub(super) case_data: Option<CaseData>,
    pub(super) series_config: ChartConfiguration,
    pub(super) width_px: u32,
    pub(super) derived: DerivedState,
    pub(super) interaction: InteractionState,
    pub(super) transition: DomainTransition,
}

impl OutcomeChart {
    pub fn new(
        output: ModelOutput,
        case_data: Option<CaseData>,
        series_config: ChartConfiguration,
        config: OutcomeChartConfig,
        width_px: u32,
    ) -> ChartResult<Self> {
        config.validate()?;
        validate_width(width_px)?;

        let derived = DerivedState::compute(&output, case_data.as_ref(), &series_config, config)?;
        let domain_width = default_time_domain(&derived.domain_options);
        let visible_max = visible_max_millis(derived.t0, domain_width, output.time.extent[1])?;

        Ok(Self {
            config,
            output,
            case_data,
            series_config,
            width_px,
            derived,
            interaction: InteractionState::default().with_domain_width(domain_width),
            transition: DomainTransition::settled(visible_max as f64, config.transition_duration()),
        })
    }

    #[must_use]
    pub fn config(&self) -> OutcomeChartConfig {
        self.config
    }

    #[must_use]
    pub fn output(&self) -> &ModelOutput {
        &self.output
    }

    #[must_use]
    pub fn case_data(&self) -> Option<&CaseData> {
        self.case_data.as_ref()
    }

    #[must_use]
    pub fn t0(&self) -> NaiveDate {
        self.derived.t0
    }

    #[must_use]
    pub fn prepared(&self) -> &[Vec<PreparedSeries>] {
        &self.derived.prepared
    }

    #[must_use]
    pub fn interventions(&self) -> &[Intervention] {
        &self.derived.interventions
    }

    #[must_use]
    pub fn domain_options(&self) -> &TimeDomainOptions {
        &self.derived.domain_options
    }

    #[must_use]
    pub fn interaction(&self) -> InteractionState {
        self.interaction
    }

    #[must_use]
    pub fn value_view(&self) -> ValueView {
        self.interaction.value_view()
    }

    #[must_use]
    pub fn width_px(&self) -> u32 {
        self.width_px
    }

    pub fn set_width_px(&mut self, width_px: u32) -> ChartResult<()> {
        validate_width(width_px)?;
        self.width_px = width_px;
        Ok(())
    }

    /// Replaces the simulation result and resets the visible window to the
    /// new result's default option.
    pub fn set_output(&mut self, output: ModelOutput, now: Instant) -> ChartResult<()> {
        let derived = DerivedState::compute(
            &output,
            self.case_data.as_ref(),
            &self.series_config,
            self.config,
        )?;
        self.output = output;
        self.derived = derived;
        let domain_width = default_time_domain(&self.derived.domain_options);
        self.interaction.set_domain_width(domain_width);
        self.retarget_visible_max(now)
    }

    pub fn set_case_data(&mut self, case_data: Option<CaseData>) -> ChartResult<()> {
        self.derived = DerivedState::compute(
            &self.output,
            case_data.as_ref(),
            &self.series_config,
            self.config,
        )?;
        self.case_data = case_data;
        Ok(())
    }

    pub fn set_series_config(&mut self, series_config: ChartConfiguration) -> ChartResult<()> {
        self.derived = DerivedState::compute(
            &self.output,
            self.case_data.as_ref(),
            &series_config,
            self.config,
        )?;
        self.series_config = series_config;
        Ok(())
    }

    #[must_use]
    pub fn series_count(&self) -> usize {
        self.derived.prepared.iter().map(Vec::len).sum()
    }

    /// Full plot height: every series band plus every intervention track.
    #[must_use]
    pub fn plot_height(&self) -> f64 {
        self.config.series_height_px * self.series_count() as f64
            + self.config.intervention_track_height_px * self.derived.interventions.len() as f64
    }

    /// Height of the series bands, above the intervention tracks.
    #[must_use]
    pub fn charts_height(&self) -> f64 {
        let plot_height = self.plot_height();
        if plot_height <= 0.0 {
            return 0.0;
        }
        plot_height
            - self.config.intervention_track_height_px * self.derived.interventions.len() as f64
    }

    #[must_use]
    pub fn track_state(&self, index: usize) -> InterventionTrackState {
        self.interaction.track_state(index)
    }

    pub fn on_hover_x(&mut self, x: Option<f64>) {
        self.interaction.on_hover_x(x);
    }

    pub fn on_hover_intervention(&mut self, index: Option<usize>) {
        self.interaction.on_hover_intervention(index);
    }

    pub fn on_pin_intervention(&mut self, index: Option<usize>) {
        self.interaction.on_pin_intervention(index);
    }

    /// Pointer position relative to the plot's top-left corner.
    pub fn pointer_move(&mut self, x: f64, y: f64) {
        self.interaction.on_hover_x(Some(x));
        let track = self.intervention_at(y);
        self.interaction.on_hover_intervention(track);
    }

    pub fn pointer_leave(&mut self) {
        self.interaction.on_pointer_leave();
    }

    /// Toggles the pin of the track under `y`. Clicks on the series bands
    /// leave the pin alone.
    pub fn click(&mut self, y: f64) {
        if let Some(track) = self.intervention_at(y) {
            self.interaction.toggle_pin(track);
        }
    }

    pub fn set_cumulative(&mut self, cumulative: bool) {
        self.interaction.set_cumulative(cumulative);
    }

    pub fn set_scale_y_type(&mut self, scale_y_type: ScaleYType) {
        self.interaction.set_scale_y_type(scale_y_type);
    }

    /// Changes the visible window and starts animating the horizontal
    /// domain toward it from wherever it currently is.
    pub fn set_domain_width(&mut self, width: TimeDomainWidth, now: Instant) -> ChartResult<()> {
        if let TimeDomainWidth::Months(0) = width {
            return Err(ChartError::InvalidData(
                "time domain width must be at least one month".to_owned(),
            ));
        }
        if self.interaction.set_domain_width(width) {
            self.retarget_visible_max(now)?;
        }
        Ok(())
    }

    /// Current upper bound of the horizontal domain, in UTC milliseconds.
    #[must_use]
    pub fn animated_visible_max(&self, now: Instant) -> f64 {
        self.transition.current(now)
    }

    #[must_use]
    pub fn is_animating(&self, now: Instant) -> bool {
        !self.transition.is_settled(now)
    }

    /// Lower bound of the horizontal domain, in UTC milliseconds.
    #[must_use]
    pub fn domain_start_millis(&self) -> f64 {
        day_offset_millis(self.derived.t0, self.output.time.extent[0]) as f64
    }

    /// Upper bound of the full result, ignoring the visible window.
    #[must_use]
    pub fn full_end_millis(&self) -> f64 {
        day_offset_millis(self.derived.t0, self.output.time.extent[1]) as f64
    }

    pub fn time_scale(&self, now: Instant) -> ChartResult<TimeScale> {
        ScaleCoordinator::time_scale(self, now)
    }

    pub fn value_scales(&self) -> ChartResult<Vec<ValueScale>> {
        ScaleCoordinator::value_scales(self)
    }

    /// Hover index and date for the current pointer, or for `today` when
    /// the pointer is outside the plot.
    pub fn hover(&self, now: Instant, today: NaiveDate) -> ChartResult<HoverResolution> {
        let time_scale = self.time_scale(now)?;
        self.resolve_hover(time_scale, today)
    }

    fn intervention_at(&self, y: f64) -> Option<usize> {
        intervention_at_y(
            y,
            self.charts_height(),
            self.config.intervention_track_height_px,
            self.derived.interventions.len(),
        )
    }

    fn retarget_visible_max(&mut self, now: Instant) -> ChartResult<()> {
        let target = visible_max_millis(
            self.derived.t0,
            self.interaction.domain_width(),
            self.output.time.extent[1],
        )?;
        debug!(
            width = ?self.interaction.domain_width(),
            target,
            "retargeting visible time domain"
        );
        self.transition.retarget(target as f64, now);
        Ok(())
    }
}

fn validate_width(width_px: u32) -> ChartResult<()> {
    if width_px == 0 {
        return Err(ChartError::InvalidViewport {
            width: width_px,
            height: 0,
        });
    }
    Ok(())
}
