use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::animator::SelectionAnimator;
use crate::config::DEFAULT_CATEGORY_COUNT;
use crate::data::filter::{filter_records, YearSelection};
use crate::data::model::{CategoryRecord, DatasetSnapshot};
use crate::data::projection::{project, ChartMode, Projection, ProjectionMode, ViewMode};
use crate::error::SelectionError;
use crate::export::{check_exportable, export_csv_file};
use crate::format::display_year;
use crate::insight::{build_insight_request, InsightPanel, InsightService};

// ---------------------------------------------------------------------------
// Selection state
// ---------------------------------------------------------------------------

/// What the user has picked. Only user input and the animator change it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionState {
    /// Selected category names in the order they were picked.
    pub categories: Vec<String>,
    /// Slider year.
    pub year: String,
    pub chart_mode: ChartMode,
    pub view_mode: ViewMode,
}

impl SelectionState {
    /// First few categories, latest year, bar chart.
    pub fn initial(snapshot: &DatasetSnapshot) -> Self {
        Self {
            categories: snapshot
                .category_names()
                .iter()
                .take(DEFAULT_CATEGORY_COUNT)
                .cloned()
                .collect(),
            year: snapshot.years().last().cloned().unwrap_or_default(),
            chart_mode: ChartMode::default(),
            view_mode: ViewMode::default(),
        }
    }

    pub fn is_selected(&self, category: &str) -> bool {
        self.categories.iter().any(|c| c == category)
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// One dashboard session, independent of rendering.
pub struct AppState {
    /// Shared, never mutated.
    pub snapshot: Arc<DatasetSnapshot>,

    pub selection: SelectionState,

    /// Year playback; lives next to the selection it drives.
    pub animator: SelectionAnimator,

    pub insights: InsightPanel,

    service: Arc<dyn InsightService>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Records passing the current selection (cached).
    records: Vec<CategoryRecord>,

    /// Presentation shape for the current selection (cached).
    projection: Projection,
}

impl AppState {
    pub fn new(snapshot: Arc<DatasetSnapshot>, service: Arc<dyn InsightService>) -> Self {
        let selection = SelectionState::initial(&snapshot);
        let mut state = Self {
            snapshot,
            selection,
            animator: SelectionAnimator::default(),
            insights: InsightPanel::default(),
            service,
            status_message: None,
            records: Vec::new(),
            projection: project(&[], ProjectionMode::Table, &[]),
        };
        state.refilter();
        state
    }

    /// Years shown by the current view: every year for line charts, the
    /// slider year otherwise.
    pub fn active_years(&self) -> Vec<String> {
        self.year_selection().resolve(&self.snapshot)
    }

    fn year_selection(&self) -> YearSelection {
        match self.selection.chart_mode {
            ChartMode::Line => self.snapshot.years().iter().cloned().collect(),
            ChartMode::Bar => YearSelection::Single(self.selection.year.clone()),
        }
    }

    pub fn records(&self) -> &[CategoryRecord] {
        &self.records
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    /// Recompute the cached records and projection.
    pub fn refilter(&mut self) {
        let years = self.year_selection();
        self.records = filter_records(&self.snapshot, &self.selection.categories, &years);
        let mode = ProjectionMode::new(self.selection.view_mode, self.selection.chart_mode);
        self.projection = project(&self.records, mode, &years.resolve(&self.snapshot));
    }

    // -- categories --

    /// Add or remove a category; newly added ones go to the end.
    pub fn toggle_category(&mut self, category: &str) {
        if self.selection.is_selected(category) {
            self.selection.categories.retain(|c| c != category);
        } else {
            self.selection.categories.push(category.to_string());
        }
        self.refilter();
    }

    pub fn select_all(&mut self) {
        self.selection.categories = self.snapshot.category_names().to_vec();
        self.refilter();
    }

    pub fn select_none(&mut self) {
        self.selection.categories.clear();
        self.refilter();
    }

    pub fn all_selected(&self) -> bool {
        self.snapshot
            .category_names()
            .iter()
            .all(|c| self.selection.is_selected(c))
    }

    /// Deselect everything if everything is selected, otherwise select all.
    pub fn toggle_all(&mut self) {
        if self.all_selected() {
            self.select_none();
        } else {
            self.select_all();
        }
    }

    // -- years --

    /// Manual year change. Stops playback first so the animator and the
    /// slider never fight over the selection.
    pub fn set_year(&mut self, year: &str) {
        if self.snapshot.year_index(year).is_none() {
            log::warn!("Ignoring unknown year '{year}'");
            return;
        }
        self.stop_playback();
        if self.selection.year != year {
            self.selection.year = year.to_string();
            self.refilter();
        }
    }

    pub fn set_year_index(&mut self, index: usize) {
        if let Some(year) = self.snapshot.years().get(index).cloned() {
            self.set_year(&year);
        }
    }

    pub fn year_index(&self) -> usize {
        self.snapshot.year_index(&self.selection.year).unwrap_or(0)
    }

    // -- modes --

    pub fn set_chart_mode(&mut self, mode: ChartMode) {
        if self.selection.chart_mode != mode {
            self.selection.chart_mode = mode;
            self.refilter();
        }
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        if self.selection.view_mode != mode {
            self.selection.view_mode = mode;
            self.refilter();
        }
    }

    // -- playback --

    pub fn toggle_playback(&mut self, now: Instant) {
        self.animator.toggle(now);
    }

    pub fn stop_playback(&mut self) {
        self.animator.stop();
    }

    /// Advance playback if due. Returns whether the selection changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let changed = self
            .animator
            .tick(now, self.snapshot.years(), &mut self.selection.year);
        if changed {
            self.refilter();
        }
        changed
    }

    /// When the UI should wake up next for playback.
    pub fn next_wakeup(&self, now: Instant) -> Option<Duration> {
        self.animator.time_until_tick(now)
    }

    // -- actions --

    /// Start insight generation for the current selection.
    ///
    /// Empty selections are refused with a message. A request already in
    /// flight is refused with [`SelectionError::Busy`] and leaves the status
    /// line alone.
    pub fn request_insights(&mut self) -> Result<(), SelectionError> {
        if self.insights.is_loading() {
            log::debug!("Insight request refused: one is already running");
            return Err(SelectionError::Busy);
        }
        let years = self.active_years();
        let result = self.validate_selection(&years).and_then(|()| {
            build_insight_request(&self.records, &years)
        });
        match result {
            Ok(request) => {
                let labels = years.iter().map(|y| display_year(y)).collect();
                if !self.insights.begin(Arc::clone(&self.service), request, labels) {
                    return Err(SelectionError::Busy);
                }
                self.status_message = None;
                Ok(())
            }
            Err(e) => {
                log::warn!("Cannot generate insights: {e}");
                self.status_message = Some(format!("Cannot generate insights. {e}"));
                Err(e)
            }
        }
    }

    /// Collect a finished insight job, if any.
    pub fn poll_insights(&mut self) -> bool {
        self.insights.poll()
    }

    /// Write the current records to `path`. Problems end up in the status line.
    pub fn export_csv(&mut self, path: &Path) -> bool {
        let years = self.active_years();
        if let Err(e) = self
            .validate_selection(&years)
            .and_then(|()| check_exportable(&self.records, &years))
        {
            log::warn!("Nothing to export: {e}");
            self.status_message = Some(format!("No data to export. {e}"));
            return false;
        }
        match export_csv_file(path, &self.records, &years) {
            Ok(()) => {
                self.status_message = Some(format!("Exported to {}", path.display()));
                true
            }
            Err(e) => {
                log::error!("CSV export failed: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
                false
            }
        }
    }

    fn validate_selection(&self, years: &[String]) -> Result<(), SelectionError> {
        if self.selection.categories.is_empty() {
            return Err(SelectionError::NoCategories);
        }
        if years.is_empty() {
            return Err(SelectionError::NoYears);
        }
        Ok(())
    }

    /// Session teardown: no timer or request may outlive it.
    pub fn shutdown(&mut self) {
        self.stop_playback();
        self.insights.abandon();
    }
}

impl Drop for AppState {
    fn drop(&mut self) {
        self.shutdown();
    }
}
