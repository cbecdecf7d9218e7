use std::fmt;

use eframe::{egui, Frame};
use poll_promise::Promise;
use serde::{Deserialize, Serialize};

use crate::config::{API, DEBUG_FLAGS};
use crate::data::{ScanRequest, ScanService, Week52High};
use crate::domain::{PatternKind, SeriesSelector};
use crate::engine::{OverlaySelection, ScanSnapshot};
use crate::ui::app_async::ScanOutcome;
use crate::ui::config::UI_TEXT;
use crate::ui::ui_plot_view::PlotView;
use crate::ui::utils::setup_custom_visuals;

/// Error types for application operations
#[derive(Debug, Clone)]
pub enum AppError {
    /// The form contains input the backend would reject
    InvalidInput(String),
    /// The scan request itself failed (network, backend, decode)
    ScanFailed(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            AppError::ScanFailed(msg) => write!(f, "Scan failed: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

/// The analysis lifecycle. Loading always transitions to Success or Failure;
/// both accept a new submission, so the machine is re-enterable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanPhase {
    #[default]
    Idle,
    Loading,
    Success,
    Failure,
}

impl ScanPhase {
    pub fn label(&self) -> &'static str {
        match self {
            ScanPhase::Idle => UI_TEXT.status_idle,
            ScanPhase::Loading => UI_TEXT.status_loading,
            ScanPhase::Success => UI_TEXT.status_success,
            ScanPhase::Failure => UI_TEXT.status_failure,
        }
    }
}

/// Runtime-only data replaced wholesale on each completed analysis.
#[derive(Default)]
pub struct DataState {
    pub snapshot: Option<ScanSnapshot>,
    pub week52: Option<Week52High>,
    pub last_error: Option<AppError>,
}

/// The text the 52-week-high readout shows. A null figure from the backend
/// renders the explicit "Unavailable" literal, never a blank.
pub fn week52_display(week52: &Option<Week52High>) -> String {
    match week52 {
        Some(high) => match high.value {
            Some(value) => format!("{:.2}", value),
            None => UI_TEXT.week52_unavailable.to_string(),
        },
        None => "\u{2014}".to_string(),
    }
}

/// Scan form state, persisted across sessions.
///
/// Cooldown and dip threshold are kept as raw text so partially-typed or
/// out-of-range input can show an inline message instead of silently
/// clamping. Validation happens on submit.
#[derive(Clone, Serialize, Deserialize)]
pub struct ScanForm {
    pub symbol: String,
    pub pattern: PatternKind,
    pub series: SeriesSelector,
    pub lookback_weeks: u32,
    pub cooldown_weeks_input: String,
    pub dip_threshold_input: String,
}

impl Default for ScanForm {
    fn default() -> Self {
        Self {
            symbol: API.defaults.symbol.to_string(),
            pattern: PatternKind::NarrowRangeBreak,
            series: SeriesSelector::default(),
            lookback_weeks: API.defaults.lookback_weeks,
            cooldown_weeks_input: API.defaults.cooldown_weeks.to_string(),
            dip_threshold_input: API.defaults.dip_threshold_pct.to_string(),
        }
    }
}

impl ScanForm {
    /// Validate all fields and build the request. Every violation is
    /// collected so the form can flag them all at once.
    ///
    /// Cooldown and dip threshold only exist for NRB scans; a Bowl submission
    /// skips them (the fields are hidden) and carries the defaults instead.
    pub fn validate(&self) -> Result<ScanRequest, Vec<String>> {
        let mut errors = Vec::new();

        let symbol = self.symbol.trim().to_uppercase();
        if symbol.is_empty() {
            errors.push(UI_TEXT.error_symbol_empty.to_string());
        }

        let mut cooldown_weeks = API.defaults.cooldown_weeks;
        let mut dip_threshold_pct = API.defaults.dip_threshold_pct;

        if self.pattern.is_nrb() {
            cooldown_weeks = match self.cooldown_weeks_input.trim().parse::<u32>() {
                Ok(weeks)
                    if weeks >= API.limits.cooldown_weeks_min
                        && weeks <= API.limits.cooldown_weeks_max =>
                {
                    weeks
                }
                _ => {
                    errors.push(UI_TEXT.error_cooldown_range.to_string());
                    0
                }
            };

            dip_threshold_pct = match self.dip_threshold_input.trim().parse::<f64>() {
                Ok(pct)
                    if pct >= API.limits.dip_threshold_min_pct
                        && pct <= API.limits.dip_threshold_max_pct =>
                {
                    pct
                }
                _ => {
                    errors.push(UI_TEXT.error_dip_range.to_string());
                    0.0
                }
            };
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(ScanRequest {
            symbol,
            pattern: self.pattern,
            lookback_weeks: self.lookback_weeks,
            cooldown_weeks,
            dip_threshold_pct,
            series: self.series,
        })
    }
}

#[derive(Serialize, Deserialize)]
pub struct PatternScopeApp {
    // UI state
    #[serde(default)]
    pub(super) form: ScanForm,
    #[serde(default)]
    pub(super) selection: OverlaySelection,

    // Runtime state - skipped during serialization
    #[serde(skip)]
    pub(super) data: DataState,
    #[serde(skip)]
    pub(super) phase: ScanPhase,
    // Set once the first analysis completes; gates the results panels
    #[serde(skip)]
    pub(super) has_analyzed: bool,
    #[serde(skip)]
    pub(super) form_errors: Vec<String>,
    #[serde(skip)]
    pub(super) plot_view: PlotView,
    #[serde(skip)]
    pub(super) hovered_group_id: Option<i64>,

    // Async scan state. The sequence token distinguishes the response of the
    // latest submission from a superseded one still in flight.
    #[serde(skip)]
    pub(super) scan_promise: Option<Promise<ScanOutcome>>,
    #[serde(skip)]
    pub(super) request_seq: u64,

    #[serde(skip)]
    pub(super) service: Option<ScanService>,
    #[serde(skip)]
    pub(super) runtime: Option<tokio::runtime::Handle>,
}

impl Default for PatternScopeApp {
    fn default() -> Self {
        Self {
            form: ScanForm::default(),
            selection: OverlaySelection::default(),
            data: DataState::default(),
            phase: ScanPhase::default(),
            has_analyzed: false,
            form_errors: Vec::new(),
            plot_view: PlotView::default(),
            hovered_group_id: None,
            scan_promise: None,
            request_seq: 0,
            service: None,
            runtime: None,
        }
    }
}

impl PatternScopeApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        service: ScanService,
        runtime: tokio::runtime::Handle,
    ) -> Self {
        let mut app: PatternScopeApp = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, eframe::APP_KEY))
            .unwrap_or_default();

        app.service = Some(service);
        app.runtime = Some(runtime);
        app.plot_view = PlotView::new();

        if DEBUG_FLAGS.print_ui_interactions {
            log::info!(
                "starting with symbol={} pattern={}",
                app.form.symbol,
                app.form.pattern
            );
        }

        app
    }

    /// CLI-provided symbol override, applied before the first frame.
    pub fn set_initial_symbol(&mut self, symbol: String) {
        self.form.symbol = symbol;
    }

    /// Select or deselect a group from a chart click.
    pub(super) fn toggle_group_selection(&mut self, group_id: i64) {
        self.selection.selected_group_id = if self.selection.selected_group_id == Some(group_id) {
            None
        } else {
            Some(group_id)
        };
        if DEBUG_FLAGS.print_ui_interactions {
            log::info!("group selection now {:?}", self.selection.selected_group_id);
        }
    }
}

impl eframe::App for PatternScopeApp {
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        // Drop any in-flight scan so its thread result has nowhere to land
        self.scan_promise = None;
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, &self);
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        setup_custom_visuals(ctx);

        self.poll_scan_promise(ctx);

        self.render_side_panel(ctx);
        self.render_status_panel(ctx);
        self.render_central_panel(ctx);
    }
}
