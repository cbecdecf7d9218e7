use eframe::egui::{Color32, ComboBox, Grid, RichText, ScrollArea, Slider, TextEdit, Ui};
use strum::IntoEnumIterator;

use crate::config::{API, RECONCILE};
use crate::data::Week52High;
use crate::domain::{PatternKind, SeriesSelector};
use crate::engine::{bucket_near_touches, OverlaySelection, ScanSnapshot};
use crate::ui::app::{week52_display, ScanForm};
use crate::ui::config::{UI_CONFIG, UI_TEXT};
use crate::ui::utils::{colored_subsection_heading, format_price, format_rate, section_heading};

/// Trait for UI panels that can be rendered
pub trait Panel {
    type Event;
    fn render(&mut self, ui: &mut Ui) -> Vec<Self::Event>;
}

// ============================================================================
// SCAN FORM
// ============================================================================

#[derive(Debug)]
pub enum ScanFormEvent {
    Submitted,
}

/// Panel for scan parameters and submission
pub struct ScanFormPanel<'a> {
    form: &'a mut ScanForm,
    errors: &'a [String],
    is_scanning: bool,
}

impl<'a> ScanFormPanel<'a> {
    pub fn new(form: &'a mut ScanForm, errors: &'a [String], is_scanning: bool) -> Self {
        Self {
            form,
            errors,
            is_scanning,
        }
    }

    fn render_symbol_field(&mut self, ui: &mut Ui) {
        ui.label(colored_subsection_heading(UI_TEXT.symbol_label));
        ui.add(
            TextEdit::singleline(&mut self.form.symbol)
                .desired_width(UI_CONFIG.form_field_width)
                .char_limit(24),
        );
    }

    fn render_pattern_selector(&mut self, ui: &mut Ui) {
        ui.label(colored_subsection_heading(UI_TEXT.pattern_label));
        ComboBox::from_id_salt("pattern_selector")
            .selected_text(self.form.pattern.to_string())
            .show_ui(ui, |ui| {
                for pattern in PatternKind::iter() {
                    ui.selectable_value(&mut self.form.pattern, pattern, pattern.to_string());
                }
            });
    }

    fn render_series_selector(&mut self, ui: &mut Ui) {
        ui.label(colored_subsection_heading(UI_TEXT.series_label));
        ComboBox::from_id_salt("series_selector")
            .selected_text(self.form.series.to_string())
            .show_ui(ui, |ui| {
                for series in SeriesSelector::iter() {
                    ui.selectable_value(&mut self.form.series, series, series.to_string());
                }
            });
    }

    fn render_nrb_fields(&mut self, ui: &mut Ui) {
        ui.label(colored_subsection_heading(UI_TEXT.lookback_label));
        ui.add(
            Slider::new(
                &mut self.form.lookback_weeks,
                API.limits.lookback_weeks_min..=API.limits.lookback_weeks_max,
            )
            .integer(),
        );

        ui.add_space(5.0);
        ui.label(colored_subsection_heading(UI_TEXT.cooldown_label));
        ui.add(
            TextEdit::singleline(&mut self.form.cooldown_weeks_input)
                .desired_width(UI_CONFIG.form_field_width),
        );
    }

    fn render_dip_field(&mut self, ui: &mut Ui) {
        ui.label(colored_subsection_heading(UI_TEXT.dip_threshold_label));
        ui.add(
            TextEdit::singleline(&mut self.form.dip_threshold_input)
                .desired_width(UI_CONFIG.form_field_width),
        );
    }
}

impl<'a> Panel for ScanFormPanel<'a> {
    type Event = ScanFormEvent;

    fn render(&mut self, ui: &mut Ui) -> Vec<Self::Event> {
        let mut events = Vec::new();
        section_heading(ui, UI_TEXT.scan_form_heading);

        self.render_symbol_field(ui);
        ui.add_space(5.0);
        self.render_pattern_selector(ui);
        ui.add_space(5.0);
        self.render_series_selector(ui);
        ui.add_space(5.0);

        // Windowing and dip threshold only apply to NRB scans
        if self.form.pattern.is_nrb() {
            self.render_nrb_fields(ui);
            ui.add_space(5.0);
            self.render_dip_field(ui);
        }

        for error in self.errors {
            ui.label(
                RichText::new(error)
                    .small()
                    .color(UI_CONFIG.colors.validation_error),
            );
        }

        ui.add_space(10.0);
        ui.add_enabled_ui(!self.is_scanning, |ui| {
            if ui.button(UI_TEXT.analyze_button).clicked() {
                events.push(ScanFormEvent::Submitted);
            }
        });
        if self.is_scanning {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label(UI_TEXT.status_loading);
            });
        }

        events
    }
}

// ============================================================================
// OVERLAY TOGGLES
// ============================================================================

#[derive(Debug)]
pub enum OverlayEventChanged {
    ZonesVisible(bool),
    HistoricalVisible(bool),
    ClustersVisible(bool),
}

/// Panel for the three overlay visibility toggles
pub struct OverlayTogglePanel {
    show_zones: bool,
    show_historical: bool,
    show_clusters: bool,
}

impl OverlayTogglePanel {
    pub fn new(selection: &OverlaySelection) -> Self {
        Self {
            show_zones: selection.show_zones,
            show_historical: selection.show_historical,
            show_clusters: selection.show_clusters,
        }
    }
}

impl Panel for OverlayTogglePanel {
    type Event = OverlayEventChanged;

    fn render(&mut self, ui: &mut Ui) -> Vec<Self::Event> {
        let mut events = Vec::new();
        section_heading(ui, UI_TEXT.overlays_heading);

        if ui
            .checkbox(&mut self.show_zones, UI_TEXT.show_zones_label)
            .changed()
        {
            events.push(OverlayEventChanged::ZonesVisible(self.show_zones));
        }
        if ui
            .checkbox(&mut self.show_historical, UI_TEXT.show_historical_label)
            .changed()
        {
            events.push(OverlayEventChanged::HistoricalVisible(self.show_historical));
        }
        if ui
            .checkbox(&mut self.show_clusters, UI_TEXT.show_clusters_label)
            .changed()
        {
            events.push(OverlayEventChanged::ClustersVisible(self.show_clusters));
        }

        events
    }
}

// ============================================================================
// RESULTS
// ============================================================================

#[derive(Debug)]
pub enum ResultsEvent {
    GroupSelected(i64),
}

/// Panel summarizing the latest completed analysis: the 52-week high, the
/// level groups with their success rates and near-touch counts, and the
/// consolidation zones.
pub struct ResultsPanel<'a> {
    snapshot: &'a ScanSnapshot,
    week52: &'a Option<Week52High>,
    selected_group_id: Option<i64>,
}

impl<'a> ResultsPanel<'a> {
    pub fn new(
        snapshot: &'a ScanSnapshot,
        week52: &'a Option<Week52High>,
        selected_group_id: Option<i64>,
    ) -> Self {
        Self {
            snapshot,
            week52,
            selected_group_id,
        }
    }

    fn rate_color(rate: Option<f64>) -> Color32 {
        match rate {
            Some(value) if value >= 0.0 => UI_CONFIG.colors.positive_rate,
            Some(_) => UI_CONFIG.colors.negative_rate,
            None => UI_CONFIG.colors.label,
        }
    }

    fn render_summary(&self, ui: &mut Ui) {
        Grid::new("scan_summary_grid")
            .num_columns(2)
            .spacing([16.0, 4.0])
            .show(ui, |ui| {
                ui.label(UI_TEXT.week52_label);
                ui.label(week52_display(self.week52));
                ui.end_row();

                if let Some(weeks) = self.snapshot.total_consolidation_duration_weeks {
                    ui.label("Total consolidation");
                    ui.label(format!("{:.1} weeks", weeks));
                    ui.end_row();
                }
            });
    }

    fn render_groups(&self, ui: &mut Ui, events: &mut Vec<ResultsEvent>) {
        if self.snapshot.groups.is_empty() {
            return;
        }
        ui.add_space(5.0);
        ui.label(colored_subsection_heading(UI_TEXT.groups_subheading));

        for group in &self.snapshot.groups {
            let is_selected = self.selected_group_id == Some(group.group_id);
            let title = match group.level {
                Some(level) => format!(
                    "#{} @ {} ({} NRBs)",
                    group.group_id,
                    format_price(level),
                    group.nrb_count
                ),
                None => format!("#{} ({} NRBs)", group.group_id, group.nrb_count),
            };

            if ui.selectable_label(is_selected, title).clicked() {
                events.push(ResultsEvent::GroupSelected(group.group_id));
            }

            ui.horizontal(|ui| {
                ui.add_space(12.0);
                for (label, rate) in [
                    ("3m", group.success_rate_3m),
                    ("6m", group.success_rate_6m),
                    ("12m", group.success_rate_12m),
                ] {
                    ui.label(
                        RichText::new(format!(
                            "{} {}",
                            label,
                            format_rate(rate, UI_TEXT.rate_unavailable)
                        ))
                        .small()
                        .color(Self::rate_color(rate)),
                    );
                }
            });

            let counts = bucket_near_touches(&group.near_touches, &RECONCILE.proximity);
            if counts.very_close + counts.close + counts.moderate > 0 {
                ui.horizontal(|ui| {
                    ui.add_space(12.0);
                    ui.label(
                        RichText::new(format!(
                            "{}: {} {}, {} {}, {} {}",
                            UI_TEXT.proximity_heading,
                            counts.very_close,
                            UI_TEXT.proximity_very_close,
                            counts.close,
                            UI_TEXT.proximity_close,
                            counts.moderate,
                            UI_TEXT.proximity_moderate,
                        ))
                        .small()
                        .color(UI_CONFIG.colors.label),
                    );
                });
            }
        }
    }

    fn render_zones(&self, ui: &mut Ui) {
        if self.snapshot.zones.is_empty() {
            return;
        }
        ui.add_space(5.0);
        ui.label(colored_subsection_heading(UI_TEXT.zones_subheading));

        Grid::new("zones_grid")
            .num_columns(4)
            .spacing([12.0, 2.0])
            .striped(true)
            .show(ui, |ui| {
                ui.label(RichText::new("Zone").small());
                ui.label(RichText::new("NRBs").small());
                ui.label(RichText::new("Range").small());
                ui.label(RichText::new("Duration").small());
                ui.end_row();

                for zone in &self.snapshot.zones {
                    ui.label(format!("#{}", zone.zone_id));
                    ui.label(zone.num_nrbs.to_string());
                    ui.label(match zone.range_pct {
                        Some(pct) => format!("{:.1}%", pct),
                        None => UI_TEXT.rate_unavailable.to_string(),
                    });
                    ui.label(match zone.duration_weeks {
                        Some(weeks) => format!("{:.1}w", weeks),
                        None => UI_TEXT.rate_unavailable.to_string(),
                    });
                    ui.end_row();
                }
            });
    }
}

impl<'a> Panel for ResultsPanel<'a> {
    type Event = ResultsEvent;

    fn render(&mut self, ui: &mut Ui) -> Vec<Self::Event> {
        let mut events = Vec::new();
        section_heading(ui, UI_TEXT.results_heading);

        self.render_summary(ui);

        ScrollArea::vertical()
            .max_height(400.0)
            .id_salt("results_panel")
            .show(ui, |ui| {
                self.render_groups(ui, &mut events);
                self.render_zones(ui);
            });

        events
    }
}
