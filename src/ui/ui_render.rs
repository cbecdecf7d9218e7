use eframe::egui::{CentralPanel, Color32, Context, Frame, Margin, RichText, ScrollArea, SidePanel, TopBottomPanel};

use crate::config::DEBUG_FLAGS;
use crate::ui::app::{week52_display, PatternScopeApp, ScanPhase};
use crate::ui::config::{UI_CONFIG, UI_TEXT};
use crate::ui::ui_panels::{
    OverlayEventChanged, OverlayTogglePanel, Panel, ResultsEvent, ResultsPanel, ScanFormEvent,
    ScanFormPanel,
};

impl PatternScopeApp {
    pub(super) fn render_side_panel(&mut self, ctx: &Context) {
        let side_panel_frame = Frame::new().fill(UI_CONFIG.colors.side_panel);
        SidePanel::left("left_panel")
            .min_width(UI_CONFIG.side_panel_min_width)
            .frame(side_panel_frame)
            .show(ctx, |ui| {
                let mut form_events = Vec::new();
                let mut overlay_events = Vec::new();
                let mut results_events = Vec::new();

                ScrollArea::vertical().id_salt("side_panel").show(ui, |ui| {
                    let is_scanning = self.is_scanning();
                    let mut form_panel =
                        ScanFormPanel::new(&mut self.form, &self.form_errors, is_scanning);
                    form_events = form_panel.render(ui);

                    let mut toggle_panel = OverlayTogglePanel::new(&self.selection);
                    overlay_events = toggle_panel.render(ui);

                    // Results appear only after the first completed analysis
                    if self.has_analyzed {
                        if let Some(snapshot) = &self.data.snapshot {
                            let mut results_panel = ResultsPanel::new(
                                snapshot,
                                &self.data.week52,
                                self.selection.selected_group_id,
                            );
                            results_events = results_panel.render(ui);
                        }
                    }
                });

                for event in form_events {
                    match event {
                        ScanFormEvent::Submitted => {
                            if DEBUG_FLAGS.print_ui_interactions {
                                log::info!("analysis submitted for {}", self.form.symbol);
                            }
                            self.start_analysis();
                        }
                    }
                }

                for event in overlay_events {
                    match event {
                        OverlayEventChanged::ZonesVisible(on) => self.selection.show_zones = on,
                        OverlayEventChanged::HistoricalVisible(on) => {
                            self.selection.show_historical = on
                        }
                        OverlayEventChanged::ClustersVisible(on) => {
                            self.selection.show_clusters = on
                        }
                    }
                }

                for event in results_events {
                    match event {
                        ResultsEvent::GroupSelected(group_id) => {
                            self.toggle_group_selection(group_id)
                        }
                    }
                }
            });
    }

    pub(super) fn render_central_panel(&mut self, ctx: &Context) {
        let central_panel_frame = Frame::new().fill(UI_CONFIG.colors.central_panel);
        CentralPanel::default()
            .frame(central_panel_frame)
            .show(ctx, |ui| {
                ui.add_space(10.0);

                if let Some(snapshot) = &self.data.snapshot {
                    let week52_high = self.data.week52.as_ref().and_then(|w| w.value);
                    let events =
                        self.plot_view
                            .show_chart(ui, snapshot, &self.selection, week52_high);

                    self.hovered_group_id = events.hovered_group_id;
                    if let Some(group_id) = events.clicked_group_id {
                        self.toggle_group_selection(group_id);
                    }
                } else if self.is_scanning() {
                    ui.vertical_centered(|ui| {
                        ui.add_space(40.0);
                        ui.spinner();
                        ui.add_space(12.0);
                        ui.heading(format!(
                            "{} {}\u{2026}",
                            UI_TEXT.central_loading_prefix,
                            self.form.symbol.trim().to_uppercase()
                        ));
                    });
                } else if let Some(error) = &self.data.last_error {
                    ui.vertical_centered(|ui| {
                        ui.add_space(40.0);
                        ui.heading(UI_TEXT.central_error_heading);
                        ui.add_space(10.0);
                        ui.label(error.to_string());
                        ui.add_space(20.0);
                        ui.label(UI_TEXT.central_error_hint);
                    });
                } else {
                    ui.vertical_centered(|ui| {
                        ui.add_space(40.0);
                        ui.heading(UI_TEXT.app_title);
                        ui.add_space(10.0);
                        ui.label(
                            RichText::new(UI_TEXT.central_empty_prompt)
                                .color(Color32::from_gray(190)),
                        );
                    });
                }
            });
    }

    pub(super) fn render_status_panel(&mut self, ctx: &Context) {
        let status_frame = Frame::new()
            .fill(UI_CONFIG.colors.side_panel)
            .inner_margin(Margin::symmetric(8, 4));
        TopBottomPanel::bottom("status_panel")
            .frame(status_frame)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    let phase_color = match self.phase {
                        ScanPhase::Idle => UI_CONFIG.colors.label,
                        ScanPhase::Loading => Color32::from_rgb(200, 200, 100),
                        ScanPhase::Success => UI_CONFIG.colors.positive_rate,
                        ScanPhase::Failure => UI_CONFIG.colors.negative_rate,
                    };
                    ui.label(RichText::new(self.phase.label()).small().color(phase_color));
                    ui.separator();

                    if let Some(snapshot) = &self.data.snapshot {
                        ui.label(
                            RichText::new(format!(
                                "{} \u{2022} {} bars \u{2022} {} markers \u{2022} {} groups",
                                snapshot.symbol,
                                snapshot.price_data.len(),
                                snapshot.markers.len(),
                                snapshot.groups.len()
                            ))
                            .small()
                            .color(UI_CONFIG.colors.label),
                        );
                        ui.separator();

                        ui.label(
                            RichText::new(format!(
                                "{}: {}",
                                UI_TEXT.week52_label,
                                week52_display(&self.data.week52)
                            ))
                            .small()
                            .color(UI_CONFIG.colors.label),
                        );
                        ui.separator();
                    }

                    if let Some(group_id) = self.hovered_group_id {
                        ui.label(
                            RichText::new(format!("Hovering group #{}", group_id))
                                .small()
                                .color(UI_CONFIG.colors.subsection_heading),
                        );
                    }

                    if let (ScanPhase::Failure, Some(error)) = (self.phase, &self.data.last_error) {
                        ui.separator();
                        ui.label(
                            RichText::new(error.to_string())
                                .small()
                                .color(UI_CONFIG.colors.negative_rate),
                        );
                    }
                });
            });
    }
}
