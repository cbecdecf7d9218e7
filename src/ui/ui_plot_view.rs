use eframe::egui::{Id, LayerId, Order::Tooltip, Pos2, RichText, Ui};
use egui_plot::{AxisHints, Corner, HPlacement, Legend, Plot, PlotPoint, PlotTransform};

#[allow(deprecated)]
use eframe::egui::show_tooltip_at_pointer;

use crate::config::plot::PLOT_CONFIG;
use crate::config::{DEBUG_FLAGS, RECONCILE};
use crate::domain::LevelGroup;
use crate::engine::{
    build_overlay_plan, bucket_near_touches, hover_hit_test, ChartTransform, OverlaySelection,
    ScanSnapshot,
};
use crate::ui::config::UI_TEXT;
use crate::ui::plot_layers::{
    BowlCurveLayer, LayerContext, LevelLineLayer, MarkerLayer, NrbRangeLayer, PlotLayer,
    PriceLayer, Week52Layer, ZoneLineLayer,
};
use crate::ui::utils::{format_price, format_rate};

/// What the chart reported back this frame.
#[derive(Debug, Default)]
pub struct ChartEvents {
    pub hovered_group_id: Option<i64>,
    pub clicked_group_id: Option<i64>,
}

#[derive(Default)]
pub struct PlotView;

impl PlotView {
    pub fn new() -> Self {
        Self
    }

    pub fn show_chart(
        &mut self,
        ui: &mut Ui,
        snapshot: &ScanSnapshot,
        selection: &OverlaySelection,
        week52_high: Option<f64>,
    ) -> ChartEvents {
        let plan = build_overlay_plan(snapshot, selection, week52_high, &RECONCILE);
        let candle_half_width = median_bar_spacing(snapshot) * 0.3;

        let legend = Legend::default().position(Corner::RightTop);

        let response = Plot::new("pattern_chart")
            .legend(legend)
            .custom_x_axes(vec![create_x_axis()])
            .custom_y_axes(vec![create_y_axis(&snapshot.symbol)])
            .label_formatter(|_, point| {
                format!(
                    "{}  {}",
                    crate::utils::time_utils::epoch_sec_to_utc(point.x as i64),
                    format_price(point.y)
                )
            })
            .show(ui, |plot_ui| {
                let ctx = LayerContext {
                    snapshot,
                    plan: &plan,
                    candle_half_width,
                };

                // Layer stack, back to front
                let layers: Vec<Box<dyn PlotLayer>> = vec![
                    Box::new(ZoneLineLayer),
                    Box::new(PriceLayer),
                    Box::new(NrbRangeLayer),
                    Box::new(Week52Layer),
                    Box::new(LevelLineLayer),
                    Box::new(BowlCurveLayer),
                    Box::new(MarkerLayer),
                ];
                for layer in layers {
                    layer.render(plot_ui, &ctx);
                }
            });

        let mut events = ChartEvents::default();

        if let Some(pointer) = response.response.hover_pos() {
            let transform = EguiChartTransform {
                transform: &response.transform,
            };
            let hit = hover_hit_test(
                (pointer.x, pointer.y),
                &snapshot.groups,
                selection,
                &transform,
                &RECONCILE,
            );

            if let Some(group) = hit {
                if DEBUG_FLAGS.print_hover_hits {
                    log::info!("hovering level group #{}", group.group_id);
                }
                events.hovered_group_id = Some(group.group_id);
                show_group_tooltip(ui, group);

                if response.response.clicked() {
                    events.clicked_group_id = Some(group.group_id);
                }
            }
        }

        events
    }
}

/// Bridges egui_plot's screen/data mapping into the hit-test.
struct EguiChartTransform<'a> {
    transform: &'a PlotTransform,
}

impl ChartTransform for EguiChartTransform<'_> {
    fn time_at_x(&self, x: f32) -> Option<i64> {
        let frame = self.transform.frame();
        if x < frame.left() || x > frame.right() {
            return None;
        }
        let point = self
            .transform
            .value_from_position(Pos2::new(x, frame.center().y));
        Some(point.x as i64)
    }

    fn y_at_price(&self, price: f64) -> Option<f32> {
        if !price.is_finite() {
            return None;
        }
        Some(self.transform.position_from_point(&PlotPoint::new(0.0, price)).y)
    }
}

fn show_group_tooltip(ui: &Ui, group: &LevelGroup) {
    let tooltip_layer = LayerId::new(Tooltip, Id::new("level_group_tooltips"));

    #[allow(deprecated)]
    show_tooltip_at_pointer(
        ui.ctx(),
        tooltip_layer,
        Id::new(format!("group_tooltip_{}", group.group_id)),
        |ui: &mut Ui| {
            ui.label(
                RichText::new(format!("Level Group #{}", group.group_id))
                    .strong()
                    .color(PLOT_CONFIG.historical_level_color),
            );
            ui.separator();
            if let Some(level) = group.level {
                ui.label(format!("Level: {}", format_price(level)));
            }
            if let Some(weeks) = group.duration_weeks {
                ui.label(format!("Duration: {:.1} weeks", weeks));
            }
            ui.label(format!("NRBs: {}", group.nrb_count));
            ui.label(format!(
                "Success 3m/6m/12m: {} / {} / {}",
                format_rate(group.success_rate_3m, UI_TEXT.rate_unavailable),
                format_rate(group.success_rate_6m, UI_TEXT.rate_unavailable),
                format_rate(group.success_rate_12m, UI_TEXT.rate_unavailable),
            ));

            let counts = bucket_near_touches(&group.near_touches, &RECONCILE.proximity);
            if counts.very_close + counts.close + counts.moderate > 0 {
                ui.label(format!(
                    "{}: {} {} | {} {} | {} {}",
                    UI_TEXT.proximity_heading,
                    counts.very_close,
                    UI_TEXT.proximity_very_close,
                    counts.close,
                    UI_TEXT.proximity_close,
                    counts.moderate,
                    UI_TEXT.proximity_moderate,
                ));
            }
        },
    );
}

/// Median spacing between consecutive bars, in seconds. Weekly data yields
/// one week; falls back to a day for single-bar charts.
fn median_bar_spacing(snapshot: &ScanSnapshot) -> f64 {
    let times: Vec<i64> = if snapshot.secondary.is_present() {
        snapshot.secondary.points.iter().map(|p| p.time).collect()
    } else {
        snapshot.price_data.iter().map(|b| b.time).collect()
    };

    let mut gaps: Vec<i64> = times.windows(2).map(|w| w[1] - w[0]).filter(|g| *g > 0).collect();
    if gaps.is_empty() {
        return crate::utils::TimeUtils::SECONDS_IN_D as f64;
    }
    gaps.sort_unstable();
    gaps[gaps.len() / 2] as f64
}

fn create_x_axis() -> AxisHints<'static> {
    AxisHints::new_x().formatter(|grid_mark, _range| {
        crate::utils::time_utils::epoch_sec_to_utc(grid_mark.value as i64)
    })
}

fn create_y_axis(symbol: &str) -> AxisHints<'static> {
    AxisHints::new_y()
        .label(symbol.to_string())
        .formatter(|grid_mark, _range| format!("{:.2}", grid_mark.value))
        .placement(HPlacement::Left)
}
