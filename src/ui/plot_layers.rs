use eframe::egui::Color32;
use egui_plot::{Line, LineStyle, PlotPoints, PlotUi, Points, Polygon};

use crate::config::plot::PLOT_CONFIG;
use crate::domain::{MarkerPosition, MarkerShape, SeriesPoint};
use crate::engine::{LevelLineKind, MarkerTint, OverlayPlan, ScanSnapshot};

/// Context passed to every layer during rendering.
/// This prevents argument explosion.
pub struct LayerContext<'a> {
    pub snapshot: &'a ScanSnapshot,
    pub plan: &'a OverlayPlan,
    /// Half of one candle body in x units (time seconds).
    pub candle_half_width: f64,
}

/// A standardized layer in the plot stack.
pub trait PlotLayer {
    fn render(&self, plot_ui: &mut PlotUi, ctx: &LayerContext);
}

fn two_point_line(points: &[SeriesPoint; 2]) -> PlotPoints<'static> {
    PlotPoints::new(vec![
        [points[0].time as f64, points[0].value],
        [points[1].time as f64, points[1].value],
    ])
}

fn series_line(points: &[SeriesPoint]) -> PlotPoints<'static> {
    PlotPoints::new(points.iter().map(|p| [p.time as f64, p.value]).collect())
}

// ============================================================================
// 1. PRICE LAYER (candles, or the secondary series when it replaces them)
// ============================================================================
pub struct PriceLayer;

impl PlotLayer for PriceLayer {
    fn render(&self, plot_ui: &mut PlotUi, ctx: &LayerContext) {
        if ctx.snapshot.secondary.is_present() {
            self.render_secondary(plot_ui, ctx);
        } else {
            self.render_candles(plot_ui, ctx);
        }
    }
}

impl PriceLayer {
    fn render_candles(&self, plot_ui: &mut PlotUi, ctx: &LayerContext) {
        let half = ctx.candle_half_width;

        for bar in &ctx.snapshot.price_data {
            let x = bar.time as f64;
            let up = bar.close >= bar.open;
            let color = if up {
                PLOT_CONFIG.candle_up_color
            } else {
                PLOT_CONFIG.candle_down_color
            };

            // Wick
            plot_ui.line(
                Line::new(
                    "",
                    PlotPoints::new(vec![[x, bar.low], [x, bar.high]]),
                )
                .color(color)
                .width(1.0),
            );

            // Body
            let (top, bottom) = if up {
                (bar.close, bar.open)
            } else {
                (bar.open, bar.close)
            };
            let body = PlotPoints::new(vec![
                [x - half, bottom],
                [x + half, bottom],
                [x + half, top],
                [x - half, top],
            ]);
            plot_ui.polygon(Polygon::new("", body).fill_color(color).stroke(
                eframe::egui::Stroke::new(1.0, color),
            ));
        }
    }

    fn render_secondary(&self, plot_ui: &mut PlotUi, ctx: &LayerContext) {
        let secondary = &ctx.snapshot.secondary;
        let name = secondary.name.clone().unwrap_or_default();
        let is_ratio = !secondary.fast_smoothing.is_empty() || !secondary.slow_smoothing.is_empty();

        let main_color = if is_ratio {
            PLOT_CONFIG.ratio_series_color
        } else {
            PLOT_CONFIG.secondary_series_color
        };

        plot_ui.line(
            Line::new(name, series_line(&secondary.points))
                .color(main_color)
                .width(PLOT_CONFIG.series_line_width),
        );

        if !secondary.fast_smoothing.is_empty() {
            plot_ui.line(
                Line::new("EMA 5", series_line(&secondary.fast_smoothing))
                    .color(PLOT_CONFIG.ratio_fast_ema_color)
                    .width(1.0),
            );
        }
        if !secondary.slow_smoothing.is_empty() {
            plot_ui.line(
                Line::new("EMA 10", series_line(&secondary.slow_smoothing))
                    .color(PLOT_CONFIG.ratio_slow_ema_color)
                    .width(1.0),
            );
        }
    }
}

// ============================================================================
// 2. CONSOLIDATION ZONE LAYER
// ============================================================================
pub struct ZoneLineLayer;

impl PlotLayer for ZoneLineLayer {
    fn render(&self, plot_ui: &mut PlotUi, ctx: &LayerContext) {
        for zone in &ctx.plan.zone_lines {
            let width = if zone.selected {
                PLOT_CONFIG.level_line_width * 1.5
            } else {
                PLOT_CONFIG.level_line_width
            };
            plot_ui.line(
                Line::new(format!("Zone #{}", zone.zone_id), two_point_line(&zone.points))
                    .color(PLOT_CONFIG.consolidation_zone_color)
                    .width(width),
            );
        }
    }
}

// ============================================================================
// 3. NRB RANGE LAYER (dotted high/low pair per break)
// ============================================================================
pub struct NrbRangeLayer;

impl PlotLayer for NrbRangeLayer {
    fn render(&self, plot_ui: &mut PlotUi, ctx: &LayerContext) {
        for range in &ctx.plan.nrb_ranges {
            for points in [&range.high, &range.low] {
                plot_ui.line(
                    Line::new("", two_point_line(points))
                        .color(PLOT_CONFIG.nrb_range_color)
                        .width(PLOT_CONFIG.nrb_range_line_width)
                        .style(LineStyle::dotted_loose()),
                );
            }
        }
    }
}

// ============================================================================
// 4. LEVEL LINE LAYER (historical solid + companion, cluster dashed)
// ============================================================================
pub struct LevelLineLayer;

impl PlotLayer for LevelLineLayer {
    fn render(&self, plot_ui: &mut PlotUi, ctx: &LayerContext) {
        for line in &ctx.plan.level_lines {
            let span = &line.span;
            let x0 = span.start_time as f64;
            let x1 = span.end_time as f64;

            match line.kind {
                LevelLineKind::Historical => {
                    plot_ui.line(
                        Line::new(
                            format!("Level #{}", line.group_id),
                            PlotPoints::new(vec![[x0, span.level], [x1, span.level]]),
                        )
                        .color(PLOT_CONFIG.historical_level_color)
                        .width(PLOT_CONFIG.level_line_width),
                    );
                    if let Some(companion) = line.companion_level {
                        let dim = PLOT_CONFIG
                            .historical_level_color
                            .linear_multiply(PLOT_CONFIG.companion_dim_factor);
                        plot_ui.line(
                            Line::new(
                                "",
                                PlotPoints::new(vec![[x0, companion], [x1, companion]]),
                            )
                            .color(dim)
                            .width(PLOT_CONFIG.companion_line_width)
                            .style(LineStyle::dotted_loose()),
                        );
                    }
                }
                LevelLineKind::Cluster => {
                    plot_ui.line(
                        Line::new(
                            format!("Cluster #{}", line.group_id),
                            PlotPoints::new(vec![[x0, span.level], [x1, span.level]]),
                        )
                        .color(PLOT_CONFIG.cluster_level_color)
                        .width(PLOT_CONFIG.level_line_width)
                        .style(LineStyle::dashed_loose()),
                    );
                }
            }
        }
    }
}

// ============================================================================
// 5. BOWL CURVE LAYER
// ============================================================================
pub struct BowlCurveLayer;

impl PlotLayer for BowlCurveLayer {
    fn render(&self, plot_ui: &mut PlotUi, ctx: &LayerContext) {
        for curve in &ctx.plan.bowl_curves {
            let color = PLOT_CONFIG.bowl_palette[curve.palette_slot % PLOT_CONFIG.bowl_palette.len()];
            plot_ui.line(
                Line::new(
                    format!("Bowl #{}", curve.cluster_id),
                    series_line(&curve.points),
                )
                .color(color)
                .width(PLOT_CONFIG.bowl_curve_width),
            );
        }
    }
}

// ============================================================================
// 6. 52-WEEK HIGH LAYER
// ============================================================================
pub struct Week52Layer;

impl PlotLayer for Week52Layer {
    fn render(&self, plot_ui: &mut PlotUi, ctx: &LayerContext) {
        if let Some(points) = &ctx.plan.week52_line {
            plot_ui.line(
                Line::new("52-Week High", two_point_line(points))
                    .color(PLOT_CONFIG.week52_high_color)
                    .width(PLOT_CONFIG.companion_line_width)
                    .style(LineStyle::dashed_loose()),
            );
        }
    }
}

// ============================================================================
// 7. MARKER LAYER
// ============================================================================
pub struct MarkerLayer;

impl PlotLayer for MarkerLayer {
    fn render(&self, plot_ui: &mut PlotUi, ctx: &LayerContext) {
        for marker in &ctx.plan.markers {
            let Some(y) = marker_anchor(ctx.snapshot, marker.time, marker.position) else {
                continue;
            };

            let color = resolve_tint(marker.tint);
            let shape = match marker.shape {
                MarkerShape::ArrowUp => egui_plot::MarkerShape::Up,
                MarkerShape::ArrowDown => egui_plot::MarkerShape::Down,
                MarkerShape::Square => egui_plot::MarkerShape::Square,
                MarkerShape::Circle => egui_plot::MarkerShape::Circle,
            };

            plot_ui.points(
                Points::new(
                    marker.text.clone(),
                    PlotPoints::new(vec![[marker.time as f64, y]]),
                )
                .shape(shape)
                .radius(PLOT_CONFIG.marker_radius)
                .color(color),
            );
        }
    }
}

fn resolve_tint(tint: MarkerTint) -> Color32 {
    match tint {
        MarkerTint::ZonePalette(slot) => {
            PLOT_CONFIG.zone_palette[slot % PLOT_CONFIG.zone_palette.len()]
        }
        MarkerTint::Bullish => PLOT_CONFIG.bullish_break_color,
        MarkerTint::Bearish => PLOT_CONFIG.bearish_break_color,
        MarkerTint::Default => PLOT_CONFIG.default_marker_color,
        MarkerTint::Dimmed => PLOT_CONFIG.dimmed_marker_color,
    }
}

/// Vertical anchor for a marker: the bar (or series point) at its time,
/// nudged off the price so the glyph does not sit on the wick.
fn marker_anchor(snapshot: &ScanSnapshot, time: i64, position: MarkerPosition) -> Option<f64> {
    if snapshot.secondary.is_present() {
        let point = snapshot
            .secondary
            .points
            .iter()
            .find(|p| p.time == time)
            .or_else(|| snapshot.secondary.points.iter().min_by_key(|p| (p.time - time).abs()))?;
        return Some(match position {
            MarkerPosition::AboveBar => point.value * 1.01,
            MarkerPosition::BelowBar => point.value * 0.99,
            MarkerPosition::InBar => point.value,
        });
    }

    let bar = snapshot
        .price_data
        .iter()
        .find(|b| b.time == time)
        .or_else(|| snapshot.price_data.iter().min_by_key(|b| (b.time - time).abs()))?;
    Some(match position {
        MarkerPosition::AboveBar => bar.high * 1.01,
        MarkerPosition::BelowBar => bar.low * 0.99,
        MarkerPosition::InBar => (bar.high + bar.low) / 2.0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PriceBar;

    fn snapshot_with_bars() -> ScanSnapshot {
        ScanSnapshot {
            price_data: vec![
                PriceBar {
                    time: 100,
                    open: 10.0,
                    high: 12.0,
                    low: 9.0,
                    close: 11.0,
                },
                PriceBar {
                    time: 200,
                    open: 11.0,
                    high: 13.0,
                    low: 10.0,
                    close: 12.0,
                },
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_marker_anchor_offsets_from_bar() {
        let snapshot = snapshot_with_bars();
        let below = marker_anchor(&snapshot, 100, MarkerPosition::BelowBar).unwrap();
        let above = marker_anchor(&snapshot, 100, MarkerPosition::AboveBar).unwrap();
        assert!(below < 9.0);
        assert!(above > 12.0);
    }

    #[test]
    fn test_marker_anchor_snaps_to_nearest_bar() {
        let snapshot = snapshot_with_bars();
        let y = marker_anchor(&snapshot, 190, MarkerPosition::InBar).unwrap();
        assert_eq!(y, (13.0 + 10.0) / 2.0, "190 is closest to the bar at 200");
    }

    #[test]
    fn test_marker_anchor_empty_snapshot_is_none() {
        let snapshot = ScanSnapshot::default();
        assert!(marker_anchor(&snapshot, 100, MarkerPosition::BelowBar).is_none());
    }
}
