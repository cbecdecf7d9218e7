//! Plot visualization configuration

use eframe::egui::Color32;

pub struct PlotConfig {
    // Candle colors
    pub candle_up_color: Color32,
    pub candle_down_color: Color32,

    // Level line colors
    pub historical_level_color: Color32,
    pub cluster_level_color: Color32,
    // Dimming applied to the 90% companion line of a historical level
    pub companion_dim_factor: f32,

    // Zone and marker colors
    pub consolidation_zone_color: Color32,
    pub nrb_range_color: Color32,
    pub bullish_break_color: Color32,
    pub bearish_break_color: Color32,
    pub default_marker_color: Color32,
    // Markers outside the selected group are drawn in this muted color
    pub dimmed_marker_color: Color32,

    // Secondary series colors
    pub secondary_series_color: Color32,
    pub ratio_series_color: Color32,
    pub ratio_fast_ema_color: Color32,
    pub ratio_slow_ema_color: Color32,
    pub week52_high_color: Color32,

    // Deterministic palette for bowl pattern clusters, indexed abs(id) % 10
    pub bowl_palette: &'static [Color32; 10],
    // Palette for consolidation-zone marker coloring, indexed abs(id) % 8
    pub zone_palette: &'static [Color32; 8],

    pub level_line_width: f32,
    pub companion_line_width: f32,
    pub bowl_curve_width: f32,
    pub series_line_width: f32,
    pub nrb_range_line_width: f32,
    pub marker_radius: f32,
}

pub const PLOT_CONFIG: PlotConfig = PlotConfig {
    candle_up_color: Color32::from_rgb(0x26, 0xa6, 0x9a),
    candle_down_color: Color32::from_rgb(0xef, 0x53, 0x50),

    historical_level_color: Color32::from_rgb(0x00, 0xe5, 0xff), // Cyan
    cluster_level_color: Color32::from_rgb(0xff, 0xd6, 0x00),    // Yellow
    companion_dim_factor: 0.4,

    consolidation_zone_color: Color32::from_rgb(0x22, 0xc5, 0x5e), // Green
    nrb_range_color: Color32::from_rgb(0x88, 0x88, 0x88),
    bullish_break_color: Color32::from_rgb(0x00, 0xe5, 0xff),
    bearish_break_color: Color32::from_rgb(0xff, 0xd6, 0x00),
    default_marker_color: Color32::from_rgb(0x21, 0x96, 0xf3),
    dimmed_marker_color: Color32::from_rgba_premultiplied(148, 163, 184, 153),

    secondary_series_color: Color32::from_rgb(0x29, 0x62, 0xff),
    ratio_series_color: Color32::from_rgb(0x80, 0x80, 0x80),
    ratio_fast_ema_color: Color32::from_rgb(0xff, 0x52, 0x52),
    ratio_slow_ema_color: Color32::from_rgb(0x21, 0x96, 0xf3),
    week52_high_color: Color32::from_rgb(0xf5, 0x9e, 0x0b),

    bowl_palette: &[
        Color32::from_rgb(0x29, 0x62, 0xff), // Blue
        Color32::from_rgb(0xff, 0x6d, 0x00), // Orange
        Color32::from_rgb(0x00, 0xbf, 0xa5), // Teal
        Color32::from_rgb(0xd5, 0x00, 0xf9), // Purple
        Color32::from_rgb(0xff, 0xd6, 0x00), // Yellow
        Color32::from_rgb(0x00, 0xe6, 0x76), // Green
        Color32::from_rgb(0xff, 0x17, 0x44), // Red
        Color32::from_rgb(0xff, 0xff, 0xff), // White
        Color32::from_rgb(0x9c, 0x27, 0xb0), // Violet
        Color32::from_rgb(0x00, 0xbc, 0xd4), // Light blue
    ],
    zone_palette: &[
        Color32::from_rgb(0x22, 0xc5, 0x5e),
        Color32::from_rgb(0x3b, 0x82, 0xf6),
        Color32::from_rgb(0xf9, 0x73, 0x16),
        Color32::from_rgb(0xa8, 0x55, 0xf7),
        Color32::from_rgb(0xea, 0xb3, 0x08),
        Color32::from_rgb(0xef, 0x44, 0x44),
        Color32::from_rgb(0x14, 0xb8, 0xa6),
        Color32::from_rgb(0x63, 0x66, 0xf1),
    ],

    level_line_width: 2.0,
    companion_line_width: 1.0,
    bowl_curve_width: 3.0,
    series_line_width: 2.0,
    nrb_range_line_width: 1.0,
    marker_radius: 4.0,
};
