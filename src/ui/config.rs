use eframe::egui::Color32;

/// UI Colors for consistent theming
#[derive(Clone, Copy, Default)]
pub struct UiColors {
    pub label: Color32,
    pub heading: Color32,
    pub subsection_heading: Color32,
    pub central_panel: Color32,
    pub side_panel: Color32,
    pub validation_error: Color32,
    pub positive_rate: Color32,
    pub negative_rate: Color32,
}

/// Main UI configuration struct that holds all UI-related settings
#[derive(Default, Clone, Copy)]
pub struct UiConfig {
    pub colors: UiColors,
    pub side_panel_min_width: f32,
    pub form_field_width: f32,
}

/// Global UI configuration instance
pub static UI_CONFIG: UiConfig = UiConfig {
    colors: UiColors {
        label: Color32::GRAY,
        heading: Color32::YELLOW,
        subsection_heading: Color32::ORANGE,
        central_panel: Color32::from_rgb(20, 24, 31),
        side_panel: Color32::from_rgb(25, 25, 25),
        validation_error: Color32::from_rgb(255, 110, 110),
        positive_rate: Color32::from_rgb(130, 200, 140),
        negative_rate: Color32::from_rgb(220, 120, 120),
    },
    side_panel_min_width: 220.0,
    form_field_width: 120.0,
};

/// All user-facing strings in one place.
pub struct UiText {
    pub app_title: &'static str,

    pub scan_form_heading: &'static str,
    pub symbol_label: &'static str,
    pub pattern_label: &'static str,
    pub series_label: &'static str,
    pub lookback_label: &'static str,
    pub cooldown_label: &'static str,
    pub dip_threshold_label: &'static str,
    pub analyze_button: &'static str,

    pub error_symbol_empty: &'static str,
    pub error_cooldown_range: &'static str,
    pub error_dip_range: &'static str,

    pub overlays_heading: &'static str,
    pub show_zones_label: &'static str,
    pub show_historical_label: &'static str,
    pub show_clusters_label: &'static str,

    pub results_heading: &'static str,
    pub groups_subheading: &'static str,
    pub zones_subheading: &'static str,
    pub week52_label: &'static str,
    pub week52_unavailable: &'static str,
    pub rate_unavailable: &'static str,

    pub proximity_heading: &'static str,
    pub proximity_very_close: &'static str,
    pub proximity_close: &'static str,
    pub proximity_moderate: &'static str,

    pub status_idle: &'static str,
    pub status_loading: &'static str,
    pub status_success: &'static str,
    pub status_failure: &'static str,

    pub central_empty_prompt: &'static str,
    pub central_loading_prefix: &'static str,
    pub central_error_heading: &'static str,
    pub central_error_hint: &'static str,
}

pub static UI_TEXT: UiText = UiText {
    app_title: "Pattern Scope",

    scan_form_heading: "Pattern Scan",
    symbol_label: "Symbol",
    pattern_label: "Pattern",
    series_label: "Series",
    lookback_label: "Lookback (weeks)",
    cooldown_label: "Cooldown (weeks)",
    dip_threshold_label: "Dip threshold (%)",
    analyze_button: "Analyze",

    error_symbol_empty: "Enter a symbol to scan",
    error_cooldown_range: "Cooldown must be a whole number between 1 and 100",
    error_dip_range: "Dip threshold must be between 0 and 100",

    overlays_heading: "Overlays",
    show_zones_label: "Consolidation zones",
    show_historical_label: "Historical levels",
    show_clusters_label: "Cluster levels",

    results_heading: "Results",
    groups_subheading: "Level Groups",
    zones_subheading: "Consolidation Zones",
    week52_label: "52-Week High",
    week52_unavailable: "Unavailable",
    rate_unavailable: "n/a",

    proximity_heading: "Near touches",
    proximity_very_close: "< 2%",
    proximity_close: "2\u{2013}5%",
    proximity_moderate: "5\u{2013}10%",

    status_idle: "Idle",
    status_loading: "Scanning\u{2026}",
    status_success: "Scan complete",
    status_failure: "Scan failed",

    central_empty_prompt: "Run an analysis to chart detected patterns",
    central_loading_prefix: "Scanning",
    central_error_heading: "\u{26a0} Unable to Complete Scan",
    central_error_hint: "Check the symbol and backend availability, then try again.",
};
