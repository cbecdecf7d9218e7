//! Backend endpoint configuration

pub struct FormLimits {
    pub lookback_weeks_min: u32,
    pub lookback_weeks_max: u32,
    pub cooldown_weeks_min: u32,
    pub cooldown_weeks_max: u32,
    pub dip_threshold_min_pct: f64,
    pub dip_threshold_max_pct: f64,
}

pub struct FormDefaults {
    pub lookback_weeks: u32,
    pub cooldown_weeks: u32,
    pub dip_threshold_pct: f64,
    pub symbol: &'static str,
}

pub struct ApiConfig {
    pub default_base_url: &'static str,
    pub pattern_scan_path: &'static str,
    pub week52_high_path: &'static str,
    // Per-request timeout. Both analysis-cycle requests share it.
    pub request_timeout_secs: u64,

    pub limits: FormLimits,
    pub defaults: FormDefaults,
}

pub const API: ApiConfig = ApiConfig {
    default_base_url: "http://127.0.0.1:8000",
    pattern_scan_path: "/pattern-scan/",
    week52_high_path: "/52week-high/",
    request_timeout_secs: 30,

    limits: FormLimits {
        lookback_weeks_min: 1,
        lookback_weeks_max: 100,
        cooldown_weeks_min: 1,
        cooldown_weeks_max: 100,
        dip_threshold_min_pct: 0.0,
        dip_threshold_max_pct: 100.0,
    },

    defaults: FormDefaults {
        lookback_weeks: 52,
        cooldown_weeks: 5,
        dip_threshold_pct: 20.0,
        symbol: "TCS",
    },
};
