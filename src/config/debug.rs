//! Debugging feature flags.
//!
//! Toggle individual diagnostics here; keep the noisy ones `false` by default
//! so builds remain quiet.

pub struct DebugFlags {
    /// Emit UI interaction logs (toggles, form submissions, selection).
    pub print_ui_interactions: bool,
    /// Emit outbound request URLs and parameter sets.
    pub print_scan_requests: bool,
    /// Emit payload normalization details (field-name fallbacks, skip counts).
    pub print_decode_events: bool,
    /// Emit hover hit-test matches while moving the crosshair.
    pub print_hover_hits: bool,
}

pub const DEBUG_FLAGS: DebugFlags = DebugFlags {
    print_ui_interactions: true,
    print_scan_requests: true,
    print_decode_events: false,
    print_hover_hits: false,
};
