use eframe::egui::{Context, RichText, Ui, Visuals};

use crate::ui::config::UI_CONFIG;

/// Creates a colored heading with uppercase text and monospace font
pub fn colored_heading(text: impl Into<String>) -> RichText {
    let uppercase_text = text.into().to_uppercase() + ":";
    RichText::new(uppercase_text)
        .color(UI_CONFIG.colors.heading)
        .monospace()
}

/// Creates a colored sub-section heading using the configured label color
pub fn colored_subsection_heading(text: impl Into<String>) -> RichText {
    RichText::new(text.into()).color(UI_CONFIG.colors.subsection_heading)
}

/// Sets up custom visuals for the entire application
pub fn setup_custom_visuals(ctx: &Context) {
    let mut visuals = Visuals::dark();

    visuals.window_fill = UI_CONFIG.colors.central_panel;
    visuals.panel_fill = UI_CONFIG.colors.side_panel;

    visuals.widgets.noninteractive.fg_stroke.color = UI_CONFIG.colors.label;
    visuals.widgets.inactive.fg_stroke.color = UI_CONFIG.colors.label;
    visuals.widgets.hovered.fg_stroke.color = UI_CONFIG.colors.heading;
    visuals.widgets.active.fg_stroke.color = UI_CONFIG.colors.heading;

    ctx.set_visuals(visuals);
}

/// Creates a section heading with standard spacing
pub fn section_heading(ui: &mut Ui, text: impl Into<String>) {
    ui.add_space(10.0);
    ui.heading(colored_heading(text));
    ui.add_space(5.0);
}

/// Formats a price level for tooltips and panels.
/// Indian equities quote in rupees; two decimals above 1, four below.
pub fn format_price(price: f64) -> String {
    if price.abs() >= 1.0 {
        format!("\u{20b9}{:.2}", price)
    } else {
        format!("\u{20b9}{:.4}", price)
    }
}

/// Formats an optional signed success rate as a percentage.
pub fn format_rate(rate: Option<f64>, unavailable: &str) -> String {
    match rate {
        Some(value) => format!("{:+.1}%", value),
        None => unavailable.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_rate_signed() {
        assert_eq!(format_rate(Some(12.34), "n/a"), "+12.3%");
        assert_eq!(format_rate(Some(-3.0), "n/a"), "-3.0%");
        assert_eq!(format_rate(None, "n/a"), "n/a");
    }

    #[test]
    fn test_format_price_precision_shifts_below_one() {
        assert_eq!(format_price(1234.5), "\u{20b9}1234.50");
        assert_eq!(format_price(0.12345), "\u{20b9}0.1235");
    }
}
