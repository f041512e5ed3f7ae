use dotring::IndicatorConfig;
use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use palette::Srgba;

/// Swaps the configured colors for the active gtk theme's accent and
/// background colors, keeping the configured alpha. Missing theme colors keep
/// the configured value.
pub fn apply_theme_colors(context: &gtk::StyleContext, config: &mut IndicatorConfig) {
    config.dot_color = lookup_color(
        context,
        "theme_selected_bg_color",
        config.dot_color,
        Some(config.dot_color.alpha),
    );
    config.background_color = lookup_color(
        context,
        "theme_bg_color",
        config.background_color,
        Some(config.background_color.alpha),
    );
}

fn lookup_color(
    context: &gtk::StyleContext,
    name: &str,
    fallback: Srgba<f64>,
    alpha_override: Option<f64>,
) -> Srgba<f64> {
    context
        .lookup_color(name)
        .map(|c| {
            let (r, g, b, a) = (
                c.red() as f64,
                c.green() as f64,
                c.blue() as f64,
                c.alpha() as f64,
            );
            Srgba::new(r, g, b, alpha_override.unwrap_or(a))
        })
        .unwrap_or(fallback)
}

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    let css_data = "
.dotloader-window, .dotloader-drawing-area {
    background: none;
    background-color: transparent;
}
";
    provider.load_from_data(css_data);

    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}
