use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use palette::Srgba;

/// Colors the cairo-drawn widgets take from the active GTK theme. Wheel strokes do not
/// follow the theme; see `gui::wheel::view`.
pub struct ThemeColors {
    pub wheel_backdrop: Srgba<f64>,
    pub swatch_border: Srgba<f64>,
}

impl ThemeColors {
    pub fn from_context(context: &gtk::StyleContext) -> Self {
        Self {
            wheel_backdrop: Self::lookup_color(
                context,
                "theme_base_color",
                Srgba::new(1.0, 1.0, 1.0, 1.0),
                None,
            ),
            swatch_border: Self::lookup_color(
                context,
                "theme_fg_color",
                Srgba::new(0.2, 0.2, 0.2, 1.0),
                Some(0.8),
            ),
        }
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
                Srgba::new(
                    c.red() as f64,
                    c.green() as f64,
                    c.blue() as f64,
                    alpha_override.unwrap_or(c.alpha() as f64),
                )
            })
            .unwrap_or(fallback)
    }
}

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    let css_data = "
.drape-welcome {
    font-size: 50px;
    font-weight: bold;
}
.drape-title {
    font-size: 26px;
    font-weight: bold;
}
.drape-primary {
    background: #007AFF;
    color: #fff;
    font-weight: 600;
    padding: 12px 30px;
    border-radius: 10px;
}
.drape-card {
    padding: 20px;
    border-radius: 15px;
    background-color: alpha(@theme_base_color, 0.9);
}
.drape-material {
    padding: 8px;
    border-radius: 12px;
}
.drape-material-selected {
    outline: 2px solid #0077ff;
}
.drape-hex {
    font-size: 20px;
    font-weight: bold;
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
