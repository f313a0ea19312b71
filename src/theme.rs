use gpui::{Hsla, hsla};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ColorScheme {
    Light,
    Dark,
}

/// Semantic color tokens the field components resolve at render time.
#[derive(Clone, Debug, PartialEq)]
pub struct ThemeTokens {
    pub text_primary: Hsla,
    pub text_muted: Hsla,
    pub label: Hsla,
    pub description: Hsla,
    pub error: Hsla,
    pub required_marker: Hsla,
    pub surface_bg: Hsla,
    pub control_bg: Hsla,
    pub border: Hsla,
    pub border_hover: Hsla,
    pub border_focus: Hsla,
    pub border_error: Hsla,
    pub accent: Hsla,
    pub accent_fg: Hsla,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Theme {
    pub scheme: ColorScheme,
    pub tokens: ThemeTokens,
}

impl Theme {
    pub fn light() -> Self {
        Self {
            scheme: ColorScheme::Light,
            tokens: ThemeTokens {
                text_primary: hsla(0.0, 0.0, 0.12, 1.0),
                text_muted: hsla(0.0, 0.0, 0.45, 1.0),
                label: hsla(0.0, 0.0, 0.25, 1.0),
                description: hsla(0.0, 0.0, 0.45, 1.0),
                error: hsla(0.0, 0.75, 0.45, 1.0),
                required_marker: hsla(0.0, 0.75, 0.45, 1.0),
                surface_bg: hsla(0.0, 0.0, 0.99, 1.0),
                control_bg: hsla(0.0, 0.0, 1.0, 1.0),
                border: hsla(0.0, 0.0, 0.82, 1.0),
                border_hover: hsla(0.0, 0.0, 0.65, 1.0),
                border_focus: hsla(0.58, 0.65, 0.5, 1.0),
                border_error: hsla(0.0, 0.75, 0.45, 1.0),
                accent: hsla(0.58, 0.65, 0.5, 1.0),
                accent_fg: hsla(0.0, 0.0, 1.0, 1.0),
            },
        }
    }

    pub fn dark() -> Self {
        Self {
            scheme: ColorScheme::Dark,
            tokens: ThemeTokens {
                text_primary: hsla(0.0, 0.0, 0.92, 1.0),
                text_muted: hsla(0.0, 0.0, 0.6, 1.0),
                label: hsla(0.0, 0.0, 0.8, 1.0),
                description: hsla(0.0, 0.0, 0.6, 1.0),
                error: hsla(0.0, 0.7, 0.62, 1.0),
                required_marker: hsla(0.0, 0.7, 0.62, 1.0),
                surface_bg: hsla(0.0, 0.0, 0.12, 1.0),
                control_bg: hsla(0.0, 0.0, 0.16, 1.0),
                border: hsla(0.0, 0.0, 0.3, 1.0),
                border_hover: hsla(0.0, 0.0, 0.45, 1.0),
                border_focus: hsla(0.58, 0.6, 0.55, 1.0),
                border_error: hsla(0.0, 0.7, 0.62, 1.0),
                accent: hsla(0.58, 0.6, 0.55, 1.0),
                accent_fg: hsla(0.0, 0.0, 0.08, 1.0),
            },
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}
