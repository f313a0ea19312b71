use std::sync::Arc;

use crate::theme::Theme;

/// App-level configuration for schemaform components, registered as a gpui
/// global. Components fall back to the default light theme when the provider
/// was never initialized.
#[derive(Default)]
pub struct FormProvider {
    theme: Arc<Theme>,
}

impl gpui::Global for FormProvider {}

impl FormProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_theme(mut self, configure: impl FnOnce(Arc<Theme>) -> Theme) -> Self {
        self.theme = configure(self.theme).into();
        self
    }

    pub fn init(self, cx: &mut gpui::App) {
        cx.set_global(self);
    }

    pub fn theme(cx: &gpui::App) -> Arc<Theme> {
        cx.try_global::<FormProvider>()
            .map(|provider| provider.theme.clone())
            .unwrap_or_default()
    }
}
