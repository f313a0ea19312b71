#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Size {
    Xs,
    Sm,
    #[default]
    Md,
    Lg,
    Xl,
}

impl Size {
    pub(crate) fn control_height(self) -> f32 {
        match self {
            Self::Xs => 24.0,
            Self::Sm => 27.0,
            Self::Md => 30.0,
            Self::Lg => 34.0,
            Self::Xl => 38.0,
        }
    }
}

/// Label placement relative to the control: stacked above, or in a fixed
/// left column.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum FieldLayout {
    #[default]
    Vertical,
    Horizontal,
}
