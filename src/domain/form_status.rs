/// Lifecycle of a single submission: `Idle -> Loading -> {Success, Error}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Error
}

impl FormStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, FormStatus::Loading)
    }
}
