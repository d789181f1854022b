/// Состояние загрузки одного виджета.
///
/// `Empty` (backend answered with no rows) is kept apart from `Failed` so the
/// table can say "sin datos" instead of showing an error.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded(usize),
    Empty,
    Failed(String),
}

impl LoadState {
    pub fn from_count(count: usize) -> Self {
        if count == 0 {
            LoadState::Empty
        } else {
            LoadState::Loaded(count)
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_rows_is_empty_not_failed() {
        let state = LoadState::from_count(0);
        assert_eq!(state, LoadState::Empty);
        assert!(state.error().is_none());
        assert_eq!(LoadState::from_count(4), LoadState::Loaded(4));
    }

    #[test]
    fn test_failed_exposes_message() {
        let state = LoadState::Failed("HTTP 500: boom".into());
        assert_eq!(state.error(), Some("HTTP 500: boom"));
        assert!(!state.is_loading());
    }
}
