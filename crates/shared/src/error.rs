use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::screen::Screen;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionCode {
    InvalidTrigger,
    NoPriorEntry,
}

/// A navigation request that was refused. The session state is unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    #[error("trigger '{trigger}' is not valid on screen '{screen}'")]
    InvalidTrigger {
        screen: Screen,
        trigger: &'static str,
    },
    #[error("no prior entry to return to from screen '{screen}'")]
    NoPriorEntry { screen: Screen },
}

impl NavigationError {
    pub fn code(&self) -> RejectionCode {
        match self {
            NavigationError::InvalidTrigger { .. } => RejectionCode::InvalidTrigger,
            NavigationError::NoPriorEntry { .. } => RejectionCode::NoPriorEntry,
        }
    }

    /// Screen that was current when the request was refused.
    pub fn screen(&self) -> Screen {
        match self {
            NavigationError::InvalidTrigger { screen, .. }
            | NavigationError::NoPriorEntry { screen } => *screen,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Rejection {
    pub code: RejectionCode,
    pub screen: Screen,
    pub message: String,
}

impl From<&NavigationError> for Rejection {
    fn from(value: &NavigationError) -> Self {
        Self {
            code: value.code(),
            screen: value.screen(),
            message: value.to_string(),
        }
    }
}
