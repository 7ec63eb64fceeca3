use crate::utils::error::ErrorId;

/// Lifecycle of one application run. `Running` is entered once and always
/// ends in exactly one terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    NotStarted,
    Running,
    Succeeded,
    FailedApplication,
    FailedUnexpected,
    Cancelled,
}

impl RunState {
    pub fn is_terminal(self) -> bool {
        !matches!(self, RunState::NotStarted | RunState::Running)
    }

    pub fn exit_code(self) -> u8 {
        match self {
            RunState::Succeeded => 0,
            RunState::Cancelled => 130,
            // An unfinished run never reports success.
            RunState::NotStarted
            | RunState::Running
            | RunState::FailedApplication
            | RunState::FailedUnexpected => 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    pub state: RunState,
    pub error_id: Option<ErrorId>,
}

impl RunOutcome {
    pub fn exit_code(&self) -> u8 {
        self.state.exit_code()
    }
}
