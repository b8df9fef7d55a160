use std::fmt;

/// Progress of a smoke test run.
///
/// `Start → SentDefault → Waiting → SentInbox → Done`; any step may move to
/// `Failed`, which is absorbing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Start,
    SentDefault,
    Waiting,
    SentInbox,
    Done,
    Failed,
}

impl RunState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, RunState::Done | RunState::Failed)
    }

    /// Whether `next` is a legal successor of `self`.
    pub fn can_transition_to(&self, next: RunState) -> bool {
        match (self, next) {
            (RunState::Failed, _) | (RunState::Done, _) => false,
            (_, RunState::Failed) => true,
            (RunState::Start, RunState::SentDefault) => true,
            (RunState::SentDefault, RunState::Waiting) => true,
            (RunState::Waiting, RunState::SentInbox) => true,
            (RunState::SentInbox, RunState::Done) => true,
            _ => false,
        }
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RunState::Start => "START",
            RunState::SentDefault => "SENT_DEFAULT",
            RunState::Waiting => "WAITING",
            RunState::SentInbox => "SENT_INBOX",
            RunState::Done => "DONE",
            RunState::Failed => "FAILED",
        };
        write!(f, "{name}")
    }
}
