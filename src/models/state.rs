use std::fmt;

/// Lifecycle phase of a quiz session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for the question bank to arrive.
    Loading,
    /// The last load attempt failed.
    Error,
    /// Questions are being answered.
    InProgress,
    /// The score summary is showing.
    Finished,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Loading => "loading",
            Phase::Error => "in error",
            Phase::InProgress => "in progress",
            Phase::Finished => "finished",
        };
        f.write_str(name)
    }
}
