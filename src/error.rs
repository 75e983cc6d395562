use thiserror::Error;

use crate::stage::Stage;

/// Everything a participant can do wrong inside a session.
///
/// None of these are fatal: handlers report them back as a short toast and
/// leave the session untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StudyError {
    #[error("Please confirm consent before continuing.")]
    ConsentRequired,
    #[error("The study is already complete.")]
    AlreadyComplete,
    #[error("Ratings go from 1 to 5, got {0}.")]
    InvalidLikert(u8),
    #[error("Survey item {0} does not exist.")]
    UnknownItem(u8),
    #[error("Topic #{0} does not exist.")]
    UnknownTopic(usize),
    #[error("Field '{field}' does not accept {got}.")]
    FieldKind { field: String, got: &'static str },
    #[error("That screen is no longer active (you are at {current}).")]
    StaleScreen { current: Stage },
    #[error("Interactive practice is not part of this module.")]
    PracticeUnavailable,
    #[error("Close the practice panel first.")]
    PracticeOpen,
    #[error("Fill in role, context and task first.")]
    PracticeIncomplete,
    #[error("No tries remaining.")]
    PracticeExhausted,
    #[error("Opt in to the lottery to enter a participant number.")]
    LotteryNotJoined,
    #[error("Unrecognised button payload '{0}'.")]
    MalformedAction(String),
}
