use teloxide::types::MessageId;

use crate::{form::TextField, session::Session};

/// Per-chat dialogue state kept in `InMemStorage`.
///
/// `screen` is the newest message showing the session. Older messages have
/// had their buttons removed, and presses that still arrive from them are
/// turned away.
#[derive(Debug, Clone, Default)]
pub enum StudyState {
    #[default]
    Start,
    InStudy {
        session: Session,
        screen: Option<MessageId>,
    },
    AwaitingText {
        session: Session,
        field: TextField,
        screen: Option<MessageId>,
    },
}

impl StudyState {
    pub fn session(&self) -> Option<&Session> {
        match self {
            StudyState::Start => None,
            StudyState::InStudy { session, .. } | StudyState::AwaitingText { session, .. } => {
                Some(session)
            }
        }
    }
}

/// Whether a button on `pressed` belongs to the newest screen. Unknown ids
/// on either side are let through to the session's own stage check.
pub fn is_current_screen(screen: Option<MessageId>, pressed: Option<MessageId>) -> bool {
    match (screen, pressed) {
        (Some(screen), Some(pressed)) => screen == pressed,
        _ => true,
    }
}
