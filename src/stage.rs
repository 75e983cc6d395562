use std::{fmt, str::FromStr};

use crate::error::StudyError;

/// One screen of the study, in the order the participant sees them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    #[default]
    Consent,
    PreSurvey,
    Module,
    Task,
    PostSurvey,
    Complete,
}

impl Stage {
    pub const ALL: [Stage; 6] = [
        Stage::Consent,
        Stage::PreSurvey,
        Stage::Module,
        Stage::Task,
        Stage::PostSurvey,
        Stage::Complete,
    ];

    /// Number of steps shown in the progress bar. `Complete` is not a step.
    pub const STEPS: usize = Self::ALL.len() - 1;

    pub fn index(self) -> usize {
        self as usize
    }

    /// The stage after this one, `None` at `Complete`.
    pub fn next(self) -> Option<Stage> {
        Self::ALL.get(self.index() + 1).copied()
    }

    pub fn is_terminal(self) -> bool {
        self.next().is_none()
    }

    /// Short name used in callback data.
    pub fn key(self) -> &'static str {
        match self {
            Stage::Consent => "consent",
            Stage::PreSurvey => "pre",
            Stage::Module => "module",
            Stage::Task => "task",
            Stage::PostSurvey => "post",
            Stage::Complete => "complete",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Stage::Consent => "Consent",
            Stage::PreSurvey => "Pre-Survey",
            Stage::Module => "Module",
            Stage::Task => "Task",
            Stage::PostSurvey => "Post-Survey",
            Stage::Complete => "Complete",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Stage {
    type Err = StudyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Stage::ALL
            .into_iter()
            .find(|stage| stage.key() == s)
            .ok_or_else(|| StudyError::MalformedAction(s.to_owned()))
    }
}
