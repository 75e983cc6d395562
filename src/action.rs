use std::{fmt, str::FromStr};

use crate::{
    error::StudyError,
    form::{Disclosure, SurveyKind, TextField, SURVEY_ITEMS},
    stage::Stage,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PracticeAction {
    Open,
    Close,
    Generate,
}

/// A button press. Encoded as inline-keyboard callback data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ToggleConsent,
    Rate {
        survey: SurveyKind,
        item: u8,
        value: u8,
    },
    SelectTopic(usize),
    ToggleDisclosure(Disclosure),
    Edit(TextField),
    Practice(PracticeAction),
    ToggleLottery,
    Continue(Stage),
}

impl Action {
    /// Stage whose screen carries this button.
    pub fn stage(self) -> Stage {
        match self {
            Action::ToggleConsent => Stage::Consent,
            Action::Rate { survey, .. } => survey.stage(),
            Action::SelectTopic(_) | Action::ToggleDisclosure(_) => Stage::Task,
            Action::Edit(field) => field.stage(),
            Action::Practice(_) => Stage::Module,
            Action::ToggleLottery => Stage::Complete,
            Action::Continue(stage) => stage,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::ToggleConsent => f.write_str("consent"),
            Action::Rate {
                survey,
                item,
                value,
            } => write!(f, "rate:{}:{}:{}", survey.key(), item, value),
            Action::SelectTopic(index) => write!(f, "topic:{index}"),
            Action::ToggleDisclosure(d) => write!(f, "disclose:{}", d.key()),
            Action::Edit(field) => write!(f, "edit:{field}"),
            Action::Practice(PracticeAction::Open) => f.write_str("practice:open"),
            Action::Practice(PracticeAction::Close) => f.write_str("practice:close"),
            Action::Practice(PracticeAction::Generate) => f.write_str("practice:generate"),
            Action::ToggleLottery => f.write_str("lottery"),
            Action::Continue(stage) => write!(f, "continue:{}", stage.key()),
        }
    }
}

impl FromStr for Action {
    type Err = StudyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || StudyError::MalformedAction(s.to_owned());
        let mut parts = s.split(':');
        let action = match (parts.next(), parts.next()) {
            (Some("consent"), None) => Action::ToggleConsent,
            (Some("lottery"), None) => Action::ToggleLottery,
            (Some("rate"), Some(survey)) => {
                let survey = survey.parse()?;
                let item: u8 = parts
                    .next()
                    .and_then(|n| n.parse().ok())
                    .filter(|n| (1..=SURVEY_ITEMS).contains(n))
                    .ok_or_else(malformed)?;
                let value: u8 = parts
                    .next()
                    .and_then(|n| n.parse().ok())
                    .ok_or_else(malformed)?;
                Action::Rate {
                    survey,
                    item,
                    value,
                }
            }
            (Some("topic"), Some(index)) => {
                Action::SelectTopic(index.parse().map_err(|_| malformed())?)
            }
            (Some("disclose"), Some(key)) => Action::ToggleDisclosure(key.parse()?),
            (Some("edit"), Some(field)) => Action::Edit(field.parse()?),
            (Some("continue"), Some(stage)) => Action::Continue(stage.parse()?),
            (Some("practice"), Some("open")) => Action::Practice(PracticeAction::Open),
            (Some("practice"), Some("close")) => Action::Practice(PracticeAction::Close),
            (Some("practice"), Some("generate")) => Action::Practice(PracticeAction::Generate),
            _ => return Err(malformed()),
        };
        match parts.next() {
            None => Ok(action),
            Some(_) => Err(malformed()),
        }
    }
}
