use std::fmt;

use uuid::Uuid;

use crate::{
    action::{Action, PracticeAction},
    error::StudyError,
    form::{
        Disclosure, Field, FieldValue, Likert, PracticeState, PromptPart, SurveyAnswers,
        SurveyKind, TaskSubmission, TextField, Topic, OPEN_ITEMS, SURVEY_ITEMS,
    },
    group::{AssignGroup, Group},
    stage::Stage,
};

/// Placeholder for the generation service the practice panel would call.
const SIMULATED_GENERATION: &str = "Prompt submitted! In the real Prompty tool, this would generate 3 contrasting responses for you to compare.";

/// What a handled button press asks the transport to do next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Re-render the current screen.
    Updated,
    /// The session moved on; render the new stage.
    Advanced(Stage),
    /// Ask the participant to type a value for this field.
    AwaitText(TextField),
    /// Practice prompt went through; show this response.
    Generated(String),
}

/// One participant's pass through the study.
///
/// Lives in the chat's dialogue storage and nowhere else. The group is
/// drawn when the session is created and has no setter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    id: Uuid,
    group: Group,
    stage: Stage,
    pre_survey: SurveyAnswers,
    post_survey: SurveyAnswers,
    task: TaskSubmission,
    consent_given: bool,
    lottery_opt_in: bool,
    participant_id: Option<String>,
    practice: PracticeState,
}

impl Session {
    pub fn new(group: Group) -> Self {
        Self {
            id: Uuid::new_v4(),
            group,
            stage: Stage::default(),
            pre_survey: SurveyAnswers::default(),
            post_survey: SurveyAnswers::default(),
            task: TaskSubmission::default(),
            consent_given: false,
            lottery_opt_in: false,
            participant_id: None,
            practice: PracticeState::default(),
        }
    }

    pub fn start<A: AssignGroup + ?Sized>(assigner: &A) -> Self {
        Self::new(assigner.draw())
    }

    pub fn id(&self) -> &Uuid {
        &self.id
    }

    pub fn group(&self) -> Group {
        self.group
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn survey(&self, kind: SurveyKind) -> &SurveyAnswers {
        match kind {
            SurveyKind::Pre => &self.pre_survey,
            SurveyKind::Post => &self.post_survey,
        }
    }

    pub fn task(&self) -> &TaskSubmission {
        &self.task
    }

    pub fn consent_given(&self) -> bool {
        self.consent_given
    }

    pub fn lottery_opt_in(&self) -> bool {
        self.lottery_opt_in
    }

    pub fn participant_id(&self) -> Option<&str> {
        self.participant_id.as_deref()
    }

    pub fn practice(&self) -> &PracticeState {
        &self.practice
    }

    /// Whether the current screen's continue button is live.
    pub fn can_advance(&self) -> bool {
        match self.stage {
            stage if stage.is_terminal() => false,
            Stage::Consent => self.consent_given,
            Stage::Module => !self.practice.open,
            _ => true,
        }
    }

    /// Moves one stage forward. On error the stage is unchanged.
    pub fn advance(&mut self) -> Result<Stage, StudyError> {
        match self.stage {
            Stage::Consent if !self.consent_given => return Err(StudyError::ConsentRequired),
            Stage::Module if self.practice.open => return Err(StudyError::PracticeOpen),
            _ => {}
        }
        let next = self.stage.next().ok_or(StudyError::AlreadyComplete)?;
        self.stage = next;
        Ok(next)
    }

    /// Form state store: last write wins.
    ///
    /// The only checks are the ones an input widget would enforce: the value
    /// kind must match the field and ratings must be on the 1–5 scale.
    pub fn set(&mut self, field: Field, value: FieldValue) -> Result<(), StudyError> {
        match (field, value) {
            (Field::Consent, FieldValue::Flag(flag)) => self.consent_given = flag,
            (Field::LotteryOptIn, FieldValue::Flag(flag)) => self.lottery_opt_in = flag,
            (Field::Disclosure(d), FieldValue::Flag(flag)) => self.task.set_disclosed(d, flag),
            (Field::Rating(kind, item), FieldValue::Rating(value)) => {
                let rating = Likert::new(value)?;
                self.survey_mut(kind).set_rating(item, rating)?;
            }
            (Field::Topic, FieldValue::Choice(index)) => self.task.topic = Topic::new(index)?,
            (Field::Text(text_field), FieldValue::Text(text)) => self.set_text(text_field, text)?,
            (field, value) => {
                return Err(StudyError::FieldKind {
                    field: field.to_string(),
                    got: value.kind(),
                })
            }
        }
        Ok(())
    }

    /// Handles one button press from the screen of `action.stage()`.
    pub fn apply(&mut self, action: Action) -> Result<Outcome, StudyError> {
        if action.stage() != self.stage {
            return Err(StudyError::StaleScreen {
                current: self.stage,
            });
        }

        match action {
            Action::ToggleConsent => {
                self.set(Field::Consent, FieldValue::Flag(!self.consent_given))?
            }
            Action::Rate {
                survey,
                item,
                value,
            } => self.set(Field::Rating(survey, item), FieldValue::Rating(value))?,
            Action::SelectTopic(index) => self.set(Field::Topic, FieldValue::Choice(index))?,
            Action::ToggleDisclosure(d) => self.set(
                Field::Disclosure(d),
                FieldValue::Flag(!self.task.disclosed(d)),
            )?,
            Action::ToggleLottery => {
                self.set(Field::LotteryOptIn, FieldValue::Flag(!self.lottery_opt_in))?
            }
            Action::Edit(field) => {
                self.check_editable(field)?;
                return Ok(Outcome::AwaitText(field));
            }
            Action::Practice(practice) => return self.apply_practice(practice),
            Action::Continue(_) => return self.advance().map(Outcome::Advanced),
        }
        Ok(Outcome::Updated)
    }

    /// Stores typed text, provided the field is still on screen.
    pub fn submit_text(&mut self, field: TextField, text: String) -> Result<(), StudyError> {
        if field.stage() != self.stage {
            return Err(StudyError::StaleScreen {
                current: self.stage,
            });
        }
        self.check_editable(field)?;
        self.set(field.into(), FieldValue::Text(text))
    }

    fn check_editable(&self, field: TextField) -> Result<(), StudyError> {
        match field {
            TextField::Practice(_) => {
                self.require_practice()?;
                if !self.practice.open {
                    return Err(StudyError::PracticeUnavailable);
                }
            }
            TextField::ParticipantId if !self.lottery_opt_in => {
                return Err(StudyError::LotteryNotJoined)
            }
            _ => {}
        }
        Ok(())
    }

    fn apply_practice(&mut self, action: PracticeAction) -> Result<Outcome, StudyError> {
        self.require_practice()?;
        match action {
            PracticeAction::Open => self.practice.open = true,
            PracticeAction::Close => self.practice.open = false,
            PracticeAction::Generate => {
                if !self.practice.open {
                    return Err(StudyError::PracticeUnavailable);
                }
                if !self.practice.can_generate() {
                    return Err(if self.practice.tries_left == 0 {
                        StudyError::PracticeExhausted
                    } else {
                        StudyError::PracticeIncomplete
                    });
                }
                self.practice.tries_left -= 1;
                return Ok(Outcome::Generated(simulate_generation(&self.practice)));
            }
        }
        Ok(Outcome::Updated)
    }

    fn require_practice(&self) -> Result<(), StudyError> {
        match self.group {
            Group::Treatment => Ok(()),
            Group::Control => Err(StudyError::PracticeUnavailable),
        }
    }

    fn set_text(&mut self, field: TextField, text: String) -> Result<(), StudyError> {
        match field {
            TextField::Open(kind, item) => self.survey_mut(kind).set_open(item, text)?,
            TextField::Prompts => self.task.prompts = text,
            TextField::Explanation => self.task.explanation = text,
            TextField::Practice(part) => self.practice.set_part(part, text),
            TextField::ParticipantId => self.participant_id = Some(text),
        }
        Ok(())
    }

    fn survey_mut(&mut self, kind: SurveyKind) -> &mut SurveyAnswers {
        match kind {
            SurveyKind::Pre => &mut self.pre_survey,
            SurveyKind::Post => &mut self.post_survey,
        }
    }
}

fn simulate_generation(practice: &PracticeState) -> String {
    let mut text = String::from(SIMULATED_GENERATION);
    for part in PromptPart::ALL {
        text.push_str(&format!("\n{}: {}", part.label(), practice.part(part).trim()));
    }
    text.push_str(&format!("\nTries left: {}", practice.tries_left));
    text
}

fn write_survey(f: &mut fmt::Formatter<'_>, title: &str, answers: &SurveyAnswers) -> fmt::Result {
    writeln!(
        f,
        "{title} ({} of {} rated)",
        answers.answered_ratings(),
        SURVEY_ITEMS
    )?;
    for item in 1..=SURVEY_ITEMS {
        match answers.rating(item) {
            Some(rating) if rating.is_answered() => writeln!(f, "  Q{item}: {}", rating.value())?,
            _ => writeln!(f, "  Q{item}: (unanswered)")?,
        }
    }
    for item in 1..=OPEN_ITEMS {
        writeln!(f, "  Open {item}: {}", answers.open(item).unwrap_or_default())?;
    }
    Ok(())
}

/// Plain-text copy of the participant's own answers.
impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Stage: {}", self.stage)?;
        write_survey(f, "Pre-survey", &self.pre_survey)?;
        writeln!(f, "Writing task")?;
        writeln!(f, "  Topic: {}", self.task.topic.title())?;
        writeln!(f, "  Prompts: {}", self.task.prompts)?;
        writeln!(
            f,
            "  Explanation ({} words): {}",
            self.task.word_count(),
            self.task.explanation
        )?;
        for d in Disclosure::ALL {
            let mark = if self.task.disclosed(d) { 'x' } else { ' ' };
            writeln!(f, "  [{mark}] {}", d.label())?;
        }
        write_survey(f, "Post-survey", &self.post_survey)?;
        if self.lottery_opt_in {
            writeln!(
                f,
                "Lottery participant number: {}",
                self.participant_id().unwrap_or("(not entered)")
            )?;
        }
        Ok(())
    }
}
