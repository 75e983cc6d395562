use std::{fmt, str::FromStr};

use crate::{content, error::StudyError, stage::Stage};

pub const SURVEY_ITEMS: u8 = 5;
pub const OPEN_ITEMS: u8 = 3;
pub const PRACTICE_TRIES: u8 = 3;

/// Agreement on a 1–5 scale. Zero means the participant has not answered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Likert(u8);

impl Likert {
    pub const UNANSWERED: Likert = Likert(0);

    pub fn new(value: u8) -> Result<Self, StudyError> {
        match value {
            1..=5 => Ok(Self(value)),
            other => Err(StudyError::InvalidLikert(other)),
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn is_answered(self) -> bool {
        self.0 != 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurveyKind {
    Pre,
    Post,
}

impl SurveyKind {
    pub fn key(self) -> &'static str {
        match self {
            SurveyKind::Pre => "pre",
            SurveyKind::Post => "post",
        }
    }

    pub fn stage(self) -> Stage {
        match self {
            SurveyKind::Pre => Stage::PreSurvey,
            SurveyKind::Post => Stage::PostSurvey,
        }
    }

    pub fn statement(self, item: u8) -> Option<&'static str> {
        let statements = match self {
            SurveyKind::Pre => &content::PRE_STATEMENTS,
            SurveyKind::Post => &content::POST_STATEMENTS,
        };
        statements.get(usize::from(item).checked_sub(1)?).copied()
    }

    pub fn open_prompt(self, item: u8) -> Option<&'static str> {
        let prompts = match self {
            SurveyKind::Pre => &content::PRE_OPEN,
            SurveyKind::Post => &content::POST_OPEN,
        };
        prompts.get(usize::from(item).checked_sub(1)?).copied()
    }
}

impl FromStr for SurveyKind {
    type Err = StudyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pre" => Ok(SurveyKind::Pre),
            "post" => Ok(SurveyKind::Post),
            other => Err(StudyError::MalformedAction(other.to_owned())),
        }
    }
}

/// Answers to one questionnaire: five ratings and three free-text replies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SurveyAnswers {
    ratings: [Likert; SURVEY_ITEMS as usize],
    open: [String; OPEN_ITEMS as usize],
}

impl SurveyAnswers {
    /// `item` is 1-based, matching the numbering shown to participants.
    pub fn rating(&self, item: u8) -> Option<Likert> {
        self.ratings.get(usize::from(item).checked_sub(1)?).copied()
    }

    pub fn open(&self, item: u8) -> Option<&str> {
        self.open
            .get(usize::from(item).checked_sub(1)?)
            .map(String::as_str)
    }

    pub fn answered_ratings(&self) -> usize {
        self.ratings.iter().filter(|r| r.is_answered()).count()
    }

    pub(crate) fn set_rating(&mut self, item: u8, rating: Likert) -> Result<(), StudyError> {
        let slot = usize::from(item)
            .checked_sub(1)
            .and_then(|idx| self.ratings.get_mut(idx))
            .ok_or(StudyError::UnknownItem(item))?;
        *slot = rating;
        Ok(())
    }

    pub(crate) fn set_open(&mut self, item: u8, text: String) -> Result<(), StudyError> {
        let slot = usize::from(item)
            .checked_sub(1)
            .and_then(|idx| self.open.get_mut(idx))
            .ok_or(StudyError::UnknownItem(item))?;
        *slot = text;
        Ok(())
    }
}

/// Index into the fixed list of writing topics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Topic(usize);

impl Topic {
    pub fn new(index: usize) -> Result<Self, StudyError> {
        if index < content::TOPICS.len() {
            Ok(Self(index))
        } else {
            Err(StudyError::UnknownTopic(index))
        }
    }

    pub fn all() -> impl Iterator<Item = Topic> {
        (0..content::TOPICS.len()).map(Topic)
    }

    pub fn index(self) -> usize {
        self.0
    }

    pub fn title(self) -> &'static str {
        content::TOPICS[self.0]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Disclosure {
    UsedAi,
    EditedAi,
    Verified,
    Cited,
}

impl Disclosure {
    pub const ALL: [Disclosure; 4] = [
        Disclosure::UsedAi,
        Disclosure::EditedAi,
        Disclosure::Verified,
        Disclosure::Cited,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Disclosure::UsedAi => "used_ai",
            Disclosure::EditedAi => "edited_ai",
            Disclosure::Verified => "verified",
            Disclosure::Cited => "cited",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Disclosure::UsedAi => "I used AI tools for brainstorming or drafting",
            Disclosure::EditedAi => "I edited and rewrote AI text in my own words",
            Disclosure::Verified => "I verified AI information with another source",
            Disclosure::Cited => "I cited or acknowledged AI assistance",
        }
    }
}

impl FromStr for Disclosure {
    type Err = StudyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Disclosure::ALL
            .into_iter()
            .find(|d| d.key() == s)
            .ok_or_else(|| StudyError::MalformedAction(s.to_owned()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskSubmission {
    pub topic: Topic,
    pub prompts: String,
    pub explanation: String,
    pub used_ai: bool,
    pub edited_ai: bool,
    pub verified: bool,
    pub cited: bool,
}

impl TaskSubmission {
    pub fn disclosed(&self, disclosure: Disclosure) -> bool {
        match disclosure {
            Disclosure::UsedAi => self.used_ai,
            Disclosure::EditedAi => self.edited_ai,
            Disclosure::Verified => self.verified,
            Disclosure::Cited => self.cited,
        }
    }

    pub(crate) fn set_disclosed(&mut self, disclosure: Disclosure, value: bool) {
        let slot = match disclosure {
            Disclosure::UsedAi => &mut self.used_ai,
            Disclosure::EditedAi => &mut self.edited_ai,
            Disclosure::Verified => &mut self.verified,
            Disclosure::Cited => &mut self.cited,
        };
        *slot = value;
    }

    pub fn word_count(&self) -> usize {
        self.explanation.split_whitespace().count()
    }
}

/// Role-Context-Task components of a practice prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PromptPart {
    Role,
    Context,
    Task,
}

impl PromptPart {
    pub const ALL: [PromptPart; 3] = [PromptPart::Role, PromptPart::Context, PromptPart::Task];

    pub fn key(self) -> &'static str {
        match self {
            PromptPart::Role => "role",
            PromptPart::Context => "context",
            PromptPart::Task => "task",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PromptPart::Role => "Role",
            PromptPart::Context => "Context",
            PromptPart::Task => "Task",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            PromptPart::Role => "e.g., You are a teacher...",
            PromptPart::Context => "e.g., Students are learning about climate change...",
            PromptPart::Task => "e.g., Create an engaging lesson plan...",
        }
    }
}

/// Interactive Role-Context-Task practice offered in the treatment module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PracticeState {
    pub open: bool,
    pub tries_left: u8,
    pub role: String,
    pub context: String,
    pub task: String,
}

impl Default for PracticeState {
    fn default() -> Self {
        Self {
            open: false,
            tries_left: PRACTICE_TRIES,
            role: String::new(),
            context: String::new(),
            task: String::new(),
        }
    }
}

impl PracticeState {
    pub fn part(&self, part: PromptPart) -> &str {
        match part {
            PromptPart::Role => &self.role,
            PromptPart::Context => &self.context,
            PromptPart::Task => &self.task,
        }
    }

    pub(crate) fn set_part(&mut self, part: PromptPart, text: String) {
        let slot = match part {
            PromptPart::Role => &mut self.role,
            PromptPart::Context => &mut self.context,
            PromptPart::Task => &mut self.task,
        };
        *slot = text;
    }

    pub fn is_filled(&self) -> bool {
        PromptPart::ALL
            .into_iter()
            .all(|part| !self.part(part).trim().is_empty())
    }

    pub fn can_generate(&self) -> bool {
        self.tries_left > 0 && self.is_filled()
    }
}

/// Inputs filled in by typing a message rather than pressing a button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextField {
    Open(SurveyKind, u8),
    Prompts,
    Explanation,
    Practice(PromptPart),
    ParticipantId,
}

impl TextField {
    pub fn stage(self) -> Stage {
        match self {
            TextField::Open(kind, _) => kind.stage(),
            TextField::Prompts | TextField::Explanation => Stage::Task,
            TextField::Practice(_) => Stage::Module,
            TextField::ParticipantId => Stage::Complete,
        }
    }

    /// Question shown when the participant is asked to type this field.
    pub fn prompt(self) -> &'static str {
        match self {
            TextField::Open(kind, item) => kind.open_prompt(item).unwrap_or("Your answer"),
            TextField::Prompts => "Prompt(s) used (if any). Paste any prompts you used with AI tools.",
            TextField::Explanation => "Your explanation (200–250 words).",
            TextField::Practice(PromptPart::Role) => "Role: who should the AI be?",
            TextField::Practice(PromptPart::Context) => "Context: what's the situation?",
            TextField::Practice(PromptPart::Task) => "Task: what should the AI produce?",
            TextField::ParticipantId => "Participant Number (from your 950 ID), e.g. 950-12345.",
        }
    }
}

impl fmt::Display for TextField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextField::Open(kind, item) => write!(f, "{}.open{}", kind.key(), item),
            TextField::Prompts => f.write_str("prompts"),
            TextField::Explanation => f.write_str("explanation"),
            TextField::Practice(part) => write!(f, "practice.{}", part.key()),
            TextField::ParticipantId => f.write_str("participant"),
        }
    }
}

impl FromStr for TextField {
    type Err = StudyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || StudyError::MalformedAction(s.to_owned());
        match s {
            "prompts" => return Ok(TextField::Prompts),
            "explanation" => return Ok(TextField::Explanation),
            "participant" => return Ok(TextField::ParticipantId),
            _ => {}
        }
        let (head, tail) = s.split_once('.').ok_or_else(malformed)?;
        if head == "practice" {
            return PromptPart::ALL
                .into_iter()
                .find(|part| part.key() == tail)
                .map(TextField::Practice)
                .ok_or_else(malformed);
        }
        let kind: SurveyKind = head.parse()?;
        let item: u8 = tail
            .strip_prefix("open")
            .and_then(|n| n.parse().ok())
            .filter(|n| (1..=OPEN_ITEMS).contains(n))
            .ok_or_else(malformed)?;
        Ok(TextField::Open(kind, item))
    }
}

/// Address of one input in the form state store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Consent,
    Rating(SurveyKind, u8),
    Text(TextField),
    Topic,
    Disclosure(Disclosure),
    LotteryOptIn,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Consent => f.write_str("consent"),
            Field::Rating(kind, item) => write!(f, "{}.q{}", kind.key(), item),
            Field::Text(text) => write!(f, "{text}"),
            Field::Topic => f.write_str("topic"),
            Field::Disclosure(d) => f.write_str(d.key()),
            Field::LotteryOptIn => f.write_str("lottery"),
        }
    }
}

impl From<TextField> for Field {
    fn from(value: TextField) -> Self {
        Field::Text(value)
    }
}

/// What an input widget hands back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Flag(bool),
    Rating(u8),
    Text(String),
    Choice(usize),
}

impl FieldValue {
    pub fn kind(&self) -> &'static str {
        match self {
            FieldValue::Flag(_) => "a checkbox value",
            FieldValue::Rating(_) => "a rating",
            FieldValue::Text(_) => "text",
            FieldValue::Choice(_) => "a choice",
        }
    }
}
