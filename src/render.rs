use teloxide::{types::InlineKeyboardMarkup, utils::html};

use crate::{
    content,
    form::{Disclosure, PromptPart, SurveyKind, OPEN_ITEMS, SURVEY_ITEMS},
    group::Group,
    keyboard::stage_keyboard,
    session::Session,
    stage::Stage,
};

/// A rendered stage: HTML body and the buttons under it.
#[derive(Debug, Clone)]
pub struct Screen {
    pub text: String,
    pub keyboard: InlineKeyboardMarkup,
}

/// Renders the session's current stage.
pub fn render(session: &Session) -> Screen {
    let stage = session.stage();
    let body = match stage {
        Stage::Consent => consent(session),
        Stage::PreSurvey => survey(session, SurveyKind::Pre),
        Stage::Module => module(session),
        Stage::Task => task(session),
        Stage::PostSurvey => survey(session, SurveyKind::Post),
        Stage::Complete => complete(session),
    };

    Screen {
        text: format!("<b>{}</b>\n{}\n\n{}", content::TITLE, progress(stage), body),
        keyboard: stage_keyboard(session),
    }
}

/// "Step N of 5" plus a bar of the five steps. `Complete` shows a full bar.
pub fn progress(stage: Stage) -> String {
    let step = (stage.index() + 1).min(Stage::STEPS);
    let bar: Vec<String> = Stage::ALL[..Stage::STEPS]
        .iter()
        .map(|s| {
            let dot = if s.index() <= stage.index() { '●' } else { '○' };
            format!("{dot} {}", s.label())
        })
        .collect();
    format!(
        "<i>Progress: Step {} of {}</i>\n{}",
        step,
        Stage::STEPS,
        bar.join("  ")
    )
}

/// Telegram's cap on the text of one message, in characters.
pub const MESSAGE_LIMIT: usize = 4096;

/// Typed answers are cut to this many characters on screen. The session
/// keeps the full text and `/mydata` prints it.
pub const PREVIEW_CHARS: usize = 300;

/// Escaped copy of `text`, cut to `PREVIEW_CHARS` with a trailing ellipsis.
fn preview(text: &str) -> String {
    match text.char_indices().nth(PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}…", html::escape(text[..cut].trim_end())),
        None => html::escape(text),
    }
}

fn answer_or_placeholder(text: &str) -> String {
    if text.trim().is_empty() {
        "<i>(no answer yet)</i>".to_owned()
    } else {
        preview(text)
    }
}

/// Splits `text` into pieces of at most `limit` characters, breaking between
/// lines where it can and inside a line only when the line alone is too long.
pub fn split_message(text: &str, limit: usize) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut count = 0;

    for line in text.split_inclusive('\n') {
        let len = line.chars().count();
        if count > 0 && count + len > limit {
            parts.push(std::mem::take(&mut current));
            count = 0;
        }
        if len <= limit {
            current.push_str(line);
            count += len;
            continue;
        }

        let chars: Vec<char> = line.chars().collect();
        for chunk in chars.chunks(limit.max(1)) {
            if count > 0 {
                parts.push(std::mem::take(&mut current));
            }
            current.extend(chunk);
            count = chunk.len();
        }
    }
    if !current.is_empty() {
        parts.push(current);
    }
    parts
}

fn consent(session: &Session) -> String {
    let mark = if session.consent_given() { "☑" } else { "☐" };
    format!("{}\n\n{} {}", content::CONSENT, mark, content::CONSENT_CHECKBOX)
}

fn survey(session: &Session, kind: SurveyKind) -> String {
    let answers = session.survey(kind);
    let (title, intro) = match kind {
        SurveyKind::Pre => ("Pre-Survey", content::PRE_SURVEY_INTRO),
        SurveyKind::Post => ("Post-Survey", content::POST_SURVEY_INTRO),
    };

    let mut out = format!("<b>{title}</b>\n{intro}\n");
    for item in 1..=SURVEY_ITEMS {
        let rating = match answers.rating(item) {
            Some(r) if r.is_answered() => format!("<b>{}</b>", r.value()),
            _ => "(Please select)".to_owned(),
        };
        out.push_str(&format!(
            "\n{}. {}\n   → {}",
            item,
            kind.statement(item).unwrap_or_default(),
            rating
        ));
    }
    out.push_str(&format!("\n\n<i>{}</i>\n", content::LIKERT_HINT));
    for item in 1..=OPEN_ITEMS {
        out.push_str(&format!(
            "\n{}. {}\n{}",
            SURVEY_ITEMS + item,
            kind.open_prompt(item).unwrap_or_default(),
            answer_or_placeholder(answers.open(item).unwrap_or_default())
        ));
    }
    out
}

fn module(session: &Session) -> String {
    match session.group() {
        Group::Control => format!(
            "<b>{}</b>\n{}",
            content::CONTROL_TITLE,
            content::CONTROL_MODULE
        ),
        Group::Treatment => format!(
            "<b>{}</b>\n{}\n\n{}",
            content::TREATMENT_TITLE,
            content::TREATMENT_MODULE,
            practice(session)
        ),
    }
}

fn practice(session: &Session) -> String {
    let practice = session.practice();
    if !practice.open {
        return format!(
            "{}\n\n🎓 Ready to continue! In the next section, you'll apply these principles to write your own explanation.",
            content::PRACTICE_INVITE
        );
    }

    let tries = "🅱".repeat(usize::from(practice.tries_left));
    let mut out = format!(
        "<b>Interactive Practice</b>\nTries Available: {}\n<i>{}</i>\n",
        if tries.is_empty() { "none" } else { tries.as_str() },
        content::PRACTICE_NOTE
    );
    for part in PromptPart::ALL {
        let value = practice.part(part);
        let shown = if value.trim().is_empty() {
            format!("<i>{}</i>", part.placeholder())
        } else {
            preview(value)
        };
        out.push_str(&format!("\n<b>{}:</b> {}", part.label(), shown));
    }
    if practice.tries_left == 0 {
        out.push_str(&format!("\n\n{}", content::PRACTICE_EXHAUSTED));
    }
    out
}

fn task(session: &Session) -> String {
    let task = session.task();
    let mut out = format!(
        "<b>Writing Task</b>\n{}\n\n<b>Topic:</b> {}\n\n<b>Prompt(s) used (if any):</b>\n{}\n\n<b>Your explanation (200–250 words):</b> {} words\n{}\n\n<b>AI Use Disclosure:</b>",
        content::TASK_INTRO,
        html::escape(task.topic.title()),
        answer_or_placeholder(&task.prompts),
        task.word_count(),
        answer_or_placeholder(&task.explanation),
    );
    for d in Disclosure::ALL {
        let mark = if task.disclosed(d) { "☑" } else { "☐" };
        out.push_str(&format!("\n{mark} {}", d.label()));
    }
    out
}

fn complete(session: &Session) -> String {
    let mark = if session.lottery_opt_in() { "☑" } else { "☐" };
    let mut out = format!(
        "{}\n\n{}\n{} Yes, I would like to be entered into the GPT-5 lottery",
        content::COMPLETE,
        content::LOTTERY,
        mark
    );
    if session.lottery_opt_in() {
        let number = session
            .participant_id()
            .filter(|id| !id.trim().is_empty())
            .map(preview)
            .unwrap_or_else(|| "<i>e.g., 950-12345</i>".to_owned());
        out.push_str(&format!(
            "\n\n<b>Participant Number (from your 950 ID):</b> {}\n<i>{}</i>",
            number,
            content::LOTTERY_NOTE
        ));
    }
    out.push_str(&format!("\n\n{}", content::COMPLETE_FOOTER));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        action::{Action, PracticeAction},
        form::{Field, FieldValue, TextField},
        keyboard::callback_data,
    };

    fn at_stage(group: Group, stage: Stage) -> Session {
        let mut session = Session::new(group);
        session.set(Field::Consent, FieldValue::Flag(true)).unwrap();
        while session.stage() != stage {
            session.advance().unwrap();
        }
        session
    }

    #[test]
    fn treatment_reads_prompt_engineering() {
        let screen = render(&at_stage(Group::Treatment, Stage::Module));
        assert!(screen.text.contains("Prompt Engineering Mini-Course"));
        assert!(screen.text.contains("Role-Context-Task"));
        assert!(!screen.text.contains("Digital Literacy Module"));
    }

    #[test]
    fn control_reads_digital_literacy() {
        let screen = render(&at_stage(Group::Control, Stage::Module));
        assert!(screen.text.contains("Digital Literacy Module"));
        assert!(screen.text.contains("Check sources"));
        assert!(!screen.text.contains("Prompt Engineering Mini-Course"));
    }

    #[test]
    fn consent_screen_gates_continue() {
        let mut session = Session::new(Group::Control);
        let screen = render(&session);
        assert!(screen.text.contains("☐ I am at least 14"));
        assert!(!callback_data(&screen.keyboard).contains(&"continue:consent".to_owned()));

        session.apply(Action::ToggleConsent).unwrap();
        let screen = render(&session);
        assert!(screen.text.contains("☑ I am at least 14"));
        assert!(callback_data(&screen.keyboard).contains(&"continue:consent".to_owned()));
    }

    #[test]
    fn unanswered_ratings_ask_for_selection() {
        let mut session = at_stage(Group::Control, Stage::PostSurvey);
        session
            .set(Field::Rating(SurveyKind::Post, 1), FieldValue::Rating(5))
            .unwrap();
        let text = render(&session).text;
        assert!(text.contains("I feel more confident writing effective AI prompts.\n   → <b>5</b>"));
        assert_eq!(text.matches("(Please select)").count(), 4);
    }

    #[test]
    fn progress_counts_five_steps() {
        assert!(progress(Stage::Consent).contains("Step 1 of 5"));
        assert!(progress(Stage::PostSurvey).contains("Step 5 of 5"));
        assert!(progress(Stage::Complete).contains("Step 5 of 5"));
        assert_eq!(progress(Stage::Task).matches('●').count(), 4);
    }

    #[test]
    fn participant_field_toggles_with_lottery() {
        let mut session = at_stage(Group::Treatment, Stage::Complete);
        assert!(!render(&session).text.contains("Participant Number"));

        session.apply(Action::ToggleLottery).unwrap();
        let text = render(&session).text;
        assert!(text.contains("Participant Number (from your 950 ID):</b> <i>e.g., 950-12345</i>"));

        session
            .submit_text(TextField::ParticipantId, "950-42".into())
            .unwrap();
        assert!(render(&session).text.contains("950-42"));

        session.apply(Action::ToggleLottery).unwrap();
        assert!(!render(&session).text.contains("Participant Number"));
    }

    #[test]
    fn typed_text_is_escaped() {
        let mut session = at_stage(Group::Control, Stage::Task);
        session
            .submit_text(TextField::Prompts, "<b>explain</b> & cite".into())
            .unwrap();
        let text = render(&session).text;
        assert!(text.contains("&lt;b&gt;explain&lt;/b&gt; &amp; cite"));
    }

    #[test]
    fn practice_panel_shows_tries() {
        let mut session = at_stage(Group::Treatment, Stage::Module);
        session
            .apply(Action::Practice(PracticeAction::Open))
            .unwrap();
        let text = render(&session).text;
        assert!(text.contains("Tries Available: 🅱🅱🅱"));
        assert!(text.contains("e.g., You are a teacher..."));
    }

    #[test]
    fn screens_fit_in_one_message() {
        let mut treatment = at_stage(Group::Treatment, Stage::Module);
        treatment
            .apply(Action::Practice(PracticeAction::Open))
            .unwrap();
        for session in [
            Session::new(Group::Control),
            at_stage(Group::Control, Stage::PreSurvey),
            treatment,
            at_stage(Group::Control, Stage::Task),
            at_stage(Group::Control, Stage::PostSurvey),
            at_stage(Group::Control, Stage::Complete),
        ] {
            assert!(render(&session).text.chars().count() < MESSAGE_LIMIT);
        }
    }

    #[test]
    fn long_answers_still_fit_in_one_message() {
        let long = "neutron ".repeat(600);

        let mut task = at_stage(Group::Control, Stage::Task);
        for field in [TextField::Prompts, TextField::Explanation] {
            task.submit_text(field, long.clone()).unwrap();
        }

        let mut survey = at_stage(Group::Control, Stage::PostSurvey);
        for item in 1..=OPEN_ITEMS {
            survey
                .submit_text(TextField::Open(SurveyKind::Post, item), long.clone())
                .unwrap();
        }

        let mut practice = at_stage(Group::Treatment, Stage::Module);
        practice
            .apply(Action::Practice(PracticeAction::Open))
            .unwrap();
        for part in PromptPart::ALL {
            practice
                .submit_text(TextField::Practice(part), long.clone())
                .unwrap();
        }

        let mut complete = at_stage(Group::Control, Stage::Complete);
        complete.apply(Action::ToggleLottery).unwrap();
        complete
            .submit_text(TextField::ParticipantId, long.clone())
            .unwrap();

        for session in [task, survey, practice, complete] {
            let text = render(&session).text;
            assert!(
                text.chars().count() < MESSAGE_LIMIT,
                "{} screen has {} chars",
                session.stage(),
                text.chars().count()
            );
            assert!(text.contains("neutron neutron"));
            assert!(text.contains('…'));
        }
    }

    #[test]
    fn preview_keeps_the_session_text_whole() {
        let mut session = at_stage(Group::Control, Stage::Task);
        let explanation = "x".repeat(PREVIEW_CHARS + 50);
        session
            .submit_text(TextField::Explanation, explanation.clone())
            .unwrap();
        let text = render(&session).text;
        assert!(text.contains(&format!("{}…", "x".repeat(PREVIEW_CHARS))));
        assert!(!text.contains(&explanation));
        assert_eq!(session.task().explanation, explanation);
    }

    #[test]
    fn split_message_respects_the_limit() {
        let text = format!("{}\nshort line\n{}", "a".repeat(25), "b".repeat(8));
        let parts = split_message(&text, 12);
        assert!(parts.iter().all(|p| p.chars().count() <= 12));
        assert_eq!(parts.concat(), text);
        assert_eq!(parts.len(), 5);
        assert_eq!(parts[3], "short line\n");

        assert_eq!(split_message("one\ntwo\n", 4096), vec!["one\ntwo\n"]);
        assert!(split_message("", 4096).is_empty());
    }
}
