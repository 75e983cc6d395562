use promptstudybot::action::{Action, PracticeAction};
use promptstudybot::error::StudyError;
use promptstudybot::form::{Disclosure, PromptPart, SurveyKind, TextField};
use promptstudybot::group::{FixedAssigner, Group};
use promptstudybot::render::{render, split_message, MESSAGE_LIMIT};
use promptstudybot::session::{Outcome, Session};
use promptstudybot::stage::Stage;

/// Presses a button the way the bot does: through its callback data.
fn press(session: &mut Session, action: Action) -> Result<Outcome, StudyError> {
    let data = action.to_string();
    session.apply(data.parse()?)
}

fn fill_survey(session: &mut Session, kind: SurveyKind) {
    for item in 1..=5 {
        press(
            session,
            Action::Rate {
                survey: kind,
                item,
                value: item,
            },
        )
        .unwrap();
    }
    press(session, Action::Edit(TextField::Open(kind, 1))).unwrap();
    session
        .submit_text(TextField::Open(kind, 1), "For homework help".into())
        .unwrap();
}

#[test]
fn treatment_participant_completes_the_study() {
    let mut session = Session::start(&FixedAssigner(Group::Treatment));

    assert_eq!(
        press(&mut session, Action::Continue(Stage::Consent)),
        Err(StudyError::ConsentRequired)
    );
    press(&mut session, Action::ToggleConsent).unwrap();
    press(&mut session, Action::Continue(Stage::Consent)).unwrap();

    fill_survey(&mut session, SurveyKind::Pre);
    press(&mut session, Action::Continue(Stage::PreSurvey)).unwrap();

    assert!(render(&session).text.contains("Prompt Engineering Mini-Course"));
    press(&mut session, Action::Practice(PracticeAction::Open)).unwrap();
    for part in PromptPart::ALL {
        press(&mut session, Action::Edit(TextField::Practice(part))).unwrap();
        session
            .submit_text(TextField::Practice(part), format!("{} text", part.label()))
            .unwrap();
    }
    let generated = press(&mut session, Action::Practice(PracticeAction::Generate)).unwrap();
    assert!(matches!(generated, Outcome::Generated(_)));
    assert_eq!(session.practice().tries_left, 2);
    press(&mut session, Action::Practice(PracticeAction::Close)).unwrap();
    press(&mut session, Action::Continue(Stage::Module)).unwrap();

    press(&mut session, Action::SelectTopic(1)).unwrap();
    press(&mut session, Action::ToggleDisclosure(Disclosure::UsedAi)).unwrap();
    press(&mut session, Action::ToggleDisclosure(Disclosure::Cited)).unwrap();
    session
        .submit_text(TextField::Explanation, "Slime molds spread and retract.".into())
        .unwrap();
    press(&mut session, Action::Continue(Stage::Task)).unwrap();

    fill_survey(&mut session, SurveyKind::Post);
    assert_eq!(
        press(&mut session, Action::Continue(Stage::PostSurvey)),
        Ok(Outcome::Advanced(Stage::Complete))
    );

    press(&mut session, Action::ToggleLottery).unwrap();
    session
        .submit_text(TextField::ParticipantId, "950-12345".into())
        .unwrap();

    assert_eq!(session.stage(), Stage::Complete);
    assert_eq!(session.group(), Group::Treatment);
    assert_eq!(
        press(&mut session, Action::Continue(Stage::Complete)),
        Err(StudyError::AlreadyComplete)
    );

    let summary = session.to_string();
    assert!(summary.contains("How do slime molds solve mazes?"));
    assert!(summary.contains("[x] I used AI tools for brainstorming or drafting"));
    assert!(summary.contains("[ ] I verified AI information with another source"));
    assert!(summary.contains("Lottery participant number: 950-12345"));
}

#[test]
fn control_participant_sees_digital_literacy_and_no_practice() {
    let mut session = Session::start(&FixedAssigner(Group::Control));
    press(&mut session, Action::ToggleConsent).unwrap();
    press(&mut session, Action::Continue(Stage::Consent)).unwrap();
    press(&mut session, Action::Continue(Stage::PreSurvey)).unwrap();

    let screen = render(&session);
    assert!(screen.text.contains("Digital Literacy Module"));
    assert_eq!(
        press(&mut session, Action::Practice(PracticeAction::Open)),
        Err(StudyError::PracticeUnavailable)
    );
    assert_eq!(
        press(&mut session, Action::Continue(Stage::Module)),
        Ok(Outcome::Advanced(Stage::Task))
    );
}

#[test]
fn old_screens_cannot_skip_or_rewind() {
    let mut session = Session::start(&FixedAssigner(Group::Control));
    press(&mut session, Action::ToggleConsent).unwrap();
    press(&mut session, Action::Continue(Stage::Consent)).unwrap();

    // Continue from a screen the participant has not reached yet.
    assert_eq!(
        press(&mut session, Action::Continue(Stage::Task)),
        Err(StudyError::StaleScreen {
            current: Stage::PreSurvey
        })
    );
    // Consent checkbox from the first message.
    assert_eq!(
        press(&mut session, Action::ToggleConsent),
        Err(StudyError::StaleScreen {
            current: Stage::PreSurvey
        })
    );
    assert!(session.consent_given());
    assert_eq!(session.stage(), Stage::PreSurvey);
}

#[test]
fn long_answers_survive_screens_and_summary() {
    let mut session = Session::start(&FixedAssigner(Group::Control));
    press(&mut session, Action::ToggleConsent).unwrap();
    for stage in [Stage::Consent, Stage::PreSurvey, Stage::Module] {
        press(&mut session, Action::Continue(stage)).unwrap();
    }

    let prompts = "Explain neutron star glitches step by step. ".repeat(100);
    let explanation = "neutron ".repeat(260);
    session
        .submit_text(TextField::Prompts, prompts.clone())
        .unwrap();
    session
        .submit_text(TextField::Explanation, explanation.clone())
        .unwrap();

    assert!(render(&session).text.chars().count() < MESSAGE_LIMIT);
    assert_eq!(session.task().word_count(), 260);

    let summary = session.to_string();
    assert!(summary.chars().count() > MESSAGE_LIMIT);
    let parts = split_message(&summary, MESSAGE_LIMIT);
    assert!(parts.len() > 1);
    assert!(parts.iter().all(|p| p.chars().count() <= MESSAGE_LIMIT));
    assert_eq!(parts.concat(), summary);
    assert!(summary.contains(&prompts));
    assert!(summary.contains(&explanation));
}
