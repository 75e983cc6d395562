use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

use crate::{
    action::{Action, PracticeAction},
    form::{Disclosure, PromptPart, SurveyKind, TextField, Topic, OPEN_ITEMS, SURVEY_ITEMS},
    group::Group,
    session::Session,
    stage::Stage,
};

fn button(label: impl Into<String>, action: Action) -> InlineKeyboardButton {
    InlineKeyboardButton::callback(label, action.to_string())
}

fn checkbox(checked: bool, label: &str, action: Action) -> InlineKeyboardButton {
    let mark = if checked { "☑" } else { "☐" };
    button(format!("{mark} {label}"), action)
}

fn edit_button(label: impl AsRef<str>, field: TextField) -> InlineKeyboardButton {
    button(format!("✏️ {}", label.as_ref()), Action::Edit(field))
}

fn continue_label(stage: Stage) -> &'static str {
    match stage {
        Stage::Consent => "Begin Study",
        Stage::PreSurvey => "Continue to Module",
        Stage::Module => "Start Writing Task →",
        Stage::Task => "Continue to Post-Survey →",
        Stage::PostSurvey => "Complete Study →",
        Stage::Complete => "Done",
    }
}

pub(crate) fn likert_rows(kind: SurveyKind, session: &Session) -> Vec<Vec<InlineKeyboardButton>> {
    let answers = session.survey(kind);
    (1..=SURVEY_ITEMS)
        .map(|item| {
            let current = answers.rating(item).map(|r| r.value()).unwrap_or_default();
            (1..=5u8)
                .map(|value| {
                    let label = if value == current {
                        format!("✅{value}")
                    } else {
                        value.to_string()
                    };
                    button(
                        label,
                        Action::Rate {
                            survey: kind,
                            item,
                            value,
                        },
                    )
                })
                .collect()
        })
        .collect()
}

fn open_rows(kind: SurveyKind) -> Vec<Vec<InlineKeyboardButton>> {
    (1..=OPEN_ITEMS)
        .map(|item| {
            vec![edit_button(
                format!("Answer question {}", SURVEY_ITEMS + item),
                TextField::Open(kind, item),
            )]
        })
        .collect()
}

fn practice_rows(session: &Session) -> Vec<Vec<InlineKeyboardButton>> {
    let practice = session.practice();
    if !practice.open {
        return vec![vec![button(
            "Open Interactive Practice",
            Action::Practice(PracticeAction::Open),
        )]];
    }

    let generate = if practice.can_generate() {
        "Generate Responses (uses 1 try)"
    } else if practice.tries_left == 0 {
        "No tries remaining"
    } else {
        "Fill in Role, Context and Task to generate"
    };
    vec![
        PromptPart::ALL
            .into_iter()
            .map(|part| edit_button(part.label(), TextField::Practice(part)))
            .collect(),
        vec![button(generate, Action::Practice(PracticeAction::Generate))],
        vec![button("Close Practice", Action::Practice(PracticeAction::Close))],
    ]
}

fn task_rows(session: &Session) -> Vec<Vec<InlineKeyboardButton>> {
    let task = session.task();
    let mut rows: Vec<Vec<InlineKeyboardButton>> = Topic::all()
        .map(|topic| {
            vec![checkbox(
                topic == task.topic,
                topic.title(),
                Action::SelectTopic(topic.index()),
            )]
        })
        .collect();
    rows.push(vec![
        edit_button("Prompts used", TextField::Prompts),
        edit_button("Explanation", TextField::Explanation),
    ]);
    rows.extend(Disclosure::ALL.into_iter().map(|d| {
        vec![checkbox(
            task.disclosed(d),
            d.label(),
            Action::ToggleDisclosure(d),
        )]
    }));
    rows
}

fn complete_rows(session: &Session) -> Vec<Vec<InlineKeyboardButton>> {
    let mut rows = vec![vec![checkbox(
        session.lottery_opt_in(),
        "Yes, enter me into the GPT-5 lottery",
        Action::ToggleLottery,
    )]];
    if session.lottery_opt_in() {
        rows.push(vec![edit_button(
            "Participant Number",
            TextField::ParticipantId,
        )]);
    }
    rows
}

/// Inline keyboard for whatever screen the session is on. The continue
/// button only exists while the session can advance.
pub fn stage_keyboard(session: &Session) -> InlineKeyboardMarkup {
    let stage = session.stage();
    let mut rows = match stage {
        Stage::Consent => vec![vec![checkbox(
            session.consent_given(),
            "I am at least 14 and consent",
            Action::ToggleConsent,
        )]],
        Stage::PreSurvey | Stage::PostSurvey => {
            let kind = if stage == Stage::PreSurvey {
                SurveyKind::Pre
            } else {
                SurveyKind::Post
            };
            let mut rows = likert_rows(kind, session);
            rows.extend(open_rows(kind));
            rows
        }
        Stage::Module => match session.group() {
            Group::Treatment => practice_rows(session),
            Group::Control => Vec::new(),
        },
        Stage::Task => task_rows(session),
        Stage::Complete => complete_rows(session),
    };

    if session.can_advance() {
        rows.push(vec![button(continue_label(stage), Action::Continue(stage))]);
    }

    InlineKeyboardMarkup::new(rows)
}

#[cfg(test)]
pub(crate) fn callback_data(markup: &InlineKeyboardMarkup) -> Vec<String> {
    use teloxide::types::InlineKeyboardButtonKind;

    markup
        .inline_keyboard
        .iter()
        .flatten()
        .filter_map(|b| match &b.kind {
            InlineKeyboardButtonKind::CallbackData(data) => Some(data.clone()),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use teloxide::types::InlineKeyboardButtonKind;

    use super::*;
    use crate::form::{Field, FieldValue};

    fn consented(group: Group) -> Session {
        let mut session = Session::new(group);
        session.set(Field::Consent, FieldValue::Flag(true)).unwrap();
        session
    }

    #[test]
    fn consent_continue_follows_checkbox() {
        let mut session = Session::new(Group::Control);
        let data = callback_data(&stage_keyboard(&session));
        assert_eq!(data, vec!["consent".to_owned()]);

        session.set(Field::Consent, FieldValue::Flag(true)).unwrap();
        let data = callback_data(&stage_keyboard(&session));
        assert!(data.contains(&"continue:consent".to_owned()));
    }

    #[test]
    fn survey_has_a_row_per_statement() {
        let mut session = consented(Group::Control);
        session.advance().unwrap();
        let markup = stage_keyboard(&session);
        let likert: Vec<_> = markup.inline_keyboard.iter().take(5).collect();
        assert!(likert.iter().all(|row| row.len() == 5));
        let data = callback_data(&markup);
        assert!(data.contains(&"rate:pre:5:1".to_owned()));
        assert!(data.contains(&"edit:pre.open3".to_owned()));
        assert_eq!(data.last().map(String::as_str), Some("continue:pre"));
    }

    #[test]
    fn selected_rating_is_marked() {
        let mut session = consented(Group::Control);
        session.advance().unwrap();
        session
            .set(Field::Rating(SurveyKind::Pre, 2), FieldValue::Rating(4))
            .unwrap();
        let rows = likert_rows(SurveyKind::Pre, &session);
        assert_eq!(rows[1][3].text, "✅4");
        assert_eq!(rows[0][3].text, "4");
    }

    #[test]
    fn practice_panel_hides_continue() {
        let mut session = consented(Group::Treatment);
        session.advance().unwrap();
        session.advance().unwrap();
        let closed = callback_data(&stage_keyboard(&session));
        assert!(closed.contains(&"practice:open".to_owned()));
        assert!(closed.contains(&"continue:module".to_owned()));

        session
            .apply(Action::Practice(PracticeAction::Open))
            .unwrap();
        let open = callback_data(&stage_keyboard(&session));
        assert!(open.contains(&"edit:practice.role".to_owned()));
        assert!(open.contains(&"practice:generate".to_owned()));
        assert!(!open.iter().any(|d| d.starts_with("continue")));
    }

    fn generate_label(session: &Session) -> String {
        stage_keyboard(session)
            .inline_keyboard
            .iter()
            .flatten()
            .find(|b| {
                matches!(&b.kind, InlineKeyboardButtonKind::CallbackData(data) if data == "practice:generate")
            })
            .map(|b| b.text.clone())
            .unwrap_or_default()
    }

    #[test]
    fn generate_label_tracks_readiness() {
        let mut session = consented(Group::Treatment);
        session.advance().unwrap();
        session.advance().unwrap();
        session
            .apply(Action::Practice(PracticeAction::Open))
            .unwrap();
        assert_eq!(
            generate_label(&session),
            "Fill in Role, Context and Task to generate"
        );

        for part in PromptPart::ALL {
            session
                .submit_text(TextField::Practice(part), "filled".into())
                .unwrap();
        }
        assert_eq!(generate_label(&session), "Generate Responses (uses 1 try)");

        for _ in 0..3 {
            session
                .apply(Action::Practice(PracticeAction::Generate))
                .unwrap();
        }
        assert_eq!(generate_label(&session), "No tries remaining");
    }

    #[test]
    fn control_module_only_continues() {
        let mut session = consented(Group::Control);
        session.advance().unwrap();
        session.advance().unwrap();
        let data = callback_data(&stage_keyboard(&session));
        assert_eq!(data, vec!["continue:module".to_owned()]);
    }

    #[test]
    fn lottery_reveals_participant_field() {
        let mut session = consented(Group::Control);
        while session.advance().is_ok() {}
        let data = callback_data(&stage_keyboard(&session));
        assert_eq!(data, vec!["lottery".to_owned()]);

        session.apply(Action::ToggleLottery).unwrap();
        let data = callback_data(&stage_keyboard(&session));
        assert!(data.contains(&"edit:participant".to_owned()));
    }
}
