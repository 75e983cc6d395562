use std::error::Error;

use teloxide::{
    dispatching::dialogue::GetChatId,
    payloads::{AnswerCallbackQuerySetters, EditMessageTextSetters, SendMessageSetters},
    prelude::Requester,
    types::{CallbackQuery, ChatId, Message, MessageId, ParseMode},
    utils::html,
    ApiError, Bot, RequestError,
};
use tracing::instrument;

use crate::{
    action::Action,
    form::TextField,
    render::{render, split_message, MESSAGE_LIMIT},
    session::{Outcome, Session},
    state::{is_current_screen, StudyState},
    HandlerResult, UserDialogue,
};

/// Sends the session's current screen as a new message.
async fn send_screen(
    bot: &Bot,
    chat_id: ChatId,
    session: &Session,
) -> Result<MessageId, Box<dyn Error + Send + Sync>> {
    let screen = render(session);
    let sent = bot
        .send_message(chat_id, screen.text)
        .parse_mode(ParseMode::Html)
        .reply_markup(screen.keyboard)
        .await?;
    Ok(sent.id)
}

/// Sends plain text, split over as many messages as Telegram needs.
pub(crate) async fn send_long_text(bot: &Bot, chat_id: ChatId, text: &str) -> HandlerResult {
    for part in split_message(text, MESSAGE_LIMIT) {
        bot.send_message(chat_id, part).await?;
    }
    Ok(())
}

/// Saves the session, then posts its screen as a new message. The buttons
/// on `previous` are removed so only the new screen takes presses.
pub(crate) async fn present(
    bot: &Bot,
    dialogue: &UserDialogue,
    chat_id: ChatId,
    session: Session,
    previous: Option<MessageId>,
) -> HandlerResult {
    dialogue
        .update(StudyState::InStudy {
            session: session.clone(),
            screen: previous,
        })
        .await?;

    let screen = send_screen(bot, chat_id, &session).await?;
    dialogue
        .update(StudyState::InStudy {
            session,
            screen: Some(screen),
        })
        .await?;

    if let Some(previous) = previous.filter(|&id| id != screen) {
        if let Err(e) = bot.edit_message_reply_markup(chat_id, previous).await {
            log::debug!("could not retire screen {}: {}", previous.0, e);
        }
    }
    Ok(())
}

/// Saves the session, then redraws its screen in place.
async fn redraw(
    bot: &Bot,
    dialogue: &UserDialogue,
    chat_id: ChatId,
    session: Session,
    screen: MessageId,
) -> HandlerResult {
    let rendered = render(&session);
    dialogue
        .update(StudyState::InStudy {
            session,
            screen: Some(screen),
        })
        .await?;

    match bot
        .edit_message_text(chat_id, screen, rendered.text)
        .parse_mode(ParseMode::Html)
        .reply_markup(rendered.keyboard)
        .await
    {
        Ok(_) | Err(RequestError::Api(ApiError::MessageNotModified)) => Ok(()),
        Err(e) => Err(e.into()),
    }
}

#[instrument(level = "info", skip_all, fields(session = %session.id()))]
pub(crate) async fn take_action(
    bot: Bot,
    dialogue: UserDialogue,
    q: CallbackQuery,
    (session, screen): (Session, Option<MessageId>),
) -> HandlerResult {
    handle_action(bot, dialogue, q, session, screen).await
}

/// A button pressed instead of typing the requested text drops the request.
#[instrument(level = "info", skip_all, fields(session = %session.id(), field = %field))]
pub(crate) async fn take_action_while_awaiting(
    bot: Bot,
    dialogue: UserDialogue,
    q: CallbackQuery,
    (session, field, screen): (Session, TextField, Option<MessageId>),
) -> HandlerResult {
    log::debug!("session {}: abandoning input for {}", session.id(), field);
    dialogue
        .update(StudyState::InStudy {
            session: session.clone(),
            screen,
        })
        .await?;
    handle_action(bot, dialogue, q, session, screen).await
}

async fn handle_action(
    bot: Bot,
    dialogue: UserDialogue,
    q: CallbackQuery,
    mut session: Session,
    screen: Option<MessageId>,
) -> HandlerResult {
    let (Some(data), Some(chat_id)) = (q.data.as_deref(), q.chat_id()) else {
        bot.answer_callback_query(&q.id).await?;
        return Ok(());
    };
    let pressed = q.message.as_ref().map(|m| m.id());

    if !is_current_screen(screen, pressed) {
        log::info!("session {}: press on an old screen ignored", session.id());
        bot.answer_callback_query(&q.id)
            .text("This screen is out of date. Please use the newest message.")
            .show_alert(true)
            .await?;
        return Ok(());
    }

    let action = match data.parse::<Action>() {
        Ok(action) => action,
        Err(e) => {
            log::warn!("session {}: {}", session.id(), e);
            bot.answer_callback_query(&q.id).text(e.to_string()).await?;
            return Ok(());
        }
    };

    let outcome = match session.apply(action) {
        Ok(outcome) => outcome,
        Err(e) => {
            log::info!("session {}: '{}' refused: {}", session.id(), action, e);
            bot.answer_callback_query(&q.id)
                .text(e.to_string())
                .show_alert(true)
                .await?;
            return Ok(());
        }
    };
    bot.answer_callback_query(&q.id).await?;

    match outcome {
        Outcome::AwaitText(field) => {
            dialogue
                .update(StudyState::AwaitingText {
                    session,
                    field,
                    screen: pressed.or(screen),
                })
                .await?;
            bot.send_message(
                chat_id,
                format!(
                    "✏️ <b>{}</b>\nSend your answer as a message.",
                    html::escape(field.prompt())
                ),
            )
            .parse_mode(ParseMode::Html)
            .await?;
            return Ok(());
        }
        Outcome::Generated(ref response) => {
            log::info!(
                "session {}: practice generation, {} tries left",
                session.id(),
                session.practice().tries_left
            );
            send_long_text(&bot, chat_id, response).await?;
        }
        Outcome::Advanced(stage) => log::info!("session {} reached {}", session.id(), stage),
        Outcome::Updated => log::debug!("session {}: '{}'", session.id(), action),
    }

    match pressed {
        Some(message_id) => redraw(&bot, &dialogue, chat_id, session, message_id).await,
        None => present(&bot, &dialogue, chat_id, session, screen).await,
    }
}

#[instrument(level = "info", skip_all, fields(session = %session.id(), field = %field))]
pub(crate) async fn receive_text(
    bot: Bot,
    dialogue: UserDialogue,
    msg: Message,
    (mut session, field, screen): (Session, TextField, Option<MessageId>),
) -> HandlerResult {
    let Some(text) = msg.text() else {
        bot.send_message(msg.chat.id, "Please send your answer as a text message.")
            .await?;
        return Ok(());
    };

    if let Err(e) = session.submit_text(field, text.trim().to_owned()) {
        log::info!("session {}: text for {} refused: {}", session.id(), field, e);
        bot.send_message(msg.chat.id, e.to_string()).await?;
    } else {
        log::debug!("session {}: stored {}", session.id(), field);
    }

    present(&bot, &dialogue, msg.chat.id, session, screen).await
}

#[instrument(level = "info", skip_all, fields(session = %session.id()))]
pub(crate) async fn stray_text(
    bot: Bot,
    dialogue: UserDialogue,
    msg: Message,
    (session, screen): (Session, Option<MessageId>),
) -> HandlerResult {
    bot.send_message(
        msg.chat.id,
        "Please use the buttons below. To type an answer, press its ✏️ button first.",
    )
    .await?;
    present(&bot, &dialogue, msg.chat.id, session, screen).await
}

#[instrument(level = "info", skip_all)]
pub(crate) async fn expired_button(bot: Bot, q: CallbackQuery) -> HandlerResult {
    bot.answer_callback_query(&q.id)
        .text("No study in progress. Send /start to begin.")
        .await?;
    Ok(())
}
