use std::sync::Arc;

use teloxide::{
    payloads::SendMessageSetters,
    prelude::Requester,
    types::{Message, ParseMode},
    utils::command::BotCommands,
    Bot,
};
use tracing::instrument;

use crate::{
    group::AssignGroup,
    render::progress as progress_bar,
    runner::{present, send_long_text},
    session::Session,
    state::StudyState,
    HandlerResult, UserDialogue,
};

#[derive(Debug, Clone, BotCommands)]
#[command(rename_rule = "lowercase")]
pub enum Command {
    #[command(description = "display help.")]
    Help,
    #[command(description = "start a new study session.")]
    Start,
    #[command(description = "discard your session.")]
    Cancel,
    #[command(description = "show where you are in the study.")]
    Progress,
    #[command(description = "show a copy of your answers.")]
    MyData,
}

pub(crate) async fn help(bot: Bot, msg: Message) -> HandlerResult {
    bot.send_message(msg.chat.id, Command::descriptions().to_string())
        .await?;
    Ok(())
}

/// Starts over with a fresh session and a fresh group draw. Screens from an
/// earlier session stop taking presses once the new one is saved.
#[instrument(level = "info", skip_all)]
pub(crate) async fn start<Assigner: AssignGroup>(
    bot: Bot,
    msg: Message,
    dialogue: UserDialogue,
    assigner: Arc<Assigner>,
) -> HandlerResult {
    let session = Session::start(assigner.as_ref());
    log::info!(
        "session {} started in the {} group",
        session.id(),
        session.group()
    );
    present(&bot, &dialogue, msg.chat.id, session, None).await
}

#[instrument(level = "info", skip_all)]
pub(crate) async fn cancel(bot: Bot, dialogue: UserDialogue, msg: Message) -> HandlerResult {
    if let Some(session) = dialogue.get().await?.as_ref().and_then(StudyState::session) {
        log::info!("session {} discarded at {}", session.id(), session.stage());
    }
    dialogue.exit().await?;
    bot.send_message(
        msg.chat.id,
        "Your session and answers were discarded. Send /start to begin again.",
    )
    .await?;
    Ok(())
}

pub(crate) async fn progress(bot: Bot, dialogue: UserDialogue, msg: Message) -> HandlerResult {
    let text = match dialogue.get().await?.as_ref().and_then(StudyState::session) {
        Some(session) => format!(
            "You are at <b>{}</b>.\n{}",
            session.stage(),
            progress_bar(session.stage())
        ),
        None => "No study in progress. Send /start to begin.".to_owned(),
    };
    bot.send_message(msg.chat.id, text)
        .parse_mode(ParseMode::Html)
        .await?;
    Ok(())
}

/// Full answers can run past one message, so the summary may arrive in parts.
pub(crate) async fn my_data(bot: Bot, dialogue: UserDialogue, msg: Message) -> HandlerResult {
    let text = match dialogue.get().await?.as_ref().and_then(StudyState::session) {
        Some(session) => session.to_string(),
        None => "No study in progress, so there is nothing to show.".to_owned(),
    };
    send_long_text(&bot, msg.chat.id, &text).await
}
