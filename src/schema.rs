use std::error::Error;

use teloxide::{
    dispatching::{
        dialogue::{self, InMemStorage},
        DpHandlerDescription, UpdateFilterExt, UpdateHandler,
    },
    dptree::{self, Handler},
    prelude::{DependencyMap, Requester},
    types::{Message, Update},
    Bot,
};
use tracing::instrument;

use crate::{
    commands::{cancel, help, my_data, progress, start, Command},
    group::AssignGroup,
    runner,
    state::StudyState,
    HandlerResult,
};

/// Dispatch tree for the study. `Assigner` is looked up from the
/// dispatcher's dependencies as `Arc<Assigner>`.
pub fn schema<Assigner: AssignGroup>() -> UpdateHandler<Box<dyn Error + Send + Sync + 'static>> {
    use dptree::case;

    let command_handler = teloxide::filter_command::<Command, _>()
        .branch(case![Command::Help].endpoint(help))
        .branch(case![Command::Start].endpoint(start::<Assigner>))
        .branch(case![Command::Cancel].endpoint(cancel))
        .branch(case![Command::Progress].endpoint(progress))
        .branch(case![Command::MyData].endpoint(my_data));

    let handler = Update::filter_message()
        .branch(command_handler)
        .branch(message_scheme())
        .endpoint(invalid_state);

    dialogue::enter::<Update, InMemStorage<StudyState>, StudyState, _>()
        .branch(handler)
        .branch(callback_query_scheme())
}

#[instrument(level = "debug")]
fn message_scheme(
) -> Handler<'static, DependencyMap, Result<(), Box<dyn Error + Send + Sync + 'static>>, DpHandlerDescription>
{
    use dptree::case;
    log::debug!("Building dispatching tree for typed answers");
    Update::filter_message()
        .branch(
            case![StudyState::AwaitingText { session, field, screen }]
                .endpoint(runner::receive_text),
        )
        .branch(case![StudyState::InStudy { session, screen }].endpoint(runner::stray_text))
}

#[instrument(level = "debug")]
fn callback_query_scheme(
) -> Handler<'static, DependencyMap, Result<(), Box<dyn Error + Send + Sync + 'static>>, DpHandlerDescription>
{
    use dptree::case;
    log::debug!("Building dispatching tree for callback query");
    Update::filter_callback_query()
        .branch(case![StudyState::InStudy { session, screen }].endpoint(runner::take_action))
        .branch(
            case![StudyState::AwaitingText { session, field, screen }]
                .endpoint(runner::take_action_while_awaiting),
        )
        .endpoint(runner::expired_button)
}

#[instrument(level = "info", skip_all)]
async fn invalid_state(bot: Bot, msg: Message) -> HandlerResult {
    bot.send_message(
        msg.chat.id,
        "No study in progress. Send /start to begin, or /help to see usages.",
    )
    .await?;
    Ok(())
}
