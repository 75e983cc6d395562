use std::error::Error;
use std::sync::Arc;

use promptstudybot::commands::Command;
use promptstudybot::config::Config;
use promptstudybot::group::RandomAssigner;
use promptstudybot::logging;
use promptstudybot::schema::schema;
use promptstudybot::state::StudyState;
use teloxide::dispatching::dialogue::InMemStorage;
use teloxide::error_handlers::IgnoringErrorHandlerSafe;
use teloxide::prelude::*;
use teloxide::update_listeners::webhooks::{self, Options};
use teloxide::utils::command::BotCommands;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let config = Config::from_env()?;
    logging::init(&config.log_level)?;

    let bot = Bot::new(&config.token);
    bot.set_my_commands(Command::bot_commands()).await?;
    log::info!("Starting bot...");

    let assigner = Arc::new(config.assigner());
    if config.seed.is_some() {
        log::warn!("Group assignment is seeded; draws are reproducible.");
    }

    let mut dispatcher = Dispatcher::builder(bot.clone(), schema::<RandomAssigner>())
        .dependencies(dptree::deps![InMemStorage::<StudyState>::new(), assigner])
        .enable_ctrlc_handler()
        .build();

    if let Some(webhook) = config.webhook {
        log::info!("Listening for webhook updates on {}", webhook.addr);
        let listener = webhooks::axum(bot, Options::new(webhook.addr, webhook.url)).await?;
        dispatcher
            .dispatch_with_listener(listener, Arc::new(IgnoringErrorHandlerSafe))
            .await
    } else {
        dispatcher.dispatch().await
    }

    Ok(())
}
