use state::StudyState;
use teloxide::{dispatching::dialogue::InMemStorage, prelude::Dialogue};

pub mod action;
pub mod commands;
pub mod config;
mod content;
pub mod error;
pub mod form;
pub mod group;
pub mod keyboard;
pub mod logging;
pub mod render;
pub mod runner;
pub mod schema;
pub mod session;
pub mod stage;
pub mod state;

pub type UserDialogue = Dialogue<StudyState, InMemStorage<StudyState>>;
pub type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync + 'static>>;
