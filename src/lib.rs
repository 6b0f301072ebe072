#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::return_self_not_must_use
)]

pub mod classifier;
pub mod cli;
pub mod client;
pub mod commands;
pub mod config;
pub mod error;
pub mod gateway;

pub use client::{AuthToken, StatusFilter, Task, TodoApi, TodoClient};
pub use commands::{CommandReply, ParsedCommand, dispatch, parse, resolve};
pub use config::Config;
pub use error::{BridgeError, ClientError};
