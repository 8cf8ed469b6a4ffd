pub mod commands;
pub mod config;
pub mod drying;
pub mod error;
pub mod launch;
pub mod platform;
pub mod state;
pub mod timecode;

pub use error::{LaunchError, LaunchParseError, TimeCodeError, TimeCodeParseError};
pub use timecode::TimeCode;

use clap::ValueEnum;
use serde::Serialize;

#[derive(Clone, Copy, ValueEnum, Debug, Default, Serialize)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}
