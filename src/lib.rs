//! Terminal front end for the tic-tac-toe engine.
//!
//! The engine lives in [`tictactoe_engine`]; this crate adds the pieces a
//! player touches:
//!
//! - **Config**: TOML play settings ([`PlayConfig`])
//! - **CLI**: clap argument parsing ([`Cli`])
//! - **Session**: a line-oriented loop over any reader and writer ([`Session`])

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod cli;
mod config;
mod session;

pub use cli::{Cli, Command};
pub use config::{ConfigError, PlayConfig};
pub use session::{Command as SessionCommand, Session, SessionEnd};
