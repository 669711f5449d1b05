//! `invoicely` command-line front end.

pub mod app;
pub mod cli;
pub mod config;

pub use app::{App, Outcome};
pub use cli::{Cli, Command};
pub use config::AppConfig;
