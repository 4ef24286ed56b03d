#![forbid(unsafe_code)]

pub mod cli;
pub mod columns;
pub mod config;
pub mod discovery;
pub mod export;
pub mod flatten;
pub mod models;
pub mod parser;
pub mod utils;

pub use cli::app::{Cli, Command};
