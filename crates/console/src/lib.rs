//! `hbnb-console`: the line-oriented command interpreter.
//!
//! Tokenizer, dispatcher and handlers live here; the storage engine comes
//! from `hbnb-infra` and the domain types from `hbnb-core`.

pub mod config;
pub mod error;
pub mod help;
pub mod interpreter;
pub mod params;
pub mod repl;
pub mod startup;
pub mod tokenizer;

pub use config::ConsoleConfig;
pub use error::{CommandError, TokenizeError};
pub use interpreter::{Flow, Interpreter};
pub use startup::Startup;
