pub mod cli;

pub use cli::{AliasProfile, Args, Command, EngineArgs, Outcome, RunError, run};
