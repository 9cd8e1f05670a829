pub mod args;
pub mod commands;
pub mod env_var;
pub mod error;
