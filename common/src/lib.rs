pub mod env;
pub mod network;
