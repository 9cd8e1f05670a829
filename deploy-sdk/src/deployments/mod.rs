pub mod artifact;
pub mod chain;
pub mod error;
pub mod interface;
pub mod plan;
pub mod record;
