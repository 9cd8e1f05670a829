pub mod abi;
pub mod error;
pub mod handlers;
pub mod proxy_contract;
pub mod utils;
