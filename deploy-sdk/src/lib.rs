pub mod accounts;
pub mod deployments;
pub mod external_api;
pub mod scripts;
