pub mod battlepass_service;
pub mod status_service;

pub use battlepass_service::*;
pub use status_service::*;
