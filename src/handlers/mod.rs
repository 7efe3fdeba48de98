pub mod battlepass;
pub mod status;

pub use battlepass::battlepass_config;
pub use status::status_config;
