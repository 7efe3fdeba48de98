pub mod battlepass;
pub mod status;

pub use battlepass::*;
pub use status::*;
