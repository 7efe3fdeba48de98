pub mod battlepass_seasons;
pub mod status_checks;
pub mod user_battlepass_progress;

pub use battlepass_seasons as season_entity;
pub use status_checks as status_check_entity;
pub use user_battlepass_progress as progress_entity;
