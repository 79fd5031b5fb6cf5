mod cli_mode;
mod timeline_mode;
mod tone_mode;
mod use_color;
mod view_mode;

pub use cli_mode::CliModeResult;
pub use timeline_mode::timeline_mode;
pub use tone_mode::tone_mode;
pub use use_color::use_color;
pub use view_mode::view_mode;
