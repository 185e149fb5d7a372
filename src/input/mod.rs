pub mod command_mode;
pub mod mouse;
pub mod normal_mode;
pub mod visual_mode;
