pub mod animation;
pub mod config;
pub mod constants;
pub mod field;
pub mod motion;
pub mod noise;
pub mod prompt;
pub mod specimen;
pub mod state;
pub mod tension;

pub use animation::*;
pub use config::*;
pub use constants::*;
pub use field::*;
pub use motion::*;
pub use prompt::*;
pub use specimen::*;
pub use state::*;
pub use tension::*;

// Shaders bundled as string constants
pub static JELLY_WGSL: &str = include_str!("../shaders/jelly.wgsl");
pub static BACKDROP_WGSL: &str = include_str!("../shaders/backdrop.wgsl");
pub static POST_WGSL: &str = include_str!("../shaders/post.wgsl");
