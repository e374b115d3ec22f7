pub mod config;
pub mod logging;

pub mod github;
pub mod output;
pub mod package;
pub mod pipeline;
pub mod render;
pub mod wheel;
