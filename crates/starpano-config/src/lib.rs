//! Configuration for the panoramic starfield renderer.
//!
//! Settings persist to disk as RON files, can be overridden from the command
//! line via clap, and are validated once at startup so that rendering never
//! sees a degenerate field or image size.

mod cli;
mod config;
mod error;

pub use cli::{BlendArg, CliArgs};
pub use config::{
    AnimationConfig, BlendModeSetting, Config, DebugConfig, FieldConfig, ImageConfig,
    RenderConfig, default_config_dir,
};
pub use error::ConfigError;
