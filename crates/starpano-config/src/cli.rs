//! Command-line argument parsing.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::{BlendModeSetting, Config};

/// Blend mode as accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BlendArg {
    /// Later stars replace earlier coverage.
    Overwrite,
    /// Coverage accumulates with saturation.
    Add,
}

impl From<BlendArg> for BlendModeSetting {
    fn from(arg: BlendArg) -> Self {
        match arg {
            BlendArg::Overwrite => BlendModeSetting::Overwrite,
            BlendArg::Add => BlendModeSetting::SaturatingAdd,
        }
    }
}

/// Panoramic starfield renderer command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug)]
#[command(name = "starpano", about = "Render a fly-through of a periodic star field")]
pub struct CliArgs {
    /// Output image width.
    #[arg(long)]
    pub width: Option<u32>,

    /// Output image height.
    #[arg(long)]
    pub height: Option<u32>,

    /// Number of stars to generate.
    #[arg(long)]
    pub stars: Option<usize>,

    /// RNG seed for a reproducible star field.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Stop once the observer's x exceeds this value.
    #[arg(long)]
    pub max_x: Option<f64>,

    /// Observer advance per frame.
    #[arg(long)]
    pub step: Option<f64>,

    /// Compositing policy for overlapping stars.
    #[arg(long, value_enum)]
    pub blend: Option<BlendArg>,

    /// Directory that receives the frame sequence.
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(w) = args.width {
            self.image.width = w;
        }
        if let Some(h) = args.height {
            self.image.height = h;
        }
        if let Some(n) = args.stars {
            self.field.num_stars = n;
        }
        if let Some(seed) = args.seed {
            self.field.seed = Some(seed);
        }
        if let Some(max_x) = args.max_x {
            self.animation.max_x = max_x;
        }
        if let Some(step) = args.step {
            self.animation.step_delta = step;
        }
        if let Some(blend) = args.blend {
            self.render.blend_mode = blend.into();
        }
        if let Some(ref dir) = args.output {
            self.animation.output_dir = dir.clone();
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
