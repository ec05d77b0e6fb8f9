//! Renders a fly-through of a periodic star field to a numbered PNG sequence.
//!
//! Configuration is loaded from `config.ron` and can be overridden via CLI flags.
//! Run with `cargo run -p starpano-app -- --width 3200 --height 1600 --seed 7`.

use std::path::PathBuf;

use clap::Parser;
use glam::DVec3;
use starpano_config::{BlendModeSetting, CliArgs, Config};
use starpano_sky::{
    Animation, BlendMode, FieldDimensions, FrameRenderer, ObserverState, PngSequenceWriter,
    RenderSettings, StarField, StarFieldGenerator, run_animation,
};
use tracing::{error, info};

fn blend_mode(setting: BlendModeSetting) -> BlendMode {
    match setting {
        BlendModeSetting::Overwrite => BlendMode::Overwrite,
        BlendModeSetting::SaturatingAdd => BlendMode::SaturatingAdd,
    }
}

fn render_settings(config: &Config) -> RenderSettings {
    RenderSettings {
        image_width: config.image.width,
        image_height: config.image.height,
        reference_scale: config.effective_reference_scale(),
        reference_point_size: config.render.reference_point_size,
        reference_width: config.render.reference_width,
        blend_mode: blend_mode(config.render.blend_mode),
    }
}

fn generate_field(config: &Config) -> Result<StarField, starpano_sky::SkyError> {
    let field = &config.field;
    let dims = FieldDimensions::new(field.size_x, field.size_y, field.size_z)?;
    let generator = StarFieldGenerator::new(dims, field.brightness_baseline);
    Ok(match field.seed {
        Some(seed) => generator.generate_seeded(field.num_stars, seed),
        None => generator.generate(field.num_stars),
    })
}

fn run(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let field = generate_field(config)?;
    info!(
        "Generated {} stars in a {}x{}x{} field",
        field.len(),
        config.field.size_x,
        config.field.size_y,
        config.field.size_z
    );

    let renderer = FrameRenderer::new(&render_settings(config))?;
    let animation = Animation::new(
        &renderer,
        &field,
        ObserverState::from(DVec3::from_array(config.animation.start)),
        config.animation.step_delta,
        config.animation.max_x,
    );
    info!(
        "Rendering {} frames at {}x{} ({:?} blending)",
        animation.frame_count(),
        config.image.width,
        config.image.height,
        renderer.rasterizer().blend_mode()
    );

    let mut writer = PngSequenceWriter::new(
        &config.animation.output_dir,
        config.animation.file_prefix.as_str(),
    )?;
    let summary = run_animation(animation, &mut writer);
    info!(
        "Wrote {} of {} frames to {}",
        summary.written,
        summary.rendered,
        writer.dir().display()
    );
    if summary.failed > 0 {
        error!("{} frames failed to write", summary.failed);
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    // Resolve config directory
    let config_dir = args
        .config
        .clone()
        .or_else(starpano_config::default_config_dir)
        .unwrap_or_else(|| PathBuf::from("."));

    // Load or create config, then apply CLI overrides
    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);

    let log_dir = config_dir.join("logs");
    starpano_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config));

    if let Err(e) = config.validate() {
        error!("Invalid configuration: {e}");
        return Err(e.into());
    }
    info!("Config directory: {}", config_dir.display());

    run(&config)
}
