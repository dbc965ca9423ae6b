//! glint CLI - renders scene files with the Whitted ray tracer.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use glint_math::Mat4;
use glint_raytrace::{FrameRenderer, Tracer, Viewport};
use glint_scene::doc::{CameraDoc, SceneDoc};
use log::LevelFilter;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Log levels selectable on the command line.
#[derive(Debug, Clone, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Parser)]
#[command(name = "glint")]
#[command(about = "Whitted ray tracer for quadric scene files", long_about = None)]
struct Cli {
    /// Set the logging level
    #[arg(long, default_value = "info")]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a scene file to a PNG image
    Render {
        /// Input scene file (.json)
        scene: PathBuf,
        /// Output image path
        #[arg(short, long, default_value = "render.png")]
        output: PathBuf,
        /// Image width in pixels
        #[arg(long, default_value_t = 800)]
        width: u32,
        /// Image height in pixels
        #[arg(long, default_value_t = 600)]
        height: u32,
        /// Pixels traced between progress reports
        #[arg(long, default_value_t = 30000)]
        step: usize,
    },
    /// Display information about a scene file
    Info {
        /// Path to the scene file
        scene: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_default_env()
        .filter_level(cli.log_level.into())
        .init();

    match cli.command {
        Commands::Render {
            scene,
            output,
            width,
            height,
            step,
        } => render(&scene, &output, width, height, step),
        Commands::Info { scene } => info(&scene),
    }
}

fn load_doc(path: &Path) -> Result<SceneDoc> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    SceneDoc::from_json(&json).with_context(|| format!("failed to parse {}", path.display()))
}

/// View and projection matrices for a camera description.
fn camera_matrices(camera: &CameraDoc, width: u32, height: u32) -> (Mat4, Mat4) {
    let view = Mat4::look_at_rh(
        &camera.eye_point(),
        &camera.target_point(),
        &camera.up_vec(),
    );
    let aspect = width as f64 / height as f64;
    let proj = Mat4::new_perspective(aspect, camera.fov_degrees.to_radians(), 0.1, 1000.0);
    (view, proj)
}

fn render(scene_path: &Path, output: &Path, width: u32, height: u32, step: usize) -> Result<()> {
    let doc = load_doc(scene_path)?;
    let scene = doc.build_scene();
    let tracer = Tracer::new(&scene)?;

    let camera = doc.camera.clone().unwrap_or_default();
    let (view, proj) = camera_matrices(&camera, width, height);

    let mut frame = FrameRenderer::new();
    frame.begin_frame(
        &view,
        &proj,
        Viewport {
            x: 0,
            y: 0,
            width,
            height,
        },
    )?;

    log::info!("ray tracing {}x{} pixels", width, height);
    let start = Instant::now();
    let total = width as usize * height as usize;
    loop {
        let done = frame.advance(&tracer, step);
        log::info!("traced {}/{} pixels", frame.cursor(), total);
        if done {
            break;
        }
    }
    log::info!("rendering time: {:.2}s", start.elapsed().as_secs_f64());

    save_png(&frame, output)?;
    println!("Wrote {}", output.display());
    Ok(())
}

/// Clamp, convert to 8-bit, and flip rows so the bottom-up frame buffer
/// becomes a top-down image.
fn save_png(frame: &FrameRenderer, path: &Path) -> Result<()> {
    let (width, height) = (frame.width(), frame.height());
    let pixels = frame.pixels();

    let mut img = image::RgbaImage::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let offset = (((height - 1 - y) * width + x) * 4) as usize;
            img.put_pixel(
                x,
                y,
                image::Rgba([
                    channel_to_u8(pixels[offset]),
                    channel_to_u8(pixels[offset + 1]),
                    channel_to_u8(pixels[offset + 2]),
                    channel_to_u8(pixels[offset + 3]),
                ]),
            );
        }
    }

    img.save(path)
        .with_context(|| format!("failed to write {}", path.display()))
}

fn channel_to_u8(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0) as u8
}

fn info(scene_path: &Path) -> Result<()> {
    let doc = load_doc(scene_path)?;

    println!("ambient: {:?}", doc.ambient);
    println!("lights:  {}", doc.lights.len());
    println!("objects: {}", doc.objects.len());
    for (i, object) in doc.objects.iter().enumerate() {
        println!(
            "  [{}] {:?} (reflectivity {}, transparency {})",
            i,
            object.shape.build().kind(),
            object.material.reflectivity,
            object.material.transparency
        );
    }
    match &doc.camera {
        Some(camera) => println!("camera:  eye {:?}, fov {} deg", camera.eye, camera.fov_degrees),
        None => println!("camera:  none (renderer default)"),
    }
    match doc.validate() {
        Ok(()) => println!("preconditions: ok"),
        Err(e) => println!("preconditions: {}", e),
    }
    Ok(())
}
