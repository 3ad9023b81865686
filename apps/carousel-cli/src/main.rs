use anyhow::Context;
use carousel_assets::ModelLibrary;
use carousel_geometry::{
    Mesh, build_ground, build_hex_disc, build_poles, build_roof, placeholder_cube,
};
use carousel_input::Action;
use carousel_render::{DebugTextRenderer, LookAtCamera, MonoViewpoint, Renderer, build_frame};
use carousel_scene::{Carousel, SceneConfig};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "carousel-cli", about = "Headless carousel tooling")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Scene config file (YAML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Dump a procedural mesh and check its invariants
    Mesh {
        #[arg(value_enum)]
        shape: Shape,
        /// Rim height for `hex`
        #[arg(long, default_value = "0")]
        height: f32,
        /// Extra apex height for `hex`
        #[arg(long, default_value = "0")]
        center_height: f32,
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Simulate frames and print their draw lists
    Frames {
        /// Number of frames
        #[arg(short = 'n', long, default_value = "4")]
        frames: u32,
        /// Seconds between frames
        #[arg(long, default_value = "0.5")]
        dt: f64,
        /// Toggle at a time, e.g. `2.0:rotation` (direction | bob | rotation)
        #[arg(long = "toggle", value_parser = parse_toggle)]
        toggles: Vec<(f64, Action)>,
        /// Viewport size in pixels
        #[arg(long, default_value = "512")]
        size: u32,
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Try loading every rider model and report which fall back to placeholders
    Models {
        /// Directory containing the rider models (overrides the config)
        #[arg(long)]
        models_dir: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Shape {
    Roof,
    Ground,
    Poles,
    Hex,
    Cube,
}

fn parse_toggle(s: &str) -> Result<(f64, Action), String> {
    let (time, name) = s
        .split_once(':')
        .ok_or_else(|| format!("expected TIME:TOGGLE, got `{s}`"))?;
    let time: f64 = time
        .trim()
        .parse()
        .map_err(|e| format!("bad time `{time}`: {e}"))?;
    let action = match name.trim() {
        "direction" => Action::ReverseRotation,
        "bob" => Action::ToggleBob,
        "rotation" => Action::ToggleRotation,
        other => return Err(format!("unknown toggle `{other}`")),
    };
    Ok((time, action))
}

#[derive(Serialize)]
struct MeshDump {
    vertices: usize,
    triangles: usize,
    valid: Result<(), String>,
    positions: Vec<[f32; 3]>,
    normals: Vec<[f32; 3]>,
    indices: Vec<u32>,
}

impl From<&Mesh> for MeshDump {
    fn from(mesh: &Mesh) -> Self {
        Self {
            vertices: mesh.vertex_count(),
            triangles: mesh.triangle_count(),
            valid: mesh.validate().map_err(|e| e.to_string()),
            positions: mesh.positions.iter().map(|p| p.to_array()).collect(),
            normals: mesh.normals.iter().map(|n| n.to_array()).collect(),
            indices: mesh.indices.clone(),
        }
    }
}

fn print_mesh(mesh: &Mesh) {
    println!(
        "vertices={} triangles={} valid={}",
        mesh.vertex_count(),
        mesh.triangle_count(),
        match mesh.validate() {
            Ok(()) => "yes".to_string(),
            Err(e) => format!("no ({e})"),
        }
    );
    for (i, [a, b, c]) in mesh.triangles().enumerate() {
        let n = mesh.normals[a as usize];
        println!(
            "  tri {i}: [{a}, {b}, {c}] normal=({:.3}, {:.3}, {:.3})",
            n.x, n.y, n.z
        );
        for idx in [a, b, c] {
            let p = mesh.positions[idx as usize];
            println!("    v{idx}: ({:.3}, {:.3}, {:.3})", p.x, p.y, p.z);
        }
    }
}

/// Frame times `0, dt, 2dt, ...` with each toggle applied once the clock reaches it.
fn simulate(
    carousel: &mut Carousel,
    frames: u32,
    dt: f64,
    toggles: &[(f64, Action)],
    mut on_frame: impl FnMut(f64, &Carousel),
) {
    let mut pending: Vec<(f64, Action)> = toggles.to_vec();
    pending.sort_by(|a, b| a.0.total_cmp(&b.0));
    let mut pending = pending.into_iter().peekable();

    for frame in 0..frames {
        let t = frame as f64 * dt;
        while let Some((_, action)) = pending.next_if(|(at, _)| *at <= t) {
            carousel.apply(action);
        }
        carousel.update(t);
        on_frame(t, carousel);
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    let config = match &cli.config {
        Some(path) => SceneConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => SceneConfig::default(),
    };

    match cli.command {
        Commands::Info => {
            println!("carousel-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("common: {}", carousel_common::crate_info());
            println!("geometry: {}", carousel_geometry::crate_info());
            println!("input: {}", carousel_input::crate_info());
            println!("scene: {}", carousel_scene::crate_info());
            println!("render: {}", carousel_render::crate_info());
            println!(
                "riders: {}",
                config
                    .riders
                    .iter()
                    .map(|r| r.animal.name())
                    .collect::<Vec<_>>()
                    .join(", ")
            );
        }
        Commands::Mesh {
            shape,
            height,
            center_height,
            json,
        } => {
            let mesh = match shape {
                Shape::Roof => build_roof(),
                Shape::Ground => build_ground(),
                Shape::Poles => build_poles(),
                Shape::Hex => build_hex_disc(height, center_height),
                Shape::Cube => placeholder_cube(0.5),
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&MeshDump::from(&mesh))?);
            } else {
                print_mesh(&mesh);
            }
        }
        Commands::Frames {
            frames,
            dt,
            toggles,
            size,
            json,
        } => {
            let viewpoint = MonoViewpoint::new(LookAtCamera::from_config(&config.camera));
            let mut carousel = Carousel::new(config);
            let mut renderer = DebugTextRenderer::new();
            let mut dumps = Vec::new();

            simulate(&mut carousel, frames, dt, &toggles, |t, carousel| {
                let views = build_frame(&viewpoint, size, size, carousel);
                if json {
                    dumps.push(serde_json::json!({ "t": t, "views": views }));
                } else {
                    let state = carousel.state();
                    println!(
                        "t={t:.3}s angle={:.2} rotation={} bob={}",
                        state.spin().angle,
                        state.rotation_enabled,
                        state.bob_enabled
                    );
                    print!("{}", renderer.render(&views));
                }
            });

            if json {
                println!("{}", serde_json::to_string_pretty(&dumps)?);
            }
        }
        Commands::Models { models_dir } => {
            let mut config = config;
            if let Some(dir) = models_dir {
                config.models_dir = dir;
            }
            let library = ModelLibrary::load(&config);
            for rider in &config.riders {
                let path = config.model_path(rider);
                match library.get(rider.animal) {
                    Some(mesh) if library.is_placeholder(rider.animal) => println!(
                        "{:<8} placeholder ({} missing or unreadable, {} vertices)",
                        rider.animal.name(),
                        path.display(),
                        mesh.vertex_count()
                    ),
                    Some(mesh) => println!(
                        "{:<8} {} vertices, {} triangles from {}",
                        rider.animal.name(),
                        mesh.vertex_count(),
                        mesh.triangle_count(),
                        path.display()
                    ),
                    None => println!("{:<8} not loaded", rider.animal.name()),
                }
            }
        }
    }

    Ok(())
}
