// External crates
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

// STD library
use std::path::PathBuf;
use std::time::Instant;

// Internal imports
use raster_lab::circle::{CircleAlgorithm, draw_parametric_circle};
use raster_lab::config::DemoConfig;
use raster_lab::fill::{Connectivity, PixelGrid, flood_fill, invert_bounding_box};
use raster_lab::line::{LineAlgorithm, draw_parametric_line_with_step};
use raster_lab::lighting::render_lit_scene;
use raster_lab::point2d::Pixel;
use raster_lab::rectangle::Rect;
use raster_lab::scenes::{house_edges, zbuffer_objects};
use raster_lab::screen::ScreenSpace;
use raster_lab::surface::{render_sweep_points, sweep_profile};
use raster_lab::wireframe::render_wireframe;
use raster_lab::zbuffer::render_scene;
use raster_lab::Rgb;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Scene {
    Lines,
    Circles,
    Fill,
    House,
    Zbuffer,
    Lighting,
    Bilinear,
    Sweep,
    All,
}

const ALL_SCENES: [Scene; 8] = [
    Scene::Lines,
    Scene::Circles,
    Scene::Fill,
    Scene::House,
    Scene::Zbuffer,
    Scene::Lighting,
    Scene::Bilinear,
    Scene::Sweep,
];

/// Headless driver for the raster demos.
#[derive(Debug, Parser)]
#[command(name = "raster-lab", version, about)]
struct Args {
    /// TOML file overriding the demo defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Demo to render
    #[arg(short, long, value_enum, default_value_t = Scene::All)]
    scene: Scene,

    /// Worker threads for the transform stages
    #[arg(short, long, default_value_t = num_cpus::get())]
    threads: usize,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => DemoConfig::load(path)?,
        None => DemoConfig::default(),
    };

    info!(threads = args.threads, "Number of worker threads");
    rayon::ThreadPoolBuilder::new()
        .num_threads(args.threads)
        .build_global()
        .context("Failed to build the rayon thread pool")?;

    let mut screen = ScreenSpace::new(config.canvas.width, config.canvas.height);
    let scenes: &[Scene] = match args.scene {
        Scene::All => &ALL_SCENES,
        ref one => std::slice::from_ref(one),
    };

    for &scene in scenes {
        screen.clear(config.canvas.background);
        let start = Instant::now();
        let pixels = render(scene, &config, &mut screen)?;
        info!(
            ?scene,
            pixels,
            covered = screen.count_not(config.canvas.background),
            elapsed = ?start.elapsed(),
            "Rendered scene"
        );
    }
    Ok(())
}

fn render(scene: Scene, config: &DemoConfig, screen: &mut ScreenSpace) -> Result<usize> {
    let pixels = match scene {
        Scene::Lines => lines(config, screen)?,
        Scene::Circles => circles(config, screen)?,
        Scene::Fill => fill(screen)?,
        Scene::House => render_wireframe(
            &house_edges(),
            &config.transform,
            &config.camera(),
            LineAlgorithm::Bresenham,
            Rgb::WHITE,
            screen,
        ),
        Scene::Zbuffer => {
            let stats = render_scene(&zbuffer_objects(), config.rotation, screen)?;
            debug!(drawn = stats.faces_drawn, skipped = stats.faces_skipped, "Z-buffer stats");
            stats.pixels_written
        }
        Scene::Lighting => {
            let lighting = &config.lighting;
            render_lit_scene(&[lighting.sphere, lighting.plane], &lighting.light, lighting.observer, screen)?
        }
        Scene::Bilinear => {
            let bilinear = &config.bilinear;
            bilinear.patch.render_points(bilinear.resolution, config.rotation, bilinear.color, screen)?
        }
        Scene::Sweep => {
            let sweep = &config.sweep;
            let points = sweep_profile(&sweep.profile, sweep.segments)?;
            render_sweep_points(&points, config.rotation.x, config.rotation.y, sweep.color, screen)
        }
        Scene::All => 0,
    };
    Ok(pixels)
}

/// Random segments drawn once per line algorithm, one canvas band each.
fn lines(config: &DemoConfig, screen: &mut ScreenSpace) -> Result<usize> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let (w, h) = (screen.width as i32, screen.height as i32);
    let band = (h / 3).max(1);
    let size = config.rasterizer.line_width;
    let colors = [Rgb::RED, Rgb::GREEN, Rgb::BLUE];
    let algorithms = [LineAlgorithm::Linear, LineAlgorithm::Bresenham, LineAlgorithm::Parametric];

    let mut plotted = 0;
    for _ in 0..16 {
        let a = (rng.gen_range(0..w), rng.gen_range(0..band));
        let b = (rng.gen_range(0..w), rng.gen_range(0..band));
        for (k, (algorithm, color)) in algorithms.iter().zip(colors).enumerate() {
            let offset = k as i32 * band;
            let (pa, pb) = (Pixel::new(a.0, a.1 + offset), Pixel::new(b.0, b.1 + offset));
            let pixels = match (algorithm, config.rasterizer.parametric_line_step) {
                (LineAlgorithm::Parametric, Some(step)) => draw_parametric_line_with_step(pa, pb, step)?,
                _ => algorithm.rasterize(pa, pb),
            };
            plotted += screen.plot_points(&pixels, color, size);
        }
    }
    Ok(plotted)
}

/// Concentric rings, one per circle algorithm.
fn circles(config: &DemoConfig, screen: &mut ScreenSpace) -> Result<usize> {
    let center = Pixel::new(screen.width as i32 / 2, screen.height as i32 / 2);
    let step = config.rasterizer.parametric_circle_step;
    let rings = [
        (CircleAlgorithm::Normal, Rgb::RED),
        (CircleAlgorithm::Parametric, Rgb::GREEN),
        (CircleAlgorithm::Bresenham, Rgb::BLUE),
        (CircleAlgorithm::Symmetric, Rgb::YELLOW),
    ];

    let mut plotted = 0;
    for (k, (algorithm, color)) in rings.into_iter().enumerate() {
        let edge = center.offset(30 + 40 * k as i32, 0);
        let pixels = match algorithm {
            CircleAlgorithm::Parametric => draw_parametric_circle(center, edge, step)?,
            _ => algorithm.rasterize(center, edge),
        };
        plotted += screen.plot_points(&pixels, color, config.rasterizer.line_width);
    }
    Ok(plotted)
}

/// Outline a box, fill it from the inside, then punch a window with the
/// bounding-box inverter. Each cell is drawn as an 8px block.
fn fill(screen: &mut ScreenSpace) -> Result<usize> {
    const CELL: u32 = 8;
    let mut grid = PixelGrid::new(24, 24);
    for i in 2..22 {
        grid.set(i, 2, true)?;
        grid.set(i, 21, true)?;
        grid.set(2, i, true)?;
        grid.set(21, i, true)?;
    }
    let filled = flood_fill(&grid, 10, 10, Connectivity::Four)?;
    let punched = invert_bounding_box(&filled, Rect::new(8, 8, 15, 15))?;
    debug!(outline = grid.filled_count(), filled = punched.filled_count(), "Fill stats");

    let mut cells = Vec::new();
    for (y, row) in punched.to_rows().iter().enumerate() {
        for (x, &v) in row.iter().enumerate() {
            if v == 1 {
                cells.push(Pixel::new((x as u32 * CELL) as i32, (y as u32 * CELL) as i32));
            }
        }
    }
    Ok(screen.plot_points(&cells, Rgb::GRAY, CELL))
}
