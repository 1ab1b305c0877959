//! Headless flythrough - drives the terrain manager along a camera path.
//!
//! Usage: cargo run --release --bin flythrough -- [OPTIONS]
//!
//! Options:
//!   --config <PATH>   Terrain config JSON (default: built-in defaults)
//!   --seed <SEED>     Noise seed (default: 12345)
//!   --frames <N>      Frames to simulate (default: 2000)
//!   --speed <UNITS>   Camera speed per frame (default: 4.0)
//!   --altitude <Y>    Camera height (default: 96.0)
//!   --report <N>      Log stats every N frames (default: 250)

use std::f32::consts::TAU;
use std::time::Instant;

use voxterra::core::logging;
use voxterra::core::types::{Mat4, Result, Vec3};
use voxterra::math::Frustum;
use voxterra::render::HeadlessBackend;
use voxterra::streaming::{TerrainConfig, TerrainManager};
use voxterra::terrain::{NoiseField, TerrainParams};

fn main() {
    logging::init();

    let args: Vec<String> = std::env::args().collect();
    if let Err(e) = run(&args) {
        log::error!("flythrough failed: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &[String]) -> Result<()> {
    let config = match parse_str_arg(args, "--config") {
        Some(path) => TerrainConfig::from_json_file(&path)?,
        None => TerrainConfig::default(),
    };
    let seed = parse_u32_arg(args, "--seed").unwrap_or(12345);
    let frames = parse_u32_arg(args, "--frames").unwrap_or(2000);
    let speed = parse_f32_arg(args, "--speed").unwrap_or(4.0);
    let altitude = parse_f32_arg(args, "--altitude").unwrap_or(96.0);
    let report = parse_u32_arg(args, "--report").unwrap_or(250).max(1);

    let field = NoiseField::new(TerrainParams { seed, ..Default::default() });
    let mut manager = TerrainManager::new(config.clone(), Box::new(field), HeadlessBackend::new())?;

    // Circle the world center at half the view distance
    let center = config.world_size as f32 * 0.5;
    let radius = config.view_distance * 0.5;
    let angular_speed = speed / radius.max(1.0);
    let projection = Mat4::perspective_rh(60f32.to_radians(), 16.0 / 9.0, 0.1, config.view_distance * 2.0);

    log::info!(
        "Flythrough: seed {}, {} frames, radius {:.0}, altitude {:.0}",
        seed, frames, radius, altitude
    );

    let start = Instant::now();
    let mut built = 0u32;
    for frame in 0..frames {
        let angle = frame as f32 * angular_speed;
        let eye = Vec3::new(center + radius * angle.cos(), altitude, center + radius * angle.sin());
        let ahead = angle + 0.25 * TAU;
        let target = eye + Vec3::new(ahead.cos(), -0.3, ahead.sin());
        let view = Mat4::look_at_rh(eye, target, Vec3::Y);
        manager.renderer_mut().set_frustum(Some(Frustum::from_view_projection(&(projection * view))));

        manager.diff_chunks(eye.x, eye.z);
        if manager.exec_pending_task() {
            built += 1;
        }

        if manager.is_voxel_solid(eye.x, eye.y, eye.z) {
            log::debug!("Frame {}: camera inside terrain at {:?}", frame, eye);
        }

        if (frame + 1) % report == 0 {
            let stats = manager.stats();
            log::info!(
                "Frame {}: {} live ({} built, {} visible), {} queued, {} allocated, {} verts, {} tris",
                frame + 1,
                stats.live_chunks,
                stats.built_chunks,
                stats.visible_chunks,
                stats.pending_tasks,
                stats.allocated_chunks,
                stats.live_vertices,
                stats.live_faces,
            );
            log::info!(
                "  avg simulate {:?}, mesh {:?}, skirt {:?}, superseded {}",
                stats.avg_simulate_time,
                stats.avg_mesh_time,
                stats.avg_skirt_time,
                stats.superseded_builds,
            );
        }
    }

    let elapsed = start.elapsed();
    let stats = manager.stats();
    let renderer = manager.dispose();

    println!("=== Voxterra Flythrough ===");
    println!("Frames:     {} in {:.2?}", frames, elapsed);
    println!("Rebuilds:   {} ({} superseded)", built, stats.superseded_builds);
    println!("Allocated:  {} chunks", stats.allocated_chunks);
    println!("Live:       {} vertices, {} triangles", stats.live_vertices, stats.live_faces);
    println!("Disposed:   {} meshes", renderer.disposed_count());
    Ok(())
}

fn parse_f32_arg(args: &[String], flag: &str) -> Option<f32> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
}

fn parse_u32_arg(args: &[String], flag: &str) -> Option<u32> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
}

fn parse_str_arg(args: &[String], flag: &str) -> Option<String> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}
