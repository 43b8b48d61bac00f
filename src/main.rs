//! Demo binary: pins simulated bodies to a surface and logs how far they
//! drift from it while the simulation runs.
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use glam::DVec3;
use log::{debug, info};
use pursuit::{
    init_logging, Chase, Config, ConstraintRegistry, ConstraintSurface, CylinderSurface,
    PhysicsBody, PhysicsWorld, PlaneSurface, RigidBody, SimObject, TrackedObject,
    VelocityController, DEFAULT_MASS, DEFAULT_SUBSTEPS,
};

/// Simulated seconds per frame.
const FRAME_DT: f64 = 1.0 / 60.0;
/// Radius of every demo body.
const BODY_RADIUS: f64 = 0.5;
/// Radius of the cylinder surface.
const CYLINDER_RADIUS: f64 = 5.0;
/// Frames between progress reports.
const REPORT_EVERY: u32 = 30;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SurfaceKind {
    Plane,
    Cylinder,
}

/// Pin bodies to a constraint surface with force-based pursuit
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Number of bodies to simulate
    #[arg(long, default_value_t = 8)]
    bodies: u32,
    /// Number of frames to run
    #[arg(long, default_value_t = 180)]
    frames: u32,
    /// Integration substeps per frame
    #[arg(long, default_value_t = DEFAULT_SUBSTEPS)]
    substeps: u32,
    /// Surface to pin the bodies to
    #[arg(long, value_enum, default_value_t = SurfaceKind::Plane)]
    surface: SurfaceKind,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = match &args.config {
        Some(path) => Config::from_path(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => Config::default(),
    };

    match args.surface {
        SurfaceKind::Plane => run(&args, &config, PlaneSurface::xy()),
        SurfaceKind::Cylinder => run(
            &args,
            &config,
            CylinderSurface::new(DVec3::ZERO, DVec3::Z, CYLINDER_RADIUS),
        ),
    }
}

fn run<S: ConstraintSurface>(args: &Args, config: &Config, surface: S) -> Result<()> {
    let mut world = PhysicsWorld::new().with_substeps(args.substeps);
    let settings = config
        .pursuit
        .registry_settings()
        .context("building pursuit settings")?;
    let mut registry = ConstraintRegistry::with_settings(surface, settings);

    let mut objects = Vec::new();
    for index in 0..args.bodies {
        let start = scatter(index);
        let body = world.add_body(RigidBody::sphere(start, BODY_RADIUS, DEFAULT_MASS));
        let object = Rc::new(SimObject::new(body, BODY_RADIUS));
        registry
            .add(Rc::clone(&object))
            .with_context(|| format!("tracking body {index}"))?;
        objects.push(object);
    }
    info!(
        "pinning {} bodies with {} substeps per frame",
        registry.len(),
        world.substeps()
    );

    let mut camera = config
        .camera
        .map(|camera_config| {
            let body = world.add_body(RigidBody::new(DVec3::new(0.0, 0.0, 20.0), 1.0));
            let controller =
                VelocityController::new(body.borrow().force_event(), camera_config.into())
                    .context("building camera controller")?;
            Ok::<_, anyhow::Error>((body, controller))
        })
        .transpose()?;

    for frame in 1..=args.frames {
        registry.update();
        if let Some((_, controller)) = camera.as_mut() {
            controller.set_target(centroid(&objects));
        }
        world.step(FRAME_DT);

        if frame % REPORT_EVERY == 0 {
            info!(
                "frame {frame}: worst distance from surface {:.6}",
                worst_drift(registry.surface(), &objects)
            );
        }
    }

    if let Some((body, mut controller)) = camera.take() {
        debug!("camera finished at {}", body.borrow().position());
        controller.dispose();
    }
    let drift = worst_drift(registry.surface(), &objects);
    registry.dispose();
    info!("finished after {} frames; worst distance {drift:.6}", args.frames);
    Ok(())
}

fn scatter(index: u32) -> DVec3 {
    let spread = f64::from(index);
    DVec3::new(
        1.0 + spread * 1.5,
        f64::from(index % 3) - 1.0,
        2.0 + f64::from(index % 4),
    )
}

fn centroid(objects: &[Rc<SimObject>]) -> DVec3 {
    let count = u32::try_from(objects.len()).unwrap_or(u32::MAX).max(1);
    objects
        .iter()
        .map(|object| object.position_world())
        .fold(DVec3::ZERO, |total, position| total + position)
        / f64::from(count)
}

fn worst_drift<S: ConstraintSurface>(surface: &S, objects: &[Rc<SimObject>]) -> f64 {
    objects
        .iter()
        .filter_map(|object| {
            let position = object.position_world();
            surface
                .cast_ray(position)
                .map(|point| point.distance(position))
        })
        .fold(0.0, f64::max)
}
