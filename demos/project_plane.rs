//! Project the corners of a unit plane through a pinhole camera
//!
//! The camera sits 5 units in front of the plane and rolls it by 45
//! degrees. With `--image`, a frame is loaded and written back out through
//! the bottom-row-first image helpers.

use anyhow::Result;
use clap::Parser;
use facecrate_core::{CameraInput, ConstantCamera, Point3f, ProjectionParams, Transform3D};
use facecrate_io::{load_image_rgba, write_image_rgba};
use log::info;
use nalgebra::{Matrix4, Vector3};
use std::f32::consts::FRAC_PI_4;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(about = "Print pixel positions of plane corners seen by a pinhole camera")]
struct Args {
    /// Focal length, same units as the aperture
    #[arg(long, default_value_t = 50.0)]
    focal_length: f32,

    /// Horizontal sensor aperture
    #[arg(long, default_value_t = 36.0)]
    h_aperture: f32,

    #[arg(long, default_value_t = 1280)]
    width: u32,

    #[arg(long, default_value_t = 720)]
    height: u32,

    /// Image to load and re-save alongside the projection
    #[arg(long)]
    image: Option<PathBuf>,

    /// Where the re-saved image goes
    #[arg(long, default_value = "roundtrip.png")]
    image_out: PathBuf,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let params = ProjectionParams::from_focal_length(args.focal_length, args.h_aperture, args.width, args.height)
        .with_clip_range(0.1, 1000.0);
    let view = Transform3D::translation(Vector3::new(0.0, 0.0, -5.0))
        * Transform3D::axis_angle(Vector3::z(), -FRAC_PI_4);
    let camera = ConstantCamera::from_params(&params)?.with_view(view.into());

    let corners = [
        Point3f::new(0.5, -0.5, 0.0),
        Point3f::new(0.5, 0.5, 0.0),
        Point3f::new(-0.5, 0.5, 0.0),
        Point3f::new(-0.5, -0.5, 0.0),
    ];
    let model = Matrix4::identity();
    for (i, corner) in corners.iter().enumerate() {
        match camera.project_to_image(0, &model, corner) {
            Some(pixel) => println!("corner {}: ({:.2}, {:.2})", i, pixel.x, pixel.y),
            None => println!("corner {}: behind the camera", i),
        }
    }

    if let Some(path) = &args.image {
        let img = load_image_rgba(path)?;
        info!("Loaded {}x{} image from {}", img.width(), img.height(), path.display());
        write_image_rgba(&args.image_out, &img)?;
        println!("Wrote {}", args.image_out.display());
    }
    Ok(())
}
