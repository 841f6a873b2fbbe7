//! Print a summary of a geometry file

use anyhow::{Context, Result};
use clap::Parser;
use facecrate_core::{Drawable, MeshAttributeKind};
use facecrate_io::read_geometry;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(about = "Show mesh counts, attribute layouts and bounds of an OBJ file")]
struct Args {
    /// Geometry file to inspect
    input: PathBuf,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let geometry = read_geometry(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;

    println!("=== {} ===", args.input.display());
    println!("Meshes: {}", geometry.meshes_count());
    for (i, mesh) in geometry.meshes().iter().enumerate() {
        println!("Mesh {}:", i);
        println!("   points:  {}", mesh.points_count());
        println!("   faces:   {}", mesh.faces_count());
        println!("   corners: {}", mesh.corners_count());
        for kind in [MeshAttributeKind::Uv, MeshAttributeKind::Normal] {
            println!("   {} layout: {}", kind, mesh.layout_of(kind));
        }
    }

    let (min, max) = geometry.bounding_box();
    let center = geometry.center();
    println!("Bounds: ({:.3}, {:.3}, {:.3}) - ({:.3}, {:.3}, {:.3})", min.x, min.y, min.z, max.x, max.y, max.z);
    println!("Center: ({:.3}, {:.3}, {:.3})", center.x, center.y, center.z);
    Ok(())
}
