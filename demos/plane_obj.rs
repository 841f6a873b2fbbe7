//! Build a textured unit plane and export it to OBJ
//!
//! The plane's UVs are point-based, so it is converted to per-corner
//! attributes before export.

use anyhow::Result;
use clap::Parser;
use facecrate_core::{uv, AttributeLayout, Geometry, MeshBuilder, Point3f, PolyMesh};
use facecrate_io::{GeometryWriter, ObjExporter, ObjWriteOptions};
use log::info;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(about = "Export a unit plane with per-corner UVs and normals to OBJ")]
struct Args {
    /// Output OBJ file
    #[arg(short, long, default_value = "plane.obj")]
    output: PathBuf,

    /// Digits after the decimal point
    #[arg(long, default_value_t = 6)]
    precision: usize,
}

fn build_plane() -> Result<PolyMesh> {
    let mut builder = MeshBuilder::new();
    builder.add_point(Point3f::new(0.5, -0.5, 0.0));
    builder.add_point(Point3f::new(0.5, 0.5, 0.0));
    builder.add_point(Point3f::new(-0.5, 0.5, 0.0));
    builder.add_point(Point3f::new(-0.5, -0.5, 0.0));
    builder.add_face(&[0, 1, 2, 3]);
    builder.set_uvs_attribute(
        AttributeLayout::PointBased,
        vec![uv(1.0, 0.0), uv(1.0, 1.0), uv(0.0, 1.0), uv(0.0, 0.0)],
    );
    Ok(builder.build()?)
}

fn save<W>(writer: &W, geometry: &Geometry, path: &Path) -> Result<()>
where
    W: GeometryWriter,
    W::Error: std::error::Error + Send + Sync + 'static,
{
    writer.write_geometry(geometry, path)?;
    info!("Saved {} faces to {:?}", geometry.faces_count(), path);
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let plane = build_plane()?;
    info!(
        "Plane UVs are {}, normals are {}",
        plane.uvs_attribute(),
        plane.normals_attribute()
    );

    let geometry = Geometry::from(plane.to_vertex_based());
    let options = ObjWriteOptions::new()
        .with_precision(args.precision)
        .with_comment("unit plane, z = 0");
    save(&ObjExporter::with_options(options), &geometry, &args.output)?;

    println!("Wrote {}", args.output.display());
    Ok(())
}
