//! Summarize a numbered image sequence and optionally decode every frame

use anyhow::Result;
use clap::Parser;
use facecrate_core::LogProgress;
use facecrate_io::FrameSequence;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(about = "Show the frame range of an image sequence directory")]
struct Args {
    /// Directory of frames named by number (0001.png, 0002.png, ...)
    dir: PathBuf,

    /// Decode every frame, logging progress
    #[arg(long)]
    load: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let sequence = FrameSequence::open(&args.dir)?;
    let (first, last) = sequence.frame_range();
    let (width, height) = sequence.image_size()?;

    println!("Sequence: {}", sequence.dir().display());
    println!("   frames: {} [{}, {}]", sequence.len(), first, last);
    println!("   size:   {}x{}", width, height);

    if args.load {
        let mut progress = LogProgress::new("loading frames");
        let images = sequence.load_all(&mut progress)?;
        println!("   decoded {} frames", images.len());
    }
    Ok(())
}
