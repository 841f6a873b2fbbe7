//! Numbered image sequences
//!
//! A sequence is a directory whose files are named by frame number
//! (`0001.png`, `0002.png`, ...). Numbers must form a contiguous range.

use crate::error::{IoError, IoResult};
use crate::image_io::load_image_rgb;
use facecrate_core::{report_step, ProgressCallback};
use image::Rgb32FImage;
use log::{debug, info};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Frame number to file mapping for a contiguous image sequence
#[derive(Debug, Clone)]
pub struct FrameSequence {
    dir: PathBuf,
    frames: BTreeMap<i64, PathBuf>,
}

impl FrameSequence {
    /// Scan a directory. Every file stem must parse as a frame number.
    pub fn open<P: AsRef<Path>>(dir: P) -> IoResult<Self> {
        let dir = dir.as_ref();
        let mut frames = BTreeMap::new();

        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            let stem = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or_default();
            let frame: i64 = stem.parse().map_err(|_| IoError::ParseError {
                message: format!("{:?} is not named by a frame number", path),
            })?;
            if let Some(previous) = frames.insert(frame, path.clone()) {
                return Err(IoError::ParseError {
                    message: format!("frame {} appears twice ({:?} and {:?})", frame, previous, path),
                });
            }
        }

        let (first, last) = match (frames.keys().next(), frames.keys().next_back()) {
            (Some(&first), Some(&last)) => (first, last),
            _ => {
                return Err(IoError::InvalidFormat {
                    format: format!("no frames in {:?}", dir),
                })
            }
        };
        // stems span the whole i64 range, so widen before subtracting
        let span = i128::from(last) - i128::from(first) + 1;
        if span != frames.len() as i128 {
            return Err(IoError::SequenceGap {
                first,
                last,
                found: frames.len(),
            });
        }

        debug!("Frame sequence {:?}: frames [{}, {}]", dir, first, last);
        Ok(Self {
            dir: dir.to_path_buf(),
            frames,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// First and last frame number, inclusive
    pub fn frame_range(&self) -> (i64, i64) {
        let first = self.frames.keys().next().copied().unwrap_or_default();
        let last = self.frames.keys().next_back().copied().unwrap_or_default();
        (first, last)
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn frames(&self) -> impl Iterator<Item = i64> + '_ {
        self.frames.keys().copied()
    }

    pub fn path(&self, frame: i64) -> Option<&Path> {
        self.frames.get(&frame).map(PathBuf::as_path)
    }

    /// Size of the first frame without decoding pixel data
    pub fn image_size(&self) -> IoResult<(u32, u32)> {
        let (first, _) = self.frame_range();
        let path = self.path(first).ok_or(IoError::MissingFrame { frame: first })?;
        Ok(image::image_dimensions(path)?)
    }

    /// Load one frame as RGB floats, bottom row first
    pub fn load_rgb(&self, frame: i64) -> IoResult<Rgb32FImage> {
        let path = self.path(frame).ok_or(IoError::MissingFrame { frame })?;
        load_image_rgb(path)
    }

    /// Load every frame in order, reporting progress after each one
    pub fn load_all<C>(&self, progress: &mut C) -> IoResult<BTreeMap<i64, Rgb32FImage>>
    where
        C: ProgressCallback + ?Sized,
    {
        let mut images = BTreeMap::new();
        for (i, (&frame, path)) in self.frames.iter().enumerate() {
            images.insert(frame, load_image_rgb(path)?);
            report_step(progress, i + 1, self.frames.len())?;
        }
        info!("Loaded {} frames from {:?}", images.len(), self.dir);
        Ok(images)
    }
}
