//! Progress reporting with cooperative abort

use crate::{Error, Result};
use log::info;

/// Something that can be told how far a long operation has got and asked
/// whether it should stop.
pub trait ProgressCallback {
    /// Report progress in `[0, 1]`; return `true` to abort the operation
    fn set_progress_and_check_abort(&mut self, progress: f32) -> bool;
}

impl<F> ProgressCallback for F
where
    F: FnMut(f32) -> bool,
{
    fn set_progress_and_check_abort(&mut self, progress: f32) -> bool {
        self(progress)
    }
}

/// Never aborts and reports nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressCallback for NoProgress {
    fn set_progress_and_check_abort(&mut self, _progress: f32) -> bool {
        false
    }
}

/// Logs every reported step at info level and never aborts
#[derive(Debug, Clone)]
pub struct LogProgress {
    label: String,
}

impl LogProgress {
    pub fn new<S: Into<String>>(label: S) -> Self {
        Self { label: label.into() }
    }
}

impl ProgressCallback for LogProgress {
    fn set_progress_and_check_abort(&mut self, progress: f32) -> bool {
        info!("{} ...{:.1}% done", self.label, progress * 100.0);
        false
    }
}

/// Report `done` of `total` steps, turning an abort request into
/// [`Error::Aborted`].
pub fn report_step<P: ProgressCallback + ?Sized>(progress: &mut P, done: usize, total: usize) -> Result<()> {
    let fraction = if total == 0 { 1.0 } else { done as f32 / total as f32 };
    if progress.set_progress_and_check_abort(fraction) {
        return Err(Error::Aborted {
            progress: fraction * 100.0,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_receives_fractions() {
        let mut seen = Vec::new();
        let mut callback = |p: f32| {
            seen.push(p);
            false
        };
        for done in 1..=4 {
            report_step(&mut callback, done, 4).unwrap();
        }
        assert_eq!(seen, vec![0.25, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn test_abort_becomes_error() {
        let mut callback = |p: f32| p >= 0.5;
        assert!(report_step(&mut callback, 1, 4).is_ok());
        match report_step(&mut callback, 2, 4) {
            Err(Error::Aborted { progress }) => assert_eq!(progress, 50.0),
            other => panic!("expected abort, got {:?}", other),
        }
    }

    #[test]
    fn test_builtin_callbacks_never_abort() {
        assert!(!NoProgress.set_progress_and_check_abort(0.3));
        assert!(!LogProgress::new("loading").set_progress_and_check_abort(1.0));
        assert!(report_step(&mut NoProgress, 0, 0).is_ok());
    }
}
