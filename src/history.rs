//! Stroke history: every sampled point, in capture order, grouped into runs.
//!
//! A run is the contiguous block of samples produced by one gesture. It opens
//! with a [`Role::Begin`] sample and closes with a [`Role::End`] sample (a
//! one-point gesture is a single [`Role::Single`] sample). Runs never
//! interleave, and only the last run may still be open.
//!
//! Undo removes whole runs from the tail; nothing ever edits a recorded sample
//! except [`History::close_run`], which retags the last sample of the open
//! run as its end.

#[cfg(test)]
#[path = "history_test.rs"]
mod history_test;

use crate::brush::Brush;
use crate::sampler::Point;

/// Error returned by history mutations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum HistoryError {
    /// No complete run to remove.
    #[error("history has no complete run")]
    Empty,
    /// A gesture is still in progress; its run cannot be removed yet.
    #[error("a run is still open")]
    RunOpen,
    /// A continuation sample arrived with no open run.
    #[error("no open run to append to")]
    NoOpenRun,
    /// An opening sample arrived while another run was open.
    #[error("a run is already open")]
    RunAlreadyOpen,
}

/// Where a sample sits within its run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// First sample of a run; the path restarts here.
    Begin,
    /// Interior sample.
    Middle,
    /// Last sample of a run; the path is stroked here.
    End,
    /// Both first and last: the gesture produced one point.
    Single,
}

impl Role {
    /// Whether this sample starts a run.
    #[must_use]
    pub fn opens(self) -> bool {
        matches!(self, Self::Begin | Self::Single)
    }

    /// Whether this sample finishes a run.
    #[must_use]
    pub fn closes(self) -> bool {
        matches!(self, Self::End | Self::Single)
    }

    /// The role this sample takes when it becomes the last of its run.
    fn closed(self) -> Self {
        match self {
            Self::Begin | Self::Single => Self::Single,
            Self::Middle | Self::End => Self::End,
        }
    }
}

/// One recorded point with the brush active when it was captured.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    /// Surface-local position.
    pub position: Point,
    /// Width and color at capture time.
    pub brush: Brush,
    /// Position within the run.
    pub role: Role,
}

impl Sample {
    #[must_use]
    pub fn new(position: Point, brush: Brush, role: Role) -> Self {
        Self { position, brush, role }
    }
}

/// Ordered sample log.
#[derive(Debug, Clone, Default)]
pub struct History {
    samples: Vec<Sample>,
    /// Index of the first sample of the open run, if any.
    open_start: Option<usize>,
}

impl History {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sample.
    ///
    /// Opening roles start a run, closing roles finish it.
    ///
    /// # Errors
    ///
    /// [`HistoryError::RunAlreadyOpen`] for an opening sample while a run is
    /// open, [`HistoryError::NoOpenRun`] for a continuation with none open.
    /// The sample is not recorded in either case.
    pub fn record(&mut self, sample: Sample) -> Result<(), HistoryError> {
        match (sample.role.opens(), self.open_start) {
            (true, Some(_)) => return Err(HistoryError::RunAlreadyOpen),
            (false, None) => return Err(HistoryError::NoOpenRun),
            (true, None) => self.open_start = Some(self.samples.len()),
            (false, Some(_)) => {}
        }
        if sample.role.closes() {
            self.open_start = None;
        }
        self.samples.push(sample);
        Ok(())
    }

    /// Close the open run by retagging its last sample as the end.
    ///
    /// Returns the number of samples in the closed run.
    ///
    /// # Errors
    ///
    /// [`HistoryError::NoOpenRun`] if no run is open.
    pub fn close_run(&mut self) -> Result<usize, HistoryError> {
        let start = self.open_start.take().ok_or(HistoryError::NoOpenRun)?;
        let last = self.samples.last_mut().ok_or(HistoryError::NoOpenRun)?;
        last.role = last.role.closed();
        Ok(self.samples.len() - start)
    }

    /// Remove and return the most recent complete run.
    ///
    /// # Errors
    ///
    /// [`HistoryError::RunOpen`] while a gesture is in progress,
    /// [`HistoryError::Empty`] when there is nothing to remove.
    pub fn pop_last_run(&mut self) -> Result<Vec<Sample>, HistoryError> {
        if self.open_start.is_some() {
            return Err(HistoryError::RunOpen);
        }
        let start = self
            .samples
            .iter()
            .rposition(|s| s.role.opens())
            .ok_or(HistoryError::Empty)?;
        Ok(self.samples.split_off(start))
    }

    /// Drop every sample and any open run.
    pub fn clear(&mut self) {
        self.samples.clear();
        self.open_start = None;
    }

    /// All samples in capture order.
    #[must_use]
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Samples grouped by run, oldest first.
    pub fn runs(&self) -> impl Iterator<Item = &[Sample]> {
        self.samples.chunk_by(|_, next| !next.role.opens())
    }

    #[must_use]
    pub fn run_count(&self) -> usize {
        self.samples.iter().filter(|s| s.role.opens()).count()
    }

    #[must_use]
    pub fn is_run_open(&self) -> bool {
        self.open_start.is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
