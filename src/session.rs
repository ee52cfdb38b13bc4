//! Hand-off state between the form step and the results step.
//!
//! Each submission gets a `SubmissionTicket` carrying a generation number.
//! Results are only stored if they arrive with the newest ticket, so a slow
//! response to an earlier submission cannot replace a newer one.

use crate::model::{FeatureVector, ResultsView};

/// Proof that a submission was started. Hand it back to `Session::complete`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionTicket {
    generation: u64,
}

impl SubmissionTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    generation: u64,
    form: Option<FeatureVector>,
    results: Option<ResultsView>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `form` as the current submission and drops any previous
    /// results.
    pub fn begin_submission(&mut self, form: FeatureVector) -> SubmissionTicket {
        self.generation += 1;
        self.form = Some(form);
        self.results = None;
        SubmissionTicket {
            generation: self.generation,
        }
    }

    /// Stores `results` if `ticket` belongs to the latest submission.
    /// Returns `false` (and discards the results) for a stale ticket.
    pub fn complete(&mut self, ticket: SubmissionTicket, results: ResultsView) -> bool {
        if ticket.generation != self.generation {
            return false;
        }
        self.results = Some(results);
        true
    }

    pub fn is_current(&self, ticket: SubmissionTicket) -> bool {
        ticket.generation == self.generation
    }

    pub fn form(&self) -> Option<&FeatureVector> {
        self.form.as_ref()
    }

    pub fn results(&self) -> Option<&ResultsView> {
        self.results.as_ref()
    }

    /// Forgets the form and results. Outstanding tickets become stale.
    pub fn clear(&mut self) {
        self.generation += 1;
        self.form = None;
        self.results = None;
    }
}
