//! Interactive correction loop
//!
//! A session repeatedly edits one entity in place and validates it until the
//! validator accepts it or the operator cancels an edit pass:
//!
//! ```text
//! Editing --cancel--> Aborted
//! Editing ----------> Validating --may proceed--> Accepted
//!                     Validating --otherwise----> (introduction) Editing
//! ```
//!
//! There is no retry limit. Callers driving the loop without a human need
//! their own cap, typically by answering `Cancel` from their I/O collaborator.
//! Nothing is persisted by the session itself.

pub mod filler;
pub mod io;

pub use filler::{FillOutcome, FormFiller};
pub use io::{FieldInput, FieldPrompt, InteractiveIo};

use serde::Serialize;
use std::fmt;
use tracing::{debug, info};

use crate::error::Result;
use crate::model::{Entity, ResourceBundle};
use crate::report::ValidationReport;
use crate::validator::Validator;

/// States of a correction session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SessionState {
    Editing,
    Validating,
    Accepted,
    Aborted,
}

impl SessionState {
    pub fn is_terminal(self) -> bool {
        matches!(self, SessionState::Accepted | SessionState::Aborted)
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionState::Editing => "editing",
            SessionState::Validating => "validating",
            SessionState::Accepted => "accepted",
            SessionState::Aborted => "aborted",
        };
        f.write_str(name)
    }
}

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SessionOutcome {
    Accepted,
    Aborted,
}

/// Record of a finished session
#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    pub outcome: SessionOutcome,
    /// Number of validation passes run
    pub passes: usize,
    /// Every state entered, in order
    pub history: Vec<SessionState>,
    /// Report of the last validation pass, if any ran
    pub report: Option<ValidationReport>,
}

impl SessionSummary {
    pub fn is_accepted(&self) -> bool {
        self.outcome == SessionOutcome::Accepted
    }
}

/// Text shown before an edit pass that follows an unacceptable validation
pub fn introduction(report: &ValidationReport) -> String {
    format!(
        "There are issues with entered data ({} with {} message(s)), please revise your input:",
        report.severity(),
        report.len()
    )
}

/// One correction session over a single entity
pub struct CorrectionSession<'a> {
    validator: &'a dyn Validator,
    bundle: &'a ResourceBundle,
    io: &'a mut dyn InteractiveIo,
    history: Vec<SessionState>,
}

impl<'a> CorrectionSession<'a> {
    pub fn new(
        validator: &'a dyn Validator,
        bundle: &'a ResourceBundle,
        io: &'a mut dyn InteractiveIo,
    ) -> Self {
        Self {
            validator,
            bundle,
            io,
            history: Vec::new(),
        }
    }

    fn enter(&mut self, state: SessionState) {
        debug!(state = %state, "Correction session transition");
        self.history.push(state);
    }

    /// Drive the session to a terminal state.
    ///
    /// Errors are I/O faults of the collaborator only; validation problems
    /// keep the loop going.
    pub fn run<E: Entity>(mut self, entity: &mut E) -> Result<SessionSummary> {
        let filler = FormFiller::new(self.bundle);
        let kind = entity.kind();
        let mut last: Option<ValidationReport> = None;
        let mut passes = 0;

        info!(kind = %kind, validator = self.validator.name(), "Starting correction session");

        loop {
            if let Some(report) = last.as_ref().filter(|r| !r.may_proceed()) {
                self.io.show_text(&introduction(report))?;
            }

            self.enter(SessionState::Editing);
            if filler.fill(&mut *self.io, entity, last.as_ref())? == FillOutcome::Cancelled {
                self.enter(SessionState::Aborted);
                info!(kind = %kind, passes, "Correction session aborted by operator");
                return Ok(self.finish(SessionOutcome::Aborted, passes, last));
            }

            self.enter(SessionState::Validating);
            let report = self.validator.validate(&kind, entity.forms());
            passes += 1;

            if report.may_proceed() {
                self.enter(SessionState::Accepted);
                info!(kind = %kind, passes, severity = %report.severity(), "Correction session accepted");
                return Ok(self.finish(SessionOutcome::Accepted, passes, Some(report)));
            }

            last = Some(report);
        }
    }

    fn finish(
        self,
        outcome: SessionOutcome,
        passes: usize,
        report: Option<ValidationReport>,
    ) -> SessionSummary {
        SessionSummary {
            outcome,
            passes,
            history: self.history,
            report,
        }
    }
}
