//! Transport seam for the commit endpoint.
//!
//! The engine never performs I/O itself; an external collaborator
//! implements [`CommitTransport`] and attaches transport-level fields
//! (project id, CSRF and friends) on its side of the seam.

use thiserror::Error;

use flexedit_core::table::TableParseError;
use flexedit_core::validate::ScenarioValidationError;
use flexedit_core::CommitData;

use crate::baseline::CommitResult;

/// Why a commit did not go through. In every case the ledger is left
/// completely intact so the same payload can be regenerated and
/// retried.
#[derive(Debug, Error)]
pub enum CommitError {
    /// Backend rejected the commit; the message is shown verbatim.
    #[error("{0}")]
    Rejected(String),
    /// A commit is already in flight for this screen.
    #[error("a commit is already in progress")]
    CommitInProgress,
    #[error("{0}")]
    Validation(#[from] ScenarioValidationError),
    #[error("{0}")]
    Parse(#[from] TableParseError),
}

/// External collaborator that sends one commit payload to the backend.
///
/// A commit either fully succeeds or fully fails; there is no retry and
/// no partial-success handling at this level.
pub trait CommitTransport {
    fn commit(&mut self, data: &CommitData, message: &str) -> Result<CommitResult, CommitError>;
}
