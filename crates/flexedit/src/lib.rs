//! Editor-session layer.
//!
//! Screen controllers that own a pending-edit ledger, a baseline
//! snapshot and the commit gate, plus the transport seam through which
//! one transactional commit payload is sent to the backend.

pub mod baseline;
pub mod entities;
pub mod scenarios;
pub mod transport;

pub use baseline::{AlternativeRecord, CommitResult, InsertedRow, ScenarioRecord};
pub use entities::EntityEditor;
pub use scenarios::ScenarioEditor;
pub use transport::{CommitError, CommitTransport};
