//! Run Module
//!
//! Keeps the most recent model run so it can be narrated and exported.
//!
//! ## Structure
//! - `record.rs` - RunRecord (immutable, timestamped)
//! - `recorder.rs` - single-slot RunRecorder + Clock
//! - `session.rs` - Session context (constants + clock + recorder)

pub mod record;
pub mod recorder;
pub mod session;

pub use record::RunRecord;
pub use recorder::{Clock, FixedClock, RunRecorder, SystemClock};
pub use session::{Session, SharedSession};
