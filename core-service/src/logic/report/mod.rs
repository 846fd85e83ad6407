//! Report Module
//!
//! Everything derived from a recorded run for humans and files.
//!
//! ## Structure
//! - `csv.rs` - fixed-schema CSV export
//! - `narration.rs` - lazy timeline messages
//! - `indicators.rs` - ok/warn/bad classification
//! - `money.rs` - currency and fixed-decimal formatting

pub mod csv;
pub mod narration;
pub mod indicators;
pub mod money;

pub use csv::{csv_row, to_csv, write_csv, CSV_HEADER};
pub use narration::{log_line, Narration, NarrationIter, NarrationStep};
pub use indicators::{Indicator, Indicators, Level};
pub use money::{format_usd, to_fixed};
