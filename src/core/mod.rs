//! Presentation and playback of selected entries.

pub mod dispatch;
pub mod present;
pub mod session;

pub use dispatch::{DispatchOutcome, Dispatcher};
pub use present::{file_uri, render_entry};
pub use session::{open_catalog, play_batch, report_candidates, BatchReport, StdinPrompter};
