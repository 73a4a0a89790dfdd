//! Timeline stops, the navigator that moves between them, and the info
//! panel interface it reports to.

mod entry;
mod navigator;
mod presenter;

pub use entry::{EntryContent, RingPlacement, Timeline, TimelineEntry};
pub use navigator::{FlightFraming, OutOfRange, TimelineNavigator};
pub use presenter::{InfoPanel, LogPanel, RecordingPanel};
