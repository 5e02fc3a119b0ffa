//! In-process chat transports.

mod recording;

pub use recording::{RecordingTransport, Sent};
