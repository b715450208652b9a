pub mod signals;
pub mod status;
pub mod watcher;

pub use signals::{DedupGate, Evaluator};
pub use status::{InstrumentStatus, StatusBoard};
pub use watcher::{detect_new_signal, Watcher};
