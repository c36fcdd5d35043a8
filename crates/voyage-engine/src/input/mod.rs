pub mod scroll;

pub use scroll::{ScrollBinding, ScrollTracker};
