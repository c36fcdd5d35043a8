pub mod protocol;

pub use protocol::{BodyInstance, FrameBuffer, FrameLayout};
