// extensions/mod.rs
//
// Helpers shared by the choreography and the scene that carry no state of
// their own.

pub mod easing;

pub use easing::{Easing, lerp, lerp_vec3};
