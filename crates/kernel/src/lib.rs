//! Reference host: a simulated world of entities that drives dynamic lights
//! the way a game client would.
//!
//! # Invariants
//! - Every entity carries the id of the world it was spawned into.
//! - A new world is announced to the light registry before it ticks.

pub mod client;
pub mod world;

pub use client::Client;
pub use world::{DEFAULT_EYE_HEIGHT, Entity, World};

pub fn crate_info() -> &'static str {
    "dynlights-kernel v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("kernel"));
    }
}
