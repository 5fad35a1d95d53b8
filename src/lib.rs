//! gb2260-rs
//! =========
//!
//! Umbrella crate for the workspace. Re-exports [`gb2260_core`] so the demos
//! under `demos/` can `use gb2260_rs::prelude::*`.

pub use gb2260_core::*;
