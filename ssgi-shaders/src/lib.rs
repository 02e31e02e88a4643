//! Per-pixel entry points of SSGI's passes.
//!
//! Each pass exposes a single `fs()` that computes one output pixel given its
//! fragment coordinate; the frame driver is responsible for invoking it over
//! the whole viewport.

pub mod edge_detection;
pub mod reflection;
