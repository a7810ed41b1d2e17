//! # Pipeline Module
//!
//! Runs the whole job for one metric and country: retrieve, prepare, render
//! and mix, in that order, stopping at the first error.

pub mod engine;

pub use engine::{OutputPaths, ReelEngine, ReelOutput};
