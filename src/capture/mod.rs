//! Poster capture module
//!
//! This module consolidates:
//! - The sequential capture pipeline (pipeline.rs)
//! - PNG encoding and atomic file export (export.rs)

pub mod export;
pub mod pipeline;

pub use pipeline::{CapturePipeline, CaptureSettings};
