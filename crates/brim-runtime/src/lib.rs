#![forbid(unsafe_code)]

//! Brim Runtime
//!
//! This crate ties a host's width measurer to the layout engine and drives
//! recomputation over time: resize events in, generation-stamped layout
//! frames out.
//!
//! # Key Components
//!
//! - [`ResizeThrottle`] - Leading-edge, trailing-flush width throttle
//! - [`LayoutPipeline`] - Measure, compute, publish orchestrator
//! - [`LayoutFrame`] - One published computation with its generation
//! - [`LatestFrame`] - Consumer-side last-write-wins frame slot
//!
//! # Role in Brim
//! The engine in `brim-layout` is pure and per-call; everything temporal
//! lives here. The pipeline coalesces resize bursts to one computation per
//! throttle window, defers the overflow trigger's measurement until it has
//! actually been painted, and stamps frames so a presenter can discard
//! stale ones without inspecting them.
//!
//! Decision points log through `tracing` under the `brim.pipeline` target.

pub mod pipeline;
pub mod throttle;

pub use pipeline::{LatestFrame, LayoutFrame, LayoutPipeline, PipelineStats};
pub use throttle::{DEFAULT_WINDOW, ResizeThrottle, ThrottleStats};
