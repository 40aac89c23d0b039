#![forbid(unsafe_code)]

//! Core: measured-item model and the width-measurement boundary.

pub mod item;
pub mod measure;
