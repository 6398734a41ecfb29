//! Command implementations for gta-map-rs

pub mod ide;
pub mod img;
pub mod ipl;
pub mod water;
