// src/services/mod.rs
pub mod calendar;
pub mod classifier;
pub mod dashboard;
pub mod projection;
pub mod reserves;
pub mod trend;
