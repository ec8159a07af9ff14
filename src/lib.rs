//! agriflow - Trace a field boundary, measure it in Thai land units and
//! estimate its daily irrigation water

pub mod api;
pub mod config;
pub mod demand;
pub mod domain;
pub mod geometry;
pub mod state;
pub mod units;
