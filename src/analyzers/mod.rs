//! Per-state aggregation of the sampled incidents.
//!
//! This module counts incidents per state (optionally normalized by a static
//! population table), builds the per-state day/night feature heatmaps and
//! drives the full load, sample, aggregate and write run.

pub mod aggregate;
pub mod analyzer;
pub mod heatmap;
pub mod population;
pub mod types;
