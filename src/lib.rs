//! upset-rs: declarative UpSet plots for pre-aggregated set-membership tables.
//!
//! The builder turns a boolean membership table into a renderer-agnostic
//! [`ChartDescription`]: intersection-size bars, per-category totals and the
//! membership dot-matrix laid out on a 2×2 grid. Exporters produce a plotly
//! figure or a standalone HTML page from that description.

pub mod api;
pub mod chart;
pub mod core;
pub mod error;
pub mod telemetry;

pub use api::{UpsetConfig, build_upset_chart, build_upset_chart_with_config};
pub use chart::ChartDescription;
pub use crate::core::{MembershipRow, MembershipTable};
pub use error::{UpsetError, UpsetResult};
