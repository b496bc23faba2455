//! # API Shared
//!
//! Shared wire types for the dashboard's HTML and JSON surfaces.
//!
//! Contains:
//! - Chart definitions in the plotly `{data, layout}` schema (`charts` module)
//! - Classification results (`classify` module)
//! - `HealthService` and its response type
//!
//! Used by `dr-core` to shape its output and by `api-rest` to serve it.

pub mod charts;
pub mod classify;
pub mod health;

pub use charts::{Axis, BarMode, BarTrace, Graph, GraphsRes, Layout};
pub use classify::{CategoryLabel, ClassifyRes};
pub use health::{HealthRes, HealthService};
