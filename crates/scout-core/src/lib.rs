// Library root: the dataset, filter pipeline, metric panels, export and
// per-session selection context behind the FFCV scout dashboard.

pub mod catalog;
pub mod config;
pub mod dataset;
pub mod export;
pub mod panels;
pub mod pipeline;
pub mod report;
pub mod session;
