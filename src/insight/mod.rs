//! Written summaries of the selected data from an external text-generation
//! service.
//!
//! ```text
//!  filtered records ──▶ request ──▶ worker thread ──▶ client ──▶ service
//!                                        │
//!                            channel ◀───┘  polled by the UI loop
//! ```

pub mod client;
pub mod request;
pub mod worker;

pub use client::{service_from_config, HttpInsightService, InsightService, UnconfiguredService};
pub use request::{build_insight_request, InsightRequest, InsightSummary};
pub use worker::{spawn_insight_job, InsightJob, InsightPanel, FALLBACK_MESSAGE};
