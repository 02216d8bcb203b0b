//! # voiceops-insights
//!
//! Insight and live-update engine for a multi-tenant voice-assistant
//! operations platform. The crate turns raw operational records (calls,
//! appointments, knowledge-base documents) into health scores, trend
//! classifications, ranked actionable insights and live change
//! notifications for an operator dashboard.
//!
//! # Overview
//!
//! The engine is a pure computation layer over snapshots supplied by the
//! caller:
//!
//! - **[`window`]**: rolling-hours and calendar-day window counting with
//!   current-vs-previous comparison
//! - **[`score`]**: bounded `[0, 100]` scoring formulas for bookings, the
//!   call funnel and knowledge-base health
//! - **[`trend`]**: up/down/stable classification between two windows
//! - **[`insights`]**: rule-based booking and appointment detectors plus
//!   trends and predictions
//! - **[`knowledge`]**: knowledge-base gap detection, content suggestions
//!   and health scoring
//! - **[`funnel`]**: inbound call-funnel analytics for the assistant
//! - **[`ranking`]**: the shared ranking policies ordering every output list
//! - **[`live`]**: snapshot diffing, a capped notification store and a
//!   polling manager with injectable snapshot sources
//!
//! Storage, transport, authentication and presentation are out of scope;
//! callers pass record slices in and receive serializable analysis values
//! back.
//!
//! # Example
//!
//! ```no_run
//! use voiceops_insights::insights::analyze_operations;
//! use voiceops_insights::knowledge::analyze_knowledge_base;
//! use chrono::Utc;
//! use std::collections::HashMap;
//!
//! # fn example(
//! #     calls: &[voiceops_insights::types::CallRecord],
//! #     appointments: &[voiceops_insights::types::AppointmentRecord],
//! #     documents: &[voiceops_insights::types::DocumentRecord],
//! # ) {
//! let now = Utc::now();
//! let operations = analyze_operations(calls, appointments, now);
//! println!("performance score: {}", operations.score);
//!
//! let kb = analyze_knowledge_base(documents, &HashMap::new(), now);
//! println!("kb health: {}", kb.health_score.overall);
//! # }
//! ```
//!
//! # Tenancy
//!
//! Nothing in the crate is global: analyses are pure functions, and the live
//! subsystem's mutable state (notification store, last snapshot) is owned by
//! the caller and a single [`live::polling::PollingManager`] instance. A
//! multi-tenant process creates one store and one manager per tenant.

pub mod error;
pub mod funnel;
pub mod insights;
pub mod knowledge;
pub mod live;
pub mod ranking;
pub mod score;
pub mod trend;
pub mod types;
pub mod window;

#[cfg(test)]
pub mod test_utils;


pub use error::{EngineError, Result};
pub use funnel::{analyze_funnel, FunnelAnalysis, FunnelInsight};
pub use insights::{analyze_operations, Insight, OperationsAnalysis};
pub use knowledge::{analyze_knowledge_base, HealthScore, KnowledgeAnalysis};
pub use live::polling::{PollingConfig, PollingManager, SimulatedStatsSource, StatsSource};
pub use live::store::NotificationStore;
pub use live::{detect_changes, LiveStats, Notification, NotificationKind};
pub use ranking::RankingPolicy;
pub use trend::Trend;
pub use types::{
    AppointmentRecord, AppointmentStatus, CallEvent, CallEventKind, CallRecord, CallStatus,
    DocumentRecord, Impact, Priority,
};
pub use window::{compare_windows, count_in_range, count_recent, Window, WindowComparison};
