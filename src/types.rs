//! Operational record types consumed by the engine
//!
//! These are snapshots of caller-owned data: the engine reads them, never
//! mutates them, and never stores them beyond the duration of an analysis
//! call. Persistence, identity and lifecycle belong to the services that own
//! the records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Terminal status of an inbound phone call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallStatus {
    Completed,
    Missed,
    Abandoned,
    Failed,
}

/// Lifecycle status of an appointment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Scheduled,
    Confirmed,
    Completed,
    Cancelled,
    NoShow,
}

/// A single inbound call handled (or missed) by the voice assistant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallRecord {
    pub id: String,
    pub status: CallStatus,
    pub duration_seconds: u32,
    pub cost_usd: f64,
    /// Whether this call resulted in a booked appointment
    pub appointment_created: bool,
    pub created_at: DateTime<Utc>,
}

impl CallRecord {
    pub fn new(
        id: impl Into<String>,
        status: CallStatus,
        duration_seconds: u32,
        appointment_created: bool,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            status,
            duration_seconds,
            cost_usd: 0.0,
            appointment_created,
            created_at,
        }
    }
}

/// An appointment booked through the widget or the voice assistant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentRecord {
    pub id: String,
    pub status: AppointmentStatus,
    pub scheduled_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub prospect_name: Option<String>,
}

impl AppointmentRecord {
    pub fn new(
        id: impl Into<String>,
        status: AppointmentStatus,
        scheduled_at: DateTime<Utc>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            status,
            scheduled_at,
            created_at,
            prospect_name: None,
        }
    }
}

/// A knowledge-base document the assistant answers from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub id: String,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub source_type: String,
}

impl DocumentRecord {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            content: content.into(),
            created_at,
            updated_at: None,
            source_type: "manual".to_string(),
        }
    }

    /// Timestamp of the most recent modification, falling back to creation
    pub fn last_updated(&self) -> DateTime<Utc> {
        self.updated_at.unwrap_or(self.created_at)
    }
}

/// Stage reached by a call in the assistant funnel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallEventKind {
    Received,
    Handled,
    Qualified,
    AppointmentCreated,
    Rejected,
    Missed,
    Abandoned,
}

/// A funnel-stage event attached to a call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallEvent {
    pub id: String,
    pub kind: CallEventKind,
    pub timestamp: DateTime<Utc>,
    pub call_id: String,
    pub duration_seconds: Option<f64>,
}

impl CallEvent {
    pub fn new(
        id: impl Into<String>,
        kind: CallEventKind,
        timestamp: DateTime<Utc>,
        call_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            timestamp,
            call_id: call_id.into(),
            duration_seconds: None,
        }
    }
}

/// How strongly an observation affects the business
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    High,
    Medium,
    Low,
}

/// Urgency attached to gaps, suggestions, funnel insights and notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Critical,
    High,
    Medium,
    Low,
}
