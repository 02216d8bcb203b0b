//! Live change detection and notifications
//!
//! The live-update subsystem turns successive [`LiveStats`] snapshots into
//! operator notifications: new bookings, cumulative milestones, knowledge-base
//! additions and short-term booking spikes. Notifications accumulate in a
//! caller-owned [`NotificationStore`](store::NotificationStore) and are pushed
//! to callbacks by the [`PollingManager`](polling::PollingManager).
//!
//! Change detection works on aggregate counters only: when the appointment
//! total rises by N, it emits N generic booking notifications without knowing
//! which records caused them. Callers that do have record identity can build
//! richer notifications with the [`Notification`] constructors.

pub mod polling;
pub mod store;


use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::types::{AppointmentRecord, Priority};

/// Cumulative appointment totals that trigger a one-time milestone
/// notification when first crossed
pub const MILESTONES: [u64; 4] = [1, 10, 50, 100];

/// Kind of live notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    NewBooking,
    AppointmentConfirmed,
    AppointmentCancelled,
    Milestone,
    Alert,
}

/// A single operator notification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    pub read: bool,
    pub priority: Priority,
}

impl Notification {
    fn build(
        kind: NotificationKind,
        title: impl Into<String>,
        message: impl Into<String>,
        priority: Priority,
        data: Option<serde_json::Value>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: format!("notif-{}", Uuid::new_v4()),
            kind,
            title: title.into(),
            message: message.into(),
            timestamp: now,
            data,
            read: false,
            priority,
        }
    }

    /// Booking notification for a specific appointment record
    pub fn new_booking(appointment: &AppointmentRecord, now: DateTime<Utc>) -> Self {
        let who = appointment.prospect_name.as_deref().unwrap_or("A client");
        Self::build(
            NotificationKind::NewBooking,
            "New booking",
            format!(
                "{} booked an appointment for {}",
                who,
                appointment.scheduled_at.format("%B %d at %H:%M")
            ),
            Priority::High,
            serde_json::to_value(appointment).ok(),
            now,
        )
    }

    /// Confirmation notification for a specific appointment record
    pub fn confirmation(appointment: &AppointmentRecord, now: DateTime<Utc>) -> Self {
        let who = appointment.prospect_name.as_deref().unwrap_or("A client");
        Self::build(
            NotificationKind::AppointmentConfirmed,
            "Appointment confirmed",
            format!("{who} confirmed their appointment"),
            Priority::Medium,
            serde_json::to_value(appointment).ok(),
            now,
        )
    }

    /// Cancellation notification for a specific appointment record
    pub fn cancellation(appointment: &AppointmentRecord, now: DateTime<Utc>) -> Self {
        let who = appointment.prospect_name.as_deref().unwrap_or("A client");
        Self::build(
            NotificationKind::AppointmentCancelled,
            "Appointment cancelled",
            format!("{who} cancelled their appointment"),
            Priority::High,
            serde_json::to_value(appointment).ok(),
            now,
        )
    }

    /// Milestone notification for a crossed cumulative threshold
    pub fn milestone(threshold: u64, total: u64, now: DateTime<Utc>) -> Self {
        let title = match threshold {
            1 => "First booking received".to_string(),
            t => format!("{t} bookings reached"),
        };
        Self::build(
            NotificationKind::Milestone,
            title,
            format!("You now have {total} bookings in total"),
            Priority::Medium,
            Some(json!({ "milestone": threshold, "count": total })),
            now,
        )
    }
}

/// Aggregate counters captured at one instant; two consecutive snapshots are
/// the sole input to change detection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveStats {
    pub total_appointments: u64,
    pub total_calls: u64,
    pub total_documents: u64,
    /// Bookings created in the trailing 24 hours
    pub recent_bookings: u64,
    pub pending_appointments: u64,
    pub last_update: DateTime<Utc>,
}

/// Diff two successive snapshots into notifications.
///
/// Emission order: one booking notification per unit of appointment increase,
/// then crossed milestones, then a document alert, then a spike alert.
pub fn detect_changes(
    previous: &LiveStats,
    current: &LiveStats,
    now: DateTime<Utc>,
) -> Vec<Notification> {
    let mut notifications = Vec::new();

    if current.total_appointments > previous.total_appointments {
        let new_bookings = current.total_appointments - previous.total_appointments;
        for _ in 0..new_bookings {
            notifications.push(Notification::build(
                NotificationKind::NewBooking,
                "New booking",
                "A new appointment was just created through your widget",
                Priority::High,
                Some(json!({ "new_total": current.total_appointments })),
                now,
            ));
        }
    }

    for threshold in MILESTONES {
        if previous.total_appointments < threshold && current.total_appointments >= threshold {
            notifications.push(Notification::milestone(
                threshold,
                current.total_appointments,
                now,
            ));
        }
    }

    if current.total_documents > previous.total_documents {
        notifications.push(Notification::build(
            NotificationKind::Alert,
            "New document",
            "A document was added to your knowledge base",
            Priority::Low,
            Some(json!({ "new_total": current.total_documents })),
            now,
        ));
    }

    if current.recent_bookings >= 5 && previous.recent_bookings < 5 {
        notifications.push(Notification::build(
            NotificationKind::Alert,
            "Booking spike",
            format!("{} bookings in the last 24 hours", current.recent_bookings),
            Priority::Medium,
            Some(json!({ "count": current.recent_bookings })),
            now,
        ));
    }

    notifications
}
