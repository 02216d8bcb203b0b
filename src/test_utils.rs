//! Shared test utilities
//!
//! Deterministic record builders anchored at a fixed reference instant so
//! every analysis in the test suite is reproducible.

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::types::{
    AppointmentRecord, AppointmentStatus, CallEvent, CallEventKind, CallRecord, CallStatus,
    DocumentRecord,
};

/// Fixed reference instant: Tuesday 2025-07-15 12:00:00 UTC
pub fn reference_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 7, 15, 12, 0, 0).unwrap()
}

/// Appointment with explicit scheduled/created timestamps
pub fn appointment(
    id: &str,
    status: AppointmentStatus,
    scheduled_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
) -> AppointmentRecord {
    AppointmentRecord {
        id: id.to_string(),
        status,
        scheduled_at,
        created_at,
        prospect_name: Some(format!("Prospect {id}")),
    }
}

/// Appointment that already took place `days_ago` days before the reference
/// instant, created a week before its slot
pub fn past_appointment(id: &str, status: AppointmentStatus, days_ago: i64) -> AppointmentRecord {
    let scheduled = reference_now() - Duration::days(days_ago);
    appointment(id, status, scheduled, scheduled - Duration::days(7))
}

/// Scheduled appointment `days_ahead` days after the reference instant,
/// created one day before it
pub fn upcoming_appointment(id: &str, days_ahead: i64) -> AppointmentRecord {
    let now = reference_now();
    appointment(
        id,
        AppointmentStatus::Scheduled,
        now + Duration::days(days_ahead),
        now - Duration::days(1),
    )
}

/// Booking created `hours_ago` hours before the reference instant for a slot
/// tomorrow
pub fn recent_booking(id: &str, hours_ago: i64) -> AppointmentRecord {
    let now = reference_now();
    appointment(
        id,
        AppointmentStatus::Scheduled,
        now + Duration::days(1),
        now - Duration::hours(hours_ago),
    )
}

/// Booking created exactly `days_ago` whole days before the reference
/// instant, for calendar-window tests
pub fn created_booking(id: &str, days_ago: i64) -> AppointmentRecord {
    let now = reference_now();
    appointment(
        id,
        AppointmentStatus::Scheduled,
        now + Duration::days(1),
        now - Duration::days(days_ago),
    )
}

/// Document created at the given instant with no later update
pub fn fresh_document(id: &str, title: &str, content: &str, now: DateTime<Utc>) -> DocumentRecord {
    DocumentRecord::new(id, title, content, now)
}

/// Call with an explicit creation instant
pub fn call_at(
    id: &str,
    status: CallStatus,
    duration_seconds: u32,
    appointment_created: bool,
    created_at: DateTime<Utc>,
) -> CallRecord {
    CallRecord::new(id, status, duration_seconds, appointment_created, created_at)
}

/// `count` completed calls of identical duration spread across the hours of
/// the day; every third call books an appointment
pub fn steady_calls(count: usize, duration_seconds: u32) -> Vec<CallRecord> {
    (0..count)
        .map(|i| {
            call_at(
                &format!("call{i}"),
                CallStatus::Completed,
                duration_seconds,
                i % 3 == 0,
                reference_now() - Duration::hours((i % 24) as i64),
            )
        })
        .collect()
}

/// Funnel event stream where the first `handled` calls were handled, the
/// first `qualified` qualified and the first `converted` booked
pub fn funnel_events(
    received: usize,
    handled: usize,
    qualified: usize,
    converted: usize,
) -> Vec<CallEvent> {
    let now = reference_now();
    let mut events = Vec::new();

    for i in 0..received {
        let call_id = format!("call{i}");
        let at = now - Duration::minutes(i as i64);
        events.push(CallEvent::new(
            format!("ev-{i}-received"),
            CallEventKind::Received,
            at,
            &call_id,
        ));
        if i < handled {
            events.push(CallEvent::new(
                format!("ev-{i}-handled"),
                CallEventKind::Handled,
                at + Duration::seconds(2),
                &call_id,
            ));
        }
        if i < qualified {
            events.push(CallEvent::new(
                format!("ev-{i}-qualified"),
                CallEventKind::Qualified,
                at + Duration::seconds(60),
                &call_id,
            ));
        }
        if i < converted {
            events.push(CallEvent::new(
                format!("ev-{i}-converted"),
                CallEventKind::AppointmentCreated,
                at + Duration::seconds(120),
                &call_id,
            ));
        }
    }

    events
}

/// A realistic busy-week snapshot mixing recent bookings, past outcomes and
/// upcoming slots
pub fn busy_week(now: DateTime<Utc>) -> Vec<AppointmentRecord> {
    let mut appointments = Vec::new();

    for i in 0..8i64 {
        appointments.push(appointment(
            &format!("b{i}"),
            AppointmentStatus::Scheduled,
            now + Duration::days(2),
            now - Duration::hours(i * 20),
        ));
    }
    for i in 0..4i64 {
        let scheduled = now - Duration::days(3 + i);
        appointments.push(appointment(
            &format!("ns{i}"),
            AppointmentStatus::NoShow,
            scheduled,
            scheduled - Duration::days(7),
        ));
    }
    for i in 0..6i64 {
        let scheduled = now - Duration::days(2 + i);
        appointments.push(appointment(
            &format!("done{i}"),
            AppointmentStatus::Completed,
            scheduled,
            scheduled - Duration::days(7),
        ));
    }
    for i in 0..2i64 {
        let scheduled = now - Duration::days(4 + i);
        appointments.push(appointment(
            &format!("cx{i}"),
            AppointmentStatus::Cancelled,
            scheduled,
            scheduled - Duration::days(7),
        ));
    }
    for i in 0..12i64 {
        appointments.push(appointment(
            &format!("up{i}"),
            AppointmentStatus::Scheduled,
            now + Duration::days(1 + (i % 10)),
            now - Duration::days(1),
        ));
    }

    appointments
}
