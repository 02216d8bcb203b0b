//! Rule-based insight detectors
//!
//! Each detector receives an immutable snapshot plus an explicit `now` and
//! returns freshly built insights. Thresholds here are operator-facing
//! contracts; change them only with a dashboard copy update.

use chrono::{DateTime, Datelike, Timelike, Utc};

use super::{Insight, InsightCategory, InsightKind, InsightMetrics, REVENUE_PER_APPOINTMENT};
use crate::types::{AppointmentRecord, AppointmentStatus, Impact};
use crate::window::{self, Window};

const SETTINGS_URL: &str = "/dashboard/settings";

const WEEKDAYS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Booking-volume patterns over the trailing week and day.
///
/// An empty snapshot short-circuits into a single `no-bookings` warning; the
/// other rules only apply once at least one booking exists.
pub fn analyze_booking_patterns(
    appointments: &[AppointmentRecord],
    now: DateTime<Utc>,
) -> Vec<Insight> {
    let mut insights = Vec::new();

    if appointments.is_empty() {
        insights.push(Insight {
            id: "no-bookings".to_string(),
            kind: InsightKind::Warning,
            category: InsightCategory::Performance,
            title: "No bookings detected".to_string(),
            description: "Your widget has not received any bookings yet. Check that it is \
                          integrated and visible."
                .to_string(),
            impact: Impact::High,
            action: Some("Check widget integration".to_string()),
            action_url: Some(SETTINGS_URL.to_string()),
            metrics: None,
            timestamp: now,
        });
        return insights;
    }

    let last7 = window::count_recent(
        appointments,
        |a| a.created_at,
        now,
        Window::RollingHours(7 * 24),
    );

    if last7 < 2 {
        insights.push(Insight {
            id: "low-booking-rate".to_string(),
            kind: InsightKind::Warning,
            category: InsightCategory::Performance,
            title: "Low booking rate".to_string(),
            description: format!(
                "Only {last7} booking(s) this week. Increase your widget's visibility."
            ),
            impact: Impact::High,
            action: Some("Improve widget visibility".to_string()),
            action_url: Some(SETTINGS_URL.to_string()),
            metrics: Some(InsightMetrics::with_target(last7 as f64, 10.0)),
            timestamp: now,
        });
    } else if last7 > 15 {
        insights.push(Insight {
            id: "excellent-booking-rate".to_string(),
            kind: InsightKind::Success,
            category: InsightCategory::Performance,
            title: "Excellent booking rate".to_string(),
            description: format!("{last7} bookings this week. Your widget is performing very well."),
            impact: Impact::High,
            action: None,
            action_url: None,
            metrics: Some(InsightMetrics::current(last7 as f64)),
            timestamp: now,
        });
    }

    let last24h = window::count_recent(appointments, |a| a.created_at, now, Window::RollingHours(24));
    if last24h > 5 {
        insights.push(Insight {
            id: "booking-spike".to_string(),
            kind: InsightKind::Success,
            category: InsightCategory::Performance,
            title: "Booking spike detected".to_string(),
            description: format!("{last24h} bookings in the last 24 hours. Prepare your team."),
            impact: Impact::Medium,
            action: None,
            action_url: None,
            metrics: Some(InsightMetrics::current(last24h as f64)),
            timestamp: now,
        });
    }

    insights
}

/// Attendance quality: no-shows, cancellations and the strongest weekday.
pub fn analyze_appointment_quality(
    appointments: &[AppointmentRecord],
    now: DateTime<Utc>,
) -> Vec<Insight> {
    let mut insights = Vec::new();

    if appointments.is_empty() {
        return insights;
    }

    let past: Vec<&AppointmentRecord> =
        appointments.iter().filter(|a| a.scheduled_at < now).collect();

    if !past.is_empty() {
        let no_show_rate = super::status_rate(&past, AppointmentStatus::NoShow);

        if no_show_rate > 20.0 {
            insights.push(Insight {
                id: "high-noshow".to_string(),
                kind: InsightKind::Warning,
                category: InsightCategory::Efficiency,
                title: "High no-show rate".to_string(),
                description: format!(
                    "{no_show_rate:.1}% of appointments end in no-shows. Enable automatic SMS \
                     reminders."
                ),
                impact: Impact::High,
                action: Some("Configure SMS reminders".to_string()),
                action_url: Some(SETTINGS_URL.to_string()),
                metrics: Some(InsightMetrics::with_target(no_show_rate, 10.0)),
                timestamp: now,
            });
        } else if no_show_rate < 5.0 {
            insights.push(Insight {
                id: "excellent-attendance".to_string(),
                kind: InsightKind::Success,
                category: InsightCategory::Efficiency,
                title: "Excellent attendance rate".to_string(),
                description: format!("Only {no_show_rate:.1}% no-shows. Keep it up."),
                impact: Impact::Low,
                action: None,
                action_url: None,
                metrics: Some(InsightMetrics::current(no_show_rate)),
                timestamp: now,
            });
        }
    }

    let cancelled = appointments
        .iter()
        .filter(|a| a.status == AppointmentStatus::Cancelled)
        .count();
    let cancel_rate = cancelled as f64 / appointments.len() as f64 * 100.0;

    if cancel_rate > 15.0 {
        insights.push(Insight {
            id: "high-cancellation".to_string(),
            kind: InsightKind::Warning,
            category: InsightCategory::Efficiency,
            title: "High cancellation rate".to_string(),
            description: format!(
                "{cancel_rate:.1}% of appointments get cancelled. Review the reasons with your \
                 clients."
            ),
            impact: Impact::Medium,
            action: None,
            action_url: None,
            metrics: Some(InsightMetrics::with_target(cancel_rate, 10.0)),
            timestamp: now,
        });
    }

    if let Some((day, count)) = best_weekday(appointments) {
        insights.push(Insight {
            id: "optimal-day".to_string(),
            kind: InsightKind::Info,
            category: InsightCategory::Efficiency,
            title: "Best day identified".to_string(),
            description: format!(
                "{day} is your strongest day ({count} appointments). Focus your availability \
                 there."
            ),
            impact: Impact::Medium,
            action: None,
            action_url: None,
            metrics: None,
            timestamp: now,
        });
    }

    insights
}

/// Most popular hour of day; needs at least five appointments to be
/// meaningful.
pub fn analyze_time_slots(appointments: &[AppointmentRecord], now: DateTime<Utc>) -> Vec<Insight> {
    let mut insights = Vec::new();

    if appointments.len() < 5 {
        return insights;
    }

    let mut hour_counts = [0usize; 24];
    for appointment in appointments {
        hour_counts[appointment.scheduled_at.hour() as usize] += 1;
    }

    // Ties resolve to the earliest hour.
    let (top_hour, top_count) = hour_counts
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.cmp(b.1).then(b.0.cmp(&a.0)))
        .map(|(hour, count)| (hour, *count))
        .unwrap_or((0, 0));

    if top_count > 0 {
        insights.push(Insight {
            id: "peak-hours".to_string(),
            kind: InsightKind::Info,
            category: InsightCategory::Efficiency,
            title: "Popular time slot identified".to_string(),
            description: format!(
                "{top_hour}:00 is your most popular slot ({top_count} appointments). Maximize \
                 availability around it."
            ),
            impact: Impact::Medium,
            action: Some("Adjust availability".to_string()),
            action_url: Some(SETTINGS_URL.to_string()),
            metrics: None,
            timestamp: now,
        });
    }

    insights
}

/// Revenue potential of upcoming and completed appointments at the fixed
/// per-appointment unit value.
pub fn analyze_revenue_potential(
    appointments: &[AppointmentRecord],
    now: DateTime<Utc>,
) -> Vec<Insight> {
    let mut insights = Vec::new();

    if appointments.is_empty() {
        return insights;
    }

    let upcoming = appointments
        .iter()
        .filter(|a| a.scheduled_at > now && a.status == AppointmentStatus::Scheduled)
        .count();
    let completed = appointments
        .iter()
        .filter(|a| a.status == AppointmentStatus::Completed)
        .count();

    let potential = upcoming as u32 * REVENUE_PER_APPOINTMENT;
    let realized = completed as u32 * REVENUE_PER_APPOINTMENT;

    if potential > 500 {
        insights.push(Insight {
            id: "high-revenue-potential".to_string(),
            kind: InsightKind::Success,
            category: InsightCategory::Revenue,
            title: "Strong revenue potential".to_string(),
            description: format!(
                "{upcoming} upcoming appointments represent ${potential} of potential revenue. \
                 Keep no-shows down."
            ),
            impact: Impact::High,
            action: Some("Enable automatic reminders".to_string()),
            action_url: Some(SETTINGS_URL.to_string()),
            metrics: Some(InsightMetrics::current(potential as f64)),
            timestamp: now,
        });
    }

    if realized > 1000 {
        insights.push(Insight {
            id: "excellent-realized-revenue".to_string(),
            kind: InsightKind::Success,
            category: InsightCategory::Revenue,
            title: "Excellent realized revenue".to_string(),
            description: format!(
                "${realized} generated across {completed} completed appointments."
            ),
            impact: Impact::Medium,
            action: None,
            action_url: None,
            metrics: Some(InsightMetrics::current(realized as f64)),
            timestamp: now,
        });
    }

    insights
}

/// Weekday (Sunday-first) with the most scheduled appointments; ties resolve
/// to the earliest weekday.
fn best_weekday(appointments: &[AppointmentRecord]) -> Option<(&'static str, usize)> {
    let mut counts = [0usize; 7];
    for appointment in appointments {
        let day = appointment.scheduled_at.weekday().num_days_from_sunday() as usize;
        counts[day] += 1;
    }

    counts
        .iter()
        .enumerate()
        .filter(|(_, count)| **count > 0)
        .max_by(|a, b| a.1.cmp(b.1).then(b.0.cmp(&a.0)))
        .map(|(day, count)| (WEEKDAYS[day], *count))
}
