//! Operational insight analysis over calls and appointments
//!
//! This module turns raw appointment and call snapshots into the ranked
//! insight feed shown on the operator dashboard, together with an overall
//! performance score, week-over-week trends and a simple forecast.
//!
//! # Overview
//!
//! - Detectors ([`detectors`]) are independent pure functions; each inspects
//!   one aspect of the data (booking volume, attendance, popular slots,
//!   revenue) and emits zero or more [`Insight`] records.
//! - [`analyze_operations`] runs every detector, ranks the combined output
//!   with the shared ranking policy and caps the feed at ten entries.
//! - Every function takes an explicit `now` so analyses are reproducible;
//!   calling a detector twice with the same inputs yields identical output.
//!
//! # Example
//!
//! ```no_run
//! use voiceops_insights::insights::analyze_operations;
//! use chrono::Utc;
//!
//! # fn example(calls: &[voiceops_insights::types::CallRecord], appointments: &[voiceops_insights::types::AppointmentRecord]) {
//! let analysis = analyze_operations(calls, appointments, Utc::now());
//! println!("score: {}", analysis.score);
//! for insight in &analysis.insights {
//!     println!("[{:?}] {}", insight.impact, insight.title);
//! }
//! # }
//! ```

pub mod detectors;


use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ranking;
use crate::score;
use crate::trend::Trend;
use crate::types::{AppointmentRecord, AppointmentStatus, CallRecord, Impact};
use crate::window::{self, Window};

/// Fixed revenue estimate per booked appointment, in USD
pub const REVENUE_PER_APPOINTMENT: u32 = 50;

/// Maximum number of insights returned by one analysis
const MAX_INSIGHTS: usize = 10;

/// Severity class of an insight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Critical,
    Warning,
    Info,
    Success,
}

impl InsightKind {
    /// Ranking weight of this kind
    pub fn weight(self) -> i64 {
        match self {
            InsightKind::Critical => 4,
            InsightKind::Warning => 3,
            InsightKind::Info => 2,
            InsightKind::Success => 1,
        }
    }
}

/// Business dimension an insight belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightCategory {
    Performance,
    Revenue,
    Quality,
    Efficiency,
    Prediction,
}

/// Metric values attached to an insight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightMetrics {
    pub current: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<f64>,
}

impl InsightMetrics {
    pub fn current(value: f64) -> Self {
        Self {
            current: value,
            previous: None,
            change: None,
            target: None,
        }
    }

    pub fn with_target(value: f64, target: f64) -> Self {
        Self {
            target: Some(target),
            ..Self::current(value)
        }
    }
}

/// A structured, ranked observation with a recommended action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub id: String,
    pub kind: InsightKind,
    pub category: InsightCategory,
    pub title: String,
    pub description: String,
    pub impact: Impact,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<InsightMetrics>,
    pub timestamp: DateTime<Utc>,
}

/// Week-over-week trajectory of the headline metrics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendSummary {
    pub calls: Trend,
    pub appointments: Trend,
    pub conversion: Trend,
    pub revenue: Trend,
}

/// Simple forward-looking estimates derived from recent booking history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Predictions {
    pub next_week_appointments: u32,
    pub expected_revenue: u32,
    /// Percentage risk that a booked appointment ends in a no-show
    pub no_show_risk: u8,
}

/// Full result of one operational analysis pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationsAnalysis {
    pub insights: Vec<Insight>,
    pub score: u8,
    pub trends: TrendSummary,
    pub predictions: Predictions,
}

/// Run every operational detector, rank the results and assemble the
/// analysis object consumed by the dashboard.
pub fn analyze_operations(
    calls: &[CallRecord],
    appointments: &[AppointmentRecord],
    now: DateTime<Utc>,
) -> OperationsAnalysis {
    let mut insights = Vec::new();
    insights.extend(detectors::analyze_booking_patterns(appointments, now));
    insights.extend(detectors::analyze_appointment_quality(appointments, now));
    insights.extend(detectors::analyze_time_slots(appointments, now));
    insights.extend(detectors::analyze_revenue_potential(appointments, now));

    ranking::for_insights().rank(&mut insights);
    insights.truncate(MAX_INSIGHTS);

    OperationsAnalysis {
        insights,
        score: operations_score(appointments, now),
        trends: analyze_trends(calls, appointments, now),
        predictions: generate_predictions(appointments, now),
    }
}

/// Overall booking/operational score in `[0, 100]`.
///
/// With no appointments at all there is nothing to judge and the score is a
/// neutral 50.
pub fn operations_score(appointments: &[AppointmentRecord], now: DateTime<Utc>) -> u8 {
    if appointments.is_empty() {
        return 50;
    }

    let last7 = window::count_recent(
        appointments,
        |a| a.created_at,
        now,
        Window::RollingHours(7 * 24),
    );

    let past: Vec<&AppointmentRecord> =
        appointments.iter().filter(|a| a.scheduled_at < now).collect();
    let no_show_rate = status_rate(&past, AppointmentStatus::NoShow);
    let completion_rate = status_rate(&past, AppointmentStatus::Completed);

    let cancelled = appointments
        .iter()
        .filter(|a| a.status == AppointmentStatus::Cancelled)
        .count();
    let cancel_rate = cancelled as f64 / appointments.len() as f64 * 100.0;

    score::booking_score(last7, no_show_rate, completion_rate, cancel_rate)
}

/// Week-over-week trends for calls, bookings, conversion and revenue.
///
/// Conversion keeps its historical ±10% growth band, narrower than the
/// classifier's ±15%; the two bands are separate dashboard contracts.
pub fn analyze_trends(
    calls: &[CallRecord],
    appointments: &[AppointmentRecord],
    now: DateTime<Utc>,
) -> TrendSummary {
    let week = Window::CalendarDays(7);
    let call_counts = window::compare_windows(calls, |c| c.created_at, now, week);
    let bookings = window::compare_windows(appointments, |a| a.created_at, now, week);

    let booking_growth = if bookings.previous > 0 {
        (bookings.current as f64 - bookings.previous as f64) / bookings.previous as f64 * 100.0
    } else {
        0.0
    };

    let conversion = if booking_growth > 10.0 {
        Trend::Up
    } else if booking_growth < -10.0 {
        Trend::Down
    } else {
        Trend::Stable
    };

    let unit = REVENUE_PER_APPOINTMENT as usize;
    TrendSummary {
        calls: Trend::classify(call_counts.current, call_counts.previous),
        appointments: Trend::classify(bookings.current, bookings.previous),
        conversion,
        revenue: Trend::classify(bookings.current * unit, bookings.previous * unit),
    }
}

/// Forecast next week's bookings, the associated revenue and no-show risk.
pub fn generate_predictions(appointments: &[AppointmentRecord], now: DateTime<Utc>) -> Predictions {
    let bookings = window::compare_windows(
        appointments,
        |a| a.created_at,
        now,
        Window::CalendarDays(7),
    );

    // 10% assumed growth when there is no prior week to compare against.
    let growth = if bookings.previous > 0 {
        (bookings.current as f64 - bookings.previous as f64) / bookings.previous as f64
    } else {
        0.1
    };

    let weekly = if bookings.current > 0 {
        bookings.current as f64
    } else {
        3.0
    };
    let next_week = ((weekly * (1.0 + growth)).round().max(0.0) as u32).max(1);

    let past: Vec<&AppointmentRecord> =
        appointments.iter().filter(|a| a.scheduled_at < now).collect();
    let no_show_risk = if past.is_empty() {
        15.0
    } else {
        status_rate(&past, AppointmentStatus::NoShow)
    };

    let expected_revenue = (next_week as f64
        * REVENUE_PER_APPOINTMENT as f64
        * (1.0 - no_show_risk / 100.0))
        .round() as u32;

    Predictions {
        next_week_appointments: next_week,
        expected_revenue,
        no_show_risk: no_show_risk.round().clamp(0.0, 100.0) as u8,
    }
}

/// Percentage of `appointments` with the given status; 0 for an empty slice
pub(crate) fn status_rate(appointments: &[&AppointmentRecord], status: AppointmentStatus) -> f64 {
    if appointments.is_empty() {
        return 0.0;
    }
    let matching = appointments.iter().filter(|a| a.status == status).count();
    matching as f64 / appointments.len() as f64 * 100.0
}
