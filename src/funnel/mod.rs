//! Inbound call-funnel analytics for the voice assistant
//!
//! Tracks how inbound calls move through the assistant's funnel (received,
//! handled, qualified, appointment booked), aggregates per-hour and per-day
//! performance, and emits prioritized optimization insights with estimated
//! improvement figures.
//!
//! The funnel rates and insight thresholds mirror the operator playbook; the
//! `estimated_improvement` percentages are quoted in coaching material and
//! must stay in sync with it.

#[cfg(test)]
pub mod funnel_test;

use chrono::{Datelike, Timelike};
use serde::{Deserialize, Serialize};

use crate::ranking;
use crate::score;
use crate::types::{CallEvent, CallEventKind, CallRecord, CallStatus, Priority};

const WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Stage counts and conversion rates of the call funnel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CallFunnel {
    pub received: usize,
    pub handled: usize,
    pub qualified: usize,
    pub appointments_created: usize,
    pub rates: FunnelRates,
}

/// Percentage rates between funnel stages; zero denominators yield 0
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FunnelRates {
    /// Share of received calls the assistant handled
    pub handle_rate: f64,
    /// Share of handled calls that qualified
    pub qualification_rate: f64,
    /// Share of qualified calls that booked an appointment
    pub conversion_rate: f64,
    /// Share of received calls that booked an appointment
    pub overall_conversion: f64,
}

/// Per-hour call volume and outcomes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeSlotStats {
    pub hour: u32,
    pub calls: usize,
    pub handle_rate: f64,
    pub conversion_rate: f64,
}

/// Per-weekday call volume and bookings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayStats {
    pub day: String,
    pub calls: usize,
    pub appointments: usize,
}

/// Aggregated call handling performance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallPerformance {
    pub total_calls: usize,
    pub total_handled: usize,
    pub total_converted: usize,
    pub handle_rate: f64,
    pub conversion_rate: f64,
    /// Mean duration of handled calls, in seconds
    pub avg_call_duration: f64,
    /// Mean duration of handled calls that booked an appointment
    pub avg_converted_call_duration: f64,
    pub calls_by_time_slot: Vec<TimeSlotStats>,
    pub calls_by_day: Vec<DayStats>,
}

/// Funnel dimension an optimization insight targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FunnelCategory {
    Capacity,
    Script,
    Qualification,
    Performance,
}

/// A prioritized optimization recommendation for the assistant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunnelInsight {
    pub id: String,
    pub priority: Priority,
    pub category: FunnelCategory,
    pub title: String,
    pub description: String,
    pub impact: String,
    pub action_items: Vec<String>,
    /// Expected improvement, as a percentage of the affected metric
    pub estimated_improvement: u8,
}

/// Full result of one call-funnel analysis pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunnelAnalysis {
    pub funnel: CallFunnel,
    pub performance: CallPerformance,
    pub insights: Vec<FunnelInsight>,
    pub score: u8,
}

/// Count funnel stages and derive the four conversion rates.
pub fn calculate_call_funnel(events: &[CallEvent]) -> CallFunnel {
    let count_kind = |kind: CallEventKind| events.iter().filter(|e| e.kind == kind).count();

    let received = count_kind(CallEventKind::Received);
    let handled = count_kind(CallEventKind::Handled);
    let qualified = count_kind(CallEventKind::Qualified);
    let appointments_created = count_kind(CallEventKind::AppointmentCreated);

    CallFunnel {
        received,
        handled,
        qualified,
        appointments_created,
        rates: FunnelRates {
            handle_rate: rate(handled, received),
            qualification_rate: rate(qualified, handled),
            conversion_rate: rate(appointments_created, qualified),
            overall_conversion: rate(appointments_created, received),
        },
    }
}

/// Aggregate handling performance from raw call records.
pub fn analyze_call_performance(calls: &[CallRecord]) -> CallPerformance {
    let total_calls = calls.len();
    let handled: Vec<&CallRecord> = calls
        .iter()
        .filter(|c| c.status == CallStatus::Completed)
        .collect();
    let total_handled = handled.len();
    let total_converted = calls.iter().filter(|c| c.appointment_created).count();

    let mut total_duration = 0u64;
    let mut converted_duration = 0u64;
    let mut converted_count = 0usize;
    for call in &handled {
        total_duration += call.duration_seconds as u64;
        if call.appointment_created {
            converted_duration += call.duration_seconds as u64;
            converted_count += 1;
        }
    }

    let avg_call_duration = if total_handled > 0 {
        total_duration as f64 / total_handled as f64
    } else {
        0.0
    };
    let avg_converted_call_duration = if converted_count > 0 {
        converted_duration as f64 / converted_count as f64
    } else {
        0.0
    };

    // Hourly buckets only for hours that saw traffic.
    let mut slots: [(usize, usize, usize); 24] = [(0, 0, 0); 24];
    for call in calls {
        let hour = call.created_at.hour() as usize;
        slots[hour].0 += 1;
        if call.status == CallStatus::Completed {
            slots[hour].1 += 1;
        }
        if call.appointment_created {
            slots[hour].2 += 1;
        }
    }
    let calls_by_time_slot: Vec<TimeSlotStats> = slots
        .iter()
        .enumerate()
        .filter(|(_, (calls, _, _))| *calls > 0)
        .map(|(hour, (calls, handled, converted))| TimeSlotStats {
            hour: hour as u32,
            calls: *calls,
            handle_rate: rate(*handled, *calls),
            conversion_rate: rate(*converted, *handled),
        })
        .collect();

    let mut day_counts = [(0usize, 0usize); 7];
    for call in calls {
        let day = call.created_at.weekday().num_days_from_monday() as usize;
        day_counts[day].0 += 1;
        if call.appointment_created {
            day_counts[day].1 += 1;
        }
    }
    let calls_by_day: Vec<DayStats> = WEEKDAYS
        .iter()
        .zip(day_counts.iter())
        .map(|(day, (calls, appointments))| DayStats {
            day: (*day).to_string(),
            calls: *calls,
            appointments: *appointments,
        })
        .collect();

    CallPerformance {
        total_calls,
        total_handled,
        total_converted,
        handle_rate: rate(total_handled, total_calls),
        conversion_rate: rate(total_converted, total_handled),
        avg_call_duration,
        avg_converted_call_duration,
        calls_by_time_slot,
        calls_by_day,
    }
}

/// Generate ranked optimization insights from funnel rates and performance.
pub fn generate_funnel_insights(
    funnel: &CallFunnel,
    performance: &CallPerformance,
) -> Vec<FunnelInsight> {
    let mut insights = Vec::new();
    let rates = &funnel.rates;

    if rates.handle_rate < 85.0 {
        insights.push(FunnelInsight {
            id: "low-handle-rate".to_string(),
            priority: Priority::Critical,
            category: FunnelCategory::Capacity,
            title: "Low handle rate".to_string(),
            description: format!(
                "Only {:.1}% of calls are handled by the assistant. Calls are being lost.",
                rates.handle_rate
            ),
            impact: "Lost leads and a poor caller experience".to_string(),
            action_items: vec![
                "Increase the assistant's concurrent call capacity".to_string(),
                "Check queueing configuration".to_string(),
                "Add voicemail with automatic callback".to_string(),
                "Analyze peak hours to anticipate load".to_string(),
            ],
            estimated_improvement: 50,
        });
    } else if rates.handle_rate < 95.0 {
        insights.push(FunnelInsight {
            id: "medium-handle-rate".to_string(),
            priority: Priority::High,
            category: FunnelCategory::Capacity,
            title: "Some calls go unanswered".to_string(),
            description: format!(
                "{:.1}% of calls are not picked up.",
                100.0 - rates.handle_rate
            ),
            impact: "Missed opportunities".to_string(),
            action_items: vec![
                "Tighten response times".to_string(),
                "Review high-traffic periods".to_string(),
                "Introduce a call queue".to_string(),
            ],
            estimated_improvement: 20,
        });
    }

    if rates.qualification_rate < 50.0 {
        insights.push(FunnelInsight {
            id: "low-qualification".to_string(),
            priority: Priority::High,
            category: FunnelCategory::Script,
            title: "Low qualification rate".to_string(),
            description: format!(
                "{:.1}% of handled calls qualify. Too much time goes to poor-fit prospects.",
                rates.qualification_rate
            ),
            impact: "The assistant spends effort on unqualified prospects".to_string(),
            action_items: vec![
                "Improve the qualification script".to_string(),
                "Ask qualifying questions earlier".to_string(),
                "Filter better upstream in marketing campaigns".to_string(),
                "Revisit the qualification criteria".to_string(),
            ],
            estimated_improvement: 40,
        });
    }

    if rates.conversion_rate < 30.0 {
        insights.push(FunnelInsight {
            id: "low-conversion".to_string(),
            priority: Priority::Critical,
            category: FunnelCategory::Script,
            title: "Low booking conversion".to_string(),
            description: format!(
                "Only {:.1}% of qualified leads book an appointment.",
                rates.conversion_rate
            ),
            impact: "Major loss of interested prospects".to_string(),
            action_items: vec![
                "Strengthen the value proposition in the script".to_string(),
                "Simplify the booking flow".to_string(),
                "Train the assistant on objection handling".to_string(),
                "Offer several time slots immediately".to_string(),
            ],
            estimated_improvement: 80,
        });
    } else if rates.conversion_rate < 50.0 {
        insights.push(FunnelInsight {
            id: "medium-conversion".to_string(),
            priority: Priority::High,
            category: FunnelCategory::Script,
            title: "Booking conversion can improve".to_string(),
            description: format!(
                "{:.1}% conversion. There is room to grow.",
                rates.conversion_rate
            ),
            impact: "20-30% more appointments within reach".to_string(),
            action_items: vec![
                "A/B test different approaches".to_string(),
                "Offer more scheduling flexibility".to_string(),
                "Reassure prospects about the meeting's value".to_string(),
            ],
            estimated_improvement: 35,
        });
    }

    if performance.total_calls < 50 {
        insights.push(FunnelInsight {
            id: "low-volume".to_string(),
            priority: Priority::Medium,
            category: FunnelCategory::Performance,
            title: "Low call volume".to_string(),
            description: format!(
                "Only {} calls. Volume is too low to generate results.",
                performance.total_calls
            ),
            impact: "Few appointments despite good funnel performance".to_string(),
            action_items: vec![
                "Publicize the phone number on the site and social media".to_string(),
                "Run marketing campaigns".to_string(),
                "Improve local search ranking".to_string(),
            ],
            estimated_improvement: 100,
        });
    }

    if performance.avg_call_duration < 120.0 && performance.conversion_rate < 40.0 {
        insights.push(FunnelInsight {
            id: "short-calls".to_string(),
            priority: Priority::Medium,
            category: FunnelCategory::Script,
            title: "Conversations are too short".to_string(),
            description: format!(
                "Average duration of {}s. Successful calls usually run 3-5 minutes.",
                performance.avg_call_duration.round() as i64
            ),
            impact: "Not enough time to build rapport and convince".to_string(),
            action_items: vec![
                "Add more discovery to the script".to_string(),
                "Ask open-ended questions".to_string(),
                "Let the prospect speak more".to_string(),
                "Do not rush into booking".to_string(),
            ],
            estimated_improvement: 30,
        });
    }

    if let Some(peak) = peak_slot(performance) {
        let share = peak.calls as f64 / performance.total_calls as f64;
        if peak.calls >= 10 && share > 0.2 {
            let handling_well = peak.handle_rate >= 90.0;
            insights.push(FunnelInsight {
                id: "peak-hours".to_string(),
                priority: if handling_well { Priority::Low } else { Priority::High },
                category: FunnelCategory::Capacity,
                title: if handling_well {
                    "Peak hour handled well".to_string()
                } else {
                    "Problematic peak hour".to_string()
                },
                description: format!(
                    "{}:00-{}:00 concentrates {:.0}% of calls{}.",
                    peak.hour,
                    peak.hour + 1,
                    share * 100.0,
                    if handling_well {
                        String::new()
                    } else {
                        format!(" with only {:.0}% handled", peak.handle_rate)
                    }
                ),
                impact: if handling_well {
                    "Peak load is well anticipated".to_string()
                } else {
                    "Many calls lost in this slot".to_string()
                },
                action_items: if handling_well {
                    vec![
                        "Maintain capacity in this slot".to_string(),
                        "Watch how the volume evolves".to_string(),
                    ]
                } else {
                    vec![
                        format!("Increase capacity from {}:00 to {}:00", peak.hour, peak.hour + 2),
                        "Set up a smart call queue".to_string(),
                        "Send an automatic SMS to unanswered callers".to_string(),
                    ]
                },
                estimated_improvement: if handling_well { 5 } else { 40 },
            });
        }
    }

    if rates.overall_conversion >= 25.0 {
        insights.push(FunnelInsight {
            id: "excellent-performance".to_string(),
            priority: Priority::Low,
            category: FunnelCategory::Performance,
            title: "Excellent performance".to_string(),
            description: format!(
                "{:.1}% overall conversion. The assistant is performing excellently.",
                rates.overall_conversion
            ),
            impact: "Maintain and amplify this performance".to_string(),
            action_items: vec![
                "Document what works".to_string(),
                "Grow inbound call volume".to_string(),
                "Test incremental optimizations".to_string(),
            ],
            estimated_improvement: 10,
        });
    }

    ranking::for_funnel_insights().rank(&mut insights);
    insights
}

/// Run the full funnel analysis: stages, performance, insights, score.
pub fn analyze_funnel(events: &[CallEvent], calls: &[CallRecord]) -> FunnelAnalysis {
    let funnel = calculate_call_funnel(events);
    let performance = analyze_call_performance(calls);
    let insights = generate_funnel_insights(&funnel, &performance);
    let score = score::funnel_score(
        funnel.rates.handle_rate,
        funnel.rates.qualification_rate,
        funnel.rates.conversion_rate,
        funnel.rates.overall_conversion,
        performance.avg_call_duration,
    );

    FunnelAnalysis {
        funnel,
        performance,
        insights,
        score,
    }
}

/// Busiest hourly slot, or `None` when no call was recorded
fn peak_slot(performance: &CallPerformance) -> Option<TimeSlotStats> {
    performance
        .calls_by_time_slot
        .iter()
        .max_by(|a, b| a.calls.cmp(&b.calls).then(b.hour.cmp(&a.hour)))
        .copied()
}

fn rate(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        return 0.0;
    }
    numerator as f64 / denominator as f64 * 100.0
}
