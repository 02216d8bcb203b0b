//! Scenario tests for the call-funnel analytics

use super::*;
use crate::test_utils::{self, reference_now};
use crate::types::{CallStatus, Priority};
use chrono::Duration;

#[test]
fn funnel_counts_and_rates() {
    let events = test_utils::funnel_events(100, 90, 60, 30);
    let funnel = calculate_call_funnel(&events);

    assert_eq!(funnel.received, 100);
    assert_eq!(funnel.handled, 90);
    assert_eq!(funnel.qualified, 60);
    assert_eq!(funnel.appointments_created, 30);

    assert_eq!(funnel.rates.handle_rate, 90.0);
    assert!((funnel.rates.qualification_rate - 66.666_666).abs() < 0.001);
    assert_eq!(funnel.rates.conversion_rate, 50.0);
    assert_eq!(funnel.rates.overall_conversion, 30.0);
}

#[test]
fn empty_event_stream_yields_zero_rates() {
    let funnel = calculate_call_funnel(&[]);
    assert_eq!(funnel.received, 0);
    assert_eq!(funnel.rates.handle_rate, 0.0);
    assert_eq!(funnel.rates.qualification_rate, 0.0);
    assert_eq!(funnel.rates.conversion_rate, 0.0);
    assert_eq!(funnel.rates.overall_conversion, 0.0);
}

#[test]
fn performance_averages_and_buckets() {
    let now = reference_now();
    let calls = vec![
        test_utils::call_at("c1", CallStatus::Completed, 100, true, now - Duration::hours(1)),
        test_utils::call_at("c2", CallStatus::Completed, 200, false, now - Duration::hours(1)),
        test_utils::call_at("c3", CallStatus::Missed, 0, false, now - Duration::hours(2)),
    ];

    let performance = analyze_call_performance(&calls);
    assert_eq!(performance.total_calls, 3);
    assert_eq!(performance.total_handled, 2);
    assert_eq!(performance.total_converted, 1);
    assert_eq!(performance.avg_call_duration, 150.0);
    assert_eq!(performance.avg_converted_call_duration, 100.0);

    // Only hours that saw traffic appear, in ascending order.
    assert_eq!(performance.calls_by_time_slot.len(), 2);
    assert!(performance.calls_by_time_slot[0].hour < performance.calls_by_time_slot[1].hour);

    // Every weekday appears exactly once.
    assert_eq!(performance.calls_by_day.len(), 7);
    let total_by_day: usize = performance.calls_by_day.iter().map(|d| d.calls).sum();
    assert_eq!(total_by_day, 3);
}

#[test]
fn empty_calls_produce_neutral_performance() {
    let performance = analyze_call_performance(&[]);
    assert_eq!(performance.total_calls, 0);
    assert_eq!(performance.handle_rate, 0.0);
    assert_eq!(performance.avg_call_duration, 0.0);
    assert!(performance.calls_by_time_slot.is_empty());
    assert_eq!(performance.calls_by_day.len(), 7);
}

#[test]
fn weak_handle_rate_is_critical() {
    let events = test_utils::funnel_events(100, 80, 60, 40);
    let funnel = calculate_call_funnel(&events);
    let performance = analyze_call_performance(&test_utils::steady_calls(100, 200));

    let insights = generate_funnel_insights(&funnel, &performance);
    let handle = insights.iter().find(|i| i.id == "low-handle-rate").unwrap();
    assert_eq!(handle.priority, Priority::Critical);
    assert_eq!(handle.estimated_improvement, 50);
    assert!(insights.iter().all(|i| i.id != "medium-handle-rate"));
}

#[test]
fn borderline_handle_rate_is_high_priority() {
    let events = test_utils::funnel_events(100, 90, 60, 40);
    let funnel = calculate_call_funnel(&events);
    let performance = analyze_call_performance(&test_utils::steady_calls(100, 200));

    let insights = generate_funnel_insights(&funnel, &performance);
    let handle = insights.iter().find(|i| i.id == "medium-handle-rate").unwrap();
    assert_eq!(handle.priority, Priority::High);
    assert_eq!(handle.estimated_improvement, 20);
}

#[test]
fn conversion_tiers_match_thresholds() {
    // 20 of 80 qualified book: 25% conversion.
    let low = calculate_call_funnel(&test_utils::funnel_events(100, 95, 80, 20));
    let performance = analyze_call_performance(&test_utils::steady_calls(100, 200));
    let insights = generate_funnel_insights(&low, &performance);
    let conv = insights.iter().find(|i| i.id == "low-conversion").unwrap();
    assert_eq!(conv.priority, Priority::Critical);
    assert_eq!(conv.estimated_improvement, 80);

    // 32 of 80: 40% conversion.
    let medium = calculate_call_funnel(&test_utils::funnel_events(100, 95, 80, 32));
    let insights = generate_funnel_insights(&medium, &performance);
    let conv = insights.iter().find(|i| i.id == "medium-conversion").unwrap();
    assert_eq!(conv.estimated_improvement, 35);
}

#[test]
fn low_volume_and_short_calls_are_flagged() {
    let events = test_utils::funnel_events(30, 29, 20, 5);
    let funnel = calculate_call_funnel(&events);
    // 30 short calls, every third converts: conversion rate under 40%.
    let calls = test_utils::steady_calls(30, 60);
    let performance = analyze_call_performance(&calls);

    let insights = generate_funnel_insights(&funnel, &performance);
    let volume = insights.iter().find(|i| i.id == "low-volume").unwrap();
    assert_eq!(volume.estimated_improvement, 100);
    assert!(insights.iter().any(|i| i.id == "short-calls"));
}

#[test]
fn concentrated_peak_with_poor_handling_is_high_priority() {
    let now = reference_now();
    let mut calls = Vec::new();
    // 12 calls at 14:00, mostly missed.
    for i in 0..12 {
        let handled = i < 4;
        calls.push(test_utils::call_at(
            &format!("peak{i}"),
            if handled { CallStatus::Completed } else { CallStatus::Missed },
            120,
            false,
            now.date_naive().and_hms_opt(14, 5 + i as u32, 0).unwrap().and_utc(),
        ));
    }
    // 20 quiet calls spread over other hours.
    for i in 0..20u32 {
        calls.push(test_utils::call_at(
            &format!("c{i}"),
            CallStatus::Completed,
            180,
            i % 3 == 0,
            now.date_naive().and_hms_opt(i % 13, 30, 0).unwrap().and_utc(),
        ));
    }

    let funnel = calculate_call_funnel(&test_utils::funnel_events(32, 24, 20, 8));
    let performance = analyze_call_performance(&calls);
    let insights = generate_funnel_insights(&funnel, &performance);

    let peak = insights.iter().find(|i| i.id == "peak-hours").unwrap();
    assert_eq!(peak.priority, Priority::High);
    assert_eq!(peak.estimated_improvement, 40);
    assert!(peak.description.contains("14:00"));
}

#[test]
fn well_handled_peak_is_low_priority() {
    let now = reference_now();
    let mut calls = Vec::new();
    for i in 0..12 {
        calls.push(test_utils::call_at(
            &format!("peak{i}"),
            CallStatus::Completed,
            150,
            false,
            now.date_naive().and_hms_opt(10, 1 + i as u32, 0).unwrap().and_utc(),
        ));
    }
    for i in 0..8u32 {
        calls.push(test_utils::call_at(
            &format!("c{i}"),
            CallStatus::Completed,
            150,
            true,
            now.date_naive().and_hms_opt(15 + i % 4, 30, 0).unwrap().and_utc(),
        ));
    }

    let funnel = calculate_call_funnel(&test_utils::funnel_events(20, 20, 15, 8));
    let performance = analyze_call_performance(&calls);
    let insights = generate_funnel_insights(&funnel, &performance);

    let peak = insights.iter().find(|i| i.id == "peak-hours").unwrap();
    assert_eq!(peak.priority, Priority::Low);
    assert_eq!(peak.estimated_improvement, 5);
}

#[test]
fn strong_overall_conversion_earns_praise() {
    let events = test_utils::funnel_events(100, 98, 70, 42);
    let funnel = calculate_call_funnel(&events);
    let performance = analyze_call_performance(&test_utils::steady_calls(100, 200));

    let insights = generate_funnel_insights(&funnel, &performance);
    let praise = insights.iter().find(|i| i.id == "excellent-performance").unwrap();
    assert_eq!(praise.priority, Priority::Low);
    assert_eq!(praise.estimated_improvement, 10);
}

#[test]
fn insights_are_ranked_by_priority() {
    let events = test_utils::funnel_events(100, 80, 30, 5);
    let funnel = calculate_call_funnel(&events);
    let performance = analyze_call_performance(&test_utils::steady_calls(40, 60));

    let insights = generate_funnel_insights(&funnel, &performance);
    let policy = crate::ranking::for_funnel_insights();
    let weights: Vec<i64> = insights.iter().map(|i| policy.weight_of(i)).collect();
    let mut sorted = weights.clone();
    sorted.sort_by(|a, b| b.cmp(a));
    assert_eq!(weights, sorted);
    assert_eq!(insights[0].priority, Priority::Critical);
}

#[test]
fn full_analysis_combines_score_and_sections() {
    let events = test_utils::funnel_events(100, 96, 60, 40);
    let calls = test_utils::steady_calls(100, 200);

    let analysis = analyze_funnel(&events, &calls);
    // handle 96%, qualification 62.5%, conversion 66.7%, overall 40%:
    // no penalties, all three bonuses.
    assert_eq!(analysis.score, 100);
    assert_eq!(analysis.funnel.received, 100);
    assert_eq!(analysis.performance.total_calls, 100);

    let again = analyze_funnel(&events, &calls);
    assert_eq!(analysis, again);
}
