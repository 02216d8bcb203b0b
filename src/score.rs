//! Bounded scoring formulas
//!
//! Three independent formulas, each pure and total, each returning an integer
//! in `[0, 100]`. The threshold tables are operator-facing contracts: the
//! dashboard documents them, so they must not drift.

/// Clamp a percentage-like value into `[0, 100]`, mapping non-finite input to 0
pub(crate) fn clamp_pct(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 100.0)
    } else {
        0.0
    }
}

/// Weighted knowledge-base health combination.
///
/// `overall = round(0.35*coverage + 0.30*quality + 0.20*freshness + 0.15*usage)`
/// with every sub-score clamped to `[0, 100]` before combination.
pub fn kb_overall(coverage: f64, quality: f64, freshness: f64, usage: f64) -> u8 {
    let combined = 0.35 * clamp_pct(coverage)
        + 0.30 * clamp_pct(quality)
        + 0.20 * clamp_pct(freshness)
        + 0.15 * clamp_pct(usage);
    combined.round() as u8
}

/// Booking/operational score from weekly booking volume and appointment
/// outcome rates. Rates are percentages; a zero denominator upstream yields a
/// 0% rate, which still passes through the delta table.
pub fn booking_score(
    last7_days_bookings: usize,
    no_show_rate: f64,
    completion_rate: f64,
    cancel_rate: f64,
) -> u8 {
    let mut score: f64 = 100.0;

    if last7_days_bookings < 2 {
        score -= 20.0;
    } else if last7_days_bookings < 5 {
        score -= 10.0;
    } else if last7_days_bookings > 15 {
        score += 10.0;
    }

    if no_show_rate > 20.0 {
        score -= 20.0;
    } else if no_show_rate > 10.0 {
        score -= 10.0;
    } else if no_show_rate < 5.0 {
        score += 15.0;
    }

    if completion_rate > 80.0 {
        score += 10.0;
    } else if completion_rate < 50.0 {
        score -= 15.0;
    }

    if cancel_rate > 15.0 {
        score -= 10.0;
    }

    clamp_pct(score) as u8
}

/// Call-funnel score for the assistant. Rates are percentages over the funnel
/// stages; `avg_call_duration` is in seconds.
pub fn funnel_score(
    handle_rate: f64,
    qualification_rate: f64,
    conversion_rate: f64,
    overall_conversion: f64,
    avg_call_duration: f64,
) -> u8 {
    let mut score: f64 = 100.0;

    if handle_rate < 85.0 {
        score -= 30.0;
    } else if handle_rate < 95.0 {
        score -= 10.0;
    }

    if conversion_rate < 30.0 {
        score -= 25.0;
    } else if conversion_rate < 50.0 {
        score -= 10.0;
    }

    if qualification_rate < 50.0 {
        score -= 15.0;
    }

    if avg_call_duration < 90.0 {
        score -= 10.0;
    }

    if overall_conversion >= 25.0 {
        score += 15.0;
    }
    if handle_rate >= 95.0 {
        score += 10.0;
    }
    if conversion_rate >= 60.0 {
        score += 10.0;
    }

    clamp_pct(score) as u8
}
