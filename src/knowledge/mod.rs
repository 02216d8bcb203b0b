//! Knowledge-base coverage and health analysis
//!
//! Detects deficiencies in the assistant's knowledge base relative to a fixed
//! reference set of frequently asked questions and a set of essential content
//! categories, scores the overall health of the base, and derives concrete
//! content suggestions (create, update, merge, delete) from the detected gaps.
//!
//! # Overview
//!
//! 1. Gap detectors ([`gaps`]) scan the document snapshot for uncovered
//!    frequent questions, stale documents, rarely used documents and missing
//!    essential categories.
//! 2. Suggestions ([`suggestions`]) are derived from the gap list plus a
//!    merge-candidate scan over document titles.
//! 3. [`HealthScore`] combines coverage, quality, freshness and usage into a
//!    single weighted score.
//!
//! Document usage counts come from the caller (missing ids count as unused);
//! [`simulate_document_usage`] provides a seeded stand-in for demos.

pub mod gaps;
pub mod suggestions;


use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::ranking;
use crate::score;
use crate::types::{DocumentRecord, Impact, Priority};

use self::gaps::REFERENCE_QUESTIONS;

/// Maximum number of gaps returned by one analysis
const MAX_GAPS: usize = 15;
/// Maximum number of suggestions returned by one analysis
const MAX_SUGGESTIONS: usize = 10;
/// Maximum number of reference questions surfaced to the dashboard
const MAX_TOP_QUESTIONS: usize = 10;

/// Days without modification after which a document counts as no longer fresh
pub(crate) const FRESHNESS_WINDOW_DAYS: i64 = 90;

/// Kind of knowledge-base deficiency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GapKind {
    MissingContent,
    OutdatedContent,
    LowQuality,
    FrequentQuestion,
}

/// Supporting data attached to a gap
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GapMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
}

/// A detected deficiency in the knowledge base
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeGap {
    pub id: String,
    pub kind: GapKind,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub suggested_action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub affected_queries: Option<Vec<String>>,
    pub estimated_impact: Impact,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<GapMetadata>,
}

/// Kind of proposed content edit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionKind {
    NewDocument,
    UpdateDocument,
    MergeDocuments,
    DeleteDocument,
}

/// A proposed content edit derived from detected gaps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentSuggestion {
    pub id: String,
    pub kind: SuggestionKind,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_document: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_content: Option<String>,
    pub reason: String,
    /// Expected benefit on a 0-100 scale
    pub impact: u8,
}

/// Document population counters backing the health score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthBreakdown {
    pub total_documents: usize,
    pub active_documents: usize,
    pub outdated_documents: usize,
    pub unused_documents: usize,
    pub gap_count: usize,
}

/// Composite knowledge-base health score; every field is a percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthScore {
    pub overall: u8,
    pub coverage: u8,
    pub quality: u8,
    pub freshness: u8,
    pub usage: u8,
    pub breakdown: HealthBreakdown,
}

/// A reference question with its coverage status
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopQuestion {
    pub question: String,
    pub count: u32,
    pub covered: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_id: Option<String>,
}

/// Full result of one knowledge-base analysis pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeAnalysis {
    pub health_score: HealthScore,
    pub gaps: Vec<KnowledgeGap>,
    pub suggestions: Vec<ContentSuggestion>,
    pub top_questions: Vec<TopQuestion>,
    pub insights: Vec<String>,
}

/// Run every gap detector, derive suggestions, score the base and assemble
/// the analysis object consumed by the dashboard.
pub fn analyze_knowledge_base(
    documents: &[DocumentRecord],
    usage_counts: &HashMap<String, u32>,
    now: DateTime<Utc>,
) -> KnowledgeAnalysis {
    let mut all_gaps = Vec::new();
    all_gaps.extend(gaps::detect_question_gaps(documents));
    all_gaps.extend(gaps::detect_outdated_content(documents, now));
    all_gaps.extend(gaps::detect_unused_content(documents, usage_counts, now));
    all_gaps.extend(gaps::detect_category_gaps(documents));

    ranking::for_gaps().rank(&mut all_gaps);

    // Suggestions and the health score look at the full gap list; only the
    // returned lists are capped.
    let mut content_suggestions = suggestions::suggestions_from_gaps(&all_gaps, documents);
    let health_score = calculate_health_score(documents, &all_gaps, now);
    let insights = narrative_insights(&health_score, &all_gaps, documents);
    let top_questions = top_questions(documents);

    all_gaps.truncate(MAX_GAPS);
    content_suggestions.truncate(MAX_SUGGESTIONS);

    KnowledgeAnalysis {
        health_score,
        gaps: all_gaps,
        suggestions: content_suggestions,
        top_questions,
        insights,
    }
}

/// Weighted health score over the current document snapshot and gap list.
pub fn calculate_health_score(
    documents: &[DocumentRecord],
    gaps: &[KnowledgeGap],
    now: DateTime<Utc>,
) -> HealthScore {
    // Coverage: share of the reference questions answered by some document.
    let coverage = if REFERENCE_QUESTIONS.is_empty() {
        50.0
    } else {
        let covered = REFERENCE_QUESTIONS
            .iter()
            .filter(|q| documents.iter().any(|doc| gaps::question_covered(q.question, doc)))
            .count();
        covered as f64 / REFERENCE_QUESTIONS.len() as f64 * 100.0
    };

    let critical_gaps = gaps.iter().filter(|g| g.priority == Priority::Critical).count();
    let quality = (100.0 - critical_gaps as f64 * 20.0).max(0.0);

    let active_documents = documents
        .iter()
        .filter(|doc| fractional_days_since(now, doc.last_updated()) < FRESHNESS_WINDOW_DAYS as f64)
        .count();
    let freshness = if documents.is_empty() {
        0.0
    } else {
        active_documents as f64 / documents.len() as f64 * 100.0
    };

    let unused_documents = gaps.iter().filter(|g| g.kind == GapKind::LowQuality).count();
    let usage = if documents.is_empty() {
        0.0
    } else {
        (100.0 - unused_documents as f64 / documents.len() as f64 * 100.0).max(0.0)
    };

    HealthScore {
        overall: score::kb_overall(coverage, quality, freshness, usage),
        coverage: coverage.round() as u8,
        quality: quality.round() as u8,
        freshness: freshness.round() as u8,
        usage: usage.round() as u8,
        breakdown: HealthBreakdown {
            total_documents: documents.len(),
            active_documents,
            outdated_documents: gaps.iter().filter(|g| g.kind == GapKind::OutdatedContent).count(),
            unused_documents,
            gap_count: gaps
                .iter()
                .filter(|g| matches!(g.priority, Priority::Critical | Priority::High))
                .count(),
        },
    }
}

/// Human-readable label for a health score
pub fn health_score_label(score: u8) -> &'static str {
    match score {
        90..=u8::MAX => "Excellent",
        80..=89 => "Very Good",
        70..=79 => "Good",
        60..=69 => "Average",
        50..=59 => "Weak",
        _ => "Critical",
    }
}

/// Seeded stand-in for real usage tracking, for demo environments only.
/// Each document gets a pseudo-usage proportional to call volume.
pub fn simulate_document_usage(
    documents: &[DocumentRecord],
    call_count: usize,
    seed: u64,
) -> HashMap<String, u32> {
    let mut rng = StdRng::seed_from_u64(seed);
    documents
        .iter()
        .map(|doc| {
            let usage = (rng.gen::<f64>() * call_count as f64 * 0.3).floor() as u32;
            (doc.id.clone(), usage)
        })
        .collect()
}

fn top_questions(documents: &[DocumentRecord]) -> Vec<TopQuestion> {
    REFERENCE_QUESTIONS
        .iter()
        .take(MAX_TOP_QUESTIONS)
        .map(|q| {
            let covering = documents.iter().find(|doc| gaps::question_covered(q.question, doc));
            TopQuestion {
                question: q.question.to_string(),
                count: q.count,
                covered: covering.is_some(),
                document_id: covering.map(|doc| doc.id.clone()),
            }
        })
        .collect()
}

fn narrative_insights(
    health: &HealthScore,
    gaps: &[KnowledgeGap],
    documents: &[DocumentRecord],
) -> Vec<String> {
    let mut insights = Vec::new();

    if health.overall >= 80 {
        insights.push("Your knowledge base is in excellent shape. Keep this level up.".to_string());
    } else if health.overall >= 60 {
        insights.push("Knowledge base in good health, with room for improvement.".to_string());
    } else {
        insights.push(
            "Your knowledge base needs urgent attention to improve answer quality.".to_string(),
        );
    }

    if health.coverage < 70 {
        insights.push(format!(
            "{}% of frequent questions are not covered. Prioritize adding content.",
            100 - health.coverage
        ));
    }

    if health.freshness < 50 {
        insights.push(
            "More than half of your documents have not been updated recently. Plan a review."
                .to_string(),
        );
    }

    let critical_gaps = gaps.iter().filter(|g| g.priority == Priority::Critical).count();
    if critical_gaps > 0 {
        insights.push(format!(
            "{critical_gaps} critical gap(s) detected. Act quickly to avoid impacting callers."
        ));
    }

    if documents.len() < 5 {
        insights.push(
            "Your knowledge base has few documents. Enrich it to improve answer quality."
                .to_string(),
        );
    } else if documents.len() > 50 {
        insights.push(
            "Large knowledge base detected. Consider consolidating and pruning unused documents."
                .to_string(),
        );
    }

    insights
}

pub(crate) fn fractional_days_since(now: DateTime<Utc>, at: DateTime<Utc>) -> f64 {
    (now - at).num_milliseconds() as f64 / 86_400_000.0
}
