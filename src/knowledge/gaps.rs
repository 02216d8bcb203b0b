//! Knowledge-base gap detectors
//!
//! The frequent-question reference set and essential category list are fixed
//! product contracts: thresholds and occurrence counts drive gap priorities
//! and the coverage sub-score. Keyword sets carry both English and French
//! market terms since tenant documents arrive in either language.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use super::{fractional_days_since, GapKind, GapMetadata, KnowledgeGap};
use crate::types::{DocumentRecord, Impact, Priority};

/// A frequently asked question with its observed occurrence count
#[derive(Debug, Clone, Copy)]
pub struct ReferenceQuestion {
    pub question: &'static str,
    pub count: u32,
}

/// Fixed reference set of frequent caller questions
pub const REFERENCE_QUESTIONS: &[ReferenceQuestion] = &[
    ReferenceQuestion { question: "What are your opening hours", count: 45 },
    ReferenceQuestion { question: "How do I book an appointment", count: 38 },
    ReferenceQuestion { question: "What types of properties do you offer", count: 32 },
    ReferenceQuestion { question: "Where are you located", count: 28 },
    ReferenceQuestion { question: "What are your rates", count: 24 },
    ReferenceQuestion { question: "Do you offer virtual tours", count: 18 },
    ReferenceQuestion { question: "Are you open on weekends", count: 15 },
    ReferenceQuestion { question: "Can I cancel my appointment", count: 12 },
    ReferenceQuestion { question: "How much does a valuation cost", count: 10 },
    ReferenceQuestion { question: "Do you accept online payments", count: 8 },
];

struct EssentialCategory {
    name: &'static str,
    slug: &'static str,
    keywords: &'static [&'static str],
}

const ESSENTIAL_CATEGORIES: &[EssentialCategory] = &[
    EssentialCategory {
        name: "Hours",
        slug: "hours",
        keywords: &["hours", "opening", "closing", "availability", "horaire", "ouverture"],
    },
    EssentialCategory {
        name: "Pricing",
        slug: "pricing",
        keywords: &["price", "pricing", "cost", "fee", "tarif", "prix"],
    },
    EssentialCategory {
        name: "Services",
        slug: "services",
        keywords: &["service", "prestation"],
    },
    EssentialCategory {
        name: "Location",
        slug: "location",
        keywords: &["address", "location", "located", "directions", "adresse", "localisation"],
    },
    EssentialCategory {
        name: "Contact",
        slug: "contact",
        keywords: &["contact", "phone", "email", "reach", "telephone", "joindre"],
    },
    EssentialCategory {
        name: "Offerings",
        slug: "offerings",
        keywords: &["apartment", "house", "property", "listing", "appartement", "maison", "logement"],
    },
];

/// Whether a document answers a question: at least 40% of the question's
/// words (counting only words longer than three characters as matchable)
/// appear in the document's title or content.
pub fn question_covered(question: &str, document: &DocumentRecord) -> bool {
    let text = format!("{} {}", document.title, document.content).to_lowercase();
    let words: Vec<String> = question
        .to_lowercase()
        .split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()).to_string())
        .collect();

    if words.is_empty() {
        return false;
    }

    let matched = words
        .iter()
        .filter(|w| w.len() > 3 && text.contains(w.as_str()))
        .count();

    matched as f64 / words.len() as f64 > 0.4
}

/// Reference questions asked often enough (count above 5) that are not
/// covered by any document.
pub fn detect_question_gaps(documents: &[DocumentRecord]) -> Vec<KnowledgeGap> {
    let mut gaps = Vec::new();

    for q in REFERENCE_QUESTIONS {
        let covered = documents.iter().any(|doc| question_covered(q.question, doc));
        if covered || q.count <= 5 {
            continue;
        }

        let priority = if q.count > 20 {
            Priority::Critical
        } else if q.count > 10 {
            Priority::High
        } else {
            Priority::Medium
        };
        let estimated_impact = if q.count > 20 {
            Impact::High
        } else if q.count > 10 {
            Impact::Medium
        } else {
            Impact::Low
        };

        gaps.push(KnowledgeGap {
            id: format!("gap-question-{}", slugify(q.question)),
            kind: GapKind::FrequentQuestion,
            title: "Frequent question not documented".to_string(),
            description: format!(
                "\"{}\" was asked {} times but is not covered by the knowledge base.",
                q.question, q.count
            ),
            priority,
            suggested_action: "Create a dedicated document".to_string(),
            affected_queries: Some(vec![q.question.to_string()]),
            estimated_impact,
            metadata: Some(GapMetadata {
                question_count: Some(q.count),
                ..GapMetadata::default()
            }),
        });
    }

    gaps
}

/// Documents that have gone more than 90 days without an update.
pub fn detect_outdated_content(
    documents: &[DocumentRecord],
    now: DateTime<Utc>,
) -> Vec<KnowledgeGap> {
    let mut gaps = Vec::new();

    for doc in documents {
        let last_updated = doc.last_updated();
        let days_since_update = fractional_days_since(now, last_updated).floor() as i64;

        if days_since_update > 90 {
            gaps.push(KnowledgeGap {
                id: format!("gap-outdated-{}", doc.id),
                kind: GapKind::OutdatedContent,
                title: "Document may be outdated".to_string(),
                description: format!(
                    "\"{}\" has not been updated in {} days.",
                    doc.title, days_since_update
                ),
                priority: if days_since_update > 180 {
                    Priority::High
                } else {
                    Priority::Medium
                },
                suggested_action: "Review and refresh the content".to_string(),
                affected_queries: None,
                estimated_impact: Impact::Medium,
                metadata: Some(GapMetadata {
                    last_updated: Some(last_updated),
                    ..GapMetadata::default()
                }),
            });
        }
    }

    gaps
}

/// Documents older than 30 days with fewer than 2 recorded uses. Only
/// meaningful once the base holds more than 5 documents.
pub fn detect_unused_content(
    documents: &[DocumentRecord],
    usage_counts: &HashMap<String, u32>,
    now: DateTime<Utc>,
) -> Vec<KnowledgeGap> {
    let mut gaps = Vec::new();

    if documents.len() <= 5 {
        return gaps;
    }

    for doc in documents {
        let usage = usage_counts.get(&doc.id).copied().unwrap_or(0);
        let old_enough = fractional_days_since(now, doc.created_at) > 30.0;

        if usage < 2 && old_enough {
            gaps.push(KnowledgeGap {
                id: format!("gap-unused-{}", doc.id),
                kind: GapKind::LowQuality,
                title: "Rarely used document".to_string(),
                description: format!(
                    "\"{}\" has only been used {} times. Consider deleting or merging it.",
                    doc.title, usage
                ),
                priority: Priority::Low,
                suggested_action: "Archive or merge".to_string(),
                affected_queries: None,
                estimated_impact: Impact::Low,
                metadata: Some(GapMetadata {
                    question_count: Some(usage),
                    ..GapMetadata::default()
                }),
            });
        }
    }

    gaps
}

/// Essential categories with no keyword match anywhere in the base.
pub fn detect_category_gaps(documents: &[DocumentRecord]) -> Vec<KnowledgeGap> {
    let mut gaps = Vec::new();

    for category in ESSENTIAL_CATEGORIES {
        let covered = documents.iter().any(|doc| {
            let title = doc.title.to_lowercase();
            let content = doc.content.to_lowercase();
            category
                .keywords
                .iter()
                .any(|k| title.contains(k) || content.contains(k))
        });

        if !covered {
            gaps.push(KnowledgeGap {
                id: format!("gap-category-{}", category.slug),
                kind: GapKind::MissingContent,
                title: format!("Missing content: {}", category.name),
                description: format!(
                    "No document covers the \"{}\" category. This limits what the assistant can \
                     answer.",
                    category.name
                ),
                priority: Priority::High,
                suggested_action: format!("Create a document about {}", category.name),
                affected_queries: None,
                estimated_impact: Impact::High,
                metadata: None,
            });
        }
    }

    gaps
}

fn slugify(text: &str) -> String {
    text.to_lowercase()
        .split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|w| !w.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}
