//! Content suggestions derived from detected gaps

use std::collections::HashSet;

use super::{ContentSuggestion, GapKind, KnowledgeGap, SuggestionKind};
use crate::ranking;
use crate::types::{DocumentRecord, Priority};

/// Jaccard similarity above which two document titles count as duplicates
const MERGE_SIMILARITY_THRESHOLD: f64 = 0.7;

/// Map the gap list to concrete content edits, add merge candidates and
/// rank the result.
pub fn suggestions_from_gaps(
    gaps: &[KnowledgeGap],
    documents: &[DocumentRecord],
) -> Vec<ContentSuggestion> {
    let mut suggestions = Vec::new();

    for gap in gaps {
        match gap.kind {
            GapKind::FrequentQuestion => {
                let question = gap
                    .affected_queries
                    .as_ref()
                    .and_then(|queries| queries.first())
                    .cloned()
                    .unwrap_or_default();
                let question_count = gap
                    .metadata
                    .as_ref()
                    .and_then(|m| m.question_count)
                    .unwrap_or(0);

                suggestions.push(ContentSuggestion {
                    id: format!("suggest-new-{}", gap.id),
                    kind: SuggestionKind::NewDocument,
                    title: "Create an FAQ document".to_string(),
                    description: format!("Create a new document answering \"{question}\""),
                    priority: if gap.priority == Priority::Critical {
                        Priority::High
                    } else {
                        Priority::Medium
                    },
                    target_document: None,
                    suggested_content: Some(faq_template(&question)),
                    reason: format!("Asked {question_count} times"),
                    impact: question_count.min(100) as u8,
                });
            }
            GapKind::OutdatedContent => {
                suggestions.push(ContentSuggestion {
                    id: format!("suggest-update-{}", gap.id),
                    kind: SuggestionKind::UpdateDocument,
                    title: "Update the document".to_string(),
                    description: gap.description.clone(),
                    priority: Priority::Medium,
                    target_document: None,
                    suggested_content: None,
                    reason: "Content may be out of date".to_string(),
                    impact: 50,
                });
            }
            GapKind::LowQuality => {
                suggestions.push(ContentSuggestion {
                    id: format!("suggest-delete-{}", gap.id),
                    kind: SuggestionKind::DeleteDocument,
                    title: "Archive the document".to_string(),
                    description: gap.description.clone(),
                    priority: Priority::Low,
                    target_document: None,
                    suggested_content: None,
                    reason: "Rarely used document".to_string(),
                    impact: 20,
                });
            }
            GapKind::MissingContent => {}
        }
    }

    suggestions.extend(detect_merge_candidates(documents));

    ranking::for_suggestions().rank(&mut suggestions);
    suggestions
}

/// Pairs of documents whose titles are near-duplicates by Jaccard word
/// similarity.
pub fn detect_merge_candidates(documents: &[DocumentRecord]) -> Vec<ContentSuggestion> {
    let mut suggestions = Vec::new();

    for (i, first) in documents.iter().enumerate() {
        for second in &documents[i + 1..] {
            let similarity = title_similarity(&first.title, &second.title);
            if similarity > MERGE_SIMILARITY_THRESHOLD {
                suggestions.push(ContentSuggestion {
                    id: format!("suggest-merge-{}-{}", first.id, second.id),
                    kind: SuggestionKind::MergeDocuments,
                    title: "Merge similar documents".to_string(),
                    description: format!(
                        "\"{}\" and \"{}\" appear to cover the same topic.",
                        first.title, second.title
                    ),
                    priority: Priority::Low,
                    target_document: Some(first.id.clone()),
                    suggested_content: None,
                    reason: "Redundant documents detected".to_string(),
                    impact: 30,
                });
            }
        }
    }

    suggestions
}

/// Jaccard similarity of the lowercase word sets of two titles
pub(crate) fn title_similarity(first: &str, second: &str) -> f64 {
    let words_of = |title: &str| -> HashSet<String> {
        title
            .to_lowercase()
            .split_whitespace()
            .map(|w| w.to_string())
            .collect()
    };

    let first_words = words_of(first);
    let second_words = words_of(second);

    let union = first_words.union(&second_words).count();
    if union == 0 {
        return 0.0;
    }
    let intersection = first_words.intersection(&second_words).count();

    intersection as f64 / union as f64
}

fn faq_template(question: &str) -> String {
    format!(
        "# {question}\n\n\
         ## Short answer\n\
         [Add a concise answer here]\n\n\
         ## Details\n\
         [Add supporting information if needed]\n"
    )
}
