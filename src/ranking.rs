//! Ranking policies for generated records
//!
//! Every analysis orders its output by a composite weight before returning
//! it. The weight tables live here, in one place, and each domain gets a
//! [`RankingPolicy`] built from an injectable weight function so detectors
//! stay decoupled from ordering concerns.

use std::cmp::Reverse;

use crate::funnel::FunnelInsight;
use crate::insights::Insight;
use crate::knowledge::{ContentSuggestion, KnowledgeGap};
use crate::types::{Impact, Priority};

/// Weight contributed by business impact
pub fn impact_weight(impact: Impact) -> i64 {
    match impact {
        Impact::High => 3,
        Impact::Medium => 2,
        Impact::Low => 1,
    }
}

/// Weight contributed by priority
pub fn priority_weight(priority: Priority) -> i64 {
    match priority {
        Priority::Critical => 4,
        Priority::High => 3,
        Priority::Medium => 2,
        Priority::Low => 1,
    }
}

/// Descending stable ordering by an injectable weight function
pub struct RankingPolicy<T> {
    weight: Box<dyn Fn(&T) -> i64 + Send + Sync>,
}

impl<T> RankingPolicy<T> {
    pub fn new(weight: impl Fn(&T) -> i64 + Send + Sync + 'static) -> Self {
        Self {
            weight: Box::new(weight),
        }
    }

    /// The composite weight this policy assigns to `item`
    pub fn weight_of(&self, item: &T) -> i64 {
        (self.weight)(item)
    }

    /// Sort `items` by descending weight. The sort is stable: equal-weight
    /// items keep their detector emission order.
    pub fn rank(&self, items: &mut [T]) {
        items.sort_by_key(|item| Reverse((self.weight)(item)));
    }
}

/// Policy for operational [`Insight`] lists: impact weight plus kind weight
pub fn for_insights() -> RankingPolicy<Insight> {
    RankingPolicy::new(|insight: &Insight| {
        impact_weight(insight.impact) + insight.kind.weight()
    })
}

/// Policy for [`KnowledgeGap`] lists: priority weight
pub fn for_gaps() -> RankingPolicy<KnowledgeGap> {
    RankingPolicy::new(|gap: &KnowledgeGap| priority_weight(gap.priority))
}

/// Policy for [`ContentSuggestion`] lists: priority weight with numeric
/// impact as the secondary key
pub fn for_suggestions() -> RankingPolicy<ContentSuggestion> {
    RankingPolicy::new(|suggestion: &ContentSuggestion| {
        priority_weight(suggestion.priority) * 1_000 + i64::from(suggestion.impact)
    })
}

/// Policy for [`FunnelInsight`] lists: priority weight
pub fn for_funnel_insights() -> RankingPolicy<FunnelInsight> {
    RankingPolicy::new(|insight: &FunnelInsight| priority_weight(insight.priority))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weights_match_documented_tables() {
        assert_eq!(impact_weight(Impact::High), 3);
        assert_eq!(impact_weight(Impact::Medium), 2);
        assert_eq!(impact_weight(Impact::Low), 1);

        assert_eq!(priority_weight(Priority::Critical), 4);
        assert_eq!(priority_weight(Priority::High), 3);
        assert_eq!(priority_weight(Priority::Medium), 2);
        assert_eq!(priority_weight(Priority::Low), 1);
    }

    #[test]
    fn rank_is_descending_and_stable() {
        let policy: RankingPolicy<(i64, &str)> = RankingPolicy::new(|item| item.0);
        let mut items = vec![(1, "a"), (3, "b"), (1, "c"), (3, "d"), (2, "e")];
        policy.rank(&mut items);
        assert_eq!(items, vec![(3, "b"), (3, "d"), (2, "e"), (1, "a"), (1, "c")]);
    }

    #[test]
    fn suggestion_weight_uses_impact_as_tiebreak() {
        let policy = for_suggestions();
        let low_priority_high_impact = crate::knowledge::ContentSuggestion {
            id: "s1".into(),
            kind: crate::knowledge::SuggestionKind::UpdateDocument,
            title: "t".into(),
            description: "d".into(),
            priority: Priority::Medium,
            target_document: None,
            suggested_content: None,
            reason: "r".into(),
            impact: 90,
        };
        let mut high_priority = low_priority_high_impact.clone();
        high_priority.id = "s2".into();
        high_priority.priority = Priority::High;
        high_priority.impact = 10;

        // Priority dominates even a much larger impact.
        assert!(policy.weight_of(&high_priority) > policy.weight_of(&low_priority_high_impact));

        // Equal priority falls back to impact.
        let mut same_priority = low_priority_high_impact.clone();
        same_priority.impact = 40;
        assert!(policy.weight_of(&low_priority_high_impact) > policy.weight_of(&same_priority));
    }
}
