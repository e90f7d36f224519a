//! AAR analytics computed from the cached list

use std::collections::{BTreeMap, HashMap};

use super::models::{Aar, EventId};

/// How many recurring improve items the AARs page lists
pub const DEFAULT_TOP_ISSUES: usize = 5;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AarSummary {
    pub total_aars: usize,
    pub sustain_count: usize,
    pub improve_count: usize,
    pub action_count: usize,
    /// AAR count per event
    pub per_event: BTreeMap<EventId, usize>,
    /// Most frequent improve items, most common first
    pub top_issues: Vec<RecurringItem>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecurringItem {
    /// Text of the first occurrence
    pub text: String,
    pub count: usize,
}

impl AarSummary {
    /// Average items per report, or 0 with no reports
    pub fn items_per_aar(&self) -> f64 {
        if self.total_aars == 0 {
            return 0.0;
        }
        (self.sustain_count + self.improve_count + self.action_count) as f64
            / self.total_aars as f64
    }
}

/// Items that differ only in case or spacing group together
pub fn normalize_item(item: &str) -> String {
    item.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn summarize(aars: &[Aar], top_n: usize) -> AarSummary {
    let mut summary = AarSummary {
        total_aars: aars.len(),
        ..AarSummary::default()
    };

    // normalized text -> (first spelling, count)
    let mut issues: HashMap<String, (String, usize)> = HashMap::new();

    for aar in aars {
        summary.sustain_count += aar.sustain_items.len();
        summary.improve_count += aar.improve_items.len();
        summary.action_count += aar.action_items.len();
        *summary.per_event.entry(aar.event_id).or_default() += 1;

        for item in &aar.improve_items {
            let key = normalize_item(item);
            if key.is_empty() {
                continue;
            }
            issues
                .entry(key)
                .or_insert_with(|| (item.trim().to_string(), 0))
                .1 += 1;
        }
    }

    let mut ranked: Vec<(String, String, usize)> = issues
        .into_iter()
        .map(|(key, (text, count))| (key, text, count))
        .collect();
    ranked.sort_by(|a, b| b.2.cmp(&a.2).then_with(|| a.0.cmp(&b.0)));

    summary.top_issues = ranked
        .into_iter()
        .take(top_n)
        .map(|(_, text, count)| RecurringItem { text, count })
        .collect();

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn aar(id: i64, event_id: EventId, improve: &[&str], sustain: usize) -> Aar {
        Aar {
            id,
            event_id,
            unit_id: 1,
            created_by: 1,
            sustain_items: (0..sustain).map(|i| format!("sustain {}", i)).collect(),
            improve_items: improve.iter().map(|s| s.to_string()).collect(),
            action_items: vec!["Brief the changes".into()],
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_counts_and_per_event() {
        let aars = vec![
            aar(1, 10, &["Radio checks"], 2),
            aar(2, 10, &[], 1),
            aar(3, 11, &["Late SP"], 0),
        ];
        let summary = summarize(&aars, DEFAULT_TOP_ISSUES);
        assert_eq!(summary.total_aars, 3);
        assert_eq!(summary.sustain_count, 3);
        assert_eq!(summary.improve_count, 2);
        assert_eq!(summary.action_count, 3);
        assert_eq!(summary.per_event.get(&10), Some(&2));
        assert_eq!(summary.per_event.get(&11), Some(&1));
        assert!((summary.items_per_aar() - 8.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_recurring_items_group_case_and_spacing() {
        let aars = vec![
            aar(1, 1, &["Radio  checks", "Late SP"], 0),
            aar(2, 2, &["radio checks"], 0),
            aar(3, 3, &["RADIO CHECKS ", "late sp", "Water resupply"], 0),
        ];
        let summary = summarize(&aars, 2);
        assert_eq!(
            summary.top_issues,
            vec![
                RecurringItem {
                    text: "Radio  checks".into(),
                    count: 3
                },
                RecurringItem {
                    text: "Late SP".into(),
                    count: 2
                },
            ]
        );
    }

    #[test]
    fn test_ties_break_alphabetically() {
        let aars = vec![aar(1, 1, &["Zulu", "alpha", "Mike", "  "], 0)];
        let summary = summarize(&aars, 10);
        let texts: Vec<&str> = summary.top_issues.iter().map(|i| i.text.as_str()).collect();
        assert_eq!(texts, vec!["alpha", "Mike", "Zulu"]);
    }

    #[test]
    fn test_empty_summary() {
        let summary = summarize(&[], DEFAULT_TOP_ISSUES);
        assert_eq!(summary, AarSummary::default());
        assert_eq!(summary.items_per_aar(), 0.0);
    }
}
