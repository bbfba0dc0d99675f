use crate::error::{MoodError, Result};
use crate::mood_entry::MoodEntry;
use std::collections::{HashMap, HashSet};

pub fn count_by_mood(entries: &[MoodEntry]) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for entry in entries {
        *counts.entry(entry.mood.clone()).or_insert(0) += 1;
    }
    counts
}

// Ties resolve to the lexically smallest mood token.
pub fn most_common(counts: &HashMap<String, usize>) -> Option<String> {
    counts
        .iter()
        .max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(a.0)))
        .map(|(mood, _)| mood.clone())
}

pub fn distinct_submitters(entries: &[MoodEntry]) -> usize {
    entries
        .iter()
        .map(|e| e.name.as_str())
        .collect::<HashSet<_>>()
        .len()
}

pub fn average_position(entries: &[MoodEntry], scale: &[&str]) -> Result<Option<f64>> {
    if entries.is_empty() {
        return Ok(None);
    }

    let mut total = 0usize;
    for entry in entries {
        let position = scale
            .iter()
            .position(|m| *m == entry.mood)
            .ok_or_else(|| MoodError::UnknownCategory(entry.mood.clone()))?;
        total += position;
    }

    Ok(Some(total as f64 / entries.len() as f64))
}

pub fn recent_first(entries: &[MoodEntry], limit: usize) -> Vec<MoodEntry> {
    let mut sorted = entries.to_vec();
    sorted.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    sorted.truncate(limit);
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mood_entry::MOOD_SCALE;

    fn entry(name: &str, mood: &str, timestamp: &str) -> MoodEntry {
        MoodEntry {
            name: name.to_string(),
            mood: mood.to_string(),
            timestamp: timestamp.to_string(),
        }
    }

    #[test]
    fn counts_occurrences_per_mood() {
        let entries = [
            entry("A", "😊", "2024-01-01T00:00:00"),
            entry("B", "😊", "2024-01-01T00:00:01"),
            entry("C", "😐", "2024-01-01T00:00:02"),
        ];

        let counts = count_by_mood(&entries);
        assert_eq!(counts.len(), 2);
        assert_eq!(counts["😊"], 2);
        assert_eq!(counts["😐"], 1);
    }

    #[test]
    fn most_common_picks_the_max() {
        let entries = [
            entry("A", "😊", "2024-01-01T00:00:00"),
            entry("B", "😊", "2024-01-01T00:00:01"),
            entry("C", "😐", "2024-01-01T00:00:02"),
        ];

        let counts = count_by_mood(&entries);
        assert_eq!(most_common(&counts), Some("😊".to_string()));
    }

    #[test]
    fn most_common_breaks_ties_lexically() {
        let mut counts = HashMap::new();
        counts.insert("😐".to_string(), 2);
        counts.insert("😊".to_string(), 2);

        // '😊' (U+1F60A) sorts before '😐' (U+1F610)
        assert_eq!(most_common(&counts), Some("😊".to_string()));
    }

    #[test]
    fn most_common_on_empty_counts_is_none() {
        assert_eq!(most_common(&HashMap::new()), None);
    }

    #[test]
    fn distinct_submitters_counts_unique_names() {
        let entries = [
            entry("A", "😊", "2024-01-01T00:00:00"),
            entry("A", "😐", "2024-01-01T00:00:01"),
            entry("B", "😊", "2024-01-01T00:00:02"),
        ];

        assert_eq!(distinct_submitters(&entries), 2);
    }

    #[test]
    fn average_position_over_the_scale() {
        let entries = [
            entry("A", "😐", "2024-01-01T00:00:00"),
            entry("B", "😊", "2024-01-01T00:00:01"),
        ];

        let avg = average_position(&entries, &MOOD_SCALE).unwrap();
        assert_eq!(avg, Some(1.5));
    }

    #[test]
    fn average_position_rejects_unknown_categories() {
        let entries = [entry("A", "🤖", "2024-01-01T00:00:00")];

        let err = average_position(&entries, &MOOD_SCALE).unwrap_err();
        assert!(matches!(err, MoodError::UnknownCategory(m) if m == "🤖"));
    }

    #[test]
    fn average_position_of_nothing_is_undefined() {
        assert_eq!(average_position(&[], &MOOD_SCALE).unwrap(), None);
    }

    #[test]
    fn recent_first_sorts_by_timestamp_descending() {
        let entries = [
            entry("A", "😊", "2024-01-01T00:00:00"),
            entry("B", "😐", "2024-02-01T00:00:00"),
        ];

        let recent = recent_first(&entries, 1);
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].name, "B");
    }

    #[test]
    fn recent_first_with_large_limit_keeps_everything() {
        let entries = [
            entry("A", "😊", "2024-01-01T00:00:00"),
            entry("B", "😐", "2024-02-01T00:00:00"),
        ];

        assert_eq!(recent_first(&entries, 10).len(), 2);
    }
}
