/// One row in the sidebar history list.
///
/// The list is placeholder data: it is seeded at startup and never linked to the
/// live conversation or written to storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatHistoryEntry {
    pub id: u64,
    pub title: String,
    pub pinned: bool,
}

impl ChatHistoryEntry {
    pub fn new(id: u64, title: impl Into<String>, pinned: bool) -> Self {
        Self {
            id,
            title: title.into(),
            pinned,
        }
    }
}

pub fn seeded_history() -> Vec<ChatHistoryEntry> {
    vec![
        ChatHistoryEntry::new(1, "Brainstorming session", true),
        ChatHistoryEntry::new(2, "React component help", false),
        ChatHistoryEntry::new(3, "Marketing copy ideas", false),
    ]
}

/// Entries whose title contains `query` (case-insensitive), pinned first.
///
/// The sort is stable, so entries keep their seeded order within each group.
pub fn filter_history<'a>(entries: &'a [ChatHistoryEntry], query: &str) -> Vec<&'a ChatHistoryEntry> {
    let query = query.to_lowercase();
    let mut matches = entries
        .iter()
        .filter(|entry| query.is_empty() || entry.title.to_lowercase().contains(&query))
        .collect::<Vec<_>>();
    matches.sort_by_key(|entry| !entry.pinned);
    matches
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titles(entries: &[&ChatHistoryEntry]) -> Vec<String> {
        entries.iter().map(|entry| entry.title.clone()).collect()
    }

    #[test]
    fn empty_query_lists_everything_pinned_first() {
        let history = seeded_history();
        let filtered = filter_history(&history, "");
        assert_eq!(
            titles(&filtered),
            vec![
                "Brainstorming session",
                "React component help",
                "Marketing copy ideas",
            ]
        );
    }

    #[test]
    fn match_is_case_insensitive_substring() {
        let history = seeded_history();
        assert_eq!(
            titles(&filter_history(&history, "COMPONENT")),
            vec!["React component help"]
        );
        assert!(filter_history(&history, "nothing like this").is_empty());
    }

    #[test]
    fn pinned_entries_lead_even_when_listed_last() {
        let history = vec![
            ChatHistoryEntry::new(1, "Session notes", false),
            ChatHistoryEntry::new(2, "Other session", false),
            ChatHistoryEntry::new(3, "Pinned session", true),
        ];

        let filtered = filter_history(&history, "session");

        assert_eq!(
            filtered.iter().map(|entry| entry.id).collect::<Vec<_>>(),
            vec![3, 1, 2]
        );
    }

    #[test]
    fn query_whitespace_is_significant() {
        let history = seeded_history();
        assert_eq!(
            titles(&filter_history(&history, "copy ")),
            vec!["Marketing copy ideas"]
        );
        assert!(filter_history(&history, " react").is_empty());
    }
}
