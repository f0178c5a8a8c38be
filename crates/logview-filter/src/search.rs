use logview_types::LogEntry;

/// Narrow an already tag-filtered sequence by case-insensitive substring
/// match on the composed message.
///
/// Empty search text is the identity. Search only ever narrows: the result
/// is a subsequence of `entries`, in the same order. Re-run on every
/// keystroke; the tag filter pass is never re-run for a search change.
pub fn refine(entries: &[LogEntry], search_text: &str) -> Vec<LogEntry> {
    if search_text.is_empty() {
        return entries.to_vec();
    }
    let needle = search_text.to_lowercase();
    entries
        .iter()
        .filter(|entry| entry.message.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use logview_types::LogLevel;
    use pretty_assertions::assert_eq;

    fn entry(message: &str) -> LogEntry {
        LogEntry::new(Utc::now(), LogLevel::Info, message)
    }

    #[test]
    fn test_empty_search_is_identity() {
        let entries = vec![entry("timeout"), entry("render")];
        assert_eq!(refine(&entries, ""), entries);
    }

    #[test]
    fn test_match_is_case_insensitive() {
        let entries = vec![entry("Connection TIMEOUT after 30s"), entry("render pass")];
        let found = refine(&entries, "timeout");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].message, "Connection TIMEOUT after 30s");

        let found = refine(&entries, "RENDER");
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn test_no_match_yields_empty_result() {
        let entries = vec![entry("timeout")];
        assert!(refine(&entries, "render").is_empty());
    }

    #[test]
    fn test_result_preserves_input_order() {
        let entries = vec![entry("a request"), entry("b response"), entry("c request")];
        let found = refine(&entries, "request");
        let messages: Vec<&str> = found.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, ["a request", "c request"]);
    }
}
