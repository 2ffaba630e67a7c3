//! Renders ranked FAQ matches into the text block handed to the agent.

use crate::record::FaqRecord;

/// Formats `records` as numbered `FAQ n:` blocks separated by a blank line,
/// truncated to `max_chars` characters. Empty input yields an empty string.
pub fn format_context(records: &[FaqRecord], max_chars: usize) -> String {
    let text = records
        .iter()
        .enumerate()
        .map(|(i, r)| {
            format!(
                "FAQ {}:\nQuestion: {}\nAnswer: {}",
                i + 1,
                r.question(),
                r.answer()
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => text[..cut].to_string(),
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(q: &str, a: &str) -> FaqRecord {
        FaqRecord {
            question_primary: q.into(),
            answer_primary: a.into(),
            ..Default::default()
        }
    }

    #[test]
    fn numbers_blocks_from_one() {
        let out = format_context(&[rec("Q1", "A1"), rec("Q2", "A2")], 2000);
        assert_eq!(
            out,
            "FAQ 1:\nQuestion: Q1\nAnswer: A1\n\nFAQ 2:\nQuestion: Q2\nAnswer: A2"
        );
    }

    #[test]
    fn empty_input_is_empty() {
        assert_eq!(format_context(&[], 2000), "");
    }

    #[test]
    fn truncates_on_char_boundaries() {
        let out = format_context(&[rec("प्रश्न", "उत्तर")], 20);
        assert_eq!(out.chars().count(), 20);
        assert!(out.starts_with("FAQ 1:\nQuestion: "));
    }

    #[test]
    fn secondary_language_fallback() {
        let r = FaqRecord {
            question_secondary: "प्रश्न".into(),
            answer_secondary: "उत्तर".into(),
            ..Default::default()
        };
        assert_eq!(format_context(&[r], 2000), "FAQ 1:\nQuestion: प्रश्न\nAnswer: उत्तर");
    }
}
