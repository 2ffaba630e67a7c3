//! Keyword retrieval over the raw FAQ list, used when no vector index is configured.

use serde_json::Value;
use tracing::debug;

use crate::record::RetrievalResult;
use crate::record_builder::FaqFields;

/// Ranks `faqs` by how many query tokens occur in each FAQ's text.
///
/// Tokens are whitespace-separated and lower-cased; a token matches when it is
/// a substring of the lower-cased question and answer text (both languages).
/// The reported score is `matched / total` tokens. With an empty query, or when
/// nothing matches, the first `limit` FAQs are returned in source order with
/// score 0.
pub fn lexical_search(faqs: &[Value], query: &str, limit: usize) -> Vec<RetrievalResult> {
    if faqs.is_empty() || limit == 0 {
        return Vec::new();
    }

    let tokens: Vec<String> = query.split_whitespace().map(str::to_lowercase).collect();

    let mut scored: Vec<(usize, FaqFields)> = Vec::new();
    if !tokens.is_empty() {
        for raw in faqs {
            let fields = FaqFields::from_raw(raw);
            let haystack = fields.combined_text().to_lowercase();
            let matched = tokens.iter().filter(|t| haystack.contains(t.as_str())).count();
            if matched > 0 {
                scored.push((matched, fields));
            }
        }
    }

    if scored.is_empty() {
        debug!("lexical_search: no keyword match, returning first {limit} FAQs");
        return faqs
            .iter()
            .take(limit)
            .map(|raw| RetrievalResult {
                record: FaqFields::from_raw(raw).into_record(),
                score: 0.0,
            })
            .collect();
    }

    // Stable: equal scores keep source order.
    scored.sort_by(|a, b| b.0.cmp(&a.0));

    let total = tokens.len() as f32;
    let out: Vec<RetrievalResult> = scored
        .into_iter()
        .take(limit)
        .map(|(matched, fields)| RetrievalResult {
            record: fields.into_record(),
            score: matched as f32 / total,
        })
        .collect();
    debug!("lexical_search: {} results", out.len());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn faqs() -> Vec<Value> {
        vec![
            json!({ "id": 1, "question": "How do I reset my password?", "answer": "Use the reset link." }),
            json!({ "id": 2, "question": "Where is my order?", "answer": "Check the tracking page." }),
            json!({ "id": 3, "question": "Password rules", "answer": "At least 12 characters." }),
            json!({ "id": 4, "questionHindi": "पासवर्ड कैसे बदलें", "answerHindi": "लिंक का उपयोग करें" }),
        ]
    }

    #[test]
    fn ranks_by_matched_tokens() {
        let res = lexical_search(&faqs(), "Reset PASSWORD", 5);
        let ids: Vec<&str> = res.iter().map(|r| r.record.id.as_str()).collect();
        assert_eq!(ids, ["1", "3"]);
        assert_eq!(res[0].score, 1.0);
        assert_eq!(res[1].score, 0.5);
    }

    #[test]
    fn short_alias_records_rank_by_overlap() {
        let list = vec![json!({ "q": "change email" }), json!({ "q": "reset password" })];
        let res = lexical_search(&list, "password", 5);
        assert_eq!(res.len(), 1);
        assert_eq!(res[0].record.question(), "reset password");
    }

    #[test]
    fn ties_keep_source_order() {
        let res = lexical_search(&faqs(), "my", 5);
        let ids: Vec<&str> = res.iter().map(|r| r.record.id.as_str()).collect();
        assert_eq!(ids, ["1", "2"]);
    }

    #[test]
    fn matches_secondary_language_text() {
        let res = lexical_search(&faqs(), "पासवर्ड", 5);
        assert_eq!(res.len(), 1);
        assert_eq!(res[0].record.id, "4");
        assert_eq!(res[0].record.question(), "पासवर्ड कैसे बदलें");
    }

    #[test]
    fn no_match_falls_back_to_source_order() {
        let res = lexical_search(&faqs(), "refund", 2);
        assert_eq!(res.len(), 2);
        assert_eq!(res[0].record.id, "1");
        assert_eq!(res[1].record.id, "2");
        assert!(res.iter().all(|r| r.score == 0.0));
    }

    #[test]
    fn blank_query_falls_back() {
        assert_eq!(lexical_search(&faqs(), "   ", 3).len(), 3);
    }

    #[test]
    fn empty_list_is_empty() {
        assert!(lexical_search(&[], "password", 5).is_empty());
    }

    #[test]
    fn truncates_to_limit() {
        assert_eq!(lexical_search(&faqs(), "password", 1).len(), 1);
    }
}
