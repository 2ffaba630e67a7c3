//! Mappers turning heterogeneous FAQ JSON objects into canonical [`FaqRecord`]s.
//!
//! Upstream feeds have used several names for the same field over time
//! (`question` / `questionEnglish` / `q`, bilingual `*Hindi` variants, ...).
//! Aliases are resolved here, before any text is combined.

use serde_json::{Map, Value};

use crate::errors::FaqError;
use crate::record::FaqRecord;

const ID_KEYS: &[&str] = &["id", "_id", "faqId", "faq_id", "uuid", "slug"];
const QUESTION_PRIMARY_KEYS: &[&str] = &[
    "question",
    "questionEnglish",
    "question_en",
    "questionEn",
    "title",
    "q",
];
const QUESTION_SECONDARY_KEYS: &[&str] = &[
    "questionHindi",
    "question_hi",
    "questionHi",
    "questionSecondary",
];
const ANSWER_PRIMARY_KEYS: &[&str] = &["answer", "answerEnglish", "answer_en", "answerEn", "a"];
const ANSWER_SECONDARY_KEYS: &[&str] = &["answerHindi", "answer_hi", "answerHi", "answerSecondary"];
const CATEGORY_KEYS: &[&str] = &["category", "categoryEnglish", "category_en", "topic"];

/// Text fields of one FAQ object after alias resolution. All values trimmed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FaqFields {
    pub id: Option<String>,
    pub question_primary: String,
    pub question_secondary: String,
    pub answer_primary: String,
    pub answer_secondary: String,
    pub category: String,
}

impl FaqFields {
    /// Lenient extraction: never fails, missing fields are empty.
    pub fn from_raw(raw: &Value) -> Self {
        let Some(obj) = raw.as_object() else {
            return Self::default();
        };
        Self {
            id: pick_id(obj),
            question_primary: pick_text(obj, QUESTION_PRIMARY_KEYS),
            question_secondary: pick_text(obj, QUESTION_SECONDARY_KEYS),
            answer_primary: pick_text(obj, ANSWER_PRIMARY_KEYS),
            answer_secondary: pick_text(obj, ANSWER_SECONDARY_KEYS),
            category: pick_text(obj, CATEGORY_KEYS),
        }
    }

    /// Non-empty text fields in the fixed embedding order, space-joined.
    pub fn combined_text(&self) -> String {
        [
            self.question_primary.as_str(),
            self.answer_primary.as_str(),
            self.question_secondary.as_str(),
            self.answer_secondary.as_str(),
        ]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
    }

    /// Converts into a record, keeping whatever id was found (possibly empty).
    pub fn into_record(self) -> FaqRecord {
        let combined_text = self.combined_text();
        FaqRecord {
            id: self.id.unwrap_or_default(),
            question_primary: self.question_primary,
            question_secondary: self.question_secondary,
            answer_primary: self.answer_primary,
            answer_secondary: self.answer_secondary,
            category: self.category,
            combined_text,
        }
    }
}

/// Concatenates question-primary, answer-primary, question-secondary and
/// answer-secondary (whichever are present), trimmed and space-joined.
pub fn combine_text(raw: &Value) -> String {
    FaqFields::from_raw(raw).combined_text()
}

/// Returns the record identifier.
///
/// # Errors
/// [`FaqError::Validation`] if no identifying field is present.
pub fn extract_id(raw: &Value) -> Result<String, FaqError> {
    raw.as_object()
        .and_then(pick_id)
        .ok_or_else(|| FaqError::Validation("FAQ record has no identifying field".into()))
}

/// Builds a validated record: it must carry an id and some text to embed.
///
/// # Errors
/// [`FaqError::Validation`] for a missing id or a record with no text.
pub fn build_record(raw: &Value) -> Result<FaqRecord, FaqError> {
    let id = extract_id(raw)?;
    let record = FaqFields::from_raw(raw).into_record();
    if record.combined_text.is_empty() {
        return Err(FaqError::Validation(format!(
            "FAQ record '{id}' has no question or answer text"
        )));
    }
    Ok(FaqRecord { id, ..record })
}

/// Builds all records, failing on the first invalid one.
///
/// # Errors
/// [`FaqError::Validation`] naming the offending position.
pub fn build_records(raw: &[Value]) -> Result<Vec<FaqRecord>, FaqError> {
    raw.iter()
        .enumerate()
        .map(|(i, v)| {
            build_record(v).map_err(|e| match e {
                FaqError::Validation(msg) => FaqError::Validation(format!("record #{i}: {msg}")),
                other => other,
            })
        })
        .collect()
}

// ---------- helpers ----------

/// First non-empty string among `keys`, trimmed.
fn pick_text(obj: &Map<String, Value>, keys: &[&str]) -> String {
    keys.iter()
        .filter_map(|k| obj.get(*k).and_then(Value::as_str))
        .map(str::trim)
        .find(|s| !s.is_empty())
        .unwrap_or_default()
        .to_string()
}

/// First non-empty id among [`ID_KEYS`]; integer ids are stringified.
fn pick_id(obj: &Map<String, Value>) -> Option<String> {
    ID_KEYS.iter().find_map(|k| match obj.get(*k)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn combines_in_fixed_order_skipping_empty_fields() {
        let raw = json!({
            "answerHindi": " उत्तर ",
            "question": " How do I apply? ",
            "questionHindi": "",
            "answer": "Online."
        });
        assert_eq!(combine_text(&raw), "How do I apply? Online. उत्तर");
    }

    #[test]
    fn resolves_historical_aliases() {
        let raw = json!({ "faqId": 12, "q": "reset password", "answerEnglish": "Use the link" });
        let rec = build_record(&raw).unwrap();
        assert_eq!(rec.id, "12");
        assert_eq!(rec.question_primary, "reset password");
        assert_eq!(rec.answer_primary, "Use the link");
    }

    #[test]
    fn primary_alias_wins_over_later_aliases() {
        let raw = json!({ "id": "a", "question": "first", "q": "second" });
        assert_eq!(FaqFields::from_raw(&raw).question_primary, "first");
    }

    #[test]
    fn missing_id_is_a_validation_error() {
        let err = extract_id(&json!({ "question": "no id" })).unwrap_err();
        assert!(matches!(err, FaqError::Validation(_)));

        let err = extract_id(&json!({ "id": "   " })).unwrap_err();
        assert!(matches!(err, FaqError::Validation(_)));
    }

    #[test]
    fn record_without_text_is_rejected() {
        let err = build_record(&json!({ "id": "x", "category": "misc" })).unwrap_err();
        assert!(err.to_string().contains("no question or answer text"));
    }

    #[test]
    fn build_records_reports_position() {
        let raw = vec![
            json!({ "id": 1, "question": "ok" }),
            json!({ "question": "missing id" }),
        ];
        let err = build_records(&raw).unwrap_err();
        assert!(err.to_string().contains("record #1"));
    }

    #[test]
    fn non_object_is_empty_fields() {
        assert_eq!(FaqFields::from_raw(&json!("text")), FaqFields::default());
        assert_eq!(combine_text(&json!(42)), "");
    }
}
