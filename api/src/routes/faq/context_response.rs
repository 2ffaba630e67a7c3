use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ContextResponse {
    pub query: String,
    /// Formatted FAQ context, `null` when nothing relevant was found.
    pub context: Option<String>,
}
