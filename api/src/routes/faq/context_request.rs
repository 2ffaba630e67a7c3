use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ContextRequest {
    pub query: String,
}
