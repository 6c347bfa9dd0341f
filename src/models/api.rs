use serde::Serialize;

/// API error response.
#[derive(Serialize, Debug)]
pub struct ApiErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Response to a reorder request.
#[derive(Serialize, Debug)]
pub struct ReorderResponse {
    pub requested: usize,
    pub applied: usize,
}
