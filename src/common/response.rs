use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

/// Media type of a serialized [`ProblemDetails`]
pub const PROBLEM_JSON: &str = "application/problem+json";

/// Standard error payload for HTTP APIs
///
/// # Example
/// ```
/// use meshestra_exceptions::common::ProblemDetails;
///
/// let problem = ProblemDetails {
///     status: 500,
///     title: "Internal Server Error".to_string(),
///     instance: "GET /users/5".to_string(),
///     detail: None,
/// };
/// let json = serde_json::to_value(&problem).unwrap();
/// assert!(json.get("detail").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemDetails {
    pub status: u16,
    pub title: String,
    /// `"<METHOD> <PATH>"` of the failed request
    pub instance: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ProblemDetails {
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl IntoResponse for ProblemDetails {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match serde_json::to_vec(&self) {
            Ok(body) => (status, [(header::CONTENT_TYPE, PROBLEM_JSON)], body).into_response(),
            Err(_) => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        }
    }
}

/// The response an exception filter settles on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionResult {
    /// A bare status with an empty body
    Status(StatusCode),
    /// A problem details body served with its own status
    Problem(ProblemDetails),
}

impl ActionResult {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ActionResult::Status(status) => *status,
            ActionResult::Problem(problem) => problem.status_code(),
        }
    }

    pub fn problem(&self) -> Option<&ProblemDetails> {
        match self {
            ActionResult::Status(_) => None,
            ActionResult::Problem(problem) => Some(problem),
        }
    }
}

impl IntoResponse for ActionResult {
    fn into_response(self) -> Response {
        match self {
            ActionResult::Status(status) => status.into_response(),
            ActionResult::Problem(problem) => problem.into_response(),
        }
    }
}
