//! # Meshestra Exceptions
//!
//! Exception filters for Axum applications.
//!
//! Handlers return [`Result<T>`](Result) with an [`Exception`] describing what
//! went wrong. The exception filter layer runs after the handler and turns
//! every exception into a standard HTTP response, so nothing escapes the
//! pipeline unmapped.
//!
//! ## Features
//!
//! - **Closed error taxonomy**: `Timeout`, `BadRequest`, `NotFound`, `Forbidden`, `Unknown`
//! - **Problem details**: timeouts and unexpected errors answer with a JSON
//!   body carrying `status`, `title`, `instance` and, outside production, the stack trace
//! - **Ordered filters**: add your own [`ExceptionFilter`]s; the built-in one runs last
//! - **Tower integration**: errors from inner services, such as
//!   `tower::timeout`, are filtered too
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use meshestra_exceptions::prelude::*;
//!
//! async fn get_user(Path(id): Path<u32>) -> Result<String> {
//!     if id == 1 {
//!         Ok("Test User".to_string())
//!     } else {
//!         Err(Exception::not_found("User not found"))
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let environment = ConfigService::new().environment();
//!
//!     let app: Router = Router::new()
//!         .route("/users/{id}", axum::routing::get(get_user))
//!         .use_exception_middleware(&environment);
//!
//!     // Serve your app...
//! }
//! ```

pub mod common;
pub mod config;
pub mod error;
pub mod exception;

#[cfg(test)]
mod test_support;

// Re-export core types
pub use common::{ActionResult, ProblemDetails};
pub use config::{ConfigService, Environment};
pub use error::{ErrorKind, Exception, Result};
pub use exception::{
    ArgumentsHost, ExceptionContext, ExceptionFilter, ExceptionFilterLayer,
    ExceptionMiddlewareExt, FilterChain, HttpResponseExceptionFilter,
};

// Re-export commonly used types from dependencies
pub use axum;

/// Prelude module for convenient imports
///
/// ```
/// use meshestra_exceptions::prelude::*;
/// ```
pub mod prelude {
    pub use crate::common::{ActionResult, ProblemDetails};
    pub use crate::config::{ConfigService, Environment};
    pub use crate::error::{ErrorKind, Exception, Result};
    pub use crate::exception::{
        ArgumentsHost, ExceptionContext, ExceptionFilter, ExceptionFilterLayer,
        ExceptionMiddlewareExt, FilterChain, HttpResponseExceptionFilter,
    };
    pub use axum::{
        Json, Router,
        extract::{Path, Query, State},
        http::StatusCode,
        response::{IntoResponse, Response},
    };
    pub use std::sync::Arc;
}
