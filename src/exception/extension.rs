use crate::config::Environment;
use crate::exception::{ExceptionFilterLayer, FilterChain};
use axum::Router;

/// Registration helpers for [`axum::Router`]
pub trait ExceptionMiddlewareExt {
    /// Install [`HttpResponseExceptionFilter`](crate::exception::HttpResponseExceptionFilter)
    /// as the last stage for every route registered so far.
    fn use_exception_middleware(self, environment: &Environment) -> Self;

    /// Install a custom chain of filters
    fn use_exception_filters(self, chain: FilterChain) -> Self;
}

impl<S> ExceptionMiddlewareExt for Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn use_exception_middleware(self, environment: &Environment) -> Self {
        let mut chain = FilterChain::new();
        chain.use_http_exception_filter(environment);
        self.use_exception_filters(chain)
    }

    fn use_exception_filters(self, chain: FilterChain) -> Self {
        self.layer(ExceptionFilterLayer::new(chain))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::ActionResult;
    use crate::error::{Exception, Result};
    use crate::exception::{ExceptionContext, ExceptionFilter};
    use axum::{
        body::Body,
        extract::State,
        http::{Request, StatusCode},
        routing::{get, post},
    };
    use tower::ServiceExt;
    use tower_http::trace::TraceLayer;

    #[derive(Clone)]
    struct AppState {
        maintenance: bool,
    }

    async fn create_order(State(state): State<AppState>) -> Result<&'static str> {
        if state.maintenance {
            return Err(Exception::unknown("orders are paused"));
        }
        Err(Exception::bad_request(""))
    }

    async fn health() -> &'static str {
        "ok"
    }

    struct MaintenanceFilter;

    impl ExceptionFilter for MaintenanceFilter {
        fn on_action_executed(&self, context: &mut ExceptionContext) {
            let paused = context
                .exception()
                .is_some_and(|e| e.message() == Some("orders are paused"));
            if paused {
                context.set_result(ActionResult::Status(StatusCode::SERVICE_UNAVAILABLE));
                context.set_handled(true);
            }
        }
    }

    fn post_request(uri: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_use_exception_middleware_maps_handler_errors() {
        let app = Router::new()
            .route("/orders", post(create_order))
            .route("/health", get(health))
            .use_exception_middleware(&Environment::Production)
            .layer(TraceLayer::new_for_http())
            .with_state(AppState { maintenance: false });

        let response = app.clone().oneshot(post_request("/orders")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let health = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let response = app.oneshot(health).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    async fn fail() -> Result<&'static str> {
        Err(Exception::unknown("boom").with_stack_trace("at users::fail"))
    }

    #[tokio::test]
    async fn test_nested_router_keeps_full_path_in_instance() {
        let users = Router::new()
            .route("/users/{id}", get(fail))
            .use_exception_middleware(&Environment::Development);
        let app: Router = Router::new().nest("/api", users);

        let request = Request::builder()
            .uri("/api/users/5")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let problem: crate::common::ProblemDetails = serde_json::from_slice(&body).unwrap();
        assert_eq!(problem.instance, "GET /api/users/5");
        assert_eq!(problem.detail.as_deref(), Some("at users::fail"));
    }

    #[tokio::test]
    async fn test_custom_filters_run_before_http_filter() {
        let mut chain = FilterChain::new();
        chain
            .use_http_exception_filter(&Environment::Development)
            .add(MaintenanceFilter);

        let app = Router::new()
            .route("/orders", post(create_order))
            .use_exception_filters(chain)
            .with_state(AppState { maintenance: true });

        let response = app.oneshot(post_request("/orders")).await.unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
