use crate::error::{BoxError, Exception, RaisedException};
use crate::exception::{ArgumentsHost, ExceptionContext, FilterChain};
use axum::{
    body::Body,
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
};
use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tower::{Layer, Service, ServiceExt};

/// Tower Layer running a [`FilterChain`] over failed requests.
///
/// A request fails when the inner service returns an error, or when the
/// handler returned an [`Exception`] as its response.
#[derive(Clone)]
pub struct ExceptionFilterLayer {
    chain: Arc<FilterChain>,
}

impl ExceptionFilterLayer {
    pub fn new(chain: FilterChain) -> Self {
        Self {
            chain: Arc::new(chain),
        }
    }
}

impl<S> Layer<S> for ExceptionFilterLayer {
    type Service = ExceptionFilterMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        ExceptionFilterMiddleware {
            inner,
            chain: self.chain.clone(),
        }
    }
}

#[derive(Clone)]
pub struct ExceptionFilterMiddleware<S> {
    inner: S,
    chain: Arc<FilterChain>,
}

impl<S> Service<Request<Body>> for ExceptionFilterMiddleware<S>
where
    S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
    S::Future: Send + 'static,
    S::Error: Into<BoxError>,
{
    type Response = Response;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Response, Infallible>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        // Readiness of the inner service is awaited in `call`, so its errors are filtered too
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: Request<Body>) -> Self::Future {
        let host = ArgumentsHost::from_request(&request);
        let chain = self.chain.clone();
        let inner = self.inner.clone();

        Box::pin(async move {
            let exception = match inner.oneshot(request).await {
                Ok(mut response) => match response.extensions_mut().remove::<RaisedException>() {
                    Some(RaisedException(exception)) => exception,
                    None => return Ok(response),
                },
                Err(error) => Exception::from_boxed(error.into()),
            };

            let mut context = ExceptionContext::new(host, Some(exception));
            chain.execute(&mut context);

            let response = match context.into_result() {
                Some(result) => result.into_response(),
                None => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
            };
            Ok(response)
        })
    }
}
