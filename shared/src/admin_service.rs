use crate::http::{full_body, make_boxed_error_response};
use http_body_util::combinators::BoxBody;
use hyper::body::{Bytes, Incoming};
use hyper::header::{CONTENT_TYPE, HeaderValue};
use hyper::service::Service;
use hyper::{Request, Response, StatusCode};
use std::future::Future;
use std::marker::PhantomData;
use std::pin::Pin;
use std::sync::Arc;

/// What the admin listener needs to know about the service it sits next to.
pub trait AdminState: Send + Sync + 'static {
    fn is_ready(&self) -> bool;

    /// Current metric values in the text exposition format.
    fn render_metrics(&self) -> String;
}

pub struct AdminService<S, E> {
    state: Arc<S>,
    _error: PhantomData<fn() -> E>,
}

impl<S, E> AdminService<S, E>
where
    S: AdminState,
    E: 'static,
{
    pub fn new(state: Arc<S>) -> Self {
        Self {
            state,
            _error: PhantomData,
        }
    }

    pub fn respond(&self, path: &str) -> Response<BoxBody<Bytes, E>> {
        let ok = || Response::new(full_body("ok\n"));

        match path {
            "/health" => ok(),
            "/ready" => match self.state.is_ready() {
                true => ok(),
                false => make_boxed_error_response(StatusCode::SERVICE_UNAVAILABLE),
            },
            "/metrics" => {
                let mut response = Response::new(full_body(self.state.render_metrics()));
                response.headers_mut().insert(
                    CONTENT_TYPE,
                    HeaderValue::from_static("text/plain; version=0.0.4"),
                );
                response
            }
            _ => make_boxed_error_response(StatusCode::NOT_FOUND),
        }
    }
}

impl<S, E> Service<Request<Incoming>> for AdminService<S, E>
where
    S: AdminState,
    E: Send + 'static,
{
    type Response = Response<BoxBody<Bytes, E>>;
    type Error = E;
    type Future =
        Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send + 'static>>;

    fn call(&self, req: Request<Incoming>) -> Self::Future {
        let res = self.respond(req.uri().path());
        Box::pin(async move { Ok(res) })
    }
}
