use crate::dispatcher::Dispatcher;
use crate::errors::WebhookError;
use http::header::{ALLOW, HeaderValue};
use http_body_util::BodyExt;
use http_body_util::combinators::BoxBody;
use hyper::body::{Body, Bytes, Incoming};
use hyper::service::Service;
use hyper::{Method, Request, Response, StatusCode};
use shared::http::{json_response, make_boxed_error_response};
use std::fmt::Display;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

pub const WEBHOOK_PATH: &str = "/webhook";

pub type ServiceResponse = Response<BoxBody<Bytes, WebhookError>>;

#[derive(Clone)]
pub struct WebhookService {
    dispatcher: Arc<Dispatcher>,
}

impl WebhookService {
    pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }

    /// Routes a request to the dispatcher. Everything posted to the webhook
    /// path is acknowledged with a 200.
    pub async fn route<B>(dispatcher: &Dispatcher, req: Request<B>) -> ServiceResponse
    where
        B: Body,
        B::Error: Display,
    {
        if req.uri().path() != WEBHOOK_PATH {
            return make_boxed_error_response(StatusCode::NOT_FOUND);
        }

        if req.method() != Method::POST {
            let mut response = make_boxed_error_response(StatusCode::METHOD_NOT_ALLOWED);
            response
                .headers_mut()
                .insert(ALLOW, HeaderValue::from_static("POST"));
            return response;
        }

        let (parts, body) = req.into_parts();
        let body = match body.collect().await {
            Ok(collected) => collected.to_bytes(),
            Err(e) => {
                tracing::warn!("Failed to read webhook body: {e}");
                Bytes::new()
            }
        };

        let ack = dispatcher.handle(&parts.headers, &body).await;
        json_response(StatusCode::OK, &ack)
    }
}

impl Service<Request<Incoming>> for WebhookService {
    type Response = ServiceResponse;
    type Error = WebhookError;
    type Future =
        Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send + 'static>>;

    fn call(&self, req: Request<Incoming>) -> Self::Future {
        let dispatcher = self.dispatcher.clone();
        Box::pin(async move { Ok(Self::route(&dispatcher, req).await) })
    }
}
