use http_body_util::combinators::BoxBody;
use http_body_util::{BodyExt, Full};
use hyper::body::{Bytes, Incoming};
use hyper::header::{CONTENT_TYPE, HeaderValue};
use hyper::service::Service;
use hyper::{Request, Response, StatusCode};
use hyper_util::rt::TokioExecutor;
use hyper_util::rt::TokioIo;
use hyper_util::server::conn::auto::Builder;
use serde::Serialize;
use std::sync::Arc;
use tokio::net::TcpListener;

pub async fn run_http_service<S, E>(host: &str, port: u16, service: S) -> Result<(), E>
where
    S: Service<Request<Incoming>, Response = Response<BoxBody<Bytes, E>>, Error = E>
        + Send
        + Sync
        + 'static,
    S::Future: Send + 'static,
    E: From<std::io::Error> + std::error::Error + Send + Sync + 'static,
{
    let listener = TcpListener::bind(format!("{host}:{port}")).await?;
    tracing::info!(addr = %listener.local_addr()?, "Listening");
    let service_arc = Arc::new(service);

    loop {
        let (stream, peer_addr) = listener.accept().await?;
        let _ = stream.set_nodelay(true);
        let io = TokioIo::new(stream);
        let svc = service_arc.clone();

        // Hand the connection to hyper; auto-detect h1/h2 on this socket
        tokio::spawn(async move {
            if let Err(e) = Builder::new(TokioExecutor::new())
                .serve_connection(io, svc)
                .await
            {
                tracing::debug!(peer = %peer_addr, "Connection closed with error: {e}");
            }
        });
    }
}

pub fn full_body<E: 'static>(bytes: impl Into<Bytes>) -> BoxBody<Bytes, E> {
    Full::new(bytes.into()).map_err(|e| match e {}).boxed()
}

/// Plain text response carrying the canonical reason phrase of `status`.
pub fn make_boxed_error_response<E: 'static>(status: StatusCode) -> Response<BoxBody<Bytes, E>> {
    let reason = status.canonical_reason().unwrap_or("Error");
    let mut response = Response::new(full_body(format!("{reason}\n")));
    *response.status_mut() = status;
    response
}

/// Serializes `value` as the JSON body of a response with the given status.
/// Falls back to a 500 if serialization fails.
pub fn json_response<T, E>(status: StatusCode, value: &T) -> Response<BoxBody<Bytes, E>>
where
    T: Serialize,
    E: 'static,
{
    match serde_json::to_vec(value) {
        Ok(bytes) => {
            let mut response = Response::new(full_body(bytes));
            *response.status_mut() = status;
            response
                .headers_mut()
                .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
            response
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize response body");
            make_boxed_error_response(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;

    async fn body_string(response: Response<BoxBody<Bytes, Infallible>>) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_error_response() {
        let response = make_boxed_error_response::<Infallible>(StatusCode::NOT_FOUND);
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_string(response).await, "Not Found\n");
    }

    #[tokio::test]
    async fn test_json_response() {
        #[derive(Serialize)]
        struct Body {
            success: bool,
        }

        let response = json_response::<_, Infallible>(StatusCode::OK, &Body { success: true });
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(CONTENT_TYPE).unwrap(),
            "application/json"
        );
        assert_eq!(body_string(response).await, r#"{"success":true}"#);
    }
}
