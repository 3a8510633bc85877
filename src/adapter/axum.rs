//! Mounting the webhook handler inside an axum application.

use std::sync::Arc;

use axum::Router;
use axum::body::Bytes;
use axum::http::{HeaderMap, Method, Uri, header};
use axum::response::{IntoResponse, Response};
use axum::routing::any;

use crate::api::HttpClient;
use crate::bot::Bot;
use crate::webhook::{WebhookRequest, WebhookResponse};

impl IntoResponse for WebhookResponse {
    fn into_response(self) -> Response {
        let status = self.status();
        match self.content_type() {
            Some(content_type) => {
                (status, [(header::CONTENT_TYPE, content_type)], self.into_body()).into_response()
            }
            None => (status, self.into_body()).into_response(),
        }
    }
}

/// Mounts `bot`'s webhook handler at `path`.
///
/// The handler performs its own method routing (GET handshake, POST
/// delivery, 400 otherwise), so the route accepts every method. Merge the
/// returned router into the application's own:
///
/// ```no_run
/// use std::sync::Arc;
///
/// use chat_bot::{Bot, BotOptions};
///
/// # fn build() -> Result<axum::Router, chat_bot::ConfigError> {
/// let bot = Arc::new(Bot::new(BotOptions::builder().build()?));
/// let app: axum::Router = chat_bot::adapter::axum::router(bot, "/hooks/chat");
/// # Ok(app)
/// # }
/// ```
pub fn router<H>(bot: Arc<Bot<H>>, path: &str) -> Router
where
    H: HttpClient + Clone + Send + Sync + 'static,
{
    Router::new().route(
        path,
        any(
            move |method: Method, uri: Uri, headers: HeaderMap, body: Bytes| async move {
                let request = WebhookRequest::new(method, uri)
                    .with_headers(headers)
                    .with_body(body.to_vec());
                bot.webhook().handle(request).await
            },
        ),
    )
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use crate::api::{ApiError, ApiRequest, ApiResponse};
    use crate::options::BotOptions;

    use super::*;

    #[derive(Debug, Clone)]
    struct NoopClient;

    impl HttpClient for NoopClient {
        async fn request(&self, _request: ApiRequest) -> Result<ApiResponse, ApiError> {
            Ok(ApiResponse::new(
                StatusCode::OK,
                HeaderMap::new(),
                Vec::new(),
            ))
        }
    }

    fn bot() -> Arc<Bot<NoopClient>> {
        let options = BotOptions::builder()
            .api_key("key")
            .build_with(|_| None)
            .unwrap();
        Arc::new(Bot::with_client(options, NoopClient))
    }

    #[tokio::test]
    async fn challenge_requests_flow_through() {
        let app = router(bot(), "/hooks/chat");

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/hooks/chat?challenge=hi")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
        assert_eq!(&body[..], b"hi");
    }

    #[tokio::test]
    async fn deliveries_are_accepted() {
        let app = router(bot(), "/hooks/chat");

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/hooks/chat")
                    .body(Body::from("[]"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::ACCEPTED);
    }

    #[tokio::test]
    async fn other_paths_are_left_alone() {
        let app = router(bot(), "/hooks/chat");

        let response = app
            .oneshot(Request::builder().uri("/other").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
