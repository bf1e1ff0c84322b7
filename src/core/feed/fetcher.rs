use std::time::Duration;

const USER_AGENT: &str = concat!("yle-headlines/", env!("CARGO_PKG_VERSION"));
const CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct FetchedFeed {
    pub body: Vec<u8>,
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("unexpected status code: {0}")]
    HttpStatus(u16),
}

/// Client used for the single feed request of a run.
///
/// The total timeout bounds the run: a feed endpoint that never answers
/// ends in `FetchError::Request` instead of blocking forever.
pub fn build_client(timeout: Duration) -> Result<reqwest::Client, FetchError> {
    let client = reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS).min(timeout))
        .timeout(timeout)
        .build()?;
    Ok(client)
}

pub async fn fetch_feed(client: &reqwest::Client, url: &str) -> Result<FetchedFeed, FetchError> {
    tracing::debug!(url, "requesting feed");
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::HttpStatus(status.as_u16()));
    }

    let body = response.bytes().await?.to_vec();
    tracing::debug!(bytes = body.len(), "feed downloaded");

    Ok(FetchedFeed { body })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::CONTENT_TYPE;
    use axum::http::StatusCode;
    use axum::response::{IntoResponse, Response};
    use axum::routing::get;
    use axum::Router;

    async fn feed_handler() -> Response {
        (
            [(CONTENT_TYPE, "application/rss+xml")],
            include_str!("../../../fixtures/yle-recent.rss.xml"),
        )
            .into_response()
    }

    async fn broken_handler() -> Response {
        (StatusCode::SERVICE_UNAVAILABLE, "maintenance").into_response()
    }

    async fn spawn_test_server() -> (String, tokio::task::JoinHandle<()>) {
        let app = Router::new()
            .route("/feed.rss", get(feed_handler))
            .route("/broken.rss", get(broken_handler));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("listener should bind");
        let address = listener.local_addr().expect("local addr should exist");
        let join_handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("server should run");
        });
        (format!("http://{address}"), join_handle)
    }

    #[tokio::test]
    async fn fetch_feed_returns_body() {
        let (base_url, server_task) = spawn_test_server().await;
        let client = build_client(Duration::from_secs(5)).expect("client should build");

        let fetched = fetch_feed(&client, &format!("{base_url}/feed.rss"))
            .await
            .expect("fetch should succeed");
        assert_eq!(
            fetched.body,
            include_bytes!("../../../fixtures/yle-recent.rss.xml").to_vec()
        );

        server_task.abort();
    }

    #[tokio::test]
    async fn non_success_status_is_reported() {
        let (base_url, server_task) = spawn_test_server().await;
        let client = build_client(Duration::from_secs(5)).expect("client should build");

        let error = fetch_feed(&client, &format!("{base_url}/broken.rss"))
            .await
            .expect_err("503 must fail");
        assert!(matches!(error, FetchError::HttpStatus(503)));

        server_task.abort();
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_a_request_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("listener should bind");
        let address = listener.local_addr().expect("local addr should exist");
        drop(listener);
        let client = build_client(Duration::from_secs(5)).expect("client should build");

        let error = fetch_feed(&client, &format!("http://{address}/feed.rss"))
            .await
            .expect_err("closed port must fail");
        assert!(matches!(error, FetchError::Request(_)));
    }
}
