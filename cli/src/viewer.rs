//! A single-page web map for a GeoJSON document.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::State;
use axum::response::Html;
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

const TEMPLATE: &str = include_str!("../templates/geojsonview.html");
const PLACEHOLDER: &str = "{{ geojson }}";

/// Data handed to every request.
#[derive(Clone)]
pub struct ViewerState {
    geojson: Arc<str>,
}

impl ViewerState {
    /// Wrap a GeoJSON document. The text is embedded as-is; it is only
    /// checked so that an obviously broken file shows up in the logs.
    pub fn new(geojson: impl Into<Arc<str>>) -> Self {
        let geojson = geojson.into();
        if let Err(e) = serde_json::from_str::<serde_json::Value>(&geojson) {
            tracing::warn!("input does not look like JSON, the map may stay empty: {e}");
        }
        Self { geojson }
    }
}

/// Render the map page with `geojson` embedded as a script literal.
pub fn render_page(geojson: &str) -> String {
    // "</" would let the data close the surrounding <script> element.
    TEMPLATE.replace(PLACEHOLDER, &geojson.replace("</", "<\\/"))
}

pub fn router(state: ViewerState) -> Router {
    Router::new()
        .route("/", get(index))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Serve the viewer on `addr` until the process is stopped.
pub async fn serve(addr: &str, state: ViewerState) -> Result<()> {
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("unable to listen on {addr}"))?;
    serve_on(listener, state).await
}

pub async fn serve_on(listener: TcpListener, state: ViewerState) -> Result<()> {
    tracing::info!(addr = ?listener.local_addr().ok(), "serving map");
    axum::serve(listener, router(state))
        .await
        .context("server error")
}

async fn index(State(state): State<ViewerState>) -> Html<String> {
    Html(render_page(&state.geojson))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;

    const FC: &str = r#"{"type":"FeatureCollection","features":[]}"#;

    async fn http_get(addr: std::net::SocketAddr, path: &str) -> String {
        let mut stream = TcpStream::connect(addr).await.unwrap();
        let request = format!("GET {path} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n");
        stream.write_all(request.as_bytes()).await.unwrap();
        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();
        response
    }

    #[test]
    fn embeds_geojson_verbatim() {
        let page = render_page(FC);
        assert!(page.contains(&format!("const data = {FC};")));
        assert!(!page.contains(PLACEHOLDER));
    }

    #[test]
    fn escapes_closing_tags() {
        let page = render_page(r#"{"name":"</script><script>alert(1)"}"#);
        assert!(!page.contains("</script><script>alert(1)"));
        assert!(page.contains(r#"<\/script><script>alert(1)"#));
    }

    #[tokio::test]
    async fn index_handler_renders_state() {
        let Html(body) = index(State(ViewerState::new(FC))).await;
        assert!(body.contains(FC));
    }

    #[tokio::test]
    async fn serves_index_and_404() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(serve_on(listener, ViewerState::new(FC)));

        let ok = http_get(addr, "/").await;
        assert!(ok.starts_with("HTTP/1.1 200"));
        assert!(ok.contains("text/html"));
        assert!(ok.contains(FC));

        let missing = http_get(addr, "/other").await;
        assert!(missing.starts_with("HTTP/1.1 404"));
    }
}
