//! Component source lookup
//!
//! `GET /api/source?name=<ComponentName>` returns the file defining the
//! component and its full text.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use srcloc_core::LocateResult;
use tracing::instrument;

use crate::error::ApiError;
use crate::extractors::ValidSymbolName;
use crate::state::AppState;

/// Successful lookup
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceResponse {
    /// Relative to the server's working directory
    pub file_path: String,
    /// File contents exactly as read
    pub source: String,
}

/// GET /api/source
#[instrument(skip_all, fields(component = %name))]
async fn get_source(
    State(state): State<AppState>,
    ValidSymbolName(name): ValidSymbolName,
) -> Result<Json<SourceResponse>, ApiError> {
    match state.locator().locate(&name).await? {
        LocateResult::Found { path, source } => Ok(Json(SourceResponse {
            file_path: path.to_string_lossy().into_owned(),
            source,
        })),
        LocateResult::NotFound => Err(ApiError::NotFound {
            name: name.into_string(),
        }),
        LocateResult::Aborted { limit } => Err(ApiError::Aborted { limit }),
    }
}

/// Source lookup routes
pub fn router() -> Router<AppState> {
    Router::new().route("/api/source", get(get_source))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use srcloc_core::{Locator, LocatorConfig, MemoryTree, SourceTree, TreeEntry};
    use tower::ServiceExt;

    /// Counts every filesystem call made through it
    struct SpyTree {
        inner: MemoryTree,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl SourceTree for SpyTree {
        async fn list(&self, dir: &Path) -> io::Result<Vec<TreeEntry>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.list(dir).await
        }

        async fn read(&self, file: &Path) -> io::Result<Vec<u8>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.read(file).await
        }
    }

    fn fixture() -> MemoryTree {
        MemoryTree::new()
            .file(
                "/app/src/widgets/Button.tsx",
                "export function Button() {\n  return <button />;\n}\n",
            )
            .file(
                "/app/src/app/settings/page.tsx",
                "import { Button } from '@/widgets/Button';\nexport default function SettingsPage() { return <Button />; }\n",
            )
            .file(
                "/app/src/node_modules/kit/Dialog.js",
                "function Dialog() {}",
            )
    }

    fn app_with(tree: impl SourceTree + 'static) -> Router {
        let locator = Locator::new(Arc::new(tree), LocatorConfig::with_root("/app/src"), "/app");
        router().with_state(AppState::new(locator))
    }

    fn spy_app() -> (Router, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let tree = SpyTree {
            inner: fixture(),
            calls: Arc::clone(&calls),
        };
        (app_with(tree), calls)
    }

    async fn fetch(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn found_returns_path_and_source() {
        let (status, body) = fetch(app_with(fixture()), "/api/source?name=Button").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "filePath": "src/widgets/Button.tsx",
                "source": "export function Button() {\n  return <button />;\n}\n",
            })
        );
    }

    #[tokio::test]
    async fn unknown_component_is_404() {
        let (status, body) = fetch(app_with(fixture()), "/api/source?name=Nonexistent").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "error": "Component not found" }));
    }

    #[tokio::test]
    async fn excluded_only_definition_is_404() {
        let (status, _) = fetch(app_with(fixture()), "/api/source?name=Dialog").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn invalid_names_are_400_without_filesystem_access() {
        for uri in [
            "/api/source",
            "/api/source?name=",
            "/api/source?name=button",
            "/api/source?name=..%2FButton",
            "/api/source?name=Button%2FIcon",
            "/api/source?name=Button.tsx",
            "/api/source?name=Big%20Button",
            "/api/source?name=Button.*",
            "/api/source?name=Button%7CInput",
            "/api/source?name=%5BA-Z%5D",
            "/api/source?other=Button",
        ] {
            let (app, calls) = spy_app();
            let (status, body) = fetch(app, uri).await;

            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert_eq!(body, json!({ "error": "Invalid component name" }), "{uri}");
            assert_eq!(calls.load(Ordering::SeqCst), 0, "{uri} touched the filesystem");
        }
    }

    #[tokio::test]
    async fn valid_name_does_touch_filesystem() {
        let (app, calls) = spy_app();
        let (status, _) = fetch(app, "/api/source?name=Button").await;

        assert_eq!(status, StatusCode::OK);
        assert!(calls.load(Ordering::SeqCst) > 0);
    }

    #[tokio::test]
    async fn io_failure_is_opaque_500() {
        let tree = MemoryTree::new()
            .unreadable("/app/src/private", true)
            .file("/app/src/z/Button.tsx", "function Button() {}");
        let (status, body) = fetch(app_with(tree), "/api/source?name=Button").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "Failed to read source" }));
    }

    #[tokio::test]
    async fn budget_exhaustion_is_503() {
        let tree = MemoryTree::new()
            .file("/app/src/a.ts", "")
            .file("/app/src/b.ts", "function Late() {}");
        let mut config = LocatorConfig::with_root("/app/src");
        config.budget.max_files = Some(1);
        let locator = Locator::new(Arc::new(tree), config, "/app");
        let app = router().with_state(AppState::new(locator));

        let (status, body) = fetch(app, "/api/source?name=Late").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body, json!({ "error": "Search aborted" }));
    }

    #[tokio::test]
    async fn repeated_requests_are_identical() {
        let app = app_with(fixture());
        let first = fetch(app.clone(), "/api/source?name=Button").await;
        let second = fetch(app, "/api/source?name=Button").await;
        assert_eq!(first, second);
    }
}
