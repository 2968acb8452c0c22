use axum::{
    body::Body,
    extract::{Request, State},
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
};
use leptos::prelude::*;
use state::server::AppState;
use tower::ServiceExt;
use tower_http::services::ServeDir;

use crate::app::shell;

/// Serves files from the site root, rendering the app for anything else
pub async fn file_and_error_handler(
    uri: Uri,
    State(state): State<AppState>,
    req: Request<Body>,
) -> Response {
    let root = state.leptos_options.site_root.clone();
    match get_static_file(uri, &root).await {
        Ok(res) if res.status() == StatusCode::OK => res,
        Ok(_) => {
            let options = state.leptos_options.clone();
            let handler = leptos_axum::render_app_to_stream(move || shell(options.clone()));
            handler(req).await.into_response()
        }
        Err(e) => e.into_response(),
    }
}

async fn get_static_file(uri: Uri, root: &str) -> Result<Response, (StatusCode, String)> {
    let req = axum::http::Request::builder()
        .uri(uri)
        .body(Body::empty())
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
    match ServeDir::new(root).oneshot(req).await {
        Ok(res) => Ok(res.into_response()),
        Err(err) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Something went wrong: {err}"),
        )),
    }
}
