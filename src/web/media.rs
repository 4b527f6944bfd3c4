use std::path::{Component, Path, PathBuf};

use axum::extract::State;
use axum::http::{header, Uri};
use axum::response::{IntoResponse, Response};
use percent_encoding::percent_decode_str;

use crate::error::ApiError;
use crate::AppState;

/// Maps a request path below `/media/` onto the media root. Anything that
/// could step outside the root yields `None`.
pub fn resolve_media_path(root: &Path, raw: &str) -> Option<PathBuf> {
    let decoded = percent_decode_str(raw).decode_utf8().ok()?;
    let relative = Path::new(decoded.trim_start_matches('/'));

    if relative.as_os_str().is_empty()
        || !relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
    {
        return None;
    }
    Some(root.join(relative))
}

pub async fn serve_media(State(state): State<AppState>, uri: Uri) -> Result<Response, ApiError> {
    let raw = uri.path().strip_prefix("/media/").unwrap_or_default();
    let path = resolve_media_path(&state.media_root, raw)
        .ok_or_else(|| ApiError::not_found("media file", raw))?;

    match tokio::fs::metadata(&path).await {
        Ok(meta) if meta.is_file() => {}
        _ => return Err(ApiError::not_found("media file", raw)),
    }

    let contents = tokio::fs::read(&path).await?;
    let mime = mime_guess::from_path(&path).first_or_octet_stream();
    tracing::debug!(path = %path.display(), mime = %mime, "serving media");

    Ok(([(header::CONTENT_TYPE, mime.to_string())], contents).into_response())
}
