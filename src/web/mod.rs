//! HTTP surface: routes and the handlers behind them.

use axum::http::{HeaderMap, Uri};
use axum::response::Html;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;

use crate::error::ApiError;
use crate::{views, AppState};

pub mod effects;
pub mod ingredients;
pub mod media;
pub mod potions;
pub mod vendors;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/health", get(|| async { Json(json!({ "status": "ok" })) }))
        .route("/effects/", get(effects::effect_list))
        .route("/effects/search/", get(effects::search_effects))
        .route("/effects/{id}/", get(effects::ingredients_for_effect))
        .route("/effect/{id}/", get(effects::ingredients_for_effect))
        .route("/effects/{id}/modal/", get(effects::ingredients_modal))
        .route("/ingredients/", get(ingredients::all_ingredients))
        .route("/ingredient/{id}/", get(ingredients::ingredient_detail))
        .route(
            "/ingredient/{id}/toggle_favorite_htmx/",
            post(ingredients::toggle_favorite),
        )
        .route("/favorites/", get(ingredients::favorite_ingredients))
        .route("/vendor/{id}/", get(vendors::vendor_detail))
        .route("/potions/", get(potions::potion_list))
        .route("/potions/start/", get(potions::select_effects))
        .route("/potions/select_effect/", get(potions::select_effects))
        .route("/potions/add_effect/", get(potions::add_effect))
        .route(
            "/potions/select_ingredients/",
            get(potions::select_ingredients).post(potions::select_ingredients),
        )
        .route("/potions/add_ingredient/", get(potions::add_ingredient))
        .route(
            "/potions/review/",
            get(potions::review_potion).post(potions::review_potion),
        )
        .route("/potions/save/", post(potions::save_potion))
        .route("/media/{*path}", get(media::serve_media))
        .fallback(not_found)
        .with_state(state)
}

async fn home() -> Html<String> {
    views::home()
}

async fn not_found(uri: Uri) -> ApiError {
    ApiError::not_found("page", uri.path())
}

/// htmx marks its own requests; those get fragments instead of full pages.
pub(crate) fn is_htmx(headers: &HeaderMap) -> bool {
    headers
        .get("HX-Request")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.eq_ignore_ascii_case("true"))
}

/// Every value submitted under `key`, parsed as an id.
pub(crate) fn ids_from_fields(fields: &[(String, String)], key: &str) -> Result<Vec<i32>, ApiError> {
    fields
        .iter()
        .filter(|(k, _)| k == key)
        .map(|(_, v)| {
            v.trim()
                .parse::<i32>()
                .map_err(|_| ApiError::BadRequest(format!("'{v}' is not a valid {key} id")))
        })
        .collect()
}
