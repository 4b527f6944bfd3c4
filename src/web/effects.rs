use std::collections::HashSet;

use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::response::Html;
use serde::Deserialize;

use crate::error::ApiError;
use crate::{views, AppState};

use super::is_htmx;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub search: String,
}

pub async fn effect_list(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Html<String>, ApiError> {
    let entries = state.with_catalog(|catalog| Ok(catalog.effect_list()?)).await?;

    if is_htmx(&headers) {
        return Ok(Html(views::effects::effect_rows(&entries)));
    }
    Ok(views::effects::effect_list(&entries, ""))
}

/// Filters the effect table by effect or ingredient name.
pub async fn search_effects(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<SearchParams>,
) -> Result<Html<String>, ApiError> {
    let query = params.search.clone();
    let entries = state
        .with_catalog(move |catalog| {
            let matches: HashSet<i32> = catalog
                .search_effects(&query)?
                .into_iter()
                .map(|e| e.id)
                .collect();
            Ok(catalog
                .effect_list()?
                .into_iter()
                .filter(|entry| matches.contains(&entry.effect.id))
                .collect::<Vec<_>>())
        })
        .await?;

    tracing::debug!(search = %params.search, hits = entries.len(), "effect search");

    if is_htmx(&headers) {
        return Ok(Html(views::effects::effect_rows(&entries)));
    }
    Ok(views::effects::effect_list(&entries, &params.search))
}

pub async fn ingredients_for_effect(
    State(state): State<AppState>,
    Path(effect_id): Path<i32>,
    headers: HeaderMap,
) -> Result<Html<String>, ApiError> {
    let (effect, ingredients) = state
        .with_catalog(move |catalog| {
            let effect = catalog
                .effect(effect_id)?
                .ok_or_else(|| ApiError::not_found("effect", effect_id))?;
            let ingredients = catalog.ingredients_for_effect(effect_id)?;
            Ok((effect, ingredients))
        })
        .await?;

    if is_htmx(&headers) {
        return Ok(Html(views::effects::ingredients_for_effect_fragment(
            &effect,
            &ingredients,
        )));
    }
    Ok(views::effects::ingredients_for_effect(&effect, &ingredients))
}

pub async fn ingredients_modal(
    State(state): State<AppState>,
    Path(effect_id): Path<i32>,
) -> Result<Html<String>, ApiError> {
    let (effect, ingredients) = state
        .with_catalog(move |catalog| {
            let effect = catalog
                .effect(effect_id)?
                .ok_or_else(|| ApiError::not_found("effect", effect_id))?;
            Ok((effect, catalog.ingredients_for_effect(effect_id)?))
        })
        .await?;

    Ok(views::effects::ingredients_modal(&effect, &ingredients))
}
