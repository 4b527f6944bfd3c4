use axum::extract::{Path, State};
use axum::response::Html;

use crate::error::ApiError;
use crate::{views, AppState};

pub async fn all_ingredients(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let ingredients = state
        .with_catalog(|catalog| Ok(catalog.all_ingredients()?))
        .await?;
    Ok(views::ingredients::all_ingredients(&ingredients))
}

pub async fn favorite_ingredients(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let ingredients = state
        .with_catalog(|catalog| Ok(catalog.favorite_ingredients()?))
        .await?;
    Ok(views::ingredients::favorites(&ingredients))
}

pub async fn ingredient_detail(
    State(state): State<AppState>,
    Path(ingredient_id): Path<i32>,
) -> Result<Html<String>, ApiError> {
    let detail = state
        .with_catalog(move |catalog| {
            catalog
                .ingredient_detail(ingredient_id)?
                .ok_or_else(|| ApiError::not_found("ingredient", ingredient_id))
        })
        .await?;
    Ok(views::ingredients::ingredient_detail(&detail))
}

/// Flips the favorite flag and returns the re-rendered row.
pub async fn toggle_favorite(
    State(state): State<AppState>,
    Path(ingredient_id): Path<i32>,
) -> Result<Html<String>, ApiError> {
    let ingredient = state
        .with_catalog(move |catalog| {
            catalog
                .toggle_favorite(ingredient_id)?
                .ok_or_else(|| ApiError::not_found("ingredient", ingredient_id))
        })
        .await?;

    tracing::info!(
        ingredient_id,
        favorite = ingredient.favorite,
        "toggled favorite"
    );
    Ok(Html(views::ingredients::ingredient_row(&ingredient)))
}
