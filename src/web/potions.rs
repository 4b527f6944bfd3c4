use axum::extract::{Query, State};
use axum::response::{Html, Redirect};
use axum::Form;
use serde::Deserialize;

use crate::brewing::{self, Review};
use crate::error::ApiError;
use crate::{views, AppState};

use super::ids_from_fields;

#[derive(Debug, Deserialize)]
pub struct AddEffectParams {
    pub effect_id: i32,
}

#[derive(Debug, Deserialize)]
pub struct AddIngredientParams {
    pub ingredient_id: i32,
}

#[derive(Debug, Deserialize)]
pub struct SavePotionForm {
    pub name: Option<String>,
    /// Comma-joined ingredient ids.
    pub ingredients: Option<String>,
    /// Comma-joined effect ids.
    pub effects: Option<String>,
}

pub async fn potion_list(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let potions = state.with_catalog(|catalog| Ok(catalog.potions()?)).await?;
    Ok(views::potions::potion_list(&potions))
}

pub async fn select_effects(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let effects = state
        .with_catalog(|catalog| Ok(brewing::selectable_effects(catalog)?))
        .await?;
    Ok(views::potions::select_effects(&effects))
}

pub async fn add_effect(
    State(state): State<AppState>,
    Query(params): Query<AddEffectParams>,
) -> Result<Html<String>, ApiError> {
    let effect_id = params.effect_id;
    let effect = state
        .with_catalog(move |catalog| {
            catalog
                .effect(effect_id)?
                .ok_or_else(|| ApiError::not_found("effect", effect_id))
        })
        .await?;
    Ok(views::potions::effect_chip(&effect))
}

/// Accepts the chosen effects either as a form post or as query parameters.
pub async fn select_ingredients(
    State(state): State<AppState>,
    Form(fields): Form<Vec<(String, String)>>,
) -> Result<Html<String>, ApiError> {
    let effect_ids = ids_from_fields(&fields, "effects")?;
    tracing::debug!(effects = ?effect_ids, "selecting ingredients");

    let requested = effect_ids.clone();
    let groups = state
        .with_catalog(move |catalog| Ok(brewing::select_ingredients(catalog, &requested)?))
        .await?;
    Ok(views::potions::select_ingredients(&groups, &effect_ids, None))
}

pub async fn add_ingredient(
    State(state): State<AppState>,
    Query(params): Query<AddIngredientParams>,
) -> Result<Html<String>, ApiError> {
    let ingredient_id = params.ingredient_id;
    let (ingredient, effects) = state
        .with_catalog(move |catalog| {
            let ingredient = catalog
                .ingredient(ingredient_id)?
                .ok_or_else(|| ApiError::not_found("ingredient", ingredient_id))?;
            Ok((ingredient, catalog.effects_for_ingredient(ingredient_id)?))
        })
        .await?;
    Ok(views::potions::ingredient_chip(&ingredient, &effects))
}

/// Shows the common effects of the chosen ingredients, or sends the user back
/// to the ingredient step when the count is out of range.
pub async fn review_potion(
    State(state): State<AppState>,
    Form(fields): Form<Vec<(String, String)>>,
) -> Result<Html<String>, ApiError> {
    let ingredient_ids = ids_from_fields(&fields, "ingredients")?;
    let effect_ids = ids_from_fields(&fields, "effects")?;

    state
        .with_catalog(move |catalog| match brewing::review(catalog, &ingredient_ids)? {
            Review::Ready(draft) => Ok(views::potions::review(&draft)),
            Review::InvalidSelection { message } => {
                let groups = brewing::select_ingredients(catalog, &effect_ids)?;
                Ok(views::potions::select_ingredients(
                    &groups,
                    &effect_ids,
                    Some(message),
                ))
            }
        })
        .await
}

pub async fn save_potion(
    State(state): State<AppState>,
    Form(form): Form<SavePotionForm>,
) -> Result<Redirect, ApiError> {
    let (Some(name), Some(ingredients), Some(effects)) = (form.name, form.ingredients, form.effects)
    else {
        return Err(ApiError::BadRequest(
            "name, ingredients and effects are required".to_string(),
        ));
    };

    let record = state
        .with_catalog(move |catalog| Ok(brewing::save(catalog, &name, &ingredients, &effects)?))
        .await?;

    tracing::info!(
        potion_id = record.potion.id,
        name = %record.potion.name,
        "saved potion"
    );
    Ok(Redirect::to("/potions/"))
}
