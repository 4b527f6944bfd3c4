use diesel::prelude::*;
use diesel::SqliteConnection;

use crate::model::{Ingredient, IngredientDetail, IngredientEffect, Vendor, VendorInventory};

use super::effect_repository;

pub fn all(conn: &mut SqliteConnection) -> QueryResult<Vec<Ingredient>> {
    use crate::schema::ingredients::dsl::*;

    ingredients
        .order(name.asc())
        .select(Ingredient::as_select())
        .load(conn)
}

pub fn favorites(conn: &mut SqliteConnection) -> QueryResult<Vec<Ingredient>> {
    use crate::schema::ingredients::dsl::*;

    ingredients
        .filter(favorite.eq(true))
        .order(name.asc())
        .select(Ingredient::as_select())
        .load(conn)
}

pub fn find(conn: &mut SqliteConnection, ingredient_id: i32) -> QueryResult<Option<Ingredient>> {
    use crate::schema::ingredients::dsl::*;

    ingredients
        .find(ingredient_id)
        .select(Ingredient::as_select())
        .first(conn)
        .optional()
}

pub fn find_many(conn: &mut SqliteConnection, ids: &[i32]) -> QueryResult<Vec<Ingredient>> {
    use crate::schema::ingredients::dsl::*;

    ingredients
        .filter(id.eq_any(ids))
        .order(name.asc())
        .select(Ingredient::as_select())
        .load(conn)
}

pub fn toggle_favorite(
    conn: &mut SqliteConnection,
    ingredient_id: i32,
) -> QueryResult<Option<Ingredient>> {
    use crate::schema::ingredients::dsl::*;

    conn.transaction(|conn| {
        let Some(current) = find(conn, ingredient_id)? else {
            return Ok(None);
        };

        diesel::update(ingredients.find(ingredient_id))
            .set(favorite.eq(!current.favorite))
            .execute(conn)?;

        Ok(Some(Ingredient {
            favorite: !current.favorite,
            ..current
        }))
    })
}

pub fn effect_ids(conn: &mut SqliteConnection, ingredient_id: i32) -> QueryResult<Vec<i32>> {
    use crate::schema::ingredient_effects;

    let Some(ingredient) = find(conn, ingredient_id)? else {
        return Ok(Vec::new());
    };

    IngredientEffect::belonging_to(&ingredient)
        .select(ingredient_effects::effect_id)
        .distinct()
        .order(ingredient_effects::effect_id.asc())
        .load(conn)
}

pub fn detail(
    conn: &mut SqliteConnection,
    ingredient_id: i32,
) -> QueryResult<Option<IngredientDetail>> {
    use crate::schema::vendors;

    let Some(ingredient) = find(conn, ingredient_id)? else {
        return Ok(None);
    };

    let effects = effect_repository::for_ingredient(conn, ingredient_id)?;
    let stock = VendorInventory::belonging_to(&ingredient)
        .inner_join(vendors::table)
        .order(vendors::name.asc())
        .select((VendorInventory::as_select(), Vendor::as_select()))
        .load::<(VendorInventory, Vendor)>(conn)?;

    tracing::debug!(
        ingredient_id,
        effects = effects.len(),
        vendors = stock.len(),
        "loaded ingredient detail"
    );

    Ok(Some(IngredientDetail {
        ingredient,
        effects,
        stock,
    }))
}
