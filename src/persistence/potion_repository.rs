use std::collections::HashMap;

use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::SqliteConnection;

use crate::model::{
    Effect, Ingredient, NewPotion, Potion, PotionEffect, PotionIngredient, PotionRecord,
};

use super::{effect_repository, ingredient_repository, StoreError};

pub fn create(
    conn: &mut SqliteConnection,
    potion_name: &str,
    ingredient_ids: &[i32],
    effect_ids: &[i32],
) -> Result<PotionRecord, StoreError> {
    use crate::schema::{potion_effects, potion_ingredients, potions};

    conn.transaction(|conn| {
        let ingredients = ingredient_repository::find_many(conn, ingredient_ids)?;
        let effects = effect_repository::find_many(conn, effect_ids)?;

        let new_potion = NewPotion {
            name: potion_name,
            created_at: chrono::Utc::now().naive_utc(),
        };

        match diesel::insert_into(potions::table)
            .values(&new_potion)
            .execute(conn)
        {
            Ok(_) => {}
            Err(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {
                return Err(StoreError::DuplicateName(potion_name.to_string()));
            }
            Err(e) => return Err(e.into()),
        }

        let potion = potions::table
            .filter(potions::name.eq(potion_name))
            .select(Potion::as_select())
            .first(conn)?;

        let ingredient_rows: Vec<PotionIngredient> = ingredients
            .iter()
            .map(|i| PotionIngredient {
                potion_id: potion.id,
                ingredient_id: i.id,
            })
            .collect();
        if !ingredient_rows.is_empty() {
            diesel::insert_into(potion_ingredients::table)
                .values(&ingredient_rows)
                .execute(conn)?;
        }

        let effect_rows: Vec<PotionEffect> = effects
            .iter()
            .map(|e| PotionEffect {
                potion_id: potion.id,
                effect_id: e.id,
            })
            .collect();
        if !effect_rows.is_empty() {
            diesel::insert_into(potion_effects::table)
                .values(&effect_rows)
                .execute(conn)?;
        }

        tracing::info!(
            potion_id = potion.id,
            name = %potion.name,
            ingredients = ingredients.len(),
            effects = effects.len(),
            "saved potion"
        );

        Ok(PotionRecord {
            potion,
            ingredients,
            effects,
        })
    })
}

/// Saved potions, newest first.
pub fn all(conn: &mut SqliteConnection) -> QueryResult<Vec<PotionRecord>> {
    use crate::schema::{effects, ingredients, potion_effects, potion_ingredients, potions};

    let saved = potions::table
        .order((potions::created_at.desc(), potions::id.desc()))
        .select(Potion::as_select())
        .load(conn)?;

    let mut ingredients_by_potion: HashMap<i32, Vec<Ingredient>> = HashMap::new();
    for (potion_id, ingredient) in PotionIngredient::belonging_to(&saved)
        .inner_join(ingredients::table)
        .order(ingredients::name.asc())
        .select((potion_ingredients::potion_id, Ingredient::as_select()))
        .load::<(i32, Ingredient)>(conn)?
    {
        ingredients_by_potion
            .entry(potion_id)
            .or_default()
            .push(ingredient);
    }

    let mut effects_by_potion: HashMap<i32, Vec<Effect>> = HashMap::new();
    for (potion_id, effect) in PotionEffect::belonging_to(&saved)
        .inner_join(effects::table)
        .order(effects::name.asc())
        .select((potion_effects::potion_id, Effect::as_select()))
        .load::<(i32, Effect)>(conn)?
    {
        effects_by_potion.entry(potion_id).or_default().push(effect);
    }

    Ok(saved
        .into_iter()
        .map(|potion| PotionRecord {
            ingredients: ingredients_by_potion.remove(&potion.id).unwrap_or_default(),
            effects: effects_by_potion.remove(&potion.id).unwrap_or_default(),
            potion,
        })
        .collect())
}
