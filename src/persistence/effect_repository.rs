use std::collections::HashMap;

use diesel::prelude::*;
use diesel::SqliteConnection;

use crate::model::{Effect, EffectWithIngredients, Ingredient};

use super::fold_case;

pub fn all(conn: &mut SqliteConnection) -> QueryResult<Vec<Effect>> {
    use crate::schema::effects::dsl::*;

    effects
        .order(name.asc())
        .select(Effect::as_select())
        .load(conn)
}

pub fn find(conn: &mut SqliteConnection, effect_id: i32) -> QueryResult<Option<Effect>> {
    use crate::schema::effects::dsl::*;

    effects
        .find(effect_id)
        .select(Effect::as_select())
        .first(conn)
        .optional()
}

pub fn find_many(conn: &mut SqliteConnection, ids: &[i32]) -> QueryResult<Vec<Effect>> {
    use crate::schema::effects::dsl::*;

    effects
        .filter(id.eq_any(ids))
        .order(name.asc())
        .select(Effect::as_select())
        .load(conn)
}

pub fn ingredients_for(
    conn: &mut SqliteConnection,
    effect_id: i32,
) -> QueryResult<Vec<Ingredient>> {
    use crate::schema::{ingredient_effects, ingredients};

    ingredients::table
        .inner_join(ingredient_effects::table)
        .filter(ingredient_effects::effect_id.eq(effect_id))
        .select(Ingredient::as_select())
        .distinct()
        .order((
            ingredients::weight.asc(),
            ingredients::value.asc(),
            ingredients::name.asc(),
        ))
        .load(conn)
}

pub fn for_ingredient(conn: &mut SqliteConnection, ingredient_id: i32) -> QueryResult<Vec<Effect>> {
    use crate::schema::{effects, ingredient_effects};

    effects::table
        .inner_join(ingredient_effects::table)
        .filter(ingredient_effects::ingredient_id.eq(ingredient_id))
        .select(Effect::as_select())
        .distinct()
        .order(effects::name.asc())
        .load(conn)
}

/// Every effect with its ingredients. Loaded in two queries and stitched
/// together here rather than one query per effect.
pub fn with_ingredients(conn: &mut SqliteConnection) -> QueryResult<Vec<EffectWithIngredients>> {
    use crate::schema::{ingredient_effects, ingredients};

    let effects = all(conn)?;
    let links = ingredient_effects::table
        .inner_join(ingredients::table)
        .select((ingredient_effects::effect_id, Ingredient::as_select()))
        .order((
            ingredients::weight.asc(),
            ingredients::value.asc(),
            ingredients::name.asc(),
        ))
        .load::<(i32, Ingredient)>(conn)?;

    let mut by_effect: HashMap<i32, Vec<Ingredient>> = HashMap::new();
    for (effect_id, ingredient) in links {
        let group = by_effect.entry(effect_id).or_default();
        if !group.iter().any(|i| i.id == ingredient.id) {
            group.push(ingredient);
        }
    }

    Ok(effects
        .into_iter()
        .map(|effect| EffectWithIngredients {
            ingredients: by_effect.remove(&effect.id).unwrap_or_default(),
            effect,
        })
        .collect())
}

pub fn search(conn: &mut SqliteConnection, query: &str) -> QueryResult<Vec<Effect>> {
    use crate::schema::{effects, ingredient_effects, ingredients};

    let pattern = format!("%{}%", escape_like(&query.trim().to_lowercase()));

    let by_ingredient = ingredient_effects::table
        .inner_join(ingredients::table)
        .filter(fold_case(ingredients::name).like(pattern.clone()).escape('\\'))
        .select(ingredient_effects::effect_id);

    effects::table
        .filter(
            fold_case(effects::name)
                .like(pattern)
                .escape('\\')
                .or(effects::id.eq_any(by_ingredient)),
        )
        .order(effects::name.asc())
        .select(Effect::as_select())
        .load(conn)
}

// Both sides are folded before matching; only the wildcards need escaping.
fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
