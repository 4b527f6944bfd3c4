//! Potion composition: effects → ingredients → common effects → saved potion.
//!
//! Every step is stateless. The browser carries the selection from one step to
//! the next in form fields, so each function here takes plain ids and reads
//! whatever it needs from the store.

use std::collections::BTreeSet;

use thiserror::Error;

use crate::model::{Effect, Ingredient, PotionRecord};
use crate::persistence::{EffectStore, IngredientStore, PotionStore, StoreError};

mod grouping;

pub use grouping::{group_ingredients, IngredientChoice, IngredientGroup};

pub const MIN_INGREDIENTS: usize = 2;
pub const MAX_INGREDIENTS: usize = 4;
pub const SELECTION_COUNT_MESSAGE: &str = "You must select between 2 and 4 ingredients.";

#[derive(Debug, Error)]
pub enum BrewError {
    #[error("ingredient {0} not found")]
    UnknownIngredient(i32),

    #[error("'{0}' is not a valid id")]
    InvalidId(String),

    #[error("a potion needs a name")]
    BlankName,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result of the review step. A wrong selection size is an expected outcome
/// shown inline, not an error.
#[derive(Debug, Clone)]
pub enum Review {
    Ready(PotionDraft),
    InvalidSelection { message: &'static str },
}

#[derive(Debug, Clone)]
pub struct PotionDraft {
    pub ingredients: Vec<Ingredient>,
    pub effects: Vec<Effect>,
}

impl PotionDraft {
    pub fn ingredient_ids(&self) -> String {
        join_ids(self.ingredients.iter().map(|i| i.id))
    }

    pub fn effect_ids(&self) -> String {
        join_ids(self.effects.iter().map(|e| e.id))
    }
}

fn join_ids(ids: impl Iterator<Item = i32>) -> String {
    ids.map(|id| id.to_string()).collect::<Vec<_>>().join(",")
}

/// Parses a comma-joined id list such as `"1, 2,3"`. Empty entries are skipped.
pub fn parse_id_list(raw: &str) -> Result<Vec<i32>, BrewError> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<i32>()
                .map_err(|_| BrewError::InvalidId(part.to_string()))
        })
        .collect()
}

/// Drops repeated ids, keeping first-seen order.
pub fn distinct_ids(ids: &[i32]) -> Vec<i32> {
    let mut seen = BTreeSet::new();
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}

/// Intersection of effect-id sets: the first set, narrowed by each following one.
pub fn common_effect_ids(effect_sets: &[Vec<i32>]) -> BTreeSet<i32> {
    let mut sets = effect_sets.iter();
    let Some(first) = sets.next() else {
        return BTreeSet::new();
    };

    let mut common: BTreeSet<i32> = first.iter().copied().collect();
    for set in sets {
        let other: BTreeSet<i32> = set.iter().copied().collect();
        common.retain(|id| other.contains(id));
    }
    common
}

/// Step 1: every effect, by name.
pub fn selectable_effects<S>(store: &S) -> Result<Vec<Effect>, BrewError>
where
    S: EffectStore + ?Sized,
{
    Ok(store.all_effects()?)
}

/// Step 2: one group per chosen effect, ingredients ordered by name. Unknown
/// effect ids are ignored.
pub fn select_ingredients<S>(store: &S, effect_ids: &[i32]) -> Result<Vec<IngredientGroup>, BrewError>
where
    S: EffectStore + ?Sized,
{
    let effects = store.effects_by_ids(&distinct_ids(effect_ids))?;

    let mut pairs = Vec::with_capacity(effects.len());
    for effect in effects {
        let mut ingredients = store.ingredients_for_effect(effect.id)?;
        ingredients.sort_by(|a, b| a.name.cmp(&b.name));
        pairs.push((effect, ingredients));
    }

    Ok(group_ingredients(pairs))
}

/// Step 3: the effects every chosen ingredient shares.
pub fn review<S>(store: &S, ingredient_ids: &[i32]) -> Result<Review, BrewError>
where
    S: IngredientStore + EffectStore + ?Sized,
{
    let ids = distinct_ids(ingredient_ids);
    if !(MIN_INGREDIENTS..=MAX_INGREDIENTS).contains(&ids.len()) {
        tracing::debug!(count = ids.len(), "rejecting ingredient selection");
        return Ok(Review::InvalidSelection {
            message: SELECTION_COUNT_MESSAGE,
        });
    }

    let mut ingredients = Vec::with_capacity(ids.len());
    let mut effect_sets = Vec::with_capacity(ids.len());
    for id in &ids {
        let ingredient = store
            .ingredient(*id)?
            .ok_or(BrewError::UnknownIngredient(*id))?;
        effect_sets.push(store.effect_ids_for_ingredient(*id)?);
        ingredients.push(ingredient);
    }

    let common: Vec<i32> = common_effect_ids(&effect_sets).into_iter().collect();
    let effects = if common.is_empty() {
        Vec::new()
    } else {
        store.effects_by_ids(&common)?
    };

    tracing::debug!(
        ingredients = ?ids,
        common = ?common,
        "reviewed potion"
    );

    Ok(Review::Ready(PotionDraft {
        ingredients,
        effects,
    }))
}

/// Step 4: persist the potion. Ids that no longer resolve are dropped by the
/// store; the effect list is taken as submitted.
pub fn save<S>(
    store: &S,
    name: &str,
    ingredient_ids: &str,
    effect_ids: &str,
) -> Result<PotionRecord, BrewError>
where
    S: PotionStore + ?Sized,
{
    let name = name.trim();
    if name.is_empty() {
        return Err(BrewError::BlankName);
    }

    let ingredient_ids = distinct_ids(&parse_id_list(ingredient_ids)?);
    let effect_ids = distinct_ids(&parse_id_list(effect_ids)?);

    Ok(store.create_potion(name, &ingredient_ids, &effect_ids)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::memory::MemoryCatalog;

    fn ids_of(effects: &[Effect]) -> Vec<i32> {
        effects.iter().map(|e| e.id).collect()
    }

    #[test]
    fn common_effects_is_set_intersection() {
        let common = common_effect_ids(&[vec![1, 2, 3], vec![2, 3, 4]]);
        assert_eq!(common.into_iter().collect::<Vec<_>>(), vec![2, 3]);

        let common = common_effect_ids(&[vec![1, 2, 3], vec![2, 3, 4], vec![3, 5]]);
        assert_eq!(common.into_iter().collect::<Vec<_>>(), vec![3]);

        assert!(common_effect_ids(&[vec![1], vec![2]]).is_empty());
        assert!(common_effect_ids(&[]).is_empty());
    }

    #[test]
    fn parse_id_list_accepts_spacing_and_rejects_garbage() {
        assert_eq!(parse_id_list("1,2").unwrap(), vec![1, 2]);
        assert_eq!(parse_id_list(" 3 , 4,,").unwrap(), vec![3, 4]);
        assert!(parse_id_list("").unwrap().is_empty());
        assert!(matches!(
            parse_id_list("1,two"),
            Err(BrewError::InvalidId(part)) if part == "two"
        ));
    }

    #[test]
    fn distinct_ids_keeps_first_occurrence() {
        assert_eq!(distinct_ids(&[3, 1, 3, 2, 1]), vec![3, 1, 2]);
    }

    #[test]
    fn review_intersects_effects_of_chosen_ingredients() {
        let store = MemoryCatalog::fixture();

        // Ash Salts {1,2,3} and Bonemeal {2,3,4}
        let Review::Ready(draft) = review(&store, &[1, 2]).unwrap() else {
            panic!("expected a ready draft");
        };
        let mut common = ids_of(&draft.effects);
        common.sort();
        assert_eq!(common, vec![2, 3]);
        assert_eq!(draft.ingredients.len(), 2);
        assert_eq!(draft.ingredient_ids(), "1,2");
    }

    #[test]
    fn review_with_no_shared_effect_is_still_ready() {
        let store = MemoryCatalog::fixture();

        // Ash Salts and Dreugh Wax share nothing
        let Review::Ready(draft) = review(&store, &[1, 4]).unwrap() else {
            panic!("expected a ready draft");
        };
        assert!(draft.effects.is_empty());
        assert_eq!(draft.effect_ids(), "");
    }

    #[test]
    fn review_rejects_too_few_or_too_many() {
        let store = MemoryCatalog::fixture();

        for ids in [vec![1], vec![1, 2, 3, 4, 5], vec![]] {
            let outcome = review(&store, &ids).unwrap();
            assert!(
                matches!(outcome, Review::InvalidSelection { message } if message == SELECTION_COUNT_MESSAGE),
                "{ids:?} should be rejected"
            );
        }
    }

    #[test]
    fn review_counts_distinct_ingredients() {
        let store = MemoryCatalog::fixture();
        let outcome = review(&store, &[1, 1]).unwrap();
        assert!(matches!(outcome, Review::InvalidSelection { .. }));
    }

    #[test]
    fn review_unknown_ingredient_is_an_error() {
        let store = MemoryCatalog::fixture();
        assert!(matches!(
            review(&store, &[1, 99]),
            Err(BrewError::UnknownIngredient(99))
        ));
    }

    #[test]
    fn select_ingredients_groups_by_effect_and_flags_repeats() {
        let store = MemoryCatalog::fixture();

        // Fortify Health (2) and Restore Magicka (3)
        let groups = select_ingredients(&store, &[3, 2]).unwrap();
        let names: Vec<&str> = groups.iter().map(|g| g.effect.name.as_str()).collect();
        assert_eq!(names, vec!["Fortify Health", "Restore Magicka"]);

        let first: Vec<(&str, bool)> = groups[0]
            .choices
            .iter()
            .map(|c| (c.ingredient.name.as_str(), c.disabled))
            .collect();
        assert_eq!(
            first,
            vec![("Ash Salts", false), ("Bonemeal", false), ("Emerald", false)]
        );

        let second: Vec<(&str, bool)> = groups[1]
            .choices
            .iter()
            .map(|c| (c.ingredient.name.as_str(), c.disabled))
            .collect();
        assert_eq!(
            second,
            vec![("Ash Salts", true), ("Bonemeal", true), ("Comberry", false)]
        );
    }

    #[test]
    fn select_ingredients_skips_unknown_effects() {
        let store = MemoryCatalog::fixture();
        let groups = select_ingredients(&store, &[42, 5]).unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].effect.name, "Night-Eye");
    }

    #[test]
    fn save_creates_one_potion_with_given_associations() {
        let store = MemoryCatalog::fixture();

        let record = save(&store, "Test Potion", "1,2", "2,3").unwrap();
        assert_eq!(record.potion.name, "Test Potion");
        let mut ingredient_ids: Vec<i32> = record.ingredients.iter().map(|i| i.id).collect();
        ingredient_ids.sort();
        assert_eq!(ingredient_ids, vec![1, 2]);
        let mut effect_ids = ids_of(&record.effects);
        effect_ids.sort();
        assert_eq!(effect_ids, vec![2, 3]);
        assert_eq!(store.potion_count(), 1);
    }

    #[test]
    fn save_rejects_blank_name_and_bad_ids() {
        let store = MemoryCatalog::fixture();

        assert!(matches!(save(&store, "   ", "1,2", "2"), Err(BrewError::BlankName)));
        assert!(matches!(
            save(&store, "Murky", "1,x", "2"),
            Err(BrewError::InvalidId(_))
        ));
        assert_eq!(store.potion_count(), 0);
    }

    #[test]
    fn save_twice_with_same_name_conflicts() {
        let store = MemoryCatalog::fixture();

        save(&store, "Restore Draught", "1,2", "3").unwrap();
        assert!(matches!(
            save(&store, "Restore Draught", "1,3", "3"),
            Err(BrewError::Store(StoreError::DuplicateName(_)))
        ));
        assert_eq!(store.potion_count(), 1);
    }
}
