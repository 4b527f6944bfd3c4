//! In-memory catalog used by workflow and handler tests.

use std::collections::BTreeSet;
use std::sync::Mutex;

use crate::model::{
    Effect, EffectWithIngredients, Ingredient, IngredientDetail, Potion, PotionRecord, Vendor,
    VendorDetail, VendorInventory,
};
use crate::seed::CatalogSeed;

use super::{EffectStore, IngredientStore, PotionStore, StoreError, StoreResult, VendorStore};

#[derive(Default)]
struct State {
    ingredients: Vec<Ingredient>,
    effects: Vec<Effect>,
    links: Vec<(i32, i32)>,
    vendors: Vec<Vendor>,
    inventory: Vec<VendorInventory>,
    potions: Vec<PotionRecord>,
}

#[derive(Default)]
pub struct MemoryCatalog {
    state: Mutex<State>,
}

impl MemoryCatalog {
    /// Ids are assigned in document order starting at 1, matching a fresh
    /// SQLite import of the same seed.
    pub fn from_seed(seed: &CatalogSeed) -> Self {
        let mut state = State::default();

        for (n, e) in seed.effects.iter().enumerate() {
            state.effects.push(Effect {
                id: n as i32 + 1,
                name: e.name.clone(),
                description: e.description.clone(),
                icon: e.icon.clone(),
                is_negative: e.is_negative,
            });
        }

        for (n, i) in seed.ingredients.iter().enumerate() {
            let id = n as i32 + 1;
            state.ingredients.push(Ingredient {
                id,
                name: i.name.clone(),
                value: i.value,
                weight: i.weight,
                image: i.image.clone(),
                notes: i.notes.clone(),
                known_locations: i.known_locations.clone(),
                favorite: i.favorite,
            });
            for effect_name in &i.effects {
                if let Some(effect) = state.effects.iter().find(|e| &e.name == effect_name) {
                    state.links.push((id, effect.id));
                }
            }
        }

        for (n, v) in seed.vendors.iter().enumerate() {
            let vendor_id = n as i32 + 1;
            state.vendors.push(Vendor {
                id: vendor_id,
                name: v.name.clone(),
                profession: v.profession.clone(),
                city: v.city.clone(),
                building: v.building.clone(),
                image: v.image.clone(),
                available_gold: v.available_gold,
            });
            for stock in &v.inventory {
                if let Some(ingredient) = state.ingredients.iter().find(|i| i.name == stock.ingredient)
                {
                    let id = state.inventory.len() as i32 + 1;
                    state.inventory.push(VendorInventory {
                        id,
                        vendor_id,
                        ingredient_id: ingredient.id,
                        quantity: stock.quantity,
                    });
                }
            }
        }

        Self {
            state: Mutex::new(state),
        }
    }

    pub fn fixture() -> Self {
        let seed: CatalogSeed =
            serde_json::from_str(crate::seed::FIXTURE_JSON).expect("fixture parses");
        Self::from_seed(&seed)
    }

    pub fn potion_count(&self) -> usize {
        self.state.lock().unwrap().potions.len()
    }
}

fn by_name<T>(mut items: Vec<T>, name: impl Fn(&T) -> &str) -> Vec<T> {
    items.sort_by(|a, b| name(a).cmp(name(b)));
    items
}

fn weight_then_value(mut items: Vec<Ingredient>) -> Vec<Ingredient> {
    items.sort_by(|a, b| {
        a.weight
            .total_cmp(&b.weight)
            .then(a.value.cmp(&b.value))
            .then(a.name.cmp(&b.name))
    });
    items
}

impl State {
    fn ingredients_by_ids(&self, ids: &[i32]) -> Vec<Ingredient> {
        let found = self
            .ingredients
            .iter()
            .filter(|i| ids.contains(&i.id))
            .cloned()
            .collect();
        by_name(found, |i: &Ingredient| i.name.as_str())
    }

    fn linked_ingredients(&self, effect_id: i32) -> Vec<Ingredient> {
        let ids: BTreeSet<i32> = self
            .links
            .iter()
            .filter(|(_, e)| *e == effect_id)
            .map(|(i, _)| *i)
            .collect();
        self.ingredients
            .iter()
            .filter(|i| ids.contains(&i.id))
            .cloned()
            .collect()
    }

    fn linked_effects(&self, ingredient_id: i32) -> Vec<Effect> {
        let ids: BTreeSet<i32> = self
            .links
            .iter()
            .filter(|(i, _)| *i == ingredient_id)
            .map(|(_, e)| *e)
            .collect();
        by_name(
            self.effects
                .iter()
                .filter(|e| ids.contains(&e.id))
                .cloned()
                .collect(),
            |e: &Effect| e.name.as_str(),
        )
    }
}

impl IngredientStore for MemoryCatalog {
    fn all_ingredients(&self) -> StoreResult<Vec<Ingredient>> {
        let state = self.state.lock().unwrap();
        Ok(by_name(state.ingredients.clone(), |i: &Ingredient| i.name.as_str()))
    }

    fn favorite_ingredients(&self) -> StoreResult<Vec<Ingredient>> {
        let state = self.state.lock().unwrap();
        let favorites = state
            .ingredients
            .iter()
            .filter(|i| i.favorite)
            .cloned()
            .collect();
        Ok(by_name(favorites, |i: &Ingredient| i.name.as_str()))
    }

    fn ingredient(&self, ingredient_id: i32) -> StoreResult<Option<Ingredient>> {
        let state = self.state.lock().unwrap();
        Ok(state.ingredients.iter().find(|i| i.id == ingredient_id).cloned())
    }

    fn toggle_favorite(&self, ingredient_id: i32) -> StoreResult<Option<Ingredient>> {
        let mut state = self.state.lock().unwrap();
        Ok(state
            .ingredients
            .iter_mut()
            .find(|i| i.id == ingredient_id)
            .map(|i| {
                i.favorite = !i.favorite;
                i.clone()
            }))
    }

    fn effect_ids_for_ingredient(&self, ingredient_id: i32) -> StoreResult<Vec<i32>> {
        let state = self.state.lock().unwrap();
        let ids: BTreeSet<i32> = state
            .links
            .iter()
            .filter(|(i, _)| *i == ingredient_id)
            .map(|(_, e)| *e)
            .collect();
        Ok(ids.into_iter().collect())
    }

    fn ingredient_detail(&self, ingredient_id: i32) -> StoreResult<Option<IngredientDetail>> {
        let state = self.state.lock().unwrap();
        let Some(ingredient) = state.ingredients.iter().find(|i| i.id == ingredient_id) else {
            return Ok(None);
        };

        let stock = by_name(
            state
                .inventory
                .iter()
                .filter(|row| row.ingredient_id == ingredient_id)
                .filter_map(|row| {
                    state
                        .vendors
                        .iter()
                        .find(|v| v.id == row.vendor_id)
                        .map(|v| (row.clone(), v.clone()))
                })
                .collect(),
            |(_, v): &(VendorInventory, Vendor)| v.name.as_str(),
        );

        Ok(Some(IngredientDetail {
            ingredient: ingredient.clone(),
            effects: state.linked_effects(ingredient_id),
            stock,
        }))
    }
}

impl EffectStore for MemoryCatalog {
    fn all_effects(&self) -> StoreResult<Vec<Effect>> {
        let state = self.state.lock().unwrap();
        Ok(by_name(state.effects.clone(), |e: &Effect| e.name.as_str()))
    }

    fn effect(&self, effect_id: i32) -> StoreResult<Option<Effect>> {
        let state = self.state.lock().unwrap();
        Ok(state.effects.iter().find(|e| e.id == effect_id).cloned())
    }

    fn effects_by_ids(&self, ids: &[i32]) -> StoreResult<Vec<Effect>> {
        let state = self.state.lock().unwrap();
        let found = state
            .effects
            .iter()
            .filter(|e| ids.contains(&e.id))
            .cloned()
            .collect();
        Ok(by_name(found, |e: &Effect| e.name.as_str()))
    }

    fn effect_list(&self) -> StoreResult<Vec<EffectWithIngredients>> {
        let state = self.state.lock().unwrap();
        Ok(by_name(state.effects.clone(), |e: &Effect| e.name.as_str())
            .into_iter()
            .map(|effect| EffectWithIngredients {
                ingredients: weight_then_value(state.linked_ingredients(effect.id)),
                effect,
            })
            .collect())
    }

    fn ingredients_for_effect(&self, effect_id: i32) -> StoreResult<Vec<Ingredient>> {
        let state = self.state.lock().unwrap();
        Ok(weight_then_value(state.linked_ingredients(effect_id)))
    }

    fn effects_for_ingredient(&self, ingredient_id: i32) -> StoreResult<Vec<Effect>> {
        let state = self.state.lock().unwrap();
        Ok(state.linked_effects(ingredient_id))
    }

    fn search_effects(&self, query: &str) -> StoreResult<Vec<Effect>> {
        let state = self.state.lock().unwrap();
        let needle = query.trim().to_lowercase();

        let mut matched: BTreeSet<i32> = state
            .effects
            .iter()
            .filter(|e| e.name.to_lowercase().contains(&needle))
            .map(|e| e.id)
            .collect();
        for ingredient in &state.ingredients {
            if ingredient.name.to_lowercase().contains(&needle) {
                matched.extend(
                    state
                        .links
                        .iter()
                        .filter(|(i, _)| *i == ingredient.id)
                        .map(|(_, e)| *e),
                );
            }
        }

        let found = state
            .effects
            .iter()
            .filter(|e| matched.contains(&e.id))
            .cloned()
            .collect();
        Ok(by_name(found, |e: &Effect| e.name.as_str()))
    }
}

impl VendorStore for MemoryCatalog {
    fn vendor_detail(&self, vendor_id: i32) -> StoreResult<Option<VendorDetail>> {
        let state = self.state.lock().unwrap();
        let Some(vendor) = state.vendors.iter().find(|v| v.id == vendor_id) else {
            return Ok(None);
        };

        let inventory = by_name(
            state
                .inventory
                .iter()
                .filter(|row| row.vendor_id == vendor_id)
                .filter_map(|row| {
                    state
                        .ingredients
                        .iter()
                        .find(|i| i.id == row.ingredient_id)
                        .map(|i| (row.clone(), i.clone()))
                })
                .collect(),
            |(_, i): &(VendorInventory, Ingredient)| i.name.as_str(),
        );

        Ok(Some(VendorDetail {
            vendor: vendor.clone(),
            inventory,
        }))
    }
}

impl PotionStore for MemoryCatalog {
    fn create_potion(
        &self,
        name: &str,
        ingredient_ids: &[i32],
        effect_ids: &[i32],
    ) -> StoreResult<PotionRecord> {
        let effects = self.effects_by_ids(effect_ids)?;

        let mut state = self.state.lock().unwrap();
        let ingredients = state.ingredients_by_ids(ingredient_ids);
        if state.potions.iter().any(|p| p.potion.name == name) {
            return Err(StoreError::DuplicateName(name.to_string()));
        }

        let record = PotionRecord {
            potion: Potion {
                id: state.potions.len() as i32 + 1,
                name: name.to_string(),
                created_at: chrono::Utc::now().naive_utc(),
            },
            ingredients,
            effects,
        };
        state.potions.push(record.clone());
        Ok(record)
    }

    fn potions(&self) -> StoreResult<Vec<PotionRecord>> {
        let state = self.state.lock().unwrap();
        Ok(state.potions.iter().rev().cloned().collect())
    }
}
