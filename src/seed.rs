//! JSON catalog import.
//!
//! Catalog rows are maintained outside the web handlers; this module loads a
//! seed document into the store. Rows are matched by name, so importing the
//! same document twice leaves the catalog unchanged.

use std::collections::HashMap;

use diesel::prelude::*;
use diesel::SqliteConnection;
use serde::Deserialize;
use thiserror::Error;

use crate::model::{NewEffect, NewIngredient, NewVendor};

#[cfg(test)]
pub const FIXTURE_JSON: &str = include_str!("../demos/catalog.json");

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("database error: {0}")]
    Database(#[from] diesel::result::Error),

    #[error("ingredient '{ingredient}' lists unknown effect '{effect}'")]
    UnknownEffect { ingredient: String, effect: String },

    #[error("vendor '{vendor}' stocks unknown ingredient '{ingredient}'")]
    UnknownIngredient { vendor: String, ingredient: String },

    #[error("vendor '{vendor}' stocks '{ingredient}' with quantity {quantity}, expected at least 1")]
    InvalidQuantity {
        vendor: String,
        ingredient: String,
        quantity: i32,
    },
}

#[derive(Debug, Default, Deserialize)]
pub struct CatalogSeed {
    #[serde(default)]
    pub effects: Vec<EffectSeed>,
    #[serde(default)]
    pub ingredients: Vec<IngredientSeed>,
    #[serde(default)]
    pub vendors: Vec<VendorSeed>,
}

#[derive(Debug, Deserialize)]
pub struct EffectSeed {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub is_negative: bool,
}

#[derive(Debug, Deserialize)]
pub struct IngredientSeed {
    pub name: String,
    pub value: i32,
    pub weight: f64,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub known_locations: Option<String>,
    #[serde(default)]
    pub favorite: bool,
    /// Effect names.
    #[serde(default)]
    pub effects: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct VendorSeed {
    pub name: String,
    pub profession: String,
    pub city: String,
    pub building: String,
    #[serde(default)]
    pub image: Option<String>,
    pub available_gold: f64,
    #[serde(default)]
    pub inventory: Vec<StockSeed>,
}

#[derive(Debug, Deserialize)]
pub struct StockSeed {
    pub ingredient: String,
    #[serde(default = "default_quantity")]
    pub quantity: i32,
}

fn default_quantity() -> i32 {
    1
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub effects: usize,
    pub ingredients: usize,
    pub links: usize,
    pub vendors: usize,
    pub stock: usize,
}

pub fn import(conn: &mut SqliteConnection, seed: &CatalogSeed) -> Result<SeedReport, SeedError> {
    use crate::schema::{effects, ingredient_effects, ingredients, vendor_inventories, vendors};

    conn.transaction(|conn| {
        let mut report = SeedReport::default();

        for effect in &seed.effects {
            report.effects += diesel::insert_or_ignore_into(effects::table)
                .values(&NewEffect {
                    name: &effect.name,
                    description: effect.description.as_deref(),
                    icon: effect.icon.as_deref(),
                    is_negative: effect.is_negative,
                })
                .execute(conn)?;
        }

        for ingredient in &seed.ingredients {
            report.ingredients += diesel::insert_or_ignore_into(ingredients::table)
                .values(&NewIngredient {
                    name: &ingredient.name,
                    value: ingredient.value,
                    weight: ingredient.weight,
                    image: ingredient.image.as_deref(),
                    notes: ingredient.notes.as_deref(),
                    known_locations: ingredient.known_locations.as_deref(),
                    favorite: ingredient.favorite,
                })
                .execute(conn)?;
        }

        let effect_ids = name_index(
            effects::table
                .select((effects::name, effects::id))
                .load::<(String, i32)>(conn)?,
        );
        let ingredient_ids = name_index(
            ingredients::table
                .select((ingredients::name, ingredients::id))
                .load::<(String, i32)>(conn)?,
        );

        for ingredient in &seed.ingredients {
            let Some(&ingredient_id) = ingredient_ids.get(&ingredient.name) else {
                continue;
            };
            for effect_name in &ingredient.effects {
                let Some(&effect_id) = effect_ids.get(effect_name) else {
                    return Err(SeedError::UnknownEffect {
                        ingredient: ingredient.name.clone(),
                        effect: effect_name.clone(),
                    });
                };

                let linked = diesel::select(diesel::dsl::exists(
                    ingredient_effects::table
                        .filter(ingredient_effects::ingredient_id.eq(ingredient_id))
                        .filter(ingredient_effects::effect_id.eq(effect_id)),
                ))
                .get_result::<bool>(conn)?;

                if !linked {
                    diesel::insert_into(ingredient_effects::table)
                        .values((
                            ingredient_effects::ingredient_id.eq(ingredient_id),
                            ingredient_effects::effect_id.eq(effect_id),
                        ))
                        .execute(conn)?;
                    report.links += 1;
                }
            }
        }

        for vendor in &seed.vendors {
            report.vendors += diesel::insert_or_ignore_into(vendors::table)
                .values(&NewVendor {
                    name: &vendor.name,
                    profession: &vendor.profession,
                    city: &vendor.city,
                    building: &vendor.building,
                    image: vendor.image.as_deref(),
                    available_gold: vendor.available_gold,
                })
                .execute(conn)?;

            let vendor_id = vendors::table
                .filter(vendors::name.eq(&vendor.name))
                .select(vendors::id)
                .first::<i32>(conn)?;

            for stock in &vendor.inventory {
                let Some(&ingredient_id) = ingredient_ids.get(&stock.ingredient) else {
                    return Err(SeedError::UnknownIngredient {
                        vendor: vendor.name.clone(),
                        ingredient: stock.ingredient.clone(),
                    });
                };
                if stock.quantity < 1 {
                    return Err(SeedError::InvalidQuantity {
                        vendor: vendor.name.clone(),
                        ingredient: stock.ingredient.clone(),
                        quantity: stock.quantity,
                    });
                }

                report.stock += diesel::insert_or_ignore_into(vendor_inventories::table)
                    .values((
                        vendor_inventories::vendor_id.eq(vendor_id),
                        vendor_inventories::ingredient_id.eq(ingredient_id),
                        vendor_inventories::quantity.eq(stock.quantity),
                    ))
                    .execute(conn)?;
            }
        }

        tracing::info!(
            effects = report.effects,
            ingredients = report.ingredients,
            links = report.links,
            vendors = report.vendors,
            stock = report.stock,
            "imported catalog seed"
        );

        Ok(report)
    })
}

fn name_index(rows: Vec<(String, i32)>) -> HashMap<String, i32> {
    rows.into_iter().collect()
}
