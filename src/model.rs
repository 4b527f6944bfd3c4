use diesel::prelude::*;

#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq)]
#[diesel(table_name = crate::schema::ingredients)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Ingredient {
    pub id: i32,
    pub name: String,
    pub value: i32,
    pub weight: f64,
    pub image: Option<String>,
    pub notes: Option<String>,
    pub known_locations: Option<String>,
    pub favorite: bool,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::ingredients)]
pub struct NewIngredient<'a> {
    pub name: &'a str,
    pub value: i32,
    pub weight: f64,
    pub image: Option<&'a str>,
    pub notes: Option<&'a str>,
    pub known_locations: Option<&'a str>,
    pub favorite: bool,
}

#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq)]
#[diesel(table_name = crate::schema::effects)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Effect {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub is_negative: bool,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::effects)]
pub struct NewEffect<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub icon: Option<&'a str>,
    pub is_negative: bool,
}

#[derive(Queryable, Selectable, Identifiable, Associations, Debug, Clone, PartialEq)]
#[diesel(table_name = crate::schema::ingredient_effects)]
#[diesel(belongs_to(Ingredient))]
#[diesel(belongs_to(Effect))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct IngredientEffect {
    pub id: i32,
    pub ingredient_id: i32,
    pub effect_id: i32,
}

#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq)]
#[diesel(table_name = crate::schema::potions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Potion {
    pub id: i32,
    pub name: String,
    pub created_at: chrono::NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::potions)]
pub struct NewPotion<'a> {
    pub name: &'a str,
    pub created_at: chrono::NaiveDateTime,
}

#[derive(Queryable, Selectable, Insertable, Identifiable, Associations, Debug, Clone)]
#[diesel(table_name = crate::schema::potion_ingredients)]
#[diesel(primary_key(potion_id, ingredient_id))]
#[diesel(belongs_to(Potion))]
#[diesel(belongs_to(Ingredient))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PotionIngredient {
    pub potion_id: i32,
    pub ingredient_id: i32,
}

#[derive(Queryable, Selectable, Insertable, Identifiable, Associations, Debug, Clone)]
#[diesel(table_name = crate::schema::potion_effects)]
#[diesel(primary_key(potion_id, effect_id))]
#[diesel(belongs_to(Potion))]
#[diesel(belongs_to(Effect))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PotionEffect {
    pub potion_id: i32,
    pub effect_id: i32,
}

#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq)]
#[diesel(table_name = crate::schema::vendors)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Vendor {
    pub id: i32,
    pub name: String,
    pub profession: String,
    pub city: String,
    pub building: String,
    pub image: Option<String>,
    pub available_gold: f64,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::vendors)]
pub struct NewVendor<'a> {
    pub name: &'a str,
    pub profession: &'a str,
    pub city: &'a str,
    pub building: &'a str,
    pub image: Option<&'a str>,
    pub available_gold: f64,
}

#[derive(Queryable, Selectable, Identifiable, Associations, Debug, Clone, PartialEq)]
#[diesel(table_name = crate::schema::vendor_inventories)]
#[diesel(belongs_to(Vendor))]
#[diesel(belongs_to(Ingredient))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct VendorInventory {
    pub id: i32,
    pub vendor_id: i32,
    pub ingredient_id: i32,
    pub quantity: i32,
}

/// An effect with the ingredients producing it, lightest and cheapest first.
#[derive(Debug, Clone)]
pub struct EffectWithIngredients {
    pub effect: Effect,
    pub ingredients: Vec<Ingredient>,
}

#[derive(Debug, Clone)]
pub struct IngredientDetail {
    pub ingredient: Ingredient,
    pub effects: Vec<Effect>,
    pub stock: Vec<(VendorInventory, Vendor)>,
}

#[derive(Debug, Clone)]
pub struct VendorDetail {
    pub vendor: Vendor,
    pub inventory: Vec<(VendorInventory, Ingredient)>,
}

/// A saved potion with its associations, both ordered by name.
#[derive(Debug, Clone)]
pub struct PotionRecord {
    pub potion: Potion,
    pub ingredients: Vec<Ingredient>,
    pub effects: Vec<Effect>,
}
