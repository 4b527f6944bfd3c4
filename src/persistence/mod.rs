use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, PooledConnection};
use diesel::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use r2d2::Pool;
use thiserror::Error;

use crate::model::{
    Effect, EffectWithIngredients, Ingredient, IngredientDetail, PotionRecord, VendorDetail,
};

mod effect_repository;
mod ingredient_repository;
#[cfg(test)]
pub mod memory;
mod potion_repository;
mod vendor_repository;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;
pub type DbConnection = PooledConnection<ConnectionManager<SqliteConnection>>;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] diesel::result::Error),

    #[error("connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("a potion named '{0}' already exists")]
    DuplicateName(String),

    #[error("migration failed: {0}")]
    Migration(String),
}

pub trait IngredientStore {
    fn all_ingredients(&self) -> StoreResult<Vec<Ingredient>>;
    fn favorite_ingredients(&self) -> StoreResult<Vec<Ingredient>>;
    fn ingredient(&self, ingredient_id: i32) -> StoreResult<Option<Ingredient>>;
    fn toggle_favorite(&self, ingredient_id: i32) -> StoreResult<Option<Ingredient>>;
    fn effect_ids_for_ingredient(&self, ingredient_id: i32) -> StoreResult<Vec<i32>>;
    fn ingredient_detail(&self, ingredient_id: i32) -> StoreResult<Option<IngredientDetail>>;
}

pub trait EffectStore {
    fn all_effects(&self) -> StoreResult<Vec<Effect>>;
    fn effect(&self, effect_id: i32) -> StoreResult<Option<Effect>>;
    /// Effects among `ids` that exist, ordered by name. Unknown ids are skipped.
    fn effects_by_ids(&self, ids: &[i32]) -> StoreResult<Vec<Effect>>;
    fn effect_list(&self) -> StoreResult<Vec<EffectWithIngredients>>;
    /// Ingredients linked to the effect, ordered by weight then value.
    fn ingredients_for_effect(&self, effect_id: i32) -> StoreResult<Vec<Ingredient>>;
    fn effects_for_ingredient(&self, ingredient_id: i32) -> StoreResult<Vec<Effect>>;
    fn search_effects(&self, query: &str) -> StoreResult<Vec<Effect>>;
}

pub trait VendorStore {
    fn vendor_detail(&self, vendor_id: i32) -> StoreResult<Option<VendorDetail>>;
}

pub trait PotionStore {
    fn create_potion(
        &self,
        name: &str,
        ingredient_ids: &[i32],
        effect_ids: &[i32],
    ) -> StoreResult<PotionRecord>;
    fn potions(&self) -> StoreResult<Vec<PotionRecord>>;
}

/// Everything the web layer reads from and writes to.
pub trait Catalog: IngredientStore + EffectStore + VendorStore + PotionStore + Send + Sync {}

impl<T> Catalog for T where T: IngredientStore + EffectStore + VendorStore + PotionStore + Send + Sync
{}

diesel::define_sql_function! {
    /// Unicode lower-casing. SQLite's own `lower` and `LIKE` only fold ASCII.
    fn fold_case(text: diesel::sql_types::Text) -> diesel::sql_types::Text;
}

#[derive(Debug, Clone, Copy)]
struct ConnectionOptions;

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ConnectionOptions {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        conn.batch_execute("PRAGMA foreign_keys = ON; PRAGMA busy_timeout = 5000;")
            .map_err(diesel::r2d2::Error::QueryError)?;
        fold_case_utils::register_impl(conn, |text: String| text.to_lowercase())
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

pub fn build_pool(database_url: &str, max_size: u32) -> StoreResult<DbPool> {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    let pool = Pool::builder()
        .max_size(max_size)
        .connection_customizer(Box::new(ConnectionOptions))
        .build(manager)?;
    Ok(pool)
}

pub fn run_migrations(pool: &DbPool) -> StoreResult<()> {
    let mut conn = pool.get()?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| StoreError::Migration(e.to_string()))?;

    for version in applied {
        tracing::info!(version = %version, "applied migration");
    }
    Ok(())
}

#[derive(Clone)]
pub struct SqliteCatalog {
    pool: DbPool,
}

impl SqliteCatalog {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn connection(&self) -> StoreResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

impl IngredientStore for SqliteCatalog {
    fn all_ingredients(&self) -> StoreResult<Vec<Ingredient>> {
        let mut conn = self.connection()?;
        Ok(ingredient_repository::all(&mut conn)?)
    }

    fn favorite_ingredients(&self) -> StoreResult<Vec<Ingredient>> {
        let mut conn = self.connection()?;
        Ok(ingredient_repository::favorites(&mut conn)?)
    }

    fn ingredient(&self, ingredient_id: i32) -> StoreResult<Option<Ingredient>> {
        let mut conn = self.connection()?;
        Ok(ingredient_repository::find(&mut conn, ingredient_id)?)
    }

    fn toggle_favorite(&self, ingredient_id: i32) -> StoreResult<Option<Ingredient>> {
        tracing::debug!(ingredient_id, "toggling favorite flag");
        let mut conn = self.connection()?;
        Ok(ingredient_repository::toggle_favorite(&mut conn, ingredient_id)?)
    }

    fn effect_ids_for_ingredient(&self, ingredient_id: i32) -> StoreResult<Vec<i32>> {
        let mut conn = self.connection()?;
        Ok(ingredient_repository::effect_ids(&mut conn, ingredient_id)?)
    }

    fn ingredient_detail(&self, ingredient_id: i32) -> StoreResult<Option<IngredientDetail>> {
        let mut conn = self.connection()?;
        Ok(ingredient_repository::detail(&mut conn, ingredient_id)?)
    }
}

impl EffectStore for SqliteCatalog {
    fn all_effects(&self) -> StoreResult<Vec<Effect>> {
        let mut conn = self.connection()?;
        Ok(effect_repository::all(&mut conn)?)
    }

    fn effect(&self, effect_id: i32) -> StoreResult<Option<Effect>> {
        let mut conn = self.connection()?;
        Ok(effect_repository::find(&mut conn, effect_id)?)
    }

    fn effects_by_ids(&self, ids: &[i32]) -> StoreResult<Vec<Effect>> {
        let mut conn = self.connection()?;
        Ok(effect_repository::find_many(&mut conn, ids)?)
    }

    fn effect_list(&self) -> StoreResult<Vec<EffectWithIngredients>> {
        let mut conn = self.connection()?;
        Ok(effect_repository::with_ingredients(&mut conn)?)
    }

    fn ingredients_for_effect(&self, effect_id: i32) -> StoreResult<Vec<Ingredient>> {
        let mut conn = self.connection()?;
        Ok(effect_repository::ingredients_for(&mut conn, effect_id)?)
    }

    fn effects_for_ingredient(&self, ingredient_id: i32) -> StoreResult<Vec<Effect>> {
        let mut conn = self.connection()?;
        Ok(effect_repository::for_ingredient(&mut conn, ingredient_id)?)
    }

    fn search_effects(&self, query: &str) -> StoreResult<Vec<Effect>> {
        let mut conn = self.connection()?;
        Ok(effect_repository::search(&mut conn, query)?)
    }
}

impl VendorStore for SqliteCatalog {
    fn vendor_detail(&self, vendor_id: i32) -> StoreResult<Option<VendorDetail>> {
        let mut conn = self.connection()?;
        Ok(vendor_repository::detail(&mut conn, vendor_id)?)
    }
}

impl PotionStore for SqliteCatalog {
    fn create_potion(
        &self,
        name: &str,
        ingredient_ids: &[i32],
        effect_ids: &[i32],
    ) -> StoreResult<PotionRecord> {
        let mut conn = self.connection()?;
        potion_repository::create(&mut conn, name, ingredient_ids, effect_ids)
    }

    fn potions(&self) -> StoreResult<Vec<PotionRecord>> {
        let mut conn = self.connection()?;
        Ok(potion_repository::all(&mut conn)?)
    }
}
