use diesel::prelude::*;
use diesel::SqliteConnection;

use crate::model::{Ingredient, Vendor, VendorDetail, VendorInventory};

pub fn find(conn: &mut SqliteConnection, vendor_id: i32) -> QueryResult<Option<Vendor>> {
    use crate::schema::vendors::dsl::*;

    vendors
        .find(vendor_id)
        .select(Vendor::as_select())
        .first(conn)
        .optional()
}

pub fn detail(conn: &mut SqliteConnection, vendor_id: i32) -> QueryResult<Option<VendorDetail>> {
    use crate::schema::ingredients;

    let Some(vendor) = find(conn, vendor_id)? else {
        return Ok(None);
    };

    let inventory = VendorInventory::belonging_to(&vendor)
        .inner_join(ingredients::table)
        .order(ingredients::name.asc())
        .select((VendorInventory::as_select(), Ingredient::as_select()))
        .load::<(VendorInventory, Ingredient)>(conn)?;

    Ok(Some(VendorDetail { vendor, inventory }))
}
