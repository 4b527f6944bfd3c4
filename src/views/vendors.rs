use axum::response::Html;

use crate::model::VendorDetail;

use super::{decimal, escape, media_url, page};

pub fn vendor_detail(detail: &VendorDetail) -> Html<String> {
    let vendor = &detail.vendor;
    let mut body = String::new();

    if let Some(image) = &vendor.image {
        body.push_str(&format!(
            "<img src=\"{}\" alt=\"{}\" width=\"96\" height=\"96\">\n",
            media_url(image),
            escape(&vendor.name)
        ));
    }

    body.push_str(&format!(
        "<p>{} in {}, {}</p>\n<p>Available gold: {}</p>\n<h2>Inventory</h2>\n",
        escape(&vendor.profession),
        escape(&vendor.city),
        escape(&vendor.building),
        decimal(vendor.available_gold)
    ));

    if detail.inventory.is_empty() {
        body.push_str("<p>This vendor has nothing in stock.</p>");
    } else {
        body.push_str("<table>\n<thead><tr><th>Ingredient</th><th>Quantity</th><th>Value</th><th>Weight</th></tr></thead>\n<tbody>\n");
        for (stock, ingredient) in &detail.inventory {
            body.push_str(&format!(
                "<tr><td><a href=\"/ingredient/{}/\">{}</a></td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                ingredient.id,
                escape(&ingredient.name),
                stock.quantity,
                ingredient.value,
                decimal(ingredient.weight)
            ));
        }
        body.push_str("</tbody>\n</table>");
    }

    page(&vendor.name, &body)
}
