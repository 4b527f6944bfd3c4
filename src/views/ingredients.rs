use axum::response::Html;

use crate::model::{Ingredient, IngredientDetail};

use super::{decimal, escape, media_url, page};

/// One table row; the favorite button swaps the row in place.
pub fn ingredient_row(ingredient: &Ingredient) -> String {
    let (star, label) = if ingredient.favorite {
        ("★", "Remove from favorites")
    } else {
        ("☆", "Add to favorites")
    };

    format!(
        r##"<tr id="ingredient-{id}">
<td><a href="/ingredient/{id}/">{name}</a></td>
<td>{value}</td>
<td>{weight}</td>
<td><button hx-post="/ingredient/{id}/toggle_favorite_htmx/" hx-target="#ingredient-{id}" hx-swap="outerHTML" title="{label}">{star}</button></td>
</tr>
"##,
        id = ingredient.id,
        name = escape(&ingredient.name),
        value = ingredient.value,
        weight = decimal(ingredient.weight),
    )
}

fn ingredient_table(ingredients: &[Ingredient], empty: &str) -> String {
    if ingredients.is_empty() {
        return format!("<p>{}</p>", escape(empty));
    }

    let rows: String = ingredients.iter().map(ingredient_row).collect();
    format!(
        "<table>\n<thead><tr><th>Name</th><th>Value</th><th>Weight</th><th>Favorite</th></tr></thead>\n<tbody>\n{rows}</tbody>\n</table>"
    )
}

pub fn all_ingredients(ingredients: &[Ingredient]) -> Html<String> {
    page(
        "Ingredients",
        &ingredient_table(ingredients, "No ingredients have been catalogued yet."),
    )
}

pub fn favorites(ingredients: &[Ingredient]) -> Html<String> {
    page(
        "Favorite ingredients",
        &ingredient_table(ingredients, "Nothing marked as a favorite yet."),
    )
}

pub fn ingredient_detail(detail: &IngredientDetail) -> Html<String> {
    let ingredient = &detail.ingredient;
    let mut body = String::new();

    if let Some(image) = &ingredient.image {
        body.push_str(&format!(
            "<img src=\"{}\" alt=\"{}\" width=\"96\" height=\"96\">\n",
            media_url(image),
            escape(&ingredient.name)
        ));
    }

    body.push_str(&format!(
        "<dl>\n<dt>Value</dt><dd>{}</dd>\n<dt>Weight</dt><dd>{}</dd>\n<dt>Favorite</dt><dd>{}</dd>\n",
        ingredient.value,
        decimal(ingredient.weight),
        if ingredient.favorite { "yes" } else { "no" },
    ));
    if let Some(locations) = &ingredient.known_locations {
        body.push_str(&format!(
            "<dt>Known locations</dt><dd>{}</dd>\n",
            escape(locations)
        ));
    }
    if let Some(notes) = &ingredient.notes {
        body.push_str(&format!("<dt>Notes</dt><dd>{}</dd>\n", escape(notes)));
    }
    body.push_str("</dl>\n<h2>Effects</h2>\n");

    if detail.effects.is_empty() {
        body.push_str("<p>No known effects.</p>\n");
    } else {
        body.push_str("<ul>\n");
        for effect in &detail.effects {
            body.push_str(&format!(
                "<li><a href=\"/effects/{}/\"{}>{}</a></li>\n",
                effect.id,
                if effect.is_negative { " class=\"negative\"" } else { "" },
                escape(&effect.name)
            ));
        }
        body.push_str("</ul>\n");
    }

    body.push_str("<h2>Sold by</h2>\n");
    if detail.stock.is_empty() {
        body.push_str("<p>No vendor stocks this ingredient.</p>\n");
    } else {
        body.push_str("<table>\n<thead><tr><th>Vendor</th><th>City</th><th>Quantity</th></tr></thead>\n<tbody>\n");
        for (stock, vendor) in &detail.stock {
            body.push_str(&format!(
                "<tr><td><a href=\"/vendor/{}/\">{}</a></td><td>{}</td><td>{}</td></tr>\n",
                vendor.id,
                escape(&vendor.name),
                escape(&vendor.city),
                stock.quantity
            ));
        }
        body.push_str("</tbody>\n</table>\n");
    }

    page(&ingredient.name, &body)
}
