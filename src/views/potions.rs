use axum::response::Html;

use crate::brewing::{IngredientGroup, PotionDraft, MAX_INGREDIENTS, MIN_INGREDIENTS};
use crate::model::{Effect, Ingredient, PotionRecord};

use super::{escape, page};

pub fn select_effects(effects: &[Effect]) -> Html<String> {
    let mut options = String::new();
    for effect in effects {
        options.push_str(&format!(
            r##"<li><label><input type="checkbox" name="effects" value="{id}"> {name}</label>
<button type="button" hx-get="/potions/add_effect/?effect_id={id}" hx-target="#chosen-effects" hx-swap="beforeend">pin</button></li>
"##,
            id = effect.id,
            name = escape(&effect.name),
        ));
    }

    let body = format!(
        r#"<form method="post" action="/potions/select_ingredients/">
<p>Pick the effects you want your potion to have.</p>
<ul id="chosen-effects"></ul>
<ul>
{options}</ul>
<button type="submit">Choose ingredients</button>
</form>"#
    );
    page("Brew a potion", &body)
}

/// A pinned effect; carries its id to the next step in a hidden field.
pub fn effect_chip(effect: &Effect) -> Html<String> {
    Html(format!(
        "<li class=\"chip\"><input type=\"hidden\" name=\"effects\" value=\"{}\">{}</li>\n",
        effect.id,
        escape(&effect.name)
    ))
}

/// A pinned ingredient with the effects it carries.
pub fn ingredient_chip(ingredient: &Ingredient, effects: &[Effect]) -> Html<String> {
    let names = effects
        .iter()
        .map(|e| escape(&e.name))
        .collect::<Vec<_>>()
        .join(", ");
    Html(format!(
        "<li class=\"chip\"><input type=\"hidden\" name=\"ingredients\" value=\"{}\">{} <small>{}</small></li>\n",
        ingredient.id,
        escape(&ingredient.name),
        names
    ))
}

pub fn select_ingredients(
    groups: &[IngredientGroup],
    effect_ids: &[i32],
    error: Option<&str>,
) -> Html<String> {
    let mut body = String::new();

    if let Some(error) = error {
        body.push_str(&format!("<p class=\"error\">{}</p>\n", escape(error)));
    }

    body.push_str("<form method=\"post\" action=\"/potions/review/\">\n");
    body.push_str(&format!(
        "<p>Pick between {MIN_INGREDIENTS} and {MAX_INGREDIENTS} ingredients. Ingredients already listed under an earlier effect are greyed out.</p>\n"
    ));
    for id in effect_ids {
        body.push_str(&format!(
            "<input type=\"hidden\" name=\"effects\" value=\"{id}\">\n"
        ));
    }
    body.push_str("<ul id=\"chosen-ingredients\"></ul>\n");

    if groups.is_empty() {
        body.push_str("<p>No effects selected. <a href=\"/potions/start/\">Start over</a>.</p>\n");
    }

    for group in groups {
        body.push_str(&format!(
            "<fieldset>\n<legend>{}</legend>\n",
            escape(&group.effect.name)
        ));
        if group.choices.is_empty() {
            body.push_str("<p>No ingredient produces this effect.</p>\n");
        }
        for choice in &group.choices {
            let ingredient = &choice.ingredient;
            body.push_str(&format!(
                r##"<label{class}><input type="checkbox" name="ingredients" value="{id}"{disabled}> {name}</label>
<button type="button" hx-get="/potions/add_ingredient/?ingredient_id={id}" hx-target="#chosen-ingredients" hx-swap="beforeend"{disabled}>pin</button><br>
"##,
                class = if choice.disabled { " class=\"disabled\"" } else { "" },
                id = ingredient.id,
                disabled = if choice.disabled { " disabled" } else { "" },
                name = escape(&ingredient.name),
            ));
        }
        body.push_str("</fieldset>\n");
    }

    body.push_str("<button type=\"submit\">Review potion</button>\n</form>");
    page("Choose ingredients", &body)
}

pub fn review(draft: &PotionDraft) -> Html<String> {
    let ingredients = draft
        .ingredients
        .iter()
        .map(|i| format!("<li><a href=\"/ingredient/{}/\">{}</a></li>", i.id, escape(&i.name)))
        .collect::<Vec<_>>()
        .join("\n");

    let effects = if draft.effects.is_empty() {
        "<p>These ingredients share no effect; the potion would do nothing.</p>".to_string()
    } else {
        let items = draft
            .effects
            .iter()
            .map(|e| {
                format!(
                    "<li{}>{}</li>",
                    if e.is_negative { " class=\"negative\"" } else { "" },
                    escape(&e.name)
                )
            })
            .collect::<Vec<_>>()
            .join("\n");
        format!("<ul>\n{items}\n</ul>")
    };

    let body = format!(
        r#"<h2>Ingredients</h2>
<ul>
{ingredients}
</ul>
<h2>Common effects</h2>
{effects}
<form method="post" action="/potions/save/">
<input type="hidden" name="ingredients" value="{ingredient_ids}">
<input type="hidden" name="effects" value="{effect_ids}">
<label>Name <input type="text" name="name" required></label>
<button type="submit">Save potion</button>
</form>"#,
        ingredient_ids = draft.ingredient_ids(),
        effect_ids = draft.effect_ids(),
    );
    page("Review potion", &body)
}

pub fn potion_list(potions: &[PotionRecord]) -> Html<String> {
    if potions.is_empty() {
        return page(
            "Potions",
            "<p>No potions saved yet. <a href=\"/potions/start/\">Brew one</a>.</p>",
        );
    }

    let mut body = String::from(
        "<table>\n<thead><tr><th>Name</th><th>Ingredients</th><th>Effects</th><th>Created</th></tr></thead>\n<tbody>\n",
    );
    for record in potions {
        let ingredients = record
            .ingredients
            .iter()
            .map(|i| escape(&i.name))
            .collect::<Vec<_>>()
            .join(", ");
        let effects = record
            .effects
            .iter()
            .map(|e| escape(&e.name))
            .collect::<Vec<_>>()
            .join(", ");
        body.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            escape(&record.potion.name),
            ingredients,
            effects,
            record.potion.created_at.format("%Y-%m-%d %H:%M")
        ));
    }
    body.push_str("</tbody>\n</table>");

    page("Potions", &body)
}
