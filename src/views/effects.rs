use axum::response::Html;

use crate::model::{Effect, EffectWithIngredients, Ingredient};

use super::{decimal, escape, media_url, page};

fn effect_label(effect: &Effect) -> String {
    let icon = effect
        .icon
        .as_deref()
        .map(|icon| format!("<img src=\"{}\" alt=\"\" width=\"24\" height=\"24\"> ", media_url(icon)))
        .unwrap_or_default();
    let marker = if effect.is_negative { " <small>(negative)</small>" } else { "" };
    format!("{icon}{}{marker}", escape(&effect.name))
}

/// Rows for `#effects-table-body`, shared by the listing and live search.
pub fn effect_rows(entries: &[EffectWithIngredients]) -> String {
    if entries.is_empty() {
        return "<tr><td colspan=\"3\">No matching effects.</td></tr>\n".to_string();
    }

    let mut rows = String::new();
    for entry in entries {
        let effect = &entry.effect;
        let ingredients = entry
            .ingredients
            .iter()
            .map(|i| format!("<a href=\"/ingredient/{}/\">{}</a>", i.id, escape(&i.name)))
            .collect::<Vec<_>>()
            .join(", ");

        rows.push_str(&format!(
            r##"<tr>
<td><a href="/effects/{id}/">{label}</a></td>
<td>{description}</td>
<td>{ingredients} <button hx-get="/effects/{id}/modal/" hx-target="#modal">details</button></td>
</tr>
"##,
            id = effect.id,
            label = effect_label(effect),
            description = escape(effect.description.as_deref().unwrap_or("")),
        ));
    }
    rows
}

pub fn effect_list(entries: &[EffectWithIngredients], search: &str) -> Html<String> {
    let body = format!(
        r##"<input type="search" name="search" value="{search}" placeholder="Search effects or ingredients"
 hx-get="/effects/search/" hx-trigger="keyup changed delay:300ms, search" hx-target="#effects-table-body">
<table>
<thead><tr><th>Effect</th><th>Description</th><th>Ingredients</th></tr></thead>
<tbody id="effects-table-body">
{rows}</tbody>
</table>"##,
        search = escape(search),
        rows = effect_rows(entries),
    );
    page("Effects", &body)
}

fn ingredient_effect_table(ingredients: &[Ingredient]) -> String {
    if ingredients.is_empty() {
        return "<p>No ingredient produces this effect.</p>".to_string();
    }

    let rows: String = ingredients
        .iter()
        .map(|i| {
            format!(
                "<tr><td><a href=\"/ingredient/{}/\">{}</a></td><td>{}</td><td>{}</td></tr>\n",
                i.id,
                escape(&i.name),
                decimal(i.weight),
                i.value
            )
        })
        .collect();
    format!(
        "<table>\n<thead><tr><th>Ingredient</th><th>Weight</th><th>Value</th></tr></thead>\n<tbody>\n{rows}</tbody>\n</table>"
    )
}

/// Body of the effect page, also returned alone to htmx requests.
pub fn ingredients_for_effect_fragment(effect: &Effect, ingredients: &[Ingredient]) -> String {
    let description = effect
        .description
        .as_deref()
        .map(|d| format!("<p>{}</p>\n", escape(d)))
        .unwrap_or_default();
    format!(
        "<section id=\"effect-{}\">\n{description}{}\n</section>",
        effect.id,
        ingredient_effect_table(ingredients)
    )
}

pub fn ingredients_for_effect(effect: &Effect, ingredients: &[Ingredient]) -> Html<String> {
    page(
        &effect.name,
        &ingredients_for_effect_fragment(effect, ingredients),
    )
}

pub fn ingredients_modal(effect: &Effect, ingredients: &[Ingredient]) -> Html<String> {
    Html(format!(
        r#"<div class="modal" role="dialog" aria-label="{name}">
<header><h2>{label}</h2><button onclick="this.closest('.modal').remove()">Close</button></header>
{body}
</div>"#,
        name = escape(&effect.name),
        label = effect_label(effect),
        body = ingredients_for_effect_fragment(effect, ingredients),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn effect(name: &str, negative: bool) -> Effect {
        Effect {
            id: 4,
            name: name.into(),
            description: Some("Drains <health>".into()),
            icon: None,
            is_negative: negative,
        }
    }

    #[test]
    fn rows_link_to_modal_and_escape_description() {
        let rows = effect_rows(&[EffectWithIngredients {
            effect: effect("Damage Health", true),
            ingredients: Vec::new(),
        }]);
        assert!(rows.contains("hx-get=\"/effects/4/modal/\""));
        assert!(rows.contains("Drains &lt;health&gt;"));
        assert!(rows.contains("(negative)"));
    }

    #[test]
    fn empty_rows_say_so() {
        assert!(effect_rows(&[]).contains("No matching effects."));
    }
}
