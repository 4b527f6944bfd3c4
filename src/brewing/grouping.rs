use std::collections::HashSet;

use crate::model::{Effect, Ingredient};

#[derive(Debug, Clone, PartialEq)]
pub struct IngredientChoice {
    pub ingredient: Ingredient,
    /// Already offered under an earlier effect group.
    pub disabled: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IngredientGroup {
    pub effect: Effect,
    pub choices: Vec<IngredientChoice>,
}

/// Turns `(effect, ingredients)` pairs into selection groups. Group order and
/// ingredient order are preserved; an ingredient seen in an earlier group is
/// still listed but marked disabled.
pub fn group_ingredients(pairs: Vec<(Effect, Vec<Ingredient>)>) -> Vec<IngredientGroup> {
    let mut seen: HashSet<i32> = HashSet::new();

    pairs
        .into_iter()
        .map(|(effect, ingredients)| {
            let choices: Vec<IngredientChoice> = ingredients
                .into_iter()
                .map(|ingredient| IngredientChoice {
                    disabled: seen.contains(&ingredient.id),
                    ingredient,
                })
                .collect();
            seen.extend(choices.iter().map(|c| c.ingredient.id));

            IngredientGroup { effect, choices }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn effect(id: i32, name: &str) -> Effect {
        Effect {
            id,
            name: name.into(),
            description: None,
            icon: None,
            is_negative: false,
        }
    }

    fn ingredient(id: i32, name: &str) -> Ingredient {
        Ingredient {
            id,
            name: name.into(),
            value: 1,
            weight: 0.1,
            image: None,
            notes: None,
            known_locations: None,
            favorite: false,
        }
    }

    fn flags(group: &IngredientGroup) -> Vec<(i32, bool)> {
        group
            .choices
            .iter()
            .map(|c| (c.ingredient.id, c.disabled))
            .collect()
    }

    #[test]
    fn later_groups_disable_repeated_ingredients() {
        let groups = group_ingredients(vec![
            (
                effect(1, "Fortify Health"),
                vec![ingredient(1, "Ash Salts"), ingredient(2, "Bonemeal")],
            ),
            (
                effect(2, "Restore Magicka"),
                vec![ingredient(2, "Bonemeal"), ingredient(3, "Comberry")],
            ),
            (
                effect(3, "Night-Eye"),
                vec![ingredient(3, "Comberry"), ingredient(1, "Ash Salts")],
            ),
        ]);

        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0].effect.id, 1);
        assert_eq!(flags(&groups[0]), vec![(1, false), (2, false)]);
        assert_eq!(flags(&groups[1]), vec![(2, true), (3, false)]);
        assert_eq!(flags(&groups[2]), vec![(3, true), (1, true)]);
    }

    #[test]
    fn repeats_inside_one_group_stay_enabled() {
        let groups = group_ingredients(vec![(
            effect(1, "Burden"),
            vec![ingredient(4, "Dreugh Wax"), ingredient(4, "Dreugh Wax")],
        )]);

        assert_eq!(flags(&groups[0]), vec![(4, false), (4, false)]);
    }

    #[test]
    fn empty_input_yields_no_groups() {
        assert!(group_ingredients(Vec::new()).is_empty());
    }
}
