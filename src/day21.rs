use std::collections::BTreeMap;

use anyhow::{anyhow, bail, Result};
use log::debug;
use rustc_hash::FxHashSet;

struct Food<'a> {
    ingredients: Vec<&'a str>,
    allergens: Vec<&'a str>,
}

fn parse_food(line: &str) -> Result<Food<'_>> {
    let (ingredients, allergens) = match line.split_once(" (contains ") {
        Some((ingredients, rest)) => {
            let list = rest.strip_suffix(')').ok_or_else(|| anyhow!("unclosed allergen list in {:?}", line))?;
            (ingredients, list.split(", ").collect())
        },
        None => (line, vec![]),
    };
    let ingredients = ingredients.split_whitespace().collect::<Vec<_>>();
    if ingredients.is_empty() {bail!("no ingredients in {:?}", line)};
    Ok(Food {ingredients, allergens})
}

/// The ingredients that may hold each allergen: those present in every food listing it.
fn candidates<'a>(foods: &[Food<'a>]) -> BTreeMap<&'a str, FxHashSet<&'a str>> {
    let mut candidates: BTreeMap<&str, FxHashSet<&str>> = BTreeMap::new();
    for food in foods {
        let here = food.ingredients.iter().copied().collect::<FxHashSet<_>>();
        for &allergen in &food.allergens {
            candidates.entry(allergen)
                .and_modify(|set| set.retain(|ingredient| here.contains(ingredient)))
                .or_insert_with(|| here.clone());
        }
    }
    candidates
}

/// Pins each allergen to one ingredient by repeatedly taking the allergens left with one candidate.
fn assign<'a>(mut candidates: BTreeMap<&'a str, FxHashSet<&'a str>>) -> Result<BTreeMap<&'a str, &'a str>> {
    let mut assigned = BTreeMap::new();
    while !candidates.is_empty() {
        let pinned = candidates.iter().find(|(_, set)| set.len() == 1)
            .and_then(|(&allergen, set)| set.iter().next().map(|&ingredient| (allergen, ingredient)));
        let Some((allergen, ingredient)) = pinned else {
            bail!("cannot pin down allergens {:?}", candidates.keys().collect::<Vec<_>>());
        };
        candidates.remove(allergen);
        for set in candidates.values_mut() {set.remove(ingredient);}
        debug!("{} contains {}", ingredient, allergen);
        assigned.insert(allergen, ingredient);
    }
    Ok(assigned)
}

pub fn solve(part: u8, input: &str) -> Result<String> {
    let foods = input.lines().map(str::trim).filter(|line| !line.is_empty()).map(parse_food).collect::<Result<Vec<_>>>()?;
    let candidates = candidates(&foods);
    if part == 1 {
        let suspicious = candidates.values().flatten().copied().collect::<FxHashSet<_>>();
        let safe = foods.iter().flat_map(|food| &food.ingredients).filter(|ingredient| !suspicious.contains(*ingredient)).count();
        Ok(safe.to_string())
    } else {
        Ok(assign(candidates)?.into_values().collect::<Vec<_>>().join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "\
mxmxvkd kfcds sqjhc nhms (contains dairy, fish)
trh fvjkl sbzzf mxmxvkd (contains dairy)
sqjhc fvjkl (contains soy)
sqjhc mxmxvkd sbzzf (contains fish)
";

    #[test]
    fn example() {
        assert_eq!(solve(1, EXAMPLE).unwrap(), "5");
        assert_eq!(solve(2, EXAMPLE).unwrap(), "mxmxvkd,sqjhc,fvjkl");
    }

    #[test]
    fn ambiguous_allergens() {
        assert!(solve(2, "a b (contains x, y)\n").is_err());
        assert!(solve(1, "a b (contains x\n").is_err());
    }
}
