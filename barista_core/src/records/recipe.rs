use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::RecordError;

/// Drinks offered when editing a person's recipe.
pub const RECIPE_DRINKS: [&str; 9] = [
    "espresso",
    "ristretto",
    "lungo",
    "americano",
    "cappuccino",
    "latte",
    "flat white",
    "macchiato",
    "cortado",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MilkType {
    #[default]
    None,
    Whole,
    Skim,
    Oat,
    Almond,
    Soy,
}

impl MilkType {
    pub const ALL: [MilkType; 6] = [
        MilkType::None,
        MilkType::Whole,
        MilkType::Skim,
        MilkType::Oat,
        MilkType::Almond,
        MilkType::Soy,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MilkType::None => "none",
            MilkType::Whole => "whole",
            MilkType::Skim => "skim",
            MilkType::Oat => "oat",
            MilkType::Almond => "almond",
            MilkType::Soy => "soy",
        }
    }
}

impl core::str::FromStr for MilkType {
    type Err = RecordError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        MilkType::ALL
            .into_iter()
            .find(|m| m.as_str() == wanted)
            .ok_or(RecordError::UnknownMilk(wanted))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrinkRecipe {
    pub id: Uuid,
    pub drink: String,
    #[serde(default)]
    pub milk: MilkType,
    #[serde(default)]
    pub milk_amount_ml: u32,
    #[serde(default)]
    pub sugar_syrup: String,
    #[serde(default)]
    pub ice: String,
    #[serde(default)]
    pub notes: String,
}

impl DrinkRecipe {
    /// Plain espresso, no milk.
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            drink: RECIPE_DRINKS[0].to_string(),
            milk: MilkType::None,
            milk_amount_ml: 0,
            sugar_syrup: String::new(),
            ice: String::new(),
            notes: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub recipes: Vec<DrinkRecipe>,
}

impl Person {
    pub fn new(id: Uuid, name: &str) -> Result<Self, RecordError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RecordError::MissingField("name"));
        }
        Ok(Self {
            id,
            name: name.to_string(),
            recipes: Vec::new(),
        })
    }

    /// Replace the recipe with the same id, or append it. Returns true on replace.
    pub fn upsert_recipe(&mut self, recipe: DrinkRecipe) -> bool {
        if let Some(slot) = self.recipes.iter_mut().find(|r| r.id == recipe.id) {
            *slot = recipe;
            true
        } else {
            self.recipes.push(recipe);
            false
        }
    }

    pub fn remove_recipe(&mut self, recipe_id: Uuid) -> bool {
        let before = self.recipes.len();
        self.recipes.retain(|r| r.id != recipe_id);
        self.recipes.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn person_requires_a_name() {
        assert_eq!(
            Person::new(Uuid::new_v4(), "  "),
            Err(RecordError::MissingField("name"))
        );
        assert_eq!(Person::new(Uuid::new_v4(), " Dana ").unwrap().name, "Dana");
    }

    #[test]
    fn upsert_replaces_by_id() {
        let mut p = Person::new(Uuid::new_v4(), "Dana").unwrap();
        let mut r = DrinkRecipe::new(Uuid::new_v4());
        assert!(!p.upsert_recipe(r.clone()));
        r.milk = MilkType::Oat;
        r.milk_amount_ml = 120;
        assert!(p.upsert_recipe(r.clone()));
        assert_eq!(p.recipes, vec![r.clone()]);
        assert!(p.remove_recipe(r.id));
        assert!(!p.remove_recipe(r.id));
    }

    #[test]
    fn milk_parses_known_names_only() {
        assert_eq!("Oat".parse::<MilkType>().unwrap(), MilkType::Oat);
        assert!("goat".parse::<MilkType>().is_err());
    }
}
