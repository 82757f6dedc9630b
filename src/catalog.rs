use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;

use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Dinner,
}

impl MealSlot {
    pub const ALL: [MealSlot; 3] = [MealSlot::Breakfast, MealSlot::Lunch, MealSlot::Dinner];

    pub fn as_str(&self) -> &'static str {
        match self {
            MealSlot::Breakfast => "breakfast",
            MealSlot::Lunch => "lunch",
            MealSlot::Dinner => "dinner",
        }
    }
}

/// One catalog entry. Base quantities are grams (calories in kcal) at the
/// reference serving size; goal multipliers scale them at display time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: u32,
    pub name: String,
    pub category: MealSlot,
    pub base_calories: f32,
    pub base_carbs: f32,
    pub base_protein: f32,
    pub base_fat: f32,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub allergens: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CatalogDocument {
    recipes: Vec<Recipe>,
}

/// Loads the catalog document. Read once at startup; entries are immutable
/// afterwards.
pub async fn load_catalog(path: &Path) -> Result<Vec<Recipe>> {
    let raw = fs::read_to_string(path).await?;
    let document: CatalogDocument = serde_json::from_str(&raw)?;
    Ok(document.recipes)
}

pub fn filter_by_category(recipes: &[Recipe], category: MealSlot) -> Vec<Recipe> {
    recipes
        .iter()
        .filter(|recipe| recipe.category == category)
        .cloned()
        .collect()
}

/// Drops every recipe sharing at least one allergen with the avoided set.
/// Exclusion is total: a matching recipe is never partially substituted.
pub fn filter_allergens(recipes: &[Recipe], avoided: &[String]) -> Vec<Recipe> {
    if avoided.is_empty() {
        return recipes.to_vec();
    }
    recipes
        .iter()
        .filter(|recipe| {
            !recipe
                .allergens
                .iter()
                .any(|tag| avoided.iter().any(|a| a.eq_ignore_ascii_case(tag)))
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_recipe(id: u32, name: &str, category: MealSlot, allergens: &[&str]) -> Recipe {
        Recipe {
            id,
            name: name.to_string(),
            category,
            base_calories: 400.0,
            base_carbs: 45.0,
            base_protein: 25.0,
            base_fat: 12.0,
            ingredients: vec!["oats".to_string()],
            allergens: allergens.iter().map(|a| a.to_string()).collect(),
            image: None,
        }
    }

    #[test]
    fn test_catalog_document_parses_wire_names() {
        let raw = r#"{
            "recipes": [
                {
                    "id": 1,
                    "name": "Overnight Oats",
                    "category": "breakfast",
                    "baseCalories": 380,
                    "baseCarbs": 55,
                    "baseProtein": 14,
                    "baseFat": 9,
                    "ingredients": ["oats", "milk", "honey"],
                    "allergens": ["dairy", "gluten"],
                    "image": "/images/oats.jpg"
                }
            ]
        }"#;
        let document: CatalogDocument = serde_json::from_str(raw).unwrap();
        assert_eq!(document.recipes.len(), 1);
        let recipe = &document.recipes[0];
        assert_eq!(recipe.category, MealSlot::Breakfast);
        assert_eq!(recipe.base_calories, 380.0);
        assert_eq!(recipe.allergens, vec!["dairy", "gluten"]);
    }

    #[test]
    fn test_filter_by_category() {
        let recipes = vec![
            sample_recipe(1, "Oats", MealSlot::Breakfast, &[]),
            sample_recipe(2, "Salad", MealSlot::Lunch, &[]),
            sample_recipe(3, "Eggs", MealSlot::Breakfast, &["eggs"]),
        ];
        let breakfasts = filter_by_category(&recipes, MealSlot::Breakfast);
        assert_eq!(breakfasts.len(), 2);
        assert!(breakfasts.iter().all(|r| r.category == MealSlot::Breakfast));
    }

    #[test]
    fn test_allergen_filter_excludes_entirely() {
        let recipes = vec![
            sample_recipe(1, "Oats", MealSlot::Breakfast, &["gluten"]),
            sample_recipe(2, "Yogurt Bowl", MealSlot::Breakfast, &["dairy", "nuts"]),
            sample_recipe(3, "Fruit Plate", MealSlot::Breakfast, &[]),
        ];
        let kept = filter_allergens(&recipes, &["Nuts".to_string()]);
        assert_eq!(kept.len(), 2);
        assert!(kept.iter().all(|r| r.name != "Yogurt Bowl"));
    }

    #[test]
    fn test_empty_avoidance_keeps_everything() {
        let recipes = vec![sample_recipe(1, "Oats", MealSlot::Breakfast, &["gluten"])];
        assert_eq!(filter_allergens(&recipes, &[]).len(), 1);
    }
}
