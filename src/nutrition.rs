use serde::{Deserialize, Deserializer, Serialize};

use crate::catalog::Recipe;
use crate::goals::Goal;
use crate::planner::DayPlan;

// Atwater factors.
pub const KCAL_PER_G_CARB: f32 = 4.0;
pub const KCAL_PER_G_PROTEIN: f32 = 4.0;
pub const KCAL_PER_G_FAT: f32 = 9.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Nutrition {
    pub calories: f32,
    pub carbs: f32,
    pub protein: f32,
    pub fat: f32,
}

/// One entry of a macro snapshot. `value` is grams, `cal_percentage` the
/// calorie-weighted share of the day, rounded to one decimal.
///
/// The reference client serializes percentages as one-decimal strings, so
/// deserialization accepts either a number or a numeric string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MacroEntry {
    pub name: String,
    pub value: f32,
    #[serde(deserialize_with = "number_or_string")]
    pub cal_percentage: f32,
}

fn number_or_string<'de, D>(deserializer: D) -> Result<f32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f32),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(value) => Ok(value),
        Raw::Text(text) => text.trim().parse::<f32>().map_err(serde::de::Error::custom),
    }
}

/// Base quantities scaled by the goal's serving multiplier, rounded per
/// quantity the way the reference client displays them.
pub fn scaled_nutrition(recipe: &Recipe, goal: Goal) -> Nutrition {
    let multiplier = goal.serving_multiplier();
    Nutrition {
        calories: (recipe.base_calories * multiplier).round(),
        carbs: (recipe.base_carbs * multiplier).round(),
        protein: (recipe.base_protein * multiplier).round(),
        fat: (recipe.base_fat * multiplier).round(),
    }
}

/// Day total across the three slots. Each meal is rounded before summing;
/// summing first would drift from what the client shows per meal.
pub fn daily_total(day: &DayPlan, goal: Goal) -> Nutrition {
    let mut total = Nutrition::default();
    for (_, recipe) in day.slots() {
        let scaled = scaled_nutrition(recipe, goal);
        total.calories += scaled.calories;
        total.carbs += scaled.carbs;
        total.protein += scaled.protein;
        total.fat += scaled.fat;
    }
    total
}

/// Calorie-weighted macro breakdown in wire order: carbs, protein, fat.
/// A zero-calorie day reports 0.0% for every macro.
pub fn macro_snapshot(total: &Nutrition) -> [MacroEntry; 3] {
    let carb_cal = total.carbs * KCAL_PER_G_CARB;
    let protein_cal = total.protein * KCAL_PER_G_PROTEIN;
    let fat_cal = total.fat * KCAL_PER_G_FAT;
    let total_cal = carb_cal + protein_cal + fat_cal;

    let percentage = |cal: f32| {
        if total_cal > 0.0 {
            round_one_decimal(cal / total_cal * 100.0)
        } else {
            0.0
        }
    };

    [
        MacroEntry {
            name: "Carbs".to_string(),
            value: total.carbs,
            cal_percentage: percentage(carb_cal),
        },
        MacroEntry {
            name: "Protein".to_string(),
            value: total.protein,
            cal_percentage: percentage(protein_cal),
        },
        MacroEntry {
            name: "Fat".to_string(),
            value: total.fat,
            cal_percentage: percentage(fat_cal),
        },
    ]
}

fn round_one_decimal(value: f32) -> f32 {
    (value * 10.0).round() / 10.0
}
