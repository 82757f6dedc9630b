use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::catalog::{MealSlot, Recipe};
use crate::error::{AppError, Result};

pub const DAYS_PER_WEEK: usize = 7;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayPlan {
    pub breakfast: Recipe,
    pub lunch: Recipe,
    pub dinner: Recipe,
}

impl DayPlan {
    pub fn get(&self, slot: MealSlot) -> &Recipe {
        match slot {
            MealSlot::Breakfast => &self.breakfast,
            MealSlot::Lunch => &self.lunch,
            MealSlot::Dinner => &self.dinner,
        }
    }

    pub fn slots(&self) -> [(MealSlot, &Recipe); 3] {
        [
            (MealSlot::Breakfast, &self.breakfast),
            (MealSlot::Lunch, &self.lunch),
            (MealSlot::Dinner, &self.dinner),
        ]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekPlan {
    pub days: Vec<DayPlan>,
}

pub fn day_label(index: usize) -> String {
    format!("Day {}", index + 1)
}

/// Assigns every slot of every day a recipe of the matching category, picked
/// uniformly from the recipes not yet used for that slot this week. Once a
/// category's pool is exhausted the pick falls back to the full pool and
/// repeats are permitted.
///
/// The random source is explicit so callers can seed it for reproducible
/// plans; the default binary path seeds from entropy.
pub fn generate_week_plan<R: Rng + ?Sized>(catalog: &[Recipe], rng: &mut R) -> Result<WeekPlan> {
    let breakfasts = category_pool(catalog, MealSlot::Breakfast)?;
    let lunches = category_pool(catalog, MealSlot::Lunch)?;
    let dinners = category_pool(catalog, MealSlot::Dinner)?;

    let mut used_breakfast = HashSet::new();
    let mut used_lunch = HashSet::new();
    let mut used_dinner = HashSet::new();

    let mut days = Vec::with_capacity(DAYS_PER_WEEK);
    for _ in 0..DAYS_PER_WEEK {
        days.push(DayPlan {
            breakfast: pick_slot(&breakfasts, &mut used_breakfast, rng).clone(),
            lunch: pick_slot(&lunches, &mut used_lunch, rng).clone(),
            dinner: pick_slot(&dinners, &mut used_dinner, rng).clone(),
        });
    }

    Ok(WeekPlan { days })
}

fn category_pool<'a>(catalog: &'a [Recipe], slot: MealSlot) -> Result<Vec<&'a Recipe>> {
    let pool: Vec<&Recipe> = catalog
        .iter()
        .filter(|recipe| recipe.category == slot)
        .collect();
    if pool.is_empty() {
        return Err(AppError::EmptyCategory(slot.as_str()));
    }
    Ok(pool)
}

fn pick_slot<'a, R: Rng + ?Sized>(
    pool: &[&'a Recipe],
    used: &mut HashSet<u32>,
    rng: &mut R,
) -> &'a Recipe {
    let unused: Vec<&Recipe> = pool
        .iter()
        .copied()
        .filter(|recipe| !used.contains(&recipe.id))
        .collect();

    let chosen = if unused.is_empty() {
        pool[rng.gen_range(0..pool.len())]
    } else {
        unused[rng.gen_range(0..unused.len())]
    };
    used.insert(chosen.id);
    chosen
}
