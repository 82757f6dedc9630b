use super::optimizer::OptimizeRequest;

/// Builds the optimization instruction sent to the model. Deterministic
/// given the request and need statements; the retry loop reuses the result
/// verbatim on every attempt.
pub fn build_prompt(request: &OptimizeRequest, needs: &[String]) -> String {
    let mut prompt = format!(
        "You are a nutrition expert. Give exactly 2 short meal adjustments.

Current: Carbs {:.1}% / Protein {:.1}% / Fat {:.1}%
Target: Carbs {}% / Protein {}% / Fat {}%
Need: {}

Meals:
- Breakfast: {}
- Lunch: {}
- Dinner: {}
",
        request.current_macros[0].cal_percentage,
        request.current_macros[1].cal_percentage,
        request.current_macros[2].cal_percentage,
        request.target_macros.carb,
        request.target_macros.protein,
        request.target_macros.fat,
        needs.join(", "),
        request.current_meals.breakfast.name,
        request.current_meals.lunch.name,
        request.current_meals.dinner.name,
    );

    if !request.allergens.is_empty() {
        prompt.push_str(&format!("Avoid: {}\n", request.allergens.join(", ")));
    }

    prompt.push_str(
        r#"
Rules:
- action: max 10 words (e.g. "Reduce banana by half (50g)")
- impact: numbers only (e.g. "-11g carbs, +5g protein")
- mealType: lowercase only

JSON only, no explanation:
{"suggestions":[{"mealType":"breakfast","action":"...","impact":"..."},{"mealType":"lunch","action":"...","impact":"..."}]}"#,
    );

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::goals::TargetMacros;
    use crate::nutrition::MacroEntry;
    use crate::optim::optimizer::{CurrentMeals, MealRef};

    fn sample_request(allergens: Vec<String>) -> OptimizeRequest {
        OptimizeRequest {
            day: "Day 4".to_string(),
            current_meals: CurrentMeals {
                breakfast: MealRef {
                    name: "Overnight Oats".to_string(),
                },
                lunch: MealRef {
                    name: "Chicken Caesar Salad".to_string(),
                },
                dinner: MealRef {
                    name: "Salmon Rice Bowl".to_string(),
                },
            },
            current_macros: [
                MacroEntry {
                    name: "Carbs".to_string(),
                    value: 180.0,
                    cal_percentage: 60.0,
                },
                MacroEntry {
                    name: "Protein".to_string(),
                    value: 45.0,
                    cal_percentage: 15.0,
                },
                MacroEntry {
                    name: "Fat".to_string(),
                    value: 33.0,
                    cal_percentage: 25.0,
                },
            ],
            target_macros: TargetMacros {
                carb: 50.0,
                protein: 20.0,
                fat: 30.0,
            },
            goal: "maintenance".to_string(),
            allergens,
            available_meals: None,
        }
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let request = sample_request(vec!["nuts".to_string()]);
        let needs = vec!["your carbs are 10.0% over target".to_string()];
        assert_eq!(build_prompt(&request, &needs), build_prompt(&request, &needs));
    }

    #[test]
    fn test_prompt_embeds_meals_needs_and_allergens() {
        let request = sample_request(vec!["nuts".to_string(), "dairy".to_string()]);
        let needs = vec![
            "your carbs are 10.0% over target".to_string(),
            "your protein is 5.0% under target".to_string(),
        ];
        let prompt = build_prompt(&request, &needs);

        assert!(prompt.contains("Current: Carbs 60.0% / Protein 15.0% / Fat 25.0%"));
        assert!(prompt.contains("Target: Carbs 50% / Protein 20% / Fat 30%"));
        assert!(prompt.contains("Need: your carbs are 10.0% over target, your protein is 5.0% under target"));
        assert!(prompt.contains("- Lunch: Chicken Caesar Salad"));
        assert!(prompt.contains("Avoid: nuts, dairy"));
        assert!(prompt.contains("JSON only, no explanation:"));
    }

    #[test]
    fn test_prompt_omits_avoid_line_without_allergens() {
        let prompt = build_prompt(&sample_request(Vec::new()), &[]);
        assert!(!prompt.contains("Avoid:"));
    }
}
