use crate::goals::TargetMacros;
use crate::nutrition::MacroEntry;

/// Gaps below this many percentage points are ignored.
pub const SIGNIFICANT_GAP_PCT: f32 = 3.0;

#[derive(Debug, Clone)]
pub struct GapAnalysis {
    pub carb_gap: f32,
    pub protein_gap: f32,
    pub fat_gap: f32,
    pub needs: Vec<String>,
}

impl GapAnalysis {
    /// True when no macro deviates enough to warrant a model call.
    pub fn is_balanced(&self) -> bool {
        self.needs.is_empty()
    }
}

/// Compares the current calorie-weighted percentages against a goal's target
/// ratios. `current[0]`/`[1]`/`[2]` are carbs/protein/fat, matching the wire
/// order of a macro snapshot.
pub fn analyze_gaps(current: &[MacroEntry; 3], target: &TargetMacros) -> GapAnalysis {
    let carb_gap = current[0].cal_percentage - target.carb;
    let protein_gap = current[1].cal_percentage - target.protein;
    let fat_gap = current[2].cal_percentage - target.fat;

    let mut needs = Vec::new();
    if carb_gap.abs() > SIGNIFICANT_GAP_PCT {
        needs.push(if carb_gap > 0.0 {
            format!("your carbs are {:.1}% over target", carb_gap)
        } else {
            format!("your carbs are {:.1}% under target", carb_gap.abs())
        });
    }
    if protein_gap.abs() > SIGNIFICANT_GAP_PCT {
        needs.push(if protein_gap < 0.0 {
            format!("your protein is {:.1}% under target", protein_gap.abs())
        } else {
            format!("your protein is {:.1}% over target", protein_gap)
        });
    }
    if fat_gap.abs() > SIGNIFICANT_GAP_PCT {
        needs.push(if fat_gap > 0.0 {
            format!("your fat is {:.1}% over target", fat_gap)
        } else {
            format!("your fat is {:.1}% under target", fat_gap.abs())
        });
    }

    GapAnalysis {
        carb_gap,
        protein_gap,
        fat_gap,
        needs,
    }
}

/// Analysis line for a day whose macros are already close to target.
pub fn balanced_analysis_text(day: &str, goal: &str, current: &[MacroEntry; 3]) -> String {
    format!(
        "Your {} macros are well-balanced for {}. Carbs {:.1}% / Protein {:.1}% / Fat {:.1}% are close to target.",
        day,
        goal,
        current[0].cal_percentage,
        current[1].cal_percentage,
        current[2].cal_percentage
    )
}

/// Analysis line summarizing current vs target plus the need statements.
pub fn gap_analysis_text(
    current: &[MacroEntry; 3],
    target: &TargetMacros,
    needs: &[String],
) -> String {
    format!(
        "Current macros (C:{:.1}% P:{:.1}% F:{:.1}%) vs target (C:{}% P:{}% F:{}%). Need to {}.",
        current[0].cal_percentage,
        current[1].cal_percentage,
        current[2].cal_percentage,
        target.carb,
        target.protein,
        target.fat,
        needs.join(" and ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(carb: f32, protein: f32, fat: f32) -> [MacroEntry; 3] {
        [
            MacroEntry {
                name: "Carbs".to_string(),
                value: 0.0,
                cal_percentage: carb,
            },
            MacroEntry {
                name: "Protein".to_string(),
                value: 0.0,
                cal_percentage: protein,
            },
            MacroEntry {
                name: "Fat".to_string(),
                value: 0.0,
                cal_percentage: fat,
            },
        ]
    }

    #[test]
    fn test_on_target_macros_need_nothing() {
        let target = TargetMacros {
            carb: 50.0,
            protein: 20.0,
            fat: 30.0,
        };
        let analysis = analyze_gaps(&snapshot(50.0, 20.0, 30.0), &target);
        assert!(analysis.is_balanced());
        assert!(analysis.needs.is_empty());
    }

    #[test]
    fn test_three_significant_gaps_produce_three_statements() {
        let target = TargetMacros {
            carb: 50.0,
            protein: 20.0,
            fat: 30.0,
        };
        let analysis = analyze_gaps(&snapshot(60.0, 15.0, 25.0), &target);
        assert_eq!(analysis.needs.len(), 3);
        assert_eq!(analysis.needs[0], "your carbs are 10.0% over target");
        assert_eq!(analysis.needs[1], "your protein is 5.0% under target");
        assert_eq!(analysis.needs[2], "your fat is 5.0% under target");
    }

    #[test]
    fn test_gap_at_threshold_is_not_significant() {
        let target = TargetMacros {
            carb: 50.0,
            protein: 20.0,
            fat: 30.0,
        };
        let analysis = analyze_gaps(&snapshot(53.0, 18.5, 28.5), &target);
        assert!(analysis.is_balanced());
    }

    #[test]
    fn test_gap_analysis_text_joins_needs() {
        let target = TargetMacros {
            carb: 50.0,
            protein: 20.0,
            fat: 30.0,
        };
        let snapshot = snapshot(60.0, 15.0, 25.0);
        let analysis = analyze_gaps(&snapshot, &target);
        let text = gap_analysis_text(&snapshot, &target, &analysis.needs);
        assert!(text.starts_with("Current macros (C:60.0% P:15.0% F:25.0%) vs target (C:50% P:20% F:30%)."));
        assert!(text.contains("your carbs are 10.0% over target and your protein is 5.0% under target"));
    }

    #[test]
    fn test_balanced_analysis_text_mentions_day_and_goal() {
        let text = balanced_analysis_text("Day 3", "muscleGain", &snapshot(50.0, 25.0, 25.0));
        assert!(text.starts_with("Your Day 3 macros are well-balanced for muscleGain."));
        assert!(text.contains("Carbs 50.0% / Protein 25.0% / Fat 25.0%"));
    }
}
