use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Target share of daily calories per macro, in percent of total. Each goal's
/// ratios sum to 100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetMacros {
    pub carb: f32,
    pub protein: f32,
    pub fat: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "camelCase")]
#[value(rename_all = "camelCase")]
pub enum Goal {
    WeightLoss,
    Maintenance,
    ActiveMale,
    MuscleGain,
}

impl Goal {
    pub const ALL: [Goal; 4] = [
        Goal::WeightLoss,
        Goal::Maintenance,
        Goal::ActiveMale,
        Goal::MuscleGain,
    ];

    /// Serving-size multiplier applied to every base nutrition quantity.
    pub fn serving_multiplier(&self) -> f32 {
        match self {
            Goal::WeightLoss => 0.9,
            Goal::Maintenance => 1.0,
            Goal::ActiveMale => 1.25,
            Goal::MuscleGain => 1.35,
        }
    }

    pub fn target_macros(&self) -> TargetMacros {
        match self {
            Goal::WeightLoss => TargetMacros {
                carb: 40.0,
                protein: 30.0,
                fat: 30.0,
            },
            Goal::Maintenance => TargetMacros {
                carb: 50.0,
                protein: 20.0,
                fat: 30.0,
            },
            Goal::ActiveMale => TargetMacros {
                carb: 55.0,
                protein: 20.0,
                fat: 25.0,
            },
            Goal::MuscleGain => TargetMacros {
                carb: 50.0,
                protein: 25.0,
                fat: 25.0,
            },
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Goal::WeightLoss => "Weight Loss",
            Goal::Maintenance => "General Maintenance",
            Goal::ActiveMale => "Active Male",
            Goal::MuscleGain => "Muscle Gain / High Activity",
        }
    }

    /// The wire spelling used by the catalog and the HTTP API.
    pub fn as_wire_str(&self) -> &'static str {
        match self {
            Goal::WeightLoss => "weightLoss",
            Goal::Maintenance => "maintenance",
            Goal::ActiveMale => "activeMale",
            Goal::MuscleGain => "muscleGain",
        }
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_ratios_sum_to_100() {
        for goal in Goal::ALL {
            let t = goal.target_macros();
            let sum = t.carb + t.protein + t.fat;
            assert!(
                (sum - 100.0).abs() < f32::EPSILON,
                "{:?} ratios sum to {}",
                goal,
                sum
            );
        }
    }

    #[test]
    fn test_serving_multipliers() {
        assert_eq!(Goal::WeightLoss.serving_multiplier(), 0.9);
        assert_eq!(Goal::Maintenance.serving_multiplier(), 1.0);
        assert_eq!(Goal::ActiveMale.serving_multiplier(), 1.25);
        assert_eq!(Goal::MuscleGain.serving_multiplier(), 1.35);
    }

    #[test]
    fn test_wire_spelling_round_trips_through_serde() {
        for goal in Goal::ALL {
            let encoded = serde_json::to_string(&goal).unwrap();
            assert_eq!(encoded, format!("\"{}\"", goal.as_wire_str()));
            let decoded: Goal = serde_json::from_str(&encoded).unwrap();
            assert_eq!(decoded, goal);
        }
    }
}
