use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
pub enum Dosha {
    #[default]
    Vata,
    Pitta,
    Kapha,
}

impl Dosha {
    pub fn as_str(&self) -> &'static str {
        match self {
            Dosha::Vata => "Vata",
            Dosha::Pitta => "Pitta",
            Dosha::Kapha => "Kapha",
        }
    }
}

impl fmt::Display for Dosha {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dosha {
    type Err = ();

    /// Case-insensitive; a compound constitution like "Vata-Pitta" yields its leading dosha.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        if lowered.starts_with("vata") {
            Ok(Dosha::Vata)
        } else if lowered.starts_with("pitta") {
            Ok(Dosha::Pitta)
        } else if lowered.starts_with("kapha") {
            Ok(Dosha::Kapha)
        } else {
            Err(())
        }
    }
}

/// Fully defaulted intake profile. Built once per request and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub name: String,
    pub age: String,
    pub gender: String,
    pub weight: String,
    pub height: String,
    pub activity_level: String,

    pub health_conditions: Vec<String>,
    pub allergies: Vec<String>,
    pub medications: String,

    pub dosha: Dosha,

    pub diet_type: String,
    pub food_preferences: Vec<String>,
    pub disliked_foods: Vec<String>,
    pub meal_timing: String,
    pub cooking_time: String,
    pub budget: String,

    pub health_goals: Vec<String>,
    pub weight_goal: String,
    pub timeframe: String,
}

impl UserProfile {
    /// Allergies and disliked foods, merged without duplicates. Everything here is a hard exclusion.
    pub fn avoid_list(&self) -> Vec<String> {
        let mut avoid: Vec<String> =
            Vec::with_capacity(self.allergies.len() + self.disliked_foods.len());
        for item in self.allergies.iter().chain(self.disliked_foods.iter()) {
            if !avoid.iter().any(|existing| existing.eq_ignore_ascii_case(item)) {
                avoid.push(item.clone());
            }
        }
        avoid
    }
}
