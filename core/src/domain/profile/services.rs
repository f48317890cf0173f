use serde_json::Value;

use crate::domain::profile::{
    entities::{Dosha, UserProfile},
    value_objects::{DEFAULT_DIET_TYPE, DEFAULT_USER_NAME, IntakePayload, REQUIRED_INTAKE_FIELDS},
};

/// Map a loosely-typed intake payload into a complete profile.
///
/// Never fails: a missing, `null` or empty value is replaced by the field's default.
pub fn normalize_profile(payload: &IntakePayload) -> UserProfile {
    let dosha = first_text(payload, &["dominantDosha", "dosha"])
        .and_then(|raw| raw.parse::<Dosha>().ok())
        .unwrap_or_default();

    UserProfile {
        name: text_or(payload, "name", DEFAULT_USER_NAME),
        age: text_or(payload, "age", ""),
        gender: text_or(payload, "gender", ""),
        weight: text_or(payload, "weight", ""),
        height: text_or(payload, "height", ""),
        activity_level: text_or(payload, "activityLevel", ""),

        health_conditions: list_field(payload, "healthConditions"),
        allergies: list_field(payload, "allergies"),
        medications: text_or(payload, "medications", ""),

        dosha,

        diet_type: text_or(payload, "dietType", DEFAULT_DIET_TYPE),
        food_preferences: list_field(payload, "foodPreferences"),
        disliked_foods: list_field(payload, "dislikedFoods"),
        meal_timing: text_or(payload, "mealTiming", ""),
        cooking_time: text_or(payload, "cookingTime", ""),
        budget: text_or(payload, "budget", ""),

        health_goals: list_field(payload, "healthGoals"),
        weight_goal: text_or(payload, "weightGoal", ""),
        timeframe: text_or(payload, "timeframe", ""),
    }
}

/// Required intake fields absent from the raw payload, named by their primary key.
///
/// Runs on the raw payload because normalization would hide the omission behind defaults.
pub fn missing_required_fields(payload: &IntakePayload) -> Vec<String> {
    REQUIRED_INTAKE_FIELDS
        .iter()
        .filter(|aliases| first_text(payload, aliases).is_none())
        .map(|aliases| aliases[0].to_string())
        .collect()
}

fn text_or(payload: &IntakePayload, key: &str, default: &str) -> String {
    first_text(payload, &[key]).unwrap_or_else(|| default.to_string())
}

fn first_text(payload: &IntakePayload, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| payload.get(*key))
        .find_map(value_to_text)
}

fn value_to_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::Null => return None,
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Array(items) => items
            .iter()
            .filter_map(value_to_text)
            .collect::<Vec<_>>()
            .join(", "),
        Value::Object(_) => return None,
    };

    (!text.is_empty()).then_some(text)
}

fn list_field(payload: &IntakePayload, key: &str) -> Vec<String> {
    let raw: Vec<String> = match payload.get(key) {
        Some(Value::Array(items)) => items.iter().filter_map(value_to_text).collect(),
        Some(Value::String(s)) => s
            .split(',')
            .map(|part| part.trim().to_string())
            .filter(|part| !part.is_empty())
            .collect(),
        Some(other) => value_to_text(other).into_iter().collect(),
        None => Vec::new(),
    };

    let mut unique: Vec<String> = Vec::with_capacity(raw.len());
    for item in raw {
        if !unique.contains(&item) {
            unique.push(item);
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn payload(value: Value) -> IntakePayload {
        match value {
            Value::Object(map) => map,
            _ => panic!("test payload must be an object"),
        }
    }

    #[test]
    fn test_empty_payload_gets_every_default() {
        let profile = normalize_profile(&IntakePayload::new());

        assert_eq!(profile.name, "User");
        assert_eq!(profile.dosha, Dosha::Vata);
        assert_eq!(profile.diet_type, "vegetarian");
        assert_eq!(profile.age, "");
        assert_eq!(profile.medications, "");
        assert!(profile.allergies.is_empty());
        assert!(profile.health_goals.is_empty());
        assert!(profile.food_preferences.is_empty());
    }

    #[test]
    fn test_empty_and_null_values_fall_back_to_defaults() {
        let profile = normalize_profile(&payload(json!({
            "name": "",
            "dominantDosha": "",
            "dietType": null,
            "allergies": null,
            "healthGoals": "",
        })));

        assert_eq!(profile.name, "User");
        assert_eq!(profile.dosha, Dosha::Vata);
        assert_eq!(profile.diet_type, "vegetarian");
        assert!(profile.allergies.is_empty());
        assert!(profile.health_goals.is_empty());
    }

    #[test]
    fn test_unrecognized_dosha_defaults_to_vata() {
        let profile = normalize_profile(&payload(json!({ "dominantDosha": "Air" })));
        assert_eq!(profile.dosha, Dosha::Vata);
    }

    #[test]
    fn test_dosha_parsing_is_case_insensitive_and_accepts_alias() {
        let upper = normalize_profile(&payload(json!({ "dominantDosha": "PITTA" })));
        assert_eq!(upper.dosha, Dosha::Pitta);

        let alias = normalize_profile(&payload(json!({ "dosha": "kapha" })));
        assert_eq!(alias.dosha, Dosha::Kapha);

        let compound = normalize_profile(&payload(json!({ "dominantDosha": "Pitta-Kapha" })));
        assert_eq!(compound.dosha, Dosha::Pitta);
    }

    #[test]
    fn test_wrong_shapes_never_fail() {
        let profile = normalize_profile(&payload(json!({
            "name": { "first": "Priya" },
            "age": 28,
            "weight": 58.5,
            "allergies": [null, "Nuts", 3, "Nuts"],
            "dislikedFoods": "Mushrooms, Okra ,",
            "healthConditions": true,
            "medications": ["Metformin", "Vitamin D"],
        })));

        assert_eq!(profile.name, "User");
        assert_eq!(profile.age, "28");
        assert_eq!(profile.weight, "58.5");
        assert_eq!(profile.allergies, vec!["Nuts", "3"]);
        assert_eq!(profile.disliked_foods, vec!["Mushrooms", "Okra"]);
        assert_eq!(profile.health_conditions, vec!["true"]);
        assert_eq!(profile.medications, "Metformin, Vitamin D");
    }

    #[test]
    fn test_avoid_list_merges_allergies_and_dislikes() {
        let profile = normalize_profile(&payload(json!({
            "allergies": ["Nuts", "Dairy"],
            "dislikedFoods": ["Mushrooms", "nuts"],
        })));

        assert_eq!(profile.avoid_list(), vec!["Nuts", "Dairy", "Mushrooms"]);
    }

    #[test]
    fn test_missing_required_fields_checks_raw_payload() {
        let missing = missing_required_fields(&payload(json!({
            "dominantDosha": "Vata",
            "dietType": "  ",
        })));
        assert_eq!(missing, vec!["name", "dietType"]);

        let alias_ok = missing_required_fields(&payload(json!({
            "name": "Priya",
            "dosha": "Vata",
            "dietType": "vegan",
        })));
        assert!(alias_ok.is_empty());
    }
}
