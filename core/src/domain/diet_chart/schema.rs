use serde_json::{Value, json};

use crate::domain::profile::entities::Dosha;

/// One fully populated day, embedded in prompts as the shape the provider must imitate.
///
/// Item names carry no quantities and no parentheses; portions live in `description`.
pub fn sample_day(day: u8, day_name: &str, dosha: Dosha) -> Value {
    json!({
        "day": day,
        "dayName": day_name,
        "meals": {
            "earlyMorning": {
                "time": "6:00 AM",
                "items": ["Warm water with lemon", "Soaked almonds"],
                "description": "1 glass warm water with half a lemon, 5 soaked almonds",
                "calories": 150,
                "ayurvedicBenefit": format!("Cleanses the digestive tract and balances {dosha}")
            },
            "breakfast": {
                "time": "8:00 AM",
                "items": ["Oats porridge with dates", "Herbal tea"],
                "description": "1 cup oats cooked in milk with 2 chopped dates, 1 cup ginger tea",
                "calories": 400,
                "ayurvedicBenefit": "Warm and grounding, gives sustained energy"
            },
            "midMorning": {
                "time": "11:00 AM",
                "items": ["Seasonal fruit"],
                "description": "1 medium ripe papaya bowl",
                "calories": 150,
                "ayurvedicBenefit": "Light natural sugars before the main meal"
            },
            "lunch": {
                "time": "1:00 PM",
                "items": ["Moong dal", "Basmati rice", "Mixed vegetable curry", "Cucumber salad", "Buttermilk"],
                "description": "1 bowl dal, 1 cup rice, 1 bowl curry, 1 small plate salad, 1 glass buttermilk",
                "calories": 600,
                "ayurvedicBenefit": "Largest meal when digestive fire is strongest"
            },
            "eveningSnack": {
                "time": "5:00 PM",
                "items": ["Herbal tea", "Roasted chickpeas"],
                "description": "1 cup tulsi tea, 1 small bowl roasted chickpeas",
                "calories": 200,
                "ayurvedicBenefit": "Prevents evening hunger and steadies energy"
            },
            "dinner": {
                "time": "7:30 PM",
                "items": ["Khichdi", "Cucumber raita"],
                "description": "1.5 cups khichdi with 1 tsp ghee, 1 small bowl raita",
                "calories": 500,
                "ayurvedicBenefit": "Easy to digest, supports restful sleep"
            },
            "beforeBed": {
                "time": "9:30 PM",
                "items": ["Turmeric milk"],
                "description": "1 cup warm milk with half a tsp turmeric",
                "calories": 100,
                "ayurvedicBenefit": "Calms the mind and reduces inflammation"
            }
        },
        "totalCalories": 2100,
        "waterIntake": "2.5-3 liters through the day",
        "specialNotes": "Start with gentle yoga or pranayama in the morning"
    })
}

/// A full chart skeleton: one sample day plus every optional top-level array.
pub fn sample_chart(dosha: Dosha) -> Value {
    json!({
        "weeklyPlan": [sample_day(1, "Monday", dosha)],
        "doshaBalancingTips": [
            format!("Specific tip for {dosha} dosha 1"),
            format!("Specific tip for {dosha} dosha 2"),
            format!("Specific tip for {dosha} dosha 3")
        ],
        "lifestyleRecommendations": [
            "Wake up before sunrise",
            "Keep regular meal times to strengthen digestive fire"
        ],
        "ayurvedicSupplements": [
            {
                "name": "Triphala",
                "benefit": "Gentle detoxification and digestive support",
                "timing": "Before bed with warm water"
            }
        ],
        "importantReminders": [
            "Eat mindfully without distractions",
            "Avoid cold drinks with meals"
        ]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_day_has_all_meal_slots() {
        let day = sample_day(3, "Wednesday", Dosha::Kapha);
        let meals = day["meals"].as_object().expect("meals object");

        for slot in [
            "earlyMorning",
            "breakfast",
            "midMorning",
            "lunch",
            "eveningSnack",
            "dinner",
            "beforeBed",
        ] {
            assert!(meals.contains_key(slot), "missing {slot}");
        }
        assert_eq!(day["day"], 3);
        assert!(
            day["meals"]["earlyMorning"]["ayurvedicBenefit"]
                .as_str()
                .is_some_and(|s| s.contains("Kapha"))
        );
    }

    #[test]
    fn test_sample_chart_has_no_parentheses() {
        let rendered = sample_chart(Dosha::Vata).to_string();
        assert!(!rendered.contains('('));
        assert!(!rendered.contains(')'));
    }
}
