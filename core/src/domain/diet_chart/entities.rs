use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    common::entities::app_errors::CoreError,
    diet_chart::lenient,
    profile::entities::{Dosha, UserProfile},
};

pub const DAYS_PER_WEEK: usize = 7;

const DAY_NAMES: [&str; DAYS_PER_WEEK] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// A day index within the weekly plan, always in `1..=7`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DayNumber(u8);

impl DayNumber {
    pub fn get(self) -> u8 {
        self.0
    }

    pub fn day_name(self) -> &'static str {
        DAY_NAMES[usize::from(self.0) - 1]
    }
}

impl TryFrom<i64> for DayNumber {
    type Error = CoreError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match u8::try_from(value) {
            Ok(day @ 1..=7) => Ok(DayNumber(day)),
            _ => Err(CoreError::InvalidDay(value)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DietChart {
    #[serde(default, deserialize_with = "lenient::object_list")]
    pub weekly_plan: Vec<DayPlan>,
    #[serde(default, deserialize_with = "lenient::text_list")]
    pub dosha_balancing_tips: Vec<String>,
    #[serde(default, deserialize_with = "lenient::text_list")]
    pub lifestyle_recommendations: Vec<String>,
    #[serde(default, deserialize_with = "lenient::object_list")]
    pub ayurvedic_supplements: Vec<Supplement>,
    #[serde(default, deserialize_with = "lenient::text_list")]
    pub important_reminders: Vec<String>,
    /// Attached by the service after validation; anything the provider sends here is dropped.
    #[serde(default, skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ChartMetadata>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DayPlan {
    #[serde(default, deserialize_with = "lenient::int")]
    pub day: i64,
    #[serde(default, deserialize_with = "lenient::text")]
    pub day_name: String,
    #[serde(default, deserialize_with = "lenient::object_or_default")]
    pub meals: Meals,
    #[serde(default, deserialize_with = "lenient::int")]
    pub total_calories: i64,
    #[serde(default, deserialize_with = "lenient::text")]
    pub water_intake: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub special_notes: String,
}

/// The seven fixed meal slots of a day, in serving order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Meals {
    #[serde(default, deserialize_with = "lenient::object_or_default")]
    pub early_morning: MealEntry,
    #[serde(default, deserialize_with = "lenient::object_or_default")]
    pub breakfast: MealEntry,
    #[serde(default, deserialize_with = "lenient::object_or_default")]
    pub mid_morning: MealEntry,
    #[serde(default, deserialize_with = "lenient::object_or_default")]
    pub lunch: MealEntry,
    #[serde(default, deserialize_with = "lenient::object_or_default")]
    pub evening_snack: MealEntry,
    #[serde(default, deserialize_with = "lenient::object_or_default")]
    pub dinner: MealEntry,
    #[serde(default, deserialize_with = "lenient::object_or_default")]
    pub before_bed: MealEntry,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MealEntry {
    #[serde(default, deserialize_with = "lenient::text")]
    pub time: String,
    /// Short food names; quantities belong in `description`.
    #[serde(default, deserialize_with = "lenient::text_list")]
    pub items: Vec<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient::int")]
    pub calories: i64,
    #[serde(default, deserialize_with = "lenient::text")]
    pub ayurvedic_benefit: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, ToSchema)]
pub struct Supplement {
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub benefit: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub timing: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChartMetadata {
    pub generated_at: DateTime<Utc>,
    pub user_name: String,
    pub dosha: Dosha,
    pub diet_type: String,
}

impl ChartMetadata {
    pub fn new(profile: &UserProfile) -> Self {
        Self {
            generated_at: Utc::now(),
            user_name: profile.name.clone(),
            dosha: profile.dosha,
            diet_type: profile.diet_type.clone(),
        }
    }
}
