//! Structural acceptance checks for generated charts.
//!
//! Only the top level and the first day are inspected. Later days and individual meals are
//! trusted as-is and read leniently; a malformed day 5 will not be caught here.

use serde_json::Value;
use tracing::warn;

use crate::domain::{
    common::entities::app_errors::CoreError,
    diet_chart::entities::{DAYS_PER_WEEK, DayNumber},
};

pub const REQUIRED_DAY_KEYS: [&str; 4] = ["day", "dayName", "meals", "totalCalories"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    pub day_count: usize,
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Check the minimal contract of a full chart. A wrong day count is only a warning.
pub fn validate_chart(candidate: &Value) -> Result<ValidationReport, CoreError> {
    let chart = candidate.as_object().ok_or_else(|| {
        CoreError::StructureError("diet chart must be a JSON object".to_string())
    })?;

    let weekly_plan = chart
        .get("weeklyPlan")
        .ok_or_else(|| {
            CoreError::StructureError("Missing required key in diet chart: weeklyPlan".to_string())
        })?
        .as_array()
        .ok_or_else(|| CoreError::StructureError("weeklyPlan must be a list".to_string()))?;

    if let Some(first_day) = weekly_plan.first() {
        check_day_keys(first_day, &REQUIRED_DAY_KEYS)?;
    }

    let mut warnings = Vec::new();
    if weekly_plan.len() != DAYS_PER_WEEK {
        warn!(
            expected = DAYS_PER_WEEK,
            actual = weekly_plan.len(),
            "generated chart has an unexpected number of days"
        );
        warnings.push(format!(
            "Expected {} days, got {}",
            DAYS_PER_WEEK,
            weekly_plan.len()
        ));
    }

    Ok(ValidationReport {
        day_count: weekly_plan.len(),
        warnings,
    })
}

/// Accept a standalone day, or dig one out of the shapes the provider tends to wrap it in:
/// a full chart or a single-key object such as `{"dayPlan": {...}}`.
///
/// From a full chart the entry numbered `requested` is taken, else the first one.
pub fn validate_day(candidate: Value, requested: DayNumber) -> Result<Value, CoreError> {
    let Value::Object(mut object) = candidate else {
        return Err(CoreError::StructureError(
            "day plan must be a JSON object".to_string(),
        ));
    };

    if object.contains_key("weeklyPlan") {
        validate_chart(&Value::Object(object.clone()))?;
        return match object.remove("weeklyPlan") {
            Some(Value::Array(mut days)) => {
                let index = days
                    .iter()
                    .position(|day| day_matches(day, requested))
                    .unwrap_or(0);
                if index < days.len() {
                    Ok(days.swap_remove(index))
                } else {
                    Err(CoreError::StructureError(
                        "weeklyPlan contains no days".to_string(),
                    ))
                }
            }
            _ => Err(CoreError::StructureError("weeklyPlan must be a list".to_string())),
        };
    }

    if object.contains_key("meals") {
        return Ok(Value::Object(object));
    }

    if object.len() == 1
        && let Some((_, inner)) = object.iter().next()
        && inner.get("meals").is_some()
    {
        return Ok(inner.clone());
    }

    Err(CoreError::StructureError(
        "Missing required key in day structure: meals".to_string(),
    ))
}

fn day_matches(day: &Value, requested: DayNumber) -> bool {
    let wanted = i64::from(requested.get());
    match day.get("day") {
        Some(Value::Number(n)) => n.as_i64() == Some(wanted),
        Some(Value::String(s)) => s.trim().parse::<i64>().ok() == Some(wanted),
        _ => false,
    }
}

fn check_day_keys(day: &Value, keys: &[&str]) -> Result<(), CoreError> {
    let day = day
        .as_object()
        .ok_or_else(|| CoreError::StructureError("day entry must be a JSON object".to_string()))?;

    match keys.iter().find(|key| !day.contains_key(**key)) {
        Some(missing) => Err(CoreError::StructureError(format!(
            "Missing required key in day structure: {missing}"
        ))),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn day(n: i64) -> Value {
        json!({ "day": n, "dayName": "Monday", "meals": {}, "totalCalories": 2000 })
    }

    fn wednesday() -> DayNumber {
        DayNumber::try_from(3_i64).expect("valid day")
    }

    fn chart(days: i64) -> Value {
        let days: Vec<Value> = (1..=days).map(day).collect();
        json!({ "weeklyPlan": days })
    }

    #[test]
    fn test_missing_weekly_plan_is_structure_error() {
        let err = validate_chart(&json!({ "doshaBalancingTips": [] })).expect_err("must fail");
        assert_eq!(
            err,
            CoreError::StructureError("Missing required key in diet chart: weeklyPlan".to_string())
        );
    }

    #[test]
    fn test_weekly_plan_must_be_a_list() {
        let err = validate_chart(&json!({ "weeklyPlan": { "day": 1 } })).expect_err("must fail");
        assert_eq!(err.code(), "structure_error");
    }

    #[test]
    fn test_non_object_chart_is_structure_error() {
        assert!(validate_chart(&json!([1, 2, 3])).is_err());
    }

    #[test]
    fn test_five_days_only_warns() {
        let report = validate_chart(&chart(5)).expect("five days is accepted");
        assert_eq!(report.day_count, 5);
        assert!(report.has_warnings());
        assert_eq!(report.warnings, vec!["Expected 7 days, got 5"]);
    }

    #[test]
    fn test_seven_days_has_no_warnings() {
        let report = validate_chart(&chart(7)).expect("valid chart");
        assert_eq!(report.day_count, 7);
        assert!(!report.has_warnings());
    }

    #[test]
    fn test_empty_weekly_plan_warns_without_day_checks() {
        let report = validate_chart(&json!({ "weeklyPlan": [] })).expect("empty list accepted");
        assert_eq!(report.day_count, 0);
        assert!(report.has_warnings());
    }

    #[test]
    fn test_first_day_missing_key_is_structure_error() {
        let err = validate_chart(&json!({
            "weeklyPlan": [{ "day": 1, "dayName": "Monday", "meals": {} }]
        }))
        .expect_err("missing totalCalories");
        assert_eq!(
            err,
            CoreError::StructureError(
                "Missing required key in day structure: totalCalories".to_string()
            )
        );
    }

    #[test]
    fn test_only_first_day_is_checked() {
        let report = validate_chart(&json!({ "weeklyPlan": [day(1), { "day": 2 }] }))
            .expect("later days are not inspected");
        assert_eq!(report.day_count, 2);
    }

    #[test]
    fn test_validate_day_accepts_standalone_day() {
        let value = validate_day(json!({ "meals": { "lunch": {} } }), wednesday()).expect("standalone day");
        assert!(value.get("meals").is_some());
    }

    #[test]
    fn test_validate_day_unwraps_chart_and_single_key_wrapper() {
        let from_chart = validate_day(chart(1), wednesday()).expect("chart wrapper");
        assert_eq!(from_chart["day"], 1);

        let from_wrapper = validate_day(json!({ "dayPlan": { "day": 4, "meals": {} } }), wednesday())
            .expect("wrapper");
        assert_eq!(from_wrapper["day"], 4);
    }

    #[test]
    fn test_validate_day_picks_requested_entry_from_chart() {
        let picked = validate_day(chart(7), wednesday()).expect("full week");
        assert_eq!(picked["day"], 3);

        let mut week = chart(7);
        week["weeklyPlan"][2]["day"] = json!("3");
        week["weeklyPlan"][2]["dayName"] = json!("Midweek");
        let picked = validate_day(week, wednesday()).expect("string day number");
        assert_eq!(picked["dayName"], "Midweek");
    }

    #[test]
    fn test_validate_day_rejects_shapes_without_meals() {
        assert!(validate_day(json!({ "day": 1 }), wednesday()).is_err());
        assert!(validate_day(json!("day 1"), wednesday()).is_err());
        assert!(validate_day(json!({ "weeklyPlan": [] }), wednesday()).is_err());
    }
}
