use crate::domain::profile::value_objects::IntakePayload;

#[derive(Debug, Clone)]
pub struct GenerateChartInput {
    pub user_data: IntakePayload,
}

#[derive(Debug, Clone)]
pub struct RegenerateDayInput {
    pub user_data: IntakePayload,
    /// Unchecked as received; the service rejects anything outside `1..=7`.
    pub day_number: i64,
}
