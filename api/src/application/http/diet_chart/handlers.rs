pub mod generate_diet_chart;
pub mod regenerate_day;
