use super::handlers::generate_diet_chart::{__path_generate_diet_chart, generate_diet_chart};
use super::handlers::regenerate_day::{__path_regenerate_day, regenerate_day};
use crate::application::http::server::app_state::AppState;

use axum::{Router, routing::post};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(paths(generate_diet_chart, regenerate_day))]
pub struct DietChartApiDoc;

pub fn diet_chart_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            &format!("{}/generate-diet-chart", state.args.server.root_path),
            post(generate_diet_chart),
        )
        .route(
            &format!("{}/regenerate-day", state.args.server.root_path),
            post(regenerate_day),
        )
}
