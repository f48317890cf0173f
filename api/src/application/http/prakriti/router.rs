use super::handlers::predict_dosha::{__path_predict_dosha, predict_dosha};
use crate::application::http::server::app_state::AppState;

use axum::{Router, routing::post};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(paths(predict_dosha))]
pub struct PrakritiApiDoc;

pub fn prakriti_routes(state: AppState) -> Router<AppState> {
    Router::new().route(
        &format!("{}/predict", state.args.server.root_path),
        post(predict_dosha),
    )
}
