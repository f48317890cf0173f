use crate::application::http::{
    diet_chart::router::DietChartApiDoc, health::router::HealthApiDoc,
    prakriti::router::PrakritiApiDoc,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(info(
    title = "AyurPulse API",
    description = "Ayurvedic diet chart generation and dosha classification"
))]
pub struct ApiDoc;

impl ApiDoc {
    /// Feature routes are mounted at the root, so their documents are merged rather than nested.
    pub fn merged() -> utoipa::openapi::OpenApi {
        let mut openapi = Self::openapi();
        openapi.merge(DietChartApiDoc::openapi());
        openapi.merge(PrakritiApiDoc::openapi());
        openapi.merge(HealthApiDoc::openapi());
        openapi
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_route_is_documented() {
        let openapi = ApiDoc::merged();
        for path in ["/generate-diet-chart", "/regenerate-day", "/predict", "/health"] {
            assert!(openapi.paths.paths.contains_key(path), "{path} missing");
        }
    }
}
