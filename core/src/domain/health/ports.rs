use crate::domain::health::entities::ReadinessStatus;

pub trait HealthCheckService: Send + Sync {
    fn readiness(&self) -> ReadinessStatus;
}
