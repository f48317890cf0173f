pub mod diet_chart;
pub mod health;
pub mod prakriti;
pub mod server;
