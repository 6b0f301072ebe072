pub mod schema;

pub use schema::{BackendConfig, ClassifierConfig, Config, GatewayConfig};
