// HTTP API controllers.
//
// Hash routes reuse the parameter names of the coordinate routes because the
// router allows only one parameter name per path position.

pub mod badge;
pub mod badge_specs;
pub mod controller;
pub mod metrics;
pub mod obfuscate;
pub mod probe;
pub mod resolver;

pub use badge::BadgeController;
pub use badge_specs::BadgeSpecsController;
pub use metrics::PrometheusMetricsController;
pub use obfuscate::ObfuscateController;
pub use probe::HealthcheckController;
pub use resolver::{Addressing, EntityResolver};
