pub mod events;
pub mod health;
pub mod helpers;
pub mod stats;

pub use events::{EventsService, event_routes};
pub use health::{HealthService, health_routes};
pub use helpers::method_not_allowed;
pub use stats::{StatsService, stats_routes};
