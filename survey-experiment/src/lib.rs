pub mod catalog;
pub mod cohort;
pub mod config;
pub mod query;
pub mod session;
pub mod timeline;


pub use catalog::{Catalog, CatalogError, sanitize_filename};
pub use cohort::Cohort;
pub use config::{ConfigError, SurveyConfig};
pub use query::QueryParams;
pub use session::{PhaseTimeline, SavePayload, SessionMetadata, SessionPlan};
pub use timeline::{FormKind, SessionBuilder, TimelineEntry};
