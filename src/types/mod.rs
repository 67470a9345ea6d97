pub mod domain;
pub mod retrieval;
pub mod routing;

pub use domain::Domain;
pub use retrieval::{RetrievalResult, RetrievalStatus};
pub use routing::RoutingDecision;
