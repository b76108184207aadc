//! Search gateway: point-in-time queries that seed the presence set.

mod gateway;
mod http;

pub use gateway::SearchGateway;
pub use http::{HttpSearchGateway, SearchGatewayConfig};
