//! Shayari site library: domain, HTTP adapter and outbound adapters.

pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
#[cfg(feature = "test-support")]
pub mod test_support;

pub use middleware::Trace;
