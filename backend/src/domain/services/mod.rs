//! Domain services implementing the driving ports.

mod account_service;
mod post_service;

pub use account_service::AccountService;
pub use post_service::PostService;
