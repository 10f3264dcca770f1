pub mod fetch_service;
pub mod site_service;

pub use fetch_service::{FetchOptions, FetchService};
pub use site_service::SiteService;
