pub mod probe;
pub mod reqwest_client;
pub mod traits;

pub use probe::{ContentKind, ContentTypeProbe, MAX_REDIRECT_HOPS};
pub use reqwest_client::ReqwestClient;
pub use traits::{HttpClient, HttpResponse};

#[cfg(test)]
pub use traits::MockHttpClient;
