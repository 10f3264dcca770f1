use reqwest::blocking::{Client, Response};
use reqwest::header::{ACCEPT, CONTENT_TYPE, LOCATION};
use reqwest::redirect::Policy;

use crate::config::Config;
use crate::errors::{FeedhoundError, FeedhoundResult};
use crate::http::traits::{HttpClient, HttpResponse};

const PROBE_ACCEPT: &str =
    "application/rss+xml, application/atom+xml, application/xml;q=0.9, text/xml;q=0.9, text/html;q=0.8, */*;q=0.5";
const GET_REDIRECT_LIMIT: usize = 10;

/// Blocking [`HttpClient`] backed by reqwest.
pub struct ReqwestClient {
    client: Client,
    probe_client: Client,
}

impl ReqwestClient {
    pub fn new(config: &Config) -> FeedhoundResult<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .connect_timeout(config.open_timeout)
            .timeout(config.read_timeout)
            .redirect(Policy::limited(GET_REDIRECT_LIMIT))
            .build()?;

        // Redirects on HEAD are followed by ContentTypeProbe so it can count hops.
        let probe_client = Client::builder()
            .user_agent(config.user_agent.clone())
            .connect_timeout(config.open_timeout)
            .timeout(config.read_timeout)
            .redirect(Policy::none())
            .build()?;

        Ok(Self {
            client,
            probe_client,
        })
    }

    fn snapshot(response: Response, with_body: bool) -> FeedhoundResult<HttpResponse> {
        let status = response.status().as_u16();
        let url = response.url().to_string();
        let headers = response.headers();
        let content_type = header_string(headers.get(CONTENT_TYPE));
        let location = header_string(headers.get(LOCATION));
        let content_length = response.content_length();

        let body = if with_body {
            response.bytes().map_err(map_transport)?.to_vec()
        } else {
            Vec::new()
        };

        Ok(HttpResponse {
            status,
            url,
            content_type,
            location,
            content_length,
            body,
        })
    }
}

fn header_string(value: Option<&reqwest::header::HeaderValue>) -> Option<String> {
    value
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
}

fn map_transport(err: reqwest::Error) -> FeedhoundError {
    if err.is_connect() {
        FeedhoundError::Connection(err.to_string())
    } else {
        FeedhoundError::Http(err)
    }
}

impl HttpClient for ReqwestClient {
    fn get(&self, url: &str) -> FeedhoundResult<HttpResponse> {
        let response = self.client.get(url).send().map_err(map_transport)?;
        Self::snapshot(response, true)
    }

    fn head(&self, url: &str) -> FeedhoundResult<HttpResponse> {
        let response = self
            .probe_client
            .head(url)
            .header(ACCEPT, PROBE_ACCEPT)
            .send()
            .map_err(map_transport)?;
        Self::snapshot(response, false)
    }
}
