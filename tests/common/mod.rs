#![allow(dead_code)]

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use feedhound::http::{HttpClient, HttpResponse};
use feedhound::FeedhoundResult;

pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

pub fn fixture(name: &str) -> Vec<u8> {
    std::fs::read(fixture_path(name)).unwrap()
}

/// In-memory web: fixed responses per URL, 404 for everything else.
#[derive(Default)]
pub struct FakeWeb {
    responses: HashMap<String, HttpResponse>,
    gets: Mutex<Vec<String>>,
    heads: Mutex<Vec<String>>,
}

impl FakeWeb {
    pub fn new() -> Self {
        Self::default()
    }

    fn with(mut self, url: &str, status: u16, content_type: &str, body: &[u8]) -> Self {
        self.responses.insert(
            url.to_string(),
            HttpResponse {
                status,
                url: url.to_string(),
                content_type: Some(content_type.to_string()),
                content_length: Some(body.len() as u64),
                body: body.to_vec(),
                ..HttpResponse::default()
            },
        );
        self
    }

    pub fn html(self, url: &str, body: &str) -> Self {
        self.with(url, 200, "text/html; charset=utf-8", body.as_bytes())
    }

    pub fn feed(self, url: &str, body: &[u8]) -> Self {
        self.with(url, 200, "application/rss+xml", body)
    }

    pub fn redirect(mut self, url: &str, to: &str) -> Self {
        self.responses.insert(
            url.to_string(),
            HttpResponse {
                status: 301,
                url: url.to_string(),
                location: Some(to.to_string()),
                ..HttpResponse::default()
            },
        );
        self
    }

    pub fn get_count(&self, url: &str) -> usize {
        self.gets.lock().unwrap().iter().filter(|u| *u == url).count()
    }

    pub fn head_count(&self, url: &str) -> usize {
        self.heads.lock().unwrap().iter().filter(|u| *u == url).count()
    }

    pub fn total_gets(&self) -> usize {
        self.gets.lock().unwrap().len()
    }

    fn lookup(&self, url: &str) -> HttpResponse {
        self.responses.get(url).cloned().unwrap_or_else(|| HttpResponse {
            status: 404,
            url: url.to_string(),
            content_type: Some("text/html".to_string()),
            ..HttpResponse::default()
        })
    }
}

impl HttpClient for FakeWeb {
    fn get(&self, url: &str) -> FeedhoundResult<HttpResponse> {
        self.gets.lock().unwrap().push(url.to_string());
        let mut response = self.lookup(url);
        let mut hops = 0;
        while response.is_redirect() && hops < 10 {
            let target = response.location.clone().unwrap_or_default();
            response = self.lookup(&target);
            hops += 1;
        }
        Ok(response)
    }

    fn head(&self, url: &str) -> FeedhoundResult<HttpResponse> {
        self.heads.lock().unwrap().push(url.to_string());
        let mut response = self.lookup(url);
        response.body.clear();
        Ok(response)
    }
}
