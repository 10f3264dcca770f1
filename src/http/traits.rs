use crate::errors::FeedhoundResult;

/// Response snapshot handed back by an [`HttpClient`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    /// URL the response was served from, after any redirects the client followed.
    pub url: String,
    pub content_type: Option<String>,
    pub location: Option<String>,
    pub content_length: Option<u64>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_redirect(&self) -> bool {
        (300..400).contains(&self.status)
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

#[cfg_attr(test, mockall::automock)]
pub trait HttpClient: Send + Sync {
    /// GET the URL, following redirects.
    fn get(&self, url: &str) -> FeedhoundResult<HttpResponse>;

    /// HEAD the URL without following redirects.
    fn head(&self, url: &str) -> FeedhoundResult<HttpResponse>;
}

impl<T: HttpClient + ?Sized> HttpClient for &T {
    fn get(&self, url: &str) -> FeedhoundResult<HttpResponse> {
        (**self).get(url)
    }

    fn head(&self, url: &str) -> FeedhoundResult<HttpResponse> {
        (**self).head(url)
    }
}
