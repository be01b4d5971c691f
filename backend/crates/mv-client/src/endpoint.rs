use crate::{FetchError, FetchResult};

use reqwest::Url;

/// One named downstream collection, e.g. `http://host:8080/v1/moviesinfo`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    resource: String,
    base_url: Url,
}

impl Endpoint {
    /// # Arguments
    /// * `resource` - Record name used in error messages (e.g. "MovieInfo")
    /// * `base_url` - Absolute http(s) collection URL
    #[track_caller]
    pub fn new(resource: &str, base_url: &str) -> FetchResult<Self> {
        let trimmed = base_url.trim_end_matches('/');
        let url = Url::parse(trimmed)
            .map_err(|e| FetchError::invalid_endpoint(base_url, e.to_string()))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(FetchError::invalid_endpoint(
                base_url,
                "scheme must be http or https",
            ));
        }

        Ok(Self {
            resource: resource.to_string(),
            base_url: url,
        })
    }

    pub fn resource(&self) -> &str {
        &self.resource
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `{base}/{key}` with the key percent-encoded as one path segment
    pub fn item_url(&self, key: &str) -> Url {
        self.with_segment(key)
    }

    pub fn stream_url(&self) -> Url {
        self.with_segment("stream")
    }

    /// `{base}?k=v&...`
    pub fn list_url(&self, query: &[(&str, &str)]) -> Url {
        let mut url = self.base_url.clone();
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        url
    }

    fn with_segment(&self, segment: &str) -> Url {
        let mut url = self.base_url.clone();
        // http(s) URLs always have a path.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(segment);
        }
        url
    }
}
