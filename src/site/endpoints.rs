//! URL construction for the three kinds of page the crawler reads

use url::{ParseError, Url};

/// Builds site URLs from a base URL such as `https://www.codechef.com`
#[derive(Debug, Clone)]
pub struct Endpoints {
    base: Url,
}

impl Endpoints {
    pub fn new(base_url: &str) -> Result<Self, ParseError> {
        Ok(Self {
            base: Url::parse(base_url)?,
        })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// `<base>/users/<username>`
    pub fn profile_url(&self, username: &str) -> Result<Url, ParseError> {
        self.with_segments(&["users", username])
    }

    /// `<base><history_path>?page=<page>`
    ///
    /// `history_path` may also be an absolute URL, in which case the base is ignored.
    pub fn history_url(&self, history_path: &str, page: u32) -> Result<Url, ParseError> {
        let mut url = match Url::parse(history_path) {
            Ok(absolute) => absolute,
            Err(ParseError::RelativeUrlWithoutBase) => self.base.join(history_path)?,
            Err(e) => return Err(e),
        };
        url.query_pairs_mut().append_pair("page", &page.to_string());
        Ok(url)
    }

    /// `<base>/viewplaintext/<submission_id>`
    pub fn source_url(&self, submission_id: &str) -> Result<Url, ParseError> {
        self.with_segments(&["viewplaintext", submission_id])
    }

    fn with_segments(&self, segments: &[&str]) -> Result<Url, ParseError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| ParseError::RelativeUrlWithCannotBeABaseBase)?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoints() -> Endpoints {
        Endpoints::new("https://www.codechef.com").unwrap()
    }

    #[test]
    fn test_profile_url() {
        let url = endpoints().profile_url("tourist").unwrap();
        assert_eq!(url.as_str(), "https://www.codechef.com/users/tourist");
    }

    #[test]
    fn test_history_url_adds_page_parameter() {
        let url = endpoints()
            .history_url("/status/FLOW001,tourist", 2)
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://www.codechef.com/status/FLOW001,tourist?page=2"
        );
    }

    #[test]
    fn test_history_url_accepts_absolute_path() {
        let url = endpoints()
            .history_url("https://mirror.example.com/status/TEST", 0)
            .unwrap();
        assert_eq!(url.as_str(), "https://mirror.example.com/status/TEST?page=0");
    }

    #[test]
    fn test_source_url() {
        let url = endpoints().source_url("1234567").unwrap();
        assert_eq!(url.as_str(), "https://www.codechef.com/viewplaintext/1234567");
    }

    #[test]
    fn test_base_with_sub_path() {
        let endpoints = Endpoints::new("http://127.0.0.1:8080/mirror/").unwrap();
        let url = endpoints.profile_url("alice").unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8080/mirror/users/alice");
    }

    #[test]
    fn test_invalid_base() {
        assert!(Endpoints::new("not a url").is_err());
    }
}
