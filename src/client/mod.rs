pub mod cache;
pub mod payload;
pub mod response;
pub mod transport;

use crate::{annotator, CheckReport, Config, Misspelling, Result, ScribensError};
use cache::ResponseCache;
use payload::RequestOptions;
use std::path::PathBuf;
use transport::{HttpTransport, Transport};

/// Client for the Scribens text checking service.
pub struct ScribensClient<T = HttpTransport> {
    transport: T,
    endpoint: String,
    user_agent: String,
    char_limit: usize,
    options: RequestOptions,
    save_response: Option<PathBuf>,
    cache: Option<ResponseCache>,
}

impl ScribensClient<HttpTransport> {
    pub fn new(config: &Config) -> Result<Self> {
        let transport = HttpTransport::new(config.timeout())?;
        Ok(Self::with_transport(config, transport))
    }
}

impl<T: Transport> ScribensClient<T> {
    pub fn with_transport(config: &Config, transport: T) -> Self {
        let cache = if config.cache_enabled() {
            let dir = Config::cache_dir();
            if dir.is_none() {
                log::warn!("No cache directory available, responses will not be cached");
            }
            dir.map(ResponseCache::new)
        } else {
            None
        };

        Self {
            transport,
            endpoint: config.endpoint.clone(),
            user_agent: config.user_agent.clone(),
            char_limit: config.char_limit,
            options: RequestOptions::from(config),
            save_response: config.save_response.clone(),
            cache,
        }
    }

    /// Use `cache` instead of the one picked from the configuration
    pub fn with_cache(mut self, cache: ResponseCache) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn char_limit(&self) -> usize {
        self.char_limit
    }

    /// Check `text` and return it annotated with the service's corrections.
    ///
    /// Texts over the character limit go through the long-text path, which
    /// is not supported.
    pub fn spellcheck_text(&self, text: &str) -> Result<String> {
        Ok(self.spellcheck_report(text)?.annotated)
    }

    /// Same dispatch as [`Self::spellcheck_text`], keeping the misspellings
    pub fn spellcheck_report(&self, text: &str) -> Result<CheckReport> {
        if text.chars().count() <= self.char_limit {
            return self.check_report(text);
        }

        let annotated = self.check_long_text(text)?;
        Ok(CheckReport {
            original: text.to_string(),
            annotated,
            misspellings: Vec::new(),
        })
    }

    pub fn check_text(&self, text: &str) -> Result<String> {
        Ok(self.check_report(text)?.annotated)
    }

    /// Direct check of a text within the character limit
    pub fn check_report(&self, text: &str) -> Result<CheckReport> {
        let len = text.chars().count();
        if len > self.char_limit {
            return Err(ScribensError::TextTooLong {
                len,
                limit: self.char_limit,
            });
        }

        let text = text.trim();
        let misspellings = self.fetch_misspellings(text)?;
        log::info!("service reported {} misspellings", misspellings.len());

        let annotated = annotator::annotate(text, &misspellings)?;
        Ok(CheckReport {
            original: text.to_string(),
            annotated,
            misspellings,
        })
    }

    /// Check of a text over the character limit.
    ///
    /// Splitting the text into chunks and merging their results is not
    /// implemented: any text reaching this path is rejected.
    pub fn check_long_text(&self, text: &str) -> Result<String> {
        let len = text.chars().count();
        if len <= self.char_limit {
            return Err(ScribensError::TextTooShort {
                len,
                limit: self.char_limit,
            });
        }

        Err(ScribensError::UnsupportedOperation(format!(
            "checking texts longer than {} characters ({} given)",
            self.char_limit, len
        )))
    }

    /// Send `text` to the service and return the raw JSON response
    pub fn request_check(&self, text: &str) -> Result<String> {
        self.send(&payload::build(text, &self.options))
    }

    fn send(&self, form: &payload::Form) -> Result<String> {
        log::debug!("POST {}", self.endpoint);
        let body = self
            .transport
            .post_form(&self.endpoint, &self.user_agent, form)?;

        if let Some(path) = &self.save_response {
            cache::save_response(path, &body)?;
            log::info!("response saved to {}", path.display());
        }

        Ok(body)
    }

    /// Misspellings for `text`, from the cache when possible. Only responses
    /// that parse are stored.
    fn fetch_misspellings(&self, text: &str) -> Result<Vec<Misspelling>> {
        let form = payload::build(text, &self.options);

        if let Some(cache) = &self.cache {
            if let Some(body) = cache.get(&self.endpoint, &form)? {
                match response::parse_misspellings(&body) {
                    Ok(misspellings) => {
                        log::info!("using cached response from {}", cache.dir().display());
                        return Ok(misspellings);
                    }
                    Err(e) => {
                        log::warn!("discarding unreadable cached response: {}", e);
                        cache.remove(&self.endpoint, &form)?;
                    }
                }
            }
        }

        let body = self.send(&form)?;
        let misspellings = response::parse_misspellings(&body)?;

        if let Some(cache) = &self.cache {
            cache.put(&self.endpoint, &form, &body)?;
        }

        Ok(misspellings)
    }
}

/// Annotate `text` from a previously saved raw response, without a request
pub fn annotate_from_response(text: &str, json: &str) -> Result<CheckReport> {
    let text = text.trim();
    let misspellings = response::parse_misspellings(json)?;
    let annotated = annotator::annotate(text, &misspellings)?;

    Ok(CheckReport {
        original: text.to_string(),
        annotated,
        misspellings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use payload::Form;
    use std::cell::RefCell;

    const RESPONSE: &str = r#"{"SolutionCor": {"MapMotSolution": {
        "1": {"Start_Pos": 3, "End_Pos": 6, "IdPhrase": "p0",
              "vectSolution": [{"Left": "suis"}], "ExplicationSolution": "Conjugaison."},
        "2": {"Start_Pos": 7, "End_Pos": 14, "IdPhrase": "p0",
              "vectSolution": [{"Left": "Heureux"}], "ExplicationSolution": "Style."}
    }}}"#;

    const EMPTY: &str = r#"{"SolutionCor": {"MapMotSolution": {}}}"#;

    struct CannedTransport {
        body: Result<String>,
        requests: RefCell<Vec<Form>>,
    }

    impl CannedTransport {
        fn new(body: &str) -> Self {
            Self {
                body: Ok(body.to_string()),
                requests: RefCell::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                body: Err(ScribensError::RequestFailed("connection refused".to_string())),
                requests: RefCell::new(Vec::new()),
            }
        }
    }

    impl Transport for CannedTransport {
        fn post_form(&self, _url: &str, _user_agent: &str, form: &Form) -> Result<String> {
            self.requests.borrow_mut().push(form.clone());
            match &self.body {
                Ok(body) => Ok(body.clone()),
                Err(e) => Err(ScribensError::RequestFailed(e.to_string())),
            }
        }
    }

    fn client(transport: CannedTransport) -> ScribensClient<CannedTransport> {
        ScribensClient::with_transport(&Config::default(), transport)
    }

    #[test]
    fn test_spellcheck_annotates_trimmed_text() {
        let client = client(CannedTransport::new(RESPONSE));
        let annotated = client.spellcheck_text("  Je sui content\n").unwrap();

        assert_eq!(annotated, "Je sui {suis} content {heureux}");

        let requests = client.transport.requests.borrow();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].contains(&("texteHTML", "<p>Je sui content</p>".to_string())));
    }

    #[test]
    fn test_text_at_limit_is_checked_directly() {
        let client = client(CannedTransport::new(EMPTY));
        let text = "a".repeat(6000);

        assert_eq!(client.spellcheck_text(&text).unwrap(), text);
        assert_eq!(client.transport.requests.borrow().len(), 1);
    }

    #[test]
    fn test_text_over_limit_is_unsupported() {
        let client = client(CannedTransport::new(EMPTY));
        let text = "a".repeat(6001);

        let err = client.spellcheck_text(&text).unwrap_err();
        assert!(matches!(err, ScribensError::UnsupportedOperation(_)));
        assert!(client.transport.requests.borrow().is_empty());
    }

    #[test]
    fn test_limit_counts_characters_not_bytes() {
        let client = client(CannedTransport::new(EMPTY));
        let text = "é".repeat(6000);

        assert!(client.spellcheck_text(&text).is_ok());
    }

    #[test]
    fn test_each_path_guards_its_size() {
        let client = client(CannedTransport::new(EMPTY));

        assert!(matches!(
            client.check_text(&"a".repeat(6001)),
            Err(ScribensError::TextTooLong {
                len: 6001,
                limit: 6000
            })
        ));
        assert!(matches!(
            client.check_long_text("court"),
            Err(ScribensError::TextTooShort { len: 5, limit: 6000 })
        ));
    }

    #[test]
    fn test_transport_failure_is_request_failed() {
        let client = client(CannedTransport::failing());
        assert!(matches!(
            client.spellcheck_text("Bonjour"),
            Err(ScribensError::RequestFailed(_))
        ));
    }

    #[test]
    fn test_unexpected_body_is_parse_failure() {
        let client = client(CannedTransport::new(r#"{"error": "quota"}"#));
        assert!(matches!(
            client.spellcheck_text("Bonjour"),
            Err(ScribensError::ResponseParseFailed(_))
        ));
    }

    #[test]
    fn test_report_lists_misspellings() {
        let client = client(CannedTransport::new(RESPONSE));
        let report = client.check_report("Je sui content").unwrap();

        assert_eq!(report.original, "Je sui content");
        assert_eq!(report.misspellings.len(), 2);
        assert_eq!(report.misspellings[0].suggestion.as_deref(), Some("suis"));
    }

    #[test]
    fn test_cached_response_skips_the_request() {
        let dir = tempfile::tempdir().unwrap();
        let client = client(CannedTransport::new(RESPONSE))
            .with_cache(ResponseCache::new(dir.path()));

        let first = client.spellcheck_text("Je sui content").unwrap();
        let second = client.spellcheck_text("Je sui content").unwrap();

        assert_eq!(first, second);
        assert_eq!(client.transport.requests.borrow().len(), 1);
    }

    #[test]
    fn test_request_check_returns_raw_body() {
        let client = client(CannedTransport::new(r#"{"error": "quota"}"#));
        assert_eq!(client.request_check("Bonjour").unwrap(), r#"{"error": "quota"}"#);
    }

    #[test]
    fn test_unreadable_response_is_not_cached() {
        let dir = tempfile::tempdir().unwrap();

        let rejected = client(CannedTransport::new(r#"{"error": "quota"}"#))
            .with_cache(ResponseCache::new(dir.path()));
        assert!(matches!(
            rejected.spellcheck_text("Je sui content"),
            Err(ScribensError::ResponseParseFailed(_))
        ));

        let healthy = client(CannedTransport::new(RESPONSE))
            .with_cache(ResponseCache::new(dir.path()));
        let annotated = healthy.spellcheck_text("Je sui content").unwrap();

        assert_eq!(annotated, "Je sui {suis} content {heureux}");
        assert_eq!(healthy.transport.requests.borrow().len(), 1);
    }

    #[test]
    fn test_unreadable_cache_entry_is_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ResponseCache::new(dir.path());
        let form = payload::build("Je sui content", &RequestOptions::default());
        cache
            .put(&Config::default().endpoint, &form, "<html>erreur</html>")
            .unwrap();

        let client = client(CannedTransport::new(RESPONSE)).with_cache(cache);
        let annotated = client.spellcheck_text("Je sui content").unwrap();

        assert_eq!(annotated, "Je sui {suis} content {heureux}");
        assert_eq!(client.transport.requests.borrow().len(), 1);
    }

    #[test]
    fn test_changed_options_miss_the_cache() {
        let dir = tempfile::tempdir().unwrap();

        let first = client(CannedTransport::new(RESPONSE))
            .with_cache(ResponseCache::new(dir.path()));
        first.spellcheck_text("Je sui content").unwrap();

        let config = Config {
            options_cor: "RefOrth:1".to_string(),
            language: "en".to_string(),
            ..Default::default()
        };
        let second = ScribensClient::with_transport(&config, CannedTransport::new(EMPTY))
            .with_cache(ResponseCache::new(dir.path()));

        assert_eq!(second.spellcheck_text("Je sui content").unwrap(), "Je sui content");
        assert_eq!(second.transport.requests.borrow().len(), 1);
    }

    #[test]
    fn test_response_is_saved_when_configured() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("response.json");
        let config = Config {
            save_response: Some(path.clone()),
            ..Default::default()
        };
        let client = ScribensClient::with_transport(&config, CannedTransport::new(RESPONSE));

        client.spellcheck_text("Je sui content").unwrap();

        let saved = std::fs::read_to_string(&path).unwrap();
        assert!(saved.contains("MapMotSolution"));
    }

    #[test]
    fn test_annotate_from_saved_response() {
        let report = annotate_from_response("Je sui content\n", RESPONSE).unwrap();
        assert_eq!(report.annotated, "Je sui {suis} content {heureux}");
    }
}
