use regex::Regex;

/// One website to probe. Built once at startup and shared read-only with the
/// prober that owns it.
#[derive(Debug)]
pub struct Target {
    url: String,
    content_pattern: String,
    matcher: Result<Regex, regex::Error>,
}

impl Target {
    /// An invalid pattern does not reject the target; every probe of it is
    /// recorded as failed with the regex error as reason instead.
    pub fn new(url: &str, content_pattern: &str) -> Self {
        let matcher = Regex::new(content_pattern);
        if let Err(e) = &matcher {
            log::warn!("Content pattern for {url} does not compile, probes will fail: {e}");
        }

        Target {
            url: url.to_string(),
            content_pattern: content_pattern.to_string(),
            matcher,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn content_pattern(&self) -> &str {
        &self.content_pattern
    }

    /// Whether the pattern is found anywhere in `body`.
    pub fn content_matches(&self, body: &str) -> Result<bool, regex::Error> {
        match &self.matcher {
            Ok(re) => Ok(re.is_match(body)),
            Err(e) => Err(e.clone()),
        }
    }
}
