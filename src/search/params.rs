//! URL query-state binding
//!
//! Tables mirror their search box and status tabs into `?search=...&status=...`.

use url::form_urlencoded;
use url::Url;

/// Status tab value meaning "no status filter"
const ALL_STATUSES: &str = "all";

/// Search box and status tab state as kept in the URL
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchParams {
    pub search: String,
    pub status: String,
}

impl SearchParams {
    pub fn new(search: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            search: search.into(),
            status: status.into(),
        }
    }

    /// Parse a query string, with or without the leading `?`
    ///
    /// Unknown keys are ignored; for repeated keys the last one wins.
    pub fn from_query_string(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut params = SearchParams::default();

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "search" => params.search = value.into_owned(),
                "status" => params.status = value.into_owned(),
                _ => {}
            }
        }

        params
    }

    /// Read the params from a full URL
    pub fn from_url(url: &Url) -> Self {
        Self::from_query_string(url.query().unwrap_or(""))
    }

    /// Status filter value, `None` for an empty or "all" tab
    pub fn status_filter(&self) -> Option<&str> {
        let status = self.status.trim();
        if status.is_empty() || status.eq_ignore_ascii_case(ALL_STATUSES) {
            None
        } else {
            Some(status)
        }
    }

    /// Encode the non-empty params, without a leading `?`
    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        if !self.search.is_empty() {
            serializer.append_pair("search", &self.search);
        }
        if !self.status.is_empty() {
            serializer.append_pair("status", &self.status);
        }
        serializer.finish()
    }

    /// Write the params into `url`, replacing its query
    pub fn apply_to(&self, url: &mut Url) {
        let query = self.to_query_string();
        url.set_query(if query.is_empty() { None } else { Some(query.as_str()) });
    }
}
