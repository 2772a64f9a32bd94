use crate::model::route::{QueryMap, RouteState, TaskType};

/// Decode a query string into an ordered mapping. Pairs without a value
/// decode to the empty string; undecodable percent-escapes are kept raw.
pub fn parse_query(query: &str) -> QueryMap {
    let mut map = QueryMap::new();
    for pair in query.split('&') {
        if pair.is_empty() {
            continue;
        }
        let (raw_key, raw_value) = pair.split_once('=').unwrap_or((pair, ""));
        let key = urlencoding::decode(raw_key)
            .map(|c| c.into_owned())
            .unwrap_or_else(|_| raw_key.to_string());
        let value = urlencoding::decode(raw_value)
            .map(|c| c.into_owned())
            .unwrap_or_else(|_| raw_value.to_string());
        map.insert(&key, &value);
    }
    map
}

/// Encode a mapping back into a query string, in insertion order.
pub fn encode_query(query: &QueryMap) -> String {
    query
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

impl RouteState {
    /// Parse a URL (path plus optional query string).
    ///
    /// The last path segment is the task id and the segment before it the
    /// type token (default `task`); leading segments such as an app prefix
    /// are preserved verbatim in `path`.
    pub fn parse(url: &str) -> RouteState {
        let (path, query) = match url.split_once('?') {
            Some((p, q)) => (p, parse_query(q)),
            None => (url, QueryMap::new()),
        };

        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let task_id = segments.last().copied().unwrap_or("").to_string();
        let task_type = if segments.len() >= 2 {
            TaskType::from_token(segments[segments.len() - 2])
        } else {
            TaskType::default()
        };

        RouteState {
            path: path.to_string(),
            task_type,
            task_id,
            query,
        }
    }

    /// Serialize back to a URL. The path is emitted verbatim; the query is
    /// re-encoded (and omitted entirely when empty).
    pub fn to_url(&self) -> String {
        if self.query.is_empty() {
            self.path.clone()
        } else {
            format!("{}?{}", self.path, encode_query(&self.query))
        }
    }

    /// Merge a query patch (`None` removes a key) and leave the path alone.
    pub fn update<'a, I>(&mut self, patch: I)
    where
        I: IntoIterator<Item = (&'a str, Option<&'a str>)>,
    {
        self.query.merge(patch);
    }
}
