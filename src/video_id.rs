//! Video identifier extraction from watch page URLs

/// Extract the video id from a URL.
///
/// The `v` query parameter wins; otherwise `/live/<id>` and `/shorts/<id>`
/// paths are recognized. Returns `None` for anything else.
///
/// ```
/// use stampnote::video_id::from_url;
///
/// assert_eq!(from_url("https://www.youtube.com/watch?v=abc123&t=10"), Some("abc123".into()));
/// assert_eq!(from_url("https://www.youtube.com/shorts/xyz"), Some("xyz".into()));
/// assert_eq!(from_url("https://www.youtube.com/feed"), None);
/// ```
pub fn from_url(url: &str) -> Option<String> {
    let without_fragment = url.split('#').next().unwrap_or(url);
    let (before_query, query) = match without_fragment.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (without_fragment, None),
    };

    if let Some(v) = query.and_then(|q| query_param(q, "v")) {
        return Some(v);
    }

    let path = strip_origin(before_query);
    let mut segments = path.split('/').filter(|s| !s.is_empty());
    match (segments.next(), segments.next()) {
        (Some("live" | "shorts"), Some(id)) => Some(id.to_string()),
        _ => None,
    }
}

/// Resolve user input that is either a URL or a bare video id
pub fn from_url_or_id(input: &str) -> Option<String> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    if input.contains('/') || input.contains('?') {
        from_url(input)
    } else {
        Some(input.to_string())
    }
}

fn query_param(query: &str, name: &str) -> Option<String> {
    query
        .split('&')
        .filter_map(|pair| pair.split_once('=').or(Some((pair, ""))))
        .find(|(k, _)| *k == name)
        .map(|(_, v)| v.to_string())
        .filter(|v| !v.is_empty())
}

fn strip_origin(url: &str) -> &str {
    match url.find("://") {
        Some(idx) => {
            let rest = &url[idx + 3..];
            rest.find('/').map_or("", |slash| &rest[slash..])
        }
        None => url,
    }
}
