/// Reduce a request path to the form route patterns are written against.
///
/// Query and fragment are cut off and one trailing slash is dropped.
/// Returns `None` for anything that could name a route in a second spelling:
/// no leading `/`, empty segments (`//`), `.` or `..` segments, backslashes,
/// and percent-encoded separators or dots.
pub fn normalize(path: &str) -> Option<&str> {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    let path = &path[..end];

    let rest = path.strip_prefix('/')?;
    if path.contains('\\') || has_encoded_separator(path) {
        return None;
    }

    let trimmed = rest.strip_suffix('/').unwrap_or(rest);
    if !trimmed.is_empty() && trimmed.split('/').any(|s| matches!(s, "" | "." | "..")) {
        return None;
    }

    Some(&path[..trimmed.len() + 1])
}

fn has_encoded_separator(path: &str) -> bool {
    let lower = path.to_ascii_lowercase();
    ["%2e", "%2f", "%5c"].iter().any(|enc| lower.contains(enc))
}
