/// Normalize a path string for textual prefix substitution.
///
/// Backslashes become `/` and trailing separators are dropped, except for a
/// bare filesystem root. Case is left untouched.
pub fn normalize_path(path: &str) -> String {
    let unified = path.replace('\\', "/");
    let trimmed = unified.trim_end_matches('/');
    if trimmed.is_empty() && unified.starts_with('/') {
        return "/".to_string();
    }
    trimmed.to_string()
}

/// Split an import request into its bare path and the `?query` suffix.
///
/// The suffix keeps its leading `?`; it is empty when there is no query.
pub fn split_query(request: &str) -> (&str, &str) {
    match request.find('?') {
        Some(idx) => request.split_at(idx),
        None => (request, ""),
    }
}

/// Replace the first occurrence of `from` in `text` with `to`.
///
/// An empty `from` leaves `text` unchanged.
pub fn substitute_first(text: &str, from: &str, to: &str) -> String {
    if from.is_empty() {
        return text.to_string();
    }
    text.replacen(from, to, 1)
}
