/// Returns `target` if it is a same-site absolute path, `/` otherwise.
///
/// Rejects protocol-relative (`//host`) and backslash (`/\host`) forms that
/// browsers resolve to another origin.
pub fn sanitize_redirect(target: Option<&str>) -> String {
    match target {
        Some(t)
            if t.starts_with('/')
                && !t.starts_with("//")
                && !t.starts_with("/\\")
                && !t.chars().any(char::is_control) =>
        {
            t.to_string()
        }
        _ => "/".to_string(),
    }
}
