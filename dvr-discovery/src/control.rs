//! ContentDirectory control URL resolution.

use dvr_parser::services::device_description::content_directory_control_path;

/// Control path used when the description does not name one.
pub const FALLBACK_CONTROL_PATH: &str = "/ContentDirectory/control";

/// Resolve the absolute ContentDirectory control URL from a description.
///
/// * absolute `http://` / `https://` control URLs are returned verbatim
/// * relative ones are joined onto `http://{host}:{port}`
/// * a missing ContentDirectory block yields [`FALLBACK_CONTROL_PATH`] on the
///   same host and port
///
/// ```
/// use dvr_discovery::control::resolve_control_url;
///
/// assert_eq!(
///     resolve_control_url("<root/>", "10.0.0.2", 58888),
///     "http://10.0.0.2:58888/ContentDirectory/control"
/// );
/// ```
pub fn resolve_control_url(description: &str, host: &str, port: u16) -> String {
    match content_directory_control_path(description) {
        Some(path) if is_absolute(&path) => path,
        Some(path) => join(host, port, &path),
        None => join(host, port, FALLBACK_CONTROL_PATH),
    }
}

fn is_absolute(path: &str) -> bool {
    let lower = path.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

fn join(host: &str, port: u16, path: &str) -> String {
    if path.starts_with('/') {
        format!("http://{}:{}{}", host, port, path)
    } else {
        format!("http://{}:{}/{}", host, port, path)
    }
}
