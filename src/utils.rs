use std::env;
use std::path::Path;

use urlencoding::decode;

/// Normalize a user-supplied link map path.
///
/// Front ends hand us paths in a few shapes: plain paths typed on a
/// command line, relative paths, and percent-encoded `file://` URLs
/// from drag-and-drop. All collapse to an absolute filesystem path;
/// nonexistent files pass through unchanged so `analyze` can report
/// them as unreadable.
pub fn normalize_path(source_path: &str) -> String {
    let mut path_str = source_path.to_string();

    if let Some(uri) = path_str.strip_prefix("file://") {
        let decoded = decode(uri).unwrap_or_else(|_| uri.into());
        path_str = decoded.into_owned();
    }

    let path = Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        env::current_dir().unwrap_or_default().join(path)
    };

    // dunce resolves `.` and `..` without the platform quirks of
    // std::fs::canonicalize; fall back to the joined path when the file
    // does not exist yet.
    let canonical = dunce::canonicalize(&absolute).unwrap_or(absolute);
    canonical.to_string_lossy().into_owned()
}
