use std::borrow::Cow;
use std::path::Path;

/// Renders a path as a command-line argument that cannot be taken for a flag.
///
/// Tools like `cwebp` have no `--` separator, so a relative path starting with
/// '-' gets a "./" prefix. Absolute and ordinary relative paths pass through.
pub fn safe_path_arg(path: &Path) -> Cow<'_, str> {
    let s = path.to_string_lossy();
    if s.starts_with('-') {
        Cow::Owned(format!("./{}", s))
    } else {
        s
    }
}
