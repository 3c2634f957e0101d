use std::path::Path;

pub fn clean_path_str(s: &str) -> &str {
    #[cfg(windows)]
    {
        if let Some(stripped) = s.strip_prefix(r"\\?\") {
            return stripped;
        }
    }
    s
}

pub fn clean_path(path: &Path) -> String {
    let s = path.display().to_string();
    clean_path_str(&s).to_string()
}

/// Path of `path` relative to `base` using `/` separators, or an empty string
/// when `path` is `base` itself.
pub fn relative_slash_path(base: &Path, path: &Path) -> String {
    let Ok(stripped) = path.strip_prefix(base) else {
        return clean_path(path);
    };
    stripped
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}
