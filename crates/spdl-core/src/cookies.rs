//! Netscape cookie jar checks.
//!
//! The jar is handed to yt-dlp verbatim; we only make sure it exists and
//! warn early when it does not look like a `cookies.txt` export.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum CookieError {
    #[error("cookie file not found: {}", .0.display())]
    Missing(PathBuf),
    #[error("cannot read cookie file {}: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// What a quick scan of a cookie jar found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CookieJarInfo {
    /// First comment line is the `# Netscape HTTP Cookie File` banner.
    pub netscape_header: bool,
    /// Lines with the seven tab-separated cookie fields.
    pub entries: usize,
}

impl CookieJarInfo {
    pub fn looks_like_netscape(&self) -> bool {
        self.netscape_header || self.entries > 0
    }
}

/// Scans jar contents without validating individual cookie values.
pub fn inspect(contents: &str) -> CookieJarInfo {
    let mut info = CookieJarInfo::default();
    for line in contents.lines() {
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }
        // `#HttpOnly_` lines are cookies, not comments.
        if line.starts_with('#') && !line.starts_with("#HttpOnly_") {
            let comment = line.trim_start_matches('#').trim();
            if comment.eq_ignore_ascii_case("Netscape HTTP Cookie File")
                || comment.eq_ignore_ascii_case("HTTP Cookie File")
            {
                info.netscape_header = true;
            }
            continue;
        }
        if line.split('\t').count() == 7 {
            info.entries += 1;
        }
    }
    info
}

/// Checks that `path` is a readable cookie jar and logs a warning when its
/// contents do not look like Netscape format.
pub fn check_cookie_file(path: &Path) -> Result<CookieJarInfo, CookieError> {
    if !path.is_file() {
        return Err(CookieError::Missing(path.to_path_buf()));
    }
    let contents = fs::read_to_string(path).map_err(|source| CookieError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;
    let info = inspect(&contents);
    if !info.looks_like_netscape() {
        tracing::warn!(
            path = %path.display(),
            "cookie file does not look like Netscape format; yt-dlp may reject it"
        );
    } else {
        tracing::debug!(path = %path.display(), entries = info.entries, "cookie file ok");
    }
    Ok(info)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const JAR: &str = "# Netscape HTTP Cookie File\n\
        # This is a generated file! Do not edit.\n\
        \n\
        .sharepoint.com\tTRUE\t/\tTRUE\t0\tFedAuth\tabc\n\
        #HttpOnly_contoso.sharepoint.com\tFALSE\t/\tTRUE\t0\trtFa\txyz\n";

    #[test]
    fn inspect_counts_entries_and_header() {
        let info = inspect(JAR);
        assert!(info.netscape_header);
        assert_eq!(info.entries, 2);
        assert!(info.looks_like_netscape());
    }

    #[test]
    fn inspect_rejects_json_export() {
        let info = inspect(r#"[{"name":"FedAuth","value":"abc"}]"#);
        assert_eq!(info, CookieJarInfo::default());
        assert!(!info.looks_like_netscape());
    }

    #[test]
    fn inspect_handles_crlf() {
        let info = inspect(".x.com\tTRUE\t/\tFALSE\t0\ta\tb\r\n");
        assert_eq!(info.entries, 1);
        assert!(!info.netscape_header);
    }

    #[test]
    fn check_missing_file_errs() {
        let err = check_cookie_file(Path::new("/nonexistent/spdl/cookies.txt")).unwrap_err();
        assert!(matches!(err, CookieError::Missing(_)));
        assert!(err.to_string().contains("cookies.txt"));
    }

    #[test]
    fn check_reads_jar() {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(JAR.as_bytes()).unwrap();
        f.flush().unwrap();
        let info = check_cookie_file(f.path()).unwrap();
        assert_eq!(info.entries, 2);
    }

    #[test]
    fn check_unusual_jar_is_still_ok() {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(b"session=abc").unwrap();
        f.flush().unwrap();
        let info = check_cookie_file(f.path()).unwrap();
        assert!(!info.looks_like_netscape());
    }
}
