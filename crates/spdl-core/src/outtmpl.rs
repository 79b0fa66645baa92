//! Output name templates for yt-dlp.
//!
//! A custom name without an extension gets `.%(ext)s` appended so the engine
//! picks the container extension after merging.

use std::path::{Path, PathBuf};

/// Template used when no custom name is given.
pub const DEFAULT_TEMPLATE: &str = "%(title).150B [%(id)s].%(ext)s";

/// Builds the `-o` template from an optional user-supplied name.
///
/// # Examples
///
/// - `output_template(None)` → `"%(title).150B [%(id)s].%(ext)s"`
/// - `output_template(Some("lecture 3"))` → `"lecture 3.%(ext)s"`
/// - `output_template(Some("lecture.mkv"))` → `"lecture.mkv"`
pub fn output_template(custom_name: Option<&str>) -> String {
    let name = match custom_name.map(str::trim) {
        Some(n) if !n.is_empty() => n,
        _ => return DEFAULT_TEMPLATE.to_string(),
    };

    let has_extension = Path::new(name)
        .file_name()
        .and_then(|f| f.to_str())
        .is_some_and(|f| f.contains('.'));
    if has_extension {
        name.to_string()
    } else {
        format!("{name}.%(ext)s")
    }
}

/// Joins a template under `output_dir` when one is configured.
pub fn template_in_dir(template: &str, output_dir: Option<&Path>) -> PathBuf {
    match output_dir {
        Some(dir) => dir.join(template),
        None => PathBuf::from(template),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_name_uses_default() {
        assert_eq!(output_template(None), DEFAULT_TEMPLATE);
        assert_eq!(output_template(Some("")), DEFAULT_TEMPLATE);
        assert_eq!(output_template(Some("   ")), DEFAULT_TEMPLATE);
    }

    #[test]
    fn name_without_extension_gets_ext_placeholder() {
        assert_eq!(output_template(Some("  all hands  ")), "all hands.%(ext)s");
        assert_eq!(output_template(Some("out/recording")), "out/recording.%(ext)s");
    }

    #[test]
    fn name_with_extension_is_kept() {
        assert_eq!(output_template(Some("meeting.mp4")), "meeting.mp4");
        assert_eq!(output_template(Some("out/meeting.mkv")), "out/meeting.mkv");
    }

    #[test]
    fn dot_in_directory_only_does_not_count() {
        assert_eq!(output_template(Some("v1.2/recording")), "v1.2/recording.%(ext)s");
    }

    #[test]
    fn template_joined_under_output_dir() {
        assert_eq!(
            template_in_dir("x.%(ext)s", Some(Path::new("/tmp/videos"))),
            PathBuf::from("/tmp/videos/x.%(ext)s")
        );
        assert_eq!(template_in_dir("x.%(ext)s", None), PathBuf::from("x.%(ext)s"));
    }
}
