use std::path::{Component, Path, PathBuf};

use anyhow::{Result, bail};

pub const DEFAULT_LOGS_DIR: &str = "logs";
pub const DEFAULT_FILENAME_PATTERN: &str = "mqtt_messages_*.txt";
pub const DEFAULT_HOUR_OFFSET: i64 = 1;

const MAX_HOUR_OFFSET: i64 = 24;

/// Explicit run configuration for one export. Every pipeline entry point
/// takes this structure; nothing is read from globals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportConfig {
    pub logs_dir: PathBuf,
    pub filename_pattern: String,
    pub hour_offset: i64,
}

pub fn resolve_export_config(
    cwd: &Path,
    logs_dir: Option<&Path>,
    filename_pattern: Option<&str>,
    hour_offset: Option<i64>,
) -> Result<ExportConfig> {
    if !cwd.is_absolute() {
        bail!("cwd must be absolute: {}", cwd.display());
    }

    let logs_dir = match logs_dir {
        Some(path) => resolve_user_path(path, cwd),
        None => cwd.join(DEFAULT_LOGS_DIR),
    };

    let filename_pattern = filename_pattern.unwrap_or(DEFAULT_FILENAME_PATTERN);
    validate_pattern(filename_pattern)?;

    let hour_offset = hour_offset.unwrap_or(DEFAULT_HOUR_OFFSET);
    if hour_offset.abs() > MAX_HOUR_OFFSET {
        bail!("hour offset must be between -{MAX_HOUR_OFFSET} and {MAX_HOUR_OFFSET}: {hour_offset}");
    }

    Ok(ExportConfig {
        logs_dir: normalize_lexical(&logs_dir),
        filename_pattern: filename_pattern.to_string(),
        hour_offset,
    })
}

fn validate_pattern(pattern: &str) -> Result<()> {
    if pattern.trim().is_empty() {
        bail!("filename pattern must not be empty");
    }
    if pattern.matches('*').count() > 1 {
        bail!("filename pattern supports at most one `*`: {pattern}");
    }
    Ok(())
}

fn resolve_user_path(path: &Path, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

fn normalize_lexical(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() {
                    normalized.push(component.as_os_str());
                }
            }
            _ => normalized.push(component.as_os_str()),
        }
    }

    normalized
}

#[cfg(test)]
mod tests {
    use super::{DEFAULT_FILENAME_PATTERN, DEFAULT_HOUR_OFFSET, resolve_export_config};
    use std::path::Path;

    #[test]
    fn defaults_resolve_against_cwd() {
        let config = resolve_export_config(Path::new("/work/cooler"), None, None, None)
            .expect("defaults should resolve");

        assert_eq!(config.logs_dir, Path::new("/work/cooler/logs"));
        assert_eq!(config.filename_pattern, DEFAULT_FILENAME_PATTERN);
        assert_eq!(config.hour_offset, DEFAULT_HOUR_OFFSET);
    }

    #[test]
    fn relative_logs_dir_is_resolved_and_normalized() {
        let config = resolve_export_config(
            Path::new("/work/cooler"),
            Some(Path::new("./data/../captures")),
            None,
            None,
        )
        .expect("relative logs dir should resolve");

        assert_eq!(config.logs_dir, Path::new("/work/cooler/captures"));
    }

    #[test]
    fn absolute_logs_dir_is_kept() {
        let config = resolve_export_config(
            Path::new("/work/cooler"),
            Some(Path::new("/var/log/cooler")),
            None,
            None,
        )
        .expect("absolute logs dir should resolve");

        assert_eq!(config.logs_dir, Path::new("/var/log/cooler"));
    }

    #[test]
    fn rejects_relative_cwd() {
        let err = resolve_export_config(Path::new("work"), None, None, None)
            .expect_err("relative cwd must fail");
        assert!(err.to_string().contains("cwd must be absolute"));
    }

    #[test]
    fn rejects_empty_pattern() {
        let err = resolve_export_config(Path::new("/work"), None, Some("  "), None)
            .expect_err("empty pattern must fail");
        assert!(err.to_string().contains("must not be empty"));
    }

    #[test]
    fn rejects_multi_star_pattern() {
        let err = resolve_export_config(Path::new("/work"), None, Some("a*b*.txt"), None)
            .expect_err("multi-star pattern must fail");
        assert!(err.to_string().contains("at most one `*`"));
    }

    #[test]
    fn rejects_out_of_range_hour_offset() {
        let err = resolve_export_config(Path::new("/work"), None, None, Some(25))
            .expect_err("offset beyond a day must fail");
        assert!(err.to_string().contains("hour offset must be between"));
    }

    #[test]
    fn accepts_negative_hour_offset() {
        let config = resolve_export_config(Path::new("/work"), None, None, Some(-5))
            .expect("negative offset should resolve");
        assert_eq!(config.hour_offset, -5);
    }
}
