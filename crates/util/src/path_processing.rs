use std::path::PathBuf;

use dirs_next::{config_dir, home_dir};

/// Directory name used under the platform configuration directory.
pub const APP_DIR_NAME: &str = "clitutor";

pub fn expand_tilde(path: &str) -> PathBuf {
    let p = path.trim();
    if p == "~" {
        return home_dir().unwrap_or_else(|| PathBuf::from("~"));
    }
    if let Some(rest) = p.strip_prefix("~/") {
        return home_dir().unwrap_or_else(|| PathBuf::from("~")).join(rest);
    }
    if let Some(rest) = p.strip_prefix("~\\") {
        // Windows-style
        return home_dir().unwrap_or_else(|| PathBuf::from("~")).join(rest);
    }
    PathBuf::from(p)
}

/// Resolve a file inside the application config directory, honoring an
/// environment variable override when it is set to a non-blank value.
///
/// Falls back to the current directory when the platform exposes no config
/// directory.
pub fn config_file_path(env_override: &str, file_name: &str) -> PathBuf {
    if let Ok(path) = std::env::var(env_override)
        && !path.trim().is_empty()
    {
        return expand_tilde(&path);
    }

    config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
        .join(file_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_home_prefix() {
        let Some(home) = home_dir() else {
            return;
        };
        assert_eq!(expand_tilde("~/notes/progress.json"), home.join("notes/progress.json"));
        assert_eq!(expand_tilde("  ~  "), home);
    }

    #[test]
    fn leaves_plain_paths_alone() {
        assert_eq!(expand_tilde("/tmp/progress.json"), PathBuf::from("/tmp/progress.json"));
        assert_eq!(expand_tilde("relative/~/x"), PathBuf::from("relative/~/x"));
    }

    #[test]
    fn env_override_wins() {
        temp_env::with_var("CLITUTOR_TEST_PATH", Some("/var/tmp/custom.json"), || {
            assert_eq!(
                config_file_path("CLITUTOR_TEST_PATH", "ignored.json"),
                PathBuf::from("/var/tmp/custom.json")
            );
        });
    }

    #[test]
    fn blank_override_falls_back_to_config_dir() {
        temp_env::with_var("CLITUTOR_TEST_PATH", Some("   "), || {
            let path = config_file_path("CLITUTOR_TEST_PATH", "progress.json");
            assert!(path.ends_with("clitutor/progress.json"), "unexpected path: {}", path.display());
        });
    }
}
