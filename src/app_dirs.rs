use directories::ProjectDirs;
use std::path::PathBuf;

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    pub fn config_path() -> PathBuf {
        ProjectDirs::from("", "", "hyperpix")
            .map(|proj_dirs| proj_dirs.config_dir().join("config.json"))
            .unwrap_or_else(|| PathBuf::from("hyperpix_config.json"))
    }

    pub fn log_path() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            let state_dir = PathBuf::from(home)
                .join(".local")
                .join("state")
                .join("hyperpix");
            Some(state_dir.join("hyperpix.log"))
        } else {
            ProjectDirs::from("", "", "hyperpix")
                .map(|proj_dirs| proj_dirs.data_local_dir().join("hyperpix.log"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_path_is_json() {
        let path = AppDirs::config_path();
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("json"));
    }

    #[test]
    fn test_log_path_file_name() {
        if let Some(path) = AppDirs::log_path() {
            assert_eq!(
                path.file_name().and_then(|f| f.to_str()),
                Some("hyperpix.log")
            );
        }
    }
}
