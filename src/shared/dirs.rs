use std::path::PathBuf;

const APP_DIR_NAME: &str = "jira-tasks";

/// Returns the user's home directory from the HOME environment variable.
pub fn home_dir() -> Option<PathBuf> {
    non_empty_env("HOME").map(PathBuf::from)
}

/// Returns the XDG cache directory (~/.cache or $XDG_CACHE_HOME).
pub fn cache_dir() -> Option<PathBuf> {
    xdg_dir("XDG_CACHE_HOME", ".cache")
}

/// Returns the XDG config directory (~/.config or $XDG_CONFIG_HOME).
pub fn config_dir() -> Option<PathBuf> {
    xdg_dir("XDG_CONFIG_HOME", ".config")
}

/// Directory holding config.yaml.
pub fn app_config_dir() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(APP_DIR_NAME))
}

/// Directory for the interactive viewer's log files.
pub fn log_dir() -> Option<PathBuf> {
    cache_dir().map(|dir| dir.join(APP_DIR_NAME).join("logs"))
}

/// Empty values are treated as unset per XDG Base Directory Specification.
fn xdg_dir(var: &str, home_fallback: &str) -> Option<PathBuf> {
    match non_empty_env(var) {
        Some(dir) => Some(PathBuf::from(dir)),
        None => home_dir().map(|home| home.join(home_fallback)),
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}
