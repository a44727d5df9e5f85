//! Config serialization to TOML
//!
//! Single source of truth for config file format.

use super::Config;

impl Config {
    /// Render the config as a commented TOML file
    pub fn to_toml(&self) -> String {
        format!(
            r#"# user-card configuration

# Lookup URL template; {{id}} is replaced by the user id
api_url = "{api_url}"

# Request timeout for lookups (seconds)
request_timeout_secs = {timeout}

# Initial theme attribute: light, dark
theme = "{theme}"

# Fetches that settle after a newer one started:
#   overwrite - apply anyway, the last to settle wins
#   discard   - ignore everything but the latest fetch
stale_responses = "{stale}"

# Logging configuration (RUST_LOG env var overrides)
[logging]
level = "{log_level}"
# File logging (in addition to TUI buffer or stdout)
file_enabled = {log_file_enabled}
file_dir = "{log_file_dir}"
file_rotation = "{log_file_rotation}"  # hourly, daily, never
file_prefix = "{log_file_prefix}"
"#,
            api_url = self.api_url,
            timeout = self.request_timeout_secs,
            theme = self.theme.as_str(),
            stale = self.stale_responses.as_str(),
            log_level = self.logging.level,
            log_file_enabled = self.logging.file_enabled,
            log_file_dir = self.logging.file_dir.display(),
            log_file_rotation = self.logging.file_rotation.as_str(),
            log_file_prefix = self.logging.file_prefix,
        )
    }
}
