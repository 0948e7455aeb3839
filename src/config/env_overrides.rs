use super::Config;
use std::path::PathBuf;

impl Config {
    pub fn apply_env_overrides(&mut self) {
        if let Ok(secs) = std::env::var("SIDEFETCH_TIMEOUT_SECS")
            && let Ok(secs) = secs.parse::<u64>()
            && secs > 0
        {
            self.http.timeout_secs = secs;
        }

        if let Ok(secs) = std::env::var("SIDEFETCH_CONNECT_TIMEOUT_SECS")
            && let Ok(secs) = secs.parse::<u64>()
            && secs > 0
        {
            self.http.connect_timeout_secs = secs;
        }

        if let Ok(agent) = std::env::var("SIDEFETCH_USER_AGENT")
            && !agent.trim().is_empty()
        {
            self.http.user_agent = agent;
        }

        if let Ok(path) = std::env::var("SIDEFETCH_SETTINGS_PATH")
            && !path.is_empty()
        {
            self.settings_path = PathBuf::from(path);
        }
    }
}
