use std::env;
use std::path::PathBuf;

pub const DEFAULT_HISCORES_URL: &str =
    "https://secure.runescape.com/m=hiscore_oldschool/index_lite.ws";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_CACHE_DIR: &str = "./cache";

/// Explicit configuration for one pipeline run. Components take this at
/// construction so test instances can run against their own endpoint and
/// cache directory without touching process-wide state.
#[derive(Debug, Clone)]
pub struct Settings {
    pub hiscores_url: String,
    pub timeout_secs: u64,
    pub cache_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Settings {
        Settings {
            hiscores_url: DEFAULT_HISCORES_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            cache_dir: PathBuf::from(DEFAULT_CACHE_DIR),
        }
    }
}

impl Settings {
    /// Reads overrides from the environment (`.env` is loaded by the
    /// binary before this runs), falling back to the defaults above.
    pub fn from_env() -> Settings {
        let defaults = Settings::default();
        Settings {
            hiscores_url: env::var("HISCORES_URL").unwrap_or(defaults.hiscores_url),
            timeout_secs: env::var("HISCORES_TIMEOUT_SECS")
                .ok()
                .and_then(|value| value.parse().ok())
                .unwrap_or(defaults.timeout_secs),
            cache_dir: env::var("CACHE_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.cache_dir),
        }
    }
}
