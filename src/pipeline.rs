use thiserror::Error;
use tracing::info;

use crate::cache::{CacheError, StatsCache};
use crate::export;
use crate::hiscores::stats::{ParseError, PlayerStats};
use crate::hiscores::{HiscoresClient, HiscoresError};
use crate::settings::Settings;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("invalid player name {0:?}, must be 1-12 characters from [A-Za-z0-9 _-]")]
    InvalidName(String),
    #[error(transparent)]
    Hiscores(#[from] HiscoresError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Cache(#[from] CacheError),
}

pub fn validate_name(player: &str) -> bool {
    !player.is_empty()
        && player.len() <= 12
        && player
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == ' ' || c == '_' || c == '-')
}

/// Runs one fetch -> parse -> cache chain for a single player. The first
/// failing stage aborts the run and leaves any existing artifacts as they
/// were.
pub fn run(settings: &Settings, player: &str) -> Result<PlayerStats, PipelineError> {
    if !validate_name(player) {
        return Err(PipelineError::InvalidName(player.to_string()));
    }

    let client = HiscoresClient::new(settings)?;
    let raw = client.fetch_raw(player)?;
    let stats = PlayerStats::parse(&raw)?;

    let cache = StatsCache::new(&settings.cache_dir);
    cache.write_skills(&stats.skills)?;
    cache.write_complete(player, &stats)?;
    export::write_section_csvs(&cache, player, &stats)?;

    info!(
        "Cached stats for {} under {}",
        player,
        settings.cache_dir.display()
    );
    Ok(stats)
}
