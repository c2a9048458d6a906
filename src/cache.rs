use std::ffi::OsString;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::{fs, io};

use serde::Serialize;
use thiserror::Error;

use crate::hiscores::stats::{ActivityStats, BossStats, PlayerStats, SkillStats};

const SKILL_STATS_FILE: &str = "skill_stats.json";

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("could not persist {path}: {source}")]
    Persistence {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("could not encode cache artifact: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Serialize)]
struct CompleteData<'a> {
    username: &'a str,
    skills: &'a SkillStats,
    activities: &'a ActivityStats,
    bosses: &'a BossStats,
}

/// Writes the per-player artifacts under one cache directory. The reader
/// on the other side is the web front end, so every write replaces its
/// file atomically and a half-written artifact is never visible.
pub struct StatsCache {
    dir: PathBuf,
}

impl StatsCache {
    pub fn new(dir: impl Into<PathBuf>) -> StatsCache {
        StatsCache { dir: dir.into() }
    }

    pub fn skill_stats_path(&self) -> PathBuf {
        self.dir.join(SKILL_STATS_FILE)
    }

    pub fn complete_data_path(&self, player: &str) -> PathBuf {
        self.dir
            .join(format!("{}_complete_data.json", sanitize_file_name(player)))
    }

    pub fn write_skills(&self, skills: &SkillStats) -> Result<PathBuf, CacheError> {
        let path = self.skill_stats_path();
        let encoded = serde_json::to_vec_pretty(skills)?;
        write_atomic(&path, &encoded)?;
        tracing::info!("Wrote skill stats to {}", path.display());
        Ok(path)
    }

    pub fn write_complete(&self, player: &str, stats: &PlayerStats) -> Result<PathBuf, CacheError> {
        let path = self.complete_data_path(player);
        let encoded = serde_json::to_vec_pretty(&CompleteData {
            username: player,
            skills: &stats.skills,
            activities: &stats.activities,
            bosses: &stats.bosses,
        })?;
        write_atomic(&path, &encoded)?;
        tracing::info!("Wrote complete data to {}", path.display());
        Ok(path)
    }

    pub fn read_skills(&self) -> Result<SkillStats, CacheError> {
        let path = self.skill_stats_path();
        let file = File::open(&path).map_err(|source| CacheError::Persistence {
            path: path.clone(),
            source,
        })?;
        let reader = BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }

    pub(crate) fn dir(&self) -> &Path {
        &self.dir
    }
}

/// Replaces non-alphanumeric characters (apart from space, `_`, `-`) so a
/// player name is safe to use inside a file name.
pub fn sanitize_file_name(player: &str) -> String {
    player
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == ' ' || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Writes to a `.tmp` sibling first and renames it into place, so a
/// concurrent reader sees either the old artifact or the new one.
pub(crate) fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), CacheError> {
    let mut tmp_name = OsString::from(path.as_os_str());
    tmp_name.push(".tmp");
    let tmp = PathBuf::from(tmp_name);

    fs::write(&tmp, bytes).map_err(|source| CacheError::Persistence {
        path: tmp.clone(),
        source,
    })?;
    fs::rename(&tmp, path).map_err(|source| CacheError::Persistence {
        path: path.to_path_buf(),
        source,
    })
}
