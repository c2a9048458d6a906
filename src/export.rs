use std::path::PathBuf;

use crate::cache::{sanitize_file_name, write_atomic, CacheError, StatsCache};
use crate::hiscores::stats::PlayerStats;

/// Writes the three per-section CSV exports next to the JSON artifacts,
/// with the same atomic-replace discipline.
pub fn write_section_csvs(
    cache: &StatsCache,
    player: &str,
    stats: &PlayerStats,
) -> Result<(), CacheError> {
    let mut skills = String::from("skill,rank,level,experience\n");
    for (skill, record) in stats.skills.iter() {
        skills.push_str(&format!(
            "{},{},{},{}\n",
            skill.name(),
            record.rank,
            record.level,
            record.experience
        ));
    }
    write_csv(cache, player, "skills", &skills)?;

    let mut activities = String::from("activity,rank,score\n");
    for (name, record) in stats.activities.iter() {
        activities.push_str(&format!("{},{},{}\n", name, record.rank, record.score));
    }
    write_csv(cache, player, "activities", &activities)?;

    let mut bosses = String::from("boss,rank,kills\n");
    for (name, record) in stats.bosses.iter() {
        bosses.push_str(&format!("{},{},{}\n", name, record.rank, record.kills));
    }
    write_csv(cache, player, "bosses", &bosses)?;

    Ok(())
}

pub fn csv_path(cache: &StatsCache, player: &str, section: &str) -> PathBuf {
    cache
        .dir()
        .join(format!("{}_{}.csv", sanitize_file_name(player), section))
}

fn write_csv(
    cache: &StatsCache,
    player: &str,
    section: &str,
    content: &str,
) -> Result<(), CacheError> {
    let path = csv_path(cache, player, section);
    write_atomic(&path, content.as_bytes())?;
    tracing::info!("Wrote {} csv to {}", section, path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hiscores::stats::sample_body;
    use crate::tests::TempDir;
    use std::fs;

    #[test]
    fn exports_one_csv_per_section() {
        let tmp = TempDir::new("export_sections");
        let cache = StatsCache::new(tmp.path());
        let stats = PlayerStats::parse(&sample_body()).unwrap();

        write_section_csvs(&cache, "Apple", &stats).unwrap();

        let skills = fs::read_to_string(csv_path(&cache, "Apple", "skills")).unwrap();
        let mut lines = skills.lines();
        assert_eq!(lines.next(), Some("skill,rank,level,experience"));
        assert_eq!(lines.next(), Some("Overall,100,99,13034431"));
        assert_eq!(skills.lines().count(), 25);

        let activities = fs::read_to_string(csv_path(&cache, "Apple", "activities")).unwrap();
        assert!(activities.starts_with("activity,rank,score\n"));
        assert!(activities.contains("League Points,-1,0\n"));

        let bosses = fs::read_to_string(csv_path(&cache, "Apple", "bosses")).unwrap();
        assert!(bosses.starts_with("boss,rank,kills\n"));
        assert_eq!(bosses.lines().count(), 59);
    }
}
