use std::fmt;

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::hiscores::skill::{Skill, ACTIVITIES, BOSSES, UNRANKED};

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("expected {expected} hiscore lines but got {found}")]
    FormatMismatch { expected: usize, found: usize },
    #[error("could not parse hiscore line {index}: {content:?}")]
    MalformedLine { index: usize, content: String },
    #[error("{field} for {name} is out of range: {value}")]
    InvalidValue {
        name: String,
        field: &'static str,
        value: i64,
    },
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkillRecord {
    pub rank: i64,
    pub level: i64,
    pub experience: i64,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivityRecord {
    pub rank: i64,
    pub score: i64,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct BossRecord {
    pub rank: i64,
    pub kills: i64,
}

/// One record per skill, stored in `Skill::iter` order. Serializes as a
/// JSON object keyed by skill name, in that same order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillStats(Vec<SkillRecord>);

impl SkillStats {
    pub fn get(&self, skill: Skill) -> &SkillRecord {
        &self.0[skill as usize]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Skill, &SkillRecord)> {
        Skill::iter().copied().zip(self.0.iter())
    }
}

impl Serialize for SkillStats {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (skill, record) in self.iter() {
            map.serialize_entry(skill.name(), record)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for SkillStats {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct StatsVisitor;

        impl<'de> Visitor<'de> for StatsVisitor {
            type Value = SkillStats;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map from skill name to record")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<SkillStats, A::Error> {
                let mut records: Vec<Option<SkillRecord>> = vec![None; Skill::COUNT];
                while let Some((key, record)) = access.next_entry::<String, SkillRecord>()? {
                    let skill: Skill = key
                        .parse()
                        .map_err(|_| de::Error::custom(format!("unknown skill {:?}", key)))?;
                    if records[skill as usize].replace(record).is_some() {
                        return Err(de::Error::custom(format!("duplicate skill {}", skill)));
                    }
                }

                let mut stats = Vec::with_capacity(Skill::COUNT);
                for (skill, record) in Skill::iter().zip(records) {
                    match record {
                        Some(record) => stats.push(record),
                        None => return Err(de::Error::custom(format!("missing skill {}", skill))),
                    }
                }
                Ok(SkillStats(stats))
            }
        }

        deserializer.deserialize_map(StatsVisitor)
    }
}

/// One record per activity, in `ACTIVITIES` order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityStats(Vec<ActivityRecord>);

impl ActivityStats {
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &ActivityRecord)> {
        ACTIVITIES.iter().copied().zip(self.0.iter())
    }
}

impl Serialize for ActivityStats {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, record) in self.iter() {
            map.serialize_entry(name, record)?;
        }
        map.end()
    }
}

/// One record per boss, in `BOSSES` order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BossStats(Vec<BossRecord>);

impl BossStats {
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &BossRecord)> {
        BOSSES.iter().copied().zip(self.0.iter())
    }
}

impl Serialize for BossStats {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, record) in self.iter() {
            map.serialize_entry(name, record)?;
        }
        map.end()
    }
}

/// Everything one hiscores response holds for a single player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerStats {
    pub skills: SkillStats,
    pub activities: ActivityStats,
    pub bosses: BossStats,
}

impl PlayerStats {
    /// Parses the positional `text/plain` body: one line per skill, then
    /// one per activity, then one per boss.
    pub fn parse(raw: &str) -> Result<PlayerStats, ParseError> {
        let lines: Vec<&str> = raw
            .trim()
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        let expected = Skill::COUNT + ACTIVITIES.len() + BOSSES.len();
        if lines.len() != expected {
            return Err(ParseError::FormatMismatch {
                expected,
                found: lines.len(),
            });
        }

        let mut skills = Vec::with_capacity(Skill::COUNT);
        for (index, skill) in Skill::iter().enumerate() {
            let fields = parse_fields(index, lines[index], 3)?;
            skills.push(SkillRecord {
                rank: checked_rank(skill.name(), fields[0])?,
                level: match fields[1] {
                    UNRANKED => 1,
                    value => checked_counter(skill.name(), "level", value)?,
                },
                experience: match fields[2] {
                    UNRANKED => 0,
                    value => checked_counter(skill.name(), "experience", value)?,
                },
            });
        }

        let offset = Skill::COUNT;
        let mut activities = Vec::with_capacity(ACTIVITIES.len());
        for (i, name) in ACTIVITIES.iter().enumerate() {
            let index = offset + i;
            let fields = parse_fields(index, lines[index], 2)?;
            activities.push(ActivityRecord {
                rank: checked_rank(name, fields[0])?,
                score: match fields[1] {
                    UNRANKED => 0,
                    value => checked_counter(name, "score", value)?,
                },
            });
        }

        let offset = Skill::COUNT + ACTIVITIES.len();
        let mut bosses = Vec::with_capacity(BOSSES.len());
        for (i, name) in BOSSES.iter().enumerate() {
            let index = offset + i;
            let fields = parse_fields(index, lines[index], 2)?;
            bosses.push(BossRecord {
                rank: checked_rank(name, fields[0])?,
                kills: match fields[1] {
                    UNRANKED => 0,
                    value => checked_counter(name, "kills", value)?,
                },
            });
        }

        Ok(PlayerStats {
            skills: SkillStats(skills),
            activities: ActivityStats(activities),
            bosses: BossStats(bosses),
        })
    }
}

fn parse_fields(index: usize, line: &str, count: usize) -> Result<Vec<i64>, ParseError> {
    let malformed = || ParseError::MalformedLine {
        index,
        content: line.to_string(),
    };

    let fields: Vec<i64> = line
        .split(',')
        .map(|field| field.trim().parse::<i64>())
        .collect::<Result<_, _>>()
        .map_err(|_| malformed())?;

    if fields.len() != count {
        return Err(malformed());
    }
    Ok(fields)
}

fn checked_rank(name: &str, value: i64) -> Result<i64, ParseError> {
    if value < 0 && value != UNRANKED {
        return Err(ParseError::InvalidValue {
            name: name.to_string(),
            field: "rank",
            value,
        });
    }
    Ok(value)
}

fn checked_counter(name: &str, field: &'static str, value: i64) -> Result<i64, ParseError> {
    if value < 0 {
        return Err(ParseError::InvalidValue {
            name: name.to_string(),
            field,
            value,
        });
    }
    Ok(value)
}

#[cfg(test)]
pub(crate) fn sample_body() -> String {
    let mut lines = vec!["100,99,13034431".to_string()];
    for i in 1..Skill::COUNT {
        lines.push(format!("{},{},{}", 1000 + i, 80, 2000000 + i));
    }
    for i in 0..ACTIVITIES.len() {
        // every other activity unranked
        if i % 2 == 0 {
            lines.push("-1,-1".to_string());
        } else {
            lines.push(format!("{},{}", 500 + i, 40 + i));
        }
    }
    for i in 0..BOSSES.len() {
        lines.push(format!("{},{}", 9000 + i, 10 + i));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_wellformed_body() {
        let stats = PlayerStats::parse(&sample_body()).unwrap();

        let overall = stats.skills.get(Skill::Overall);
        assert_eq!(
            *overall,
            SkillRecord {
                rank: 100,
                level: 99,
                experience: 13034431,
            }
        );

        for (_, record) in stats.skills.iter() {
            assert!(record.level >= 0);
            assert!(record.experience >= 0);
        }
        assert_eq!(stats.activities.iter().count(), ACTIVITIES.len());
        assert_eq!(stats.bosses.iter().count(), BOSSES.len());
    }

    #[test]
    fn unranked_sentinels_are_normalized() {
        let mut lines: Vec<String> = sample_body().lines().map(str::to_string).collect();
        lines[3] = "-1,-1,-1".to_string();
        let stats = PlayerStats::parse(&lines.join("\n")).unwrap();

        let strength = stats.skills.get(Skill::Strength);
        assert_eq!(strength.rank, UNRANKED);
        assert_eq!(strength.level, 1);
        assert_eq!(strength.experience, 0);

        let (name, league_points) = stats.activities.iter().next().unwrap();
        assert_eq!(name, "League Points");
        assert_eq!(league_points.rank, UNRANKED);
        assert_eq!(league_points.score, 0);
    }

    #[test]
    fn missing_line_is_a_format_mismatch() {
        let body = sample_body();
        let truncated: Vec<&str> = body.lines().skip(1).collect();
        match PlayerStats::parse(&truncated.join("\n")) {
            Err(ParseError::FormatMismatch { expected, found }) => {
                assert_eq!(expected, found + 1);
            }
            other => panic!("expected format mismatch, got {:?}", other),
        }
    }

    #[test]
    fn garbage_field_is_a_malformed_line() {
        let mut lines: Vec<String> = sample_body().lines().map(str::to_string).collect();
        lines[0] = "abc,1,2".to_string();
        match PlayerStats::parse(&lines.join("\n")) {
            Err(ParseError::MalformedLine { index, content }) => {
                assert_eq!(index, 0);
                assert_eq!(content, "abc,1,2");
            }
            other => panic!("expected malformed line, got {:?}", other),
        }
    }

    #[test]
    fn wrong_field_count_is_a_malformed_line() {
        let mut lines: Vec<String> = sample_body().lines().map(str::to_string).collect();
        lines[5] = "1,2".to_string();
        assert!(matches!(
            PlayerStats::parse(&lines.join("\n")),
            Err(ParseError::MalformedLine { index: 5, .. })
        ));
    }

    #[test]
    fn negative_level_is_an_invalid_value() {
        let mut lines: Vec<String> = sample_body().lines().map(str::to_string).collect();
        lines[1] = "1000,-5,123".to_string();
        match PlayerStats::parse(&lines.join("\n")) {
            Err(ParseError::InvalidValue { name, field, value }) => {
                assert_eq!(name, "Attack");
                assert_eq!(field, "level");
                assert_eq!(value, -5);
            }
            other => panic!("expected invalid value, got {:?}", other),
        }
    }

    #[test]
    fn skill_stats_round_trip_through_json() {
        let stats = PlayerStats::parse(&sample_body()).unwrap();
        let encoded = serde_json::to_string_pretty(&stats.skills).unwrap();
        let decoded: SkillStats = serde_json::from_str(&encoded).unwrap();
        assert_eq!(stats.skills, decoded);
    }

    #[test]
    fn skill_stats_serialize_in_hiscores_order() {
        let stats = PlayerStats::parse(&sample_body()).unwrap();
        let encoded = serde_json::to_string(&stats.skills).unwrap();

        let mut last = 0;
        for skill in Skill::iter() {
            let key = format!("{:?}", skill.name());
            let position = encoded.find(&key).unwrap();
            assert!(position >= last, "{} out of order", skill);
            last = position;
        }
    }

    #[test]
    fn incomplete_skill_map_is_rejected() {
        let err = serde_json::from_str::<SkillStats>(
            r#"{"Overall": {"rank": 1, "level": 99, "experience": 100}}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("missing skill"));
    }
}
