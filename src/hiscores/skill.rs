use std::fmt::Formatter;

/// Rank value the hiscores report for a player that does not appear on a
/// leaderboard. Counter fields may carry it too, see the parser.
pub const UNRANKED: i64 = -1;

/// Skills in the exact order the hiscores list them. The response format
/// is positional, so this table is the contract with the upstream API --
/// any upstream change means editing these tables, nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Skill {
    Overall,
    Attack,
    Defence,
    Strength,
    Hitpoints,
    Ranged,
    Prayer,
    Magic,
    Cooking,
    Woodcutting,
    Fletching,
    Fishing,
    Firemaking,
    Crafting,
    Smithing,
    Mining,
    Herblore,
    Agility,
    Thieving,
    Slayer,
    Farming,
    Runecrafting,
    Hunter,
    Construction,
}

impl Skill {
    pub const COUNT: usize = 24;

    pub fn name(&self) -> &'static str {
        match self {
            Skill::Overall => "Overall",
            Skill::Attack => "Attack",
            Skill::Defence => "Defence",
            Skill::Strength => "Strength",
            Skill::Hitpoints => "Hitpoints",
            Skill::Ranged => "Ranged",
            Skill::Prayer => "Prayer",
            Skill::Magic => "Magic",
            Skill::Cooking => "Cooking",
            Skill::Woodcutting => "Woodcutting",
            Skill::Fletching => "Fletching",
            Skill::Fishing => "Fishing",
            Skill::Firemaking => "Firemaking",
            Skill::Crafting => "Crafting",
            Skill::Smithing => "Smithing",
            Skill::Mining => "Mining",
            Skill::Herblore => "Herblore",
            Skill::Agility => "Agility",
            Skill::Thieving => "Thieving",
            Skill::Slayer => "Slayer",
            Skill::Farming => "Farming",
            Skill::Runecrafting => "Runecrafting",
            Skill::Hunter => "Hunter",
            Skill::Construction => "Construction",
        }
    }

    pub fn iter() -> std::slice::Iter<'static, Skill> {
        use Skill::*;
        static SKILLS: [Skill; Skill::COUNT] = [
            Overall,
            Attack,
            Defence,
            Strength,
            Hitpoints,
            Ranged,
            Prayer,
            Magic,
            Cooking,
            Woodcutting,
            Fletching,
            Fishing,
            Firemaking,
            Crafting,
            Smithing,
            Mining,
            Herblore,
            Agility,
            Thieving,
            Slayer,
            Farming,
            Runecrafting,
            Hunter,
            Construction,
        ];
        SKILLS.iter()
    }
}

impl std::str::FromStr for Skill {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, ()> {
        Skill::iter()
            .find(|skill| skill.name() == s)
            .copied()
            .ok_or(())
    }
}

impl std::fmt::Display for Skill {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Activities/minigames, in hiscores order. Lines carry `rank,score`.
pub static ACTIVITIES: [&str; 17] = [
    "League Points",
    "Bounty Hunter Hunter",
    "Bounty Hunter Rogue",
    "Bounty Hunter Hunter Legacy",
    "Bounty Hunter Rogue Legacy",
    "Clue Scrolls All",
    "Clue Scrolls Beginner",
    "Clue Scrolls Easy",
    "Clue Scrolls Medium",
    "Clue Scrolls Hard",
    "Clue Scrolls Elite",
    "Clue Scrolls Master",
    "Lms Rank",
    "Pvp Arena Rank",
    "Soul Wars Zeal",
    "Rifts Closed",
    "Colosseum Glory",
];

/// Bosses, in hiscores order. Lines carry `rank,kills`.
pub static BOSSES: [&str; 58] = [
    "Abyssal Sire",
    "Alchemical Hydra",
    "Artio",
    "Barrows Chests",
    "Bryophyta",
    "Callisto",
    "Calvarion",
    "Cerberus",
    "Chambers Of Xeric",
    "Chambers Of Xeric Challenge Mode",
    "Chaos Elemental",
    "Chaos Fanatic",
    "Commander Zilyana",
    "Corporeal Beast",
    "Crazy Archaeologist",
    "Dagannoth Prime",
    "Dagannoth Rex",
    "Dagannoth Supreme",
    "Deranged Archaeologist",
    "Duke Sucellus",
    "General Graardor",
    "Giant Mole",
    "Grotesque Guardians",
    "Hespori",
    "Kalphite Queen",
    "King Black Dragon",
    "Kraken",
    "Kreearra",
    "Kril Tsutsaroth",
    "Mimic",
    "Nex",
    "Nightmare",
    "Phosanis Nightmare",
    "Obor",
    "Phantom Muspah",
    "Sarachnis",
    "Scorpia",
    "Skotizo",
    "Spindel",
    "Tempoross",
    "The Gauntlet",
    "The Corrupted Gauntlet",
    "The Leviathan",
    "The Whisperer",
    "Theatre Of Blood",
    "Theatre Of Blood Hard Mode",
    "Thermonuclear Smoke Devil",
    "Tombs Of Amascut",
    "Tombs Of Amascut Expert",
    "Tzkal Zuk",
    "Tztok Jad",
    "Vardorvis",
    "Venenatis",
    "Vetion",
    "Vorkath",
    "Wintertodt",
    "Zalcano",
    "Zulrah",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skill_order_is_stable() {
        let skills: Vec<Skill> = Skill::iter().copied().collect();
        assert_eq!(skills.len(), Skill::COUNT);
        assert_eq!(skills[0], Skill::Overall);
        assert_eq!(skills[1], Skill::Attack);
        assert_eq!(skills[23], Skill::Construction);
    }

    #[test]
    fn skill_names_parse_back() {
        for skill in Skill::iter() {
            assert_eq!(skill.name().parse::<Skill>(), Ok(*skill));
        }
        assert!("Sailing".parse::<Skill>().is_err());
    }
}
