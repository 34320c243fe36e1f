//! Rule tables mapping chart placements to psychological tags.

use std::collections::HashMap;
use std::sync::Arc;

use crate::chart::ZodiacSign;

/// Tags contributed by one rule
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RuleEntry {
    pub traits: Vec<String>,
    pub strengths: Vec<String>,
    pub challenges: Vec<String>,
}

impl RuleEntry {
    pub fn new(traits: &[&str], strengths: &[&str], challenges: &[&str]) -> Self {
        Self {
            traits: owned(traits),
            strengths: owned(strengths),
            challenges: owned(challenges),
        }
    }
}

fn owned(tags: &[&str]) -> Vec<String> {
    tags.iter().map(|t| t.to_string()).collect()
}

type RawRule<K> = (K, &'static [&'static str], &'static [&'static str], &'static [&'static str]);

const SIGN_RULES: &[RawRule<ZodiacSign>] = &[
    (ZodiacSign::Aries, &["bold", "energetic", "independent"], &["leadership", "courage"], &["impulsiveness", "short-tempered"]),
    (ZodiacSign::Taurus, &["practical", "reliable", "patient"], &["stability", "determination"], &["stubbornness", "materialistic"]),
    (ZodiacSign::Gemini, &["adaptable", "communicative", "versatile"], &["intellect", "social skills"], &["indecisiveness", "superficiality"]),
    (ZodiacSign::Cancer, &["emotional", "intuitive", "nurturing"], &["empathy", "protectiveness"], &["moodiness", "over-sensitivity"]),
    (ZodiacSign::Leo, &["confident", "generous", "dramatic"], &["charisma", "creativity"], &["arrogance", "need for attention"]),
    (ZodiacSign::Virgo, &["analytical", "practical", "helpful"], &["attention to detail", "reliability"], &["criticism", "perfectionism"]),
    (ZodiacSign::Libra, &["diplomatic", "fair-minded", "social"], &["harmony", "balance"], &["indecision", "people-pleasing"]),
    (ZodiacSign::Scorpio, &["intense", "passionate", "mysterious"], &["resilience", "intuition"], &["jealousy", "control issues"]),
    (ZodiacSign::Sagittarius, &["optimistic", "adventurous", "philosophical"], &["freedom", "wisdom"], &["recklessness", "over-confidence"]),
    (ZodiacSign::Capricorn, &["ambitious", "disciplined", "responsible"], &["leadership", "perseverance"], &["rigidity", "workaholism"]),
    (ZodiacSign::Aquarius, &["innovative", "independent", "humanitarian"], &["originality", "progressiveness"], &["detachment", "eccentricity"]),
    (ZodiacSign::Pisces, &["compassionate", "artistic", "intuitive"], &["empathy", "spirituality"], &["escapism", "victim mentality"]),
];

const HOUSE_RULES: &[RawRule<u8>] = &[
    (1, &["self-identity", "appearance"], &["initiative"], &["self-centeredness"]),
    (2, &["values", "possessions"], &["resourcefulness"], &["greed"]),
    (3, &["communication", "learning"], &["adaptability"], &["gossip"]),
    (4, &["home", "family"], &["security"], &["emotional dependency"]),
    (5, &["creativity", "pleasure"], &["joy"], &["self-indulgence"]),
    (6, &["health", "service"], &["duty"], &["criticism"]),
    (7, &["partnerships", "relationships"], &["cooperation"], &["codependency"]),
    (8, &["transformation", "intimacy"], &["resilience"], &["obsession"]),
    (9, &["philosophy", "travel"], &["optimism"], &["dogmatism"]),
    (10, &["career", "reputation"], &["ambition"], &["status-seeking"]),
    (11, &["friends", "community"], &["altruism"], &["detachment"]),
    (12, &["spirituality", "subconscious"], &["compassion"], &["isolation"]),
];

// Sextile has no entry
const ASPECT_RULES: &[RawRule<&str>] = &[
    ("conjunction", &["intensified"], &["focus"], &["overload"]),
    ("trine", &["harmonious"], &["ease"], &["complacency"]),
    ("square", &["challenging"], &["growth"], &["conflict"]),
    ("opposition", &["balancing"], &["awareness"], &["tension"]),
];

lazy_static::lazy_static! {
    static ref STANDARD: Arc<RuleBook> = Arc::new(RuleBook::build_standard());
}

/// Read-only sign, house and aspect rule tables
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleBook {
    signs: HashMap<ZodiacSign, RuleEntry>,
    houses: HashMap<u8, RuleEntry>,
    aspects: HashMap<String, RuleEntry>,
}

impl RuleBook {
    /// An empty book; every lookup misses
    pub fn empty() -> Self {
        Self::default()
    }

    /// The shared built-in rule book
    pub fn standard() -> Arc<RuleBook> {
        Arc::clone(&STANDARD)
    }

    fn build_standard() -> Self {
        let mut book = Self::empty();
        for (sign, traits, strengths, challenges) in SIGN_RULES {
            book = book.with_sign(*sign, RuleEntry::new(traits, strengths, challenges));
        }
        for (house, traits, strengths, challenges) in HOUSE_RULES {
            book = book.with_house(*house, RuleEntry::new(traits, strengths, challenges));
        }
        for (aspect, traits, strengths, challenges) in ASPECT_RULES {
            book = book.with_aspect(aspect, RuleEntry::new(traits, strengths, challenges));
        }
        book
    }

    pub fn with_sign(mut self, sign: ZodiacSign, entry: RuleEntry) -> Self {
        self.signs.insert(sign, entry);
        self
    }

    pub fn with_house(mut self, house: u8, entry: RuleEntry) -> Self {
        self.houses.insert(house, entry);
        self
    }

    /// Aspect keys are matched case-insensitively
    pub fn with_aspect(mut self, aspect: &str, entry: RuleEntry) -> Self {
        self.aspects.insert(aspect.to_lowercase(), entry);
        self
    }

    pub fn sign(&self, sign: ZodiacSign) -> Option<&RuleEntry> {
        self.signs.get(&sign)
    }

    pub fn house(&self, house: u8) -> Option<&RuleEntry> {
        self.houses.get(&house)
    }

    pub fn aspect(&self, aspect: &str) -> Option<&RuleEntry> {
        self.aspects.get(&aspect.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_tables_are_complete() {
        let book = RuleBook::standard();
        for sign in ZodiacSign::ALL {
            assert!(book.sign(sign).is_some(), "missing sign {sign}");
        }
        for house in 1..=12 {
            assert!(book.house(house).is_some(), "missing house {house}");
        }
        assert!(book.house(0).is_none());
        assert!(book.house(13).is_none());
    }

    #[test]
    fn test_aspect_lookup_is_case_insensitive() {
        let book = RuleBook::standard();
        assert_eq!(book.aspect("Conjunction").unwrap().strengths, vec!["focus"]);
        assert_eq!(book.aspect("TRINE").unwrap().traits, vec!["harmonious"]);
        assert!(book.aspect("sextile").is_none());
        assert!(book.aspect("conjunct").is_none());
    }

    #[test]
    fn test_standard_is_shared() {
        assert!(Arc::ptr_eq(&RuleBook::standard(), &RuleBook::standard()));
    }

    #[test]
    fn test_leo_entry() {
        let leo = RuleBook::standard().sign(ZodiacSign::Leo).cloned().unwrap();
        assert_eq!(leo.strengths, vec!["charisma", "creativity"]);
        assert!(leo.challenges.contains(&"need for attention".to_string()));
    }
}
