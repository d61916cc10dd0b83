use std::{fmt, str::FromStr};

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Highest neighbour count a cell can have in a Moore neighbourhood.
pub const MAX_NEIGHBOURS: usize = 8;

/// A set of accepted neighbour counts, stored as a bitmask over `0..=8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<usize>", into = "Vec<usize>")]
pub struct Condition {
    mask: u16,
}

impl Condition {
    pub fn from_range(low: usize, high: usize) -> Result<Self, ConfigError> {
        if high < low {
            return Err(ConfigError::InvalidRange { low, high });
        }

        Self::from_set(low..=high)
    }

    pub fn from_set<I>(values: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = usize>,
    {
        let mut mask = 0;

        for value in values {
            if value > MAX_NEIGHBOURS {
                return Err(ConfigError::CountOutOfRange(value));
            }

            mask |= 1 << value;
        }

        Ok(Self { mask })
    }

    pub fn single(value: usize) -> Result<Self, ConfigError> {
        Self::from_set([value])
    }

    pub fn contains(&self, count: usize) -> bool {
        count <= MAX_NEIGHBOURS && self.mask & (1 << count) != 0
    }

    pub fn counts(&self) -> impl Iterator<Item = usize> + '_ {
        (0..=MAX_NEIGHBOURS).filter(|count| self.contains(*count))
    }

    pub fn is_empty(&self) -> bool {
        self.mask == 0
    }
}

impl TryFrom<Vec<usize>> for Condition {
    type Error = ConfigError;

    fn try_from(value: Vec<usize>) -> Result<Self, Self::Error> {
        Self::from_set(value)
    }
}

impl From<Condition> for Vec<usize> {
    fn from(value: Condition) -> Self {
        value.counts().collect()
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.counts().join(""))
    }
}

/// Accepts `"2-3"` (inclusive range), `"3,6"` (comma separated set), `"36"` (one digit per count)
/// and `""` (nothing accepted).
impl FromStr for Condition {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let parse_count = |part: &str| {
            part.trim()
                .parse::<usize>()
                .map_err(|_| ConfigError::InvalidNotation(s.to_owned()))
        };

        if let Some((low, high)) = s.split_once('-') {
            Self::from_range(parse_count(low)?, parse_count(high)?)
        } else if s.contains(',') {
            let counts = s.split(',').map(parse_count).collect::<Result<Vec<_>, _>>()?;
            Self::from_set(counts)
        } else {
            let counts = s
                .chars()
                .map(|c| {
                    c.to_digit(10)
                        .map(|digit| digit as usize)
                        .ok_or_else(|| ConfigError::InvalidNotation(s.to_owned()))
                })
                .collect::<Result<Vec<_>, _>>()?;
            Self::from_set(counts)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rule {
    /// Counts for which an alive cell stays alive.
    pub survive: Condition,

    /// Counts for which a dead cell comes alive.
    pub birth: Condition,
}

impl Rule {
    pub fn new(survive: Condition, birth: Condition) -> Self {
        Self { survive, birth }
    }

    /// B3/S23
    pub fn conway() -> Self {
        Self::new(Condition { mask: 0b1100 }, Condition { mask: 0b1000 })
    }

    /// B36/S23
    pub fn highlife() -> Self {
        Self::new(Condition { mask: 0b1100 }, Condition { mask: 0b100_1000 })
    }

    /// B3678/S34678
    pub fn day_and_night() -> Self {
        Self::new(
            Condition { mask: 0b1_1101_1000 },
            Condition { mask: 0b1_1100_1000 },
        )
    }

    /// B2/S
    pub fn seeds() -> Self {
        Self::new(Condition::default(), Condition { mask: 0b100 })
    }

    pub fn preset(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "conway" | "life" => Some(Self::conway()),
            "highlife" => Some(Self::highlife()),
            "day_and_night" | "daynight" => Some(Self::day_and_night()),
            "seeds" => Some(Self::seeds()),
            _ => None,
        }
    }

    /// Whether a cell in the given state is alive in the next generation.
    pub fn next_state(&self, alive: bool, alive_neighbours: usize) -> bool {
        if alive {
            self.survive.contains(alive_neighbours)
        } else {
            self.birth.contains(alive_neighbours)
        }
    }
}

impl Default for Rule {
    fn default() -> Self {
        Self::conway()
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "B{}/S{}", self.birth, self.survive)
    }
}

/// Parses Life-like notation (`B3/S23`, either half first, case-insensitive) or a preset name.
impl FromStr for Rule {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(rule) = Self::preset(s) {
            return Ok(rule);
        }

        let invalid = || ConfigError::InvalidNotation(s.to_owned());

        let mut birth = None;
        let mut survive = None;

        for part in s.split('/') {
            let part = part.trim();
            let (slot, counts) = match part.chars().next().map(|c| c.to_ascii_uppercase()) {
                Some('B') => (&mut birth, &part[1..]),
                Some('S') => (&mut survive, &part[1..]),
                _ => return Err(invalid()),
            };

            if slot.is_some() || counts.contains(['-', ',']) {
                return Err(invalid());
            }

            *slot = Some(counts.parse::<Condition>()?);
        }

        match (survive, birth) {
            (Some(survive), Some(birth)) => Ok(Self::new(survive, birth)),
            _ => Err(invalid()),
        }
    }
}

impl TryFrom<String> for Rule {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rule> for String {
    fn from(value: Rule) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_expands_inclusively() {
        let condition = Condition::from_range(2, 4).unwrap();
        assert_eq!(condition.counts().collect_vec(), vec![2, 3, 4]);
        assert!(!condition.contains(1));
        assert!(!condition.contains(5));
    }

    #[test]
    fn range_rejects_bad_bounds() {
        assert_eq!(
            Condition::from_range(3, 2),
            Err(ConfigError::InvalidRange { low: 3, high: 2 })
        );
        assert_eq!(
            Condition::from_range(2, 9),
            Err(ConfigError::CountOutOfRange(9))
        );
    }

    #[test]
    fn set_keeps_gaps() {
        let condition = Condition::from_set([3, 6, 8]).unwrap();
        assert_eq!(condition.counts().collect_vec(), vec![3, 6, 8]);
        assert!(!condition.contains(4));
        assert_eq!(
            Condition::from_set([1, 12]),
            Err(ConfigError::CountOutOfRange(12))
        );
    }

    #[test]
    fn single_and_empty() {
        let three = Condition::single(3).unwrap();
        assert_eq!(three.counts().collect_vec(), vec![3]);
        assert!(!three.is_empty());
        assert_eq!(Condition::single(9), Err(ConfigError::CountOutOfRange(9)));

        assert!(Condition::default().is_empty());
        assert!(Rule::seeds().survive.is_empty());
        assert!(!Rule::seeds().birth.is_empty());
    }

    #[test]
    fn contains_is_false_above_eight() {
        let everything = Condition::from_range(0, 8).unwrap();
        assert!(everything.contains(8));
        assert!(!everything.contains(9));
        assert!(!everything.contains(usize::MAX));
    }

    #[test]
    fn condition_string_forms() {
        assert_eq!("2-3".parse::<Condition>(), Condition::from_range(2, 3));
        assert_eq!("3, 6".parse::<Condition>(), Condition::from_set([3, 6]));
        assert_eq!("36".parse::<Condition>(), Condition::from_set([3, 6]));
        assert_eq!("".parse::<Condition>(), Ok(Condition::default()));
        assert!("x".parse::<Condition>().is_err());
        assert_eq!(
            "9".parse::<Condition>(),
            Err(ConfigError::CountOutOfRange(9))
        );
    }

    #[test]
    fn presets_match_notation() {
        assert_eq!("B3/S23".parse::<Rule>(), Ok(Rule::conway()));
        assert_eq!("B36/S23".parse::<Rule>(), Ok(Rule::highlife()));
        assert_eq!("B3678/S34678".parse::<Rule>(), Ok(Rule::day_and_night()));
        assert_eq!("B2/S".parse::<Rule>(), Ok(Rule::seeds()));
    }

    #[test]
    fn notation_accepts_either_order_and_case() {
        assert_eq!("s23/b3".parse::<Rule>(), Ok(Rule::conway()));
        assert_eq!(Rule::highlife().to_string(), "B36/S23");
    }

    #[test]
    fn notation_rejects_garbage() {
        assert!("B3".parse::<Rule>().is_err());
        assert!("B3/B3".parse::<Rule>().is_err());
        assert!("X3/S23".parse::<Rule>().is_err());
        assert!("B2-3/S23".parse::<Rule>().is_err());
    }

    #[test]
    fn next_state_follows_the_right_condition() {
        let rule = Rule::conway();
        assert!(rule.next_state(true, 2));
        assert!(rule.next_state(true, 3));
        assert!(!rule.next_state(true, 4));
        assert!(!rule.next_state(false, 2));
        assert!(rule.next_state(false, 3));
    }

    #[test]
    fn serde_shapes() {
        let condition = Condition::from_set([2, 3]).unwrap();
        assert_eq!(serde_json::to_string(&condition).unwrap(), "[2,3]");
        assert!(serde_json::from_str::<Condition>("[2,9]").is_err());

        let rule: Rule = serde_json::from_str("\"B36/S23\"").unwrap();
        assert_eq!(rule, Rule::highlife());
        assert_eq!(serde_json::to_string(&rule).unwrap(), "\"B36/S23\"");
    }
}
