//! Letter grades

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Letter grade derived from a 0–100 score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "A+")]
    APlus,
    #[serde(rename = "A")]
    A,
    #[serde(rename = "A-")]
    AMinus,
    #[serde(rename = "B+")]
    BPlus,
    #[serde(rename = "B")]
    B,
    #[serde(rename = "B-")]
    BMinus,
    #[serde(rename = "C+")]
    CPlus,
    #[serde(rename = "C")]
    C,
    #[serde(rename = "C-")]
    CMinus,
    #[serde(rename = "D")]
    D,
    #[serde(rename = "F")]
    F,
}

/// Inclusive lower bounds, best grade first
const GRADE_TABLE: [(f64, Grade); 10] = [
    (97.0, Grade::APlus),
    (93.0, Grade::A),
    (90.0, Grade::AMinus),
    (87.0, Grade::BPlus),
    (83.0, Grade::B),
    (80.0, Grade::BMinus),
    (77.0, Grade::CPlus),
    (73.0, Grade::C),
    (70.0, Grade::CMinus),
    (60.0, Grade::D),
];

impl Grade {
    /// Grade for `score`; anything below 60 (or NaN) is `F`
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        GRADE_TABLE
            .iter()
            .find(|(min, _)| score >= *min)
            .map_or(Self::F, |(_, grade)| *grade)
    }

    /// Lowest score that earns this grade
    #[must_use]
    pub fn min_score(&self) -> f64 {
        GRADE_TABLE
            .iter()
            .find(|(_, grade)| grade == self)
            .map_or(0.0, |(min, _)| *min)
    }

    /// Letter form (`A+`, `B-`, ...)
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::APlus => "A+",
            Self::A => "A",
            Self::AMinus => "A-",
            Self::BPlus => "B+",
            Self::B => "B",
            Self::BMinus => "B-",
            Self::CPlus => "C+",
            Self::C => "C",
            Self::CMinus => "C-",
            Self::D => "D",
            Self::F => "F",
        }
    }

    /// Short descriptor shown next to the letter
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::APlus => "Excellent",
            Self::A | Self::AMinus => "Very good",
            Self::BPlus | Self::B | Self::BMinus => "Good",
            Self::CPlus | Self::C | Self::CMinus => "Fair",
            Self::D => "Needs attention",
            Self::F => "Non-compliant",
        }
    }
}

impl Display for Grade {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries_are_inclusive() {
        assert_eq!(Grade::from_score(100.0), Grade::APlus);
        assert_eq!(Grade::from_score(97.0), Grade::APlus);
        assert_eq!(Grade::from_score(96.99), Grade::A);
        assert_eq!(Grade::from_score(93.0), Grade::A);
        assert_eq!(Grade::from_score(90.0), Grade::AMinus);
        assert_eq!(Grade::from_score(87.0), Grade::BPlus);
        assert_eq!(Grade::from_score(83.0), Grade::B);
        assert_eq!(Grade::from_score(80.0), Grade::BMinus);
        assert_eq!(Grade::from_score(77.0), Grade::CPlus);
        assert_eq!(Grade::from_score(73.0), Grade::C);
        assert_eq!(Grade::from_score(70.0), Grade::CMinus);
        assert_eq!(Grade::from_score(60.0), Grade::D);
        assert_eq!(Grade::from_score(59.99), Grade::F);
        assert_eq!(Grade::from_score(0.0), Grade::F);
    }

    #[test]
    fn nan_is_failing() {
        assert_eq!(Grade::from_score(f64::NAN), Grade::F);
    }

    #[test]
    fn min_score_round_trips() {
        for (min, grade) in GRADE_TABLE {
            assert_eq!(grade.min_score(), min);
            assert_eq!(Grade::from_score(grade.min_score()), grade);
        }
        assert_eq!(Grade::F.min_score(), 0.0);
    }

    #[test]
    fn letters_and_descriptions() {
        assert_eq!(Grade::APlus.to_string(), "A+");
        assert_eq!(Grade::APlus.description(), "Excellent");
        assert_eq!(Grade::CMinus.as_str(), "C-");
        assert_eq!(serde_json::to_string(&Grade::BMinus).unwrap(), "\"B-\"");
    }
}
