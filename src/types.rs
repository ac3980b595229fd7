//! Common types shared by the loader, the resampler and the reports.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Sex category of a child in the height table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sex {
    /// Rows labelled `M`.
    Male,
    /// Rows labelled `F`.
    Female,
}

impl Sex {
    /// The label used for this category in the input table.
    pub fn label(self) -> &'static str {
        match self {
            Sex::Male => "M",
            Sex::Female => "F",
        }
    }

    /// Plural noun used in report headings ("male children").
    pub fn noun(self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
        }
    }
}

impl FromStr for Sex {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "M" => Ok(Sex::Male),
            "F" => Ok(Sex::Female),
            other => Err(other.to_string()),
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One child's height with its sex label, in table order.
///
/// This is the typed projection the bootstrap resamples. The label travels
/// with the height so a resample of the whole table keeps the sex ratio random.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    /// Sex category.
    pub sex: Sex,
    /// Height in inches.
    pub height: f64,
}

impl Observation {
    /// Create an observation.
    pub fn new(sex: Sex, height: f64) -> Self {
        Self { sex, height }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_labels() {
        assert_eq!("M".parse::<Sex>(), Ok(Sex::Male));
        assert_eq!(" F ".parse::<Sex>(), Ok(Sex::Female));
        assert_eq!("x".parse::<Sex>(), Err("x".to_string()));
    }

    #[test]
    fn test_label_round_trip() {
        for sex in [Sex::Male, Sex::Female] {
            assert_eq!(sex.label().parse::<Sex>().unwrap(), sex);
        }
    }
}
