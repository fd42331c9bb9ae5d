use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::InvalidMood;

/// The moods a recommendation can be requested for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Angry,
    Happy,
}

impl Mood {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Angry => "angry",
            Mood::Happy => "happy",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mood {
    type Err = InvalidMood;

    // Matching is exact: "Happy" or " happy" are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "angry" => Ok(Mood::Angry),
            "happy" => Ok(Mood::Happy),
            other => Err(InvalidMood(other.to_string())),
        }
    }
}

/// One entry of the JSON array the LLM is asked to reply with
#[derive(Debug, Clone, Deserialize)]
pub struct MovieTitle {
    // models do not always keep the key lowercase
    #[serde(default, alias = "Title", alias = "TITLE")]
    pub title: String,
}

/// Subset of an OMDb title lookup response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OmdbMovie {
    #[serde(rename = "Title", default)]
    pub title: String,
    #[serde(rename = "Plot", default)]
    pub plot: String,
    #[serde(rename = "Year", default)]
    pub year: String,
    /// "True" or "False"; OMDb answers lookup misses with 200 and "False"
    #[serde(rename = "Response")]
    pub response: Option<String>,
    #[serde(rename = "Error")]
    pub error: Option<String>,
}

impl OmdbMovie {
    pub fn is_miss(&self) -> bool {
        self.response.as_deref() == Some("False")
    }

    /// Human-readable summary returned to clients as `extended_info`
    pub fn extended_info(&self) -> String {
        format!(
            "Title: {}\nPlot: {}\nRelease Year: {}",
            self.title, self.plot, self.year
        )
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MovieRecommendation {
    pub mood: Mood,
    pub recommended: String,
    pub extended_info: String,
}
