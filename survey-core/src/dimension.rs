use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The perceptual quality participants are asked to judge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    #[default]
    Desirability,
    Beauty,
    Novelty,
}

impl Dimension {
    pub fn page_title(&self) -> &'static str {
        match self {
            Dimension::Desirability => "Desirability Survey",
            Dimension::Beauty => "Beauty Survey",
            Dimension::Novelty => "Novelty Survey",
        }
    }

    /// Question shown above every choice trial
    pub fn prompt(&self) -> &'static str {
        match self {
            Dimension::Desirability => "Which design is the most desirable?",
            Dimension::Beauty => "Which design is the most beautiful?",
            Dimension::Novelty => "Which design is the most novel or unusual?",
        }
    }

    pub fn info_text(&self) -> &'static str {
        match self {
            Dimension::Desirability => {
                "We will be asking you to rate the Desirability of various lamp design images. \
                 Desirability refers to the appeal or attractiveness of each lamp design, \
                 representing how much you want to possess in your house according to your preferences. \
                 Your task is to look at the images and select the most desirable lamp \
                 based on your personal preferences and tastes."
            }
            Dimension::Beauty => {
                "We will be asking you to rate the Beauty of various lamp design images. \
                 Beauty refers to the visual appeal or aesthetics of each lamp design, \
                 making it pleasing to the eye according to your preferences. \
                 Your task is to look at the images and select the most beautiful lamp \
                 based on your personal preferences and tastes."
            }
            Dimension::Novelty => {
                "We will be asking you to rate the Novelty/Unusualness of various lamp design images. \
                 Novelty/Unusualness refers to the uniqueness or innovation of each lamp design, \
                 setting it apart from common designs according to your preferences. \
                 Your task is to look at the images and select the most novel or unusual lamp \
                 based on your personal preferences and tastes."
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Dimension::Desirability => "desirability",
            Dimension::Beauty => "beauty",
            Dimension::Novelty => "novelty",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dimension {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "desirability" => Ok(Dimension::Desirability),
            "beauty" => Ok(Dimension::Beauty),
            "novelty" => Ok(Dimension::Novelty),
            other => Err(format!("unknown survey dimension: {other}")),
        }
    }
}
