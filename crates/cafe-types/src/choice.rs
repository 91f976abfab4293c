//! Yes/No select values

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// One of the two labeled choices offered for boolean amenities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Choice {
    Yes,
    No,
}

impl Choice {
    /// Choices in the order they are offered on the form
    pub const ALL: [Choice; 2] = [Choice::Yes, Choice::No];

    pub fn as_str(&self) -> &'static str {
        match self {
            Choice::Yes => "Yes",
            Choice::No => "No",
        }
    }
}

impl std::fmt::Display for Choice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Not a valid choice: {0:?}")]
pub struct ChoiceError(pub String);

impl FromStr for Choice {
    type Err = ChoiceError;

    // Labels are matched exactly, as submitted by the select element.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Yes" => Ok(Choice::Yes),
            "No" => Ok(Choice::No),
            other => Err(ChoiceError(other.to_string())),
        }
    }
}

impl From<Choice> for bool {
    fn from(choice: Choice) -> Self {
        matches!(choice, Choice::Yes)
    }
}

impl From<bool> for Choice {
    fn from(value: bool) -> Self {
        if value {
            Choice::Yes
        } else {
            Choice::No
        }
    }
}
