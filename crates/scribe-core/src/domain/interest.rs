use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// What the catalog knows about an interest name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterestRequirement {
    /// No interest with this name exists.
    Unknown,
    /// The interest exists; some interests also require a minimum read time.
    Known { minimum_read_time: Option<u32> },
}

/// Read-time admission settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ReadTimePolicy {
    /// Required seconds per interest name.
    #[serde(default)]
    pub interest_minimums: HashMap<String, u32>,
    /// Floor applied to every post.
    #[serde(default)]
    pub global_minimum: u32,
}

impl ReadTimePolicy {
    pub fn new(interest_minimums: HashMap<String, u32>, global_minimum: u32) -> Self {
        Self {
            interest_minimums,
            global_minimum,
        }
    }

    pub fn minimum_for(&self, interest: &str) -> Option<u32> {
        self.interest_minimums.get(interest).copied()
    }
}

/// An interest together with the viewing user's follow state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterestFollowState {
    pub name: String,
    pub followed: bool,
}

/// A catalog category and its interests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryInterests {
    pub category: String,
    pub interests: Vec<InterestFollowState>,
}
