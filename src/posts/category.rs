use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Art,
    Science,
    Technology,
    Cinema,
    Design,
    Food,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Art,
        Category::Science,
        Category::Technology,
        Category::Cinema,
        Category::Design,
        Category::Food,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Art => "art",
            Category::Science => "science",
            Category::Technology => "technology",
            Category::Cinema => "cinema",
            Category::Design => "design",
            Category::Food => "food",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown category {0:?}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}
