use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Closed set of article categories. Producers assign one of these labels
/// (or none) to every article; filtering compares case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Ai,
    BizAndIt,
    Cars,
    Culture,
    Gaming,
    Health,
    Policy,
    Science,
    Security,
    Space,
    Tech,
}

impl Category {
    pub const ALL: [Category; 11] = [
        Category::Ai,
        Category::BizAndIt,
        Category::Cars,
        Category::Culture,
        Category::Gaming,
        Category::Health,
        Category::Policy,
        Category::Science,
        Category::Security,
        Category::Space,
        Category::Tech,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Ai => "AI",
            Category::BizAndIt => "BIZ & IT",
            Category::Cars => "CARS",
            Category::Culture => "CULTURE",
            Category::Gaming => "GAMING",
            Category::Health => "HEALTH",
            Category::Policy => "POLICY",
            Category::Science => "SCIENCE",
            Category::Security => "SECURITY",
            Category::Space => "SPACE",
            Category::Tech => "TECH",
        }
    }

    /// Case-insensitive lookup against the closed label set.
    pub fn from_label(label: &str) -> Option<Category> {
        let label = label.trim();
        Category::ALL
            .iter()
            .find(|c| c.label().eq_ignore_ascii_case(label))
            .copied()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Category::from_label(s).ok_or_else(|| format!("unknown category: {}", s))
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Category::from_label(&label)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown category: {}", label)))
    }
}

/// Serde adapter for `Option<Category>` fields. Producers emit an empty
/// string when no topic was assigned, which maps to `None` here; any other
/// label outside the closed set is a malformed record.
pub mod option {
    use super::Category;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &Option<Category>,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        match value {
            Some(category) => serializer.serialize_str(category.label()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Option<Category>, D::Error> {
        let label = Option::<String>::deserialize(deserializer)?;
        match label.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(label) => Category::from_label(label)
                .map(Some)
                .ok_or_else(|| serde::de::Error::custom(format!("unknown category: {}", label))),
        }
    }
}
