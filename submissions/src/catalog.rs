use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Platform {
    #[serde(rename = "Playstation 5")]
    Playstation5,
    #[serde(rename = "Playstation 4")]
    Playstation4,
    #[serde(rename = "Switch")]
    Switch,
    #[serde(rename = "Switch 2")]
    Switch2,
    #[serde(rename = "Xbox One")]
    XboxOne,
    #[serde(rename = "PC")]
    Pc,
}

impl Platform {
    pub const ALL: [Platform; 6] = [
        Platform::Playstation5,
        Platform::Playstation4,
        Platform::Switch,
        Platform::Switch2,
        Platform::XboxOne,
        Platform::Pc,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Playstation5 => "Playstation 5",
            Platform::Playstation4 => "Playstation 4",
            Platform::Switch => "Switch",
            Platform::Switch2 => "Switch 2",
            Platform::XboxOne => "Xbox One",
            Platform::Pc => "PC",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CompletionType {
    #[serde(rename = "Main Story")]
    MainStory,
    #[serde(rename = "Main + Extras")]
    MainPlusExtras,
    #[serde(rename = "Completionist")]
    Completionist,
}

impl CompletionType {
    pub const ALL: [CompletionType; 3] = [
        CompletionType::MainStory,
        CompletionType::MainPlusExtras,
        CompletionType::Completionist,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CompletionType::MainStory => "Main Story",
            CompletionType::MainPlusExtras => "Main + Extras",
            CompletionType::Completionist => "Completionist",
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    #[error("Invalid platform {given}, current valid platforms are {}", joined(Platform::ALL.iter().map(Platform::as_str)))]
    UnknownPlatform { given: String },
    #[error("Invalid completion type {given}, current valid completion types are {}", joined(CompletionType::ALL.iter().map(CompletionType::as_str)))]
    UnknownCompletionType { given: String },
}

fn joined<'a>(names: impl Iterator<Item = &'a str>) -> String {
    names.collect::<Vec<_>>().join(", ")
}

impl FromStr for Platform {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Platform::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| CatalogError::UnknownPlatform { given: s.to_string() })
    }
}

impl FromStr for CompletionType {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        CompletionType::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| CatalogError::UnknownCompletionType { given: s.to_string() })
    }
}

impl Display for Platform {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Display for CompletionType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Title-cases each space-separated word so game titles index consistently.
pub fn normalize_text(text: &str) -> String {
    text.trim()
        .to_lowercase()
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_text() {
        assert_eq!(normalize_text("  hollow KNIGHT "), "Hollow Knight");
        assert_eq!(normalize_text("elden ring"), "Elden Ring");
        assert_eq!(normalize_text(""), "");
    }

    #[test]
    fn test_platform_parse_ignores_case() {
        assert_eq!("playstation 5".parse::<Platform>(), Ok(Platform::Playstation5));
        assert_eq!("pc".parse::<Platform>(), Ok(Platform::Pc));
        assert_eq!(" Switch 2 ".parse::<Platform>(), Ok(Platform::Switch2));
    }

    #[test]
    fn test_unknown_platform_lists_valid_values() {
        let err = "Dreamcast".parse::<Platform>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid platform Dreamcast, current valid platforms are Playstation 5, Playstation 4, Switch, Switch 2, Xbox One, PC"
        );
    }

    #[test]
    fn test_completion_type_parse() {
        assert_eq!("main + extras".parse::<CompletionType>(), Ok(CompletionType::MainPlusExtras));
        assert!("speedrun".parse::<CompletionType>().is_err());
    }
}
