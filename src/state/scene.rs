//! # Deployment scene.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Where the process is deployed.
///
/// Parses from lowercase names; `prod` and `release` are accepted for [`Scene::Rel`].
///
/// ```
/// use runvisor::Scene;
///
/// assert_eq!("pre".parse::<Scene>().unwrap(), Scene::Pre);
/// assert_eq!("prod".parse::<Scene>().unwrap(), Scene::Rel);
/// assert_eq!(Scene::default().to_string(), "dev");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Scene {
    /// Development.
    #[default]
    Dev,
    /// Testing.
    Test,
    /// Demonstration.
    Demo,
    /// Pre-production.
    Pre,
    /// Production.
    Rel,
}

impl Scene {
    /// Returns the canonical lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Scene::Dev => "dev",
            Scene::Test => "test",
            Scene::Demo => "demo",
            Scene::Pre => "pre",
            Scene::Rel => "rel",
        }
    }

    /// True for [`Scene::Rel`].
    pub fn is_production(&self) -> bool {
        matches!(self, Scene::Rel)
    }
}

impl fmt::Display for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no known [`Scene`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown scene {0:?}")]
pub struct ParseSceneError(String);

impl FromStr for Scene {
    type Err = ParseSceneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dev" | "development" => Ok(Scene::Dev),
            "test" => Ok(Scene::Test),
            "demo" => Ok(Scene::Demo),
            "pre" | "staging" => Ok(Scene::Pre),
            "rel" | "prod" | "release" => Ok(Scene::Rel),
            _ => Err(ParseSceneError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(" REL ".parse::<Scene>(), Ok(Scene::Rel));
        assert_eq!("Demo".parse::<Scene>(), Ok(Scene::Demo));
    }

    #[test]
    fn test_display_round_trips() {
        for scene in [Scene::Dev, Scene::Test, Scene::Demo, Scene::Pre, Scene::Rel] {
            assert_eq!(scene.to_string().parse::<Scene>(), Ok(scene));
        }
    }

    #[test]
    fn test_unknown_scene() {
        let err = "qa".parse::<Scene>().unwrap_err();
        assert_eq!(err.to_string(), "unknown scene \"qa\"");
    }

    #[test]
    fn test_only_rel_is_production() {
        assert!(Scene::Rel.is_production());
        assert!(!Scene::Pre.is_production());
    }
}
