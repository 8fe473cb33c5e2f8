use crate::error::BuilderError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The closed set of lesson component types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComponentType {
    Text,
    Video,
    Image,
    Quiz,
    FileDownload,
    Audio,
    Code,
    Divider,
    Spacer,
}

impl ComponentType {
    /// Every type, in palette order.
    pub const ALL: [ComponentType; 9] = [
        ComponentType::Text,
        ComponentType::Video,
        ComponentType::Image,
        ComponentType::Quiz,
        ComponentType::FileDownload,
        ComponentType::Audio,
        ComponentType::Code,
        ComponentType::Divider,
        ComponentType::Spacer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentType::Text => "text",
            ComponentType::Video => "video",
            ComponentType::Image => "image",
            ComponentType::Quiz => "quiz",
            ComponentType::FileDownload => "file-download",
            ComponentType::Audio => "audio",
            ComponentType::Code => "code",
            ComponentType::Divider => "divider",
            ComponentType::Spacer => "spacer",
        }
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComponentType {
    type Err = BuilderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ComponentType::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == wanted)
            .ok_or_else(|| BuilderError::InvalidType(wanted.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_types() {
        for kind in ComponentType::ALL {
            assert_eq!(kind.as_str().parse::<ComponentType>().unwrap(), kind);
        }
        assert_eq!(
            " file-download ".parse::<ComponentType>().unwrap(),
            ComponentType::FileDownload
        );
    }

    #[test]
    fn test_parse_unknown_type() {
        let err = "slideshow".parse::<ComponentType>().unwrap_err();
        assert_eq!(err, BuilderError::InvalidType("slideshow".to_string()));
        assert!("Text".parse::<ComponentType>().is_err());
    }

    #[test]
    fn test_serde_names_match_display() {
        let json = serde_json::to_string(&ComponentType::FileDownload).unwrap();
        assert_eq!(json, "\"file-download\"");
    }
}
