use super::quiz::{QuizBlock, QuizPatch};
use super::types::ComponentType;
use crate::config::QuizConfig;
use crate::error::{BuilderError, Result};
use serde::{Deserialize, Serialize, Serializer};

/// Styling shared by every component type. Unset fields fall back to the
/// renderer's defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Style {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<String>,
}

/// Partial style update. `Some(None)` clears a field, `None` leaves it alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StylePatch {
    pub background_color: Option<Option<String>>,
    pub text_color: Option<Option<String>>,
    pub padding: Option<Option<String>>,
    pub margin: Option<Option<String>>,
    pub border_radius: Option<Option<String>>,
}

impl StylePatch {
    pub fn is_empty(&self) -> bool {
        self == &StylePatch::default()
    }

    fn apply(&self, style: &mut Style) {
        merge(&mut style.background_color, &self.background_color);
        merge(&mut style.text_color, &self.text_color);
        merge(&mut style.padding, &self.padding);
        merge(&mut style.margin, &self.margin);
        merge(&mut style.border_radius, &self.border_radius);
    }
}

fn merge<T: Clone>(target: &mut T, patch: &Option<T>) {
    if let Some(value) = patch {
        *target = value.clone();
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextBlock {
    pub content: String,
    #[serde(flatten)]
    pub style: Style,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoBlock {
    pub video_url: String,
    pub autoplay: bool,
    pub controls: bool,
    #[serde(flatten)]
    pub style: Style,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageBlock {
    pub image_url: String,
    pub alt: String,
    pub caption: String,
    #[serde(flatten)]
    pub style: Style,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileDownloadBlock {
    pub file_name: String,
    pub file_url: String,
    pub file_size: String,
    #[serde(flatten)]
    pub style: Style,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioBlock {
    pub audio_url: String,
    pub title: String,
    #[serde(flatten)]
    pub style: Style,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeBlock {
    pub code: String,
    pub language: String,
    #[serde(flatten)]
    pub style: Style,
}

/// Divider and spacer carry nothing but styling.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleBlock {
    #[serde(flatten)]
    pub style: Style,
}

/// Typed payload of a component, one variant per `ComponentType`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComponentData {
    Text(TextBlock),
    Video(VideoBlock),
    Image(ImageBlock),
    Quiz(QuizBlock),
    FileDownload(FileDownloadBlock),
    Audio(AudioBlock),
    Code(CodeBlock),
    Divider(StyleBlock),
    Spacer(StyleBlock),
}

impl ComponentData {
    pub fn kind(&self) -> ComponentType {
        match self {
            ComponentData::Text(_) => ComponentType::Text,
            ComponentData::Video(_) => ComponentType::Video,
            ComponentData::Image(_) => ComponentType::Image,
            ComponentData::Quiz(_) => ComponentType::Quiz,
            ComponentData::FileDownload(_) => ComponentType::FileDownload,
            ComponentData::Audio(_) => ComponentType::Audio,
            ComponentData::Code(_) => ComponentType::Code,
            ComponentData::Divider(_) => ComponentType::Divider,
            ComponentData::Spacer(_) => ComponentType::Spacer,
        }
    }

    pub fn style(&self) -> &Style {
        match self {
            ComponentData::Text(b) => &b.style,
            ComponentData::Video(b) => &b.style,
            ComponentData::Image(b) => &b.style,
            ComponentData::Quiz(b) => &b.style,
            ComponentData::FileDownload(b) => &b.style,
            ComponentData::Audio(b) => &b.style,
            ComponentData::Code(b) => &b.style,
            ComponentData::Divider(b) | ComponentData::Spacer(b) => &b.style,
        }
    }

    fn style_mut(&mut self) -> &mut Style {
        match self {
            ComponentData::Text(b) => &mut b.style,
            ComponentData::Video(b) => &mut b.style,
            ComponentData::Image(b) => &mut b.style,
            ComponentData::Quiz(b) => &mut b.style,
            ComponentData::FileDownload(b) => &mut b.style,
            ComponentData::Audio(b) => &mut b.style,
            ComponentData::Code(b) => &mut b.style,
            ComponentData::Divider(b) | ComponentData::Spacer(b) => &mut b.style,
        }
    }

    pub fn as_quiz(&self) -> Option<&QuizBlock> {
        match self {
            ComponentData::Quiz(quiz) => Some(quiz),
            _ => None,
        }
    }

    pub fn as_quiz_mut(&mut self) -> Option<&mut QuizBlock> {
        match self {
            ComponentData::Quiz(quiz) => Some(quiz),
            _ => None,
        }
    }

    /// Returns a copy of this data with `patch` merged on top.
    ///
    /// Fields absent from the patch keep their current value. The result is
    /// validated, so a patch that breaks a quiz invariant is rejected and
    /// `self` is never touched.
    pub fn patched(&self, patch: &ComponentPatch, quiz: &QuizConfig) -> Result<ComponentData> {
        let mut next = self.clone();
        match (&mut next, &patch.fields) {
            (_, FieldsPatch::StyleOnly) => {}
            (ComponentData::Text(b), FieldsPatch::Text(p)) => {
                merge(&mut b.content, &p.content);
            }
            (ComponentData::Video(b), FieldsPatch::Video(p)) => {
                merge(&mut b.video_url, &p.video_url);
                merge(&mut b.autoplay, &p.autoplay);
                merge(&mut b.controls, &p.controls);
            }
            (ComponentData::Image(b), FieldsPatch::Image(p)) => {
                merge(&mut b.image_url, &p.image_url);
                merge(&mut b.alt, &p.alt);
                merge(&mut b.caption, &p.caption);
            }
            (ComponentData::Quiz(b), FieldsPatch::Quiz(p)) => p.apply(b),
            (ComponentData::FileDownload(b), FieldsPatch::FileDownload(p)) => {
                merge(&mut b.file_name, &p.file_name);
                merge(&mut b.file_url, &p.file_url);
                merge(&mut b.file_size, &p.file_size);
            }
            (ComponentData::Audio(b), FieldsPatch::Audio(p)) => {
                merge(&mut b.audio_url, &p.audio_url);
                merge(&mut b.title, &p.title);
            }
            (ComponentData::Code(b), FieldsPatch::Code(p)) => {
                merge(&mut b.code, &p.code);
                merge(&mut b.language, &p.language);
            }
            (data, fields) => {
                return Err(BuilderError::TypeMismatch {
                    expected: fields.target().unwrap_or(data.kind()),
                    found: data.kind(),
                });
            }
        }
        patch.style.apply(next.style_mut());
        next.validate(quiz)?;
        Ok(next)
    }

    /// Checks the invariants that typing alone cannot express.
    pub fn validate(&self, quiz: &QuizConfig) -> Result<()> {
        match self {
            ComponentData::Quiz(block) => block.validate(quiz),
            _ => Ok(()),
        }
    }

    pub(crate) fn from_value(kind: ComponentType, value: serde_json::Value) -> Result<Self> {
        Ok(match kind {
            ComponentType::Text => ComponentData::Text(serde_json::from_value(value)?),
            ComponentType::Video => ComponentData::Video(serde_json::from_value(value)?),
            ComponentType::Image => ComponentData::Image(serde_json::from_value(value)?),
            ComponentType::Quiz => ComponentData::Quiz(serde_json::from_value(value)?),
            ComponentType::FileDownload => {
                ComponentData::FileDownload(serde_json::from_value(value)?)
            }
            ComponentType::Audio => ComponentData::Audio(serde_json::from_value(value)?),
            ComponentType::Code => ComponentData::Code(serde_json::from_value(value)?),
            ComponentType::Divider => ComponentData::Divider(serde_json::from_value(value)?),
            ComponentType::Spacer => ComponentData::Spacer(serde_json::from_value(value)?),
        })
    }
}

// The type tag lives on the component, so data serializes as the bare block.
impl Serialize for ComponentData {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            ComponentData::Text(b) => b.serialize(serializer),
            ComponentData::Video(b) => b.serialize(serializer),
            ComponentData::Image(b) => b.serialize(serializer),
            ComponentData::Quiz(b) => b.serialize(serializer),
            ComponentData::FileDownload(b) => b.serialize(serializer),
            ComponentData::Audio(b) => b.serialize(serializer),
            ComponentData::Code(b) => b.serialize(serializer),
            ComponentData::Divider(b) | ComponentData::Spacer(b) => b.serialize(serializer),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextPatch {
    pub content: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VideoPatch {
    pub video_url: Option<String>,
    pub autoplay: Option<bool>,
    pub controls: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImagePatch {
    pub image_url: Option<String>,
    pub alt: Option<String>,
    pub caption: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileDownloadPatch {
    pub file_name: Option<String>,
    pub file_url: Option<String>,
    pub file_size: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AudioPatch {
    pub audio_url: Option<String>,
    pub title: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodePatch {
    pub code: Option<String>,
    pub language: Option<String>,
}

/// Type-specific half of a [`ComponentPatch`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FieldsPatch {
    /// Touches styling only; valid for every type.
    #[default]
    StyleOnly,
    Text(TextPatch),
    Video(VideoPatch),
    Image(ImagePatch),
    Quiz(QuizPatch),
    FileDownload(FileDownloadPatch),
    Audio(AudioPatch),
    Code(CodePatch),
}

impl FieldsPatch {
    /// The component type this patch applies to, if it is type-specific.
    pub fn target(&self) -> Option<ComponentType> {
        match self {
            FieldsPatch::StyleOnly => None,
            FieldsPatch::Text(_) => Some(ComponentType::Text),
            FieldsPatch::Video(_) => Some(ComponentType::Video),
            FieldsPatch::Image(_) => Some(ComponentType::Image),
            FieldsPatch::Quiz(_) => Some(ComponentType::Quiz),
            FieldsPatch::FileDownload(_) => Some(ComponentType::FileDownload),
            FieldsPatch::Audio(_) => Some(ComponentType::Audio),
            FieldsPatch::Code(_) => Some(ComponentType::Code),
        }
    }
}

/// Shallow partial update of a component's data. Identity, type and order
/// are not reachable through a patch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComponentPatch {
    pub style: StylePatch,
    pub fields: FieldsPatch,
}

impl ComponentPatch {
    pub fn fields(fields: FieldsPatch) -> Self {
        Self {
            style: StylePatch::default(),
            fields,
        }
    }

    pub fn style(style: StylePatch) -> Self {
        Self {
            style,
            fields: FieldsPatch::StyleOnly,
        }
    }
}

impl From<FieldsPatch> for ComponentPatch {
    fn from(fields: FieldsPatch) -> Self {
        ComponentPatch::fields(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn video() -> ComponentData {
        ComponentData::Video(VideoBlock {
            video_url: String::new(),
            autoplay: false,
            controls: true,
            style: Style {
                padding: Some("16px".to_string()),
                ..Style::default()
            },
        })
    }

    #[test]
    fn test_patch_merges_only_given_fields() {
        let data = video();
        let patch = ComponentPatch::fields(FieldsPatch::Video(VideoPatch {
            video_url: Some("https://example.com/intro.mp4".to_string()),
            ..VideoPatch::default()
        }));
        let next = data.patched(&patch, &QuizConfig::default()).unwrap();
        match next {
            ComponentData::Video(b) => {
                assert_eq!(b.video_url, "https://example.com/intro.mp4");
                assert!(!b.autoplay);
                assert!(b.controls);
                assert_eq!(b.style.padding.as_deref(), Some("16px"));
            }
            other => panic!("unexpected data: {:?}", other),
        }
    }

    #[test]
    fn test_style_patch_sets_and_clears() {
        let data = video();
        let patch = ComponentPatch::style(StylePatch {
            padding: Some(None),
            border_radius: Some(Some("8px".to_string())),
            ..StylePatch::default()
        });
        let next = data.patched(&patch, &QuizConfig::default()).unwrap();
        assert_eq!(next.style().padding, None);
        assert_eq!(next.style().border_radius.as_deref(), Some("8px"));
        assert_eq!(next.kind(), ComponentType::Video);
    }

    #[test]
    fn test_patch_for_other_type_is_rejected() {
        let data = video();
        let patch = ComponentPatch::fields(FieldsPatch::Text(TextPatch {
            content: Some("nope".to_string()),
        }));
        let err = data.patched(&patch, &QuizConfig::default()).unwrap_err();
        assert_eq!(
            err,
            BuilderError::TypeMismatch {
                expected: ComponentType::Text,
                found: ComponentType::Video,
            }
        );
        assert_eq!(data, video());
    }

    #[test]
    fn test_style_only_patch_applies_to_divider() {
        let data = ComponentData::Divider(StyleBlock::default());
        let patch = ComponentPatch::style(StylePatch {
            margin: Some(Some("12px 0".to_string())),
            ..StylePatch::default()
        });
        let next = data.patched(&patch, &QuizConfig::default()).unwrap();
        assert_eq!(next.style().margin.as_deref(), Some("12px 0"));
    }

    #[test]
    fn test_empty_style_patch() {
        assert!(StylePatch::default().is_empty());
        let patch = StylePatch {
            text_color: Some(None),
            ..StylePatch::default()
        };
        assert!(!patch.is_empty());
    }
}
