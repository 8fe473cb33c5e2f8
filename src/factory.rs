//! Default data for each component type, and the palette the editor offers.

use crate::component::*;
use crate::config::{BuilderConfig, QuizConfig};
use crate::error::Result;
use crate::ids::IdGenerator;

const DEFAULT_QUIZ_LABELS: [&str; 4] = ["Option A", "Option B", "Option C", "Option D"];

/// One entry of the component palette shown to authors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteEntry {
    pub kind: ComponentType,
    pub label: &'static str,
    pub icon: &'static str,
    pub description: &'static str,
}

static PALETTE: [PaletteEntry; 9] = [
    PaletteEntry {
        kind: ComponentType::Text,
        label: "Text Block",
        icon: "Type",
        description: "Rich text content with formatting options",
    },
    PaletteEntry {
        kind: ComponentType::Video,
        label: "Video Player",
        icon: "Video",
        description: "Embed videos from URL or upload",
    },
    PaletteEntry {
        kind: ComponentType::Image,
        label: "Image",
        icon: "Image",
        description: "Add images with captions",
    },
    PaletteEntry {
        kind: ComponentType::Quiz,
        label: "Quiz",
        icon: "HelpCircle",
        description: "Multiple choice questions",
    },
    PaletteEntry {
        kind: ComponentType::FileDownload,
        label: "File Download",
        icon: "Download",
        description: "Downloadable course materials",
    },
    PaletteEntry {
        kind: ComponentType::Audio,
        label: "Audio Player",
        icon: "Volume2",
        description: "Audio content and podcasts",
    },
    PaletteEntry {
        kind: ComponentType::Code,
        label: "Code Block",
        icon: "Code",
        description: "Syntax highlighted code examples",
    },
    PaletteEntry {
        kind: ComponentType::Divider,
        label: "Divider",
        icon: "Minus",
        description: "Visual separator between sections",
    },
    PaletteEntry {
        kind: ComponentType::Spacer,
        label: "Spacer",
        icon: "Space",
        description: "Add vertical spacing",
    },
];

#[derive(Debug, Clone)]
pub struct ComponentFactory {
    padding: String,
    quiz: QuizConfig,
}

impl ComponentFactory {
    pub fn new(config: &BuilderConfig) -> Self {
        Self {
            padding: config.builder.default_padding.clone(),
            quiz: config.quiz.clone(),
        }
    }

    pub fn palette() -> &'static [PaletteEntry] {
        &PALETTE
    }

    pub fn palette_entry(kind: ComponentType) -> &'static PaletteEntry {
        // PALETTE lists every type in ComponentType::ALL order
        let index = ComponentType::ALL
            .iter()
            .position(|k| *k == kind)
            .unwrap_or_default();
        &PALETTE[index]
    }

    /// Default data for `kind`. Quiz options get fresh ids from `ids`.
    pub fn default_data(&self, kind: ComponentType, ids: &mut IdGenerator) -> ComponentData {
        match kind {
            ComponentType::Text => ComponentData::Text(TextBlock {
                content: "<p>Enter your text here...</p>".to_string(),
                style: Style {
                    background_color: Some("#ffffff".to_string()),
                    text_color: Some("#000000".to_string()),
                    padding: self.padding(),
                    ..Style::default()
                },
            }),
            ComponentType::Video => ComponentData::Video(VideoBlock {
                video_url: String::new(),
                autoplay: false,
                controls: true,
                style: self.padded(),
            }),
            ComponentType::Image => ComponentData::Image(ImageBlock {
                image_url: String::new(),
                alt: "Course image".to_string(),
                caption: String::new(),
                style: self.padded(),
            }),
            ComponentType::Quiz => {
                let mut options: Vec<QuizOption> = Vec::with_capacity(DEFAULT_QUIZ_LABELS.len());
                for label in DEFAULT_QUIZ_LABELS {
                    let id = ids.next_option_id(options.iter().map(|o| o.id.as_str()));
                    options.push(QuizOption {
                        id,
                        text: label.to_string(),
                    });
                }
                ComponentData::Quiz(QuizBlock {
                    question: "What is the correct answer?".to_string(),
                    options,
                    correct_answer: 0,
                    explanation: "Explanation for the correct answer...".to_string(),
                    style: self.padded(),
                })
            }
            ComponentType::FileDownload => ComponentData::FileDownload(FileDownloadBlock {
                file_name: "course-material.pdf".to_string(),
                file_url: String::new(),
                file_size: "2.5 MB".to_string(),
                style: self.padded(),
            }),
            ComponentType::Audio => ComponentData::Audio(AudioBlock {
                audio_url: String::new(),
                title: "Audio Lesson".to_string(),
                style: self.padded(),
            }),
            ComponentType::Code => ComponentData::Code(CodeBlock {
                code: "println!(\"Hello, World!\");".to_string(),
                language: "generic".to_string(),
                style: Style {
                    background_color: Some("#f8f9fa".to_string()),
                    padding: self.padding(),
                    ..Style::default()
                },
            }),
            ComponentType::Divider => ComponentData::Divider(StyleBlock {
                style: Style {
                    background_color: Some("#e2e8f0".to_string()),
                    margin: Some("24px 0".to_string()),
                    ..Style::default()
                },
            }),
            ComponentType::Spacer => ComponentData::Spacer(StyleBlock {
                style: Style {
                    padding: Some("32px".to_string()),
                    ..Style::default()
                },
            }),
        }
    }

    /// Default data for `kind` with `overrides` merged on top.
    pub fn create(
        &self,
        kind: ComponentType,
        overrides: Option<&ComponentPatch>,
        ids: &mut IdGenerator,
    ) -> Result<ComponentData> {
        let data = self.default_data(kind, ids);
        match overrides {
            Some(patch) => data.patched(patch, &self.quiz),
            None => Ok(data),
        }
    }

    fn padding(&self) -> Option<String> {
        Some(self.padding.clone())
    }

    fn padded(&self) -> Style {
        Style {
            padding: self.padding(),
            ..Style::default()
        }
    }
}

impl Default for ComponentFactory {
    fn default() -> Self {
        Self::new(&BuilderConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BuilderError;
    use std::collections::HashSet;

    #[test]
    fn test_default_quiz() {
        let factory = ComponentFactory::default();
        let mut ids = IdGenerator::with_seed(11);
        let data = factory.default_data(ComponentType::Quiz, &mut ids);
        let quiz = data.as_quiz().unwrap();

        assert_eq!(quiz.options.len(), 4);
        assert_eq!(quiz.correct_answer, 0);
        let unique: HashSet<&str> = quiz.option_ids().collect();
        assert_eq!(unique.len(), 4);
        let labels: Vec<&str> = quiz.options.iter().map(|o| o.text.as_str()).collect();
        assert_eq!(labels, DEFAULT_QUIZ_LABELS);
    }

    #[test]
    fn test_every_type_has_matching_defaults() {
        let factory = ComponentFactory::default();
        let mut ids = IdGenerator::new();
        for kind in ComponentType::ALL {
            let data = factory.default_data(kind, &mut ids);
            assert_eq!(data.kind(), kind);
            assert!(data.validate(&QuizConfig::default()).is_ok());
        }
    }

    #[test]
    fn test_configured_padding() {
        let mut config = BuilderConfig::default();
        config.builder.default_padding = "20px".to_string();
        let factory = ComponentFactory::new(&config);
        let mut ids = IdGenerator::new();

        let video = factory.default_data(ComponentType::Video, &mut ids);
        assert_eq!(video.style().padding.as_deref(), Some("20px"));
        let spacer = factory.default_data(ComponentType::Spacer, &mut ids);
        assert_eq!(spacer.style().padding.as_deref(), Some("32px"));
    }

    #[test]
    fn test_code_and_divider_defaults() {
        let factory = ComponentFactory::default();
        let mut ids = IdGenerator::new();
        match factory.default_data(ComponentType::Code, &mut ids) {
            ComponentData::Code(block) => {
                assert_eq!(block.language, "generic");
                assert_eq!(block.style.background_color.as_deref(), Some("#f8f9fa"));
            }
            other => panic!("unexpected data: {:?}", other),
        }
        let divider = factory.default_data(ComponentType::Divider, &mut ids);
        assert_eq!(divider.style().margin.as_deref(), Some("24px 0"));
        assert_eq!(divider.style().padding, None);
    }

    #[test]
    fn test_create_with_overrides() {
        let factory = ComponentFactory::default();
        let mut ids = IdGenerator::new();
        let patch = ComponentPatch::fields(FieldsPatch::Image(ImagePatch {
            alt: Some("Diagram".to_string()),
            ..ImagePatch::default()
        }));
        match factory.create(ComponentType::Image, Some(&patch), &mut ids).unwrap() {
            ComponentData::Image(block) => {
                assert_eq!(block.alt, "Diagram");
                assert_eq!(block.caption, "");
            }
            other => panic!("unexpected data: {:?}", other),
        }

        let err = factory
            .create(ComponentType::Audio, Some(&patch), &mut ids)
            .unwrap_err();
        assert!(matches!(err, BuilderError::TypeMismatch { .. }));
    }

    #[test]
    fn test_palette_covers_all_types_in_order() {
        let kinds: Vec<ComponentType> =
            ComponentFactory::palette().iter().map(|e| e.kind).collect();
        assert_eq!(kinds, ComponentType::ALL.to_vec());
        assert_eq!(
            ComponentFactory::palette_entry(ComponentType::FileDownload).label,
            "File Download"
        );
    }
}
