// Lesson components: identifiers, the closed type set, and the typed data
// each type carries. Quiz editing lives in its own submodule.
pub mod data;
pub mod quiz;
pub mod types;

pub use data::*;
pub use quiz::*;
pub use types::*;

use crate::error::BuilderError;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Stable identifier for a component owned by a single `CourseBuilder`.
///
/// IDs are unique within a builder and never reused for its lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentId(String);

impl ComponentId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ComponentId {
    fn from(s: &str) -> Self {
        ComponentId(s.to_string())
    }
}

impl From<String> for ComponentId {
    fn from(s: String) -> Self {
        ComponentId(s)
    }
}

/// One content block in a lesson.
///
/// `id` and the type (carried by `data`) are fixed at creation; `order` is
/// maintained by the owning store and always equals the component's position.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawComponent")]
pub struct Component {
    id: ComponentId,
    order: usize,
    data: ComponentData,
}

impl Component {
    pub(crate) fn new(id: ComponentId, order: usize, data: ComponentData) -> Self {
        Self { id, order, data }
    }

    pub fn id(&self) -> &ComponentId {
        &self.id
    }

    pub fn kind(&self) -> ComponentType {
        self.data.kind()
    }

    pub fn order(&self) -> usize {
        self.order
    }

    pub fn data(&self) -> &ComponentData {
        &self.data
    }

    pub fn style(&self) -> &Style {
        self.data.style()
    }

    pub(crate) fn data_mut(&mut self) -> &mut ComponentData {
        &mut self.data
    }

    pub(crate) fn set_data(&mut self, data: ComponentData) {
        self.data = data;
    }

    pub(crate) fn set_order(&mut self, order: usize) {
        self.order = order;
    }
}

impl Serialize for Component {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Component", 4)?;
        state.serialize_field("id", &self.id)?;
        state.serialize_field("type", &self.kind())?;
        state.serialize_field("order", &self.order)?;
        state.serialize_field("data", &self.data)?;
        state.end()
    }
}

/// Wire shape of a component: the `data` object is decoded once `type` is known.
#[derive(Deserialize)]
struct RawComponent {
    id: ComponentId,
    #[serde(rename = "type")]
    kind: ComponentType,
    order: usize,
    data: serde_json::Value,
}

impl TryFrom<RawComponent> for Component {
    type Error = BuilderError;

    fn try_from(raw: RawComponent) -> Result<Self, Self::Error> {
        let data = ComponentData::from_value(raw.kind, raw.data)?;
        Ok(Component::new(raw.id, raw.order, data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_component() -> Component {
        Component::new(
            ComponentId::from("component-1"),
            0,
            ComponentData::Text(TextBlock {
                content: "<p>Hi</p>".to_string(),
                style: Style {
                    padding: Some("16px".to_string()),
                    ..Style::default()
                },
            }),
        )
    }

    #[test]
    fn test_component_wire_shape() {
        let value = serde_json::to_value(text_component()).unwrap();
        assert_eq!(value["id"], "component-1");
        assert_eq!(value["type"], "text");
        assert_eq!(value["order"], 0);
        assert_eq!(value["data"]["content"], "<p>Hi</p>");
        assert_eq!(value["data"]["padding"], "16px");
        assert!(value["data"].get("backgroundColor").is_none());
    }

    #[test]
    fn test_component_decodes_data_by_type() {
        let json = r#"{
            "id": "component-7",
            "type": "file-download",
            "order": 3,
            "data": {
                "fileName": "notes.pdf",
                "fileUrl": "",
                "fileSize": "1 MB",
                "padding": "8px"
            }
        }"#;
        let component: Component = serde_json::from_str(json).unwrap();
        assert_eq!(component.kind(), ComponentType::FileDownload);
        assert_eq!(component.order(), 3);
        assert_eq!(component.style().padding.as_deref(), Some("8px"));
        match component.data() {
            ComponentData::FileDownload(block) => assert_eq!(block.file_name, "notes.pdf"),
            other => panic!("unexpected data: {:?}", other),
        }
    }

    #[test]
    fn test_component_rejects_unknown_type() {
        let json = r#"{"id": "c", "type": "carousel", "order": 0, "data": {}}"#;
        assert!(serde_json::from_str::<Component>(json).is_err());
    }

    #[test]
    fn test_component_rejects_data_of_wrong_shape() {
        let json = r#"{"id": "c", "type": "video", "order": 0, "data": {"content": "x"}}"#;
        assert!(serde_json::from_str::<Component>(json).is_err());
    }
}
