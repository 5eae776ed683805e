use crate::controller::Resource;
use crate::forms::{FieldKind, FieldSpec, FormDraft, Schema};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Resource for Category {
    const PATH: &'static str = "categories";
    const LABEL: &'static str = "Category";
    const KEYS: &'static [&'static str] = &["categories", "category"];
    const COLUMNS: &'static [&'static str] = &["Name", "Description"];

    fn id(&self) -> &str {
        &self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str()]
    }

    fn cells(&self) -> Vec<String> {
        vec![self.name.clone(), self.description.clone().unwrap_or_default()]
    }

    fn schema() -> Schema {
        Schema::new()
            .field(FieldSpec::text("name", "Name").required().max_len(60))
            .field(FieldSpec::new("description", "Description", FieldKind::TextArea).max_len(500))
            .field(FieldSpec::new("image", "Image", FieldKind::Image).required())
    }

    // keeping the current image is allowed when editing
    fn edit_schema() -> Schema {
        Self::schema()
            .without("image")
            .field(FieldSpec::new("image", "Image", FieldKind::Image))
    }

    fn to_draft(&self) -> FormDraft {
        FormDraft::new()
            .with("name", &self.name)
            .with("description", self.description.clone().unwrap_or_default())
    }
}
