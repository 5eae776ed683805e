use crate::controller::Resource;
use crate::forms::{FieldKind, FieldSpec, FormDraft, Schema};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DailyTip {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Resource for DailyTip {
    const PATH: &'static str = "daily-tips";
    const LABEL: &'static str = "Daily tip";
    const KEYS: &'static [&'static str] = &["tips", "tip"];
    const COLUMNS: &'static [&'static str] = &["Title", "Tip", "Posted"];

    fn id(&self) -> &str {
        &self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.title.as_str(), self.content.as_str()]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.title.clone(),
            self.content.clone(),
            self.created_at.clone().unwrap_or_default(),
        ]
    }

    fn schema() -> Schema {
        Schema::new()
            .field(FieldSpec::text("title", "Title").required().max_len(120))
            .field(FieldSpec::new("content", "Tip", FieldKind::TextArea).required().min_len(10).max_len(1000))
            .field(FieldSpec::new("image", "Image", FieldKind::Image))
    }

    fn to_draft(&self) -> FormDraft {
        FormDraft::new()
            .with("title", &self.title)
            .with("content", &self.content)
    }
}
