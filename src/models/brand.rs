use crate::controller::Resource;
use crate::forms::{FieldKind, FieldSpec, FormDraft, Schema};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Brand {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Resource for Brand {
    const PATH: &'static str = "brands";
    const LABEL: &'static str = "Brand";
    const KEYS: &'static [&'static str] = &["brands", "brand"];
    const PAGE_SIZE: Option<u32> = Some(12);
    const COLUMNS: &'static [&'static str] = &["Name", "Logo"];

    fn id(&self) -> &str {
        &self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str()]
    }

    fn cells(&self) -> Vec<String> {
        vec![self.name.clone(), self.logo.clone().unwrap_or_default()]
    }

    fn schema() -> Schema {
        Schema::new()
            .field(FieldSpec::text("name", "Name").required().max_len(60))
            .field(FieldSpec::new("logo", "Logo", FieldKind::Image))
    }

    fn to_draft(&self) -> FormDraft {
        FormDraft::new().with("name", &self.name)
    }
}
