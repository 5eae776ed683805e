use super::reference::{id_of, label_of, Named, Ref, Summary};
use crate::controller::Resource;
use crate::forms::{FieldSpec, FormDraft, Schema};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Franchise {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub location: Option<Ref<Summary>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Named for Franchise {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Resource for Franchise {
    const PATH: &'static str = "franchises";
    const LABEL: &'static str = "Franchise";
    const KEYS: &'static [&'static str] = &["franchises", "franchise"];
    const COLUMNS: &'static [&'static str] = &["Name", "Location"];

    fn id(&self) -> &str {
        &self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), label_of(&self.location)]
    }

    fn cells(&self) -> Vec<String> {
        vec![self.name.clone(), label_of(&self.location).to_string()]
    }

    fn schema() -> Schema {
        Schema::new()
            .field(FieldSpec::text("name", "Name").required().max_len(80))
            .field(FieldSpec::text("location", "Location"))
    }

    fn to_draft(&self) -> FormDraft {
        FormDraft::new()
            .with("name", &self.name)
            .with("location", id_of(&self.location))
    }
}
