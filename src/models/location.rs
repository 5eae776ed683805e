use super::reference::Named;
use crate::controller::Resource;
use crate::forms::{FieldSpec, FormDraft, Schema};
use serde::{Deserialize, Serialize};

/// A delivery area, keyed by pincode.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
    pub pincode: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
}

impl Named for Location {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Resource for Location {
    const PATH: &'static str = "locations";
    const LABEL: &'static str = "Location";
    const KEYS: &'static [&'static str] = &["locations", "location"];
    const COLUMNS: &'static [&'static str] = &["Name", "Pincode", "City"];

    fn id(&self) -> &str {
        &self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.pincode.as_str(),
            self.city.as_deref().unwrap_or(""),
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.pincode.clone(),
            self.city.clone().unwrap_or_default(),
        ]
    }

    fn schema() -> Schema {
        Schema::new()
            .field(FieldSpec::text("name", "Name").required().max_len(80))
            .field(FieldSpec::text("pincode", "Pincode").required().min_len(6).max_len(6))
            .field(FieldSpec::text("city", "City").max_len(60))
    }

    fn to_draft(&self) -> FormDraft {
        FormDraft::new()
            .with("name", &self.name)
            .with("pincode", &self.pincode)
            .with("city", self.city.clone().unwrap_or_default())
    }
}
