use crate::controller::Resource;
use crate::forms::{FieldKind, FieldSpec, FormDraft, Schema};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Vendor {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
    pub username: String,
    /// Only ever sent, never returned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub brand_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Resource for Vendor {
    const PATH: &'static str = "vendors";
    const LABEL: &'static str = "Vendor";
    const KEYS: &'static [&'static str] = &["vendors", "vendor"];
    const COLUMNS: &'static [&'static str] = &["Name", "Username", "Brand", "Phone"];

    fn id(&self) -> &str {
        &self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.username.as_str(), self.brand_name.as_str()]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.username.clone(),
            self.brand_name.clone(),
            self.phone.clone().unwrap_or_default(),
        ]
    }

    fn schema() -> Schema {
        Schema::new()
            .field(FieldSpec::text("name", "Name").required().max_len(80))
            .field(FieldSpec::text("username", "Username").required().min_len(3).max_len(30))
            .field(FieldSpec::new("password", "Password", FieldKind::Password).required().min_len(6))
            .field(FieldSpec::text("brandName", "Brand name").required().max_len(80))
            .field(FieldSpec::text("phone", "Phone").min_len(10).max_len(15))
    }

    fn edit_schema() -> Schema {
        Self::schema().without("password")
    }

    fn to_draft(&self) -> FormDraft {
        FormDraft::new()
            .with("name", &self.name)
            .with("username", &self.username)
            .with("brandName", &self.brand_name)
            .with("phone", self.phone.clone().unwrap_or_default())
    }
}
