use super::reference::{id_of, label_of, Ref, Summary};
use crate::controller::Resource;
use crate::forms::{FieldKind, FieldSpec, FormDraft, Schema};
use serde::{Deserialize, Serialize};

/// A franchise manager account.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Manager {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub franchise: Option<Ref<Summary>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Resource for Manager {
    const PATH: &'static str = "managers";
    const LABEL: &'static str = "Manager";
    const KEYS: &'static [&'static str] = &["managers", "manager"];
    const COLUMNS: &'static [&'static str] = &["Name", "Email", "Phone", "Franchise"];

    fn id(&self) -> &str {
        &self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.email.as_str(),
            self.phone.as_str(),
            label_of(&self.franchise),
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.email.clone(),
            self.phone.clone(),
            label_of(&self.franchise).to_string(),
        ]
    }

    fn schema() -> Schema {
        Schema::new()
            .field(FieldSpec::text("name", "Name").required().max_len(80))
            .field(FieldSpec::new("email", "Email", FieldKind::Email).required().email())
            .field(FieldSpec::text("phone", "Phone").required().min_len(10).max_len(15))
            .field(FieldSpec::new("password", "Password", FieldKind::Password).required().min_len(6))
            .field(FieldSpec::text("franchise", "Franchise").required())
    }

    fn edit_schema() -> Schema {
        Self::schema().without("password")
    }

    fn to_draft(&self) -> FormDraft {
        FormDraft::new()
            .with("name", &self.name)
            .with("email", &self.email)
            .with("phone", &self.phone)
            .with("franchise", id_of(&self.franchise))
    }
}
