use crate::controller::{Resource, SearchMode};
use crate::client::UpdateMethod;
use crate::forms::{FieldKind, FieldSpec, FormDraft, Schema};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl User {
    #[cfg(test)]
    pub fn sample(id: &str, name: &str) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: None,
            phone: "9000000000".into(),
            address: None,
            created_at: None,
        }
    }
}

impl Resource for User {
    const PATH: &'static str = "users";
    const LABEL: &'static str = "User";
    const KEYS: &'static [&'static str] = &["users", "user"];
    const UPDATE: UpdateMethod = UpdateMethod::Patch;
    const SEARCH: SearchMode = SearchMode::Server { path: "search" };
    const COLUMNS: &'static [&'static str] = &["Name", "Email", "Phone", "Address"];

    fn id(&self) -> &str {
        &self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.email.as_deref().unwrap_or(""),
            self.phone.as_str(),
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.email.clone().unwrap_or_default(),
            self.phone.clone(),
            self.address.clone().unwrap_or_default(),
        ]
    }

    fn schema() -> Schema {
        Schema::new()
            .field(FieldSpec::text("name", "Name").required().max_len(80))
            .field(FieldSpec::new("email", "Email", FieldKind::Email).email())
            .field(FieldSpec::text("phone", "Phone").required().min_len(10).max_len(15))
            .field(FieldSpec::new("address", "Address", FieldKind::TextArea).max_len(300))
    }

    fn to_draft(&self) -> FormDraft {
        FormDraft::new()
            .with("name", &self.name)
            .with("email", self.email.clone().unwrap_or_default())
            .with("phone", &self.phone)
            .with("address", self.address.clone().unwrap_or_default())
    }
}
