use super::reference::{Ref, Summary};
use crate::controller::Resource;
use crate::forms::{FieldKind, FieldSpec, FormDraft, Schema};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    pub duration_days: u32,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub franchises: Vec<Ref<Summary>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Subscription {
    pub fn franchise_ids(&self) -> Vec<String> {
        self.franchises.iter().map(|f| f.id().to_string()).collect()
    }
}

impl Resource for Subscription {
    const PATH: &'static str = "subscriptions";
    const LABEL: &'static str = "Subscription";
    const KEYS: &'static [&'static str] = &["subscriptions", "subscription"];
    // the list endpoint populates franchises; the save response does not
    const RECONCILE: crate::controller::Reconcile = crate::controller::Reconcile::Refetch;
    const COLUMNS: &'static [&'static str] = &["Title", "Price", "Duration", "Franchises", "Images"];

    fn id(&self) -> &str {
        &self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.title.as_str(), self.description.as_str()]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.title.clone(),
            format!("{:.2}", self.price),
            format!("{} days", self.duration_days),
            self.franchises
                .iter()
                .map(|f| f.label())
                .collect::<Vec<_>>()
                .join(", "),
            self.images.len().to_string(),
        ]
    }

    fn schema() -> Schema {
        Schema::new()
            .field(FieldSpec::text("title", "Title").required().max_len(100))
            .field(FieldSpec::new("description", "Description", FieldKind::TextArea).required().max_len(2000))
            .field(FieldSpec::number("price", "Price").required().min(0.0))
            .field(FieldSpec::number("durationDays", "Duration (days)").required().integer().min(1.0))
            .field(FieldSpec::new("images", "Images", FieldKind::Images))
    }

    fn to_draft(&self) -> FormDraft {
        FormDraft::new()
            .with("title", &self.title)
            .with("description", &self.description)
            .with("price", self.price.to_string())
            .with("durationDays", self.duration_days.to_string())
            .with_list("images", self.images.clone())
            .with_list("franchises", self.franchise_ids())
    }
}
