use super::reference::{id_of, label_of, Ref, Summary};
use crate::controller::{Reconcile, Resource};
use crate::forms::{FieldKind, FieldSpec, FormDraft, Schema};
use serde::{Deserialize, Serialize};

pub const BULK_DELIVERY_STATUSES: &[&str] = &["scheduled", "dispatched", "delivered", "cancelled"];

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BulkDelivery {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub location: Option<Ref<Summary>>,
    pub quantity: u32,
    pub delivery_date: String,
    #[serde(default)]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Resource for BulkDelivery {
    const PATH: &'static str = "bulk-deliveries";
    const LABEL: &'static str = "Bulk delivery";
    const KEYS: &'static [&'static str] = &["deliveries", "delivery"];
    // saves come back with an unpopulated location
    const RECONCILE: Reconcile = Reconcile::Refetch;
    const COLUMNS: &'static [&'static str] = &["Location", "Quantity", "Date", "Status", "Notes"];

    fn id(&self) -> &str {
        &self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![label_of(&self.location), self.notes.as_deref().unwrap_or("")]
    }

    fn status(&self) -> Option<&str> {
        Some(self.status.as_str())
    }

    fn cells(&self) -> Vec<String> {
        vec![
            label_of(&self.location).to_string(),
            self.quantity.to_string(),
            self.delivery_date.clone(),
            self.status.clone(),
            self.notes.clone().unwrap_or_default(),
        ]
    }

    fn schema() -> Schema {
        Schema::new()
            .field(FieldSpec::text("location", "Location").required())
            .field(FieldSpec::number("quantity", "Quantity").required().integer().min(1.0))
            .field(FieldSpec::text("deliveryDate", "Delivery date").required())
            .field(
                FieldSpec::new("status", "Status", FieldKind::Select(BULK_DELIVERY_STATUSES)).required(),
            )
            .field(FieldSpec::new("notes", "Notes", FieldKind::TextArea).max_len(500))
    }

    fn to_draft(&self) -> FormDraft {
        FormDraft::new()
            .with("location", id_of(&self.location))
            .with("quantity", self.quantity.to_string())
            .with("deliveryDate", &self.delivery_date)
            .with("status", &self.status)
            .with("notes", self.notes.clone().unwrap_or_default())
    }
}
