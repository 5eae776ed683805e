use super::reference::{label_of, Named, Ref, Summary};
use crate::controller::Resource;
use crate::forms::{FieldKind, FieldSpec, FormDraft, Schema};
use serde::{Deserialize, Serialize};

pub const BOX_STATUSES: &[&str] = &["available", "assigned", "in-transit", "returned", "damaged"];

/// The order a box is out on, populated two levels deep down to its user.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub order_number: Option<String>,
    #[serde(default)]
    pub user: Option<Ref<Summary>>,
}

impl Named for OrderSummary {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        self.order_number.as_deref().unwrap_or(&self.id)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryBox {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub box_number: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub order: Option<Ref<OrderSummary>>,
}

impl DeliveryBox {
    /// Customer holding the box, when the order came back populated.
    pub fn customer(&self) -> &str {
        match &self.order {
            Some(Ref::Populated(order)) => label_of(&order.user),
            _ => "",
        }
    }
}

impl Resource for DeliveryBox {
    const PATH: &'static str = "boxes";
    const LABEL: &'static str = "Delivery box";
    const KEYS: &'static [&'static str] = &["boxes", "box"];
    const COLUMNS: &'static [&'static str] = &["Box", "Status", "Order", "Customer"];

    fn id(&self) -> &str {
        &self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.box_number.as_str(), self.customer()]
    }

    fn status(&self) -> Option<&str> {
        Some(self.status.as_str())
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.box_number.clone(),
            self.status.clone(),
            label_of(&self.order).to_string(),
            self.customer().to_string(),
        ]
    }

    fn schema() -> Schema {
        Schema::new()
            .field(FieldSpec::text("boxNumber", "Box number").required().max_len(30))
            .field(FieldSpec::new("status", "Status", FieldKind::Select(BOX_STATUSES)).required())
    }

    fn to_draft(&self) -> FormDraft {
        FormDraft::new()
            .with("boxNumber", &self.box_number)
            .with("status", &self.status)
    }
}
