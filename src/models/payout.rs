use super::reference::{id_of, label_of, Ref, Summary};
use crate::client::UpdateMethod;
use crate::controller::Resource;
use crate::forms::{FieldKind, FieldSpec, FormDraft, Schema};
use serde::{Deserialize, Serialize};

pub const PAYOUT_STATUSES: &[&str] = &["pending", "processing", "paid", "failed"];

/// One line of a vendor's payout history.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PayoutHistoryItem {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub vendor: Option<Ref<Summary>>,
    pub amount: f64,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

impl Resource for PayoutHistoryItem {
    const PATH: &'static str = "payouts";
    const LABEL: &'static str = "Payout";
    const KEYS: &'static [&'static str] = &["payouts", "history"];
    const UPDATE: UpdateMethod = UpdateMethod::Patch;
    const COLUMNS: &'static [&'static str] = &["Vendor", "Amount", "Status", "Date", "Reference"];

    fn id(&self) -> &str {
        &self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![
            label_of(&self.vendor),
            self.reference.as_deref().unwrap_or(""),
        ]
    }

    fn status(&self) -> Option<&str> {
        Some(self.status.as_str())
    }

    fn cells(&self) -> Vec<String> {
        vec![
            label_of(&self.vendor).to_string(),
            format!("{:.2}", self.amount),
            self.status.clone(),
            self.date.clone(),
            self.reference.clone().unwrap_or_default(),
        ]
    }

    fn schema() -> Schema {
        Schema::new()
            .field(FieldSpec::text("vendor", "Vendor").required())
            .field(FieldSpec::number("amount", "Amount").required().min(0.01))
            .field(FieldSpec::new("status", "Status", FieldKind::Select(PAYOUT_STATUSES)).required())
            .field(FieldSpec::text("reference", "Reference").max_len(60))
    }

    fn to_draft(&self) -> FormDraft {
        FormDraft::new()
            .with("vendor", id_of(&self.vendor))
            .with("amount", self.amount.to_string())
            .with("status", &self.status)
            .with("reference", self.reference.clone().unwrap_or_default())
    }
}
