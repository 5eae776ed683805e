use super::reference::{label_of, Named, Ref, Summary};
use crate::controller::Resource;
use crate::forms::{FieldKind, FieldSpec, FormDraft, Schema};
use serde::{Deserialize, Serialize};

/// Delivery partner as populated onto a review.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DeliveryPartner {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl Named for DeliveryPartner {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SubscriptionSummary {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

impl Named for SubscriptionSummary {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.title
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UserSummary {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Named for UserSummary {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Body of `POST /api/reviews`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewReview {
    pub description: String,
    pub rating: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub delivery_partner_id: String,
    pub subscription_id: String,
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub franchise_id: Option<String>,
}

/// Query of `GET /api/reviews`; absent or blank parameters do not filter.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReviewFilter {
    #[serde(default)]
    pub delivery_partner_id: Option<String>,
    #[serde(default)]
    pub subscription_id: Option<String>,
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

impl ReviewFilter {
    pub fn delivery_partner(&self) -> Option<&str> {
        non_blank(&self.delivery_partner_id)
    }

    pub fn subscription(&self) -> Option<&str> {
        non_blank(&self.subscription_id)
    }
}

/// A stored review. References come back populated; one whose target no
/// longer exists comes back as `null`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub description: String,
    pub rating: i64,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub delivery_partner_id: Option<Ref<DeliveryPartner>>,
    #[serde(default)]
    pub subscription_id: Option<Ref<SubscriptionSummary>>,
    #[serde(default)]
    pub user_id: Option<Ref<UserSummary>>,
    #[serde(default)]
    pub franchise_id: Option<Ref<Summary>>,
    pub date: String,
}

impl Review {
    pub fn stars(&self) -> String {
        let filled = self.rating.clamp(0, 5) as usize;
        format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
    }
}

impl Resource for Review {
    const PATH: &'static str = "reviews";
    const LABEL: &'static str = "Review";
    const KEYS: &'static [&'static str] = &["reviews", "review"];
    const EDITABLE: bool = false;
    const COLUMNS: &'static [&'static str] =
        &["Rating", "Review", "Delivery partner", "Subscription", "User", "Date"];

    fn id(&self) -> &str {
        &self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.description.as_str(),
            label_of(&self.delivery_partner_id),
            label_of(&self.user_id),
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.stars(),
            self.description.clone(),
            label_of(&self.delivery_partner_id).to_string(),
            label_of(&self.subscription_id).to_string(),
            label_of(&self.user_id).to_string(),
            self.date.clone(),
        ]
    }

    fn schema() -> Schema {
        Schema::new()
            .field(FieldSpec::number("rating", "Rating").required().integer().range(1.0, 5.0))
            .field(FieldSpec::new("description", "Review", FieldKind::TextArea).required().max_len(1000))
            .field(FieldSpec::text("deliveryPartnerId", "Delivery partner").required())
            .field(FieldSpec::text("subscriptionId", "Subscription").required())
            .field(FieldSpec::text("userId", "User").required())
            .field(FieldSpec::text("franchiseId", "Franchise"))
    }

    fn to_draft(&self) -> FormDraft {
        FormDraft::new()
            .with("rating", self.rating.to_string())
            .with("description", &self.description)
    }
}
