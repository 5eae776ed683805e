use super::reference::{id_of, label_of, Ref, Summary};
use crate::controller::Resource;
use crate::forms::{FieldKind, FieldSpec, FormDraft, Schema};
use serde::{Deserialize, Serialize};

pub const PRODUCT_STATUSES: &[&str] = &["pending", "approved", "rejected"];

fn default_status() -> String {
    "pending".to_string()
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mrp: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default)]
    pub category: Option<Ref<Summary>>,
    #[serde(default)]
    pub vendor: Option<Ref<Summary>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Product {
    #[cfg(test)]
    pub fn sample(id: &str, name: &str, status: &str) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            price: 50.0,
            mrp: None,
            unit: None,
            category: None,
            vendor: None,
            image: None,
            status: status.into(),
            created_at: None,
            updated_at: None,
        }
    }
}

impl Resource for Product {
    const PATH: &'static str = "products";
    const LABEL: &'static str = "Product";
    const KEYS: &'static [&'static str] = &["products", "product"];
    const COLUMNS: &'static [&'static str] = &["Name", "Category", "Vendor", "Price", "MRP", "Status"];

    fn id(&self) -> &str {
        &self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            label_of(&self.category),
            label_of(&self.vendor),
        ]
    }

    fn status(&self) -> Option<&str> {
        Some(self.status.as_str())
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            label_of(&self.category).to_string(),
            label_of(&self.vendor).to_string(),
            format!("{:.2}", self.price),
            self.mrp.map(|m| format!("{m:.2}")).unwrap_or_default(),
            self.status.clone(),
        ]
    }

    fn schema() -> Schema {
        Schema::new()
            .field(FieldSpec::text("name", "Name").required().max_len(120))
            .field(FieldSpec::new("description", "Description", FieldKind::TextArea).max_len(1000))
            .field(FieldSpec::number("price", "Price").required().min(0.0))
            .field(FieldSpec::number("mrp", "MRP").min(0.0))
            .field(FieldSpec::text("unit", "Unit").max_len(20))
            .field(FieldSpec::text("category", "Category").required())
            .field(FieldSpec::new("image", "Image", FieldKind::Image))
    }

    fn to_draft(&self) -> FormDraft {
        let mut draft = FormDraft::new()
            .with("name", &self.name)
            .with("description", &self.description)
            .with("price", self.price.to_string())
            .with("unit", self.unit.clone().unwrap_or_default())
            .with("category", id_of(&self.category));
        if let Some(mrp) = self.mrp {
            draft.set("mrp", mrp.to_string());
        }
        draft
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn populated_and_bare_category_both_decode() {
        let populated: Product = serde_json::from_str(
            r#"{"_id":"p1","name":"Cow Milk","price":56,"category":{"_id":"c1","name":"Milk"},"status":"approved"}"#,
        )
        .unwrap();
        assert_eq!(populated.cells()[1], "Milk");

        let bare: Product =
            serde_json::from_str(r#"{"_id":"p2","name":"Curd","price":40,"category":"c1"}"#).unwrap();
        assert_eq!(bare.status, "pending");
        assert_eq!(bare.to_draft().value("category"), "c1");
    }
}
