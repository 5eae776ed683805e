use serde::{Deserialize, Serialize};

/// A reference to another document. The API returns either the bare id or,
/// when the endpoint populates the field, the whole nested document.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum Ref<T> {
    Id(String),
    Populated(T),
}

impl<T: Named> Ref<T> {
    /// Id of the referenced document, whichever form it came in.
    pub fn id(&self) -> &str {
        match self {
            Ref::Id(id) => id,
            Ref::Populated(doc) => doc.id(),
        }
    }

    /// Display label: the populated name, or the raw id when not populated.
    pub fn label(&self) -> &str {
        match self {
            Ref::Id(id) => id,
            Ref::Populated(doc) => doc.name(),
        }
    }
}

/// Documents that can stand in for a reference in tables and selects.
pub trait Named {
    fn id(&self) -> &str;
    fn name(&self) -> &str;
}

/// The `_id` + `name` projection most populated references come back as.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Summary {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

impl Named for Summary {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }
}

/// Label of an optional reference, empty when absent.
pub fn label_of<T: Named>(reference: &Option<Ref<T>>) -> &str {
    reference.as_ref().map(Ref::label).unwrap_or("")
}

/// Id of an optional reference, empty when absent.
pub fn id_of<T: Named>(reference: &Option<Ref<T>>) -> &str {
    reference.as_ref().map(Ref::id).unwrap_or("")
}
