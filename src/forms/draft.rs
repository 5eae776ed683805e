use super::schema::{FieldKind, Schema};
use crate::client::{MultipartForm, RequestBody};
use serde_json::{Map, Number, Value};
use std::collections::BTreeMap;

/// A file picked in an upload input, already read into memory.
#[derive(Debug, Clone, PartialEq)]
pub struct FileUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl FileUpload {
    pub fn new(file_name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }
}

/// The raw, unvalidated contents of a form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormDraft {
    values: BTreeMap<String, String>,
    lists: BTreeMap<String, Vec<String>>,
    files: BTreeMap<String, Vec<FileUpload>>,
}

impl FormDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: &str, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    pub fn with_list(mut self, field: &str, values: Vec<String>) -> Self {
        self.lists.insert(field.to_string(), values);
        self
    }

    pub fn with_file(mut self, field: &str, file: FileUpload) -> Self {
        self.add_file(field, file);
        self
    }

    pub fn set(&mut self, field: &str, value: impl Into<String>) {
        self.values.insert(field.to_string(), value.into());
    }

    pub fn set_list(&mut self, field: &str, values: Vec<String>) {
        self.lists.insert(field.to_string(), values);
    }

    pub fn add_file(&mut self, field: &str, file: FileUpload) {
        self.files.entry(field.to_string()).or_default().push(file);
    }

    pub fn replace_files(&mut self, field: &str, files: Vec<FileUpload>) {
        if files.is_empty() {
            self.files.remove(field);
        } else {
            self.files.insert(field.to_string(), files);
        }
    }

    pub fn value(&self, field: &str) -> &str {
        self.values.get(field).map(String::as_str).unwrap_or("")
    }

    pub fn list(&self, field: &str) -> &[String] {
        self.lists.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn files(&self, field: &str) -> &[FileUpload] {
        self.files.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Already-uploaded image URLs an edit form keeps for a file field.
    pub fn kept_images(&self, field: &str) -> &[String] {
        self.list(field)
    }

    pub fn has_files(&self) -> bool {
        self.files.values().any(|f| !f.is_empty())
    }

    /// Serializes the draft for sending: multipart as soon as any file is
    /// attached, JSON otherwise.
    pub fn into_body(self, schema: &Schema) -> RequestBody {
        if self.has_files() {
            RequestBody::Multipart(self.into_multipart())
        } else {
            RequestBody::Json(self.into_json(schema))
        }
    }

    fn into_json(self, schema: &Schema) -> Value {
        let mut object = Map::new();
        for (field, raw) in self.values {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                continue;
            }
            let kind = schema.spec(&field).map(|s| s.kind);
            let value = match kind {
                Some(FieldKind::Number) => number_value(trimmed),
                // passwords are sent untouched
                Some(FieldKind::Password) => Value::String(raw),
                _ => Value::String(trimmed.to_string()),
            };
            object.insert(field, value);
        }
        for (field, values) in self.lists {
            object.insert(field, Value::Array(values.into_iter().map(Value::String).collect()));
        }
        Value::Object(object)
    }

    fn into_multipart(self) -> MultipartForm {
        let mut form = MultipartForm::default();
        for (field, raw) in self.values {
            if raw.trim().is_empty() {
                continue;
            }
            form.texts.push((field, raw));
        }
        for (field, values) in self.lists {
            for value in values {
                form.texts.push((field.clone(), value));
            }
        }
        for (field, files) in self.files {
            for file in files {
                form.files.push((field.clone(), file));
            }
        }
        form
    }
}

fn number_value(raw: &str) -> Value {
    if let Ok(int) = raw.parse::<i64>() {
        return Value::Number(int.into());
    }
    raw.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(Value::Number)
        .unwrap_or_else(|| Value::String(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::FieldSpec;
    use serde_json::json;

    fn product_schema() -> Schema {
        Schema::new()
            .field(FieldSpec::text("name", "Name").required())
            .field(FieldSpec::number("price", "Price").required())
            .field(FieldSpec::text("unit", "Unit"))
            .field(FieldSpec::new("image", "Image", FieldKind::Image))
    }

    #[test]
    fn json_when_no_file_attached() {
        let draft = FormDraft::new()
            .with("name", "  Cow Milk ")
            .with("price", "56")
            .with("unit", "");
        match draft.into_body(&product_schema()) {
            RequestBody::Json(value) => {
                assert_eq!(value, json!({"name": "Cow Milk", "price": 56}));
            }
            other => panic!("expected json body, got {other:?}"),
        }
    }

    #[test]
    fn fractional_numbers_stay_numeric() {
        let draft = FormDraft::new().with("name", "Ghee").with("price", "499.5");
        match draft.into_body(&product_schema()) {
            RequestBody::Json(value) => assert_eq!(value["price"], json!(499.5)),
            other => panic!("expected json body, got {other:?}"),
        }
    }

    #[test]
    fn multipart_when_image_present() {
        let draft = FormDraft::new()
            .with("name", "Paneer")
            .with("price", "90")
            .with_list("franchises", vec!["f1".into(), "f2".into()])
            .with_file("image", FileUpload::new("paneer.jpg", "image/jpeg", vec![0xff, 0xd8]));
        match draft.into_body(&product_schema()) {
            RequestBody::Multipart(form) => {
                assert!(form.texts.contains(&("name".into(), "Paneer".into())));
                assert!(form.texts.contains(&("price".into(), "90".into())));
                let franchises: Vec<_> = form
                    .texts
                    .iter()
                    .filter(|(k, _)| k == "franchises")
                    .map(|(_, v)| v.as_str())
                    .collect();
                assert_eq!(franchises, vec!["f1", "f2"]);
                assert_eq!(form.files.len(), 1);
                assert_eq!(form.files[0].0, "image");
                assert_eq!(form.files[0].1.file_name, "paneer.jpg");
            }
            other => panic!("expected multipart body, got {other:?}"),
        }
    }

    #[test]
    fn replacing_with_no_files_falls_back_to_json() {
        let mut draft = FormDraft::new()
            .with("name", "Curd")
            .with("price", "40")
            .with_file("image", FileUpload::new("curd.png", "image/png", vec![1]));
        draft.replace_files("image", Vec::new());
        assert!(!draft.has_files());
        assert!(matches!(draft.into_body(&product_schema()), RequestBody::Json(_)));
    }
}
