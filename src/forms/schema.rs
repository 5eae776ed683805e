//! Declarative form schemas.
//!
//! Each resource describes its form as a list of [`FieldSpec`]s. The same
//! description drives three things: which inputs the modal renders, inline
//! validation before anything is sent, and how the draft is typed when it is
//! serialized to JSON.

use super::draft::FormDraft;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    Text,
    Password,
    Email,
    Number,
    TextArea,
    /// A single image upload.
    Image,
    /// Several images under the same field name.
    Images,
    /// One value out of a fixed option list.
    Select(&'static [&'static str]),
}

impl FieldKind {
    pub fn is_file(self) -> bool {
        matches!(self, FieldKind::Image | FieldKind::Images)
    }

    /// The `type` attribute for the rendered `<input>`.
    pub fn input_type(self) -> &'static str {
        match self {
            FieldKind::Password => "password",
            FieldKind::Email => "email",
            FieldKind::Number => "number",
            FieldKind::Image | FieldKind::Images => "file",
            FieldKind::Text | FieldKind::TextArea | FieldKind::Select(_) => "text",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rule {
    Required,
    MinLen(usize),
    MaxLen(usize),
    Min(f64),
    Max(f64),
    Integer,
    Email,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub rules: Vec<Rule>,
}

impl FieldSpec {
    pub fn new(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            rules: Vec::new(),
        }
    }

    pub fn text(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Text)
    }

    pub fn number(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Number)
    }

    pub fn required(mut self) -> Self {
        self.rules.push(Rule::Required);
        self
    }

    pub fn min_len(mut self, n: usize) -> Self {
        self.rules.push(Rule::MinLen(n));
        self
    }

    pub fn max_len(mut self, n: usize) -> Self {
        self.rules.push(Rule::MaxLen(n));
        self
    }

    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.rules.push(Rule::Min(min));
        self.rules.push(Rule::Max(max));
        self
    }

    pub fn min(mut self, min: f64) -> Self {
        self.rules.push(Rule::Min(min));
        self
    }

    pub fn integer(mut self) -> Self {
        self.rules.push(Rule::Integer);
        self
    }

    pub fn email(mut self) -> Self {
        self.rules.push(Rule::Email);
        self
    }

    pub fn is_required(&self) -> bool {
        self.rules.contains(&Rule::Required)
    }

    /// First failing rule for this field, rendered as a message.
    fn check(&self, draft: &FormDraft) -> Option<String> {
        if self.kind.is_file() {
            let attached = draft.files(self.name).len() + draft.kept_images(self.name).len();
            if self.is_required() && attached == 0 {
                return Some(format!("{} is required", self.label));
            }
            return None;
        }

        let value = draft.value(self.name).trim();
        if value.is_empty() {
            return self
                .is_required()
                .then(|| format!("{} is required", self.label));
        }

        let number = match self.kind {
            FieldKind::Number => match value.parse::<f64>() {
                Ok(n) if n.is_finite() => Some(n),
                _ => return Some(format!("{} must be a number", self.label)),
            },
            FieldKind::Select(options) if !options.contains(&value) => {
                return Some(format!("{} must be one of: {}", self.label, options.join(", ")));
            }
            _ => None,
        };

        for rule in &self.rules {
            let failed = match *rule {
                Rule::Required => false,
                Rule::MinLen(n) => value.chars().count() < n,
                Rule::MaxLen(n) => value.chars().count() > n,
                Rule::Min(min) => number.is_some_and(|v| v < min),
                Rule::Max(max) => number.is_some_and(|v| v > max),
                Rule::Integer => number.is_some_and(|v| v.fract() != 0.0),
                Rule::Email => !looks_like_email(value),
            };
            if failed {
                return Some(rule_message(self.label, *rule));
            }
        }
        None
    }
}

fn rule_message(label: &str, rule: Rule) -> String {
    match rule {
        Rule::Required => format!("{label} is required"),
        Rule::MinLen(n) => format!("{label} must be at least {n} characters"),
        Rule::MaxLen(n) => format!("{label} must be at most {n} characters"),
        Rule::Min(min) => format!("{label} must be at least {min}"),
        Rule::Max(max) => format!("{label} must be at most {max}"),
        Rule::Integer => format!("{label} must be a whole number"),
        Rule::Email => format!("{label} must be a valid email address"),
    }
}

fn looks_like_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !value.contains(char::is_whitespace)
        }
        None => false,
    }
}

/// Per-field validation messages, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.insert(field.into(), message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    fields: Vec<FieldSpec>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, spec: FieldSpec) -> Self {
        self.fields.push(spec);
        self
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn spec(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Drops fields that only make sense on create, e.g. a password that the
    /// edit form must not resend.
    pub fn without(mut self, name: &str) -> Self {
        self.fields.retain(|f| f.name != name);
        self
    }

    pub fn validate(&self, draft: &FormDraft) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();
        for spec in &self.fields {
            if let Some(message) = spec.check(draft) {
                errors.insert(spec.name, message);
            }
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vendor_schema() -> Schema {
        Schema::new()
            .field(FieldSpec::text("name", "Name").required().max_len(60))
            .field(FieldSpec::text("username", "Username").required().min_len(3))
            .field(FieldSpec::new("password", "Password", FieldKind::Password).required().min_len(6))
            .field(FieldSpec::new("email", "Email", FieldKind::Email).email())
            .field(FieldSpec::number("commission", "Commission").range(0.0, 100.0))
    }

    #[test]
    fn empty_required_fields_are_reported_inline() {
        let draft = FormDraft::new().with("name", "Acme");
        let errors = vendor_schema().validate(&draft).unwrap_err();
        assert_eq!(errors.get("username"), Some("Username is required"));
        assert_eq!(errors.get("password"), Some("Password is required"));
        assert_eq!(errors.get("name"), None);
        // optional and empty: not checked further
        assert_eq!(errors.get("email"), None);
    }

    #[test]
    fn whitespace_only_counts_as_empty() {
        let draft = FormDraft::new()
            .with("name", "   ")
            .with("username", "acme1")
            .with("password", "secret1");
        let errors = vendor_schema().validate(&draft).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("name"), Some("Name is required"));
    }

    #[test]
    fn length_range_and_email_rules() {
        let draft = FormDraft::new()
            .with("name", "Acme")
            .with("username", "ac")
            .with("password", "secret1")
            .with("email", "not-an-email")
            .with("commission", "150");
        let errors = vendor_schema().validate(&draft).unwrap_err();
        assert_eq!(errors.get("username"), Some("Username must be at least 3 characters"));
        assert_eq!(errors.get("email"), Some("Email must be a valid email address"));
        assert_eq!(errors.get("commission"), Some("Commission must be at most 100"));
    }

    #[test]
    fn numbers_must_parse() {
        let schema = Schema::new().field(FieldSpec::number("price", "Price").required().min(0.0));
        let errors = schema
            .validate(&FormDraft::new().with("price", "12abc"))
            .unwrap_err();
        assert_eq!(errors.get("price"), Some("Price must be a number"));
        assert!(schema.validate(&FormDraft::new().with("price", "12.5")).is_ok());
    }

    #[test]
    fn select_rejects_unknown_option() {
        let schema = Schema::new().field(FieldSpec::new(
            "status",
            "Status",
            FieldKind::Select(&["pending", "approved"]),
        ));
        assert!(schema.validate(&FormDraft::new().with("status", "approved")).is_ok());
        assert!(schema.validate(&FormDraft::new().with("status", "archived")).is_err());
    }

    #[test]
    fn required_image_needs_a_file() {
        let schema = Schema::new().field(FieldSpec::new("image", "Image", FieldKind::Image).required());
        assert!(schema.validate(&FormDraft::new()).is_err());
        let draft = FormDraft::new().with_file("image", crate::forms::FileUpload::new("a.png", "image/png", vec![1, 2]));
        assert!(schema.validate(&draft).is_ok());
    }

    #[test]
    fn valid_vendor_passes() {
        let draft = FormDraft::new()
            .with("name", "Acme")
            .with("username", "acme1")
            .with("password", "secret1");
        assert!(vendor_schema().validate(&draft).is_ok());
    }
}
