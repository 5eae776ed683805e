pub mod draft;
pub mod schema;
pub mod subscription;

pub use draft::{FileUpload, FormDraft};
pub use schema::{FieldErrors, FieldKind, FieldSpec, Rule, Schema};
pub use subscription::{FranchiseSelection, ImagePreviews, PreviewImage};
