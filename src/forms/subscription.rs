//! The subscription form is the one multi-step form: several image previews
//! and a franchise multi-select on top of the plain fields.

use super::draft::{FileUpload, FormDraft};
use std::collections::BTreeSet;

pub const MAX_SUBSCRIPTION_IMAGES: usize = 5;

/// An image shown in the preview strip. Existing images are URLs already on
/// the server; new ones are local files waiting for upload.
#[derive(Debug, Clone, PartialEq)]
pub enum PreviewImage {
    Existing(String),
    New(FileUpload),
}

impl PreviewImage {
    pub fn label(&self) -> &str {
        match self {
            PreviewImage::Existing(url) => url,
            PreviewImage::New(file) => &file.file_name,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImagePreviews {
    images: Vec<PreviewImage>,
}

impl ImagePreviews {
    pub fn from_existing(urls: &[String]) -> Self {
        Self {
            images: urls.iter().cloned().map(PreviewImage::Existing).collect(),
        }
    }

    /// Adds files until the limit is reached. Returns how many were rejected.
    pub fn add(&mut self, files: Vec<FileUpload>) -> usize {
        let mut rejected = 0;
        for file in files {
            if self.images.len() >= MAX_SUBSCRIPTION_IMAGES {
                rejected += 1;
                continue;
            }
            self.images.push(PreviewImage::New(file));
        }
        rejected
    }

    pub fn remove(&mut self, index: usize) -> Option<PreviewImage> {
        (index < self.images.len()).then(|| self.images.remove(index))
    }

    pub fn images(&self) -> &[PreviewImage] {
        &self.images
    }

    pub fn is_full(&self) -> bool {
        self.images.len() >= MAX_SUBSCRIPTION_IMAGES
    }

    pub fn clear(&mut self) {
        self.images.clear();
    }

    /// Writes kept URLs and new files into the draft under `field`.
    pub fn apply_to(&self, draft: &mut FormDraft, field: &str) {
        let mut kept = Vec::new();
        let mut fresh = Vec::new();
        for image in &self.images {
            match image {
                PreviewImage::Existing(url) => kept.push(url.clone()),
                PreviewImage::New(file) => fresh.push(file.clone()),
            }
        }
        draft.set_list(field, kept);
        draft.replace_files(field, fresh);
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FranchiseSelection {
    selected: BTreeSet<String>,
}

impl FranchiseSelection {
    pub fn from_ids(ids: &[String]) -> Self {
        Self {
            selected: ids.iter().cloned().collect(),
        }
    }

    pub fn toggle(&mut self, id: &str) {
        if !self.selected.remove(id) {
            self.selected.insert(id.to_string());
        }
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    pub fn select_all<'a>(&mut self, ids: impl IntoIterator<Item = &'a str>) {
        self.selected.extend(ids.into_iter().map(str::to_string));
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn apply_to(&self, draft: &mut FormDraft, field: &str) {
        draft.set_list(field, self.selected.iter().cloned().collect());
    }
}
