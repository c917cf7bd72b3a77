//! Photo Attachment Model
//!
//! Photos (receipts, odometer and gas pump shots, app screenshots) attached
//! to a shift, or to a start form before the shift exists.
//!
//! Attachments are ordered by insertion and addressed by a stable
//! [`PhotoId`] assigned at `add()` time. Positions are a presentation
//! convenience only: removing an attachment closes the gap, so a position
//! captured before a removal may point at a different photo afterwards.

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Maximum length of a photo description
pub const MAX_DESCRIPTION_LEN: usize = 500;

/// Label of the fallback photo type, always part of the configured set
pub const OTHER_PHOTO_TYPE: &str = "Other";

/// Photo types offered when configuration does not supply any
pub const DEFAULT_PHOTO_TYPES: [&str; 6] = [
    "Gas Pump",
    "Dashboard",
    "App Screenshot",
    "Receipt",
    "Odometer",
    OTHER_PHOTO_TYPE,
];

/// Photo store errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PhotoError {
    #[error("Photo not found: {0}")]
    NotFound(PhotoId),

    #[error("Unknown photo type: {0:?}")]
    UnknownType(String),

    #[error("Photo description is too long ({len} chars, max {max})")]
    DescriptionTooLong { len: usize, max: usize },
}

/// Stable photo identifier, unique within the owning shift
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhotoId(pub Uuid);

impl PhotoId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PhotoId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PhotoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Photo category label, drawn from the configured [`PhotoTypes`]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhotoType(String);

impl PhotoType {
    /// The fallback type every new attachment starts with
    pub fn other() -> Self {
        Self(OTHER_PHOTO_TYPE.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_other(&self) -> bool {
        self.0 == OTHER_PHOTO_TYPE
    }
}

impl Default for PhotoType {
    fn default() -> Self {
        Self::other()
    }
}

impl fmt::Display for PhotoType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The configured photo type enumeration
///
/// Labels are trimmed and de-duplicated case-insensitively; `Other` is
/// appended when the supplied list lacks it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoTypes(Vec<PhotoType>);

impl PhotoTypes {
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut types: Vec<PhotoType> = Vec::new();
        for label in labels {
            let label = label.as_ref().trim();
            if label.is_empty() || types.iter().any(|t| t.0.eq_ignore_ascii_case(label)) {
                continue;
            }
            types.push(PhotoType(label.to_string()));
        }
        if !types.iter().any(|t| t.0.eq_ignore_ascii_case(OTHER_PHOTO_TYPE)) {
            types.push(PhotoType::other());
        }
        Self(types)
    }

    /// Resolve a label to its canonical configured type
    pub fn resolve(&self, label: &str) -> Result<PhotoType, PhotoError> {
        let label = label.trim();
        self.0
            .iter()
            .find(|t| t.0.eq_ignore_ascii_case(label))
            .cloned()
            .ok_or_else(|| PhotoError::UnknownType(label.to_string()))
    }

    pub fn contains(&self, photo_type: &PhotoType) -> bool {
        self.0.contains(photo_type)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PhotoType> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for PhotoTypes {
    fn default() -> Self {
        Self::new(DEFAULT_PHOTO_TYPES)
    }
}

/// A single photo with its editable metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoAttachment {
    pub id: PhotoId,
    /// Raw image bytes, owned by this attachment only
    #[serde(with = "serde_helpers::base64_bytes")]
    pub image_data: Vec<u8>,
    #[serde(rename = "type", default)]
    pub photo_type: PhotoType,
    #[serde(default)]
    pub description: String,
    /// Unix millis, set once at creation
    pub date_attached: i64,
}

/// Ordered photo collection owned by one shift or start form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhotoStore {
    photos: Vec<PhotoAttachment>,
}

impl PhotoStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a photo with default metadata and return its id
    ///
    /// Identical bytes added twice become two independent attachments.
    pub fn add(&mut self, image_data: Vec<u8>) -> PhotoId {
        self.add_at(image_data, crate::util::now_millis())
    }

    /// Append a photo stamped with an explicit attach time
    pub fn add_at(&mut self, image_data: Vec<u8>, date_attached: i64) -> PhotoId {
        let id = PhotoId::new();
        tracing::debug!(photo_id = %id, bytes = image_data.len(), "Photo attached");
        self.photos.push(PhotoAttachment {
            id,
            image_data,
            photo_type: PhotoType::other(),
            description: String::new(),
            date_attached,
        });
        id
    }

    pub fn set_type(&mut self, id: PhotoId, photo_type: PhotoType) -> Result<(), PhotoError> {
        self.get_mut(id)?.photo_type = photo_type;
        Ok(())
    }

    pub fn set_description(
        &mut self,
        id: PhotoId,
        description: impl Into<String>,
    ) -> Result<(), PhotoError> {
        let description = description.into();
        let len = description.chars().count();
        if len > MAX_DESCRIPTION_LEN {
            return Err(PhotoError::DescriptionTooLong {
                len,
                max: MAX_DESCRIPTION_LEN,
            });
        }
        self.get_mut(id)?.description = description;
        Ok(())
    }

    /// Remove a photo by id and close the positional gap
    pub fn remove(&mut self, id: PhotoId) -> Result<PhotoAttachment, PhotoError> {
        let idx = self.position(id).ok_or(PhotoError::NotFound(id))?;
        let removed = self.photos.remove(idx);
        tracing::debug!(
            photo_id = %id,
            position = idx,
            remaining = self.photos.len(),
            "Photo removed"
        );
        Ok(removed)
    }

    pub fn get(&self, id: PhotoId) -> Option<&PhotoAttachment> {
        self.photos.iter().find(|p| p.id == id)
    }

    fn get_mut(&mut self, id: PhotoId) -> Result<&mut PhotoAttachment, PhotoError> {
        self.photos
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(PhotoError::NotFound(id))
    }

    /// Current display position of a photo
    pub fn position(&self, id: PhotoId) -> Option<usize> {
        self.photos.iter().position(|p| p.id == id)
    }

    /// Photo at a display position (presentation use only)
    pub fn get_at(&self, index: usize) -> Option<&PhotoAttachment> {
        self.photos.get(index)
    }

    pub fn list(&self) -> &[PhotoAttachment] {
        &self.photos
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PhotoAttachment> {
        self.photos.iter()
    }

    pub fn ids(&self) -> Vec<PhotoId> {
        self.photos.iter().map(|p| p.id).collect()
    }

    pub fn len(&self) -> usize {
        self.photos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }
}

impl<'a> IntoIterator for &'a PhotoStore {
    type Item = &'a PhotoAttachment;
    type IntoIter = std::slice::Iter<'a, PhotoAttachment>;

    fn into_iter(self) -> Self::IntoIter {
        self.photos.iter()
    }
}
