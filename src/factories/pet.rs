use crate::models::{Category, Pet, PetStatus, Tag};

use super::{unique_id, unique_suffix};

pub const PLACEHOLDER_PHOTO_URL: &str = "https://example.com/photos/placeholder.png";

/// Fields to force on a pet. `None` keeps the generated or existing value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PetPatch {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub photo_urls: Option<Vec<String>>,
    pub status: Option<PetStatus>,
    pub category: Option<Category>,
    pub tags: Option<Vec<Tag>>,
}

impl PetPatch {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn status(mut self, status: PetStatus) -> Self {
        self.status = Some(status);
        self
    }

    fn apply_to(self, pet: &mut Pet) {
        if let Some(id) = self.id {
            pet.id = Some(id);
        }
        if let Some(name) = self.name {
            pet.name = name;
        }
        if let Some(photo_urls) = self.photo_urls {
            pet.photo_urls = photo_urls;
        }
        if let Some(status) = self.status {
            pet.status = Some(status);
        }
        if let Some(category) = self.category {
            pet.category = Some(category);
        }
        if let Some(tags) = self.tags {
            pet.tags = Some(tags);
        }
    }
}

/// A minimal valid pet: unique id and name, one photo URL, `available`.
/// Category and tags stay absent unless patched in.
pub fn build(patch: PetPatch) -> Pet {
    let mut pet = Pet {
        id: Some(unique_id()),
        category: None,
        name: format!("pet_{}", unique_suffix()),
        photo_urls: vec![PLACEHOLDER_PHOTO_URL.to_string()],
        tags: None,
        status: Some(PetStatus::Available),
    };
    patch.apply_to(&mut pet);
    pet
}

/// Copy of `pet` with only the patched fields changed.
pub fn update(pet: &Pet, patch: PetPatch) -> Pet {
    let mut updated = pet.clone();
    patch.apply_to(&mut updated);
    updated
}
