//! Gallery item model and DTOs.

use std::cmp::Ordering;

use chrono::NaiveDate;
use clubsite_core::error::CoreError;
use clubsite_core::types::{RecordId, Timestamp};
use clubsite_core::validation;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::entity::{Entity, Validate};

/// Gallery tab a photo is shown under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "gallery_category", rename_all = "lowercase")]
pub enum GalleryCategory {
    #[default]
    Events,
    Workshops,
    Hackathons,
    Team,
    Other,
}

/// A gallery row from the `gallery_items` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct GalleryItem {
    pub id: RecordId,
    pub title: String,
    pub description: Option<String>,
    pub image_url: String,
    pub category: GalleryCategory,
    /// Day the photo was taken, if known.
    pub event_date: Option<NaiveDate>,
    pub display_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new gallery item.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateGalleryItem {
    pub title: String,
    pub description: Option<String>,
    pub image_url: String,
    #[serde(default)]
    pub category: GalleryCategory,
    pub event_date: Option<NaiveDate>,
    #[serde(default)]
    pub display_order: i32,
}

/// DTO for updating a gallery item. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateGalleryItem {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub category: Option<GalleryCategory>,
    /// Absent keeps the date, `null` clears it.
    #[serde(default, deserialize_with = "super::nullable")]
    pub event_date: Option<Option<NaiveDate>>,
    pub display_order: Option<i32>,
}

/// Query parameters accepted by `GET /api/gallery`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GalleryItemFilter {
    pub category: Option<GalleryCategory>,
}

impl Validate for CreateGalleryItem {
    fn validate(self) -> Result<Self, CoreError> {
        let image_url = validation::required_text("image_url", self.image_url)?;
        Ok(Self {
            title: validation::required_text("title", self.title)?,
            description: validation::optional_text(self.description),
            image_url: validation::url("image_url", &image_url)?,
            ..self
        })
    }
}

impl Validate for UpdateGalleryItem {
    fn validate(self) -> Result<Self, CoreError> {
        let image_url = validation::patch_required_text("image_url", self.image_url)?
            .map(|v| validation::url("image_url", &v))
            .transpose()?;
        Ok(Self {
            title: validation::patch_required_text("title", self.title)?,
            description: validation::patch_optional_text(self.description),
            image_url,
            ..self
        })
    }
}

impl Entity for GalleryItem {
    const NAME: &'static str = "Gallery item";
    const COLLECTION: &'static str = "gallery_items";

    type Create = CreateGalleryItem;
    type Update = UpdateGalleryItem;
    type Filter = GalleryItemFilter;

    fn id(&self) -> RecordId {
        self.id
    }

    fn from_create(id: RecordId, now: Timestamp, input: CreateGalleryItem) -> Self {
        Self {
            id,
            title: input.title,
            description: input.description,
            image_url: input.image_url,
            category: input.category,
            event_date: input.event_date,
            display_order: input.display_order,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply_update(&mut self, input: UpdateGalleryItem, now: Timestamp) {
        if let Some(title) = input.title {
            self.title = title;
        }
        validation::apply_optional(&mut self.description, input.description);
        if let Some(image_url) = input.image_url {
            self.image_url = image_url;
        }
        if let Some(category) = input.category {
            self.category = category;
        }
        if let Some(event_date) = input.event_date {
            self.event_date = event_date;
        }
        if let Some(order) = input.display_order {
            self.display_order = order;
        }
        self.updated_at = now;
    }

    fn matches(&self, filter: &GalleryItemFilter, _today: NaiveDate) -> bool {
        filter.category.map_or(true, |c| c == self.category)
    }

    fn list_order(&self, other: &Self) -> Ordering {
        self.display_order
            .cmp(&other.display_order)
            .then(self.created_at.cmp(&other.created_at))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_url_is_required() {
        let input = CreateGalleryItem {
            title: "Demo day".into(),
            description: None,
            image_url: "  ".into(),
            category: GalleryCategory::Events,
            event_date: None,
            display_order: 0,
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn image_url_is_normalized() {
        let input = CreateGalleryItem {
            title: "Demo day".into(),
            description: Some("".into()),
            image_url: "images.example.com/demo.jpg".into(),
            category: GalleryCategory::Hackathons,
            event_date: None,
            display_order: 0,
        }
        .validate()
        .unwrap();
        assert_eq!(input.image_url, "https://images.example.com/demo.jpg");
        assert_eq!(input.description, None);
    }

    #[test]
    fn update_cannot_blank_image_url() {
        let patch = UpdateGalleryItem {
            image_url: Some("".into()),
            ..Default::default()
        };
        assert!(patch.validate().is_err());
    }

    #[test]
    fn update_distinguishes_absent_and_null_event_date() {
        let absent: UpdateGalleryItem = serde_json::from_str(r#"{"title":"x"}"#).unwrap();
        assert_eq!(absent.event_date, None);

        let cleared: UpdateGalleryItem = serde_json::from_str(r#"{"event_date":null}"#).unwrap();
        assert_eq!(cleared.event_date, Some(None));

        let set: UpdateGalleryItem =
            serde_json::from_str(r#"{"event_date":"2026-10-01"}"#).unwrap();
        assert_eq!(
            set.event_date,
            Some(NaiveDate::from_ymd_opt(2026, 10, 1))
        );
    }

    #[test]
    fn null_event_date_clears_the_stored_date() {
        let mut item = GalleryItem::from_create(
            uuid::Uuid::now_v7(),
            chrono::Utc::now(),
            CreateGalleryItem {
                title: "Demo day".into(),
                description: None,
                image_url: "https://images.example.com/demo.jpg".into(),
                category: GalleryCategory::Events,
                event_date: NaiveDate::from_ymd_opt(2026, 10, 1),
                display_order: 0,
            },
        );

        item.apply_update(UpdateGalleryItem::default(), chrono::Utc::now());
        assert!(item.event_date.is_some());

        item.apply_update(
            UpdateGalleryItem {
                event_date: Some(None),
                ..Default::default()
            },
            chrono::Utc::now(),
        );
        assert_eq!(item.event_date, None);
    }
}
