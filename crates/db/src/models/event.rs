//! Event model and DTOs.

use std::cmp::Ordering;

use chrono::NaiveDate;
use clubsite_core::error::CoreError;
use clubsite_core::types::{RecordId, Timestamp};
use clubsite_core::validation;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::entity::{Entity, Validate};

/// Kind of event, used for the coloured badge on event cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "event_category", rename_all = "lowercase")]
pub enum EventCategory {
    #[default]
    Workshop,
    Hackathon,
    Talk,
    Meetup,
    Competition,
    Social,
}

/// An event row from the `events` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Event {
    pub id: RecordId,
    pub title: String,
    pub description: String,
    pub event_date: NaiveDate,
    /// Free-form time of day as typed by the operator ("18:00", "6-9pm").
    pub event_time: Option<String>,
    pub location: String,
    pub category: EventCategory,
    pub image_url: Option<String>,
    pub registration_url: Option<String>,
    pub is_featured: bool,
    pub display_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new event.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateEvent {
    pub title: String,
    pub description: String,
    pub event_date: NaiveDate,
    pub event_time: Option<String>,
    pub location: String,
    #[serde(default)]
    pub category: EventCategory,
    pub image_url: Option<String>,
    pub registration_url: Option<String>,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub display_order: i32,
}

/// DTO for updating an existing event. All fields are optional.
///
/// An empty string in an optional text field clears it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateEvent {
    pub title: Option<String>,
    pub description: Option<String>,
    pub event_date: Option<NaiveDate>,
    pub event_time: Option<String>,
    pub location: Option<String>,
    pub category: Option<EventCategory>,
    pub image_url: Option<String>,
    pub registration_url: Option<String>,
    pub is_featured: Option<bool>,
    pub display_order: Option<i32>,
}

/// Query parameters accepted by `GET /api/events`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventFilter {
    pub category: Option<EventCategory>,
    /// `true` keeps events dated today or later, `false` keeps past events.
    pub upcoming: Option<bool>,
}

impl Validate for CreateEvent {
    fn validate(self) -> Result<Self, CoreError> {
        Ok(Self {
            title: validation::required_text("title", self.title)?,
            description: validation::required_text("description", self.description)?,
            event_time: validation::optional_text(self.event_time),
            location: validation::required_text("location", self.location)?,
            image_url: validation::optional_url("image_url", self.image_url)?,
            registration_url: validation::optional_url("registration_url", self.registration_url)?,
            ..self
        })
    }
}

impl Validate for UpdateEvent {
    fn validate(self) -> Result<Self, CoreError> {
        Ok(Self {
            title: validation::patch_required_text("title", self.title)?,
            description: validation::patch_required_text("description", self.description)?,
            event_time: validation::patch_optional_text(self.event_time),
            location: validation::patch_required_text("location", self.location)?,
            image_url: validation::patch_url("image_url", self.image_url)?,
            registration_url: validation::patch_url("registration_url", self.registration_url)?,
            ..self
        })
    }
}

impl Entity for Event {
    const NAME: &'static str = "Event";
    const COLLECTION: &'static str = "events";

    type Create = CreateEvent;
    type Update = UpdateEvent;
    type Filter = EventFilter;

    fn id(&self) -> RecordId {
        self.id
    }

    fn from_create(id: RecordId, now: Timestamp, input: CreateEvent) -> Self {
        Self {
            id,
            title: input.title,
            description: input.description,
            event_date: input.event_date,
            event_time: input.event_time,
            location: input.location,
            category: input.category,
            image_url: input.image_url,
            registration_url: input.registration_url,
            is_featured: input.is_featured,
            display_order: input.display_order,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply_update(&mut self, input: UpdateEvent, now: Timestamp) {
        if let Some(title) = input.title {
            self.title = title;
        }
        if let Some(description) = input.description {
            self.description = description;
        }
        if let Some(date) = input.event_date {
            self.event_date = date;
        }
        validation::apply_optional(&mut self.event_time, input.event_time);
        if let Some(location) = input.location {
            self.location = location;
        }
        if let Some(category) = input.category {
            self.category = category;
        }
        validation::apply_optional(&mut self.image_url, input.image_url);
        validation::apply_optional(&mut self.registration_url, input.registration_url);
        if let Some(featured) = input.is_featured {
            self.is_featured = featured;
        }
        if let Some(order) = input.display_order {
            self.display_order = order;
        }
        self.updated_at = now;
    }

    fn matches(&self, filter: &EventFilter, today: NaiveDate) -> bool {
        filter.category.map_or(true, |c| c == self.category)
            && filter
                .upcoming
                .map_or(true, |upcoming| (self.event_date >= today) == upcoming)
    }

    /// Soonest first; `display_order` breaks ties within a day.
    fn list_order(&self, other: &Self) -> Ordering {
        self.event_date
            .cmp(&other.event_date)
            .then(self.display_order.cmp(&other.display_order))
            .then(self.created_at.cmp(&other.created_at))
    }
}
