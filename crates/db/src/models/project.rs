//! Project model and DTOs.

use std::cmp::Ordering;

use chrono::NaiveDate;
use clubsite_core::error::CoreError;
use clubsite_core::types::{RecordId, Timestamp};
use clubsite_core::validation;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::entity::{Entity, Validate};

/// Accent colour of a project card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "accent_color", rename_all = "lowercase")]
pub enum AccentColor {
    #[default]
    Blue,
    Purple,
    Green,
    Orange,
    Pink,
    Cyan,
}

/// A project row from the `projects` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Project {
    pub id: RecordId,
    pub title: String,
    pub description: String,
    pub tech_stack: Vec<String>,
    pub image_url: Option<String>,
    pub github_url: Option<String>,
    pub demo_url: Option<String>,
    pub color: AccentColor,
    pub display_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new project.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProject {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub tech_stack: Vec<String>,
    pub image_url: Option<String>,
    pub github_url: Option<String>,
    pub demo_url: Option<String>,
    #[serde(default)]
    pub color: AccentColor,
    #[serde(default)]
    pub display_order: i32,
}

/// DTO for updating a project. All fields are optional.
///
/// A present `tech_stack` replaces the whole list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProject {
    pub title: Option<String>,
    pub description: Option<String>,
    pub tech_stack: Option<Vec<String>>,
    pub image_url: Option<String>,
    pub github_url: Option<String>,
    pub demo_url: Option<String>,
    pub color: Option<AccentColor>,
    pub display_order: Option<i32>,
}

/// Query parameters accepted by `GET /api/projects`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectFilter {
    pub color: Option<AccentColor>,
}

impl Validate for CreateProject {
    fn validate(self) -> Result<Self, CoreError> {
        Ok(Self {
            title: validation::required_text("title", self.title)?,
            description: validation::required_text("description", self.description)?,
            tech_stack: validation::tag_list(self.tech_stack),
            image_url: validation::optional_url("image_url", self.image_url)?,
            github_url: validation::optional_url("github_url", self.github_url)?,
            demo_url: validation::optional_url("demo_url", self.demo_url)?,
            ..self
        })
    }
}

impl Validate for UpdateProject {
    fn validate(self) -> Result<Self, CoreError> {
        Ok(Self {
            title: validation::patch_required_text("title", self.title)?,
            description: validation::patch_required_text("description", self.description)?,
            tech_stack: self.tech_stack.map(validation::tag_list),
            image_url: validation::patch_url("image_url", self.image_url)?,
            github_url: validation::patch_url("github_url", self.github_url)?,
            demo_url: validation::patch_url("demo_url", self.demo_url)?,
            ..self
        })
    }
}

impl Entity for Project {
    const NAME: &'static str = "Project";
    const COLLECTION: &'static str = "projects";

    type Create = CreateProject;
    type Update = UpdateProject;
    type Filter = ProjectFilter;

    fn id(&self) -> RecordId {
        self.id
    }

    fn from_create(id: RecordId, now: Timestamp, input: CreateProject) -> Self {
        Self {
            id,
            title: input.title,
            description: input.description,
            tech_stack: input.tech_stack,
            image_url: input.image_url,
            github_url: input.github_url,
            demo_url: input.demo_url,
            color: input.color,
            display_order: input.display_order,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply_update(&mut self, input: UpdateProject, now: Timestamp) {
        if let Some(title) = input.title {
            self.title = title;
        }
        if let Some(description) = input.description {
            self.description = description;
        }
        if let Some(stack) = input.tech_stack {
            self.tech_stack = stack;
        }
        validation::apply_optional(&mut self.image_url, input.image_url);
        validation::apply_optional(&mut self.github_url, input.github_url);
        validation::apply_optional(&mut self.demo_url, input.demo_url);
        if let Some(color) = input.color {
            self.color = color;
        }
        if let Some(order) = input.display_order {
            self.display_order = order;
        }
        self.updated_at = now;
    }

    fn matches(&self, filter: &ProjectFilter, _today: NaiveDate) -> bool {
        filter.color.map_or(true, |c| c == self.color)
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
    fn tech_stack_is_cleaned() {
        let input = CreateProject {
            title: "Club site".into(),
            description: "This website".into(),
            tech_stack: vec!["Rust".into(), " ".into(), "rust".into(), "Postgres".into()],
            image_url: None,
            github_url: Some("github.com/club/site".into()),
            demo_url: None,
            color: AccentColor::Purple,
            display_order: 0,
        }
        .validate()
        .unwrap();
        assert_eq!(input.tech_stack, vec!["Rust".to_string(), "Postgres".to_string()]);
        assert_eq!(input.github_url.as_deref(), Some("https://github.com/club/site"));
    }

    #[test]
    fn bad_demo_url_rejected() {
        let patch = UpdateProject {
            demo_url: Some("not a url".into()),
            ..Default::default()
        };
        assert!(patch.validate().is_err());
    }
}
