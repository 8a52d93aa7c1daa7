//! Team member model and DTOs.

use std::cmp::Ordering;

use chrono::NaiveDate;
use clubsite_core::error::CoreError;
use clubsite_core::types::{RecordId, Timestamp};
use clubsite_core::validation;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::entity::{Entity, Validate};

/// Section of the team page a member is listed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "team_category", rename_all = "lowercase")]
pub enum TeamCategory {
    Core,
    Lead,
    #[default]
    Member,
    Advisor,
    Alumni,
}

/// A team member row from the `team_members` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct TeamMember {
    pub id: RecordId,
    pub name: String,
    /// Position title shown under the name ("President", "Design Lead").
    pub role: String,
    pub team: TeamCategory,
    pub bio: Option<String>,
    pub image_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub github_url: Option<String>,
    pub email: Option<String>,
    pub display_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new team member.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTeamMember {
    pub name: String,
    pub role: String,
    #[serde(default)]
    pub team: TeamCategory,
    pub bio: Option<String>,
    pub image_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub github_url: Option<String>,
    pub email: Option<String>,
    #[serde(default)]
    pub display_order: i32,
}

/// DTO for updating a team member. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTeamMember {
    pub name: Option<String>,
    pub role: Option<String>,
    pub team: Option<TeamCategory>,
    pub bio: Option<String>,
    pub image_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub github_url: Option<String>,
    pub email: Option<String>,
    pub display_order: Option<i32>,
}

/// Query parameters accepted by `GET /api/team`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TeamMemberFilter {
    pub team: Option<TeamCategory>,
}

impl Validate for CreateTeamMember {
    fn validate(self) -> Result<Self, CoreError> {
        Ok(Self {
            name: validation::required_text("name", self.name)?,
            role: validation::required_text("role", self.role)?,
            bio: validation::optional_text(self.bio),
            image_url: validation::optional_url("image_url", self.image_url)?,
            linkedin_url: validation::optional_url("linkedin_url", self.linkedin_url)?,
            github_url: validation::optional_url("github_url", self.github_url)?,
            email: validation::optional_email("email", self.email)?,
            ..self
        })
    }
}

impl Validate for UpdateTeamMember {
    fn validate(self) -> Result<Self, CoreError> {
        Ok(Self {
            name: validation::patch_required_text("name", self.name)?,
            role: validation::patch_required_text("role", self.role)?,
            bio: validation::patch_optional_text(self.bio),
            image_url: validation::patch_url("image_url", self.image_url)?,
            linkedin_url: validation::patch_url("linkedin_url", self.linkedin_url)?,
            github_url: validation::patch_url("github_url", self.github_url)?,
            email: validation::patch_email("email", self.email)?,
            ..self
        })
    }
}

impl Entity for TeamMember {
    const NAME: &'static str = "Team member";
    const COLLECTION: &'static str = "team_members";

    type Create = CreateTeamMember;
    type Update = UpdateTeamMember;
    type Filter = TeamMemberFilter;

    fn id(&self) -> RecordId {
        self.id
    }

    fn from_create(id: RecordId, now: Timestamp, input: CreateTeamMember) -> Self {
        Self {
            id,
            name: input.name,
            role: input.role,
            team: input.team,
            bio: input.bio,
            image_url: input.image_url,
            linkedin_url: input.linkedin_url,
            github_url: input.github_url,
            email: input.email,
            display_order: input.display_order,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply_update(&mut self, input: UpdateTeamMember, now: Timestamp) {
        if let Some(name) = input.name {
            self.name = name;
        }
        if let Some(role) = input.role {
            self.role = role;
        }
        if let Some(team) = input.team {
            self.team = team;
        }
        validation::apply_optional(&mut self.bio, input.bio);
        validation::apply_optional(&mut self.image_url, input.image_url);
        validation::apply_optional(&mut self.linkedin_url, input.linkedin_url);
        validation::apply_optional(&mut self.github_url, input.github_url);
        validation::apply_optional(&mut self.email, input.email);
        if let Some(order) = input.display_order {
            self.display_order = order;
        }
        self.updated_at = now;
    }

    fn matches(&self, filter: &TeamMemberFilter, _today: NaiveDate) -> bool {
        filter.team.map_or(true, |t| t == self.team)
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

    fn input() -> CreateTeamMember {
        CreateTeamMember {
            name: "Ada Lovelace".into(),
            role: "President".into(),
            team: TeamCategory::Core,
            bio: None,
            image_url: None,
            linkedin_url: Some("linkedin.com/in/ada".into()),
            github_url: None,
            email: Some("ada@example.org".into()),
            display_order: 1,
        }
    }

    #[test]
    fn normalizes_profile_links() {
        let member = input().validate().unwrap();
        assert_eq!(
            member.linkedin_url.as_deref(),
            Some("https://linkedin.com/in/ada")
        );
    }

    #[test]
    fn rejects_bad_email() {
        let bad = CreateTeamMember {
            email: Some("ada-at-example.org".into()),
            ..input()
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn team_defaults_to_member() {
        let parsed: CreateTeamMember =
            serde_json::from_value(serde_json::json!({"name": "Grace", "role": "Volunteer"}))
                .unwrap();
        assert_eq!(parsed.team, TeamCategory::Member);
        assert_eq!(parsed.display_order, 0);
    }
}
