use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::error::ValidationError;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone, PartialEq, Eq)]
pub struct Team {
    pub id: i64,
    pub name: String,
    pub coach: Option<String>,
    pub city: Option<String>,
}

/**
 * Body of POST and PUT requests. `id` is only honoured when the service is
 * told to replace an existing row.
 */
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct TeamInput {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub coach: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
}

impl TeamInput {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_coach(mut self, coach: impl Into<String>) -> Self {
        self.coach = Some(coach.into());
        self
    }

    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    /// Rejects a blank name before anything reaches storage.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError("team name must not be blank".to_string()));
        }
        Ok(())
    }
}

impl From<Team> for TeamInput {
    fn from(team: Team) -> Self {
        Self {
            id: Some(team.id),
            name: team.name,
            coach: team.coach,
            city: team.city,
        }
    }
}
