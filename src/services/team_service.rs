use std::sync::Arc;

use tracing::info;

use crate::dto::page_dto::{Page, PageRequest};
use crate::dto::player_dto::PlayerView;
use crate::dto::team_dto::{Team, TeamInput};
use crate::error::ServiceError;
use crate::services::players_gateway::PlayersGateway;
use crate::services::team_store::{TeamFilter, TeamStore};

/**
 * Coordinates the team store and the Players gateway. Built once at startup
 * and shared by every request handler.
 */
#[derive(Clone)]
pub struct TeamService {
    store: Arc<dyn TeamStore>,
    players: Arc<dyn PlayersGateway>,
}

impl TeamService {
    pub fn new(store: Arc<dyn TeamStore>, players: Arc<dyn PlayersGateway>) -> Self {
        Self { store, players }
    }

    pub async fn list_teams(&self, search: Option<&str>, page: i64, size: i64) -> Result<Page<Team>, ServiceError> {
        let request = PageRequest::normalized(page, size);
        let filter = TeamFilter::containing(search);
        info!(
            "Listing teams page {} size {} filter {:?}",
            request.page(),
            request.size(),
            filter.pattern()
        );

        Ok(self.store.search(&filter, request).await?)
    }

    pub async fn get_team(&self, id: i64) -> Result<Team, ServiceError> {
        info!("Fetching team {}", id);
        Ok(self.store.find_by_id(id).await?)
    }

    /// Inserts when `team.id` is unset, otherwise replaces that row.
    pub async fn create_or_replace(&self, team: TeamInput) -> Result<Team, ServiceError> {
        let saved = match team.id {
            Some(id) => {
                info!("Replacing team {}", id);
                self.store
                    .update(Team {
                        id,
                        name: team.name,
                        coach: team.coach,
                        city: team.city,
                    })
                    .await?
            }
            None => {
                info!("Creating team {}", team.name);
                self.store.insert(team).await?
            }
        };
        Ok(saved)
    }

    pub async fn delete_team(&self, id: i64) -> Result<(), ServiceError> {
        info!("Deleting team {}", id);
        Ok(self.store.delete(id).await?)
    }

    // Team existence is not checked locally; the Players service owns its own team ids.
    pub async fn players_of_team(&self, id: i64) -> Result<Vec<PlayerView>, ServiceError> {
        info!("Fetching players of team {}", id);
        Ok(self.players.players_by_team_id(id).await?)
    }

    pub async fn players_of_team_by_name(&self, name: &str) -> Result<Vec<PlayerView>, ServiceError> {
        info!("Fetching players of team named {}", name);
        Ok(self.players.players_by_team_name(name).await?)
    }
}
