use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::debug;

use crate::dto::page_dto::{Page, PageRequest};
use crate::dto::team_dto::{Team, TeamInput};
use crate::error::StoreError;

/**
 * Case-insensitive substring filter over name, city and coach.
 * `TeamFilter::all()` matches every row. Terms are folded with `fold_case`,
 * the same folding used for the stored search keys.
 */
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamFilter {
    pattern: Option<String>,
}

impl TeamFilter {
    pub fn all() -> Self {
        Self::default()
    }

    /// Blank terms match everything.
    pub fn containing(term: Option<&str>) -> Self {
        let pattern = term
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(|t| format!("%{}%", escape_like(&fold_case(t))));
        Self { pattern }
    }

    pub fn pattern(&self) -> Option<&str> {
        self.pattern.as_deref()
    }
}

/// Unicode lower-casing; SQLite's own `lower()` only folds ASCII.
pub fn fold_case(value: &str) -> String {
    value.to_lowercase()
}

fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[async_trait]
pub trait TeamStore: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Team, StoreError>;

    async fn search(&self, filter: &TeamFilter, page: PageRequest) -> Result<Page<Team>, StoreError>;

    /// Stores a new row and returns it with its generated id.
    async fn insert(&self, team: TeamInput) -> Result<Team, StoreError>;

    /// Overwrites every mutable field of an existing row.
    async fn update(&self, team: Team) -> Result<Team, StoreError>;

    /// Removing a missing row is not an error.
    async fn delete(&self, id: i64) -> Result<(), StoreError>;
}

const SEARCH_PREDICATE: &str = r"
    (? IS NULL
        OR name_key LIKE ? ESCAPE '\'
        OR city_key LIKE ? ESCAPE '\'
        OR coach_key LIKE ? ESCAPE '\')";

#[derive(Debug, Clone)]
pub struct SqliteTeamStore {
    pool: SqlitePool,
}

impl SqliteTeamStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TeamStore for SqliteTeamStore {
    async fn find_by_id(&self, id: i64) -> Result<Team, StoreError> {
        sqlx::query_as::<_, Team>("SELECT id, name, coach, city FROM teams WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound(id))
    }

    async fn search(&self, filter: &TeamFilter, page: PageRequest) -> Result<Page<Team>, StoreError> {
        let pattern = filter.pattern();

        let total = sqlx::query_scalar::<_, i64>(&format!(
            "SELECT COUNT(*) FROM teams WHERE {SEARCH_PREDICATE}"
        ))
        .bind(pattern)
        .bind(pattern)
        .bind(pattern)
        .bind(pattern)
        .fetch_one(&self.pool)
        .await?;

        let teams = sqlx::query_as::<_, Team>(&format!(
            "SELECT id, name, coach, city FROM teams WHERE {SEARCH_PREDICATE} ORDER BY id LIMIT ? OFFSET ?"
        ))
        .bind(pattern)
        .bind(pattern)
        .bind(pattern)
        .bind(pattern)
        .bind(page.size())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;

        Ok(Page::new(teams, total, page))
    }

    async fn insert(&self, team: TeamInput) -> Result<Team, StoreError> {
        team.validate()?;

        let created = sqlx::query_as::<_, Team>(
            r#"
            INSERT INTO teams (name, coach, city, name_key, coach_key, city_key)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING id, name, coach, city
            "#,
        )
        .bind(&team.name)
        .bind(&team.coach)
        .bind(&team.city)
        .bind(fold_case(&team.name))
        .bind(team.coach.as_deref().map(fold_case))
        .bind(team.city.as_deref().map(fold_case))
        .fetch_one(&self.pool)
        .await?;

        debug!("Inserted team {}", created.id);
        Ok(created)
    }

    async fn update(&self, team: Team) -> Result<Team, StoreError> {
        TeamInput::from(team.clone()).validate()?;

        let result = sqlx::query(
            r#"
            UPDATE teams
            SET name = ?, coach = ?, city = ?,
                name_key = ?, coach_key = ?, city_key = ?
            WHERE id = ?
            "#,
        )
        .bind(&team.name)
        .bind(&team.coach)
        .bind(&team.city)
        .bind(fold_case(&team.name))
        .bind(team.coach.as_deref().map(fold_case))
        .bind(team.city.as_deref().map(fold_case))
        .bind(team.id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(team.id));
        }
        Ok(team)
    }

    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM teams WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            debug!("Team {} was already absent", id);
        }
        Ok(())
    }
}
