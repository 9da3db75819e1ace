//! Database repository for member and presence operations.
//!
//! Presence writes replace a member's status and history in one transaction,
//! so each write lands whole. Concurrent writers follow last-write-wins.

use std::collections::HashMap;

use chrono::{NaiveDate, Utc};
use sqlx::{Row, SqlitePool};

use crate::errors::AppError;
use crate::models::{
    CreateMemberRequest, Datastore, HistoryEntry, PresenceStatus, RevisionInfo, SessionRequest,
    TeamMember, UpdateMemberRequest, WorkStatus,
};

const DAY_FORMAT: &str = "%Y-%m-%d";

/// Database repository for all data operations.
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get the current revision ID.
    pub async fn get_revision_id(&self) -> Result<i64, AppError> {
        let row = sqlx::query("SELECT revision_id FROM meta WHERE id = 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.get("revision_id"))
    }

    /// Get revision info.
    pub async fn get_revision_info(&self) -> Result<RevisionInfo, AppError> {
        let row = sqlx::query("SELECT revision_id, generated_at FROM meta WHERE id = 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(RevisionInfo {
            revision_id: row.get("revision_id"),
            generated_at: row.get("generated_at"),
        })
    }

    /// Increment the revision ID and return the new value.
    pub async fn increment_revision(&self) -> Result<i64, AppError> {
        let now = Utc::now().to_rfc3339();
        sqlx::query("UPDATE meta SET revision_id = revision_id + 1, generated_at = ? WHERE id = 1")
            .bind(&now)
            .execute(&self.pool)
            .await?;
        self.get_revision_id().await
    }

    /// Get the full datastore.
    pub async fn get_datastore(&self) -> Result<Datastore, AppError> {
        let meta =
            sqlx::query("SELECT schema_version, revision_id, generated_at FROM meta WHERE id = 1")
                .fetch_one(&self.pool)
                .await?;

        let members = self.list_members().await?;

        Ok(Datastore {
            schema_version: meta.get("schema_version"),
            revision_id: meta.get("revision_id"),
            generated_at: meta.get("generated_at"),
            members,
        })
    }

    // ==================== MEMBER OPERATIONS ====================

    /// List all members with their history.
    pub async fn list_members(&self) -> Result<Vec<TeamMember>, AppError> {
        let rows = sqlx::query(
            "SELECT id, name, role, avatar_url, status, updated_at FROM members ORDER BY name, id",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut history = self.load_all_history().await?;
        Ok(rows
            .iter()
            .map(|row| {
                let mut member = member_from_row(row);
                member.history = history.remove(&member.id).unwrap_or_default();
                member
            })
            .collect())
    }

    /// List members whose current top-level status matches.
    pub async fn list_members_by_status(
        &self,
        status: WorkStatus,
    ) -> Result<Vec<TeamMember>, AppError> {
        let rows = sqlx::query(
            "SELECT id, name, role, avatar_url, status, updated_at FROM members WHERE status = ? ORDER BY name, id",
        )
        .bind(status.as_str())
        .fetch_all(&self.pool)
        .await?;

        let mut members = Vec::with_capacity(rows.len());
        for row in &rows {
            let mut member = member_from_row(row);
            member.history = self.load_history(&member.id).await?;
            members.push(member);
        }
        Ok(members)
    }

    /// Get a member by ID.
    pub async fn get_member(&self, id: &str) -> Result<Option<TeamMember>, AppError> {
        let row = sqlx::query(
            "SELECT id, name, role, avatar_url, status, updated_at FROM members WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => {
                let mut member = member_from_row(&row);
                member.history = self.load_history(id).await?;
                Ok(Some(member))
            }
            None => Ok(None),
        }
    }

    /// Create a new member with empty history.
    pub async fn create_member(
        &self,
        request: &CreateMemberRequest,
    ) -> Result<TeamMember, AppError> {
        let id = request
            .id
            .clone()
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
        let now = Utc::now().to_rfc3339();

        let result = sqlx::query(
            "INSERT OR IGNORE INTO members (id, name, role, avatar_url, status, updated_at) VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(&request.name)
        .bind(&request.role)
        .bind(&request.avatar_url)
        .bind(request.status.as_str())
        .bind(&now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::Conflict(format!("Member {} already exists", id)));
        }

        self.increment_revision().await?;

        Ok(TeamMember {
            id,
            name: request.name.clone(),
            role: request.role.clone(),
            avatar_url: request.avatar_url.clone(),
            status: request.status,
            history: Vec::new(),
            updated_at: now,
        })
    }

    /// Return the member for an identity, provisioning it on first sight.
    ///
    /// The boolean is `true` when the member was created by this call.
    pub async fn get_or_create_member(
        &self,
        session: &SessionRequest,
    ) -> Result<(TeamMember, bool), AppError> {
        if let Some(member) = self.get_member(&session.uid).await? {
            return Ok((member, false));
        }

        match self.create_member(&session.to_create_request()).await {
            Ok(member) => Ok((member, true)),
            // Another request provisioned the same identity first.
            Err(AppError::Conflict(_)) => {
                let member = self.get_member(&session.uid).await?.ok_or_else(|| {
                    AppError::Internal(format!("Member {} vanished during sign-in", session.uid))
                })?;
                Ok((member, false))
            }
            Err(e) => Err(e),
        }
    }

    /// Update a member's profile fields.
    pub async fn update_member(
        &self,
        id: &str,
        request: &UpdateMemberRequest,
    ) -> Result<TeamMember, AppError> {
        let existing = self
            .get_member(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Member {} not found", id)))?;

        let now = Utc::now().to_rfc3339();
        let name = request.name.clone().unwrap_or(existing.name);
        let role = request.role.clone().unwrap_or(existing.role);
        let avatar_url = request.avatar_url.clone().unwrap_or(existing.avatar_url);

        sqlx::query(
            "UPDATE members SET name = ?, role = ?, avatar_url = ?, updated_at = ? WHERE id = ?",
        )
        .bind(&name)
        .bind(&role)
        .bind(&avatar_url)
        .bind(&now)
        .bind(id)
        .execute(&self.pool)
        .await?;

        self.increment_revision().await?;

        Ok(TeamMember {
            id: id.to_string(),
            name,
            role,
            avatar_url,
            status: existing.status,
            history: existing.history,
            updated_at: now,
        })
    }

    // ==================== PRESENCE OPERATIONS ====================

    /// Persist a member's top-level status and history in one transaction.
    ///
    /// Entries are upserted by day; nothing is deleted.
    pub async fn save_presence(&self, member: TeamMember) -> Result<TeamMember, AppError> {
        let now = Utc::now().to_rfc3339();
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("UPDATE members SET status = ?, updated_at = ? WHERE id = ?")
            .bind(member.status.as_str())
            .bind(&now)
            .bind(&member.id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Member {} not found", member.id)));
        }

        for entry in &member.history {
            sqlx::query(
                r#"INSERT INTO presence_history (member_id, day, status) VALUES (?, ?, ?)
                   ON CONFLICT(member_id, day) DO UPDATE SET status = excluded.status"#,
            )
            .bind(&member.id)
            .bind(entry.date.format(DAY_FORMAT).to_string())
            .bind(entry.status.as_str())
            .execute(&mut *tx)
            .await?;
        }

        sqlx::query("UPDATE meta SET revision_id = revision_id + 1, generated_at = ? WHERE id = 1")
            .bind(&now)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        let mut saved = member;
        saved.updated_at = now;
        saved.history.sort_by_key(|entry| entry.date);
        Ok(saved)
    }

    async fn load_history(&self, member_id: &str) -> Result<Vec<HistoryEntry>, AppError> {
        let rows = sqlx::query(
            "SELECT day, status FROM presence_history WHERE member_id = ? ORDER BY day",
        )
        .bind(member_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().filter_map(history_from_row).collect())
    }

    async fn load_all_history(&self) -> Result<HashMap<String, Vec<HistoryEntry>>, AppError> {
        let rows = sqlx::query(
            "SELECT member_id, day, status FROM presence_history ORDER BY member_id, day",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut by_member: HashMap<String, Vec<HistoryEntry>> = HashMap::new();
        for row in &rows {
            if let Some(entry) = history_from_row(row) {
                let member_id: String = row.get("member_id");
                by_member.entry(member_id).or_default().push(entry);
            }
        }
        Ok(by_member)
    }
}

// Helper functions for row conversion

fn member_from_row(row: &sqlx::sqlite::SqliteRow) -> TeamMember {
    let status: String = row.get("status");
    TeamMember {
        id: row.get("id"),
        name: row.get("name"),
        role: row.get("role"),
        avatar_url: row.get("avatar_url"),
        status: WorkStatus::from_str(&status).unwrap_or(WorkStatus::NoStatus),
        history: Vec::new(),
        updated_at: row.get("updated_at"),
    }
}

fn history_from_row(row: &sqlx::sqlite::SqliteRow) -> Option<HistoryEntry> {
    let day: String = row.get("day");
    let raw_status: String = row.get("status");

    let date = NaiveDate::parse_from_str(&day, DAY_FORMAT).ok();
    match (date, PresenceStatus::from_str(&raw_status)) {
        (Some(date), Some(status)) => Some(HistoryEntry { date, status }),
        _ => {
            tracing::warn!("Skipping unreadable history row: day={} status={}", day, raw_status);
            None
        }
    }
}
