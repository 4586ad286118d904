//! Repository for the `projects` and `project_user` tables.

use estoes_core::pagination::PageRequest;
use estoes_core::types::{DbId, UserId};
use sqlx::{PgConnection, PgExecutor, PgPool};

use crate::models::project::{CreateProject, Project, UpdateProject};

/// Column list shared across queries. Expects `projects` aliased as `p`.
const COLUMNS: &str = "p.id, p.name, p.description, p.project_manager, p.status, \
     COALESCE( \
         (SELECT array_agg(pu.user_id ORDER BY pu.user_id) \
          FROM project_user pu WHERE pu.project_id = p.id), \
         '{}'::BIGINT[] \
     ) AS assigned_to";

/// Provides CRUD and assignment operations for projects.
///
/// Every multi-statement write runs inside a single transaction, so the
/// assignment set always reflects the last write that committed.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project and its assignments, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateProject) -> Result<Project, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let id: DbId = sqlx::query_scalar(
            "INSERT INTO projects (name, description, project_manager, status) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id",
        )
        .bind(&input.name)
        .bind(&input.description)
        .bind(&input.project_manager)
        .bind(&input.status)
        .fetch_one(&mut *tx)
        .await?;

        let user_ids = input.user_ids();
        if !user_ids.is_empty() {
            Self::insert_assignments(&mut tx, id, &user_ids).await?;
        }

        let project = Self::fetch_by_id(&mut *tx, id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)?;

        tx.commit().await?;
        tracing::debug!(project_id = id, users = user_ids.len(), "Project created");
        Ok(project)
    }

    /// Find a project by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        Self::fetch_by_id(pool, id).await
    }

    /// List one page of projects ordered by ID, plus the total project count.
    ///
    /// `page` and `limit` are not range-checked here; a negative window is
    /// rejected by the database.
    pub async fn list(
        pool: &PgPool,
        page: &PageRequest,
    ) -> Result<(Vec<Project>, i64), sqlx::Error> {
        let total = Self::count(pool).await?;

        let query = format!("SELECT {COLUMNS} FROM projects p ORDER BY p.id LIMIT $1 OFFSET $2");
        let projects = sqlx::query_as::<_, Project>(&query)
            .bind(page.limit)
            .bind(page.offset())
            .fetch_all(pool)
            .await?;

        Ok((projects, total))
    }

    /// Count every project.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM projects")
            .fetch_one(pool)
            .await
    }

    /// Projects whose name contains `fragment`, ordered by ID.
    ///
    /// Uses `LIKE`, so matching is case-sensitive and `%` / `_` inside the
    /// fragment act as wildcards. An empty fragment matches every project.
    pub async fn search(pool: &PgPool, fragment: &str) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects p \
             WHERE p.name LIKE '%' || $1 || '%' \
             ORDER BY p.id"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(fragment)
            .fetch_all(pool)
            .await
    }

    /// Overwrite every field of a project and replace its assignments.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let updated = sqlx::query(
            "UPDATE projects SET \
                name = $2, \
                description = $3, \
                project_manager = $4, \
                status = $5 \
             WHERE id = $1",
        )
        .bind(id)
        .bind(&input.name)
        .bind(&input.description)
        .bind(&input.project_manager)
        .bind(&input.status)
        .execute(&mut *tx)
        .await?;

        if updated.rows_affected() == 0 {
            return Ok(None);
        }

        Self::replace_assignments(&mut tx, id, &input.user_ids()).await?;

        let project = Self::fetch_by_id(&mut *tx, id).await?;
        tx.commit().await?;
        Ok(project)
    }

    /// Delete a project and its assignments. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Ok(false);
        }

        // The FK cascades too; deleting explicitly keeps this correct on
        // schemas created without it.
        sqlx::query("DELETE FROM project_user WHERE project_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(true)
    }

    /// Replace the full assignment set of an existing project.
    ///
    /// Locks the project row first, so concurrent replacements for the same
    /// project run one after the other. Returns `false` if the project does
    /// not exist. An empty `user_ids` leaves the project with no assignments.
    pub async fn assign_users(
        pool: &PgPool,
        project_id: DbId,
        user_ids: &[UserId],
    ) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let exists: Option<DbId> =
            sqlx::query_scalar("SELECT id FROM projects WHERE id = $1 FOR UPDATE")
                .bind(project_id)
                .fetch_optional(&mut *tx)
                .await?;

        if exists.is_none() {
            return Ok(false);
        }

        Self::replace_assignments(&mut tx, project_id, user_ids).await?;

        tx.commit().await?;
        tracing::debug!(project_id, users = user_ids.len(), "Project assignments replaced");
        Ok(true)
    }

    /// User ids assigned to a project, ascending.
    pub async fn assigned_users(pool: &PgPool, project_id: DbId) -> Result<Vec<UserId>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT user_id FROM project_user WHERE project_id = $1 ORDER BY user_id",
        )
        .bind(project_id)
        .fetch_all(pool)
        .await
    }

    async fn fetch_by_id<'e, E>(executor: E, id: DbId) -> Result<Option<Project>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!("SELECT {COLUMNS} FROM projects p WHERE p.id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Delete every assignment of `project_id`, then insert `user_ids`.
    async fn replace_assignments(
        conn: &mut PgConnection,
        project_id: DbId,
        user_ids: &[UserId],
    ) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM project_user WHERE project_id = $1")
            .bind(project_id)
            .execute(&mut *conn)
            .await?;

        if !user_ids.is_empty() {
            Self::insert_assignments(conn, project_id, user_ids).await?;
        }

        Ok(())
    }

    async fn insert_assignments(
        conn: &mut PgConnection,
        project_id: DbId,
        user_ids: &[UserId],
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO project_user (project_id, user_id) \
             SELECT $1, user_id FROM UNNEST($2::BIGINT[]) AS t(user_id)",
        )
        .bind(project_id)
        .bind(user_ids)
        .execute(conn)
        .await?;
        Ok(())
    }
}
