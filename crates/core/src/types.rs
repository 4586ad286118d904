/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// External user identifiers stored in `project_user.user_id`.
pub type UserId = i64;
