use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

/// Diet flag. Wire and column values are `yes` / `no`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "diet_flag", rename_all = "lowercase")]
pub enum Diet {
    Yes,
    No,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Meal {
    pub id: Uuid,
    pub session_id: Uuid,
    pub name: String,
    pub description: String,
    #[serde(with = "time::serde::rfc3339")]
    pub datetime: OffsetDateTime,
    pub diet: Diet,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

pub async fn list_by_session(db: &PgPool, session_id: Uuid) -> Result<Vec<Meal>, sqlx::Error> {
    sqlx::query_as::<_, Meal>(
        r#"
        SELECT id, session_id, name, description, datetime, diet, created_at
        FROM meals
        WHERE session_id = $1
        "#,
    )
    .bind(session_id)
    .fetch_all(db)
    .await
}

/// Absent and not-owned are indistinguishable: both come back as `None`.
pub async fn find_by_id(
    db: &PgPool,
    session_id: Uuid,
    id: Uuid,
) -> Result<Option<Meal>, sqlx::Error> {
    sqlx::query_as::<_, Meal>(
        r#"
        SELECT id, session_id, name, description, datetime, diet, created_at
        FROM meals
        WHERE id = $1 AND session_id = $2
        "#,
    )
    .bind(id)
    .bind(session_id)
    .fetch_optional(db)
    .await
}

pub async fn insert(
    db: &PgPool,
    id: Uuid,
    session_id: Uuid,
    name: &str,
    description: &str,
    datetime: OffsetDateTime,
    diet: Diet,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO meals (id, session_id, name, description, datetime, diet)
        VALUES ($1, $2, $3, $4, $5, $6)
        "#,
    )
    .bind(id)
    .bind(session_id)
    .bind(name)
    .bind(description)
    .bind(datetime)
    .bind(diet)
    .execute(db)
    .await?;
    Ok(())
}

/// Conditional single-statement write; the ownership check is the WHERE
/// clause itself. Returns rows affected (0 means not found or not owned).
pub async fn update(
    db: &PgPool,
    session_id: Uuid,
    id: Uuid,
    name: &str,
    description: &str,
    datetime: OffsetDateTime,
    diet: Diet,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE meals
        SET name = $1, description = $2, datetime = $3, diet = $4
        WHERE id = $5 AND session_id = $6
        "#,
    )
    .bind(name)
    .bind(description)
    .bind(datetime)
    .bind(diet)
    .bind(id)
    .bind(session_id)
    .execute(db)
    .await?;
    Ok(result.rows_affected())
}

pub async fn delete(db: &PgPool, session_id: Uuid, id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        DELETE FROM meals
        WHERE id = $1 AND session_id = $2
        "#,
    )
    .bind(id)
    .bind(session_id)
    .execute(db)
    .await?;
    Ok(result.rows_affected())
}

/// Flags only, in store-native order; feeds the summary aggregation.
pub async fn diet_flags(db: &PgPool, session_id: Uuid) -> Result<Vec<Diet>, sqlx::Error> {
    sqlx::query_scalar::<_, Diet>(
        r#"
        SELECT diet
        FROM meals
        WHERE session_id = $1
        "#,
    )
    .bind(session_id)
    .fetch_all(db)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn diet_serializes_as_yes_no() {
        assert_eq!(serde_json::to_string(&Diet::Yes).unwrap(), r#""yes""#);
        assert_eq!(serde_json::to_string(&Diet::No).unwrap(), r#""no""#);
        assert_eq!(serde_json::from_str::<Diet>(r#""no""#).unwrap(), Diet::No);
    }

    #[test]
    fn diet_rejects_unknown_values() {
        assert!(serde_json::from_str::<Diet>(r#""maybe""#).is_err());
    }

    #[test]
    fn meal_serializes_with_column_names_and_rfc3339_timestamps() {
        let meal = Meal {
            id: Uuid::nil(),
            session_id: Uuid::nil(),
            name: "Lunch".into(),
            description: "Grilled chicken".into(),
            datetime: datetime!(2024-01-02 12:00 UTC),
            diet: Diet::Yes,
            created_at: datetime!(2024-01-02 12:05 UTC),
        };

        let json = serde_json::to_value(&meal).unwrap();
        assert_eq!(json["session_id"], Uuid::nil().to_string());
        assert_eq!(json["diet"], "yes");
        assert_eq!(json["datetime"], "2024-01-02T12:00:00Z");
        assert_eq!(json["created_at"], "2024-01-02T12:05:00Z");
    }
}
