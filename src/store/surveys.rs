use super::{pool, StoreError};
use crate::records::{NewSurvey, Survey};

/// Persist a mapped survey and return the committed row.
pub async fn insert(survey: NewSurvey) -> Result<Survey, StoreError> {
    let pool = pool().await?;

    let stored = sqlx::query_as::<_, Survey>(
        r#"
        INSERT INTO surveys (user_id, referral_source, buying_goals, comments)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(survey.user_id)
    .bind(survey.referral_source)
    .bind(survey.buying_goals)
    .bind(survey.comments)
    .fetch_one(pool)
    .await?;

    Ok(stored)
}
