use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::Submission;

/// A stored onboarding survey.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Survey {
    pub id: Uuid,
    pub user_id: Uuid,

    pub referral_source: Option<String>,
    pub buying_goals: Option<String>,
    pub comments: Option<String>,

    pub created_at: DateTime<Utc>,
}

/// A survey as submitted by a caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSurvey {
    #[serde(skip_deserializing)]
    pub user_id: Uuid,

    pub referral_source: Option<String>,
    pub buying_goals: Option<String>,
    pub comments: Option<String>,
}

impl Submission for NewSurvey {
    const KIND: &'static str = "survey";

    fn assign_owner(&mut self, owner: Uuid) {
        self.user_id = owner;
    }
}
