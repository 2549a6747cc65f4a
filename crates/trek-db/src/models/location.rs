//! Location database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for locations table
#[derive(Debug, Clone, FromRow)]
pub struct LocationModel {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub longitude: f64,
    pub latitude: f64,
    pub arrive_at: DateTime<Utc>,
    pub depart_at: Option<DateTime<Utc>>,
    pub location_type: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
