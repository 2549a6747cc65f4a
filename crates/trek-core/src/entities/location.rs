//! Location entity - a user's travel record
//!
//! A location is either Visited (a stay that happened or is ongoing) or
//! Planned (a future trip). There is no transition between the two types,
//! only field mutation within a type. An absent `depart_at` means the stay
//! is open-ended.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::DomainError;

/// Classification of a travel record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationType {
    Visited,
    Planned,
}

impl LocationType {
    /// Stable string form used by the persistence layer
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Visited => "visited",
            Self::Planned => "planned",
        }
    }
}

/// Location entity
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub longitude: f64,
    pub latitude: f64,
    pub arrive_at: DateTime<Utc>,
    /// `None` means open-ended: the user is still there (Visited) or has
    /// no known end date (Planned)
    pub depart_at: Option<DateTime<Utc>>,
    pub location_type: LocationType,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Location {
    /// Create a Visited location the user is arriving at right now,
    /// with an open-ended stay
    pub fn visited_now(id: Uuid, user_id: Uuid, name: String, longitude: f64, latitude: f64) -> Self {
        let now = Utc::now();
        Self {
            id,
            user_id,
            name,
            longitude,
            latitude,
            arrive_at: now,
            depart_at: None,
            location_type: LocationType::Visited,
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a Planned location with a future arrival
    pub fn planned(
        id: Uuid,
        user_id: Uuid,
        name: String,
        longitude: f64,
        latitude: f64,
        arrive_at: DateTime<Utc>,
        depart_at: Option<DateTime<Utc>>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            user_id,
            name,
            longitude,
            latitude,
            arrive_at,
            depart_at,
            location_type: LocationType::Planned,
            created_at: now,
            updated_at: now,
        }
    }

    #[inline]
    pub fn is_visited(&self) -> bool {
        self.location_type == LocationType::Visited
    }

    #[inline]
    pub fn is_planned(&self) -> bool {
        self.location_type == LocationType::Planned
    }

    /// Is this the user's current location at `now`?
    ///
    /// True for a Visited location whose stay interval contains `now`;
    /// an open-ended stay counts as containing `now`. A Planned location
    /// is never current, whatever its dates.
    pub fn is_current(&self, now: DateTime<Utc>) -> bool {
        self.is_visited()
            && self.arrive_at <= now
            && self.depart_at.map_or(true, |depart| depart >= now)
    }

    /// Close an open-ended stay: the user is leaving now
    pub fn depart(&mut self, now: DateTime<Utc>) {
        self.depart_at = Some(now);
        self.updated_at = now;
    }

    /// Replace the travel dates, stamping the modification time
    pub fn reschedule(&mut self, arrive_at: DateTime<Utc>, depart_at: Option<DateTime<Utc>>) {
        self.arrive_at = arrive_at;
        self.depart_at = depart_at;
        self.updated_at = Utc::now();
    }

    /// Replace the place itself (name and coordinates)
    pub fn relocate(&mut self, name: String, longitude: f64, latitude: f64) {
        self.name = name;
        self.longitude = longitude;
        self.latitude = latitude;
        self.updated_at = Utc::now();
    }

    /// Validate that a stay interval is ordered: `arrive <= depart` when
    /// both ends are concrete
    pub fn check_interval(
        arrive_at: DateTime<Utc>,
        depart_at: Option<DateTime<Utc>>,
    ) -> Result<(), DomainError> {
        match depart_at {
            Some(depart) if arrive_at > depart => Err(DomainError::ArriveAfterDepart),
            _ => Ok(()),
        }
    }
}
