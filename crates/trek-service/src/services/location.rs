//! Location service
//!
//! The owner-side lifecycle of travel records: logging the current stay,
//! departing it, planning future trips, and editing either kind. Lookups
//! are ownership-scoped; a location that exists but belongs to someone
//! else answers exactly like one that does not exist.

use chrono::{DateTime, Utc};
use tracing::{info, instrument};
use uuid::Uuid;

use trek_core::entities::Location;
use trek_core::{DomainError, PageRequest, PageResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::validate::non_blank;

/// Replacement fields for a location update
#[derive(Debug, Clone)]
pub struct LocationUpdate {
    pub name: String,
    pub longitude: f64,
    pub latitude: f64,
    pub arrive_at: DateTime<Utc>,
    pub depart_at: Option<DateTime<Utc>>,
}

/// Location service
pub struct LocationService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> LocationService<'a> {
    /// Create a new LocationService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Log the place the user is at right now (open-ended Visited stay)
    #[instrument(skip(self))]
    pub async fn log_current_location(
        &self,
        user_id: Uuid,
        name: &str,
        longitude: f64,
        latitude: f64,
    ) -> ServiceResult<Location> {
        let name = non_blank(name, "location name")?;

        let location = Location::visited_now(Uuid::new_v4(), user_id, name, longitude, latitude);
        self.ctx.location_repo().create(&location).await?;

        info!(user = %user_id, location = %location.id, "Current location logged");
        Ok(location)
    }

    /// Close the user's current stay: departure is now
    #[instrument(skip(self))]
    pub async fn depart_current_location(&self, user_id: Uuid) -> ServiceResult<Location> {
        let now = Utc::now();
        let mut location = self
            .ctx
            .location_repo()
            .find_current(user_id, now)
            .await?
            .ok_or(DomainError::LocationNotFound)?;

        location.depart(now);
        self.ctx.location_repo().update(&location).await?;

        info!(user = %user_id, location = %location.id, "Departed current location");
        Ok(location)
    }

    /// Log a future trip
    #[instrument(skip(self))]
    pub async fn log_planned_location(
        &self,
        user_id: Uuid,
        name: &str,
        longitude: f64,
        latitude: f64,
        arrive_at: DateTime<Utc>,
        depart_at: Option<DateTime<Utc>>,
    ) -> ServiceResult<Location> {
        let name = non_blank(name, "location name")?;
        check_planned_dates(arrive_at, depart_at)?;

        let location = Location::planned(
            Uuid::new_v4(),
            user_id,
            name,
            longitude,
            latitude,
            arrive_at,
            depart_at,
        );
        self.ctx.location_repo().create(&location).await?;

        info!(user = %user_id, location = %location.id, "Planned location logged");
        Ok(location)
    }

    /// Edit a planned trip, re-validating its dates
    #[instrument(skip(self, update))]
    pub async fn update_planned_location(
        &self,
        user_id: Uuid,
        location_id: Uuid,
        update: LocationUpdate,
    ) -> ServiceResult<Location> {
        let mut location = self.owned_location(user_id, location_id).await?;
        if !location.is_planned() {
            return Err(DomainError::LocationNotPlanned.into());
        }

        let name = non_blank(&update.name, "location name")?;
        check_planned_dates(update.arrive_at, update.depart_at)?;

        location.relocate(name, update.longitude, update.latitude);
        location.reschedule(update.arrive_at, update.depart_at);
        self.ctx.location_repo().update(&location).await?;

        info!(user = %user_id, location = %location_id, "Planned location updated");
        Ok(location)
    }

    /// Edit a visited stay; its dates are historical, so only interval
    /// ordering is enforced
    #[instrument(skip(self, update))]
    pub async fn update_visited_location(
        &self,
        user_id: Uuid,
        location_id: Uuid,
        update: LocationUpdate,
    ) -> ServiceResult<Location> {
        let mut location = self.owned_location(user_id, location_id).await?;
        if !location.is_visited() {
            return Err(DomainError::LocationNotVisited.into());
        }

        let name = non_blank(&update.name, "location name")?;
        Location::check_interval(update.arrive_at, update.depart_at)?;

        location.relocate(name, update.longitude, update.latitude);
        location.reschedule(update.arrive_at, update.depart_at);
        self.ctx.location_repo().update(&location).await?;

        info!(user = %user_id, location = %location_id, "Visited location updated");
        Ok(location)
    }

    /// Delete one of the user's locations
    #[instrument(skip(self))]
    pub async fn delete_location(&self, user_id: Uuid, location_id: Uuid) -> ServiceResult<()> {
        let location = self.owned_location(user_id, location_id).await?;
        self.ctx.location_repo().delete(location.id).await?;

        info!(user = %user_id, location = %location_id, "Location deleted");
        Ok(())
    }

    /// Fetch one of the user's locations
    #[instrument(skip(self))]
    pub async fn get_location(&self, user_id: Uuid, location_id: Uuid) -> ServiceResult<Location> {
        self.owned_location(user_id, location_id).await
    }

    /// The user's own visited locations, most recent first
    #[instrument(skip(self))]
    pub async fn visited_locations(
        &self,
        user_id: Uuid,
        page: PageRequest,
    ) -> ServiceResult<PageResponse<Location>> {
        let (locations, total) = self.ctx.location_repo().find_visited(user_id, page).await?;
        Ok(PageResponse::new(locations, page, total))
    }

    /// The user's own upcoming planned locations, soonest first
    #[instrument(skip(self))]
    pub async fn planned_locations(
        &self,
        user_id: Uuid,
        page: PageRequest,
    ) -> ServiceResult<PageResponse<Location>> {
        let (locations, total) = self
            .ctx
            .location_repo()
            .find_planned(user_id, Utc::now(), page)
            .await?;
        Ok(PageResponse::new(locations, page, total))
    }

    /// Ownership-scoped lookup: absent and unowned answer identically
    async fn owned_location(&self, user_id: Uuid, location_id: Uuid) -> ServiceResult<Location> {
        match self.ctx.location_repo().find_by_id(location_id).await? {
            Some(location) if location.user_id == user_id => Ok(location),
            _ => Err(DomainError::LocationNotFound.into()),
        }
    }
}

fn check_planned_dates(
    arrive_at: DateTime<Utc>,
    depart_at: Option<DateTime<Utc>>,
) -> ServiceResult<()> {
    if arrive_at <= Utc::now() {
        return Err(DomainError::ArriveNotFuture.into());
    }
    Location::check_interval(arrive_at, depart_at)?;
    Ok(())
}
