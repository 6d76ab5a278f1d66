//! Reservation Repository

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use shared::ReservationStatus;

use crate::db::models::Reservation;

use super::{BaseRepository, RepoError, RepoResult};

const TABLE: &str = "reservation";

#[derive(Clone)]
pub struct ReservationRepository {
    base: BaseRepository,
}

impl ReservationRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn create(&self, reservation: Reservation) -> RepoResult<Reservation> {
        let created: Option<Reservation> =
            self.base.db().create(TABLE).content(reservation).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create reservation".to_string()))
    }

    /// All reservations, newest first
    pub async fn find_all(&self) -> RepoResult<Vec<Reservation>> {
        let reservations: Vec<Reservation> = self
            .base
            .db()
            .query("SELECT * FROM reservation ORDER BY createdAt DESC")
            .await?
            .take(0)?;
        Ok(reservations)
    }

    /// 同一天同一时段、仍占用桌位的预订（pending / confirmed）。
    /// 冲突判定和可用桌位计算都走这一条查询。
    pub async fn find_active_for_slot(
        &self,
        reservation_date: i64,
        time_slot: &str,
    ) -> RepoResult<Vec<Reservation>> {
        let reservations: Vec<Reservation> = self
            .base
            .db()
            .query(
                r#"SELECT * FROM reservation
                    WHERE reservationDate = $date
                    AND timeSlot = $slot
                    AND status IN ['pending', 'confirmed']"#,
            )
            .bind(("date", reservation_date))
            .bind(("slot", time_slot.to_string()))
            .await?
            .take(0)?;
        Ok(reservations)
    }

    pub async fn update_status(
        &self,
        id: &str,
        status: ReservationStatus,
        now: i64,
    ) -> RepoResult<Reservation> {
        let thing = self.base.parse_id(id)?;
        let mut result = self
            .base
            .db()
            .query("UPDATE $thing SET status = $status, updatedAt = $now RETURN AFTER")
            .bind(("thing", thing))
            .bind(("status", status))
            .bind(("now", now))
            .await?;
        result
            .take::<Option<Reservation>>(0)?
            .ok_or_else(|| RepoError::NotFound(format!("Reservation {} not found", id)))
    }
}
