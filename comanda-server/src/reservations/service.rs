//! 订座与冲突检测
//!
//! 冲突的定义是精确匹配：同一天（归一到当天零点的毫秒值）、
//! 同一个时段字符串、桌号集合有交集。不同时段即使时间上重叠
//! 也互不冲突，时段只是标签。
//!
//! 查重和落库之间有窗口，两个并发请求可能同时通过检查。
//! 单进程部署下用一把进程内异步锁把 create 串行化即可闭合。

use std::sync::Arc;

use chrono_tz::Tz;
use tokio::sync::Mutex;
use tracing::info;

use shared::{CreateReservationRequest, ReservationStatus, TABLE_UNIVERSE, TableAvailability};

use crate::db::models::Reservation;
use crate::db::repository::ReservationRepository;
use crate::utils::time::{day_start_millis, now_millis, parse_date};
use crate::utils::validation::validate_table_numbers;
use crate::utils::{AppError, AppResult};

/// 活跃预订占用的桌号并集，去重升序
fn reserved_tables(active: &[Reservation]) -> Vec<i32> {
    let mut reserved: Vec<i32> = active
        .iter()
        .flat_map(|r| r.selected_tables.iter().copied())
        .collect();
    reserved.sort_unstable();
    reserved.dedup();
    reserved
}

/// 全集减去已占用
fn available_tables(reserved: &[i32]) -> Vec<i32> {
    TABLE_UNIVERSE
        .iter()
        .copied()
        .filter(|t| !reserved.contains(t))
        .collect()
}

/// 请求桌号与已占用桌号的交集，升序
fn overlapping_tables(reserved: &[i32], requested: &[i32]) -> Vec<i32> {
    let mut overlap: Vec<i32> = requested
        .iter()
        .copied()
        .filter(|t| reserved.contains(t))
        .collect();
    overlap.sort_unstable();
    overlap.dedup();
    overlap
}

fn join_tables(tables: &[i32]) -> String {
    tables
        .iter()
        .map(|t| t.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Clone)]
pub struct ReservationService {
    reservations: ReservationRepository,
    timezone: Tz,
    /// 串行化查重+落库，闭合并发创建的冲突窗口
    create_lock: Arc<Mutex<()>>,
}

impl ReservationService {
    pub fn new(reservations: ReservationRepository, timezone: Tz) -> Self {
        Self {
            reservations,
            timezone,
            create_lock: Arc::new(Mutex::new(())),
        }
    }

    /// 某天某时段的桌位占用情况。
    /// 不变量：available 与 reserved 不相交，并集恰好是 1..8。
    pub async fn availability(&self, date: &str, time_slot: &str) -> AppResult<TableAvailability> {
        let date_millis = day_start_millis(parse_date(date)?, self.timezone);
        let active = self
            .reservations
            .find_active_for_slot(date_millis, time_slot)
            .await?;
        let reserved = reserved_tables(&active);
        Ok(TableAvailability {
            available_tables: available_tables(&reserved),
            reserved_tables: reserved,
        })
    }

    /// 创建预订。桌号必须在 1..8 内；与活跃预订撞桌时拒绝，
    /// 错误信息点名撞上的桌号和日期时段。
    pub async fn create(&self, req: CreateReservationRequest) -> AppResult<Reservation> {
        validate_table_numbers(&req.selected_tables)?;

        let date_millis = day_start_millis(parse_date(&req.reservation_date)?, self.timezone);

        let _guard = self.create_lock.lock().await;

        let active = self
            .reservations
            .find_active_for_slot(date_millis, &req.time_slot)
            .await?;
        let reserved = reserved_tables(&active);
        let overlap = overlapping_tables(&reserved, &req.selected_tables);
        if !overlap.is_empty() {
            return Err(AppError::conflict(format!(
                "Tables {} are already reserved for {} at {}",
                join_tables(&overlap),
                req.reservation_date,
                req.time_slot
            )));
        }

        let now = now_millis();
        let code = Reservation::generate_code(now / 1000, rand::random::<u32>());
        let reservation = Reservation::from_request(req, code, date_millis, now);
        let created = self.reservations.create(reservation).await?;

        info!(
            target: "reservations",
            "Reservation {} created: tables [{}] on {} {}",
            created.code,
            join_tables(&created.selected_tables),
            created.reservation_date,
            created.time_slot
        );

        Ok(created)
    }

    pub async fn list(&self) -> AppResult<Vec<Reservation>> {
        Ok(self.reservations.find_all().await?)
    }

    pub async fn update_status(
        &self,
        id: &str,
        status: ReservationStatus,
    ) -> AppResult<Reservation> {
        let updated = self
            .reservations
            .update_status(id, status, now_millis())
            .await?;
        info!(
            target: "reservations",
            "Reservation {} status set to {:?}", updated.code, updated.status
        );
        Ok(updated)
    }

    /// 取消不设前置状态检查，与源系统行为一致
    pub async fn cancel(&self, id: &str) -> AppResult<Reservation> {
        self.update_status(id, ReservationStatus::Cancelled).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reservation(tables: &[i32], status: ReservationStatus) -> Reservation {
        Reservation {
            id: None,
            code: "RES1".into(),
            customer_name: "Ravi".into(),
            customer_phone: "9812345678".into(),
            customer_email: None,
            reservation_date: 1_748_716_200_000,
            time_slot: "18:00-19:00".into(),
            selected_tables: tables.to_vec(),
            has_food: false,
            food_items: vec![],
            food_total: 0.0,
            table_total: 0.0,
            grand_total: 0.0,
            status,
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn reserved_union_is_deduplicated_and_sorted() {
        let active = vec![
            reservation(&[3, 1], ReservationStatus::Pending),
            reservation(&[3, 5], ReservationStatus::Confirmed),
        ];
        assert_eq!(reserved_tables(&active), vec![1, 3, 5]);
    }

    #[test]
    fn available_and_reserved_partition_the_universe() {
        let active = vec![reservation(&[2, 7], ReservationStatus::Pending)];
        let reserved = reserved_tables(&active);
        let available = available_tables(&reserved);

        let mut union: Vec<i32> = available.iter().chain(reserved.iter()).copied().collect();
        union.sort_unstable();
        assert_eq!(union, TABLE_UNIVERSE.to_vec());
        assert!(available.iter().all(|t| !reserved.contains(t)));
    }

    #[test]
    fn overlap_names_exactly_the_contested_tables() {
        let reserved = vec![1, 2];
        assert_eq!(overlapping_tables(&reserved, &[2, 3]), vec![2]);
        assert!(overlapping_tables(&reserved, &[3, 4]).is_empty());
    }

    #[test]
    fn empty_day_leaves_every_table_available() {
        let reserved = reserved_tables(&[]);
        assert!(reserved.is_empty());
        assert_eq!(available_tables(&reserved), TABLE_UNIVERSE.to_vec());
    }
}
