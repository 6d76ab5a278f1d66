//! 订座冲突检测集成测试
//!
//! 在临时目录上的嵌入式存储里走完整的订座动线：冲突只看精确的
//! （日期, 时段）对加桌号交集，可用性把桌位全集切成两半，
//! 取消和完成都会释放桌位。

use comanda_server::{AppError, Config, ServerState};
use shared::{CreateReservationRequest, ReservationStatus, TABLE_UNIVERSE};
use tempfile::TempDir;

async fn test_state() -> (TempDir, ServerState) {
    let tmp = tempfile::tempdir().expect("create tempdir");
    let config = Config::with_overrides(tmp.path().to_string_lossy(), 0);
    let state = ServerState::initialize(&config)
        .await
        .expect("initialize state");
    (tmp, state)
}

fn reservation_request(date: &str, slot: &str, tables: &[i32]) -> CreateReservationRequest {
    CreateReservationRequest {
        customer_name: "Ravi Kumar".into(),
        customer_phone: "9812345678".into(),
        customer_email: None,
        reservation_date: date.into(),
        time_slot: slot.into(),
        selected_tables: tables.to_vec(),
        has_food: false,
        food_items: vec![],
        food_total: 0.0,
        table_total: 0.0,
        grand_total: 0.0,
    }
}

#[tokio::test]
async fn clashing_tables_are_rejected_by_name() {
    let (_tmp, state) = test_state().await;

    let created = state
        .reservations
        .create(reservation_request("2025-06-01", "18:00-19:00", &[1, 2]))
        .await
        .expect("first reservation");
    assert!(created.code.starts_with("RES"));
    assert_eq!(created.status, ReservationStatus::Pending);

    let err = state
        .reservations
        .create(reservation_request("2025-06-01", "18:00-19:00", &[2, 3]))
        .await
        .unwrap_err();
    match err {
        // 错误信息只点名撞上的桌号
        AppError::Conflict(msg) => {
            assert_eq!(
                msg,
                "Tables 2 are already reserved for 2025-06-01 at 18:00-19:00"
            );
        }
        other => panic!("expected conflict, got {other:?}"),
    }

    // 没撞上的桌子照常可订
    state
        .reservations
        .create(reservation_request("2025-06-01", "18:00-19:00", &[3, 4]))
        .await
        .expect("disjoint tables");
}

#[tokio::test]
async fn overlap_message_lists_every_contested_table() {
    let (_tmp, state) = test_state().await;

    state
        .reservations
        .create(reservation_request("2025-06-02", "19:00-20:00", &[4, 5, 6]))
        .await
        .expect("first");

    let err = state
        .reservations
        .create(reservation_request("2025-06-02", "19:00-20:00", &[6, 4, 8]))
        .await
        .unwrap_err();
    match err {
        AppError::Conflict(msg) => {
            assert_eq!(
                msg,
                "Tables 4, 6 are already reserved for 2025-06-02 at 19:00-20:00"
            );
        }
        other => panic!("expected conflict, got {other:?}"),
    }
}

#[tokio::test]
async fn availability_partitions_the_universe() {
    let (_tmp, state) = test_state().await;

    state
        .reservations
        .create(reservation_request("2025-06-01", "18:00-19:00", &[1, 2]))
        .await
        .expect("create");
    state
        .reservations
        .create(reservation_request("2025-06-01", "18:00-19:00", &[5]))
        .await
        .expect("create");

    let availability = state
        .reservations
        .availability("2025-06-01", "18:00-19:00")
        .await
        .expect("availability");
    assert_eq!(availability.reserved_tables, vec![1, 2, 5]);
    assert_eq!(availability.available_tables, vec![3, 4, 6, 7, 8]);

    // 两个集合恰好分割桌位全集
    let mut union: Vec<i32> = availability
        .available_tables
        .iter()
        .chain(availability.reserved_tables.iter())
        .copied()
        .collect();
    union.sort_unstable();
    assert_eq!(union, TABLE_UNIVERSE.to_vec());

    // 其它时段不受影响
    let other_slot = state
        .reservations
        .availability("2025-06-01", "19:00-20:00")
        .await
        .expect("availability");
    assert!(other_slot.reserved_tables.is_empty());
    assert_eq!(other_slot.available_tables, TABLE_UNIVERSE.to_vec());
}

#[tokio::test]
async fn different_dates_and_slots_do_not_collide() {
    let (_tmp, state) = test_state().await;

    state
        .reservations
        .create(reservation_request("2025-06-01", "18:00-19:00", &[1, 2]))
        .await
        .expect("base");
    // 同桌不同时段：时段只是标签，不看时间重叠
    state
        .reservations
        .create(reservation_request("2025-06-01", "19:00-20:00", &[1, 2]))
        .await
        .expect("same tables, next slot");
    // 同桌同时段不同日期
    state
        .reservations
        .create(reservation_request("2025-06-02", "18:00-19:00", &[1, 2]))
        .await
        .expect("same tables, next day");
}

#[tokio::test]
async fn cancelled_reservations_release_their_tables() {
    let (_tmp, state) = test_state().await;

    let created = state
        .reservations
        .create(reservation_request("2025-06-03", "20:00-21:00", &[7]))
        .await
        .expect("create");
    let id = created.id_string().expect("persisted reservation has id");

    let cancelled = state.reservations.cancel(&id).await.expect("cancel");
    assert_eq!(cancelled.status, ReservationStatus::Cancelled);

    // 释放后同一桌可以再订
    state
        .reservations
        .create(reservation_request("2025-06-03", "20:00-21:00", &[7]))
        .await
        .expect("rebook after cancel");

    let availability = state
        .reservations
        .availability("2025-06-03", "20:00-21:00")
        .await
        .expect("availability");
    assert_eq!(availability.reserved_tables, vec![7]);
}

#[tokio::test]
async fn only_active_statuses_hold_tables() {
    let (_tmp, state) = test_state().await;

    let created = state
        .reservations
        .create(reservation_request("2025-06-04", "12:00-13:00", &[3]))
        .await
        .expect("create");
    let id = created.id_string().expect("id");

    let confirmed = state
        .reservations
        .update_status(&id, ReservationStatus::Confirmed)
        .await
        .expect("confirm");
    assert_eq!(confirmed.status, ReservationStatus::Confirmed);

    // confirmed 仍占桌
    let err = state
        .reservations
        .create(reservation_request("2025-06-04", "12:00-13:00", &[3]))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    // completed 不再占桌
    state
        .reservations
        .update_status(&id, ReservationStatus::Completed)
        .await
        .expect("complete");
    state
        .reservations
        .create(reservation_request("2025-06-04", "12:00-13:00", &[3]))
        .await
        .expect("rebook after completion");
}

#[tokio::test]
async fn out_of_range_tables_are_rejected() {
    let (_tmp, state) = test_state().await;

    let err = state
        .reservations
        .create(reservation_request("2025-06-01", "18:00-19:00", &[8, 9]))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let err = state
        .reservations
        .create(reservation_request("2025-06-01", "18:00-19:00", &[0]))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn malformed_dates_are_rejected() {
    let (_tmp, state) = test_state().await;
    let err = state
        .reservations
        .create(reservation_request("01-06-2025", "18:00-19:00", &[1]))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn unknown_reservation_update_is_not_found() {
    let (_tmp, state) = test_state().await;
    let err = state
        .reservations
        .update_status("reservation:nope", ReservationStatus::Confirmed)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}
