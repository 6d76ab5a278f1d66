//! 订座向导 - 选类型 → 选日期 → 选时段 → 选桌 → 暂存/提交
//!
//! 日期窗口按餐厅时区算（今天起 30 天，含今天）；当天已开始的时段
//! 不可选。每次日期或时段变更都重新查一次可用桌位，选桌只能选最近
//! 一次查询结果里的桌。未登录时整个进度序列化进本地存储，登录后用
//! [`resume`] 取回、[`handoff`] 交接到对应页面。

use chrono::{Days, NaiveDate, NaiveTime};
use chrono_tz::Tz;

use shared::intent::{ReservationDraft, keys};
use shared::{
    BOOKING_WINDOW_DAYS, CreateReservationRequest, OrderItem, PendingIntent, ReservationView,
    TIME_SLOTS, TableAvailability,
};

use crate::error::{ClientError, ClientResult};
use crate::http::HttpClient;
use crate::store::{LocalStore, StoreError};

/// 每桌每时段的订座费，计入 grandTotal
pub const TABLE_PRICE: f64 = 200.0;

/// 预订类型 - 向导第一步
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingType {
    /// 仅订桌
    TableOnly,
    /// 订桌 + 随订点餐
    TableWithFood,
}

/// 续作交接后顾客该去的页面
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandoffTarget {
    /// 直接付款，`currentOrder` 已就位
    Payment,
    /// 购物车合并，`reservationContext` 已就位
    Cart,
    /// 预订单页，`preorderContext` 已就位
    Preorder,
}

// ============================================================================
// Calendar rules
// ============================================================================

/// 可选日期窗口：今天起 [`BOOKING_WINDOW_DAYS`] 天，含今天
pub fn booking_window(today: NaiveDate) -> Vec<NaiveDate> {
    (0..BOOKING_WINDOW_DAYS as u64)
        .filter_map(|offset| today.checked_add_days(Days::new(offset)))
        .collect()
}

/// 时段标签的开始时刻 ("19:00-20:00" → 19:00)
fn slot_start(slot: &str) -> Option<NaiveTime> {
    let (start, _) = slot.split_once('-')?;
    NaiveTime::parse_from_str(start, "%H:%M").ok()
}

/// 某日可选的时段。当天排除已开始的时段（开始时刻一到即不可选），
/// 过去的日期没有任何时段。
pub fn open_slots(date: NaiveDate, today: NaiveDate, now: NaiveTime) -> Vec<&'static str> {
    if date < today {
        return Vec::new();
    }
    if date > today {
        return TIME_SLOTS.to_vec();
    }
    TIME_SLOTS
        .iter()
        .copied()
        .filter(|slot| matches!(slot_start(slot), Some(start) if start > now))
        .collect()
}

// ============================================================================
// Wizard
// ============================================================================

/// 订座向导
///
/// 持有 HTTP 客户端用于重查可用性；本身不碰本地存储，暂存与续作
/// 走显式的 [`ReservationFlow::stage_for_login`] / [`resume`]。
pub struct ReservationFlow<C> {
    http: C,
    tz: Tz,
    booking_type: BookingType,
    date: Option<NaiveDate>,
    time_slot: Option<String>,
    availability: Option<TableAvailability>,
    selected_tables: Vec<i32>,
    food_items: Vec<OrderItem>,
}

impl<C: HttpClient> ReservationFlow<C> {
    pub fn new(http: C, tz: Tz, booking_type: BookingType) -> Self {
        Self {
            http,
            tz,
            booking_type,
            date: None,
            time_slot: None,
            availability: None,
            selected_tables: Vec::new(),
            food_items: Vec::new(),
        }
    }

    fn today(&self) -> NaiveDate {
        chrono::Utc::now().with_timezone(&self.tz).date_naive()
    }

    fn now_time(&self) -> NaiveTime {
        chrono::Utc::now().with_timezone(&self.tz).time()
    }

    /// 从今天起可选的日期
    pub fn selectable_dates(&self) -> Vec<NaiveDate> {
        booking_window(self.today())
    }

    /// 当前所选日期下可选的时段
    pub fn selectable_slots(&self) -> Vec<&'static str> {
        match self.date {
            Some(date) => open_slots(date, self.today(), self.now_time()),
            None => Vec::new(),
        }
    }

    /// 选日期。窗口外报错；换日期清掉时段、可用性与已选桌。
    pub fn select_date(&mut self, date: NaiveDate) -> ClientResult<()> {
        let today = self.today();
        if date < today {
            return Err(ClientError::flow("Reservation date has already passed"));
        }
        let horizon = today
            .checked_add_days(Days::new(BOOKING_WINDOW_DAYS as u64 - 1))
            .unwrap_or(today);
        if date > horizon {
            return Err(ClientError::flow(format!(
                "Reservations are open up to {} days ahead",
                BOOKING_WINDOW_DAYS
            )));
        }
        self.date = Some(date);
        self.time_slot = None;
        self.availability = None;
        self.selected_tables.clear();
        Ok(())
    }

    /// 选时段并立刻重查该日该时段的桌位
    pub async fn select_slot(&mut self, slot: &str) -> ClientResult<()> {
        let date = self
            .date
            .ok_or_else(|| ClientError::flow("Select a date first"))?;
        if !TIME_SLOTS.contains(&slot) {
            return Err(ClientError::flow(format!("Unknown time slot: {}", slot)));
        }
        if date == self.today() {
            match slot_start(slot) {
                Some(start) if start > self.now_time() => {}
                _ => return Err(ClientError::flow("Time slot has already started")),
            }
        }
        self.time_slot = Some(slot.to_string());
        self.selected_tables.clear();
        self.refresh_availability().await
    }

    /// 重查当前日期+时段的桌位。已勾选但被订走的桌会被剔除。
    pub async fn refresh_availability(&mut self) -> ClientResult<()> {
        let date = self
            .date
            .ok_or_else(|| ClientError::flow("Select a date first"))?;
        let slot = self
            .time_slot
            .clone()
            .ok_or_else(|| ClientError::flow("Select a time slot first"))?;

        let availability = self.http.availability(&date.to_string(), &slot).await?;
        self.selected_tables
            .retain(|table| availability.available_tables.contains(table));
        self.availability = Some(availability);
        Ok(())
    }

    /// 最近一次查询到的桌位
    pub fn availability(&self) -> Option<&TableAvailability> {
        self.availability.as_ref()
    }

    /// 勾选/取消一张桌。只能勾选最近一次查询里可用的桌。
    pub fn toggle_table(&mut self, table: i32) -> ClientResult<()> {
        let availability = self
            .availability
            .as_ref()
            .ok_or_else(|| ClientError::flow("Check availability first"))?;
        if let Some(pos) = self.selected_tables.iter().position(|t| *t == table) {
            self.selected_tables.remove(pos);
            return Ok(());
        }
        if !availability.available_tables.contains(&table) {
            return Err(ClientError::flow(format!("Table {} is not available", table)));
        }
        self.selected_tables.push(table);
        self.selected_tables.sort_unstable();
        Ok(())
    }

    pub fn selected_tables(&self) -> &[i32] {
        &self.selected_tables
    }

    /// 随订点餐（table-food 流程把购物车内容挂进来）
    pub fn set_food_items(&mut self, items: Vec<OrderItem>) {
        self.food_items = items;
    }

    pub fn table_total(&self) -> f64 {
        self.selected_tables.len() as f64 * TABLE_PRICE
    }

    pub fn food_total(&self) -> f64 {
        self.food_items.iter().map(OrderItem::line_total).sum()
    }

    pub fn grand_total(&self) -> f64 {
        self.table_total() + self.food_total()
    }

    /// 汇总当前进度。日期、时段、至少一桌都齐了才给。
    pub fn draft(&self) -> ClientResult<ReservationDraft> {
        let date = self
            .date
            .ok_or_else(|| ClientError::flow("Select a date first"))?;
        let time_slot = self
            .time_slot
            .clone()
            .ok_or_else(|| ClientError::flow("Select a time slot first"))?;
        if self.selected_tables.is_empty() {
            return Err(ClientError::flow("Select at least one table"));
        }
        Ok(ReservationDraft {
            reservation_date: date.to_string(),
            time_slot,
            selected_tables: self.selected_tables.clone(),
            food_items: self.food_items.clone(),
            food_total: self.food_total(),
            table_total: self.table_total(),
            grand_total: self.grand_total(),
        })
    }

    /// 当前进度对应的续作对象
    pub fn intent(&self) -> ClientResult<PendingIntent> {
        let reservation = self.draft()?;
        Ok(match self.booking_type {
            BookingType::TableOnly => PendingIntent::TableOnly { reservation },
            BookingType::TableWithFood => PendingIntent::TableFood { reservation },
        })
    }

    /// 登录跳转前暂存整个进度
    ///
    /// 写三个键：`reservationState`（向导状态，回来重绘界面）、
    /// `pendingReservation`（续作对象）、`returnAfterLogin`（回跳路径）。
    pub fn stage_for_login(
        &self,
        store: &mut LocalStore,
        return_to: &str,
    ) -> ClientResult<PendingIntent> {
        let intent = self.intent()?;
        store.set(keys::RESERVATION_STATE, &self.draft()?)?;
        store.set(keys::PENDING_RESERVATION, &intent)?;
        store.set(keys::RETURN_AFTER_LOGIN, &return_to)?;
        tracing::info!(kind = %intent.kind(), "Reservation flow staged for login");
        Ok(intent)
    }

    /// 登录状态下直接提交订座。冲突时 [`ClientError::Conflict`]，
    /// 届时应 [`ReservationFlow::refresh_availability`] 重选。
    pub async fn submit(
        &self,
        customer_name: &str,
        customer_phone: &str,
        customer_email: Option<String>,
    ) -> ClientResult<ReservationView> {
        let draft = self.draft()?;
        let req = CreateReservationRequest {
            customer_name: customer_name.to_string(),
            customer_phone: customer_phone.to_string(),
            customer_email,
            reservation_date: draft.reservation_date,
            time_slot: draft.time_slot,
            selected_tables: draft.selected_tables,
            has_food: !draft.food_items.is_empty(),
            food_items: draft.food_items,
            food_total: draft.food_total,
            table_total: draft.table_total,
            grand_total: draft.grand_total,
        };
        self.http.create_reservation(&req).await
    }
}

// ============================================================================
// Resume after login
// ============================================================================

/// 登录后取回暂存的续作对象并清掉暂存键
///
/// `returnAfterLogin` 由登录页自己消费 ([`LocalStore::take`])，这里不动。
pub fn resume(store: &mut LocalStore) -> Result<Option<PendingIntent>, StoreError> {
    let intent = store.take::<PendingIntent>(keys::PENDING_RESERVATION)?;
    store.remove(keys::RESERVATION_STATE)?;
    if let Some(intent) = &intent {
        tracing::info!(kind = %intent.kind(), "Reservation flow resumed");
    }
    Ok(intent)
}

/// 把续作对象交接到对应页面的暂存键。穷尽匹配四种意图。
pub fn handoff(
    store: &mut LocalStore,
    intent: &PendingIntent,
) -> Result<HandoffTarget, StoreError> {
    match intent {
        PendingIntent::TableOnly { .. } => {
            store.set(keys::CURRENT_ORDER, intent)?;
            Ok(HandoffTarget::Payment)
        }
        PendingIntent::TableFood { reservation } => {
            store.set(keys::RESERVATION_CONTEXT, reservation)?;
            Ok(HandoffTarget::Cart)
        }
        PendingIntent::Preorder { preorder } => {
            store.set(keys::PREORDER_CONTEXT, preorder)?;
            Ok(HandoffTarget::Preorder)
        }
        PendingIntent::Delivery { .. } => {
            store.set(keys::CURRENT_ORDER, intent)?;
            Ok(HandoffTarget::Payment)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::intent::{DeliveryDraft, PreorderDraft};
    use shared::FulfilmentType;

    struct CannedHttp(serde_json::Value);

    #[async_trait::async_trait]
    impl HttpClient for CannedHttp {
        async fn get<T: serde::de::DeserializeOwned>(&self, _path: &str) -> ClientResult<T> {
            Ok(serde_json::from_value(self.0.clone())?)
        }

        async fn post<T: serde::de::DeserializeOwned, B: serde::Serialize + Sync>(
            &self,
            _path: &str,
            _body: &B,
        ) -> ClientResult<T> {
            Ok(serde_json::from_value(self.0.clone())?)
        }

        async fn put<T: serde::de::DeserializeOwned, B: serde::Serialize + Sync>(
            &self,
            _path: &str,
            _body: &B,
        ) -> ClientResult<T> {
            Ok(serde_json::from_value(self.0.clone())?)
        }

        async fn delete<T: serde::de::DeserializeOwned>(&self, _path: &str) -> ClientResult<T> {
            Ok(serde_json::from_value(self.0.clone())?)
        }

        fn token(&self) -> Option<&str> {
            None
        }

        fn set_token(&mut self, _token: Option<String>) {}
    }

    fn canned_availability() -> CannedHttp {
        CannedHttp(serde_json::json!({
            "availableTables": [1, 2, 3, 4],
            "reservedTables": [5, 6, 7, 8]
        }))
    }

    fn flow(booking_type: BookingType) -> ReservationFlow<CannedHttp> {
        ReservationFlow::new(canned_availability(), chrono_tz::Asia::Kolkata, booking_type)
    }

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn time(s: &str) -> NaiveTime {
        NaiveTime::parse_from_str(s, "%H:%M").unwrap()
    }

    #[test]
    fn test_window_is_thirty_days_from_today() {
        let today = date("2025-06-01");
        let window = booking_window(today);
        assert_eq!(window.len(), 30);
        assert_eq!(window[0], today);
        assert_eq!(*window.last().unwrap(), date("2025-06-30"));
    }

    #[test]
    fn test_future_day_offers_every_slot() {
        let slots = open_slots(date("2025-06-05"), date("2025-06-01"), time("23:00"));
        assert_eq!(slots, TIME_SLOTS.to_vec());
    }

    #[test]
    fn test_today_excludes_started_slots() {
        let today = date("2025-06-01");
        let slots = open_slots(today, today, time("13:30"));
        assert_eq!(
            slots,
            vec![
                "14:00-15:00",
                "15:00-16:00",
                "18:00-19:00",
                "19:00-20:00",
                "20:00-21:00",
                "21:00-22:00",
            ]
        );
    }

    #[test]
    fn test_slot_closes_at_its_start_minute() {
        let today = date("2025-06-01");
        // 18:00 整,该时段已开始
        let at_six = open_slots(today, today, time("18:00"));
        assert!(!at_six.contains(&"18:00-19:00"));
        assert!(at_six.contains(&"19:00-20:00"));
        // 一分钟前还能订
        let before_six = open_slots(today, today, NaiveTime::from_hms_opt(17, 59, 59).unwrap());
        assert!(before_six.contains(&"18:00-19:00"));
    }

    #[test]
    fn test_past_day_has_no_slots() {
        assert!(open_slots(date("2025-05-31"), date("2025-06-01"), time("09:00")).is_empty());
    }

    #[test]
    fn test_late_evening_leaves_nothing_today() {
        let today = date("2025-06-01");
        assert!(open_slots(today, today, time("22:30")).is_empty());
    }

    #[test]
    fn test_date_window_is_enforced() {
        let mut flow = flow(BookingType::TableOnly);

        assert!(matches!(
            flow.select_date(date("2020-01-01")),
            Err(ClientError::Flow(_))
        ));

        let dates = flow.selectable_dates();
        assert!(flow.select_date(dates[0]).is_ok());
        assert!(flow.select_date(dates[29]).is_ok());

        let beyond = dates[29].checked_add_days(Days::new(1)).unwrap();
        assert!(matches!(
            flow.select_date(beyond),
            Err(ClientError::Flow(_))
        ));
    }

    #[tokio::test]
    async fn test_slot_selection_loads_availability() {
        let mut flow = flow(BookingType::TableOnly);
        let future = flow.selectable_dates()[5];
        flow.select_date(future).unwrap();

        assert!(matches!(
            flow.select_slot("17:00-18:00").await,
            Err(ClientError::Flow(_))
        ));

        flow.select_slot("19:00-20:00").await.unwrap();
        let availability = flow.availability().unwrap();
        assert_eq!(availability.available_tables, vec![1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn test_only_available_tables_selectable() {
        let mut flow = flow(BookingType::TableOnly);
        let future = flow.selectable_dates()[3];
        flow.select_date(future).unwrap();
        flow.select_slot("18:00-19:00").await.unwrap();

        flow.toggle_table(2).unwrap();
        flow.toggle_table(1).unwrap();
        assert_eq!(flow.selected_tables(), &[1, 2]);

        // 已被订走的桌
        assert!(matches!(flow.toggle_table(5), Err(ClientError::Flow(_))));

        // 再点一次取消勾选
        flow.toggle_table(2).unwrap();
        assert_eq!(flow.selected_tables(), &[1]);

        assert_eq!(flow.table_total(), TABLE_PRICE);
    }

    #[tokio::test]
    async fn test_changing_date_resets_progress() {
        let mut flow = flow(BookingType::TableOnly);
        let dates = flow.selectable_dates();
        flow.select_date(dates[3]).unwrap();
        flow.select_slot("18:00-19:00").await.unwrap();
        flow.toggle_table(1).unwrap();

        flow.select_date(dates[4]).unwrap();
        assert!(flow.availability().is_none());
        assert!(flow.selected_tables().is_empty());
        assert!(matches!(flow.toggle_table(1), Err(ClientError::Flow(_))));
    }

    #[tokio::test]
    async fn test_stage_and_resume_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = LocalStore::new(dir.path());

        let mut flow = flow(BookingType::TableWithFood);
        let future = flow.selectable_dates()[7];
        flow.select_date(future).unwrap();
        flow.select_slot("19:00-20:00").await.unwrap();
        flow.toggle_table(3).unwrap();
        flow.toggle_table(4).unwrap();
        flow.set_food_items(vec![OrderItem {
            name: "Paneer Tikka".to_string(),
            quantity: 2,
            price: 450.0,
        }]);

        assert_eq!(flow.grand_total(), 2.0 * TABLE_PRICE + 900.0);

        let staged = flow.stage_for_login(&mut store, "/reserve").unwrap();
        assert_eq!(staged.kind(), "table-food");
        assert!(store.contains(keys::RESERVATION_STATE));
        assert!(store.contains(keys::PENDING_RESERVATION));
        assert_eq!(
            store.get::<String>(keys::RETURN_AFTER_LOGIN).unwrap(),
            Some("/reserve".to_string())
        );

        let resumed = resume(&mut store).unwrap().unwrap();
        assert_eq!(resumed, staged);
        assert!(!store.contains(keys::PENDING_RESERVATION));
        assert!(!store.contains(keys::RESERVATION_STATE));

        // 第二次续作已无进度
        assert!(resume(&mut store).unwrap().is_none());
    }

    #[test]
    fn test_incomplete_flow_cannot_stage() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = LocalStore::new(dir.path());
        let flow = flow(BookingType::TableOnly);

        assert!(matches!(
            flow.stage_for_login(&mut store, "/reserve"),
            Err(ClientError::Flow(_))
        ));
        assert!(store.keys().is_empty());
    }

    fn reservation_draft() -> ReservationDraft {
        ReservationDraft {
            reservation_date: "2025-06-10".to_string(),
            time_slot: "19:00-20:00".to_string(),
            selected_tables: vec![2, 3],
            food_items: vec![],
            food_total: 0.0,
            table_total: 400.0,
            grand_total: 400.0,
        }
    }

    #[test]
    fn test_handoff_routes_every_intent_kind() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = LocalStore::new(dir.path());

        let table_only = PendingIntent::TableOnly {
            reservation: reservation_draft(),
        };
        assert_eq!(
            handoff(&mut store, &table_only).unwrap(),
            HandoffTarget::Payment
        );
        assert_eq!(
            store.get::<PendingIntent>(keys::CURRENT_ORDER).unwrap(),
            Some(table_only)
        );

        let table_food = PendingIntent::TableFood {
            reservation: reservation_draft(),
        };
        assert_eq!(
            handoff(&mut store, &table_food).unwrap(),
            HandoffTarget::Cart
        );
        assert_eq!(
            store
                .get::<ReservationDraft>(keys::RESERVATION_CONTEXT)
                .unwrap(),
            Some(reservation_draft())
        );

        let preorder = PendingIntent::Preorder {
            preorder: PreorderDraft {
                scheduled_date: "2025-06-15".to_string(),
                scheduled_time: "19:30".to_string(),
                fulfilment: FulfilmentType::Takeaway,
                items: vec![OrderItem {
                    name: "Veg Biryani".to_string(),
                    quantity: 1,
                    price: 450.0,
                }],
                total_amount: 450.0,
                delivery_address: None,
            },
        };
        assert_eq!(
            handoff(&mut store, &preorder).unwrap(),
            HandoffTarget::Preorder
        );
        assert!(store.contains(keys::PREORDER_CONTEXT));

        let delivery = PendingIntent::Delivery {
            order: DeliveryDraft {
                delivery_address: "12 Hill Road".to_string(),
                items: vec![OrderItem {
                    name: "Dal Makhani".to_string(),
                    quantity: 2,
                    price: 320.0,
                }],
                total_amount: 640.0,
            },
        };
        assert_eq!(
            handoff(&mut store, &delivery).unwrap(),
            HandoffTarget::Payment
        );
        assert_eq!(
            store.get::<PendingIntent>(keys::CURRENT_ORDER).unwrap(),
            Some(delivery)
        );
    }
}
