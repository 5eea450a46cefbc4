//! In-memory doubles of the backend clients. They record every call so tests can
//! assert on the exact sequence of backend requests a page makes.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use camply_api::{
    ApiError, CampgroundSearch, CampsiteSearch, DEFAULT_HISTORY_LIMIT, DEFAULT_PAGE,
    DEFAULT_PER_PAGE, Notification, NotificationApi, NotificationData, NotificationHistory,
    NotificationUpdate, RecreationAreaSearch, SearchApi, SearchResponse, SearchResult,
};
use chrono::{NaiveDate, TimeZone, Utc};

/// A recorded notification API call
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    /// `create` with its payload
    Create(NotificationData),
    /// `list` with its filter
    List {
        /// Whether paused alerts were left out
        active_only: bool,
    },
    /// `get`
    Get(i64),
    /// `update` with its changes
    Update(i64, NotificationUpdate),
    /// `delete`
    Delete(i64),
    /// `test`
    Test(i64),
    /// `history` with the requested limit
    History(i64, Option<u32>),
}

/// A notification API operation that can be made to fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    /// `create`
    Create,
    /// `list`
    List,
    /// `get`
    Get,
    /// `update`
    Update,
    /// `delete`
    Delete,
    /// `test`
    Test,
    /// `history`
    History,
}

#[derive(Default)]
struct NotificationState {
    notifications: Vec<Notification>,
    history: Vec<NotificationHistory>,
    calls: Vec<Call>,
    failing: HashSet<Op>,
    create_rejection: Option<Option<String>>,
}

/// Notification API backed by a vector
#[derive(Default)]
pub struct MockNotificationApi {
    state: Mutex<NotificationState>,
}

impl MockNotificationApi {
    /// An empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend holding `notifications`.
    pub fn with_notifications(notifications: Vec<Notification>) -> Self {
        let api = Self::new();
        api.lock().notifications = notifications;
        api
    }

    /// Delivery records returned by `history`.
    pub fn with_history(self, history: Vec<NotificationHistory>) -> Self {
        self.lock().history = history;
        self
    }

    /// Makes `op` answer with a 500.
    pub fn fail(&self, op: Op) {
        self.lock().failing.insert(op);
    }

    /// Makes `create` answer with a 422 carrying `detail`.
    pub fn reject_create(&self, detail: Option<&str>) {
        self.lock().create_rejection = Some(detail.map(str::to_string));
    }

    /// Every call received so far, in order.
    pub fn calls(&self) -> Vec<Call> {
        self.lock().calls.clone()
    }

    /// Current contents of the backend.
    pub fn notifications(&self) -> Vec<Notification> {
        self.lock().notifications.clone()
    }

    fn lock(&self) -> MutexGuard<'_, NotificationState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn record(&self, call: Call, op: Op) -> Result<MutexGuard<'_, NotificationState>, ApiError> {
        let mut state = self.lock();
        state.calls.push(call);
        if state.failing.contains(&op) {
            return Err(ApiError::Server {
                status: 500,
                detail: None,
            });
        }
        Ok(state)
    }
}

#[async_trait]
impl NotificationApi for MockNotificationApi {
    async fn create(&self, data: &NotificationData) -> Result<Notification, ApiError> {
        let mut state = self.record(Call::Create(data.clone()), Op::Create)?;
        if let Some(detail) = state.create_rejection.clone() {
            return Err(ApiError::Validation { status: 422, detail });
        }

        let id = state.notifications.iter().map(|n| n.id).max().unwrap_or(0) + 1;
        let notification = Notification {
            id,
            user_id: 1,
            recreation_area_id: data.recreation_area_id,
            recreation_area_name: data.recreation_area_name.clone(),
            campground_id: data.campground_id,
            campground_name: data.campground_name.clone(),
            campsite_id: data.campsite_id,
            campsite_name: data.campsite_name.clone(),
            start_date: data.start_date,
            end_date: data.end_date,
            phone_number: data.phone_number.clone(),
            is_active: true,
            created_at: Utc::now(),
            updated_at: None,
        };
        state.notifications.push(notification.clone());
        Ok(notification)
    }

    async fn list(&self, active_only: bool) -> Result<Vec<Notification>, ApiError> {
        let state = self.record(Call::List { active_only }, Op::List)?;
        Ok(state
            .notifications
            .iter()
            .filter(|n| n.is_active || !active_only)
            .cloned()
            .collect())
    }

    async fn get(&self, id: i64) -> Result<Notification, ApiError> {
        let state = self.record(Call::Get(id), Op::Get)?;
        state
            .notifications
            .iter()
            .find(|n| n.id == id)
            .cloned()
            .ok_or(ApiError::NotFound)
    }

    async fn update(
        &self,
        id: i64,
        changes: &NotificationUpdate,
    ) -> Result<Notification, ApiError> {
        let mut state = self.record(Call::Update(id, changes.clone()), Op::Update)?;
        let notification = state
            .notifications
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or(ApiError::NotFound)?;

        if let Some(is_active) = changes.is_active {
            notification.is_active = is_active;
        }
        if let Some(phone_number) = &changes.phone_number {
            notification.phone_number = phone_number.clone();
        }
        if let Some(start_date) = changes.start_date {
            notification.start_date = start_date;
        }
        if let Some(end_date) = changes.end_date {
            notification.end_date = end_date;
        }
        notification.updated_at = Some(Utc::now());
        Ok(notification.clone())
    }

    async fn delete(&self, id: i64) -> Result<(), ApiError> {
        let mut state = self.record(Call::Delete(id), Op::Delete)?;
        let before = state.notifications.len();
        state.notifications.retain(|n| n.id != id);
        if state.notifications.len() == before {
            return Err(ApiError::NotFound);
        }
        Ok(())
    }

    async fn test(&self, id: i64) -> Result<(), ApiError> {
        let state = self.record(Call::Test(id), Op::Test)?;
        if state.notifications.iter().any(|n| n.id == id) {
            Ok(())
        } else {
            Err(ApiError::NotFound)
        }
    }

    async fn history(
        &self,
        id: i64,
        limit: Option<u32>,
    ) -> Result<Vec<NotificationHistory>, ApiError> {
        let state = self.record(Call::History(id, limit), Op::History)?;
        let limit = limit.unwrap_or(DEFAULT_HISTORY_LIMIT) as usize;
        Ok(state
            .history
            .iter()
            .filter(|record| record.preference_id == Some(id))
            .take(limit)
            .cloned()
            .collect())
    }
}

/// A recorded search API call
#[derive(Debug, Clone, PartialEq)]
pub enum SearchCall {
    /// Recreation area search
    RecreationAreas(RecreationAreaSearch),
    /// Campground search
    Campgrounds(CampgroundSearch),
    /// Campsite search
    Campsites(CampsiteSearch),
    /// Provider listing
    Providers,
}

/// Search API answering every search of a kind with a fixed result list, paged the
/// way the backend pages it
#[derive(Default)]
pub struct MockSearchApi {
    recreation_areas: Vec<SearchResult>,
    campgrounds: Vec<SearchResult>,
    campsites: Vec<SearchResult>,
    failing: bool,
    calls: Mutex<Vec<SearchCall>>,
}

impl MockSearchApi {
    /// Answers every search with no results.
    pub fn new() -> Self {
        Self::default()
    }

    /// Results of every recreation area search.
    pub fn with_recreation_areas(mut self, results: Vec<SearchResult>) -> Self {
        self.recreation_areas = results;
        self
    }

    /// Results of every campground search.
    pub fn with_campgrounds(mut self, results: Vec<SearchResult>) -> Self {
        self.campgrounds = results;
        self
    }

    /// Results of every campsite search.
    pub fn with_campsites(mut self, results: Vec<SearchResult>) -> Self {
        self.campsites = results;
        self
    }

    /// Makes every call answer with a 500.
    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }

    /// Every call received so far, in order.
    pub fn calls(&self) -> Vec<SearchCall> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn answer(
        &self,
        call: SearchCall,
        results: &[SearchResult],
        page: u32,
        per_page: u32,
    ) -> Result<SearchResponse, ApiError> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(call);
        if self.failing {
            return Err(ApiError::Server {
                status: 500,
                detail: None,
            });
        }
        let start = (page.saturating_sub(1) as usize).saturating_mul(per_page as usize);
        Ok(SearchResponse {
            results: results
                .iter()
                .skip(start)
                .take(per_page as usize)
                .cloned()
                .collect(),
            total: results.len() as i64,
            page,
            per_page,
        })
    }
}

#[async_trait]
impl SearchApi for MockSearchApi {
    async fn search_recreation_areas(
        &self,
        search: &RecreationAreaSearch,
    ) -> Result<SearchResponse, ApiError> {
        self.answer(
            SearchCall::RecreationAreas(search.clone()),
            &self.recreation_areas,
            search.page,
            search.per_page,
        )
    }

    async fn search_campgrounds(
        &self,
        search: &CampgroundSearch,
    ) -> Result<SearchResponse, ApiError> {
        self.answer(
            SearchCall::Campgrounds(search.clone()),
            &self.campgrounds,
            search.page,
            search.per_page,
        )
    }

    async fn search_campsites(&self, search: &CampsiteSearch) -> Result<SearchResponse, ApiError> {
        self.answer(
            SearchCall::Campsites(search.clone()),
            &self.campsites,
            search.page,
            search.per_page,
        )
    }

    async fn providers(&self) -> Result<Vec<String>, ApiError> {
        self.answer(SearchCall::Providers, &[], DEFAULT_PAGE, DEFAULT_PER_PAGE)?;
        Ok(vec!["RecreationDotGov".to_string()])
    }
}

/// A search result with only an id and a name.
pub fn search_result(id: i64, name: &str) -> SearchResult {
    SearchResult {
        id,
        name: name.to_string(),
        description: None,
        location: None,
    }
}

/// An active alert for July 1-5 2025 with no location.
pub fn notification(id: i64) -> Notification {
    Notification {
        id,
        user_id: 1,
        recreation_area_id: None,
        recreation_area_name: None,
        campground_id: None,
        campground_name: None,
        campsite_id: None,
        campsite_name: None,
        start_date: date(2025, 7, 1),
        end_date: date(2025, 7, 5),
        phone_number: "+15551234567".to_string(),
        is_active: true,
        created_at: Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).single().unwrap_or_default(),
        updated_at: None,
    }
}

/// A delivery record for alert `preference_id`.
pub fn history_record(id: i64, preference_id: i64, success: bool) -> NotificationHistory {
    NotificationHistory {
        id,
        user_id: 1,
        preference_id: Some(preference_id),
        campsite_id: Some(77),
        campsite_name: Some("Site 12".to_string()),
        notification_type: "sms".to_string(),
        message: "Site 12 is available".to_string(),
        success,
        error_message: (!success).then(|| "Carrier rejected message".to_string()),
        sent_at: Utc.with_ymd_and_hms(2025, 6, 2, 8, 30, 0).single().unwrap_or_default(),
    }
}

/// Shorthand for a calendar date. Invalid dates fall back to 1970-01-01.
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}
