use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use camply_api::{
    ApiError, Notification, NotificationApi, NotificationData, SearchApi, SearchResult,
};
use chrono::NaiveDate;
use log::{debug, error, info};
use serde::{Deserialize, Deserializer};
use validator::Validate;

use crate::html::{banners, escape, hidden_input};
use crate::{CascadeState, Page, Redirect, Route, SearchMode, SearchRequest, Selections};

/// Banner shown when a search call fails.
pub const SEARCH_FAILED: &str = "Failed to search. Please try again.";
/// Banner shown when a create call succeeds.
pub const CREATE_SUCCEEDED: &str =
    "Notification created successfully! You will receive SMS alerts when campsites become available.";
/// Banner shown when a create call fails without a backend detail.
pub const CREATE_FAILED: &str = "Failed to create notification. Please try again.";
/// Delay before a successful submission navigates to the alert list.
pub const REDIRECT_DELAY: Duration = Duration::from_secs(2);

/// Why a submission did not produce an alert
#[derive(thiserror::Error, Debug)]
pub enum FormError {
    /// Start date, end date or phone number is missing
    #[error("Please fill in all required fields.")]
    MissingFields,

    /// End date before start date
    #[error("End date must be on or after the start date.")]
    InvalidDateRange,

    /// The backend refused or failed the create call
    #[error("{}", .0.detail().unwrap_or(CREATE_FAILED))]
    Rejected(ApiError),
}

#[derive(Debug, Validate)]
struct RequiredFields {
    #[validate(required)]
    start_date: Option<NaiveDate>,
    #[validate(required)]
    end_date: Option<NaiveDate>,
    #[validate(length(min = 1))]
    phone_number: String,
}

/// Identifies one issued search. Only the latest ticket may update the results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SearchTicket(u64);

/// The alert creation form
#[derive(Debug, Clone, Default)]
pub struct NotificationForm {
    /// First night
    pub start_date: Option<NaiveDate>,
    /// Last night
    pub end_date: Option<NaiveDate>,
    /// SMS destination as typed
    pub phone_number: String,
    /// Search box text
    pub query: String,
    /// Results of the latest applied search
    pub results: Vec<SearchResult>,
    /// Search mode and selected locations
    pub cascade: CascadeState,
    /// A search is in flight
    pub searching: bool,
    /// A create call is in flight
    pub submitting: bool,
    /// Error banner
    pub error: Option<String>,
    /// Success banner
    pub success: Option<String>,
    latest_ticket: u64,
    redirect: Option<Redirect>,
}

impl NotificationForm {
    /// Rebuilds the form from submitted fields.
    pub fn from_snapshot(snapshot: FormSnapshot) -> Self {
        let selections = Selections {
            recreation_area: selection(snapshot.recreation_area_id, snapshot.recreation_area_name),
            campground: selection(snapshot.campground_id, snapshot.campground_name),
            campsite: selection(snapshot.campsite_id, snapshot.campsite_name),
        };

        Self {
            start_date: snapshot.start_date,
            end_date: snapshot.end_date,
            phone_number: snapshot.phone_number,
            query: snapshot.query,
            cascade: CascadeState {
                mode: snapshot.mode,
                selections,
            },
            ..Self::default()
        }
    }

    fn invalidate_searches(&mut self) -> SearchTicket {
        self.latest_ticket += 1;
        SearchTicket(self.latest_ticket)
    }

    /// Records a query change. Returns the search to run, or `None` when the query
    /// is blank, in which case the results are cleared without a call. Either way
    /// every earlier ticket becomes stale.
    pub fn begin_search(&mut self, query: &str) -> Option<(SearchTicket, SearchRequest)> {
        self.query = query.to_string();
        let ticket = self.invalidate_searches();

        if query.trim().is_empty() {
            self.results.clear();
            self.searching = false;
            return None;
        }

        self.searching = true;
        Some((ticket, SearchRequest::for_state(&self.cascade, query)))
    }

    /// Applies the outcome of a search if `ticket` is still the latest one.
    /// Returns whether it was applied.
    pub fn finish_search(
        &mut self,
        ticket: SearchTicket,
        outcome: Result<Vec<SearchResult>, ApiError>,
    ) -> bool {
        if ticket.0 != self.latest_ticket {
            debug!("Discarding stale search response {:?}", ticket);
            return false;
        }

        self.searching = false;
        match outcome {
            Ok(results) => {
                debug!("Search for '{}' returned {} results", self.query, results.len());
                self.results = results;
            }
            Err(e) => {
                error!("❌ Search for '{}' failed: {}", self.query, e);
                self.error = Some(SEARCH_FAILED.to_string());
            }
        }
        true
    }

    /// Updates the query and runs the scoped search.
    pub async fn search(&mut self, api: &dyn SearchApi, query: &str) {
        if let Some((ticket, request)) = self.begin_search(query) {
            let outcome = request.run(api).await;
            self.finish_search(ticket, outcome);
        }
    }

    /// Switches the search mode, dropping selections, query and results.
    pub fn switch_mode(&mut self, mode: SearchMode) {
        self.cascade = self.cascade.switch_mode(mode);
        self.clear_search();
    }

    /// Selects a result for the current mode and moves on to the next mode.
    pub fn select_result(&mut self, result: SearchResult) {
        info!("📍 Selected {} '{}'", self.cascade.mode.as_str(), result.name);
        self.cascade = self.cascade.select(result);
        self.clear_search();
    }

    fn clear_search(&mut self) {
        self.query.clear();
        self.results.clear();
        self.searching = false;
        self.invalidate_searches();
    }

    /// Validates the form and builds the create payload.
    pub fn notification_data(&self) -> Result<NotificationData, FormError> {
        let required = RequiredFields {
            start_date: self.start_date,
            end_date: self.end_date,
            phone_number: self.phone_number.trim().to_string(),
        };
        required.validate().map_err(|_| FormError::MissingFields)?;

        let (Some(start_date), Some(end_date)) = (required.start_date, required.end_date) else {
            return Err(FormError::MissingFields);
        };
        if end_date < start_date {
            return Err(FormError::InvalidDateRange);
        }

        let selections = &self.cascade.selections;
        let (recreation_area_id, recreation_area_name) = split(&selections.recreation_area);
        let (campground_id, campground_name) = split(&selections.campground);
        let (campsite_id, campsite_name) = split(&selections.campsite);

        Ok(NotificationData {
            recreation_area_id,
            recreation_area_name,
            campground_id,
            campground_name,
            campsite_id,
            campsite_name,
            start_date,
            end_date,
            phone_number: required.phone_number,
        })
    }

    /// Validates and creates the alert with exactly one create call. On success the
    /// page schedules a redirect to the alert list.
    pub async fn submit(&mut self, api: &dyn NotificationApi) -> Result<Notification, FormError> {
        self.error = None;
        self.success = None;

        let data = match self.notification_data() {
            Ok(data) => data,
            Err(e) => {
                self.error = Some(e.to_string());
                return Err(e);
            }
        };

        self.submitting = true;
        let outcome = api.create(&data).await;
        self.submitting = false;

        match outcome {
            Ok(notification) => {
                info!("✅ Created alert {} for {}", notification.id, notification.phone_number);
                self.success = Some(CREATE_SUCCEEDED.to_string());
                self.redirect = Some(Redirect {
                    to: Route::Notifications,
                    after: REDIRECT_DELAY,
                });
                Ok(notification)
            }
            Err(e) => {
                error!("❌ Failed to create alert: {}", e);
                let e = FormError::Rejected(e);
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    fn render_mode_selector(&self) -> String {
        SearchMode::ALL
            .iter()
            .map(|mode| {
                let class = if *mode == self.cascade.mode {
                    "btn btn-primary"
                } else {
                    "btn btn-secondary"
                };
                format!(
                    r#"<button type="submit" class="{}" formaction="{}/mode?mode={}">{}</button>"#,
                    class,
                    Route::CreateNotification.path(),
                    mode.as_str(),
                    mode.label()
                )
            })
            .collect()
    }

    fn render_selections(&self) -> String {
        let selections = &self.cascade.selections;
        let mut html = String::new();
        let rows = [
            ("Recreation Area", "recreation_area", &selections.recreation_area),
            ("Campground", "campground", &selections.campground),
            ("Campsite", "campsite", &selections.campsite),
        ];

        for (label, field, selected) in rows {
            if let Some(result) = selected {
                html.push_str(&format!(
                    r#"<div class="selected-item"><strong>Selected {}:</strong> {}</div>"#,
                    label,
                    escape(&result.name)
                ));
                html.push_str(&hidden_input(&format!("{}_id", field), &result.id.to_string()));
                html.push_str(&hidden_input(&format!("{}_name", field), &result.name));
            }
        }

        if selections.is_empty() {
            html.push_str(
                r#"<p class="hint">No location selected: you will be alerted for any available location.</p>"#,
            );
        }
        html
    }

    fn render_results(&self) -> String {
        if self.searching {
            return r#"<div class="loading">Searching...</div>"#.to_string();
        }
        if self.results.is_empty() {
            if !self.query.trim().is_empty() && self.error.is_none() {
                return r#"<p class="hint">No results found.</p>"#.to_string();
            }
            return String::new();
        }

        let items: String = self
            .results
            .iter()
            .map(|result| {
                let mut action = format!(
                    "{}/select?id={}&name={}",
                    Route::CreateNotification.path(),
                    result.id,
                    urlencoding::encode(&result.name)
                );
                if let Some(description) = &result.description {
                    action.push_str(&format!("&description={}", urlencoding::encode(description)));
                }
                let description = result
                    .description
                    .as_deref()
                    .map(|d| format!("<small>{}</small>", escape(d)))
                    .unwrap_or_default();
                let location = result
                    .location
                    .as_deref()
                    .map(|l| format!("<small>{}</small>", escape(l)))
                    .unwrap_or_default();

                format!(
                    r#"<li><button type="submit" class="search-result" formaction="{}"><strong>{}</strong>{}{}</button></li>"#,
                    escape(&action),
                    escape(&result.name),
                    description,
                    location
                )
            })
            .collect();

        format!(r#"<ul class="search-results">{}</ul>"#, items)
    }
}

impl Page for NotificationForm {
    fn title(&self) -> String {
        "Create Alert".to_string()
    }

    fn route(&self) -> Option<Route> {
        Some(Route::CreateNotification)
    }

    fn body(&self) -> String {
        let path = Route::CreateNotification.path();
        let date_value = |date: Option<NaiveDate>| {
            date.map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default()
        };
        let submit_label = if self.submitting {
            "Creating Alert..."
        } else {
            "Create Alert"
        };

        format!(
            r#"<div class="card">
<div class="card-header"><h1 class="card-title">Create Campsite Alert</h1></div>
{banners}
<form method="post" action="{path}">
    <button type="submit" class="visually-hidden" tabindex="-1" aria-hidden="true"{disabled}>{submit}</button>
    <div class="form-row">
        <div class="form-group">
            <label for="start_date">Start Date *</label>
            <input type="date" id="start_date" name="start_date" value="{start}">
        </div>
        <div class="form-group">
            <label for="end_date">End Date *</label>
            <input type="date" id="end_date" name="end_date" value="{end}">
        </div>
    </div>
    <div class="form-group">
        <label>Search Type</label>
        <div class="mode-selector">{modes}</div>
        {mode}
    </div>
    <div class="form-group">
        <label for="query">Location</label>
        <div class="search-box">
            <input type="text" id="query" name="query" value="{query}" placeholder="{placeholder}" autocomplete="off">
            <button type="submit" class="btn btn-secondary" formaction="{path}/search">Search</button>
        </div>
        {results}
    </div>
    <div class="selections">{selections}</div>
    <div class="form-group">
        <label for="phone_number">Phone Number *</label>
        <input type="tel" id="phone_number" name="phone_number" value="{phone}" placeholder="+1 (555) 123-4567">
    </div>
    <button type="submit" class="btn btn-primary"{disabled}>{submit}</button>
</form>
</div>"#,
            banners = banners(self.error.as_deref(), self.success.as_deref()),
            path = path,
            start = date_value(self.start_date),
            end = date_value(self.end_date),
            modes = self.render_mode_selector(),
            mode = hidden_input("mode", self.cascade.mode.as_str()),
            query = escape(&self.query),
            placeholder = self.cascade.mode.placeholder(),
            results = self.render_results(),
            selections = self.render_selections(),
            phone = escape(&self.phone_number),
            disabled = if self.submitting { " disabled" } else { "" },
            submit = submit_label,
        )
    }

    fn redirect(&self) -> Option<Redirect> {
        self.redirect
    }
}

/// Form fields as posted by the browser. Empty inputs count as absent.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct FormSnapshot {
    /// Search mode
    pub mode: SearchMode,
    /// Search box text
    pub query: String,
    /// First night, `YYYY-MM-DD`
    #[serde(deserialize_with = "empty_as_none")]
    pub start_date: Option<NaiveDate>,
    /// Last night, `YYYY-MM-DD`
    #[serde(deserialize_with = "empty_as_none")]
    pub end_date: Option<NaiveDate>,
    /// SMS destination
    pub phone_number: String,
    /// Selected recreation area
    #[serde(deserialize_with = "empty_as_none")]
    pub recreation_area_id: Option<i64>,
    /// Its display name
    pub recreation_area_name: String,
    /// Selected campground
    #[serde(deserialize_with = "empty_as_none")]
    pub campground_id: Option<i64>,
    /// Its display name
    pub campground_name: String,
    /// Selected campsite
    #[serde(deserialize_with = "empty_as_none")]
    pub campsite_id: Option<i64>,
    /// Its display name
    pub campsite_name: String,
}

fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

fn selection(id: Option<i64>, name: String) -> Option<SearchResult> {
    id.map(|id| SearchResult {
        id,
        name,
        description: None,
        location: None,
    })
}

fn split(selected: &Option<SearchResult>) -> (Option<i64>, Option<String>) {
    match selected {
        Some(result) => (Some(result.id), Some(result.name.clone())),
        None => (None, None),
    }
}
