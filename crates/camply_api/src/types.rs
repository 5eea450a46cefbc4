use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// An alert subscription as stored by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    /// Unique identifier of the alert
    pub id: i64,
    /// Owner of the alert
    pub user_id: i64,
    /// Selected recreation area, if any
    #[serde(default)]
    pub recreation_area_id: Option<i64>,
    /// Display name of the selected recreation area
    #[serde(default)]
    pub recreation_area_name: Option<String>,
    /// Selected campground, if any
    #[serde(default)]
    pub campground_id: Option<i64>,
    /// Display name of the selected campground
    #[serde(default)]
    pub campground_name: Option<String>,
    /// Selected campsite, if any
    #[serde(default)]
    pub campsite_id: Option<i64>,
    /// Display name of the selected campsite
    #[serde(default)]
    pub campsite_name: Option<String>,
    /// First night of the watched range
    pub start_date: NaiveDate,
    /// Last night of the watched range
    pub end_date: NaiveDate,
    /// Number the SMS alerts go to
    pub phone_number: String,
    /// Whether the backend is still polling for this alert
    pub is_active: bool,
    /// When the alert was created
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    /// When the alert was last changed
    #[serde(default, with = "timestamp::option")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Request body for creating an alert.
///
/// Location fields that were not selected are left out of the JSON body entirely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationData {
    /// Selected recreation area
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recreation_area_id: Option<i64>,
    /// Display name of the selected recreation area
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recreation_area_name: Option<String>,
    /// Selected campground
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub campground_id: Option<i64>,
    /// Display name of the selected campground
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub campground_name: Option<String>,
    /// Selected campsite
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub campsite_id: Option<i64>,
    /// Display name of the selected campsite
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub campsite_name: Option<String>,
    /// First night of the watched range
    pub start_date: NaiveDate,
    /// Last night of the watched range
    pub end_date: NaiveDate,
    /// Number the SMS alerts go to
    pub phone_number: String,
}

/// Partial update of an alert. Only the fields that are set are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NotificationUpdate {
    /// New recreation area
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recreation_area_id: Option<i64>,
    /// New recreation area name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recreation_area_name: Option<String>,
    /// New campground
    #[serde(skip_serializing_if = "Option::is_none")]
    pub campground_id: Option<i64>,
    /// New campground name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub campground_name: Option<String>,
    /// New campsite
    #[serde(skip_serializing_if = "Option::is_none")]
    pub campsite_id: Option<i64>,
    /// New campsite name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub campsite_name: Option<String>,
    /// New start date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    /// New end date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    /// New phone number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    /// Pause (`false`) or resume (`true`) polling
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl NotificationUpdate {
    /// An update that only toggles whether the alert is active.
    pub fn active(is_active: bool) -> Self {
        Self {
            is_active: Some(is_active),
            ..Self::default()
        }
    }
}

/// One delivery attempt recorded by the backend for an alert
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationHistory {
    /// Unique identifier of the record
    pub id: i64,
    /// Owner of the alert
    pub user_id: i64,
    /// Alert the delivery belongs to
    #[serde(default)]
    pub preference_id: Option<i64>,
    /// Campsite that triggered the delivery
    #[serde(default)]
    pub campsite_id: Option<i64>,
    /// Name of the campsite that triggered the delivery
    #[serde(default)]
    pub campsite_name: Option<String>,
    /// Channel used, e.g. `sms`
    pub notification_type: String,
    /// Message body that was sent
    pub message: String,
    /// Whether the provider accepted the message
    #[serde(default = "default_success")]
    pub success: bool,
    /// Provider error, when delivery failed
    #[serde(default)]
    pub error_message: Option<String>,
    /// When the delivery was attempted
    #[serde(with = "timestamp")]
    pub sent_at: DateTime<Utc>,
}

fn default_success() -> bool {
    true
}

/// A resolved location candidate. The same shape is used for all three resource kinds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Identifier of the recreation area, campground or campsite
    pub id: i64,
    /// Display name
    pub name: String,
    /// Optional description
    #[serde(default)]
    pub description: Option<String>,
    /// Optional location string
    #[serde(default)]
    pub location: Option<String>,
}

/// One page of search results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Results in backend order
    pub results: Vec<SearchResult>,
    /// Total number of matches across all pages
    pub total: i64,
    /// Current page number
    pub page: u32,
    /// Page size
    pub per_page: u32,
}

/// A camping-data source aggregated by the backend
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Provider {
    /// Provider identifier, e.g. `RecreationDotGov`
    pub name: String,
    /// Human readable description
    #[serde(default)]
    pub description: Option<String>,
    /// Features the provider supports
    #[serde(default)]
    pub supported_features: Vec<String>,
}

/// Response of the provider listing endpoint
#[derive(Debug, Deserialize)]
pub(crate) struct ProvidersResponse {
    pub providers: Vec<Provider>,
}

/// The backend emits naive ISO-8601 timestamps; those are read as UTC.
mod timestamp {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn parse(raw: &str) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.with_timezone(&Utc))
            .ok()
            .or_else(|| raw.parse::<NaiveDateTime>().ok().map(|naive| naive.and_utc()))
    }

    pub fn serialize<S: Serializer>(
        value: &DateTime<Utc>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {}", raw)))
    }

    pub mod option {
        use chrono::{DateTime, Utc};
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            value: &Option<DateTime<Utc>>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match value {
                Some(value) => super::serialize(value, serializer),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<DateTime<Utc>>, D::Error> {
            match Option::<String>::deserialize(deserializer)? {
                Some(raw) => super::parse(&raw).map(Some).ok_or_else(|| {
                    serde::de::Error::custom(format!("invalid timestamp: {}", raw))
                }),
                None => Ok(None),
            }
        }
    }
}
