use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::error::{parse_json, send};
use crate::types::ProvidersResponse;
use crate::{ApiConfig, ApiError, SearchResponse};

/// Page requested when the caller does not pick one.
pub const DEFAULT_PAGE: u32 = 1;

/// Page size requested when the caller does not pick one.
pub const DEFAULT_PER_PAGE: u32 = 20;

/// Largest page size the search endpoints accept.
pub const MAX_PER_PAGE: u32 = 100;

/// Filters for `GET /api/search/recreation-areas`
#[derive(Debug, Clone, PartialEq)]
pub struct RecreationAreaSearch {
    /// Free-text query
    pub query: Option<String>,
    /// Two-letter state code
    pub state: Option<String>,
    /// Page number, starting at 1
    pub page: u32,
    /// Page size
    pub per_page: u32,
}

impl Default for RecreationAreaSearch {
    fn default() -> Self {
        Self {
            query: None,
            state: None,
            page: DEFAULT_PAGE,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl RecreationAreaSearch {
    /// Query string parameters, omitting filters that were not supplied.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        push_text(&mut params, "query", self.query.as_deref());
        push_text(&mut params, "state", self.state.as_deref());
        push_paging(&mut params, self.page, self.per_page);
        params
    }
}

/// Filters for `GET /api/search/campgrounds`
#[derive(Debug, Clone, PartialEq)]
pub struct CampgroundSearch {
    /// Parent recreation area
    pub recreation_area_id: Option<i64>,
    /// Free-text query
    pub query: Option<String>,
    /// Two-letter state code
    pub state: Option<String>,
    /// Page number, starting at 1
    pub page: u32,
    /// Page size
    pub per_page: u32,
}

impl Default for CampgroundSearch {
    fn default() -> Self {
        Self {
            recreation_area_id: None,
            query: None,
            state: None,
            page: DEFAULT_PAGE,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl CampgroundSearch {
    /// Query string parameters, omitting filters that were not supplied.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(id) = self.recreation_area_id {
            params.push(("recreation_area_id", id.to_string()));
        }
        push_text(&mut params, "query", self.query.as_deref());
        push_text(&mut params, "state", self.state.as_deref());
        push_paging(&mut params, self.page, self.per_page);
        params
    }
}

/// Filters for `GET /api/search/campsites`
#[derive(Debug, Clone, PartialEq)]
pub struct CampsiteSearch {
    /// Parent campground
    pub campground_id: Option<i64>,
    /// Parent recreation area
    pub recreation_area_id: Option<i64>,
    /// Page number, starting at 1
    pub page: u32,
    /// Page size
    pub per_page: u32,
}

impl Default for CampsiteSearch {
    fn default() -> Self {
        Self {
            campground_id: None,
            recreation_area_id: None,
            page: DEFAULT_PAGE,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl CampsiteSearch {
    /// Query string parameters, omitting filters that were not supplied.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(id) = self.campground_id {
            params.push(("campground_id", id.to_string()));
        }
        if let Some(id) = self.recreation_area_id {
            params.push(("recreation_area_id", id.to_string()));
        }
        push_paging(&mut params, self.page, self.per_page);
        params
    }
}

fn push_text(params: &mut Vec<(&'static str, String)>, key: &'static str, value: Option<&str>) {
    if let Some(value) = value.filter(|v| !v.is_empty()) {
        params.push((key, value.to_string()));
    }
}

fn push_paging(params: &mut Vec<(&'static str, String)>, page: u32, per_page: u32) {
    params.push(("page", page.to_string()));
    params.push(("per_page", per_page.to_string()));
}

/// Location search across the three resource kinds
#[async_trait]
pub trait SearchApi: Send + Sync {
    /// Searches recreation areas.
    async fn search_recreation_areas(
        &self,
        search: &RecreationAreaSearch,
    ) -> Result<SearchResponse, ApiError>;

    /// Searches campgrounds, optionally inside one recreation area.
    async fn search_campgrounds(
        &self,
        search: &CampgroundSearch,
    ) -> Result<SearchResponse, ApiError>;

    /// Lists campsites of a campground or recreation area.
    async fn search_campsites(&self, search: &CampsiteSearch)
    -> Result<SearchResponse, ApiError>;

    /// Identifiers of the camping-data providers the backend aggregates.
    async fn providers(&self) -> Result<Vec<String>, ApiError>;
}

/// HTTP client for the `/api/search` endpoints
#[derive(Debug, Clone)]
pub struct SearchClient {
    client: Client,
    config: ApiConfig,
}

impl SearchClient {
    /// Creates a client that reuses an existing HTTP client (and its session cookies).
    pub fn new(client: Client, config: ApiConfig) -> Self {
        Self { client, config }
    }

    /// Creates a client with its own HTTP client.
    pub fn from_config(config: ApiConfig) -> Result<Self, ApiError> {
        let client = config.build_http_client()?;
        Ok(Self::new(client, config))
    }

    async fn search(
        &self,
        resource: &str,
        params: Vec<(&'static str, String)>,
    ) -> Result<SearchResponse, ApiError> {
        let url = self.config.url(&format!("/api/search/{}", resource));
        debug!("Searching {} with {:?}", resource, params);

        let response = send(self.client.get(&url).query(&params)).await?;
        parse_json(response).await
    }
}

#[async_trait]
impl SearchApi for SearchClient {
    async fn search_recreation_areas(
        &self,
        search: &RecreationAreaSearch,
    ) -> Result<SearchResponse, ApiError> {
        self.search("recreation-areas", search.params()).await
    }

    async fn search_campgrounds(
        &self,
        search: &CampgroundSearch,
    ) -> Result<SearchResponse, ApiError> {
        self.search("campgrounds", search.params()).await
    }

    async fn search_campsites(
        &self,
        search: &CampsiteSearch,
    ) -> Result<SearchResponse, ApiError> {
        self.search("campsites", search.params()).await
    }

    async fn providers(&self) -> Result<Vec<String>, ApiError> {
        let url = self.config.url("/api/search/providers");
        debug!("Listing providers");

        let response = send(self.client.get(&url)).await?;
        let body: ProvidersResponse = parse_json(response).await?;
        Ok(body.providers.into_iter().map(|p| p.name).collect())
    }
}
