use camply_api::{
    ApiError, CampgroundSearch, CampsiteSearch, MAX_PER_PAGE, RecreationAreaSearch, SearchApi,
    SearchResult,
};
use log::debug;
use serde::{Deserialize, Serialize};

/// Which resource kind the location search box looks for
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SearchMode {
    /// Recreation areas (parks, forests)
    #[default]
    RecreationArea,
    /// Campgrounds
    Campground,
    /// Individual campsites
    Campsite,
}

impl SearchMode {
    /// Every mode, in the order the selector shows them.
    pub const ALL: [SearchMode; 3] = [
        SearchMode::RecreationArea,
        SearchMode::Campground,
        SearchMode::Campsite,
    ];

    /// Wire and form value, e.g. `recreation-area`.
    pub fn as_str(self) -> &'static str {
        match self {
            SearchMode::RecreationArea => "recreation-area",
            SearchMode::Campground => "campground",
            SearchMode::Campsite => "campsite",
        }
    }

    /// Selector label.
    pub fn label(self) -> &'static str {
        match self {
            SearchMode::RecreationArea => "Recreation Area",
            SearchMode::Campground => "Campground",
            SearchMode::Campsite => "Campsite",
        }
    }

    /// Search box placeholder.
    pub fn placeholder(self) -> String {
        format!("Search for {}...", self.as_str().replace('-', " "))
    }
}

/// The locations picked so far. A later selection implies the earlier ones but the
/// three pairs are not checked against each other.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selections {
    /// Selected recreation area
    pub recreation_area: Option<SearchResult>,
    /// Selected campground
    pub campground: Option<SearchResult>,
    /// Selected campsite
    pub campsite: Option<SearchResult>,
}

impl Selections {
    /// Whether nothing has been selected ("any location").
    pub fn is_empty(&self) -> bool {
        self.recreation_area.is_none() && self.campground.is_none() && self.campsite.is_none()
    }
}

/// Search mode plus selections, with pure transitions
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CascadeState {
    /// Current search mode
    pub mode: SearchMode,
    /// Locations picked so far
    pub selections: Selections,
}

impl CascadeState {
    /// Records `result` for the current mode and advances to the next, more specific mode.
    /// Campsite is terminal.
    pub fn select(&self, result: SearchResult) -> CascadeState {
        let mut selections = self.selections.clone();
        let mode = match self.mode {
            SearchMode::RecreationArea => {
                selections.recreation_area = Some(result);
                SearchMode::Campground
            }
            SearchMode::Campground => {
                selections.campground = Some(result);
                SearchMode::Campsite
            }
            SearchMode::Campsite => {
                selections.campsite = Some(result);
                SearchMode::Campsite
            }
        };

        CascadeState { mode, selections }
    }

    /// Switches to `mode` and drops every selection, whatever the current mode is.
    pub fn switch_mode(&self, mode: SearchMode) -> CascadeState {
        CascadeState {
            mode,
            selections: Selections::default(),
        }
    }
}

/// A search scoped to the current mode and selections
#[derive(Debug, Clone, PartialEq)]
pub enum SearchRequest {
    /// Recreation area search by text
    RecreationAreas(RecreationAreaSearch),
    /// Campground search by text, inside the selected recreation area
    Campgrounds(CampgroundSearch),
    /// Campsites of the selected campground / recreation area. The endpoint has no
    /// text filter, so every page is fetched and results are narrowed by name on
    /// this side.
    Campsites {
        /// Backend filters
        search: CampsiteSearch,
        /// Case-insensitive name filter
        name_filter: String,
    },
}

impl SearchRequest {
    /// Builds the request for `query` in the given state.
    pub fn for_state(state: &CascadeState, query: &str) -> SearchRequest {
        let query = query.trim().to_string();
        let recreation_area_id = state.selections.recreation_area.as_ref().map(|r| r.id);

        match state.mode {
            SearchMode::RecreationArea => SearchRequest::RecreationAreas(RecreationAreaSearch {
                query: Some(query),
                ..Default::default()
            }),
            SearchMode::Campground => SearchRequest::Campgrounds(CampgroundSearch {
                recreation_area_id,
                query: Some(query),
                ..Default::default()
            }),
            SearchMode::Campsite => SearchRequest::Campsites {
                search: CampsiteSearch {
                    campground_id: state.selections.campground.as_ref().map(|c| c.id),
                    recreation_area_id,
                    per_page: MAX_PER_PAGE,
                    ..Default::default()
                },
                name_filter: query,
            },
        }
    }

    /// Runs the search and returns the matching results in backend order.
    pub async fn run(&self, api: &dyn SearchApi) -> Result<Vec<SearchResult>, ApiError> {
        match self {
            SearchRequest::RecreationAreas(search) => {
                Ok(api.search_recreation_areas(search).await?.results)
            }
            SearchRequest::Campgrounds(search) => Ok(api.search_campgrounds(search).await?.results),
            SearchRequest::Campsites {
                search,
                name_filter,
            } => {
                let needle = name_filter.to_lowercase();
                let mut results = all_campsites(api, search).await?;
                results.retain(|r| r.name.to_lowercase().contains(&needle));
                Ok(results)
            }
        }
    }
}

/// Fetches pages from `search.page` on until the reported total is covered.
async fn all_campsites(
    api: &dyn SearchApi,
    search: &CampsiteSearch,
) -> Result<Vec<SearchResult>, ApiError> {
    let mut page = search.clone();
    let mut results = Vec::new();

    loop {
        let response = api.search_campsites(&page).await?;
        let fetched = response.results.len();
        results.extend(response.results);

        let seen = u64::from(page.page) * u64::from(page.per_page.max(1));
        if fetched == 0 || seen >= response.total.max(0) as u64 {
            break;
        }
        page.page += 1;
    }

    debug!("Fetched {} campsites in {} page(s)", results.len(), page.page + 1 - search.page);
    Ok(results)
}
