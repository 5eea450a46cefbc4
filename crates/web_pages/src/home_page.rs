use crate::{Page, Route};

/// A feature highlighted on the landing page
#[derive(Debug, Clone, Copy)]
pub struct Feature {
    /// Card heading
    pub title: &'static str,
    /// Card text
    pub text: &'static str,
}

/// A camping provider listed on the landing page
#[derive(Debug, Clone, Copy)]
pub struct ProviderBlurb {
    /// Provider name
    pub name: &'static str,
    /// What it covers
    pub coverage: &'static str,
}

/// Feature cards, in display order.
pub const FEATURES: [Feature; 4] = [
    Feature {
        title: "🔍 Smart Search",
        text: "Search across multiple camping providers including Recreation.gov, Yellowstone, and state parks.",
    },
    Feature {
        title: "📱 Instant Notifications",
        text: "Get SMS alerts when campsites become available so you can book quickly.",
    },
    Feature {
        title: "🎯 Flexible Criteria",
        text: "Set specific date ranges, choose recreation areas, campgrounds, or individual campsites.",
    },
    Feature {
        title: "⚡ Real-time Monitoring",
        text: "Continuous monitoring of availability with instant notifications when spots open up.",
    },
];

/// Supported providers, in display order.
pub const PROVIDERS: [ProviderBlurb; 4] = [
    ProviderBlurb {
        name: "Recreation.gov",
        coverage: "US National Parks and Federal Lands",
    },
    ProviderBlurb {
        name: "Yellowstone",
        coverage: "Yellowstone National Park Lodges",
    },
    ProviderBlurb {
        name: "ReserveCalifornia",
        coverage: "California State Parks",
    },
    ProviderBlurb {
        name: "GoingToCamp",
        coverage: "Canadian and US State Parks",
    },
];

/// Static landing page; it has no data dependency.
#[derive(Debug, Clone, Copy, Default)]
pub struct HomePage;

impl Page for HomePage {
    fn title(&self) -> String {
        "Home".to_string()
    }

    fn route(&self) -> Option<Route> {
        Some(Route::Home)
    }

    fn body(&self) -> String {
        let features: String = FEATURES
            .iter()
            .map(|f| format!(r#"<div class="card"><h3>{}</h3><p>{}</p></div>"#, f.title, f.text))
            .collect();

        let providers: String = PROVIDERS
            .iter()
            .map(|p| format!("<div><strong>{}</strong><p>{}</p></div>", p.name, p.coverage))
            .collect();

        format!(
            r#"<div class="card">
    <div class="card-header"><h1 class="card-title">Welcome to Camply Web Interface</h1></div>
    <p class="lead">Find and get notified about campsite availability across thousands of campgrounds. Camply searches Recreation.gov, Yellowstone, California State Parks, and many more camping providers to help you secure your perfect camping spot.</p>
    <div class="actions">
        <a href="{}" class="btn btn-primary">Create Your First Alert</a>
        <a href="{}" class="btn btn-secondary">View My Alerts</a>
    </div>
</div>
<div class="feature-grid">{}</div>
<div class="card">
    <h3>Supported Providers</h3>
    <div class="provider-grid">{}</div>
</div>"#,
            Route::CreateNotification.path(),
            Route::Notifications.path(),
            features,
            providers
        )
    }
}
