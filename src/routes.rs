//! Route tables for both dashboards and the sidebar that renders them.

use crate::session::Dashboard;

/// Which page a route renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    Overview,
    Products,
    ProductStatus,
    Categories,
    Brands,
    Subscriptions,
    Users,
    Vendors,
    Managers,
    Franchises,
    Payouts,
    DeliveryBoxes,
    BulkDeliveries,
    DailyTips,
    Locations,
    Reviews,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteEntry {
    /// Relative to the dashboard's base route; empty for its index.
    pub path: &'static str,
    pub label: &'static str,
    pub page: PageKind,
}

const fn entry(path: &'static str, label: &'static str, page: PageKind) -> RouteEntry {
    RouteEntry { path, label, page }
}

pub const ADMIN_ROUTES: &[RouteEntry] = &[
    entry("", "Overview", PageKind::Overview),
    entry("products", "Products", PageKind::Products),
    entry("product-status", "Product approvals", PageKind::ProductStatus),
    entry("categories", "Categories", PageKind::Categories),
    entry("brands", "Brands", PageKind::Brands),
    entry("subscriptions", "Subscriptions", PageKind::Subscriptions),
    entry("users", "Users", PageKind::Users),
    entry("vendors", "Vendors", PageKind::Vendors),
    entry("managers", "Managers", PageKind::Managers),
    entry("franchises", "Franchises", PageKind::Franchises),
    entry("locations", "Locations", PageKind::Locations),
    entry("delivery-boxes", "Delivery boxes", PageKind::DeliveryBoxes),
    entry("bulk-deliveries", "Bulk deliveries", PageKind::BulkDeliveries),
    entry("daily-tips", "Daily tips", PageKind::DailyTips),
    entry("reviews", "Reviews", PageKind::Reviews),
];

pub const VENDOR_ROUTES: &[RouteEntry] = &[
    entry("", "Overview", PageKind::Overview),
    entry("products", "My products", PageKind::Products),
    entry("payouts", "Payout history", PageKind::Payouts),
    entry("delivery-boxes", "Delivery boxes", PageKind::DeliveryBoxes),
];

pub fn routes_for(dashboard: Dashboard) -> &'static [RouteEntry] {
    match dashboard {
        Dashboard::Admin => ADMIN_ROUTES,
        Dashboard::Vendor => VENDOR_ROUTES,
    }
}

/// Absolute path of `entry` within `dashboard`.
pub fn full_path(dashboard: Dashboard, entry: &RouteEntry) -> String {
    if entry.path.is_empty() {
        dashboard.base_route().to_string()
    } else {
        format!("{}/{}", dashboard.base_route(), entry.path)
    }
}

/// Finds the route an absolute location renders.
pub fn resolve(location: &str) -> Option<(Dashboard, &'static RouteEntry)> {
    let location = location.split(['?', '#']).next().unwrap_or("").trim_end_matches('/');
    [Dashboard::Admin, Dashboard::Vendor]
        .into_iter()
        .find_map(|dashboard| {
            let rest = location.strip_prefix(dashboard.base_route())?;
            let rest = match rest {
                "" => "",
                _ => rest.strip_prefix('/')?,
            };
            routes_for(dashboard)
                .iter()
                .find(|entry| entry.path == rest)
                .map(|entry| (dashboard, entry))
        })
}

/// Collapsible navigation. On narrow layouts it starts closed and closes
/// again after every navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sidebar {
    open: bool,
    narrow: bool,
}

impl Sidebar {
    pub const NARROW_BELOW_PX: f64 = 768.0;

    pub fn for_width(width_px: f64) -> Self {
        let narrow = width_px < Self::NARROW_BELOW_PX;
        Self { open: !narrow, narrow }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_narrow(&self) -> bool {
        self.narrow
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn resize(&mut self, width_px: f64) {
        let narrow = width_px < Self::NARROW_BELOW_PX;
        if narrow != self.narrow {
            *self = Self::for_width(width_px);
        }
    }

    pub fn navigated(&mut self) {
        if self.narrow {
            self.open = false;
        }
    }
}

impl Default for Sidebar {
    fn default() -> Self {
        Self::for_width(Self::NARROW_BELOW_PX)
    }
}
