use super::resource_page::{resource_page, PageOptions};
use super::shell::Overview;
use super::subscription_form::subscription_extension;
use crate::models::bulk_delivery::BULK_DELIVERY_STATUSES;
use crate::models::delivery_box::BOX_STATUSES;
use crate::models::product::PRODUCT_STATUSES;
use crate::models::*;
use crate::routes::PageKind;
use crate::session::Dashboard;
use leptos::*;

/// The view a route entry renders.
pub fn page_view(dashboard: Dashboard, kind: PageKind) -> View {
    match kind {
        PageKind::Overview => view! { <Overview /> }.into_view(),
        PageKind::Products => {
            let title = match dashboard {
                Dashboard::Admin => "Products",
                Dashboard::Vendor => "My products",
            };
            resource_page::<Product>(PageOptions::new(title)).into_view()
        }
        PageKind::ProductStatus => {
            resource_page::<Product>(PageOptions::new("Product approvals").statuses(PRODUCT_STATUSES)).into_view()
        }
        PageKind::Categories => resource_page::<Category>(PageOptions::new("Categories")).into_view(),
        PageKind::Brands => resource_page::<Brand>(PageOptions::new("Brands")).into_view(),
        PageKind::Subscriptions => {
            resource_page::<Subscription>(PageOptions::new("Subscriptions").extension(subscription_extension()))
                .into_view()
        }
        PageKind::Users => resource_page::<User>(PageOptions::new("Users")).into_view(),
        PageKind::Vendors => resource_page::<Vendor>(PageOptions::new("Vendors")).into_view(),
        PageKind::Managers => resource_page::<Manager>(PageOptions::new("Managers")).into_view(),
        PageKind::Franchises => resource_page::<Franchise>(PageOptions::new("Franchises")).into_view(),
        PageKind::Payouts => resource_page::<PayoutHistoryItem>(PageOptions::new("Payout history")).into_view(),
        PageKind::DeliveryBoxes => {
            resource_page::<DeliveryBox>(PageOptions::new("Delivery boxes").statuses(BOX_STATUSES)).into_view()
        }
        PageKind::BulkDeliveries => {
            resource_page::<BulkDelivery>(PageOptions::new("Bulk deliveries").statuses(BULK_DELIVERY_STATUSES))
                .into_view()
        }
        PageKind::DailyTips => resource_page::<DailyTip>(PageOptions::new("Daily tips")).into_view(),
        PageKind::Locations => resource_page::<Location>(PageOptions::new("Locations")).into_view(),
        PageKind::Reviews => resource_page::<Review>(PageOptions::new("Reviews")).into_view(),
    }
}
