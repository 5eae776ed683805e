pub mod brand;
pub mod bulk_delivery;
pub mod category;
pub mod daily_tip;
pub mod delivery_box;
pub mod franchise;
pub mod location;
pub mod manager;
pub mod payout;
pub mod product;
pub mod reference;
pub mod review;
pub mod subscription;
pub mod user;
pub mod vendor;

pub use brand::Brand;
pub use bulk_delivery::BulkDelivery;
pub use category::Category;
pub use daily_tip::DailyTip;
pub use delivery_box::DeliveryBox;
pub use franchise::Franchise;
pub use location::Location;
pub use manager::Manager;
pub use payout::PayoutHistoryItem;
pub use product::Product;
pub use reference::{Named, Ref, Summary};
pub use review::{NewReview, Review, ReviewFilter};
pub use subscription::Subscription;
pub use user::User;
pub use vendor::Vendor;
