//! Data models mirroring the RentFit backend

pub mod chat;
pub mod clothing;
pub mod dashboard;
pub mod donation;
pub mod enums;
pub mod notification;
pub mod payment;
pub mod rental;
pub mod review;
pub mod user;
pub mod wishlist;

// Re-export commonly used types
pub use chat::{Conversation, Message};
pub use clothing::Clothing;
pub use dashboard::{Dashboard, NearbyStore};
pub use donation::Donation;
pub use enums::{ClothingStatus, DonationStatus, NotificationType, RentalStatus, Role};
pub use notification::Notification;
pub use rental::Rental;
pub use review::Review;
pub use user::{LoginResponse, User};
