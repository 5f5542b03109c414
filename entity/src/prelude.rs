pub use super::blocked_ip::Entity as BlockedIp;
pub use super::recommendation::Entity as Recommendation;
pub use super::upcoming_event::Entity as UpcomingEvent;
pub use super::user::Entity as User;
pub use super::user_ip_address::Entity as UserIpAddress;
