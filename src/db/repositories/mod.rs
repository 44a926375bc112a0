mod appointment_repository;
mod company_repository;
mod customer_repository;
mod location_repository;
mod notification_repository;
mod professional_repository;
mod service_repository;
mod stats_repository;

pub use appointment_repository::*;
pub use company_repository::*;
pub use customer_repository::*;
pub use location_repository::*;
pub use notification_repository::*;
pub use professional_repository::*;
pub use service_repository::*;
pub use stats_repository::*;
