mod appointment;
mod company;
mod customer;
mod location;
mod notification;
mod professional;
mod service;
mod timeframe;

pub use appointment::*;
pub use company::*;
pub use customer::*;
pub use location::*;
pub use notification::*;
pub use professional::*;
pub use service::*;
pub use timeframe::*;
