//! Resource models returned by the payments API.

pub mod card;
pub mod charge;
pub mod customer;
pub mod id;
pub mod list;
pub mod schedule;

pub use card::Card;
pub use charge::{Charge, ChargeStatus};
pub use customer::Customer;
pub use id::{CardId, ChargeId, CustomerId, ScheduleId};
pub use list::List;
pub use schedule::{Schedule, ScheduleStatus};
