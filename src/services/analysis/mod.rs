pub mod coerce;
pub mod delivery;
pub mod monthly;

pub use delivery::compute_delivery_time;
pub use monthly::{mode_by_order_count, month_by_total_payment};
