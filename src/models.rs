use crate::mappings::month_name;

/// Days between approval and delivery, over rows where both timestamps parse.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeliveryStats {
    pub mean_days: i64,
    pub median_days: i64,
    pub valid_count: usize,
}

/// Month of year (1-12) with the most orders, merged across years.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthlyCount {
    pub month: u32,
    pub count: u64,
}

impl MonthlyCount {
    pub fn month_name(&self) -> &'static str {
        month_name(self.month)
    }
}

/// Month of year (1-12) with the largest payment total, merged across years.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthlyPayment {
    pub month: u32,
    pub total: f64,
}

impl MonthlyPayment {
    pub fn month_name(&self) -> &'static str {
        month_name(self.month)
    }
}
