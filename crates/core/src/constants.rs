/// Decimal precision for display of money amounts
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Id of the synthetic category used for subscriptions without one
pub const UNCATEGORIZED_ID: &str = "uncategorized";

/// Label of the synthetic uncategorized category
pub const UNCATEGORIZED_NAME: &str = "Uncategorized";

/// Color of the synthetic uncategorized category
pub const UNCATEGORIZED_COLOR: &str = "#9ca3af";

/// Short month labels used for monthly buckets
pub const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Default look-ahead window for upcoming renewals, in days
pub const DEFAULT_UPCOMING_WINDOW_DAYS: i64 = 30;
