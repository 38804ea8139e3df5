use chrono::NaiveDate;

/**
 * Attribute table entry for one organizational branch.
 */
#[derive(Debug, Clone)]
pub struct BranchSpec {
    /**
     * Short branch identifier, at most 3 characters.
     */
    pub code: &'static str,
    /**
     * Display name for the branch.
     */
    pub name: &'static str,
    /**
     * Relative size of the branch, in [0, 1].
     */
    pub size_factor: f64,
}

/**
 * The fixed set of branches. Table order is the insertion order of the
 * generated dataset.
 */
pub const BRANCHES: [BranchSpec; 3] = [
    BranchSpec { code: "HCM", name: "Ho Chi Minh", size_factor: 1.0 },
    BranchSpec { code: "HN", name: "Ha Noi", size_factor: 0.85 },
    BranchSpec { code: "DN", name: "Da Nang", size_factor: 0.6 },
];

/**
 * Attribute table entry for one reporting year.
 */
#[derive(Debug, Clone)]
pub struct YearSpec {
    pub year: i32,
    /**
     * Growth multiplier relative to the baseline year.
     */
    pub growth_factor: f64,
}

/**
 * The fixed set of reporting years, ascending. The first entry is the
 * baseline.
 */
pub const YEARS: [YearSpec; 2] = [
    YearSpec { year: 2024, growth_factor: 1.0 },
    YearSpec { year: 2025, growth_factor: 1.08 },
];

/**
 * Calendar quarter with its seasonal revenue multiplier.
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quarter {
    Q1,
    Q2,
    Q3,
    Q4,
}

impl Quarter {
    /**
     * Derives the quarter from a month number.
     *
     * # Arguments
     * `month`: Month number, 1 through 12.
     *
     * # Returns
     * The quarter containing the month, or `None` for an invalid month number.
     */
    pub fn from_month(month: u32) -> Option<Quarter> {
        match month.checked_sub(1)? / 3 {
            0 => Some(Quarter::Q1),
            1 => Some(Quarter::Q2),
            2 => Some(Quarter::Q3),
            3 => Some(Quarter::Q4),
            _ => None,
        }
    }

    /**
     * Seasonal multiplier for the quarter. Q4 carries the holiday boost,
     * Q1 the post-holiday slowdown.
     */
    pub fn seasonal_factor(self) -> f64 {
        match self {
            Quarter::Q1 => 0.90,
            Quarter::Q2 => 1.00,
            Quarter::Q3 => 1.05,
            Quarter::Q4 => 1.15,
        }
    }
}

/**
 * One generated revenue row, as persisted.
 */
#[derive(Debug, Clone, PartialEq)]
pub struct RevenueRecord {
    pub branch_code: String,
    pub branch_name: String,
    /**
     * Last calendar day of the reporting month.
     */
    pub report_date: NaiveDate,
    /**
     * Revenue in VND, a non-negative multiple of 1,000,000.
     */
    pub revenue_vnd: i64,
}
