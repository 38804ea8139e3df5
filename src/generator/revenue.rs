use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::model::{
    apperror::{ApplicationError, ErrorType},
    models::{BranchSpec, Quarter, RevenueRecord, YearSpec},
};

/**
 * Lower bound of the uniformly drawn base revenue, in VND.
 */
pub const BASE_REVENUE_MIN: f64 = 12_000_000_000.0;

/**
 * Upper bound of the uniformly drawn base revenue, in VND.
 */
pub const BASE_REVENUE_MAX: f64 = 20_000_000_000.0;

/**
 * Half-width of the multiplicative noise interval.
 */
pub const NOISE_RANGE: f64 = 0.10;

/**
 * Generated amounts are rounded to whole millions.
 */
const MILLION: i64 = 1_000_000;

/**
 * Creates the random source for a seeding run. When a seed is given, a fresh
 * deterministic generator is constructed from it, so runs with the same seed
 * produce the same dataset. Without a seed, the generator is drawn from
 * operating system entropy.
 *
 * # Arguments
 * `seed`: Optional seed for reproducible runs.
 *
 * # Returns
 * The random source to thread through dataset generation.
 */
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/**
 * Generates one revenue amount: a uniform base draw scaled by the branch
 * size, the seasonal factor of the quarter and the growth factor of the
 * year, perturbed by an independent uniform noise draw.
 *
 * # Arguments
 * `branch`: Branch attribute entry providing the size factor.
 * `quarter`: Quarter providing the seasonal factor.
 * `year`: Year attribute entry providing the growth factor.
 * `rng`: Random source for the base and noise draws.
 *
 * # Returns
 * Revenue in VND, rounded to the nearest million.
 */
pub fn generate_revenue<R: Rng>(branch: &BranchSpec, quarter: Quarter, year: &YearSpec, rng: &mut R) -> i64 {
    let base = rng.gen_range(BASE_REVENUE_MIN..=BASE_REVENUE_MAX);
    let revenue = base * branch.size_factor * quarter.seasonal_factor() * year.growth_factor;
    let noise = rng.gen_range(1.0 - NOISE_RANGE..=1.0 + NOISE_RANGE);
    round_to_million(revenue * noise)
}

/**
 * Last calendar day of the given month, leap-year aware.
 *
 * # Arguments
 * `year`: Calendar year.
 * `month`: Month number, 1 through 12.
 *
 * # Returns
 * The last day of the month, or `None` for an invalid month number.
 */
pub fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)?.pred_opt()
}

/**
 * Builds the full dataset: years outer, months 1 through 12 middle, branches
 * inner. Iteration order is preserved in the returned sequence; the sample
 * report relies on it.
 *
 * # Arguments
 * `years`: Year attribute table, ascending.
 * `branches`: Branch attribute table, in insertion order.
 * `rng`: Random source threaded through every generated record.
 *
 * # Returns
 * A `Result` containing one record per (year, month, branch) combination, or an `ApplicationError`.
 */
pub fn build_dataset<R: Rng>(years: &[YearSpec], branches: &[BranchSpec], rng: &mut R) -> Result<Vec<RevenueRecord>, ApplicationError> {
    let mut records = Vec::with_capacity(years.len() * 12 * branches.len());
    for year in years {
        for month in 1..=12u32 {
            let quarter = Quarter::from_month(month).ok_or_else(|| ApplicationError::new(ErrorType::Application, format!("No quarter for month {month}")))?;
            let report_date =
                last_day_of_month(year.year, month).ok_or_else(|| ApplicationError::new(ErrorType::Application, format!("No last day of month for {}-{month}", year.year)))?;
            for branch in branches {
                let revenue_vnd = generate_revenue(branch, quarter, year, rng);
                records.push(RevenueRecord { branch_code: branch.code.to_string(), branch_name: branch.name.to_string(), report_date, revenue_vnd });
            }
        }
    }
    Ok(records)
}

/**
 * Rounds to the nearest multiple of one million.
 */
fn round_to_million(value: f64) -> i64 {
    (value / MILLION as f64).round() as i64 * MILLION
}
