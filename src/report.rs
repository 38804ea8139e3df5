use std::collections::BTreeMap;

use chrono::Datelike;

use crate::model::models::RevenueRecord;

/**
 * Number of records shown at each end of the sample table.
 */
const SAMPLE_COUNT: usize = 3;

/**
 * Formats the first and last records of the dataset as a fixed-width table
 * in generation order.
 *
 * # Arguments
 * `records`: The generated dataset.
 *
 * # Returns
 * The formatted sample table.
 */
pub fn format_sample(records: &[RevenueRecord]) -> String {
    let mut output = String::from("Sample data (first and last records):\n\n");
    output.push_str(&format!("{:<6} {:<15} {:<12} {:>20}\n", "Branch", "Name", "Date", "Revenue (VND)"));
    output.push_str(&"-".repeat(55));
    output.push('\n');
    if records.len() <= SAMPLE_COUNT * 2 {
        for record in records {
            output.push_str(&format_row(record));
        }
    } else {
        for record in &records[..SAMPLE_COUNT] {
            output.push_str(&format_row(record));
        }
        for record in &records[records.len() - SAMPLE_COUNT..] {
            output.push_str(&format_row(record));
        }
    }
    output
}

/**
 * Sums revenue per calendar year, ascending.
 *
 * # Arguments
 * `records`: The generated dataset.
 *
 * # Returns
 * One (year, total revenue) pair per year, ascending by year.
 */
pub fn yearly_totals(records: &[RevenueRecord]) -> Vec<(i32, i64)> {
    let mut totals: BTreeMap<i32, i64> = BTreeMap::new();
    for record in records {
        *totals.entry(record.report_date.year()).or_insert(0) += record.revenue_vnd;
    }
    totals.into_iter().collect()
}

/**
 * Formats the yearly totals and the growth percentage between each pair of
 * successive years.
 *
 * # Arguments
 * `totals`: (year, total revenue) pairs, ascending by year.
 *
 * # Returns
 * The formatted summary.
 */
pub fn format_summary(totals: &[(i32, i64)]) -> String {
    let mut output = String::from("Summary:\n");
    for (year, total) in totals {
        output.push_str(&format!("   Total {year}: {} VND\n", format_vnd(*total)));
    }
    for window in totals.windows(2) {
        let (previous_year, previous_total) = window[0];
        let (year, total) = window[1];
        if previous_total != 0 {
            let growth = (total - previous_total) as f64 / previous_total as f64 * 100.0;
            output.push_str(&format!("   YoY growth {previous_year} to {year}: {growth:.1}%\n"));
        }
    }
    output
}

/**
 * Formats one sample table row.
 */
fn format_row(record: &RevenueRecord) -> String {
    format!("{:<6} {:<15} {:<12} {:>20}\n", record.branch_code, record.branch_name, record.report_date.to_string(), format_vnd(record.revenue_vnd))
}

/**
 * Thousands-separated amount, e.g. 12345678 becomes "12,345,678".
 */
fn format_vnd(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut separated = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, character) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            separated.push(',');
        }
        separated.push(character);
    }
    if amount < 0 { format!("-{separated}") } else { separated }
}

#[cfg(test)]
mod test {
    use chrono::NaiveDate;

    use super::*;

    fn record(code: &str, name: &str, year: i32, month: u32, day: u32, revenue_vnd: i64) -> RevenueRecord {
        RevenueRecord { branch_code: code.to_string(), branch_name: name.to_string(), report_date: NaiveDate::from_ymd_opt(year, month, day).unwrap(), revenue_vnd }
    }

    #[test]
    fn test_format_vnd() {
        assert_eq!(format_vnd(0), "0");
        assert_eq!(format_vnd(999), "999");
        assert_eq!(format_vnd(1000), "1,000");
        assert_eq!(format_vnd(12_345_678), "12,345,678");
        assert_eq!(format_vnd(15_000_000_000), "15,000,000,000");
        assert_eq!(format_vnd(-1_234_567), "-1,234,567");
    }

    #[test]
    fn test_yearly_totals_ascending() {
        let records = vec![
            record("HCM", "Ho Chi Minh", 2025, 1, 31, 300),
            record("HCM", "Ho Chi Minh", 2024, 1, 31, 100),
            record("HN", "Ha Noi", 2024, 2, 29, 200),
        ];
        let totals = yearly_totals(&records);
        assert_eq!(totals, vec![(2024, 300), (2025, 300)]);
    }

    #[test]
    fn test_format_summary_growth() {
        let summary = format_summary(&[(2024, 1_000), (2025, 1_080)]);
        assert!(summary.contains("Total 2024: 1,000 VND"));
        assert!(summary.contains("Total 2025: 1,080 VND"));
        assert!(summary.contains("YoY growth 2024 to 2025: 8.0%"));
    }

    #[test]
    fn test_format_summary_without_previous_total_skips_growth() {
        let summary = format_summary(&[(2024, 0), (2025, 1_080)]);
        assert!(!summary.contains("YoY growth"));
    }

    #[test]
    fn test_format_sample_shows_first_and_last_three() {
        let records: Vec<RevenueRecord> = (1..=12).map(|month| record("HCM", "Ho Chi Minh", 2024, month, 1, i64::from(month) * 1_000_000)).collect();
        let sample = format_sample(&records);
        assert!(sample.contains("2024-01-01"));
        assert!(sample.contains("2024-03-01"));
        assert!(!sample.contains("2024-04-01"));
        assert!(!sample.contains("2024-09-01"));
        assert!(sample.contains("2024-10-01"));
        assert!(sample.contains("2024-12-01"));
    }

    #[test]
    fn test_format_sample_short_dataset_prints_all() {
        let records: Vec<RevenueRecord> = (1..=4).map(|month| record("DN", "Da Nang", 2025, month, 1, 1_000_000)).collect();
        let sample = format_sample(&records);
        for month in 1..=4 {
            assert!(sample.contains(&format!("2025-0{month}-01")));
        }
    }
}
