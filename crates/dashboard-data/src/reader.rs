//! CSV loading for the sales dashboard.
//!
//! Reads the Superstore-style export and converts each row into a
//! [`SalesRecord`]. Only the columns the pipeline needs are read; the rest
//! of the export is ignored. Any malformed date, amount or category aborts
//! the load with the offending CSV line number, so the pipeline never sees
//! a partially parsed row.

use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use csv::StringRecord;
use dashboard_core::error::{DashboardError, Result};
use dashboard_core::models::SalesRecord;
use dashboard_core::taxonomy::{Category, CategoryTaxonomy};
use rust_decimal::Decimal;
use tracing::{debug, warn};

/// Header names of the columns the loader reads.
pub const ORDER_DATE_COLUMN: &str = "Order_Date";
pub const CATEGORY_COLUMN: &str = "Category";
pub const SUB_CATEGORY_COLUMN: &str = "Sub_Category";
pub const SALES_COLUMN: &str = "Sales";
pub const PROFIT_COLUMN: &str = "Profit";

// ── Public API ────────────────────────────────────────────────────────────────

/// Load every row of the CSV file at `path`.
pub fn load_sales_records(path: &Path) -> Result<Vec<SalesRecord>> {
    if !path.exists() {
        return Err(DashboardError::DataPathNotFound(path.to_path_buf()));
    }

    let file = std::fs::File::open(path).map_err(|source| DashboardError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let records = read_sales_records(std::io::BufReader::new(file))?;
    debug!(
        "Loaded {} sales records from {}",
        records.len(),
        path.display()
    );
    Ok(records)
}

/// Parse sales records from any CSV source with a header row.
pub fn read_sales_records<R: Read>(reader: R) -> Result<Vec<SalesRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let columns = ColumnIndex::from_headers(csv_reader.headers()?)?;

    let mut records = Vec::new();
    let mut off_taxonomy = 0usize;

    for row in csv_reader.records() {
        let row = row?;
        let line = row.position().map(|p| p.line()).unwrap_or(0);
        let record = columns.parse_row(&row, line)?;

        if !CategoryTaxonomy::contains(record.category, &record.sub_category) {
            off_taxonomy += 1;
        }
        records.push(record);
    }

    if off_taxonomy > 0 {
        warn!(
            "{} records carry a subcategory outside their category's taxonomy; \
             they will never match a subcategory filter",
            off_taxonomy
        );
    }

    Ok(records)
}

/// Parse an order date in any of the formats seen in Superstore exports.
///
/// Slash dates are month-first (`11/8/2016`, `11/8/16`); dash dates are
/// ISO (`2016-11-08`) when the first field has four digits and day-first
/// (`08-11-2016`) otherwise. A trailing time component is ignored.
pub fn parse_order_date(value: &str) -> Option<NaiveDate> {
    let date_part = value.split_whitespace().next()?;

    if date_part.contains('/') {
        let year = date_part.rsplit('/').next()?;
        let format = if year.len() == 2 { "%m/%d/%y" } else { "%m/%d/%Y" };
        return NaiveDate::parse_from_str(date_part, format).ok();
    }

    let first = date_part.split('-').next()?;
    let format = if first.len() == 4 { "%Y-%m-%d" } else { "%d-%m-%Y" };
    NaiveDate::parse_from_str(date_part, format).ok()
}

/// Parse a decimal amount. Accepts plain (`-383.031`) and scientific
/// (`1.2e3`) notation.
pub fn parse_amount(value: &str) -> Option<Decimal> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed
        .parse::<Decimal>()
        .ok()
        .or_else(|| Decimal::from_scientific(trimmed).ok())
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Positions of the required columns within the header row.
struct ColumnIndex {
    order_date: usize,
    category: usize,
    sub_category: usize,
    sales: usize,
    profit: usize,
}

impl ColumnIndex {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| DashboardError::MissingColumn(name.to_string()))
        };
        Ok(Self {
            order_date: find(ORDER_DATE_COLUMN)?,
            category: find(CATEGORY_COLUMN)?,
            sub_category: find(SUB_CATEGORY_COLUMN)?,
            sales: find(SALES_COLUMN)?,
            profit: find(PROFIT_COLUMN)?,
        })
    }

    fn parse_row(&self, row: &StringRecord, line: u64) -> Result<SalesRecord> {
        let field = |idx: usize| row.get(idx).unwrap_or("");

        let raw_date = field(self.order_date);
        let order_date = parse_order_date(raw_date).ok_or_else(|| DashboardError::DateParse {
            line,
            value: raw_date.to_string(),
        })?;

        let category: Category = field(self.category).parse()?;

        let amount = |idx: usize| {
            let raw = field(idx);
            parse_amount(raw).ok_or_else(|| DashboardError::AmountParse {
                line,
                value: raw.to_string(),
            })
        };

        Ok(SalesRecord {
            order_date,
            category,
            sub_category: field(self.sub_category).to_string(),
            sales: amount(self.sales)?,
            profit: amount(self.profit)?,
        })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE_CSV: &str = "\
Row_ID,Order_ID,Order_Date,Ship_Date,Customer_Name,Category,Sub_Category,Sales,Quantity,Discount,Profit
1,CA-2016-152156,11/8/2016,11/11/2016,Claire Gute,Furniture,Bookcases,261.96,2,0,41.9136
2,CA-2016-152156,11/8/2016,11/11/2016,Claire Gute,Furniture,Chairs,731.94,3,0,219.582
3,CA-2016-138688,6/12/2016,6/16/2016,Darrin Van Huff,Office Supplies,Labels,14.62,2,0,6.8714
4,US-2015-108966,10/11/2015,10/18/2015,Sean O'Donnell,Furniture,Tables,957.5775,5,0.45,-383.031
5,US-2015-108966,10/11/2015,10/18/2015,Sean O'Donnell,Technology,Phones,907.152,6,0.2,90.7152
";

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_read_sample_csv() {
        let records = read_sales_records(SAMPLE_CSV.as_bytes()).unwrap();
        assert_eq!(records.len(), 5);

        assert_eq!(
            records[0].order_date,
            NaiveDate::from_ymd_opt(2016, 11, 8).unwrap()
        );
        assert_eq!(records[0].category, Category::Furniture);
        assert_eq!(records[0].sub_category, "Bookcases");
        assert_eq!(records[0].sales, dec("261.96"));
        assert_eq!(records[2].category, Category::OfficeSupplies);
        assert_eq!(records[3].profit, dec("-383.031"));
    }

    #[test]
    fn test_read_trims_whitespace() {
        let csv = "Order_Date,Category,Sub_Category,Sales,Profit\n 1/5/2017 , Technology , Copiers , 10.5 , 2 \n";
        let records = read_sales_records(csv.as_bytes()).unwrap();
        assert_eq!(records[0].sub_category, "Copiers");
        assert_eq!(records[0].sales, dec("10.5"));
    }

    #[test]
    fn test_read_quoted_fields_with_commas() {
        let csv = "Order_Date,Customer_Name,Category,Sub_Category,Sales,Profit\n\
                   2016-03-01,\"Smith, Jane\",Office Supplies,Paper,\"12.00\",3\n";
        let records = read_sales_records(csv.as_bytes()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].sub_category, "Paper");
    }

    #[test]
    fn test_missing_column_is_reported() {
        let csv = "Order_Date,Category,Sales,Profit\n1/1/2016,Furniture,1,1\n";
        let err = read_sales_records(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, DashboardError::MissingColumn(ref c) if c == "Sub_Category"));
    }

    #[test]
    fn test_malformed_date_reports_line() {
        let csv = "Order_Date,Category,Sub_Category,Sales,Profit\n\
                   1/1/2016,Furniture,Chairs,1,1\n\
                   not-a-date,Furniture,Chairs,1,1\n";
        let err = read_sales_records(csv.as_bytes()).unwrap_err();
        match err {
            DashboardError::DateParse { line, value } => {
                assert_eq!(line, 3);
                assert_eq!(value, "not-a-date");
            }
            other => panic!("expected DateParse, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_amount_is_reported() {
        let csv = "Order_Date,Category,Sub_Category,Sales,Profit\n1/1/2016,Furniture,Chairs,abc,1\n";
        let err = read_sales_records(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, DashboardError::AmountParse { line: 2, .. }));
    }

    #[test]
    fn test_unknown_category_is_reported() {
        let csv = "Order_Date,Category,Sub_Category,Sales,Profit\n1/1/2016,Toys,Dolls,1,1\n";
        let err = read_sales_records(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, DashboardError::UnknownCategory(_)));
    }

    #[test]
    fn test_off_taxonomy_subcategory_is_kept() {
        let csv = "Order_Date,Category,Sub_Category,Sales,Profit\n1/1/2016,Furniture,Lamps,5,1\n";
        let records = read_sales_records(csv.as_bytes()).unwrap();
        assert_eq!(records[0].sub_category, "Lamps");
    }

    #[test]
    fn test_empty_file_with_header_only() {
        let csv = "Order_Date,Category,Sub_Category,Sales,Profit\n";
        let records = read_sales_records(csv.as_bytes()).unwrap();
        assert!(records.is_empty());
    }

    // ── parse_order_date ──────────────────────────────────────────────────────

    #[test]
    fn test_parse_order_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2016, 11, 8);
        assert_eq!(parse_order_date("11/8/2016"), expected);
        assert_eq!(parse_order_date("11/08/16"), expected);
        assert_eq!(parse_order_date("2016-11-08"), expected);
        assert_eq!(parse_order_date("08-11-2016"), expected);
        assert_eq!(parse_order_date("2016-11-08 00:00:00"), expected);
    }

    #[test]
    fn test_parse_order_date_invalid() {
        assert_eq!(parse_order_date(""), None);
        assert_eq!(parse_order_date("13/40/2016"), None);
        assert_eq!(parse_order_date("yesterday"), None);
    }

    // ── parse_amount ──────────────────────────────────────────────────────────

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("261.96"), Some(dec("261.96")));
        assert_eq!(parse_amount("-383.031"), Some(dec("-383.031")));
        assert_eq!(parse_amount("1.5e2"), Some(dec("150")));
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("n/a"), None);
    }

    // ── load_sales_records ────────────────────────────────────────────────────

    #[test]
    fn test_load_sales_records_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(SAMPLE_CSV.as_bytes()).unwrap();

        let records = load_sales_records(file.path()).unwrap();
        assert_eq!(records.len(), 5);
    }

    #[test]
    fn test_load_sales_records_missing_file() {
        let err = load_sales_records(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, DashboardError::DataPathNotFound(_)));
    }
}
