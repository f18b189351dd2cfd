// src/report/mod.rs
use chrono::{NaiveDate, NaiveTime};
use tracing::{debug, instrument};

use crate::table::{ColumnIndex, RawTable};

pub mod columns;
pub mod dates;

use columns::{
    DatePart, Mapping, CLIENT_NAME, COOP_RETAILER, COOP_SITE_PREFIX, DATE_OF_VISIT, JUUL_CLIENT,
    PRIMARY_RESULT, REPORT_COLUMNS, RETAILER, SITE_CODE, TIME_OF_VISIT,
};
use dates::{month_field, most_recent_saturday, parse_visit_date, parse_visit_time, year_field};

/// Suggested filename for the emitted report.
pub const REPORT_FILE_NAME: &str = "Juul Co-op Raw Data.csv";

/// One export row that survived filtering, plus its parsed sort keys and the
/// fields derived for the report. Parse helpers never reach the output.
struct WorkRow {
    fields: Vec<String>,
    visit_date: Option<NaiveDate>,
    visit_time: Option<NaiveTime>,
    month: String,
    year: String,
}

/// Build the Co-op report table from a raw audit export.
///
/// Pure function of the table and the reference date: the CLI passes today's
/// local date, tests pass a fixed one. Row-level problems are never errors.
/// Unknown site codes, unparseable visit dates and visits after the cutoff
/// drop silently; missing fields project as empty strings.
#[instrument(skip(export), fields(rows = export.rows.len()))]
pub fn build_report(export: &RawTable, today: NaiveDate) -> RawTable {
    let idx = ColumnIndex::new(&export.headers);
    let boundary = most_recent_saturday(today);
    debug!(%boundary, "reporting cutoff");

    // 1) keep Co-op trading-compliance audits only (raw prefix test, no trim)
    // 2) parse visit dates day-first; unparseable values become null
    // 3) drop rows after the boundary; null dates can never satisfy it
    let mut kept: Vec<WorkRow> = Vec::new();
    for fields in &export.rows {
        if !idx.field(fields, SITE_CODE).starts_with(COOP_SITE_PREFIX) {
            continue;
        }
        let visit_date = parse_visit_date(idx.field(fields, DATE_OF_VISIT));
        match visit_date {
            Some(d) if d <= boundary => {}
            _ => continue,
        }
        let visit_time = parse_visit_time(idx.field(fields, TIME_OF_VISIT));
        kept.push(WorkRow {
            fields: fields.clone(),
            visit_date,
            visit_time,
            month: String::new(),
            year: String::new(),
        });
    }
    debug!(
        kept = kept.len(),
        dropped = export.rows.len() - kept.len(),
        "filtered export rows"
    );

    // 4) derive the report-facing fields. The retailer is the raw client
    // name, except the exact value "Juul" reports as the Co-op group; it
    // overwrites an existing Retailer column or lands in an appended one.
    let mut headers = export.headers.clone();
    let retailer_at = match idx.position(RETAILER) {
        Some(i) => i,
        None => {
            headers.push(RETAILER.to_string());
            headers.len() - 1
        }
    };
    let result_at = idx.position(PRIMARY_RESULT);
    for row in &mut kept {
        let client = idx.field(&row.fields, CLIENT_NAME);
        let retailer = if client == JUUL_CLIENT {
            COOP_RETAILER.to_string()
        } else {
            client.to_string()
        };
        // a row shorter than the header pads out so the derived field
        // lands under its own column
        if row.fields.len() <= retailer_at {
            row.fields.resize(retailer_at + 1, String::new());
        }
        row.fields[retailer_at] = retailer;
        if let Some(cell) = result_at.and_then(|i| row.fields.get_mut(i)) {
            *cell = cell.to_uppercase();
        }
        row.month = month_field(row.visit_date);
        row.year = year_field(row.visit_date);
    }

    // 5) stable chronological sort; a null time orders before valid times
    kept.sort_by_key(|row| (row.visit_date, row.visit_time));

    // 6) project into the fixed report layout
    let out_idx = ColumnIndex::new(&headers);
    let out_headers: Vec<String> = REPORT_COLUMNS.iter().map(|c| c.name.to_string()).collect();
    let out_rows: Vec<Vec<String>> = kept
        .iter()
        .map(|row| {
            REPORT_COLUMNS
                .iter()
                .map(|col| match col.mapping {
                    Mapping::Blank => String::new(),
                    Mapping::Source(name) => out_idx.field(&row.fields, name).trim().to_string(),
                    Mapping::Synthesized(DatePart::Month) => row.month.clone(),
                    Mapping::Synthesized(DatePart::Year) => row.year.clone(),
                })
                .collect()
        })
        .collect();
    debug!(rows = out_rows.len(), "projected report rows");

    RawTable {
        headers: out_headers,
        rows: out_rows,
    }
}
