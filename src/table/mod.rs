// src/table/mod.rs
use anyhow::{bail, Context, Result};
use csv::ReaderBuilder;
use std::{
    collections::HashMap,
    fs::{self, File},
    io::{BufWriter, Write},
    path::Path,
};

/// UTF-8 byte-order mark. The downstream spreadsheet tool needs it on the
/// report, and exports produced by the same tool often carry one.
pub const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// An in-memory delimited table: one header row plus string-valued rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTable {
    /// Column names, from the header row of the CSV file.
    pub headers: Vec<String>,
    /// Each data row, as a Vec of Strings (one per field).
    pub rows: Vec<Vec<String>>,
}

/// Name → position lookup over a header row. Duplicate names resolve to the
/// first occurrence; a missing column reads as the empty string.
pub struct ColumnIndex<'h> {
    positions: HashMap<&'h str, usize>,
}

impl<'h> ColumnIndex<'h> {
    pub fn new(headers: &'h [String]) -> Self {
        let mut positions = HashMap::with_capacity(headers.len());
        for (i, name) in headers.iter().enumerate() {
            positions.entry(name.as_str()).or_insert(i);
        }
        Self { positions }
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }

    /// The value of `name` in `fields`, or `""` when the column is absent.
    pub fn field<'r>(&self, fields: &'r [String], name: &str) -> &'r str {
        self.position(name)
            .and_then(|i| fields.get(i))
            .map(String::as_str)
            .unwrap_or("")
    }
}

/// Parse an in-memory CSV buffer into a [`RawTable`].
///
/// A leading UTF-8 BOM is stripped before parsing. Field counts are strict:
/// a row with more or fewer fields than the header is a malformed table and
/// aborts the run, as does missing or non-UTF-8 content. Empty cells come
/// through as empty strings.
pub fn parse_csv_table(bytes: &[u8]) -> Result<RawTable> {
    let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);

    let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(body);

    let headers: Vec<String> = rdr
        .headers()
        .context("reading CSV header row")?
        .iter()
        .map(str::to_string)
        .collect();
    if headers.is_empty() {
        bail!("input has no header row");
    }

    let mut rows = Vec::new();
    for (idx, result) in rdr.records().enumerate() {
        let record = result.with_context(|| format!("CSV parse error at record {}", idx))?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(RawTable { headers, rows })
}

/// Read and parse a CSV file from disk. The only hard failure in the whole
/// pipeline: anything wrong here aborts before any transform stage runs.
pub fn read_csv_table<P: AsRef<Path>>(path: P) -> Result<RawTable> {
    let path = path.as_ref();
    let bytes =
        fs::read(path).with_context(|| format!("Failed to read export file {}", path.display()))?;
    parse_csv_table(&bytes).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Write `table` as CSV: UTF-8 BOM first, then the header row, then one
/// record per row. Fields are quoted only when they need to be.
pub fn write_csv<W: Write>(table: &RawTable, mut out: W) -> Result<()> {
    out.write_all(UTF8_BOM).context("writing byte-order mark")?;
    {
        let mut wtr = csv::Writer::from_writer(&mut out);
        wtr.write_record(&table.headers)
            .context("writing header row")?;
        for row in &table.rows {
            wtr.write_record(row).context("writing data row")?;
        }
        wtr.flush().context("flushing CSV writer")?;
    }
    out.flush().context("flushing output")?;
    Ok(())
}

pub fn write_csv_table<P: AsRef<Path>>(table: &RawTable, path: P) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)
        .with_context(|| format!("Failed to create output file {}", path.display()))?;
    write_csv(table, BufWriter::new(file))
        .with_context(|| format!("Failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;
    use tempfile::NamedTempFile;

    fn sample() -> RawTable {
        RawTable {
            headers: vec!["site_code".into(), "client_name".into()],
            rows: vec![
                vec!["CoopTCG001".into(), "Juul".into()],
                vec!["CoopTCG002".into(), "says \"hi\", twice".into()],
            ],
        }
    }

    #[test]
    fn parses_header_and_rows() {
        let table = parse_csv_table(b"a,b\n1,2\n3,4\n").unwrap();
        assert_eq!(table.headers, vec!["a", "b"]);
        assert_eq!(table.rows, vec![vec!["1", "2"], vec!["3", "4"]]);
    }

    #[test]
    fn strips_leading_bom() {
        let table = parse_csv_table(b"\xef\xbb\xbfa,b\n1,2\n").unwrap();
        assert_eq!(table.headers[0], "a");
    }

    #[test]
    fn handles_quoted_fields() {
        let table = parse_csv_table(b"a,b\n\"one, two\",\"say \"\"hi\"\"\"\n").unwrap();
        assert_eq!(table.rows[0][0], "one, two");
        assert_eq!(table.rows[0][1], "say \"hi\"");
    }

    #[test]
    fn empty_cells_read_as_empty_strings() {
        let table = parse_csv_table(b"a,b,c\n1,,\n").unwrap();
        assert_eq!(table.rows[0], vec!["1", "", ""]);
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(parse_csv_table(b"").is_err());
        assert!(parse_csv_table(b"\xef\xbb\xbf").is_err());
    }

    #[test]
    fn ragged_rows_are_rejected() {
        assert!(parse_csv_table(b"a,b\n1\n").is_err());
        assert!(parse_csv_table(b"a,b\n1,2,3\n").is_err());
    }

    #[test]
    fn invalid_utf8_is_rejected() {
        assert!(parse_csv_table(b"a,b\n\xff\xfe,2\n").is_err());
    }

    #[test]
    fn reads_from_disk() {
        let mut tmp = NamedTempFile::new().unwrap();
        tmp.write_all(b"site_code,client_name\nCoopTCG001,Juul\n")
            .unwrap();
        let table = read_csv_table(tmp.path()).unwrap();
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0][0], "CoopTCG001");
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_csv_table(dir.path().join("nope.csv")).is_err());
    }

    #[test]
    fn written_output_starts_with_bom_and_round_trips() {
        let table = sample();
        let mut buf = Vec::new();
        write_csv(&table, &mut buf).unwrap();

        assert!(buf.starts_with(UTF8_BOM));
        assert_eq!(parse_csv_table(&buf).unwrap(), table);
    }

    #[test]
    fn writes_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        write_csv_table(&sample(), &path).unwrap();

        let bytes = fs::read(&path).unwrap();
        assert!(bytes.starts_with(UTF8_BOM));
        assert_eq!(parse_csv_table(&bytes).unwrap(), sample());
    }

    #[test]
    fn column_index_first_of_duplicate_wins() {
        let headers: Vec<String> = vec!["a".into(), "b".into(), "a".into()];
        let idx = ColumnIndex::new(&headers);
        assert_eq!(idx.position("a"), Some(0));
        assert_eq!(idx.position("b"), Some(1));
    }

    #[test]
    fn column_index_missing_reads_empty() {
        let headers: Vec<String> = vec!["a".into()];
        let idx = ColumnIndex::new(&headers);
        let row: Vec<String> = vec!["x".into()];
        assert_eq!(idx.field(&row, "a"), "x");
        assert_eq!(idx.field(&row, "missing"), "");
    }
}
