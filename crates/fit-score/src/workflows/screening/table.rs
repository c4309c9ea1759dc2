use super::normalizer::clean_header;
use std::collections::HashSet;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

const CANDIDATE_DELIMITERS: [u8; 3] = [b',', b';', b'\t'];

#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("failed to open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("table I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("table has no header row")]
    MissingHeader,
}

/// Header-addressed table of raw string cells.
///
/// Every row holds exactly one cell per header; short rows are padded with empty cells
/// and surplus cells are dropped.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, String::new());
                row
            })
            .collect();
        Self { headers, rows }
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, TableError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| TableError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, TableError> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;

        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(sniff_delimiter(&bytes))
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(bytes.as_slice());

        let raw_headers: Vec<String> = csv_reader
            .byte_headers()?
            .iter()
            .map(|field| clean_header(&String::from_utf8_lossy(field)))
            .collect();
        if raw_headers.iter().all(|header| header.is_empty()) {
            return Err(TableError::MissingHeader);
        }

        // Duplicate headers keep their first column only.
        let mut seen = HashSet::new();
        let kept: Vec<usize> = raw_headers
            .iter()
            .enumerate()
            .filter(|(_, header)| seen.insert(header.as_str()))
            .map(|(index, _)| index)
            .collect();
        let headers = kept.iter().map(|&index| raw_headers[index].clone()).collect();

        let mut rows = Vec::new();
        for record in csv_reader.byte_records() {
            let record = record?;
            if record.iter().all(|field| field.is_empty()) {
                continue;
            }
            let row = kept
                .iter()
                .map(|&index| {
                    record
                        .get(index)
                        .map(|field| String::from_utf8_lossy(field).into_owned())
                        .unwrap_or_default()
                })
                .collect();
            rows.push(row);
        }

        Ok(Self { headers, rows })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Locate a header, preferring an exact match over a case-insensitive one.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        let name = clean_header(name);
        self.headers
            .iter()
            .position(|header| *header == name)
            .or_else(|| {
                self.headers
                    .iter()
                    .position(|header| header.eq_ignore_ascii_case(&name))
            })
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(column))
            .map(String::as_str)
    }

    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), TableError> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(&self.headers)?;
        for row in &self.rows {
            csv_writer.write_record(row)?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}

fn sniff_delimiter(bytes: &[u8]) -> u8 {
    let header_line = bytes
        .split(|&byte| byte == b'\n')
        .next()
        .unwrap_or_default();

    CANDIDATE_DELIMITERS
        .iter()
        .map(|&delimiter| {
            let count = header_line.iter().filter(|&&byte| byte == delimiter).count();
            (delimiter, count)
        })
        .filter(|(_, count)| *count > 0)
        .max_by_key(|(_, count)| *count)
        .map(|(delimiter, _)| delimiter)
        .unwrap_or(b',')
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn reads_headers_and_pads_short_rows() {
        let table = Table::from_reader(Cursor::new(
            "Email, Organisation ,Motivation\njane@example.com,Ministry\n",
        ))
        .expect("table parses");

        assert_eq!(table.headers(), ["Email", "Organisation", "Motivation"]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.cell(0, 1), Some("Ministry"));
        assert_eq!(table.cell(0, 2), Some(""));
    }

    #[test]
    fn sniffs_semicolon_delimiter() {
        let table = Table::from_reader(Cursor::new("Email;Role\na@b.org;Analyst\n"))
            .expect("table parses");
        assert_eq!(table.headers(), ["Email", "Role"]);
        assert_eq!(table.cell(0, 1), Some("Analyst"));
    }

    #[test]
    fn duplicate_headers_keep_first_column() {
        let table = Table::from_reader(Cursor::new("Email,Role,Role\na@b.org,Analyst,Intern\n"))
            .expect("table parses");
        assert_eq!(table.headers(), ["Email", "Role"]);
        assert_eq!(table.cell(0, 1), Some("Analyst"));
    }

    #[test]
    fn strips_bom_and_skips_blank_lines() {
        let table = Table::from_reader(Cursor::new(
            "\u{feff}Email,Role\n\n,\na@b.org,Analyst\n",
        ))
        .expect("table parses");
        assert_eq!(table.headers()[0], "Email");
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn invalid_utf8_is_decoded_lossily() {
        let bytes: Vec<u8> = b"Email,Org\na@b.org,Caf\xe9 Ltd\n".to_vec();
        let table = Table::from_reader(Cursor::new(bytes)).expect("table parses");
        assert!(table.cell(0, 1).expect("cell").starts_with("Caf"));
    }

    #[test]
    fn empty_input_has_no_header() {
        let error = Table::from_reader(Cursor::new("")).expect_err("no header");
        assert!(matches!(error, TableError::MissingHeader));
    }

    #[test]
    fn column_lookup_falls_back_to_case_insensitive() {
        let table = Table::new(vec!["Email".to_string()], vec![]);
        assert_eq!(table.column_index("Email"), Some(0));
        assert_eq!(table.column_index("email"), Some(0));
        assert_eq!(table.column_index("Mail"), None);
    }

    #[test]
    fn from_path_reports_missing_file() {
        let error = Table::from_path("./does-not-exist.csv").expect_err("missing file");
        assert!(matches!(error, TableError::Open { .. }));
    }
}
