use chrono::{DateTime, Local};

use crate::locale::Locale;
use crate::scoring::{ResponseSet, ScoreReport, ITEMS};

/// UTF-8 byte-order mark, so spreadsheet tools detect the encoding.
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// One exported result: timestamp, four scores, nine raw answers.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRecord {
    pub timestamp: DateTime<Local>,
    pub report: ScoreReport,
    pub answers: Vec<(u8, u8)>,
}

impl ExportRecord {
    pub fn new(timestamp: DateTime<Local>, report: &ScoreReport, responses: &ResponseSet) -> Self {
        Self {
            timestamp,
            report: *report,
            answers: responses.iter().collect(),
        }
    }

    /// Default file name, e.g. `uwes_result_20240501_093000.csv`
    pub fn file_name(&self) -> String {
        format!("uwes_result_{}.csv", self.timestamp.format("%Y%m%d_%H%M%S"))
    }

    pub fn header(locale: Locale) -> Vec<String> {
        let mut columns: Vec<String> = match locale {
            Locale::En => vec![
                "Timestamp",
                "Overall Score",
                "Vigor Score",
                "Dedication Score",
                "Absorption Score",
            ],
            Locale::Ja => vec![
                "診断日時",
                "総合スコア",
                "活力スコア",
                "熱意スコア",
                "没頭スコア",
            ],
        }
        .into_iter()
        .map(String::from)
        .collect();
        columns.extend(ITEMS.iter().map(|item| item.short_ref()));
        columns
    }

    pub fn row(&self) -> Vec<String> {
        let mut fields = vec![
            self.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            format_float(self.report.overall),
            format_float(self.report.vigor),
            format_float(self.report.dedication),
            format_float(self.report.absorption),
        ];
        fields.extend(self.answers.iter().map(|(_, value)| value.to_string()));
        fields
    }

    /// Header plus one data row, newline terminated.
    pub fn to_csv(&self, locale: Locale) -> String {
        let mut out = String::new();
        out.push_str(&join_record(&Self::header(locale)));
        out.push('\n');
        out.push_str(&join_record(&self.row()));
        out.push('\n');
        out
    }

    /// CSV bytes prefixed with the UTF-8 BOM.
    pub fn to_bytes(&self, locale: Locale) -> Vec<u8> {
        let csv = self.to_csv(locale);
        let mut bytes = Vec::with_capacity(UTF8_BOM.len() + csv.len());
        bytes.extend_from_slice(UTF8_BOM);
        bytes.extend_from_slice(csv.as_bytes());
        bytes
    }
}

/// Shortest round-trip representation, always with a fractional part
/// ("2.0", "3.3333333333333335").
fn format_float(value: f64) -> String {
    format!("{:?}", value)
}

fn join_record(fields: &[String]) -> String {
    fields
        .iter()
        .map(|f| escape_field(f))
        .collect::<Vec<_>>()
        .join(",")
}

fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::compute_scores;
    use chrono::TimeZone;

    fn sample_record() -> ExportRecord {
        let responses = ResponseSet::from([6, 6, 0, 0, 6, 0, 0, 0, 1]);
        let report = compute_scores(&responses).unwrap();
        let timestamp = Local.with_ymd_and_hms(2024, 5, 1, 9, 30, 5).unwrap();
        ExportRecord::new(timestamp, &report, &responses)
    }

    #[test]
    fn test_header_columns() {
        let header = ExportRecord::header(Locale::En);
        assert_eq!(header.len(), 14);
        assert_eq!(header[0], "Timestamp");
        assert_eq!(header[4], "Absorption Score");
        assert_eq!(header[5], "Q1");
        assert_eq!(header[13], "Q9");
    }

    #[test]
    fn test_japanese_header() {
        let header = ExportRecord::header(Locale::Ja);
        assert_eq!(header[0], "診断日時");
        assert_eq!(header[1], "総合スコア");
    }

    #[test]
    fn test_csv_layout() {
        let csv = sample_record().to_csv(Locale::En);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            "Timestamp,Overall Score,Vigor Score,Dedication Score,Absorption Score,\
             Q1,Q2,Q3,Q4,Q5,Q6,Q7,Q8,Q9"
        );
        assert_eq!(
            lines[1],
            "2024-05-01 09:30:05,2.111111111111111,6.0,0.0,0.3333333333333333,6,6,0,0,6,0,0,0,1"
        );
        assert!(csv.ends_with('\n'));
    }

    #[test]
    fn test_bytes_start_with_bom() {
        let bytes = sample_record().to_bytes(Locale::Ja);
        assert_eq!(&bytes[..3], UTF8_BOM);
        let text = std::str::from_utf8(&bytes[3..]).unwrap();
        assert!(text.starts_with("診断日時,"));
    }

    #[test]
    fn test_file_name() {
        assert_eq!(sample_record().file_name(), "uwes_result_20240501_093005.csv");
    }

    #[test]
    fn test_escape_field() {
        assert_eq!(escape_field("plain"), "plain");
        assert_eq!(escape_field("a,b"), "\"a,b\"");
        assert_eq!(escape_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }
}
