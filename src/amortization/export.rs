//! CSV export of a schedule

use super::AmortizationRow;
use crate::error::Result;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Write rows as `month,opening,payment,interest,principal,closing`
pub fn write_schedule_csv<W: Write>(writer: W, rows: &[AmortizationRow]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn write_schedule_csv_path<P: AsRef<Path>>(path: P, rows: &[AmortizationRow]) -> Result<()> {
    let file = File::create(path)?;
    write_schedule_csv(file, rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amortization::generate_amortization_table;

    #[test]
    fn test_header_and_row_count() {
        let rows = generate_amortization_table(120_000.0, 0.0, 1);
        let mut buffer = Vec::new();
        write_schedule_csv(&mut buffer, &rows).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("month,opening,payment,interest,principal,closing")
        );
        assert_eq!(lines.count(), 12);
        assert!(text.contains("\n1,120000.0,10000.0,0.0,10000.0,110000.0\n"));
    }
}
