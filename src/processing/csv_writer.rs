use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

/// Write named columns to a CSV file. Columns of different lengths are
/// padded with empty cells.
pub fn write_columns<P: AsRef<Path>>(
    path: P,
    headers: &[&str],
    columns: &[&[f64]],
) -> io::Result<()> {
    if headers.len() != columns.len() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!(
                "header count ({}) does not match column count ({})",
                headers.len(),
                columns.len()
            ),
        ));
    }

    let mut file = File::create(path)?;
    writeln!(file, "{}", headers.join(","))?;

    let rows = columns.iter().map(|col| col.len()).max().unwrap_or(0);
    for row in 0..rows {
        let line: Vec<String> = columns
            .iter()
            .map(|col| {
                col.get(row)
                    .map(|v| format!("{v:.15e}"))
                    .unwrap_or_default()
            })
            .collect();
        writeln!(file, "{}", line.join(","))?;
    }
    Ok(())
}

/// Convenience wrapper for an (x, y) pair of equal length.
pub fn write_xy<P: AsRef<Path>>(
    path: P,
    x_header: &str,
    y_header: &str,
    x: &[f64],
    y: &[f64],
) -> io::Result<()> {
    if x.len() != y.len() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("x and y lengths differ ({} vs {})", x.len(), y.len()),
        ));
    }
    write_columns(path, &[x_header, y_header], &[x, y])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn writes_headers_and_rows() {
        let path = "csv_writer_test_output.csv";
        write_columns(
            path,
            &["t", "rear", "front"],
            &[&[0.0, 1.0], &[0.5, 0.6], &[0.7]],
        )
        .unwrap();

        let content = fs::read_to_string(path).unwrap();
        assert!(content.starts_with("t,rear,front\n"));
        assert_eq!(content.lines().count(), 3);

        fs::remove_file(path).ok();
    }

    #[test]
    fn mismatched_headers_are_rejected() {
        assert!(write_columns("unused.csv", &["a"], &[&[1.0], &[2.0]]).is_err());
    }
}
