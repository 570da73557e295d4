use crate::io::{Delimiter, IMAGE_COLUMNS, PIXEL_LENGTH_COLUMNS, SCALE_COLUMNS, error::Error};
use crate::model::tem::RawRow;
use std::io::BufRead;

const UTF8_BOM: char = '\u{feff}';

struct Columns {
    pixel_length: usize,
    scale: usize,
    image: usize,
}

/// Reads a TEM table whose first non-blank line is the header.
///
/// Blank lines and rows whose cells are all empty are skipped. Empty cells
/// are absent values.
pub fn read_table<R: BufRead>(reader: R) -> Result<Vec<RawRow>, Error> {
    let lines = collect_lines(reader)?;
    let Some(((header_no, header), body)) = lines.split_first() else {
        return Err(Error::EmptyInput);
    };

    let delimiter = Delimiter::detect(header);
    let header_cells = split_record(header, delimiter, *header_no)?;
    let columns = locate_columns(&header_cells)?;

    let mut rows = Vec::with_capacity(body.len());
    for (ln, raw) in body {
        let cells = split_record(raw, delimiter, *ln)?;
        if cells.iter().all(|c| c.trim().is_empty()) {
            continue;
        }
        rows.push(parse_row(&cells, &columns, delimiter, *ln)?);
    }
    Ok(rows)
}

fn collect_lines<R: BufRead>(reader: R) -> Result<Vec<(usize, String)>, Error> {
    let mut lines = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let content = line.map_err(|e| Error::Io { source: e })?;
        let content = if i == 0 {
            content.trim_start_matches(UTF8_BOM).to_string()
        } else {
            content
        };
        if content.trim().is_empty() {
            continue;
        }
        lines.push((i + 1, content));
    }
    Ok(lines)
}

fn locate_columns(header: &[String]) -> Result<Columns, Error> {
    let find = |names: &[&str]| {
        header
            .iter()
            .position(|cell| names.iter().any(|n| cell.trim().eq_ignore_ascii_case(n)))
    };

    Ok(Columns {
        pixel_length: find(PIXEL_LENGTH_COLUMNS)
            .ok_or(Error::MissingColumn(PIXEL_LENGTH_COLUMNS[0]))?,
        scale: find(SCALE_COLUMNS).ok_or(Error::MissingColumn(SCALE_COLUMNS[0]))?,
        image: find(IMAGE_COLUMNS).ok_or(Error::MissingColumn(IMAGE_COLUMNS[0]))?,
    })
}

fn parse_row(
    cells: &[String],
    columns: &Columns,
    delimiter: Delimiter,
    ln: usize,
) -> Result<RawRow, Error> {
    let cell = |idx: usize| {
        cells
            .get(idx)
            .map(|c| c.trim())
            .filter(|c| !c.is_empty())
    };

    let pixel_length = cell(columns.pixel_length)
        .ok_or_else(|| Error::parse(delimiter, ln, "missing pixel length"))?;
    let pixel_length = pixel_length.parse::<f64>().map_err(|_| {
        Error::parse(
            delimiter,
            ln,
            format!("invalid pixel length '{pixel_length}'"),
        )
    })?;

    let scale = cell(columns.scale)
        .map(|s| {
            s.parse::<f64>()
                .map_err(|_| Error::parse(delimiter, ln, format!("invalid scale '{s}'")))
        })
        .transpose()?;

    let image_id = cell(columns.image).map(str::to_string);

    Ok(RawRow {
        pixel_length,
        scale,
        image_id,
    })
}

fn split_record(line: &str, delimiter: Delimiter, ln: usize) -> Result<Vec<String>, Error> {
    let sep = delimiter.as_char();
    let mut cells = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            c if c == sep && !in_quotes => cells.push(std::mem::take(&mut current)),
            c => current.push(c),
        }
    }

    if in_quotes {
        return Err(Error::parse(delimiter, ln, "unterminated quoted field"));
    }

    cells.push(current);
    Ok(cells)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn read(text: &str) -> Result<Vec<RawRow>, Error> {
        read_table(Cursor::new(text))
    }

    #[test]
    fn reads_calibration_and_measurement_rows() {
        let rows = read("img,scale,length\nimg1,50,100\n,,40\n,,20\n").unwrap();
        assert_eq!(
            rows,
            vec![
                RawRow::calibration(100.0, 50.0, "img1"),
                RawRow::measurement(40.0),
                RawRow::measurement(20.0),
            ]
        );
    }

    #[test]
    fn columns_are_found_by_name_in_any_order() {
        let rows = read("Length;Image_ID;Notes;Scale\n100;a.tif;bar;50\n40;;;\n").unwrap();
        assert_eq!(rows[0], RawRow::calibration(100.0, 50.0, "a.tif"));
        assert_eq!(rows[1], RawRow::measurement(40.0));
    }

    #[test]
    fn reads_tab_separated_with_bom_and_blank_lines() {
        let text = "\u{feff}img\tscale\tlength\n\nimg1\t50\t100\n\t\t\n\t\t40\n";
        let rows = read(text).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], RawRow::measurement(40.0));
    }

    #[test]
    fn quoted_cells_may_contain_delimiters() {
        let rows = read("img,scale,length\n\"grid 3, \"\"A\"\"\",50,100\n").unwrap();
        assert_eq!(rows[0].image_id.as_deref(), Some("grid 3, \"A\""));
    }

    #[test]
    fn missing_column_is_reported() {
        let err = read("img,length\nimg1,100\n").unwrap_err();
        assert!(matches!(err, Error::MissingColumn("scale")));
    }

    #[test]
    fn invalid_number_reports_line() {
        let err = read("img,scale,length\nimg1,50,100\n,,abc\n").unwrap_err();
        match err {
            Error::Parse { line, details, .. } => {
                assert_eq!(line, 3);
                assert!(details.contains("abc"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_pixel_length_is_an_error() {
        let err = read("img,scale,length\nimg1,50,\n").unwrap_err();
        assert!(matches!(err, Error::Parse { line: 2, .. }));
    }

    #[test]
    fn unterminated_quote_is_an_error() {
        let err = read("img,scale,length\n\"img1,50,100\n").unwrap_err();
        assert!(matches!(err, Error::Parse { line: 2, .. }));
    }

    #[test]
    fn empty_input_has_no_header() {
        assert!(matches!(read("\n\n").unwrap_err(), Error::EmptyInput));
    }
}
