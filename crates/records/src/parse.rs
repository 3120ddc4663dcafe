//! Text parsing for point records.
//!
//! A record is one line of whitespace-separated decimal fields. Fields past
//! the ones requested are ignored.

use std::io::BufRead;

use crate::{Point2, Point3, RecordError};

/// Parse the first `N` whitespace-separated fields of a line.
fn parse_fields<const N: usize>(line: &str) -> Result<[f64; N], RecordError> {
    let mut values = [0.0; N];
    let mut fields = line.split_whitespace();
    for (i, slot) in values.iter_mut().enumerate() {
        let field = fields.next().ok_or(RecordError::MissingField {
            expected: N,
            found: i,
        })?;
        *slot = field.parse().map_err(|_| RecordError::InvalidNumber {
            field: i + 1,
            value: field.to_string(),
        })?;
    }
    Ok(values)
}

/// Parse an `easting northing height` line.
pub fn parse_point3(line: &str) -> Result<Point3, RecordError> {
    let [e, n, h] = parse_fields::<3>(line)?;
    Ok(Point3::new(e, n, h))
}

/// Parse an `easting northing` line.
pub fn parse_point2(line: &str) -> Result<Point2, RecordError> {
    let [e, n] = parse_fields::<2>(line)?;
    Ok(Point2::new(e, n))
}

/// Parse an `easting,northing` corner argument. Both values must be finite.
pub fn parse_corner(s: &str) -> Result<Point2, RecordError> {
    let invalid = || RecordError::InvalidCorner(s.to_string());
    let (e, n) = s.split_once(',').ok_or_else(invalid)?;
    let e: f64 = e.trim().parse().map_err(|_| invalid())?;
    let n: f64 = n.trim().parse().map_err(|_| invalid())?;
    if !(e.is_finite() && n.is_finite()) {
        return Err(invalid());
    }
    Ok(Point2::new(e, n))
}

/// Iterator over the point records of a line-oriented reader.
///
/// Each item is one parsed line. Parse failures carry the 1-based line
/// number; the caller decides whether to stop.
#[derive(Debug)]
pub struct PointReader<R> {
    reader: R,
    buf: String,
    line: usize,
}

impl<R: BufRead> PointReader<R> {
    /// Create a new reader over buffered input.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: String::new(),
            line: 0,
        }
    }

    /// Number of lines consumed so far.
    #[inline]
    pub fn line(&self) -> usize {
        self.line
    }

    /// Read the next raw line, without its terminator.
    fn next_line(&mut self) -> Option<Result<&str, RecordError>> {
        self.buf.clear();
        match self.reader.read_line(&mut self.buf) {
            Ok(0) => None,
            Ok(_) => {
                self.line += 1;
                Some(Ok(self.buf.trim_end_matches(['\n', '\r'])))
            }
            Err(e) => Some(Err(RecordError::Io(e))),
        }
    }

    /// Read the next line as a planar record.
    pub fn next_planar(&mut self) -> Option<Result<Point2, RecordError>> {
        let line = match self.next_line()? {
            Ok(line) => line,
            Err(e) => return Some(Err(e)),
        };
        let parsed = parse_point2(line);
        Some(parsed.map_err(|e| e.at_line(self.line)))
    }
}

impl<R: BufRead> Iterator for PointReader<R> {
    type Item = Result<Point3, RecordError>;

    fn next(&mut self) -> Option<Self::Item> {
        let line = match self.next_line()? {
            Ok(line) => line,
            Err(e) => return Some(Err(e)),
        };
        let parsed = parse_point3(line);
        Some(parsed.map_err(|e| e.at_line(self.line)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_point3() {
        let p = parse_point3("512.25 1024.5 13.125").unwrap();
        assert_eq!(p, Point3::new(512.25, 1024.5, 13.125));

        // Tabs, repeated spaces and trailing fields
        let p = parse_point3("\t1  2\t3 99").unwrap();
        assert_eq!(p, Point3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_parse_point3_errors() {
        assert!(matches!(
            parse_point3("1.0 2.0"),
            Err(RecordError::MissingField { expected: 3, found: 2 })
        ));
        assert!(matches!(
            parse_point3(""),
            Err(RecordError::MissingField { expected: 3, found: 0 })
        ));
        match parse_point3("1.0 north 3.0") {
            Err(RecordError::InvalidNumber { field, value }) => {
                assert_eq!(field, 2);
                assert_eq!(value, "north");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_parse_point2() {
        assert_eq!(parse_point2("4 5").unwrap(), Point2::new(4.0, 5.0));
        assert!(parse_point2("4").is_err());
    }

    #[test]
    fn test_parse_corner() {
        assert_eq!(parse_corner("100,200.5").unwrap(), Point2::new(100.0, 200.5));
        assert_eq!(parse_corner(" -1.5 , 2 ").unwrap(), Point2::new(-1.5, 2.0));
        assert!(matches!(parse_corner("100"), Err(RecordError::InvalidCorner(_))));
        assert!(matches!(parse_corner("a,b"), Err(RecordError::InvalidCorner(_))));
        assert!(matches!(parse_corner("inf,0"), Err(RecordError::InvalidCorner(_))));
        assert!(matches!(parse_corner("0,-inf"), Err(RecordError::InvalidCorner(_))));
        assert!(matches!(parse_corner("NaN,0"), Err(RecordError::InvalidCorner(_))));
    }

    #[test]
    fn test_point_reader() {
        let input = "0 0 1\n1.5 2.5 3.5\r\n10 20 30";
        let points: Vec<Point3> = PointReader::new(Cursor::new(input))
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(
            points,
            vec![
                Point3::new(0.0, 0.0, 1.0),
                Point3::new(1.5, 2.5, 3.5),
                Point3::new(10.0, 20.0, 30.0),
            ]
        );
    }

    #[test]
    fn test_point_reader_reports_line() {
        let input = "0 0 1\n0 0 x\n";
        let mut reader = PointReader::new(Cursor::new(input));
        assert!(reader.next().unwrap().is_ok());
        match reader.next().unwrap() {
            Err(RecordError::Line { line, source }) => {
                assert_eq!(line, 2);
                assert!(matches!(*source, RecordError::InvalidNumber { field: 3, .. }));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_point_reader_planar() {
        let mut reader = PointReader::new(Cursor::new("3 4\n5 6 7\n"));
        assert_eq!(reader.next_planar().unwrap().unwrap(), Point2::new(3.0, 4.0));
        assert_eq!(reader.next_planar().unwrap().unwrap(), Point2::new(5.0, 6.0));
        assert!(reader.next_planar().is_none());
        assert_eq!(reader.line(), 2);
    }
}
