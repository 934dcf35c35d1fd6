//! Pipe-delimited line codec for domain records.
//!
//! Each record kind encodes to one text line whose first field is a tag
//! naming the kind (`Client`, `Admin`, `EQUIPMENT`, `3D_PRINTER`,
//! `RESERVATION`) and whose remaining fields are pipe-separated values.
//! Decoding is fail-soft: a line that cannot be understood yields `None` and
//! a warning instead of an error, so one corrupt row never blocks a whole
//! file from loading.

mod equipment;
mod reservation;
mod user;

use chrono::NaiveDateTime;

/// Field separator within a record line.
pub const FIELD_SEPARATOR: char = '|';

/// Timestamp format used in record fields (minute precision).
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// A domain record with a one-line text representation.
///
/// Implementations own the whole vocabulary of their format: the leading
/// tag(s), field order, and numeric and date formatting. Field values must
/// not contain the separator or newlines; the codec does not escape.
pub trait LineRecord: Sized {
    /// Identifier of this record, exactly as written in its id field.
    fn record_id(&self) -> &str;

    /// Encode into a single line, without a trailing newline.
    fn encode(&self) -> String;

    /// Decode one line. `None` for blank, foreign, or malformed lines.
    fn decode(line: &str) -> Option<Self>;

    /// Extract the identifier field from a raw line without a full decode.
    ///
    /// `None` when the tag does not belong to this record kind or the id
    /// field is missing. Keyed rewrites match on this, so lines it returns
    /// `None` for are always preserved by update and delete.
    fn decode_id(line: &str) -> Option<&str>;
}

pub(crate) fn decode_f64(field: &str) -> Option<f64> {
    field.trim().parse().ok()
}

pub(crate) fn decode_datetime(field: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(field.trim(), DATETIME_FORMAT).ok()
}
