//! Raw log wire format
//!
//! A log response is a sequence of records. Every record opens with
//! [`SEPARATOR`]; the fields inside it are joined with [`DELIMITER`] and each
//! one is written as `NAME:value`. Fetchers write records with [`LogRecord`],
//! the commit parser reads them back with [`split_records`] and [`split_fields`].

use std::fmt;

use tracing::warn;

/// Token that opens every record
pub const SEPARATOR: &str = "@@__TAGLINE__@@";

/// Token between the fields of one record
pub const DELIMITER: &str = "@@__TAGLINE_DELIMITER__@@";

/// Field names of a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogField {
    /// `long\tshort`
    Hash,
    /// `name\temail\tunix_seconds`
    Author,
    /// `name\temail\tunix_seconds`
    Committer,
    /// Header line
    Subject,
    /// Message after the header
    Body,
}

impl LogField {
    /// The upper-case name written before the colon
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hash => "HASH",
            Self::Author => "AUTHOR",
            Self::Committer => "COMMITTER",
            Self::Subject => "SUBJECT",
            Self::Body => "BODY",
        }
    }

    /// Look up a field by its wire name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "HASH" => Some(Self::Hash),
            "AUTHOR" => Some(Self::Author),
            "COMMITTER" => Some(Self::Committer),
            "SUBJECT" => Some(Self::Subject),
            "BODY" => Some(Self::Body),
            _ => None,
        }
    }
}

impl fmt::Display for LogField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity written into an `AUTHOR` or `COMMITTER` field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogIdentity {
    pub name: String,
    pub email: String,
    /// Seconds since the Unix epoch
    pub time: i64,
}

impl LogIdentity {
    pub fn new(name: impl Into<String>, email: impl Into<String>, time: i64) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            time,
        }
    }
}

/// One commit as written by a log fetcher.
///
/// `Display` renders the record in wire format, separator included, so a
/// full response is the concatenation of its records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogRecord {
    pub hash: String,
    pub short_hash: String,
    pub author: LogIdentity,
    pub committer: LogIdentity,
    pub subject: String,
    pub body: String,
}

impl fmt::Display for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{SEPARATOR}{}:{}\t{}{DELIMITER}",
            LogField::Hash,
            self.hash,
            self.short_hash
        )?;
        for (field, who) in [
            (LogField::Author, &self.author),
            (LogField::Committer, &self.committer),
        ] {
            write!(f, "{}:{}\t{}\t{}{DELIMITER}", field, who.name, who.email, who.time)?;
        }
        writeln!(
            f,
            "{}:{}{DELIMITER}{}:{}",
            LogField::Subject,
            self.subject,
            LogField::Body,
            self.body
        )
    }
}

/// Render a whole log response
pub fn render_log<'a>(records: impl IntoIterator<Item = &'a LogRecord>) -> String {
    records.into_iter().map(ToString::to_string).collect()
}

/// Split a log response into records. Text before the first separator is discarded.
pub fn split_records(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(SEPARATOR).skip(1)
}

/// Split one record into `(name, value)` pairs with the value trimmed.
///
/// Tokens without a colon are skipped.
pub fn split_fields(record: &str) -> impl Iterator<Item = (&str, &str)> {
    record.split(DELIMITER).filter_map(|token| match token.split_once(':') {
        Some((name, value)) => Some((name.trim(), value.trim())),
        None => {
            if !token.trim().is_empty() {
                warn!(token = token.trim(), "skipping log field without a name");
            }
            None
        }
    })
}
