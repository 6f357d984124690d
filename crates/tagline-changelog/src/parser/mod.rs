//! Commit parsing
//!
//! Turns raw log records into [`Commit`] values. Header fields, merge and
//! revert information are assigned from configured patterns; references,
//! mentions, co-authors, sign-offs and notes are pulled out of the header and
//! body. Malformed fields degrade to empty values instead of failing the record.

mod body;
mod fence;
mod types;

pub use types::ParserConfig;

use std::collections::BTreeMap;

use chrono::{TimeZone, Utc};
use regex::Regex;
use tagline_core::config::PatternOptions;
use tagline_core::error::ConfigError;
use tagline_git::format::{split_fields, split_records, LogField};
use tagline_git::{Commit, Hash, Merge, Ref, Revert, Signature};
use tracing::{debug, instrument, warn};

use body::{parse_mentions, BodyParts, LineMetadata};

/// A compiled pattern and the names its captures are assigned to
#[derive(Debug, Clone)]
struct FieldPattern {
    regex: Option<Regex>,
    maps: Vec<String>,
}

impl FieldPattern {
    fn compile(setting: &str, options: &PatternOptions) -> Result<Self, ConfigError> {
        let regex = if options.pattern.is_empty() {
            None
        } else {
            Some(ConfigError::compile(
                &format!("{}.pattern", setting),
                &options.pattern,
            )?)
        };
        Ok(Self {
            regex,
            maps: options.pattern_maps.clone(),
        })
    }

    /// Assign the captures of the first match to the configured names.
    ///
    /// Names without a corresponding capture group are left out; a group that
    /// did not participate in the match reads as an empty string.
    fn assign(&self, input: &str) -> Option<Vec<(&str, String)>> {
        let caps = self.regex.as_ref()?.captures(input)?;
        let assigned = self
            .maps
            .iter()
            .take(caps.len() - 1)
            .enumerate()
            .map(|(i, name)| {
                let value = caps.get(i + 1).map_or("", |m| m.as_str());
                (name.as_str(), value.to_string())
            })
            .collect();
        Some(assigned)
    }
}

/// Everything extracted from the header line
#[derive(Debug, Default)]
struct HeaderParts {
    raw: String,
    fields: BTreeMap<String, String>,
    merge: Option<Merge>,
    revert: Option<Revert>,
    metadata: LineMetadata,
}

/// Join non-empty words into an escaped regex alternation
fn alternation(words: &[String]) -> Option<String> {
    let escaped: Vec<String> = words
        .iter()
        .filter(|w| !w.is_empty())
        .map(|w| regex::escape(w))
        .collect();
    if escaped.is_empty() {
        None
    } else {
        Some(escaped.join("|"))
    }
}

/// Parser for raw log records
#[derive(Debug, Clone)]
pub struct CommitParser {
    header: FieldPattern,
    merge: FieldPattern,
    revert: FieldPattern,
    reference: Option<Regex>,
    issue: Option<Regex>,
    note: Option<Regex>,
}

impl CommitParser {
    /// Compile all patterns. An invalid pattern fails here, before any parsing.
    ///
    /// Reference extraction needs at least one issue prefix, action
    /// references additionally need an action keyword, and notes need a
    /// keyword; missing lists disable the corresponding extraction.
    pub fn new(config: &ParserConfig) -> Result<Self, ConfigError> {
        let prefixes = alternation(&config.issue_prefixes);
        let actions = alternation(&config.ref_actions);
        let keywords = alternation(&config.note_keywords);

        let reference = match (&actions, &prefixes) {
            (Some(actions), Some(prefixes)) => Some(ConfigError::compile(
                "options.refs.actions",
                &format!(
                    r"(?i)({})\s?([A-Za-z0-9_/\.\-]+)?(?:{})([0-9]+)",
                    actions, prefixes
                ),
            )?),
            _ => None,
        };
        let issue = match &prefixes {
            Some(prefixes) => Some(ConfigError::compile(
                "options.issues.prefix",
                &format!(r"(?:{})([0-9]+)", prefixes),
            )?),
            None => None,
        };
        let note = match &keywords {
            Some(keywords) => Some(ConfigError::compile(
                "options.notes.keywords",
                &format!(r"^(?i)\s*({})[:\s]+(.*)", keywords),
            )?),
            None => None,
        };

        Ok(Self {
            header: FieldPattern::compile("options.header", &config.header)?,
            merge: FieldPattern::compile("options.merges", &config.merge)?,
            revert: FieldPattern::compile("options.reverts", &config.revert)?,
            reference,
            issue,
            note,
        })
    }

    /// Parse every record of a log response, in log order
    #[instrument(skip(self, raw), fields(bytes = raw.len()))]
    pub fn parse_log(&self, raw: &str) -> Vec<Commit> {
        let commits: Vec<Commit> = split_records(raw).map(|record| self.parse(record)).collect();
        debug!(count = commits.len(), "parsed commits");
        commits
    }

    /// Parse one record (the text after a record separator)
    pub fn parse(&self, record: &str) -> Commit {
        let mut hash = Hash::default();
        let mut author = Signature::default();
        let mut committer = Signature::default();
        let mut header = HeaderParts::default();
        let mut body = BodyParts::default();

        for (name, value) in split_fields(record) {
            match LogField::from_name(name) {
                Some(LogField::Hash) => hash = parse_hash(value),
                Some(LogField::Author) => author = parse_signature(value),
                Some(LogField::Committer) => committer = parse_signature(value),
                Some(LogField::Subject) => header = self.parse_header(value),
                Some(LogField::Body) => body = self.parse_body(value),
                None => debug!(field = name, "ignoring unknown log field"),
            }
        }

        let mut metadata = header.metadata;
        metadata.extend(body.metadata);
        let LineMetadata {
            refs,
            mentions,
            co_authors,
            signers,
        } = metadata;

        Commit {
            hash,
            author,
            committer,
            merge: header.merge,
            revert: header.revert,
            refs: unique_refs(refs),
            notes: body.notes,
            mentions: unique_mentions(mentions),
            co_authors,
            signers,
            header: header.raw,
            fields: header.fields,
            body: body.raw,
            trimmed_body: body.trimmed,
        }
    }

    fn parse_header(&self, input: &str) -> HeaderParts {
        let mut fields = BTreeMap::new();
        if let Some(assigned) = self.header.assign(input) {
            for (name, value) in assigned {
                fields.insert(name.to_string(), value);
            }
        }

        let merge = self.merge.assign(input).map(|assigned| {
            let mut merge = Merge::default();
            for (name, value) in assigned {
                match name {
                    "Ref" => merge.reference = value,
                    "Source" => merge.source = value,
                    _ => {}
                }
            }
            merge
        });

        let revert = self.revert.assign(input).map(|assigned| {
            let mut revert = Revert::default();
            for (name, value) in assigned {
                if name == "Header" {
                    revert.header = value;
                }
            }
            revert
        });

        let metadata = LineMetadata {
            refs: self.parse_refs(input),
            mentions: parse_mentions(input),
            ..LineMetadata::default()
        };

        HeaderParts {
            raw: input.to_string(),
            fields,
            merge,
            revert,
            metadata,
        }
    }

    /// Action references first, then bare issue numbers not already referenced
    fn parse_refs(&self, input: &str) -> Vec<Ref> {
        let group = |caps: &regex::Captures<'_>, i: usize| {
            caps.get(i).map_or(String::new(), |m| m.as_str().to_string())
        };

        let mut refs: Vec<Ref> = match &self.reference {
            Some(re) => re
                .captures_iter(input)
                .map(|caps| Ref {
                    action: group(&caps, 1),
                    source: group(&caps, 2),
                    reference: group(&caps, 3),
                })
                .collect(),
            None => Vec::new(),
        };

        if let Some(re) = &self.issue {
            for caps in re.captures_iter(input) {
                let number = group(&caps, 1);
                if !refs.iter().any(|r| r.reference == number) {
                    refs.push(Ref {
                        reference: number,
                        ..Ref::default()
                    });
                }
            }
        }

        refs
    }
}

fn parse_hash(input: &str) -> Hash {
    let mut parts = input.split('\t');
    Hash {
        long: parts.next().unwrap_or_default().to_string(),
        short: parts.next().unwrap_or_default().to_string(),
    }
}

fn parse_signature(input: &str) -> Signature {
    let mut parts = input.split('\t');
    let name = parts.next().unwrap_or_default().to_string();
    let email = parts.next().unwrap_or_default().to_string();
    let raw_time = parts.next().unwrap_or_default();

    let seconds = raw_time.trim().parse::<i64>().unwrap_or_else(|_| {
        warn!(value = raw_time, "unparsable commit timestamp, using the epoch");
        0
    });

    Signature {
        name,
        email,
        date: Utc.timestamp_opt(seconds, 0).single().unwrap_or_default(),
    }
}

fn unique_refs(refs: Vec<Ref>) -> Vec<Ref> {
    let mut unique: Vec<Ref> = Vec::with_capacity(refs.len());
    for r in refs {
        if !unique.contains(&r) {
            unique.push(r);
        }
    }
    unique
}

fn unique_mentions(mentions: Vec<String>) -> Vec<String> {
    let mut unique: Vec<String> = Vec::with_capacity(mentions.len());
    for m in mentions {
        if !unique.contains(&m) {
            unique.push(m);
        }
    }
    unique
}
