//! Body parsing: notes, metadata lines and the trimmed body

use std::sync::LazyLock;

use regex::Regex;
use tagline_git::{Contact, Note, Ref};

use super::fence::FenceState;
use super::CommitParser;

static MENTION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@([A-Za-z0-9_-]+)").expect("Invalid regex"));

static SIGN_OFF_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Signed-off-by:\s+([\p{L}\s\-\[\]]+)\s+<([\w+\-\[\].@]+)>").expect("Invalid regex")
});

static CO_AUTHOR_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Co-authored-by:\s+([\p{L}\s\-\[\]]+)\s+<([\w+\-\[\].@]+)>").expect("Invalid regex")
});

/// References, mentions and contacts found on a line
#[derive(Debug, Default)]
pub(super) struct LineMetadata {
    pub(super) refs: Vec<Ref>,
    pub(super) mentions: Vec<String>,
    pub(super) co_authors: Vec<Contact>,
    pub(super) signers: Vec<Contact>,
}

impl LineMetadata {
    fn is_empty(&self) -> bool {
        self.refs.is_empty()
            && self.mentions.is_empty()
            && self.co_authors.is_empty()
            && self.signers.is_empty()
    }

    pub(super) fn extend(&mut self, other: LineMetadata) {
        self.refs.extend(other.refs);
        self.mentions.extend(other.mentions);
        self.co_authors.extend(other.co_authors);
        self.signers.extend(other.signers);
    }
}

/// Everything extracted from the body
#[derive(Debug, Default)]
pub(super) struct BodyParts {
    pub(super) raw: String,
    pub(super) trimmed: String,
    pub(super) notes: Vec<Note>,
    pub(super) metadata: LineMetadata,
}

pub(super) fn parse_mentions(input: &str) -> Vec<String> {
    MENTION_REGEX
        .captures_iter(input)
        .map(|caps| caps[1].to_string())
        .collect()
}

fn parse_contacts(re: &Regex, input: &str) -> Vec<Contact> {
    re.captures_iter(input)
        .map(|caps| Contact {
            name: caps[1].to_string(),
            email: caps[2].to_string(),
        })
        .collect()
}

impl CommitParser {
    fn line_metadata(&self, line: &str) -> LineMetadata {
        LineMetadata {
            refs: self.parse_refs(line),
            mentions: parse_mentions(line),
            co_authors: parse_contacts(&CO_AUTHOR_REGEX, line),
            signers: parse_contacts(&SIGN_OFF_REGEX, line),
        }
    }

    /// Walk the body line by line.
    ///
    /// Outside code blocks, a line carrying metadata is removed from the
    /// trimmed body and closes any open note. A note keyword line opens a note;
    /// following lines are appended to it until a metadata line or the next
    /// note. Note lines are removed from the trimmed body.
    pub(super) fn parse_body(&self, input: &str) -> BodyParts {
        let raw = input.replace("\r\n", "\n").replace('\r', "\n");

        let mut metadata = LineMetadata::default();
        let mut notes: Vec<Note> = Vec::new();
        let mut kept: Vec<&str> = Vec::new();
        let mut fence = FenceState::default();
        let mut in_note = false;
        let mut trim = false;

        for line in raw.split('\n') {
            if !in_note {
                trim = false;
            }
            fence.update(line);

            if !fence.in_code_block() {
                let found = self.line_metadata(line);
                if !found.is_empty() {
                    metadata.extend(found);
                    trim = true;
                    in_note = false;
                }
            }

            if let Some(caps) = self.note.as_ref().and_then(|re| re.captures(line)) {
                in_note = true;
                trim = true;
                notes.push(Note {
                    title: caps[1].to_string(),
                    body: caps[2].to_string(),
                });
            } else if in_note {
                if let Some(note) = notes.last_mut() {
                    note.body.push('\n');
                    note.body.push_str(line);
                }
            }

            if !trim {
                kept.push(line);
            }
        }

        for note in &mut notes {
            note.body = note.body.trim().to_string();
        }

        BodyParts {
            trimmed: kept.join("\n").trim().to_string(),
            raw,
            notes,
            metadata,
        }
    }
}
