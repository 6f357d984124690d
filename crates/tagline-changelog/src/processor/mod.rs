//! Commit processing between parsing and extraction

mod hosting;

pub use hosting::{BitbucketProcessor, GitHubProcessor, GitLabProcessor};

use tagline_core::config::{Config, Style};
use tagline_git::Commit;

/// Trait for commit processors
pub trait CommitProcessor: Send + Sync {
    /// Rewrite a commit, or drop it by returning `None`
    fn process(&self, commit: Commit) -> Option<Commit>;
}

impl<F> CommitProcessor for F
where
    F: Fn(Commit) -> Option<Commit> + Send + Sync,
{
    fn process(&self, commit: Commit) -> Option<Commit> {
        self(commit)
    }
}

/// The link processor for the configured hosting style, if any
pub fn processor_for_style(config: &Config) -> Option<Box<dyn CommitProcessor>> {
    let url = config.info.repository_url.as_str();
    match config.style {
        Style::Github => Some(Box::new(GitHubProcessor::new(url))),
        Style::Gitlab => Some(Box::new(GitLabProcessor::new(url))),
        Style::Bitbucket => Some(Box::new(BitbucketProcessor::new(url))),
        Style::None => None,
    }
}

/// Apply `transform` to every user-facing text of a commit
pub(crate) fn rewrite_text(mut commit: Commit, transform: impl Fn(&str) -> String) -> Commit {
    commit.header = transform(&commit.header);
    if let Some(subject) = commit.fields.get_mut("Subject") {
        *subject = transform(subject);
    }
    commit.body = transform(&commit.body);
    for note in &mut commit.notes {
        note.body = transform(&note.body);
    }
    if let Some(revert) = &mut commit.revert {
        revert.header = transform(&revert.header);
    }
    commit
}

#[cfg(test)]
mod tests {
    use super::*;
    use tagline_git::{Note, Revert};

    #[test]
    fn test_closure_processor_drops_commits() {
        let skip_wip = |commit: Commit| {
            if commit.header.starts_with("WIP") {
                None
            } else {
                Some(commit)
            }
        };

        let wip = Commit {
            header: "WIP: half done".to_string(),
            ..Commit::default()
        };
        let done = Commit {
            header: "feat: done".to_string(),
            ..Commit::default()
        };
        assert!(skip_wip.process(wip).is_none());
        assert!(skip_wip.process(done).is_some());
    }

    #[test]
    fn test_rewrite_text_covers_all_texts() {
        let mut commit = Commit {
            header: "fix: a".to_string(),
            body: "b".to_string(),
            notes: vec![Note {
                title: "BREAKING CHANGE".to_string(),
                body: "c".to_string(),
            }],
            revert: Some(Revert {
                header: "d".to_string(),
            }),
            ..Commit::default()
        };
        commit.fields.insert("Subject".to_string(), "a".to_string());
        commit.fields.insert("Type".to_string(), "fix".to_string());

        let commit = rewrite_text(commit, |s| s.to_uppercase());

        assert_eq!(commit.header, "FIX: A");
        assert_eq!(commit.subject(), "A");
        assert_eq!(commit.commit_type(), "fix");
        assert_eq!(commit.body, "B");
        assert_eq!(commit.notes[0].body, "C");
        assert_eq!(commit.notes[0].title, "BREAKING CHANGE");
        assert_eq!(commit.revert.unwrap().header, "D");
    }

    #[test]
    fn test_processor_for_style() {
        let mut config = Config::default();
        assert!(processor_for_style(&config).is_none());

        config.style = Style::Github;
        config.info.repository_url = "https://github.com/owner/repo".to_string();
        let processor = processor_for_style(&config).unwrap();
        let commit = Commit {
            header: "fix: #1".to_string(),
            ..Commit::default()
        };
        assert_eq!(
            processor.process(commit).unwrap().header,
            "fix: [#1](https://github.com/owner/repo/issues/1)"
        );
    }
}
