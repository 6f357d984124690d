//! Link processors for hosted repositories

use std::sync::LazyLock;

use regex::Regex;
use tagline_git::Commit;

use super::{rewrite_text, CommitProcessor};

static MENTION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@([A-Za-z0-9_]+)").expect("Invalid regex"));

static GITHUB_ISSUE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(#|gh-)([0-9]+)").expect("Invalid regex"));

static ISSUE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#([0-9]+)").expect("Invalid regex"));

static MERGE_REQUEST_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!([0-9]+)").expect("Invalid regex"));

fn trim_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

/// Links mentions and issue references to GitHub
#[derive(Debug, Clone)]
pub struct GitHubProcessor {
    host: String,
    repository_url: String,
}

impl GitHubProcessor {
    pub fn new(repository_url: &str) -> Self {
        Self {
            host: "https://github.com".to_string(),
            repository_url: trim_url(repository_url),
        }
    }

    /// Link mentions to another host (e.g. GitHub Enterprise), protocol included
    pub fn with_host(mut self, host: &str) -> Self {
        self.host = trim_url(host);
        self
    }

    fn add_links(&self, input: &str) -> String {
        let linked = MENTION_REGEX.replace_all(input, format!("[@${{1}}]({}/${{1}})", self.host));
        GITHUB_ISSUE_REGEX
            .replace_all(
                &linked,
                format!("[${{1}}${{2}}]({}/issues/${{2}})", self.repository_url),
            )
            .into_owned()
    }
}

impl CommitProcessor for GitHubProcessor {
    fn process(&self, commit: Commit) -> Option<Commit> {
        Some(rewrite_text(commit, |s| self.add_links(s)))
    }
}

/// Links mentions, issues and merge requests to GitLab
#[derive(Debug, Clone)]
pub struct GitLabProcessor {
    host: String,
    repository_url: String,
}

impl GitLabProcessor {
    pub fn new(repository_url: &str) -> Self {
        Self {
            host: "https://gitlab.com".to_string(),
            repository_url: trim_url(repository_url),
        }
    }

    pub fn with_host(mut self, host: &str) -> Self {
        self.host = trim_url(host);
        self
    }

    fn add_links(&self, input: &str) -> String {
        let linked = MENTION_REGEX.replace_all(input, format!("[@${{1}}]({}/${{1}})", self.host));
        let linked = ISSUE_REGEX.replace_all(
            &linked,
            format!("[#${{1}}]({}/issues/${{1}})", self.repository_url),
        );
        MERGE_REQUEST_REGEX
            .replace_all(
                &linked,
                format!("[!${{1}}]({}/merge_requests/${{1}})", self.repository_url),
            )
            .into_owned()
    }
}

impl CommitProcessor for GitLabProcessor {
    fn process(&self, commit: Commit) -> Option<Commit> {
        Some(rewrite_text(commit, |s| self.add_links(s)))
    }
}

/// Links mentions and issues to Bitbucket
#[derive(Debug, Clone)]
pub struct BitbucketProcessor {
    host: String,
    repository_url: String,
}

impl BitbucketProcessor {
    pub fn new(repository_url: &str) -> Self {
        Self {
            host: "https://bitbucket.org".to_string(),
            repository_url: trim_url(repository_url),
        }
    }

    pub fn with_host(mut self, host: &str) -> Self {
        self.host = trim_url(host);
        self
    }

    fn add_links(&self, input: &str) -> String {
        let linked =
            MENTION_REGEX.replace_all(input, format!("[@${{1}}]({}/${{1}}/)", self.host));
        ISSUE_REGEX
            .replace_all(
                &linked,
                format!("[#${{1}}]({}/issues/${{1}}/)", self.repository_url),
            )
            .into_owned()
    }
}

impl CommitProcessor for BitbucketProcessor {
    fn process(&self, commit: Commit) -> Option<Commit> {
        Some(rewrite_text(commit, |s| self.add_links(s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_commit(header: &str, body: &str) -> Commit {
        Commit {
            header: header.to_string(),
            body: body.to_string(),
            ..Commit::default()
        }
    }

    #[test]
    fn test_github_links() {
        let processor = GitHubProcessor::new("https://github.com/owner/repo/");
        let commit = processor
            .process(make_commit("fix: crash (#12)", "Thanks @alice, see gh-3"))
            .unwrap();

        assert_eq!(
            commit.header,
            "fix: crash ([#12](https://github.com/owner/repo/issues/12))"
        );
        assert_eq!(
            commit.body,
            "Thanks [@alice](https://github.com/alice), see [gh-3](https://github.com/owner/repo/issues/3)"
        );
    }

    #[test]
    fn test_github_custom_host() {
        let processor = GitHubProcessor::new("https://git.example.com/owner/repo")
            .with_host("https://git.example.com/");
        let commit = processor.process(make_commit("by @bob", "")).unwrap();
        assert_eq!(commit.header, "by [@bob](https://git.example.com/bob)");
    }

    #[test]
    fn test_gitlab_links() {
        let processor = GitLabProcessor::new("https://gitlab.com/owner/repo");
        let commit = processor
            .process(make_commit("feat: thing #4 !7", "@carol"))
            .unwrap();

        assert_eq!(
            commit.header,
            "feat: thing [#4](https://gitlab.com/owner/repo/issues/4) [!7](https://gitlab.com/owner/repo/merge_requests/7)"
        );
        assert_eq!(commit.body, "[@carol](https://gitlab.com/carol)");
    }

    #[test]
    fn test_bitbucket_links() {
        let processor = BitbucketProcessor::new("https://bitbucket.org/owner/repo");
        let commit = processor.process(make_commit("fix #9 @dave", "")).unwrap();

        assert_eq!(
            commit.header,
            "fix [#9](https://bitbucket.org/owner/repo/issues/9/) [@dave](https://bitbucket.org/dave/)"
        );
    }
}
