//! Default configuration values and style presets

use super::types::{Config, PatternOptions, Style, TagSort};

/// Default configuration file name (YAML)
pub const DEFAULT_CONFIG_YAML: &str = ".tagline.yml";

/// Default configuration file name (TOML)
pub const DEFAULT_CONFIG_TOML: &str = ".tagline.toml";

/// Directory some repositories keep changelog configuration in
pub const CONFIG_DIR: &str = ".chglog";

/// Sentinel group sort key selecting `title_order`
pub const CUSTOM_SORT: &str = "Custom";

/// Get list of config file names to search for
pub fn config_file_names() -> Vec<&'static str> {
    vec![
        DEFAULT_CONFIG_YAML,
        ".tagline.yaml",
        DEFAULT_CONFIG_TOML,
        "tagline.yml",
        "tagline.toml",
    ]
}

const GITHUB_ACTIONS: &[&str] = &[
    "close", "closes", "closed", "fix", "fixes", "fixed", "resolve", "resolves", "resolved",
];

const GITLAB_ACTIONS: &[&str] = &[
    "close",
    "closes",
    "closed",
    "closing",
    "fix",
    "fixes",
    "fixed",
    "fixing",
    "resolve",
    "resolves",
    "resolved",
    "resolving",
];

const BITBUCKET_ACTIONS: &[&str] = &[
    "close",
    "closes",
    "closed",
    "closing",
    "fix",
    "fixed",
    "fixes",
    "fixing",
    "resolve",
    "resolves",
    "resolved",
    "resolving",
    "eopen",
    "reopens",
    "reopening",
    "hold",
    "holds",
    "holding",
    "wontfix",
    "invalidate",
    "invalidates",
    "invalidated",
    "invalidating",
    "addresses",
    "re",
    "references",
    "ref",
    "refs",
    "see",
];

struct StylePreset {
    prefixes: &'static [&'static str],
    actions: &'static [&'static str],
    merge_pattern: &'static str,
    merge_maps: &'static [&'static str],
}

fn preset(style: Style) -> Option<StylePreset> {
    match style {
        Style::None => None,
        Style::Github => Some(StylePreset {
            prefixes: &["#", "gh-"],
            actions: GITHUB_ACTIONS,
            merge_pattern: r"^Merge pull request #(\d+) from (.*)$",
            merge_maps: &["Ref", "Source"],
        }),
        Style::Gitlab => Some(StylePreset {
            prefixes: &["#"],
            actions: GITLAB_ACTIONS,
            merge_pattern: r"^Merge branch '.*' into '(.*)'$",
            merge_maps: &["Source"],
        }),
        Style::Bitbucket => Some(StylePreset {
            prefixes: &["#"],
            actions: BITBUCKET_ACTIONS,
            merge_pattern: r"^Merged in (.*) \(pull request #(\d+)\)$",
            merge_maps: &["Source", "Ref"],
        }),
    }
}

fn to_strings(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

impl Config {
    /// Fill in defaults, apply the style preset and normalise values.
    ///
    /// Idempotent: normalising twice yields the same configuration.
    pub fn normalize(&mut self) {
        if self.info.title.is_empty() {
            self.info.title = "CHANGELOG".to_string();
        }
        self.info.repository_url = self.info.repository_url.trim_end_matches('/').to_string();

        let opts = &mut self.options;
        opts.sort = match opts.tag_sort() {
            TagSort::Date => "date".to_string(),
            TagSort::Semver => "semver".to_string(),
        };

        if opts.commits.sort_by.is_empty() {
            opts.commits.sort_by = "Scope".to_string();
        }
        if opts.commit_groups.group_by.is_empty() {
            opts.commit_groups.group_by = "Type".to_string();
        }
        if opts.commit_groups.sort_by.is_empty() {
            opts.commit_groups.sort_by = "Title".to_string();
        }

        if let Some(preset) = preset(self.style) {
            if opts.issues.prefix.is_empty() {
                opts.issues.prefix = to_strings(preset.prefixes);
            }
            if opts.refs.actions.is_empty() {
                opts.refs.actions = to_strings(preset.actions);
            }
            if opts.merges.is_unset() {
                opts.merges = PatternOptions::new(preset.merge_pattern, preset.merge_maps);
            }
        }

        if opts.header.pattern.is_empty() {
            opts.header = PatternOptions::new("^(.*)$", &["Subject"]);
        }
        if opts.merges.pattern.is_empty() {
            opts.merges = PatternOptions::new(r"^Merge branch '(\w+)'$", &["Source"]);
        }
        if opts.reverts.pattern.is_empty() {
            opts.reverts = PatternOptions::new(r#"^Revert "([\s\S]*)"$"#, &["Header"]);
        }
    }
}
