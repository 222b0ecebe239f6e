//! Package, version, docs and score snapshots.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::PackageRef;

/// A package as listed by search, stats and scope listings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    pub scope: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub github_repository: Option<GithubRepository>,
    #[serde(default)]
    pub runtime_compat: Option<RuntimeCompat>,
    #[serde(with = "crate::utils::date")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "crate::utils::date")]
    pub updated_at: DateTime<Utc>,
    /// Aggregate score, 0-100
    #[serde(default)]
    pub score: Option<u32>,
    #[serde(default)]
    pub latest_version: Option<String>,
}

/// Runtimes a package declares itself compatible with
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeCompat {
    #[serde(default)]
    pub browser: Option<bool>,
    #[serde(default)]
    pub deno: Option<bool>,
    #[serde(default)]
    pub node: Option<bool>,
    #[serde(default)]
    pub workerd: Option<bool>,
    #[serde(default)]
    pub bun: Option<bool>,
}

/// GitHub repository linked to a package
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GithubRepository {
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// One published version of a package
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageVersion {
    #[serde(default)]
    pub scope: String,
    #[serde(default)]
    pub package: String,
    pub version: String,
    #[serde(default)]
    pub yanked: bool,
    #[serde(default)]
    pub uses_npm: bool,
    /// Transparency log entry proving where the version was built
    #[serde(default)]
    pub rekor_log_id: Option<String>,
    #[serde(default)]
    pub readme_path: Option<String>,
    #[serde(with = "crate::utils::date")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "crate::utils::date")]
    pub updated_at: DateTime<Utc>,
}

/// Rendered documentation for a (package, version, symbol filter) query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageDocs {
    pub css: String,
    #[serde(default)]
    pub script: Option<String>,
    #[serde(default)]
    pub breadcrumbs: Option<String>,
    #[serde(default)]
    pub sidepanel: Option<String>,
    pub main: String,
    pub version: PackageVersion,
}

/// Quality checks behind a package's score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageScore {
    pub has_readme: bool,
    pub has_readme_examples: bool,
    pub all_entrypoints_docs: bool,
    pub percentage_documented_symbols: f64,
    pub all_fast_check: bool,
    pub has_provenance: bool,
    pub has_description: bool,
    pub at_least_one_runtime_compatible: bool,
    pub multiple_runtimes_compatible: bool,
    /// Aggregate percentage derived by the registry
    #[serde(default)]
    pub total: Option<u32>,
}

/// Coarse grading of an aggregate score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Low,
    Medium,
    High,
}

impl Package {
    /// Identity of the package
    pub fn reference(&self) -> PackageRef {
        PackageRef::new(&self.scope, &self.name)
    }

    /// Runtime badges in display order (empty when nothing is declared)
    pub fn runtime_badges(&self) -> Vec<&'static str> {
        self.runtime_compat
            .as_ref()
            .map(RuntimeCompat::badges)
            .unwrap_or_default()
    }

    pub fn score_band(&self) -> Option<ScoreBand> {
        self.score.map(ScoreBand::from_score)
    }
}

impl RuntimeCompat {
    /// Names of the runtimes flagged as compatible
    pub fn badges(&self) -> Vec<&'static str> {
        let flags = [
            (self.bun, "bun"),
            (self.workerd, "cloudflare-workers"),
            (self.node, "node"),
            (self.deno, "deno"),
            (self.browser, "browser"),
        ];
        flags
            .into_iter()
            .filter(|(flag, _)| *flag == Some(true))
            .map(|(_, badge)| badge)
            .collect()
    }
}

impl GithubRepository {
    /// `owner/name`, with missing parts left empty
    pub fn path(&self) -> String {
        format!(
            "{}/{}",
            self.owner.as_deref().unwrap_or(""),
            self.name.as_deref().unwrap_or("")
        )
    }

    pub fn url(&self) -> String {
        format!("https://github.com/{}", self.path())
    }
}

impl PackageVersion {
    pub fn id(&self) -> &str {
        &self.version
    }

    /// Sigstore search link for the version's provenance, if it has any
    pub fn provenance_url(&self) -> Option<String> {
        self.rekor_log_id
            .as_ref()
            .map(|log_index| format!("https://search.sigstore.dev/?logIndex={}", log_index))
    }
}

impl PackageScore {
    /// Documented-symbols percentage as shown to users ("87.50")
    pub fn documented_symbols_display(&self) -> String {
        format!("{:.2}", self.percentage_documented_symbols)
    }

    /// Boolean checks paired with their labels, in display order
    pub fn checks(&self) -> [(&'static str, bool); 8] {
        [
            ("Has Readme", self.has_readme),
            ("Has Readme Examples", self.has_readme_examples),
            ("All Entrypoints Docs", self.all_entrypoints_docs),
            ("All Fast Check", self.all_fast_check),
            ("Has Provenance", self.has_provenance),
            ("Has Description", self.has_description),
            ("At Least One Runtime Compatible", self.at_least_one_runtime_compatible),
            ("Multiple Runtimes Compatible", self.multiple_runtimes_compatible),
        ]
    }
}

impl ScoreBand {
    pub fn from_score(score: u32) -> Self {
        if score < 50 {
            ScoreBand::Low
        } else if score < 75 {
            ScoreBand::Medium
        } else {
            ScoreBand::High
        }
    }
}
