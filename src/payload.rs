//! Build payload and the standard status message

use std::fmt;

/// Outcome of the build as reported by the CI system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildStatus {
    Success,
    /// Any status other than `success`, kept verbatim (`failure`, `error`, `killed`, ...)
    Other(String),
}

impl From<&str> for BuildStatus {
    fn from(value: &str) -> Self {
        match value {
            "success" => BuildStatus::Success,
            other => BuildStatus::Other(other.to_string()),
        }
    }
}

impl fmt::Display for BuildStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildStatus::Success => write!(f, "success"),
            BuildStatus::Other(s) => write!(f, "{}", s),
        }
    }
}

/// Facts about one build execution, read from the `CI_*` variables
/// the CI system exports to plugins.
#[derive(Debug, Clone)]
pub struct BuildPayload {
    pub repo_full_name: String,
    pub status: BuildStatus,
    pub author_name: String,
    pub author_email: String,
    pub build_number: String,
    pub commit_link: String,
    pub branch: String,
    pub event: String,
    pub commit_message: String,
    pub system_link: String,
}

impl BuildPayload {
    /// Build the payload from a key lookup. Missing keys render as empty strings.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).unwrap_or_default();
        Self {
            system_link: get("CI_SYSTEM_LINK"),
            repo_full_name: get("CI_REPO_NAME"),
            status: BuildStatus::from(get("CI_BUILD_STATUS").as_str()),
            author_name: get("CI_COMMIT_AUTHOR_NAME"),
            author_email: get("CI_COMMIT_AUTHOR_EMAIL"),
            build_number: get("CI_BUILD_NUMBER"),
            commit_link: get("CI_BUILD_LINK"),
            branch: get("CI_COMMIT_BRANCH"),
            event: get("CI_BUILD_EVENT"),
            commit_message: get("CI_COMMIT_MESSAGE"),
        }
    }

    /// Link to the build log page: `{system}/{repo}/{number}`.
    pub fn build_log_url(&self) -> String {
        format!(
            "{}/{}/{}",
            self.system_link, self.repo_full_name, self.build_number
        )
    }

    /// Render the standard markdown notification.
    ///
    /// User supplied values are inserted as-is, no markdown escaping is done.
    pub fn compose(&self) -> String {
        let mut message = match self.status {
            BuildStatus::Success => format!(
                "##Build for {} is Successful \n**Build author:** [{}]({}) \n",
                self.repo_full_name, self.author_name, self.author_email
            ),
            BuildStatus::Other(_) => format!(
                "#Build for {} FAILED!!! \n**Drone blames build author:** [{}]({}) \n",
                self.repo_full_name, self.author_name, self.author_email
            ),
        };

        message.push_str("###Build Details \n");
        message.push_str(&format!("* [Build Log]({})\n", self.build_log_url()));
        message.push_str(&format!("* [Commit Log]({})\n", self.commit_link));
        message.push_str(&format!("* **Branch:** {}\n", self.branch));
        message.push_str(&format!("* **Event:** {}\n", self.event));
        message.push_str(&format!("* **Commit Message:** {}\n", self.commit_message));
        message
    }
}
