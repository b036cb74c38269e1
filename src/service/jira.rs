//
//  planning-tool
//  service/jira.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Jira operations: identity and issue comments.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::info;

use super::ZephyrClient;
use crate::api::client::Host;
use crate::api::common::{ApiError, ApiResult};
use crate::api::jira::{AddCommentRequest, Comment, JiraUser};

/// Jira issue keys: `PROJECT-123`.
static ISSUE_KEY_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z][A-Z0-9_]*-\d+$").unwrap());

impl ZephyrClient {
    /// Posts a comment on a Jira issue and returns the created comment.
    pub async fn post_comment(&self, issue_key: &str, text: &str) -> ApiResult<Comment> {
        let issue_key = issue_key.trim();
        if !ISSUE_KEY_PATTERN.is_match(issue_key) {
            return Err(ApiError::invalid(format!(
                "malformed issue key '{}': expected PROJECT-<number>",
                issue_key
            )));
        }
        if text.trim().is_empty() {
            return Err(ApiError::invalid("comment text must not be empty"));
        }

        let path = format!("issue/{}/comment", issue_key);
        let comment: Comment = self
            .transport
            .post(Host::IssueTracker, &path, &AddCommentRequest { body: text })
            .await?;

        info!(issue = issue_key, comment_id = %comment.id, "Posted comment");
        Ok(comment)
    }

    /// Looks up a Jira user by account id.
    pub async fn get_user(&self, account_id: &str) -> ApiResult<JiraUser> {
        let account_id = account_id.trim();
        if account_id.is_empty() {
            return Err(ApiError::invalid("account id must not be empty"));
        }
        self.transport
            .get(Host::IssueTracker, "user", &[("accountId", account_id.to_string())])
            .await
    }

    /// The Jira user the configured credentials belong to.
    pub async fn myself(&self) -> ApiResult<JiraUser> {
        self.transport.get(Host::IssueTracker, "myself", &[]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_key_pattern() {
        assert!(ISSUE_KEY_PATTERN.is_match("OBS-123"));
        assert!(ISSUE_KEY_PATTERN.is_match("SITCOM_2-7"));
        assert!(!ISSUE_KEY_PATTERN.is_match("OBS"));
        assert!(!ISSUE_KEY_PATTERN.is_match("obs-1"));
        assert!(!ISSUE_KEY_PATTERN.is_match("OBS-1 "));
    }
}
