/*
 * Responsibility
 * - Session に紐づく「復号済みの認証情報」の型
 * - encode/decode や署名検証は外部 (claims collaborator) の責務。ここは型と
 *   アクティビティ追跡の小さなロジックだけを持つ
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Decoded identity claims attached to a [`Session`](super::Session).
///
/// Registered claims (`sub`, `iss`, `aud`, `exp`, `iat`) follow JWT naming so a
/// token-based collaborator can deserialize straight into this type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub provider: String,
    pub user_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_login_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_active_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longest_distraction_since_last_login_secs: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aud: Option<String>,
    // unix seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
}

impl Claims {
    pub fn new(provider: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            user_id: user_id.into(),
            ..Self::default()
        }
    }

    /// `true` once `now` reaches `exp`. Claims without `exp` never expire here.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.exp.is_some_and(|exp| now.timestamp() >= exp)
    }

    /// Start a fresh login: activity tracking restarts from `now`.
    pub fn login(&mut self, now: DateTime<Utc>) {
        self.last_login_at = Some(now);
        self.last_active_at = Some(now);
        self.longest_distraction_since_last_login_secs = None;
    }

    /// Record activity at `now`.
    ///
    /// The idle gap since the previous activity replaces the longest
    /// distraction when it is larger.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        if let Some(last) = self.last_active_at {
            let gap = (now - last).num_seconds().max(0);
            let longest = self.longest_distraction_since_last_login_secs.unwrap_or(0);
            if gap > longest {
                self.longest_distraction_since_last_login_secs = Some(gap);
            }
        }
        self.last_active_at = Some(now);
    }
}
