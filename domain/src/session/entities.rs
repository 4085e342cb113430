//! Session domain entities

use crate::core::error::DomainError;
use crate::vote::entities::Vote;
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// How long a freshly created session stays open for voting
pub const SESSION_TTL_HOURS: i64 = 24;

/// Access level of a session member
///
/// Facilitators and contributors may vote; observers get read-only access.
/// The vote store itself never checks roles - gating happens in the caller
/// via [`can_vote`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SystemRole {
    /// Can edit strategy and manage the team
    Facilitator,
    /// Can vote on initiatives
    Contributor,
    /// Read-only access
    Observer,
}

impl SystemRole {
    pub fn as_str(&self) -> &str {
        match self {
            SystemRole::Facilitator => "FACILITATOR",
            SystemRole::Contributor => "CONTRIBUTOR",
            SystemRole::Observer => "OBSERVER",
        }
    }

    /// Whether this role is allowed to cast votes
    pub fn may_vote(&self) -> bool {
        matches!(self, SystemRole::Facilitator | SystemRole::Contributor)
    }
}

impl std::fmt::Display for SystemRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for SystemRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "FACILITATOR" => Ok(SystemRole::Facilitator),
            "CONTRIBUTOR" => Ok(SystemRole::Contributor),
            "OBSERVER" => Ok(SystemRole::Observer),
            _ => Err(format!(
                "Unknown role: {}. Valid: FACILITATOR, CONTRIBUTOR, OBSERVER",
                s
            )),
        }
    }
}

/// A candidate strategic item being scored (Entity)
///
/// Identity is immutable once created: the id is never reassigned.
/// Deleting an initiative does NOT clean up its votes - orphaned votes
/// stay in the store and are silently skipped by the aggregation engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Initiative {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Initiative {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A session participant (Entity)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub system_role: SystemRole,
}

impl Member {
    pub fn new(id: impl Into<String>, name: impl Into<String>, system_role: SystemRole) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: None,
            system_role,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

/// Consolidated voting predicate
///
/// A member may vote when their role allows it AND the session is not
/// locked (expired or otherwise read-only). Inject the verdict into a
/// ballot once at start instead of re-deriving it per transition.
pub fn can_vote(member: &Member, session_locked: bool) -> bool {
    member.system_role.may_vote() && !session_locked
}

/// A scoring session (Aggregate root)
///
/// Holds the initiative list, members, and the current vote set. The vote
/// set here is the snapshot delivered by the persistence layer; live
/// writes go through the vote store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub vision: String,
    #[serde(default)]
    pub objectives: Vec<String>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub expires_at: DateTime<Utc>,
    #[serde(default)]
    pub initiatives: Vec<Initiative>,
    #[serde(default)]
    pub team_members: Vec<Member>,
    #[serde(default)]
    pub votes: Vec<Vote>,
}

impl Session {
    /// Create a session with the default 24-hour voting window
    pub fn new(id: impl Into<String>, name: impl Into<String>, owner: Member) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            name: name.into(),
            vision: String::new(),
            objectives: Vec::new(),
            created_at: now,
            expires_at: now + TimeDelta::hours(SESSION_TTL_HOURS),
            initiatives: Vec::new(),
            team_members: vec![owner],
            votes: Vec::new(),
        }
    }

    /// Whether the voting window has closed
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// Look up a member by id
    pub fn member(&self, member_id: &str) -> Option<&Member> {
        self.team_members.iter().find(|m| m.id == member_id)
    }

    /// Look up an initiative by id
    pub fn initiative(&self, initiative_id: &str) -> Option<&Initiative> {
        self.initiatives.iter().find(|i| i.id == initiative_id)
    }

    pub fn add_member(&mut self, member: Member) {
        self.team_members.push(member);
    }

    /// Remove a member; a session must keep at least one
    pub fn remove_member(&mut self, member_id: &str) -> Result<(), DomainError> {
        if self.team_members.len() <= 1 {
            return Err(DomainError::LastMember);
        }
        self.team_members.retain(|m| m.id != member_id);
        Ok(())
    }

    pub fn add_initiative(&mut self, initiative: Initiative) {
        self.initiatives.push(initiative);
    }

    /// Remove an initiative
    ///
    /// Votes referencing the removed initiative are left in place on
    /// purpose; the aggregation engine filters orphans on every run.
    pub fn remove_initiative(&mut self, initiative_id: &str) {
        self.initiatives.retain(|i| i.id != initiative_id);
    }
}
