use serde::{Serialize, Deserialize};
use std::collections::HashMap;
use time::OffsetDateTime;
use uuid::Uuid;

/// A poll together with its vote ledger.
///
/// `votes` holds exactly one entry per distinct name in `options`. The option
/// names, flags and choice limits never change after creation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Poll {
    pub id: Uuid,
    pub title: String,
    pub options: Vec<String>,
    pub multi_select: bool,
    /// Zero means no lower limit.
    pub min_choices: u32,
    /// Zero means no upper limit.
    pub max_choices: u32,
    pub votes: HashMap<String, u64>,
    pub voter_count: u64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreatePollRequest {
    pub title: String,
    pub options: Vec<String>,
    #[serde(default)]
    pub multi_select: bool,
    #[serde(default)]
    pub min_choices: u32,
    #[serde(default)]
    pub max_choices: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VoteRequest {
    pub poll_id: String,
    pub options: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePollResponse {
    pub success: bool,
    pub poll_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollListResponse {
    pub success: bool,
    pub polls: Vec<Poll>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Poll {
    /// Builds a fresh poll with a new identifier, the current UTC time and a
    /// zeroed ledger entry for every declared option.
    pub fn new(request: CreatePollRequest) -> Self {
        let votes = request.options.iter()
            .map(|option| (option.clone(), 0))
            .collect();

        Self {
            id: Uuid::new_v4(),
            title: request.title,
            options: request.options,
            multi_select: request.multi_select,
            min_choices: request.min_choices,
            max_choices: request.max_choices,
            votes,
            voter_count: 0,
            created_at: OffsetDateTime::now_utc(),
        }
    }

    /// Applies one ballot: the voter count always moves, undeclared names are skipped.
    pub fn record_ballot(&mut self, options: &[String]) {
        self.voter_count += 1;
        for option in options {
            if let Some(count) = self.votes.get_mut(option) {
                *count += 1;
            }
        }
    }
}

impl StatusResponse {
    pub fn ok() -> Self {
        Self { success: true, message: None }
    }

    pub fn with_message(message: impl Into<String>) -> Self {
        Self { success: true, message: Some(message.into()) }
    }
}
