use serde::{Deserialize, Serialize};

use super::plan::{Action, ActionPlan};

/// Result status, encoded with HTTP-like integer codes on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
pub enum Status {
    /// 200: changes were applied (or, in a dry run, would be).
    Applied,
    /// 304: the path already holds the desired state.
    NotModified,
    /// 400: the request itself is malformed; nothing was touched.
    BadRequest,
    /// 412: the policy forbids the required change; nothing was touched.
    PreconditionFailed,
    /// 500: a primitive failed while executing; earlier steps may have applied.
    ActionFailed,
}

impl Status {
    #[must_use]
    pub const fn code(self) -> u16 {
        match self {
            Status::Applied => 200,
            Status::NotModified => 304,
            Status::BadRequest => 400,
            Status::PreconditionFailed => 412,
            Status::ActionFailed => 500,
        }
    }

    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self, Status::Applied | Status::NotModified)
    }

    /// 4xx statuses guarantee that no mutation happened.
    #[must_use]
    pub const fn is_client_error(self) -> bool {
        matches!(self, Status::BadRequest | Status::PreconditionFailed)
    }

    #[must_use]
    pub const fn is_server_error(self) -> bool {
        matches!(self, Status::ActionFailed)
    }
}

impl From<Status> for u16 {
    fn from(s: Status) -> Self {
        s.code()
    }
}

impl TryFrom<u16> for Status {
    type Error = String;

    fn try_from(code: u16) -> Result<Self, Self::Error> {
        match code {
            200 => Ok(Status::Applied),
            304 => Ok(Status::NotModified),
            400 => Ok(Status::BadRequest),
            412 => Ok(Status::PreconditionFailed),
            500 => Ok(Status::ActionFailed),
            other => Err(format!("unknown status code {other}")),
        }
    }
}

/// What every public operation returns. Failures are values, never panics.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub status: Status,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub do_actions: Option<Vec<Action>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub undo_actions: Option<Vec<Action>>,
}

impl Outcome {
    pub fn new(status: Status, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            do_actions: None,
            undo_actions: None,
        }
    }

    #[must_use]
    pub fn with_actions(mut self, do_actions: Vec<Action>, undo_actions: Vec<Action>) -> Self {
        self.do_actions = Some(do_actions);
        self.undo_actions = Some(undo_actions);
        self
    }

    #[must_use]
    pub fn code(&self) -> u16 {
        self.status.code()
    }

    /// Pair the returned do/undo lists back into an executable plan.
    #[must_use]
    pub fn to_plan(&self) -> Option<ActionPlan> {
        match (&self.do_actions, &self.undo_actions) {
            (Some(d), Some(u)) => ActionPlan::from_lists(d, u),
            _ => None,
        }
    }
}
