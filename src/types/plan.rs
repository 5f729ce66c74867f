use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::linkpath::LinkPath;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ApplyMode {
    /// Run every check, mutate nothing.
    #[default]
    DryRun,
    Commit,
}

/// Opaque handle returned by a trash collaborator for a displaced entry.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrashToken(String);

impl TrashToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TrashToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One primitive operation in a do or undo list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    /// Make `symlink_path` a symlink whose stored text is exactly `target_path`.
    EnsureLink {
        symlink_path: LinkPath,
        target_path: PathBuf,
    },
    /// Remove the symlink at `path`; with `expected_target`, only if it points there.
    EnsureNoLink {
        path: LinkPath,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        expected_target: Option<PathBuf>,
    },
    /// Move whatever occupies `path` into the trash holding area.
    Trash { path: LinkPath },
    /// Move a trashed entry back to `path`. `token` stays `None` in a plan preview
    /// until the paired `Trash` has run.
    Untrash {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        token: Option<TrashToken>,
        path: LinkPath,
    },
}

impl Action {
    #[must_use]
    pub fn path(&self) -> &LinkPath {
        match self {
            Action::EnsureLink { symlink_path, .. } => symlink_path,
            Action::EnsureNoLink { path, .. }
            | Action::Trash { path }
            | Action::Untrash { path, .. } => path,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Action::EnsureLink { .. } => "ensure_link",
            Action::EnsureNoLink { .. } => "ensure_no_link",
            Action::Trash { .. } => "trash",
            Action::Untrash { .. } => "untrash",
        }
    }

    pub(crate) fn ensure_link(symlink_path: &LinkPath, target_path: &Path) -> Self {
        Action::EnsureLink {
            symlink_path: symlink_path.clone(),
            target_path: target_path.to_path_buf(),
        }
    }

    pub(crate) fn ensure_no_link(path: &LinkPath, expected_target: Option<&Path>) -> Self {
        Action::EnsureNoLink {
            path: path.clone(),
            expected_target: expected_target.map(Path::to_path_buf),
        }
    }
}

/// A forward action paired with the action that reverses it.
///
/// `inverse` is `None` for steps built from a bare action list; the executor then
/// derives it from the step's own check.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedStep {
    pub action: Action,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inverse: Option<Action>,
}

/// Ordered do list with a per-step inverse; the undo list is the inverses reversed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionPlan {
    pub steps: Vec<PlannedStep>,
}

impl ActionPlan {
    /// Build a plan from `(action, inverse)` pairs in execution order.
    #[must_use]
    pub fn from_pairs(pairs: Vec<(Action, Action)>) -> Self {
        let steps = pairs
            .into_iter()
            .map(|(action, inverse)| PlannedStep {
                action,
                inverse: Some(inverse),
            })
            .collect();
        Self { steps }
    }

    /// Build a plan whose inverses are derived while it executes.
    #[must_use]
    pub fn from_actions(actions: Vec<Action>) -> Self {
        let steps = actions
            .into_iter()
            .map(|action| PlannedStep {
                action,
                inverse: None,
            })
            .collect();
        Self { steps }
    }

    /// Rebuild a plan from a do list and the undo list that came with it.
    ///
    /// Returns `None` unless both lists have the same length, since the pairing is
    /// positional (`do[i]` is undone by `undo[n - 1 - i]`).
    #[must_use]
    pub fn from_lists(do_actions: &[Action], undo_actions: &[Action]) -> Option<Self> {
        if do_actions.len() != undo_actions.len() {
            return None;
        }
        let pairs = do_actions
            .iter()
            .cloned()
            .zip(undo_actions.iter().rev().cloned())
            .collect();
        Some(Self::from_pairs(pairs))
    }

    #[must_use]
    pub fn do_actions(&self) -> Vec<Action> {
        self.steps.iter().map(|s| s.action.clone()).collect()
    }

    #[must_use]
    pub fn undo_actions(&self) -> Vec<Action> {
        self.steps
            .iter()
            .rev()
            .filter_map(|s| s.inverse.clone())
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// What the planner concluded for one desired state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Decision {
    AlreadyFixed,
    Blocked(String),
    Plan(ActionPlan),
}
