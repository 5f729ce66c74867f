//! Facade for the API module; delegates to submodules under `src/api/`.

use std::path::Path;

use crate::adapters::Trash;
use crate::config::Config;
use crate::logging::{AuditSink, FactsEmitter};
use crate::policy::LinkPolicy;
use crate::types::errors::Result;
use crate::types::{Action, ActionPlan, ApplyMode, Decision, DesiredState, Outcome};

mod apply;
pub mod errors;
mod plan;

pub use plan::{
    evaluate, evaluate_removal, BLOCK_CREATE, BLOCK_REPLACE_DIR, BLOCK_REPLACE_FILE,
    BLOCK_REPLACE_SYMLINK,
};

/// Entry point: plans and applies declarative symlink states.
pub struct LinkState<E: FactsEmitter, A: AuditSink> {
    facts: E,
    audit: A,
    config: Config,
    trash: Option<Box<dyn Trash>>, // None: DirTrash from `config`, resolved on demand
}

impl<E: FactsEmitter, A: AuditSink> LinkState<E, A> {
    pub fn new(facts: E, audit: A, config: Config) -> Self {
        Self {
            facts,
            audit,
            config,
            trash: None,
        }
    }

    #[must_use]
    pub fn with_trash(mut self, trash: Box<dyn Trash>) -> Self {
        self.trash = Some(trash);
        self
    }

    /// Probe `symlink_path` and plan how to make it a symlink to `target_path`.
    /// Never mutates.
    ///
    /// `200` carries the do/undo lists, `304` means already fixed, `400` a bad
    /// path and `412` a change the policy forbids.
    pub fn evaluate_and_plan(
        &self,
        symlink_path: impl AsRef<Path>,
        target_path: impl AsRef<Path>,
        policy: LinkPolicy,
    ) -> Outcome {
        plan::evaluate_and_plan(
            self,
            symlink_path.as_ref(),
            target_path.as_ref(),
            policy,
            ApplyMode::DryRun,
        )
    }

    /// Typed variant of [`evaluate_and_plan`](Self::evaluate_and_plan).
    ///
    /// # Errors
    ///
    /// Returns an `Io` error if the path cannot be probed.
    pub fn plan(&self, desired: &DesiredState) -> Result<Decision> {
        plan::decide(self, desired, ApplyMode::DryRun)
    }

    /// Execute the plan's steps in order, each after its own check, stopping at
    /// the first failure.
    pub fn apply(&self, plan: &ActionPlan, mode: ApplyMode) -> Outcome {
        apply::run(self, plan, mode)
    }

    /// Plan and apply in one call. A second call with the same arguments
    /// returns `304`.
    pub fn ensure(
        &self,
        symlink_path: impl AsRef<Path>,
        target_path: impl AsRef<Path>,
        policy: LinkPolicy,
        mode: ApplyMode,
    ) -> Outcome {
        let planned = plan::evaluate_and_plan(
            self,
            symlink_path.as_ref(),
            target_path.as_ref(),
            policy,
            mode,
        );
        self.apply_planned(planned, mode)
    }

    /// Plan removal of the symlink at `path`. With `expected_target`, only a
    /// link pointing exactly there is scheduled. Never mutates.
    pub fn evaluate_removal(
        &self,
        path: impl AsRef<Path>,
        expected_target: Option<&Path>,
    ) -> Outcome {
        plan::evaluate_removal_for(self, path.as_ref(), expected_target, ApplyMode::DryRun)
    }

    /// Plan and apply removal in one call.
    pub fn remove(
        &self,
        path: impl AsRef<Path>,
        expected_target: Option<&Path>,
        mode: ApplyMode,
    ) -> Outcome {
        let planned = plan::evaluate_removal_for(self, path.as_ref(), expected_target, mode);
        self.apply_planned(planned, mode)
    }

    /// Execute an undo list such as one returned by [`apply`](Self::apply).
    /// The returned undo list redoes what was undone.
    pub fn undo(&self, undo_actions: &[Action], mode: ApplyMode) -> Outcome {
        self.apply(&ActionPlan::from_actions(undo_actions.to_vec()), mode)
    }

    fn apply_planned(&self, planned: Outcome, mode: ApplyMode) -> Outcome {
        match planned.to_plan() {
            Some(plan) if planned.status == crate::types::Status::Applied => {
                self.apply(&plan, mode)
            }
            _ => planned,
        }
    }
}
