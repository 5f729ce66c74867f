//! Planner: turn a probe and a desired state into a decision.

use std::path::Path;

use serde_json::json;

use super::errors::{id_str, status_for, ErrorId};
use super::LinkState;
use crate::fs::{inspect, ProbeResult};
use crate::logging::audit::{AuditCtx, AuditMode};
use crate::logging::{ts_for_mode, AuditSink, FactsEmitter, StageLogger};
use crate::types::errors::Result;
use crate::types::ids::{action_id, plan_id};
use crate::types::{
    Action, ActionPlan, ApplyMode, Decision, DesiredState, LinkPath, Outcome, Status,
};

pub const BLOCK_REPLACE_DIR: &str = "must replace dir but instructed not to";
pub const BLOCK_REPLACE_FILE: &str = "must replace file but instructed not to";
pub const BLOCK_REPLACE_SYMLINK: &str = "must replace symlink but instructed not to";
pub const BLOCK_CREATE: &str = "must create symlink but instructed not to";

/// Decide how to reach `desired` from `current`. Pure; first matching rule wins:
///
/// 1. a real file or directory is in the way: trash it (if allowed), then link;
/// 2. a symlink points elsewhere: remove it (if allowed), then link;
/// 3. nothing is there: link (if allowed);
/// 4. the symlink is already correct.
#[must_use]
pub fn evaluate(current: &ProbeResult, desired: &DesiredState) -> Decision {
    let path = &desired.symlink_path;
    let target = desired.target_path.as_path();
    let policy = &desired.policy;

    if current.exists && !current.is_symlink {
        if !policy.may_displace(current.is_directory) {
            let reason = if current.is_directory {
                BLOCK_REPLACE_DIR
            } else {
                BLOCK_REPLACE_FILE
            };
            return Decision::Blocked(reason.to_string());
        }
        return Decision::Plan(ActionPlan::from_pairs(vec![
            (
                Action::Trash { path: path.clone() },
                Action::Untrash {
                    token: None,
                    path: path.clone(),
                },
            ),
            (
                Action::ensure_link(path, target),
                Action::ensure_no_link(path, Some(target)),
            ),
        ]));
    }

    if current.is_symlink && !current.points_at(target) {
        if !policy.replace_symlink {
            return Decision::Blocked(BLOCK_REPLACE_SYMLINK.to_string());
        }
        let previous = current.current_target.as_deref().unwrap_or(Path::new(""));
        return Decision::Plan(ActionPlan::from_pairs(vec![
            (
                Action::ensure_no_link(path, None),
                Action::ensure_link(path, previous),
            ),
            (
                Action::ensure_link(path, target),
                Action::ensure_no_link(path, Some(target)),
            ),
        ]));
    }

    if !current.exists {
        if !policy.create {
            return Decision::Blocked(BLOCK_CREATE.to_string());
        }
        return Decision::Plan(ActionPlan::from_pairs(vec![(
            Action::ensure_link(path, target),
            Action::ensure_no_link(path, None),
        )]));
    }

    Decision::AlreadyFixed
}

/// Decide how to make sure no symlink is at `path`.
///
/// A real file or directory is never scheduled for removal. With
/// `expected_target`, a link pointing elsewhere is left alone and reported.
#[must_use]
pub fn evaluate_removal(
    current: &ProbeResult,
    path: &LinkPath,
    expected_target: Option<&Path>,
) -> Decision {
    if current.exists && !current.is_symlink {
        return Decision::Blocked(format!(
            "refusing to remove non-symlink ({})",
            current.kind()
        ));
    }
    if !current.exists {
        return Decision::AlreadyFixed;
    }
    if let Some(expected) = expected_target {
        if !current.points_at(expected) {
            return Decision::Blocked(format!(
                "symlink points elsewhere ({} instead of {})",
                current
                    .current_target
                    .as_deref()
                    .unwrap_or(Path::new(""))
                    .display(),
                expected.display()
            ));
        }
    }
    let previous = current.current_target.as_deref().unwrap_or(Path::new(""));
    Decision::Plan(ActionPlan::from_pairs(vec![(
        Action::ensure_no_link(path, expected_target),
        Action::ensure_link(path, previous),
    )]))
}

pub(super) fn rejected(id: ErrorId, msg: impl Into<String>) -> Outcome {
    Outcome::new(status_for(id), msg)
}

/// Probe `desired.symlink_path`, evaluate, and emit plan facts.
///
/// # Errors
///
/// Returns an `Io` error if the probe fails.
pub(super) fn decide<E: FactsEmitter, A: AuditSink>(
    api: &LinkState<E, A>,
    desired: &DesiredState,
    mode: ApplyMode,
) -> Result<Decision> {
    let current = inspect(desired.symlink_path.as_path())?;
    let decision = evaluate(&current, desired);
    emit_decision(api, &desired.symlink_path, &current, &decision, mode);
    Ok(decision)
}

pub(super) fn evaluate_and_plan<E: FactsEmitter, A: AuditSink>(
    api: &LinkState<E, A>,
    symlink_path: &Path,
    target_path: &Path,
    policy: crate::policy::LinkPolicy,
    mode: ApplyMode,
) -> Outcome {
    let desired = match DesiredState::new(symlink_path, target_path, policy) {
        Ok(d) => d,
        Err(e) => return rejected(ErrorId::E_INPUT, e.msg),
    };
    match decide(api, &desired, mode) {
        Ok(decision) => outcome_of(decision, &desired.symlink_path, || {
            format!(
                "{} already points to {}",
                desired.symlink_path,
                desired.target_path.display()
            )
        }),
        Err(e) => rejected(ErrorId::E_IO, e.msg),
    }
}

pub(super) fn evaluate_removal_for<E: FactsEmitter, A: AuditSink>(
    api: &LinkState<E, A>,
    path: &Path,
    expected_target: Option<&Path>,
    mode: ApplyMode,
) -> Outcome {
    let path = match LinkPath::new(path) {
        Ok(p) => p,
        Err(e) => return rejected(ErrorId::E_INPUT, e.msg),
    };
    let current = match inspect(path.as_path()) {
        Ok(c) => c,
        Err(e) => return rejected(ErrorId::E_IO, e.msg),
    };
    let decision = evaluate_removal(&current, &path, expected_target);
    emit_decision(api, &path, &current, &decision, mode);
    outcome_of(decision, &path, || format!("no symlink at {path}"))
}

fn outcome_of(decision: Decision, path: &LinkPath, fixed_msg: impl FnOnce() -> String) -> Outcome {
    match decision {
        Decision::AlreadyFixed => Outcome::new(Status::NotModified, fixed_msg()),
        Decision::Blocked(reason) => {
            rejected(ErrorId::E_POLICY, format!("{path}: {reason}"))
        }
        Decision::Plan(plan) => Outcome::new(
            Status::Applied,
            format!("planned {} step(s) for {path}", plan.len()),
        )
        .with_actions(plan.do_actions(), plan.undo_actions()),
    }
}

fn emit_decision<E: FactsEmitter, A: AuditSink>(
    api: &LinkState<E, A>,
    path: &LinkPath,
    current: &ProbeResult,
    decision: &Decision,
    mode: ApplyMode,
) {
    let empty = ActionPlan::default();
    let plan = match decision {
        Decision::Plan(p) => p,
        _ => &empty,
    };
    let pid = plan_id(plan);
    let tctx = AuditCtx::new(
        &api.facts as &dyn FactsEmitter,
        pid.to_string(),
        ts_for_mode(mode),
        AuditMode {
            dry_run: mode == ApplyMode::DryRun,
            redact: mode == ApplyMode::DryRun,
        },
    );
    let slog = StageLogger::new(&tctx);
    let base = json!({
        "path": path.to_string(),
        "current_kind": current.kind(),
        "current_target": current.current_target.as_ref().map(|t| t.display().to_string()),
    });
    match decision {
        Decision::AlreadyFixed => {
            slog.plan().merge(&base).field("outcome", json!("already_fixed")).emit_success();
        }
        Decision::Blocked(reason) => {
            slog.plan()
                .merge(&base)
                .field("outcome", json!("blocked"))
                .field("reason", json!(reason))
                .field("error_id", json!(id_str(ErrorId::E_POLICY)))
                .emit_failure();
        }
        Decision::Plan(plan) => {
            for (idx, step) in plan.steps.iter().enumerate() {
                slog.plan()
                    .merge(&base)
                    .action(action_id(&pid, &step.action, idx).to_string())
                    .field("outcome", json!("planned"))
                    .field("kind", json!(step.action.kind()))
                    .emit_success();
            }
        }
    }
}
