//! Apply stage: run each planned step's check, then its fix, in order.
//!
//! Side-effects:
//! - Emits `apply.attempt` and `apply.result` facts per step, plus an
//!   `apply.summary` fact.
//! - Stops at the first failing step and reports what ran up to there. Nothing
//!   is rolled back automatically.
//! - In `DryRun`, fixes are skipped and later checks see the state earlier
//!   steps would have produced.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Instant;

use log::Level;
use serde_json::json;

use crate::adapters::{DirTrash, Trash};
use crate::api::errors::{id_for, id_str, status_for, ErrorId};
use crate::api::LinkState;
use crate::fs::{inspect, ProbeResult};
use crate::logging::audit::{AuditCtx, AuditMode};
use crate::logging::{ts_for_mode, AuditSink, FactsEmitter, StageLogger};
use crate::steps::Check;
use crate::types::ids::{action_id, plan_id};
use crate::types::{Action, ActionPlan, ApplyMode, Outcome, Status};

mod executors;

pub(crate) fn run<E: FactsEmitter, A: AuditSink>(
    api: &LinkState<E, A>,
    plan: &ActionPlan,
    mode: ApplyMode,
) -> Outcome {
    let t0 = Instant::now();
    let dry = mode == ApplyMode::DryRun;
    let pid = plan_id(plan);
    let tctx = AuditCtx::new(
        &api.facts as &dyn FactsEmitter,
        pid.to_string(),
        ts_for_mode(mode),
        AuditMode {
            dry_run: dry,
            redact: dry,
        },
    );
    let slog = StageLogger::new(&tctx);
    api.audit.log(Level::Info, "apply: starting");

    if let Some(early) = validate(plan, dry) {
        slog.apply_summary()
            .field("steps", json!(plan.len()))
            .field("error_id", json!(id_str(ErrorId::E_INPUT)))
            .field("error", json!(early.message))
            .emit_failure();
        api.audit.log(Level::Warn, &format!("apply: {}", early.message));
        return early;
    }

    let default_bin;
    let bin: Option<&dyn Trash> = match &api.trash {
        Some(t) => Some(&**t),
        None if needs_trash(plan) => match DirTrash::from_config(&api.config) {
            Ok(t) => {
                default_bin = t;
                Some(&default_bin)
            }
            Err(e) => {
                let id = id_for(&e);
                slog.apply_summary()
                    .field("steps", json!(plan.len()))
                    .field("error_id", json!(id_str(id)))
                    .field("error", json!(e.msg))
                    .emit_failure();
                api.audit.log(Level::Warn, &format!("apply: {}", e.msg));
                return Outcome::new(status_for(id), format!("trash unavailable: {}", e.msg));
            }
        },
        None => None,
    };

    let mut done: Vec<Action> = Vec::new();
    let mut undone: Vec<Action> = Vec::new();
    // Dry runs only: state each path would be in after the steps so far.
    let mut simulated: HashMap<PathBuf, ProbeResult> = HashMap::new();

    for (idx, step) in plan.steps.iter().enumerate() {
        let act = &step.action;
        let aid = action_id(&pid, act, idx).to_string();
        let path = act.path().to_string();
        slog.apply_attempt()
            .action(aid.clone())
            .path(path.clone())
            .field("kind", json!(act.kind()))
            .emit_success();

        match execute(act, step.inverse.as_ref(), bin, dry, &mut simulated) {
            Ok(None) => {
                slog.apply_result()
                    .action(aid)
                    .path(path)
                    .field("kind", json!(act.kind()))
                    .field("changed", json!(false))
                    .emit_success();
            }
            Ok(Some(inverse)) => {
                let mut ev = slog
                    .apply_result()
                    .action(aid)
                    .path(path)
                    .field("kind", json!(act.kind()))
                    .field("changed", json!(true));
                if let Action::Untrash {
                    token: Some(token), ..
                } = &inverse
                {
                    ev = ev.field("token", json!(token.as_str()));
                }
                ev.emit_success();
                done.push(act.clone());
                undone.push(inverse);
            }
            Err(e) => {
                let id = executors::error_id(act, &e);
                slog.apply_result()
                    .action(aid)
                    .path(path)
                    .field("kind", json!(act.kind()))
                    .field("error_id", json!(id_str(id)))
                    .field("error", json!(e.msg))
                    .emit_failure();
                let message = format!("step {} ({}) failed: {}", idx + 1, act.kind(), e.msg);
                summary(&slog, t0, plan.len(), done.len(), Some((id, &message)));
                api.audit.log(Level::Warn, &format!("apply: {message}"));
                undone.reverse();
                return Outcome::new(Status::ActionFailed, message).with_actions(done, undone);
            }
        }
    }

    summary(&slog, t0, plan.len(), done.len(), None);
    api.audit.log(Level::Info, "apply: finished");

    if done.is_empty() {
        return Outcome::new(Status::NotModified, "nothing to change");
    }
    let message = if dry {
        format!("dry run: {} step(s) would change", done.len())
    } else {
        format!("applied {} step(s)", done.len())
    };
    undone.reverse();
    Outcome::new(Status::Applied, message).with_actions(done, undone)
}

/// Check one step and, outside dry runs, fix it. `Ok(None)` means nothing
/// needed doing; otherwise the returned action undoes the step.
fn execute(
    act: &Action,
    planned_inverse: Option<&Action>,
    bin: Option<&dyn Trash>,
    dry: bool,
    simulated: &mut HashMap<PathBuf, ProbeResult>,
) -> crate::types::errors::Result<Option<Action>> {
    let key = act.path().as_path().to_path_buf();
    let current = match simulated.get(&key) {
        Some(state) => state.clone(),
        None => inspect(&key)?,
    };
    let Check::NeedsFix { undo: hint } = executors::check(act, &current)? else {
        return Ok(None);
    };
    if dry {
        simulated.insert(key, executors::predicted(act));
        return Ok(Some(resolve_inverse(planned_inverse, hint)));
    }
    let derived = executors::fix(act, hint, bin)?;
    Ok(Some(resolve_inverse(planned_inverse, derived)))
}

/// The planner knows more than a single check (e.g. the link a repoint must put
/// back), so its inverse wins; only a token-less `Untrash` takes the derived
/// one, which carries the token.
fn resolve_inverse(planned: Option<&Action>, derived: Action) -> Action {
    match (planned, &derived) {
        (Some(Action::Untrash { token: None, .. }), Action::Untrash { .. }) | (None, _) => derived,
        (Some(p), _) => p.clone(),
    }
}

/// In `Commit`, every `Untrash` must name its entry before anything moves.
fn validate(plan: &ActionPlan, dry: bool) -> Option<Outcome> {
    if dry {
        return None;
    }
    plan.steps.iter().find_map(|s| match &s.action {
        Action::Untrash { token: None, path } => Some(Outcome::new(
            status_for(ErrorId::E_INPUT),
            format!("untrash {path}: missing token"),
        )),
        _ => None,
    })
}

fn needs_trash(plan: &ActionPlan) -> bool {
    plan.steps
        .iter()
        .any(|s| matches!(s.action, Action::Trash { .. } | Action::Untrash { .. }))
}

fn summary(
    slog: &StageLogger<'_>,
    t0: Instant,
    steps: usize,
    changed: usize,
    failure: Option<(ErrorId, &str)>,
) {
    let duration_ms = u64::try_from(t0.elapsed().as_millis()).unwrap_or(u64::MAX);
    let ev = slog
        .apply_summary()
        .field("steps", json!(steps))
        .field("changed", json!(changed))
        .field("duration_ms", json!(duration_ms));
    match failure {
        Some((id, msg)) => ev
            .field("error_id", json!(id_str(id)))
            .field("error", json!(msg))
            .emit_failure(),
        None => ev.emit_success(),
    }
}
