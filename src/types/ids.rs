//! Deterministic UUIDv5 identifiers for plans and actions.
//!
//! The UUID namespace is derived from a stable tag (`NS_TAG`) so that
//! `plan_id` and `action_id` are reproducible across runs for the same
//! serialized action sequence.
use std::fmt::Write;
use uuid::Uuid;

use super::plan::{Action, ActionPlan};
use crate::constants::NS_TAG;

fn namespace() -> Uuid {
    Uuid::new_v5(&Uuid::NAMESPACE_URL, NS_TAG.as_bytes())
}

/// Serialize an action into a stable, human-readable string used for UUIDv5 input.
/// Trash tokens are left out so a plan keeps its ID once tokens are filled in.
fn serialize_action(a: &Action) -> String {
    match a {
        Action::EnsureLink {
            symlink_path,
            target_path,
        } => format!("L:{}->{}", symlink_path, target_path.display()),
        Action::EnsureNoLink {
            path,
            expected_target,
        } => match expected_target {
            Some(t) => format!("N:{}->{}", path, t.display()),
            None => format!("N:{path}"),
        },
        Action::Trash { path } => format!("T:{path}"),
        Action::Untrash { path, .. } => format!("U:{path}"),
    }
}

/// Compute a deterministic UUIDv5 for a plan by serializing its do list in order.
#[must_use]
pub fn plan_id(plan: &ActionPlan) -> Uuid {
    let ns = namespace();
    let mut s = String::new();
    for step in &plan.steps {
        s.push_str(&serialize_action(&step.action));
        s.push('\n');
    }
    Uuid::new_v5(&ns, s.as_bytes())
}

/// Compute a deterministic UUIDv5 for an action from the plan ID, the action's
/// serialized form and its position.
#[must_use]
pub fn action_id(plan_id: &Uuid, action: &Action, idx: usize) -> Uuid {
    let mut s = serialize_action(action);
    let _ = write!(s, "#{idx}");
    Uuid::new_v5(plan_id, s.as_bytes())
}
