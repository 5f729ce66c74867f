mod input_errors;
mod policy_gate;
