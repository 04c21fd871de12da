//! The unit of work a node wraps.

use serde_json::Value;

use crate::error::StepError;

/// A pluggable processing step.
///
/// The engine calls `process` at most once per node per run. Inputs and
/// outputs are opaque to the engine; only the step and the input resolver
/// give them meaning.
pub trait Step {
  /// Turn the resolved input into this step's output.
  fn process(&self, input: Value) -> Result<Value, StepError>;
}

impl<F> Step for F
where
  F: Fn(Value) -> Result<Value, StepError>,
{
  fn process(&self, input: Value) -> Result<Value, StepError> {
    self(input)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn test_closure_is_a_step() {
    let double = |input: Value| -> Result<Value, StepError> {
      let n = input
        .as_i64()
        .ok_or_else(|| StepError::invalid_input("expected integer"))?;
      Ok(json!(n * 2))
    };

    assert_eq!(double.process(json!(21)).unwrap(), json!(42));
    assert!(matches!(
      double.process(json!("x")),
      Err(StepError::InvalidInput { .. })
    ));
  }
}
