//! One-shot evaluation for `--eval`.

use crate::domain::CalcOutcome;
use crate::eval::ArithmeticEvaluator;
use crate::startup::AppConfig;
use crate::traits::Evaluator;

/// Evaluate `expression` with the configured variables.
pub fn evaluate_once(expression: &str, config: &AppConfig) -> CalcOutcome {
    let evaluator = ArithmeticEvaluator::new(config.eval_context());
    match evaluator.evaluate(expression) {
        Ok(value) => CalcOutcome::Value(value),
        Err(err) => {
            tracing::debug!(expression, error = %err, "one-shot evaluation failed");
            CalcOutcome::Error
        }
    }
}

/// Handle the --eval command: print the result, exit 1 on error.
pub fn handle_eval_command(expression: &str, config: &AppConfig) -> ! {
    let outcome = evaluate_once(expression, config);
    println!("{}", outcome);
    std::process::exit(match outcome {
        CalcOutcome::Value(_) => 0,
        CalcOutcome::Error => 1,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evaluate_once_uses_variables() {
        let config = AppConfig::default().with_variable("rev", 4.0);
        assert_eq!(
            evaluate_once("rev * Date", &config),
            CalcOutcome::Value(400.0)
        );
    }

    #[test]
    fn test_evaluate_once_error() {
        assert_eq!(
            evaluate_once("2 +", &AppConfig::default()),
            CalcOutcome::Error
        );
    }
}
