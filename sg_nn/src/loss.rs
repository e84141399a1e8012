//! Loss functions.

use sg_core::Value;

use crate::error::{NnError, Result};

/// Sum of squared errors: Σ (pred - target)^2
pub fn sum_squared_error(preds: &[Value], targets: &[f64]) -> Result<Value> {
    if preds.len() != targets.len() {
        return Err(NnError::LengthMismatch {
            preds: preds.len(),
            targets: targets.len(),
        });
    }

    let mut terms = preds
        .iter()
        .zip(targets)
        .map(|(pred, &target)| (pred - target).powf(2.0));

    let first = terms.next().ok_or(NnError::EmptyBatch)?;
    Ok(terms.fold(first, |acc, term| acc + term))
}

/// Mean Squared Error loss: mean((pred - target)^2)
pub fn mse_loss(preds: &[Value], targets: &[f64]) -> Result<Value> {
    let sse = sum_squared_error(preds, targets)?;
    Ok(sse / preds.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use sg_core::value;

    #[test]
    fn test_mse_loss_zero() {
        let preds = vec![value(1.0), value(2.0), value(3.0)];
        let loss = mse_loss(&preds, &[1.0, 2.0, 3.0]).unwrap();
        assert!(loss.data().abs() < 1e-12);
    }

    #[test]
    fn test_mse_loss_nonzero() {
        let preds = vec![value(0.0), value(0.0)];
        let loss = mse_loss(&preds, &[1.0, 1.0]).unwrap();
        assert_relative_eq!(loss.data(), 1.0);
    }

    #[test]
    fn test_sum_squared_error_gradient() {
        // d/dp (p - t)^2 = 2(p - t)
        let preds = vec![value(0.5), value(-1.0)];
        let loss = sum_squared_error(&preds, &[1.0, 1.0]).unwrap();
        assert_relative_eq!(loss.data(), 0.25 + 4.0);

        loss.backward();
        assert_relative_eq!(preds[0].grad(), -1.0);
        assert_relative_eq!(preds[1].grad(), -4.0);
    }

    #[test]
    fn test_mse_loss_gradient_is_scaled() {
        let preds = vec![value(0.5), value(-1.0)];
        mse_loss(&preds, &[1.0, 1.0]).unwrap().backward();
        assert_relative_eq!(preds[0].grad(), -0.5);
        assert_relative_eq!(preds[1].grad(), -2.0);
    }

    #[test]
    fn test_loss_shape_errors() {
        let preds = vec![value(0.0)];
        assert_eq!(
            mse_loss(&preds, &[1.0, 2.0]).unwrap_err(),
            NnError::LengthMismatch { preds: 1, targets: 2 }
        );
        assert_eq!(sum_squared_error(&[], &[]).unwrap_err(), NnError::EmptyBatch);
    }
}
