//! CLI demo for the scalar autodiff engine.
//!
//! Checks gradients of a small expression against finite differences, then trains
//! MLP(3, [4, 4, 1]) on four fixed examples and prints the final predictions.
//!
//! Training is configured through `SCALARGRAD_*` environment variables (see
//! `sg_nn::config`); log verbosity through `RUST_LOG`.

use log::info;
use sg_core::{check_gradients, value, Value};
use sg_nn::{fit, Mlp, Module, NnError, TrainConfig};

fn main() -> Result<(), NnError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = TrainConfig::from_env()?;

    gradient_demo();
    train_demo(&config)
}

fn gradient_demo() {
    println!("=== Reverse-Mode Autodiff Demo ===\n");

    // c = a * b
    let a = Value::labeled("a", 3.0);
    let b = Value::labeled("b", 2.0);
    let c = &a * &b;
    c.set_label("c");
    c.backward();
    println!("c = a * b");
    for v in [&a, &b, &c] {
        println!("  {}", v);
    }

    // y = tanh(x)
    let x = value(2.0);
    let y = x.tanh();
    y.backward();
    println!("\ny = tanh(x) at x = 2.0");
    println!("  y     = {:.10}", y.data());
    println!(
        "  dy/dx = {:.10} (expected: 1 - tanh(2)^2 = {:.10})\n",
        x.grad(),
        1.0 - 2.0_f64.tanh().powi(2)
    );

    // z = (x*y + tanh(x)) / (y + 2)
    let point = [1.5, 2.5];
    let check = check_gradients(
        |v| (&v[0] * &v[1] + v[0].tanh()) / (&v[1] + 2.0),
        &point,
        1e-7,
    );
    println!("z = (x*y + tanh(x)) / (y + 2) at x = {}, y = {}", point[0], point[1]);
    println!(
        "  autodiff: dz/dx = {:.10}, dz/dy = {:.10}",
        check.autodiff[0], check.autodiff[1]
    );
    println!(
        "  fd:       dz/dx = {:.10}, dz/dy = {:.10}",
        check.numeric[0], check.numeric[1]
    );
    println!("  max |autodiff - fd| = {:.2e}\n", check.max_error());
}

fn train_demo(config: &TrainConfig) -> Result<(), NnError> {
    let xs = vec![
        vec![2.0, 3.0, -1.0],
        vec![3.0, -1.0, 0.5],
        vec![0.5, 1.0, 1.0],
        vec![1.0, 1.0, -1.0],
    ];
    let ys = vec![1.0, -1.0, -1.0, 1.0];

    let mlp = Mlp::seeded(3, &[4, 4, 1], config.seed)?;
    println!("=== Training MLP(3, [4, 4, 1]) ===\n");
    info!(
        "{} parameters, {} steps, learning rate {}, seed {}",
        mlp.num_parameters(),
        config.steps,
        config.learning_rate,
        config.seed
    );

    let report = fit(&mlp, &xs, &ys, config)?;

    if let Some(loss) = report.final_loss() {
        println!("Final loss: {:.6}", loss);
    }
    println!("Final predictions:");
    for (pred, target) in report.predictions.iter().zip(&ys) {
        println!("  {:+.6} (target {:+.1})", pred, target);
    }
    Ok(())
}
