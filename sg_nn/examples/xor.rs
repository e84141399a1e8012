//! XOR problem training example.
//!
//! Demonstrates training a small tanh MLP on XOR with targets in {-1, 1}.
//! XOR is a classic non-linearly separable problem that requires a hidden layer.

use sg_nn::{sum_squared_error, Mlp, Module, NnError, Sgd};

fn main() -> Result<(), NnError> {
    let inputs = [
        vec![-1.0, -1.0],
        vec![-1.0, 1.0],
        vec![1.0, -1.0],
        vec![1.0, 1.0],
    ];
    let targets = [-1.0, 1.0, 1.0, -1.0];

    // 2 -> 8 -> 1
    let mlp = Mlp::seeded(2, &[8, 1], 2024)?;
    let params = mlp.parameters();
    let mut opt = Sgd::with_momentum(0.05, 0.9);

    println!("Training XOR network ({} parameters)...\n", params.len());

    for epoch in 0..500 {
        let preds = inputs
            .iter()
            .map(|x| mlp.call(x))
            .collect::<Result<Vec<_>, _>>()?;
        let loss = sum_squared_error(&preds, &targets)?;

        opt.zero_grad(&params);
        loss.backward();
        opt.step(&params);

        if epoch % 50 == 0 || epoch == 499 {
            println!("Epoch {:4}: loss = {:.6}", epoch, loss.data());
        }
    }

    println!("\nTesting trained network:");
    println!("========================");

    let mut correct = 0;
    for (input, &target) in inputs.iter().zip(targets.iter()) {
        let output = mlp.call(input)?.data();
        println!(
            "Input: [{:+.0}, {:+.0}] -> Output: {:+.4} (target: {:+.0})",
            input[0], input[1], output, target
        );
        if output.signum() == target {
            correct += 1;
        }
    }

    println!("\nAccuracy: {}/4", correct);
    if correct == 4 {
        println!("Successfully learned XOR!");
    }
    Ok(())
}
