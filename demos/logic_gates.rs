use perceptron::{f, Activations, Dataset, Losses, Network, Optimizers};
use tracing::info;
use tracing_subscriber::EnvFilter;

struct Task {
    name: &'static str,
    data: Dataset,
    layers: Vec<usize>,
    activations: Vec<Activations>,
    epochs: usize,
    log_interval: usize,
}

fn run(task: Task) -> Result<(), perceptron::Error> {
    let mut nn = Network::new(
        &task.layers,
        &task.activations,
        Losses::CrossEntropy,
        Optimizers::Momentum,
        0.05,
        0.9,
    )?;

    let (x, y) = task.data;

    let mut trainer = nn.get_trainer();
    trainer
        .set_epochs(task.epochs)
        .set_log_interval(task.log_interval)
        .verbose()
        .train(&x, &y);

    let predictions = trainer.predict(&x);

    println!("\n[{}] Final Predictions:", task.name);
    for ((input, pred), target) in x.iter().zip(predictions.iter()).zip(y.iter()) {
        println!(
            "Input: {:?} -> {:.4} (target: {})",
            input.to_vec(),
            pred.get(0, 0),
            target.get(0, 0)
        );
    }
    info!(
        task = task.name,
        accuracy = f::binary_accuracy(&predictions, &y),
        "done"
    );

    Ok(())
}

fn main() -> Result<(), perceptron::Error> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let relu_sigmoid = vec![Activations::Relu, Activations::Sigmoid];

    let tasks = vec![
        Task {
            name: "AND",
            data: f::and(),
            layers: vec![2, 4, 1],
            activations: relu_sigmoid.clone(),
            epochs: 5000,
            log_interval: 1000,
        },
        Task {
            name: "OR",
            data: f::or(),
            layers: vec![2, 4, 1],
            activations: relu_sigmoid.clone(),
            epochs: 5000,
            log_interval: 1000,
        },
        Task {
            name: "XOR",
            data: f::xor(),
            layers: vec![2, 4, 4, 1],
            activations: vec![Activations::Relu, Activations::Relu, Activations::Sigmoid],
            epochs: 10000,
            log_interval: 2000,
        },
        Task {
            name: "NAND",
            data: f::nand(),
            layers: vec![2, 4, 1],
            activations: relu_sigmoid,
            epochs: 5000,
            log_interval: 1000,
        },
        // Slow: 4 -> 16 -> 16 -> 1 over all sixteen patterns.
        Task {
            name: "4-bit Parity",
            data: f::parity(4),
            layers: vec![4, 16, 16, 1],
            activations: vec![Activations::Tanh, Activations::Tanh, Activations::Sigmoid],
            epochs: 200000,
            log_interval: 20000,
        },
    ];

    for task in tasks {
        run(task)?;
    }

    println!("All tasks completed.");
    Ok(())
}
