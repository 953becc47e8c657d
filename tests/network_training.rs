use approx::assert_relative_eq;
use perceptron::{f, loss, Activations, Dataset, Losses, Matrix, Network, Optimizers};

fn train_gate(
    data: &Dataset,
    layer_sizes: &[usize],
    activations: &[Activations],
    epochs: usize,
) -> Network {
    let mut nn = Network::new(
        layer_sizes,
        activations,
        Losses::CrossEntropy,
        Optimizers::Momentum,
        0.05,
        0.9,
    )
    .unwrap();

    for _ in 0..epochs {
        for (x, y) in data.0.iter().zip(data.1.iter()) {
            nn.train_sample(x, y);
        }
    }

    nn
}

fn separates(nn: &Network, data: &Dataset) -> bool {
    data.0.iter().zip(data.1.iter()).all(|(x, y)| {
        let p = nn.forward(x).get(0, 0);
        (p > 0.5) == (y.get(0, 0) > 0.5)
    })
}

/// Weights start random, so give each task a few independent starts.
fn learns(
    data: &Dataset,
    layer_sizes: &[usize],
    activations: &[Activations],
    epochs: usize,
) -> bool {
    (0..3).any(|_| separates(&train_gate(data, layer_sizes, activations, epochs), data))
}

#[test]
fn and_gate_converges() {
    let data = f::and();
    let relu_sigmoid = [Activations::Relu, Activations::Sigmoid];
    assert!(learns(&data, &[2, 4, 1], &relu_sigmoid, 5000));
}

#[test]
fn and_gate_single_run_outputs() {
    let data = f::and();
    let nn = (0..3)
        .map(|_| {
            let activations = [Activations::Relu, Activations::Sigmoid];
            train_gate(&data, &[2, 4, 1], &activations, 5000)
        })
        .find(|nn| separates(nn, &data))
        .expect("AND did not converge in three starts");

    let p = |a: f64, b: f64| nn.forward(&Matrix::row_vector(&[a, b])).get(0, 0);
    assert!(p(1., 1.) > 0.5);
    assert!(p(0., 0.) < 0.5);
    assert!(p(0., 1.) < 0.5);
    assert!(p(1., 0.) < 0.5);
}

#[test]
fn or_and_nand_converge() {
    let relu_sigmoid = [Activations::Relu, Activations::Sigmoid];
    assert!(learns(&f::or(), &[2, 4, 1], &relu_sigmoid, 5000));
    assert!(learns(&f::nand(), &[2, 4, 1], &relu_sigmoid, 5000));
}

#[test]
fn xor_converges_with_tanh_hidden_layers() {
    let activations = [Activations::Tanh, Activations::Tanh, Activations::Sigmoid];
    assert!(learns(&f::xor(), &[2, 4, 4, 1], &activations, 5000));
}

#[test]
fn repeated_sample_loss_never_increases() {
    let mut nn = Network::new(
        &[3, 5, 1],
        &[Activations::Tanh, Activations::Sigmoid],
        Losses::CrossEntropy,
        Optimizers::GradientDescent,
        0.01,
        0.,
    )
    .unwrap();

    let x = Matrix::row_vector(&[0.5, -1., 0.25]);
    let y = Matrix::row_vector(&[1.]);

    let losses = (0..300).map(|_| nn.train_sample(&x, &y)).collect::<Vec<f64>>();
    for w in losses.windows(2) {
        assert!(w[1] <= w[0] + 1e-12, "loss rose from {} to {}", w[0], w[1]);
    }
    assert!(losses[299] < losses[0]);
}

#[test]
fn forward_twice_is_bit_identical() {
    let nn = Network::new(
        &[4, 16, 16, 1],
        &[Activations::Tanh, Activations::Tanh, Activations::Sigmoid],
        Losses::CrossEntropy,
        Optimizers::Momentum,
        0.05,
        0.9,
    )
    .unwrap();

    let x = Matrix::row_vector(&[1., 0., 1., 1.]);
    let first = nn.forward(&x);
    let second = nn.forward(&x);
    assert_eq!(first.to_vec(), second.to_vec());
}

#[test]
fn momentum_zero_trains_like_gradient_descent() {
    let sizes = [2, 3, 2];
    let activations = [Activations::Sigmoid, Activations::Tanh];

    let build = |optimizer: Optimizers| {
        Network::new(
            &sizes,
            &activations,
            Losses::MeanSquaredError,
            optimizer,
            0.1,
            0.,
        )
        .unwrap()
    };
    let mut plain = build(Optimizers::GradientDescent);
    let mut heavy = build(Optimizers::Momentum);

    for (dst, src) in heavy.layers_mut().iter_mut().zip(plain.layers().iter()) {
        dst.w = src.w.clone();
        dst.b = src.b.clone();
    }

    let (x, y) = f::from_rows(
        &[vec![0., 1.], vec![1., 1.], vec![0.5, -0.5]],
        &[vec![1., 0.], vec![0., 1.], vec![0.5, 0.5]],
    );

    for _ in 0..20 {
        for (xi, yi) in x.iter().zip(y.iter()) {
            assert_eq!(plain.train_sample(xi, yi), heavy.train_sample(xi, yi));
        }
    }

    for xi in x.iter() {
        assert_eq!(plain.forward(xi).to_vec(), heavy.forward(xi).to_vec());
    }
}

fn mse_of(nn: &Network, x: &Matrix, y: &Matrix) -> f64 {
    loss::mse(&nn.forward(x), y)
}

#[test]
fn updates_follow_numerical_gradient() {
    let lr = 1e-6;
    let h = 1e-5;
    let nn = Network::new(
        &[3, 4, 2],
        &[Activations::Tanh, Activations::Sigmoid],
        Losses::MeanSquaredError,
        Optimizers::GradientDescent,
        lr,
        0.,
    )
    .unwrap();

    let x = Matrix::row_vector(&[0.2, -0.4, 0.9]);
    let y = Matrix::row_vector(&[1., 0.]);

    let mut trained = nn.clone();
    trained.train_sample(&x, &y);

    for l in 0..nn.layers().len() {
        let (rows, cols) = nn.layers()[l].w.shape();
        for r in 0..rows {
            for c in 0..cols {
                let mut plus = nn.clone();
                let mut minus = nn.clone();
                plus.layers_mut()[l].w[(r, c)] += h;
                minus.layers_mut()[l].w[(r, c)] -= h;
                let numeric = (mse_of(&plus, &x, &y) - mse_of(&minus, &x, &y)) / (2. * h);

                let applied = (nn.layers()[l].w.get(r, c) - trained.layers()[l].w.get(r, c)) / lr;
                assert_relative_eq!(applied, numeric, epsilon = 1e-6, max_relative = 1e-3);
            }
        }

        for c in 0..cols {
            let mut plus = nn.clone();
            let mut minus = nn.clone();
            plus.layers_mut()[l].b[(0, c)] += h;
            minus.layers_mut()[l].b[(0, c)] -= h;
            let numeric = (mse_of(&plus, &x, &y) - mse_of(&minus, &x, &y)) / (2. * h);

            let applied = (nn.layers()[l].b.get(0, c) - trained.layers()[l].b.get(0, c)) / lr;
            assert_relative_eq!(applied, numeric, epsilon = 1e-6, max_relative = 1e-3);
        }
    }
}

#[test]
fn parity_network_reduces_loss() {
    let (x, y) = f::parity(3);
    let mut nn = Network::new(
        &[3, 8, 1],
        &[Activations::Tanh, Activations::Sigmoid],
        Losses::CrossEntropy,
        Optimizers::Momentum,
        0.05,
        0.9,
    )
    .unwrap();

    let epoch = |nn: &mut Network| {
        x.iter()
            .zip(y.iter())
            .map(|(xi, yi)| nn.train_sample(xi, yi))
            .sum::<f64>()
    };

    let first = epoch(&mut nn);
    let mut last = first;
    for _ in 0..2000 {
        last = epoch(&mut nn);
    }
    assert!(last < first);
}
