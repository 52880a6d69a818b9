//! Trains a sentiment classifier on prepared review splits and reports
//! accuracy per split plus the most relevant vocabulary words.

use std::cmp::Ordering;
use std::env;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use linear_models::check::check_labels;
use linear_models::logreg::{self, LogisticRegression, Penalty};
use linear_models::loss::{binary_cross_entropy, hinge_loss};
use linear_models::{metrics, naive_bayes, svm, LinearModel};
use log::{info, warn};
use ndarray::{Array1, ArrayView1, ArrayView2};
use text_features::{dataset, Vocabulary};

const DEFAULT_LAMBDA: f64 = 0.0;
const DEFAULT_LEARNING_RATE: f64 = 1e-3;
const DEFAULT_STEPS: usize = 1000;

const USAGE: &str = "usage: sentiment <nb|logreg|logreg-l1|svm> <data-dir> [vocabulary] [--save <path>]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    NaiveBayes,
    LogReg,
    LogRegL1,
    Svm,
}

fn main() -> Result<()> {
    env_logger::init();

    let mut args = env::args().skip(1);
    let kind = match args.next().as_deref() {
        Some("nb") => Kind::NaiveBayes,
        Some("logreg") => Kind::LogReg,
        Some("logreg-l1") => Kind::LogRegL1,
        Some("svm") => Kind::Svm,
        _ => bail!(USAGE),
    };
    let data_dir = match args.next() {
        Some(dir) => PathBuf::from(dir),
        None => bail!(USAGE),
    };
    let mut vocabulary_path: Option<PathBuf> = None;
    let mut save_path: Option<PathBuf> = None;
    while let Some(arg) = args.next() {
        if arg == "--save" {
            match args.next() {
                Some(path) => save_path = Some(PathBuf::from(path)),
                None => bail!(USAGE),
            }
        } else {
            vocabulary_path = Some(PathBuf::from(arg));
        }
    }

    let train_path = data_dir.join("train.txt.gz");
    let (x_train, y_train) = dataset::load_split(&train_path)
        .with_context(|| format!("loading {}", train_path.display()))?;
    info!(
        "training data: {} examples, {} features",
        x_train.nrows(),
        x_train.ncols()
    );

    let model = train(kind, x_train.view(), y_train.view())?;
    report_split(kind, &model, "Training", x_train.view(), y_train.view())?;

    for (name, file) in [("Validation", "validation.txt.gz"), ("Testing", "test.txt.gz")] {
        let path = data_dir.join(file);
        if !path.exists() {
            warn!("{} not found, skipping the {name} split", path.display());
            continue;
        }
        let (x, y) =
            dataset::load_split(&path).with_context(|| format!("loading {}", path.display()))?;
        report_split(kind, &model, name, x.view(), y.view())?;
    }

    if let Some(path) = vocabulary_path {
        let voc = Vocabulary::load(&path)
            .with_context(|| format!("loading {}", path.display()))?;
        print_relevant_words(&voc, &model);
    }

    if let Some(path) = save_path {
        save_model(&path, &model)?;
        info!("model saved to {}", path.display());
    }

    Ok(())
}

/// Trains the requested estimator with hyperparameters taken from the
/// `LAMBDA`, `LEARNING_RATE` and `STEPS` environment variables.
fn train(kind: Kind, x: ArrayView2<'_, f64>, y: ArrayView1<'_, f64>) -> Result<LinearModel> {
    if kind == Kind::NaiveBayes {
        info!("training naive bayes");
        return Ok(naive_bayes::fit(x, y)?);
    }

    let lambda = env_f64("LAMBDA", DEFAULT_LAMBDA)?;
    let lr = env_f64("LEARNING_RATE", DEFAULT_LEARNING_RATE)?;
    let steps = env_usize("STEPS", DEFAULT_STEPS)?;
    info!("training {kind:?}: lambda={lambda}, lr={lr}, steps={steps}");

    let model = match kind {
        Kind::Svm => svm::LinearSvm::new(lambda)
            .with_learning_rate(lr)
            .with_steps(steps)
            .fit(x, y)?,
        Kind::LogReg => LogisticRegression::new(lambda)
            .with_learning_rate(lr)
            .with_steps(steps)
            .fit(x, y)?,
        Kind::LogRegL1 => LogisticRegression::new(lambda)
            .with_penalty(Penalty::L1)
            .with_learning_rate(lr)
            .with_steps(steps)
            .fit(x, y)?,
        Kind::NaiveBayes => unreachable!(),
    };
    Ok(model)
}

/// Prints the accuracy (and, for the iterative models, the training loss)
/// of one split.
fn report_split(
    kind: Kind,
    model: &LinearModel,
    name: &str,
    x: ArrayView2<'_, f64>,
    y: ArrayView1<'_, f64>,
) -> Result<()> {
    let predicted = hard_labels(kind, model, x)?;
    let expected = check_labels(y, Some(2))?;
    let acc = metrics::accuracy(predicted.view(), expected.view())?;
    println!("{name} accuracy: {:.1}%", acc * 100.0);

    match kind {
        Kind::LogReg | Kind::LogRegL1 => {
            let p = logreg::predict_proba(model, x)?;
            println!("{name} cross entropy: {:.4}", binary_cross_entropy(y, p.view())?);
        }
        Kind::Svm => {
            let (_, logits) = svm::predict(model, x)?;
            println!("{name} hinge loss: {:.4}", hinge_loss(y, logits.view())?);
        }
        Kind::NaiveBayes => {}
    }
    Ok(())
}

fn hard_labels(
    kind: Kind,
    model: &LinearModel,
    x: ArrayView2<'_, f64>,
) -> linear_models::Result<Array1<i32>> {
    match kind {
        Kind::NaiveBayes => naive_bayes::predict(model, x),
        Kind::Svm => Ok(svm::predict(model, x)?.0),
        Kind::LogReg | Kind::LogRegL1 => {
            Ok(logreg::predict_proba(model, x)?.mapv(|p| i32::from(p > 0.5)))
        }
    }
}

/// Prints the 20 lowest- and highest-weight vocabulary words.
fn print_relevant_words(voc: &Vocabulary, model: &LinearModel) {
    if voc.len() != model.num_features() {
        warn!(
            "vocabulary has {} words but the model has {} features, skipping word report",
            voc.len(),
            model.num_features()
        );
        return;
    }

    let mut indices: Vec<usize> = (0..model.num_features()).collect();
    indices.sort_by(|&a, &b| {
        model.w[a].partial_cmp(&model.w[b]).unwrap_or(Ordering::Equal)
    });

    println!("NEGATIVE WORDS");
    for &i in indices.iter().take(20) {
        if let Some(word) = voc.word(i) {
            println!("{word} {:+.4}", model.w[i]);
        }
    }
    println!("POSITIVE WORDS");
    for &i in indices.iter().rev().take(20) {
        if let Some(word) = voc.word(i) {
            println!("{word} {:+.4}", model.w[i]);
        }
    }
}

fn save_model(path: &Path, model: &LinearModel) -> Result<()> {
    let out = BufWriter::new(
        File::create(path).with_context(|| format!("creating {}", path.display()))?,
    );
    serde_json::to_writer_pretty(out, model).context("serializing the model")?;
    Ok(())
}

fn env_f64(name: &str, default: f64) -> Result<f64> {
    match env::var(name) {
        Ok(v) => v
            .parse()
            .with_context(|| format!("{name} must be a number, got '{v}'")),
        Err(_) => Ok(default),
    }
}

fn env_usize(name: &str, default: usize) -> Result<usize> {
    match env::var(name) {
        Ok(v) => v
            .parse()
            .with_context(|| format!("{name} must be an integer, got '{v}'")),
        Err(_) => Ok(default),
    }
}
