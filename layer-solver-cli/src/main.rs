//! Command-line front-end: solve the layer order of a FOLD file and
//! print one `f1, f2: 0|1` line per overlapping face pair.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use log::error;

use layer_solver::format::Fold;
use layer_solver::record::FoldRecord;
use layer_solver::{Error, LayerSolver};

/// Decide a global stacking order for the faces of a folded crease
/// pattern.
#[derive(Parser)]
#[command(name = "layer_solver")]
struct Args {
  /// FOLD file; folded coordinates come from its foldedForm frame, or
  /// from the key frame if no such frame exists.
  fold_file: PathBuf,
}

fn main() -> ExitCode {
  env_logger::init();
  let args = match Args::try_parse() {
    Ok(args) => args,
    Err(err) => {
      let _ = err.print();
      return ExitCode::from(1);
    }
  };
  match run(&args) {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) => {
      error!("{:#}", err);
      ExitCode::from(exit_code(&err))
    }
  }
}

fn run(args: &Args) -> anyhow::Result<()> {
  let file = File::open(&args.fold_file)
    .with_context(|| format!("cannot open {}", args.fold_file.display()))?;
  let fold: Fold = serde_json::from_reader(BufReader::new(file))
    .with_context(|| format!("cannot parse {}", args.fold_file.display()))?;

  let record = FoldRecord::from_frame(fold.folded_frame())?;
  let solver = LayerSolver::new(record)?;
  let order = solver.solve()?;

  for ((f1, f2), below) in order.iter() {
    println!("{}, {}: {}", f1, f2, below as u8);
  }
  Ok(())
}

/// 1 for argument/IO trouble, 2 for an infeasible layer order, 3 for
/// geometric or data-integrity failures.
fn exit_code(err: &anyhow::Error) -> u8 {
  match err.downcast_ref::<Error>() {
    Some(Error::Unsatisfiable) => 2,
    Some(_) => 3,
    None => 1,
  }
}
