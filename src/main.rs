use std::io;

use anyhow::Context;
use clap::Parser;
use rpartition::{PartitionList, command::Session};

/// First-fit memory partition simulator
#[derive(Parser, Debug)]
#[command(name = "rpartition")]
#[command(about = "Allocate and terminate processes in a simulated first-fit memory pool")]
struct Args {
  /// Total simulated memory in kilobytes (400k of it is reserved for the OS)
  #[arg(long, default_value_t = 2560)]
  pool_size: usize,

  /// Print a usage summary after every block table
  #[arg(long)]
  verbose: bool,

  /// Never show the banner or prompts
  #[arg(long)]
  no_prompt: bool,
}

/// Prompts only make sense when a human is typing.
fn stdin_is_terminal() -> bool {
  unsafe { libc::isatty(libc::STDIN_FILENO) == 1 }
}

fn main() -> anyhow::Result<()> {
  let args = Args::parse();

  let list = PartitionList::new(args.pool_size)
    .with_context(|| format!("cannot create a {}k pool", args.pool_size))?;

  let prompts = !args.no_prompt && stdin_is_terminal();

  let stdin = io::stdin();
  let stdout = io::stdout();
  let mut session = Session::new(list, stdin.lock(), stdout.lock())
    .prompts(prompts)
    .verbose(args.verbose);

  session.run().context("command loop failed")?;

  Ok(())
}
