//! Interactive command loop driving a [`PartitionList`].
//!
//! ```text
//!   ┌──────────┐  "1" / "2" / "3"   ┌─────────┐  allocate / terminate  ┌───────────────┐
//!   │  reader  │ ─────────────────▶ │ Session │ ─────────────────────▶ │ PartitionList │
//!   └──────────┘  "id,size" / "id"  └─────────┘                        └───────────────┘
//!                                        │
//!                                        ▼ block table after every command
//!                                   ┌─────────┐
//!                                   │ writer  │
//!                                   └─────────┘
//! ```
//!
//! Parsing lives in free functions so it can be checked without any I/O.

use std::{
  fmt,
  io::{self, BufRead, Write},
};

use crate::{error::PartitionError, partition::PartitionList};

const WELCOME: &str = "Welcome to Memory Management";
const PROCEED_PROMPT: &str = "Please enter any key to proceed...";
const MENU_PROMPT: &str = "1. Allocate\n2. Terminate\n3. Exit\nEnter: ";
const ALLOCATE_PROMPT: &str = "Enter comma separated process id and process size: ";
const TERMINATE_PROMPT: &str = "Enter process id: ";
const FAREWELL: &str = "Have a nice day!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
  Allocate,
  Terminate,
  Exit,
}

impl Choice {
  pub fn parse(input: &str) -> Result<Self, CommandError> {
    match input.trim() {
      "1" => Ok(Choice::Allocate),
      "2" => Ok(Choice::Terminate),
      "3" => Ok(Choice::Exit),
      other => Err(CommandError::InvalidChoice(other.to_string())),
    }
  }
}

/// Malformed user input. The loop reports it and carries on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
  InvalidChoice(String),
  MissingSize(String),
  InvalidSize(String),
  EmptyOwner,
}

impl fmt::Display for CommandError {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>,
  ) -> fmt::Result {
    match self {
      CommandError::InvalidChoice(choice) => write!(f, "Invalid choice '{}', enter 1, 2 or 3", choice),
      CommandError::MissingSize(input) => write!(f, "Expected 'id,size' but got '{}'", input),
      CommandError::InvalidSize(size) => write!(f, "Invalid process size '{}'", size),
      CommandError::EmptyOwner => write!(f, "Process id must not be empty"),
    }
  }
}

impl std::error::Error for CommandError {}

pub fn parse_owner(input: &str) -> Result<String, CommandError> {
  let owner = input.trim();
  if owner.is_empty() {
    return Err(CommandError::EmptyOwner);
  }
  Ok(owner.to_string())
}

/// Parses an `id,size` allocation request. The size must be a positive integer.
/// Fields after the size are ignored.
pub fn parse_allocation(input: &str) -> Result<(String, usize), CommandError> {
  let mut fields = input.split(',');
  let owner = fields.next().unwrap_or_default();
  let size = fields
    .next()
    .ok_or_else(|| CommandError::MissingSize(input.trim().to_string()))?;

  let owner = parse_owner(owner)?;
  let size = size.trim();

  match size.parse::<usize>() {
    Ok(0) | Err(_) => Err(CommandError::InvalidSize(size.to_string())),
    Ok(size) => Ok((owner, size)),
  }
}

pub struct Session<R, W> {
  list: PartitionList,
  input: R,
  output: W,
  prompts: bool,
  verbose: bool,
}

impl<R: BufRead, W: Write> Session<R, W> {
  pub fn new(
    list: PartitionList,
    input: R,
    output: W,
  ) -> Self {
    Self {
      list,
      input,
      output,
      prompts: true,
      verbose: false,
    }
  }

  /// Shows the banner and prompts. Turn off when the input is scripted.
  pub fn prompts(
    mut self,
    enabled: bool,
  ) -> Self {
    self.prompts = enabled;
    self
  }

  /// Prints a usage summary under every block table.
  pub fn verbose(
    mut self,
    enabled: bool,
  ) -> Self {
    self.verbose = enabled;
    self
  }

  pub fn list(&self) -> &PartitionList {
    &self.list
  }

  pub fn into_parts(self) -> (PartitionList, W) {
    (self.list, self.output)
  }

  /// Runs until the user picks exit or the input is exhausted.
  pub fn run(&mut self) -> io::Result<()> {
    if self.prompts {
      writeln!(self.output, "{}", WELCOME)?;
      if self.read_line(PROCEED_PROMPT)?.is_none() {
        return Ok(());
      }
    }

    while let Some(line) = self.read_line(MENU_PROMPT)? {
      let choice = match Choice::parse(&line) {
        Ok(choice) => choice,
        Err(err) => {
          writeln!(self.output, "{}", err)?;
          continue;
        }
      };

      match choice {
        Choice::Allocate => {
          let Some(line) = self.read_line(ALLOCATE_PROMPT)? else {
            break;
          };
          match parse_allocation(&line) {
            Ok((owner, size)) => {
              let result = self.list.allocate(owner, size);
              self.report(result)?;
            }
            Err(err) => writeln!(self.output, "{}", err)?,
          }
        }
        Choice::Terminate => {
          let Some(line) = self.read_line(TERMINATE_PROMPT)? else {
            break;
          };
          match parse_owner(&line) {
            Ok(owner) => {
              let result = self.list.terminate(&owner);
              self.report(result)?;
            }
            Err(err) => writeln!(self.output, "{}", err)?,
          }
        }
        Choice::Exit => {
          writeln!(self.output, "{}", FAREWELL)?;
          break;
        }
      }
    }

    self.output.flush()
  }

  fn report(
    &mut self,
    result: Result<(), PartitionError>,
  ) -> io::Result<()> {
    if let Err(err) = result {
      writeln!(self.output, "{}", err)?;
    }

    write!(self.output, "{}", self.list)?;
    if self.verbose {
      writeln!(self.output, "{}", self.list.stats())?;
    }

    Ok(())
  }

  /// Returns `None` once the input is exhausted. Invalid UTF-8 is replaced, not rejected.
  fn read_line(
    &mut self,
    prompt: &str,
  ) -> io::Result<Option<String>> {
    if self.prompts {
      write!(self.output, "{}", prompt)?;
      self.output.flush()?;
    }

    let mut line = Vec::new();
    if self.input.read_until(b'\n', &mut line)? == 0 {
      return Ok(None);
    }

    let line = String::from_utf8_lossy(&line);
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
  }
}

#[cfg(test)]
mod tests {
  use std::io::Cursor;

  use super::*;
  use crate::block::Status;

  fn run_script(
    script: &str,
    prompts: bool,
  ) -> (PartitionList, String) {
    let list = PartitionList::new(2560).unwrap();
    let mut session = Session::new(list, Cursor::new(script.to_string()), Vec::new()).prompts(prompts);

    session.run().unwrap();

    let (list, output) = session.into_parts();
    (list, String::from_utf8(output).unwrap())
  }

  #[test]
  fn test_parse_choice() {
    assert_eq!(Choice::parse("1"), Ok(Choice::Allocate));
    assert_eq!(Choice::parse(" 2 "), Ok(Choice::Terminate));
    assert_eq!(Choice::parse("3"), Ok(Choice::Exit));
    assert_eq!(
      Choice::parse("4"),
      Err(CommandError::InvalidChoice("4".to_string()))
    );
  }

  #[test]
  fn test_parse_allocation() {
    assert_eq!(parse_allocation("P1,100"), Ok(("P1".to_string(), 100)));
    assert_eq!(parse_allocation(" P2 , 42 "), Ok(("P2".to_string(), 42)));
  }

  #[test]
  fn test_parse_allocation_rejects_bad_input() {
    assert_eq!(
      parse_allocation("P1"),
      Err(CommandError::MissingSize("P1".to_string()))
    );
    assert_eq!(
      parse_allocation("P1,abc"),
      Err(CommandError::InvalidSize("abc".to_string()))
    );
    assert_eq!(
      parse_allocation("P1,-5"),
      Err(CommandError::InvalidSize("-5".to_string()))
    );
    assert_eq!(
      parse_allocation("P1,0"),
      Err(CommandError::InvalidSize("0".to_string()))
    );
    assert_eq!(parse_allocation(" ,10"), Err(CommandError::EmptyOwner));
  }

  #[test]
  fn test_parse_allocation_ignores_trailing_fields() {
    assert_eq!(parse_allocation("P1,100,x"), Ok(("P1".to_string(), 100)));
    assert_eq!(parse_allocation("P1,100,"), Ok(("P1".to_string(), 100)));
  }

  #[test]
  fn test_parse_owner() {
    assert_eq!(parse_owner(" P1 "), Ok("P1".to_string()));
    assert_eq!(parse_owner("   "), Err(CommandError::EmptyOwner));
  }

  #[test]
  fn test_allocate_then_terminate() {
    let (list, output) = run_script("1\nP1,100\n1\nP2,200\n2\nP1\n3\n", false);

    assert_eq!(
      list.enumerate().collect::<Vec<_>>(),
      vec![
        (100, Status::Free),
        (200, Status::Allocated("P2")),
        (1860, Status::Free)
      ]
    );
    assert!(output.starts_with("Size: 100k, Status: P1 assigned\nSize: 2060k, Status: Free\n"));
    assert!(output.ends_with("Size: 1860k, Status: Free\nHave a nice day!\n"));
  }

  #[test]
  fn test_errors_are_reported_and_loop_continues() {
    let (list, output) = run_script("1\nP1,3000\n2\nGHOST\n9\n1\nP1\n3\n", false);

    assert!(output.contains("Not enough space to assign P1\nSize: 2160k, Status: Free\n"));
    assert!(output.contains("GHOST not found!\nSize: 2160k, Status: Free\n"));
    assert!(output.contains("Invalid choice '9', enter 1, 2 or 3\n"));
    assert!(output.contains("Expected 'id,size' but got 'P1'\n"));
    assert_eq!(list.block_count(), 1);
  }

  #[test]
  fn test_invalid_utf8_does_not_stop_loop() {
    let list = PartitionList::new(2560).unwrap();
    let input = Cursor::new(b"1\nP\xff,100\n1\nP2,100\n3\n".to_vec());
    let mut session = Session::new(list, input, Vec::new()).prompts(false);

    session.run().unwrap();

    let (list, output) = session.into_parts();
    assert_eq!(
      list.enumerate().collect::<Vec<_>>(),
      vec![
        (100, Status::Allocated("P\u{FFFD}")),
        (100, Status::Allocated("P2")),
        (1960, Status::Free)
      ]
    );
    assert!(String::from_utf8(output).unwrap().ends_with("Have a nice day!\n"));
  }

  #[test]
  fn test_end_of_input_stops_loop() {
    let (list, output) = run_script("1\nP1,100\n1\n", false);

    assert_eq!(list.block_count(), 2);
    assert!(!output.contains("Have a nice day!"));
  }

  #[test]
  fn test_prompts_shown_when_enabled() {
    let (_, output) = run_script("\n3\n", true);

    assert_eq!(
      output,
      format!("{}\n{}{}{}\n", WELCOME, PROCEED_PROMPT, MENU_PROMPT, FAREWELL)
    );
  }

  #[test]
  fn test_verbose_prints_summary() {
    let list = PartitionList::new(2560).unwrap();
    let mut session = Session::new(list, Cursor::new("1\nP1,100\n3\n"), Vec::new())
      .prompts(false)
      .verbose(true);

    session.run().unwrap();

    assert_eq!(session.list().block_count(), 2);
    let (_, output) = session.into_parts();
    assert!(
      String::from_utf8(output)
        .unwrap()
        .contains("Blocks: 2, Used: 100k, Free: 2060k, Largest free: 2060k\n")
    );
  }
}
