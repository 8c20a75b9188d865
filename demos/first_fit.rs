use std::io::Read;

use rpartition::PartitionList;

/// Waits until the user presses ENTER so each step can be read before the next one runs.
fn block_until_enter_pressed() {
  println!("\n>>> Press ENTER to continue...");
  let _ = std::io::stdin().bytes().next();
}

fn print_list(
  label: &str,
  list: &PartitionList,
) {
  println!("[{}]", label);
  print!("{}", list);
  println!("{}", list.stats());
}

fn main() -> anyhow::Result<()> {
  // 2560k pool, 400k of which goes to the OS.
  let mut list = PartitionList::new(2560)?;

  print_list("start", &list);
  block_until_enter_pressed();

  // --------------------------------------------------------------------
  // 1) Three allocations carve the single free block from the front.
  // --------------------------------------------------------------------
  list.allocate("P1", 500)?;
  list.allocate("P2", 300)?;
  list.allocate("P3", 700)?;
  print_list("1: P1=500k, P2=300k, P3=700k", &list);
  block_until_enter_pressed();

  // --------------------------------------------------------------------
  // 2) Free P1 and P3. Their blocks stay in the chain as separate free holes.
  // --------------------------------------------------------------------
  list.terminate("P1")?;
  list.terminate("P3")?;
  print_list("2: terminate P1 and P3", &list);
  block_until_enter_pressed();

  // --------------------------------------------------------------------
  // 3) First-fit: 200k lands in the first hole (500k), not the best one.
  // --------------------------------------------------------------------
  list.allocate("P4", 200)?;
  print_list("3: P4=200k", &list);
  block_until_enter_pressed();

  // --------------------------------------------------------------------
  // 4) Fragmentation. 1660k is free in total but no single hole holds 800k.
  // --------------------------------------------------------------------
  let free = list.stats().free;
  match list.allocate("P5", 800) {
    Ok(()) => println!("\n[4] P5 fits"),
    Err(err) => println!("\n[4] {} ({}k free in total)", err, free),
  }
  print_list("4: P5=800k", &list);
  block_until_enter_pressed();

  // --------------------------------------------------------------------
  // 5) Exact fit: 300k fills the 300k hole without creating a new block.
  // --------------------------------------------------------------------
  let before = list.block_count();
  list.allocate("P6", 300)?;
  println!(
    "\n[5] blocks before = {}, after = {}",
    before,
    list.block_count()
  );
  print_list("5: P6=300k", &list);

  println!("\n[6] End of walkthrough.");

  Ok(())
}
