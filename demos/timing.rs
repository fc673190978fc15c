use std::hint;
use std::io;
use std::io::Write;
use std::time::Instant;
use chainlist::List;

fn timeit<A, F>(f: F) -> f64 where F: FnOnce() -> A {
  let start = Instant::now();
  let _: A = hint::black_box(f());
  let stop = Instant::now();
  stop.saturating_duration_since(start).as_secs_f64()
}

fn report(name: &str, elapsed: f64) {
  print!("{:25} {:.6} s\n", name, elapsed);
}

#[inline(never)]
fn fill(list: &mut List<u64>, count: usize) {
  for i in 0 .. count {
    list.push_back(i as u64);
  }
}

#[inline(never)]
fn sum_indexed(list: &List<u64>) -> u64 {
  let mut s = 0u64;
  for i in 0 .. list.len() {
    if let Ok(x) = list.at(i) { s = s.wrapping_add(*x); }
  }
  s
}

#[inline(never)]
fn sum_cursor(list: &List<u64>) -> u64 {
  let mut s = 0u64;
  let mut cursor = list.cursor();
  while let Some(x) = cursor.current() {
    s = s.wrapping_add(*x);
    cursor.move_next();
  }
  s
}

fn main() -> io::Result<()> {
  print!("How many elements to test with?\n: ");
  io::stdout().flush()?;

  let mut line = String::new();
  let _: usize = io::stdin().read_line(&mut line)?;

  let Ok(count) = line.trim().parse::<usize>() else {
    eprintln!("expected a non-negative integer, got {:?}", line.trim());
    std::process::exit(2);
  };

  let mut list = List::new();

  print!("\nFilling {} element(s)...\n", count);
  report("push_back", timeit(|| fill(&mut list, hint::black_box(count))));

  print!("\nIterating the list with the indexing operation...\n");
  report("at", timeit(|| sum_indexed(&list)));

  print!("\nIterating the list with a cursor...\n");
  report("cursor", timeit(|| sum_cursor(&list)));

  Ok(())
}
