use std::panic;
use crate::prelude::*;

fn values<A: allocator_api2::alloc::Allocator>(list: &List<Tracked, A>) -> Vec<u64> {
  list.iter().map(|x| x.value).collect()
}

#[test]
fn test_failed_push_leaves_list_unchanged() {
  let budget = Budget::new(1);
  let mut list = List::new_in(&budget);
  list.push_back(1_u64);
  assert_eq!(list.try_push_back(2), Err(AllocError));
  assert_eq!(list.try_push_front(0), Err(AllocError));
  assert_eq!(list.len(), 1);
  assert_eq!(list.front(), Ok(&1));
  assert_eq!(list.back(), Ok(&1));
  assert_eq!(budget.live(), 1);
}

#[test]
fn test_failed_append_is_all_or_nothing() {
  let drops = Rc::new(Cell::new(0));
  let budget = Budget::new(1);
  let mut target = List::new_in(&budget);
  target.push_back(Tracked::new(0, &drops));

  let source: List<Tracked> = (1 .. 6).map(|i| Tracked::new(i, &drops)).collect();

  for granted in 0 .. 5 {
    budget.grant(granted);
    assert_eq!(target.try_append(&source), Err(AllocError));
    assert_eq!(values(&target), [0]);
    assert_eq!(target.back().map(|x| x.value), Ok(0));
    assert_eq!(budget.live(), 1);
  }

  // Each attempt drops the copies it linked plus the copy whose node could
  // not be allocated.
  assert_eq!(drops.get(), 1 + 2 + 3 + 4 + 5);

  budget.grant(5);
  assert_eq!(target.try_append(&source), Ok(()));
  assert_eq!(values(&target), [0, 1, 2, 3, 4, 5]);
  assert_eq!(values(&source), [1, 2, 3, 4, 5]);
  assert_eq!(budget.live(), 6);
}

#[test]
fn test_failed_try_clone_releases_partial_chain() {
  let budget = Budget::new(4);
  let mut list = List::new_in(&budget);
  for i in 0 .. 4_u64 {
    list.push_back(i);
  }

  budget.grant(3);
  assert!(list.try_clone().is_err());
  assert_eq!(budget.live(), 4);

  budget.grant(4);
  let copy = list.try_clone().unwrap();
  assert_eq!(copy, list);
  assert_eq!(budget.live(), 8);
  drop(copy);
  assert_eq!(budget.live(), 4);
}

#[test]
fn test_failed_try_clone_from_leaves_list_empty() {
  let budget = Budget::new(2);
  let mut list = List::new_in(&budget);
  list.push_back(9_u64);
  list.push_back(8);

  let source: List<u64> = (0 .. 3).collect();

  budget.grant(2);
  assert_eq!(list.try_clone_from(&source), Err(AllocError));
  assert!(list.is_empty());
  assert_eq!(list.front(), Err(Error::Empty));
  assert_eq!(budget.live(), 0);

  budget.grant(3);
  assert_eq!(list.try_clone_from(&source), Ok(()));
  assert_eq!(list, source);
}

#[test]
fn test_panicking_clone_releases_partial_chain() {
  let drops = Rc::new(Cell::new(0));
  let budget = Budget::new(usize::MAX);
  let mut source = List::new();
  for i in 0 .. 5 {
    let mut x = Tracked::new(i, &drops);
    x.poison = Some(3);
    source.push_back(x);
  }

  let mut target = List::new_in(&budget);
  target.push_back(Tracked::new(100, &drops));

  let r = panic::catch_unwind(panic::AssertUnwindSafe(|| target.append(&source)));

  assert!(r.is_err());
  assert_eq!(drops.get(), 3);
  assert_eq!(budget.live(), 1);
  assert_eq!(values(&target), [100]);
  assert_eq!(source.len(), 5);
}

#[test]
fn test_every_element_dropped_once() {
  let drops = Rc::new(Cell::new(0));
  let budget = Budget::new(usize::MAX);
  let mut list = List::new_in(&budget);
  for i in 0 .. 6 {
    list.push_back(Tracked::new(i, &drops));
  }

  drop(list.remove_at(2));
  drop(list.pop_front());
  drop(list.pop_back());
  assert_eq!(drops.get(), 3);
  assert_eq!(values(&list), [1, 3, 4]);
  assert_eq!(budget.live(), 3);

  list.clear();
  assert_eq!(drops.get(), 6);
  assert_eq!(budget.live(), 0);

  list.push_back(Tracked::new(7, &drops));
  list.push_back(Tracked::new(8, &drops));
  drop(list);
  assert_eq!(drops.get(), 8);
  assert_eq!(budget.live(), 0);
}

#[test]
fn test_into_iter_releases_nodes() {
  let budget = Budget::new(usize::MAX);
  let mut list = List::new_in(&budget);
  list.extend(0 .. 4_u64);

  let mut it = list.into_iter();
  assert_eq!(it.next(), Some(0));
  assert_eq!(budget.live(), 3);
  drop(it);
  assert_eq!(budget.live(), 0);
}

struct Bomb {
  value: u64,
  drops: Rc<Cell<usize>>,
}

impl Drop for Bomb {
  fn drop(&mut self) {
    self.drops.set(self.drops.get() + 1);

    if self.value == 1 {
      panic!("drop of element {}", self.value);
    }
  }
}

fn bombs<'a>(budget: &'a Budget, drops: &Rc<Cell<usize>>) -> List<Bomb, &'a Budget> {
  let mut list = List::new_in(budget);
  for value in 0 .. 5 {
    list.push_back(Bomb { value, drops: drops.clone() });
  }
  list
}

#[test]
fn test_panicking_drop_releases_rest_of_chain() {
  let drops = Rc::new(Cell::new(0));
  let budget = Budget::new(usize::MAX);
  let list = bombs(&budget, &drops);
  assert_eq!(budget.live(), 5);

  let r = panic::catch_unwind(panic::AssertUnwindSafe(|| drop(list)));

  assert!(r.is_err());
  assert_eq!(drops.get(), 5);
  assert_eq!(budget.live(), 0);
}

#[test]
fn test_panicking_drop_during_clear() {
  let drops = Rc::new(Cell::new(0));
  let budget = Budget::new(usize::MAX);
  let mut list = bombs(&budget, &drops);

  let r = panic::catch_unwind(panic::AssertUnwindSafe(|| list.clear()));

  assert!(r.is_err());
  assert_eq!(drops.get(), 5);
  assert_eq!(budget.live(), 0);
  assert!(list.is_empty());
  assert_eq!(list.front().map(|x| x.value), Err(Error::Empty));
}
