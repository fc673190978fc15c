use core::alloc::Layout;
use core::ptr::NonNull;
use allocator_api2::alloc::Allocator;
use crate::prelude::*;

/// An allocator which grants a fixed number of allocations and counts the
/// nodes which are still live.

pub(crate) struct Budget {
  remaining: Cell<usize>,
  live: Cell<usize>,
}

impl Budget {
  pub(crate) fn new(allocations: usize) -> Self {
    Self { remaining: Cell::new(allocations), live: Cell::new(0), }
  }

  pub(crate) fn grant(&self, allocations: usize) {
    self.remaining.set(allocations);
  }

  pub(crate) fn live(&self) -> usize {
    self.live.get()
  }
}

unsafe impl Allocator for &Budget {
  fn allocate(&self, layout: Layout) -> Result<NonNull<[u8]>, AllocError> {
    let n = self.remaining.get();

    if n == 0 {
      return Err(AllocError);
    }

    let p = Global.allocate(layout)?;
    self.remaining.set(n - 1);
    self.live.set(self.live.get() + 1);
    Ok(p)
  }

  unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
    self.live.set(self.live.get() - 1);
    Global.deallocate(ptr, layout)
  }
}

/// An element which counts its drops. Cloning panics when the value equals
/// `poison`.

#[derive(Debug)]
pub(crate) struct Tracked {
  pub(crate) value: u64,
  pub(crate) poison: Option<u64>,
  pub(crate) drops: Rc<Cell<usize>>,
}

impl Tracked {
  pub(crate) fn new(value: u64, drops: &Rc<Cell<usize>>) -> Self {
    Self { value, poison: None, drops: drops.clone(), }
  }
}

impl Clone for Tracked {
  fn clone(&self) -> Self {
    if self.poison == Some(self.value) {
      panic!("clone of poisoned element {}", self.value);
    }

    Self { value: self.value, poison: self.poison, drops: self.drops.clone(), }
  }
}

impl Drop for Tracked {
  fn drop(&mut self) {
    self.drops.set(self.drops.get() + 1);
  }
}

#[test]
fn test_budget_counts() {
  let budget = Budget::new(2);
  let mut list = List::new_in(&budget);
  assert_eq!(list.try_push_back(1), Ok(()));
  assert_eq!(list.try_push_back(2), Ok(()));
  assert_eq!(list.try_push_back(3), Err(AllocError));
  assert_eq!(budget.live(), 2);
  drop(list);
  assert_eq!(budget.live(), 0);
}
