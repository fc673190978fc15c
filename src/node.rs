use core::alloc::Layout;
use core::mem;
use core::ptr::NonNull;
use allocator_api2::alloc::Allocator;
use crate::Fail;
use crate::ptr;

pub(crate) struct Node<T> {
  pub(crate) value: T,
  pub(crate) next: Link<T>,
}

pub(crate) type Link<T> = Option<NonNull<Node<T>>>;

/// A non-empty run of linked nodes. The last node is terminal.

pub(crate) struct Chain<T> {
  pub(crate) first: NonNull<Node<T>>,
  pub(crate) last: NonNull<Node<T>>,
  pub(crate) len: usize,
}

// Owns a chain under construction. Dropping it releases every node built so
// far, which covers both allocation failure and a panicking `Clone`.

struct Partial<'a, A: Allocator, T> {
  allocator: &'a A,
  first: Link<T>,
  last: Link<T>,
  len: usize,
}

impl<'a, A: Allocator, T> Drop for Partial<'a, A, T> {
  fn drop(&mut self) {
    unsafe { destroy_chain(self.allocator, self.first) }
  }
}

// Releases the rest of a chain if dropping an element panics during
// `destroy_chain`.

struct Release<'a, A: Allocator, T> {
  allocator: &'a A,
  link: Link<T>,
}

impl<'a, A: Allocator, T> Drop for Release<'a, A, T> {
  fn drop(&mut self) {
    unsafe { destroy_chain(self.allocator, self.link) }
  }
}

impl<T> Chain<T> {
  #[inline(always)]
  pub(crate) fn single(p: NonNull<Node<T>>) -> Self {
    Self { first: p, last: p, len: 1, }
  }
}

#[inline(always)]
pub(crate) fn new_node<A, E, T>(allocator: &A, value: T, next: Link<T>) -> Result<NonNull<Node<T>>, E>
where
  A: Allocator,
  E: Fail,
{
  let Ok(p) = ptr::alloc::<A, Node<T>>(allocator) else {
    return E::fail(Layout::new::<Node<T>>());
  };

  unsafe { ptr::write(p, Node { value, next }) };

  Ok(p)
}

/// Moves the node out of its allocation and releases the allocation.
///
/// # Safety
///
/// `p` must have been allocated by `allocator` and must not be reachable from
/// any chain afterwards.

#[inline(always)]
pub(crate) unsafe fn free_node<A, T>(allocator: &A, p: NonNull<Node<T>>) -> Node<T>
where
  A: Allocator,
{
  let node = ptr::read(p);
  ptr::dealloc(allocator, p);
  node
}

/// Releases every node reachable from `first`.
///
/// # Safety
///
/// The chain must be exclusively owned by the caller and allocated by
/// `allocator`.

pub(crate) unsafe fn destroy_chain<A, T>(allocator: &A, first: Link<T>)
where
  A: Allocator,
{
  let mut link = first;

  while let Some(p) = link {
    // NB: The successor is read out before the node is released.

    let node = free_node(allocator, p);
    link = node.next;

    let guard = Release { allocator, link, };
    drop::<T>(node.value);
    mem::forget(guard);
  }
}

/// Follows `index` links from `first`.
///
/// # Safety
///
/// The chain starting at `first` must hold more than `index` nodes.

pub(crate) unsafe fn nth<T>(first: NonNull<Node<T>>, index: usize) -> NonNull<Node<T>> {
  let mut p = first;

  for _ in 0 .. index {
    p = ptr::as_ref(p).next.unwrap_unchecked();
  }

  p
}

/// Builds a copy of the chain starting at `source`, in order, with nodes from
/// `allocator`. Returns `None` for an empty source.
///
/// On failure no node of the copy survives.
///
/// # Safety
///
/// The chain starting at `source` must stay valid and unmodified for the
/// duration of the call.

pub(crate) unsafe fn clone_chain<A, E, T>(allocator: &A, source: Link<T>) -> Result<Option<Chain<T>>, E>
where
  A: Allocator,
  E: Fail,
  T: Clone,
{
  let mut partial = Partial { allocator, first: None, last: None, len: 0, };
  let mut link = source;

  while let Some(p) = link {
    let node = ptr::as_ref(p);
    let q = new_node::<A, E, T>(allocator, node.value.clone(), None)?;

    match partial.last {
      None => partial.first = Some(q),
      Some(last) => ptr::as_mut_ref(last).next = Some(q),
    }

    partial.last = Some(q);
    partial.len += 1;
    link = node.next;
  }

  let len = partial.len;

  match (partial.first.take(), partial.last) {
    (Some(first), Some(last)) => Ok(Some(Chain { first, last, len, })),
    _ => Ok(None),
  }
}
