#![doc = include_str!("../README.md")]
#![no_std]
#![cfg_attr(feature = "allocator_api", feature(allocator_api))]

extern crate alloc;

use allocator_api2::alloc::Allocator;
use allocator_api2::alloc::Global;
use core::alloc::Layout;
use core::fmt;
use core::marker::PhantomData;
use core::ptr::NonNull;
use crate::node::Chain;
use crate::node::Link;
use crate::node::Node;

pub use allocator_api2::alloc::AllocError;
pub use crate::cursor::Cursor;
pub use crate::cursor::CursorMut;
pub use crate::iter::IntoIter;
pub use crate::iter::Iter;
pub use crate::iter::IterMut;

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// SUBMODULES                                                                 //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

mod cursor;
mod iter;
mod node;
mod ptr;

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// PUBLIC TYPE AND TRAIT DEFINITIONS                                          //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

/// A singly-linked list.
///
/// Every element lives in its own node, allocated from `A`. Access by index
/// walks the chain from the front and costs O(index). For a full traversal use
/// a [`Cursor`] or an iterator.

pub struct List<T, A: Allocator = Global> {
  first: Link<T>,
  last: Link<T>,
  len: usize,
  allocator: A,
  marker: PhantomData<T>,
}

unsafe impl<T, A: Allocator> Send for List<T, A> where T: Send, A: Send { }

unsafe impl<T, A: Allocator> Sync for List<T, A> where T: Sync, A: Sync { }

/// An error signaled by checked element access.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
  /// The index was not less than the length of the list.
  OutOfRange {
    /// The requested index.
    index: usize,
    /// The length of the list at the time of the request.
    len: usize,
  },
  /// The list has no elements.
  Empty,
}

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// PRIVATE TYPE AND TRAIT DEFINITIONS                                         //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

enum Panicked { }

trait Fail: Sized {
  fn fail<T>(layout: Layout) -> Result<T, Self>;
}

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// UTILITY FUNCTIONS                                                          //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

#[inline(always)]
fn unwrap<T>(x: Result<T, Panicked>) -> T {
  match x { Ok(x) => x, Err(e) => match e { } }
}

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// Fail                                                                       //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

impl Fail for Panicked {
  #[inline(never)]
  #[cold]
  fn fail<T>(layout: Layout) -> Result<T, Self> {
    alloc::alloc::handle_alloc_error(layout)
  }
}

impl Fail for AllocError {
  #[inline(always)]
  fn fail<T>(_: Layout) -> Result<T, Self> {
    Err(AllocError)
  }
}

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// Error                                                                      //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

impl fmt::Display for Error {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match *self {
      Self::OutOfRange { index, len } =>
        write!(f, "index {} is out of range for a list of length {}", index, len),
      Self::Empty =>
        f.write_str("the list is empty"),
    }
  }
}

impl core::error::Error for Error { }

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// List                                                                       //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

fn push_front<A, E, T>(list: &mut List<T, A>, value: T) -> Result<(), E>
where
  A: Allocator,
  E: Fail,
{
  let p = node::new_node::<A, E, T>(&list.allocator, value, list.first)?;

  if list.last.is_none() {
    list.last = Some(p);
  }

  list.first = Some(p);
  list.len += 1;

  Ok(())
}

fn push_back<A, E, T>(list: &mut List<T, A>, value: T) -> Result<(), E>
where
  A: Allocator,
  E: Fail,
{
  let p = node::new_node::<A, E, T>(&list.allocator, value, None)?;
  list.link_back(Chain::single(p));
  Ok(())
}

fn append<A, B, E, T>(list: &mut List<T, A>, other: &List<T, B>) -> Result<(), E>
where
  A: Allocator,
  B: Allocator,
  E: Fail,
  T: Clone,
{
  // SAFETY:
  //
  // `other` is borrowed for the duration of the copy, so its chain is neither
  // mutated nor released. The copy is allocated from our own allocator.

  let Some(chain) = unsafe { node::clone_chain::<A, E, T>(&list.allocator, other.first) }? else {
    return Ok(());
  };

  list.link_back(chain);

  Ok(())
}

fn clone_in<A, E, T>(list: &List<T, A>) -> Result<List<T, A>, E>
where
  A: Allocator + Clone,
  E: Fail,
  T: Clone,
{
  let mut r = List::new_in(list.allocator.clone());
  append::<A, A, E, T>(&mut r, list)?;
  Ok(r)
}

impl<T> List<T> {
  /// Creates an empty list backed by the global allocator.

  pub const fn new() -> Self {
    Self::new_in(Global)
  }
}

impl<T, A: Allocator> List<T, A> {
  /// Creates an empty list whose nodes are allocated from `allocator`.

  pub const fn new_in(allocator: A) -> Self {
    Self {
      first: None,
      last: None,
      len: 0,
      allocator,
      marker: PhantomData,
    }
  }

  /// A reference to the allocator backing this list.

  pub fn allocator(&self) -> &A {
    &self.allocator
  }

  /// Returns `true` if the list has no elements.

  #[inline(always)]
  pub fn is_empty(&self) -> bool {
    self.len == 0
  }

  /// The number of elements in the list.

  #[inline(always)]
  pub fn len(&self) -> usize {
    self.len
  }

  /// Removes and drops every element, releasing all nodes.

  pub fn clear(&mut self) {
    let first = self.first.take();
    self.last = None;
    self.len = 0;

    // SAFETY:
    //
    // The chain has been detached from `self`, so we own it exclusively.

    unsafe { node::destroy_chain(&self.allocator, first) }
  }

  /// Inserts an element at the front of the list.
  ///
  /// # Panics
  ///
  /// Panics on failure to allocate memory.

  pub fn push_front(&mut self, value: T) {
    unwrap(push_front(self, value))
  }

  /// Inserts an element at the front of the list.
  ///
  /// # Errors
  ///
  /// An error is returned on failure to allocate memory. The list is left
  /// unchanged and `value` is dropped.

  pub fn try_push_front(&mut self, value: T) -> Result<(), AllocError> {
    push_front(self, value)
  }

  /// Inserts an element at the back of the list.
  ///
  /// # Panics
  ///
  /// Panics on failure to allocate memory.

  pub fn push_back(&mut self, value: T) {
    unwrap(push_back(self, value))
  }

  /// Inserts an element at the back of the list.
  ///
  /// # Errors
  ///
  /// An error is returned on failure to allocate memory. The list is left
  /// unchanged and `value` is dropped.

  pub fn try_push_back(&mut self, value: T) -> Result<(), AllocError> {
    push_back(self, value)
  }

  /// Removes the first element and returns it, or `None` if the list is
  /// empty.

  pub fn pop_front(&mut self) -> Option<T> {
    let p = self.first?;

    // SAFETY:
    //
    // `p` is our first node. It is unlinked right below.

    let node = unsafe { node::free_node(&self.allocator, p) };

    self.first = node.next;

    if self.first.is_none() {
      self.last = None;
    }

    self.len -= 1;

    Some(node.value)
  }

  /// Removes the last element and returns it, or `None` if the list is empty.
  ///
  /// The predecessor of the last node has to be found by walking the chain,
  /// so this is O(len).

  pub fn pop_back(&mut self) -> Option<T> {
    if self.is_empty() {
      return None;
    }

    self.remove_at(self.len - 1).ok()
  }

  /// A reference to the element at `index`.
  ///
  /// # Errors
  ///
  /// Returns [`Error::OutOfRange`] if `index >= self.len()`.

  pub fn at(&self, index: usize) -> Result<&T, Error> {
    let p = self.locate(index)?;
    Ok(&unsafe { ptr::as_ref(p) }.value)
  }

  /// A mutable reference to the element at `index`.
  ///
  /// # Errors
  ///
  /// Returns [`Error::OutOfRange`] if `index >= self.len()`.

  pub fn at_mut(&mut self, index: usize) -> Result<&mut T, Error> {
    let p = self.locate(index)?;
    Ok(&mut unsafe { ptr::as_mut_ref(p) }.value)
  }

  /// Removes the element at `index` and returns it.
  ///
  /// # Errors
  ///
  /// Returns [`Error::OutOfRange`] if `index >= self.len()`. The list is left
  /// unchanged.

  pub fn remove_at(&mut self, index: usize) -> Result<T, Error> {
    if index >= self.len {
      return Err(Error::OutOfRange { index, len: self.len });
    }

    // SAFETY:
    //
    // `index < len`, so the list is non-empty and the node at `index - 1`, if
    // any, has a successor. We unlink it from the chain before anything else
    // can observe it.

    let Some(k) = index.checked_sub(1) else {
      return Ok(unsafe { self.pop_front().unwrap_unchecked() });
    };

    let prev = unsafe { node::nth(self.first.unwrap_unchecked(), k) };
    let prev_ref = unsafe { ptr::as_mut_ref(prev) };
    let p = unsafe { prev_ref.next.unwrap_unchecked() };
    let node = unsafe { node::free_node(&self.allocator, p) };

    prev_ref.next = node.next;

    if node.next.is_none() {
      self.last = Some(prev);
    }

    self.len -= 1;

    Ok(node.value)
  }

  /// A reference to the first element.
  ///
  /// # Errors
  ///
  /// Returns [`Error::Empty`] if the list is empty.

  pub fn front(&self) -> Result<&T, Error> {
    let Some(p) = self.first else { return Err(Error::Empty) };
    Ok(&unsafe { ptr::as_ref(p) }.value)
  }

  /// A mutable reference to the first element.
  ///
  /// # Errors
  ///
  /// Returns [`Error::Empty`] if the list is empty.

  pub fn front_mut(&mut self) -> Result<&mut T, Error> {
    let Some(p) = self.first else { return Err(Error::Empty) };
    Ok(&mut unsafe { ptr::as_mut_ref(p) }.value)
  }

  /// A reference to the last element.
  ///
  /// # Errors
  ///
  /// Returns [`Error::Empty`] if the list is empty.

  pub fn back(&self) -> Result<&T, Error> {
    let Some(p) = self.last else { return Err(Error::Empty) };
    Ok(&unsafe { ptr::as_ref(p) }.value)
  }

  /// A mutable reference to the last element.
  ///
  /// # Errors
  ///
  /// Returns [`Error::Empty`] if the list is empty.

  pub fn back_mut(&mut self) -> Result<&mut T, Error> {
    let Some(p) = self.last else { return Err(Error::Empty) };
    Ok(&mut unsafe { ptr::as_mut_ref(p) }.value)
  }

  /// Appends a copy of every element of `other`, in order. `other` is left
  /// unchanged.
  ///
  /// # Panics
  ///
  /// Panics on failure to allocate memory.

  pub fn append<B: Allocator>(&mut self, other: &List<T, B>)
  where
    T: Clone
  {
    unwrap(append(self, other))
  }

  /// Appends a copy of every element of `other`, in order. `other` is left
  /// unchanged.
  ///
  /// # Errors
  ///
  /// An error is returned on failure to allocate memory. In that case no
  /// element has been appended and every node allocated for the copy has been
  /// released.

  pub fn try_append<B: Allocator>(&mut self, other: &List<T, B>) -> Result<(), AllocError>
  where
    T: Clone
  {
    append(self, other)
  }

  /// Creates a deep copy of the list using a clone of its allocator.
  ///
  /// # Errors
  ///
  /// An error is returned on failure to allocate memory.

  pub fn try_clone(&self) -> Result<Self, AllocError>
  where
    T: Clone,
    A: Clone,
  {
    clone_in(self)
  }

  /// Replaces the contents of the list with a copy of `other`.
  ///
  /// The current elements are released first, so on failure the list is left
  /// empty.
  ///
  /// # Errors
  ///
  /// An error is returned on failure to allocate memory.

  pub fn try_clone_from<B: Allocator>(&mut self, other: &List<T, B>) -> Result<(), AllocError>
  where
    T: Clone
  {
    self.clear();
    append(self, other)
  }

  /// A cursor positioned at the first element.

  pub fn cursor(&self) -> Cursor<'_, T> {
    Cursor::new(self.first)
  }

  /// A cursor positioned at the first element which can overwrite elements
  /// in place.

  pub fn cursor_mut(&mut self) -> CursorMut<'_, T> {
    CursorMut::new(self.first)
  }

  /// An iterator over references to the elements, front to back.

  pub fn iter(&self) -> Iter<'_, T> {
    Iter::new(self.first, self.len)
  }

  /// An iterator over mutable references to the elements, front to back.

  pub fn iter_mut(&mut self) -> IterMut<'_, T> {
    IterMut::new(self.first, self.len)
  }

  fn locate(&self, index: usize) -> Result<NonNull<Node<T>>, Error> {
    match self.first {
      // SAFETY:
      //
      // The chain holds exactly `len` nodes.
      Some(first) if index < self.len => Ok(unsafe { node::nth(first, index) }),
      _ => Err(Error::OutOfRange { index, len: self.len }),
    }
  }

  fn link_back(&mut self, chain: Chain<T>) {
    match self.last {
      None => self.first = Some(chain.first),
      Some(last) => unsafe { ptr::as_mut_ref(last) }.next = Some(chain.first),
    }

    self.last = Some(chain.last);
    self.len += chain.len;
  }
}

impl<T, A: Allocator> Drop for List<T, A> {
  fn drop(&mut self) {
    // SAFETY:
    //
    // The list owns its chain and nothing can observe it after this.

    unsafe { node::destroy_chain(&self.allocator, self.first) }
  }
}

impl<T: Clone, A: Allocator + Clone> Clone for List<T, A> {
  fn clone(&self) -> Self {
    unwrap(clone_in(self))
  }

  fn clone_from(&mut self, source: &Self) {
    self.clear();
    unwrap(append(self, source))
  }
}

impl<T, A: Allocator + Default> Default for List<T, A> {
  fn default() -> Self {
    Self::new_in(A::default())
  }
}

impl<T: fmt::Debug, A: Allocator> fmt::Debug for List<T, A> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_list().entries(self.iter()).finish()
  }
}

impl<T: PartialEq, A: Allocator, B: Allocator> PartialEq<List<T, B>> for List<T, A> {
  fn eq(&self, other: &List<T, B>) -> bool {
    self.len == other.len && self.iter().eq(other.iter())
  }
}

impl<T: Eq, A: Allocator> Eq for List<T, A> { }

impl<T> FromIterator<T> for List<T> {
  fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
    let mut r = Self::new();
    r.extend(iter);
    r
  }
}

impl<T, A: Allocator> Extend<T> for List<T, A> {
  fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
    for x in iter {
      self.push_back(x);
    }
  }
}

impl<T, A: Allocator> IntoIterator for List<T, A> {
  type Item = T;
  type IntoIter = IntoIter<T, A>;

  fn into_iter(self) -> IntoIter<T, A> {
    IntoIter::new(self)
  }
}

impl<'a, T, A: Allocator> IntoIterator for &'a List<T, A> {
  type Item = &'a T;
  type IntoIter = Iter<'a, T>;

  fn into_iter(self) -> Iter<'a, T> {
    self.iter()
  }
}

impl<'a, T, A: Allocator> IntoIterator for &'a mut List<T, A> {
  type Item = &'a mut T;
  type IntoIter = IterMut<'a, T>;

  fn into_iter(self) -> IterMut<'a, T> {
    self.iter_mut()
  }
}
