//! Forward-only cursors over the chain of a [`List`](crate::List).
//!
//! A cursor remembers the node it started at, so a finished traversal can be
//! restarted with `rewind` without asking the list for a new cursor. The
//! cursor borrows its list, so the list cannot be mutated structurally while
//! the cursor exists.

use core::fmt;
use core::marker::PhantomData;
use core::mem;
use crate::node::Link;
use crate::ptr;

/// A read-only cursor. Created by [`List::cursor`](crate::List::cursor).

pub struct Cursor<'a, T> {
  start: Link<T>,
  current: Link<T>,
  marker: PhantomData<&'a T>,
}

unsafe impl<'a, T: Sync> Send for Cursor<'a, T> { }

unsafe impl<'a, T: Sync> Sync for Cursor<'a, T> { }

/// A cursor which can overwrite elements in place. Created by
/// [`List::cursor_mut`](crate::List::cursor_mut).
///
/// Elements can be replaced but not inserted or removed.

pub struct CursorMut<'a, T> {
  start: Link<T>,
  current: Link<T>,
  marker: PhantomData<&'a mut T>,
}

unsafe impl<'a, T: Send> Send for CursorMut<'a, T> { }

unsafe impl<'a, T: Sync> Sync for CursorMut<'a, T> { }

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// Cursor                                                                     //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

impl<'a, T> Cursor<'a, T> {
  #[inline(always)]
  pub(crate) fn new(start: Link<T>) -> Self {
    Self { start, current: start, marker: PhantomData, }
  }

  /// The element under the cursor, or `None` once the end has been reached.

  #[inline(always)]
  pub fn current(&self) -> Option<&'a T> {
    let p = self.current?;
    Some(&unsafe { ptr::as_ref(p) }.value)
  }

  /// Advances to the next element. Does nothing once the end has been
  /// reached.

  #[inline(always)]
  pub fn move_next(&mut self) {
    if let Some(p) = self.current {
      self.current = unsafe { ptr::as_ref(p) }.next;
    }
  }

  /// Returns to the element the cursor was created at.

  #[inline(always)]
  pub fn rewind(&mut self) {
    self.current = self.start;
  }

  /// Returns `true` once the cursor has moved past the last element. A cursor
  /// over an empty list starts in this state.

  #[inline(always)]
  pub fn end_reached(&self) -> bool {
    self.current.is_none()
  }

  /// Returns `true` if the cursor is at an element which has a successor.

  #[inline(always)]
  pub fn has_successor(&self) -> bool {
    match self.current {
      None => false,
      Some(p) => unsafe { ptr::as_ref(p) }.next.is_some(),
    }
  }
}

impl<'a, T> Clone for Cursor<'a, T> {
  fn clone(&self) -> Self {
    Self { start: self.start, current: self.current, marker: PhantomData, }
  }
}

impl<'a, T: fmt::Debug> fmt::Debug for Cursor<'a, T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_tuple("Cursor").field(&self.current()).finish()
  }
}

////////////////////////////////////////////////////////////////////////////////
//                                                                            //
// CursorMut                                                                  //
//                                                                            //
////////////////////////////////////////////////////////////////////////////////

impl<'a, T> CursorMut<'a, T> {
  #[inline(always)]
  pub(crate) fn new(start: Link<T>) -> Self {
    Self { start, current: start, marker: PhantomData, }
  }

  /// The element under the cursor, or `None` once the end has been reached.

  #[inline(always)]
  pub fn current(&self) -> Option<&T> {
    let p = self.current?;
    Some(&unsafe { ptr::as_ref(p) }.value)
  }

  /// A mutable reference to the element under the cursor, or `None` once the
  /// end has been reached.

  #[inline(always)]
  pub fn current_mut(&mut self) -> Option<&mut T> {
    let p = self.current?;
    Some(&mut unsafe { ptr::as_mut_ref(p) }.value)
  }

  /// Overwrites the element under the cursor.
  ///
  /// Returns the previous element, or hands `value` back if the end has been
  /// reached.

  pub fn set_current(&mut self, value: T) -> Result<T, T> {
    match self.current_mut() {
      Some(x) => Ok(mem::replace(x, value)),
      None => Err(value),
    }
  }

  /// Advances to the next element. Does nothing once the end has been
  /// reached.

  #[inline(always)]
  pub fn move_next(&mut self) {
    if let Some(p) = self.current {
      self.current = unsafe { ptr::as_ref(p) }.next;
    }
  }

  /// Returns to the element the cursor was created at.

  #[inline(always)]
  pub fn rewind(&mut self) {
    self.current = self.start;
  }

  /// Returns `true` once the cursor has moved past the last element.

  #[inline(always)]
  pub fn end_reached(&self) -> bool {
    self.current.is_none()
  }

  /// Returns `true` if the cursor is at an element which has a successor.

  #[inline(always)]
  pub fn has_successor(&self) -> bool {
    match self.current {
      None => false,
      Some(p) => unsafe { ptr::as_ref(p) }.next.is_some(),
    }
  }

  /// A read-only cursor at the same position, borrowing this one.

  pub fn as_cursor(&self) -> Cursor<'_, T> {
    Cursor { start: self.start, current: self.current, marker: PhantomData, }
  }
}

impl<'a, T: fmt::Debug> fmt::Debug for CursorMut<'a, T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_tuple("CursorMut").field(&self.current()).finish()
  }
}
