use allocator_api2::alloc::Allocator;
use core::fmt;
use core::iter::FusedIterator;
use core::marker::PhantomData;
use crate::List;
use crate::node::Link;
use crate::ptr;

/// An iterator over the elements of a [`List`].

pub struct Iter<'a, T> {
  link: Link<T>,
  len: usize,
  marker: PhantomData<&'a T>,
}

unsafe impl<'a, T: Sync> Send for Iter<'a, T> { }

unsafe impl<'a, T: Sync> Sync for Iter<'a, T> { }

/// An iterator over mutable references to the elements of a [`List`].

pub struct IterMut<'a, T> {
  link: Link<T>,
  len: usize,
  marker: PhantomData<&'a mut T>,
}

unsafe impl<'a, T: Send> Send for IterMut<'a, T> { }

unsafe impl<'a, T: Sync> Sync for IterMut<'a, T> { }

/// An owning iterator over the elements of a [`List`].

pub struct IntoIter<T, A: Allocator>(List<T, A>);

impl<'a, T> Iter<'a, T> {
  #[inline(always)]
  pub(crate) fn new(link: Link<T>, len: usize) -> Self {
    Self { link, len, marker: PhantomData, }
  }
}

impl<'a, T> Iterator for Iter<'a, T> {
  type Item = &'a T;

  #[inline(always)]
  fn next(&mut self) -> Option<&'a T> {
    let p = self.link?;
    let node = unsafe { ptr::as_ref(p) };
    self.link = node.next;
    self.len -= 1;
    Some(&node.value)
  }

  #[inline(always)]
  fn size_hint(&self) -> (usize, Option<usize>) {
    (self.len, Some(self.len))
  }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> { }

impl<'a, T> FusedIterator for Iter<'a, T> { }

impl<'a, T> Clone for Iter<'a, T> {
  fn clone(&self) -> Self {
    Self { link: self.link, len: self.len, marker: PhantomData, }
  }
}

impl<'a, T: fmt::Debug> fmt::Debug for Iter<'a, T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_list().entries(self.clone()).finish()
  }
}

impl<'a, T> IterMut<'a, T> {
  #[inline(always)]
  pub(crate) fn new(link: Link<T>, len: usize) -> Self {
    Self { link, len, marker: PhantomData, }
  }
}

impl<'a, T> Iterator for IterMut<'a, T> {
  type Item = &'a mut T;

  #[inline(always)]
  fn next(&mut self) -> Option<&'a mut T> {
    let p = self.link?;
    let node = unsafe { ptr::as_mut_ref(p) };
    self.link = node.next;
    self.len -= 1;
    Some(&mut node.value)
  }

  #[inline(always)]
  fn size_hint(&self) -> (usize, Option<usize>) {
    (self.len, Some(self.len))
  }
}

impl<'a, T> ExactSizeIterator for IterMut<'a, T> { }

impl<'a, T> FusedIterator for IterMut<'a, T> { }

impl<T, A: Allocator> IntoIter<T, A> {
  #[inline(always)]
  pub(crate) fn new(list: List<T, A>) -> Self {
    Self(list)
  }
}

impl<T, A: Allocator> Iterator for IntoIter<T, A> {
  type Item = T;

  #[inline(always)]
  fn next(&mut self) -> Option<T> {
    self.0.pop_front()
  }

  #[inline(always)]
  fn size_hint(&self) -> (usize, Option<usize>) {
    (self.0.len(), Some(self.0.len()))
  }
}

impl<T, A: Allocator> ExactSizeIterator for IntoIter<T, A> { }

impl<T, A: Allocator> FusedIterator for IntoIter<T, A> { }

impl<T: fmt::Debug, A: Allocator> fmt::Debug for IntoIter<T, A> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_tuple("IntoIter").field(&self.0).finish()
  }
}
