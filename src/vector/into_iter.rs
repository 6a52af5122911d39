use std::{fmt, iter::FusedIterator, ops::Range, ptr, slice};

use crate::RawMemory;


/// An iterator that moves out of a [`Vector`](super::Vector).
///
/// Created by [`Vector::into_iter`](super::Vector::into_iter). Slots in
/// `live` still hold values; everything outside it has been read out already.
/// Values not consumed are dropped along with the iterator, then the block
/// is freed.
pub struct IntoIter<T> {
    data: RawMemory<T>,
    live: Range<usize>,
}

impl <T> IntoIter<T> {
    #[inline]
    pub(super) fn new(data: RawMemory<T>, len: usize) -> Self {
        debug_assert!(len <= data.capacity());
        Self { data, live: 0..len }
    }

    /// The values not yet yielded.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        unsafe { slice::from_raw_parts(self.data.ptr_at(self.live.start), self.live.len()) }
    }
}

impl <T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        let remaining = ptr::slice_from_raw_parts_mut(
            self.data.mut_ptr_at(self.live.start),
            self.live.len()
        );
        self.live.end = self.live.start;
        unsafe { ptr::drop_in_place(remaining) }
    }
}

#[cfg(not(tarpaulin_include))]
impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
    }
}

impl <T> Iterator for IntoIter<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let index = self.live.next()?;
        Some(unsafe { self.data.ptr_at(index).read() })
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.live.len();
        (len, Some(len))
    }
}

impl <T> DoubleEndedIterator for IntoIter<T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        let index = self.live.next_back()?;
        Some(unsafe { self.data.ptr_at(index).read() })
    }
}

impl <T> ExactSizeIterator for IntoIter<T> {
    #[inline]
    fn len(&self) -> usize { self.live.len() }
}

impl <T> FusedIterator for IntoIter<T> {}
