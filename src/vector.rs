mod into_iter;

use std::{fmt, mem, ops::{Deref, DerefMut, Index, IndexMut}, ptr, slice::{self, SliceIndex}};

use crate::{errors::AllocErr, raw_memory::{infallible, RawMemory}};
pub use into_iter::IntoIter;

/// A contiguous growable array built directly on a [`RawMemory`] block.
///
/// Slots `0..len` hold live values; slots `len..capacity` are uninitialized
/// and are never read or dropped.
///
/// # Examples
///
/// ```
/// use advector::Vector;
///
/// let mut vector = Vector::new();
/// vector.push(1);
/// vector.push(2);
/// vector.push(3);
///
/// vector.insert(1, 99);
/// assert_eq!(vector, [1, 99, 2, 3]);
///
/// vector.erase(0);
/// assert_eq!(vector, [99, 2, 3]);
///
/// vector[0] = 7;
/// for v in &vector {
///     println!("{v}");
/// }
/// ```
///
/// # Indexing
///
/// Indexing is always bounds checked. Out of range access panics.
/// ```should_panic
/// use advector::Vector;
///
/// let vector = Vector::from([1, 2, 3]);
/// println!("{}", vector[3]); // Panics!
/// ```
///
/// Use `get` through the slice deref for a checked lookup.
///
/// # Capacity
///
/// Appending to a full vector allocates a new block of twice the capacity (or
/// one slot, when empty), moves the live values over and releases the old
/// block. Pushing `n` values therefore moves *O*(`n`) values in total.
/// [`reserve`](Self::reserve) allocates exactly what is asked for.
///
/// Any reallocation invalidates every pointer into the vector.
///
/// # Unwinding
///
/// `len` only ever counts fully constructed values. If a `clone`, `default` or
/// constructor closure panics midway, the values built so far are dropped, any
/// half-built block is freed and the vector keeps its previous contents.
pub struct Vector<T> {
    data: RawMemory<T>,
    len: usize,
}

impl<T> Drop for Vector<T> {
    fn drop(&mut self) {
        unsafe { ptr::drop_in_place(self.as_mut_slice()) }
    }
}

impl<T> Default for Vector<T> {
    #[inline]
    fn default() -> Self { Self::new() }
}

impl<T: Clone> Clone for Vector<T> {

    /// Copies every live value into a block sized exactly to `self.len()`.
    fn clone(&self) -> Self {
        let mut vector = Self::with_capacity(self.len);
        for value in self.iter() {
            unsafe { vector.push_unchecked(value.clone()) }
        }
        vector
    }

    /// Copy-assigns `source` into `self`.
    ///
    /// When `source` does not fit the current block, a full copy is built first
    /// and swapped in, so a panicking `clone` leaves `self` untouched. Otherwise
    /// the existing block is reused: the shared prefix is assigned in place,
    /// surplus values are dropped and missing ones are cloned into the free
    /// slots.
    fn clone_from(&mut self, source: &Self) {
        if source.len > self.capacity() {
            *self = source.clone();
            return
        }

        let shared = self.len.min(source.len);
        self[..shared].clone_from_slice(&source[..shared]);

        if self.len > source.len {
            self.truncate(source.len);
        } else {
            for value in &source[shared..] {
                unsafe { self.push_unchecked(value.clone()) }
            }
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Vector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for Vector<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for Vector<T> {}

impl<T: PartialEq, const N: usize> PartialEq<[T; N]> for Vector<T> {
    fn eq(&self, other: &[T; N]) -> bool {
        self.as_slice() == other
    }
}

impl<T: PartialEq, const N: usize> PartialEq<&[T; N]> for Vector<T> {
    fn eq(&self, other: &&[T; N]) -> bool {
        self.as_slice() == *other
    }
}

impl<T: PartialEq> PartialEq<[T]> for Vector<T> {
    fn eq(&self, other: &[T]) -> bool {
        self.as_slice() == other
    }
}

impl<T: PartialEq> PartialEq<&[T]> for Vector<T> {
    fn eq(&self, other: &&[T]) -> bool {
        self.as_slice() == *other
    }
}

impl<T: PartialEq> PartialEq<Vec<T>> for Vector<T> {
    fn eq(&self, other: &Vec<T>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl <T> Deref for Vector<T> {
    type Target = [T];
    #[inline]
    fn deref(&self) -> &Self::Target { self.as_slice() }
}

impl <T> DerefMut for Vector<T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target { self.as_mut_slice() }
}

impl<T, I: SliceIndex<[T]>> Index<I> for Vector<T> {
    type Output = I::Output;

    #[inline]
    fn index(&self, index: I) -> &Self::Output {
        Index::index(&**self, index)
    }
}

impl<T, I: SliceIndex<[T]>> IndexMut<I> for Vector<T> {
    #[inline]
    fn index_mut(&mut self, index: I) -> &mut Self::Output {
        IndexMut::index_mut(&mut **self, index)
    }
}

impl<T> IntoIterator for Vector<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    /// Moves every value out of the vector, front to back.
    ///
    /// ```
    /// use advector::Vector;
    ///
    /// let vector = Vector::from(["a".to_string(), "b".to_string()]);
    /// let mut iter = vector.into_iter();
    ///
    /// assert_eq!(iter.next_back(), Some("b".to_string()));
    /// assert_eq!(iter.len(), 1);
    /// ```
    #[inline]
    fn into_iter(mut self) -> Self::IntoIter {
        let len = mem::replace(&mut self.len, 0);
        IntoIter::new(self.data.take(), len)
    }
}

impl<'a, T> IntoIterator for &'a Vector<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter { self.iter() }
}

impl<'a, T> IntoIterator for &'a mut Vector<T> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter { self.iter_mut() }
}

impl<T> Extend<T> for Vector<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, items: I) {
        items.into_iter().for_each(|value| self.push(value));
    }
}

impl<'a, T: Copy + 'a> Extend<&'a T> for Vector<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, items: I) {
        items.into_iter().for_each(|value| self.push(*value));
    }
}

impl<T> FromIterator<T> for Vector<T> {
    fn from_iter<I: IntoIterator<Item = T>>(items: I) -> Self {
        let mut vector = Self::new();
        vector.extend(items);
        vector
    }
}

impl <T, const N: usize> From<[T; N]> for Vector<T> {

    /// Moves the array into a block of exactly `N` slots.
    fn from(arr: [T; N]) -> Self {
        let mut vector = Self::with_capacity(N);
        arr.into_iter().for_each(|value| unsafe { vector.push_unchecked(value) });
        vector
    }
}

impl <T> From<Vec<T>> for Vector<T> {
    fn from(vec: Vec<T>) -> Self {
        let mut vector = Self::with_capacity(vec.len());
        vec.into_iter().for_each(|value| unsafe { vector.push_unchecked(value) });
        vector
    }
}

impl <T> From<Vector<T>> for Vec<T> {
    fn from(vector: Vector<T>) -> Self {
        vector.into_iter().collect()
    }
}

impl<T> Vector<T> {

    /// Constructs a new, empty `Vector<T>` without allocating.
    ///
    /// ```
    /// use advector::Vector;
    ///
    /// let vector = Vector::<i32>::new();
    /// assert_eq!(vector.len(), 0);
    /// assert_eq!(vector.capacity(), 0);
    /// ```
    #[inline]
    pub const fn new() -> Self {
        Self { data: RawMemory::new(), len: 0 }
    }

    /// Constructs an empty vector with a block of exactly `capacity` slots.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self { data: RawMemory::with_capacity(capacity), len: 0 }
    }

    /// Constructs a vector of `len` default values in a block of exactly `len` slots.
    ///
    /// ```
    /// use advector::Vector;
    ///
    /// let vector = Vector::<i32>::with_len(3);
    /// assert_eq!(vector, [0, 0, 0]);
    /// assert_eq!(vector.capacity(), 3);
    /// ```
    pub fn with_len(len: usize) -> Self
    where
        T: Default,
    {
        let mut vector = Self::with_capacity(len);
        vector.resize_with(len, T::default);
        vector
    }

    /// Number of live values.
    #[inline(always)]
    pub const fn len(&self) -> usize { self.len }

    #[inline(always)]
    pub const fn is_empty(&self) -> bool { self.len == 0 }

    /// Number of slots in the current block.
    #[inline(always)]
    pub const fn capacity(&self) -> usize { self.data.capacity() }

    /// Moves the whole vector out in *O*(1), leaving `self` empty with no block.
    ///
    /// ```
    /// use advector::Vector;
    ///
    /// let mut source = Vector::from([1, 2, 3]);
    /// let moved = source.take();
    ///
    /// assert_eq!(moved, [1, 2, 3]);
    /// assert!(source.is_empty());
    /// ```
    #[inline]
    pub fn take(&mut self) -> Self { mem::take(self) }

    /// Grows the block to exactly `new_capacity` slots.
    ///
    /// Does nothing if `new_capacity <= capacity`. Live values are moved into
    /// the new block and the old one is released.
    ///
    /// # Panics
    ///
    /// Panics if the byte size overflows. Allocator failure goes through
    /// [`handle_alloc_error`](std::alloc::handle_alloc_error).
    ///
    /// ```
    /// use advector::Vector;
    ///
    /// let mut vector = Vector::from([1, 2]);
    /// vector.reserve(10);
    /// assert_eq!(vector.capacity(), 10);
    ///
    /// vector.reserve(4);
    /// assert_eq!(vector.capacity(), 10);
    /// ```
    pub fn reserve(&mut self, new_capacity: usize) {
        infallible(self.try_reserve(new_capacity))
    }

    /// Fallible form of [`reserve`](Self::reserve). On error the vector is unchanged.
    ///
    /// ```
    /// use advector::{AllocErr, Vector};
    ///
    /// let mut vector = Vector::<u64>::from([1, 2]);
    /// assert_eq!(vector.try_reserve(usize::MAX), Err(AllocErr::Overflow));
    /// assert_eq!(vector, [1, 2]);
    /// ```
    pub fn try_reserve(&mut self, new_capacity: usize) -> Result<(), AllocErr> {
        if new_capacity <= self.capacity() { return Ok(()) }

        let new_data = RawMemory::try_with_capacity(new_capacity)?;
        unsafe { self.relocate(new_data, None) };
        Ok(())
    }

    /// Resizes in place so that `len == new_len`, filling new slots with
    /// `T::default()`.
    ///
    /// Growing reserves exactly `new_len` slots first. Shrinking drops the tail
    /// and keeps the block.
    ///
    /// ```
    /// use advector::Vector;
    ///
    /// let mut vector = Vector::<i32>::new();
    /// vector.resize(5);
    /// assert_eq!(vector, [0; 5]);
    ///
    /// vector.resize(2);
    /// assert_eq!(vector, [0; 2]);
    /// assert_eq!(vector.capacity(), 5);
    /// ```
    pub fn resize(&mut self, new_len: usize)
    where
        T: Default,
    {
        self.resize_with(new_len, T::default)
    }

    /// Like [`resize`](Self::resize), with new values produced by `f`.
    pub fn resize_with<F: FnMut() -> T>(&mut self, new_len: usize, mut f: F) {
        if new_len <= self.len {
            self.truncate(new_len);
            return
        }

        self.reserve(new_len);
        while self.len < new_len {
            unsafe { self.push_unchecked(f()) }
        }
    }

    /// Drops every value past `len`. Does nothing if `len >= self.len()`.
    pub fn truncate(&mut self, len: usize) {
        if len >= self.len { return }

        let tail = ptr::slice_from_raw_parts_mut(self.data.mut_ptr_at(len), self.len - len);
        self.len = len;
        unsafe { ptr::drop_in_place(tail) }
    }

    /// Drops every value, keeping the block.
    #[inline]
    pub fn clear(&mut self) { self.truncate(0) }

    /// Appends `value` to the back.
    ///
    /// # Time Complexity
    ///
    /// Amortized *O*(1).
    #[inline]
    pub fn push(&mut self, value: T) {
        self.emplace_back(|| value);
    }

    /// Constructs a value at the back from `f` and returns a reference to it.
    ///
    /// ```
    /// use advector::Vector;
    ///
    /// let mut vector = Vector::<String>::new();
    /// vector.emplace_back(|| "aa".repeat(2)).push('!');
    /// assert_eq!(vector, ["aaaa!".to_string()]);
    /// ```
    #[inline]
    pub fn emplace_back<F: FnOnce() -> T>(&mut self, f: F) -> &mut T {
        self.emplace(self.len, f)
    }

    /// Removes the last value and returns it, or `None` if empty.
    #[inline]
    pub fn pop(&mut self) -> Option<T> {
        match self.len == 0 {
            true => None,
            false => unsafe {
                self.len -= 1;
                Some(self.data.ptr_at(self.len).read())
            }
        }
    }

    /// Drops the last value.
    ///
    /// # Panics
    ///
    /// Panics if the vector is empty.
    #[inline]
    pub fn pop_back(&mut self) {
        assert!(self.len > 0, "pop_back on an empty vector");
        self.truncate(self.len - 1);
    }

    /// Inserts `value` at `index`, shifting everything after it right, and
    /// returns a reference to the inserted value.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    ///
    /// # Time Complexity
    ///
    /// *O*(`len - index`) when there is room, *O*(`len`) when the block grows.
    #[inline]
    pub fn insert(&mut self, index: usize, value: T) -> &mut T {
        self.emplace(index, || value)
    }

    /// Constructs a value from `f` at `index`, shifting everything after it
    /// right, and returns a reference to it.
    ///
    /// When the block is full, a block of twice the capacity is allocated, the
    /// value is built directly in its final slot and the neighbours are moved
    /// around it. If `f` panics at that point, only the new block is freed.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    ///
    /// ```
    /// use advector::Vector;
    ///
    /// let mut vector = Vector::from([1, 3]);
    /// *vector.emplace(1, || 2) *= 10;
    /// assert_eq!(vector, [1, 20, 3]);
    /// ```
    pub fn emplace<F: FnOnce() -> T>(&mut self, index: usize, f: F) -> &mut T {
        assert!(index <= self.len, "insertion index (is {index}) should be <= len (is {})", self.len);

        if self.len == self.capacity() {
            let mut new_data = RawMemory::<T>::with_capacity(self.grown_capacity());
            unsafe {
                new_data.mut_ptr_at(index).write(f());
                self.relocate(new_data, Some(index));
            }
        } else if index == self.len {
            unsafe { self.data.mut_ptr_at(index).write(f()) };
        } else {
            let value = f();
            unsafe {
                let slot = self.data.mut_ptr_at(index);
                ptr::copy(slot, slot.add(1), self.len - index);
                slot.write(value);
            }
        }

        self.len += 1;
        unsafe { &mut *self.data.mut_ptr_at(index) }
    }

    /// Removes and returns the value at `index`, shifting everything after it left.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    pub fn remove(&mut self, index: usize) -> T {
        assert!(index < self.len, "removal index (is {index}) should be < len (is {})", self.len);
        self.len -= 1;
        unsafe {
            let slot = self.data.mut_ptr_at(index);
            let removed = slot.read();
            ptr::copy(slot.add(1), slot, self.len - index);
            removed
        }
    }

    /// Drops the value at `index`, shifting everything after it left.
    ///
    /// Returns the index of the value that now occupies the erased position,
    /// which equals `len()` when the last value was erased.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    ///
    /// ```
    /// use advector::Vector;
    ///
    /// let mut vector = Vector::from([1, 99, 2, 3]);
    /// let next = vector.erase(0);
    ///
    /// assert_eq!(vector, [99, 2, 3]);
    /// assert_eq!(vector[next], 99);
    /// assert_eq!(vector.erase(2), vector.len());
    /// ```
    #[inline]
    pub fn erase(&mut self, index: usize) -> usize {
        drop(self.remove(index));
        index
    }

    /// Pointer to the first slot; dangling when no block is allocated.
    #[inline]
    pub fn as_ptr(&self) -> *const T { self.data.as_ptr() }

    /// Mutable form of [`as_ptr`](Self::as_ptr).
    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T { self.data.as_mut_ptr() }

    /// Extracts a slice of the live values.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        unsafe { slice::from_raw_parts(self.data.as_ptr(), self.len) }
    }

    /// Extracts a mutable slice of the live values.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        unsafe { slice::from_raw_parts_mut(self.data.as_mut_ptr(), self.len) }
    }

    /// Writes `value` into slot `len` without checking for room.
    ///
    /// # Safety
    ///
    /// `len < capacity` must hold.
    #[inline(always)]
    unsafe fn push_unchecked(&mut self, value: T) {
        debug_assert!(self.len < self.capacity());
        unsafe { self.data.mut_ptr_at(self.len).write(value) };
        self.len += 1;
    }

    /// Capacity after growing a full block: double, or one slot when empty.
    #[inline]
    fn grown_capacity(&self) -> usize {
        match self.capacity() {
            0 => 1,
            cap => infallible(cap.checked_mul(2).ok_or(AllocErr::Overflow)),
        }
    }

    /// Moves the live values into `new_data` and adopts it, releasing the old block.
    ///
    /// With `gap = Some(i)`, values from `i` on land one slot further along and
    /// slot `i` is left to the caller. Moves are bitwise and cannot fail, so the
    /// old block is only released once every value has arrived.
    ///
    /// # Safety
    ///
    /// `new_data` must have room for `len` values, plus one when there is a gap,
    /// and `gap` must not exceed `len`.
    unsafe fn relocate(&mut self, mut new_data: RawMemory<T>, gap: Option<usize>) {
        let (split, offset) = match gap {
            Some(index) => (index, 1),
            None => (self.len, 0),
        };
        debug_assert!(split <= self.len && self.len + offset <= new_data.capacity());

        unsafe {
            let src = self.data.as_ptr();
            let dst = new_data.as_mut_ptr();
            ptr::copy_nonoverlapping(src, dst, split);
            ptr::copy_nonoverlapping(src.add(split), dst.add(split + offset), self.len - split);
        }
        self.data.swap(&mut new_data);
    }
}
