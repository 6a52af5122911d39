mod allocation;

use std::{marker::PhantomData, mem::{self, MaybeUninit}, ops::{Index, IndexMut}, ptr::NonNull};

use crate::errors::AllocErr;
use allocation::{allocate, deallocate};
pub(crate) use allocation::infallible;

/// An owned block of uninitialized slots for `T`.
///
/// `RawMemory` only allocates and frees. It never constructs or drops a `T`;
/// whoever owns it decides which slots are live and must drop them before the
/// block is released or swapped away.
///
/// An empty block (capacity 0) holds a dangling pointer and owns no allocation.
/// Zero-sized types track a capacity but never allocate.
///
/// # Examples
///
/// ```
/// use advector::RawMemory;
///
/// let mut mem = RawMemory::<u32>::with_capacity(4);
/// assert_eq!(mem.capacity(), 4);
///
/// mem[0].write(7);
/// assert_eq!(unsafe { mem[0].assume_init_read() }, 7);
/// ```
pub struct RawMemory<T> {
    ptr: NonNull<T>,
    capacity: usize,
    _owns: PhantomData<T>,
}

unsafe impl<T: Send> Send for RawMemory<T> {}
unsafe impl<T: Sync> Sync for RawMemory<T> {}

impl<T> Drop for RawMemory<T> {
    fn drop(&mut self) {
        unsafe { deallocate(self.ptr, self.capacity) }
    }
}

impl<T> Default for RawMemory<T> {
    #[inline]
    fn default() -> Self { Self::new() }
}

impl<T> Index<usize> for RawMemory<T> {
    type Output = MaybeUninit<T>;

    /// # Panics
    ///
    /// Panics if `index >= capacity`.
    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        assert!(index < self.capacity, "slot index (is {index}) should be < capacity (is {})", self.capacity);
        unsafe { &*self.ptr.as_ptr().add(index).cast::<MaybeUninit<T>>() }
    }
}

impl<T> IndexMut<usize> for RawMemory<T> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        assert!(index < self.capacity, "slot index (is {index}) should be < capacity (is {})", self.capacity);
        unsafe { &mut *self.ptr.as_ptr().add(index).cast::<MaybeUninit<T>>() }
    }
}

impl<T> RawMemory<T> {

    /// An empty block with no allocation.
    #[inline]
    pub const fn new() -> Self {
        Self { ptr: NonNull::dangling(), capacity: 0, _owns: PhantomData }
    }

    /// Allocates a block for exactly `capacity` slots.
    ///
    /// # Panics
    ///
    /// Panics on capacity overflow, and aborts through
    /// [`handle_alloc_error`](std::alloc::handle_alloc_error) if the allocator
    /// fails.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        infallible(Self::try_with_capacity(capacity))
    }

    /// Fallible form of [`with_capacity`](Self::with_capacity).
    ///
    /// ```
    /// use advector::{AllocErr, RawMemory};
    ///
    /// assert!(RawMemory::<u8>::try_with_capacity(16).is_ok());
    /// assert_eq!(RawMemory::<u64>::try_with_capacity(usize::MAX).err(), Some(AllocErr::Overflow));
    /// ```
    pub fn try_with_capacity(capacity: usize) -> Result<Self, AllocErr> {
        let ptr = allocate::<T>(capacity)?;
        Ok(Self { ptr, capacity, _owns: PhantomData })
    }

    /// Number of slots in the block.
    #[inline(always)]
    pub const fn capacity(&self) -> usize { self.capacity }

    /// Address of slot 0, dangling for an empty block.
    #[inline(always)]
    pub const fn as_ptr(&self) -> *const T { self.ptr.as_ptr() }

    #[inline(always)]
    pub const fn as_mut_ptr(&mut self) -> *mut T { self.ptr.as_ptr() }

    /// Address of the slot at `offset`.
    ///
    /// One-past-the-end (`offset == capacity`) is allowed for pointer arithmetic
    /// but must never be dereferenced.
    ///
    /// # Panics
    ///
    /// Panics if `offset > capacity`.
    #[inline]
    pub fn ptr_at(&self, offset: usize) -> *const T {
        assert!(offset <= self.capacity, "slot offset (is {offset}) should be <= capacity (is {})", self.capacity);
        unsafe { self.as_ptr().add(offset) }
    }

    /// Mutable form of [`ptr_at`](Self::ptr_at).
    #[inline]
    pub fn mut_ptr_at(&mut self, offset: usize) -> *mut T {
        assert!(offset <= self.capacity, "slot offset (is {offset}) should be <= capacity (is {})", self.capacity);
        unsafe { self.as_mut_ptr().add(offset) }
    }

    /// Exchanges blocks with `other` in *O*(1).
    #[inline]
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(&mut self.ptr, &mut other.ptr);
        mem::swap(&mut self.capacity, &mut other.capacity);
    }

    /// Moves the block out, leaving `self` empty.
    ///
    /// ```
    /// use advector::RawMemory;
    ///
    /// let mut mem = RawMemory::<u8>::with_capacity(8);
    /// let moved = mem.take();
    ///
    /// assert_eq!(moved.capacity(), 8);
    /// assert_eq!(mem.capacity(), 0);
    /// ```
    #[inline]
    pub fn take(&mut self) -> Self { mem::take(self) }
}
