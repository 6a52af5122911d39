use std::{alloc::{self, Layout}, mem, ptr::NonNull};

use crate::errors::AllocErr;


#[inline]
pub(crate) fn infallible<T>(result: Result<T, AllocErr>) -> T {
    match result {
        Ok(x) => x,
        Err(AllocErr::Layout) => panic!("invalid parameters to Layout::from_size_align"),
        Err(AllocErr::Overflow) => panic!("capacity overflow"),
        Err(AllocErr::Alloc { layout }) => alloc::handle_alloc_error(layout),
    }
}

#[inline]
pub(super) fn layout_array<T>(n: usize) -> Result<Layout, AllocErr> {

    let size = mem::size_of::<T>()
        .checked_mul(n)
        .ok_or(AllocErr::Overflow)?;

    let align = mem::align_of::<T>();

    Layout::from_size_align(size, align).map_err(AllocErr::layout)
}

/// Allocates uninitialized storage for `n` slots of `T`.
/// 
/// Zero slots, or a zero-sized `T`, never reach the allocator and yield a
/// dangling pointer instead.
pub(super) fn allocate<T>(n: usize) -> Result<NonNull<T>, AllocErr> {
    if n == 0 || mem::size_of::<T>() == 0 { return Ok(NonNull::dangling()) }

    let layout = layout_array::<T>(n)?;
    debug_assert!(layout.size() > 0);

    NonNull::new(unsafe { alloc::alloc(layout) })
        .ok_or(AllocErr::alloc(layout))
        .map(NonNull::cast)
}

/// # Safety
/// 
/// `ptr` must have come from [`allocate`] with the same `cap`.
#[inline]
pub(super) unsafe fn deallocate<T>(ptr: NonNull<T>, cap: usize) {
    if cap == 0 || mem::size_of::<T>() == 0 { return }

    // The layout was validated when the block was allocated
    let layout = unsafe { 
        Layout::from_size_align_unchecked(mem::size_of::<T>() * cap, mem::align_of::<T>()) 
    };
    unsafe { alloc::dealloc(ptr.as_ptr().cast(), layout) };
}
