use std::{alloc::{Layout, LayoutError}, error::Error, fmt};


/// Failure to obtain a block of slots from the system allocator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllocErr {
    /// The requested slot count overflows the addressable size.
    Overflow,
    /// The element layout could not be extended to the requested count.
    Layout,
    /// The allocator refused the request.
    Alloc { layout: Layout }
}

impl AllocErr {
    #[inline]
    pub(crate) const fn layout(_err: LayoutError) -> Self { Self::Layout }

    #[inline]
    pub(crate) const fn alloc(layout: Layout) -> Self { Self::Alloc { layout } }
}

impl fmt::Display for AllocErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Overflow => write!(f, "capacity overflow"),
            Self::Layout => write!(f, "invalid parameters to Layout::from_size_align"),
            Self::Alloc { layout } => write!(
                f, 
                "memory allocation of {} bytes (align {}) failed", 
                layout.size(), 
                layout.align()
            ),
        }
    }
}

impl Error for AllocErr {}
