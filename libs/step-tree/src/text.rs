//! # Text Arena
//!
//! Append-only pool of fixed-capacity pages holding interned character data.
//! Every lexeme the lexer reports is copied into the arena once; the rest of
//! the tree refers to it through [`TextSlice`] values, which are plain
//! (page, offset, length) indices.
//!
//! ## Example
//!
//! ```rust
//! use step_tree::text::TextArena;
//!
//! let mut arena = TextArena::new(64);
//! let slice = arena.intern("ADVANCED_FACE");
//! assert_eq!(arena.resolve(slice), "ADVANCED_FACE");
//! ```

// =============================================================================
// TEXT SLICE
// =============================================================================

/// Reference to interned bytes: owning page, byte offset and byte length.
///
/// A slice never crosses a page boundary; text that does not fit in the
/// current page's remaining capacity is copied whole into a fresh page.
/// Slices stay valid until the arena is cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextSlice {
    /// Owning page index.
    page: u32,
    /// Byte offset within the page.
    start: u32,
    /// Byte length.
    len: u32,
}

impl TextSlice {
    /// Byte length of the interned text.
    pub fn len(&self) -> usize {
        self.len as usize
    }

    /// Whether the interned text is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

// =============================================================================
// TEXT ARENA
// =============================================================================

/// One page of interned text. The buffer is never reallocated past its
/// fixed capacity, so slices into it remain stable.
struct TextPage {
    buf: String,
    capacity: usize,
}

/// Append-only interning arena for lexed text.
///
/// ## Example
///
/// ```rust
/// use step_tree::text::TextArena;
///
/// let mut arena = TextArena::new(16);
/// let a = arena.intern("#123");
/// let b = arena.intern("#124");
/// assert_eq!(arena.resolve(a), "#123");
/// assert_eq!(arena.resolve(b), "#124");
/// ```
pub struct TextArena {
    /// Allocated pages, oldest first. The last page is the current one.
    pages: Vec<TextPage>,
    /// Fixed byte capacity for regular pages.
    page_capacity: usize,
    /// Most recently interned slice, target of [`TextArena::replace_last`].
    last: Option<TextSlice>,
}

impl TextArena {
    /// Create an empty arena. No page is allocated until the first intern.
    pub fn new(page_capacity: usize) -> Self {
        Self {
            pages: Vec::new(),
            page_capacity: page_capacity.max(1),
            last: None,
        }
    }

    /// Copy `text` into the arena and return a slice referring to it.
    ///
    /// Allocates a new page first if the current page cannot hold the whole
    /// value; text longer than a regular page gets a dedicated oversized
    /// page, so no value is ever split or truncated.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use step_tree::text::TextArena;
    ///
    /// let mut arena = TextArena::new(8);
    /// let slice = arena.intern("a value longer than one page");
    /// assert_eq!(arena.resolve(slice), "a value longer than one page");
    /// ```
    pub fn intern(&mut self, text: &str) -> TextSlice {
        let fits = self
            .pages
            .last()
            .is_some_and(|page| page.buf.len() + text.len() <= page.capacity);
        if !fits {
            let capacity = self.page_capacity.max(text.len());
            self.pages.push(TextPage {
                buf: String::with_capacity(capacity),
                capacity,
            });
        }
        let page = self.pages.len() - 1;
        let buf = &mut self.pages[page].buf;
        let start = buf.len();
        buf.push_str(text);
        let slice = TextSlice {
            page: page as u32,
            start: start as u32,
            len: text.len() as u32,
        };
        self.last = Some(slice);
        slice
    }

    /// Overwrite the most recently interned slice in place.
    ///
    /// Used when the lexer revises the lexeme it just produced, e.g. after
    /// normalizing an escaped character sequence. Falls back to a fresh
    /// intern when the new bytes no longer fit within the owning page's
    /// capacity at the slice's offset, or when nothing was interned yet.
    pub fn replace_last(&mut self, text: &str) -> TextSlice {
        let Some(last) = self.last else {
            return self.intern(text);
        };
        let page = &mut self.pages[last.page as usize];
        let start = last.start as usize;
        if start + text.len() <= page.capacity {
            // The last slice always sits at the tail of its page, so
            // truncating back to its offset removes exactly that slice.
            page.buf.truncate(start);
            page.buf.push_str(text);
            let slice = TextSlice {
                page: last.page,
                start: last.start,
                len: text.len() as u32,
            };
            self.last = Some(slice);
            slice
        } else {
            self.intern(text)
        }
    }

    /// Read a slice back. Panics on a slice from before the last clear.
    pub fn resolve(&self, slice: TextSlice) -> &str {
        let page = &self.pages[slice.page as usize];
        let start = slice.start as usize;
        &page.buf[start..start + slice.len as usize]
    }

    /// Number of pages currently allocated.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Drop every page. All outstanding slices become invalid.
    pub fn clear(&mut self) {
        self.pages.clear();
        self.last = None;
    }
}

// =============================================================================
// TESTS
// =============================================================================
