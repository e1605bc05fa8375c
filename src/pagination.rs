//! Pagination – splits the ordered item list into fixed-capacity page
//! chunks.
//!
//! Handles:
//! - at most [`ITEMS_PER_PAGE`] item rows per page
//! - serial-number continuation across chunks
//! - the Continuation/Final page role that decides where the summary rows
//!   and the "continued ..." marker attach
//! - zero items still producing one (empty) final page

use serde::{Deserialize, Serialize};

/// Item rows per page of the fixed invoice template.
pub const ITEMS_PER_PAGE: usize = 8;

/// Role of a chunk in the document. Only the final page carries the
/// subtotal/tax/round-off/grand-total rows; every other page carries the
/// "continued ..." marker instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageRole {
    Continuation,
    Final,
}

/// One page worth of items, identified by its position in the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageChunk {
    pub index: usize,
    /// Half-open item range `[start, end)` into the original list.
    pub start: usize,
    pub end: usize,
    pub role: PageRole,
}

impl PageChunk {
    /// First serial number printed on this page. Serials are contiguous
    /// across the whole document and start at 1.
    pub fn serial_start(&self) -> usize {
        self.start + 1
    }

    pub fn is_final(&self) -> bool {
        self.role == PageRole::Final
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// The pagination plan for one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagePlan {
    pub chunks: Vec<PageChunk>,
}

impl PagePlan {
    pub fn page_count(&self) -> usize {
        self.chunks.len()
    }
}

/// Split `item_count` items into consecutive chunks of at most
/// [`ITEMS_PER_PAGE`], preserving order. The role is derived purely from
/// the chunk index: the last chunk is `Final`, all others `Continuation`.
pub fn plan_pages(item_count: usize) -> PagePlan {
    let chunk_count = item_count.div_ceil(ITEMS_PER_PAGE).max(1);

    let chunks = (0..chunk_count)
        .map(|index| {
            let start = index * ITEMS_PER_PAGE;
            let end = ((index + 1) * ITEMS_PER_PAGE).min(item_count);
            PageChunk {
                index,
                start,
                end,
                role: if index == chunk_count - 1 {
                    PageRole::Final
                } else {
                    PageRole::Continuation
                },
            }
        })
        .collect();

    PagePlan { chunks }
}
