//! Bit transpose for swapped-axis frames
//!
//! With axes swapped the host renders a 128x256 portrait frame: 32 pages of 128
//! columns, bit `b` of byte `page * 128 + x` being pixel `(x, page * 8 + b)`.
//! The controller, scanning vertically, wants 256 columns of 16 page bytes:
//! pixel `(x, y)` lands in byte `y * 16 + x / 8`, bit `x % 8`.
//!
//! The transform is one-way. Writes that would land outside the 4096-byte
//! destination are dropped, not reported.

use log::trace;

/// Source page width in bytes
pub const SOURCE_COLUMNS: usize = 128;

/// Page bytes per destination column
pub const DEST_PAGES: usize = 16;

/// Destination size: 16 pages x 256 columns
pub const REMAP_BUFFER_SIZE: usize = DEST_PAGES * 256;

/// Scratch space for one remapped frame, owned by a single driver instance
pub struct RemapBuffer {
    buffer: [u8; REMAP_BUFFER_SIZE],
}

impl RemapBuffer {
    pub const fn new() -> Self {
        Self {
            buffer: [0; REMAP_BUFFER_SIZE],
        }
    }

    /// Clear the scratch and transpose `src` into it
    pub fn remap(&mut self, src: &[u8]) -> &[u8] {
        self.buffer.fill(0);
        let dropped = remap_swapped(src, &mut self.buffer);
        if dropped > 0 {
            trace!("remap dropped {dropped} out-of-range pixels");
        }
        &self.buffer
    }
}

impl Default for RemapBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// OR every set bit of `src` into its transposed position in `dst`
///
/// `dst` is not cleared. Returns the number of set bits whose destination fell
/// outside `dst`.
pub fn remap_swapped(src: &[u8], dst: &mut [u8; REMAP_BUFFER_SIZE]) -> usize {
    let mut dropped = 0;

    for (page, row) in src.chunks(SOURCE_COLUMNS).enumerate() {
        for (x, &byte) in row.iter().enumerate() {
            if byte == 0 {
                continue;
            }
            for bit in 0..8 {
                if byte & (1 << bit) == 0 {
                    continue;
                }
                let y = page * 8 + bit;
                match dst.get_mut(y * DEST_PAGES + x / 8) {
                    Some(target) => *target |= 1 << (x % 8),
                    None => dropped += 1,
                }
            }
        }
    }

    dropped
}
