//! Provides a queue of image tiles the render threads work through.
//! The queue itself is not changed after creation, an atomic counter
//! tracks the index of the next tile to work on. Tiles are handed out
//! in Morton order so neighbouring threads tend to touch neighbouring
//! parts of the scene.

use std::sync::atomic::{AtomicUsize, Ordering};
// others
use tracing::warn;

// see github/tray_rust/src/sampler/block_queue.rs

/// Pixel range of a tile, `x1` and `y1` are exclusive.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TileBounds {
    pub x0: u32,
    pub y0: u32,
    pub x1: u32,
    pub y1: u32,
}

impl TileBounds {
    pub fn width(&self) -> u32 {
        self.x1 - self.x0
    }
    pub fn height(&self) -> u32 {
        self.y1 - self.y0
    }
    pub fn area(&self) -> usize {
        (self.width() * self.height()) as usize
    }
}

/// The queue of tiles to be worked on, shared immutably between
/// worker threads.
pub struct BlockQueue {
    /// tile coordinates (in tiles, not pixels)
    blocks: Vec<(u32, u32)>,
    /// size of a full tile
    dimensions: (u32, u32),
    /// size of the image
    image: (u32, u32),
    /// index of the next tile to be worked on
    next: AtomicUsize,
}

impl BlockQueue {
    /// Covers an image of size *img* with tiles of size *dim*. Tiles
    /// along the right and bottom border are clipped to the image.
    pub fn new(img: (u32, u32), dim: (u32, u32)) -> BlockQueue {
        assert!(dim.0 > 0 && dim.1 > 0, "tile size {:?}", dim);
        let num_blocks = (
            (img.0 + dim.0 - 1) / dim.0,
            (img.1 + dim.1 - 1) / dim.1,
        );
        let mut blocks: Vec<(u32, u32)> = (0..num_blocks.0 * num_blocks.1)
            .map(|i| (i % num_blocks.0, i / num_blocks.0))
            .collect();
        blocks.sort_by_key(|b| morton2(*b));
        if blocks.is_empty() {
            warn!("block queue for image {:?} is empty", img);
        }
        BlockQueue {
            blocks,
            dimensions: dim,
            image: img,
            next: AtomicUsize::new(0),
        }
    }
    pub fn block_dim(&self) -> (u32, u32) {
        self.dimensions
    }
    /// Pixel range covered by the tile at *block*.
    pub fn tile_bounds(&self, block: (u32, u32)) -> TileBounds {
        let x0: u32 = block.0 * self.dimensions.0;
        let y0: u32 = block.1 * self.dimensions.1;
        TileBounds {
            x0,
            y0,
            x1: (x0 + self.dimensions.0).min(self.image.0),
            y1: (y0 + self.dimensions.1).min(self.image.1),
        }
    }
    pub fn iter(&self) -> BlockQueueIterator {
        BlockQueueIterator { queue: self }
    }
    /// Next tile in the queue or `None` if the queue is finished.
    pub fn next(&self) -> Option<(u32, u32)> {
        let i = self.next.fetch_add(1, Ordering::AcqRel);
        self.blocks.get(i).copied()
    }
    /// Total number of tiles (handed out or not).
    pub fn len(&self) -> usize {
        self.blocks.len()
    }
    /// All tiles were handed out.
    pub fn is_empty(&self) -> bool {
        self.next.load(Ordering::Acquire) >= self.blocks.len()
    }
}

pub struct BlockQueueIterator<'a> {
    queue: &'a BlockQueue,
}

impl<'a> Iterator for BlockQueueIterator<'a> {
    type Item = (u32, u32);
    fn next(&mut self) -> Option<(u32, u32)> {
        self.queue.next()
    }
}

// see github/tray_rust/src/sampler/morton.rs
// and https://fgiesen.wordpress.com/2009/12/13/decoding-morton-codes/

/// Spread the low 16 bits of x to the even bit positions.
fn part1_by1(mut x: u32) -> u32 {
    x &= 0x0000_ffff;
    x = (x ^ (x << 8)) & 0x00ff_00ff;
    x = (x ^ (x << 4)) & 0x0f0f_0f0f;
    x = (x ^ (x << 2)) & 0x3333_3333;
    (x ^ (x << 1)) & 0x5555_5555
}

fn morton2(p: (u32, u32)) -> u32 {
    (part1_by1(p.1) << 1) + part1_by1(p.0)
}
