use serde::Serialize;

/// Order in which the top-level build-heap loop calls heapify.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LoopVariant {
    /// Class code contribution (a multiple of 100).
    pub code: u32,
    /// Display name used in reports.
    pub name: &'static str,
    /// Heap indices visited by the main loop, in order.
    pub order: [usize; 5],
}

impl LoopVariant {
    /// Descending index order of the textbook algorithm.
    pub const CORRECT: LoopVariant = LoopVariant {
        code: 100,
        name: "Correct",
        order: [4, 3, 2, 1, 0],
    };

    /// Loop variants of the 10-element exercise in catalogue order.
    pub const ALL: [LoopVariant; 8] = [
        LoopVariant::CORRECT,
        LoopVariant {
            code: 200,
            name: "Zigzag RL",
            order: [4, 3, 1, 2, 0],
        },
        LoopVariant {
            code: 300,
            name: "Zigzag LR",
            order: [3, 4, 2, 1, 0],
        },
        LoopVariant {
            code: 400,
            name: "Level LR",
            order: [3, 4, 1, 2, 0],
        },
        LoopVariant {
            code: 500,
            name: "Top-down",
            order: [0, 1, 2, 3, 4],
        },
        LoopVariant {
            code: 600,
            name: "Zigzag top-down LR",
            order: [0, 1, 2, 4, 3],
        },
        LoopVariant {
            code: 700,
            name: "Zigzag top-down RL",
            order: [0, 2, 1, 4, 3],
        },
        LoopVariant {
            code: 800,
            name: "Inorder",
            order: [3, 1, 4, 0, 2],
        },
    ];

    /// Looks up a loop variant by its code.
    pub fn from_code(code: u32) -> Option<LoopVariant> {
        Self::ALL.into_iter().find(|variant| variant.code == code)
    }
}

/// Main-loop orders for heaps of arbitrary size.
pub struct LoopOrder;

impl LoopOrder {
    /// Internal nodes from the last one down to the root.
    pub fn bottom_up(heap_size: usize) -> Vec<usize> {
        (0..heap_size / 2).rev().collect()
    }

    /// Internal nodes from the root down to the last one.
    pub fn top_down(heap_size: usize) -> Vec<usize> {
        (0..heap_size / 2).collect()
    }
}

/// First and last index of every tree level, top-down.
///
/// ```
/// assert_eq!(heap_sim::heap_levels(10), vec![(0, 0), (1, 2), (3, 6), (7, 9)]);
/// ```
pub fn heap_levels(heap_size: usize) -> Vec<(usize, usize)> {
    let mut levels = Vec::new();
    let mut first = 0;
    let mut width = 1;
    while first < heap_size {
        levels.push((first, (first + width - 1).min(heap_size - 1)));
        first += width;
        width *= 2;
    }
    levels
}
