use heap_sim::{HeapifyVariant, LoopVariant};

/// Identifier of a classification outcome.
///
/// Catalogue classes are `loop code + heapify code` (100..=811); the
/// structural fallback classes use the small codes below.
pub type ClassCode = u32;

/// Unrecognised or uncertain trace.
pub const UNKNOWN: ClassCode = 0;
/// Trace without any swap.
pub const NO_SWAPS: ClassCode = 11;
/// Complete correct trace followed by further swaps.
pub const EXTRA_STEPS_AFTER_CORRECT: ClassCode = 12;
/// Heapify-like chains visited in build-heap order.
pub const SWAPS_RESEMBLE_BUILD_HEAP: ClassCode = 13;
/// Final state is a min-heap reached some other way.
pub const NONSYSTEMATIC_BUILD_HEAP: ClassCode = 14;
/// Every swap is a legal min-heapify exchange.
pub const LEGAL_SWAPS: ClassCode = 15;
/// Every swap exchanges a parent with a child.
pub const LEGAL_SWAP_INDICES: ClassCode = 16;
/// Correct loop with correct heapify.
pub const CORRECT: ClassCode = 100;

/// One loop/heapify combination of the primary catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogueEntry {
    /// Main-loop variant.
    pub loop_variant: LoopVariant,
    /// Heapify variant.
    pub heapify: HeapifyVariant,
}

impl CatalogueEntry {
    /// Class code of the combination.
    pub fn code(&self) -> ClassCode {
        self.loop_variant.code + self.heapify.code()
    }

    /// `loop / heapify` display name.
    pub fn name(&self) -> String {
        format!("{} / {}", self.loop_variant.name, self.heapify.name())
    }
}

/// All 96 combinations, loop variant major and heapify variant minor.
pub fn catalogue() -> impl Iterator<Item = CatalogueEntry> {
    LoopVariant::ALL.into_iter().flat_map(|loop_variant| {
        HeapifyVariant::ALL
            .into_iter()
            .map(move |heapify| CatalogueEntry {
                loop_variant,
                heapify,
            })
    })
}

/// Name of a structural fallback class.
pub fn fallback_name(code: ClassCode) -> Option<&'static str> {
    match code {
        UNKNOWN => Some("Unknown"),
        NO_SWAPS => Some("No-Swaps"),
        EXTRA_STEPS_AFTER_CORRECT => Some("Extra-Steps-After-Correct"),
        SWAPS_RESEMBLE_BUILD_HEAP => Some("Swaps-Resemble-Build-heap"),
        NONSYSTEMATIC_BUILD_HEAP => Some("Nonsystematic-Build-heap"),
        LEGAL_SWAPS => Some("Legal-swaps"),
        LEGAL_SWAP_INDICES => Some("Legal-swap-indices"),
        _ => None,
    }
}

/// Display name of any class code, or `None` for codes outside both tables.
pub fn class_name(code: ClassCode) -> Option<String> {
    if let Some(name) = fallback_name(code) {
        return Some(name.to_string());
    }
    let loop_variant = LoopVariant::from_code(code - code % 100)?;
    let heapify = HeapifyVariant::from_code(code % 100)?;
    Some(
        CatalogueEntry {
            loop_variant,
            heapify,
        }
        .name(),
    )
}
