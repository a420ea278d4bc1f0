//! Preview pagination: fixed-height page windows over measured content.
//!
//! The preview shows the resume as a stack of A4-proportioned pages. The
//! full content is measured once at the page's native width, the number of
//! pages is the measured height divided by one page's height (rounded up),
//! and page `p` clips the vertical window `[p*H, (p+1)*H)` out of the same
//! content. A fit-to-container scale is a pure visual transform computed
//! separately; it never feeds back into the measurement, which is what
//! keeps the recompute loop from oscillating.

use crate::layout::blocks::Block;
use crate::layout::font_metrics::{get_metrics, Font};

// A4 at 96 dpi.
pub const PAGE_WIDTH_PX: f32 = 794.0;
pub const PAGE_HEIGHT_PX: f32 = 1123.0;
pub const PAGE_PADDING_PX: f32 = 32.0;

const PX_PER_MM: f32 = 96.0 / 25.4;

// Preview type scale.
const NAME_LINE_PX: f32 = 36.0;
const CONTACT_LINE_PX: f32 = 52.0;
const SECTION_HEADER_PX: f32 = 40.0;
const BODY_LINE_PX: f32 = 23.0;
const SMALL_LINE_PX: f32 = 20.0;
const BODY_FONT_PX: f32 = 14.0;
const BULLET_INDENT_PX: f32 = 24.0;

/// The vertical slice of content one preview page displays.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageWindow {
    pub start: f32,
    pub end: f32,
}

/// `ceil(content_height / page_height)`, never less than one page.
pub fn page_count_for(content_height_px: f32) -> usize {
    if content_height_px <= 0.0 {
        return 1;
    }
    (content_height_px / PAGE_HEIGHT_PX).ceil() as usize
}

/// Scale that fits the native-width page into a container, capped at 1 so a
/// wide container never magnifies the page.
pub fn fit_scale(container_width_px: f32) -> f32 {
    (container_width_px / PAGE_WIDTH_PX).min(1.0)
}

fn build_windows(page_count: usize) -> Vec<PageWindow> {
    (0..page_count)
        .map(|p| PageWindow {
            start: p as f32 * PAGE_HEIGHT_PX,
            end: (p + 1) as f32 * PAGE_HEIGHT_PX,
        })
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Content measurement
// ────────────────────────────────────────────────────────────────────────────

/// Height one block occupies in the preview, including its trailing spacing.
///
/// Wrapping uses the Inter table at the preview body size; mm-denominated
/// gaps convert at 96 dpi.
pub fn measure_block_px(block: &Block) -> f32 {
    let inter = get_metrics(Font::Inter);
    let content_width = PAGE_WIDTH_PX - 2.0 * PAGE_PADDING_PX;
    match block {
        Block::Name(_) => NAME_LINE_PX,
        Block::Contact(_) => CONTACT_LINE_PX,
        Block::SectionHeader(_) => SECTION_HEADER_PX,
        Block::EntryHeading(_) | Block::DetailLine(_) | Block::SplitRow { .. } => BODY_LINE_PX,
        Block::SmallLine(_) => SMALL_LINE_PX,
        Block::Bullet { text, .. } => {
            let max_em = (content_width - BULLET_INDENT_PX) / BODY_FONT_PX;
            inter.line_count(text, max_em).max(1) as f32 * BODY_LINE_PX
        }
        Block::Paragraph {
            text, gap_after_mm, ..
        } => {
            let max_em = content_width / BODY_FONT_PX;
            let lines = inter.line_count(text, max_em).max(1) as f32;
            lines * BODY_LINE_PX + gap_after_mm * PX_PER_MM
        }
        Block::Gap(mm) => mm * PX_PER_MM,
    }
}

/// Total preview content height for a block sequence, padding included.
pub fn measure_content_height(blocks: &[Block]) -> f32 {
    let body: f32 = blocks.iter().map(measure_block_px).sum();
    body + 2.0 * PAGE_PADDING_PX
}

// ────────────────────────────────────────────────────────────────────────────
// Paginator state machine
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginationState {
    Unmeasured,
    Measured { page_count: usize },
}

/// Tracks the measured page count and the derived page windows.
///
/// Windows are rebuilt only when the page count actually changes, so a
/// re-measurement that lands on the same count is a no-op for observers.
#[derive(Debug)]
pub struct Paginator {
    state: PaginationState,
    windows: Vec<PageWindow>,
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new()
    }
}

impl Paginator {
    /// Starts unmeasured, showing a single empty page.
    pub fn new() -> Self {
        Paginator {
            state: PaginationState::Unmeasured,
            windows: build_windows(1),
        }
    }

    pub fn state(&self) -> PaginationState {
        self.state
    }

    pub fn page_count(&self) -> usize {
        match self.state {
            PaginationState::Unmeasured => 1,
            PaginationState::Measured { page_count } => page_count,
        }
    }

    pub fn windows(&self) -> &[PageWindow] {
        &self.windows
    }

    /// Feeds a fresh content-height measurement in. Returns `true` when the
    /// page windows changed, `false` when the count was already right.
    pub fn observe_content_height(&mut self, content_height_px: f32) -> bool {
        let page_count = page_count_for(content_height_px);
        let unchanged = self.page_count() == page_count;
        self.state = PaginationState::Measured { page_count };
        if unchanged {
            return false;
        }
        self.windows = build_windows(page_count);
        true
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_count_minimum_is_one() {
        assert_eq!(page_count_for(0.0), 1);
        assert_eq!(page_count_for(-5.0), 1);
        assert_eq!(page_count_for(1.0), 1);
    }

    #[test]
    fn test_page_count_rounds_up() {
        assert_eq!(page_count_for(PAGE_HEIGHT_PX), 1);
        assert_eq!(page_count_for(PAGE_HEIGHT_PX + 1.0), 2);
        assert_eq!(page_count_for(PAGE_HEIGHT_PX * 2.5), 3);
    }

    #[test]
    fn test_page_count_monotonic_in_height() {
        let mut last = 0;
        for step in 0..40 {
            let count = page_count_for(step as f32 * 100.0);
            assert!(count >= last, "count decreased at height {}", step * 100);
            last = count;
        }
    }

    #[test]
    fn test_windows_tile_the_content() {
        let mut paginator = Paginator::new();
        paginator.observe_content_height(PAGE_HEIGHT_PX * 2.0 + 50.0);
        let windows = paginator.windows();
        assert_eq!(windows.len(), 3);
        assert_eq!(windows[0].start, 0.0);
        assert_eq!(windows[0].end, PAGE_HEIGHT_PX);
        assert_eq!(windows[2].start, 2.0 * PAGE_HEIGHT_PX);
        assert_eq!(windows[2].end, 3.0 * PAGE_HEIGHT_PX);
    }

    #[test]
    fn test_unmeasured_shows_one_empty_page() {
        let paginator = Paginator::new();
        assert_eq!(paginator.state(), PaginationState::Unmeasured);
        assert_eq!(paginator.page_count(), 1);
        assert_eq!(paginator.windows().len(), 1);
    }

    #[test]
    fn test_observe_same_count_does_not_rebuild() {
        let mut paginator = Paginator::new();
        assert!(paginator.observe_content_height(PAGE_HEIGHT_PX * 1.5));
        assert!(
            !paginator.observe_content_height(PAGE_HEIGHT_PX * 1.8),
            "same page count should be reported as unchanged"
        );
        assert!(paginator.observe_content_height(PAGE_HEIGHT_PX * 2.2));
        assert_eq!(paginator.page_count(), 3);
    }

    #[test]
    fn test_first_measurement_at_one_page_settles_state() {
        let mut paginator = Paginator::new();
        // Count matches the unmeasured default, so windows stay put.
        assert!(!paginator.observe_content_height(300.0));
        assert_eq!(
            paginator.state(),
            PaginationState::Measured { page_count: 1 }
        );
    }

    #[test]
    fn test_fit_scale_clamps_at_native_size() {
        assert!((fit_scale(397.0) - 0.5).abs() < 1e-3);
        assert_eq!(fit_scale(PAGE_WIDTH_PX), 1.0);
        assert_eq!(fit_scale(2000.0), 1.0, "wide containers never magnify");
    }

    #[test]
    fn test_measure_grows_with_content() {
        use crate::layout::blocks::build_blocks;
        use crate::model::{Experience, Resume};

        let mut resume = Resume::default();
        resume.personal.full_name = "Jane Doe".to_string();
        let empty_height = measure_content_height(&build_blocks(&resume));
        assert!(empty_height > 0.0, "even a blank resume has header height");

        resume.experience.push(Experience {
            title: "Engineer".to_string(),
            company: "Acme".to_string(),
            responsibilities: vec!["Shipped the flux capacitor integration".to_string()],
            ..Experience::default()
        });
        let grown = measure_content_height(&build_blocks(&resume));
        assert!(
            grown > empty_height,
            "adding an entry must increase measured height"
        );
    }

    #[test]
    fn test_long_bullet_measures_taller_than_short() {
        let short = Block::Bullet {
            text: "Built X".to_string(),
            line_advance_mm: 4.0,
        };
        let long = Block::Bullet {
            text: "Built a horizontally sharded ingestion pipeline able to absorb bursts of \
                   half a million events per second without backpressure on the producers"
                .to_string(),
            line_advance_mm: 4.0,
        };
        assert!(measure_block_px(&long) > measure_block_px(&short));
    }
}
