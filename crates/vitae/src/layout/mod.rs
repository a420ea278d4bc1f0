//! Layout: block building, font metrics, and preview pagination.

pub mod blocks;
pub mod font_metrics;
pub mod pagination;

pub use blocks::{build_blocks, format_date_range, Block, Emphasis};
pub use font_metrics::{get_metrics, Font, FontMetricTable};
pub use pagination::{
    fit_scale, measure_content_height, page_count_for, PageWindow, PaginationState, Paginator,
    PAGE_HEIGHT_PX, PAGE_WIDTH_PX,
};
