//! Print pagination estimator.
//!
//! Greedily bins an ordered list of content blocks into virtual pages
//! sized by paper and orientation. Deterministic, single pass; a block
//! that would overflow a non-empty page starts a new page, and a block
//! taller than the usable height occupies a page of its own.

/// Vertical margin reserved at the top and bottom of every page.
pub const PAGE_MARGIN_PX: u32 = 48;

/// Supported paper sizes at 96 dpi.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaperSize {
    A4,
    Letter,
    /// 8.5in x 13in long bond, the usual barangay report paper.
    Folio,
}

impl PaperSize {
    /// Portrait (width, height) in pixels at 96 dpi.
    pub fn dimensions_px(self) -> (u32, u32) {
        match self {
            Self::A4 => (794, 1123),
            Self::Letter => (816, 1056),
            Self::Folio => (816, 1248),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Portrait,
    Landscape,
}

/// Chosen paper and orientation for a print run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLayout {
    pub paper: PaperSize,
    pub orientation: Orientation,
}

impl PageLayout {
    pub fn new(paper: PaperSize, orientation: Orientation) -> Self {
        Self { paper, orientation }
    }

    /// Page height available to content after margins.
    pub fn usable_height_px(&self) -> u32 {
        let (width, height) = self.paper.dimensions_px();
        let oriented_height = match self.orientation {
            Orientation::Portrait => height,
            Orientation::Landscape => width,
        };
        oriented_height.saturating_sub(2 * PAGE_MARGIN_PX)
    }
}

/// One content block with a declared rendered height.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentBlock {
    pub label: String,
    pub height_px: u32,
}

impl ContentBlock {
    pub fn new(label: impl Into<String>, height_px: u32) -> Self {
        Self {
            label: label.into(),
            height_px,
        }
    }
}

/// One estimated page of the print preview.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PrintPage {
    pub blocks: Vec<ContentBlock>,
    pub used_height_px: u32,
}

/// Bins `blocks` into pages in order, accumulating heights until the
/// next block would exceed the usable height.
pub fn paginate(blocks: &[ContentBlock], layout: &PageLayout) -> Vec<PrintPage> {
    let usable = layout.usable_height_px();
    let mut pages = Vec::new();
    let mut current = PrintPage::default();

    for block in blocks {
        let next_height = current.used_height_px + block.height_px;
        if next_height > usable && !current.blocks.is_empty() {
            pages.push(std::mem::take(&mut current));
        }
        current.used_height_px += block.height_px;
        current.blocks.push(block.clone());
    }

    if !current.blocks.is_empty() {
        pages.push(current);
    }
    pages
}

#[cfg(test)]
mod tests {
    use super::{paginate, ContentBlock, Orientation, PageLayout, PaperSize};

    fn layout() -> PageLayout {
        PageLayout::new(PaperSize::A4, Orientation::Portrait)
    }

    #[test]
    fn fills_pages_greedily_in_order() {
        // A4 portrait usable height: 1123 - 96 = 1027.
        let blocks = vec![
            ContentBlock::new("header", 400),
            ContentBlock::new("table", 500),
            ContentBlock::new("footer", 200),
        ];
        let pages = paginate(&blocks, &layout());
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].blocks.len(), 2);
        assert_eq!(pages[0].used_height_px, 900);
        assert_eq!(pages[1].blocks[0].label, "footer");
    }

    #[test]
    fn oversized_block_gets_its_own_page() {
        let blocks = vec![
            ContentBlock::new("small", 100),
            ContentBlock::new("huge", 5000),
            ContentBlock::new("tail", 100),
        ];
        let pages = paginate(&blocks, &layout());
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[1].blocks.len(), 1);
        assert_eq!(pages[1].used_height_px, 5000);
    }

    #[test]
    fn landscape_swaps_usable_height() {
        let portrait = PageLayout::new(PaperSize::Folio, Orientation::Portrait);
        let landscape = PageLayout::new(PaperSize::Folio, Orientation::Landscape);
        assert_eq!(portrait.usable_height_px(), 1248 - 96);
        assert_eq!(landscape.usable_height_px(), 816 - 96);
    }

    #[test]
    fn empty_input_produces_no_pages() {
        assert!(paginate(&[], &layout()).is_empty());
    }

    #[test]
    fn zero_height_blocks_stay_on_current_page() {
        let blocks = vec![
            ContentBlock::new("rule", 0),
            ContentBlock::new("body", 1000),
            ContentBlock::new("rule", 0),
        ];
        let pages = paginate(&blocks, &layout());
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].blocks.len(), 3);
    }
}
