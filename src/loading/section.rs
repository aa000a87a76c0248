use serde::{Deserialize, Serialize};

/// An ordered group of cells tagged with the page it came from.
///
/// The engine never looks inside `C`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section<C> {
    pub page: u32,
    pub cells: Vec<C>,
}

impl<C> Section<C> {
    pub fn new(page: u32, cells: Vec<C>) -> Self {
        Self { page, cells }
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Position of a cell on the rendering surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IndexPath {
    pub section: usize,
    pub item: usize,
}

impl IndexPath {
    pub fn new(section: usize, item: usize) -> Self {
        Self { section, item }
    }
}

/// Total number of cells across all sections.
pub fn cell_count<C>(sections: &[Section<C>]) -> usize {
    sections.iter().map(|s| s.cells.len()).sum()
}

/// `max(page) + 1`, or 1 when there are no sections.
pub fn next_page<C>(sections: &[Section<C>]) -> u32 {
    sections.iter().map(|s| s.page).max().unwrap_or(0) + 1
}

/// Index path of the last cell of the last section, if that cell exists.
pub fn last_cell<C>(sections: &[Section<C>]) -> Option<IndexPath> {
    let section = sections.len().checked_sub(1)?;
    let item = sections[section].cells.len().checked_sub(1)?;
    Some(IndexPath::new(section, item))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_page_defaults_to_one() {
        let sections: Vec<Section<u8>> = Vec::new();
        assert_eq!(next_page(&sections), 1);
    }

    #[test]
    fn next_page_uses_highest_page_not_last() {
        let sections = vec![Section::new(3, vec![1]), Section::new(1, vec![2])];
        assert_eq!(next_page(&sections), 4);
    }

    #[test]
    fn last_cell_requires_cells_in_last_section() {
        let sections = vec![Section::new(1, vec!['a', 'b']), Section::new(2, vec![])];
        assert_eq!(last_cell(&sections), None);

        let sections = vec![Section::new(1, vec!['a']), Section::new(2, vec!['b', 'c'])];
        assert_eq!(last_cell(&sections), Some(IndexPath::new(1, 1)));
        assert_eq!(cell_count(&sections), 3);
    }
}
