//! Merging freshly loaded sections into the visible list.
//!
//! Full-refresh intents (`Initial`, `Force`, `PullToRefresh`) replace the
//! list. Everything else merges page by page: a page already on screen is
//! replaced in place, a new page is appended, and the list is then stably
//! sorted by page number.

use crate::error::LoadError;
use crate::loading::section::Section;
use crate::loading::state::LoadingState;

/// What a merge did to the section list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The update carried no sections at all; nothing changed, no refresh needed.
    Skipped,
    /// The update was empty (or a single empty section); the list is unchanged.
    NoNewData,
    /// The whole list was replaced.
    Replaced,
    /// Pages were replaced in place or appended.
    Merged,
}

impl MergeOutcome {
    /// Whether the rendering surface should reload.
    pub fn needs_reload(&self) -> bool {
        matches!(self, MergeOutcome::Replaced | MergeOutcome::Merged)
    }
}

/// Merge `update` into `sections` according to the intent being loaded.
///
/// Fails with [`LoadError::InvariantViolation`] when `state` is not
/// `Loading`; callers treat that as a bug, not a runtime condition.
pub fn merge_sections<C>(
    sections: &mut Vec<Section<C>>,
    state: &LoadingState,
    update: Option<Vec<Section<C>>>,
) -> Result<MergeOutcome, LoadError> {
    let Some(intent) = state.loading_intent() else {
        return Err(LoadError::InvariantViolation {
            message: format!("section merge requested while {:?}", state),
        });
    };
    let Some(new_sections) = update else {
        return Ok(MergeOutcome::Skipped);
    };

    if intent.replaces_content() {
        *sections = new_sections;
        return Ok(MergeOutcome::Replaced);
    }

    if is_no_new_data(&new_sections) {
        return Ok(MergeOutcome::NoNewData);
    }

    for (page, group) in group_by_page(new_sections) {
        match sections.iter().position(|s| s.page == page) {
            Some(position) => {
                sections.retain(|s| s.page != page);
                for section in group.into_iter().rev() {
                    sections.insert(position, section);
                }
            }
            None => sections.extend(group),
        }
    }

    // `sort_by_key` is stable: same-page sections keep their insertion order.
    sections.sort_by_key(|s| s.page);
    Ok(MergeOutcome::Merged)
}

fn is_no_new_data<C>(sections: &[Section<C>]) -> bool {
    match sections {
        [] => true,
        [only] => only.is_empty(),
        _ => false,
    }
}

/// Group sections by page, keeping first-seen page order and in-page order.
fn group_by_page<C>(sections: Vec<Section<C>>) -> Vec<(u32, Vec<Section<C>>)> {
    let mut groups: Vec<(u32, Vec<Section<C>>)> = Vec::new();
    for section in sections {
        match groups.iter_mut().find(|(page, _)| *page == section.page) {
            Some((_, group)) => group.push(section),
            None => groups.push((section.page, vec![section])),
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loading::intent::LoadingIntent;

    fn paging() -> LoadingState {
        LoadingState::Loading(LoadingIntent::Page { page_number: 2 })
    }

    fn pages(sections: &[Section<&'static str>]) -> Vec<u32> {
        sections.iter().map(|s| s.page).collect()
    }

    #[test]
    fn merge_outside_loading_is_an_invariant_violation() {
        let mut sections = vec![Section::new(1, vec!["a"])];
        let result = merge_sections(
            &mut sections,
            &LoadingState::HasData,
            Some(vec![Section::new(2, vec!["b"])]),
        );
        assert!(matches!(result, Err(LoadError::InvariantViolation { .. })));
        assert_eq!(sections.len(), 1);
    }

    #[test]
    fn absent_update_is_skipped() {
        let mut sections = vec![Section::new(1, vec!["a"])];
        let outcome = merge_sections(&mut sections, &paging(), None).unwrap();
        assert_eq!(outcome, MergeOutcome::Skipped);
        assert!(!outcome.needs_reload());
    }

    #[test]
    fn full_refresh_replaces_everything() {
        let mut sections = vec![Section::new(1, vec!["a"]), Section::new(2, vec!["b"])];
        let state = LoadingState::Loading(LoadingIntent::PullToRefresh);
        let outcome =
            merge_sections(&mut sections, &state, Some(vec![Section::new(1, vec!["z"])])).unwrap();
        assert_eq!(outcome, MergeOutcome::Replaced);
        assert_eq!(sections, vec![Section::new(1, vec!["z"])]);
    }

    #[test]
    fn full_refresh_with_empty_result_clears_list() {
        let mut sections = vec![Section::new(1, vec!["a"])];
        let state = LoadingState::Loading(LoadingIntent::Initial);
        let outcome = merge_sections(&mut sections, &state, Some(Vec::new())).unwrap();
        assert_eq!(outcome, MergeOutcome::Replaced);
        assert!(sections.is_empty());
    }

    #[test]
    fn single_empty_section_is_no_new_data() {
        let mut sections = vec![Section::new(1, vec!["a"])];
        let outcome =
            merge_sections(&mut sections, &paging(), Some(vec![Section::new(2, vec![])])).unwrap();
        assert_eq!(outcome, MergeOutcome::NoNewData);
        assert_eq!(pages(&sections), vec![1]);

        let outcome = merge_sections(&mut sections, &paging(), Some(Vec::new())).unwrap();
        assert_eq!(outcome, MergeOutcome::NoNewData);
    }

    #[test]
    fn redelivered_page_is_replaced_not_duplicated() {
        let mut sections = vec![Section::new(1, vec!["x"])];
        let page_two = vec![Section::new(2, vec!["a", "b"])];

        merge_sections(&mut sections, &paging(), Some(page_two.clone())).unwrap();
        merge_sections(&mut sections, &paging(), Some(page_two)).unwrap();

        assert_eq!(
            sections,
            vec![Section::new(1, vec!["x"]), Section::new(2, vec!["a", "b"])]
        );
    }

    #[test]
    fn out_of_order_pages_end_up_sorted() {
        let mut sections = Vec::new();
        for page in [3, 1, 2] {
            merge_sections(&mut sections, &paging(), Some(vec![Section::new(page, vec!["c"])]))
                .unwrap();
        }
        assert_eq!(pages(&sections), vec![1, 2, 3]);
    }

    #[test]
    fn same_page_sections_keep_insertion_order() {
        let mut sections = vec![Section::new(1, vec!["head"])];
        let update = vec![
            Section::new(2, vec!["first"]),
            Section::new(3, vec!["other"]),
            Section::new(2, vec!["second"]),
        ];
        merge_sections(&mut sections, &paging(), Some(update)).unwrap();
        assert_eq!(
            sections,
            vec![
                Section::new(1, vec!["head"]),
                Section::new(2, vec!["first"]),
                Section::new(2, vec!["second"]),
                Section::new(3, vec!["other"]),
            ]
        );
    }

    #[test]
    fn replaced_page_takes_position_of_first_removed_section() {
        let mut sections = vec![
            Section::new(1, vec!["a"]),
            Section::new(2, vec!["old-1"]),
            Section::new(2, vec!["old-2"]),
            Section::new(3, vec!["c"]),
        ];
        let update = vec![Section::new(2, vec!["new-1"]), Section::new(2, vec!["new-2"])];
        let state = LoadingState::Loading(LoadingIntent::Autoupdate);
        merge_sections(&mut sections, &state, Some(update)).unwrap();
        assert_eq!(
            sections,
            vec![
                Section::new(1, vec!["a"]),
                Section::new(2, vec!["new-1"]),
                Section::new(2, vec!["new-2"]),
                Section::new(3, vec!["c"]),
            ]
        );
    }
}
