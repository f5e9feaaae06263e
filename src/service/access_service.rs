use std::collections::{HashMap, HashSet};

use crate::model::repository::{AccessLevel, FileEntry};

/// recomputes the derived access value of every folder in a project's file
/// set, bottom-up. A folder's value is the single access level shared by all
/// of its descendants, or [`AccessLevel::Mixed`] when they disagree; a folder
/// with no children keeps whatever value it already has. The input is never
/// persisted or mutated here; callers save the returned set themselves, and
/// re-running this over its own output is a no-op
pub fn propagate(entries: &[FileEntry]) -> Vec<FileEntry> {
    let mut children: HashMap<&str, Vec<usize>> = HashMap::new();
    for (index, entry) in entries.iter().enumerate() {
        children.entry(entry.parent.as_str()).or_default().push(index);
    }
    let mut computed: HashMap<String, AccessLevel> = HashMap::new();
    for (index, entry) in entries.iter().enumerate() {
        if entry.parent.is_empty() && entry.is_folder() {
            visit(index, entries, &children, &mut computed);
        }
    }
    entries
        .iter()
        .map(|entry| match computed.get(entry.file_id.as_str()) {
            Some(new_access) if *new_access != entry.access => {
                let mut updated = entry.clone();
                updated.access = *new_access;
                updated
            }
            _ => entry.clone(),
        })
        .collect()
}

fn visit(
    index: usize,
    entries: &[FileEntry],
    children: &HashMap<&str, Vec<usize>>,
    computed: &mut HashMap<String, AccessLevel>,
) -> AccessLevel {
    let folder = &entries[index];
    let mut levels: HashSet<AccessLevel> = HashSet::new();
    if let Some(direct) = children.get(folder.file_id.as_str()) {
        for child_index in direct.iter() {
            let child = &entries[*child_index];
            if child.is_folder() {
                levels.insert(visit(*child_index, entries, children, computed));
            } else {
                levels.insert(child.access);
            }
        }
    }
    let new_access = if levels.is_empty() {
        // childless folders have nothing to derive from
        folder.access
    } else if levels.len() == 1 {
        levels.into_iter().next().unwrap()
    } else {
        AccessLevel::Mixed
    };
    computed.insert(folder.file_id.clone(), new_access);
    new_access
}

#[cfg(test)]
mod propagate_tests {
    use crate::model::repository::{AccessLevel, StorageType};
    use crate::test::entry;

    use super::propagate;

    fn access_of(entries: &[crate::model::repository::FileEntry], file_id: &str) -> AccessLevel {
        entries
            .iter()
            .find(|e| e.file_id == file_id)
            .unwrap()
            .access
    }

    #[test]
    fn folder_with_one_shared_level_takes_that_level() {
        let entries = vec![
            entry("p1", "a", "unit", StorageType::Folder, "", AccessLevel::Team),
            entry("p1", "b", "one.pdf", StorageType::File, "a", AccessLevel::Public),
            entry("p1", "c", "two.pdf", StorageType::File, "a", AccessLevel::Public),
        ];
        let result = propagate(&entries);
        assert_eq!(AccessLevel::Public, access_of(&result, "a"));
    }

    #[test]
    fn folder_with_disagreeing_children_becomes_mixed() {
        let entries = vec![
            entry("p1", "a", "unit", StorageType::Folder, "", AccessLevel::Team),
            entry("p1", "b", "open.pdf", StorageType::File, "a", AccessLevel::Public),
            entry("p1", "c", "draft.docx", StorageType::File, "a", AccessLevel::Team),
        ];
        let result = propagate(&entries);
        assert_eq!(AccessLevel::Mixed, access_of(&result, "a"));
    }

    #[test]
    fn mixed_folder_converges_after_the_odd_child_is_removed() {
        let entries = vec![
            entry("p1", "a", "unit", StorageType::Folder, "", AccessLevel::Team),
            entry("p1", "b", "open.pdf", StorageType::File, "a", AccessLevel::Public),
            entry("p1", "c", "draft.docx", StorageType::File, "a", AccessLevel::Team),
        ];
        let result = propagate(&entries);
        assert_eq!(AccessLevel::Mixed, access_of(&result, "a"));
        // delete the team file and recompute; the folder settles back to public
        let remaining: Vec<_> = result.into_iter().filter(|e| e.file_id != "c").collect();
        let result = propagate(&remaining);
        assert_eq!(AccessLevel::Public, access_of(&result, "a"));
    }

    #[test]
    fn nested_folder_values_roll_up_transitively() {
        let entries = vec![
            entry("p1", "a", "unit", StorageType::Folder, "", AccessLevel::Team),
            entry("p1", "b", "lesson", StorageType::Folder, "a", AccessLevel::Team),
            entry("p1", "c", "deep", StorageType::Folder, "b", AccessLevel::Team),
            entry("p1", "d", "handout.pdf", StorageType::File, "c", AccessLevel::Users),
        ];
        let result = propagate(&entries);
        assert_eq!(AccessLevel::Users, access_of(&result, "a"));
        assert_eq!(AccessLevel::Users, access_of(&result, "b"));
        assert_eq!(AccessLevel::Users, access_of(&result, "c"));
    }

    #[test]
    fn disagreement_surfaces_at_every_ancestor() {
        let entries = vec![
            entry("p1", "a", "unit", StorageType::Folder, "", AccessLevel::Team),
            entry("p1", "b", "lesson", StorageType::Folder, "a", AccessLevel::Team),
            entry("p1", "c", "open.pdf", StorageType::File, "b", AccessLevel::Public),
            entry("p1", "d", "draft.docx", StorageType::File, "b", AccessLevel::Team),
        ];
        let result = propagate(&entries);
        assert_eq!(AccessLevel::Mixed, access_of(&result, "b"));
        assert_eq!(AccessLevel::Mixed, access_of(&result, "a"));
    }

    #[test]
    fn childless_folder_keeps_its_current_value() {
        let entries = vec![entry(
            "p1",
            "a",
            "empty",
            StorageType::Folder,
            "",
            AccessLevel::Instructors,
        )];
        let result = propagate(&entries);
        assert_eq!(AccessLevel::Instructors, access_of(&result, "a"));
    }

    #[test]
    fn running_twice_is_the_same_as_running_once() {
        let entries = vec![
            entry("p1", "a", "unit", StorageType::Folder, "", AccessLevel::Team),
            entry("p1", "b", "lesson", StorageType::Folder, "a", AccessLevel::Team),
            entry("p1", "c", "open.pdf", StorageType::File, "b", AccessLevel::Public),
            entry("p1", "d", "draft.docx", StorageType::File, "a", AccessLevel::Team),
            entry("p1", "e", "spare", StorageType::Folder, "a", AccessLevel::Users),
        ];
        let once = propagate(&entries);
        let twice = propagate(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn files_are_never_rewritten() {
        let entries = vec![
            entry("p1", "a", "unit", StorageType::Folder, "", AccessLevel::Team),
            entry("p1", "b", "open.pdf", StorageType::File, "a", AccessLevel::Public),
        ];
        let result = propagate(&entries);
        assert_eq!(AccessLevel::Public, access_of(&result, "b"));
    }
}
