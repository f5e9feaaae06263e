use std::collections::{HashMap, HashSet};

use crate::model::repository::{AccessLevel, FileEntry};
use crate::model::response::file_responses::{
    EntryResponse, FileTreeNode, FolderContentsResponse, PathNode,
};
use crate::util::natural_cmp;

#[derive(PartialEq, Debug)]
pub enum TreeError {
    /// the requested entry is not present in the set visible to the caller
    NotFound,
}

/// reconstructs the visible tree beneath one folder of a project's flat file
/// set, along with the breadcrumb path from the project root to that folder.
/// `folder_id` may be empty to start at the root. Entries whose access level is
/// not in `levels` are dropped before the tree is built, so a caller never sees
/// them at any depth; a visible folder with no visible children still appears,
/// with an empty `children` array
pub fn folder_contents(
    entries: &[FileEntry],
    folder_id: &str,
    levels: &HashSet<AccessLevel>,
) -> Result<FolderContentsResponse, TreeError> {
    let visible = visible_entries(entries, levels);
    if !folder_id.is_empty()
        && !visible
            .iter()
            .any(|e| e.file_id == folder_id && e.is_folder())
    {
        // an empty folder is a successful, empty listing; a missing one is an error
        return Err(TreeError::NotFound);
    }
    let children = children_by_parent(&visible);
    Ok(FolderContentsResponse {
        files: expand(folder_id, &children),
        path: path_to(entries, folder_id),
    })
}

/// returns a single visible entry (expanded into a nested tree if it is a
/// folder) plus the breadcrumb path down to it
pub fn entry_with_path(
    entries: &[FileEntry],
    file_id: &str,
    levels: &HashSet<AccessLevel>,
) -> Result<EntryResponse, TreeError> {
    let visible = visible_entries(entries, levels);
    let target = visible
        .iter()
        .find(|e| e.file_id == file_id)
        .ok_or(TreeError::NotFound)?;
    let mut node = FileTreeNode::from(*target);
    if target.is_folder() {
        let children = children_by_parent(&visible);
        node.children = expand(file_id, &children);
    }
    Ok(EntryResponse {
        file: node,
        path: path_to(entries, file_id),
    })
}

fn visible_entries<'a>(
    entries: &'a [FileEntry],
    levels: &HashSet<AccessLevel>,
) -> Vec<&'a FileEntry> {
    entries
        .iter()
        .filter(|e| levels.contains(&e.access))
        .collect()
}

/// index the visible set by parent pointer once, instead of re-scanning the
/// whole list at every level of nesting
fn children_by_parent<'a>(visible: &[&'a FileEntry]) -> HashMap<&'a str, Vec<&'a FileEntry>> {
    let mut children: HashMap<&str, Vec<&FileEntry>> = HashMap::new();
    for entry in visible.iter() {
        children.entry(entry.parent.as_str()).or_default().push(entry);
    }
    children
}

fn expand(folder_id: &str, children: &HashMap<&str, Vec<&FileEntry>>) -> Vec<FileTreeNode> {
    let mut nodes = Vec::new();
    if let Some(direct) = children.get(folder_id) {
        for child in direct.iter() {
            let mut node = FileTreeNode::from(*child);
            if child.is_folder() {
                node.children = expand(child.file_id.as_str(), children);
            }
            nodes.push(node);
        }
    }
    nodes.sort_by(|a, b| natural_cmp(&a.name, &b.name));
    nodes
}

/// walks parent pointers upward from the target to the root. The path is built
/// over the full set so a caller can always see where a visible entry lives,
/// and it always starts with the empty-string root node
fn path_to(entries: &[FileEntry], target: &str) -> Vec<PathNode> {
    let by_id: HashMap<&str, &FileEntry> = entries
        .iter()
        .map(|e| (e.file_id.as_str(), e))
        .collect();
    let mut segments = Vec::new();
    let mut seen = HashSet::new();
    let mut cursor = target;
    while !cursor.is_empty() {
        let Some(entry) = by_id.get(cursor) else {
            // broken parent pointer; stop at what we could resolve
            break;
        };
        if !seen.insert(cursor) {
            break;
        }
        segments.push(PathNode {
            file_id: entry.file_id.clone(),
            name: entry.name.clone(),
        });
        cursor = entry.parent.as_str();
    }
    segments.push(PathNode::root());
    segments.reverse();
    segments
}

#[cfg(test)]
mod folder_contents_tests {
    use std::collections::HashSet;

    use crate::model::repository::{AccessLevel, StorageType};
    use crate::model::response::file_responses::PathNode;
    use crate::test::entry;

    use super::{folder_contents, TreeError};

    fn all_levels() -> HashSet<AccessLevel> {
        HashSet::from([
            AccessLevel::Public,
            AccessLevel::Users,
            AccessLevel::Instructors,
            AccessLevel::Team,
            AccessLevel::Mixed,
        ])
    }

    #[test]
    fn lists_root_children_in_natural_order() {
        let entries = vec![
            entry("p1", "f10", "File 10", StorageType::File, "", AccessLevel::Public),
            entry("p1", "f2", "File 2", StorageType::File, "", AccessLevel::Public),
            entry("p1", "f1", "File 1", StorageType::File, "", AccessLevel::Public),
        ];
        let contents = folder_contents(&entries, "", &all_levels()).unwrap();
        let names: Vec<&str> = contents.files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(vec!["File 1", "File 2", "File 10"], names);
        assert_eq!(vec![PathNode::root()], contents.path);
    }

    #[test]
    fn sorts_every_level_of_nesting() {
        let entries = vec![
            entry("p1", "a", "chapters", StorageType::Folder, "", AccessLevel::Public),
            entry("p1", "c9", "chapter 9", StorageType::File, "a", AccessLevel::Public),
            entry("p1", "c11", "chapter 11", StorageType::File, "a", AccessLevel::Public),
            entry("p1", "c10", "chapter 10", StorageType::File, "a", AccessLevel::Public),
        ];
        let contents = folder_contents(&entries, "", &all_levels()).unwrap();
        let nested: Vec<&str> = contents.files[0]
            .children
            .iter()
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(vec!["chapter 9", "chapter 10", "chapter 11"], nested);
    }

    #[test]
    fn filters_unauthorized_leaves_but_judges_folders_on_their_own_access() {
        // the folder's stored value alone decides whether the caller sees it
        let entries = vec![
            entry("p1", "a", "materials", StorageType::Folder, "", AccessLevel::Public),
            entry("p1", "b", "open.pdf", StorageType::File, "a", AccessLevel::Public),
            entry("p1", "c", "draft.docx", StorageType::File, "a", AccessLevel::Team),
        ];
        let levels = HashSet::from([AccessLevel::Public]);
        let contents = folder_contents(&entries, "", &levels).unwrap();
        assert_eq!(1, contents.files.len());
        assert_eq!("materials", contents.files[0].name);
        let nested: Vec<&str> = contents.files[0]
            .children
            .iter()
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(vec!["open.pdf"], nested);
    }

    #[test]
    fn empty_folder_is_a_successful_empty_listing() {
        let entries = vec![entry(
            "p1",
            "a",
            "empty",
            StorageType::Folder,
            "",
            AccessLevel::Team,
        )];
        let contents = folder_contents(&entries, "a", &all_levels()).unwrap();
        assert!(contents.files.is_empty());
        assert_eq!(2, contents.path.len());
        assert_eq!("a", contents.path[1].file_id);
    }

    #[test]
    fn missing_folder_is_not_found() {
        let entries = vec![entry(
            "p1",
            "a",
            "folder",
            StorageType::Folder,
            "",
            AccessLevel::Team,
        )];
        assert_eq!(
            Err(TreeError::NotFound),
            folder_contents(&entries, "nope", &all_levels())
        );
    }

    #[test]
    fn folder_hidden_from_caller_is_not_found() {
        let entries = vec![entry(
            "p1",
            "a",
            "internal",
            StorageType::Folder,
            "",
            AccessLevel::Team,
        )];
        let levels = HashSet::from([AccessLevel::Public]);
        assert_eq!(Err(TreeError::NotFound), folder_contents(&entries, "a", &levels));
    }

    #[test]
    fn builds_breadcrumbs_from_root_to_target() {
        let entries = vec![
            entry("p1", "a", "unit 1", StorageType::Folder, "", AccessLevel::Team),
            entry("p1", "b", "lesson 1", StorageType::Folder, "a", AccessLevel::Team),
            entry("p1", "c", "worksheets", StorageType::Folder, "b", AccessLevel::Team),
        ];
        let contents = folder_contents(&entries, "c", &all_levels()).unwrap();
        let ids: Vec<&str> = contents.path.iter().map(|p| p.file_id.as_str()).collect();
        assert_eq!(vec!["", "a", "b", "c"], ids);
        assert_eq!("worksheets", contents.path[3].name);
    }

    #[test]
    fn does_not_mutate_the_input_set() {
        let entries = vec![
            entry("p1", "a", "folder", StorageType::Folder, "", AccessLevel::Team),
            entry("p1", "b", "file.txt", StorageType::File, "a", AccessLevel::Team),
        ];
        let before = entries.clone();
        folder_contents(&entries, "a", &all_levels()).unwrap();
        assert_eq!(before, entries);
    }
}
