use tidefile_core::{DisplayId, FileMeta, NodeId, PathTree, TreeError, path};

fn meta(size: u64) -> FileMeta {
    FileMeta {
        size,
        available: true,
        upload_progress: Some(100),
        expiration_height: 50_000,
        renewing: true,
    }
}

/// Build a small tree with nested folders and files on both levels.
fn build_tree() -> PathTree {
    let mut tree = PathTree::new();
    let a = tree.add_folder(tree.root(), "a").unwrap();
    let b = tree.add_folder(a, "b").unwrap();
    tree.add_file(b, "c.txt", meta(10)).unwrap();
    tree.add_file(a, "d.txt", meta(20)).unwrap();
    tree.add_file(tree.root(), "top.txt", meta(30)).unwrap();
    tree
}

/// Every non-root node's path equals its parent's path joined with its
/// name, and every parent chain terminates at the root with strictly
/// decreasing depth.
fn assert_well_formed(tree: &PathTree) {
    let ids: Vec<NodeId> = tree.flatten(tree.root()).collect();
    for id in ids {
        let node = tree.get(id).expect("flattened id must resolve");
        let parent_id = node.parent().expect("non-root must have a parent");
        let parent = tree.get(parent_id).expect("parent must be in the tree");
        assert_eq!(node.path, path::join(&parent.path, &node.name));
        assert_eq!(parent.child(&node.name), Some(id));

        // Walk to the root, checking termination and depth decrease.
        let mut depth = node.depth();
        let mut cur = node.parent();
        let mut hops = 0;
        while let Some(p) = cur {
            let pnode = tree.get(p).expect("ancestor must be in the tree");
            assert!(pnode.depth() < depth, "depth must strictly decrease");
            depth = pnode.depth();
            cur = pnode.parent();
            hops += 1;
            assert!(hops <= tree.len(), "parent chain must terminate");
        }
    }
}

#[test]
fn tree_is_well_formed_after_mutations() {
    let mut tree = build_tree();
    assert_well_formed(&tree);

    let a = tree.resolve("a").unwrap();
    tree.rename(a, "archive").unwrap();
    assert_well_formed(&tree);

    let b = tree.resolve("archive/b").unwrap();
    tree.remove(b).unwrap();
    assert_well_formed(&tree);
}

#[test]
fn resolve_round_trips_every_node() {
    let tree = build_tree();
    for id in tree.flatten(tree.root()) {
        let node = tree.get(id).unwrap();
        assert_eq!(tree.resolve(&node.path), Some(id));
    }
}

#[test]
fn display_id_matches_resolved_path() {
    let tree = build_tree();
    let id = tree.resolve("a/b/c.txt").unwrap();
    let node = tree.get(id).unwrap();
    assert_eq!(node.display_id(), DisplayId::for_path("a/b/c.txt"));
    assert_ne!(node.display_id(), DisplayId::for_path("a/d.txt"));
}

#[test]
fn removal_is_precondition_checked() {
    let mut tree = build_tree();
    let before = tree.len();
    assert_eq!(tree.remove(tree.root()), Err(TreeError::NotFound));
    assert_eq!(tree.len(), before);
}

#[test]
fn flatten_is_restartable() {
    let tree = build_tree();
    let first: Vec<NodeId> = tree.flatten(tree.root()).collect();
    let second: Vec<NodeId> = tree.flatten(tree.root()).collect();
    assert_eq!(first, second);
    assert_eq!(first.len(), tree.len() - 1);
}
