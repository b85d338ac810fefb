//! In-memory stage holding the prim hierarchy

use crate::prim::Prim;
use sparkle_core::{PrimPath, Result, SparkleError};
use std::collections::HashMap;

#[derive(Debug, Clone)]
struct StageNode {
    prim: Prim,
    children: Vec<usize>,
}

/// A loaded scene layer. Prims are kept in document order and linked into a
/// hierarchy by path.
#[derive(Debug, Clone, Default)]
pub struct Stage {
    name: Option<String>,
    nodes: Vec<StageNode>,
    index: HashMap<PrimPath, usize>,
    roots: Vec<usize>,
}

impl Stage {
    /// Create an empty stage
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Add a prim. Its parent must already be on the stage.
    pub fn define_prim(&mut self, prim: Prim) -> Result<()> {
        let path = prim.path().clone();
        if self.index.contains_key(&path) {
            return Err(SparkleError::DuplicatePrim(path.to_string()));
        }

        let parent = match path.parent() {
            Some(parent_path) => Some(
                *self
                    .index
                    .get(&parent_path)
                    .ok_or_else(|| SparkleError::MissingParent(path.to_string()))?,
            ),
            None => None,
        };

        let id = self.nodes.len();
        self.nodes.push(StageNode {
            prim,
            children: Vec::new(),
        });
        self.index.insert(path, id);

        match parent {
            Some(parent_id) => self.nodes[parent_id].children.push(id),
            None => self.roots.push(id),
        }

        Ok(())
    }

    pub fn get_prim(&self, path: &str) -> Option<&Prim> {
        let path = PrimPath::parse(path).ok()?;
        self.index.get(&path).map(|&id| &self.nodes[id].prim)
    }

    pub fn contains(&self, path: &PrimPath) -> bool {
        self.index.contains_key(path)
    }

    /// Direct children of a prim, in document order
    pub fn children(&self, path: &PrimPath) -> Vec<&Prim> {
        self.index
            .get(path)
            .map(|&id| {
                self.nodes[id]
                    .children
                    .iter()
                    .map(|&child| &self.nodes[child].prim)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Every prim on the stage in document order, without filtering
    pub fn all_prims(&self) -> impl Iterator<Item = &Prim> {
        self.nodes.iter().map(|n| &n.prim)
    }

    pub fn prim_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Depth-first walk over active, defined, non-abstract prims.
    ///
    /// A prim that fails the predicate is skipped along with its subtree.
    pub fn traverse(&self) -> Traverse<'_> {
        Traverse {
            stage: self,
            stack: self.roots.iter().rev().copied().collect(),
        }
    }
}

/// Lazy pre-order iterator returned by [`Stage::traverse`]
pub struct Traverse<'a> {
    stage: &'a Stage,
    stack: Vec<usize>,
}

impl<'a> Iterator for Traverse<'a> {
    type Item = &'a Prim;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(id) = self.stack.pop() {
            let node = &self.stage.nodes[id];
            let prim = &node.prim;
            if !prim.is_active() || !prim.is_defined() || prim.is_abstract() {
                continue;
            }
            self.stack.extend(node.children.iter().rev().copied());
            return Some(prim);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prim::Specifier;

    fn prim(s: &str) -> Prim {
        Prim::new(PrimPath::parse(s).unwrap())
    }

    fn sample_stage() -> Stage {
        let mut stage = Stage::new();
        stage.define_prim(prim("/World")).unwrap();
        stage.define_prim(prim("/World/A")).unwrap();
        stage.define_prim(prim("/World/A/A1")).unwrap();
        stage.define_prim(prim("/World/B")).unwrap();
        stage.define_prim(prim("/Other")).unwrap();
        stage
    }

    fn traversed(stage: &Stage) -> Vec<String> {
        stage.traverse().map(|p| p.path().to_string()).collect()
    }

    #[test]
    fn test_traverse_depth_first_document_order() {
        let stage = sample_stage();
        assert_eq!(
            traversed(&stage),
            vec!["/World", "/World/A", "/World/A/A1", "/World/B", "/Other"]
        );
    }

    #[test]
    fn test_children_added_later_keep_depth_first_order() {
        let mut stage = sample_stage();
        stage.define_prim(prim("/World/A/A2")).unwrap();
        assert_eq!(
            traversed(&stage),
            vec!["/World", "/World/A", "/World/A/A1", "/World/A/A2", "/World/B", "/Other"]
        );
    }

    #[test]
    fn test_traverse_prunes_abstract_subtree() {
        let mut stage = Stage::new();
        stage
            .define_prim(prim("/_Base").with_specifier(Specifier::Class))
            .unwrap();
        stage.define_prim(prim("/_Base/Child")).unwrap();
        stage.define_prim(prim("/World")).unwrap();

        assert_eq!(traversed(&stage), vec!["/World"]);
        assert_eq!(stage.all_prims().count(), 3);
    }

    #[test]
    fn test_traverse_skips_inactive_and_over() {
        let mut stage = Stage::new();
        stage.define_prim(prim("/World")).unwrap();
        stage
            .define_prim(prim("/World/Off").with_active(false))
            .unwrap();
        stage.define_prim(prim("/World/Off/Inner")).unwrap();
        stage
            .define_prim(prim("/World/Tweak").with_specifier(Specifier::Over))
            .unwrap();
        stage.define_prim(prim("/World/On")).unwrap();

        assert_eq!(traversed(&stage), vec!["/World", "/World/On"]);
    }

    #[test]
    fn test_duplicate_prim_rejected() {
        let mut stage = sample_stage();
        let err = stage.define_prim(prim("/World/A")).unwrap_err();
        assert!(matches!(err, SparkleError::DuplicatePrim(_)));
    }

    #[test]
    fn test_missing_parent_rejected() {
        let mut stage = Stage::new();
        let err = stage.define_prim(prim("/World/Orphan")).unwrap_err();
        assert!(matches!(err, SparkleError::MissingParent(_)));
    }

    #[test]
    fn test_lookup_and_children() {
        let stage = sample_stage();
        assert!(stage.get_prim("/World/A/A1").is_some());
        assert!(stage.get_prim("/World/C").is_none());
        assert!(stage.get_prim("not a path").is_none());

        let world = PrimPath::parse("/World").unwrap();
        let names: Vec<&str> = stage.children(&world).iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["A", "B"]);
        assert_eq!(stage.prim_count(), 5);
    }

    #[test]
    fn test_empty_stage() {
        let stage = Stage::new();
        assert!(stage.is_empty());
        assert_eq!(stage.traverse().count(), 0);
    }
}
