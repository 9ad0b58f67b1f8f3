//! Bone registry: name and identifier index over the joints of a scene.

use regex::Regex;
use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;
use uuid::Uuid;

use crate::errors::{Result, RigError};
use crate::rig::matcher::{BoneMatcher, SubstringMatcher};
use crate::scene::{NodeHandle, Scene};

/// One registry slot: lookup key plus the joint it currently points at.
#[derive(Debug, Clone)]
struct RegistryEntry {
    key: String,
    bone: NodeHandle,
    /// Lower-cased display name of `bone`, for name-side pattern matching.
    name: String,
    /// `key` is the joint identifier rather than its name.
    by_id: bool,
}

impl RegistryEntry {
    /// Key text visible to pattern searches; identifier keys are never searched.
    fn searchable_key(&self) -> &str {
        if self.by_id { "" } else { &self.key }
    }
}

/// Which part of the scene a registry indexes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IndexRoot {
    Node(NodeHandle),
    AllRoots,
}

/// Index of every skeletal joint under a scene root.
///
/// Each bone gets two keys: its lower-cased name (when non-empty) and its
/// identifier. Entries keep traversal order, so [`find_by_patterns`] is
/// deterministic for a fixed scene graph.
///
/// The registry stores handles, not references. Structural scene edits
/// (bones added, removed or renamed) make it stale until [`rebuild`] is
/// called; removed bones then simply fail to resolve.
///
/// [`find_by_patterns`]: BoneRegistry::find_by_patterns
/// [`rebuild`]: BoneRegistry::rebuild
#[derive(Debug)]
pub struct BoneRegistry {
    root: IndexRoot,
    entries: Vec<RegistryEntry>,
    index: FxHashMap<String, usize>,
    matcher: Box<dyn BoneMatcher>,
}

impl BoneRegistry {
    /// Indexes the bones under `root` (inclusive).
    #[must_use]
    pub fn new(scene: &Scene, root: NodeHandle) -> Self {
        Self::build(scene, IndexRoot::Node(root), Box::new(SubstringMatcher))
    }

    /// Indexes the bones under every root of `scene`.
    #[must_use]
    pub fn from_scene(scene: &Scene) -> Self {
        Self::build(scene, IndexRoot::AllRoots, Box::new(SubstringMatcher))
    }

    /// Replaces the pattern-matching strategy.
    #[must_use]
    pub fn with_matcher(mut self, matcher: impl BoneMatcher + 'static) -> Self {
        self.matcher = Box::new(matcher);
        self
    }

    pub fn set_matcher(&mut self, matcher: Box<dyn BoneMatcher>) {
        self.matcher = matcher;
    }

    fn build(scene: &Scene, root: IndexRoot, matcher: Box<dyn BoneMatcher>) -> Self {
        let mut registry = Self {
            root,
            entries: Vec::new(),
            index: FxHashMap::default(),
            matcher,
        };
        registry.populate(scene);
        registry
    }

    fn populate(&mut self, scene: &Scene) {
        let order = match self.root {
            IndexRoot::Node(root) => scene.traverse(root),
            IndexRoot::AllRoots => scene.traverse_all(),
        };

        for handle in order {
            let node = &scene.nodes[handle];
            if !node.is_bone() {
                continue;
            }
            let name = node.name.to_lowercase();
            if !name.is_empty() {
                self.insert(name.clone(), handle, &name, false);
            }
            self.insert(node.id().to_string(), handle, &name, true);
        }

        log::debug!(
            "BoneRegistry indexed {} bones ({} keys)",
            self.all_joints().len(),
            self.entries.len()
        );
    }

    /// Map-style insert: an existing key keeps its slot, its value is replaced.
    fn insert(&mut self, key: String, bone: NodeHandle, name: &str, by_id: bool) {
        if let Some(&slot) = self.index.get(&key) {
            log::trace!("Bone key '{key}' reassigned to a later joint");
            let entry = &mut self.entries[slot];
            entry.bone = bone;
            entry.name = name.to_string();
            return;
        }
        self.index.insert(key.clone(), self.entries.len());
        self.entries.push(RegistryEntry {
            key,
            bone,
            name: name.to_string(),
            by_id,
        });
    }

    /// Clears the index and repopulates it from the current scene state.
    pub fn rebuild(&mut self, scene: &Scene) {
        self.entries.clear();
        self.index.clear();
        self.populate(scene);
    }

    // ========================================================================
    // Lookups
    // ========================================================================

    /// Case-insensitive exact name lookup.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<NodeHandle> {
        let key = name.to_lowercase();
        self.index.get(&key).map(|&slot| self.entries[slot].bone)
    }

    /// Identifier lookup.
    #[must_use]
    pub fn find_by_id(&self, id: Uuid) -> Option<NodeHandle> {
        self.index
            .get(&id.to_string())
            .map(|&slot| self.entries[slot].bone)
    }

    /// Returns the first joint whose key or display name contains any
    /// candidate (case-insensitive, candidates trimmed).
    ///
    /// Entries are scanned in traversal order and each entry is tested
    /// against all candidates, so an earlier joint matching a loose candidate
    /// wins over a later joint matching a more specific one. Blank candidates
    /// are ignored. Identifier keys are not searched; an unnamed joint is
    /// only reachable through [`find_by_id`](Self::find_by_id).
    #[must_use]
    pub fn find_by_patterns<S: AsRef<str>>(&self, candidates: &[S]) -> Option<NodeHandle> {
        let candidates: SmallVec<[String; 4]> = candidates
            .iter()
            .map(|c| c.as_ref().trim().to_lowercase())
            .filter(|c| !c.is_empty())
            .collect();
        if candidates.is_empty() {
            return None;
        }

        self.entries
            .iter()
            .find(|e| self.matcher.matches(e.searchable_key(), &e.name, &candidates))
            .map(|e| e.bone)
    }

    /// Every joint with a name key matched by `pattern`, deduplicated, in
    /// first-seen order.
    #[must_use]
    pub fn find_all(&self, pattern: &Regex) -> Vec<NodeHandle> {
        let mut seen = FxHashSet::default();
        self.entries
            .iter()
            .filter(|e| !e.by_id && pattern.is_match(&e.key))
            .filter_map(|e| seen.insert(e.bone).then_some(e.bone))
            .collect()
    }

    /// [`find_all`](Self::find_all) with a pattern compiled from a string.
    pub fn find_all_matching(&self, pattern: &str) -> Result<Vec<NodeHandle>> {
        let regex = Regex::new(pattern).map_err(|source| RigError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(self.find_all(&regex))
    }

    /// Every distinct indexed joint, in first-seen order.
    #[must_use]
    pub fn all_joints(&self) -> Vec<NodeHandle> {
        let mut seen = FxHashSet::default();
        self.entries
            .iter()
            .filter_map(|e| seen.insert(e.bone).then_some(e.bone))
            .collect()
    }

    /// Number of lookup keys (two per named bone).
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registry keys in iteration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.key.as_str())
    }
}
