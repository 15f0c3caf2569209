/// An ordered tree used to build a [`Gaddag`](super::Gaddag) before it is
/// flattened into the node-vector representation the engine queries at
/// runtime. The flatten-after-build approach follows the `louds` crate's
/// level-order layout.
/// Naive trie implementation supporting dynamic insertion.
#[derive(Debug, Default)]
pub struct TrieVec<T> {
    children: Vec<(T, Box<TrieVec<T>>)>,
    terminal: bool,
}

impl<T> TrieVec<T> {
    pub fn new() -> TrieVec<T> {
        TrieVec {
            children: Vec::new(),
            terminal: false,
        }
    }
    pub fn children(&self) -> &Vec<(T, Box<Self>)> {
        &self.children
    }
    pub fn terminal(&self) -> bool {
        self.terminal
    }
}

impl<T: Eq + PartialOrd + Ord + Clone> TrieVec<T> {
    /// Inserts `key`'s labels along a root-to-leaf path, creating nodes as
    /// needed and keeping each node's children sorted by label so the
    /// flattening pass in `Gaddag::from` can walk them in order.
    pub fn insert<K: AsRef<[T]>>(&mut self, key: K) {
        let mut t = self;
        for c in key.as_ref() {
            let mut next_pos = t.children.len();
            let mut found = false;
            for (i, (c2, _)) in t.children.iter().enumerate() {
                if c <= c2 {
                    next_pos = i;
                    found = c == c2;
                    break;
                }
            }
            if !found {
                t.children
                    .insert(next_pos, (c.clone(), Box::new(TrieVec::new())));
            }
            t = &mut { t }.children[next_pos].1;
        }
        t.terminal = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_builds_a_sorted_child_path_per_key() {
        let mut t = TrieVec::new();
        let keys: &[&[u8]] = &[&[1, 2], &[1, 3], &[4]];
        for key in keys {
            t.insert(key);
        }

        assert_eq!(t.children().len(), 2);
        assert_eq!(t.children()[0].0, 1);
        assert_eq!(t.children()[1].0, 4);

        let under_one = &t.children()[0].1;
        assert_eq!(under_one.children().len(), 2);
        assert_eq!(under_one.children()[0].0, 2);
        assert!(under_one.children()[0].1.terminal());
        assert_eq!(under_one.children()[1].0, 3);
        assert!(under_one.children()[1].1.terminal());

        assert!(t.children()[1].1.terminal());
        assert!(!t.terminal());
    }
}
