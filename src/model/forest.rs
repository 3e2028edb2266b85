// Tree-ensemble classifier module
// The trained model artifact: flat node arrays, majority-vote prediction

use serde::Deserialize;

/// One node of a decision tree, stored in a flat array.
///
/// Splits descend left when `x[feature] <= threshold`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        class: usize,
    },
}

/// A single decision tree. Node 0 is the root.
#[derive(Debug, Clone, Deserialize)]
pub struct Tree {
    pub nodes: Vec<Node>,
}

impl Tree {
    /// Walk the tree for one sample and return the leaf class.
    ///
    /// Node indices were validated at load time, so an out-of-range index
    /// cannot occur on the request path; it is still handled as `None`
    /// rather than indexed blindly.
    pub fn predict(&self, sample: &[f64]) -> Option<usize> {
        let mut idx = 0;
        // A well-formed tree terminates in at most nodes.len() steps
        for _ in 0..=self.nodes.len() {
            match self.nodes.get(idx)? {
                Node::Leaf { class } => return Some(*class),
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    let x = sample.get(*feature)?;
                    idx = if *x <= *threshold { *left } else { *right };
                }
            }
        }
        None
    }

    /// Structural validation: child and feature indices in range.
    fn validate(&self, n_features: usize, n_classes: usize) -> bool {
        !self.nodes.is_empty()
            && self.nodes.iter().all(|node| match node {
                Node::Leaf { class } => *class < n_classes,
                Node::Split {
                    feature,
                    left,
                    right,
                    threshold,
                } => {
                    *feature < n_features
                        && *left < self.nodes.len()
                        && *right < self.nodes.len()
                        && threshold.is_finite()
                }
            })
    }
}

/// The trained classifier: a forest voting by majority.
#[derive(Debug, Clone, Deserialize)]
pub struct Forest {
    /// Class labels, indexed by the leaf class index.
    pub classes: Vec<u32>,
    pub trees: Vec<Tree>,
}

impl Forest {
    /// Predict the class label for one sample.
    ///
    /// Each tree votes; the label with the most votes wins, ties breaking
    /// toward the lowest class index.
    pub fn predict(&self, sample: &[f64]) -> Option<u32> {
        let mut votes = vec![0_usize; self.classes.len()];
        for tree in &self.trees {
            let class = tree.predict(sample)?;
            *votes.get_mut(class)? += 1;
        }
        let winner = votes
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.cmp(b.1).then(b.0.cmp(&a.0)))?
            .0;
        self.classes.get(winner).copied()
    }

    /// Structural validation, called once at load time.
    pub fn is_valid(&self, n_features: usize) -> bool {
        !self.classes.is_empty()
            && !self.trees.is_empty()
            && self
                .trees
                .iter()
                .all(|t| t.validate(n_features, self.classes.len()))
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }
}
