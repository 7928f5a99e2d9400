//! Binary Merkle trees hashed with Pedersen compression, and the
//! membership gadget.
use crate::errors::{PlonkError, Result};
use crate::plonk::constraint_system::{pedersen::PedersenGens, TurboCS, VarIndex};
use quill_algebra::{bn254::BN254Scalar, prelude::*};

type F = BN254Scalar;

/// An authentication path, from the leaf level up.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MerklePath {
    /// The sibling of the current node on every level.
    pub siblings: Vec<F>,
    /// Whether the current node is the right child on every level.
    pub is_right_child: Vec<bool>,
}

/// A fixed-depth binary Merkle tree; empty leaves hold zero.
pub struct MerkleTree {
    depth: usize,
    num_leaves: usize,
    /// `layers[0]` holds the leaves and `layers[depth]` the root.
    layers: Vec<Vec<F>>,
}

impl MerkleTree {
    /// Create an empty tree with `2^depth` leaves.
    pub fn new(gens: &PedersenGens, depth: usize) -> MerkleTree {
        let mut layers = vec![vec![F::zero(); 1 << depth]];
        for level in 0..depth {
            let next = layers[level]
                .chunks(2)
                .map(|pair| gens.compress(&pair[0], &pair[1]))
                .collect();
            layers.push(next);
        }
        MerkleTree {
            depth,
            num_leaves: 0,
            layers,
        }
    }

    /// Return the depth.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Return the root.
    pub fn root(&self) -> F {
        self.layers[self.depth][0]
    }

    /// Append a leaf and return its index.
    pub fn add_leaf(&mut self, gens: &PedersenGens, value: F) -> Result<usize> {
        let index = self.num_leaves;
        if index >= self.layers[0].len() {
            return Err(PlonkError::Message("the Merkle tree is full".to_string()));
        }
        self.layers[0][index] = value;
        let mut pos = index;
        for level in 0..self.depth {
            let left = pos & !1;
            let parent = gens.compress(&self.layers[level][left], &self.layers[level][left + 1]);
            pos >>= 1;
            self.layers[level + 1][pos] = parent;
        }
        self.num_leaves += 1;
        Ok(index)
    }

    /// Return the authentication path of a leaf.
    pub fn path(&self, index: usize) -> Result<MerklePath> {
        if index >= self.layers[0].len() {
            return Err(PlonkError::Message(format!(
                "leaf index {} out of bound",
                index
            )));
        }
        let mut siblings = Vec::with_capacity(self.depth);
        let mut is_right_child = Vec::with_capacity(self.depth);
        let mut pos = index;
        for level in 0..self.depth {
            siblings.push(self.layers[level][pos ^ 1]);
            is_right_child.push(pos & 1 == 1);
            pos >>= 1;
        }
        Ok(MerklePath {
            siblings,
            is_right_child,
        })
    }

    /// Whether `value` is the leaf at `index`, checked through its path.
    pub fn check_membership(&self, gens: &PedersenGens, value: &F, index: usize) -> bool {
        match self.path(index) {
            Ok(path) => compute_root(gens, value, &path) == self.root(),
            Err(_) => false,
        }
    }
}

/// Hash a leaf up its authentication path.
pub fn compute_root(gens: &PedersenGens, leaf: &F, path: &MerklePath) -> F {
    let mut node = *leaf;
    for (sibling, is_right) in path.siblings.iter().zip(path.is_right_child.iter()) {
        node = if *is_right {
            gens.compress(sibling, &node)
        } else {
            gens.compress(&node, sibling)
        };
    }
    node
}

/// cs variables for a Merkle node
pub struct MerkleNodeVars {
    /// the sibling of the current node.
    pub sibling: VarIndex,
    /// 1 if the current node is the right child.
    pub is_right_child: VarIndex,
}

/// cs variables for a Merkle authentication path
pub struct MerklePathVars {
    /// the nodes from the leaf level up.
    pub nodes: Vec<MerkleNodeVars>,
}

impl TurboCS<F> {
    /// Add the variables of an authentication path, boolean constraining the positions.
    pub fn add_merkle_path_variables(&mut self, path: &MerklePath) -> MerklePathVars {
        let nodes: Vec<MerkleNodeVars> = path
            .siblings
            .iter()
            .zip(path.is_right_child.iter())
            .map(|(sibling, is_right)| MerkleNodeVars {
                sibling: self.new_variable(*sibling),
                is_right_child: self.new_variable(F::from(*is_right as u32)),
            })
            .collect();
        for node in nodes.iter() {
            self.insert_boolean_gate(node.is_right_child);
        }
        MerklePathVars { nodes }
    }

    /// Return a variable holding the root computed from a leaf and its path.
    pub fn compute_merkle_root(
        &mut self,
        gens: &PedersenGens,
        leaf_var: VarIndex,
        path_vars: &MerklePathVars,
    ) -> VarIndex {
        let mut node_var = leaf_var;
        for node in path_vars.nodes.iter() {
            // (left, right) = (node, sibling), swapped when the node is the right child
            let left = self.select(node_var, node.sibling, node.is_right_child);
            let right = self.select(node.sibling, node_var, node.is_right_child);
            node_var = self.pedersen_compress(gens, left, right);
        }
        node_var
    }

    /// Return a boolean variable that equals 1 iff the leaf and path lead to `root_var`.
    pub fn check_merkle_membership(
        &mut self,
        gens: &PedersenGens,
        leaf_var: VarIndex,
        path_vars: &MerklePathVars,
        root_var: VarIndex,
    ) -> VarIndex {
        let computed_root = self.compute_merkle_root(gens, leaf_var, path_vars);
        self.is_equal(computed_root, root_var)
    }
}

#[cfg(test)]
mod test {
    use super::MerkleTree;
    use crate::plonk::constraint_system::{pedersen::PedersenGens, TurboCS};
    use quill_algebra::{bn254::BN254Scalar, prelude::*};

    type F = BN254Scalar;

    #[test]
    fn test_native_tree() {
        let gens = PedersenGens::new();
        let mut tree = MerkleTree::new(&gens, 2);
        let empty_root = tree.root();
        for i in 0..4u32 {
            assert_eq!(tree.add_leaf(&gens, F::from(i + 10)).unwrap(), i as usize);
        }
        assert_ne!(tree.root(), empty_root);
        assert!(tree.add_leaf(&gens, F::one()).is_err());

        let expected = gens.compress(
            &gens.compress(&F::from(10u32), &F::from(11u32)),
            &gens.compress(&F::from(12u32), &F::from(13u32)),
        );
        assert_eq!(tree.root(), expected);
        assert!(tree.check_membership(&gens, &F::from(12u32), 2));
        assert!(!tree.check_membership(&gens, &F::from(12u32), 3));
        assert!(!tree.check_membership(&gens, &F::from(12u32), 4));
    }

    #[test]
    fn test_membership_gadget() {
        let gens = PedersenGens::new();
        let mut tree = MerkleTree::new(&gens, 1);
        tree.add_leaf(&gens, F::from(7u32)).unwrap();
        tree.add_leaf(&gens, F::from(8u32)).unwrap();

        for (value, index, expected) in [(7u32, 0usize, true), (8, 1, true), (8, 0, false)] {
            let mut cs = TurboCS::new();
            let path = tree.path(index).unwrap();
            let leaf_var = cs.new_variable(F::from(value));
            let root_var = cs.new_variable(tree.root());
            let path_vars = cs.add_merkle_path_variables(&path);
            let is_member = cs.check_merkle_membership(&gens, leaf_var, &path_vars, root_var);
            assert_eq!(cs.witness[is_member], F::from(expected as u32));

            let witness = cs.get_and_clear_witness();
            assert!(cs.verify_witness(&witness, &[]).is_ok());
        }
    }
}
