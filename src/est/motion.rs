use crate::est::state::RealVectorState;
use num_traits::Float;
use serde::{Deserialize, Serialize};

/// A single accepted state in one of the two trees.
///
/// `parent` and `root` are indices into the owning tree's arena; a root
/// motion has no parent and is its own root. `root` lets the planner check
/// start/goal pairings without walking the parent chain.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Motion<F: Float, const N: usize> {
    state: RealVectorState<F, N>,
    parent: Option<usize>,
    root: usize,
    pdf_elem: Option<usize>,
}

impl<F: Float, const N: usize> Motion<F, N> {
    pub(crate) fn new(state: RealVectorState<F, N>, parent: Option<usize>, root: usize) -> Self {
        Self {
            state,
            parent,
            root,
            pdf_elem: None,
        }
    }

    pub fn state(&self) -> &RealVectorState<F, N> {
        &self.state
    }

    pub fn parent(&self) -> Option<usize> {
        self.parent
    }

    pub fn root(&self) -> usize {
        self.root
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub(crate) fn pdf_elem(&self) -> Option<usize> {
        self.pdf_elem
    }

    pub(crate) fn set_pdf_elem(&mut self, elem: usize) {
        self.pdf_elem = Some(elem);
    }
}
