mod model;

pub use model::TwoStateModel;

use ndarray::prelude::*;
use num_complex::Complex64;

/// Read-only access to a multi-trajectory Hamiltonian container. The container owns
/// the diabatic matrix, its derivatives along every nuclear degree of freedom and one
/// child Hamiltonian per trajectory (ring polymer bead).
pub trait DiabaticHamiltonian: Sized {
    /// The diabatic Hamiltonian matrix, `None` if it is not allocated.
    fn ham_dia(&self) -> Option<ArrayView2<Complex64>>;

    /// Number of diabatic electronic states.
    fn n_diabatic(&self) -> usize;

    /// Derivatives of the diabatic Hamiltonian, one matrix per DOF.
    fn d1_ham_dia(&self) -> &[Array2<Complex64>];

    /// Per-trajectory sub-Hamiltonians.
    fn children(&self) -> &[Self];

    fn is_diabatic_allocated(&self) -> bool {
        self.ham_dia().is_some()
    }
}

/// Owned Hamiltonian container for `ndia` diabatic states.
#[derive(Debug, Clone)]
pub struct NHamiltonian {
    ndia: usize,
    ham_dia: Option<Array2<Complex64>>,
    d1_ham_dia: Vec<Array2<Complex64>>,
    children: Vec<NHamiltonian>,
}

impl NHamiltonian {
    /// Creates an empty container, the diabatic matrix is not allocated yet.
    pub fn new(ndia: usize) -> Self {
        NHamiltonian {
            ndia,
            ham_dia: None,
            d1_ham_dia: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Creates a container from a diabatic matrix and its derivatives.
    pub fn from_diabatic(ham_dia: Array2<Complex64>, d1_ham_dia: Vec<Array2<Complex64>>) -> Self {
        let mut ham: NHamiltonian = NHamiltonian::new(ham_dia.nrows());
        ham.set_ham_dia(ham_dia);
        ham.set_d1_ham_dia(d1_ham_dia);
        ham
    }

    /// Allocates a zero diabatic matrix of dimension ndia x ndia.
    pub fn init_ham_dia(&mut self) {
        self.ham_dia = Some(Array2::zeros([self.ndia, self.ndia]));
    }

    pub fn set_ham_dia(&mut self, ham_dia: Array2<Complex64>) {
        assert_eq!(
            ham_dia.dim(),
            (self.ndia, self.ndia),
            "The diabatic Hamiltonian has to be a {0}x{0} matrix",
            self.ndia
        );
        self.ham_dia = Some(ham_dia);
    }

    pub fn set_d1_ham_dia(&mut self, d1_ham_dia: Vec<Array2<Complex64>>) {
        for d1 in d1_ham_dia.iter() {
            assert_eq!(
                d1.dim(),
                (self.ndia, self.ndia),
                "Each derivative of the diabatic Hamiltonian has to be a {0}x{0} matrix",
                self.ndia
            );
        }
        self.d1_ham_dia = d1_ham_dia;
    }

    pub fn add_child(&mut self, child: NHamiltonian) {
        self.children.push(child);
    }

    pub fn with_children(mut self, children: Vec<NHamiltonian>) -> Self {
        self.children = children;
        self
    }
}

impl DiabaticHamiltonian for NHamiltonian {
    fn ham_dia(&self) -> Option<ArrayView2<Complex64>> {
        self.ham_dia.as_ref().map(|h| h.view())
    }

    fn n_diabatic(&self) -> usize {
        self.ndia
    }

    fn d1_ham_dia(&self) -> &[Array2<Complex64>] {
        &self.d1_ham_dia
    }

    fn children(&self) -> &[Self] {
        &self.children
    }
}
