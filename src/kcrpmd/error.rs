use std::error;
use std::fmt;

/// Configuration errors of the KC-RPMD routines. None of them is retryable: the
/// Hamiltonian container or the input does not match what the method supports.
#[derive(Debug, Clone, PartialEq)]
pub enum KcrpmdError {
    /// The diabatic Hamiltonian matrix of the container is not allocated.
    DiabaticNotAllocated { operation: &'static str },
    /// The implementation only covers two diabatic states.
    StateCount { operation: &'static str, n_diabatic: usize },
    /// The number of trajectories in the input differs from the number of children.
    ChildCountMismatch {
        operation: &'static str,
        n_children: usize,
        n_traj: usize,
    },
    /// Several ring polymer beads (quantum nuclei) are not implemented.
    QuantumNuclei { operation: &'static str },
    /// The auxiliary electronic coordinate has to be one dimensional.
    AuxiliaryDimension { operation: &'static str, len: usize },
    /// The number of diabatic derivative matrices differs from the number of DOFs.
    DerivativeCount {
        operation: &'static str,
        n_derivatives: usize,
        n_dof: usize,
    },
}

impl KcrpmdError {
    /// Name of the routine that raised the error.
    pub fn operation(&self) -> &'static str {
        match self {
            KcrpmdError::DiabaticNotAllocated { operation }
            | KcrpmdError::StateCount { operation, .. }
            | KcrpmdError::ChildCountMismatch { operation, .. }
            | KcrpmdError::QuantumNuclei { operation }
            | KcrpmdError::AuxiliaryDimension { operation, .. }
            | KcrpmdError::DerivativeCount { operation, .. } => operation,
        }
    }

    /// True for features that are not implemented yet, false for a misconfigured input.
    pub fn is_unimplemented(&self) -> bool {
        matches!(self, KcrpmdError::QuantumNuclei { .. })
    }
}

impl fmt::Display for KcrpmdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KcrpmdError::DiabaticNotAllocated { operation } => write!(
                f,
                "Error in {}(): the diabatic Hamiltonian matrix is not allocated \
                 but it is needed for the calculations",
                operation
            ),
            KcrpmdError::StateCount {
                operation,
                n_diabatic,
            } => write!(
                f,
                "Error in {}(): implementation only for ndia=2, but ndia={}",
                operation, n_diabatic
            ),
            KcrpmdError::ChildCountMismatch {
                operation,
                n_children,
                n_traj,
            } => write!(
                f,
                "Error in {}(): the number of trajectories ({}) is different from \
                 the number of children ({})",
                operation, n_traj, n_children
            ),
            KcrpmdError::QuantumNuclei { operation } => write!(
                f,
                "Error in {}(): not implemented for quantum nuclei",
                operation
            ),
            KcrpmdError::AuxiliaryDimension { operation, len } => write!(
                f,
                "Error in {}(): the auxiliary coordinate must have exactly one \
                 component, but it has {}",
                operation, len
            ),
            KcrpmdError::DerivativeCount {
                operation,
                n_derivatives,
                n_dof,
            } => write!(
                f,
                "Error in {}(): {} derivative matrices of the diabatic Hamiltonian \
                 are available for {} degrees of freedom",
                operation, n_derivatives, n_dof
            ),
        }
    }
}

impl error::Error for KcrpmdError {}
