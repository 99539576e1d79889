//! Effective potential energy and forces of kinetically constrained ring polymer
//! molecular dynamics (KC-RPMD) for two-state systems.
pub mod constants;
pub mod defaults;
pub mod hamiltonian;
pub mod io;
pub mod kcrpmd;
pub mod ring_polymer;
pub mod utils;

pub use hamiltonian::{DiabaticHamiltonian, NHamiltonian, TwoStateModel};
pub use io::Configuration;
pub use kcrpmd::{Kcrpmd, KcrpmdError, KcrpmdParameters};
