mod imprint;
pub(crate) mod settings;

pub use imprint::{print_parameters, write_header};
pub use settings::Configuration;
