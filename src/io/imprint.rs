use crate::io::Configuration;
use log::info;

pub fn write_header() {
    info!("{: ^80}", "-----------------");
    info!("{: ^80}", "KC-RPMD");
    info!("{: ^80}", "-----------------");
    let mut version_string: String = "version: ".to_owned();
    version_string.push_str(env!("CARGO_PKG_VERSION"));
    info!("{: ^80}", version_string);
    info!("{: ^80}", "");
}

/// Prints the temperature and the method parameters of a run.
pub fn print_parameters(config: &Configuration) {
    info!("{:-^75} ", " KC-RPMD parameters ");
    info!("{: <25} {} K", "temperature:", config.temperature);
    info!("{: <25} {:.6} 1/Hartree", "beta:", config.beta());
    info!("{: <25} {:.10}", "eta:", config.kcrpmd.eta);
    info!("{: <25} {}", "constraint a:", config.kcrpmd.a);
    info!("{: <25} {}", "heaviside b:", config.kcrpmd.b);
    info!("{: <25} {}", "switching c:", config.kcrpmd.c);
    info!("{: <25} {}", "switching d:", config.kcrpmd.d);
    info!("{: <25} {}", "log level:", config.log_level());
    info!("{:-^75} ", "");
}
