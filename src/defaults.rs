// config file
pub const CONFIG_FILE_NAME: &str = "kcrpmd.toml";
// temperature in Kelvin
pub const TEMPERATURE: f64 = 300.0;
// print level
pub const VERBOSE: i8 = 0;

// KC-RPMD METHOD PARAMETERS
// geometric factor that conserves the free energy of kinked pair formation
pub const ETA: f64 = 2.0 * std::f64::consts::PI;
// ad-hoc kinetic constraint parameter
pub const CONSTRAINT_A: f64 = 0.1;
// steepness of the heaviside functions of the auxiliary coordinate
pub const HEAVISIDE_B: f64 = 1000.0;
// switching parameter of the kinetic constraint
pub const SWITCHING_C: f64 = 10.0;
// switching parameter of the free energy conservation
pub const SWITCHING_D: f64 = 3.0;

// REGIME SELECTION OF THE KINKED PAIR FREE ENERGY
// above this value of beta*|K| the adiabatic expression is used
pub const ADIABATIC_THRESHOLD: f64 = 1.0e-3;
// above this value of beta*|V0-V1| (and below the threshold above) the
// small coupling expansion is used, otherwise the degenerate limit
pub const DEGENERACY_THRESHOLD: f64 = 1.0e-7;
