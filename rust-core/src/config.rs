// Constants

// Tolerances
pub const LATTICE_TOLERANCE: f64 = 1e-10; // Degenerate lattice / singular cell detection
pub const SUPERCELL_TOLERANCE: f64 = 1e-8; // Inclusion test for images inside a supercell
pub const WRAP_EPS: f64 = 1e-7; // Wrapped fractional coordinates land in [-eps, 1 - eps)

// Coincidence search (superlattice pre-filter)
pub const DEFAULT_MAX_LENGTH_TOL: f64 = 0.03; // Relative length mismatch of superlattice vectors
pub const DEFAULT_MAX_ANGLE_TOL: f64 = 0.01; // Relative mismatch of the inter-vector angle
pub const DEFAULT_MAX_AREA_RATIO_TOL: f64 = 0.09; // Area ratio vs. multiplicity ratio

// Generator defaults
pub const DEFAULT_GAP: f64 = 3.0; // Å
pub const DEFAULT_MAX_MISFIT: f64 = 5e-3; // dimensionless
pub const DEFAULT_MAX_AREA: f64 = 400.0; // Å²
pub const DEFAULT_VACUUM_SIZE: f64 = 10.0; // Å

// Axis along which layers are stacked
pub const STACKING_AXIS: usize = 2;
