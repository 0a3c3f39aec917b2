// Definitions that are used throughout all modules

/// Per-axis periodicity flags (a, b, c)
pub type Periodicity = [bool; 3];

/// Periodicity of every layered structure: periodic in-plane, open along the stacking axis.
pub const LAYER_PBC: Periodicity = [true, true, false];
