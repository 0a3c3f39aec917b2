// Generator module: the stacking pipeline over an ordered list of named layers
// This module threads the growing heterostructure through match → supercell → join steps

// ======================== MODULE DECLARATIONS ========================
pub mod heterostructure;
pub mod layer_spec;


// ======================== PIPELINE ========================
pub use heterostructure::{
    GeneratorSettings,         // struct - gap, max_misfit, max_area, vacuum_size
    HeterostructureGenerator,  // struct - base layers + settings, runs the stacking pipeline
    InterfaceRecord,           // struct - what happened at one stacking interface
    StackingReport,            // struct - final structure plus one record per interface
};
// HeterostructureGenerator impl methods:
//   new(base_layers: &HashMap<String, Structure>, settings: GeneratorSettings) -> Self
//   generate(&self, layers: &[LayerSpec]) -> Result<Structure>
//   generate_with_report(&self, layers: &[LayerSpec]) -> Result<StackingReport>
//   generate_single_unit(&self, substrate: &Structure, film: &Structure) -> Result<(Structure, Match)>

// ======================== LAYER SEQUENCE ========================
pub use layer_spec::LayerSpec; // struct - (name, count), bottom-to-top stacking order
