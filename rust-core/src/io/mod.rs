// I/O module: the file-facing collaborators of the stacking core
// This module reads run options and structures from disk and writes the generated heterostructure

// ======================== MODULE DECLARATIONS ========================
pub mod options;
pub mod xyz;

// Test modules
mod _tests_options;

// ======================== RUN OPTIONS ========================
pub use options::{
    BaseLayerEntry, // struct - named base layer and the structure file it is read from
    StackOptions,   // struct - validated options document (YAML or JSON)
};
// StackOptions impl methods:
//   from_file(path: &Path) -> Result<Self>                           - read, parse and validate (.json as JSON, else YAML)
//   from_yaml_str(s: &str) -> Result<Self>                           - parse and validate a YAML document
//   from_str(s: &str) -> Result<Self>                                - parse and validate a JSON document
//   validate(&self) -> Result<()>                                    - range and shape checks, reporting the field path
//   layer_specs(&self) -> Vec<LayerSpec>                             - ordered (name, count) stacking sequence
//   settings(&self) -> GeneratorSettings                             - numeric pipeline parameters
//   load_base_layers(&self, root: &Path) -> Result<HashMap<..>>      - read every base layer, relative paths from root

// ======================== EXTENDED XYZ ========================
pub use xyz::{
    format_xyz, // fn(structure: &Structure) -> String - extended XYZ text of one frame
    parse_xyz,  // fn(content: &str, source: &Path) -> Result<Structure> - parse the first frame
    read_xyz,   // fn(path: &Path) -> Result<Structure> - read a structure file
    write_xyz,  // fn(path: &Path, structure: &Structure) -> Result<()> - write a structure file
};
