#[cfg(test)]
mod _tests_options {
    use super::super::options::*;
    use crate::error::StackError;
    use crate::generator::{GeneratorSettings, HeterostructureGenerator, LayerSpec};
    use std::fs;
    use std::path::PathBuf;

    const OPTIONS: &str = r#"{
        "base_layers": [
            {"name": "A", "path": "A.xyz"},
            {"name": "B", "path": "B.xyz"}
        ],
        "heterostructure": [{"A": 1}, {"B": 2}, {"A": 1}],
        "gap": 2.5,
        "max_misfit": 0.001,
        "max_area": 100.0
    }"#;

    const OPTIONS_YAML: &str = "\
base_layers:
  - name: A
    path: A.xyz
  - name: B
    path: B.xyz
heterostructure:
  - A: 1
  - B: 2
  - A: 1
gap: 2.5
max_misfit: 0.001
max_area: 100.0
";

    const SQUARE_A: &str = "1\nLattice=\"2 0 0 0 2 0 0 0 15\" Properties=species:S:1:pos:R:3 pbc=\"T T F\"\nFe 0 0 4\n";
    const SQUARE_B: &str = "1\nLattice=\"3 0 0 0 3 0 0 0 15\" Properties=species:S:1:pos:R:3 pbc=\"T T F\"\nNi 0 0 4\n";

    fn field_of(result: crate::Result<StackOptions>) -> String {
        match result {
            Err(StackError::InvalidOptions { field, .. }) => field,
            other => panic!("expected InvalidOptions, got {:?}", other),
        }
    }

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("stack2d_{}_{}", std::process::id(), name));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_parse_options() {
        let options = StackOptions::from_str(OPTIONS).unwrap();
        assert_eq!(options.base_layers.len(), 2);
        assert_eq!(options.base_layers[1].path, PathBuf::from("B.xyz"));
        assert_eq!(
            options.layer_specs(),
            vec![LayerSpec::new("A", 1), LayerSpec::new("B", 2), LayerSpec::new("A", 1)]
        );

        let settings = options.settings();
        assert_eq!(settings.gap, 2.5);
        assert_eq!(settings.max_misfit, 0.001);
        assert_eq!(settings.max_area, 100.0);
        // Omitted fields take the generator defaults
        assert_eq!(settings.vacuum_size, GeneratorSettings::default().vacuum_size);
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let document = r#"{"base_layers": [{"name": "A", "path": "A.xyz"}], "heterostructure": [{"A": 1}], "spacing": 3.0}"#;
        assert!(matches!(StackOptions::from_str(document), Err(StackError::Json(_))));

        let document = r#"{"base_layers": [{"name": "A", "file": "A.xyz"}], "heterostructure": [{"A": 1}]}"#;
        assert!(matches!(StackOptions::from_str(document), Err(StackError::Json(_))));
    }

    #[test]
    fn test_non_integer_count_rejected() {
        let document = r#"{"base_layers": [{"name": "A", "path": "A.xyz"}], "heterostructure": [{"A": 1.5}]}"#;
        assert!(matches!(StackOptions::from_str(document), Err(StackError::Json(_))));
    }

    #[test]
    fn test_layer_validation() {
        let empty = r#"{"base_layers": [], "heterostructure": [{"A": 1}]}"#;
        assert_eq!(field_of(StackOptions::from_str(empty)), "base_layers");

        let duplicate = r#"{"base_layers": [{"name": "A", "path": "1.xyz"}, {"name": "A", "path": "2.xyz"}],
            "heterostructure": [{"A": 1}]}"#;
        assert_eq!(field_of(StackOptions::from_str(duplicate)), "base_layers[1].name");

        let two_keys = r#"{"base_layers": [{"name": "A", "path": "A.xyz"}, {"name": "B", "path": "B.xyz"}],
            "heterostructure": [{"A": 1}, {"A": 1, "B": 1}]}"#;
        assert_eq!(field_of(StackOptions::from_str(two_keys)), "heterostructure[1]");

        let no_key = r#"{"base_layers": [{"name": "A", "path": "A.xyz"}], "heterostructure": [{}]}"#;
        assert_eq!(field_of(StackOptions::from_str(no_key)), "heterostructure[0]");
    }

    #[test]
    fn test_numeric_validation() {
        let with = |field: &str, value: &str| {
            format!(
                r#"{{"base_layers": [{{"name": "A", "path": "A.xyz"}}], "heterostructure": [{{"A": 1}}], "{}": {}}}"#,
                field, value
            )
        };

        assert!(StackOptions::from_str(&with("gap", "0.0")).is_ok());
        assert_eq!(field_of(StackOptions::from_str(&with("gap", "-1.0"))), "gap");
        assert_eq!(field_of(StackOptions::from_str(&with("max_misfit", "0"))), "max_misfit");
        assert_eq!(field_of(StackOptions::from_str(&with("max_area", "-5"))), "max_area");
        assert_eq!(field_of(StackOptions::from_str(&with("vacuum_size", "0"))), "vacuum_size");
    }

    #[test]
    fn test_counts_are_left_to_the_generator() {
        let document = r#"{"base_layers": [{"name": "A", "path": "A.xyz"}], "heterostructure": [{"A": 0}]}"#;
        let options = StackOptions::from_str(document).unwrap();
        assert_eq!(options.layer_specs(), vec![LayerSpec::new("A", 0)]);
    }

    #[test]
    fn test_load_and_generate() {
        let dir = temp_dir("options");
        fs::write(dir.join("A.xyz"), SQUARE_A).unwrap();
        fs::write(dir.join("B.xyz"), SQUARE_B).unwrap();
        let options_path = dir.join("options.json");
        fs::write(&options_path, OPTIONS).unwrap();

        let options = StackOptions::from_file(&options_path).unwrap();
        let layers = options.load_base_layers(&dir).unwrap();
        assert_eq!(layers.len(), 2);
        assert_eq!(layers["B"].species(), &["Ni".to_string()]);

        let generator = HeterostructureGenerator::new(&layers, options.settings());
        let result = generator.generate(&options.layer_specs());
        fs::remove_dir_all(&dir).ok();

        // A, then 2x2 B on 3x3 A, B on the 6x6 stack (4 B atoms), 3x3 A on top
        assert_eq!(result.unwrap().len(), 9 + 4 + 4 + 9);
    }

    #[test]
    fn test_missing_layer_file() {
        let dir = temp_dir("missing");
        let options = StackOptions::from_str(OPTIONS).unwrap();
        let result = options.load_base_layers(&dir);
        fs::remove_dir_all(&dir).ok();
        assert!(matches!(result, Err(StackError::Io(_))));
    }

    // ==================== YAML ====================

    #[test]
    fn test_parse_yaml_options() {
        let yaml = StackOptions::from_yaml_str(OPTIONS_YAML).unwrap();
        let json = StackOptions::from_str(OPTIONS).unwrap();
        assert_eq!(yaml, json);
        assert_eq!(yaml.vacuum_size, GeneratorSettings::default().vacuum_size);
    }

    #[test]
    fn test_yaml_validation() {
        let unknown = "base_layers:\n  - {name: A, path: A.xyz}\nheterostructure:\n  - A: 1\nspacing: 3.0\n";
        assert!(matches!(StackOptions::from_yaml_str(unknown), Err(StackError::Yaml(_))));

        let two_keys = "base_layers:\n  - {name: A, path: A.xyz}\nheterostructure:\n  - {A: 1, B: 1}\n";
        assert_eq!(field_of(StackOptions::from_yaml_str(two_keys)), "heterostructure[0]");

        let no_vacuum = "base_layers:\n  - {name: A, path: A.xyz}\nheterostructure:\n  - A: 1\nvacuum_size: 0.0\n";
        assert_eq!(field_of(StackOptions::from_yaml_str(no_vacuum)), "vacuum_size");
    }

    #[test]
    fn test_load_yaml_file_and_generate() {
        let dir = temp_dir("options_yaml");
        fs::write(dir.join("A.xyz"), SQUARE_A).unwrap();
        fs::write(dir.join("B.xyz"), SQUARE_B).unwrap();
        let options_path = dir.join("options.yaml");
        fs::write(&options_path, OPTIONS_YAML).unwrap();
        // JSON content under a YAML name still loads
        let json_as_yaml = dir.join("options.yml");
        fs::write(&json_as_yaml, OPTIONS).unwrap();

        let options = StackOptions::from_file(&options_path).unwrap();
        let reread = StackOptions::from_file(&json_as_yaml).unwrap();
        let layers = options.load_base_layers(&dir).unwrap();
        let generator = HeterostructureGenerator::new(&layers, options.settings());
        let result = generator.generate(&options.layer_specs());
        fs::remove_dir_all(&dir).ok();

        assert_eq!(reread, options);
        assert_eq!(result.unwrap().len(), 9 + 4 + 4 + 9);
    }
}
