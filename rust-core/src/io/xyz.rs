//! Extended XYZ reading and writing.
//!
//! Only the fields a layered structure carries are understood: the species and `pos`
//! columns of `Properties`, the `Lattice` and the `pbc` flags. Other comment-line keys and
//! per-atom columns are skipped.

use std::fs;
use std::path::Path;

use log::warn;
use nalgebra::{Matrix3, Vector3};

use crate::error::{Result, StackError};
use crate::interfaces::{LAYER_PBC, Periodicity};
use crate::structure::Structure;

const DEFAULT_PROPERTIES: &str = "species:S:1:pos:R:3";

/// Read the first frame of an extended XYZ file.
pub fn read_xyz(path: &Path) -> Result<Structure> {
    let content = fs::read_to_string(path)?;
    parse_xyz(&content, path)
}

/// Write `structure` as a single extended XYZ frame.
pub fn write_xyz(path: &Path, structure: &Structure) -> Result<()> {
    fs::write(path, format_xyz(structure))?;
    Ok(())
}

/// Parse the first frame of extended XYZ `content`; `source` only labels errors.
pub fn parse_xyz(content: &str, source: &Path) -> Result<Structure> {
    let parse_error = |line: usize, message: String| StackError::Parse {
        path: source.to_path_buf(),
        line,
        message,
    };

    let mut lines = content.lines();
    let count_line = lines
        .next()
        .ok_or_else(|| parse_error(1, "empty file".to_string()))?;
    let n_atoms: usize = count_line
        .trim()
        .parse()
        .map_err(|_| parse_error(1, format!("invalid atom count '{}'", count_line.trim())))?;

    let comment = lines
        .next()
        .ok_or_else(|| parse_error(2, "missing comment line".to_string()))?;
    let info = parse_comment(comment).map_err(|message| parse_error(2, message))?;

    let mut lattice = None;
    let mut properties = DEFAULT_PROPERTIES.to_string();
    let mut pbc = LAYER_PBC;
    for (key, value) in info {
        match key.to_ascii_lowercase().as_str() {
            "lattice" => lattice = Some(parse_lattice(&value).map_err(|m| parse_error(2, m))?),
            "properties" => properties = value,
            "pbc" => pbc = parse_pbc(&value).map_err(|m| parse_error(2, m))?,
            _ => {}
        }
    }
    let cell = lattice.ok_or_else(|| parse_error(2, "missing Lattice".to_string()))?;
    let columns = parse_properties(&properties).map_err(|m| parse_error(2, m))?;

    // The header count is untrusted; never reserve more than the lines actually present
    let capacity = n_atoms.min(content.lines().count().saturating_sub(2));
    let mut species = Vec::with_capacity(capacity);
    let mut positions = Vec::with_capacity(capacity);
    for i in 0..n_atoms {
        let line_no = i + 3;
        let line = lines
            .next()
            .ok_or_else(|| parse_error(line_no, format!("expected {} atoms, found {}", n_atoms, i)))?;
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < columns.width {
            return Err(parse_error(
                line_no,
                format!("expected {} columns, found {}", columns.width, fields.len()),
            ));
        }

        species.push(fields[columns.species].to_string());
        let mut position = Vector3::zeros();
        for k in 0..3 {
            let field = fields[columns.pos + k];
            position[k] = field
                .parse()
                .map_err(|_| parse_error(line_no, format!("invalid coordinate '{}'", field)))?;
        }
        positions.push(position);
    }

    if lines.any(|line| !line.trim().is_empty()) {
        warn!(
            "{}: trailing content after the first frame is ignored",
            source.display()
        );
    }
    if pbc != LAYER_PBC {
        warn!(
            "{}: pbc {:?} read, layers are treated as periodic in-plane only",
            source.display(),
            pbc
        );
    }

    Structure::new(species, positions, cell, pbc)
}

/// Extended XYZ text of one frame, positions at 8 decimals.
pub fn format_xyz(structure: &Structure) -> String {
    let cell = structure.cell();
    let lattice: Vec<String> = (0..3)
        .flat_map(|col| (0..3).map(move |row| format!("{:.8}", cell[(row, col)])))
        .collect();
    let pbc: Vec<&str> = structure
        .pbc()
        .iter()
        .map(|&p| if p { "T" } else { "F" })
        .collect();

    let mut out = format!(
        "{}\nLattice=\"{}\" Properties={} pbc=\"{}\"\n",
        structure.len(),
        lattice.join(" "),
        DEFAULT_PROPERTIES,
        pbc.join(" ")
    );
    for (symbol, p) in structure.species().iter().zip(structure.positions()) {
        out.push_str(&format!(
            "{:<4}{:>16.8}{:>16.8}{:>16.8}\n",
            symbol, p.x, p.y, p.z
        ));
    }
    out
}

// Column offsets of the fields we need within an atom line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Columns {
    pub species: usize,
    pub pos: usize,
    pub width: usize,
}

/// Split a comment line into `key=value` pairs. Values may be double-quoted; a bare key
/// is read as `T`.
pub(crate) fn parse_comment(line: &str) -> std::result::Result<Vec<(String, String)>, String> {
    let mut pairs = Vec::new();
    let mut chars = line.chars().peekable();

    loop {
        while chars.peek().is_some_and(|c| c.is_whitespace()) {
            chars.next();
        }
        if chars.peek().is_none() {
            break;
        }

        let mut key = String::new();
        while let Some(&c) = chars.peek() {
            if c == '=' || c.is_whitespace() {
                break;
            }
            key.push(c);
            chars.next();
        }
        if chars.peek() != Some(&'=') {
            pairs.push((key, "T".to_string()));
            continue;
        }
        chars.next();

        let mut value = String::new();
        if chars.peek() == Some(&'"') {
            chars.next();
            let mut closed = false;
            for c in chars.by_ref() {
                if c == '"' {
                    closed = true;
                    break;
                }
                value.push(c);
            }
            if !closed {
                return Err(format!("unterminated quote in value of '{}'", key));
            }
        } else {
            while let Some(&c) = chars.peek() {
                if c.is_whitespace() {
                    break;
                }
                value.push(c);
                chars.next();
            }
        }
        if key.is_empty() {
            return Err("value without a key".to_string());
        }
        pairs.push((key, value));
    }
    Ok(pairs)
}

// Nine numbers: a, b, c in turn; stored as cell columns
fn parse_lattice(value: &str) -> std::result::Result<Matrix3<f64>, String> {
    let numbers = value
        .split_whitespace()
        .map(|s| s.parse::<f64>().map_err(|_| format!("invalid Lattice entry '{}'", s)))
        .collect::<std::result::Result<Vec<f64>, String>>()?;
    if numbers.len() != 9 {
        return Err(format!("Lattice needs 9 numbers, found {}", numbers.len()));
    }
    Ok(Matrix3::from_column_slice(&numbers))
}

fn parse_pbc(value: &str) -> std::result::Result<Periodicity, String> {
    let flags = value
        .split_whitespace()
        .map(|s| match s.to_ascii_lowercase().as_str() {
            "t" | "true" | "1" => Ok(true),
            "f" | "false" | "0" => Ok(false),
            _ => Err(format!("invalid pbc flag '{}'", s)),
        })
        .collect::<std::result::Result<Vec<bool>, String>>()?;
    match flags.as_slice() {
        &[a, b, c] => Ok([a, b, c]),
        _ => Err(format!("pbc needs 3 flags, found {}", flags.len())),
    }
}

/// Locate the species and position columns in a `name:type:count` property list.
pub(crate) fn parse_properties(value: &str) -> std::result::Result<Columns, String> {
    let parts: Vec<&str> = value.split(':').collect();
    if parts.len() % 3 != 0 {
        return Err(format!("malformed Properties '{}'", value));
    }

    let mut species = None;
    let mut pos = None;
    let mut width = 0;
    for property in parts.chunks(3) {
        let (name, kind, count) = (property[0], property[1], property[2]);
        let count: usize = count
            .parse()
            .map_err(|_| format!("invalid column count '{}' for '{}'", count, name))?;
        match name {
            "species" if kind == "S" && count == 1 => species = Some(width),
            "pos" if kind == "R" && count == 3 => pos = Some(width),
            "species" | "pos" => {
                return Err(format!("unexpected layout {}:{} for '{}'", kind, count, name));
            }
            _ => {}
        }
        width += count;
    }

    match (species, pos) {
        (Some(species), Some(pos)) => Ok(Columns {
            species,
            pos,
            width,
        }),
        _ => Err("Properties must contain species and pos".to_string()),
    }
}
