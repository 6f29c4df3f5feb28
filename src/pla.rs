//! PLA format reading and writing
//!
//! The line-oriented Berkeley PLA format: `.i` / `.o` declare dimensions,
//! `.ilb` / `.ob` name variables, `.type` selects which sets the rows carry,
//! `.p` announces the row count, `.e` / `.end` terminates. Each row is an
//! input pattern over `{0, 1, -}` followed by an output pattern over
//! `{0, 1, -, ~}` (with the numeric aliases `2`, `3`, `4` the classic tool
//! accepted). A `|` may separate the two halves and whitespace inside a row
//! is ignored.
//!
//! Reading follows the classic convention: a single text row fans out into
//! up to three cube rows, one per set its output characters mention. The
//! default `.type` is `fd`, so `-` outputs land in the don't-care set.
//!
//! # Examples
//!
//! ```
//! use ristretto_logic::{Cover, CoverType, Minimizable, PLAReader, PLAWriter};
//!
//! let pla = ".i 2\n.o 1\n.p 2\n1- 1\n-1 1\n.e\n";
//! let cover = Cover::from_pla_string(pla).unwrap();
//! let minimized = cover.minimize().unwrap();
//! let text = minimized.to_pla_string(CoverType::F).unwrap();
//! assert!(text.contains(".p 2"));
//! ```

pub mod error;

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Cursor, Write};
use std::path::Path;
use std::sync::Arc;

use crate::cover::{Cover, CoverType, Cube, CubeType};
pub use error::{PLAError, PLAReadError, PLAWriteError};

/// Types that serialize to PLA text
pub trait PLAWriter {
    /// Write PLA text to any writer
    fn write_pla<W: Write>(&self, writer: &mut W, pla_type: CoverType)
        -> Result<(), PLAWriteError>;

    /// Render PLA text into a string
    fn to_pla_string(&self, pla_type: CoverType) -> Result<String, PLAWriteError> {
        let mut buffer = Vec::new();
        self.write_pla(&mut buffer, pla_type)?;
        // The format is pure ASCII.
        Ok(String::from_utf8(buffer).expect("PLA output is ASCII"))
    }

    /// Write PLA text to a file
    fn to_pla_file<P: AsRef<Path>>(
        &self,
        path: P,
        pla_type: CoverType,
    ) -> Result<(), PLAWriteError> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.write_pla(&mut writer, pla_type)?;
        writer.flush()?;
        Ok(())
    }
}

/// Types that parse from PLA text
pub trait PLAReader: Sized {
    /// Parse from any buffered reader
    fn from_pla_reader<R: BufRead>(reader: R) -> Result<Self, PLAReadError>;

    /// Parse from a string
    fn from_pla_string(s: &str) -> Result<Self, PLAReadError> {
        Self::from_pla_reader(Cursor::new(s.as_bytes()))
    }

    /// Load from a file
    fn from_pla_file<P: AsRef<Path>>(path: P) -> Result<Self, PLAReadError> {
        let file = File::open(path)?;
        Self::from_pla_reader(BufReader::new(file))
    }
}

impl PLAWriter for Cover {
    fn write_pla<W: Write>(
        &self,
        writer: &mut W,
        pla_type: CoverType,
    ) -> Result<(), PLAWriteError> {
        match pla_type {
            CoverType::F => {}
            CoverType::FD => writeln!(writer, ".type fd")?,
            CoverType::FR => writeln!(writer, ".type fr")?,
            CoverType::FDR => writeln!(writer, ".type fdr")?,
        }

        writeln!(writer, ".i {}", self.num_inputs())?;
        if !self.input_labels().is_empty() {
            write!(writer, ".ilb")?;
            for label in self.input_labels() {
                write!(writer, " {}", label)?;
            }
            writeln!(writer)?;
        }
        writeln!(writer, ".o {}", self.num_outputs())?;
        if !self.output_labels().is_empty() {
            write!(writer, ".ob")?;
            for label in self.output_labels() {
                write!(writer, " {}", label)?;
            }
            writeln!(writer)?;
        }

        let rows: Vec<&Cube> = self
            .rows()
            .iter()
            .filter(|row| match pla_type {
                CoverType::F => row.cube_type() == CubeType::F,
                CoverType::FD => {
                    matches!(row.cube_type(), CubeType::F | CubeType::D)
                }
                CoverType::FR => {
                    matches!(row.cube_type(), CubeType::F | CubeType::R)
                }
                CoverType::FDR => true,
            })
            .collect();
        writeln!(writer, ".p {}", rows.len())?;

        for row in rows {
            for input in row.inputs() {
                let ch = match input {
                    Some(false) => '0',
                    Some(true) => '1',
                    None => '-',
                };
                write!(writer, "{}", ch)?;
            }
            write!(writer, " ")?;

            // The F-only format prints plain 1/0 columns; the multi-set
            // formats mark "bit not in this row" with '~' and encode the
            // row's set in the set-bit character.
            let (set_ch, unset_ch) = match (pla_type, row.cube_type()) {
                (CoverType::F, _) => ('1', '0'),
                (_, CubeType::F) => ('1', '~'),
                (_, CubeType::D) => ('2', '~'),
                (_, CubeType::R) => ('0', '~'),
            };
            for &bit in row.outputs() {
                write!(writer, "{}", if bit { set_ch } else { unset_ch })?;
            }
            writeln!(writer)?;
        }

        match pla_type {
            CoverType::F => writeln!(writer, ".e")?,
            _ => writeln!(writer, ".end")?,
        }
        Ok(())
    }
}

impl PLAReader for Cover {
    fn from_pla_reader<R: BufRead>(reader: R) -> Result<Self, PLAReadError> {
        let mut num_inputs: Option<usize> = None;
        let mut num_outputs: Option<usize> = None;
        let mut input_labels: Option<Vec<Arc<str>>> = None;
        let mut output_labels: Option<Vec<Arc<str>>> = None;
        // The classic reader's default; '-' outputs become don't-cares.
        let mut cover_type = CoverType::FD;
        let mut rows: Vec<Cube> = Vec::new();

        for line in reader.lines() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some(rest) = line.strip_prefix('.') {
                let mut parts = rest.split_whitespace();
                let directive = parts.next().unwrap_or("");
                match directive {
                    "i" => num_inputs = Some(parse_dimension(".i", parts.next())?),
                    "o" => num_outputs = Some(parse_dimension(".o", parts.next())?),
                    "ilb" => {
                        let labels: Vec<Arc<str>> = parts.map(Arc::from).collect();
                        if !labels.is_empty() {
                            input_labels = Some(labels);
                        }
                    }
                    "ob" => {
                        let labels: Vec<Arc<str>> = parts.map(Arc::from).collect();
                        if !labels.is_empty() {
                            output_labels = Some(labels);
                        }
                    }
                    "type" => {
                        cover_type = match parts.next() {
                            Some("f") => CoverType::F,
                            Some("fd") => CoverType::FD,
                            Some("fr") => CoverType::FR,
                            Some("fdr") => CoverType::FDR,
                            _ => CoverType::F,
                        };
                    }
                    "e" | "end" => break,
                    // .p is advisory; unknown directives are skipped like
                    // the classic reader does.
                    _ => {}
                }
                continue;
            }

            let (inputs, outputs) =
                parse_row(line, num_inputs, num_outputs, cover_type)?;
            if num_inputs.is_none() {
                num_inputs = Some(inputs.len());
            }
            if num_outputs.is_none() {
                num_outputs = Some(outputs.f.len());
            }
            append_rows(&mut rows, inputs, outputs);
        }

        let num_inputs = num_inputs.ok_or(PLAError::MissingInputDirective)?;
        let num_outputs = num_outputs.ok_or(PLAError::MissingOutputDirective)?;

        if let Some(labels) = &input_labels {
            if labels.len() != num_inputs {
                return Err(PLAError::LabelCountMismatch {
                    label_type: "input",
                    expected: num_inputs,
                    actual: labels.len(),
                }
                .into());
            }
        }
        if let Some(labels) = &output_labels {
            if labels.len() != num_outputs {
                return Err(PLAError::LabelCountMismatch {
                    label_type: "output",
                    expected: num_outputs,
                    actual: labels.len(),
                }
                .into());
            }
        }

        let input_labels = input_labels.unwrap_or_else(|| {
            (0..num_inputs)
                .map(|i| Arc::from(format!("x{}", i).as_str()))
                .collect()
        });
        let output_labels = output_labels.unwrap_or_else(|| {
            (0..num_outputs)
                .map(|i| Arc::from(format!("y{}", i).as_str()))
                .collect()
        });

        Ok(Cover::from_parts(
            num_inputs,
            num_outputs,
            input_labels,
            output_labels,
            rows,
            cover_type,
        ))
    }
}

fn parse_dimension(directive: &str, value: Option<&str>) -> Result<usize, PLAError> {
    value
        .and_then(|v| v.parse().ok())
        .ok_or_else(|| PLAError::InvalidDirective {
            directive: directive.to_string(),
            value: value.unwrap_or("").to_string(),
        })
}

/// Output membership decoded from one text row
struct OutputSets {
    f: Vec<bool>,
    d: Vec<bool>,
    r: Vec<bool>,
}

/// Parse one cube row into its input pattern and output memberships
fn parse_row(
    line: &str,
    num_inputs: Option<usize>,
    num_outputs: Option<usize>,
    cover_type: CoverType,
) -> Result<(Vec<Option<bool>>, OutputSets), PLAReadError> {
    // '|' optionally separates inputs from outputs; all whitespace inside a
    // row is insignificant.
    let compact: String = line.chars().filter(|c| !c.is_whitespace() && *c != '|').collect();

    let (input_str, output_str) = match (num_inputs, num_outputs) {
        (Some(ni), Some(no)) => {
            if compact.len() != ni + no {
                return Err(PLAError::RowWidthMismatch {
                    expected: ni + no,
                    actual: compact.len(),
                }
                .into());
            }
            let (i, o) = compact.split_at(ni);
            (i.to_string(), o.to_string())
        }
        _ => {
            // A dimension is still unknown: split on the whitespace or '|'
            // boundary of the original line and infer from the halves.
            let mut parts = line.split(|c: char| c.is_whitespace() || c == '|')
                .filter(|p| !p.is_empty());
            let inputs = parts.next().unwrap_or("").to_string();
            let outputs = parts.next().unwrap_or("").to_string();
            if outputs.is_empty()
                || num_inputs.is_some_and(|ni| inputs.chars().count() != ni)
                || num_outputs.is_some_and(|no| outputs.chars().count() != no)
            {
                return Err(PLAError::RowWidthMismatch {
                    expected: num_inputs.unwrap_or(inputs.len())
                        + num_outputs.unwrap_or(outputs.len().max(1)),
                    actual: inputs.len() + outputs.len(),
                }
                .into());
            }
            (inputs, outputs)
        }
    };

    let mut inputs = Vec::with_capacity(input_str.len());
    for (position, ch) in input_str.chars().enumerate() {
        inputs.push(match ch {
            '0' => Some(false),
            '1' => Some(true),
            '-' | '~' | 'x' | 'X' => None,
            character => {
                return Err(PLAError::InvalidInputCharacter {
                    character,
                    position,
                }
                .into())
            }
        });
    }

    let width = output_str.chars().count();
    let mut outputs = OutputSets {
        f: vec![false; width],
        d: vec![false; width],
        r: vec![false; width],
    };
    for (position, ch) in output_str.chars().enumerate() {
        match ch {
            '1' | '4' => outputs.f[position] = true,
            '0' | '3' if cover_type.has_r() => outputs.r[position] = true,
            '-' | '2' if cover_type.has_d() => outputs.d[position] = true,
            // '~' never sets a bit; '0'/'-' outside their set types are
            // likewise inert, matching the classic reader.
            '~' | '0' | '3' | '-' | '2' => {}
            character => {
                return Err(PLAError::InvalidOutputCharacter {
                    character,
                    position,
                }
                .into())
            }
        }
    }
    Ok((inputs, outputs))
}

fn append_rows(rows: &mut Vec<Cube>, inputs: Vec<Option<bool>>, outputs: OutputSets) {
    if outputs.f.iter().any(|&b| b) {
        rows.push(Cube::new(&inputs, &outputs.f, CubeType::F));
    }
    if outputs.d.iter().any(|&b| b) {
        rows.push(Cube::new(&inputs, &outputs.d, CubeType::D));
    }
    if outputs.r.iter().any(|&b| b) {
        rows.push(Cube::new(&inputs, &outputs.r, CubeType::R));
    }
}
