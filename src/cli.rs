//! Defines command-line interface options using `clap` for the ru_stdev application.

use crate::errors::{Result, RuStdevError};
use crate::json_io::stdev_value;
use clap::Parser;
use serde_json::{Map, Value};
use std::io::Read;
use std::path::PathBuf;

/// A CLI tool for computing standard deviations
#[derive(Parser, Debug)]
#[command(
    version = "1.1.0",
    name = "ru_stdev",
    about = "Single-pass standard deviation of sequences, records and matrices"
)]
pub struct Args {
    /// Path to the input: JSON, or numbers separated by whitespace or commas. Reads stdin if not set.
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Reshape a flat list of numbers into a matrix, formatted as <rows>x<cols>
    #[arg(long, value_parser = parse_shape_arg)]
    pub shape: Option<[usize; 2]>,

    /// Matrix dimension to collapse: 1 gives one value per column, 2 one value per row
    #[arg(short, long)]
    pub dim: Option<u64>,

    /// Output data type for matrix results (e.g. float64, float32, int32, uint8)
    #[arg(long)]
    pub dtype: Option<String>,

    /// Compute the biased estimate (divide by N instead of N - 1)
    #[arg(short, long, default_value_t = false)]
    pub bias: bool,

    /// Field name or JSON pointer used to read values from record elements
    #[arg(long)]
    pub field: Option<String>,

    /// Raw JSON option bag; the flags above override its keys
    #[arg(long)]
    pub options: Option<String>,

    /// Enable verbose output.
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

fn parse_shape_arg(s: &str) -> std::result::Result<[usize; 2], String> {
    let parts: Vec<&str> = s.split(['x', 'X']).collect();
    match parts.as_slice() {
        [rows, cols] => {
            let rows = rows
                .trim()
                .parse::<usize>()
                .map_err(|_| format!("Invalid row count '{rows}'"))?;
            let cols = cols
                .trim()
                .parse::<usize>()
                .map_err(|_| format!("Invalid column count '{cols}'"))?;
            Ok([rows, cols])
        }
        _ => Err("Invalid format: Expected '<rows>x<cols>'.".to_string()),
    }
}

/// Parse input text as JSON, falling back to a list of numbers
///
/// # Errors
///
/// Returns an error if the text is neither JSON nor a list of numbers.
pub fn parse_input(text: &str) -> Result<Value> {
    if let Ok(value) = serde_json::from_str::<Value>(text) {
        return Ok(value);
    }
    let numbers = text
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
        .map(|token| {
            token.parse::<f64>().map_err(|_| RuStdevError::InvalidInput {
                message: format!("'{token}' is not a number"),
            })
        })
        .collect::<Result<Vec<f64>>>()?;
    Ok(Value::from(numbers))
}

/// Wrap a flat array of numbers into a matrix object of the given shape
///
/// # Errors
///
/// Returns an error if the input is not a flat array.
pub fn reshape(input: Value, shape: [usize; 2]) -> Result<Value> {
    match input {
        Value::Array(data) => Ok(serde_json::json!({ "data": data, "shape": shape })),
        other => Err(RuStdevError::InvalidInput {
            message: format!("--shape needs a flat array of numbers, got `{other}`"),
        }),
    }
}

impl Args {
    /// Merge `--options` with the individual flags; `None` when nothing was given
    ///
    /// # Errors
    ///
    /// Returns an error if `--options` is not valid JSON.
    pub fn option_bag(&self) -> Result<Option<Value>> {
        let given = self.options.is_some()
            || self.bias
            || self.dim.is_some()
            || self.dtype.is_some()
            || self.field.is_some();
        if !given {
            return Ok(None);
        }

        let mut bag = match &self.options {
            Some(text) => serde_json::from_str(text)?,
            None => Value::Object(Map::new()),
        };
        // Non-object bags are left as they are and rejected during validation
        if let Value::Object(map) = &mut bag {
            if self.bias {
                map.insert("bias".to_string(), Value::Bool(true));
            }
            if let Some(dim) = self.dim {
                map.insert("dim".to_string(), Value::from(dim));
            }
            if let Some(dtype) = &self.dtype {
                map.insert("dtype".to_string(), Value::from(dtype.as_str()));
            }
            if let Some(field) = &self.field {
                map.insert("accessor".to_string(), Value::from(field.as_str()));
            }
        }
        Ok(Some(bag))
    }

    /// Read the input from the file or stdin
    ///
    /// # Errors
    ///
    /// Returns an error if the input cannot be read or parsed.
    pub fn read_input(&self) -> Result<Value> {
        let text = match &self.file {
            Some(path) => std::fs::read_to_string(path)?,
            None => {
                let mut text = String::new();
                std::io::stdin().read_to_string(&mut text)?;
                text
            }
        };
        let input = parse_input(&text)?;
        match self.shape {
            Some(shape) => reshape(input, shape),
            None => Ok(input),
        }
    }
}

/// Run the computation described by the arguments
///
/// # Errors
///
/// Returns an error if the input cannot be read or the computation rejects it.
pub fn run(args: &Args) -> Result<Value> {
    let input = args.read_input()?;
    let options = args.option_bag()?;
    stdev_value(&input, options.as_ref())
}
