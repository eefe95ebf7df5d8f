//! Configurable text layout for printing matrices.
//!
//! ```
//! use blockkron_dense::{from_rows, OutputFormat};
//!
//! let m = from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
//! let fmt = OutputFormat { precision: Some(1), ..OutputFormat::matlab() };
//! assert_eq!(fmt.display(m.as_ref()).to_string(), "[1.0, 2.0;\n3.0, 4.0]");
//! ```

use std::fmt;

use crate::matrix::MatRef;
use crate::scalar::Scalar;

/// Layout options for [`OutputFormat::display`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFormat {
    /// Digits after the decimal point; `None` prints the shortest exact form.
    pub precision: Option<usize>,
    /// Pad entries so that columns line up.
    pub align_columns: bool,
    pub coeff_separator: String,
    pub row_separator: String,
    pub row_prefix: String,
    pub row_suffix: String,
    pub mat_prefix: String,
    pub mat_suffix: String,
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self {
            precision: None,
            align_columns: true,
            coeff_separator: " ".to_string(),
            row_separator: "\n".to_string(),
            row_prefix: String::new(),
            row_suffix: String::new(),
            mat_prefix: String::new(),
            mat_suffix: String::new(),
        }
    }
}

impl OutputFormat {
    /// Matlab literal syntax: `[a, b;\nc, d]`.
    pub fn matlab() -> Self {
        Self {
            align_columns: false,
            coeff_separator: ", ".to_string(),
            row_separator: ";\n".to_string(),
            mat_prefix: "[".to_string(),
            mat_suffix: "]".to_string(),
            ..Self::default()
        }
    }

    /// Single line, rows separated by `; `.
    pub fn compact() -> Self {
        Self {
            align_columns: false,
            coeff_separator: " ".to_string(),
            row_separator: "; ".to_string(),
            mat_prefix: "[".to_string(),
            mat_suffix: "]".to_string(),
            ..Self::default()
        }
    }

    /// Render `matrix` with this layout.
    pub fn display<'a, T: Scalar>(&'a self, matrix: MatRef<'a, T>) -> MatrixDisplay<'a, T> {
        MatrixDisplay {
            matrix,
            format: self,
        }
    }

    fn entry<T: Scalar>(&self, x: T) -> String {
        match self.precision {
            Some(p) => format!("{:.*}", p, x),
            None => format!("{}", x),
        }
    }
}

/// [`fmt::Display`] adapter returned by [`OutputFormat::display`].
pub struct MatrixDisplay<'a, T> {
    matrix: MatRef<'a, T>,
    format: &'a OutputFormat,
}

impl<T: Scalar> fmt::Display for MatrixDisplay<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = self.matrix;
        let fmt = self.format;
        let entries: Vec<String> = (0..m.nrows())
            .flat_map(|i| (0..m.ncols()).map(move |j| (i, j)))
            .map(|(i, j)| fmt.entry(m[(i, j)]))
            .collect();
        let width = if fmt.align_columns {
            entries.iter().map(String::len).max().unwrap_or(0)
        } else {
            0
        };

        f.write_str(&fmt.mat_prefix)?;
        for i in 0..m.nrows() {
            if i > 0 {
                f.write_str(&fmt.row_separator)?;
            }
            f.write_str(&fmt.row_prefix)?;
            for j in 0..m.ncols() {
                if j > 0 {
                    f.write_str(&fmt.coeff_separator)?;
                }
                write!(f, "{:>width$}", entries[i * m.ncols() + j], width = width)?;
            }
            f.write_str(&fmt.row_suffix)?;
        }
        f.write_str(&fmt.mat_suffix)
    }
}
