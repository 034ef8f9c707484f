//! Fixed-format gradient file
//!
//! Each evaluation appends one record:
//!
//! ```text
//! <label, 59 wide> RHF       FIRST
//! natom(5) energy(20.10)
//! Z x y z          (natom lines, 20.10 each)
//!     gx gy gz     (natom lines, 20 blank then 20.10 each)
//! ```

use crate::error::{DerivError, Result};
use crate::system_impl::Molecule;
use nalgebra::DMatrix;
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

/// Default name of the gradient file.
pub const GRADIENT_FILE: &str = "psi.file11.dat";

/// Writes a finished gradient next to the geometry it belongs to.
pub struct GradientWriter<'a> {
    molecule: &'a Molecule,
    gradient: &'a DMatrix<f64>,
    energy: f64,
    label: String,
}

impl<'a> GradientWriter<'a> {
    pub fn new(molecule: &'a Molecule, gradient: &'a DMatrix<f64>, energy: f64) -> Result<Self> {
        let expected = (molecule.natom(), 3);
        if gradient.shape() != expected {
            return Err(DerivError::shape("gradient to write", expected, gradient.shape()));
        }
        Ok(GradientWriter {
            molecule,
            gradient,
            energy,
            label: String::new(),
        })
    }

    /// Free-text label for the first line of the record; cut at 59 characters.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Append one record to the file at `path`, creating it if needed.
    pub fn write(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let mut writer = BufWriter::new(file);
        self.write_to(&mut writer)?;
        writer.flush()?;
        info!("Gradient written to {}", path.display());
        Ok(())
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writeln!(writer, "{:<59.59} {:<10.10}{:<8.8}", self.label, "RHF", "FIRST")?;
        writeln!(writer, "{:5}{:20.10}", self.molecule.natom(), self.energy)?;

        for atom in self.molecule.atoms() {
            writeln!(
                writer,
                "{:20.10}{:20.10}{:20.10}{:20.10}",
                atom.charge(),
                atom.position.x,
                atom.position.y,
                atom.position.z
            )?;
        }

        for row in self.gradient.row_iter() {
            writeln!(writer, "{:20}{:20.10}{:20.10}{:20.10}", "", row[0], row[1], row[2])?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system_impl::Atom;
    use nalgebra::Vector3;
    use periodic_table_on_an_enum::Element;
    use std::fs;

    fn water() -> Molecule {
        Molecule::new(vec![
            Atom::new(Element::Oxygen, Vector3::new(0.0, 0.0, -0.1294)),
            Atom::new(Element::Hydrogen, Vector3::new(0.0, -1.4941, 1.0274)),
            Atom::new(Element::Hydrogen, Vector3::new(0.0, 1.4941, 1.0274)),
        ])
        .unwrap()
    }

    fn render(writer: &GradientWriter) -> String {
        let mut buffer = Vec::new();
        writer.write_to(&mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_record_layout() {
        let molecule = water();
        let gradient = DMatrix::from_row_slice(
            3,
            3,
            &[0.0, 0.0, 0.05, 0.0, 0.01, -0.025, 0.0, -0.01, -0.025],
        );
        let writer = GradientWriter::new(&molecule, &gradient, -74.9659)
            .unwrap()
            .with_label("water");
        let text = render(&writer);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 2 + 2 * 3);
        assert_eq!(lines[0].len(), 59 + 1 + 10 + 8);
        assert!(lines[0].starts_with("water "));
        assert_eq!(&lines[0][60..], "RHF       FIRST   ");
        assert_eq!(lines[1], format!("{:5}{:20.10}", 3, -74.9659));
        assert_eq!(
            lines[2],
            format!("{:20.10}{:20.10}{:20.10}{:20.10}", 8.0, 0.0, 0.0, -0.1294)
        );
        assert_eq!(
            lines[6],
            format!("{:20}{:20.10}{:20.10}{:20.10}", "", 0.0, 0.01, -0.025)
        );
        assert!(lines[5].starts_with(&" ".repeat(20)));
    }

    #[test]
    fn test_long_label_is_truncated() {
        let molecule = water();
        let gradient = DMatrix::zeros(3, 3);
        let label = "x".repeat(80);
        let writer = GradientWriter::new(&molecule, &gradient, 0.0)
            .unwrap()
            .with_label(label);
        let text = render(&writer);
        let first = text.lines().next().unwrap();
        assert_eq!(first.len(), 78);
        assert_eq!(&first[..59], "x".repeat(59));
    }

    #[test]
    fn test_wrong_gradient_shape_is_rejected() {
        let molecule = water();
        let gradient = DMatrix::zeros(2, 3);
        assert!(matches!(
            GradientWriter::new(&molecule, &gradient, 0.0),
            Err(DerivError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_write_appends_records() {
        let molecule = water();
        let gradient = DMatrix::from_element(3, 3, 0.001);
        let path = std::env::temp_dir().join(format!(
            "scf_deriv_append_{}.dat",
            std::process::id()
        ));
        let _ = fs::remove_file(&path);

        let writer = GradientWriter::new(&molecule, &gradient, -1.0).unwrap();
        writer.write(&path).unwrap();
        writer.write(&path).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        fs::remove_file(&path).unwrap();

        let expected = render(&writer);
        assert_eq!(text, format!("{expected}{expected}"));
    }
}
