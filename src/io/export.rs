//! CSV export of prediction results.
//!
//! - single output: header `index,O_raw,new_O,Y_cm`, one row per sample
//! - several outputs: header `out_index,t1..tN`, one row per channel
//!
//! Indices are 1-based. Results are written to a temporary file beside the
//! target and renamed into place, so a failed run never leaves a partial file.

use std::io::{BufWriter, Write};
use std::path::Path;

use log::info;
use tempfile::NamedTempFile;

use crate::error::{AnnError, Result};
use crate::math::matrix::Matrix;
use crate::network::resolver::SingleOutput;

pub fn write_single_to<W: Write>(out: &mut W, series: &SingleOutput) -> std::io::Result<()> {
    writeln!(out, "index,O_raw,new_O,Y_cm")?;
    let rows = series.raw.iter().zip(&series.normalized).zip(&series.physical);
    for (i, ((raw, norm), y)) in rows.enumerate() {
        writeln!(out, "{},{},{},{}", i + 1, raw, norm, y)?;
    }
    Ok(())
}

pub fn write_multi_to<W: Write>(out: &mut W, predictions: &Matrix) -> std::io::Result<()> {
    write!(out, "out_index")?;
    for t in 1..=predictions.cols() {
        write!(out, ",t{t}")?;
    }
    writeln!(out)?;

    for (o, row) in predictions.as_slice().chunks(predictions.cols().max(1)).enumerate() {
        write!(out, "{}", o + 1)?;
        for v in row {
            write!(out, ",{v}")?;
        }
        writeln!(out)?;
    }
    Ok(())
}

pub fn write_single(path: &Path, series: &SingleOutput) -> Result<()> {
    write_file(path, |w| write_single_to(w, series))
}

pub fn write_multi(path: &Path, predictions: &Matrix) -> Result<()> {
    write_file(path, |w| write_multi_to(w, predictions))
}

fn write_file<F>(path: &Path, body: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<&mut NamedTempFile>) -> std::io::Result<()>,
{
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| AnnError::io(path, e))?;

    let mut writer = BufWriter::new(&mut tmp);
    body(&mut writer)
        .and_then(|_| writer.flush())
        .map_err(|e| AnnError::io(path, e))?;
    drop(writer);

    // the temp file is removed on drop if persisting fails
    tmp.persist(path).map_err(|e| AnnError::io(path, e.error))?;
    info!("saved {}", path.display());
    Ok(())
}
