use std::path::{Path, PathBuf};

use serde::{Serialize, Deserialize};

use crate::error::{AnnError, Result};
use crate::network::resolver::PhysicalScale;

/// How the input tensors are laid out on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileFormat {
    /// Whitespace- (or comma-) separated numbers read in fixed-shape mode:
    /// F and HN come from the config, never from the files.
    Whitespace,
    /// One row per line; shapes are read from the files and, where the
    /// config also names a dimension, checked against it.
    Csv,
}

/// Locations of the six input tensors and the two result files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelFiles {
    /// N x F raw samples.
    pub inputs: PathBuf,
    /// 2 x F, row 0 = min, row 1 = max.
    pub bounds: PathBuf,
    pub hidden_weights: PathBuf,
    pub hidden_bias: PathBuf,
    pub output_weights: PathBuf,
    pub output_bias: PathBuf,
    /// Written when OUT == 1.
    pub single_output: PathBuf,
    /// Written when OUT > 1.
    pub multi_output: PathBuf,
}

impl ModelFiles {
    fn with_extension(ext: &str, single_output: &str) -> ModelFiles {
        let f = |stem: &str| PathBuf::from(format!("ANNSFM_{stem}.{ext}"));
        ModelFiles {
            inputs: f("inputs"),
            bounds: f("Config_I"),
            hidden_weights: f("CS_HW"),
            hidden_bias: f("CS_HB"),
            output_weights: f("CS_OW"),
            output_bias: f("CS_OB"),
            single_output: PathBuf::from(single_output),
            multi_output: PathBuf::from("prediction_matrix.csv"),
        }
    }

    /// Resolves every relative path against `dir`.
    pub fn relative_to(&self, dir: &Path) -> ModelFiles {
        let r = |p: &PathBuf| if p.is_absolute() { p.clone() } else { dir.join(p) };
        ModelFiles {
            inputs: r(&self.inputs),
            bounds: r(&self.bounds),
            hidden_weights: r(&self.hidden_weights),
            hidden_bias: r(&self.hidden_bias),
            output_weights: r(&self.output_weights),
            output_bias: r(&self.output_bias),
            single_output: r(&self.single_output),
            multi_output: r(&self.multi_output),
        }
    }
}

/// Everything one inference run needs to know.
///
/// Replaces the hard-wired constants of the individual program variants:
/// the two presets [`PipelineConfig::fixed_txt`] and [`PipelineConfig::csv`]
/// reproduce them, anything else can be loaded from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub format: FileFormat,
    /// F. Required for `Whitespace`.
    #[serde(default)]
    pub features: Option<usize>,
    /// HN. Required for `Whitespace`.
    #[serde(default)]
    pub hidden: Option<usize>,
    /// N. Inferred from the input file when absent.
    #[serde(default)]
    pub samples: Option<usize>,
    /// Apply the bipolar sigmoid to the output layer as well.
    pub output_activation: bool,
    #[serde(default = "default_offset")]
    pub offset: f64,
    #[serde(default = "default_scale")]
    pub scale: f64,
    pub files: ModelFiles,
}

fn default_offset() -> f64 {
    PhysicalScale::default().offset
}

fn default_scale() -> f64 {
    PhysicalScale::default().scale
}

impl PipelineConfig {
    /// The fixed-size text variant: 708 samples, 8 features, 12 hidden neurons.
    pub fn fixed_txt() -> Self {
        PipelineConfig {
            format: FileFormat::Whitespace,
            features: Some(8),
            hidden: Some(12),
            samples: Some(708),
            output_activation: false,
            offset: default_offset(),
            scale: default_scale(),
            files: ModelFiles::with_extension("txt", "prediction.csv"),
        }
    }

    /// The CSV variant: every dimension is read from the files.
    pub fn csv() -> Self {
        PipelineConfig {
            format: FileFormat::Csv,
            features: None,
            hidden: None,
            samples: None,
            output_activation: false,
            offset: default_offset(),
            scale: default_scale(),
            files: ModelFiles::with_extension("csv", "prediction_validate.csv"),
        }
    }

    pub fn physical_scale(&self) -> PhysicalScale {
        PhysicalScale { offset: self.offset, scale: self.scale }
    }

    pub fn validate(&self) -> Result<()> {
        let dims = [("features", self.features), ("hidden", self.hidden), ("samples", self.samples)];
        for (name, dim) in dims {
            if dim == Some(0) {
                return Err(AnnError::Config(format!("`{name}` must be greater than zero")));
            }
        }
        if self.format == FileFormat::Whitespace {
            if self.features.is_none() {
                return Err(AnnError::Config("whitespace format requires `features`".into()));
            }
            if self.hidden.is_none() {
                return Err(AnnError::Config("whitespace format requires `hidden`".into()));
            }
        }
        if !self.offset.is_finite() || !self.scale.is_finite() {
            return Err(AnnError::Config("`offset` and `scale` must be finite".into()));
        }
        Ok(())
    }

    /// Serializes the config to a pretty-printed JSON file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path).map_err(|e| AnnError::io(path, e))?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)
            .map_err(|e| AnnError::Config(format!("{}: {e}", path.display())))
    }

    /// Deserializes and validates a config previously written by `save_json`.
    pub fn load_json(path: &Path) -> Result<PipelineConfig> {
        let file = std::fs::File::open(path).map_err(|e| AnnError::io(path, e))?;
        let reader = std::io::BufReader::new(file);
        let config: PipelineConfig = serde_json::from_reader(reader)
            .map_err(|e| AnnError::Config(format!("{}: {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }
}
