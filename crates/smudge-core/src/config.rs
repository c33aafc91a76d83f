use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use rand::distr::uniform::SampleUniform;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_SAMPLE_FPS;
use crate::corpus::DEFAULT_CATEGORIES;
use crate::degrade::Mode;
use crate::error::{Result, SmudgeError};

/// Inclusive `min..max` parameter range.
///
/// Parses from `"2..5"` or from a single value (`"3"` means `3..3`). One
/// value is sampled uniformly from the range per draw.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParamRange<T> {
    pub min: T,
    pub max: T,
}

impl<T: PartialOrd + Copy + fmt::Display> ParamRange<T> {
    pub fn new(min: T, max: T) -> Result<Self> {
        let range = Self { min, max };
        range.check("range")?;
        Ok(range)
    }

    /// Reject inverted ranges. Deserialized configs bypass `new`, so every
    /// consumer validates before drawing.
    pub fn check(&self, name: &str) -> Result<()> {
        if self.min > self.max {
            return Err(SmudgeError::InvalidRange(format!(
                "{name}: max ({}) must be >= min ({})",
                self.max, self.min
            )));
        }
        Ok(())
    }
}

impl<T: SampleUniform + PartialOrd + Copy> ParamRange<T> {
    /// Sample uniformly from [min, max].
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> T {
        rng.random_range(self.min..=self.max)
    }
}

impl<T> FromStr for ParamRange<T>
where
    T: FromStr + PartialOrd + Copy + fmt::Display,
    T::Err: fmt::Display,
{
    type Err = SmudgeError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let parse = |part: &str| {
            part.trim()
                .parse::<T>()
                .map_err(|e| SmudgeError::InvalidRange(format!("{part:?}: {e}")))
        };
        match s.split_once("..") {
            Some((lo, hi)) => Self::new(parse(lo)?, parse(hi)?),
            None => {
                let v = parse(s)?;
                Ok(Self { min: v, max: v })
            }
        }
    }
}

impl<T: fmt::Display + PartialEq> fmt::Display for ParamRange<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.min == self.max {
            write!(f, "{}", self.min)
        } else {
            write!(f, "{}..{}", self.min, self.max)
        }
    }
}

/// Tunable settings for the degradation modes.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DegradeParams {
    /// Mode applied to every item; absent means a uniform random choice
    /// per item.
    #[serde(default)]
    pub mode: Option<Mode>,
    /// Gaussian blur sigma, in pixels.
    pub sigma: ParamRange<f32>,
    /// JPEG quality for the compression round-trip (1-100).
    pub quality: ParamRange<u8>,
    /// Brightness factor (1.0 = unchanged).
    pub brightness: ParamRange<f32>,
    /// Contrast factor (1.0 = unchanged).
    pub contrast: ParamRange<f32>,
    /// Number of block-noise patches per item.
    pub patch_count: ParamRange<usize>,
    /// Block-noise patch side length, in pixels.
    pub patch_size: ParamRange<usize>,
}

impl Default for DegradeParams {
    fn default() -> Self {
        Self {
            mode: None,
            sigma: ParamRange { min: 2.0, max: 5.0 },
            quality: ParamRange { min: 5, max: 25 },
            brightness: ParamRange { min: 0.3, max: 1.8 },
            contrast: ParamRange { min: 0.3, max: 1.8 },
            patch_count: ParamRange { min: 5, max: 20 },
            patch_size: ParamRange { min: 10, max: 50 },
        }
    }
}

impl DegradeParams {
    pub fn validate(&self) -> Result<()> {
        self.sigma.check("sigma")?;
        self.quality.check("quality")?;
        self.brightness.check("brightness")?;
        self.contrast.check("contrast")?;
        self.patch_count.check("patch_count")?;
        self.patch_size.check("patch_size")?;
        if self.sigma.min <= 0.0 {
            return Err(SmudgeError::InvalidRange(
                "sigma: must be positive".to_string(),
            ));
        }
        if self.quality.min == 0 || self.quality.max > 100 {
            return Err(SmudgeError::InvalidRange(
                "quality: must be within 1-100".to_string(),
            ));
        }
        Ok(())
    }
}

/// Settings for frame extraction.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExtractParams {
    /// Target sampling rate, in frames per second.
    pub fps: f64,
    /// Keep every decoded frame instead of sampling.
    pub every_frame: bool,
}

impl Default for ExtractParams {
    fn default() -> Self {
        Self {
            fps: DEFAULT_SAMPLE_FPS,
            every_frame: false,
        }
    }
}

impl ExtractParams {
    pub fn validate(&self) -> Result<()> {
        if !self.every_frame && !(self.fps.is_finite() && self.fps > 0.0) {
            return Err(SmudgeError::Config(format!(
                "extraction fps must be positive, got {}",
                self.fps
            )));
        }
        Ok(())
    }
}

/// Full configuration for a dataset run.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// Directory of clean material, one subdirectory per category.
    pub target_root: PathBuf,
    /// Directory receiving the degraded counterparts.
    pub input_root: PathBuf,
    /// Category subdirectories to process.
    #[serde(default = "default_categories")]
    pub categories: Vec<String>,
    /// RNG seed; a fresh one is drawn and reported when absent.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub extract: ExtractParams,
    #[serde(default)]
    pub degrade: DegradeParams,
}

fn default_categories() -> Vec<String> {
    DEFAULT_CATEGORIES.iter().map(|s| s.to_string()).collect()
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            target_root: PathBuf::from("target"),
            input_root: PathBuf::from("input"),
            categories: default_categories(),
            seed: None,
            extract: ExtractParams::default(),
            degrade: DegradeParams::default(),
        }
    }
}

impl DatasetConfig {
    pub fn validate(&self) -> Result<()> {
        if self.categories.is_empty() {
            return Err(SmudgeError::Config("no categories configured".to_string()));
        }
        self.extract.validate()?;
        self.degrade.validate()
    }
}
