pub mod compare;
pub mod config;
pub mod degrade;
pub mod degrade_video;
pub mod extract;
pub mod generate;

use clap::ValueEnum;
use smudge_core::corpus::DEFAULT_CATEGORIES;
use smudge_core::degrade::Mode;

/// Degradation mode on the command line; `random` draws one per item.
#[derive(Clone, Copy, ValueEnum)]
pub enum ModeArg {
    Random,
    Blur,
    Compression,
    BrightnessContrast,
    BlockNoise,
}

impl ModeArg {
    pub fn to_mode(self) -> Option<Mode> {
        match self {
            ModeArg::Random => None,
            ModeArg::Blur => Some(Mode::Blur),
            ModeArg::Compression => Some(Mode::Compression),
            ModeArg::BrightnessContrast => Some(Mode::BrightnessContrast),
            ModeArg::BlockNoise => Some(Mode::BlockNoise),
        }
    }
}

/// Explicit categories from the command line, or the default partition.
pub fn resolve_categories(arg: &Option<Vec<String>>) -> Vec<String> {
    match arg {
        Some(categories) if !categories.is_empty() => categories.clone(),
        _ => DEFAULT_CATEGORIES.iter().map(|s| s.to_string()).collect(),
    }
}
