use std::convert::Infallible;
use std::str::FromStr;
use strum::{Display as StrumDisplay, EnumIter, EnumString, IntoEnumIterator};
use thiserror::Error;

pub const SHORTER_BELOW_CM: f64 = 160.0;
pub const TALLER_ABOVE_CM: f64 = 180.0;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(serialize_all = "snake_case")]
pub enum SkinTone {
    VeryFair,
    Fair,
    Light,
    LightMedium,
    Medium,
    MediumTan,
    Tan,
    Deep,
    VeryDeep,
}

impl SkinTone {
    pub fn all() -> Vec<Self> {
        Self::iter().collect()
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::VeryFair => "Very Fair",
            Self::Fair => "Fair",
            Self::Light => "Light",
            Self::LightMedium => "Light Medium",
            Self::Medium => "Medium",
            Self::MediumTan => "Medium Tan",
            Self::Tan => "Tan",
            Self::Deep => "Deep",
            Self::VeryDeep => "Very Deep",
        }
    }

    /// Label shown in the entry picker, with the descriptive swatch name.
    pub fn picker_label(&self) -> &'static str {
        match self {
            Self::VeryFair => "Very Fair (Porcelain)",
            Self::Fair => "Fair (Ivory)",
            Self::Light => "Light (Beige)",
            Self::LightMedium => "Light Medium (Sand)",
            Self::Medium => "Medium (Honey)",
            Self::MediumTan => "Medium Tan (Caramel)",
            Self::Tan => "Tan (Bronze)",
            Self::Deep => "Deep (Espresso)",
            Self::VeryDeep => "Very Deep (Ebony)",
        }
    }
}

/// A skin-tone tag as carried between steps. Tags outside [`SkinTone`] are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Complexion {
    Known(SkinTone),
    Unrecognized(String),
}

impl Complexion {
    pub fn tag(&self) -> String {
        match self {
            Self::Known(tone) => tone.to_string(),
            Self::Unrecognized(raw) => raw.clone(),
        }
    }

    /// Display label; unrecognized tags are shown as-is.
    pub fn label(&self) -> &str {
        match self {
            Self::Known(tone) => tone.label(),
            Self::Unrecognized(raw) => raw.as_str(),
        }
    }

    pub fn bucket(&self) -> ToneBucket {
        match self {
            Self::Known(SkinTone::VeryFair | SkinTone::Fair | SkinTone::Light) => ToneBucket::Soft,
            Self::Known(SkinTone::LightMedium | SkinTone::Medium | SkinTone::MediumTan) => {
                ToneBucket::Versatile
            }
            Self::Known(SkinTone::Tan | SkinTone::Deep | SkinTone::VeryDeep) => ToneBucket::Bold,
            Self::Unrecognized(_) => ToneBucket::Bold,
        }
    }
}

impl From<SkinTone> for Complexion {
    fn from(tone: SkinTone) -> Self {
        Self::Known(tone)
    }
}

impl FromStr for Complexion {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(SkinTone::from_str(s)
            .map(Self::Known)
            .unwrap_or_else(|_| Self::Unrecognized(s.to_string())))
    }
}

/// Which color-advice block a complexion gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToneBucket {
    /// Jewel tones and pastels.
    Soft,
    /// Earth tones and rich jewels; almost anything works.
    Versatile,
    /// Bold, vibrant colors and deep jewel tones.
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, StrumDisplay)]
#[strum(serialize_all = "lowercase")]
pub enum HeightCategory {
    Shorter,
    Average,
    Taller,
}

impl HeightCategory {
    /// 160 and 180 are both average. NaN fails both comparisons and lands on average too.
    pub fn from_cm(height_cm: f64) -> Self {
        if height_cm < SHORTER_BELOW_CM {
            Self::Shorter
        } else if height_cm > TALLER_ABOVE_CM {
            Self::Taller
        } else {
            Self::Average
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, StrumDisplay)]
pub enum Field {
    #[strum(serialize = "height")]
    Height,
    #[strum(serialize = "weight")]
    Weight,
    #[strum(serialize = "skin tone")]
    SkinTone,
}

#[derive(Debug, Error, PartialEq)]
pub enum MeasurementError {
    #[error("{0} is required")]
    Missing(Field),
    #[error("{field} must be a number, got {value:?}")]
    NotANumber { field: Field, value: String },
    #[error("{field} must be greater than zero, got {value}")]
    NotPositive { field: Field, value: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    pub height_cm: f64,
    pub weight_kg: f64,
}

impl Measurement {
    pub fn parse(height: &str, weight: &str) -> Result<Self, MeasurementError> {
        Ok(Self {
            height_cm: parse_positive(Field::Height, height)?,
            weight_kg: parse_positive(Field::Weight, weight)?,
        })
    }
}

fn parse_positive(field: Field, text: &str) -> Result<f64, MeasurementError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(MeasurementError::Missing(field));
    }
    let value: f64 = trimmed
        .parse()
        .map_err(|_| MeasurementError::NotANumber {
            field,
            value: trimmed.to_string(),
        })?;
    if !value.is_finite() || value <= 0.0 {
        return Err(MeasurementError::NotPositive { field, value });
    }
    Ok(value)
}
