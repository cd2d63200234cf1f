use bevy::prelude::Component;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::path::Path;

use crate::error::CardFlipError;

/// Per-card tuning. Read once, never changed while the card is alive.
///
/// No range checks are applied: a zero rotation speed never finishes a flip,
/// a non-positive shake duration restores the face on the first shake frame and
/// the sign of the shake amplitude is ignored.
#[derive(Component, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardFlipSettings {
    /// Scale multiplier while the pointer is over the card
    pub hover_scale: f32,
    /// Degrees per second
    pub rotation_speed: f32,
    /// Seconds
    pub shake_duration: f32,
    /// Maximum in-plane offset of the shaking face, in local units
    pub shake_amount: f32,
}

impl Default for CardFlipSettings {
    fn default() -> Self {
        Self {
            hover_scale: 1.2,
            rotation_speed: 500.0,
            shake_duration: 0.5,
            shake_amount: 0.1,
        }
    }
}

impl CardFlipSettings {
    pub const SECTION: &'static str = "card_flip";

    pub fn from_toml_str(source: &str) -> Result<Self, CardFlipError> {
        load_section(source, Self::SECTION)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, CardFlipError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }
}

/// Deserializes one `[section]` of a TOML document.
///
/// A missing section yields `T::default()`; malformed TOML or a section with
/// mistyped values is an error.
pub fn load_section<T>(source: &str, section: &str) -> Result<T, CardFlipError>
where
    T: DeserializeOwned + Default,
{
    let table: toml::Table = toml::from_str(source)?;
    match table.get(section) {
        Some(value) => Ok(value.clone().try_into()?),
        None => Ok(T::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_section_and_fills_defaults() {
        let settings = CardFlipSettings::from_toml_str(
            r#"
            [card_flip]
            rotation_speed = 720.0
            shake_amount = 4.0
            "#,
        )
        .unwrap();

        assert_eq!(settings.rotation_speed, 720.0);
        assert_eq!(settings.shake_amount, 4.0);
        assert_eq!(settings.hover_scale, 1.2);
        assert_eq!(settings.shake_duration, 0.5);
    }

    #[test]
    fn missing_section_uses_defaults() {
        let settings = CardFlipSettings::from_toml_str("[window]\ntitle = \"x\"\n").unwrap();
        assert_eq!(settings, CardFlipSettings::default());

        let empty = CardFlipSettings::from_toml_str("").unwrap();
        assert_eq!(empty, CardFlipSettings::default());
    }

    #[test]
    fn malformed_input_is_an_error() {
        let err = CardFlipSettings::from_toml_str("[card_flip\nhover_scale = ").unwrap_err();
        assert!(matches!(err, CardFlipError::Toml(_)));

        let err = CardFlipSettings::from_toml_str("[card_flip]\nhover_scale = \"big\"\n")
            .unwrap_err();
        assert!(matches!(err, CardFlipError::Toml(_)));
    }

    #[test]
    fn degenerate_values_are_accepted() {
        let settings = CardFlipSettings::from_toml_str(
            "[card_flip]\nrotation_speed = 0.0\nshake_duration = -1.0\nshake_amount = -3.0\n",
        )
        .unwrap();
        assert_eq!(settings.rotation_speed, 0.0);
        assert_eq!(settings.shake_duration, -1.0);
        assert_eq!(settings.shake_amount, -3.0);
    }

    #[test]
    fn load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[card_flip]\nhover_scale = 1.5").unwrap();

        let settings = CardFlipSettings::load(file.path()).unwrap();
        assert_eq!(settings.hover_scale, 1.5);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = CardFlipSettings::load(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, CardFlipError::Io(_)));
    }
}
