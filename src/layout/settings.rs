use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Physics parameters of the force-directed layout.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct LayoutSettings {
    pub spring_length: f32,
    pub spring_coeff: f32,
    pub gravity: f32,
    pub theta: f32,
    pub drag_coeff: f32,
    pub time_step: f32,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            spring_length: 30.0,
            spring_coeff: 0.0008,
            gravity: -1.2,
            theta: 0.8,
            drag_coeff: 0.02,
            time_step: 20.0,
        }
    }
}

impl LayoutSettings {
    /// Reads a JSON object of overrides; keys that are absent keep their default.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read layout settings from {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("invalid layout settings in {}", path.display()))
    }

    pub fn get(&self, param: LayoutParam) -> f32 {
        match param {
            LayoutParam::SpringLength => self.spring_length,
            LayoutParam::SpringCoeff => self.spring_coeff,
            LayoutParam::Gravity => self.gravity,
            LayoutParam::Theta => self.theta,
            LayoutParam::DragCoeff => self.drag_coeff,
            LayoutParam::TimeStep => self.time_step,
        }
    }

    pub fn set(&mut self, param: LayoutParam, value: f32) {
        let slot = match param {
            LayoutParam::SpringLength => &mut self.spring_length,
            LayoutParam::SpringCoeff => &mut self.spring_coeff,
            LayoutParam::Gravity => &mut self.gravity,
            LayoutParam::Theta => &mut self.theta,
            LayoutParam::DragCoeff => &mut self.drag_coeff,
            LayoutParam::TimeStep => &mut self.time_step,
        };
        *slot = value;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LayoutParam {
    SpringLength,
    SpringCoeff,
    Gravity,
    Theta,
    DragCoeff,
    TimeStep,
}

impl LayoutParam {
    pub const COUNT: usize = 6;

    /// Display order of the settings form.
    pub const ALL: [Self; Self::COUNT] = [
        Self::SpringLength,
        Self::SpringCoeff,
        Self::Gravity,
        Self::Theta,
        Self::DragCoeff,
        Self::TimeStep,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn key(self) -> &'static str {
        match self {
            Self::SpringLength => "springLength",
            Self::SpringCoeff => "springCoeff",
            Self::Gravity => "gravity",
            Self::Theta => "theta",
            Self::DragCoeff => "dragCoeff",
            Self::TimeStep => "timeStep",
        }
    }

    pub fn help(self) -> &'static str {
        match self {
            Self::SpringLength => "Ideal length for links (springs in physical model) in pixels.",
            Self::SpringCoeff => {
                "Hook's law coefficient. 1 - solid spring. A smaller number loosens edge lengths."
            }
            Self::Gravity => {
                "Coulomb's law coefficient. It's used to repel nodes thus should be negative."
            }
            Self::Theta => {
                "Theta coefficient from Barnes Hut simulation. Ranged between (0, 1). \
                 The closer it's to 1 the more nodes algorithm will have to go through. \
                 Setting it to one makes Barnes Hut simulation no different from brute-force \
                 forces calculation (each node is considered)."
            }
            Self::DragCoeff => {
                "Drag force coefficient. Used to slow down system, thus should be less than 1. \
                 The closer it is to 0 the less tight system will be."
            }
            Self::TimeStep => "Default time step (dt) for forces integration",
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn defaults_match_the_stock_layout() {
        let settings = LayoutSettings::default();
        assert_eq!(settings.spring_length, 30.0);
        assert_eq!(settings.spring_coeff, 0.0008);
        assert_eq!(settings.gravity, -1.2);
        assert_eq!(settings.theta, 0.8);
        assert_eq!(settings.drag_coeff, 0.02);
        assert_eq!(settings.time_step, 20.0);
    }

    #[test]
    fn get_and_set_address_the_same_field() {
        let mut settings = LayoutSettings::default();
        for (offset, param) in LayoutParam::ALL.into_iter().enumerate() {
            let value = 100.0 + offset as f32;
            settings.set(param, value);
            assert_eq!(settings.get(param), value);
        }
        assert_eq!(settings.drag_coeff, 104.0);
    }

    #[test]
    fn params_are_indexed_in_display_order() {
        let keys = LayoutParam::ALL.map(LayoutParam::key);
        assert_eq!(
            keys,
            [
                "springLength",
                "springCoeff",
                "gravity",
                "theta",
                "dragCoeff",
                "timeStep"
            ]
        );
        for (position, param) in LayoutParam::ALL.into_iter().enumerate() {
            assert_eq!(param.index(), position);
        }
    }

    #[test]
    fn json_overrides_keep_missing_keys_at_default() {
        let settings: LayoutSettings =
            serde_json::from_str(r#"{"springLength": 80, "gravity": -3.5}"#).expect("valid json");
        assert_eq!(settings.spring_length, 80.0);
        assert_eq!(settings.gravity, -3.5);
        assert_eq!(settings.theta, 0.8);
    }

    #[test]
    fn json_rejects_unknown_keys() {
        let result = serde_json::from_str::<LayoutSettings>(r#"{"springLenght": 80}"#);
        assert!(result.is_err());
    }

    #[test]
    fn reads_overrides_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, r#"{{"timeStep": 5, "dragCoeff": 0.1}}"#).expect("write json");
        let settings = LayoutSettings::from_json_file(file.path()).expect("load settings");
        assert_eq!(settings.time_step, 5.0);
        assert_eq!(settings.drag_coeff, 0.1);
        assert_eq!(settings.spring_coeff, 0.0008);
    }

    #[test]
    fn help_text_is_single_spaced() {
        for param in LayoutParam::ALL {
            assert!(!param.help().contains("  "), "{}", param.key());
        }
    }
}
