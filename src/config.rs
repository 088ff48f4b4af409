use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::splitter::DEFAULT_CIRCLE_RESOLUTION;

/// Tuning options for the face overlay.
///
/// Loaded from JSON with camelCase keys; any missing key keeps its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OverlayConfig {
    /// Head yaw in degrees beyond which the nose bridge is drawn.
    pub nose_angle: f32,
    /// Endpoint blend for the nose curve, from the jaw anchor (0) to the nostril (1).
    ///
    /// Small values reach out toward the jaw and cross the cheeks. Values near 1
    /// (e.g. 0.94) give a short curve ending just past the nostrils.
    pub nostril_width: f32,
    /// Endpoint blend for the lip curves, from the mouth corner (0) to the lip (1).
    pub lip_width: f32,
    /// Normalization hint for output consumers. Never applied by the overlay.
    pub scale: f32,
    /// Dwell time for both the nose and mouth gates.
    pub gate_delay_ms: u64,
    /// Mouth-height gesture value above which the inner lower lip is drawn.
    pub mouth_open_threshold: f32,
    /// Vertex count of the iris circle.
    pub circle_resolution: usize,
    /// Iris radius as a fraction of the eye radius.
    pub iris_size: f32,
    /// Eye radius in multiples of the tracker scale.
    pub eye_radius_scale: f32,
    /// How far the lid chord sits between the eye corner and the upper lid.
    pub lid_height: f32,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            nose_angle: 15.0,
            nostril_width: 0.06,
            lip_width: 0.7,
            scale: 1.0,
            gate_delay_ms: 1000,
            mouth_open_threshold: 2.0,
            circle_resolution: DEFAULT_CIRCLE_RESOLUTION,
            iris_size: 0.5,
            eye_radius_scale: 3.0,
            lid_height: 0.5,
        }
    }
}

impl OverlayConfig {
    /// Read and validate a JSON config file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        let config: Self = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    pub fn gate_delay(&self) -> Duration {
        Duration::from_millis(self.gate_delay_ms)
    }

    pub fn nose_angle_radians(&self) -> f32 {
        self.nose_angle.to_radians()
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("nostrilWidth", self.nostril_width),
            ("lipWidth", self.lip_width),
            ("lidHeight", self.lid_height),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::InvalidConfig(format!(
                    "{} must be within [0, 1], got {}",
                    name, value
                )));
            }
        }
        for (name, value) in [
            ("noseAngle", self.nose_angle),
            ("scale", self.scale),
            ("mouthOpenThreshold", self.mouth_open_threshold),
            ("irisSize", self.iris_size),
            ("eyeRadiusScale", self.eye_radius_scale),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }
        if self.circle_resolution < 3 {
            return Err(Error::InvalidConfig(format!(
                "circleResolution must be at least 3, got {}",
                self.circle_resolution
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = OverlayConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.gate_delay(), Duration::from_millis(1000));
        assert!((config.nose_angle_radians() - 15f32.to_radians()).abs() < 1e-6);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config: OverlayConfig =
            serde_json::from_str(r#"{ "noseAngle": 20.0, "lipWidth": 0.5 }"#).unwrap();
        assert_eq!(config.nose_angle, 20.0);
        assert_eq!(config.lip_width, 0.5);
        assert_eq!(config.nostril_width, 0.06);
        assert_eq!(config.circle_resolution, 32);
    }

    #[test]
    fn rejects_out_of_range_values() {
        let config = OverlayConfig {
            lip_width: 1.5,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));

        let config = OverlayConfig {
            circle_resolution: 2,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = OverlayConfig {
            iris_size: f32::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn load_from_file() {
        let path = std::env::temp_dir().join("face_strokes_config.json");
        std::fs::write(&path, r#"{ "gateDelayMs": 250, "circleResolution": 16 }"#).unwrap();

        let config = OverlayConfig::load(&path).unwrap();
        assert_eq!(config.gate_delay(), Duration::from_millis(250));
        assert_eq!(config.circle_resolution, 16);

        std::fs::write(&path, r#"{ "lidHeight": -1.0 }"#).unwrap();
        assert!(OverlayConfig::load(&path).is_err());
        let _ = std::fs::remove_file(&path);
    }
}
