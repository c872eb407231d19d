#[derive(thiserror::Error, Debug, PartialEq)]
pub enum SettingsError {
    #[error("invalid scale {0}: must be a finite number greater than zero")]
    InvalidScale(f64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Applied to every vertex position, never to normals.
    pub scale: f64,
    /// Continue with the remaining files after one fails.
    pub keep_going: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            scale: 1.0,
            keep_going: false,
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(SettingsError::InvalidScale(self.scale));
        }
        Ok(())
    }
}

#[cfg(test)]
mod test_settings {
    use super::*;

    #[test]
    fn defaults() {
        let settings = Settings::default();
        assert_eq!(settings.scale, 1.0);
        assert!(!settings.keep_going);
        assert_eq!(settings.validate(), Ok(()));
    }

    #[test]
    fn rejects_bad_scale() {
        for scale in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let settings = Settings { scale, ..Settings::default() };
            assert!(settings.validate().is_err(), "scale {scale} accepted");
        }
    }

    #[test]
    fn accepts_small_and_large_scale() {
        for scale in [0.001, 0.5, 100.0] {
            let settings = Settings { scale, ..Settings::default() };
            assert_eq!(settings.validate(), Ok(()));
        }
    }
}
