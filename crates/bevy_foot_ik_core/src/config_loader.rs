use bevy::{
    asset::{AssetLoader, LoadContext, io::Reader},
    reflect::TypePath,
};

use crate::{config::FootIkConfig, errors::FootIkLoaderError};

/// Loads `*.footik.ron` files into [`FootIkConfig`] assets.
///
/// Fields missing from the file keep their default values. The loaded config is
/// validated, so assets that break the solver's preconditions fail to load.
#[derive(Default, TypePath)]
pub struct FootIkConfigLoader;

impl AssetLoader for FootIkConfigLoader {
    type Asset = FootIkConfig;
    type Settings = ();
    type Error = FootIkLoaderError;

    async fn load(
        &self,
        reader: &mut dyn Reader,
        _settings: &Self::Settings,
        _load_context: &mut LoadContext<'_>,
    ) -> Result<Self::Asset, Self::Error> {
        let mut bytes = vec![];
        reader.read_to_end(&mut bytes).await?;
        parse_config(&bytes)
    }

    fn extensions(&self) -> &[&str] {
        &["footik.ron"]
    }
}

pub fn parse_config(bytes: &[u8]) -> Result<FootIkConfig, FootIkLoaderError> {
    let config: FootIkConfig = ron::de::from_bytes(bytes)?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::FootIkConfigError;

    #[test]
    fn parses_full_config() {
        let source = r#"(
            enabled: true,
            height_from_ground_raycast: 1.0,
            raycast_down_distance: 2.0,
            ground_layers: (3),
            pelvis_offset: 0.01,
            pelvis_smoothing: 0.3,
            foot_smoothing: 0.6,
            curves: (
                left_position_weight: "LFoot",
                right_position_weight: "RFoot",
                left_yaw_offset: "LYaw",
                right_yaw_offset: "RYaw",
            ),
            rotation_ik: true,
            debug_draw: false,
        )"#;

        let config = parse_config(source.as_bytes()).unwrap();

        assert_eq!(config.ground_layers.bits(), 3);
        assert_eq!(config.probe_distance(), 3.);
        assert_eq!(config.curves.right_yaw_offset, "RYaw");
        assert!(config.rotation_ik);
        assert!(!config.debug_draw);
    }

    #[test]
    fn empty_file_is_default_config() {
        assert_eq!(parse_config(b"()").unwrap(), FootIkConfig::default());
    }

    #[test]
    fn invalid_config_fails_to_load() {
        let err = parse_config(b"(pelvis_smoothing: -0.5)").unwrap_err();
        assert!(matches!(
            err,
            FootIkLoaderError::InvalidConfig(FootIkConfigError::SmoothingOutOfRange {
                field: "pelvis_smoothing",
                ..
            })
        ));
    }

    #[test]
    fn malformed_ron_is_reported() {
        let err = parse_config(b"(pelvis_offset: )").unwrap_err();
        assert!(matches!(err, FootIkLoaderError::RonSpannedError(_)));
    }
}
