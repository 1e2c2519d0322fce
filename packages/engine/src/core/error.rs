use thiserror::Error;

/// Errors surfaced by the scene API.
///
/// The tower generator itself never fails; these cover the surrounding
/// configuration and host-driven commands.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("invalid scene settings: {0}")]
    InvalidSettings(#[from] serde_json::Error),

    #[error("unknown tower model `{0}`")]
    UnknownModel(String),

    #[error("invalid viewport {width}x{height}")]
    InvalidViewport { width: f64, height: f64 },
}

pub type SceneResult<T> = Result<T, SceneError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_input() {
        let err = SceneError::UnknownModel("pisa".to_string());
        assert_eq!(err.to_string(), "unknown tower model `pisa`");

        let err = SceneError::InvalidViewport { width: 0.0, height: 600.0 };
        assert_eq!(err.to_string(), "invalid viewport 0x600");
    }

    #[test]
    fn json_errors_convert() {
        let parse = serde_json::from_str::<u32>("not json").unwrap_err();
        let err: SceneError = parse.into();
        assert!(matches!(err, SceneError::InvalidSettings(_)));
    }
}
