use serde::Serialize;

use crate::core::error::{SceneError, SceneResult};

/// Tower models the host can offer in its model picker.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TowerModel {
    #[default]
    Eiffel,
}

#[derive(Serialize)]
struct ModelOption {
    value: &'static str,
    label: &'static str,
}

impl TowerModel {
    pub const ALL: [TowerModel; 1] = [TowerModel::Eiffel];

    pub fn key(self) -> &'static str {
        match self {
            TowerModel::Eiffel => "eiffel",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TowerModel::Eiffel => "Eiffel Tower",
        }
    }

    pub fn from_key(key: &str) -> SceneResult<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|m| m.key() == key)
            .ok_or_else(|| SceneError::UnknownModel(key.to_string()))
    }

    /// `[{ "value": ..., "label": ... }]` for a select control.
    pub fn options_json() -> String {
        let options: Vec<ModelOption> = Self::ALL
            .iter()
            .map(|m| ModelOption {
                value: m.key(),
                label: m.label(),
            })
            .collect();
        serde_json::to_string(&options).unwrap_or_else(|_| "[]".to_string())
    }
}
