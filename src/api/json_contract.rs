use serde::{Deserialize, Serialize};

use crate::core::FrameSize;
use crate::error::{FrameError, FrameResult};

use super::FrameConfig;

pub const FRAME_CONFIG_JSON_SCHEMA_V1: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameConfigJsonContractV1 {
    pub schema_version: u32,
    pub config: FrameConfig,
}

impl FrameConfig {
    pub fn to_json_contract_v1_pretty(&self) -> FrameResult<String> {
        let payload = FrameConfigJsonContractV1 {
            schema_version: FRAME_CONFIG_JSON_SCHEMA_V1,
            config: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            FrameError::InvalidData(format!("failed to serialize frame config contract v1: {e}"))
        })
    }

    /// Accepts either a bare config object or a versioned contract envelope.
    pub fn from_json_compat_str(input: &str) -> FrameResult<Self> {
        let config = match serde_json::from_str::<FrameConfigJsonContractV1>(input) {
            Ok(payload) => {
                if payload.schema_version != FRAME_CONFIG_JSON_SCHEMA_V1 {
                    return Err(FrameError::InvalidData(format!(
                        "unsupported frame config schema version: {}",
                        payload.schema_version
                    )));
                }
                payload.config
            }
            Err(_) => serde_json::from_str::<FrameConfig>(input).map_err(|e| {
                FrameError::InvalidData(format!("failed to parse frame config json payload: {e}"))
            })?,
        };
        config.validate()?;
        Ok(config)
    }
}

impl FrameSize {
    pub fn to_json(self) -> FrameResult<String> {
        serde_json::to_string(&self)
            .map_err(|e| FrameError::InvalidData(format!("failed to serialize frame size: {e}")))
    }
}
