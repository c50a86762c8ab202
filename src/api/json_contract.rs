use serde::{Deserialize, Serialize};

use crate::core::PaneLayoutPlan;
use crate::error::{StockToolsError, StockToolsResult};

pub const PANE_LAYOUT_PLAN_JSON_SCHEMA_V1: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaneLayoutPlanJsonContractV1 {
    pub schema_version: u32,
    pub plan: PaneLayoutPlan,
}

impl PaneLayoutPlan {
    pub fn to_json_contract_v1_pretty(&self) -> StockToolsResult<String> {
        let payload = PaneLayoutPlanJsonContractV1 {
            schema_version: PANE_LAYOUT_PLAN_JSON_SCHEMA_V1,
            plan: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            StockToolsError::InvalidConfig(format!("failed to serialize layout plan contract v1: {e}"))
        })
    }

    /// Accepts either a bare plan or a versioned contract payload.
    pub fn from_json_compat_str(input: &str) -> StockToolsResult<Self> {
        if let Ok(plan) = serde_json::from_str::<PaneLayoutPlan>(input) {
            return Ok(plan);
        }
        let payload: PaneLayoutPlanJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            StockToolsError::InvalidConfig(format!("failed to parse layout plan json payload: {e}"))
        })?;
        if payload.schema_version != PANE_LAYOUT_PLAN_JSON_SCHEMA_V1 {
            return Err(StockToolsError::InvalidConfig(format!(
                "unsupported layout plan schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.plan)
    }
}
