// src/models/settings.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// Chave herdada dos dados de produção — a grafia "deserts" está errada de
// origem, mas é a chave gravada no store e o campo esperado pela UI.
pub const SETTING_DESERTS_ENABLED: &str = "desertsEnabled";

/// Flags da loja. Hoje só existe uma: sobremesas habilitadas (padrão: sim).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StoreSettings {
    #[schema(example = true)]
    pub deserts_enabled: bool,
}
