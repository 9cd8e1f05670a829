use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum EnvType {
    #[default]
    Local,
    Dev,
    Staging,
    Prod,
}

impl EnvType {
    /// Local runs print timestamps and module paths, everything else only the message.
    pub fn is_local(&self) -> bool {
        *self == EnvType::Local
    }
}
