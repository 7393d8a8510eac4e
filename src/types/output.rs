use serde::Serialize;

use super::Role;

#[derive(Serialize)]
pub struct Output {
    pub role: Role,
    pub topic: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
    pub token: String,
}
