use serde::Deserialize;

/// Anonymous contributors come back without a login.
#[derive(Debug, Deserialize)]
pub struct Contributor {
    #[serde(rename = "login")]
    pub login: Option<String>,
}
