use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct Topics {
    #[serde(rename = "names", default)]
    pub names: Vec<String>,
}
