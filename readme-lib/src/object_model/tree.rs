use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Tree {
    #[serde(rename = "tree", default)]
    pub tree: Vec<TreeEntry>,

    #[serde(rename = "truncated", default)]
    pub truncated: bool,
}

#[derive(Debug, Deserialize)]
pub struct TreeEntry {
    #[serde(rename = "path")]
    pub path: String,
}
