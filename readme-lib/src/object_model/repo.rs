use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Repo {
    #[serde(rename = "name")]
    pub name: String,

    #[serde(rename = "full_name")]
    pub full_name: String,

    #[serde(rename = "description")]
    pub description: Option<String>,

    #[serde(rename = "stargazers_count")]
    pub stargazers_count: u64,

    #[serde(rename = "forks_count")]
    pub forks_count: u64,

    #[serde(rename = "license")]
    pub license: Option<License>,

    #[serde(rename = "html_url")]
    pub html_url: String,

    #[serde(rename = "created_at")]
    pub created_at: String,

    #[serde(rename = "updated_at")]
    pub updated_at: String,

    #[serde(rename = "default_branch")]
    pub default_branch: Option<String>,

    #[serde(rename = "owner")]
    pub owner: Owner,
}

#[derive(Debug, Deserialize)]
pub struct Owner {
    #[serde(rename = "login")]
    pub login: String,
}

#[derive(Debug, Deserialize)]
pub struct License {
    #[serde(rename = "name")]
    pub name: String,
}
