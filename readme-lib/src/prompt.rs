use crate::error::ReadmeError;
use crate::language_breakdown::LanguageBreakdown;
use crate::metadata::RepositoryMetadata;
use crate::result::ReadmeResult;
use anyhow::anyhow;
use serde::Serialize;

const PREAMBLE: &str = "\
You are a README.md generator. Produce a professional README using ONLY the JSON below.
Never invent data. If something is missing, omit that bullet/section. No badges, no contributors. \
Always include a Description section when description is available; if not, infer a one-sentence \
description from existingReadme/topics.";

const DERIVATION_RULES: &str = "\
DERIVATION RULES (be precise, descriptive):
- Description: 1–3 sentences based on description and (optionally) existingReadme/topics.
- Features: derive concrete features from topics, description and existingReadme; prefer 4-8 strong bullets.
- Tech Stack: include frameworks/tools inferred from topics/README (e.g., Next.js, Tailwind CSS, MongoDB), \
then list top languages with percentages from languagesBreakdown. Separate framework/tool bullets from languages.
- Installation Guide: provide a realistic flow for JS/TS/Next.js repos (clone, install, env setup with \
example keys if implied, dev, build/start). Mention env keys only if implied by topics/README (e.g., MongoDB, Cloudinary).
- Structure: use projectStructure to list notable top-level folders/files; for typical Next.js repos, \
suggest likely subfolders (pages/app, components, lib, public) as \"Likely\" when not certain.
- License: include only if present.";

const OUTPUT_FORMAT: &str = "\
OUTPUT FORMAT (strict):

# Title

{name}

## Description
{1–3 sentences summary}

## Features
- {feature 1}
- {feature 2}
- {feature 3}
- {feature 4}

## Tech Stack

- {framework/tool 1}
- {framework/tool 2}
- {framework/tool 3}

Languages
- {TopLang1} — {pct1}%
- {TopLang2} — {pct2}%
- {TopLang3} — {pct3}%

## Installation Guide

1. Clone the repository
~~~bash
git clone {url}
cd {name}
~~~
2. Install dependencies
~~~bash
npm install
# or
yarn install
~~~
3. Configure environment variables (if applicable)
- e.g., MongoDB connection string
- e.g., Cloudinary credentials (cloud name, API key/secret)

4. Run the development server
~~~bash
npm run dev
# or
yarn dev
~~~

5. Build for production
~~~bash
npm run build && npm run start
~~~

## Structure (Based on File Tree)

Top-level items:
{bullet list from projectStructure (max 15)}

Likely src/ layout (when applicable):
- pages/ or app/
- components/
- lib/ or utils/
- public/

## License
{license}
";

/// The subset of repository metadata shown to the text generator.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptData<'a> {
    pub name: &'a str,
    pub full_name: &'a str,
    pub description: &'a str,
    pub stars: u64,
    pub forks: u64,
    pub license: &'a str,
    pub topics: &'a [String],
    pub url: &'a str,
    pub languages: &'a [String],
    pub languages_breakdown: &'a LanguageBreakdown,
    pub contributors: &'a [String],
    pub existing_readme: &'a str,
    pub created_at: &'a str,
    pub updated_at: &'a str,
    pub default_branch: &'a str,
    pub project_structure: &'a [String],
}

impl<'a> PromptData<'a> {
    pub fn new(metadata: &'a RepositoryMetadata) -> Self {
        Self {
            name: &metadata.name,
            full_name: &metadata.full_name,
            description: metadata.description_or_default(),
            stars: metadata.stars,
            forks: metadata.forks,
            license: metadata.license_or_default(),
            topics: &metadata.topics,
            url: &metadata.html_url,
            languages: &metadata.languages,
            languages_breakdown: &metadata.languages_breakdown,
            contributors: &metadata.contributors,
            existing_readme: &metadata.readme,
            created_at: &metadata.created_at,
            updated_at: &metadata.updated_at,
            default_branch: &metadata.default_branch,
            project_structure: &metadata.project_structure,
        }
    }
}

pub fn build_prompt(metadata: &RepositoryMetadata) -> ReadmeResult<String> {
    render_prompt(&PromptData::new(metadata))
}

pub fn render_prompt(data: &PromptData<'_>) -> ReadmeResult<String> {
    let json = serde_json::to_string_pretty(data).map_err(|e| ReadmeError::Other(anyhow!(e)))?;
    Ok(format!(
        "{PREAMBLE}\n\nPROJECT DATA (JSON):\n{json}\n\n{DERIVATION_RULES}\n\n{OUTPUT_FORMAT}"
    ))
}
