use std::collections::BTreeSet;

const SEPARATOR: char = '/';

/// Collapses a recursive tree listing into its sorted, deduplicated top level.
/// Directories carry a trailing `/`. Recursive listings also contain the
/// directory entry itself, so a top-level `src` yields both `src` and `src/`.
pub fn summarize_structure<I, S>(paths: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    paths
        .into_iter()
        .map(|path| match path.as_ref().split_once(SEPARATOR) {
            None => String::from(path.as_ref()),
            Some((first, _)) => format!("{first}{SEPARATOR}"),
        })
        .filter(|entry| !entry.is_empty() && entry.as_str() != "/")
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
