mod contributor;
mod languages;
mod repo;
mod topics;
mod tree;

pub use self::contributor::Contributor;
pub use self::languages::LanguageBytes;
pub use self::repo::Repo;
pub use self::topics::Topics;
pub use self::tree::Tree;
