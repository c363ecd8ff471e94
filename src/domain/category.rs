use crate::domain::Commit;
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// Release-note category of a commit, keyed by its conventional-commit prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Feat,
    Fix,
    Perf,
    Refactor,
    Docs,
    Other,
}

impl Category {
    /// Every category, in matching priority order.
    pub const ALL: [Category; 6] = [
        Category::Feat,
        Category::Fix,
        Category::Perf,
        Category::Refactor,
        Category::Docs,
        Category::Other,
    ];

    /// Categories that appear in release notes, in section order.
    pub const RENDERED: [Category; 4] = [
        Category::Feat,
        Category::Fix,
        Category::Perf,
        Category::Refactor,
    ];

    /// The literal prefix that selects this category. `Other` has none.
    pub fn prefix(&self) -> Option<&'static str> {
        match self {
            Category::Feat => Some("feat"),
            Category::Fix => Some("fix"),
            Category::Perf => Some("perf"),
            Category::Refactor => Some("refactor"),
            Category::Docs => Some("docs"),
            Category::Other => None,
        }
    }

    pub fn key(&self) -> &'static str {
        self.prefix().unwrap_or("other")
    }

    /// Section heading used in release notes
    pub fn title(&self) -> &'static str {
        match self {
            Category::Feat => "✨ New Features",
            Category::Fix => "🐛 Bug Fixes",
            Category::Perf => "⚡ Performance",
            Category::Refactor => "🔧 Internal Changes",
            Category::Docs => "📝 Documentation",
            Category::Other => "Other Changes",
        }
    }

    /// Categorize a commit subject.
    ///
    /// Plain case-sensitive `starts_with` in priority order, so `featuring` is a
    /// feature and `feat: perf tweaks` is a feature rather than a perf change.
    pub fn of(message: &str) -> Category {
        Category::ALL
            .into_iter()
            .find(|category| {
                category
                    .prefix()
                    .is_some_and(|prefix| message.starts_with(prefix))
            })
            .unwrap_or(Category::Other)
    }

    /// Strip `prefix` plus any following colons/whitespace from the start of `message`.
    ///
    /// Messages that do not start with the prefix are returned unchanged.
    pub fn clean_message(&self, message: &str) -> String {
        match self.prefix_regex() {
            Some(re) => re.replace(message, "").into_owned(),
            None => message.to_string(),
        }
    }

    /// `^{prefix}[:\s]*`, compiled once per category
    fn prefix_regex(&self) -> Option<&'static Regex> {
        static RES: OnceLock<Vec<(Category, Regex)>> = OnceLock::new();
        RES.get_or_init(|| {
            Category::ALL
                .into_iter()
                .filter_map(|category| {
                    let prefix = category.prefix()?;
                    let re = Regex::new(&format!(r"^{}[:\s]*", regex::escape(prefix)))
                        .expect("escaped prefix is a valid regex");
                    Some((category, re))
                })
                .collect()
        })
        .iter()
        .find(|(category, _)| category == self)
        .map(|(_, re)| re)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Commit messages partitioned by category
///
/// Every category is always present; messages keep the order they were added in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryBuckets {
    buckets: [Vec<String>; 6],
}

impl CategoryBuckets {
    pub fn new() -> Self {
        Self::default()
    }

    fn index(category: Category) -> usize {
        Category::ALL
            .iter()
            .position(|c| *c == category)
            .unwrap_or(Category::ALL.len() - 1)
    }

    pub fn push(&mut self, category: Category, message: impl Into<String>) {
        self.buckets[Self::index(category)].push(message.into());
    }

    pub fn get(&self, category: Category) -> &[String] {
        &self.buckets[Self::index(category)]
    }

    /// Total number of messages across all buckets
    pub fn len(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate `(category, messages)` in priority order, including empty buckets.
    pub fn iter(&self) -> impl Iterator<Item = (Category, &[String])> {
        Category::ALL
            .into_iter()
            .map(move |category| (category, self.get(category)))
    }
}

/// Partition commits into category buckets.
pub fn categorize(commits: &[Commit]) -> CategoryBuckets {
    let mut buckets = CategoryBuckets::new();
    for commit in commits {
        buckets.push(Category::of(&commit.message), commit.message.clone());
    }
    buckets
}
