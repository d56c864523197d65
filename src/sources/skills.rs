/// Skills used both to build portal search queries and to filter postings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillSet {
    skills: Vec<String>,
}

impl SkillSet {
    /// Parse a comma separated list; entries are lowercased and trimmed, empty ones dropped.
    pub fn parse(raw: &str) -> Self {
        let skills = raw
            .to_lowercase()
            .split(',')
            .map(str::trim)
            .filter(|skill| !skill.is_empty())
            .map(str::to_owned)
            .collect();
        Self { skills }
    }

    /// Skills in configuration order.
    pub fn as_slice(&self) -> &[String] {
        &self.skills
    }

    /// Whether no skill is configured.
    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    /// Whether any skill occurs in `text`, case-insensitively.
    pub fn matches(&self, text: &str) -> bool {
        let haystack = text.to_lowercase();
        self.skills.iter().any(|skill| haystack.contains(skill.as_str()))
    }

    /// The first `count` skills joined with `separator`, as used in portal search queries.
    pub fn keywords(&self, count: usize, separator: &str) -> String {
        self.skills
            .iter()
            .take(count)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(separator)
    }
}
