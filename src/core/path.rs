use std::fmt;

/// Ordered sequence of branch keys from the root. The sole addressing
/// mechanism for reads, writes, and expansion state; two structurally
/// distinct nodes at the same path are deliberately the same address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct TreePath {
    keys: Vec<String>,
}

impl TreePath {
    pub fn new(keys: Vec<String>) -> Self {
        Self { keys }
    }

    pub fn root() -> Self {
        Self::default()
    }

    pub fn from_keys<I>(keys: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self::new(keys.into_iter().map(Into::into).collect())
    }

    pub fn is_root(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn keys(&self) -> &[String] {
        self.keys.as_slice()
    }

    pub fn push(&mut self, key: impl Into<String>) {
        self.keys.push(key.into());
    }

    /// New path extended by one key; the walk helper used everywhere the
    /// renderer recurses.
    pub fn child(&self, key: impl Into<String>) -> Self {
        let mut keys = self.keys.clone();
        keys.push(key.into());
        Self { keys }
    }

    pub fn parent(&self) -> Option<Self> {
        if self.keys.is_empty() {
            return None;
        }
        Some(Self {
            keys: self.keys[..self.keys.len() - 1].to_vec(),
        })
    }

    pub fn leaf_key(&self) -> Option<&str> {
        self.keys.last().map(String::as_str)
    }

    pub fn starts_with(&self, prefix: &TreePath) -> bool {
        self.keys.len() >= prefix.keys.len() && self.keys[..prefix.keys.len()] == prefix.keys[..]
    }

    /// Suffix after `prefix`, when `self` lies under it.
    pub fn strip_prefix(&self, prefix: &TreePath) -> Option<Self> {
        if !self.starts_with(prefix) {
            return None;
        }
        Some(Self {
            keys: self.keys[prefix.keys.len()..].to_vec(),
        })
    }

    pub fn join(&self, suffix: &TreePath) -> Self {
        let mut keys = self.keys.clone();
        keys.extend(suffix.keys.iter().cloned());
        Self { keys }
    }

    /// The string form used as the set/map key for expansion state. Identical
    /// to `Display` and round-trips through [`TreePath::parse`].
    pub fn storage_key(&self) -> String {
        self.to_string()
    }

    pub fn parse(input: &str) -> Result<Self, TreePathParseError> {
        let raw = input.trim();
        if raw.is_empty() {
            return Ok(Self::root());
        }

        let chars: Vec<char> = raw.chars().collect();
        let mut idx = 0usize;
        let mut keys = Vec::new();

        while idx < chars.len() {
            let ch = chars[idx];
            if ch == '.' {
                if keys.is_empty() {
                    return Err(TreePathParseError::new("path cannot start with '.'"));
                }
                idx += 1;
                keys.push(parse_bare_key(&chars, &mut idx)?);
                continue;
            }
            if ch == '[' {
                keys.push(parse_quoted_key(&chars, &mut idx)?);
                continue;
            }
            if keys.is_empty() {
                keys.push(parse_bare_key(&chars, &mut idx)?);
                continue;
            }
            return Err(TreePathParseError::new(format!(
                "unexpected character '{ch}' at position {idx}"
            )));
        }

        Ok(Self::new(keys))
    }
}

impl fmt::Display for TreePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, key) in self.keys.iter().enumerate() {
            if is_identifier(key) {
                if idx > 0 {
                    f.write_str(".")?;
                }
                f.write_str(key)?;
            } else {
                f.write_str("[\"")?;
                f.write_str(key.replace('\\', "\\\\").replace('"', "\\\"").as_str())?;
                f.write_str("\"]")?;
            }
        }
        Ok(())
    }
}

impl From<&str> for TreePath {
    fn from(value: &str) -> Self {
        Self::from_keys([value])
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreePathParseError {
    message: String,
}

impl TreePathParseError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for TreePathParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message.as_str())
    }
}

impl std::error::Error for TreePathParseError {}

fn parse_bare_key(chars: &[char], idx: &mut usize) -> Result<String, TreePathParseError> {
    let start = *idx;
    while *idx < chars.len() {
        let ch = chars[*idx];
        if ch == '.' || ch == '[' || ch == ']' {
            break;
        }
        *idx += 1;
    }
    if *idx == start {
        return Err(TreePathParseError::new(format!(
            "expected key at position {start}"
        )));
    }
    Ok(chars[start..*idx].iter().collect())
}

fn parse_quoted_key(chars: &[char], idx: &mut usize) -> Result<String, TreePathParseError> {
    // Caller guarantees chars[*idx] == '['.
    *idx += 1;
    if chars.get(*idx).copied() != Some('"') {
        return Err(TreePathParseError::new("expected '\"' after '['"));
    }
    *idx += 1;

    let mut key = String::new();
    let mut closed = false;
    while *idx < chars.len() {
        let ch = chars[*idx];
        *idx += 1;
        if ch == '\\' {
            let Some(next) = chars.get(*idx).copied() else {
                return Err(TreePathParseError::new("unterminated escape in quoted key"));
            };
            key.push(next);
            *idx += 1;
            continue;
        }
        if ch == '"' {
            closed = true;
            break;
        }
        key.push(ch);
    }
    if !closed {
        return Err(TreePathParseError::new("unterminated quoted key"));
    }
    if chars.get(*idx).copied() != Some(']') {
        return Err(TreePathParseError::new("expected closing ']'"));
    }
    *idx += 1;
    Ok(key)
}

fn is_identifier(input: &str) -> bool {
    let mut chars = input.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !(first.is_ascii_alphabetic() || first == '_') {
        return false;
    }
    chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
}

#[cfg(test)]
mod tests {
    use super::TreePath;

    #[test]
    fn display_joins_identifier_keys_with_dots() {
        let path = TreePath::from_keys(["skill", "hardSkills"]);
        assert_eq!(path.to_string(), "skill.hardSkills");
    }

    #[test]
    fn non_identifier_keys_are_bracket_quoted() {
        let path = TreePath::from_keys(["skill", "Data & AI"]);
        assert_eq!(path.to_string(), "skill[\"Data & AI\"]");
    }

    #[test]
    fn parse_round_trips_display() {
        for keys in [
            vec!["options"],
            vec!["skill", "hardSkills"],
            vec!["skill", "Data & AI", "ml.ops"],
            vec!["a\"b", "c\\d"],
        ] {
            let path = TreePath::from_keys(keys);
            let parsed = TreePath::parse(&path.to_string()).expect("round trip");
            assert_eq!(parsed, path);
        }
    }

    #[test]
    fn empty_string_parses_to_root() {
        assert_eq!(TreePath::parse("").unwrap(), TreePath::root());
        assert!(TreePath::parse("").unwrap().is_root());
    }

    #[test]
    fn parent_and_leaf_key() {
        let path = TreePath::from_keys(["skill", "hardSkills"]);
        assert_eq!(path.leaf_key(), Some("hardSkills"));
        assert_eq!(path.parent(), Some(TreePath::from("skill")));
        assert_eq!(TreePath::root().parent(), None);
    }

    #[test]
    fn prefix_checks() {
        let path = TreePath::from_keys(["a", "b", "c"]);
        let prefix = TreePath::from_keys(["a", "b"]);
        assert!(path.starts_with(&prefix));
        assert!(!prefix.starts_with(&path));
        assert_eq!(
            path.strip_prefix(&prefix),
            Some(TreePath::from("c"))
        );
        assert_eq!(prefix.join(&TreePath::from("c")), path);
    }
}
