//! `.env` file parsing.
//!
//! Lines are read in the `KEY=value` format. The split point is the first
//! `=`; there is no continuation and no variable expansion. Unlike a
//! loader, the parser keeps every line it cannot read as a
//! [`EnvLineKind::Malformed`] entry so the format rule can report it.

/// What a non-blank, non-comment line contains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvLineKind {
    /// `KEY=value`, with the value exactly as written (quotes kept).
    Assignment { key: String, raw_value: String },
    /// A line without `=`, or with nothing before it.
    Malformed { text: String },
}

/// One significant line of an env file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvLine {
    /// 1-based source line.
    pub line: usize,
    pub kind: EnvLineKind,
}

/// A single assignment, borrowed from an [`EnvFile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assignment<'a> {
    pub line: usize,
    pub key: &'a str,
    /// Value as written, quotes included.
    pub raw_value: &'a str,
}

impl Assignment<'_> {
    /// The value with one pair of surrounding quotes removed.
    pub fn value(&self) -> &str {
        unquote(self.raw_value)
    }

    /// Whether the value is wrapped in matching quotes.
    pub fn is_quoted(&self) -> bool {
        unquote(self.raw_value).len() != self.raw_value.len()
    }
}

/// Parsed env file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvFile {
    pub entries: Vec<EnvLine>,
}

impl EnvFile {
    /// Parse env file content.
    ///
    /// # Supported Formats
    ///
    /// - Simple: `KEY=value`
    /// - Quoted: `KEY="value with spaces"` or `KEY='single quoted'`
    /// - Empty: `KEY=`
    /// - Exported: `export KEY=value`
    /// - Whitespace around equals: `KEY = value`
    /// - Values with equals signs: `URL=https://example.com?foo=bar`
    ///
    /// # Example
    ///
    /// ```
    /// use infralint::envfile::EnvFile;
    ///
    /// let env = EnvFile::parse("# Database config\nDATABASE_URL=postgres://localhost/db\nDEBUG=\"true\"\noops\n");
    ///
    /// let assignments: Vec<_> = env.assignments().collect();
    /// assert_eq!(assignments.len(), 2);
    /// assert_eq!(assignments[0].key, "DATABASE_URL");
    /// assert_eq!(assignments[1].value(), "true");
    /// assert_eq!(env.entries.len(), 3);
    /// ```
    pub fn parse(content: &str) -> Self {
        let mut entries = Vec::new();

        for (index, raw) in content.lines().enumerate() {
            let line = raw.trim();

            // Skip empty lines and comments
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let statement = line.strip_prefix("export ").map_or(line, str::trim_start);
            let kind = match statement.split_once('=') {
                Some((key, value)) if !key.trim().is_empty() => EnvLineKind::Assignment {
                    key: key.trim().to_string(),
                    raw_value: value.trim().to_string(),
                },
                _ => EnvLineKind::Malformed {
                    text: line.to_string(),
                },
            };

            entries.push(EnvLine {
                line: index + 1,
                kind,
            });
        }

        Self { entries }
    }

    /// Assignments in file order.
    pub fn assignments(&self) -> impl Iterator<Item = Assignment<'_>> {
        self.entries.iter().filter_map(|entry| match &entry.kind {
            EnvLineKind::Assignment { key, raw_value } => Some(Assignment {
                line: entry.line,
                key,
                raw_value,
            }),
            EnvLineKind::Malformed { .. } => None,
        })
    }

    /// Whether any assignment uses `key`.
    pub fn has_key(&self, key: &str) -> bool {
        self.assignments().any(|a| a.key == key)
    }

    /// Whether the file holds no significant lines.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Remove surrounding quotes from a value.
pub fn unquote(value: &str) -> &str {
    if value.len() >= 2
        && ((value.starts_with('"') && value.ends_with('"'))
            || (value.starts_with('\'') && value.ends_with('\'')))
    {
        &value[1..value.len() - 1]
    } else {
        value
    }
}
