//! Dockerfile instruction parsing.
//!
//! Turns raw Dockerfile text into an ordered list of [`Instruction`]s. The
//! parser never fails: lines it cannot make sense of are dropped and the
//! structural rules report the consequences.

/// One logical Dockerfile instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    /// Upper-cased verb (`FROM`, `RUN`, ...).
    pub command: String,
    /// The verb as written in the source.
    pub keyword: String,
    /// Everything after the first whitespace following the verb, verbatim.
    /// Continuation lines are trimmed and joined with a single space.
    pub args: String,
    /// 1-based line of the first physical line.
    pub line: usize,
    /// The original physical lines, newline-joined.
    pub raw: String,
}

impl Instruction {
    /// Whether this instruction has the given (upper-case) verb.
    pub fn is(&self, command: &str) -> bool {
        self.command == command
    }

    /// Whitespace-separated argument tokens.
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.args.split_whitespace()
    }

    /// Whether a `--name` or `--name=value` flag is present.
    pub fn has_flag(&self, name: &str) -> bool {
        self.tokens()
            .take_while(|t| t.starts_with("--"))
            .any(|t| t == name || t.starts_with(&format!("{}=", name)))
    }
}

/// A parsed Dockerfile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dockerfile {
    /// Instructions in file order.
    pub instructions: Vec<Instruction>,
}

impl Dockerfile {
    /// Parse Dockerfile text.
    ///
    /// # Example
    ///
    /// ```
    /// use infralint::dockerfile::Dockerfile;
    ///
    /// let dockerfile = Dockerfile::parse("FROM alpine:3.19\n\nRUN apk add \\\n    curl\n");
    ///
    /// assert_eq!(dockerfile.instructions.len(), 2);
    /// assert_eq!(dockerfile.instructions[1].args, "apk add curl");
    /// assert_eq!(dockerfile.instructions[1].line, 3);
    /// ```
    pub fn parse(content: &str) -> Self {
        let mut instructions = Vec::new();
        let mut pending: Option<Pending> = None;

        for (index, line) in content.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let (body, continues) = match trimmed.strip_suffix('\\') {
                Some(body) => (body.trim_end(), true),
                None => (trimmed, false),
            };

            let current = pending.get_or_insert_with(|| Pending::start(index + 1));
            current.push(body, line);

            if !continues {
                if let Some(done) = pending.take().and_then(Pending::finish) {
                    instructions.push(done);
                }
            }
        }

        if let Some(done) = pending.and_then(Pending::finish) {
            instructions.push(done);
        }

        Self { instructions }
    }

    /// Instructions with the given verb.
    pub fn find<'a>(&'a self, command: &'a str) -> impl Iterator<Item = &'a Instruction> + 'a {
        self.instructions.iter().filter(move |i| i.is(command))
    }

    /// Whether any instruction has the given verb.
    pub fn has(&self, command: &str) -> bool {
        self.instructions.iter().any(|i| i.is(command))
    }

    /// Instructions of the last build stage (from the final `FROM` on).
    pub fn final_stage(&self) -> &[Instruction] {
        match self.instructions.iter().rposition(|i| i.is("FROM")) {
            Some(start) => &self.instructions[start..],
            None => &self.instructions,
        }
    }
}

struct Pending {
    line: usize,
    parts: Vec<String>,
    raw: Vec<String>,
}

impl Pending {
    fn start(line: usize) -> Self {
        Self {
            line,
            parts: Vec::new(),
            raw: Vec::new(),
        }
    }

    fn push(&mut self, body: &str, raw: &str) {
        if !body.is_empty() {
            self.parts.push(body.to_string());
        }
        self.raw.push(raw.to_string());
    }

    fn finish(self) -> Option<Instruction> {
        let joined = self.parts.join(" ");
        let mut split = joined.splitn(2, char::is_whitespace);
        let keyword = split.next().filter(|k| !k.is_empty())?.to_string();
        let args = split.next().unwrap_or("").to_string();

        Some(Instruction {
            command: keyword.to_uppercase(),
            keyword,
            args,
            line: self.line,
            raw: self.raw.join("\n"),
        })
    }
}
