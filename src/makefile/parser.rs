//! Makefile target and variable parsing.
//!
//! This is a line classifier, not a make implementation: nothing is
//! expanded or evaluated. Each physical line is one of
//!
//! - a recipe line (tab-indented, or space-indented while a rule is open),
//! - a target header (`name: deps`, `name:: deps`, `name: deps ; recipe`),
//! - a variable assignment (`=`, `:=`, `::=`, `+=`, `?=`, `!=`),
//! - a directive, comment or blank line, which is skipped.
//!
//! Lines ending in `\` continue whatever the previous line was.

use std::collections::BTreeSet;
use std::fmt;

/// Make directives that are neither targets nor assignments.
const DIRECTIVES: &[&str] = &[
    "include", "-include", "sinclude", "ifeq", "ifneq", "ifdef", "ifndef", "else", "endif",
    "unexport", "vpath", "undefine",
];

/// Assignment operator of a [`Variable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignOp {
    /// `=`, expanded on use.
    Recursive,
    /// `:=`, expanded once.
    Immediate,
    /// `+=`
    Append,
    /// `?=`, only if unset.
    Default,
    /// `!=`, the output of a shell command.
    Shell,
}

impl AssignOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssignOp::Recursive => "=",
            AssignOp::Immediate => ":=",
            AssignOp::Append => "+=",
            AssignOp::Default => "?=",
            AssignOp::Shell => "!=",
        }
    }
}

impl fmt::Display for AssignOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One line of a target's recipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeLine {
    /// 1-based source line.
    pub line: usize,
    /// Command text without the leading tab.
    pub text: String,
    /// Indented with spaces instead of a tab.
    pub space_indented: bool,
}

/// A rule: target name, prerequisites and recipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub name: String,
    pub dependencies: Vec<String>,
    pub recipe_lines: Vec<RecipeLine>,
    /// 1-based line of the header.
    pub line: usize,
    pub is_phony_declared: bool,
    /// Declared with `::`, which allows several independent recipes.
    pub double_colon: bool,
}

impl Target {
    fn open(name: &str, line: usize) -> Self {
        Self {
            name: name.to_string(),
            dependencies: Vec::new(),
            recipe_lines: Vec::new(),
            line,
            is_phony_declared: false,
            double_colon: false,
        }
    }

    /// Special targets such as `.PHONY` or `.DEFAULT`.
    pub fn is_special(&self) -> bool {
        self.name.starts_with('.')
    }

    /// Whether this is a `%` pattern rule.
    pub fn is_pattern(&self) -> bool {
        self.name.contains('%')
    }
}

/// A variable assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    pub name: String,
    pub value: String,
    pub line: usize,
    pub operator: AssignOp,
}

/// A parsed Makefile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Makefile {
    /// Targets in definition order.
    pub targets: Vec<Target>,
    /// Assignments in source order.
    pub variables: Vec<Variable>,
    /// Every name listed on a `.PHONY` line.
    pub phony: BTreeSet<String>,
    /// Raw physical lines, for layout rules.
    pub lines: Vec<String>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Last {
    Recipe,
    Variable,
    Header,
    Phony,
    Other,
}

/// Byte offset of the `:` that makes `line` a target header.
///
/// A `:` that starts `:=` or `::=`, or comes after an `=`, belongs to an
/// assignment.
pub(crate) fn header_colon(line: &str) -> Option<usize> {
    let colon = line.find(':')?;
    let rest = &line[colon..];
    if rest.starts_with(":=") || rest.starts_with("::=") {
        return None;
    }
    if line[..colon].contains('=') {
        return None;
    }
    Some(colon)
}

/// Earliest assignment operator in `line`, with its offset and length.
///
/// `::=` is the POSIX spelling of `:=`.
fn find_operator(line: &str) -> Option<(usize, usize, AssignOp)> {
    [
        ("::=", AssignOp::Immediate),
        (":=", AssignOp::Immediate),
        ("+=", AssignOp::Append),
        ("?=", AssignOp::Default),
        ("!=", AssignOp::Shell),
        ("=", AssignOp::Recursive),
    ]
    .into_iter()
    .filter_map(|(token, op)| line.find(token).map(|pos| (pos, token.len(), op)))
    .min_by_key(|(pos, _, _)| *pos)
}

fn strip_modifiers(line: &str) -> &str {
    let mut line = line;
    for prefix in ["export ", "override "] {
        if let Some(rest) = line.strip_prefix(prefix) {
            line = rest.trim_start();
        }
    }
    line
}

fn is_directive(trimmed: &str) -> bool {
    let word = trimmed.split_whitespace().next().unwrap_or("");
    DIRECTIVES.contains(&word) || trimmed == "export"
}

fn ends_with_continuation(line: &str) -> bool {
    line.trim_end().ends_with('\\')
}

fn without_continuation(text: &str) -> &str {
    let trimmed = text.trim();
    trimmed.strip_suffix('\\').unwrap_or(trimmed).trim_end()
}

impl Makefile {
    /// Parse Makefile text.
    ///
    /// # Example
    ///
    /// ```
    /// use infralint::makefile::{AssignOp, Makefile};
    ///
    /// let makefile = Makefile::parse("CC := gcc\n.PHONY: build\nbuild: main.o\n\t$(CC) -o app main.o\n");
    ///
    /// assert_eq!(makefile.variables[0].operator, AssignOp::Immediate);
    /// assert_eq!(makefile.targets[0].name, "build");
    /// assert_eq!(makefile.targets[0].dependencies, vec!["main.o"]);
    /// assert!(makefile.targets[0].is_phony_declared);
    /// ```
    pub fn parse(content: &str) -> Self {
        let mut makefile = Makefile {
            lines: content.lines().map(String::from).collect(),
            ..Default::default()
        };
        let mut open: Option<Target> = None;
        let mut last = Last::Other;
        let mut continued = false;
        let mut in_define = false;

        for (index, raw) in content.lines().enumerate() {
            let number = index + 1;
            let trimmed = raw.trim();

            if continued {
                continued = ends_with_continuation(raw);
                match last {
                    Last::Recipe => {
                        if let Some(target) = open.as_mut() {
                            target.recipe_lines.push(RecipeLine {
                                line: number,
                                text: trimmed.to_string(),
                                space_indented: false,
                            });
                        }
                    }
                    Last::Variable => {
                        if let Some(variable) = makefile.variables.last_mut() {
                            let more = without_continuation(raw);
                            if !more.is_empty() {
                                if !variable.value.is_empty() {
                                    variable.value.push(' ');
                                }
                                variable.value.push_str(more);
                            }
                        }
                    }
                    Last::Header => {
                        if let Some(target) = open.as_mut() {
                            target
                                .dependencies
                                .extend(without_continuation(raw).split_whitespace().map(String::from));
                        }
                    }
                    Last::Phony => {
                        makefile
                            .phony
                            .extend(without_continuation(raw).split_whitespace().map(String::from));
                    }
                    Last::Other => {}
                }
                continue;
            }

            if in_define {
                if trimmed == "endef" {
                    in_define = false;
                }
                continue;
            }

            if let Some(text) = raw.strip_prefix('\t') {
                if let Some(target) = open.as_mut() {
                    target.recipe_lines.push(RecipeLine {
                        line: number,
                        text: text.to_string(),
                        space_indented: false,
                    });
                    last = Last::Recipe;
                    continued = ends_with_continuation(raw);
                }
                continue;
            }

            if trimmed.is_empty() || trimmed.starts_with('#') || is_directive(trimmed) {
                continue;
            }

            if raw.starts_with(' ') {
                if let Some(target) = open.as_mut() {
                    target.recipe_lines.push(RecipeLine {
                        line: number,
                        text: trimmed.to_string(),
                        space_indented: true,
                    });
                    last = Last::Recipe;
                    continued = ends_with_continuation(raw);
                    continue;
                }
            }

            let statement = strip_modifiers(trimmed);

            if let Some(name) = statement.strip_prefix("define ") {
                let name = name.split_whitespace().next().unwrap_or("");
                if !name.is_empty() {
                    makefile.variables.push(Variable {
                        name: name.to_string(),
                        value: String::new(),
                        line: number,
                        operator: AssignOp::Recursive,
                    });
                }
                in_define = true;
                continue;
            }

            if let Some(colon) = header_colon(statement) {
                if let Some(done) = open.take() {
                    makefile.targets.push(done);
                }

                let name = statement[..colon].trim();
                let rest = &statement[colon + 1..];
                let double_colon = rest.starts_with(':');
                let rest = rest.strip_prefix(':').unwrap_or(rest);
                let (deps, inline) = match rest.split_once(';') {
                    Some((deps, recipe)) => (deps, Some(recipe.trim())),
                    None => (rest, None),
                };
                let deps = without_continuation(deps);

                if name == ".PHONY" {
                    makefile
                        .phony
                        .extend(deps.split_whitespace().map(String::from));
                    last = Last::Phony;
                } else {
                    let mut target = Target::open(name, number);
                    target.double_colon = double_colon;
                    target.dependencies = deps.split_whitespace().map(String::from).collect();
                    if let Some(recipe) = inline.filter(|r| !r.is_empty()) {
                        target.recipe_lines.push(RecipeLine {
                            line: number,
                            text: recipe.to_string(),
                            space_indented: false,
                        });
                    }
                    open = Some(target);
                    last = Last::Header;
                }
                continued = ends_with_continuation(raw);
                continue;
            }

            if let Some((pos, len, operator)) = find_operator(statement) {
                let name = statement[..pos].trim();
                if !name.is_empty() {
                    if let Some(done) = open.take() {
                        makefile.targets.push(done);
                    }
                    let value = &statement[pos + len..];
                    makefile.variables.push(Variable {
                        name: name.to_string(),
                        value: without_continuation(value).to_string(),
                        line: number,
                        operator,
                    });
                    last = Last::Variable;
                    continued = ends_with_continuation(raw);
                }
            }
        }

        if let Some(done) = open.take() {
            makefile.targets.push(done);
        }

        for target in &mut makefile.targets {
            target.is_phony_declared = makefile.phony.contains(&target.name);
        }

        makefile
    }

    /// The last assignment to `name`, if any.
    pub fn variable(&self, name: &str) -> Option<&Variable> {
        self.variables.iter().rev().find(|v| v.name == name)
    }

    /// Whether a target with this name is defined.
    pub fn has_target(&self, name: &str) -> bool {
        self.targets.iter().any(|t| t.name == name)
    }
}
