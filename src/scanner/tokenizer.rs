// src/scanner/tokenizer.rs
//
// Splits nginx-style config text into `name arg arg ...;` statements.
// Block headers (`server {`, `location / {`) are dropped; the directives
// inside a block are returned in file order like any other statement.

use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    pub name: String,
    pub args: Vec<String>,
    /// 1-based line of the directive name.
    pub line: usize,
}

impl Directive {
    /// Everything between the directive name and its `;`, single-space separated.
    pub fn value(&self) -> String {
        self.args.join(" ")
    }

    pub fn has_arg(&self, arg: &str) -> bool {
        self.args.iter().any(|a| a == arg)
    }
}

#[derive(Default)]
struct Statement {
    words: Vec<String>,
    line: usize,
}

impl Statement {
    fn push(&mut self, word: String, line: usize) {
        if self.words.is_empty() {
            self.line = line;
        }
        self.words.push(word);
    }

    fn finish(&mut self) -> Option<Directive> {
        let mut words = std::mem::take(&mut self.words).into_iter();
        let name = words.next()?;
        Some(Directive {
            name,
            args: words.collect(),
            line: self.line,
        })
    }

    fn discard(&mut self, reason: &str) {
        if let Some(name) = self.words.first() {
            debug!(directive = %name, line = self.line, "Dropping {}", reason);
        }
        self.words.clear();
    }
}

pub fn tokenize(input: &str) -> Vec<Directive> {
    let mut directives = Vec::new();
    let mut statement = Statement::default();
    let mut word = String::new();
    // Set for quoted tokens so that `""` still yields an (empty) argument.
    let mut in_word = false;
    let mut word_line = 1;
    let mut line = 1;

    let mut chars = input.chars().peekable();

    macro_rules! flush_word {
        () => {
            if in_word || !word.is_empty() {
                statement.push(std::mem::take(&mut word), word_line);
                in_word = false;
            }
        };
    }

    while let Some(c) = chars.next() {
        match c {
            '\n' => {
                flush_word!();
                line += 1;
            }
            c if c.is_whitespace() => flush_word!(),
            ';' => {
                flush_word!();
                if let Some(directive) = statement.finish() {
                    directives.push(directive);
                }
            }
            // `${var}` and a `}` inside a word are part of the word.
            '{' if word.ends_with('$') => word.push(c),
            '}' if !word.is_empty() => word.push(c),
            '{' => {
                flush_word!();
                statement.discard("block header");
            }
            '}' => {
                flush_word!();
                statement.discard("unterminated statement before block end");
            }
            '#' if word.is_empty() && !in_word => {
                // Comment runs to end of line; the newline itself is handled above.
                while let Some(&next) = chars.peek() {
                    if next == '\n' {
                        break;
                    }
                    chars.next();
                }
            }
            '"' | '\'' if word.is_empty() && !in_word => {
                word_line = line;
                in_word = true;
                while let Some(next) = chars.next() {
                    match next {
                        q if q == c => break,
                        '\\' => {
                            if let Some(escaped) = chars.next() {
                                if escaped == '\n' {
                                    line += 1;
                                }
                                word.push(escaped);
                            }
                        }
                        '\n' => {
                            line += 1;
                            word.push(next);
                        }
                        _ => word.push(next),
                    }
                }
            }
            _ => {
                if word.is_empty() {
                    word_line = line;
                }
                word.push(c);
            }
        }
    }

    flush_word!();
    statement.discard("statement without terminator at end of file");

    directives
}
