//! Raw line metrics, reported alongside complexity when requested.
//!
//! Physical-line accounting is a text scan with just enough string-literal
//! awareness to keep `#` inside strings from counting as a comment and to
//! attribute docstring lines to `multi`. Logical lines come from the
//! parsed module, so they are exact.

use rustpython_parser::ast;
use serde::{Deserialize, Serialize};

/// Line accounting for one file.
///
/// Every physical line lands in exactly one of `sloc`, `blank`,
/// `single_comments`, or `multi`, so `loc` is always their sum.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawMetrics {
    /// Total physical lines.
    pub loc: usize,
    /// Lines containing code.
    pub sloc: usize,
    /// Logical lines: statements in the parsed module, counted recursively.
    pub lloc: usize,
    /// Lines carrying a `#` comment, trailing comments included.
    pub comments: usize,
    /// Lines that are only a `#` comment.
    pub single_comments: usize,
    /// Lines spanned by triple-quoted strings.
    pub multi: usize,
    /// Whitespace-only lines.
    pub blank: usize,
}

impl RawMetrics {
    pub fn analyze(source: &str, module: &ast::Mod) -> Self {
        let mut metrics = scan_lines(source);
        metrics.lloc = logical_lines(module);
        metrics
    }
}

fn scan_lines(source: &str) -> RawMetrics {
    let mut metrics = RawMetrics::default();
    // Delimiter of a triple-quoted string left open on a previous line.
    let mut open_delim: Option<&'static str> = None;

    for line in source.lines() {
        metrics.loc += 1;

        let started_in_string = open_delim.is_some();
        let mut has_code = false;
        let mut has_comment = false;
        let mut has_string_open = started_in_string;

        let bytes = line.as_bytes();
        let mut i = 0;
        while i < bytes.len() {
            if let Some(delim) = open_delim {
                match line[i..].find(delim) {
                    Some(pos) => {
                        open_delim = None;
                        i += pos + delim.len();
                    }
                    None => break,
                }
                continue;
            }
            match bytes[i] {
                b'#' => {
                    has_comment = true;
                    break;
                }
                quote @ (b'"' | b'\'') => {
                    let triple: &'static str = if quote == b'"' { "\"\"\"" } else { "'''" };
                    if line[i..].starts_with(triple) {
                        has_string_open = true;
                        match line[i + 3..].find(triple) {
                            Some(pos) => i += 3 + pos + 3,
                            None => {
                                open_delim = Some(triple);
                                i = bytes.len();
                            }
                        }
                    } else {
                        has_code = true;
                        i += 1;
                        while i < bytes.len() {
                            if bytes[i] == b'\\' {
                                i += 2;
                            } else if bytes[i] == quote {
                                i += 1;
                                break;
                            } else {
                                i += 1;
                            }
                        }
                    }
                }
                b' ' | b'\t' => i += 1,
                _ => {
                    has_code = true;
                    i += 1;
                }
            }
        }

        if !started_in_string && line.trim().is_empty() {
            metrics.blank += 1;
        } else if started_in_string || (has_string_open && !has_code) {
            metrics.multi += 1;
        } else if has_comment && !has_code {
            metrics.single_comments += 1;
            metrics.comments += 1;
        } else {
            metrics.sloc += 1;
            if has_comment {
                metrics.comments += 1;
            }
        }
    }

    metrics
}

fn logical_lines(module: &ast::Mod) -> usize {
    match module {
        ast::Mod::Module(module) => count_body(&module.body),
        _ => 0,
    }
}

fn count_body(body: &[ast::Stmt]) -> usize {
    body.iter().map(count_stmt).sum()
}

fn count_stmt(stmt: &ast::Stmt) -> usize {
    1 + match stmt {
        ast::Stmt::FunctionDef(s) => count_body(&s.body),
        ast::Stmt::AsyncFunctionDef(s) => count_body(&s.body),
        ast::Stmt::ClassDef(s) => count_body(&s.body),
        ast::Stmt::If(s) => count_body(&s.body) + count_body(&s.orelse),
        ast::Stmt::While(s) => count_body(&s.body) + count_body(&s.orelse),
        ast::Stmt::For(s) => count_body(&s.body) + count_body(&s.orelse),
        ast::Stmt::AsyncFor(s) => count_body(&s.body) + count_body(&s.orelse),
        ast::Stmt::With(s) => count_body(&s.body),
        ast::Stmt::AsyncWith(s) => count_body(&s.body),
        ast::Stmt::Try(s) => {
            count_body(&s.body)
                + s.handlers
                    .iter()
                    .map(|handler| match handler {
                        ast::ExceptHandler::ExceptHandler(h) => count_body(&h.body),
                    })
                    .sum::<usize>()
                + count_body(&s.orelse)
                + count_body(&s.finalbody)
        }
        ast::Stmt::TryStar(s) => {
            count_body(&s.body)
                + s.handlers
                    .iter()
                    .map(|handler| match handler {
                        ast::ExceptHandler::ExceptHandler(h) => count_body(&h.body),
                    })
                    .sum::<usize>()
                + count_body(&s.orelse)
                + count_body(&s.finalbody)
        }
        ast::Stmt::Match(s) => s.cases.iter().map(|case| count_body(&case.body)).sum(),
        _ => 0,
    }
}
