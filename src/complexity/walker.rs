//! Pre-order traversal of a parsed module, yielding analysis units.

use rustpython_parser::ast;

use crate::core::{LineIndex, UnitKind};

/// A function, method, or class definition discovered during traversal.
///
/// Borrows its definition node from the parsed module; the decision-point
/// counter reads the node without owning any tree data.
#[derive(Clone, Debug)]
pub struct AnalysisUnit<'a> {
    /// Dotted path of enclosing unit names, e.g. `Outer.helper`.
    pub name: String,
    pub kind: UnitKind,
    pub start_line: usize,
    pub end_line: usize,
    /// 0 for module-level units, +1 per enclosing unit.
    pub depth: u32,
    pub node: UnitNode<'a>,
}

/// Borrowed view of a unit's definition in the syntax tree.
#[derive(Copy, Clone, Debug)]
pub enum UnitNode<'a> {
    Function(&'a ast::StmtFunctionDef),
    AsyncFunction(&'a ast::StmtAsyncFunctionDef),
    Class(&'a ast::StmtClassDef),
}

/// Lazy pre-order iterator over every definition in a module.
///
/// Enclosing units are yielded before the units nested within them, in
/// source textual order. Definitions nested inside non-definition compound
/// statements (a `def` under an `if`, a conditional method at class scope)
/// are found too, attributed to the innermost enclosing unit.
pub struct UnitWalker<'a> {
    index: &'a LineIndex,
    stack: Vec<Frame<'a>>,
}

/// One suspended statement list, with the unit context its definitions
/// belong to.
struct Frame<'a> {
    stmts: std::slice::Iter<'a, ast::Stmt>,
    /// Qualified-name prefix; `None` at module scope.
    path: Option<String>,
    /// Kind of the innermost enclosing unit; a `def` directly under a
    /// class is a method.
    parent: Option<UnitKind>,
    depth: u32,
}

impl<'a> UnitWalker<'a> {
    pub fn new(module: &'a ast::Mod, index: &'a LineIndex) -> Self {
        let stack = match module {
            ast::Mod::Module(module) => vec![Frame {
                stmts: module.body.iter(),
                path: None,
                parent: None,
                depth: 0,
            }],
            _ => Vec::new(),
        };
        Self { index, stack }
    }

    fn emit_unit(
        &mut self,
        node: UnitNode<'a>,
        name: &str,
        start: usize,
        end: usize,
        body: &'a [ast::Stmt],
        path: Option<String>,
        parent: Option<UnitKind>,
        depth: u32,
    ) -> AnalysisUnit<'a> {
        let kind = match node {
            UnitNode::Class(_) => UnitKind::Class,
            _ if parent == Some(UnitKind::Class) => UnitKind::Method,
            _ => UnitKind::Function,
        };
        let qualified = match &path {
            Some(prefix) => format!("{prefix}.{name}"),
            None => name.to_string(),
        };
        self.stack.push(Frame {
            stmts: body.iter(),
            path: Some(qualified.clone()),
            parent: Some(kind),
            depth: depth + 1,
        });
        AnalysisUnit {
            name: qualified,
            kind,
            start_line: self.index.line_of(start),
            end_line: self.index.line_of(end.saturating_sub(1)),
            depth,
            node,
        }
    }

    /// Queue the statement lists nested inside a non-definition compound
    /// statement, first block on top so traversal stays in textual order.
    fn push_nested_blocks(
        &mut self,
        stmt: &'a ast::Stmt,
        path: Option<String>,
        parent: Option<UnitKind>,
        depth: u32,
    ) {
        let mut blocks: Vec<&'a [ast::Stmt]> = Vec::new();
        match stmt {
            ast::Stmt::If(s) => {
                blocks.push(&s.body);
                blocks.push(&s.orelse);
            }
            ast::Stmt::While(s) => {
                blocks.push(&s.body);
                blocks.push(&s.orelse);
            }
            ast::Stmt::For(s) => {
                blocks.push(&s.body);
                blocks.push(&s.orelse);
            }
            ast::Stmt::AsyncFor(s) => {
                blocks.push(&s.body);
                blocks.push(&s.orelse);
            }
            ast::Stmt::With(s) => blocks.push(&s.body),
            ast::Stmt::AsyncWith(s) => blocks.push(&s.body),
            ast::Stmt::Try(s) => {
                blocks.push(&s.body);
                for handler in &s.handlers {
                    match handler {
                        ast::ExceptHandler::ExceptHandler(h) => blocks.push(&h.body),
                    }
                }
                blocks.push(&s.orelse);
                blocks.push(&s.finalbody);
            }
            ast::Stmt::TryStar(s) => {
                blocks.push(&s.body);
                for handler in &s.handlers {
                    match handler {
                        ast::ExceptHandler::ExceptHandler(h) => blocks.push(&h.body),
                    }
                }
                blocks.push(&s.orelse);
                blocks.push(&s.finalbody);
            }
            ast::Stmt::Match(s) => {
                for case in &s.cases {
                    blocks.push(&case.body);
                }
            }
            _ => return,
        }
        for block in blocks.into_iter().rev() {
            if block.is_empty() {
                continue;
            }
            self.stack.push(Frame {
                stmts: block.iter(),
                path: path.clone(),
                parent,
                depth,
            });
        }
    }
}

impl<'a> Iterator for UnitWalker<'a> {
    type Item = AnalysisUnit<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (stmt, path, parent, depth) = {
                let frame = self.stack.last_mut()?;
                match frame.stmts.next() {
                    Some(stmt) => (stmt, frame.path.clone(), frame.parent, frame.depth),
                    None => {
                        self.stack.pop();
                        continue;
                    }
                }
            };
            match stmt {
                ast::Stmt::FunctionDef(def) => {
                    return Some(self.emit_unit(
                        UnitNode::Function(def),
                        def.name.as_str(),
                        def.range.start().to_usize(),
                        def.range.end().to_usize(),
                        &def.body,
                        path,
                        parent,
                        depth,
                    ));
                }
                ast::Stmt::AsyncFunctionDef(def) => {
                    return Some(self.emit_unit(
                        UnitNode::AsyncFunction(def),
                        def.name.as_str(),
                        def.range.start().to_usize(),
                        def.range.end().to_usize(),
                        &def.body,
                        path,
                        parent,
                        depth,
                    ));
                }
                ast::Stmt::ClassDef(def) => {
                    return Some(self.emit_unit(
                        UnitNode::Class(def),
                        def.name.as_str(),
                        def.range.start().to_usize(),
                        def.range.end().to_usize(),
                        &def.body,
                        path,
                        parent,
                        depth,
                    ));
                }
                other => self.push_nested_blocks(other, path, parent, depth),
            }
        }
    }
}
