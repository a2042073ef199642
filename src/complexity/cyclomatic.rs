//! Decision-point counting over a unit's exclusive subtree.
//!
//! The count recurses into every statement and expression position of the
//! unit, signature included, and stops only at nested definition
//! boundaries; nested functions and classes are separately-scored units.

use rustpython_parser::ast;

use super::walker::{AnalysisUnit, UnitNode};

/// Tally of one unit's branching constructs.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct DecisionPoints {
    /// Number of decision points found.
    pub count: u32,
    /// Number of nested definition boundaries the count stopped at. The
    /// analyzer cross-checks this against the walker's output.
    pub nested_units: u32,
}

/// Count the decision points of one unit, excluding nested definitions.
pub fn count_decision_points(unit: &AnalysisUnit<'_>, include_imports: bool) -> DecisionPoints {
    let mut counter = Counter {
        points: DecisionPoints::default(),
        include_imports,
    };
    match unit.node {
        UnitNode::Function(def) => counter.visit_function(def),
        UnitNode::AsyncFunction(def) => counter.visit_async_function(def),
        UnitNode::Class(def) => counter.visit_class(def),
    }
    counter.points
}

struct Counter {
    points: DecisionPoints,
    include_imports: bool,
}

impl Counter {
    fn visit_function(&mut self, def: &ast::StmtFunctionDef) {
        self.visit_signature(&def.decorator_list, &def.args, def.returns.as_deref());
        self.visit_body(&def.body);
    }

    fn visit_async_function(&mut self, def: &ast::StmtAsyncFunctionDef) {
        self.visit_signature(&def.decorator_list, &def.args, def.returns.as_deref());
        self.visit_body(&def.body);
    }

    fn visit_class(&mut self, def: &ast::StmtClassDef) {
        for decorator in &def.decorator_list {
            self.visit_expr(decorator);
        }
        for base in &def.bases {
            self.visit_expr(base);
        }
        for keyword in &def.keywords {
            self.visit_expr(&keyword.value);
        }
        self.visit_body(&def.body);
    }

    fn visit_signature(
        &mut self,
        decorators: &[ast::Expr],
        args: &ast::Arguments,
        returns: Option<&ast::Expr>,
    ) {
        for decorator in decorators {
            self.visit_expr(decorator);
        }
        self.visit_arguments(args);
        if let Some(returns) = returns {
            self.visit_expr(returns);
        }
    }

    fn visit_arguments(&mut self, args: &ast::Arguments) {
        for arg in args
            .posonlyargs
            .iter()
            .chain(&args.args)
            .chain(&args.kwonlyargs)
        {
            if let Some(annotation) = &arg.def.annotation {
                self.visit_expr(annotation);
            }
            if let Some(default) = &arg.default {
                self.visit_expr(default);
            }
        }
        if let Some(vararg) = &args.vararg {
            if let Some(annotation) = &vararg.annotation {
                self.visit_expr(annotation);
            }
        }
        if let Some(kwarg) = &args.kwarg {
            if let Some(annotation) = &kwarg.annotation {
                self.visit_expr(annotation);
            }
        }
    }

    fn visit_body(&mut self, body: &[ast::Stmt]) {
        for stmt in body {
            self.visit_stmt(stmt);
        }
    }

    fn visit_stmt(&mut self, stmt: &ast::Stmt) {
        match stmt {
            // Nested definitions are separately-scored units; their whole
            // subtree, signature included, stays out of this count.
            ast::Stmt::FunctionDef(_) | ast::Stmt::AsyncFunctionDef(_) | ast::Stmt::ClassDef(_) => {
                self.points.nested_units += 1;
            }
            ast::Stmt::If(s) => {
                // An elif parses as a nested If in orelse, so each If node
                // is one clause. A bare else adds nothing.
                self.points.count += 1;
                self.visit_expr(&s.test);
                self.visit_body(&s.body);
                self.visit_body(&s.orelse);
            }
            ast::Stmt::While(s) => {
                self.points.count += 1;
                self.visit_expr(&s.test);
                self.visit_body(&s.body);
                self.visit_body(&s.orelse);
            }
            ast::Stmt::For(s) => {
                self.points.count += 1;
                self.visit_expr(&s.target);
                self.visit_expr(&s.iter);
                self.visit_body(&s.body);
                self.visit_body(&s.orelse);
            }
            ast::Stmt::AsyncFor(s) => {
                self.points.count += 1;
                self.visit_expr(&s.target);
                self.visit_expr(&s.iter);
                self.visit_body(&s.body);
                self.visit_body(&s.orelse);
            }
            ast::Stmt::Try(s) => {
                self.points.count += s.handlers.len() as u32;
                self.visit_body(&s.body);
                for handler in &s.handlers {
                    match handler {
                        ast::ExceptHandler::ExceptHandler(h) => {
                            if let Some(type_) = &h.type_ {
                                self.visit_expr(type_);
                            }
                            self.visit_body(&h.body);
                        }
                    }
                }
                self.visit_body(&s.orelse);
                self.visit_body(&s.finalbody);
            }
            ast::Stmt::TryStar(s) => {
                self.points.count += s.handlers.len() as u32;
                self.visit_body(&s.body);
                for handler in &s.handlers {
                    match handler {
                        ast::ExceptHandler::ExceptHandler(h) => {
                            if let Some(type_) = &h.type_ {
                                self.visit_expr(type_);
                            }
                            self.visit_body(&h.body);
                        }
                    }
                }
                self.visit_body(&s.orelse);
                self.visit_body(&s.finalbody);
            }
            ast::Stmt::Match(s) => {
                // One path already exists through the first arm; each
                // further case adds one.
                self.points.count += (s.cases.len() as u32).saturating_sub(1);
                self.visit_expr(&s.subject);
                for case in &s.cases {
                    if let Some(guard) = &case.guard {
                        self.visit_expr(guard);
                    }
                    self.visit_body(&case.body);
                }
            }
            ast::Stmt::With(s) => {
                for item in &s.items {
                    self.visit_expr(&item.context_expr);
                    if let Some(vars) = &item.optional_vars {
                        self.visit_expr(vars);
                    }
                }
                self.visit_body(&s.body);
            }
            ast::Stmt::AsyncWith(s) => {
                for item in &s.items {
                    self.visit_expr(&item.context_expr);
                    if let Some(vars) = &item.optional_vars {
                        self.visit_expr(vars);
                    }
                }
                self.visit_body(&s.body);
            }
            ast::Stmt::Import(_) | ast::Stmt::ImportFrom(_) => {
                if self.include_imports {
                    self.points.count += 1;
                }
            }
            ast::Stmt::Return(s) => {
                if let Some(value) = &s.value {
                    self.visit_expr(value);
                }
            }
            ast::Stmt::Delete(s) => {
                for target in &s.targets {
                    self.visit_expr(target);
                }
            }
            ast::Stmt::Assign(s) => {
                for target in &s.targets {
                    self.visit_expr(target);
                }
                self.visit_expr(&s.value);
            }
            ast::Stmt::AugAssign(s) => {
                self.visit_expr(&s.target);
                self.visit_expr(&s.value);
            }
            ast::Stmt::AnnAssign(s) => {
                self.visit_expr(&s.target);
                self.visit_expr(&s.annotation);
                if let Some(value) = &s.value {
                    self.visit_expr(value);
                }
            }
            ast::Stmt::Raise(s) => {
                if let Some(exc) = &s.exc {
                    self.visit_expr(exc);
                }
                if let Some(cause) = &s.cause {
                    self.visit_expr(cause);
                }
            }
            ast::Stmt::Assert(s) => {
                self.visit_expr(&s.test);
                if let Some(msg) = &s.msg {
                    self.visit_expr(msg);
                }
            }
            ast::Stmt::Expr(s) => self.visit_expr(&s.value),
            // pass, break, continue, global, nonlocal carry no branches
            _ => {}
        }
    }

    fn visit_expr(&mut self, expr: &ast::Expr) {
        match expr {
            ast::Expr::BoolOp(e) => {
                // `a and b and c` parses as one BoolOp with three operands
                // and two operator instances.
                self.points.count += (e.values.len() as u32).saturating_sub(1);
                for value in &e.values {
                    self.visit_expr(value);
                }
            }
            ast::Expr::IfExp(e) => {
                self.points.count += 1;
                self.visit_expr(&e.test);
                self.visit_expr(&e.body);
                self.visit_expr(&e.orelse);
            }
            ast::Expr::ListComp(e) => {
                self.visit_expr(&e.elt);
                self.visit_generators(&e.generators);
            }
            ast::Expr::SetComp(e) => {
                self.visit_expr(&e.elt);
                self.visit_generators(&e.generators);
            }
            ast::Expr::GeneratorExp(e) => {
                self.visit_expr(&e.elt);
                self.visit_generators(&e.generators);
            }
            ast::Expr::DictComp(e) => {
                self.visit_expr(&e.key);
                self.visit_expr(&e.value);
                self.visit_generators(&e.generators);
            }
            ast::Expr::Lambda(e) => {
                // A lambda is not a unit; its branches belong to the
                // enclosing one.
                self.visit_arguments(&e.args);
                self.visit_expr(&e.body);
            }
            ast::Expr::NamedExpr(e) => {
                self.visit_expr(&e.target);
                self.visit_expr(&e.value);
            }
            ast::Expr::BinOp(e) => {
                self.visit_expr(&e.left);
                self.visit_expr(&e.right);
            }
            ast::Expr::UnaryOp(e) => self.visit_expr(&e.operand),
            ast::Expr::Dict(e) => {
                for key in e.keys.iter().flatten() {
                    self.visit_expr(key);
                }
                for value in &e.values {
                    self.visit_expr(value);
                }
            }
            ast::Expr::Set(e) => {
                for elt in &e.elts {
                    self.visit_expr(elt);
                }
            }
            ast::Expr::Await(e) => self.visit_expr(&e.value),
            ast::Expr::Yield(e) => {
                if let Some(value) = &e.value {
                    self.visit_expr(value);
                }
            }
            ast::Expr::YieldFrom(e) => self.visit_expr(&e.value),
            ast::Expr::Compare(e) => {
                self.visit_expr(&e.left);
                for comparator in &e.comparators {
                    self.visit_expr(comparator);
                }
            }
            ast::Expr::Call(e) => {
                self.visit_expr(&e.func);
                for arg in &e.args {
                    self.visit_expr(arg);
                }
                for keyword in &e.keywords {
                    self.visit_expr(&keyword.value);
                }
            }
            ast::Expr::FormattedValue(e) => {
                self.visit_expr(&e.value);
                if let Some(spec) = &e.format_spec {
                    self.visit_expr(spec);
                }
            }
            ast::Expr::JoinedStr(e) => {
                for value in &e.values {
                    self.visit_expr(value);
                }
            }
            ast::Expr::Attribute(e) => self.visit_expr(&e.value),
            ast::Expr::Subscript(e) => {
                self.visit_expr(&e.value);
                self.visit_expr(&e.slice);
            }
            ast::Expr::Starred(e) => self.visit_expr(&e.value),
            ast::Expr::List(e) => {
                for elt in &e.elts {
                    self.visit_expr(elt);
                }
            }
            ast::Expr::Tuple(e) => {
                for elt in &e.elts {
                    self.visit_expr(elt);
                }
            }
            ast::Expr::Slice(e) => {
                for part in [&e.lower, &e.upper, &e.step].into_iter().flatten() {
                    self.visit_expr(part);
                }
            }
            // names and constants carry no branches
            _ => {}
        }
    }

    fn visit_generators(&mut self, generators: &[ast::Comprehension]) {
        for generator in generators {
            // One point for the iteration clause, one per filter.
            self.points.count += 1 + generator.ifs.len() as u32;
            self.visit_expr(&generator.target);
            self.visit_expr(&generator.iter);
            for filter in &generator.ifs {
                self.visit_expr(filter);
            }
        }
    }
}
