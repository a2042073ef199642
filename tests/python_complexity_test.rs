use std::path::PathBuf;

use indoc::indoc;
use pretty_assertions::assert_eq;

use cyclomap::analyzers::python::analyze_source;
use cyclomap::config::AnalysisConfig;
use cyclomap::core::{Error, FileReport, UnitKind};

fn analyze(source: &str) -> FileReport {
    analyze_with(source, &AnalysisConfig::default())
}

fn analyze_with(source: &str, config: &AnalysisConfig) -> FileReport {
    analyze_source(source, &PathBuf::from("test.py"), config).expect("analysis should succeed")
}

#[test]
fn test_straight_line_function_scores_one() {
    let source = indoc! {"
        def add(a, b):
            result = a + b
            return result
    "};
    let report = analyze(source);
    assert_eq!(report.units.len(), 1);
    let unit = &report.units[0];
    assert_eq!(unit.decision_points, 0);
    assert_eq!(unit.complexity, 1);
    assert!(!unit.exceeds_threshold);
}

#[test]
fn test_empty_module_yields_empty_report() {
    let report = analyze("x = 1\ny = x + 1\n");
    assert!(report.units.is_empty());
    assert_eq!(report.summary.total_units, 0);
}

#[test]
fn test_if_with_nine_elifs_exceeds_default_threshold() {
    let mut source = String::from("def dispatch(x):\n    if x == 0:\n        pass\n");
    for i in 1..=9 {
        source.push_str(&format!("    elif x == {i}:\n        pass\n"));
    }
    let report = analyze(&source);
    let unit = &report.units[0];
    assert_eq!(unit.decision_points, 10);
    assert_eq!(unit.complexity, 11);
    assert!(unit.exceeds_threshold);
}

#[test]
fn test_for_loop_with_nested_if() {
    let source = indoc! {"
        def scan(items):
            for item in items:
                if item.ok:
                    yield item
    "};
    let unit = &analyze(source).units[0];
    assert_eq!(unit.decision_points, 2);
    assert_eq!(unit.complexity, 3);
    assert!(!unit.exceeds_threshold);
}

#[test]
fn test_short_circuit_operators() {
    let source = indoc! {"
        def check(a, b, c):
            return a and b or c
    "};
    let unit = &analyze(source).units[0];
    assert_eq!(unit.decision_points, 2);
    assert_eq!(unit.complexity, 3);
}

#[test]
fn test_ternary_expression() {
    let source = indoc! {"
        def pick(flag):
            return 1 if flag else 2
    "};
    assert_eq!(analyze(source).units[0].complexity, 2);
}

#[test]
fn test_comprehension_filter_counts_independently() {
    let source = indoc! {"
        def positives(xs):
            return [x for x in xs if x > 0]
    "};
    let unit = &analyze(source).units[0];
    assert_eq!(unit.decision_points, 2);
}

#[test]
fn test_exception_handlers_count_each() {
    let source = indoc! {"
        def load(path):
            try:
                return read(path)
            except FileNotFoundError:
                return None
            except OSError:
                return None
    "};
    assert_eq!(analyze(source).units[0].decision_points, 2);
}

#[test]
fn test_match_arms_beyond_first() {
    let source = indoc! {"
        def label(x):
            match x:
                case 0:
                    return 'zero'
                case 1:
                    return 'one'
                case _:
                    return 'many'
    "};
    assert_eq!(analyze(source).units[0].decision_points, 2);
}

#[test]
fn test_loop_else_contributes_nothing() {
    let source = indoc! {"
        def find(xs, needle):
            for x in xs:
                if x == needle:
                    return x
            else:
                return None
    "};
    assert_eq!(analyze(source).units[0].decision_points, 2);
}

#[test]
fn test_nested_function_scored_independently() {
    let source = indoc! {"
        def outer(xs):
            def inner(x):
                if x == 1:
                    return 1
                elif x == 2:
                    return 2
                elif x == 3:
                    return 3
                elif x == 4:
                    return 4
                elif x == 5:
                    return 5
                return 0
            return [inner(x) for x in xs]
    "};
    let report = analyze(source);
    let names: Vec<_> = report.units.iter().map(|u| u.name.as_str()).collect();
    assert_eq!(names, vec!["outer", "outer.inner"]);
    // outer sees only its own comprehension, not inner's five branches
    assert_eq!(report.units[0].decision_points, 1);
    assert_eq!(report.units[1].decision_points, 5);
}

#[test]
fn test_class_and_method_units() {
    let source = indoc! {"
        class Parser:
            def parse(self, text):
                if not text:
                    return None
                return text.split()
    "};
    let report = analyze(source);
    assert_eq!(report.units.len(), 2);
    assert_eq!(report.units[0].kind, UnitKind::Class);
    assert_eq!(report.units[0].decision_points, 0);
    assert_eq!(report.units[1].name, "Parser.parse");
    assert_eq!(report.units[1].kind, UnitKind::Method);
    assert_eq!(report.units[1].decision_points, 1);
    assert_eq!(report.units[1].depth, 1);
}

#[test]
fn test_module_scope_imports_never_counted() {
    let source = indoc! {"
        import os
        import sys

        def env():
            return os.environ
    "};
    let config = AnalysisConfig::default().with_imports(true);
    let report = analyze_with(source, &config);
    assert_eq!(report.units[0].decision_points, 0);
}

#[test]
fn test_imports_inside_unit_counted_when_enabled() {
    let source = indoc! {"
        def lazy():
            import json
            from os import path
            return json, path
    "};
    let excluded = analyze(source);
    assert_eq!(excluded.units[0].decision_points, 0);

    let config = AnalysisConfig::default().with_imports(true);
    let included = analyze_with(source, &config);
    assert_eq!(included.units[0].decision_points, 2);
    assert_eq!(included.units[0].complexity, 3);
}

#[test]
fn test_threshold_boundary_is_strict() {
    // score 3: one if plus one and
    let source = indoc! {"
        def gate(a, b):
            if a and b:
                return True
            return False
    "};
    let at_threshold = analyze_with(source, &AnalysisConfig::new(3));
    assert_eq!(at_threshold.units[0].complexity, 3);
    assert!(!at_threshold.units[0].exceeds_threshold);

    let below_threshold = analyze_with(source, &AnalysisConfig::new(2));
    assert!(below_threshold.units[0].exceeds_threshold);
}

#[test]
fn test_zero_threshold_is_a_configuration_error() {
    let config = AnalysisConfig::new(0);
    let err = analyze_source("def f():\n    pass\n", &PathBuf::from("test.py"), &config)
        .unwrap_err();
    assert!(matches!(err, Error::Configuration(_)));
}

#[test]
fn test_syntax_error_propagates() {
    let err = analyze_source(
        "def f(:\n    pass\n",
        &PathBuf::from("broken.py"),
        &AnalysisConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(err, Error::Parse { .. }));
}

#[test]
fn test_reanalysis_is_deterministic() {
    let source = indoc! {"
        class Store:
            def get(self, key, default=None):
                if key in self.data and self.data[key] is not None:
                    return self.data[key]
                return default

        def merge(a, b):
            return {k: v for k, v in a.items() if k not in b}
    "};
    let first = analyze(source);
    let second = analyze(source);
    assert_eq!(first, second);
}

#[test]
fn test_summary_counts_flagged_units() {
    let source = indoc! {"
        def plain():
            return 1

        def branchy(x):
            if x and x > 0 and x < 100:
                return x
            return 0
    "};
    let report = analyze_with(source, &AnalysisConfig::new(2));
    assert_eq!(report.summary.total_units, 2);
    assert_eq!(report.summary.max_complexity, 4);
    assert_eq!(report.summary.flagged_count, 1);
}
