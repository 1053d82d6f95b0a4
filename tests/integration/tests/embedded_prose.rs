//! End-to-end pipeline tests.
//!
//! Drives the full walk → normalize → bridge → map → fix pipeline against a
//! scripted engine that mimics a Chinese technical-writing ruleset: a
//! terminology rule (ios → iOS, apis → APIs, ...) and spacing rules between
//! CJK text and ASCII letters/digits. The engine computes its message
//! positions and fix ranges inside the text it receives, exactly like a real
//! external linter, so these tests verify the round-trip position mapping
//! end to end by slicing the original source at the mapped offsets and by
//! applying the mapped fixes.

use embedlint_ast::{AstArena, Comment, CommentKind, Location, Node, NodeKind, Position, Span};
use embedlint_bridge::{
    EngineFuture, LintMessage, LintReport, MessageFix, MessageLocation, MessagePosition,
    ProseEngine, Severity, SyncBridge,
};
use embedlint_core::{
    LintScope, MappedDiagnostic, RuleContext, RuleOptions, TextlintRule, apply_fixes_to_content,
};

const TERMINOLOGY_RULE: &str = "zh-technical-writing/terminology";
const SPACING_RULE: &str = "zh-technical-writing/zhRuleSeries";

/// Scripted stand-in for the external prose linter.
struct ZhTechEngine;

fn is_cjk(c: char) -> bool {
    ('\u{4e00}'..='\u{9fff}').contains(&c)
}

fn position_in(text: &str, byte: usize) -> MessagePosition {
    let before = &text[..byte];
    let line = before.matches('\n').count() as u32 + 1;
    let line_start = before.rfind('\n').map_or(0, |p| p + 1);
    MessagePosition::new(line, (byte - line_start) as u32)
}

const TERMS: &[(&str, &str)] = &[
    ("ecmaScript", "ECMAScript"),
    ("android", "Android"),
    ("apis", "APIs"),
    ("ios", "iOS"),
    ("iot", "IoT"),
];

fn scan(text: &str) -> Vec<LintMessage> {
    let mut found: Vec<(usize, LintMessage)> = Vec::new();

    for (term, replacement) in TERMS {
        for (idx, _) in text.match_indices(term) {
            let bounded_left = text[..idx]
                .chars()
                .next_back()
                .is_none_or(|c| !c.is_ascii_alphanumeric());
            let bounded_right = text[idx + term.len()..]
                .chars()
                .next()
                .is_none_or(|c| !c.is_ascii_alphanumeric());
            if !(bounded_left && bounded_right) {
                continue;
            }

            let message = LintMessage::new(
                format!(
                    "Incorrect usage of the term: \u{201c}{term}\u{201d}, use \u{201c}{replacement}\u{201d} instead"
                ),
                MessageLocation::new(
                    position_in(text, idx),
                    position_in(text, idx + term.len()),
                ),
            )
            .with_rule_id(TERMINOLOGY_RULE)
            .with_fix(MessageFix::new(
                [idx as u32, (idx + term.len()) as u32],
                *replacement,
            ));
            found.push((idx, message));
        }
    }

    let chars: Vec<(usize, char)> = text.char_indices().collect();
    for window in chars.windows(2) {
        let (_, prev) = window[0];
        let (idx, next) = window[1];

        let text_of = if is_cjk(prev) && next.is_ascii_digit() {
            Some("中文与数字之间需要添加空格")
        } else if (prev.is_ascii_alphanumeric() && is_cjk(next))
            || (is_cjk(prev) && next.is_ascii_alphabetic())
        {
            Some("中文与英文之间需要添加空格")
        } else {
            None
        };

        if let Some(text_of) = text_of {
            let position = position_in(text, idx);
            let message = LintMessage::new(text_of, MessageLocation::new(position, position))
                .with_rule_id(SPACING_RULE)
                .with_fix(MessageFix::new([idx as u32, idx as u32], " "));
            found.push((idx, message));
        }
    }

    found.sort_by_key(|(idx, _)| *idx);
    found.into_iter().map(|(_, message)| message).collect()
}

impl ProseEngine for ZhTechEngine {
    fn lint<'a>(&'a mut self, text: &'a str, _filename: &'a str) -> EngineFuture<'a> {
        let report = LintReport::new(scan(text));
        Box::pin(async move { Ok(report) })
    }
}

fn zh_bridge() -> SyncBridge {
    SyncBridge::spawn(|| Ok(Box::new(ZhTechEngine) as Box<dyn ProseEngine>))
}

fn position_at(source: &str, byte: usize) -> Position {
    let before = &source[..byte];
    let line = before.matches('\n').count() as u32 + 1;
    let line_start = before.rfind('\n').map_or(0, |p| p + 1);
    Position::new(line, (byte - line_start) as u32)
}

fn span_loc(source: &str, start: usize, end: usize) -> (Span, Location) {
    (
        Span::new(start as u32, end as u32),
        Location::new(position_at(source, start), position_at(source, end)),
    )
}

fn string_literal_at<'a>(
    arena: &'a AstArena,
    source: &'static str,
    raw: &'static str,
) -> &'a Node<'a> {
    let start = source.find(raw).expect("literal not found in source");
    let (span, loc) = span_loc(source, start, start + raw.len());
    arena.alloc(Node::string_literal(raw, span, loc))
}

/// A template element whose span starts at the delimiter preceding the
/// cooked text (the backtick or the `}` closing the previous hole).
fn template_element_at<'a>(
    arena: &'a AstArena,
    source: &'static str,
    cooked: &'static str,
    delimiter: usize,
) -> &'a Node<'a> {
    let (span, loc) = span_loc(source, delimiter, delimiter + 1 + cooked.len());
    arena.alloc(Node::template_element(cooked, span, loc))
}

fn run_rule(
    options: RuleOptions,
    program: &Node<'_>,
    comments: &[Comment<'_>],
) -> Vec<MappedDiagnostic> {
    let context = RuleContext {
        program,
        comments,
        filename: "test.js",
    };
    let bridge = zh_bridge();
    let mut reports: Vec<MappedDiagnostic> = Vec::new();
    TextlintRule::new(options)
        .run(&context, &bridge, &mut reports)
        .expect("rule run failed");
    reports
}

fn comment_options() -> RuleOptions {
    RuleOptions {
        lint_type: LintScope::Comment,
        ..RuleOptions::default()
    }
}

fn slice(source: &str, span: Span) -> &str {
    &source[span.start as usize..span.end as usize]
}

mod line_comments {
    use super::*;
    use pretty_assertions::assert_eq;

    const SOURCE: &str = "// ecmaScript 测试注释1；";

    fn comments() -> [Comment<'static>; 1] {
        let (span, loc) = span_loc(SOURCE, 0, SOURCE.len());
        [Comment::new(CommentKind::Line, &SOURCE[2..], span, loc)]
    }

    #[test]
    fn reports_terminology_and_spacing() {
        let program = Node::other(&[], Span::new(0, 0), span_loc(SOURCE, 0, 0).1);
        let reports = run_rule(comment_options(), &program, &comments());

        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].rule_id.as_deref(), Some(TERMINOLOGY_RULE));
        assert_eq!(reports[1].rule_id.as_deref(), Some(SPACING_RULE));
        assert_eq!(reports[1].message, "中文与数字之间需要添加空格");
    }

    #[test]
    fn mapped_positions_point_at_the_original_text() {
        let program = Node::other(&[], Span::new(0, 0), span_loc(SOURCE, 0, 0).1);
        let reports = run_rule(comment_options(), &program, &comments());

        let term_fix = reports[0].fix.as_ref().unwrap();
        assert_eq!(slice(SOURCE, term_fix.span), "ecmaScript");
        assert_eq!(
            reports[0].loc.start.column as usize,
            SOURCE.find("ecmaScript").unwrap()
        );

        let spacing_fix = reports[1].fix.as_ref().unwrap();
        assert_eq!(spacing_fix.span.start as usize, SOURCE.find('1').unwrap());
        assert!(spacing_fix.span.is_empty());
    }

    #[test]
    fn autofix_produces_expected_output() {
        let program = Node::other(&[], Span::new(0, 0), span_loc(SOURCE, 0, 0).1);
        let reports = run_rule(comment_options(), &program, &comments());

        let fixed = apply_fixes_to_content(SOURCE, &reports);
        assert_eq!(fixed.fixed_content, "// ECMAScript 测试注释 1；");
        assert_eq!(fixed.fixes_applied, 2);
    }
}

mod block_comments {
    use super::*;
    use pretty_assertions::assert_eq;

    const SOURCE: &str = "/**\n*测试注释3；\n*/";

    fn comments() -> [Comment<'static>; 1] {
        let (span, loc) = span_loc(SOURCE, 0, SOURCE.len());
        // Value excludes the /* and */ markers.
        [Comment::new(
            CommentKind::Block,
            &SOURCE[2..SOURCE.len() - 2],
            span,
            loc,
        )]
    }

    #[test]
    fn multi_line_diagnostic_maps_line_and_fix() {
        let program = Node::other(&[], Span::new(0, 0), span_loc(SOURCE, 0, 0).1);
        let reports = run_rule(comment_options(), &program, &comments());

        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].rule_id.as_deref(), Some(SPACING_RULE));
        // The finding sits on the comment's second line.
        assert_eq!(reports[0].loc.start.line, 2);

        let fix = reports[0].fix.as_ref().unwrap();
        assert_eq!(fix.span.start as usize, SOURCE.find('3').unwrap());

        let fixed = apply_fixes_to_content(SOURCE, &reports);
        assert_eq!(fixed.fixed_content, "/**\n*测试注释 3；\n*/");
    }
}

mod template_literals {
    use super::*;
    use pretty_assertions::assert_eq;

    const SOURCE: &str = "const a = `ios${'android'} ${123 + '123' + \"456\"} iot`";

    fn build<'a>(arena: &'a AstArena) -> &'a Node<'a> {
        let backtick = SOURCE.find('`').unwrap();
        let hole_one_close = SOURCE.find("} ").unwrap();
        let hole_two_close = SOURCE.rfind('}').unwrap();

        let q1 = template_element_at(arena, SOURCE, "ios", backtick);
        let q2 = template_element_at(arena, SOURCE, " ", hole_one_close);
        let q3 = template_element_at(arena, SOURCE, " iot", hole_two_close);

        let android = string_literal_at(arena, SOURCE, "'android'");

        let number_start = SOURCE.find("123 ").unwrap();
        let (number_span, number_loc) = span_loc(SOURCE, number_start, number_start + 3);
        let number = arena.alloc(Node::literal(
            "123",
            embedlint_ast::LiteralValue::Number(123.0),
            number_span,
            number_loc,
        ));
        let str_123 = string_literal_at(arena, SOURCE, "'123'");
        let str_456 = string_literal_at(arena, SOURCE, "\"456\"");

        let (inner_span, inner_loc) = span_loc(SOURCE, number_start, number_start + 11);
        let inner = arena.alloc(Node {
            kind: NodeKind::BinaryExpression {
                left: number,
                right: str_123,
            },
            span: inner_span,
            loc: inner_loc,
        });
        let (outer_span, outer_loc) = span_loc(SOURCE, number_start, hole_two_close);
        let concat = arena.alloc(Node {
            kind: NodeKind::BinaryExpression {
                left: inner,
                right: str_456,
            },
            span: outer_span,
            loc: outer_loc,
        });

        let quasis = arena.alloc_slice_copy(&[*q1, *q2, *q3]);
        let expressions = arena.alloc_slice_copy(&[*android, *concat]);
        let (template_span, template_loc) = span_loc(SOURCE, backtick, SOURCE.len());
        let template = arena.alloc(Node {
            kind: NodeKind::TemplateLiteral {
                quasis,
                expressions,
            },
            span: template_span,
            loc: template_loc,
        });

        let declarations = arena.alloc_slice_copy(&[*template]);
        let (decl_span, decl_loc) = span_loc(SOURCE, 0, SOURCE.len());
        let declaration = arena.alloc(Node {
            kind: NodeKind::VariableDeclaration { declarations },
            span: decl_span,
            loc: decl_loc,
        });

        let children = arena.alloc_slice_copy(&[*declaration]);
        arena.alloc(Node::other(children, decl_span, decl_loc))
    }

    #[test]
    fn only_plain_segments_and_nested_strings_produce_diagnostics() {
        let arena = AstArena::new();
        let program = build(&arena);
        let reports = run_rule(RuleOptions::default(), program, &[]);

        let terms: Vec<&str> = reports
            .iter()
            .map(|r| slice(SOURCE, r.fix.as_ref().unwrap().span))
            .collect();
        assert_eq!(terms, vec!["ios", "android", "iot"]);
        assert!(
            reports
                .iter()
                .all(|r| r.rule_id.as_deref() == Some(TERMINOLOGY_RULE))
        );
    }

    #[test]
    fn autofix_rewrites_each_term_in_place() {
        let arena = AstArena::new();
        let program = build(&arena);
        let reports = run_rule(RuleOptions::default(), program, &[]);

        let fixed = apply_fixes_to_content(SOURCE, &reports);
        assert_eq!(
            fixed.fixed_content,
            "const a = `iOS${'Android'} ${123 + '123' + \"456\"} IoT`"
        );
    }
}

mod mixed_code_and_comments {
    use super::*;
    use pretty_assertions::assert_eq;

    const SOURCE: &str = "console.log(\"test测试\") // 测试注释2；";

    fn build<'a>(arena: &'a AstArena) -> (&'a Node<'a>, [Comment<'static>; 1]) {
        let argument = string_literal_at(arena, SOURCE, "\"test测试\"");
        let (callee_span, callee_loc) = span_loc(SOURCE, 0, 11);
        let callee = arena.alloc(Node::other(&[], callee_span, callee_loc));
        let arguments = arena.alloc_slice_copy(&[*argument]);
        let (call_span, call_loc) = span_loc(SOURCE, 0, SOURCE.find(')').unwrap() + 1);
        let call = arena.alloc(Node {
            kind: NodeKind::Call { callee, arguments },
            span: call_span,
            loc: call_loc,
        });
        let children = arena.alloc_slice_copy(&[*call]);
        let (program_span, program_loc) = span_loc(SOURCE, 0, SOURCE.len());
        let program = arena.alloc(Node::other(children, program_span, program_loc));

        let comment_start = SOURCE.find("//").unwrap();
        let (comment_span, comment_loc) = span_loc(SOURCE, comment_start, SOURCE.len());
        let comments = [Comment::new(
            CommentKind::Line,
            &SOURCE[comment_start + 2..],
            comment_span,
            comment_loc,
        )];

        (program, comments)
    }

    #[test]
    fn code_pass_precedes_comment_pass() {
        let arena = AstArena::new();
        let (program, comments) = build(&arena);
        let reports = run_rule(RuleOptions::default(), program, &comments);

        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].message, "中文与英文之间需要添加空格");
        assert_eq!(reports[1].message, "中文与数字之间需要添加空格");
    }

    #[test]
    fn autofix_touches_both_fragments() {
        let arena = AstArena::new();
        let (program, comments) = build(&arena);
        let reports = run_rule(RuleOptions::default(), program, &comments);

        let fixed = apply_fixes_to_content(SOURCE, &reports);
        assert_eq!(fixed.fixed_content, "console.log(\"test 测试\") // 测试注释 2；");
    }

    #[test]
    fn scope_code_drops_comment_findings() {
        let arena = AstArena::new();
        let (program, comments) = build(&arena);
        let reports = run_rule(
            RuleOptions {
                lint_type: LintScope::Code,
                ..RuleOptions::default()
            },
            program,
            &comments,
        );

        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].message, "中文与英文之间需要添加空格");
    }

    #[test]
    fn scope_comment_drops_code_findings() {
        let arena = AstArena::new();
        let (program, comments) = build(&arena);
        let reports = run_rule(comment_options(), program, &comments);

        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].message, "中文与数字之间需要添加空格");
    }
}

mod import_suppression {
    use super::*;
    use pretty_assertions::assert_eq;

    const IMPORT_SOURCE: &str = "import apis from 'apis';";
    const REQUIRE_SOURCE: &str = "const apis2 = require('apis');";

    fn build_import<'a>(arena: &'a AstArena) -> &'a Node<'a> {
        let source = string_literal_at(arena, IMPORT_SOURCE, "'apis'");
        let (span, loc) = span_loc(IMPORT_SOURCE, 0, IMPORT_SOURCE.len());
        let import = arena.alloc(Node {
            kind: NodeKind::ImportDeclaration { source },
            span,
            loc,
        });
        let children = arena.alloc_slice_copy(&[*import]);
        arena.alloc(Node::other(children, span, loc))
    }

    fn build_require<'a>(arena: &'a AstArena) -> &'a Node<'a> {
        let require_start = REQUIRE_SOURCE.find("require").unwrap();
        let (callee_span, callee_loc) =
            span_loc(REQUIRE_SOURCE, require_start, require_start + 7);
        let callee = arena.alloc(Node::identifier("require", callee_span, callee_loc));
        let argument = string_literal_at(arena, REQUIRE_SOURCE, "'apis'");
        let arguments = arena.alloc_slice_copy(&[*argument]);
        let (call_span, call_loc) =
            span_loc(REQUIRE_SOURCE, require_start, REQUIRE_SOURCE.len() - 1);
        let call = arena.alloc(Node {
            kind: NodeKind::Call { callee, arguments },
            span: call_span,
            loc: call_loc,
        });
        let declarations = arena.alloc_slice_copy(&[*call]);
        let (span, loc) = span_loc(REQUIRE_SOURCE, 0, REQUIRE_SOURCE.len());
        let declaration = arena.alloc(Node {
            kind: NodeKind::VariableDeclaration { declarations },
            span,
            loc,
        });
        let children = arena.alloc_slice_copy(&[*declaration]);
        arena.alloc(Node::other(children, span, loc))
    }

    #[test]
    fn import_is_suppressed_by_default() {
        let arena = AstArena::new();
        let reports = run_rule(RuleOptions::default(), build_import(&arena), &[]);
        assert!(reports.is_empty());
    }

    #[test]
    fn import_is_linted_when_suppression_is_disabled() {
        let arena = AstArena::new();
        let reports = run_rule(
            RuleOptions {
                ignore_import_declaration: false,
                ..RuleOptions::default()
            },
            build_import(&arena),
            &[],
        );

        assert_eq!(reports.len(), 1);
        let fix = reports[0].fix.as_ref().unwrap();
        assert_eq!(slice(IMPORT_SOURCE, fix.span), "apis");

        let fixed = apply_fixes_to_content(IMPORT_SOURCE, &reports);
        assert_eq!(fixed.fixed_content, "import apis from 'APIs';");
    }

    #[test]
    fn require_is_suppressed_by_default() {
        let arena = AstArena::new();
        let reports = run_rule(RuleOptions::default(), build_require(&arena), &[]);
        assert!(reports.is_empty());
    }

    #[test]
    fn require_is_linted_when_suppression_is_disabled() {
        let arena = AstArena::new();
        let reports = run_rule(
            RuleOptions {
                ignore_import_declaration: false,
                ..RuleOptions::default()
            },
            build_require(&arena),
            &[],
        );

        assert_eq!(reports.len(), 1);
        let fixed = apply_fixes_to_content(REQUIRE_SOURCE, &reports);
        assert_eq!(fixed.fixed_content, "const apis2 = require('APIs');");
    }
}

mod suppression_and_lifecycle {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Returns one suppressed and one reportable message for any text.
    struct HalfSuppressedEngine;

    impl ProseEngine for HalfSuppressedEngine {
        fn lint<'a>(&'a mut self, _text: &'a str, _filename: &'a str) -> EngineFuture<'a> {
            let loc = MessageLocation::new(MessagePosition::new(1, 0), MessagePosition::new(1, 1));
            let report = LintReport::new(vec![
                LintMessage::new("disabled finding", loc).with_severity(Severity::Off),
                LintMessage::new("real finding", loc).with_severity(Severity::Warning),
            ]);
            Box::pin(async move { Ok(report) })
        }
    }

    #[test]
    fn severity_zero_never_reaches_the_sink() {
        let source = "const a = 'text';";
        let arena = AstArena::new();
        let literal = string_literal_at(&arena, source, "'text'");
        let children = arena.alloc_slice_copy(&[*literal]);
        let (span, loc) = span_loc(source, 0, source.len());
        let program = arena.alloc(Node::other(children, span, loc));

        let bridge = SyncBridge::spawn(|| Ok(Box::new(HalfSuppressedEngine) as Box<dyn ProseEngine>));
        let context = RuleContext {
            program,
            comments: &[],
            filename: "test.js",
        };
        let mut reports: Vec<MappedDiagnostic> = Vec::new();
        TextlintRule::new(RuleOptions::default())
            .run(&context, &bridge, &mut reports)
            .unwrap();

        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].message, "real finding");
        assert_eq!(reports[0].severity, Severity::Warning);
    }

    #[test]
    fn global_bridge_is_shared_across_callers() {
        let first = SyncBridge::global(|| Ok(Box::new(ZhTechEngine) as Box<dyn ProseEngine>));
        let second = SyncBridge::global(|| Ok(Box::new(ZhTechEngine) as Box<dyn ProseEngine>));
        assert!(std::ptr::eq(first, second));

        let report = first.lint_blocking("plain prose", "test.txt").unwrap();
        assert!(report.messages.is_empty());
    }

    #[test]
    fn rule_options_parse_from_host_json() {
        let rule = TextlintRule::from_options(serde_json::json!({ "lintType": "code" })).unwrap();
        assert_eq!(rule.options().lint_type, LintScope::Code);
        assert!(rule.options().ignore_import_declaration);
    }
}
