use pretty_assertions::assert_eq;
use wesl_diagnostic::ErrorCode;
use wesl_ir::{
    Condition, Conditions, ElementKind, IdentId, ImportTree, Module, ModulePath, PathSegment,
};

use super::*;

fn parse_ok(source: &str) -> Module {
    let output = parse(ModulePath::parse("package::test"), source.to_owned());
    assert!(output.errors.is_empty(), "{:?}", output.errors);
    output.module
}

fn parse_err(source: &str) -> ParseOutput {
    let output = parse(ModulePath::parse("package::test"), source.to_owned());
    assert!(output.has_errors());
    output
}

fn refs_named(module: &Module, name: &str) -> Vec<IdentId> {
    module
        .scopes()
        .idents()
        .filter(|(_, ident)| ident.is_ref() && ident.name == name)
        .map(|(id, _)| id)
        .collect()
}

fn decls_named(module: &Module, name: &str) -> Vec<IdentId> {
    module
        .scopes()
        .idents()
        .filter(|(_, ident)| !ident.is_ref() && ident.name == name)
        .map(|(id, _)| id)
        .collect()
}

fn ref_names(module: &Module) -> Vec<&str> {
    module
        .scopes()
        .idents()
        .filter(|(_, ident)| ident.is_ref())
        .map(|(_, ident)| ident.name.as_str())
        .collect()
}

fn resolve(module: &Module, reference: IdentId) -> Option<IdentId> {
    module.scopes().resolve_local(reference, |_| true)
}

// --- Scopes ---

#[test]
fn test_local_invisible_to_own_initializer() {
    let module = parse_ok("fn f(x: i32) -> i32 {\n    let x = x + 1;\n    return x;\n}\n");
    let decls = decls_named(&module, "x");
    let refs = refs_named(&module, "x");
    assert_eq!(decls.len(), 2);
    assert_eq!(refs.len(), 2);
    assert_eq!(resolve(&module, refs[0]), Some(decls[0]));
    assert_eq!(resolve(&module, refs[1]), Some(decls[1]));
}

#[test]
fn test_module_scope_is_order_independent() {
    let module = parse_ok("fn main() { helper(); }\nfn helper() {}\n");
    let helper = refs_named(&module, "helper")[0];
    assert_eq!(resolve(&module, helper), Some(decls_named(&module, "helper")[0]));
}

#[test]
fn test_nested_block_shadowing() {
    let module = parse_ok("fn f() {\n  let a = 1;\n  {\n    let a = 2;\n    g(a);\n  }\n  g(a);\n}\n");
    let decls = decls_named(&module, "a");
    let refs = refs_named(&module, "a");
    assert_eq!(resolve(&module, refs[0]), Some(decls[1]));
    assert_eq!(resolve(&module, refs[1]), Some(decls[0]));
}

#[test]
fn test_for_header_scope() {
    let module = parse_ok(
        "fn f() { var sum = 0; for (var i = 0; i < 4; i++) { sum += i; } }",
    );
    let i = decls_named(&module, "i")[0];
    let refs = refs_named(&module, "i");
    assert_eq!(refs.len(), 3);
    for reference in refs {
        assert_eq!(resolve(&module, reference), Some(i));
    }
    let sum = refs_named(&module, "sum")[0];
    assert_eq!(resolve(&module, sum), Some(decls_named(&module, "sum")[0]));
}

#[test]
fn test_params_are_locals() {
    let module = parse_ok("fn f(@builtin(position) p: vec4f, n: u32) {}");
    let p = decls_named(&module, "p")[0];
    assert!(!module.ident(p).is_global_decl());
    assert_eq!(ref_names(&module), vec!["vec4f", "u32"]);
    let f = decls_named(&module, "f")[0];
    assert!(module.ident(f).is_global_decl());
    assert_eq!(module.ident(f).decl().and_then(|d| d.opens), Some(module.ident(p).scope));
}

// --- References ---

#[test]
fn test_member_access_paths_and_ext() {
    let module = parse_ok("fn f() { let v = a.b; c::d::e(); ext.SIZE; }");
    assert_eq!(ref_names(&module), vec!["a", "c::d::e", "ext.SIZE"]);
    let path = refs_named(&module, "c::d::e")[0];
    assert_eq!(module.text(module.ident(path).span), "c::d::e");
    let ext = refs_named(&module, "ext.SIZE")[0];
    assert_eq!(module.text(module.ident(ext).span), "ext.SIZE");
}

#[test]
fn test_keywords_are_not_references() {
    let module = parse_ok("fn f() { if true { return; } else { loop { break; } } }");
    assert!(ref_names(&module).is_empty());
}

#[test]
fn test_global_var_template_in_decl_scope() {
    let module = parse_ok("@group(0) @binding(1) var<storage, read> data: array<f32>;");
    assert_eq!(ref_names(&module), vec!["storage", "read", "array", "f32"]);
    let data = decls_named(&module, "data")[0];
    let opens = module.ident(data).decl().and_then(|d| d.opens);
    for name in ["storage", "read", "array", "f32"] {
        let reference = refs_named(&module, name)[0];
        assert_eq!(Some(module.ident(reference).scope), opens, "{name}");
    }
}

#[test]
fn test_attribute_expression_references() {
    let module = parse_ok("@compute @workgroup_size(WG, 1) fn main() {}\nconst WG = 64u;");
    let wg = refs_named(&module, "WG")[0];
    assert_eq!(resolve(&module, wg), Some(decls_named(&module, "WG")[0]));
}

#[test]
fn test_struct_member_names_are_text() {
    let module = parse_ok("struct Light { @location(0) color: vec3f, intensity: array<f32, 2>, }");
    assert_eq!(ref_names(&module), vec!["vec3f", "array", "f32"]);
    assert!(decls_named(&module, "color").is_empty());
}

#[test]
fn test_children_in_source_order() {
    let module = parse_ok("var<private> v: f32;");
    let item = module.element(module.root_elements()[0]);
    let names: Vec<&str> = item
        .children
        .iter()
        .map(|id| module.text(module.element(*id).span))
        .collect();
    assert_eq!(names, vec!["private", "v", "f32"]);
}

#[test]
fn test_const_assert_scope() {
    let module = parse_ok("const_assert N > 0;\nconst N = 4;\n");
    let element = module.element(module.root_elements()[0]);
    let ElementKind::ConstAssert { scope } = element.kind else {
        panic!("expected const_assert, got {:?}", element.kind);
    };
    let n = refs_named(&module, "N")[0];
    assert_eq!(module.ident(n).scope, scope);
    assert_eq!(resolve(&module, n), Some(decls_named(&module, "N")[0]));
}

#[test]
fn test_alias_and_directive() {
    let module = parse_ok("enable f16;\nalias Color = vec4<f16>;\n");
    let kinds: Vec<_> = module
        .root_elements()
        .iter()
        .map(|id| module.element(*id).kind)
        .collect();
    assert!(matches!(kinds[0], ElementKind::Directive));
    assert!(matches!(kinds[1], ElementKind::Alias { .. }));
    assert_eq!(ref_names(&module), vec!["vec4", "f16"]);
}

// --- Imports ---

#[test]
fn test_import_trees() {
    let module = parse_ok(
        "import package::lights::{Light, shade as shadeLight};\nimport ../util/*;\nimport a/b as c;\n",
    );
    let trees: Vec<&ImportTree> = module.imports().iter().map(|i| &i.tree).collect();
    assert_eq!(
        *trees[0],
        ImportTree::new(vec![
            PathSegment::simple("package"),
            PathSegment::simple("lights"),
            PathSegment::List(vec![
                ImportTree::from_path("Light"),
                ImportTree::new(vec![PathSegment::renamed("shade", "shadeLight")]),
            ]),
        ])
    );
    assert_eq!(
        *trees[1],
        ImportTree::new(vec![
            PathSegment::simple(".."),
            PathSegment::simple("util"),
            PathSegment::Wildcard { alias: None },
        ])
    );
    assert_eq!(
        *trees[2],
        ImportTree::new(vec![PathSegment::simple("a"), PathSegment::renamed("b", "c")])
    );
    assert!(module
        .root_elements()
        .iter()
        .all(|id| matches!(module.element(*id).kind, ElementKind::Import)));
}

#[test]
fn test_dangling_separator() {
    let output = parse_err("import a::;\nfn f() {}");
    assert_eq!(output.errors.len(), 1);
    assert_eq!(output.errors[0].code, ErrorCode::E1004);
    assert!(output.module.imports().is_empty());
    assert!(output.module.declared("f", &Conditions::new()).is_some());
}

// --- Conditions and exports ---

#[test]
fn test_if_attribute() {
    let module = parse_ok("@if(FAST && !DEBUG) fn f() {}\n@if(false) import a::b;\n");
    let fn_element = module.element(module.root_elements()[0]);
    assert_eq!(
        fn_element.condition,
        Some(Condition::And(
            Box::new(Condition::Name("FAST".into())),
            Box::new(Condition::Not(Box::new(Condition::Name("DEBUG".into())))),
        ))
    );
    let first = module.element(fn_element.children[0]);
    assert_eq!(first.kind, ElementKind::Elided);
    assert_eq!(module.text(first.span), "@if(FAST && !DEBUG) ");
    assert_eq!(module.imports()[0].condition, Some(Condition::Literal(false)));
}

#[test]
fn test_export_policy() {
    let module = parse_ok("export fn a() {}\nfn b() {}\n");
    let a = decls_named(&module, "a")[0];
    let b = decls_named(&module, "b")[0];
    assert!(module.exports().exports(a));
    assert!(!module.exports().exports(b));

    let element = module.element(module.root_elements()[0]);
    assert_eq!(module.text(module.element(element.children[0]).span), "export ");

    let open = parse_ok("fn a() {}\n");
    assert_eq!(*open.exports(), ExportPolicy::All);
}

// --- Errors ---

#[test]
fn test_recovery_skips_failed_item() {
    let output = parse_err("fn bad( { }\nfn good() {}\n");
    assert_eq!(output.errors.len(), 1);
    assert_eq!(output.errors[0].code, ErrorCode::E1002);
    let conditions = Conditions::new();
    assert!(output.module.declared("good", &conditions).is_some());
    assert!(output.module.declared("bad", &conditions).is_none());
    assert_eq!(output.module.root_elements().len(), 1);
    assert!(output.fatal_error().is_none());
}

#[test]
fn test_lexer_errors_reported() {
    let output = parse_err("fn f() { let a = 1 $ 2; }\n/* open");
    let codes: Vec<_> = output.errors.iter().map(|e| e.code).collect();
    assert_eq!(codes, vec![ErrorCode::E0002, ErrorCode::E0001]);
    assert!(output.module.declared("f", &Conditions::new()).is_some());
}

#[test]
fn test_unclosed_block() {
    let output = parse_err("fn f() { let x = 1;");
    assert_eq!(output.errors[0].code, ErrorCode::E1003);
    assert!(output.errors[0].opened.is_some());
    let diag = &output.diagnostics()[0];
    assert_eq!(diag.labels.len(), 2);
    assert_eq!(diag.module, Some(ModulePath::parse("package::test")));
}

#[test]
fn test_unexpected_top_level_token() {
    let output = parse_err("let x = 1;\nfn f() {}");
    assert_eq!(output.errors[0].code, ErrorCode::E1001);
    assert!(output.module.declared("f", &Conditions::new()).is_some());
}
