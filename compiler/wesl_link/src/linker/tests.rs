use pretty_assertions::assert_eq;
use wesl_diagnostic::ErrorCode;
use wesl_ir::ModulePath;

use super::*;

fn registry(modules: &[(&str, &str)]) -> Registry {
    let mut registry = Registry::new();
    for (path, source) in modules {
        let output = wesl_parse::parse(ModulePath::parse(path), (*source).to_owned());
        registry.register(output.module).unwrap();
    }
    registry
}

#[test]
fn test_config_builder() {
    let config = LinkConfig::new(ModulePath::parse("package::main"))
        .with_param("SIZE", "64")
        .with_condition("FAST", true);
    assert_eq!(config.params.get("SIZE").map(String::as_str), Some("64"));
    assert!(config.conditions.get("FAST"));
    assert!(!config.conditions.get("SLOW"));
}

#[test]
fn test_root_not_found() {
    let registry = registry(&[("package::main", "fn main() {}\n")]);
    let config = LinkConfig::new(ModulePath::parse("package::other"));
    assert_eq!(
        link(&registry, &config).unwrap_err(),
        LinkError::RootNotFound(ModulePath::parse("package::other"))
    );
}

#[test]
fn test_link_end_to_end() {
    let registry = registry(&[
        (
            "package::main",
            "import package::util::scale;\n@compute @workgroup_size(ext.SIZE)\nfn main() { scale(2.0); }\n",
        ),
        ("package::util", "fn scale(x: f32) -> f32 { return x * 2.0; }\n"),
    ]);
    let config = LinkConfig::new(ModulePath::parse("package::main")).with_param("SIZE", "64");
    let output = link(&registry, &config).unwrap();
    assert_eq!(
        output.text,
        "@compute @workgroup_size(64)\nfn main() { scale(2.0); }\n\nfn scale(x: f32) -> f32 { return x * 2.0; }\n"
    );
    assert!(output.diagnostics.is_empty());
    assert!(!output.has_errors());
    assert_eq!(output.reachable.len(), 2);
}

#[test]
fn test_diagnostics_sorted_by_module_then_position() {
    let registry = registry(&[
        (
            "package::main",
            "import package::lib::f;\nfn main() { f(); later(); }\nfn other() { first(); }\n",
        ),
        ("package::lib", "fn f() { missing(); }\n"),
    ]);
    let output = link(&registry, &LinkConfig::new(ModulePath::parse("package::main"))).unwrap();
    assert!(output.has_errors());

    let found: Vec<(Option<String>, ErrorCode)> = output
        .diagnostics
        .iter()
        .map(|d| (d.module.as_ref().map(ToString::to_string), d.code))
        .collect();
    assert_eq!(
        found,
        vec![
            (Some("package::lib".to_owned()), ErrorCode::E2001),
            (Some("package::main".to_owned()), ErrorCode::E2001),
            (Some("package::main".to_owned()), ErrorCode::E2001),
        ]
    );
    let main = registry.module(registry.lookup(&ModulePath::parse("package::main")).unwrap());
    let labelled: Vec<&str> = output.diagnostics[1..]
        .iter()
        .map(|d| main.text(d.labels[0].span))
        .collect();
    assert_eq!(labelled, vec!["later", "first"]);
}

#[test]
fn test_output_still_produced_with_errors() {
    let registry = registry(&[("package::main", "fn main() { nope(); }\n")]);
    let output = link(&registry, &LinkConfig::new(ModulePath::parse("package::main"))).unwrap();
    assert_eq!(output.text, "fn main() { nope(); }\n");
    assert!(output.has_errors());
}

#[test]
fn test_link_error_display() {
    let error = LinkError::RootNotFound(ModulePath::parse("package::main"));
    assert_eq!(error.to_string(), "root module `package::main` is not registered");
}
