use super::*;

fn segs(text: &str) -> Vec<String> {
    text.split("::").map(str::to_owned).collect()
}

#[test]
fn test_parse_and_display() {
    let path = ModulePath::parse("package::util::math");
    assert_eq!(path.len(), 3);
    assert_eq!(path.package(), Some("package"));
    assert_eq!(path.last(), Some("math"));
    assert_eq!(path.to_string(), "package::util::math");
}

#[test]
fn test_parse_drops_empty_segments() {
    assert_eq!(ModulePath::parse("a::::b::"), ModulePath::new(["a", "b"]));
    assert!(ModulePath::parse("").is_empty());
}

#[test]
fn test_parent_and_join() {
    let path = ModulePath::parse("pkg::a");
    assert_eq!(path.join("b"), ModulePath::parse("pkg::a::b"));
    assert_eq!(path.parent(), Some(ModulePath::parse("pkg")));
    assert_eq!(ModulePath::default().parent(), None);
}

#[test]
fn test_split_symbol() {
    let path = ModulePath::parse("pkg::util::foo");
    let (module, symbol) = path.split_symbol().unwrap();
    assert_eq!(module, ModulePath::parse("pkg::util"));
    assert_eq!(symbol, "foo");
    assert!(ModulePath::default().split_symbol().is_none());
}

#[test]
fn test_resolve_super_pops_one_segment() {
    let importer = ModulePath::parse("pkg::a::b");
    assert_eq!(
        importer.resolve(&segs("..::foo")),
        Some(ModulePath::parse("pkg::a::foo"))
    );
    assert_eq!(
        importer.resolve(&segs("super::super::foo")),
        Some(ModulePath::parse("pkg::foo"))
    );
}

#[test]
fn test_resolve_super_past_root_fails() {
    let importer = ModulePath::parse("pkg::a");
    assert_eq!(importer.resolve(&segs("..::..::foo")), None);
}

#[test]
fn test_resolve_self_and_package() {
    let importer = ModulePath::parse("app::shaders::main");
    assert_eq!(
        importer.resolve(&segs("self::helper")),
        Some(ModulePath::parse("app::shaders::main::helper"))
    );
    assert_eq!(
        importer.resolve(&segs("package::util::foo")),
        Some(ModulePath::parse("app::util::foo"))
    );
}

#[test]
fn test_resolve_absolute_is_unchanged() {
    let importer = ModulePath::parse("app::main");
    assert_eq!(
        importer.resolve(&segs("lib::noise::perlin")),
        Some(ModulePath::parse("lib::noise::perlin"))
    );
}

#[test]
fn test_is_relative() {
    assert!(ModulePath::is_relative(&segs("..::x")));
    assert!(ModulePath::is_relative(&segs("package::x")));
    assert!(ModulePath::is_relative(&segs("self::x")));
    assert!(!ModulePath::is_relative(&segs("lib::x")));
}
