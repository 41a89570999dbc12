use std::fs;
use std::path::Path;

use pretty_assertions::assert_eq;
use wesl_diagnostic::ErrorCode;

use super::*;

fn write(dir: &Path, relative: &str, text: &str) -> PathBuf {
    let path = dir.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, text).unwrap();
    path
}

fn options(root: PathBuf) -> LinkOptions {
    LinkOptions {
        root,
        ..LinkOptions::default()
    }
}

#[test]
fn test_module_path() {
    let dir = Path::new("/shaders");
    assert_eq!(
        module_path("package", dir, Path::new("/shaders/util/math.wesl")),
        Some(ModulePath::parse("package::util::math"))
    );
    assert_eq!(
        module_path("noise", dir, Path::new("/shaders/perlin.wgsl")),
        Some(ModulePath::parse("noise::perlin"))
    );
    assert_eq!(module_path("package", dir, Path::new("/other/a.wesl")), None);
}

#[test]
fn test_is_source_file() {
    assert!(is_source_file(Path::new("a/b.wesl")));
    assert!(is_source_file(Path::new("b.wgsl")));
    assert!(!is_source_file(Path::new("b.txt")));
    assert!(!is_source_file(Path::new("wesl")));
}

#[test]
fn test_load_package_and_libs() {
    let temp = tempfile::tempdir().unwrap();
    let base = temp.path().join("shaders");
    let root = write(&base, "main.wesl", "import package::util::f;\nfn main() { f(); }\n");
    write(&base, "util.wesl", "fn f() {}\n");
    write(&base, "notes.txt", "not a shader");
    let lib = temp.path().join("vendor");
    write(&lib, "random/hash.wgsl", "fn hash() {}\n");

    let mut options = options(root);
    options.libs.push(("noise".to_owned(), lib));
    let package = load_package(&options).unwrap();

    assert_eq!(package.root, ModulePath::parse("package::main"));
    assert!(package.diagnostics.is_empty());
    let mut modules: Vec<String> = package
        .registry
        .iter()
        .map(|(_, module)| module.path().to_string())
        .collect();
    modules.sort();
    assert_eq!(
        modules,
        vec!["noise::random::hash", "package::main", "package::util"]
    );
    let util = ModulePath::parse("package::util");
    assert!(package.display_name(&util).ends_with("util.wesl"));
    assert_eq!(package.source(&util), Some("fn f() {}\n"));
}

#[test]
fn test_registration_order_is_sorted() {
    let temp = tempfile::tempdir().unwrap();
    let root = write(temp.path(), "z.wesl", "fn main() {}\n");
    write(temp.path(), "b/a.wesl", "");
    write(temp.path(), "a.wesl", "");
    let package = load_package(&options(root)).unwrap();
    let order: Vec<String> = package
        .registry
        .iter()
        .map(|(_, module)| module.path().to_string())
        .collect();
    assert_eq!(order, vec!["package::a", "package::b::a", "package::z"]);
}

#[test]
fn test_parse_errors_collected() {
    let temp = tempfile::tempdir().unwrap();
    let root = write(temp.path(), "main.wesl", "fn main() {}\nfn broken( {}\n");
    let package = load_package(&options(root)).unwrap();
    assert_eq!(package.diagnostics.len(), 1);
    assert_eq!(package.diagnostics[0].code, ErrorCode::E1002);
}

#[test]
fn test_duplicate_module_paths() {
    let temp = tempfile::tempdir().unwrap();
    let root = write(temp.path(), "main.wesl", "fn main() {}\n");
    write(temp.path(), "main.wgsl", "fn main() {}\n");
    assert!(matches!(
        load_package(&options(root)),
        Err(PackageError::Registry(RegistryError::DuplicateModule(_)))
    ));
}

#[test]
fn test_root_outside_base() {
    let temp = tempfile::tempdir().unwrap();
    let root = write(temp.path(), "main.wesl", "fn main() {}\n");
    let base = temp.path().join("lib");
    fs::create_dir_all(&base).unwrap();
    let mut options = options(root);
    options.base = Some(base);
    assert!(matches!(
        load_package(&options),
        Err(PackageError::RootOutsideBase { .. })
    ));
}

#[test]
fn test_missing_root_file() {
    let temp = tempfile::tempdir().unwrap();
    let error = load_package(&options(temp.path().join("missing.wesl")))
        .err()
        .unwrap();
    assert!(matches!(error, PackageError::Io { .. }));
    assert!(error.to_string().starts_with("cannot read"));
}
