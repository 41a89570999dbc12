use pretty_assertions::assert_eq;
use wesl_ir::{ModulePath, Span};

use super::*;

fn sample() -> SourceMap {
    let main = ModulePath::parse("package::main");
    let lib = ModulePath::parse("package::lib");
    let mut map = SourceMap::new();
    // "fn main() { " copied, then `foo` renamed to `foo0`, then " }" copied.
    map.push(SourceMapEntry {
        output: Span::new(0, 12),
        module: main.clone(),
        source: Span::new(20, 32),
    });
    map.push(SourceMapEntry {
        output: Span::new(12, 16),
        module: main.clone(),
        source: Span::new(32, 35),
    });
    map.push(SourceMapEntry {
        output: Span::new(16, 16),
        module: main,
        source: Span::new(35, 35),
    });
    map.push(SourceMapEntry {
        output: Span::new(18, 24),
        module: lib,
        source: Span::new(0, 6),
    });
    map
}

#[test]
fn test_empty_runs_are_dropped() {
    assert_eq!(sample().len(), 3);
}

#[test]
fn test_lookup_in_copied_text() {
    let map = sample();
    let pos = map.lookup(3).unwrap();
    assert_eq!(pos.module, &ModulePath::parse("package::main"));
    assert_eq!(pos.offset, 23);
    let pos = map.lookup(20).unwrap();
    assert_eq!(pos.module, &ModulePath::parse("package::lib"));
    assert_eq!(pos.offset, 2);
}

#[test]
fn test_lookup_clamps_inside_renamed_identifier() {
    let map = sample();
    assert_eq!(map.lookup(12).unwrap().offset, 32);
    assert_eq!(map.lookup(15).unwrap().offset, 34);
}

#[test]
fn test_lookup_outside_entries() {
    let map = sample();
    assert!(map.lookup(16).is_none());
    assert!(map.lookup(24).is_none());
    assert!(SourceMap::new().lookup(0).is_none());
}
