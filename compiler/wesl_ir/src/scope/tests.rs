use super::*;
use pretty_assertions::assert_eq;

fn decl(global: bool) -> IdentKind {
    IdentKind::Decl(DeclInfo {
        element: ElementId::new(0),
        opens: None,
        global,
    })
}

fn sp(start: u32) -> Span {
    Span::new(start, start + 1)
}

#[test]
fn test_new_tree_has_root_only() {
    let tree = ScopeTree::new();
    assert_eq!(tree.scope_count(), 1);
    assert_eq!(tree.current(), ScopeTree::ROOT);
    assert_eq!(tree.scope(ScopeTree::ROOT).kind, ScopeKind::Module);
    assert!(tree.finish().is_ok());
}

#[test]
fn test_open_close_discipline() {
    let mut tree = ScopeTree::new();
    let f = tree.add_ident("f", sp(0), decl(true));
    let body = tree.open_scope(Some(f));
    assert_eq!(tree.current(), body);
    assert_eq!(tree.ident(f).decl().and_then(|d| d.opens), Some(body));

    let inner = tree.open_scope(None);
    assert_eq!(
        tree.close_scope(body),
        Err(ScopeError::CloseMismatch {
            open: inner,
            found: body
        })
    );
    assert_eq!(tree.finish(), Err(ScopeError::Unclosed { count: 2 }));

    assert!(tree.close_scope(inner).is_ok());
    assert!(tree.close_scope(body).is_ok());
    assert_eq!(tree.close_scope(ScopeTree::ROOT), Err(ScopeError::CloseRoot));
    assert!(tree.finish().is_ok());
}

#[test]
fn test_child_position_in_parent() {
    let mut tree = ScopeTree::new();
    tree.add_ident("a", sp(0), decl(true));
    tree.add_ident("b", sp(2), decl(true));
    let child = tree.open_scope(None);
    assert_eq!(tree.scope(child).position, 2);
    assert_eq!(tree.scope(child).parent, Some(ScopeTree::ROOT));
    assert_eq!(tree.children(ScopeTree::ROOT).collect::<Vec<_>>(), [child]);
}

#[test]
fn test_module_scope_is_order_independent() {
    let mut tree = ScopeTree::new();
    let main = tree.add_ident("main", sp(0), decl(true));
    let body = tree.open_scope(Some(main));
    let call = tree.add_ident("helper", sp(10), IdentKind::Ref);
    tree.close_scope(body).ok();
    let helper = tree.add_ident("helper", sp(20), decl(true));

    assert_eq!(tree.resolve_local(call, |_| true), Some(helper));
}

#[test]
fn test_visibility_filter_hides_decls() {
    let mut tree = ScopeTree::new();
    tree.add_ident("x", sp(0), decl(true));
    let r = tree.add_ident("x", sp(5), IdentKind::Ref);
    assert_eq!(tree.resolve_local(r, |_| false), None);
}

#[test]
fn test_body_scope_sees_only_prior_decls() {
    // fn f(i) { var x = i; for (var i = 0; i < x; i++) {} }
    let mut tree = ScopeTree::new();
    let f = tree.add_ident("f", sp(0), decl(true));
    let body = tree.open_scope(Some(f));
    let param = tree.add_ident("i", sp(5), decl(false));
    let x = tree.add_ident("x", sp(12), decl(false));
    let init_ref = tree.add_ident("i", sp(16), IdentKind::Ref);
    let header = tree.open_scope(None);
    let loop_var = tree.new_ident("i", sp(28), decl(false));
    tree.attach(loop_var);
    let cond_ref = tree.add_ident("i", sp(35), IdentKind::Ref);
    let x_ref = tree.add_ident("x", sp(39), IdentKind::Ref);
    tree.close_scope(header).ok();
    tree.close_scope(body).ok();

    assert_eq!(tree.resolve_local(init_ref, |_| true), Some(param));
    assert_eq!(tree.resolve_local(cond_ref, |_| true), Some(loop_var));
    assert_eq!(tree.resolve_local(x_ref, |_| true), Some(x));
}

#[test]
fn test_unattached_decl_invisible_to_own_initializer() {
    // let x = x + 1; inside a body where an outer x exists
    let mut tree = ScopeTree::new();
    let outer = tree.add_ident("x", sp(0), decl(true));
    let f = tree.add_ident("f", sp(4), decl(true));
    let body = tree.open_scope(Some(f));
    let local = tree.new_ident("x", sp(14), decl(false));
    let init = tree.add_ident("x", sp(18), IdentKind::Ref);
    tree.attach(local);
    let after = tree.add_ident("x", sp(30), IdentKind::Ref);
    tree.close_scope(body).ok();

    assert_eq!(tree.resolve_local(init, |_| true), Some(outer));
    assert_eq!(tree.resolve_local(after, |_| true), Some(local));
}

#[test]
fn test_rollback_discards_partial_item() {
    let mut tree = ScopeTree::new();
    tree.add_ident("keep", sp(0), decl(true));
    let snapshot = tree.snapshot();

    let broken = tree.add_ident("broken", sp(10), decl(true));
    tree.open_scope(Some(broken));
    tree.add_ident("y", sp(15), IdentKind::Ref);

    tree.rollback(snapshot);
    assert_eq!(tree.ident_count(), 1);
    assert_eq!(tree.scope_count(), 1);
    assert_eq!(tree.scope(ScopeTree::ROOT).items.len(), 1);
    assert!(tree.finish().is_ok());
}

#[test]
fn test_module_decls_and_reachability() {
    let mut tree = ScopeTree::new();
    let a = tree.add_ident("a", sp(0), decl(true));
    let body = tree.open_scope(Some(a));
    tree.add_ident("b", sp(5), IdentKind::Ref);
    tree.close_scope(body).ok();
    let c = tree.add_ident("c", sp(10), decl(true));

    assert_eq!(tree.module_decls().collect::<Vec<_>>(), [a, c]);
    assert!(tree.check_reachable(body).is_ok());
    assert_eq!(
        tree.check_reachable(ScopeId::new(9)),
        Err(ScopeError::Unreachable(ScopeId::new(9)))
    );
}

#[test]
fn test_simple_name_of_qualified_ref() {
    let mut tree = ScopeTree::new();
    let r = tree.add_ident("pkg::util::foo", sp(0), IdentKind::Ref);
    assert_eq!(tree.ident(r).simple_name(), "foo");
    assert!(tree.ident(r).is_ref());
}
