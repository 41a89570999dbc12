use super::*;

fn name(n: &str) -> Box<Condition> {
    Box::new(Condition::Name(n.to_owned()))
}

#[test]
fn test_unknown_names_are_false() {
    let conditions = Conditions::new();
    assert!(!Condition::Name("DEBUG".into()).evaluate(&conditions));
    assert!(Condition::Not(name("DEBUG")).evaluate(&conditions));
}

#[test]
fn test_connectives() {
    let conditions: Conditions = [("A", true), ("B", false)].into_iter().collect();
    assert!(Condition::Or(name("A"), name("B")).evaluate(&conditions));
    assert!(!Condition::And(name("A"), name("B")).evaluate(&conditions));
    assert!(Condition::And(name("A"), Box::new(Condition::Not(name("B")))).evaluate(&conditions));
    assert!(Condition::Literal(true).evaluate(&conditions));
}

#[test]
fn test_is_active_without_condition() {
    let conditions = Conditions::new().with("X", false);
    assert!(Condition::is_active(None, &conditions));
    assert!(!Condition::is_active(Some(&Condition::Name("X".into())), &conditions));
}

#[test]
fn test_display() {
    let cond = Condition::Or(name("A"), Box::new(Condition::Not(name("B"))));
    assert_eq!(cond.to_string(), "(A || !B)");
}
