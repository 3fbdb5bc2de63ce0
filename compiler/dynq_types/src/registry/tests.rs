use super::*;
use pretty_assertions::assert_eq;

#[test]
fn declared_types_resolve_by_ref_and_name() {
    let mut registry = TypeRegistry::new();
    let person = registry.declare("Person", TypeKind::Class);
    registry
        .def_mut(person)
        .property("Name", Ty::STRING)
        .property("Age", Ty::INT32);

    let def = registry.def(person).map(|d| d.name.as_str());
    assert_eq!(def, Some("Person"));
    assert_eq!(registry.named("PERSON"), Some(person));
    assert_eq!(
        registry.type_def(&Ty::Named(person)).map(|d| d.members.len()),
        Some(2)
    );
}

#[test]
fn only_accessible_types_are_nameable() {
    let mut registry = TypeRegistry::new();
    let hidden = registry.declare("Hidden", TypeKind::Class);
    let shown = registry.declare("Shown", TypeKind::Class);
    registry.def_mut(shown).accessible();

    assert_eq!(registry.lookup_type_name("hidden"), None);
    assert_eq!(registry.lookup_type_name("shown"), Some(Ty::Named(shown)));
    assert_eq!(registry.named("Hidden"), Some(hidden));
}

#[test]
fn helper_classes_are_builtin_and_accessible() {
    let registry = TypeRegistry::new();
    let math = registry.lookup_type_name("math");
    assert!(math.is_some());
    assert!(registry.lookup_type_name("Convert").is_some());
}

#[test]
fn members_carry_their_owner() {
    let mut registry = TypeRegistry::new();
    let order = registry.declare("Order", TypeKind::Class);
    registry.def_mut(order).property("Total", Ty::DECIMAL);
    let member = &registry.def_mut(order).members[0];
    assert_eq!(member.owner, Ty::Named(order));
    assert_eq!(member.ty, Ty::DECIMAL);
}

#[test]
fn primitive_member_tables() {
    let registry = TypeRegistry::new();
    let string = registry.type_def(&Ty::STRING);
    assert!(string.is_some_and(|d| d.members.iter().any(|m| m.name == "Length")));
    assert!(string.is_some_and(|d| !d.indexers.is_empty()));
    let date = registry.type_def(&Ty::DATE_TIME);
    assert!(date.is_some_and(|d| d.constructors.len() == 3));
    assert!(registry.type_def(&Ty::INT32.nullable()).is_none());
}

#[test]
fn enum_values_lookup_ignores_case() {
    let def = EnumDef::new(Prim::Int32)
        .flags()
        .value("Read", 1)
        .value("Write", 2);
    assert!(def.flags);
    assert_eq!(def.find("write"), Some(("Write", 2)));
    assert_eq!(def.find("Execute"), None);
}

#[test]
fn type_names_fold_ascii_case_only() {
    let mut registry = TypeRegistry::new();
    let street = registry.declare("Straße", TypeKind::Class);
    let anger = registry.declare("Ärger", TypeKind::Class);
    assert_eq!(registry.named("STRAßE"), Some(street));
    assert_eq!(registry.named("Ärger"), Some(anger));
    assert_eq!(registry.named("ärger"), None);
}
