use super::*;
use crate::registry::{EnumDef, TypeRegistry};
use pretty_assertions::assert_eq;

struct Fixture {
    registry: TypeRegistry,
    animal: Ty,
    dog: Ty,
    named: Ty,
    labeled: Ty,
    color: Ty,
    point: Ty,
    kennel: Ty,
}

fn fixture() -> Fixture {
    let mut registry = TypeRegistry::new();
    let named = registry.declare("INamed", TypeKind::Interface);
    let labeled = registry.declare("ILabeled", TypeKind::Interface);
    let animal = registry.declare("Animal", TypeKind::Class);
    let dog = registry.declare("Dog", TypeKind::Class);
    let color = registry.declare(
        "Color",
        TypeKind::Enum(EnumDef::new(Prim::Byte).value("Red", 1)),
    );
    let point = registry.declare("Point", TypeKind::Struct);
    let kennel = registry.declare("Kennel", TypeKind::Class);

    registry.def_mut(labeled).implements(Ty::Named(named));
    registry
        .def_mut(animal)
        .implements(Ty::Named(labeled))
        .property("Name", Ty::STRING)
        .method("Speak", &[], Ty::STRING);
    registry
        .def_mut(dog)
        .base(Ty::Named(animal))
        .property("Breed", Ty::STRING);
    registry
        .def_mut(kennel)
        .implements(Ty::seq(Ty::Named(dog)));

    Fixture {
        registry,
        animal: Ty::Named(animal),
        dog: Ty::Named(dog),
        named: Ty::Named(named),
        labeled: Ty::Named(labeled),
        color: Ty::Named(color),
        point: Ty::Named(point),
        kennel: Ty::Named(kennel),
    }
}


#[test]
fn value_types() {
    let f = fixture();
    let cx = TypeCx::new(&f.registry);
    assert!(cx.is_value_type(&Ty::INT32));
    assert!(cx.is_value_type(&Ty::STRING.nullable()));
    assert!(cx.is_value_type(&f.color));
    assert!(cx.is_value_type(&f.point));
    assert!(!cx.is_value_type(&f.dog));
    assert!(!cx.is_value_type(&Ty::STRING));
    assert!(!cx.is_value_type(&Ty::seq(Ty::INT32)));
}

#[test]
fn enum_underlying_keeps_nullability() {
    let f = fixture();
    let cx = TypeCx::new(&f.registry);
    assert!(cx.is_enum(&f.color.clone().nullable()));
    assert_eq!(cx.underlying(&f.color), Ty::BYTE);
    assert_eq!(cx.underlying(&f.color.clone().nullable()), Ty::BYTE.nullable());
    assert_eq!(cx.underlying(&Ty::INT32), Ty::INT32);
}

#[test]
fn widening_table() {
    let f = fixture();
    let cx = TypeCx::new(&f.registry);
    assert!(cx.is_compatible(&Ty::INT32, &Ty::INT64));
    assert!(cx.is_compatible(&Ty::INT32, &Ty::DECIMAL));
    assert!(cx.is_compatible(&Ty::BYTE, &Ty::UINT16));
    assert!(cx.is_compatible(&Ty::SINGLE, &Ty::DOUBLE));
    assert!(!cx.is_compatible(&Ty::INT64, &Ty::INT32));
    assert!(!cx.is_compatible(&Ty::SBYTE, &Ty::UINT16));
    assert!(!cx.is_compatible(&Ty::DOUBLE, &Ty::DECIMAL));
    assert!(!cx.is_compatible(&Ty::CHAR, &Ty::INT32));
}

#[test]
fn nullable_compatibility_is_one_way() {
    let f = fixture();
    let cx = TypeCx::new(&f.registry);
    assert!(cx.is_compatible(&Ty::INT32, &Ty::INT32.nullable()));
    assert!(cx.is_compatible(&Ty::INT32, &Ty::INT64.nullable()));
    assert!(!cx.is_compatible(&Ty::INT32.nullable(), &Ty::INT32));
    assert!(cx.is_compatible(&f.color, &f.color.clone().nullable()));
    assert!(!cx.is_compatible(&f.color, &Ty::BYTE));
}

#[test]
fn reference_assignability() {
    let f = fixture();
    let cx = TypeCx::new(&f.registry);
    assert!(cx.is_compatible(&f.dog, &f.animal));
    assert!(!cx.is_compatible(&f.animal, &f.dog));
    assert!(cx.is_compatible(&f.dog, &f.named));
    assert!(cx.is_compatible(&f.dog, &Ty::OBJECT));
    assert!(cx.is_compatible(&Ty::INT32, &Ty::OBJECT));
    assert!(!cx.is_compatible(&Ty::OBJECT, &Ty::STRING));
}

#[test]
fn sequence_covariance() {
    let f = fixture();
    let cx = TypeCx::new(&f.registry);
    assert!(cx.is_compatible(&Ty::array(f.dog.clone()), &Ty::seq(f.animal.clone())));
    assert!(cx.is_compatible(&f.kennel, &Ty::seq(f.dog.clone())));
    assert!(cx.is_compatible(&Ty::queryable(Ty::INT32), &Ty::seq(Ty::INT32)));
    assert!(!cx.is_compatible(&Ty::seq(Ty::INT32), &Ty::seq(Ty::INT64)));
}

#[test]
fn sequence_elements() {
    let f = fixture();
    let cx = TypeCx::new(&f.registry);
    assert_eq!(cx.find_sequence_element(&f.kennel), Some(f.dog.clone()));
    assert_eq!(cx.find_sequence_element(&Ty::array(Ty::INT32)), Some(Ty::INT32));
    assert_eq!(cx.find_sequence_element(&Ty::STRING), None);
    assert_eq!(cx.find_sequence_element(&f.dog), None);
}

#[test]
fn ancestry_order() {
    let f = fixture();
    let cx = TypeCx::new(&f.registry);
    assert_eq!(
        cx.self_and_base_types(&f.dog),
        vec![f.dog.clone(), f.animal.clone(), Ty::OBJECT]
    );
    assert_eq!(
        cx.self_and_base_types(&f.labeled),
        vec![f.labeled.clone(), f.named.clone()]
    );
}

#[test]
fn member_lookup_walks_bases_case_insensitively() {
    let f = fixture();
    let cx = TypeCx::new(&f.registry);
    let name = cx.find_member(&f.dog, "name", false);
    assert_eq!(name.map(|m| (m.name, m.owner)), Some(("Name".to_owned(), f.animal.clone())));
    assert!(cx.find_member(&f.dog, "Name", true).is_none());
    assert!(cx.has_method_named(&f.dog, "speak", false));
    assert!(cx.has_method_named(&f.dog, "ToString", false));
}

#[test]
fn nullable_members_are_synthesized() {
    let f = fixture();
    let cx = TypeCx::new(&f.registry);
    let ty = Ty::INT32.nullable();
    assert_eq!(cx.find_member(&ty, "hasvalue", false).map(|m| m.ty), Some(Ty::BOOL));
    assert_eq!(cx.find_member(&ty, "Value", false).map(|m| m.ty), Some(Ty::INT32));
}

#[test]
fn type_names_for_messages() {
    let f = fixture();
    let cx = TypeCx::new(&f.registry);
    assert_eq!(cx.type_name(&f.dog), "Dog");
    assert_eq!(cx.type_name(&Ty::seq(f.dog.clone())), "IEnumerable<Dog>");
    assert_eq!(cx.type_name(&Ty::INT32.nullable()), "Int32?");
}
