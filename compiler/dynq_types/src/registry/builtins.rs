//! Built-in members of the primitive types and the `Math` / `Convert`
//! helper classes.

use dynq_ir::{Prim, Ty};

use super::{TypeKind, TypeRegistry};

pub(super) fn install(registry: &mut TypeRegistry) {
    install_object(registry);
    install_string(registry);
    install_char(registry);
    install_numeric_limits(registry);
    install_date_time(registry);
    install_time_span(registry);
    install_guid(registry);
    install_math(registry);
    install_convert(registry);
}

fn install_object(registry: &mut TypeRegistry) {
    registry
        .prim_def_mut(Prim::Object)
        .method("ToString", &[], Ty::STRING)
        .method("Equals", &[Ty::OBJECT], Ty::BOOL);
}

fn install_string(registry: &mut TypeRegistry) {
    let s = Ty::STRING;
    registry
        .prim_def_mut(Prim::String)
        .property("Length", Ty::INT32)
        .indexer(&[Ty::INT32], Ty::CHAR)
        .method("Contains", &[s.clone()], Ty::BOOL)
        .method("StartsWith", &[s.clone()], Ty::BOOL)
        .method("EndsWith", &[s.clone()], Ty::BOOL)
        .method("IndexOf", &[s.clone()], Ty::INT32)
        .method("IndexOf", &[Ty::CHAR], Ty::INT32)
        .method("Substring", &[Ty::INT32], s.clone())
        .method("Substring", &[Ty::INT32, Ty::INT32], s.clone())
        .method("Replace", &[s.clone(), s.clone()], s.clone())
        .method("ToUpper", &[], s.clone())
        .method("ToLower", &[], s.clone())
        .method("Trim", &[], s.clone())
        .method("CompareTo", &[s.clone()], Ty::INT32)
        .method("Equals", &[s.clone()], Ty::BOOL)
        .static_method("IsNullOrEmpty", &[s.clone()], Ty::BOOL)
        .static_method("Concat", &[s.clone(), s.clone()], s.clone())
        .static_property("Empty", s);
}

fn install_char(registry: &mut TypeRegistry) {
    let def = registry.prim_def_mut(Prim::Char);
    for name in ["IsDigit", "IsLetter", "IsWhiteSpace", "IsUpper", "IsLower"] {
        def.static_method(name, &[Ty::CHAR], Ty::BOOL);
    }
    def.static_method("ToUpper", &[Ty::CHAR], Ty::CHAR)
        .static_method("ToLower", &[Ty::CHAR], Ty::CHAR);
}

fn install_numeric_limits(registry: &mut TypeRegistry) {
    for prim in Prim::ALL.into_iter().filter(|p| p.is_numeric()) {
        let ty = Ty::Prim(prim);
        registry
            .prim_def_mut(prim)
            .static_property("MinValue", ty.clone())
            .static_property("MaxValue", ty.clone())
            .method("CompareTo", &[ty], Ty::INT32);
    }
}

fn install_date_time(registry: &mut TypeRegistry) {
    let dt = Ty::DATE_TIME;
    let def = registry.prim_def_mut(Prim::DateTime);
    for part in [
        "Year",
        "Month",
        "Day",
        "Hour",
        "Minute",
        "Second",
        "Millisecond",
        "DayOfYear",
    ] {
        def.property(part, Ty::INT32);
    }
    def.property("Date", dt.clone())
        .property("TimeOfDay", Ty::TIME_SPAN)
        .property("Ticks", Ty::INT64)
        .static_property("Now", dt.clone())
        .static_property("UtcNow", dt.clone())
        .static_property("Today", dt.clone())
        .static_property("MinValue", dt.clone())
        .static_property("MaxValue", dt.clone())
        .constructor(&[Ty::INT64])
        .constructor(&[Ty::INT32, Ty::INT32, Ty::INT32])
        .constructor(&[Ty::INT32; 6])
        .method("AddDays", &[Ty::DOUBLE], dt.clone())
        .method("AddHours", &[Ty::DOUBLE], dt.clone())
        .method("AddMinutes", &[Ty::DOUBLE], dt.clone())
        .method("AddSeconds", &[Ty::DOUBLE], dt.clone())
        .method("AddMonths", &[Ty::INT32], dt.clone())
        .method("AddYears", &[Ty::INT32], dt.clone())
        .method("Add", &[Ty::TIME_SPAN], dt.clone())
        .method("CompareTo", &[dt], Ty::INT32);
}

fn install_time_span(registry: &mut TypeRegistry) {
    let ts = Ty::TIME_SPAN;
    let def = registry.prim_def_mut(Prim::TimeSpan);
    for part in ["Days", "Hours", "Minutes", "Seconds", "Milliseconds"] {
        def.property(part, Ty::INT32);
    }
    for total in [
        "TotalDays",
        "TotalHours",
        "TotalMinutes",
        "TotalSeconds",
        "TotalMilliseconds",
    ] {
        def.property(total, Ty::DOUBLE);
    }
    for from in ["FromDays", "FromHours", "FromMinutes", "FromSeconds"] {
        def.static_method(from, &[Ty::DOUBLE], ts.clone());
    }
    def.property("Ticks", Ty::INT64)
        .static_property("Zero", ts.clone())
        .constructor(&[Ty::INT64])
        .constructor(&[Ty::INT32, Ty::INT32, Ty::INT32])
        .constructor(&[Ty::INT32, Ty::INT32, Ty::INT32, Ty::INT32])
        .method("Negate", &[], ts);
}

fn install_guid(registry: &mut TypeRegistry) {
    registry
        .prim_def_mut(Prim::Guid)
        .static_property("Empty", Ty::GUID)
        .static_method("NewGuid", &[], Ty::GUID)
        .static_method("Parse", &[Ty::STRING], Ty::GUID)
        .constructor(&[Ty::STRING]);
}

fn install_math(registry: &mut TypeRegistry) {
    let math = registry.declare("Math", TypeKind::Class);
    let def = registry.def_mut(math);
    def.accessible();
    for ty in [Ty::INT32, Ty::INT64, Ty::SINGLE, Ty::DOUBLE, Ty::DECIMAL] {
        def.static_method("Abs", &[ty.clone()], ty.clone())
            .static_method("Max", &[ty.clone(), ty.clone()], ty.clone())
            .static_method("Min", &[ty.clone(), ty.clone()], ty.clone())
            .static_method("Sign", &[ty], Ty::INT32);
    }
    for ty in [Ty::DOUBLE, Ty::DECIMAL] {
        def.static_method("Round", &[ty.clone()], ty.clone())
            .static_method("Round", &[ty.clone(), Ty::INT32], ty.clone())
            .static_method("Floor", &[ty.clone()], ty.clone())
            .static_method("Ceiling", &[ty.clone()], ty.clone())
            .static_method("Truncate", &[ty.clone()], ty);
    }
    def.static_method("Sqrt", &[Ty::DOUBLE], Ty::DOUBLE)
        .static_method("Pow", &[Ty::DOUBLE, Ty::DOUBLE], Ty::DOUBLE)
        .static_method("Log", &[Ty::DOUBLE], Ty::DOUBLE)
        .static_method("Exp", &[Ty::DOUBLE], Ty::DOUBLE);
}

fn install_convert(registry: &mut TypeRegistry) {
    let convert = registry.declare("Convert", TypeKind::Class);
    let def = registry.def_mut(convert);
    def.accessible();
    for (name, ret) in [
        ("ToBoolean", Ty::BOOL),
        ("ToChar", Ty::CHAR),
        ("ToInt16", Ty::INT16),
        ("ToInt32", Ty::INT32),
        ("ToInt64", Ty::INT64),
        ("ToSingle", Ty::SINGLE),
        ("ToDouble", Ty::DOUBLE),
        ("ToDecimal", Ty::DECIMAL),
        ("ToString", Ty::STRING),
        ("ToDateTime", Ty::DATE_TIME),
    ] {
        def.static_method(name, &[Ty::OBJECT], ret.clone())
            .static_method(name, &[Ty::STRING], ret);
    }
}
