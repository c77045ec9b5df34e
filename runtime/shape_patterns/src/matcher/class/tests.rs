use super::*;
use crate::build::{build, MatcherBuilder};
use crate::extract::{Extracted, ExtractorRegistry};
use crate::pattern::Pattern;
use pretty_assertions::assert_eq;
use shape_value::{Attributes, TypeDecl, TypeRegistry};

struct Fixture {
    registry: TypeRegistry,
    point: TypeRef,
    circle: TypeRef,
    list: TypeRef,
    nil: TypeRef,
    cons: TypeRef,
}

fn fixture() -> Fixture {
    let mut registry = TypeRegistry::new();
    let point = registry
        .define(TypeDecl::new("Point").fields(["x", "y"]))
        .unwrap();
    let circle = registry
        .define(TypeDecl::new("Circle").fields(["r"]))
        .unwrap();
    let family = registry
        .define_family(
            TypeDecl::new("List"),
            [
                TypeDecl::new("Nil"),
                TypeDecl::new("Cons").fields(["head", "tail"]),
            ],
        )
        .unwrap();
    let [list, nil, cons]: [TypeRef; 3] = family.try_into().unwrap();
    Fixture {
        registry,
        point,
        circle,
        list,
        nil,
        cons,
    }
}

impl Fixture {
    fn point(&self, x: i64, y: i64) -> Value {
        self.point
            .construct(vec![Value::int(x), Value::int(y)])
            .unwrap()
    }

    fn linked(&self, items: &[i64]) -> Value {
        let mut list = self.nil.construct(vec![]).unwrap();
        for &item in items.iter().rev() {
            list = self.cons.construct(vec![Value::int(item), list]).unwrap();
        }
        list
    }
}

fn half(value: &Value, _: &[Name]) -> Option<Extracted> {
    let n = value.as_int()?;
    (n % 2 == 0).then(|| Extracted::positional(vec![Value::int(n / 2)]))
}

#[test]
fn declared_type_binds_positional_fields() {
    let f = fixture();
    let m = build(&Pattern::class(
        &f.point,
        vec![Pattern::name("x"), Pattern::name("y")],
    ));
    let bindings = m.attempt_match(&f.point(1, 2)).unwrap();
    assert_eq!(bindings.get("x"), Some(&Value::int(1)));
    assert_eq!(bindings.get("y"), Some(&Value::int(2)));
}

#[test]
fn declared_type_rejects_other_shapes() {
    let f = fixture();
    let m = build(&Pattern::class(
        &f.point,
        vec![Pattern::name("x"), Pattern::name("y")],
    ));
    let circle = f.circle.construct(vec![Value::int(3)]).unwrap();
    assert_eq!(m.attempt_match(&circle), Err(Mismatch));
    assert_eq!(m.attempt_match(&Value::int(1)), Err(Mismatch));
    assert_eq!(
        m.attempt_match(&Value::tuple(vec![Value::int(1), Value::int(2)])),
        Err(Mismatch)
    );
}

#[test]
fn fewer_positional_patterns_than_fields_is_allowed() {
    let f = fixture();
    let m = build(&Pattern::class(&f.point, vec![Pattern::name("a")]));
    let bindings = m.attempt_match(&f.point(5, 6)).unwrap();
    assert_eq!(bindings.len(), 1);
    assert_eq!(bindings.get("a"), Some(&Value::int(5)));
}

#[test]
fn more_positional_patterns_than_fields_mismatches() {
    let f = fixture();
    let m = build(&Pattern::class(
        &f.circle,
        vec![Pattern::name("r"), Pattern::name("extra")],
    ));
    let circle = f.circle.construct(vec![Value::int(3)]).unwrap();
    assert_eq!(m.attempt_match(&circle), Err(Mismatch));
}

#[test]
fn keyword_patterns_read_attributes_by_name() {
    let f = fixture();
    let m = build(
        &Pattern::class(&f.point, vec![])
            .with_keyword("y", Pattern::name("py"))
            .with_keyword("x", Pattern::lit(Value::int(1))),
    );
    let bindings = m.attempt_match(&f.point(1, 7)).unwrap();
    assert_eq!(bindings.get("py"), Some(&Value::int(7)));
    assert_eq!(m.attempt_match(&f.point(2, 7)), Err(Mismatch));

    let missing = build(&Pattern::class(&f.point, vec![]).with_keyword("z", Pattern::Wildcard));
    assert_eq!(missing.attempt_match(&f.point(1, 2)), Err(Mismatch));
}

#[test]
fn failure_in_middle_leaves_no_bindings() {
    let mut registry = TypeRegistry::new();
    let triple = registry
        .define(TypeDecl::new("Triple").fields(["a", "b", "c"]))
        .unwrap();
    let value = triple
        .construct(vec![Value::int(1), Value::int(2), Value::int(3)])
        .unwrap();
    let m = build(&Pattern::class(
        &triple,
        vec![
            Pattern::name("a"),
            Pattern::lit(Value::int(99)),
            Pattern::name("c"),
        ],
    ));
    assert_eq!(m.attempt_match(&value), Err(Mismatch));
}

#[test]
fn nested_linked_structure() {
    let f = fixture();
    let m = build(&Pattern::class(
        &f.cons,
        vec![
            Pattern::name("head"),
            Pattern::class(
                &f.cons,
                vec![Pattern::name("head2"), Pattern::class(&f.nil, vec![])],
            ),
        ],
    ));

    let bindings = m.attempt_match(&f.linked(&[1, 2])).unwrap();
    assert_eq!(bindings.get("head"), Some(&Value::int(1)));
    assert_eq!(bindings.get("head2"), Some(&Value::int(2)));

    assert_eq!(m.attempt_match(&f.linked(&[1])), Err(Mismatch));
    assert_eq!(m.attempt_match(&f.linked(&[])), Err(Mismatch));
    assert_eq!(m.attempt_match(&f.linked(&[1, 2, 3])), Err(Mismatch));
}

#[test]
fn family_root_matches_every_variant() {
    let f = fixture();
    let m = build(&Pattern::alias("l", Pattern::class(&f.list, vec![])));
    assert!(m.attempt_match(&f.linked(&[])).is_ok());
    assert!(m.attempt_match(&f.linked(&[4, 5])).is_ok());
    assert_eq!(m.attempt_match(&f.point(0, 0)), Err(Mismatch));
}

#[test]
fn extractor_matches_values_of_any_type() {
    let mut extractors = ExtractorRegistry::new();
    let half = extractors.register("Half", half);
    let m = build(&Pattern::class(half, vec![Pattern::name("n")]));

    let bindings = m.attempt_match(&Value::int(8)).unwrap();
    assert_eq!(bindings.get("n"), Some(&Value::int(4)));
    assert_eq!(m.attempt_match(&Value::int(7)), Err(Mismatch));
    assert_eq!(m.attempt_match(&Value::string("8")), Err(Mismatch));
}

#[test]
fn extractor_sub_patterns_recurse() {
    let extractor = Extractor::new("Half", half);
    // Half(Half(q)): divisible by four
    let m = build(&Pattern::class(
        extractor.clone(),
        vec![Pattern::class(extractor, vec![Pattern::name("q")])],
    ));
    let bindings = m.attempt_match(&Value::int(12)).unwrap();
    assert_eq!(bindings.get("q"), Some(&Value::int(3)));
    assert_eq!(m.attempt_match(&Value::int(6)), Err(Mismatch));
}

#[test]
fn extractor_receives_requested_keywords() {
    fn polar(value: &Value, requested: &[Name]) -> Option<Extracted> {
        let obj = value.as_object()?;
        let x = obj.get_attr("x")?.as_int()?;
        let y = obj.get_attr("y")?.as_int()?;
        let mut extracted = Extracted::positional(vec![Value::int(x * x + y * y)]);
        for name in requested {
            if name.as_str() == "quadrant" {
                let q = match (x >= 0, y >= 0) {
                    (true, true) => 1,
                    (false, true) => 2,
                    (false, false) => 3,
                    (true, false) => 4,
                };
                extracted = extracted.with_keyword("quadrant", Value::int(q));
            }
        }
        Some(extracted)
    }

    let f = fixture();
    let polar = Extractor::new("Polar", polar);
    let m = build(
        &Pattern::class(polar.clone(), vec![Pattern::name("r2")])
            .with_keyword("quadrant", Pattern::name("q")),
    );
    let bindings = m.attempt_match(&f.point(-3, 4)).unwrap();
    assert_eq!(bindings.get("r2"), Some(&Value::int(25)));
    assert_eq!(bindings.get("q"), Some(&Value::int(2)));

    let unknown = build(&Pattern::class(polar, vec![]).with_keyword("angle", Pattern::Wildcard));
    assert_eq!(unknown.attempt_match(&f.point(1, 1)), Err(Mismatch));
}

#[test]
fn extractor_with_too_few_positional_fields_mismatches() {
    let m = build(&Pattern::class(
        Extractor::new("Half", half),
        vec![Pattern::name("a"), Pattern::name("b")],
    ));
    assert_eq!(m.attempt_match(&Value::int(4)), Err(Mismatch));
}

#[test]
fn renamed_attribute_breaks_positional_fallback() {
    fn hide_x(attrs: &mut Attributes) {
        if let Some(x) = attrs.remove("x") {
            attrs.insert("_x", x);
        }
    }

    let mut registry = TypeRegistry::new();
    let hidden = registry
        .define(TypeDecl::new("Hidden").fields(["x"]).init(hide_x))
        .unwrap();
    let value = hidden.construct(vec![Value::int(1)]).unwrap();

    let positional = build(&Pattern::class(&hidden, vec![Pattern::name("x")]));
    assert_eq!(positional.attempt_match(&value), Err(Mismatch));

    let by_storage = build(&Pattern::class(&hidden, vec![]).with_keyword("_x", Pattern::name("x")));
    let bindings = by_storage.attempt_match(&value).unwrap();
    assert_eq!(bindings.get("x"), Some(&Value::int(1)));
}

#[test]
fn registry_schema_provider_rejects_foreign_types() {
    let f = fixture();
    let mut other = TypeRegistry::new();
    let foreign = other
        .define(TypeDecl::new("Point").fields(["x", "y"]))
        .unwrap();
    let value = foreign
        .construct(vec![Value::int(1), Value::int(2)])
        .unwrap();

    let builder = MatcherBuilder::new(f.registry);
    let pattern = Pattern::class(&foreign, vec![Pattern::name("x")]);
    assert_eq!(builder.build(&pattern).attempt_match(&value), Err(Mismatch));
    assert!(build(&pattern).attempt_match(&value).is_ok());
}

#[test]
fn resolve_prefers_extractor_over_declared_type() {
    let f = fixture();
    let mut extractors = ExtractorRegistry::new();
    extractors.register("Point", half);

    let target = Target::resolve("Point", &extractors, &f.registry).unwrap();
    assert!(matches!(target, Target::Extractor(_)));
    let target = Target::resolve("Circle", &extractors, &f.registry).unwrap();
    assert!(matches!(target, Target::Type(ref ty) if *ty == f.circle));
    assert!(Target::resolve("Square", &extractors, &f.registry).is_none());
}

#[test]
fn pattern_display() {
    let f = fixture();
    let pattern = Pattern::class(
        &f.cons,
        vec![
            Pattern::name("h"),
            Pattern::class(&f.nil, vec![]),
        ],
    )
    .with_keyword("tail", Pattern::Wildcard);
    assert_eq!(pattern.to_string(), "Cons(h, Nil(), tail=_)");
    assert_eq!(pattern.depth(), 2);
}

#[test]
#[cfg(debug_assertions)]
#[should_panic(expected = "keyword sub-pattern on non-class pattern")]
fn keyword_on_sequence_pattern_panics_in_debug() {
    let _ = Pattern::seq(vec![]).with_keyword("x", Pattern::Wildcard);
}
