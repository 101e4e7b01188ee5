use lumen_rtti::{Handle, ParamList, Shape, TypeCode, TypeError, Value, XmlElement, MAX_ARITY};

fn int_pair_shape() -> Shape {
    match Shape::new(TypeCode::Int32, vec![TypeCode::Int32, TypeCode::Int32]) {
        Ok(shape) => shape,
        Err(err) => panic!("shape rejected: {err}"),
    }
}

fn mixed_shape() -> Shape {
    match Shape::new(
        TypeCode::Void,
        vec![TypeCode::Int32, TypeCode::Int32, TypeCode::Str],
    ) {
        Ok(shape) => shape,
        Err(err) => panic!("shape rejected: {err}"),
    }
}

// ============================================================================
// Typed Construction Tests
// ============================================================================

#[test]
fn test_typed_construction_reads_back() {
    let params = ParamList::of::<i32, _>((7i32, -3i32)).unwrap();

    assert_eq!(params.arity(), 2);
    assert_eq!(params.get::<i32>(0), Some(7));
    assert_eq!(params.get::<i32>(1), Some(-3));
    assert_eq!(params.return_type(), TypeCode::Int32);
    assert_eq!(params.get_return::<i32>(), Some(0));
}

#[test]
fn test_typed_construction_mixed_types() {
    let params = ParamList::of::<(), _>((true, 2.5f32, String::from("hi"))).unwrap();

    assert_eq!(params.signature(), "void(bool,float,string)");
    assert_eq!(params.get::<bool>(0), Some(true));
    assert_eq!(params.get::<f32>(1), Some(2.5));
    assert_eq!(params.get::<String>(2), Some(String::from("hi")));
    assert!(!params.has_return());
}

#[test]
fn test_every_slot_type_reads_back() {
    let params = ParamList::of::<f64, _>((
        true,
        -8i8,
        -16i16,
        32i32,
        -64i64,
        8u8,
        16u16,
        32u32,
        64u64,
        1.5f32,
        2.5f64,
        String::from("txt"),
        Handle(77),
    ))
    .unwrap();

    assert_eq!(
        params.signature(),
        "double(bool,int8,int16,int32,int64,uint8,uint16,uint32,uint64,float,double,string,handle)"
    );
    assert_eq!(params.get::<bool>(0), Some(true));
    assert_eq!(params.get::<i8>(1), Some(-8));
    assert_eq!(params.get::<i16>(2), Some(-16));
    assert_eq!(params.get::<i32>(3), Some(32));
    assert_eq!(params.get::<i64>(4), Some(-64));
    assert_eq!(params.get::<u8>(5), Some(8));
    assert_eq!(params.get::<u16>(6), Some(16));
    assert_eq!(params.get::<u32>(7), Some(32));
    assert_eq!(params.get::<u64>(8), Some(64));
    assert_eq!(params.get::<f32>(9), Some(1.5));
    assert_eq!(params.get::<f64>(10), Some(2.5));
    assert_eq!(params.get::<String>(11), Some(String::from("txt")));
    assert_eq!(params.get::<Handle>(12), Some(Handle(77)));
}

#[test]
fn test_zero_arity_list() {
    let params = ParamList::of::<i32, _>(()).unwrap();

    assert_eq!(params.arity(), 0);
    assert_eq!(params.signature(), "int32()");
    assert_eq!(params.get_return::<i32>(), Some(0));
}

#[test]
fn test_full_width_parameter_list() {
    let params = ParamList::of::<i64, _>((
        1i32, 2i32, 3i32, 4i32, 5i32, 6i32, 7i32, 8i32, 9i32, 10i32, 11i32, 12i32, 13i32, 14i32,
        15i32, 16i32,
    ))
    .unwrap();

    assert_eq!(params.arity(), MAX_ARITY);
    for index in 0..MAX_ARITY {
        assert_eq!(params.get::<i32>(index), Some(index as i32 + 1));
    }
}

#[test]
fn test_shape_rejects_oversized_arity() {
    let result = Shape::new(TypeCode::Void, vec![TypeCode::Int32; MAX_ARITY + 1]);

    assert!(matches!(result, Err(TypeError::ArityOverflow { arity: 17 })));
}

// ============================================================================
// Index Sentinel Tests
// ============================================================================

#[test]
fn test_out_of_range_access_is_inert() {
    let mut params = ParamList::new(int_pair_shape());

    assert_eq!(params.parameter_type(5), TypeCode::Invalid);
    assert_eq!(params.value(5), None);
    assert_eq!(params.get::<i32>(5), None);
    assert!(!params.set(5, 42i32));
}

#[test]
fn test_type_strict_slot_writes() {
    let mut params = ParamList::new(int_pair_shape());

    assert!(params.set(0, 9i32));
    assert!(!params.set(0, String::from("nine")));
    assert_eq!(params.get::<i32>(0), Some(9));
}

#[test]
fn test_in_place_slot_mutation() {
    // Method bodies write results through the raw slot references.
    let mut params = ParamList::of::<i32, _>((10i32, 20i32)).unwrap();

    if let Some(slot) = params.value_mut(0) {
        *slot = Value::Int32(11);
    }
    assert_eq!(params.get::<i32>(0), Some(11));
    assert!(params.value_mut(9).is_none());

    if let Some(ret) = params.return_value_mut() {
        *ret = Value::Int32(31);
    }
    assert_eq!(params.get_return::<i32>(), Some(31));

    let mut procedure = ParamList::new(mixed_shape());
    assert!(procedure.return_value_mut().is_none());
}

#[test]
fn test_return_slot_is_type_strict() {
    let mut params = ParamList::new(int_pair_shape());

    assert!(params.set_return(Value::Int32(11)));
    assert!(!params.set_return(Value::Double(1.0)));
    assert_eq!(params.get_return::<i32>(), Some(11));
}

// ============================================================================
// Textual Binding Tests
// ============================================================================

#[test]
fn test_from_text_binds_positionally() {
    // Pair names are irrelevant for binding, only order counts.
    let params = ParamList::from_text(mixed_shape(), "a=1 b=2 c=three");

    assert_eq!(params.get::<i32>(0), Some(1));
    assert_eq!(params.get::<i32>(1), Some(2));
    assert_eq!(params.get::<String>(2), Some(String::from("three")));
}

#[test]
fn test_from_text_missing_pairs_keep_defaults() {
    let params = ParamList::from_text(mixed_shape(), "a=1 b=2");

    assert_eq!(params.get::<i32>(0), Some(1));
    assert_eq!(params.get::<i32>(1), Some(2));
    assert_eq!(params.get::<String>(2), Some(String::new()));
}

#[test]
fn test_from_text_empty_input_is_all_defaults() {
    let params = ParamList::from_text(mixed_shape(), "");

    assert_eq!(params, ParamList::new(mixed_shape()));
}

#[test]
fn test_from_text_stops_at_first_unparsable_token() {
    let params = ParamList::from_text(mixed_shape(), "a=1 garbage c=three");

    assert_eq!(params.get::<i32>(0), Some(1));
    assert_eq!(params.get::<i32>(1), Some(0));
    assert_eq!(params.get::<String>(2), Some(String::new()));
}

#[test]
fn test_from_text_quoted_values() {
    let shape = Shape::new(TypeCode::Void, vec![TypeCode::Str, TypeCode::Str]).unwrap();
    let params = ParamList::from_text(shape, "first=\"hello world\" second='x y'");

    assert_eq!(params.get::<String>(0), Some(String::from("hello world")));
    assert_eq!(params.get::<String>(1), Some(String::from("x y")));
}

#[test]
fn test_from_text_unparsable_number_defaults() {
    let params = ParamList::from_text(int_pair_shape(), "a=abc b=2");

    assert_eq!(params.get::<i32>(0), Some(0));
    assert_eq!(params.get::<i32>(1), Some(2));
}

// ============================================================================
// XML Binding Tests
// ============================================================================

#[test]
fn test_from_xml_binds_positionally() {
    let element = XmlElement::parse("<Call x=\"4\" y=\"5\" label=\"hit\"/>").unwrap();
    let params = ParamList::from_xml(mixed_shape(), &element);

    assert_eq!(params.get::<i32>(0), Some(4));
    assert_eq!(params.get::<i32>(1), Some(5));
    assert_eq!(params.get::<String>(2), Some(String::from("hit")));
}

#[test]
fn test_from_xml_no_attributes_is_all_defaults() {
    let element = XmlElement::parse("<Call/>").unwrap();
    let params = ParamList::from_xml(int_pair_shape(), &element);

    assert_eq!(params, ParamList::new(int_pair_shape()));
}

// ============================================================================
// Copy Semantics Tests
// ============================================================================

#[test]
fn test_clone_resets_return_slot() {
    let mut params = ParamList::new(int_pair_shape());
    params.set(0, 3i32);
    params.set(1, 4i32);
    params.set_return(Value::Int32(99));

    let cloned = params.clone();

    assert_eq!(cloned.get::<i32>(0), Some(3));
    assert_eq!(cloned.get::<i32>(1), Some(4));
    assert_eq!(cloned.get_return::<i32>(), Some(0));
}

#[test]
fn test_assign_from_copies_return_slot() {
    let mut source = ParamList::new(int_pair_shape());
    source.set(0, 3i32);
    source.set_return(Value::Int32(99));

    let mut target = ParamList::new(int_pair_shape());
    assert!(target.assign_from(&source));
    assert_eq!(target.get::<i32>(0), Some(3));
    assert_eq!(target.get_return::<i32>(), Some(99));
}

#[test]
fn test_assign_from_rejects_shape_mismatch() {
    let source = ParamList::of::<i32, _>((1i32,)).unwrap();
    let mut target = ParamList::new(int_pair_shape());
    target.set(0, 5i32);

    assert!(!target.assign_from(&source));
    assert_eq!(target.get::<i32>(0), Some(5));
}

// ============================================================================
// Fingerprint Tests
// ============================================================================

#[test]
fn test_identical_shapes_share_fingerprint() {
    let a = ParamList::of::<f32, _>((1i32, String::from("x"))).unwrap();
    let b = ParamList::of::<f32, _>((9i32, String::from("y"))).unwrap();

    assert_eq!(a.signature(), b.signature());
    assert_eq!(a.signature(), "float(int32,string)");
}

#[test]
fn test_fingerprint_distinguishes_return_type() {
    let a = ParamList::of::<i32, _>((1i32,)).unwrap();
    let b = ParamList::of::<(), _>((1i32,)).unwrap();

    assert_ne!(a.signature(), b.signature());
}
