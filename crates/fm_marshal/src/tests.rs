//! End-to-end scenarios across descriptors, values, hooks and both engines.

use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec::Vec;
use std::thread;

use serde_json::json;

use crate::info::{EnumInfo, FieldInfo, ObjectInfo, RecordInfo, TypeInfo, field};
use crate::ops::{ObjectValue, RecordValue, Value};
use crate::registry::{MarshalHook, Registry, RegistryArc, UnmarshalHook};
use crate::{MarshalError, UnmarshalError};

fn record(info: &Arc<RecordInfo>, fields: &[(&str, Value)]) -> Value {
    let builder = fields
        .iter()
        .fold(RecordValue::builder(info), |b, (name, value)| b.with(name, value.clone()));
    Value::Record(builder.build().unwrap())
}

fn foo_bar() -> (Arc<RecordInfo>, Arc<RecordInfo>) {
    let foo = Arc::new(RecordInfo::new("app::Foo", [FieldInfo::new("value", TypeInfo::int())]));
    let bar = Arc::new(RecordInfo::new("app::Bar", [FieldInfo::new("name", TypeInfo::str())]));
    (foo, bar)
}

// -----------------------------------------------------------------------------
// Round trips

#[test]
fn round_trips() {
    let registry = Registry::new();
    let color = Arc::new(EnumInfo::new("app::Color", [("RED", "red"), ("GREEN", "green")]));
    let point = Arc::new(RecordInfo::new("app::Point", [
        FieldInfo::new("x", TypeInfo::float()),
        FieldInfo::new("y", TypeInfo::float()),
        FieldInfo::new("color", TypeInfo::optional(TypeInfo::from(&color))).with_default(Value::Null),
    ]));

    let cases = [
        (Value::Int(-3), TypeInfo::int()),
        (Value::Float(0.25), TypeInfo::float()),
        (Value::from("text"), TypeInfo::str()),
        (Value::Bool(false), TypeInfo::bool()),
        (Value::Null, TypeInfo::null()),
        (
            Value::list([Value::Int(1), Value::Int(2)]),
            TypeInfo::list(TypeInfo::int()),
        ),
        (
            Value::tuple([Value::Int(1), Value::from("a"), Value::Null]),
            TypeInfo::tuple([TypeInfo::int(), TypeInfo::str(), TypeInfo::null()]),
        ),
        (
            Value::set([Value::from("b"), Value::from("a")]),
            TypeInfo::set(TypeInfo::str()),
        ),
        (
            Value::map([(Value::Int(2), Value::from("two")), (Value::Int(1), Value::from("one"))]),
            TypeInfo::map(TypeInfo::int(), TypeInfo::str()),
        ),
        (
            Value::Enum(color.member("GREEN").unwrap()),
            TypeInfo::from(&color),
        ),
        (
            record(&point, &[
                ("x", Value::Float(1.5)),
                ("y", Value::Float(-2.0)),
                ("color", Value::Enum(color.member("RED").unwrap())),
            ]),
            TypeInfo::from(&point),
        ),
        (
            Value::list([record(&point, &[("x", Value::Float(0.0)), ("y", Value::Float(1.0))])]),
            TypeInfo::list(TypeInfo::from(&point)),
        ),
    ];

    for (value, ty) in cases {
        let data = registry.marshal(&value).unwrap();
        assert_eq!(registry.unmarshal(&data, &ty).unwrap(), value, "{ty}");

        let text = registry.marshal_json(&value).unwrap();
        assert_eq!(registry.unmarshal_json(&text, &ty).unwrap(), value, "{ty}");
    }
}

#[test]
fn set_output_is_deterministic() {
    let registry = Registry::new();
    let items: Vec<Value> = (0..32).map(|n| Value::Int((n * 7) % 32)).collect();
    let forward = Value::set(items.iter().cloned());
    let backward = Value::set(items.into_iter().rev());

    let a = registry.marshal_json(&forward).unwrap();
    let b = registry.marshal_json(&backward).unwrap();
    assert_eq!(a, b);
    assert!(a.starts_with("[0,1,2,3,"));
}

// -----------------------------------------------------------------------------
// Errors

#[test]
fn unmarshal_error_messages() {
    let registry = Registry::new();
    let foo = Arc::new(RecordInfo::new("app::Foo", [FieldInfo::new("id", TypeInfo::int())]));

    let cases: [(serde_json::Value, TypeInfo, &str); 6] = [
        (json!(1), TypeInfo::str(), "cannot unmarshal to `str`"),
        (json!({}), TypeInfo::from(&foo), "missing key: id"),
        (json!({ "id": "a" }), TypeInfo::from(&foo), "cannot unmarshal to `int`"),
        (json!([1]), TypeInfo::list(TypeInfo::str()), "cannot unmarshal to `str`"),
        (
            json!([1]),
            TypeInfo::tuple([TypeInfo::int(), TypeInfo::int()]),
            "wrong number of elements",
        ),
        (
            json!([1, 2, 3]),
            TypeInfo::tuple([TypeInfo::int(), TypeInfo::int()]),
            "wrong number of elements",
        ),
    ];
    for (data, ty, message) in cases {
        let err = registry.unmarshal(&data, &ty).unwrap_err();
        assert!(err.to_string().contains(message), "{err}");
    }
}

#[test]
fn marshal_error_messages() {
    let registry = Registry::new();
    let thing = Arc::new(ObjectInfo::new("app::Thing"));

    let err = registry
        .marshal(&Value::Object(ObjectValue::new(&thing, ())))
        .unwrap_err();
    assert!(matches!(err, MarshalError::Unsupported { .. }));
    assert!(err.to_string().starts_with("cannot marshal a value of shape `app::Thing`"));

    let err = registry
        .marshal(&Value::map([(Value::tuple([Value::Int(1), Value::Int(2)]), Value::Int(1))]))
        .unwrap_err();
    assert!(err.to_string().starts_with("cannot marshal dict key"));
}

// -----------------------------------------------------------------------------
// Unions

#[test]
fn union_without_hooks() {
    let (foo, bar) = foo_bar();
    let registry = Registry::new();

    let int_foo = TypeInfo::union([TypeInfo::int(), TypeInfo::from(&foo)]);
    assert_eq!(registry.unmarshal(&json!(1), &int_foo).unwrap(), Value::Int(1));
    assert_eq!(
        registry.unmarshal(&json!({ "value": 1 }), &int_foo).unwrap(),
        record(&foo, &[("value", Value::Int(1))])
    );

    let foo_or_bar = TypeInfo::union([TypeInfo::from(&foo), TypeInfo::from(&bar)]);
    let err = registry.unmarshal(&json!({ "value": 1 }), &foo_or_bar).unwrap_err();
    assert!(matches!(err, UnmarshalError::AmbiguousUnion { .. }));
    assert!(err.to_string().contains("Union[app::Foo, app::Bar]"));

    for ty in [int_foo, foo_or_bar] {
        assert_eq!(registry.unmarshal(&json!(null), &TypeInfo::optional(ty)).unwrap(), Value::Null);
    }
}

#[test]
fn union_hook_resolves_by_key_inspection() {
    let (foo, bar) = foo_bar();
    let (foo_ty, bar_ty) = (TypeInfo::from(&foo), TypeInfo::from(&bar));

    let mut registry = Registry::new();
    let (f, b) = (foo_ty.clone(), bar_ty.clone());
    registry.add_unmarshal_hook(
        &TypeInfo::union([foo_ty.clone(), bar_ty.clone()]),
        UnmarshalHook::with_context(move |data, _, registry| match data.get("value") {
            Some(_) => registry.unmarshal(data, &f),
            None => registry.unmarshal(data, &b),
        }),
    );

    let foo_1 = record(&foo, &[("value", Value::Int(1))]);
    let bar_x = record(&bar, &[("name", Value::from("x"))]);

    for ty in [
        TypeInfo::union([foo_ty.clone(), bar_ty.clone()]),
        TypeInfo::union([bar_ty.clone(), foo_ty.clone()]),
        TypeInfo::optional(TypeInfo::union([foo_ty.clone(), bar_ty.clone()])),
    ] {
        assert_eq!(registry.unmarshal(&json!({ "value": 1 }), &ty).unwrap(), foo_1, "{ty}");
        assert_eq!(registry.unmarshal(&json!({ "name": "x" }), &ty).unwrap(), bar_x, "{ty}");
    }
    let optional = TypeInfo::optional(TypeInfo::union([foo_ty.clone(), bar_ty.clone()]));
    assert_eq!(registry.unmarshal(&json!(null), &optional).unwrap(), Value::Null);

    // Mapping data narrows to the hooked `Union[Foo, Bar]`.
    let with_int = TypeInfo::union([TypeInfo::int(), foo_ty.clone(), bar_ty.clone()]);
    assert_eq!(registry.unmarshal(&json!(1), &with_int).unwrap(), Value::Int(1));
    assert_eq!(registry.unmarshal(&json!({ "value": 1 }), &with_int).unwrap(), foo_1);

    let quux = Arc::new(RecordInfo::new("app::Quux", [FieldInfo::new("value", TypeInfo::str())]));
    let three = TypeInfo::union([foo_ty, bar_ty, TypeInfo::from(&quux)]);
    assert!(registry.unmarshal(&json!(1), &three).is_err());
}

#[test]
fn hooked_members_block_resolution() {
    let foo = Arc::new(RecordInfo::new("app::Foo", [FieldInfo::new("value", TypeInfo::int())]));
    let sub = Arc::new(RecordInfo::extends("app::FooSubclass", &foo, Vec::new()));

    let mut registry = Registry::new();
    let info = foo.clone();
    registry.add_unmarshal_hook(
        &TypeInfo::from(&foo),
        UnmarshalHook::new(move |data| {
            let value = Value::Int(data.as_i64().unwrap_or_default());
            Ok(record(&info, &[("value", value)]))
        }),
    );
    assert_eq!(
        registry.unmarshal(&json!(1), &TypeInfo::from(&foo)).unwrap(),
        record(&foo, &[("value", Value::Int(1))])
    );

    for member in [TypeInfo::from(&foo), TypeInfo::from(&sub)] {
        let union = TypeInfo::union([TypeInfo::int(), member]);
        assert!(registry.unmarshal(&json!(1), &union).is_err());
        assert_eq!(
            registry.unmarshal(&json!(null), &TypeInfo::optional(union)).unwrap(),
            Value::Null
        );
    }
}

// -----------------------------------------------------------------------------
// Dict keys

#[test]
fn dict_key_coercion() {
    let registry = Registry::new();
    let value = Value::map([(Value::Bool(true), Value::Int(1)), (Value::Null, Value::Int(0))]);
    assert_eq!(registry.marshal(&value).unwrap(), json!({ "true": 1, "null": 0 }));

    let bool_keys = TypeInfo::map(TypeInfo::bool(), TypeInfo::int());
    assert_eq!(
        registry.unmarshal(&json!({ "true": 1 }), &bool_keys).unwrap(),
        Value::map([(Value::Bool(true), Value::Int(1))])
    );
    let err = registry.unmarshal(&json!({ "x": 1 }), &bool_keys).unwrap_err();
    assert!(matches!(err, UnmarshalError::InvalidKey { .. }));

    let null_keys = TypeInfo::map(TypeInfo::null(), TypeInfo::int());
    assert!(registry.unmarshal(&json!({ "x": 1 }), &null_keys).is_err());
}

#[test]
fn enum_dict_keys() {
    let registry = Registry::new();
    let str_enum = Arc::new(EnumInfo::new("app::MyStrEnum", [("A", "a")]));
    let bool_enum = Arc::new(EnumInfo::new("app::MyBoolEnum", [("A", true)]));
    let float_enum = Arc::new(EnumInfo::new("app::MyFloatEnum", [("A", 0.1)]));
    let int_enum = Arc::new(EnumInfo::new("app::MyIntEnum", [("A", 1)]));
    let flag = Arc::new(EnumInfo::flag("app::MyFlag", [("A", 1), ("B", 2)]));

    for (info, key) in [
        (&str_enum, "a"),
        (&bool_enum, "true"),
        (&float_enum, "0.1"),
        (&int_enum, "1"),
        (&flag, "1"),
    ] {
        let value = Value::map([(Value::Enum(info.member("A").unwrap()), Value::Int(1))]);
        let data = registry.marshal(&value).unwrap();
        assert_eq!(data, json!({ key: 1 }));

        let ty = TypeInfo::map(TypeInfo::from(info), TypeInfo::int());
        assert_eq!(registry.unmarshal(&data, &ty).unwrap(), value);
    }
}

#[test]
fn enum_hooks_receive_raw_keys() {
    let bool_enum = Arc::new(EnumInfo::new("app::MyBoolEnum", [("A", true)]));
    let ty = TypeInfo::from(&bool_enum);

    let mut registry = Registry::new();
    let info = bool_enum.clone();
    registry.add_unmarshal_hook(
        &ty,
        UnmarshalHook::new(move |data| {
            let flag = match data {
                serde_json::Value::String(s) => s == "true",
                other => other.as_bool().unwrap_or_default(),
            };
            info.from_value(flag)
                .map(Value::Enum)
                .ok_or_else(|| UnmarshalError::custom("unknown member"))
        }),
    );

    let a = Value::Enum(bool_enum.member("A").unwrap());
    assert_eq!(registry.unmarshal(&json!("true"), &ty).unwrap(), a);
    assert_eq!(
        registry
            .unmarshal(&json!({ "true": 1 }), &TypeInfo::map(ty, TypeInfo::int()))
            .unwrap(),
        Value::map([(a, Value::Int(1))])
    );
}

#[test]
fn union_dict_keys() {
    let registry = Registry::new();
    let my_enum = Arc::new(EnumInfo::new("app::MyEnum", [("A", "a")]));

    let int_or_str = TypeInfo::map(TypeInfo::union([TypeInfo::int(), TypeInfo::str()]), TypeInfo::Any);
    assert_eq!(
        registry.unmarshal(&json!({ "a": 1 }), &int_or_str).unwrap(),
        Value::map([(Value::from("a"), Value::Int(1))])
    );

    let int_or_enum = TypeInfo::map(
        TypeInfo::union([TypeInfo::int(), TypeInfo::from(&my_enum)]),
        TypeInfo::Any,
    );
    assert_eq!(
        registry.unmarshal(&json!({ "a": 1 }), &int_or_enum).unwrap(),
        Value::map([(Value::Enum(my_enum.member("A").unwrap()), Value::Int(1))])
    );
}

// -----------------------------------------------------------------------------
// Enums

#[test]
fn flags_combine() {
    let registry = Registry::new();
    let flag = Arc::new(EnumInfo::flag("app::MyFlag", [("A", 1), ("B", 2), ("AB", 3)]));

    let none = flag.combine(&[]).unwrap();
    assert_eq!(registry.marshal(&Value::Enum(none)).unwrap(), json!(0));

    let both = flag.combine(&["A", "B"]).unwrap();
    assert_eq!(registry.marshal(&Value::Enum(both.clone())).unwrap(), json!(3));
    assert_eq!(
        registry.unmarshal(&json!(3), &TypeInfo::from(&flag)).unwrap(),
        Value::Enum(flag.member("AB").unwrap())
    );
    assert_eq!(Value::Enum(both), Value::Enum(flag.member("AB").unwrap()));
}

// -----------------------------------------------------------------------------
// Fields

#[test]
fn field_options() {
    let registry = Registry::new();
    let renamed = Arc::new(RecordInfo::new("app::Renamed", [
        FieldInfo::new("my_field", TypeInfo::int()).with_options(field().rename("my-field")),
    ]));
    let value = record(&renamed, &[("my_field", Value::Int(1))]);
    assert_eq!(registry.marshal(&value).unwrap(), json!({ "my-field": 1 }));
    assert_eq!(
        registry.unmarshal(&json!({ "my-field": 1 }), &TypeInfo::from(&renamed)).unwrap(),
        value
    );

    let omitted = Arc::new(RecordInfo::new("app::Omitted", [
        FieldInfo::new("a", TypeInfo::Any).with_options(field().omit_if_none()),
        FieldInfo::new("b", TypeInfo::Any)
            .with_default(Value::Null)
            .with_options(field().omit()),
    ]));
    let both = record(&omitted, &[("a", Value::Int(1)), ("b", Value::Int(2))]);
    assert_eq!(registry.marshal(&both).unwrap(), json!({ "a": 1 }));
    let none = record(&omitted, &[("a", Value::Null), ("b", Value::Int(2))]);
    assert_eq!(registry.marshal(&none).unwrap(), json!({}));
    assert_eq!(
        registry.unmarshal(&json!({ "a": 1, "b": 2 }), &TypeInfo::from(&omitted)).unwrap(),
        record(&omitted, &[("a", Value::Int(1)), ("b", Value::Null)])
    );
}

#[test]
fn missing_keys_and_defaults() {
    let registry = Registry::new();
    let info = Arc::new(RecordInfo::new("app::Defaults", [
        FieldInfo::new("a", TypeInfo::int()),
        FieldInfo::new("b", TypeInfo::int()).with_default(2),
    ]));
    let ty = TypeInfo::from(&info);
    assert_eq!(
        registry.unmarshal(&json!({ "a": 1 }), &ty).unwrap(),
        record(&info, &[("a", Value::Int(1)), ("b", Value::Int(2))])
    );
    let err = registry.unmarshal(&json!({ "b": 1 }), &ty).unwrap_err();
    assert!(matches!(err, UnmarshalError::MissingKey { ref name, .. } if name == "a"));
}

#[test]
fn field_hooks_override_registry_hooks() {
    let my_string = Arc::new(ObjectInfo::new("app::MyString"));
    let wrap = |s: &str| Value::Object(ObjectValue::new(&my_string, String::from(s)));
    let text = |v: &Value| -> Result<String, MarshalError> {
        v.as_object()
            .and_then(|o| o.downcast_ref::<String>())
            .cloned()
            .ok_or_else(|| MarshalError::custom("not a MyString"))
    };

    let info = Arc::new(RecordInfo::new("app::Tagged", [
        FieldInfo::new("a", TypeInfo::from(&my_string)).with_options(
            field()
                .marshal_with(move |v| Ok(json!(alloc::format!("<{}>", text(v)?))))
                .unmarshal_with({
                    let my_string = my_string.clone();
                    move |data: &serde_json::Value| {
                        let s = data.as_str().unwrap_or_default();
                        let inner = s.trim_start_matches('<').trim_end_matches('>');
                        Ok(Value::Object(ObjectValue::new(&my_string, String::from(inner))))
                    }
                }),
        ),
    ]));

    let mut registry = Registry::new();
    registry.add_marshal_hook(
        &TypeInfo::from(&my_string),
        MarshalHook::new(move |v| Ok(json!(alloc::format!("[{}]", text(v)?)))),
    );
    registry.add_unmarshal_hook(
        &TypeInfo::from(&my_string),
        UnmarshalHook::new(|_| Err(UnmarshalError::custom("registry hook must not run"))),
    );

    let value = record(&info, &[("a", wrap("x"))]);
    assert_eq!(registry.marshal(&value).unwrap(), json!({ "a": "<x>" }));
    assert_eq!(registry.marshal(&wrap("x")).unwrap(), json!("[x]"));
    assert_eq!(
        registry.unmarshal(&json!({ "a": "<x>" }), &TypeInfo::from(&info)).unwrap(),
        value
    );
}

// -----------------------------------------------------------------------------
// JSON text

#[test]
fn json_text_keeps_insertion_order() {
    let registry = Registry::new();
    let value = Value::map(
        ["a", "b", "c", "d", "e"]
            .into_iter()
            .zip(1..)
            .map(|(k, v)| (Value::from(k), Value::Int(v))),
    );
    let text = registry.marshal_json(&value).unwrap();
    assert_eq!(text, r#"{"a":1,"b":2,"c":3,"d":4,"e":5}"#);

    let back = registry
        .unmarshal_json(&text, &TypeInfo::map(TypeInfo::str(), TypeInfo::Any))
        .unwrap();
    assert_eq!(back, value);
}

// -----------------------------------------------------------------------------
// Cloud API scenario

#[derive(Debug, Clone, PartialEq)]
struct Timestamp(String);

struct CloudTypes {
    server_response: Arc<RecordInfo>,
    server: Arc<RecordInfo>,
    ip_address: Arc<RecordInfo>,
    dns_ptr: Arc<RecordInfo>,
    status: Arc<EnumInfo>,
    created: Arc<ObjectInfo>,
}

fn cloud_types() -> CloudTypes {
    let status = Arc::new(EnumInfo::new("hcloud::ServerStatus", [
        ("RUNNING", "running"),
        ("STARTING", "starting"),
        ("STOPPING", "stopping"),
        ("OFF", "off"),
        ("UNKNOWN", "unknown"),
    ]));
    let created = Arc::new(ObjectInfo::new("chrono::DateTime"));

    let server_type = Arc::new(RecordInfo::new("hcloud::ServerType", [
        FieldInfo::new("id", TypeInfo::int()),
        FieldInfo::new("name", TypeInfo::str()),
        FieldInfo::new("num_cores", TypeInfo::int()).with_options(field().rename("cores")),
        FieldInfo::new("memory_gb", TypeInfo::int()).with_options(field().rename("memory")),
        FieldInfo::new("disk_gb", TypeInfo::int()).with_options(field().rename("disk")),
    ]));
    let dns_ptr = Arc::new(RecordInfo::new("hcloud::DnsPtr", [
        FieldInfo::new("ip", TypeInfo::str()),
        FieldInfo::new("dns_ptr", TypeInfo::str()),
    ]));
    let ip_address = Arc::new(RecordInfo::new("hcloud::IPAddress", [
        FieldInfo::new("ip", TypeInfo::str()),
        FieldInfo::new(
            "dns_ptr",
            TypeInfo::union([TypeInfo::str(), TypeInfo::list(TypeInfo::from(&dns_ptr))]),
        ),
    ]));
    let public_net = Arc::new(RecordInfo::new("hcloud::Server::PublicNet", [
        FieldInfo::new("ipv4", TypeInfo::from(&ip_address)),
        FieldInfo::new("ipv6", TypeInfo::from(&ip_address)),
        FieldInfo::new("floating_ips", TypeInfo::list(TypeInfo::int())),
    ]));
    let server = Arc::new(RecordInfo::new("hcloud::Server", [
        FieldInfo::new("id", TypeInfo::int()),
        FieldInfo::new("name", TypeInfo::str()),
        FieldInfo::new("status", TypeInfo::from(&status)),
        FieldInfo::new("created", TypeInfo::from(&created)),
        FieldInfo::new("server_type", TypeInfo::from(&server_type)),
        FieldInfo::new("public_net", TypeInfo::from(&public_net)),
        FieldInfo::new("labels", TypeInfo::map(TypeInfo::str(), TypeInfo::str())),
    ]));
    let server_response = Arc::new(RecordInfo::new("hcloud::ServerResponse", [
        FieldInfo::new("server", TypeInfo::from(&server)),
    ]));

    CloudTypes {
        server_response,
        server,
        ip_address,
        dns_ptr,
        status,
        created,
    }
}

fn cloud_registry(types: &CloudTypes) -> Registry {
    let mut registry = Registry::new();
    let ty = TypeInfo::from(&types.created);
    registry.add_marshal_hook(
        &ty,
        MarshalHook::new(|v| {
            v.as_object()
                .and_then(|o| o.downcast_ref::<Timestamp>())
                .map(|t| json!(t.0))
                .ok_or_else(|| MarshalError::custom("expected a timestamp"))
        }),
    );
    let info = types.created.clone();
    registry.add_unmarshal_hook(
        &ty,
        UnmarshalHook::new(move |data| {
            let text = data.as_str().ok_or_else(|| UnmarshalError::custom("expected a string"))?;
            Ok(Value::Object(ObjectValue::new(&info, Timestamp(String::from(text)))))
        }),
    );
    registry
}

const SERVER_JSON: &str = r#"{
  "server": {
    "id": 42,
    "name": "my-server",
    "status": "running",
    "created": "2016-01-30T23:50:00+00:00",
    "server_type": { "id": 1, "name": "cx11", "cores": 1, "memory": 1, "disk": 25 },
    "public_net": {
      "ipv4": { "ip": "1.2.3.4", "dns_ptr": "server01.example.com" },
      "ipv6": {
        "ip": "2001:db8::/64",
        "dns_ptr": [{ "ip": "2001:db8::1", "dns_ptr": "server.example.com" }]
      },
      "floating_ips": [478]
    },
    "labels": { "env": "prod", "team": "core" }
  }
}"#;

#[test]
fn cloud_server_response() {
    let types = cloud_types();
    let registry = cloud_registry(&types);

    let response = registry
        .unmarshal_json(SERVER_JSON, &TypeInfo::from(&types.server_response))
        .unwrap();
    let server = response.as_record().and_then(|r| r.get("server")).unwrap();
    let fields = server.as_record().unwrap();

    assert_eq!(fields.ty(), types.server.ty());
    assert_eq!(fields.get("id"), Some(&Value::Int(42)));
    assert_eq!(
        fields.get("status"),
        Some(&Value::Enum(types.status.member("RUNNING").unwrap()))
    );
    let created = fields.get("created").and_then(Value::as_object).unwrap();
    assert_eq!(
        created.downcast_ref::<Timestamp>(),
        Some(&Timestamp(String::from("2016-01-30T23:50:00+00:00")))
    );

    let server_type = fields.get("server_type").and_then(Value::as_record).unwrap();
    assert_eq!(server_type.get("num_cores"), Some(&Value::Int(1)));
    assert_eq!(server_type.get("disk_gb"), Some(&Value::Int(25)));

    let public_net = fields.get("public_net").and_then(Value::as_record).unwrap();
    let ipv4 = public_net.get("ipv4").and_then(Value::as_record).unwrap();
    assert_eq!(ipv4.ty(), types.ip_address.ty());
    assert_eq!(ipv4.get("dns_ptr"), Some(&Value::from("server01.example.com")));

    let ipv6 = public_net.get("ipv6").and_then(Value::as_record).unwrap();
    let ptrs = ipv6.get("dns_ptr").and_then(Value::as_list).unwrap();
    let first = ptrs[0].as_record().unwrap();
    assert_eq!(first.ty(), types.dns_ptr.ty());
    assert_eq!(first.get("dns_ptr"), Some(&Value::from("server.example.com")));

    let labels = fields.get("labels").and_then(Value::as_map).unwrap();
    assert_eq!(labels.get(&Value::from("team")), Some(&Value::from("core")));

    let data = registry.marshal(server).unwrap();
    assert_eq!(data["server_type"]["cores"], json!(1));
    assert_eq!(data["created"], json!("2016-01-30T23:50:00+00:00"));
    assert_eq!(
        registry.unmarshal(&data, &TypeInfo::from(&types.server)).unwrap(),
        *server
    );
}

// -----------------------------------------------------------------------------
// Registries

fn install_test_plugin(registry: &mut Registry) {
    let ty = TypeInfo::from(ObjectInfo::new("app::PluginStamp"));
    registry.add_marshal_hook(&ty, |_: &Value| Ok(json!("plugin")));
}

crate::submit_hook_plugin!("fm_marshal::tests::plugin", install_test_plugin);

#[test]
fn plugins_install_once() {
    let stamp = Arc::new(ObjectInfo::new("app::PluginStamp"));
    let value = Value::Object(ObjectValue::new(&stamp, 0_u8));

    let mut registry = Registry::new();
    assert!(registry.marshal(&value).is_err());

    assert!(registry.auto_register());
    let hooks = registry.hook_len();
    assert!(registry.auto_register());
    assert_eq!(registry.hook_len(), hooks);
    assert_eq!(registry.marshal(&value).unwrap(), json!("plugin"));

    assert_eq!(crate::marshal(&value).unwrap(), json!("plugin"));
}

#[test]
fn shared_registry_across_threads() {
    let shared = RegistryArc::new(Registry::new());
    let target = TypeInfo::list(TypeInfo::int());

    let workers: Vec<_> = (0..4)
        .map(|n| {
            let shared = shared.clone();
            let target = target.clone();
            thread::spawn(move || {
                let data = json!([n, n + 1]);
                let value = shared.read().unmarshal(&data, &target).unwrap();
                shared.read().marshal(&value).unwrap()
            })
        })
        .collect();
    shared
        .write()
        .add_marshal_hook(&TypeInfo::str(), |_: &Value| Ok(json!("hooked")));

    for (n, worker) in workers.into_iter().enumerate() {
        let n = n as i64;
        assert_eq!(worker.join().unwrap(), json!([n, n + 1]));
    }
    assert_eq!(shared.read().marshal(&Value::from("s")).unwrap(), json!("hooked"));
    assert_eq!(shared.read().hook_len(), (1, 0));
}
