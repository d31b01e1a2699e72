use std::any::Any;

use zhuru_macros::{Fixture, Injectable};
use zhuru_rt::Injectable as _;

#[derive(Debug, Default, Clone, PartialEq)]
struct Dep;

#[derive(Default, Injectable)]
struct Target {
    dep: Option<Dep>,
    label: Option<String>,
    count: u32,
}

#[test]
fn derive_injectable_槽位顺序与类型对应字段声明() {
    let target = Target::default();
    let slots = target.ctor_slots();
    assert_eq!(slots.len(), 3);
    assert_eq!(slots[0].name, "dep");
    assert_eq!(slots[1].name, "label");
    assert_eq!(slots[2].name, "count");
    assert!(slots[0].ty == zhuru_rt::Type::of::<Dep>());
    assert!(slots[1].ty == zhuru_rt::Type::of::<String>());
    assert!(slots[2].ty == zhuru_rt::Type::of::<u32>());
}

#[test]
fn derive_injectable_assign_ctor一次写入全部槽位() {
    let mut target = Target::default();
    target.assign_ctor(vec![
        Box::new(Dep) as Box<dyn Any>,
        Box::new("标签".to_string()),
        Box::new(5u32),
    ]);
    assert_eq!(target.dep, Some(Dep));
    assert_eq!(target.label.as_deref(), Some("标签"));
    assert_eq!(target.count, 5);
}

#[test]
fn derive_injectable_set_field类型不符原样退回() {
    let mut target = Target::default();
    let rejected = target.set_field("label", Box::new(3u8)).unwrap_err();
    assert_eq!(*rejected.downcast::<u8>().unwrap(), 3);

    assert!(target.set_field("label", Box::new("ok".to_string())).is_ok());
    assert!(target.field_is_set("label"));
}

#[test]
fn derive_injectable_非option字段不参与字段注入() {
    let mut target = Target::default();
    assert!(target.field_is_set("count"));
    assert!(target.set_field("count", Box::new(1u32)).is_err());
}

#[test]
fn derive_fixture_生成inject并完成注入() {
    #[derive(Fixture)]
    struct Fx {
        #[subject]
        target: Target,
        #[mock]
        dep: Dep,
        #[fake(1)]
        label: String,
        #[fake(2)]
        count: u32,
    }

    let mut fx = Fx {
        target: Target::default(),
        dep: Dep,
        label: "名字".to_string(),
        count: 9,
    };
    fx.inject().unwrap();

    assert_eq!(fx.target.dep, Some(Dep));
    assert_eq!(fx.target.label.as_deref(), Some("名字"));
    assert_eq!(fx.target.count, 9);
}

#[test]
fn derive_fixture_fake位置重复在inject时报配置错误() {
    #[derive(Fixture)]
    struct Fx {
        #[fake(0)]
        a: String,
        #[fake(0)]
        b: String,
    }

    let mut fx = Fx {
        a: "x".to_string(),
        b: "y".to_string(),
    };
    let err = fx.inject().unwrap_err().to_string();
    assert!(err.contains("位置 0"));
}

#[test]
fn derive_fixture_没有subject时只验配置不注入() {
    #[derive(Fixture)]
    struct Fx {
        #[mock]
        dep: Dep,
        #[fake(0)]
        a: String,
    }

    let mut fx = Fx {
        dep: Dep,
        a: "x".to_string(),
    };
    fx.inject().unwrap();
}
