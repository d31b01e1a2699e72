use std::any::Any;

/// 类型键：槽位与候选之间的所有匹配都以它为准。
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Type(std::any::TypeId);

impl Type {
    pub fn of<T: 'static>() -> Self {
        Self(std::any::TypeId::of::<T>())
    }
}

impl std::fmt::Debug for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// 目标上的一个依赖槽位：构造参数或可赋值字段。
#[derive(Debug, Clone, Copy)]
pub struct Slot {
    pub name: &'static str,
    pub ty: Type,
    pub type_name: &'static str,
}

/// 注入目标的能力契约：报告自己的依赖槽位，并接受引擎写入的值。
/// 通常由 `#[derive(Injectable)]` 生成，也可以手写。
pub trait Injectable {
    /// 构造槽位，声明顺序即构造参数顺序；fake 按此下标对位。
    fn ctor_slots(&self) -> Vec<Slot>;

    /// 构造路径：values 与 ctor_slots 等长且逐槽类型匹配，一次性写入全部槽位。
    fn assign_ctor(&mut self, values: Vec<Box<dyn Any>>);

    /// 可直接赋值的字段槽位。
    fn field_slots(&self) -> Vec<Slot> {
        self.ctor_slots()
    }

    /// 字段是否已持有非默认值；已持有则字段注入跳过，不覆盖。
    fn field_is_set(&self, name: &str) -> bool;

    /// 单字段写入；类型不符时把值原样退回。
    fn set_field(&mut self, name: &str, value: Box<dyn Any>) -> Result<(), Box<dyn Any>>;
}
