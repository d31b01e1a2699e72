use std::any::Any;

use anyhow::{Result, anyhow};

use crate::model::Type;

struct FakeSlot {
    ty: Type,
    value: Box<dyn Any>,
}

/// 按构造参数位置排列的 fake 序列。空位是显式的 absent：匹配时跳过，
/// 永远不会用 mock 回填。每轮注入构建一次，用完即弃。
#[derive(Default)]
pub struct FakeSeq {
    slots: Vec<Option<FakeSlot>>,
}

impl FakeSeq {
    pub fn new() -> Self {
        Self::default()
    }

    /// 把 value 绑定到位置 pos，中间空隙补 absent。
    /// 同一位置绑定两次是配置错误：立刻报错，不静默覆盖。
    pub fn bind<T: Any>(&mut self, pos: usize, value: T) -> Result<()> {
        while self.slots.len() <= pos {
            self.slots.push(None);
        }
        if self.slots[pos].is_some() {
            return Err(anyhow!("无效的 fake 声明：位置 {pos} 被多个字段声明"));
        }
        self.slots[pos] = Some(FakeSlot {
            ty: Type::of::<T>(),
            value: Box::new(value),
        });
        Ok(())
    }

    /// 序列长度 = 已声明的最高位置 + 1；消费不会缩短序列。
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// 位置 pos 是否存在未消费且类型相符的 fake。
    pub(crate) fn matches(&self, pos: usize, ty: Type) -> bool {
        matches!(self.slots.get(pos), Some(Some(slot)) if slot.ty == ty)
    }

    /// 取走位置 pos 的 fake，并把该位置标记为已消费。
    pub(crate) fn take(&mut self, pos: usize) -> Option<Box<dyn Any>> {
        self.slots.get_mut(pos)?.take().map(|slot| slot.value)
    }
}
