use std::{
    any::Any,
    cell::RefCell,
    collections::{BTreeMap, BTreeSet},
    rc::Rc,
};

use crate::model::{Injectable, Type};

/// 已注入 mock 的回入口：嵌套传播沿它把该 mock 当作新的 owner 继续注入。
pub(crate) trait ReEntry {
    fn with_owner(&self, f: &mut dyn FnMut(&mut dyn Injectable));
}

struct SharedReEntry<M: Injectable>(Rc<RefCell<M>>);

impl<M: Injectable> ReEntry for SharedReEntry<M> {
    fn with_owner(&self, f: &mut dyn FnMut(&mut dyn Injectable)) {
        f(&mut *self.0.borrow_mut());
    }
}

pub(crate) struct MockEntry {
    pub(crate) ty: Type,
    pub(crate) type_name: &'static str,
    pub(crate) value: Box<dyn Any>,
    pub(crate) reentry: Option<Rc<dyn ReEntry>>,
}

/// mock 候选池。插入顺序即匹配顺序：同类型多个候选时取最先加入的，
/// 同一输入下解析结果可复现。每个候选整轮注入最多被消费一次。
#[derive(Default)]
pub struct MockPool {
    entries: Vec<MockEntry>,
    injected: Vec<Rc<dyn ReEntry>>,
}

impl MockPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// 加入一个占据类型 T 槽位的 mock。
    pub fn add<T: Any>(&mut self, mock: T) {
        self.entries.push(MockEntry {
            ty: Type::of::<T>(),
            type_name: std::any::type_name::<T>(),
            value: Box::new(mock),
            reentry: None,
        });
    }

    /// 加入一个自身也声明依赖槽位的 mock。被消费后，引擎会沿共享句柄
    /// 把它当作新的 owner 继续传播注入。
    pub fn add_injectable<M: Injectable + 'static>(&mut self, mock: Rc<RefCell<M>>) {
        self.entries.push(MockEntry {
            ty: Type::of::<Rc<RefCell<M>>>(),
            type_name: std::any::type_name::<Rc<RefCell<M>>>(),
            value: Box::new(Rc::clone(&mock)),
            reentry: Some(Rc::new(SharedReEntry(mock))),
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 从头扫描第一个类型相符、且未被 reserved 预订的候选下标。
    pub(crate) fn find(&self, ty: Type, reserved: &[usize]) -> Option<usize> {
        self.entries
            .iter()
            .enumerate()
            .find(|(i, entry)| entry.ty == ty && !reserved.contains(i))
            .map(|(i, _)| i)
    }

    /// 构造注入的提交阶段：按下标集合一次性取走候选，登记其中可传播的
    /// 回入口。返回按原下标索引的值表；剩余候选相对顺序不变。
    pub(crate) fn take_set(&mut self, picked: &BTreeSet<usize>) -> BTreeMap<usize, Box<dyn Any>> {
        let mut out = BTreeMap::new();
        let mut kept = Vec::new();
        for (i, entry) in std::mem::take(&mut self.entries).into_iter().enumerate() {
            if picked.contains(&i) {
                if let Some(reentry) = entry.reentry {
                    self.injected.push(reentry);
                }
                out.insert(i, entry.value);
            } else {
                kept.push(entry);
            }
        }
        self.entries = kept;
        out
    }

    /// 取出下标 i 的完整候选；被拒收时用 restore 原位放回。
    pub(crate) fn take_entry(&mut self, i: usize) -> MockEntry {
        self.entries.remove(i)
    }

    pub(crate) fn restore_entry(&mut self, i: usize, entry: MockEntry) {
        self.entries.insert(i, entry);
    }

    /// 登记一个本轮刚被注入的回入口。
    pub(crate) fn note_injected(&mut self, reentry: Rc<dyn ReEntry>) {
        self.injected.push(reentry);
    }

    /// 取走本轮已登记的全部回入口。
    pub(crate) fn drain_injected(&mut self) -> Vec<Rc<dyn ReEntry>> {
        std::mem::take(&mut self.injected)
    }
}
