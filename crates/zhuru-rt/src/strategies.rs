use std::collections::BTreeSet;

use tracing::{debug, trace};

use crate::{
    chain::Strategy,
    engine,
    fakes::FakeSeq,
    model::Injectable,
    pool::{MockEntry, MockPool},
};

enum Bind {
    Fake(usize),
    Mock(usize),
}

/// 构造注入：按声明顺序给每个构造槽位找值，同位置的 fake 优先、mock 其次。
/// 任一槽位无解则整体放弃；放弃的尝试不在池或序列上留下任何消费痕迹。
pub(crate) struct ConstructorInjection;

impl Strategy for ConstructorInjection {
    fn attempt(
        &self,
        owner: &mut dyn Injectable,
        mocks: &mut MockPool,
        fakes: &mut FakeSeq,
    ) -> bool {
        let slots = owner.ctor_slots();
        if slots.is_empty() {
            return false;
        }

        // 规划阶段：只预订，不消费。
        let mut plan = Vec::with_capacity(slots.len());
        let mut reserved = Vec::new();
        for (pos, slot) in slots.iter().enumerate() {
            if fakes.matches(pos, slot.ty) {
                plan.push(Bind::Fake(pos));
                continue;
            }
            if let Some(i) = mocks.find(slot.ty, &reserved) {
                reserved.push(i);
                plan.push(Bind::Mock(i));
                continue;
            }
            trace!(slot = slot.name, ty = slot.type_name, "构造槽位无候选，整体放弃");
            return false;
        }

        // 提交阶段：规划完整才允许消费。
        let picked: BTreeSet<usize> = reserved.iter().copied().collect();
        let mut taken = mocks.take_set(&picked);
        let mut values = Vec::with_capacity(plan.len());
        for bind in plan {
            let value = match bind {
                Bind::Fake(pos) => fakes.take(pos).expect("规划阶段已确认该位置有 fake"),
                Bind::Mock(i) => taken.remove(&i).expect("规划阶段已预订该候选"),
            };
            values.push(value);
        }
        debug!(slots = values.len(), "构造注入成功");
        owner.assign_ctor(values);
        true
    }
}

/// 字段注入：构造注入不适用或失败时，把剩余 mock 按类型直接赋给尚未持值
/// 的字段；已持值的字段不覆盖。fake 不参与字段注入。至少命中一个字段才算
/// 成功。
pub(crate) struct PropertyFieldInjection;

impl Strategy for PropertyFieldInjection {
    fn attempt(
        &self,
        owner: &mut dyn Injectable,
        mocks: &mut MockPool,
        _fakes: &mut FakeSeq,
    ) -> bool {
        let mut bound = 0usize;
        for slot in owner.field_slots() {
            if owner.field_is_set(slot.name) {
                continue;
            }
            let Some(i) = mocks.find(slot.ty, &[]) else {
                continue;
            };
            let MockEntry {
                ty,
                type_name,
                value,
                reentry,
            } = mocks.take_entry(i);
            match owner.set_field(slot.name, value) {
                Ok(()) => {
                    trace!(field = slot.name, mock = type_name, "字段注入命中");
                    if let Some(reentry) = reentry {
                        mocks.note_injected(reentry);
                    }
                    bound += 1;
                }
                Err(value) => {
                    // 类型键相同但实现拒收：原位放回，保持池序。
                    mocks.restore_entry(
                        i,
                        MockEntry {
                            ty,
                            type_name,
                            value,
                            reentry,
                        },
                    );
                }
            }
        }
        bound > 0
    }
}

/// 嵌套传播：对本轮刚被注入进目标、且自身声明了依赖槽位的 mock，以其为
/// 新的 owner 递归执行完整一轮，共享同一个（已缩小的）池与 fake 序列。
/// 递归深度受对象图深度约束；substitute 每轮新建，不会注入到自身。
pub(crate) struct NestedPropagation;

impl Strategy for NestedPropagation {
    fn attempt(
        &self,
        _owner: &mut dyn Injectable,
        mocks: &mut MockPool,
        fakes: &mut FakeSeq,
    ) -> bool {
        let pending = mocks.drain_injected();
        if pending.is_empty() {
            return false;
        }
        debug!(count = pending.len(), "向嵌套 substitute 传播注入");
        for handle in &pending {
            handle.with_owner(&mut |owner| engine::run_pass(owner, mocks, fakes));
        }
        true
    }
}
