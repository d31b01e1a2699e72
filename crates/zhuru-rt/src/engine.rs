use tracing::debug;

use crate::{
    chain::Chain,
    fakes::FakeSeq,
    model::Injectable,
    pool::MockPool,
    strategies::{ConstructorInjection, NestedPropagation, PropertyFieldInjection},
};

/// 唯一入口：对 owner 执行一轮注入。池与序列为本轮独占，轮结束即弃。
///
/// 技术顺序固定：构造注入 → 字段注入 → 嵌套传播。引擎无状态，链每次调用
/// 重建。解析失败静默（目标保持原样）；配置错误在池构建阶段早已报出，
/// 到这里不再有可失败的路径。
pub fn inject_on_fields(owner: &mut dyn Injectable, mut mocks: MockPool, mut fakes: FakeSeq) {
    run_pass(owner, &mut mocks, &mut fakes);
}

/// 嵌套传播处理的是主链刚注入的 mock，必须在主链之后单独执行；
/// 并入主链会让它在主链成功的轮次永远轮不到。
pub(crate) fn run_pass(owner: &mut dyn Injectable, mocks: &mut MockPool, fakes: &mut FakeSeq) {
    let primary = Chain::nop()
        .then_try(ConstructorInjection)
        .then_try(PropertyFieldInjection);
    let post = Chain::nop().then_try(NestedPropagation);

    let injected = primary.process(owner, mocks, fakes);
    debug!(injected, remaining = mocks.len(), "主链执行完毕");
    post.process(owner, mocks, fakes);
}
