use crate::{fakes::FakeSeq, model::Injectable, pool::MockPool};

/// 一种注入技术。attempt 汇报本地成败；失败不是错误，只是让位给下一环。
pub(crate) trait Strategy {
    fn attempt(
        &self,
        owner: &mut dyn Injectable,
        mocks: &mut MockPool,
        fakes: &mut FakeSeq,
    ) -> bool;
}

/// 固定顺序的策略链：逐环尝试，首个成功者终止遍历。
/// 空链即 no-op：永远汇报失败，安全地向后让位。
pub(crate) struct Chain {
    links: Vec<Box<dyn Strategy>>,
}

impl Chain {
    pub(crate) fn nop() -> Self {
        Self { links: Vec::new() }
    }

    /// 在链尾追加一环，返回链自身以便连写。
    pub(crate) fn then_try(mut self, strategy: impl Strategy + 'static) -> Self {
        self.links.push(Box::new(strategy));
        self
    }

    /// 一轮中最多一环成功；成功后其余环不再被询问。
    pub(crate) fn process(
        &self,
        owner: &mut dyn Injectable,
        mocks: &mut MockPool,
        fakes: &mut FakeSeq,
    ) -> bool {
        for link in &self.links {
            if link.attempt(owner, mocks, fakes) {
                return true;
            }
        }
        false
    }
}
