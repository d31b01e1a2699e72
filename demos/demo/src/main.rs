use std::{cell::RefCell, rc::Rc};

use zhuru_rt::{Fixture, Injectable};

#[derive(Default)]
pub struct HttpClientMock {
    pub hits: u32,
}

#[derive(Default, Injectable)]
pub struct UserRepo {
    pub client: Option<Rc<RefCell<HttpClientMock>>>,
    pub table: Option<String>,
}

#[derive(Default, Injectable)]
pub struct UserService {
    pub repo: Option<Rc<RefCell<UserRepo>>>,
    pub greeting: Option<String>,
}

#[derive(Fixture)]
struct ServiceFixture {
    #[subject]
    service: UserService,
    #[mock(inject)]
    repo: Rc<RefCell<UserRepo>>,
    #[mock]
    client: Rc<RefCell<HttpClientMock>>,
    #[fake(1)]
    greeting: String,
}

fn main() -> zhuru_rt::anyhow::Result<()> {
    let mut fx = ServiceFixture {
        service: UserService::default(),
        repo: Rc::new(RefCell::new(UserRepo::default())),
        client: Rc::new(RefCell::new(HttpClientMock::default())),
        greeting: "hello".to_string(),
    };
    fx.inject()?;

    let repo = fx.repo.borrow();
    println!(
        "service.repo={} service.greeting={:?}",
        fx.service.repo.is_some(),
        fx.service.greeting.as_deref(),
    );
    println!(
        "repo.client={} repo.table={:?} client.hits={}",
        repo.client.is_some(),
        repo.table.as_deref(),
        fx.client.borrow().hits,
    );
    Ok(())
}
