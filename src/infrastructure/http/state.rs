//! Application State
//!
//! 每个实体一个服务，服务之间共享同一组端口实现

use std::sync::Arc;

use crate::application::{
    AccountRepositoryPort, AccountService, AuthorRepositoryPort, AuthorService,
    BookRepositoryPort, BookService, PasswordHasherPort, PersonRepositoryPort, PersonService,
    PublisherRepositoryPort, PublisherService, TokenServicePort,
};

/// 应用状态
pub struct AppState {
    pub accounts: AccountService,
    pub persons: PersonService,
    pub authors: AuthorService,
    pub publishers: PublisherService,
    pub books: BookService,
}

impl AppState {
    /// 创建应用状态
    pub fn new(
        account_repo: Arc<dyn AccountRepositoryPort>,
        person_repo: Arc<dyn PersonRepositoryPort>,
        author_repo: Arc<dyn AuthorRepositoryPort>,
        publisher_repo: Arc<dyn PublisherRepositoryPort>,
        book_repo: Arc<dyn BookRepositoryPort>,
        hasher: Arc<dyn PasswordHasherPort>,
        tokens: Arc<dyn TokenServicePort>,
    ) -> Self {
        Self {
            accounts: AccountService::new(account_repo.clone(), hasher, tokens),
            persons: PersonService::new(person_repo, account_repo),
            authors: AuthorService::new(author_repo.clone()),
            publishers: PublisherService::new(publisher_repo.clone()),
            books: BookService::new(book_repo, author_repo, publisher_repo),
        }
    }
}
