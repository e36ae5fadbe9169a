//! Account Service
//!
//! 账号创建、登录与 Token 认证

use std::sync::Arc;

use crate::application::commands::{ChangePassword, CreateAccount, DeleteAccount, Login};
use crate::application::error::{missing, ApplicationError, FieldResultExt};
use crate::application::ports::{
    AccountRecord, AccountRepositoryPort, IssuedToken, NewAccount, PasswordHasherPort,
    TokenServicePort,
};
use crate::application::queries::{GetAccount, ListAccounts, Page};
use crate::domain::identity::{Password, Username};

/// 登录结果
#[derive(Debug, Clone)]
pub struct LoginResult {
    pub token: IssuedToken,
    pub account: AccountRecord,
}

/// 管理员账号初始化结果
#[derive(Debug, Clone)]
pub enum AdminBootstrap {
    /// 新建了账号
    Created(AccountRecord),
    /// 账号已存在，未做改动
    Existing,
    /// 账号曾被软删除，已恢复
    Restored(AccountRecord),
}

/// 账号服务
pub struct AccountService {
    account_repo: Arc<dyn AccountRepositoryPort>,
    hasher: Arc<dyn PasswordHasherPort>,
    tokens: Arc<dyn TokenServicePort>,
}

impl AccountService {
    pub fn new(
        account_repo: Arc<dyn AccountRepositoryPort>,
        hasher: Arc<dyn PasswordHasherPort>,
        tokens: Arc<dyn TokenServicePort>,
    ) -> Self {
        Self {
            account_repo,
            hasher,
            tokens,
        }
    }

    /// Argon2 计算较重，放到阻塞线程池
    async fn hash_password(&self, password: Password) -> Result<String, ApplicationError> {
        let hasher = self.hasher.clone();
        let hash = tokio::task::spawn_blocking(move || hasher.hash(password.expose()))
            .await
            .map_err(|e| ApplicationError::internal(format!("Hash task failed: {}", e)))??;
        Ok(hash)
    }

    async fn verify_password(
        &self,
        password: String,
        password_hash: String,
    ) -> Result<bool, ApplicationError> {
        let hasher = self.hasher.clone();
        let valid = tokio::task::spawn_blocking(move || hasher.verify(&password, &password_hash))
            .await
            .map_err(|e| ApplicationError::internal(format!("Verify task failed: {}", e)))??;
        Ok(valid)
    }

    pub async fn create(&self, command: CreateAccount) -> Result<AccountRecord, ApplicationError> {
        let username = Username::new(command.username).field("username")?;
        let password = Password::new(command.password).field("password")?;

        if self
            .account_repo
            .find_by_username(username.as_str())
            .await?
            .is_some()
        {
            return Err(ApplicationError::Conflict(format!(
                "username already taken: {}",
                username
            )));
        }

        let password_hash = self.hash_password(password).await?;
        let account = self
            .account_repo
            .create(&NewAccount {
                username: username.as_str().to_string(),
                password_hash,
            })
            .await?;

        tracing::info!(account_id = account.id, username = %account.username, "Account created");

        Ok(account)
    }

    pub async fn get(&self, query: GetAccount) -> Result<AccountRecord, ApplicationError> {
        self.account_repo
            .find_by_id(query.account_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Account", query.account_id))
    }

    pub async fn list(&self, query: ListAccounts) -> Result<Page<AccountRecord>, ApplicationError> {
        let filter = query.filter;
        let items = self.account_repo.find_all(&filter).await?;
        let total = self.account_repo.count(&filter).await?;

        Ok(Page {
            items,
            page: filter.page,
            per_page: filter.per_page,
            total,
        })
    }

    pub async fn change_password(&self, command: ChangePassword) -> Result<(), ApplicationError> {
        let account_id = command.account_id;

        if command.actor_id != account_id {
            return Err(ApplicationError::Forbidden(
                "password can only be changed by its owner".to_string(),
            ));
        }

        let account = self
            .account_repo
            .find_by_id(account_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Account", account_id))?;

        let new_password = Password::new(command.new_password).field("new_password")?;

        if !self
            .verify_password(command.current_password, account.password_hash)
            .await?
        {
            return Err(ApplicationError::invalid_field(
                "current_password",
                "当前密码不正确",
            ));
        }

        let password_hash = self.hash_password(new_password).await?;
        self.account_repo
            .update_password(account_id, &password_hash)
            .await
            .map_err(missing("Account", account_id))?;

        tracing::info!(account_id, "Account password changed");

        Ok(())
    }

    pub async fn delete(&self, command: DeleteAccount) -> Result<(), ApplicationError> {
        let account_id = command.account_id;

        self.account_repo
            .soft_delete(account_id)
            .await
            .map_err(missing("Account", account_id))?;

        tracing::info!(account_id, "Account deleted");

        Ok(())
    }

    /// 校验用户名密码并签发 Token
    ///
    /// 用户名不存在和密码错误返回相同的错误信息
    pub async fn login(&self, command: Login) -> Result<LoginResult, ApplicationError> {
        const INVALID: &str = "invalid username or password";

        let account = self
            .account_repo
            .find_by_username(&command.username)
            .await?
            .ok_or_else(|| ApplicationError::unauthorized(INVALID))?;

        if !self
            .verify_password(command.password, account.password_hash.clone())
            .await?
        {
            tracing::warn!(username = %command.username, "Login rejected");
            return Err(ApplicationError::unauthorized(INVALID));
        }

        let token = self.tokens.issue(account.id, &account.username)?;

        tracing::info!(account_id = account.id, "Account logged in");

        Ok(LoginResult { token, account })
    }

    /// 校验 Bearer Token，返回仍然有效的账号
    pub async fn authenticate(&self, token: &str) -> Result<AccountRecord, ApplicationError> {
        let claims = self.tokens.verify(token)?;

        self.account_repo
            .find_by_id(claims.account_id)
            .await?
            .ok_or_else(|| ApplicationError::unauthorized("account no longer exists"))
    }

    /// 启动时确保管理员账号存在
    ///
    /// 用户名唯一约束覆盖已软删除的行，被删除的管理员账号会被恢复而不是重建
    pub async fn ensure_admin(
        &self,
        username: &str,
        password: &str,
    ) -> Result<AdminBootstrap, ApplicationError> {
        match self
            .account_repo
            .find_by_username_including_deleted(username)
            .await?
        {
            Some(account) if account.deleted_at.is_none() => Ok(AdminBootstrap::Existing),
            Some(account) => {
                let account = self
                    .account_repo
                    .restore(account.id)
                    .await
                    .map_err(missing("Account", account.id))?;
                tracing::warn!(account_id = account.id, username = %account.username, "Deleted bootstrap admin restored");
                Ok(AdminBootstrap::Restored(account))
            }
            None => {
                let account = self
                    .create(CreateAccount {
                        username: username.to_string(),
                        password: password.to_string(),
                    })
                    .await?;
                Ok(AdminBootstrap::Created(account))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::adapters::{Argon2PasswordHasher, JwtTokenService};
    use crate::infrastructure::persistence::sqlite::{open_in_memory, SqliteAccountRepository};

    async fn service() -> (AccountService, Arc<SqliteAccountRepository>) {
        let pool = open_in_memory().await.unwrap();
        let repo = Arc::new(SqliteAccountRepository::new(pool));
        let hasher = Arc::new(Argon2PasswordHasher::new("pepper-for-tests").unwrap());
        let tokens = Arc::new(JwtTokenService::new("0123456789abcdef-test-secret", 3600));
        (AccountService::new(repo.clone(), hasher, tokens), repo)
    }

    fn create(username: &str) -> CreateAccount {
        CreateAccount {
            username: username.to_string(),
            password: "Paswd123".to_string(),
        }
    }

    #[tokio::test]
    async fn test_password_is_stored_hashed() {
        let (service, _) = service().await;
        let account = service.create(create("admin")).await.unwrap();
        assert_ne!(account.password_hash, "Paswd123");
        assert!(account.password_hash.starts_with("$argon2id$"));
    }

    #[tokio::test]
    async fn test_duplicate_username_conflicts() {
        let (service, _) = service().await;
        service.create(create("admin")).await.unwrap();
        let err = service.create(create("admin")).await.unwrap_err();
        assert!(matches!(err, ApplicationError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_login_and_authenticate() {
        let (service, _) = service().await;
        let account = service.create(create("librarian")).await.unwrap();

        let result = service
            .login(Login {
                username: "librarian".into(),
                password: "Paswd123".into(),
            })
            .await
            .unwrap();
        assert_eq!(result.account.id, account.id);

        let authed = service.authenticate(&result.token.token).await.unwrap();
        assert_eq!(authed.username, "librarian");
    }

    #[tokio::test]
    async fn test_login_wrong_password_unauthorized() {
        let (service, _) = service().await;
        service.create(create("librarian")).await.unwrap();

        let err = service
            .login(Login {
                username: "librarian".into(),
                password: "wrong-password".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn test_deleted_account_token_rejected() {
        let (service, _) = service().await;
        let account = service.create(create("temp-user")).await.unwrap();
        let login = service
            .login(Login {
                username: "temp-user".into(),
                password: "Paswd123".into(),
            })
            .await
            .unwrap();

        service
            .delete(DeleteAccount {
                account_id: account.id,
            })
            .await
            .unwrap();

        let err = service.authenticate(&login.token.token).await.unwrap_err();
        assert!(matches!(err, ApplicationError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn test_change_password_requires_owner_and_current_password() {
        let (service, repo) = service().await;
        let account = service.create(create("owner")).await.unwrap();

        let err = service
            .change_password(ChangePassword {
                account_id: account.id,
                actor_id: account.id + 1,
                current_password: "Paswd123".into(),
                new_password: "NewPaswd456".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::Forbidden(_)));

        let err = service
            .change_password(ChangePassword {
                account_id: account.id,
                actor_id: account.id,
                current_password: "not-the-password".into(),
                new_password: "NewPaswd456".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ApplicationError::InvalidField {
                field: "current_password",
                ..
            }
        ));

        service
            .change_password(ChangePassword {
                account_id: account.id,
                actor_id: account.id,
                current_password: "Paswd123".into(),
                new_password: "NewPaswd456".into(),
            })
            .await
            .unwrap();

        let stored = repo.find_by_id(account.id).await.unwrap().unwrap();
        assert_ne!(stored.password_hash, account.password_hash);
        assert!(service
            .login(Login {
                username: "owner".into(),
                password: "NewPaswd456".into(),
            })
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_ensure_admin_is_idempotent() {
        let (service, _) = service().await;
        let first = service.ensure_admin("admin", "Paswd123").await.unwrap();
        assert!(matches!(first, AdminBootstrap::Created(_)));
        let second = service.ensure_admin("admin", "Paswd123").await.unwrap();
        assert!(matches!(second, AdminBootstrap::Existing));
    }

    #[tokio::test]
    async fn test_ensure_admin_restores_deleted_admin() {
        let (service, _) = service().await;
        let AdminBootstrap::Created(admin) =
            service.ensure_admin("admin", "Paswd123").await.unwrap()
        else {
            panic!("admin should be created on first run");
        };
        service
            .delete(DeleteAccount {
                account_id: admin.id,
            })
            .await
            .unwrap();

        let AdminBootstrap::Restored(restored) =
            service.ensure_admin("admin", "Paswd123").await.unwrap()
        else {
            panic!("deleted admin should be restored");
        };
        assert_eq!(restored.id, admin.id);

        assert!(service
            .login(Login {
                username: "admin".into(),
                password: "Paswd123".into(),
            })
            .await
            .is_ok());
    }
}
