//! Person Service

use chrono::{NaiveDate, Utc};
use std::sync::Arc;

use crate::application::commands::{CreatePerson, DeletePerson, UpdatePerson};
use crate::application::error::{missing, ApplicationError, FieldResultExt};
use crate::application::ports::{
    AccountRepositoryPort, PersonFields, PersonRecord, PersonRepositoryPort,
};
use crate::application::queries::{GetPerson, ListPersons, Page};
use crate::domain::{check_birth_date, Fullname, Gender};

/// 人员服务
pub struct PersonService {
    person_repo: Arc<dyn PersonRepositoryPort>,
    account_repo: Arc<dyn AccountRepositoryPort>,
}

impl PersonService {
    pub fn new(
        person_repo: Arc<dyn PersonRepositoryPort>,
        account_repo: Arc<dyn AccountRepositoryPort>,
    ) -> Self {
        Self {
            person_repo,
            account_repo,
        }
    }

    async fn validate(
        &self,
        fullname: String,
        gender: Option<Gender>,
        birth_date: Option<NaiveDate>,
        account_id: Option<i64>,
    ) -> Result<PersonFields, ApplicationError> {
        let fullname = Fullname::new(fullname).field("fullname")?;
        let birth_date =
            check_birth_date(birth_date, Utc::now().date_naive()).field("birth_date")?;

        if let Some(account_id) = account_id {
            if self.account_repo.find_by_id(account_id).await?.is_none() {
                return Err(ApplicationError::invalid_field(
                    "account_id",
                    format!("账号不存在: {}", account_id),
                ));
            }
        }

        Ok(PersonFields {
            fullname: fullname.into_inner(),
            gender,
            birth_date,
            account_id,
        })
    }

    pub async fn create(&self, command: CreatePerson) -> Result<PersonRecord, ApplicationError> {
        let fields = self
            .validate(
                command.fullname,
                command.gender,
                command.birth_date,
                command.account_id,
            )
            .await?;
        let person = self.person_repo.create(&fields).await?;

        tracing::info!(
            person_id = person.id,
            account_id = ?person.account_id,
            "Person created"
        );

        Ok(person)
    }

    pub async fn update(&self, command: UpdatePerson) -> Result<PersonRecord, ApplicationError> {
        let person_id = command.person_id;

        if self.person_repo.find_by_id(person_id).await?.is_none() {
            return Err(ApplicationError::not_found("Person", person_id));
        }

        let fields = self
            .validate(
                command.fullname,
                command.gender,
                command.birth_date,
                command.account_id,
            )
            .await?;

        let person = self
            .person_repo
            .update(person_id, &fields)
            .await
            .map_err(missing("Person", person_id))?;

        tracing::info!(person_id, "Person updated");

        Ok(person)
    }

    pub async fn delete(&self, command: DeletePerson) -> Result<(), ApplicationError> {
        let person_id = command.person_id;

        self.person_repo
            .soft_delete(person_id)
            .await
            .map_err(missing("Person", person_id))?;

        tracing::info!(person_id, "Person deleted");

        Ok(())
    }

    pub async fn get(&self, query: GetPerson) -> Result<PersonRecord, ApplicationError> {
        self.person_repo
            .find_by_id(query.person_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Person", query.person_id))
    }

    pub async fn list(&self, query: ListPersons) -> Result<Page<PersonRecord>, ApplicationError> {
        let filter = query.filter;
        let items = self.person_repo.find_all(&filter).await?;
        let total = self.person_repo.count(&filter).await?;

        Ok(Page {
            items,
            page: filter.page,
            per_page: filter.per_page,
            total,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::NewAccount;
    use crate::infrastructure::persistence::sqlite::{
        open_in_memory, SqliteAccountRepository, SqlitePersonRepository,
    };

    async fn setup() -> (PersonService, i64) {
        let pool = open_in_memory().await.unwrap();
        let account_repo = Arc::new(SqliteAccountRepository::new(pool.clone()));
        let account = account_repo
            .create(&NewAccount {
                username: "admin".into(),
                password_hash: "$argon2id$placeholder".into(),
            })
            .await
            .unwrap();

        let service = PersonService::new(Arc::new(SqlitePersonRepository::new(pool)), account_repo);
        (service, account.id)
    }

    fn create(fullname: &str, account_id: Option<i64>) -> CreatePerson {
        CreatePerson {
            fullname: fullname.to_string(),
            gender: Some(Gender::Male),
            birth_date: NaiveDate::from_ymd_opt(1995, 4, 5),
            account_id,
        }
    }

    #[tokio::test]
    async fn test_create_linked_to_account() {
        let (service, account_id) = setup().await;
        let person = service
            .create(create("Budi Santoso", Some(account_id)))
            .await
            .unwrap();
        assert_eq!(person.account_id, Some(account_id));
    }

    #[tokio::test]
    async fn test_account_can_only_own_one_person() {
        let (service, account_id) = setup().await;
        service
            .create(create("Budi Santoso", Some(account_id)))
            .await
            .unwrap();

        let err = service
            .create(create("Siti Aminah", Some(account_id)))
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_unknown_account_is_field_error() {
        let (service, _) = setup().await;
        let err = service
            .create(create("Budi Santoso", Some(77)))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ApplicationError::InvalidField {
                field: "account_id",
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_future_birth_date_rejected() {
        let (service, _) = setup().await;
        let mut command = create("Budi Santoso", None);
        command.birth_date = Some(Utc::now().date_naive() + chrono::Duration::days(2));

        let err = service.create(command).await.unwrap_err();
        assert!(matches!(
            err,
            ApplicationError::InvalidField {
                field: "birth_date",
                ..
            }
        ));
    }
}
