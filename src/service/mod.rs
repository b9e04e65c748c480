//! Remote Rubro service
//!
//! The screen only talks to [`RubroService`]; the HTTP implementation lives in
//! [`http`], tests substitute an in-memory double.

pub mod http;

use async_trait::async_trait;

use crate::errors::ServiceError;
use crate::models::Rubro;

pub use http::HttpRubroService;

/// The four operations the remote backend exposes over Rubro records
#[async_trait]
pub trait RubroService: Send + Sync {
    /// Full snapshot, in server order
    async fn list(&self) -> Result<Vec<Rubro>, ServiceError>;

    /// Create a record; the server assigns the id
    async fn create(&self, rubro: &Rubro) -> Result<Rubro, ServiceError>;

    async fn update(&self, id: u64, rubro: &Rubro) -> Result<Rubro, ServiceError>;

    async fn delete(&self, id: u64) -> Result<(), ServiceError>;
}

/// A mutation ready to be sent to the service
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    Create(Rubro),
    Update(u64, Rubro),
    Delete(u64),
}

/// Kind of a committed mutation, used for user-facing wording
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Created,
    Updated,
    Deleted,
}

impl MutationKind {
    pub fn success_message(&self) -> &'static str {
        match self {
            MutationKind::Created => "Rubro creado",
            MutationKind::Updated => "Rubro actualizado",
            MutationKind::Deleted => "Rubro borrado",
        }
    }
}

impl Mutation {
    pub fn kind(&self) -> MutationKind {
        match self {
            Mutation::Create(_) => MutationKind::Created,
            Mutation::Update(..) => MutationKind::Updated,
            Mutation::Delete(_) => MutationKind::Deleted,
        }
    }

    /// Send the mutation to the service
    pub async fn apply(self, service: &dyn RubroService) -> Result<MutationKind, ServiceError> {
        let kind = self.kind();
        match self {
            Mutation::Create(rubro) => {
                service.create(&rubro).await?;
            }
            Mutation::Update(id, rubro) => {
                service.update(id, &rubro).await?;
            }
            Mutation::Delete(id) => service.delete(id).await?,
        }
        Ok(kind)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Recording in-memory service shared by the screen tests

    use std::sync::Mutex;

    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    pub enum Call {
        List,
        Create(Rubro),
        Update(u64, Rubro),
        Delete(u64),
    }

    #[derive(Default)]
    pub struct RecordingService {
        pub records: Mutex<Vec<Rubro>>,
        pub calls: Mutex<Vec<Call>>,
        pub fail_mutations: Mutex<bool>,
        pub fail_list: Mutex<bool>,
    }

    impl RecordingService {
        pub fn with_records(records: Vec<Rubro>) -> Self {
            Self {
                records: Mutex::new(records),
                ..Default::default()
            }
        }

        pub fn set_fail_mutations(&self, fail: bool) {
            *self.fail_mutations.lock().unwrap() = fail;
        }

        pub fn set_fail_list(&self, fail: bool) {
            *self.fail_list.lock().unwrap() = fail;
        }

        pub fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        pub fn mutation_calls(&self) -> Vec<Call> {
            self.calls()
                .into_iter()
                .filter(|c| *c != Call::List)
                .collect()
        }

        fn record(&self, call: Call) {
            self.calls.lock().unwrap().push(call);
        }

        fn check_mutation(&self) -> Result<(), ServiceError> {
            if *self.fail_mutations.lock().unwrap() {
                return Err(ServiceError::Status {
                    status_code: 500,
                    message: "boom".to_string(),
                });
            }
            Ok(())
        }
    }

    #[async_trait]
    impl RubroService for RecordingService {
        async fn list(&self) -> Result<Vec<Rubro>, ServiceError> {
            self.record(Call::List);
            if *self.fail_list.lock().unwrap() {
                return Err(ServiceError::Status {
                    status_code: 503,
                    message: "service unavailable".to_string(),
                });
            }
            Ok(self.records.lock().unwrap().clone())
        }

        async fn create(&self, rubro: &Rubro) -> Result<Rubro, ServiceError> {
            self.record(Call::Create(rubro.clone()));
            self.check_mutation()?;
            let mut records = self.records.lock().unwrap();
            let mut created = rubro.clone();
            created.id = records.iter().map(|r| r.id).max().unwrap_or(0) + 1;
            records.push(created.clone());
            Ok(created)
        }

        async fn update(&self, id: u64, rubro: &Rubro) -> Result<Rubro, ServiceError> {
            self.record(Call::Update(id, rubro.clone()));
            self.check_mutation()?;
            let mut records = self.records.lock().unwrap();
            match records.iter_mut().find(|r| r.id == id) {
                Some(existing) => {
                    *existing = rubro.clone();
                    Ok(existing.clone())
                }
                None => Err(ServiceError::Status {
                    status_code: 404,
                    message: format!("rubro {} not found", id),
                }),
            }
        }

        async fn delete(&self, id: u64) -> Result<(), ServiceError> {
            self.record(Call::Delete(id));
            self.check_mutation()?;
            self.records.lock().unwrap().retain(|r| r.id != id);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::{Call, RecordingService};
    use super::*;

    #[tokio::test]
    async fn test_apply_create_calls_only_create() {
        let service = RecordingService::default();
        let rubro = Rubro {
            denominacion: "Bebidas".to_string(),
            ..Rubro::blank()
        };

        let kind = Mutation::Create(rubro.clone()).apply(&service).await.unwrap();
        assert_eq!(kind, MutationKind::Created);
        assert_eq!(service.calls(), vec![Call::Create(rubro)]);
    }

    #[tokio::test]
    async fn test_apply_propagates_failure() {
        let service = RecordingService::default();
        service.set_fail_mutations(true);

        let result = Mutation::Delete(3).apply(&service).await;
        assert!(result.is_err());
        assert_eq!(service.calls(), vec![Call::Delete(3)]);
    }

    #[test]
    fn test_success_wording() {
        assert_eq!(Mutation::Create(Rubro::blank()).kind().success_message(), "Rubro creado");
        assert_eq!(
            Mutation::Update(1, Rubro::blank()).kind().success_message(),
            "Rubro actualizado"
        );
        assert_eq!(Mutation::Delete(1).kind().success_message(), "Rubro borrado");
    }
}
