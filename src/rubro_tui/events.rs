//! Events delivered from background service calls to the UI loop

use crate::errors::ServiceError;
use crate::models::Rubro;
use crate::service::MutationKind;

#[derive(Debug)]
pub enum AppEvent {
    /// A list fetch finished; `generation` identifies which fetch
    RubrosLoaded {
        generation: u64,
        result: Result<Vec<Rubro>, ServiceError>,
    },
    /// A create/update/delete issued by modal session `session` finished
    MutationFinished {
        session: u64,
        result: Result<MutationKind, ServiceError>,
    },
}
