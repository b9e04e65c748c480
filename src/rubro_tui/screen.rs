//! The Rubro screen: owns the record list, the single optional modal session
//! and the toast queue, and coordinates remote calls with both.
//!
//! Remote calls run as spawned tasks and report back through [`AppEvent`]s;
//! all state changes happen in [`RubroScreen::handle_event`] on the UI loop.

use std::sync::Arc;

use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{layout::Rect, Frame};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, error, info, warn};

use crate::errors::ServiceError;
use crate::models::{ModalType, Rubro};
use crate::rubro_tui::{
    components::{notifications::GENERIC_ERROR, Loader, Notifications, ToastPosition},
    events::AppEvent,
    modal::{ModalAction, RubroModal},
    table::{RubroTable, RubroTableConfig},
    traits::{Navigable, ScreenAction},
};
use crate::service::{MutationKind, RubroService};

pub const LOAD_ERROR: &str = "No se pudieron cargar los rubros";

pub struct RubroScreen {
    service: Arc<dyn RubroService>,
    events: UnboundedSender<AppEvent>,

    pub table: RubroTable,
    pub loader: Loader,
    /// The open modal session, if any
    pub modal: Option<RubroModal>,
    pub notifications: Notifications,

    /// Generation of the most recently issued list fetch
    fetch_generation: u64,
    session_serial: u64,
}

impl RubroScreen {
    pub fn new(
        service: Arc<dyn RubroService>,
        events: UnboundedSender<AppEvent>,
        notifications: Notifications,
    ) -> Self {
        Self {
            service,
            events,
            table: RubroTable::new(RubroTableConfig::default()),
            loader: Loader::new(),
            modal: None,
            notifications,
            fetch_generation: 0,
            session_serial: 0,
        }
    }

    /// Number of list fetches issued so far
    pub fn fetch_generation(&self) -> u64 {
        self.fetch_generation
    }

    /// Issue a list fetch; only the latest issued fetch is applied
    pub fn refresh(&mut self) {
        self.fetch_generation += 1;
        let generation = self.fetch_generation;
        let service = Arc::clone(&self.service);
        let events = self.events.clone();

        debug!("Fetching rubros (generation {})", generation);
        tokio::spawn(async move {
            let result = service.list().await;
            if events.send(AppEvent::RubrosLoaded { generation, result }).is_err() {
                debug!("Screen dropped before rubros fetch {} completed", generation);
            }
        });
    }

    pub fn open_create(&mut self) {
        self.open(ModalType::Create, Rubro::blank());
    }

    pub fn open_update(&mut self, rubro: Rubro) {
        self.open(ModalType::Update, rubro);
    }

    pub fn open_delete(&mut self, rubro: Rubro) {
        self.open(ModalType::Delete, rubro);
    }

    /// Start a new modal session, replacing whatever was open
    fn open(&mut self, mode: ModalType, rubro: Rubro) {
        self.session_serial += 1;
        debug!(
            "Opening {:?} session {} for rubro {}",
            mode, self.session_serial, rubro.id
        );
        self.modal = Some(RubroModal::new(self.session_serial, mode.title(), mode, rubro));
    }

    pub fn close_modal(&mut self) {
        self.modal = None;
    }

    /// Submit the open session (save or confirm delete).
    /// Returns whether a remote call was started.
    pub fn submit(&mut self) -> bool {
        let Some(modal) = self.modal.as_mut() else {
            return false;
        };
        let Some(mutation) = modal.begin_submit() else {
            return false;
        };

        let session = modal.session;
        let service = Arc::clone(&self.service);
        let events = self.events.clone();

        info!("Submitting {:?} (session {})", mutation.kind(), session);
        tokio::spawn(async move {
            let result = mutation.apply(service.as_ref()).await;
            if events
                .send(AppEvent::MutationFinished { session, result })
                .is_err()
            {
                debug!("Screen dropped before mutation for session {} completed", session);
            }
        });
        true
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::RubrosLoaded { generation, result } => {
                self.on_rubros_loaded(generation, result)
            }
            AppEvent::MutationFinished { session, result } => match result {
                Ok(kind) => self.on_mutation_committed(session, kind),
                Err(err) => {
                    error!(
                        "Rubro mutation failed (session {}, status {:?}): {}",
                        session,
                        err.status_code(),
                        err
                    );
                    self.notifications.error(GENERIC_ERROR);
                    if let Some(modal) = self.modal.as_mut().filter(|m| m.session == session) {
                        modal.submit_failed();
                    }
                }
            },
        }
    }

    fn on_rubros_loaded(&mut self, generation: u64, result: Result<Vec<Rubro>, ServiceError>) {
        if generation != self.fetch_generation {
            debug!(
                "Dropping stale rubros fetch {} (latest {})",
                generation, self.fetch_generation
            );
            return;
        }

        match result {
            Ok(rubros) => {
                info!("Loaded {} rubros", rubros.len());
                self.table.set_records(rubros);
            }
            Err(err) => {
                error!("Failed to load rubros: {}", err);
                self.table.set_load_error(err.to_string());
                self.notifications.error(LOAD_ERROR);
            }
        }
    }

    /// A mutation succeeded: notify, close its session and refetch once
    fn on_mutation_committed(&mut self, session: u64, kind: MutationKind) {
        info!("{} (session {})", kind.success_message(), session);
        self.notifications
            .success(kind.success_message(), ToastPosition::TopCenter);

        if self.modal.as_ref().map(|m| m.session) == Some(session) {
            self.close_modal();
        } else {
            warn!("Mutation for session {} finished after it was replaced", session);
        }

        self.refresh();
    }

    /// Periodic housekeeping: spinner animation and toast expiry
    pub fn tick(&mut self, now: DateTime<Local>) {
        if self.table.is_loading {
            self.loader.tick();
        }
        self.notifications.prune(now);
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> ScreenAction {
        if let Some(modal) = self.modal.as_mut() {
            match modal.handle_key(key) {
                ModalAction::Close => self.close_modal(),
                ModalAction::Submit => {
                    self.submit();
                }
                ModalAction::None => {}
            }
            return ScreenAction::None;
        }

        match key.code {
            KeyCode::Char('q') => return ScreenAction::Quit,
            KeyCode::Char('?') | KeyCode::F(1) => return ScreenAction::ToggleHelp,
            KeyCode::Up | KeyCode::Char('k') => self.table.navigate_up(),
            KeyCode::Down | KeyCode::Char('j') => self.table.navigate_down(),
            KeyCode::Home => self.table.navigate_to_first(),
            KeyCode::End => self.table.navigate_to_last(),
            KeyCode::Char('n') => self.open_create(),
            KeyCode::Char('r') => self.refresh(),
            KeyCode::Enter | KeyCode::Char('e') => {
                if let Some(rubro) = self.table.selected().cloned() {
                    self.open_update(rubro);
                }
            }
            KeyCode::Delete | KeyCode::Char('d') => {
                if let Some(rubro) = self.table.selected().cloned() {
                    self.open_delete(rubro);
                }
            }
            _ => {}
        }
        ScreenAction::None
    }

    pub fn draw(&mut self, f: &mut Frame, area: Rect) {
        self.table.render(f, area, &self.loader);
        if let Some(modal) = &self.modal {
            modal.render(f, area);
        }
        self.notifications.render(f, area);
    }
}
