//! Session workspace: the page-level state container
//!
//! Owns the store, the task board, the support chat and the notice queue.
//! Every UI event is one method call here. Validation failures return the
//! field errors and mutate nothing; a failed save raises one error notice.

use board::{DragEnd, DragOutcome, TaskBoard};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use domain::config::BusinessConfig;
use domain::{
    Appointment, AppointmentId, ChatMessage, Item, ItemId, Service, ServiceId, Task, TaskId,
};
use llm::{
    FlowResult, FlowRunner, ReviewRequestInput, ReviewRequestMessage, SchedulingInput,
    SchedulingRecommendation, TaskAssignmentOutput,
};
use std::collections::BTreeSet;
use tracing::{error, info, instrument, warn};

use crate::ai_tools::{self, AssignmentForm};
use crate::chat::ChatSession;
use crate::dashboard::{self, DashboardView};
use crate::errors::{ApplicationResult, EntityKind, StoreError};
use crate::forms::{AppointmentForm, ItemForm, ServiceForm, TaskForm};
use crate::notices::{Notice, NoticeQueue};
use crate::store::SessionStore;

pub struct Workspace {
    store: SessionStore,
    board: TaskBoard,
    chat: ChatSession,
    notices: NoticeQueue,
    settings: BusinessConfig,
}

impl Workspace {
    pub fn new(store: SessionStore, settings: BusinessConfig) -> Self {
        let board = TaskBoard::partition(store.tasks());
        let chat = ChatSession::new(settings.company_name.clone());
        Self {
            store,
            board,
            chat,
            notices: NoticeQueue::default(),
            settings,
        }
    }

    /// Fresh session over the demo fixtures
    pub fn seeded<Tz: TimeZone>(now: DateTime<Tz>, settings: BusinessConfig) -> Self {
        Self::new(SessionStore::seeded(now), settings)
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn board(&self) -> &TaskBoard {
        &self.board
    }

    pub fn chat(&self) -> &ChatSession {
        &self.chat
    }

    pub fn settings(&self) -> &BusinessConfig {
        &self.settings
    }

    pub fn last_notice(&self) -> Option<&Notice> {
        self.notices.last()
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        self.notices.drain()
    }

    fn finish_save<T>(
        &mut self,
        kind: EntityKind,
        created: bool,
        result: Result<T, StoreError>,
    ) -> ApplicationResult<T> {
        match result {
            Ok(value) => {
                info!(kind = %kind, created, "✅ Saved");
                self.notices.push(Notice::saved(kind, created));
                Ok(value)
            }
            Err(e) => {
                error!(kind = %kind, error = %e, "Save failed");
                self.notices.push(Notice::save_failed(kind));
                Err(e.into())
            }
        }
    }

    // ---- appointments ----

    /// Create (`editing = None`) or update an appointment
    #[instrument(skip(self, form))]
    pub fn submit_appointment(
        &mut self,
        editing: Option<&AppointmentId>,
        form: &AppointmentForm,
    ) -> ApplicationResult<AppointmentId> {
        let draft = form.validated()?;

        let result = match editing {
            Some(id) => match self.store.appointment(id).cloned() {
                Some(mut appointment) => {
                    draft.apply(&mut appointment);
                    self.store.resolve_appointment_names(&mut appointment);
                    self.store.replace_appointment(appointment).map(|_| id.clone())
                }
                None => Err(StoreError::not_found(EntityKind::Appointment, id)),
            },
            None => {
                let id = self.store.new_appointment_id();
                let mut appointment = draft.into_appointment(id.clone());
                self.store.resolve_appointment_names(&mut appointment);
                self.store.add_appointment(appointment).map(|_| id)
            }
        };
        self.finish_save(EntityKind::Appointment, editing.is_none(), result)
    }

    pub fn delete_appointment(&mut self, id: &AppointmentId) -> ApplicationResult<Appointment> {
        let removed = self.store.remove_appointment(id)?;
        self.board.sync(self.store.tasks());
        Ok(removed)
    }

    // ---- tasks ----

    #[instrument(skip(self, form))]
    pub fn submit_task(
        &mut self,
        editing: Option<&TaskId>,
        form: &TaskForm,
    ) -> ApplicationResult<TaskId> {
        let draft = form.validated()?;

        let result = match editing {
            Some(id) => match self.store.task(id).cloned() {
                Some(mut task) => {
                    draft.apply(&mut task);
                    self.store.resolve_task_names(&mut task);
                    self.store.replace_task(task).map(|_| id.clone())
                }
                None => Err(StoreError::not_found(EntityKind::Task, id)),
            },
            None => {
                let id = self.store.new_task_id();
                let mut task = draft.into_task(id.clone());
                self.store.resolve_task_names(&mut task);
                self.store.add_task(task).map(|_| id)
            }
        };
        if result.is_ok() {
            self.board.sync(self.store.tasks());
        }
        self.finish_save(EntityKind::Task, editing.is_none(), result)
    }

    pub fn delete_task(&mut self, id: &TaskId) -> ApplicationResult<Task> {
        let removed = self.store.remove_task(id)?;
        self.board.sync(self.store.tasks());
        info!(task_id = %id, "Task deleted");
        Ok(removed)
    }

    /// Reconcile a drag-end event; a status change is written to the store
    #[instrument(skip(self, event), fields(task_id = %event.task_id))]
    pub fn drag_task(&mut self, event: &DragEnd) -> ApplicationResult<DragOutcome> {
        let store = &mut self.store;
        let mut failure = None;
        let outcome = self.board.apply_drag(event, |task_id, status| {
            if let Err(e) = store.set_task_status(task_id, status) {
                failure = Some(e);
            }
        });

        if let Some(e) = failure {
            warn!(error = %e, "Board and store disagreed, re-partitioning");
            self.board.sync(self.store.tasks());
            return Err(e.into());
        }
        Ok(outcome)
    }

    // ---- catalog ----

    #[instrument(skip(self, form))]
    pub fn submit_service(
        &mut self,
        editing: Option<&ServiceId>,
        form: &ServiceForm,
    ) -> ApplicationResult<ServiceId> {
        let draft = form.validated()?;
        draft.check_items(|id| self.store.item(id).is_some())?;

        let result = match editing {
            Some(id) => match self.store.service(id).cloned() {
                Some(mut service) => {
                    draft.apply(&mut service);
                    self.store.replace_service(service).map(|_| id.clone())
                }
                None => Err(StoreError::not_found(EntityKind::Service, id)),
            },
            None => {
                let id = self.store.new_service_id();
                self.store
                    .add_service(draft.into_service(id.clone()))
                    .map(|_| id)
            }
        };
        self.finish_save(EntityKind::Service, editing.is_none(), result)
    }

    pub fn delete_service(&mut self, id: &ServiceId) -> ApplicationResult<Service> {
        let removed = self.store.remove_service(id)?;
        self.notices
            .push(Notice::success("Service Deleted", "The service has been removed."));
        Ok(removed)
    }

    #[instrument(skip(self, form))]
    pub fn submit_item(
        &mut self,
        editing: Option<&ItemId>,
        form: &ItemForm,
    ) -> ApplicationResult<ItemId> {
        let draft = form.validated()?;

        let result = match editing {
            Some(id) => match self.store.item(id).cloned() {
                Some(mut item) => {
                    draft.apply(&mut item);
                    self.store.replace_item(item).map(|_| id.clone())
                }
                None => Err(StoreError::not_found(EntityKind::Item, id)),
            },
            None => {
                let id = self.store.new_item_id();
                self.store.add_item(draft.into_item(id.clone())).map(|_| id)
            }
        };
        self.finish_save(EntityKind::Item, editing.is_none(), result)
    }

    /// Delete an item and unlink it from every service
    pub fn delete_item(&mut self, id: &ItemId) -> ApplicationResult<Item> {
        let removed = self.store.remove_item(id)?;
        self.notices.push(Notice::success(
            "Item Deleted",
            "The item has been removed and unlinked from services.",
        ));
        Ok(removed)
    }

    /// Labels of a service's items, "Unknown Item" for dangling ids
    pub fn service_item_labels(&self, service: &Service) -> Vec<&str> {
        service
            .associated_item_ids
            .iter()
            .map(|id| self.store.item_label(id))
            .collect()
    }

    // ---- AI tools ----

    fn finish_flow<T>(
        &mut self,
        result: FlowResult<T>,
        success: Notice,
        failure: &str,
    ) -> ApplicationResult<T> {
        match result {
            Ok(value) => {
                self.notices.push(success);
                Ok(value)
            }
            // field errors are shown inline, not as a toast
            Err(e) if e.is_validation() => Err(e.into()),
            Err(e) => {
                error!(error = %e, "AI flow failed");
                self.notices.push(Notice::error("Error", failure));
                Err(e.into())
            }
        }
    }

    pub async fn recommend_schedule(
        &mut self,
        runner: &FlowRunner,
        input: &SchedulingInput,
    ) -> ApplicationResult<SchedulingRecommendation> {
        let result = runner.scheduling_recommendation(input).await;
        self.finish_flow(
            result,
            Notice::success(
                "Scheduling Recommendation Ready",
                "AI has provided a suggestion.",
            ),
            "Failed to get recommendations.",
        )
    }

    pub async fn assign_tasks(
        &mut self,
        runner: &FlowRunner,
        form: &AssignmentForm,
    ) -> ApplicationResult<TaskAssignmentOutput> {
        let input = form.into_input()?;
        let result = runner.assign_tasks(&input).await;
        self.finish_flow(
            result,
            Notice::success("Assignment Complete", "The AI assigned the tasks."),
            "Failed to assign tasks.",
        )
    }

    pub async fn request_review(
        &mut self,
        runner: &FlowRunner,
        input: &ReviewRequestInput,
    ) -> ApplicationResult<ReviewRequestMessage> {
        let result = runner.review_request(input).await;
        self.finish_flow(
            result,
            Notice::success("Review Request Generated", "Message created successfully."),
            "Failed to generate review request.",
        )
    }

    /// Review request for a stored appointment using the configured link
    pub async fn request_review_for(
        &mut self,
        runner: &FlowRunner,
        appointment_id: &AppointmentId,
    ) -> ApplicationResult<ReviewRequestMessage> {
        let appointment = self
            .store
            .appointment(appointment_id)
            .ok_or_else(|| StoreError::not_found(EntityKind::Appointment, appointment_id))?;
        let link = self.settings.review_page_link.clone().unwrap_or_default();
        let input = ai_tools::review_input(appointment, link);
        self.request_review(runner, &input).await
    }

    // ---- chat ----

    pub fn open_chat(&mut self) {
        self.chat.open();
    }

    pub async fn send_chat(
        &mut self,
        runner: &FlowRunner,
        text: &str,
    ) -> ApplicationResult<ChatMessage> {
        self.chat.open();
        let result = self.chat.send(runner, text).await.cloned();
        match result {
            Ok(reply) => Ok(reply),
            Err(e) => {
                if !e.is_validation() {
                    self.notices.push(Notice::error(
                        "Chatbot Error",
                        "Could not get a response from the chatbot.",
                    ));
                }
                Err(e.into())
            }
        }
    }

    // ---- read models ----

    pub fn dashboard(&self, now: DateTime<Utc>) -> DashboardView {
        DashboardView {
            upcoming: dashboard::upcoming_appointments(
                self.store.appointments(),
                now,
                self.settings.upcoming_limit,
            )
            .into_iter()
            .cloned()
            .collect(),
            open_tasks: dashboard::open_tasks(self.store.tasks(), usize::MAX)
                .into_iter()
                .cloned()
                .collect(),
            stats: self.board.stats(),
        }
    }

    pub fn calendar_day<Tz: TimeZone>(&self, day: NaiveDate, tz: &Tz) -> Vec<&Appointment> {
        dashboard::appointments_on(self.store.appointments(), day, tz)
    }

    pub fn event_days<Tz: TimeZone>(&self, tz: &Tz) -> BTreeSet<NaiveDate> {
        dashboard::event_days(self.store.appointments(), tz)
    }
}
