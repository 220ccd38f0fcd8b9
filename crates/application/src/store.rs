//! Session-scoped in-memory store
//!
//! Owns every collection of the session. All mutation goes through these
//! methods so that the cross-entity rules hold:
//! - ids are unique per collection;
//! - deleting an item unlinks it from every service;
//! - renaming a client, employee or service re-syncs the denormalized
//!   names on tasks and appointments.

use chrono::{DateTime, TimeZone};
use domain::{
    Appointment, AppointmentId, Client, ClientId, Employee, EmployeeId, EntityId, Item, ItemId,
    Service, ServiceId, Task, TaskId, TaskStatus, UNKNOWN_LABEL,
};
use tracing::{debug, info, warn};

use crate::errors::{EntityKind, StoreError};
use crate::fixtures::{self, Fixtures};

/// Label shown for an item id that no longer resolves
pub const UNKNOWN_ITEM_LABEL: &str = "Unknown Item";

/// Records addressable by a typed id
trait Keyed {
    type Id: EntityId;
    const KIND: EntityKind;
    fn key(&self) -> &Self::Id;
}

macro_rules! keyed {
    ($ty:ty, $id:ty, $kind:expr) => {
        impl Keyed for $ty {
            type Id = $id;
            const KIND: EntityKind = $kind;
            fn key(&self) -> &$id {
                &self.id
            }
        }
    };
}

keyed!(Client, ClientId, EntityKind::Client);
keyed!(Employee, EmployeeId, EntityKind::Employee);
keyed!(Service, ServiceId, EntityKind::Service);
keyed!(Item, ItemId, EntityKind::Item);
keyed!(Appointment, AppointmentId, EntityKind::Appointment);
keyed!(Task, TaskId, EntityKind::Task);

fn find<'a, T: Keyed>(records: &'a [T], id: &T::Id) -> Option<&'a T> {
    records.iter().find(|r| r.key() == id)
}

fn insert_unique<T: Keyed>(records: &mut Vec<T>, record: T) -> Result<(), StoreError> {
    if find(records, record.key()).is_some() {
        return Err(StoreError::DuplicateId {
            kind: T::KIND,
            id: record.key().to_string(),
        });
    }
    records.push(record);
    Ok(())
}

/// Replace in place, keeping the record's position; returns the old record
fn replace_by_id<T: Keyed>(records: &mut [T], record: T) -> Result<T, StoreError> {
    let slot = records
        .iter_mut()
        .find(|r| r.key() == record.key())
        .ok_or_else(|| StoreError::not_found(T::KIND, record.key()))?;
    Ok(std::mem::replace(slot, record))
}

fn remove_by_id<T: Keyed>(records: &mut Vec<T>, id: &T::Id) -> Result<T, StoreError> {
    let index = records
        .iter()
        .position(|r| r.key() == id)
        .ok_or_else(|| StoreError::not_found(T::KIND, id))?;
    Ok(records.remove(index))
}

fn fresh_id<T: Keyed>(records: &[T]) -> T::Id {
    loop {
        let id = T::Id::generate();
        if find(records, &id).is_none() {
            return id;
        }
        warn!(kind = %T::KIND, id = %id, "Generated id collided, drawing again");
    }
}

/// Display label for an optional denormalized name
pub fn display_name(name: Option<&str>) -> &str {
    name.unwrap_or(UNKNOWN_LABEL)
}

#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    clients: Vec<Client>,
    employees: Vec<Employee>,
    services: Vec<Service>,
    items: Vec<Item>,
    appointments: Vec<Appointment>,
    tasks: Vec<Task>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with the demo fixtures relative to `now`
    pub fn seeded<Tz: TimeZone>(now: DateTime<Tz>) -> Self {
        let store = Self::from_fixtures(fixtures::seed(now));
        info!(
            clients = store.clients.len(),
            tasks = store.tasks.len(),
            appointments = store.appointments.len(),
            "✅ Session store seeded"
        );
        store
    }

    pub fn from_fixtures(fixtures: Fixtures) -> Self {
        Self {
            clients: fixtures.clients,
            employees: fixtures.employees,
            services: fixtures.services,
            items: fixtures.items,
            appointments: fixtures.appointments,
            tasks: fixtures.tasks,
        }
    }

    pub fn clients(&self) -> &[Client] {
        &self.clients
    }

    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub fn services(&self) -> &[Service] {
        &self.services
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn appointments(&self) -> &[Appointment] {
        &self.appointments
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn client(&self, id: &ClientId) -> Option<&Client> {
        find(&self.clients, id)
    }

    pub fn employee(&self, id: &EmployeeId) -> Option<&Employee> {
        find(&self.employees, id)
    }

    pub fn service(&self, id: &ServiceId) -> Option<&Service> {
        find(&self.services, id)
    }

    pub fn item(&self, id: &ItemId) -> Option<&Item> {
        find(&self.items, id)
    }

    pub fn appointment(&self, id: &AppointmentId) -> Option<&Appointment> {
        find(&self.appointments, id)
    }

    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        find(&self.tasks, id)
    }

    pub fn item_label(&self, id: &ItemId) -> &str {
        self.item(id)
            .map(|i| i.name.as_str())
            .unwrap_or(UNKNOWN_ITEM_LABEL)
    }

    // ---- ids ----

    pub fn new_task_id(&self) -> TaskId {
        fresh_id(&self.tasks)
    }

    pub fn new_appointment_id(&self) -> AppointmentId {
        fresh_id(&self.appointments)
    }

    pub fn new_service_id(&self) -> ServiceId {
        fresh_id(&self.services)
    }

    pub fn new_item_id(&self) -> ItemId {
        fresh_id(&self.items)
    }

    // ---- denormalized names ----

    /// Fill display names from the referenced records; dangling ids give `None`
    pub fn resolve_task_names(&self, task: &mut Task) {
        task.assigned_to_name = task
            .assigned_to
            .as_ref()
            .and_then(|id| self.employee(id))
            .map(|e| e.name.clone());
        task.client_name = task
            .client_id
            .as_ref()
            .and_then(|id| self.client(id))
            .map(|c| c.name.clone());
    }

    pub fn resolve_appointment_names(&self, appointment: &mut Appointment) {
        appointment.client_name = appointment
            .client_id
            .as_ref()
            .and_then(|id| self.client(id))
            .map(|c| c.name.clone());
        appointment.employee_name = appointment
            .employee_id
            .as_ref()
            .and_then(|id| self.employee(id))
            .map(|e| e.name.clone());
        appointment.service_name = appointment
            .service_id
            .as_ref()
            .and_then(|id| self.service(id))
            .map(|s| s.name.clone());
    }

    // ---- clients & employees ----

    pub fn add_client(&mut self, client: Client) -> Result<(), StoreError> {
        insert_unique(&mut self.clients, client)
    }

    /// Replace a client and re-sync its name on tasks and appointments
    pub fn update_client(&mut self, client: Client) -> Result<(), StoreError> {
        let id = client.id.clone();
        let name = client.name.clone();
        replace_by_id(&mut self.clients, client)?;

        for task in self.tasks.iter_mut().filter(|t| t.client_id.as_ref() == Some(&id)) {
            task.client_name = Some(name.clone());
        }
        for apt in self
            .appointments
            .iter_mut()
            .filter(|a| a.client_id.as_ref() == Some(&id))
        {
            apt.client_name = Some(name.clone());
        }
        Ok(())
    }

    /// Replace an employee and re-sync its name on tasks and appointments
    pub fn update_employee(&mut self, employee: Employee) -> Result<(), StoreError> {
        let id = employee.id.clone();
        let name = employee.name.clone();
        replace_by_id(&mut self.employees, employee)?;

        for task in self
            .tasks
            .iter_mut()
            .filter(|t| t.assigned_to.as_ref() == Some(&id))
        {
            task.assigned_to_name = Some(name.clone());
        }
        for apt in self
            .appointments
            .iter_mut()
            .filter(|a| a.employee_id.as_ref() == Some(&id))
        {
            apt.employee_name = Some(name.clone());
        }
        Ok(())
    }

    // ---- tasks ----

    pub fn add_task(&mut self, task: Task) -> Result<(), StoreError> {
        debug!(task_id = %task.id, status = %task.status, "Adding task");
        insert_unique(&mut self.tasks, task)
    }

    pub fn replace_task(&mut self, task: Task) -> Result<Task, StoreError> {
        replace_by_id(&mut self.tasks, task)
    }

    pub fn remove_task(&mut self, id: &TaskId) -> Result<Task, StoreError> {
        remove_by_id(&mut self.tasks, id)
    }

    pub fn set_task_status(&mut self, id: &TaskId, status: TaskStatus) -> Result<(), StoreError> {
        let task = self
            .tasks
            .iter_mut()
            .find(|t| &t.id == id)
            .ok_or_else(|| StoreError::not_found(EntityKind::Task, id))?;
        info!(task_id = %id, from = %task.status, to = %status, "Task status changed");
        task.status = status;
        Ok(())
    }

    // ---- appointments ----

    fn check_span(appointment: &Appointment) {
        if !appointment.has_valid_span() {
            warn!(
                appointment_id = %appointment.id,
                start = %appointment.start,
                end = %appointment.end,
                "Appointment ends before it starts"
            );
        }
    }

    pub fn add_appointment(&mut self, appointment: Appointment) -> Result<(), StoreError> {
        Self::check_span(&appointment);
        insert_unique(&mut self.appointments, appointment)
    }

    pub fn replace_appointment(
        &mut self,
        appointment: Appointment,
    ) -> Result<Appointment, StoreError> {
        Self::check_span(&appointment);
        replace_by_id(&mut self.appointments, appointment)
    }

    pub fn remove_appointment(&mut self, id: &AppointmentId) -> Result<Appointment, StoreError> {
        let removed = remove_by_id(&mut self.appointments, id)?;
        for task in self
            .tasks
            .iter_mut()
            .filter(|t| t.related_appointment_id.as_ref() == Some(id))
        {
            task.related_appointment_id = None;
        }
        Ok(removed)
    }

    // ---- catalog ----

    pub fn add_service(&mut self, service: Service) -> Result<(), StoreError> {
        insert_unique(&mut self.services, service)
    }

    /// Replace a service and re-sync its name on appointments
    pub fn replace_service(&mut self, service: Service) -> Result<Service, StoreError> {
        let id = service.id.clone();
        let name = service.name.clone();
        let previous = replace_by_id(&mut self.services, service)?;

        if previous.name != name {
            for apt in self
                .appointments
                .iter_mut()
                .filter(|a| a.service_id.as_ref() == Some(&id))
            {
                apt.service_name = Some(name.clone());
            }
        }
        Ok(previous)
    }

    /// Remove a service; appointments keep the id but lose the display name
    pub fn remove_service(&mut self, id: &ServiceId) -> Result<Service, StoreError> {
        let removed = remove_by_id(&mut self.services, id)?;
        for apt in self
            .appointments
            .iter_mut()
            .filter(|a| a.service_id.as_ref() == Some(id))
        {
            apt.service_name = None;
        }
        Ok(removed)
    }

    pub fn add_item(&mut self, item: Item) -> Result<(), StoreError> {
        insert_unique(&mut self.items, item)
    }

    pub fn replace_item(&mut self, item: Item) -> Result<Item, StoreError> {
        replace_by_id(&mut self.items, item)
    }

    /// Remove an item and unlink it from every service; no service is deleted
    pub fn remove_item(&mut self, id: &ItemId) -> Result<Item, StoreError> {
        let removed = remove_by_id(&mut self.items, id)?;
        let unlinked = self
            .services
            .iter_mut()
            .map(|s| s.unlink_item(id))
            .filter(|&was_linked| was_linked)
            .count();
        info!(item_id = %id, services = unlinked, "Item removed and unlinked");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_fresh_id_is_not_taken() {
        let store = SessionStore::seeded(Utc::now());
        let id = store.new_task_id();
        assert!(store.task(&id).is_none());
        assert_ne!(id.as_str(), "t1");
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut store = SessionStore::seeded(Utc::now());
        let err = store
            .add_task(Task::new("t1", "Dup", TaskStatus::Todo))
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateId { .. }));
        assert_eq!(store.tasks().len(), 5);
    }

    #[test]
    fn test_item_label_falls_back() {
        let store = SessionStore::seeded(Utc::now());
        assert_eq!(store.item_label(&ItemId::from("i2")), "Ladder (10ft)");
        assert_eq!(store.item_label(&ItemId::from("gone")), UNKNOWN_ITEM_LABEL);
        assert_eq!(display_name(None), "Unknown");
    }
}
