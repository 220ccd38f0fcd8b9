use application::{SessionStore, StoreError, UNKNOWN_ITEM_LABEL};
use chrono::{TimeZone, Utc};
use domain::{
    Appointment, Client, Employee, ItemId, ServiceId, Task, TaskId, TaskStatus, UNKNOWN_LABEL,
};
use proptest::prelude::*;

fn store() -> SessionStore {
    SessionStore::seeded(Utc.with_ymd_and_hms(2024, 3, 10, 8, 0, 0).unwrap())
}

/// Deleting an item unlinks it from every service and deletes no service
#[test]
fn test_item_delete_cascades_to_services() -> anyhow::Result<()> {
    let mut store = store();
    let services_before = store.services().len();

    store.remove_item(&ItemId::new("i2"))?;

    assert_eq!(store.services().len(), services_before);
    assert!(store.item(&ItemId::new("i2")).is_none());
    for service in store.services() {
        assert!(!service.uses_item(&ItemId::new("i2")));
    }
    let gutter = store.service(&ServiceId::new("s3")).unwrap();
    assert_eq!(gutter.associated_item_ids.len(), 1);
    assert!(gutter.uses_item(&ItemId::new("i3")));

    Ok(())
}

#[test]
fn test_remove_missing_item_is_not_found() {
    let mut store = store();
    let err = store.remove_item(&ItemId::new("i404")).unwrap_err();
    assert!(matches!(err, StoreError::NotFound { .. }));
    assert_eq!(store.items().len(), 3);
}

#[test]
fn test_dangling_item_label() {
    let mut store = store();
    // link an id that was never in the catalog
    let mut service = store.service(&ServiceId::new("s2")).cloned().unwrap();
    service.associated_item_ids.insert(ItemId::new("ghost"));
    store.replace_service(service).unwrap();

    assert_eq!(store.item_label(&ItemId::new("ghost")), UNKNOWN_ITEM_LABEL);
}

#[test]
fn test_rename_client_resyncs_names() -> anyhow::Result<()> {
    let mut store = store();
    let mut client = store.clients()[0].clone();
    client.name = "Johnathan Doe".into();
    store.update_client(client)?;

    let t1 = store.task(&TaskId::new("t1")).unwrap();
    assert_eq!(t1.client_name.as_deref(), Some("Johnathan Doe"));
    for apt in store
        .appointments()
        .iter()
        .filter(|a| a.client_id.as_ref().map(|c| c.as_str()) == Some("c1"))
    {
        assert_eq!(apt.client_name.as_deref(), Some("Johnathan Doe"));
    }
    Ok(())
}

#[test]
fn test_rename_employee_resyncs_assignee() -> anyhow::Result<()> {
    let mut store = store();
    let bob = Employee::new("e2", "Robert Johnson").with_skills(["window_washing"]);
    store.update_employee(bob)?;

    let t2 = store.task(&TaskId::new("t2")).unwrap();
    assert_eq!(t2.assigned_to_name.as_deref(), Some("Robert Johnson"));
    Ok(())
}

#[test]
fn test_deleted_service_renders_unknown() -> anyhow::Result<()> {
    let mut store = store();
    store.remove_service(&ServiceId::new("s1"))?;

    let first = &store.appointments()[0];
    assert_eq!(first.service_id, Some(ServiceId::new("s1")));
    assert_eq!(
        application::store::display_name(first.service_name.as_deref()),
        UNKNOWN_LABEL
    );
    Ok(())
}

#[test]
fn test_resolve_missing_references() {
    let store = store();
    let mut task = Task::new("t9", "Orphan", TaskStatus::Todo);
    task.assigned_to = Some("e404".into());
    task.client_id = Some("c1".into());
    store.resolve_task_names(&mut task);

    assert_eq!(task.assigned_to_name, None);
    assert_eq!(task.client_name.as_deref(), Some("John Doe"));
}

#[test]
fn test_backwards_appointment_is_stored() {
    let mut store = store();
    let start = Utc.with_ymd_and_hms(2024, 3, 12, 12, 0, 0).unwrap();
    let apt = Appointment::new("a-back", "Backwards", start, start - chrono::Duration::hours(1));

    assert!(store.add_appointment(apt).is_ok());
    assert_eq!(store.appointments().len(), 6);
}

#[test]
fn test_duplicate_client_rejected() {
    let mut store = store();
    let err = store.add_client(Client::new("c1", "Clone")).unwrap_err();
    assert!(matches!(err, StoreError::DuplicateId { .. }));
}

proptest! {
    #[test]
    fn prop_fresh_ids_never_collide(extra in 0usize..20) {
        let mut store = store();
        for n in 0..extra {
            let id = store.new_task_id();
            prop_assert!(store.task(&id).is_none());
            store.add_task(Task::new(id, format!("task {n}"), TaskStatus::Todo)).unwrap();
        }
        prop_assert_eq!(store.tasks().len(), 5 + extra);
    }
}
