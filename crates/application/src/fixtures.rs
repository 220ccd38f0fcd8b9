//! Demo data every session starts from
//!
//! Dates are relative to `now`, in `now`'s own timezone, so "tomorrow at
//! 10:00" means 10:00 on the dispatcher's wall clock.

use chrono::{DateTime, Duration, NaiveTime, TimeZone, Utc};
use domain::{
    Appointment, AppointmentStatus, Client, Employee, Item, Service, Task, TaskStatus,
};

#[derive(Debug, Clone, Default)]
pub struct Fixtures {
    pub clients: Vec<Client>,
    pub employees: Vec<Employee>,
    pub services: Vec<Service>,
    pub items: Vec<Item>,
    pub appointments: Vec<Appointment>,
    pub tasks: Vec<Task>,
}

/// Wall-clock time `days` after `now`'s date
fn at<Tz: TimeZone>(now: &DateTime<Tz>, days: i64, hour: u32, minute: u32) -> DateTime<Utc> {
    let date = now.date_naive() + Duration::days(days);
    let naive = date.and_time(NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or_default());
    now.timezone()
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| Utc.from_utc_datetime(&naive))
}

fn client(id: &str, name: &str, phone: &str, email: &str, address: &str) -> Client {
    Client {
        phone: Some(phone.to_string()),
        email: Some(email.to_string()),
        address: Some(address.to_string()),
        ..Client::new(id, name)
    }
}

fn employee(id: &str, name: &str, skills: [&str; 2], workload: u32) -> Employee {
    Employee {
        current_workload: workload,
        ..Employee::new(id, name).with_skills(skills)
    }
}

fn service(
    id: &str,
    name: &str,
    description: &str,
    price: f64,
    minutes: u32,
    items: &[&str],
) -> Service {
    Service {
        description: Some(description.to_string()),
        duration_minutes: Some(minutes),
        associated_item_ids: items.iter().map(|&i| i.into()).collect(),
        ..Service::new(id, name, price)
    }
}

fn item(id: &str, name: &str, description: &str, price: f64, stock: u32) -> Item {
    Item {
        description: Some(description.to_string()),
        stock: Some(stock),
        ..Item::new(id, name, price)
    }
}

struct Booking<'a> {
    id: &'a str,
    client: (&'a str, &'a str),
    employee: (&'a str, &'a str),
    service: (&'a str, &'a str),
    location: &'a str,
    notes: Option<&'a str>,
    status: AppointmentStatus,
}

fn appointment(b: Booking<'_>, start: DateTime<Utc>, end: DateTime<Utc>) -> Appointment {
    Appointment {
        status: b.status,
        client_id: Some(b.client.0.into()),
        client_name: Some(b.client.1.to_string()),
        employee_id: Some(b.employee.0.into()),
        employee_name: Some(b.employee.1.to_string()),
        service_id: Some(b.service.0.into()),
        service_name: Some(b.service.1.to_string()),
        location: Some(b.location.to_string()),
        notes: b.notes.map(str::to_string),
        ..Appointment::new(
            b.id,
            format!("{} - {}", b.service.1, b.client.1),
            start,
            end,
        )
    }
}

pub fn seed<Tz: TimeZone>(now: DateTime<Tz>) -> Fixtures {
    const MAIN_ST: &str = "123 Main St, Anytown, USA";
    const OAK_AVE: &str = "456 Oak Ave, Anytown, USA";
    const JOHN: (&str, &str) = ("c1", "John Doe");
    const JANE: (&str, &str) = ("c2", "Jane Roe");
    const ALICE: (&str, &str) = ("e1", "Alice Smith");
    const BOB: (&str, &str) = ("e2", "Bob Johnson");
    const EXTERIOR: (&str, &str) = ("s1", "Exterior Cleaning");
    const WINDOWS: (&str, &str) = ("s2", "Window Washing");

    let clients = vec![
        client("c1", "John Doe", "555-1234", "john@example.com", MAIN_ST),
        client("c2", "Jane Roe", "555-5678", "jane@example.com", OAK_AVE),
        client(
            "c3",
            "Charlie Brown",
            "555-8765",
            "charlie@example.com",
            "789 Pine Ln, Anytown, USA",
        ),
    ];

    let employees = vec![
        employee("e1", "Alice Smith", ["cleaning", "driving"], 2),
        employee("e2", "Bob Johnson", ["window_washing", "gardening"], 1),
    ];

    let services = vec![
        service(
            "s1",
            "Exterior Cleaning",
            "Full exterior wash and detailing.",
            150.0,
            120,
            &["i1"],
        ),
        service(
            "s2",
            "Window Washing",
            "Interior and exterior window cleaning.",
            80.0,
            60,
            &[],
        ),
        service(
            "s3",
            "Gutter Cleaning",
            "Removal of debris from gutters.",
            120.0,
            90,
            &["i2", "i3"],
        ),
    ];

    let items = vec![
        item("i1", "PowerClean X Solution", "Heavy-duty cleaning agent.", 25.99, 50),
        item("i2", "Ladder (10ft)", "Standard extension ladder.", 5.00, 5),
        item("i3", "Safety Harness", "For high-altitude work.", 2.00, 10),
    ];

    let appointments = vec![
        appointment(
            Booking {
                id: "1",
                client: JOHN,
                employee: ALICE,
                service: EXTERIOR,
                location: MAIN_ST,
                notes: Some("Focus on the north side."),
                status: AppointmentStatus::Scheduled,
            },
            at(&now, 1, 10, 0),
            at(&now, 1, 12, 0),
        ),
        appointment(
            Booking {
                id: "2",
                client: JANE,
                employee: BOB,
                service: WINDOWS,
                location: OAK_AVE,
                notes: None,
                status: AppointmentStatus::Confirmed,
            },
            at(&now, 2, 14, 0),
            at(&now, 2, 15, 0),
        ),
        appointment(
            Booking {
                id: "3",
                client: JOHN,
                employee: BOB,
                service: WINDOWS,
                location: MAIN_ST,
                notes: Some("Check front windows first."),
                status: AppointmentStatus::Scheduled,
            },
            at(&now, 0, 9, 0),
            at(&now, 0, 11, 0),
        ),
        appointment(
            Booking {
                id: "4",
                client: JANE,
                employee: ALICE,
                service: EXTERIOR,
                location: OAK_AVE,
                notes: None,
                status: AppointmentStatus::Scheduled,
            },
            at(&now, 3, 11, 0),
            at(&now, 3, 13, 0),
        ),
        appointment(
            Booking {
                id: "5",
                client: JOHN,
                employee: ALICE,
                service: WINDOWS,
                location: MAIN_ST,
                notes: None,
                status: AppointmentStatus::Confirmed,
            },
            at(&now, 4, 15, 0),
            at(&now, 4, 16, 30),
        ),
    ];

    let tasks = vec![
        Task {
            description: Some("Ensure all cleaning supplies and machinery are ready.".into()),
            deadline: Some(at(&now, 1, 17, 0)),
            assigned_to: Some(ALICE.0.into()),
            assigned_to_name: Some(ALICE.1.into()),
            client_id: Some(JOHN.0.into()),
            client_name: Some(JOHN.1.into()),
            location: Some("Warehouse".into()),
            ..Task::new("t1", "Prepare equipment for Client A", TaskStatus::Todo)
        },
        Task {
            description: Some("Perform window washing service at client location.".into()),
            deadline: Some(at(&now, 0, 17, 0)),
            assigned_to: Some(BOB.0.into()),
            assigned_to_name: Some(BOB.1.into()),
            client_id: Some(JANE.0.into()),
            client_name: Some(JANE.1.into()),
            location: Some(OAK_AVE.into()),
            ..Task::new(
                "t2",
                "Service Client B - Window Washing",
                TaskStatus::InProgress,
            )
        },
        Task {
            description: Some("Call Client C regarding their quote request.".into()),
            assigned_to: Some(ALICE.0.into()),
            assigned_to_name: Some(ALICE.1.into()),
            client_id: Some("c3".into()),
            client_name: Some("Charlie Brown".into()),
            ..Task::new("t3", "Follow up with Client C inquiry", TaskStatus::Todo)
        },
        Task {
            description: Some("Stock is low, need to reorder PowerClean X.".into()),
            deadline: Some(at(&now, 5, 17, 0)),
            location: Some("Office".into()),
            ..Task::new("t4", "Order new cleaning solution", TaskStatus::Blocked)
        },
        Task {
            description: Some("Complete the quarterly performance report.".into()),
            assigned_to: Some(ALICE.0.into()),
            assigned_to_name: Some(ALICE.1.into()),
            ..Task::new("t5", "Finalize Q3 Report", TaskStatus::Completed)
        },
    ];

    Fixtures {
        clients,
        employees,
        services,
        items,
        appointments,
        tasks,
    }
}
