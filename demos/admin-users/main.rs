//! User management screen built on the data table.
//!
//! Run with `cargo run` from this directory. Set `RUST_LOG=debug` to write a
//! trace of table events to `admin-users.log`.

use bubbletea_datatable::prelude::*;
use bubbletea_rs::{quit, tick, Cmd, KeyMsg, Model, Msg, Program};
use crossterm::event::{KeyCode, KeyModifiers};
use lipgloss_extras::prelude::{Color, Style};
use std::sync::Mutex;
use std::time::Duration;
use tracing::info;

/// Emitted by row actions; handled by the app.
struct UserAction {
    action: &'static str,
    id: i64,
}

/// Emitted when the loading delay is over.
struct Loaded;

fn emit(action: &'static str, row: &Row) -> Option<Cmd> {
    let id = match row.get("id") {
        Value::Int(id) => *id,
        _ => return None,
    };
    Some(tick(Duration::from_nanos(1), move |_| {
        Box::new(UserAction { action, id }) as Msg
    }))
}

fn sample_users() -> Vec<Row> {
    let names = [
        "Ava Brooks", "Ben Carter", "Chloe Diaz", "Dan Evans", "Ella Fox", "Finn Gray",
        "Grace Hill", "Hugo Ito", "Iris Jones", "Jack King", "Kira Lane", "Leo Moss",
        "Mia Nash", "Noah Ortiz", "Olive Park", "Paul Quinn", "Rosa Reed", "Sam Stone",
        "Tara Uhl", "Umar Vale", "Vera West", "Wes Young", "Xena Zhou",
    ];
    let roles = ["admin", "practitioner", "user", "user"];
    let statuses = ["active", "active", "pending", "suspended"];

    names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let email = format!("{}@example.com", name.to_lowercase().replace(' ', "."));
            Row::new()
                .with("id", i as i64 + 1)
                .with("name", *name)
                .with("email", email)
                .with("role", roles[i % roles.len()])
                .with("status", statuses[(i * 3) % statuses.len()])
                .with("bookings", ((i * 7) % 23) as i64)
        })
        .collect()
}

fn build_table() -> DataTable {
    let status_style = |value: &Value, _: &Row| match value.to_string().as_str() {
        "active" => "● active".to_string(),
        "pending" => "◐ pending".to_string(),
        other => format!("○ {}", other),
    };

    DataTable::new(vec![
        Column::new("name", "Name").sortable(),
        Column::new("email", "Email"),
        Column::new("role", "Role").sortable(),
        Column::new("status", "Status")
            .sortable()
            .with_render(status_style),
        Column::new("bookings", "Bookings")
            .sortable()
            .with_style(Style::new().foreground(Color::from("62"))),
    ])
    .with_title("Users")
    .with_rows(sample_users())
    .with_row_key("id")
    .with_page_size(8)
    .with_search_placeholder("Search users...")
    .with_filters(vec![
        Filter::new("role", "All roles")
            .with_option("admin", "Admin")
            .with_option("practitioner", "Practitioner")
            .with_option("user", "User"),
        Filter::new("status", "All statuses")
            .with_option("active", "Active")
            .with_option("pending", "Pending")
            .with_option("suspended", "Suspended"),
    ])
    .with_actions(vec![
        Action::new("view", "View", |row| emit("view", row)).with_icon("👁"),
        Action::new("edit", "Edit", |row| emit("edit", row)).with_icon("✎"),
        Action::new("suspend", "Suspend", |row| emit("suspend", row))
            .with_show(|row| row.get("status").to_string() != "suspended"),
        Action::new("activate", "Activate", |row| emit("activate", row))
            .with_show(|row| row.get("status").to_string() != "active"),
        Action::new("delete", "Delete", |row| emit("delete", row))
            .with_icon("🗑")
            .danger(),
    ])
    .with_on_export(|| {
        info!("Export requested");
        None
    })
    .with_loading(true)
}

struct App {
    table: DataTable,
    last_event: Option<String>,
}

impl App {
    fn apply(&mut self, action: &UserAction) {
        let mut rows = self.table.rows().to_vec();
        let position = rows
            .iter()
            .position(|r| r.get("id") == &Value::Int(action.id));
        let Some(position) = position else {
            return;
        };

        match action.action {
            "suspend" => rows[position].set("status", "suspended"),
            "activate" => rows[position].set("status", "active"),
            "delete" => {
                rows.remove(position);
            }
            _ => {}
        }
        self.last_event = Some(format!("{} user #{}", action.action, action.id));
        self.table.set_rows(rows);
    }
}

impl Model for App {
    fn init() -> (Self, Option<Cmd>) {
        let app = App {
            table: build_table(),
            last_event: None,
        };
        let load = tick(Duration::from_millis(600), |_| Box::new(Loaded) as Msg);
        (app, Some(load))
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if msg.downcast_ref::<Loaded>().is_some() {
            self.table.set_loading(false);
            return None;
        }
        if let Some(action) = msg.downcast_ref::<UserAction>() {
            self.apply(action);
            return None;
        }
        if let Some(key) = msg.downcast_ref::<KeyMsg>() {
            let ctrl_c =
                key.key == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL);
            let q = key.key == KeyCode::Char('q') && self.table.focus_region() == Focus::Table;
            if ctrl_c || q {
                return Some(quit());
            }
        }
        self.table.update(msg)
    }

    fn view(&self) -> String {
        let footer = match &self.last_event {
            Some(event) => format!("\nLast: {}", event),
            None => String::new(),
        };
        format!("{}{}\n\nq quit", self.table.view(), footer)
    }
}

fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    if std::env::var_os("RUST_LOG").is_none() {
        return Ok(());
    }
    let file = std::fs::File::create("admin-users.log")?;
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging()?;

    let program = Program::<App>::builder().alt_screen(true).build()?;
    program.run().await?;
    Ok(())
}
