// ==========================================
// Install Orders - person repository
// ==========================================

use rusqlite::{params, Connection, Row};
use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;

use crate::domain::person::Person;
use crate::domain::types::Role;
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::{encode_string_list, parse_string_list, parse_uuid, parse_uuid_opt};

struct RawPersonRow {
    person_id: String,
    name: String,
    role: String,
    company_id: Option<String>,
    services: String,
}

fn read_raw_row(row: &Row<'_>) -> rusqlite::Result<RawPersonRow> {
    Ok(RawPersonRow {
        person_id: row.get(0)?,
        name: row.get(1)?,
        role: row.get(2)?,
        company_id: row.get(3)?,
        services: row.get(4)?,
    })
}

fn to_person(raw: RawPersonRow) -> RepositoryResult<Person> {
    let role = Role::parse(&raw.role).ok_or_else(|| RepositoryError::FieldValueError {
        field: "role",
        message: format!("unknown token: {}", raw.role),
    })?;
    Ok(Person {
        person_id: parse_uuid("person_id", &raw.person_id)?,
        name: raw.name,
        role,
        company_id: parse_uuid_opt("company_id", raw.company_id.as_deref())?,
        services: parse_string_list("services", &raw.services)?,
    })
}

pub struct PersonRepository {
    conn: Arc<Mutex<Connection>>,
}

impl PersonRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    pub fn create(&self, person: &Person) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"INSERT INTO persons (person_id, name, role, company_id, services)
               VALUES (?, ?, ?, ?, ?)"#,
            params![
                person.person_id.to_string(),
                person.name,
                person.role.as_str(),
                person.company_id.map(|id| id.to_string()),
                encode_string_list(&person.services),
            ],
        )?;
        Ok(())
    }

    pub fn find_by_id(&self, person_id: Uuid) -> RepositoryResult<Option<Person>> {
        let conn = self.get_conn()?;
        let raw = match conn.query_row(
            "SELECT person_id, name, role, company_id, services FROM persons WHERE person_id = ?",
            params![person_id.to_string()],
            read_raw_row,
        ) {
            Ok(raw) => raw,
            Err(rusqlite::Error::QueryReturnedNoRows) => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        to_person(raw).map(Some)
    }

    /// Installer-role members of a company, in stable insertion
    /// order. The sole-operator resolver relies on this ordering
    /// being deterministic.
    pub fn list_installers(&self, company_id: Uuid) -> RepositoryResult<Vec<Person>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"SELECT person_id, name, role, company_id, services
               FROM persons
               WHERE role = 'installer' AND company_id = ?
               ORDER BY rowid"#,
        )?;
        let raws = stmt
            .query_map(params![company_id.to_string()], read_raw_row)?
            .collect::<Result<Vec<_>, _>>()?;
        raws.into_iter().map(to_person).collect()
    }

    pub fn update(&self, person: &Person) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let changed = conn.execute(
            r#"UPDATE persons SET name = ?, role = ?, company_id = ?, services = ?
               WHERE person_id = ?"#,
            params![
                person.name,
                person.role.as_str(),
                person.company_id.map(|id| id.to_string()),
                encode_string_list(&person.services),
                person.person_id.to_string(),
            ],
        )?;
        if changed == 0 {
            return Err(RepositoryError::NotFound {
                entity: "Person",
                id: person.person_id.to_string(),
            });
        }
        Ok(())
    }
}
