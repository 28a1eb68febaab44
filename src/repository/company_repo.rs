// ==========================================
// Install Orders - company repository
// ==========================================
// operator_kind is stored as a discriminator column plus an
// optional sole_operator_id reference.
// ==========================================

use rusqlite::{params, Connection, Row};
use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;

use crate::domain::company::Company;
use crate::domain::types::OperatorKind;
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::{parse_uuid, parse_uuid_opt};

struct RawCompanyRow {
    company_id: String,
    name: String,
    contact_person: Option<String>,
    contact_phone: Option<String>,
    operator_kind: String,
    sole_operator_id: Option<String>,
}

fn read_raw_row(row: &Row<'_>) -> rusqlite::Result<RawCompanyRow> {
    Ok(RawCompanyRow {
        company_id: row.get(0)?,
        name: row.get(1)?,
        contact_person: row.get(2)?,
        contact_phone: row.get(3)?,
        operator_kind: row.get(4)?,
        sole_operator_id: row.get(5)?,
    })
}

fn to_company(raw: RawCompanyRow) -> RepositoryResult<Company> {
    let operator_kind = match raw.operator_kind.as_str() {
        "STANDARD" => OperatorKind::Standard,
        "SOLE_OPERATOR" => {
            let id = parse_uuid_opt("sole_operator_id", raw.sole_operator_id.as_deref())?
                .ok_or_else(|| RepositoryError::FieldValueError {
                    field: "sole_operator_id",
                    message: "missing for SOLE_OPERATOR company".to_string(),
                })?;
            OperatorKind::SoleOperator(id)
        }
        other => {
            return Err(RepositoryError::FieldValueError {
                field: "operator_kind",
                message: format!("unknown token: {other}"),
            })
        }
    };
    Ok(Company {
        company_id: parse_uuid("company_id", &raw.company_id)?,
        name: raw.name,
        contact_person: raw.contact_person,
        contact_phone: raw.contact_phone,
        operator_kind,
    })
}

fn operator_kind_columns(kind: &OperatorKind) -> (&'static str, Option<String>) {
    match kind {
        OperatorKind::Standard => ("STANDARD", None),
        OperatorKind::SoleOperator(id) => ("SOLE_OPERATOR", Some(id.to_string())),
    }
}

pub struct CompanyRepository {
    conn: Arc<Mutex<Connection>>,
}

impl CompanyRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    pub fn create(&self, company: &Company) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let (kind, sole_id) = operator_kind_columns(&company.operator_kind);
        conn.execute(
            r#"INSERT INTO companies
               (company_id, name, contact_person, contact_phone, operator_kind, sole_operator_id)
               VALUES (?, ?, ?, ?, ?, ?)"#,
            params![
                company.company_id.to_string(),
                company.name,
                company.contact_person,
                company.contact_phone,
                kind,
                sole_id,
            ],
        )?;
        Ok(())
    }

    pub fn find_by_id(&self, company_id: Uuid) -> RepositoryResult<Option<Company>> {
        let conn = self.get_conn()?;
        let raw = match conn.query_row(
            r#"SELECT company_id, name, contact_person, contact_phone,
                      operator_kind, sole_operator_id
               FROM companies WHERE company_id = ?"#,
            params![company_id.to_string()],
            read_raw_row,
        ) {
            Ok(raw) => raw,
            Err(rusqlite::Error::QueryReturnedNoRows) => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        to_company(raw).map(Some)
    }

    /// Update the sole-operator tag; set explicitly at company
    /// creation/update time, never recomputed ambiently.
    pub fn set_operator_kind(
        &self,
        company_id: Uuid,
        kind: &OperatorKind,
    ) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let (token, sole_id) = operator_kind_columns(kind);
        let changed = conn.execute(
            "UPDATE companies SET operator_kind = ?, sole_operator_id = ? WHERE company_id = ?",
            params![token, sole_id, company_id.to_string()],
        )?;
        if changed == 0 {
            return Err(RepositoryError::NotFound {
                entity: "Company",
                id: company_id.to_string(),
            });
        }
        Ok(())
    }
}
