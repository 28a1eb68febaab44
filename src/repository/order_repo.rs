// ==========================================
// Install Orders - order repository
// ==========================================
// Load/save of the Order aggregate. Updates are guarded by the
// optimistic revision counter: a stale writer gets
// OptimisticLockFailure instead of silently clobbering.
// ==========================================

use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::{params, Connection, Row};
use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;

use crate::domain::order::Order;
use crate::domain::types::{InstallationStatus, TransportStatus};
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::{encode_string_list, parse_string_list, parse_uuid, parse_uuid_opt};

const ORDER_COLUMNS: &str = "order_id, order_no, store_id, client_name, client_phone, \
     client_address, service_type, with_transport, installation_status, transport_status, \
     company_id, company_name, installer_id, installer_name, transporter_id, transporter_name, \
     installation_date, transport_date, complaint_notes, complaint_photos, notes, \
     invoice_issued, will_be_settled, created_at, updated_at, revision";

/// Row image with storage-level types; converted to the domain
/// Order outside the rusqlite closure so conversion failures map
/// to RepositoryError instead of rusqlite::Error.
struct RawOrderRow {
    order_id: String,
    order_no: String,
    store_id: String,
    client_name: String,
    client_phone: Option<String>,
    client_address: String,
    service_type: String,
    with_transport: bool,
    installation_status: String,
    transport_status: Option<String>,
    company_id: String,
    company_name: String,
    installer_id: Option<String>,
    installer_name: Option<String>,
    transporter_id: Option<String>,
    transporter_name: Option<String>,
    installation_date: Option<NaiveDate>,
    transport_date: Option<NaiveDate>,
    complaint_notes: Option<String>,
    complaint_photos: String,
    notes: Option<String>,
    invoice_issued: bool,
    will_be_settled: bool,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
    revision: i64,
}

fn read_raw_row(row: &Row<'_>) -> rusqlite::Result<RawOrderRow> {
    Ok(RawOrderRow {
        order_id: row.get(0)?,
        order_no: row.get(1)?,
        store_id: row.get(2)?,
        client_name: row.get(3)?,
        client_phone: row.get(4)?,
        client_address: row.get(5)?,
        service_type: row.get(6)?,
        with_transport: row.get(7)?,
        installation_status: row.get(8)?,
        transport_status: row.get(9)?,
        company_id: row.get(10)?,
        company_name: row.get(11)?,
        installer_id: row.get(12)?,
        installer_name: row.get(13)?,
        transporter_id: row.get(14)?,
        transporter_name: row.get(15)?,
        installation_date: row.get(16)?,
        transport_date: row.get(17)?,
        complaint_notes: row.get(18)?,
        complaint_photos: row.get(19)?,
        notes: row.get(20)?,
        invoice_issued: row.get(21)?,
        will_be_settled: row.get(22)?,
        created_at: row.get(23)?,
        updated_at: row.get(24)?,
        revision: row.get(25)?,
    })
}

fn to_order(raw: RawOrderRow) -> RepositoryResult<Order> {
    let installation_status = InstallationStatus::parse_canonical(&raw.installation_status)
        .ok_or_else(|| RepositoryError::FieldValueError {
            field: "installation_status",
            message: format!("unknown token: {}", raw.installation_status),
        })?;
    let transport_status = raw
        .transport_status
        .as_deref()
        .map(|s| {
            TransportStatus::parse_canonical(s).ok_or_else(|| RepositoryError::FieldValueError {
                field: "transport_status",
                message: format!("unknown token: {s}"),
            })
        })
        .transpose()?;

    Ok(Order {
        order_id: parse_uuid("order_id", &raw.order_id)?,
        order_no: raw.order_no,
        store_id: raw.store_id,
        client_name: raw.client_name,
        client_phone: raw.client_phone,
        client_address: raw.client_address,
        service_type: raw.service_type,
        with_transport: raw.with_transport,
        installation_status,
        transport_status,
        company_id: parse_uuid("company_id", &raw.company_id)?,
        company_name: raw.company_name,
        installer_id: parse_uuid_opt("installer_id", raw.installer_id.as_deref())?,
        installer_name: raw.installer_name,
        transporter_id: parse_uuid_opt("transporter_id", raw.transporter_id.as_deref())?,
        transporter_name: raw.transporter_name,
        installation_date: raw.installation_date,
        transport_date: raw.transport_date,
        complaint_notes: raw.complaint_notes,
        complaint_photos: parse_string_list("complaint_photos", &raw.complaint_photos)?,
        notes: raw.notes,
        invoice_issued: raw.invoice_issued,
        will_be_settled: raw.will_be_settled,
        created_at: raw.created_at,
        updated_at: raw.updated_at,
        revision: raw.revision,
    })
}

// ==========================================
// OrderRepository
// ==========================================
pub struct OrderRepository {
    conn: Arc<Mutex<Connection>>,
}

impl OrderRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// Allocate the next caller-visible order number for the year,
    /// e.g. "ZL-2024-0017". Numbers are never reused.
    pub fn next_order_no(&self, year: i32) -> RepositoryResult<String> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"INSERT INTO order_no_seq (year, last_seq) VALUES (?, 1)
               ON CONFLICT(year) DO UPDATE SET last_seq = last_seq + 1"#,
            params![year],
        )?;
        let seq: i64 = conn.query_row(
            "SELECT last_seq FROM order_no_seq WHERE year = ?",
            params![year],
            |row| row.get(0),
        )?;
        Ok(format!("ZL-{year}-{seq:04}"))
    }

    pub fn create(&self, order: &Order) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            &format!("INSERT INTO orders ({ORDER_COLUMNS}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"),
            params![
                order.order_id.to_string(),
                order.order_no,
                order.store_id,
                order.client_name,
                order.client_phone,
                order.client_address,
                order.service_type,
                order.with_transport,
                order.installation_status.as_str(),
                order.transport_status.map(|s| s.as_str()),
                order.company_id.to_string(),
                order.company_name,
                order.installer_id.map(|id| id.to_string()),
                order.installer_name,
                order.transporter_id.map(|id| id.to_string()),
                order.transporter_name,
                order.installation_date,
                order.transport_date,
                order.complaint_notes,
                encode_string_list(&order.complaint_photos),
                order.notes,
                order.invoice_issued,
                order.will_be_settled,
                order.created_at,
                order.updated_at,
                order.revision,
            ],
        )?;
        Ok(())
    }

    pub fn find_by_id(&self, order_id: Uuid) -> RepositoryResult<Option<Order>> {
        let conn = self.get_conn()?;
        let raw = match conn.query_row(
            &format!("SELECT {ORDER_COLUMNS} FROM orders WHERE order_id = ?"),
            params![order_id.to_string()],
            read_raw_row,
        ) {
            Ok(raw) => raw,
            Err(rusqlite::Error::QueryReturnedNoRows) => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        to_order(raw).map(Some)
    }

    /// Persist a modified order, guarded by the revision it was
    /// loaded with. On success the stored revision is `expected + 1`
    /// and the new value is returned for the caller to carry.
    pub fn update(&self, order: &Order) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        let expected = order.revision;
        let changed = conn.execute(
            r#"UPDATE orders SET
                store_id = ?, client_name = ?, client_phone = ?, client_address = ?,
                service_type = ?, installation_status = ?, transport_status = ?,
                company_id = ?, company_name = ?,
                installer_id = ?, installer_name = ?,
                transporter_id = ?, transporter_name = ?,
                installation_date = ?, transport_date = ?,
                complaint_notes = ?, complaint_photos = ?, notes = ?,
                invoice_issued = ?, will_be_settled = ?,
                updated_at = ?, revision = revision + 1
               WHERE order_id = ? AND revision = ?"#,
            params![
                order.store_id,
                order.client_name,
                order.client_phone,
                order.client_address,
                order.service_type,
                order.installation_status.as_str(),
                order.transport_status.map(|s| s.as_str()),
                order.company_id.to_string(),
                order.company_name,
                order.installer_id.map(|id| id.to_string()),
                order.installer_name,
                order.transporter_id.map(|id| id.to_string()),
                order.transporter_name,
                order.installation_date,
                order.transport_date,
                order.complaint_notes,
                encode_string_list(&order.complaint_photos),
                order.notes,
                order.invoice_issued,
                order.will_be_settled,
                order.updated_at,
                order.order_id.to_string(),
                expected,
            ],
        )?;

        if changed == 0 {
            let actual: Option<i64> = conn
                .query_row(
                    "SELECT revision FROM orders WHERE order_id = ?",
                    params![order.order_id.to_string()],
                    |row| row.get(0),
                )
                .map(Some)
                .or_else(|e| match e {
                    rusqlite::Error::QueryReturnedNoRows => Ok(None),
                    other => Err(other),
                })?;
            return Err(match actual {
                Some(actual) => RepositoryError::OptimisticLockFailure {
                    entity: "Order",
                    id: order.order_id.to_string(),
                    expected,
                    actual,
                },
                None => RepositoryError::NotFound {
                    entity: "Order",
                    id: order.order_id.to_string(),
                },
            });
        }

        Ok(expected + 1)
    }

    /// Explicit delete. No cascading business logic.
    pub fn delete(&self, order_id: Uuid) -> RepositoryResult<bool> {
        let conn = self.get_conn()?;
        let changed = conn.execute(
            "DELETE FROM orders WHERE order_id = ?",
            params![order_id.to_string()],
        )?;
        Ok(changed > 0)
    }

    pub fn list_by_company(&self, company_id: Uuid) -> RepositoryResult<Vec<Order>> {
        self.list_where("company_id = ?", company_id)
    }

    pub fn list_by_installer(&self, installer_id: Uuid) -> RepositoryResult<Vec<Order>> {
        self.list_where("installer_id = ?", installer_id)
    }

    fn list_where(&self, predicate: &str, id: Uuid) -> RepositoryResult<Vec<Order>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE {predicate} ORDER BY created_at DESC"
        ))?;
        let raws = stmt
            .query_map(params![id.to_string()], read_raw_row)?
            .collect::<Result<Vec<_>, _>>()?;
        raws.into_iter().map(to_order).collect()
    }
}
