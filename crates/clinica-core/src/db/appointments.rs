//! Appointment (cita) database operations.

use rusqlite::{params, OptionalExtension};

use super::{Database, DbError, DbResult};
use crate::models::{Appointment, AppointmentStatus, NewAppointment};

fn appointment_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Appointment> {
    Ok(Appointment {
        id_cita: row.get(0)?,
        id_paciente: row.get(1)?,
        fecha: row.get(2)?,
        hora: row.get(3)?,
        motivo: row.get(4)?,
        medico_asignado: row.get(5)?,
        estatus: AppointmentStatus::from(row.get::<_, String>(6)?),
    })
}

impl Database {
    /// Insert an appointment for a patient. The parent-existence check and
    /// the insert run as one statement, so a patient deleted concurrently can
    /// never leave an orphaned row.
    pub fn insert_appointment(
        &self,
        patient_id: i64,
        payload: &NewAppointment,
    ) -> DbResult<Appointment> {
        let rows_affected = self.conn.execute(
            r#"
            INSERT INTO citas (id_paciente, fecha, hora, motivo, medico_asignado, estatus)
            SELECT ?1, ?2, ?3, ?4, ?5, ?6
            WHERE EXISTS (SELECT 1 FROM pacientes WHERE id_paciente = ?1)
            "#,
            params![
                patient_id,
                payload.fecha,
                payload.hora,
                payload.motivo,
                payload.medico_asignado,
                payload.estatus.as_str(),
            ],
        )?;

        if rows_affected == 0 {
            return Err(DbError::NotFound(format!("patient {patient_id}")));
        }

        Ok(Appointment {
            id_cita: self.conn.last_insert_rowid(),
            id_paciente: patient_id,
            fecha: payload.fecha.clone(),
            hora: payload.hora.clone(),
            motivo: payload.motivo.clone(),
            medico_asignado: payload.medico_asignado.clone(),
            estatus: payload.estatus.clone(),
        })
    }

    /// Update an existing appointment. Returns the stored record, or None
    /// when the id does not resolve.
    pub fn update_appointment(
        &self,
        id: i64,
        payload: &NewAppointment,
    ) -> DbResult<Option<Appointment>> {
        let rows_affected = self.conn.execute(
            r#"
            UPDATE citas SET
                fecha = ?2,
                hora = ?3,
                motivo = ?4,
                medico_asignado = ?5,
                estatus = ?6
            WHERE id_cita = ?1
            "#,
            params![
                id,
                payload.fecha,
                payload.hora,
                payload.motivo,
                payload.medico_asignado,
                payload.estatus.as_str(),
            ],
        )?;

        if rows_affected == 0 {
            return Ok(None);
        }
        self.get_appointment(id)
    }

    /// Get an appointment by id.
    pub fn get_appointment(&self, id: i64) -> DbResult<Option<Appointment>> {
        self.conn
            .query_row(
                r#"
                SELECT id_cita, id_paciente, fecha, hora, motivo, medico_asignado, estatus
                FROM citas
                WHERE id_cita = ?
                "#,
                [id],
                appointment_from_row,
            )
            .optional()
            .map_err(Into::into)
    }

    /// All appointments of one patient, in insertion order.
    pub fn appointments_for_patient(&self, patient_id: i64) -> DbResult<Vec<Appointment>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id_cita, id_paciente, fecha, hora, motivo, medico_asignado, estatus
            FROM citas
            WHERE id_paciente = ?
            ORDER BY id_cita ASC
            "#,
        )?;

        let rows = stmt.query_map([patient_id], appointment_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// All appointments on one exact date across patients, ordered by time of
    /// day.
    pub fn appointments_on(&self, fecha: &str) -> DbResult<Vec<Appointment>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id_cita, id_paciente, fecha, hora, motivo, medico_asignado, estatus
            FROM citas
            WHERE fecha = ?
            ORDER BY hora ASC, id_cita ASC
            "#,
        )?;

        let rows = stmt.query_map([fecha], appointment_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Count appointments whose estatus is the canonical 'Cancelada' token.
    pub fn count_cancelled_appointments(&self) -> DbResult<u64> {
        let total: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM citas WHERE estatus = 'Cancelada'",
            [],
            |row| row.get(0),
        )?;
        Ok(total as u64)
    }

    /// Delete an appointment.
    pub fn delete_appointment(&self, id: i64) -> DbResult<bool> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM citas WHERE id_cita = ?", [id])?;
        Ok(rows_affected > 0)
    }
}
