//! Medication (medicamento) database operations.

use rusqlite::{params, OptionalExtension};

use super::{Database, DbError, DbResult};
use crate::models::{Medication, NewMedication};

fn medication_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Medication> {
    Ok(Medication {
        id_medicamento: row.get(0)?,
        id_paciente: row.get(1)?,
        medicamento: row.get(2)?,
        dosis: row.get(3)?,
        frecuencia: row.get(4)?,
        fecha_inicio: row.get(5)?,
        fecha_fin: row.get(6)?,
    })
}

impl Database {
    /// Insert a medication for a patient. Parent-existence check and insert
    /// run as one statement.
    pub fn insert_medication(
        &self,
        patient_id: i64,
        payload: &NewMedication,
    ) -> DbResult<Medication> {
        let rows_affected = self.conn.execute(
            r#"
            INSERT INTO medicamentos (
                id_paciente, medicamento, dosis, frecuencia, fecha_inicio, fecha_fin
            )
            SELECT ?1, ?2, ?3, ?4, ?5, ?6
            WHERE EXISTS (SELECT 1 FROM pacientes WHERE id_paciente = ?1)
            "#,
            params![
                patient_id,
                payload.medicamento,
                payload.dosis,
                payload.frecuencia,
                payload.fecha_inicio,
                payload.fecha_fin,
            ],
        )?;

        if rows_affected == 0 {
            return Err(DbError::NotFound(format!("patient {patient_id}")));
        }

        Ok(Medication {
            id_medicamento: self.conn.last_insert_rowid(),
            id_paciente: patient_id,
            medicamento: payload.medicamento.clone(),
            dosis: payload.dosis.clone(),
            frecuencia: payload.frecuencia.clone(),
            fecha_inicio: payload.fecha_inicio.clone(),
            fecha_fin: payload.fecha_fin.clone(),
        })
    }

    /// Update an existing medication. Returns the stored record, or None when
    /// the id does not resolve.
    pub fn update_medication(
        &self,
        id: i64,
        payload: &NewMedication,
    ) -> DbResult<Option<Medication>> {
        let rows_affected = self.conn.execute(
            r#"
            UPDATE medicamentos SET
                medicamento = ?2,
                dosis = ?3,
                frecuencia = ?4,
                fecha_inicio = ?5,
                fecha_fin = ?6
            WHERE id_medicamento = ?1
            "#,
            params![
                id,
                payload.medicamento,
                payload.dosis,
                payload.frecuencia,
                payload.fecha_inicio,
                payload.fecha_fin,
            ],
        )?;

        if rows_affected == 0 {
            return Ok(None);
        }
        self.get_medication(id)
    }

    /// Get a medication by id.
    pub fn get_medication(&self, id: i64) -> DbResult<Option<Medication>> {
        self.conn
            .query_row(
                r#"
                SELECT id_medicamento, id_paciente, medicamento, dosis,
                       frecuencia, fecha_inicio, fecha_fin
                FROM medicamentos
                WHERE id_medicamento = ?
                "#,
                [id],
                medication_from_row,
            )
            .optional()
            .map_err(Into::into)
    }

    /// All medications of one patient, in insertion order.
    pub fn medications_for_patient(&self, patient_id: i64) -> DbResult<Vec<Medication>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id_medicamento, id_paciente, medicamento, dosis,
                   frecuencia, fecha_inicio, fecha_fin
            FROM medicamentos
            WHERE id_paciente = ?
            ORDER BY id_medicamento ASC
            "#,
        )?;

        let rows = stmt.query_map([patient_id], medication_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Delete a medication.
    pub fn delete_medication(&self, id: i64) -> DbResult<bool> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM medicamentos WHERE id_medicamento = ?", [id])?;
        Ok(rows_affected > 0)
    }
}
