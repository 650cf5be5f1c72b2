//! Treatment (tratamiento) database operations.

use rusqlite::{params, OptionalExtension};

use super::{Database, DbError, DbResult};
use crate::models::{NewTreatment, Treatment};

fn treatment_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Treatment> {
    Ok(Treatment {
        id_tratamiento: row.get(0)?,
        id_paciente: row.get(1)?,
        diagnostico: row.get(2)?,
        medicamento: row.get(3)?,
        dosis: row.get(4)?,
        fecha_inicio: row.get(5)?,
        fecha_fin: row.get(6)?,
        notas: row.get(7)?,
    })
}

impl Database {
    /// Insert a treatment for a patient. Parent-existence check and insert
    /// run as one statement.
    pub fn insert_treatment(&self, patient_id: i64, payload: &NewTreatment) -> DbResult<Treatment> {
        let rows_affected = self.conn.execute(
            r#"
            INSERT INTO tratamientos (
                id_paciente, diagnostico, medicamento, dosis,
                fecha_inicio, fecha_fin, notas
            )
            SELECT ?1, ?2, ?3, ?4, ?5, ?6, ?7
            WHERE EXISTS (SELECT 1 FROM pacientes WHERE id_paciente = ?1)
            "#,
            params![
                patient_id,
                payload.diagnostico,
                payload.medicamento,
                payload.dosis,
                payload.fecha_inicio,
                payload.fecha_fin,
                payload.notas,
            ],
        )?;

        if rows_affected == 0 {
            return Err(DbError::NotFound(format!("patient {patient_id}")));
        }

        Ok(Treatment {
            id_tratamiento: self.conn.last_insert_rowid(),
            id_paciente: patient_id,
            diagnostico: payload.diagnostico.clone(),
            medicamento: payload.medicamento.clone(),
            dosis: payload.dosis.clone(),
            fecha_inicio: payload.fecha_inicio.clone(),
            fecha_fin: payload.fecha_fin.clone(),
            notas: payload.notas.clone(),
        })
    }

    /// Update an existing treatment. Returns the stored record, or None when
    /// the id does not resolve.
    pub fn update_treatment(&self, id: i64, payload: &NewTreatment) -> DbResult<Option<Treatment>> {
        let rows_affected = self.conn.execute(
            r#"
            UPDATE tratamientos SET
                diagnostico = ?2,
                medicamento = ?3,
                dosis = ?4,
                fecha_inicio = ?5,
                fecha_fin = ?6,
                notas = ?7
            WHERE id_tratamiento = ?1
            "#,
            params![
                id,
                payload.diagnostico,
                payload.medicamento,
                payload.dosis,
                payload.fecha_inicio,
                payload.fecha_fin,
                payload.notas,
            ],
        )?;

        if rows_affected == 0 {
            return Ok(None);
        }
        self.get_treatment(id)
    }

    /// Get a treatment by id.
    pub fn get_treatment(&self, id: i64) -> DbResult<Option<Treatment>> {
        self.conn
            .query_row(
                r#"
                SELECT id_tratamiento, id_paciente, diagnostico, medicamento,
                       dosis, fecha_inicio, fecha_fin, notas
                FROM tratamientos
                WHERE id_tratamiento = ?
                "#,
                [id],
                treatment_from_row,
            )
            .optional()
            .map_err(Into::into)
    }

    /// All treatments of one patient, in insertion order.
    pub fn treatments_for_patient(&self, patient_id: i64) -> DbResult<Vec<Treatment>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id_tratamiento, id_paciente, diagnostico, medicamento,
                   dosis, fecha_inicio, fecha_fin, notas
            FROM tratamientos
            WHERE id_paciente = ?
            ORDER BY id_tratamiento ASC
            "#,
        )?;

        let rows = stmt.query_map([patient_id], treatment_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Treatments whose diagnosis contains the query, case-insensitively.
    pub fn treatments_by_diagnosis(&self, query: &str) -> DbResult<Vec<Treatment>> {
        let pattern = format!("%{query}%");
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id_tratamiento, id_paciente, diagnostico, medicamento,
                   dosis, fecha_inicio, fecha_fin, notas
            FROM tratamientos
            WHERE LOWER(diagnostico) LIKE LOWER(?1)
            ORDER BY id_tratamiento ASC
            "#,
        )?;

        let rows = stmt.query_map(params![pattern], treatment_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Delete a treatment.
    pub fn delete_treatment(&self, id: i64) -> DbResult<bool> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM tratamientos WHERE id_tratamiento = ?", [id])?;
        Ok(rows_affected > 0)
    }
}
