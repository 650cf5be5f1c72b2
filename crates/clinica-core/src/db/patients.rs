//! Patient database operations.

use rusqlite::{params, OptionalExtension};

use super::{Database, DbResult};
use crate::models::{NewPatient, PagedResult, Patient, PatientFilter, Sex};

fn patient_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Patient> {
    Ok(Patient {
        id_paciente: row.get(0)?,
        nombre: row.get(1)?,
        apellido: row.get(2)?,
        fecha_nacimiento: row.get(3)?,
        sexo: Sex::from_token(&row.get::<_, String>(4)?),
        telefono: row.get(5)?,
        direccion: row.get(6)?,
        tipo_sangre: row.get(7)?,
        alergias: row.get(8)?,
        activo: row.get(9)?,
    })
}

impl Database {
    /// Insert a new patient, returning the stored record with its generated id.
    pub fn insert_patient(&self, payload: &NewPatient) -> DbResult<Patient> {
        self.conn.execute(
            r#"
            INSERT INTO pacientes (
                nombre, apellido, fecha_nacimiento, sexo, telefono,
                direccion, tipo_sangre, alergias, activo
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
            params![
                payload.nombre,
                payload.apellido,
                payload.fecha_nacimiento,
                payload.sexo.as_str(),
                payload.telefono,
                payload.direccion,
                payload.tipo_sangre,
                payload.alergias,
                payload.activo,
            ],
        )?;

        Ok(Patient {
            id_paciente: self.conn.last_insert_rowid(),
            nombre: payload.nombre.clone(),
            apellido: payload.apellido.clone(),
            fecha_nacimiento: payload.fecha_nacimiento.clone(),
            sexo: payload.sexo,
            telefono: payload.telefono.clone(),
            direccion: payload.direccion.clone(),
            tipo_sangre: payload.tipo_sangre.clone(),
            alergias: payload.alergias.clone(),
            activo: payload.activo,
        })
    }

    /// Update an existing patient. Returns the stored record, or None when
    /// the id does not resolve.
    pub fn update_patient(&self, id: i64, payload: &NewPatient) -> DbResult<Option<Patient>> {
        let rows_affected = self.conn.execute(
            r#"
            UPDATE pacientes SET
                nombre = ?2,
                apellido = ?3,
                fecha_nacimiento = ?4,
                sexo = ?5,
                telefono = ?6,
                direccion = ?7,
                tipo_sangre = ?8,
                alergias = ?9,
                activo = ?10
            WHERE id_paciente = ?1
            "#,
            params![
                id,
                payload.nombre,
                payload.apellido,
                payload.fecha_nacimiento,
                payload.sexo.as_str(),
                payload.telefono,
                payload.direccion,
                payload.tipo_sangre,
                payload.alergias,
                payload.activo,
            ],
        )?;

        if rows_affected == 0 {
            return Ok(None);
        }
        self.get_patient(id)
    }

    /// Get a patient by id.
    pub fn get_patient(&self, id: i64) -> DbResult<Option<Patient>> {
        self.conn
            .query_row(
                r#"
                SELECT id_paciente, nombre, apellido, fecha_nacimiento, sexo,
                       telefono, direccion, tipo_sangre, alergias, activo
                FROM pacientes
                WHERE id_paciente = ?
                "#,
                [id],
                patient_from_row,
            )
            .optional()
            .map_err(Into::into)
    }

    /// List one page of patients matching the filter, ordered by ascending id
    /// so consecutive pages never skip or repeat a record.
    pub fn list_patients(
        &self,
        page: u32,
        page_size: u32,
        filter: &PatientFilter,
    ) -> DbResult<PagedResult<Patient>> {
        let page = page.max(1);
        let offset = i64::from(page - 1) * i64::from(page_size);

        let mut stmt = self.conn.prepare(
            r#"
            SELECT id_paciente, nombre, apellido, fecha_nacimiento, sexo,
                   telefono, direccion, tipo_sangre, alergias, activo
            FROM pacientes
            WHERE (?1 = 0 OR activo = 1)
              AND (?2 IS NULL OR tipo_sangre = ?2)
            ORDER BY id_paciente ASC
            LIMIT ?3 OFFSET ?4
            "#,
        )?;

        let rows = stmt.query_map(
            params![filter.active_only, filter.tipo_sangre, page_size, offset],
            patient_from_row,
        )?;
        let items = rows.collect::<Result<Vec<_>, _>>()?;

        Ok(PagedResult {
            items,
            page,
            page_size,
            total: self.count_patients(filter)?,
        })
    }

    /// Count patients matching the filter.
    pub fn count_patients(&self, filter: &PatientFilter) -> DbResult<u64> {
        let total: i64 = self.conn.query_row(
            r#"
            SELECT COUNT(*)
            FROM pacientes
            WHERE (?1 = 0 OR activo = 1)
              AND (?2 IS NULL OR tipo_sangre = ?2)
            "#,
            params![filter.active_only, filter.tipo_sangre],
            |row| row.get(0),
        )?;
        Ok(total as u64)
    }

    /// All patients with an exact blood-type token, ordered by id.
    pub fn patients_by_blood_type(&self, tipo: &str) -> DbResult<Vec<Patient>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id_paciente, nombre, apellido, fecha_nacimiento, sexo,
                   telefono, direccion, tipo_sangre, alergias, activo
            FROM pacientes
            WHERE tipo_sangre = ?
            ORDER BY id_paciente ASC
            "#,
        )?;

        let rows = stmt.query_map([tipo], patient_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Delete a patient. Dependent citas, tratamientos and medicamentos are
    /// removed by the schema's ON DELETE CASCADE.
    pub fn delete_patient(&self, id: i64) -> DbResult<bool> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM pacientes WHERE id_paciente = ?", [id])?;
        Ok(rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_db() -> Database {
        Database::open_in_memory().unwrap()
    }

    fn ana() -> NewPatient {
        NewPatient::new("Ana".into(), "Ruiz".into(), "1990-05-01".into())
    }

    #[test]
    fn test_insert_and_get() {
        let db = setup_db();

        let mut payload = ana();
        payload.tipo_sangre = Some("O+".into());
        payload.sexo = Sex::F;

        let patient = db.insert_patient(&payload).unwrap();
        assert!(patient.id_paciente > 0);
        assert!(patient.activo);

        let retrieved = db.get_patient(patient.id_paciente).unwrap().unwrap();
        assert_eq!(retrieved, patient);
    }

    #[test]
    fn test_get_missing_returns_none() {
        let db = setup_db();
        assert!(db.get_patient(999_999).unwrap().is_none());
    }

    #[test]
    fn test_update_patient() {
        let db = setup_db();

        let patient = db.insert_patient(&ana()).unwrap();

        let mut changed = ana();
        changed.telefono = Some("555-0101".into());
        changed.activo = false;

        let updated = db
            .update_patient(patient.id_paciente, &changed)
            .unwrap()
            .unwrap();
        assert_eq!(updated.telefono, Some("555-0101".into()));
        assert!(!updated.activo);

        assert!(db.update_patient(999_999, &changed).unwrap().is_none());
    }

    #[test]
    fn test_list_pages_in_id_order() {
        let db = setup_db();
        for i in 0..5 {
            let payload = NewPatient::new(format!("P{i}"), "Test".into(), "1990-01-01".into());
            db.insert_patient(&payload).unwrap();
        }

        let filter = PatientFilter::default();
        let first = db.list_patients(1, 2, &filter).unwrap();
        assert_eq!(first.items.len(), 2);
        assert_eq!(first.total, 5);
        assert!(first.has_more());

        let last = db.list_patients(3, 2, &filter).unwrap();
        assert_eq!(last.items.len(), 1);
        assert!(!last.has_more());

        assert!(first.items[0].id_paciente < first.items[1].id_paciente);
    }

    #[test]
    fn test_list_filters_active_only() {
        let db = setup_db();
        let mut inactive = ana();
        inactive.activo = false;
        db.insert_patient(&inactive).unwrap();
        let active = db.insert_patient(&ana()).unwrap();

        let page = db
            .list_patients(1, 10, &PatientFilter::active())
            .unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].id_paciente, active.id_paciente);
    }

    #[test]
    fn test_blood_type_match_is_case_sensitive() {
        let db = setup_db();
        let mut upper = ana();
        upper.tipo_sangre = Some("O+".into());
        db.insert_patient(&upper).unwrap();

        let mut lower = ana();
        lower.tipo_sangre = Some("o+".into());
        db.insert_patient(&lower).unwrap();

        let matches = db.patients_by_blood_type("O+").unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].tipo_sangre, Some("O+".into()));

        let filtered = db
            .list_patients(1, 10, &PatientFilter::blood_type("O+"))
            .unwrap();
        assert_eq!(filtered.total, 1);
    }

    #[test]
    fn test_delete_patient() {
        let db = setup_db();
        let patient = db.insert_patient(&ana()).unwrap();

        assert!(db.delete_patient(patient.id_paciente).unwrap());
        assert!(!db.delete_patient(patient.id_paciente).unwrap());
        assert!(db.get_patient(patient.id_paciente).unwrap().is_none());
    }
}
