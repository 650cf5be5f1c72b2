//! SQLite schema definition.

/// Complete database schema for clinica.
pub const SCHEMA: &str = r#"
-- Enable foreign keys
PRAGMA foreign_keys = ON;

-- ============================================================================
-- Patients (root records)
-- ============================================================================

CREATE TABLE IF NOT EXISTS pacientes (
    id_paciente INTEGER PRIMARY KEY AUTOINCREMENT,
    nombre TEXT NOT NULL,
    apellido TEXT NOT NULL,
    fecha_nacimiento TEXT NOT NULL,              -- ISO YYYY-MM-DD
    sexo TEXT NOT NULL DEFAULT '',               -- 'M', 'F', or '' (unknown)
    telefono TEXT,
    direccion TEXT,
    tipo_sangre TEXT,                            -- free-text token, e.g. 'O+'
    alergias TEXT,
    activo INTEGER NOT NULL DEFAULT 1
);

CREATE INDEX IF NOT EXISTS idx_pacientes_activo ON pacientes(activo);
CREATE INDEX IF NOT EXISTS idx_pacientes_tipo_sangre ON pacientes(tipo_sangre);

-- ============================================================================
-- Appointments (citas)
-- ============================================================================

CREATE TABLE IF NOT EXISTS citas (
    id_cita INTEGER PRIMARY KEY AUTOINCREMENT,
    id_paciente INTEGER NOT NULL REFERENCES pacientes(id_paciente) ON DELETE CASCADE,
    fecha TEXT NOT NULL,                         -- ISO YYYY-MM-DD
    hora TEXT NOT NULL,                          -- HH:MM or HH:MM:SS
    motivo TEXT NOT NULL,
    medico_asignado TEXT,
    estatus TEXT NOT NULL DEFAULT 'Programada'
);

CREATE INDEX IF NOT EXISTS idx_citas_paciente ON citas(id_paciente);
CREATE INDEX IF NOT EXISTS idx_citas_fecha ON citas(fecha);
CREATE INDEX IF NOT EXISTS idx_citas_estatus ON citas(estatus);

-- ============================================================================
-- Treatments (tratamientos)
-- ============================================================================

CREATE TABLE IF NOT EXISTS tratamientos (
    id_tratamiento INTEGER PRIMARY KEY AUTOINCREMENT,
    id_paciente INTEGER NOT NULL REFERENCES pacientes(id_paciente) ON DELETE CASCADE,
    diagnostico TEXT NOT NULL,
    medicamento TEXT NOT NULL,
    dosis TEXT NOT NULL,
    fecha_inicio TEXT,                           -- ISO YYYY-MM-DD
    fecha_fin TEXT,                              -- ISO YYYY-MM-DD
    notas TEXT
);

CREATE INDEX IF NOT EXISTS idx_tratamientos_paciente ON tratamientos(id_paciente);
CREATE INDEX IF NOT EXISTS idx_tratamientos_diagnostico ON tratamientos(diagnostico);

-- ============================================================================
-- Medications (medicamentos)
-- ============================================================================

CREATE TABLE IF NOT EXISTS medicamentos (
    id_medicamento INTEGER PRIMARY KEY AUTOINCREMENT,
    id_paciente INTEGER NOT NULL REFERENCES pacientes(id_paciente) ON DELETE CASCADE,
    medicamento TEXT NOT NULL,
    dosis TEXT NOT NULL,
    frecuencia TEXT NOT NULL,
    fecha_inicio TEXT,                           -- ISO YYYY-MM-DD
    fecha_fin TEXT                               -- ISO YYYY-MM-DD
);

CREATE INDEX IF NOT EXISTS idx_medicamentos_paciente ON medicamentos(id_paciente);
"#;
