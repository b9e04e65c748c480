use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// A category record as exchanged with the remote service.
///
/// `id == 0` marks a record that has never been persisted.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rubro {
    #[serde(default)]
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub denominacion: String,
    #[serde(rename = "rubroPadre", default, deserialize_with = "null_as_empty")]
    pub rubro_padre: String,
    #[serde(rename = "EstadoRubro", default, deserialize_with = "null_as_empty")]
    pub estado_rubro: String,
    #[serde(rename = "fechaAlta", default, deserialize_with = "null_as_empty")]
    pub fecha_alta: String,
    #[serde(rename = "fechaBaja", default, deserialize_with = "null_as_empty")]
    pub fecha_baja: String,
    #[serde(rename = "fechaModificacion", default, deserialize_with = "null_as_empty")]
    pub fecha_modificacion: String,
}

impl Rubro {
    /// Zero-value record used for the "new" action
    pub fn blank() -> Self {
        Self::default()
    }

    pub fn is_new(&self) -> bool {
        self.id == 0
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Which dialog a modal session shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalType {
    Create,
    Update,
    Delete,
}

impl ModalType {
    pub fn title(&self) -> &'static str {
        match self {
            ModalType::Create => "Nuevo Rubro",
            ModalType::Update => "Editar Rubro",
            ModalType::Delete => "Borrar Rubro",
        }
    }
}

/// Editable fields of the Rubro form, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RubroField {
    Denominacion,
    RubroPadre,
    EstadoRubro,
    FechaAlta,
    FechaBaja,
}

impl RubroField {
    pub const ALL: [RubroField; 5] = [
        RubroField::Denominacion,
        RubroField::RubroPadre,
        RubroField::EstadoRubro,
        RubroField::FechaAlta,
        RubroField::FechaBaja,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            RubroField::Denominacion => "Nombre del Rubro",
            RubroField::RubroPadre => "Rubro Padre",
            RubroField::EstadoRubro => "Estado Rubro",
            RubroField::FechaAlta => "Fecha Alta",
            RubroField::FechaBaja => "Fecha Baja",
        }
    }

    /// Date fields are edited through a digits-only input
    pub fn is_numeric(&self) -> bool {
        matches!(self, RubroField::FechaAlta | RubroField::FechaBaja)
    }

    pub fn get<'a>(&self, rubro: &'a Rubro) -> &'a str {
        match self {
            RubroField::Denominacion => &rubro.denominacion,
            RubroField::RubroPadre => &rubro.rubro_padre,
            RubroField::EstadoRubro => &rubro.estado_rubro,
            RubroField::FechaAlta => &rubro.fecha_alta,
            RubroField::FechaBaja => &rubro.fecha_baja,
        }
    }

    pub fn set(&self, rubro: &mut Rubro, value: String) {
        match self {
            RubroField::Denominacion => rubro.denominacion = value,
            RubroField::RubroPadre => rubro.rubro_padre = value,
            RubroField::EstadoRubro => rubro.estado_rubro = value,
            RubroField::FechaAlta => rubro.fecha_alta = value,
            RubroField::FechaBaja => rubro.fecha_baja = value,
        }
    }
}

/// Interpret a numeric date value (`YYYYMMDD`) as a calendar date.
pub fn parse_compact_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.len() != 8 {
        return None;
    }
    NaiveDate::parse_from_str(value, "%Y%m%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rubro_deserialization_uses_service_keys() {
        let json = r#"{
            "id": 7,
            "denominacion": "Bebidas",
            "rubroPadre": "Almacén",
            "EstadoRubro": "Activo",
            "fechaAlta": "20240101",
            "fechaBaja": "20241231",
            "fechaModificacion": "20240615"
        }"#;

        let rubro: Rubro = serde_json::from_str(json).unwrap();
        assert_eq!(rubro.id, 7);
        assert_eq!(rubro.rubro_padre, "Almacén");
        assert_eq!(rubro.estado_rubro, "Activo");
        assert_eq!(rubro.fecha_modificacion, "20240615");
        assert!(!rubro.is_new());
    }

    #[test]
    fn test_missing_and_null_fields_default_to_empty() {
        let json = r#"{"id": 3, "denominacion": "Lácteos", "rubroPadre": null}"#;
        let rubro: Rubro = serde_json::from_str(json).unwrap();
        assert_eq!(rubro.denominacion, "Lácteos");
        assert_eq!(rubro.rubro_padre, "");
        assert_eq!(rubro.fecha_baja, "");
    }

    #[test]
    fn test_serialization_keeps_original_key_casing() {
        let value = serde_json::to_value(Rubro::blank()).unwrap();
        assert_eq!(value["id"], 0);
        assert!(value.get("EstadoRubro").is_some());
        assert!(value.get("rubroPadre").is_some());
        assert!(value.get("estado_rubro").is_none());
    }

    #[test]
    fn test_blank_record_is_new() {
        let blank = Rubro::blank();
        assert!(blank.is_new());
        for field in RubroField::ALL {
            assert_eq!(field.get(&blank), "");
        }
    }

    #[test]
    fn test_field_accessors() {
        let mut rubro = Rubro::blank();
        RubroField::EstadoRubro.set(&mut rubro, "Activo".to_string());
        assert_eq!(rubro.estado_rubro, "Activo");
        assert_eq!(RubroField::EstadoRubro.get(&rubro), "Activo");
        assert!(RubroField::FechaBaja.is_numeric());
        assert!(!RubroField::Denominacion.is_numeric());
    }

    #[test]
    fn test_parse_compact_date() {
        assert_eq!(
            parse_compact_date("20240101"),
            NaiveDate::from_ymd_opt(2024, 1, 1)
        );
        assert_eq!(parse_compact_date("2024011"), None);
        assert_eq!(parse_compact_date("20241301"), None);
    }
}
