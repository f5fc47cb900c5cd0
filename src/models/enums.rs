//! Fixed reference enumerations compiled into the application

use serde::{de, Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

use crate::error::AppError;

// ---------------------------------------------------------------------------
// EquipmentType
// ---------------------------------------------------------------------------

/// Equipment category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum EquipmentType {
    Computador,
    Notebook,
    Impressora,
    Scanner,
    Switch,
    WiFi,
}

impl EquipmentType {
    pub const ALL: [EquipmentType; 6] = [
        EquipmentType::Computador,
        EquipmentType::Notebook,
        EquipmentType::Impressora,
        EquipmentType::Scanner,
        EquipmentType::Switch,
        EquipmentType::WiFi,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EquipmentType::Computador => "Computador",
            EquipmentType::Notebook => "Notebook",
            EquipmentType::Impressora => "Impressora",
            EquipmentType::Scanner => "Scanner",
            EquipmentType::Switch => "Switch",
            EquipmentType::WiFi => "WiFi",
        }
    }
}

impl std::fmt::Display for EquipmentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for EquipmentType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EquipmentType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| AppError::Validation(format!("Unknown equipment type: {}", s)))
    }
}

// ---------------------------------------------------------------------------
// EquipmentStatus
// ---------------------------------------------------------------------------

/// Equipment lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum EquipmentStatus {
    #[serde(rename = "Em uso")]
    EmUso,
    #[serde(rename = "Em manutenção")]
    EmManutencao,
    #[serde(rename = "Disponível")]
    Disponivel,
    #[serde(rename = "Baixado")]
    Baixado,
}

impl EquipmentStatus {
    pub const ALL: [EquipmentStatus; 4] = [
        EquipmentStatus::EmUso,
        EquipmentStatus::EmManutencao,
        EquipmentStatus::Disponivel,
        EquipmentStatus::Baixado,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EquipmentStatus::EmUso => "Em uso",
            EquipmentStatus::EmManutencao => "Em manutenção",
            EquipmentStatus::Disponivel => "Disponível",
            EquipmentStatus::Baixado => "Baixado",
        }
    }
}

impl std::fmt::Display for EquipmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for EquipmentStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EquipmentStatus::ALL
            .into_iter()
            .find(|st| st.as_str() == s)
            .ok_or_else(|| AppError::Validation(format!("Unknown equipment status: {}", s)))
    }
}

// ---------------------------------------------------------------------------
// UserRole
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum UserRole {
    Admin,
    User,
}

impl UserRole {
    pub const ALL: [UserRole; 2] = [UserRole::Admin, UserRole::User];

    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "Admin",
            UserRole::User => "User",
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Department
// ---------------------------------------------------------------------------

/// Department codes
pub static DEPARTMENTS: [&str; 50] = [
    "ASCOM", "ASJUR", "ASPLAN", "AUDIT", "CGERP-I", "CGERP-II", "CI", "COEN",
    "CORC", "COSB", "CPL", "CTEC", "CTINF", "DEAS", "DEOB-NE", "DEOB-SO",
    "DESP", "DHID", "DIARH", "DIESG", "DIFIN", "DIFRA", "DIGAN", "DIGEP",
    "DIOMB", "DIPAM", "DIPES", "DIPLO-NE", "DIPLO-SO", "DIPRO", "DIPSE-NE",
    "DIPSE-SO", "DISUP", "DIVAB", "DIVEB", "DMAB", "DMR", "DP", "DSA",
    "GEAFI", "GCEN", "SEAPE", "SECOB", "SECOM", "SEDES", "SEGET", "SEOFI",
    "SEPAT", "SEPCO", "SESMT",
];

/// A department code guaranteed to belong to [`DEPARTMENTS`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ToSchema)]
#[serde(into = "String")]
#[schema(value_type = String)]
pub struct Department(&'static str);

impl Department {
    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl TryFrom<&str> for Department {
    type Error = AppError;

    fn try_from(code: &str) -> Result<Self, Self::Error> {
        DEPARTMENTS
            .iter()
            .copied()
            .find(|d| *d == code)
            .map(Department)
            .ok_or_else(|| AppError::Validation(format!("Unknown department: {}", code)))
    }
}

impl TryFrom<String> for Department {
    type Error = AppError;

    fn try_from(code: String) -> Result<Self, Self::Error> {
        Department::try_from(code.as_str())
    }
}

impl From<Department> for String {
    fn from(d: Department) -> Self {
        d.0.to_string()
    }
}

// The code borrows from the static table, not from the input
impl<'de> Deserialize<'de> for Department {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Department::try_from(String::deserialize(deserializer)?).map_err(de::Error::custom)
    }
}

impl std::fmt::Display for Department {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Núcleo
// ---------------------------------------------------------------------------

/// Regional unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Nucleo {
    pub id: &'static str,
    pub name: &'static str,
}

pub static NUCLEOS: [Nucleo; 11] = [
    Nucleo { id: "salvador", name: "Salvador" },
    Nucleo { id: "barreiras", name: "Barreiras" },
    Nucleo { id: "caetite", name: "Caetité" },
    Nucleo { id: "feira-de-santana", name: "Feira de Santana" },
    Nucleo { id: "irece", name: "Irecê" },
    Nucleo { id: "juazeiro", name: "Juazeiro" },
    Nucleo { id: "ribeira-do-pombal", name: "Ribeira do Pombal" },
    Nucleo { id: "senhor-do-bonfim", name: "Senhor do Bonfim" },
    Nucleo { id: "seabra", name: "Seabra" },
    Nucleo { id: "santa-maria-da-vitoria", name: "Santa Maria da Vitória" },
    Nucleo { id: "teixeira-de-freitas", name: "Teixeira de Freitas" },
];

impl Nucleo {
    pub fn find(id: &str) -> Option<&'static Nucleo> {
        NUCLEOS.iter().find(|n| n.id == id)
    }
}

/// A núcleo id guaranteed to belong to [`NUCLEOS`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ToSchema)]
#[serde(into = "String")]
#[schema(value_type = String)]
pub struct NucleoId(&'static str);

impl NucleoId {
    pub fn as_str(&self) -> &'static str {
        self.0
    }

    pub fn nucleo(&self) -> &'static Nucleo {
        // Construction guarantees membership
        NUCLEOS
            .iter()
            .find(|n| n.id == self.0)
            .unwrap_or(&NUCLEOS[0])
    }
}

impl TryFrom<&str> for NucleoId {
    type Error = AppError;

    fn try_from(id: &str) -> Result<Self, Self::Error> {
        Nucleo::find(id)
            .map(|n| NucleoId(n.id))
            .ok_or_else(|| AppError::Validation(format!("Unknown núcleo: {}", id)))
    }
}

impl TryFrom<String> for NucleoId {
    type Error = AppError;

    fn try_from(id: String) -> Result<Self, Self::Error> {
        NucleoId::try_from(id.as_str())
    }
}

impl From<NucleoId> for String {
    fn from(n: NucleoId) -> Self {
        n.0.to_string()
    }
}

impl<'de> Deserialize<'de> for NucleoId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        NucleoId::try_from(String::deserialize(deserializer)?).map_err(de::Error::custom)
    }
}

impl std::fmt::Display for NucleoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serializes_as_display_string() {
        let value = serde_json::to_value(EquipmentStatus::EmManutencao).unwrap();
        assert_eq!(value, serde_json::json!("Em manutenção"));
        let back: EquipmentStatus = serde_json::from_value(serde_json::json!("Disponível")).unwrap();
        assert_eq!(back, EquipmentStatus::Disponivel);
    }

    #[test]
    fn test_type_from_str() {
        assert_eq!("WiFi".parse::<EquipmentType>().unwrap(), EquipmentType::WiFi);
        assert!("Tablet".parse::<EquipmentType>().is_err());
    }

    #[test]
    fn test_department_membership() {
        assert_eq!(Department::try_from("COEN").unwrap().as_str(), "COEN");
        assert!(Department::try_from("XYZ").is_err());
        assert!(serde_json::from_value::<Department>(serde_json::json!("nope")).is_err());
        let unique: std::collections::HashSet<_> = DEPARTMENTS.iter().collect();
        assert_eq!(unique.len(), DEPARTMENTS.len());
    }

    #[test]
    fn test_nucleo_lookup() {
        let id = NucleoId::try_from("irece").unwrap();
        assert_eq!(id.nucleo().name, "Irecê");
        assert!(NucleoId::try_from("todos").is_err());
        assert_eq!(NUCLEOS.len(), 11);
    }

    #[test]
    fn test_codes_deserialize_inside_owned_records() {
        #[derive(Deserialize)]
        struct Row {
            department: Option<Department>,
            nucleo: NucleoId,
        }
        let json = String::from(r#"{"department":"CTINF","nucleo":"seabra"}"#);
        let row: Row = serde_json::from_str(&json).unwrap();
        drop(json);
        assert_eq!(row.department.map(|d| d.as_str()), Some("CTINF"));
        assert_eq!(row.nucleo.nucleo().name, "Seabra");
        assert!(serde_json::from_str::<Row>(r#"{"department":null,"nucleo":"todos"}"#).is_err());
    }
}
