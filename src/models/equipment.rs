//! Equipment model

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::{
    enums::{Department, EquipmentStatus, EquipmentType, NucleoId},
    schema::Schema,
    search::Searchable,
};

pub const EQUIPMENT_SCHEMA: Schema = Schema {
    text_fields: &["model", "manufacturer", "ipAddress", "notes"],
    nullable_fields: &["nucleoId", "employeeId", "departmentId", "purchaseDate"],
    timestamp_fields: &["createdAt", "updatedAt"],
};

/// Equipment record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Equipment {
    pub id: String,
    /// Unique across the collection
    pub serial_number: String,
    #[serde(rename = "type")]
    pub equipment_type: EquipmentType,
    pub name: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub manufacturer: String,
    pub status: EquipmentStatus,
    #[serde(default)]
    pub ip_address: String,
    #[serde(default)]
    pub nucleo_id: Option<NucleoId>,
    /// May dangle after the employee is deleted
    #[serde(default)]
    pub employee_id: Option<String>,
    #[serde(default)]
    pub department_id: Option<Department>,
    #[serde(default)]
    pub purchase_date: Option<String>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

impl Searchable for Equipment {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![
            self.name.as_str(),
            self.serial_number.as_str(),
            self.equipment_type.as_str(),
            self.status.as_str(),
        ];
        fields.extend(self.department_id.map(|d| d.as_str()));
        fields.extend(self.nucleo_id.map(|n| n.as_str()));
        fields
    }
}

/// Create equipment request
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEquipment {
    #[validate(length(min = 1, message = "Serial number is required"))]
    pub serial_number: String,
    #[serde(rename = "type")]
    pub equipment_type: EquipmentType,
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    pub status: EquipmentStatus,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub manufacturer: Option<String>,
    #[serde(default)]
    pub ip_address: Option<String>,
    #[serde(default)]
    pub nucleo_id: Option<NucleoId>,
    #[serde(default)]
    pub employee_id: Option<String>,
    #[serde(default)]
    pub department_id: Option<Department>,
    /// YYYY-MM-DD
    #[serde(default)]
    pub purchase_date: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Update equipment request.
///
/// Relational fields distinguish "leave unchanged" (absent) from "clear"
/// (`null`); a cleared field is written as `null`, never left at its old value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEquipment {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "Serial number is required"))]
    pub serial_number: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub equipment_type: Option<EquipmentType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<EquipmentStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    #[serde(
        default,
        with = "::serde_with::rust::double_option",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<String>)]
    pub nucleo_id: Option<Option<NucleoId>>,
    #[serde(
        default,
        with = "::serde_with::rust::double_option",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<String>)]
    pub employee_id: Option<Option<String>>,
    #[serde(
        default,
        with = "::serde_with::rust::double_option",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<String>)]
    pub department_id: Option<Option<Department>>,
    #[serde(
        default,
        with = "::serde_with::rust::double_option",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<String>)]
    pub purchase_date: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl From<&Equipment> for UpdateEquipment {
    fn from(e: &Equipment) -> Self {
        Self {
            serial_number: Some(e.serial_number.clone()),
            equipment_type: Some(e.equipment_type),
            name: Some(e.name.clone()),
            status: Some(e.status),
            model: Some(e.model.clone()),
            manufacturer: Some(e.manufacturer.clone()),
            ip_address: Some(e.ip_address.clone()),
            nucleo_id: Some(e.nucleo_id),
            employee_id: Some(e.employee_id.clone()),
            department_id: Some(e.department_id),
            purchase_date: Some(e.purchase_date.clone()),
            notes: Some(e.notes.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_update_distinguishes_absent_from_null() {
        let absent: UpdateEquipment = serde_json::from_value(json!({ "name": "PC" })).unwrap();
        assert_eq!(absent.department_id, None);

        let cleared: UpdateEquipment =
            serde_json::from_value(json!({ "departmentId": null })).unwrap();
        assert_eq!(cleared.department_id, Some(None));

        let body = serde_json::to_value(&cleared).unwrap();
        assert_eq!(body, json!({ "departmentId": null }));
    }

    #[test]
    fn test_create_validation() {
        let data: CreateEquipment = serde_json::from_value(json!({
            "serialNumber": "",
            "type": "Notebook",
            "name": "Notebook Dell",
            "status": "Disponível"
        }))
        .unwrap();
        assert!(data.validate().is_err());
    }

    #[test]
    fn test_equipment_reads_camel_case_document() {
        let eq: Equipment = serde_json::from_value(json!({
            "id": "x1",
            "serialNumber": "SN-001",
            "type": "Computador",
            "name": "Estação 01",
            "status": "Em uso",
            "departmentId": "COEN",
            "nucleoId": "salvador"
        }))
        .unwrap();
        assert_eq!(eq.department_id.unwrap().as_str(), "COEN");
        assert_eq!(eq.model, "");
        assert!(eq.search_fields().contains(&"salvador"));
    }
}
