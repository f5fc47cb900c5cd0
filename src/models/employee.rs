//! Employee model

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::{
    enums::{Department, NucleoId},
    schema::Schema,
    search::Searchable,
};

pub const EMPLOYEE_SCHEMA: Schema = Schema {
    text_fields: &["registration", "networkUsername", "email", "phone", "position"],
    nullable_fields: &["department", "nucleoId"],
    timestamp_fields: &["createdAt", "updatedAt"],
};

/// Employee record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: String,
    pub name: String,
    /// Staff registration number
    #[serde(default)]
    pub registration: String,
    #[serde(default)]
    pub network_username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub department: Option<Department>,
    #[serde(default)]
    pub nucleo_id: Option<NucleoId>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

impl Searchable for Employee {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str(), self.email.as_str()];
        fields.extend(self.department.map(|d| d.as_str()));
        fields
    }
}

/// Create employee request
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmployee {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[serde(default)]
    pub registration: Option<String>,
    #[serde(default)]
    pub network_username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub department: Option<Department>,
    #[serde(default)]
    pub nucleo_id: Option<NucleoId>,
}

/// Update employee request
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEmployee {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration: Option<String>,
    /// `null` clears to an empty username
    #[serde(
        default,
        with = "::serde_with::rust::double_option",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<String>)]
    pub network_username: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(
        default,
        with = "::serde_with::rust::double_option",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<String>)]
    pub department: Option<Option<Department>>,
    #[serde(
        default,
        with = "::serde_with::rust::double_option",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<String>)]
    pub nucleo_id: Option<Option<NucleoId>>,
}

impl From<&Employee> for UpdateEmployee {
    /// Full edit draft: every field present, empty relations sent as `null`
    fn from(e: &Employee) -> Self {
        Self {
            name: Some(e.name.clone()),
            registration: Some(e.registration.clone()),
            network_username: Some(Some(e.network_username.clone()).filter(|u| !u.is_empty())),
            email: Some(e.email.clone()),
            phone: Some(e.phone.clone()),
            position: Some(e.position.clone()),
            department: Some(e.department),
            nucleo_id: Some(e.nucleo_id),
        }
    }
}
