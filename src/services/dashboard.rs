//! Dashboard aggregation
//!
//! Every figure is a pure function of the loaded equipment list, so the same
//! list always yields the same summary.

use std::collections::BTreeMap;

use chrono::DateTime;
use indexmap::IndexMap;

use super::guard;
use crate::{
    backend::Direction,
    error::AppResult,
    models::{
        dashboard::{ActivityEntry, DashboardSummary, StatusGroup},
        equipment::Equipment,
    },
    repository::Repository,
};

/// Entries in the recent-activity feed
pub const RECENT_ACTIVITY_LIMIT: usize = 5;

const NO_DEPARTMENT: &str = "Sem departamento";

/// Count by equipment type, keys in alphabetical order
pub fn count_by_type(items: &[Equipment]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for item in items {
        *counts.entry(item.equipment_type.to_string()).or_insert(0) += 1;
    }
    counts
}

/// Count by status, keys in first-seen order
pub fn count_by_status(items: &[Equipment]) -> IndexMap<String, usize> {
    let mut counts = IndexMap::new();
    for item in items {
        *counts.entry(item.status.to_string()).or_insert(0) += 1;
    }
    counts
}

pub fn count_by_department(items: &[Equipment]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for item in items {
        let key = item
            .department_id
            .map(|d| d.to_string())
            .unwrap_or_else(|| NO_DEPARTMENT.to_string());
        *counts.entry(key).or_insert(0) += 1;
    }
    counts
}

/// Records grouped by status, groups in first-seen order
pub fn group_by_status(items: &[Equipment]) -> Vec<StatusGroup> {
    let mut groups: IndexMap<String, Vec<Equipment>> = IndexMap::new();
    for item in items {
        groups
            .entry(item.status.to_string())
            .or_default()
            .push(item.clone());
    }
    groups
        .into_iter()
        .map(|(status, items)| StatusGroup { status, items })
        .collect()
}

/// `dd/mm/yyyy` for an ISO timestamp; other strings are shown as stored
fn display_date(iso: &str) -> String {
    DateTime::parse_from_rfc3339(iso)
        .map(|dt| dt.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|_| iso.to_string())
}

/// The most recently updated records, newest first
pub fn recent_activity(items: &[Equipment], limit: usize) -> Vec<ActivityEntry> {
    let mut sorted: Vec<&Equipment> = items.iter().collect();
    // ISO strings of one format order chronologically
    sorted.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    sorted
        .into_iter()
        .take(limit)
        .map(|e| ActivityEntry {
            id: e.id.clone(),
            description: format!("Equipamento {} ({}) atualizado", e.name, e.serial_number),
            date: display_date(&e.updated_at),
        })
        .collect()
}

pub fn summarize(equipment: &[Equipment], employee_count: usize) -> DashboardSummary {
    DashboardSummary {
        equipment_count: equipment.len(),
        employee_count,
        by_type: count_by_type(equipment),
        by_status: count_by_status(equipment),
        by_department: count_by_department(equipment),
        recent_activity: recent_activity(equipment, RECENT_ACTIVITY_LIMIT),
    }
}

#[derive(Clone)]
pub struct DashboardService {
    repository: Repository,
}

impl DashboardService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Summary and status groups derived from one load of the equipment list
    pub async fn snapshot(&self) -> AppResult<(DashboardSummary, Vec<StatusGroup>)> {
        let equipment = guard(
            self.repository.equipment.list_all("name", Direction::Asc).await,
            "load dashboard",
        )?;
        let employee_count = guard(self.repository.employees.count().await, "load dashboard")?;
        Ok((summarize(&equipment, employee_count), group_by_status(&equipment)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::enums::{Department, EquipmentStatus, EquipmentType};

    fn item(id: &str, ty: EquipmentType, status: EquipmentStatus, updated_at: &str) -> Equipment {
        Equipment {
            id: id.to_string(),
            serial_number: format!("SN-{}", id),
            equipment_type: ty,
            name: format!("Item {}", id),
            model: String::new(),
            manufacturer: String::new(),
            status,
            ip_address: String::new(),
            nucleo_id: None,
            employee_id: None,
            department_id: None,
            purchase_date: None,
            notes: String::new(),
            created_at: "2024-01-01T00:00:00.000Z".to_string(),
            updated_at: updated_at.to_string(),
        }
    }

    #[test]
    fn test_counts_by_status() {
        let items = vec![
            item("1", EquipmentType::Notebook, EquipmentStatus::EmUso, "2024-01-01T00:00:00.000Z"),
            item("2", EquipmentType::Notebook, EquipmentStatus::Disponivel, "2024-01-01T00:00:00.000Z"),
            item("3", EquipmentType::Scanner, EquipmentStatus::EmUso, "2024-01-01T00:00:00.000Z"),
        ];
        let by_status = count_by_status(&items);
        assert_eq!(by_status.len(), 2);
        assert_eq!(by_status["Em uso"], 2);
        assert_eq!(by_status["Disponível"], 1);
        assert_eq!(by_status.keys().next().map(String::as_str), Some("Em uso"));
    }

    #[test]
    fn test_counts_sum_to_len() {
        let statuses = EquipmentStatus::ALL;
        let types = EquipmentType::ALL;
        let items: Vec<_> = (0..23)
            .map(|i| {
                item(
                    &i.to_string(),
                    types[i % types.len()],
                    statuses[(i * 7) % statuses.len()],
                    "2024-01-01T00:00:00.000Z",
                )
            })
            .collect();
        assert_eq!(count_by_status(&items).values().sum::<usize>(), items.len());
        assert_eq!(count_by_type(&items).values().sum::<usize>(), items.len());
        assert_eq!(count_by_department(&items).values().sum::<usize>(), items.len());
        assert!(count_by_status(&[]).is_empty());
    }

    #[test]
    fn test_types_sorted_alphabetically() {
        let items = vec![
            item("1", EquipmentType::WiFi, EquipmentStatus::EmUso, ""),
            item("2", EquipmentType::Computador, EquipmentStatus::EmUso, ""),
            item("3", EquipmentType::Impressora, EquipmentStatus::EmUso, ""),
        ];
        let keys: Vec<_> = count_by_type(&items).into_keys().collect();
        assert_eq!(keys, vec!["Computador", "Impressora", "WiFi"]);
    }

    #[test]
    fn test_department_fallback_bucket() {
        let mut with_dept = item("1", EquipmentType::WiFi, EquipmentStatus::EmUso, "");
        with_dept.department_id = Some(Department::try_from("CTINF").unwrap());
        let items = vec![with_dept, item("2", EquipmentType::WiFi, EquipmentStatus::EmUso, "")];
        let counts = count_by_department(&items);
        assert_eq!(counts["CTINF"], 1);
        assert_eq!(counts[NO_DEPARTMENT], 1);
    }

    #[test]
    fn test_recent_activity_newest_five() {
        let items: Vec<_> = (1..=7)
            .map(|d| {
                item(
                    &d.to_string(),
                    EquipmentType::Switch,
                    EquipmentStatus::EmUso,
                    &format!("2024-03-0{}T12:00:00.000Z", d),
                )
            })
            .collect();
        let feed = recent_activity(&items, RECENT_ACTIVITY_LIMIT);
        assert_eq!(feed.len(), 5);
        assert_eq!(feed[0].id, "7");
        assert_eq!(feed[0].description, "Equipamento Item 7 (SN-7) atualizado");
        assert_eq!(feed[0].date, "07/03/2024");
        assert_eq!(feed[4].id, "3");
    }

    #[test]
    fn test_summary_is_deterministic() {
        let items = vec![
            item("1", EquipmentType::Notebook, EquipmentStatus::Baixado, "2024-01-02T00:00:00.000Z"),
            item("2", EquipmentType::Scanner, EquipmentStatus::EmUso, "2024-01-03T00:00:00.000Z"),
        ];
        let a = serde_json::to_value(summarize(&items, 4)).unwrap();
        let b = serde_json::to_value(summarize(&items, 4)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a["equipmentCount"], 2);
        assert_eq!(a["employeeCount"], 4);
    }

    #[test]
    fn test_group_by_status() {
        let items = vec![
            item("1", EquipmentType::Notebook, EquipmentStatus::EmManutencao, ""),
            item("2", EquipmentType::Scanner, EquipmentStatus::EmUso, ""),
            item("3", EquipmentType::Scanner, EquipmentStatus::EmManutencao, ""),
        ];
        let groups = group_by_status(&items);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].status, "Em manutenção");
        assert_eq!(groups[0].items.len(), 2);
    }

    #[tokio::test]
    async fn test_snapshot_reads_equipment_once() {
        use std::sync::Arc;

        use crate::backend::{Collection, MockDocumentStore};

        let mut store = MockDocumentStore::new();
        store
            .expect_query()
            .withf(|q| q.collection == Collection::Equipments)
            .times(1)
            .returning(|_| Ok(Vec::new()));
        store
            .expect_query()
            .withf(|q| q.collection == Collection::Employees)
            .times(1)
            .returning(|_| Ok(Vec::new()));
        let service = DashboardService::new(Repository::new(Arc::new(store)));

        let (summary, groups) = service.snapshot().await.unwrap();
        assert_eq!(summary.equipment_count, 0);
        assert_eq!(summary.employee_count, 0);
        assert!(groups.is_empty());
    }
}
