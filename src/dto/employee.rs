use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::domain::employee::{Employee, NewEmployee, UpdateEmployee};
use crate::dto::PayloadError;
use crate::pagination::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::repository::{Sort, SortDirection, SortField};
use crate::shaping::parse_fields;

/// Externally exposed shape of an [`Employee`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmployeeDto {
    pub id: Uuid,
    pub name: String,
    pub age: i32,
    pub position: String,
}

impl From<Employee> for EmployeeDto {
    fn from(employee: Employee) -> Self {
        Self {
            id: employee.id,
            name: employee.name,
            age: employee.age,
            position: employee.position,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
/// Payload for creating or replacing an employee.
pub struct EmployeePayload {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    #[validate(range(min = 0, max = 150))]
    pub age: i32,
    #[validate(length(min = 1, max = 120))]
    pub position: String,
}

impl EmployeePayload {
    pub fn to_new_employee(&self, company_id: Uuid) -> NewEmployee {
        NewEmployee::new(company_id, self.name.clone(), self.age, self.position.clone())
    }

    pub fn to_update_employee(&self) -> UpdateEmployee {
        UpdateEmployee::new(self.name.clone(), self.age, self.position.clone())
    }
}

impl From<&Employee> for EmployeePayload {
    fn from(employee: &Employee) -> Self {
        Self {
            name: employee.name.clone(),
            age: employee.age,
            position: employee.position.clone(),
        }
    }
}

/// Raw employee-listing query parameters as they arrive on the wire.
///
/// Everything is accepted as an optional string so malformed values can be
/// defaulted instead of failing deserialization.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeListParams {
    pub page: Option<String>,
    pub page_size: Option<String>,
    pub min_age: Option<String>,
    pub max_age: Option<String>,
    pub search_term: Option<String>,
    pub order_by: Option<String>,
    pub fields: Option<String>,
}

/// The validated form of [`EmployeeListParams`].
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeQueryOptions {
    pub page: usize,
    pub per_page: usize,
    pub min_age: Option<i32>,
    pub max_age: Option<i32>,
    pub search: Option<String>,
    pub sort: Sort,
    pub fields: Vec<String>,
}

impl EmployeeListParams {
    /// Normalizes raw parameters into query options.
    ///
    /// Only an inverted age range is an error; every other malformed value
    /// falls back to its default so older clients keep working.
    pub fn normalize(&self) -> Result<EmployeeQueryOptions, PayloadError> {
        let page = parse_or(self.page.as_deref(), 1).max(1);
        let per_page = parse_or(self.page_size.as_deref(), DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE);

        let min_age = self.min_age.as_deref().and_then(|v| v.trim().parse().ok());
        let max_age = self.max_age.as_deref().and_then(|v| v.trim().parse().ok());

        if let (Some(min), Some(max)) = (min_age, max_age)
            && min > max
        {
            return Err(PayloadError::InvalidAgeRange);
        }

        let search = self
            .search_term
            .as_deref()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let sort = self
            .order_by
            .as_deref()
            .and_then(parse_order_by)
            .unwrap_or_default();

        let fields = self
            .fields
            .as_deref()
            .map(parse_fields)
            .unwrap_or_default();

        Ok(EmployeeQueryOptions {
            page,
            per_page,
            min_age,
            max_age,
            search,
            sort,
            fields,
        })
    }
}

fn parse_or(raw: Option<&str>, default: usize) -> usize {
    raw.and_then(|v| v.trim().parse().ok()).unwrap_or(default)
}

/// Parses `orderBy` values such as `name`, `age desc` or `Position ASC`.
/// Unknown fields yield `None`, falling back to the default sort.
fn parse_order_by(raw: &str) -> Option<Sort> {
    let mut parts = raw.split_whitespace();
    let field = match parts.next()?.to_ascii_lowercase().as_str() {
        "id" => SortField::Id,
        "name" => SortField::Name,
        "age" => SortField::Age,
        "position" => SortField::Position,
        _ => return None,
    };
    let direction = match parts.next().map(str::to_ascii_lowercase).as_deref() {
        Some("desc") => SortDirection::Desc,
        _ => SortDirection::Asc,
    };
    Some(Sort { field, direction })
}
