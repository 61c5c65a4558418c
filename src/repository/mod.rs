use uuid::Uuid;

use crate::{
    db::{DbConnection, DbPool},
    domain::{
        company::{Company, NewCompany, UpdateCompany},
        employee::{Employee, NewEmployee, UpdateEmployee},
        user::{NewUser, User},
    },
    repository::errors::RepositoryResult,
};

pub mod company;
pub mod employee;
pub mod errors;
pub mod user;

#[derive(Debug, Clone, Copy)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Id,
    Name,
    Age,
    Position,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Default for Sort {
    fn default() -> Self {
        Self {
            field: SortField::Id,
            direction: SortDirection::Asc,
        }
    }
}

/// Filter, sort and paging options for listing a company's employees.
///
/// Everything here is pushed down to SQL by the repository.
#[derive(Debug, Clone)]
pub struct EmployeeListQuery {
    pub company_id: Uuid,
    pub min_age: Option<i32>,
    pub max_age: Option<i32>,
    pub search: Option<String>,
    pub sort: Sort,
    pub pagination: Option<Pagination>,
}

impl EmployeeListQuery {
    pub fn new(company_id: Uuid) -> Self {
        Self {
            company_id,
            min_age: None,
            max_age: None,
            search: None,
            sort: Sort::default(),
            pagination: None,
        }
    }

    pub fn age_range(mut self, min_age: Option<i32>, max_age: Option<i32>) -> Self {
        self.min_age = min_age;
        self.max_age = max_age;
        self
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn sort(mut self, sort: Sort) -> Self {
        self.sort = sort;
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

pub trait CompanyReader {
    fn get_company_by_id(&self, id: Uuid) -> RepositoryResult<Option<Company>>;
    fn list_companies(&self) -> RepositoryResult<Vec<Company>>;
    fn get_companies_by_ids(&self, ids: &[Uuid]) -> RepositoryResult<Vec<Company>>;
}

pub trait CompanyWriter {
    fn create_companies(&self, new_companies: &[NewCompany]) -> RepositoryResult<Vec<Company>>;
    /// Rejects the write with [`errors::RepositoryError::VersionConflict`]
    /// when the stored version differs from `updates.expected_version`.
    fn update_company(&self, id: Uuid, updates: &UpdateCompany) -> RepositoryResult<Company>;
    /// Removes the company and all its employees; returns the number of
    /// deleted company rows.
    fn delete_company(&self, id: Uuid) -> RepositoryResult<usize>;
}

pub trait EmployeeReader {
    fn get_employee_by_id(&self, id: Uuid) -> RepositoryResult<Option<Employee>>;
    fn list_employees(&self, query: EmployeeListQuery) -> RepositoryResult<(usize, Vec<Employee>)>;
}

pub trait EmployeeWriter {
    fn create_employee(&self, new_employee: &NewEmployee) -> RepositoryResult<Employee>;
    fn update_employee(&self, id: Uuid, updates: &UpdateEmployee) -> RepositoryResult<Employee>;
    fn delete_employee(&self, id: Uuid) -> RepositoryResult<usize>;
}

pub trait UserReader {
    fn get_user_by_username(&self, username: &str) -> RepositoryResult<Option<User>>;
}

pub trait UserWriter {
    fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User>;
}

/// Diesel-backed implementation of the repository traits.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub(crate) fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}
