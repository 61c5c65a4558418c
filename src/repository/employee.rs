//! Repository implementation for employees.
//!
//! Filtering, sorting and paging are all pushed down to SQL so that large
//! companies never get materialized in memory.

use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;
use uuid::Uuid;

use crate::{
    domain::employee::{Employee, NewEmployee, UpdateEmployee},
    models::employee::{
        Employee as DbEmployee, NewEmployee as DbNewEmployee, UpdateEmployee as DbUpdateEmployee,
    },
    repository::{
        DieselRepository, EmployeeListQuery, EmployeeReader, EmployeeWriter, SortDirection,
        SortField,
        errors::{RepositoryError, RepositoryResult},
    },
    schema::employees,
};

fn filtered(query: &EmployeeListQuery) -> employees::BoxedQuery<'static, Sqlite> {
    let mut q = employees::table
        .filter(employees::company_id.eq(query.company_id.to_string()))
        .into_boxed();

    if let Some(min_age) = query.min_age {
        q = q.filter(employees::age.ge(min_age));
    }
    if let Some(max_age) = query.max_age {
        q = q.filter(employees::age.le(max_age));
    }
    if let Some(term) = &query.search {
        q = q.filter(employees::name.like(format!("%{term}%")));
    }

    q
}

fn sorted(
    q: employees::BoxedQuery<'static, Sqlite>,
    query: &EmployeeListQuery,
) -> employees::BoxedQuery<'static, Sqlite> {
    match (query.sort.field, query.sort.direction) {
        (SortField::Id, SortDirection::Asc) => q.order(employees::id.asc()),
        (SortField::Id, SortDirection::Desc) => q.order(employees::id.desc()),
        (SortField::Name, SortDirection::Asc) => q.order(employees::name.asc()),
        (SortField::Name, SortDirection::Desc) => q.order(employees::name.desc()),
        (SortField::Age, SortDirection::Asc) => q.order(employees::age.asc()),
        (SortField::Age, SortDirection::Desc) => q.order(employees::age.desc()),
        (SortField::Position, SortDirection::Asc) => q.order(employees::position.asc()),
        (SortField::Position, SortDirection::Desc) => q.order(employees::position.desc()),
    }
}

impl EmployeeReader for DieselRepository {
    fn get_employee_by_id(&self, id: Uuid) -> RepositoryResult<Option<Employee>> {
        let mut conn = self.conn()?;
        let db_employee = employees::table
            .find(id.to_string())
            .first::<DbEmployee>(&mut conn)
            .optional()?;

        match db_employee {
            Some(db_employee) => Ok(Some(
                Employee::try_from(db_employee).map_err(RepositoryError::from)?,
            )),
            None => Ok(None),
        }
    }

    fn list_employees(&self, query: EmployeeListQuery) -> RepositoryResult<(usize, Vec<Employee>)> {
        let mut conn = self.conn()?;

        let total: i64 = filtered(&query).count().get_result(&mut conn)?;

        let mut items_query = sorted(filtered(&query), &query);

        if let Some(pagination) = &query.pagination {
            let page = pagination.page.max(1) as i64;
            let per_page = pagination.per_page as i64;
            items_query = items_query
                .limit(per_page)
                .offset((page - 1) * per_page);
        }

        let items = items_query
            .load::<DbEmployee>(&mut conn)?
            .into_iter()
            .map(|e| Employee::try_from(e).map_err(RepositoryError::from))
            .collect::<RepositoryResult<Vec<_>>>()?;

        Ok((total as usize, items))
    }
}

impl EmployeeWriter for DieselRepository {
    fn create_employee(&self, new_employee: &NewEmployee) -> RepositoryResult<Employee> {
        let mut conn = self.conn()?;
        let insertable: DbNewEmployee = new_employee.into();

        let created = diesel::insert_into(employees::table)
            .values(&insertable)
            .get_result::<DbEmployee>(&mut conn)?;

        Employee::try_from(created).map_err(RepositoryError::from)
    }

    fn update_employee(&self, id: Uuid, updates: &UpdateEmployee) -> RepositoryResult<Employee> {
        let mut conn = self.conn()?;

        let db_updates = DbUpdateEmployee {
            name: updates.name.as_str(),
            age: updates.age,
            position: updates.position.as_str(),
            updated_at: Utc::now().naive_utc(),
        };

        let updated = diesel::update(employees::table.find(id.to_string()))
            .set(&db_updates)
            .get_result::<DbEmployee>(&mut conn)?;

        Employee::try_from(updated).map_err(RepositoryError::from)
    }

    fn delete_employee(&self, id: Uuid) -> RepositoryResult<usize> {
        let mut conn = self.conn()?;
        let deleted =
            diesel::delete(employees::table.find(id.to_string())).execute(&mut conn)?;
        Ok(deleted)
    }
}
